use std::sync::Arc;
use std::time::Duration;

use crate::config::{KeyValueStore, MemoryStore};
use crate::error::WechatError;
use crate::media::{MediaLoader, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS};
use crate::sdk::{NativeSdk, UnavailableSdk};

use super::WechatSession;

/// Builder for [`WechatSession`].
///
/// Without an explicit [`sdk`](Self::sdk) the session runs against
/// [`UnavailableSdk`], and without a [`store`](Self::store) the configuration
/// lives only in memory.
#[must_use]
#[derive(Default)]
pub struct WechatSessionBuilder {
    sdk: Option<Arc<dyn NativeSdk>>,
    store: Option<Arc<dyn KeyValueStore>>,
    media_timeout: Option<Duration>,
    media_connect_timeout: Option<Duration>,
}

impl std::fmt::Debug for WechatSessionBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatSessionBuilder")
            .field("sdk", &self.sdk.as_ref().map(|_| ".."))
            .field("store", &self.store.as_ref().map(|_| ".."))
            .field("media_timeout", &self.media_timeout)
            .field("media_connect_timeout", &self.media_connect_timeout)
            .finish()
    }
}

impl WechatSessionBuilder {
    pub fn sdk(mut self, sdk: Arc<dyn NativeSdk>) -> Self {
        self.sdk = Some(sdk);
        self
    }

    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Total timeout for fetching remote share media.
    pub fn media_timeout(mut self, timeout: Duration) -> Self {
        self.media_timeout = Some(timeout);
        self
    }

    pub fn media_connect_timeout(mut self, timeout: Duration) -> Self {
        self.media_connect_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<WechatSession, WechatError> {
        let timeout = self
            .media_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let connect_timeout = self
            .media_connect_timeout
            .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS));
        let media = MediaLoader::with_timeouts(timeout, connect_timeout)?;

        let sdk = self.sdk.unwrap_or_else(|| Arc::new(UnavailableSdk));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryStore::new()));

        Ok(WechatSession::from_parts(sdk, store, media))
    }
}
