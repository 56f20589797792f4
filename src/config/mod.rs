//! Configuration
//!
//! - [`PluginConfig`] - identity bundled with the host app's plugin config
//! - [`Configuration`] - the identity the session is currently running with
//! - [`ConfigStore`] - persists the identity across restarts
//! - [`store`] - storage backends

use std::sync::Arc;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::WechatError;
use crate::types::{AppId, LinkIdentifier};

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

pub const APP_ID_KEY: &str = "appId";
pub const LINK_IDENTIFIER_KEY: &str = "universalLink";

/// Plugin configuration as it appears in the host's config file.
///
/// ```rust
/// use wechat_open_bridge::config::PluginConfig;
///
/// let config: PluginConfig = serde_json::from_str(
///     r#"{ "appId": "wx1234567890abcdef", "universalLink": "https://example.com/app/" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.app_id.as_deref(), Some("wx1234567890abcdef"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConfig {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub universal_link: Option<String>,
}

/// Active application identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub app_id: AppId,
    pub link: Option<LinkIdentifier>,
}

impl Configuration {
    pub fn new(app_id: AppId, link: Option<LinkIdentifier>) -> Self {
        Self { app_id, link }
    }
}

/// Reads and writes the persisted [`Configuration`].
#[derive(Clone)]
pub struct ConfigStore {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("backend", &"KeyValueStore { .. }")
            .finish()
    }
}

impl ConfigStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn app_id(&self) -> Option<String> {
        self.backend.get(APP_ID_KEY)
    }

    pub fn link_identifier(&self) -> Option<String> {
        self.backend.get(LINK_IDENTIFIER_KEY)
    }

    /// Stored configuration, if a valid app id was persisted.
    pub fn restore(&self) -> Option<Configuration> {
        let raw = self.app_id()?;
        match AppId::new(raw) {
            Ok(app_id) => Some(Configuration::new(
                app_id,
                self.link_identifier().and_then(LinkIdentifier::new),
            )),
            Err(e) => {
                warn!("[WechatBridge] ignoring stored app id: {}", e);
                None
            }
        }
    }

    /// Persist `config`, clearing the stored link identifier when it has none.
    pub fn persist(&self, config: &Configuration) -> Result<(), WechatError> {
        self.backend.set(APP_ID_KEY, config.app_id.as_str())?;
        match &config.link {
            Some(link) => self.backend.set(LINK_IDENTIFIER_KEY, link.as_str()),
            None => self.backend.remove(LINK_IDENTIFIER_KEY),
        }
    }
}
