//! Plugin session
//!
//! [`WechatSession`] owns everything the bridge keeps between calls: the
//! native SDK handle, the active configuration, the pending-operation registry
//! and the media loader. Hosts usually wrap it in an `Arc` so the same session
//! can serve host calls and SDK re-entry callbacks.
//!
//! Every dispatch operation runs the same gates, in order:
//!
//! 1. SDK linked, else [`WechatError::SdkUnavailable`]
//! 2. configured, else [`WechatError::NotConfigured`]
//! 3. WeChat installed, else [`WechatError::WechatNotInstalled`]
//! 4. nothing of the same kind pending, else [`WechatError::OperationInProgress`]
//! 5. options valid, else [`WechatError::InvalidArguments`]
//!
//! and then waits, without a timeout, for the WeChat app to answer through
//! [`handle_open_url`](WechatSession::handle_open_url) or
//! [`handle_user_activity`](WechatSession::handle_user_activity).
//!
//! Dropping an operation's future before it resolves frees its slot. An answer
//! that arrives afterwards is dropped.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, info, warn};

use crate::api::auth::build_auth_request;
use crate::api::invoice::build_invoice_request;
use crate::api::mini_program::build_launch_request;
use crate::api::payment::build_payment_request;
use crate::api::share::{build_share_request, validate_share_options};
use crate::api::{AuthOptions, InvoiceOptions, MiniProgramOptions, PaymentOptions, ShareOptions};
use crate::config::{ConfigStore, Configuration, KeyValueStore, PluginConfig};
use crate::error::WechatError;
use crate::media::MediaLoader;
use crate::registry::{PendingRegistry, Slot};
use crate::router;
use crate::sdk::{NativeSdk, ResponseHandler, SdkRequest, SdkResponse, UserActivity};
use crate::types::{
    AppId, AuthResponse, InstalledResponse, InvoiceResponse, LinkIdentifier,
    MiniProgramResponse, OperationKind,
};

mod builder;

pub use builder::WechatSessionBuilder;

/// A configured (or not yet configured) bridge to the WeChat OpenSDK.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use wechat_open_bridge::{api::AuthOptions, WechatSession};
///
/// let session = Arc::new(WechatSession::builder().sdk(Arc::new(OpenSdk::new())).build()?);
/// session.configure("wx1234567890abcdef", Some("https://example.com/app/")).await?;
///
/// // Elsewhere, the app delegate forwards re-entry URLs:
/// // session.handle_open_url(url);
///
/// let auth = session.auth(AuthOptions::new("snsapi_userinfo")).await?;
/// println!("code: {}", auth.code);
/// ```
pub struct WechatSession {
    sdk: Arc<dyn NativeSdk>,
    config_store: ConfigStore,
    configuration: RwLock<Option<Configuration>>,
    registry: PendingRegistry,
    media: MediaLoader,
}

impl std::fmt::Debug for WechatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WechatSession")
            .field("sdk_available", &self.sdk.is_available())
            .field("configuration", &self.configuration())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl WechatSession {
    pub fn builder() -> WechatSessionBuilder {
        WechatSessionBuilder::default()
    }

    pub(crate) fn from_parts(
        sdk: Arc<dyn NativeSdk>,
        store: Arc<dyn KeyValueStore>,
        media: MediaLoader,
    ) -> Self {
        Self {
            sdk,
            config_store: ConfigStore::new(store),
            configuration: RwLock::new(None),
            registry: PendingRegistry::new(),
            media,
        }
    }

    /// Crate version reported to the host.
    pub fn plugin_version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    // Configuration

    /// Configure at startup, preferring an explicit `app_id` over the
    /// persisted one. Failures are logged, never returned.
    pub async fn bootstrap(&self, app_id: Option<&str>, link: Option<&str>) {
        let (app_id, link) = match app_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(app_id) => (app_id.to_string(), link.map(str::to_string)),
            None => match self.config_store.restore() {
                Some(stored) => (
                    stored.app_id.as_str().to_string(),
                    stored.link.map(|l| l.as_str().to_string()),
                ),
                None => {
                    debug!("[WechatBridge] no app id available at startup");
                    return;
                }
            },
        };

        if let Err(e) = self.configure(&app_id, link.as_deref()).await {
            warn!("[WechatBridge] startup configuration failed: {}", e);
        }
    }

    /// [`bootstrap`](Self::bootstrap) from the host's plugin config.
    pub async fn bootstrap_from(&self, config: &PluginConfig) {
        self.bootstrap(config.app_id.as_deref(), config.universal_link.as_deref())
            .await
    }

    /// Replace the active configuration, persist it and register the app id
    /// with the SDK.
    pub async fn configure(&self, app_id: &str, link: Option<&str>) -> Result<(), WechatError> {
        if !self.sdk.is_available() {
            return Err(WechatError::SdkUnavailable);
        }
        let app_id = AppId::new(app_id).map_err(WechatError::InvalidArguments)?;
        let configuration = Configuration::new(app_id, link.and_then(LinkIdentifier::new));

        *self
            .configuration
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(configuration.clone());

        if let Err(e) = self.config_store.persist(&configuration) {
            warn!("[WechatBridge] failed to persist configuration: {}", e);
        }

        let registered = self
            .sdk
            .register_app(&configuration.app_id, configuration.link.as_ref())
            .await;
        if registered {
            info!(
                "[WechatBridge] registered app {} (link: {})",
                configuration.app_id,
                configuration
                    .link
                    .as_ref()
                    .map(LinkIdentifier::as_str)
                    .unwrap_or("none")
            );
        } else {
            warn!(
                "[WechatBridge] SDK refused to register app {}",
                configuration.app_id
            );
        }
        Ok(())
    }

    /// The active configuration, if any.
    pub fn configuration(&self) -> Option<Configuration> {
        self.configuration
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn ensure_configured(&self) -> Result<(), WechatError> {
        if self.configuration().is_none() {
            return Err(WechatError::NotConfigured);
        }
        Ok(())
    }

    /// Whether the WeChat app is installed. `false` without the SDK.
    pub fn is_installed(&self) -> bool {
        self.sdk.is_available() && self.sdk.is_installed()
    }

    pub fn installed(&self) -> InstalledResponse {
        InstalledResponse {
            installed: self.is_installed(),
        }
    }

    pub fn registry(&self) -> &PendingRegistry {
        &self.registry
    }

    pub fn is_pending(&self, kind: OperationKind) -> bool {
        self.registry.is_pending(kind)
    }

    // Operations

    /// Request an OAuth authorization code.
    pub async fn auth(&self, options: AuthOptions) -> Result<AuthResponse, WechatError> {
        self.ensure_ready(OperationKind::Auth)?;
        let request = build_auth_request(&options)?;
        debug!("[WechatBridge] auth scope={} state={}", request.scope, request.state);
        self.dispatch(&self.registry.auth, self.sdk.send_auth(request))
            .await
    }

    /// Share content to a chat, the timeline or favorites.
    pub async fn share(&self, options: ShareOptions) -> Result<(), WechatError> {
        self.ensure_ready(OperationKind::Share)?;
        validate_share_options(&options)?;

        let pending = self.registry.share.register()?;
        let id = pending.id();
        match build_share_request(&self.media, &options).await {
            Ok(request) => {
                debug!(
                    "[WechatBridge] share {} to {:?} ({})",
                    request.share_type(),
                    request.scene,
                    request.transaction
                );
                if !self.sdk.send_message(request).await {
                    self.registry.share.complete_if(id, Err(WechatError::RequestFailed));
                }
            }
            Err(e) => {
                debug!("[WechatBridge] share request not built: {}", e);
                self.registry.share.complete_if(id, Err(e));
            }
        }
        pending.wait().await
    }

    /// Start a WeChat Pay payment for a server-side prepay order.
    pub async fn send_payment_request(&self, options: PaymentOptions) -> Result<(), WechatError> {
        self.ensure_ready(OperationKind::Payment)?;
        let request = build_payment_request(&options)?;
        debug!("[WechatBridge] payment prepay_id={}", request.prepay_id);
        self.dispatch(&self.registry.payment, self.sdk.send_payment(request))
            .await
    }

    /// Open a mini-program and wait for it to hand control back.
    pub async fn open_mini_program(
        &self,
        options: MiniProgramOptions,
    ) -> Result<MiniProgramResponse, WechatError> {
        self.ensure_ready(OperationKind::MiniProgram)?;
        let request = build_launch_request(&options)?;
        debug!(
            "[WechatBridge] launch mini program {} (type {})",
            request.username,
            request.program_type.code()
        );
        let ext_msg = self
            .dispatch(
                &self.registry.mini_program,
                self.sdk.launch_mini_program(request),
            )
            .await?;
        Ok(MiniProgramResponse { ext_msg })
    }

    /// Let the user pick invoices from their WeChat card package.
    pub async fn choose_invoice(
        &self,
        options: InvoiceOptions,
    ) -> Result<InvoiceResponse, WechatError> {
        self.ensure_ready(OperationKind::Invoice)?;
        let request = build_invoice_request(&options)?;
        debug!("[WechatBridge] choose invoice for app {}", request.app_id);
        let cards = self
            .dispatch(&self.registry.invoice, self.sdk.choose_invoice(request))
            .await?;
        Ok(InvoiceResponse { cards })
    }

    // Re-entry

    /// Forward a re-entry URL to the SDK. Returns whether the SDK handled it.
    pub fn handle_open_url(&self, url: &str) -> bool {
        self.sdk.is_available() && self.sdk.handle_open_url(url, self)
    }

    pub fn handle_user_activity(&self, activity: &UserActivity) -> bool {
        self.sdk.is_available() && self.sdk.handle_user_activity(activity, self)
    }

    fn ensure_ready(&self, kind: OperationKind) -> Result<(), WechatError> {
        if !self.sdk.is_available() {
            return Err(WechatError::SdkUnavailable);
        }
        self.ensure_configured()?;
        if !self.sdk.is_installed() {
            return Err(WechatError::WechatNotInstalled);
        }
        self.registry.ensure_idle(kind)
    }

    async fn dispatch<T, F>(&self, slot: &Slot<T>, send: F) -> Result<T, WechatError>
    where
        F: Future<Output = bool>,
    {
        let pending = slot.register()?;
        let id = pending.id();
        if !send.await {
            warn!("[WechatBridge] SDK did not accept the {} request", pending.kind());
            slot.complete_if(id, Err(WechatError::RequestFailed));
        }
        pending.wait().await
    }
}

impl ResponseHandler for WechatSession {
    fn on_response(&self, response: SdkResponse) {
        router::route_response(&self.registry, response);
    }

    fn on_request(&self, request: SdkRequest) {
        debug!(
            "[WechatBridge] ignoring inbound SDK request (command {})",
            request.command
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::config::MemoryStore;
    use crate::sdk::{
        AuthRequest, ChooseInvoiceRequest, LaunchMiniProgramRequest, PaymentRequest,
        ResponseBody, ShareRequest, ERR_OK,
    };

    /// Accepts every request; `installed` is switchable.
    struct AcceptingSdk {
        installed: AtomicBool,
    }

    impl AcceptingSdk {
        fn new(installed: bool) -> Arc<Self> {
            Arc::new(Self {
                installed: AtomicBool::new(installed),
            })
        }
    }

    #[async_trait]
    impl NativeSdk for AcceptingSdk {
        async fn register_app(&self, _app_id: &AppId, _link: Option<&LinkIdentifier>) -> bool {
            true
        }

        fn is_installed(&self) -> bool {
            self.installed.load(Ordering::SeqCst)
        }

        async fn send_auth(&self, _request: AuthRequest) -> bool {
            true
        }

        async fn send_message(&self, _request: ShareRequest) -> bool {
            true
        }

        async fn send_payment(&self, _request: PaymentRequest) -> bool {
            false
        }

        async fn launch_mini_program(&self, _request: LaunchMiniProgramRequest) -> bool {
            true
        }

        async fn choose_invoice(&self, _request: ChooseInvoiceRequest) -> bool {
            true
        }

        fn handle_open_url(&self, _url: &str, _handler: &dyn ResponseHandler) -> bool {
            true
        }

        fn handle_user_activity(
            &self,
            _activity: &UserActivity,
            _handler: &dyn ResponseHandler,
        ) -> bool {
            true
        }
    }

    fn session(sdk: Arc<AcceptingSdk>) -> WechatSession {
        WechatSession::builder().sdk(sdk).build().unwrap()
    }

    #[tokio::test]
    async fn test_unavailable_sdk_gates_everything() {
        let session = WechatSession::builder().build().unwrap();
        assert!(matches!(
            session.configure("wx1", None).await,
            Err(WechatError::SdkUnavailable)
        ));
        assert!(matches!(
            session.auth(AuthOptions::new("snsapi_userinfo")).await,
            Err(WechatError::SdkUnavailable)
        ));
        assert!(!session.handle_open_url("wx1://oauth?code=1"));
        assert!(!session.installed().installed);
    }

    #[tokio::test]
    async fn test_not_configured_before_not_installed() {
        let session = session(AcceptingSdk::new(false));
        let err = session
            .open_mini_program(MiniProgramOptions::new("gh_abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, WechatError::NotConfigured));

        session.configure("wx1", None).await.unwrap();
        let err = session
            .open_mini_program(MiniProgramOptions::new("gh_abc"))
            .await
            .unwrap_err();
        assert!(matches!(err, WechatError::WechatNotInstalled));
    }

    #[tokio::test]
    async fn test_configure_rejects_blank_app_id() {
        let session = session(AcceptingSdk::new(true));
        let err = session.configure("   ", None).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing appId parameter.");
        assert!(session.configuration().is_none());
    }

    #[tokio::test]
    async fn test_validation_runs_after_gates() {
        let session = session(AcceptingSdk::new(true));
        session.configure("wx1", None).await.unwrap();

        let err = session.auth(AuthOptions::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Missing scope parameter.");
        assert!(!session.is_pending(OperationKind::Auth));
    }

    #[tokio::test]
    async fn test_refused_dispatch_clears_slot() {
        let session = session(AcceptingSdk::new(true));
        session.configure("wx1", None).await.unwrap();

        let options = PaymentOptions::from_value(serde_json::json!({
            "partnerId": "p",
            "prepayId": "wx201410272009395522657a690389285100",
            "nonceStr": "n",
            "timeStamp": "1412000000",
            "package": "Sign=WXPay",
            "sign": "s"
        }))
        .unwrap();
        let err = session.send_payment_request(options).await.unwrap_err();
        assert!(matches!(err, WechatError::RequestFailed));
        assert!(!session.is_pending(OperationKind::Payment));
    }

    #[tokio::test]
    async fn test_share_build_failure_clears_slot() {
        let session = session(AcceptingSdk::new(true));
        session.configure("wx1", None).await.unwrap();

        let options = ShareOptions::from_value(serde_json::json!({
            "scene": 0,
            "type": "image"
        }))
        .unwrap();
        let err = session.share(options).await.unwrap_err();
        assert!(matches!(err, WechatError::InvalidArguments(_)));
        assert!(!session.is_pending(OperationKind::Share));
    }

    #[tokio::test]
    async fn test_response_handler_routes_to_registry() {
        let session = Arc::new(session(AcceptingSdk::new(true)));
        session.configure("wx1", None).await.unwrap();

        let task = {
            let session = session.clone();
            tokio::spawn(async move {
                session
                    .open_mini_program(MiniProgramOptions::new("gh_abc"))
                    .await
            })
        };
        while !session.is_pending(OperationKind::MiniProgram) {
            tokio::task::yield_now().await;
        }

        session.on_response(SdkResponse::new(
            ERR_OK,
            ResponseBody::LaunchMiniProgram {
                ext_msg: Some("done".to_string()),
            },
        ));
        let response = task.await.unwrap().unwrap();
        assert_eq!(response.ext_msg.as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn test_bootstrap_prefers_explicit_app_id() {
        let store = Arc::new(MemoryStore::new());
        store.set("appId", "wx_stored").unwrap();
        store.set("universalLink", "https://stored.example.com/").unwrap();

        let session = WechatSession::builder()
            .sdk(AcceptingSdk::new(true))
            .store(store.clone())
            .build()
            .unwrap();
        session.bootstrap(Some("wx_explicit"), None).await;

        let active = session.configuration().unwrap();
        assert_eq!(active.app_id.as_str(), "wx_explicit");
        assert!(active.link.is_none());
        assert_eq!(store.get("appId").as_deref(), Some("wx_explicit"));
        assert_eq!(store.get("universalLink"), None);
    }

    #[tokio::test]
    async fn test_bootstrap_without_any_app_id_stays_unconfigured() {
        let session = session(AcceptingSdk::new(true));
        session.bootstrap_from(&PluginConfig::default()).await;
        assert!(matches!(
            session.ensure_configured(),
            Err(WechatError::NotConfigured)
        ));
    }

    #[test]
    fn test_plugin_version() {
        let session = WechatSession::builder().build().unwrap();
        assert_eq!(session.plugin_version(), env!("CARGO_PKG_VERSION"));
    }
}
