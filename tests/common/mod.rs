//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use wechat_open_bridge::config::KeyValueStore;
use wechat_open_bridge::sdk::{
    AuthRequest, ChooseInvoiceRequest, LaunchMiniProgramRequest, NativeSdk, PaymentRequest,
    ResponseHandler, SdkResponse, ShareRequest, UserActivity,
};
use wechat_open_bridge::types::{AppId, LinkIdentifier, OperationKind};
use wechat_open_bridge::WechatSession;

/// A request the mock SDK received.
#[derive(Debug, Clone)]
pub enum Sent {
    Auth(AuthRequest),
    Share(ShareRequest),
    Payment(PaymentRequest),
    MiniProgram(LaunchMiniProgramRequest),
    Invoice(ChooseInvoiceRequest),
}

/// Scripted stand-in for the native SDK.
///
/// Records every registration and request. Responses queued with
/// [`MockSdk::queue_response`] are delivered, one per call, when the session
/// forwards a re-entry URL or user activity.
pub struct MockSdk {
    installed: AtomicBool,
    accept: AtomicBool,
    registrations: Mutex<Vec<(String, Option<String>)>>,
    sent: Mutex<Vec<Sent>>,
    responses: Mutex<VecDeque<SdkResponse>>,
}

impl MockSdk {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            installed: AtomicBool::new(true),
            accept: AtomicBool::new(true),
            registrations: Mutex::new(Vec::new()),
            sent: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
        })
    }

    pub fn set_installed(&self, installed: bool) {
        self.installed.store(installed, Ordering::SeqCst);
    }

    /// Make every `send_*` call report that the request never left.
    pub fn refuse_requests(&self) {
        self.accept.store(false, Ordering::SeqCst);
    }

    pub fn queue_response(&self, response: SdkResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn registrations(&self) -> Vec<(String, Option<String>)> {
        self.registrations.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, request: Sent) -> bool {
        self.sent.lock().unwrap().push(request);
        self.accept.load(Ordering::SeqCst)
    }

    fn deliver(&self, handler: &dyn ResponseHandler) -> bool {
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(response) => {
                handler.on_response(response);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl NativeSdk for MockSdk {
    async fn register_app(&self, app_id: &AppId, link: Option<&LinkIdentifier>) -> bool {
        self.registrations.lock().unwrap().push((
            app_id.as_str().to_string(),
            link.map(|l| l.as_str().to_string()),
        ));
        true
    }

    fn is_installed(&self) -> bool {
        self.installed.load(Ordering::SeqCst)
    }

    async fn send_auth(&self, request: AuthRequest) -> bool {
        self.record(Sent::Auth(request))
    }

    async fn send_message(&self, request: ShareRequest) -> bool {
        self.record(Sent::Share(request))
    }

    async fn send_payment(&self, request: PaymentRequest) -> bool {
        self.record(Sent::Payment(request))
    }

    async fn launch_mini_program(&self, request: LaunchMiniProgramRequest) -> bool {
        self.record(Sent::MiniProgram(request))
    }

    async fn choose_invoice(&self, request: ChooseInvoiceRequest) -> bool {
        self.record(Sent::Invoice(request))
    }

    fn handle_open_url(&self, _url: &str, handler: &dyn ResponseHandler) -> bool {
        self.deliver(handler)
    }

    fn handle_user_activity(
        &self,
        _activity: &UserActivity,
        handler: &dyn ResponseHandler,
    ) -> bool {
        self.deliver(handler)
    }
}

/// A configured session over `sdk` and `store`.
pub async fn configured_session(
    sdk: Arc<MockSdk>,
    store: Arc<dyn KeyValueStore>,
) -> Arc<WechatSession> {
    let session = WechatSession::builder()
        .sdk(sdk)
        .store(store)
        .build()
        .unwrap();
    session
        .configure("wx1234567890abcdef", Some("https://example.com/app/"))
        .await
        .unwrap();
    Arc::new(session)
}

/// Yield until an operation of `kind` is registered.
pub async fn wait_for_pending(session: &WechatSession, kind: OperationKind) {
    while !session.is_pending(kind) {
        tokio::task::yield_now().await;
    }
}

/// An encoded PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    use image::{DynamicImage, ImageFormat, RgbImage};

    let mut buffer = std::io::Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    }))
    .write_to(&mut buffer, ImageFormat::Png)
    .unwrap();
    buffer.into_inner()
}
