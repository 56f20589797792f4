//! Native SDK capability
//!
//! The WeChat OpenSDK is an opaque native library. The bridge only talks to it
//! through [`NativeSdk`], so a build without the SDK links
//! [`UnavailableSdk`] instead and every operation fails with
//! `SdkUnavailable`.
//!
//! Responses come back out-of-process: the WeChat app re-opens the host app
//! by URL or universal link, the host forwards that to
//! [`handle_open_url`](NativeSdk::handle_open_url) /
//! [`handle_user_activity`](NativeSdk::handle_user_activity), and the SDK
//! calls [`ResponseHandler::on_response`] on the handler it was given.

use async_trait::async_trait;

use crate::types::{AppId, LinkIdentifier};

pub mod request;
pub mod response;
mod unavailable;

pub use request::*;
pub use response::*;
pub use unavailable::UnavailableSdk;

/// Receiver of SDK callbacks.
pub trait ResponseHandler: Send + Sync {
    fn on_response(&self, response: SdkResponse);

    fn on_request(&self, _request: SdkRequest) {}
}

/// Primitives exposed by the native SDK.
///
/// The `send_*` methods resolve to the SDK's dispatch acknowledgement:
/// `false` means the request never left the process.
#[async_trait]
pub trait NativeSdk: Send + Sync {
    /// Whether the SDK is linked into this build.
    fn is_available(&self) -> bool {
        true
    }

    async fn register_app(&self, app_id: &AppId, link: Option<&LinkIdentifier>) -> bool;

    fn is_installed(&self) -> bool;

    async fn send_auth(&self, request: AuthRequest) -> bool;

    async fn send_message(&self, request: ShareRequest) -> bool;

    async fn send_payment(&self, request: PaymentRequest) -> bool;

    async fn launch_mini_program(&self, request: LaunchMiniProgramRequest) -> bool;

    async fn choose_invoice(&self, request: ChooseInvoiceRequest) -> bool;

    fn handle_open_url(&self, url: &str, handler: &dyn ResponseHandler) -> bool;

    fn handle_user_activity(&self, activity: &UserActivity, handler: &dyn ResponseHandler)
        -> bool;
}
