use async_trait::async_trait;

use super::*;

/// Stand-in for builds that do not link the WeChat OpenSDK.
///
/// Reports itself unavailable and refuses every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableSdk;

#[async_trait]
impl NativeSdk for UnavailableSdk {
    fn is_available(&self) -> bool {
        false
    }

    async fn register_app(&self, _app_id: &AppId, _link: Option<&LinkIdentifier>) -> bool {
        false
    }

    fn is_installed(&self) -> bool {
        false
    }

    async fn send_auth(&self, _request: AuthRequest) -> bool {
        false
    }

    async fn send_message(&self, _request: ShareRequest) -> bool {
        false
    }

    async fn send_payment(&self, _request: PaymentRequest) -> bool {
        false
    }

    async fn launch_mini_program(&self, _request: LaunchMiniProgramRequest) -> bool {
        false
    }

    async fn choose_invoice(&self, _request: ChooseInvoiceRequest) -> bool {
        false
    }

    fn handle_open_url(&self, _url: &str, _handler: &dyn ResponseHandler) -> bool {
        false
    }

    fn handle_user_activity(
        &self,
        _activity: &UserActivity,
        _handler: &dyn ResponseHandler,
    ) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoopHandler;

    impl ResponseHandler for NoopHandler {
        fn on_response(&self, _response: SdkResponse) {}
    }

    #[tokio::test]
    async fn test_unavailable_sdk_refuses_everything() {
        let sdk = UnavailableSdk;
        let app_id = AppId::new("wx123").unwrap();

        assert!(!sdk.is_available());
        assert!(!sdk.is_installed());
        assert!(!sdk.register_app(&app_id, None).await);
        assert!(
            !sdk.send_auth(AuthRequest {
                scope: "snsapi_userinfo".to_string(),
                state: "s".to_string(),
            })
            .await
        );
        assert!(!sdk.handle_open_url("wx123://oauth?code=1", &NoopHandler));
    }
}
