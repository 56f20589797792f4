use thiserror::Error;

use crate::types::OperationKind;

/// Bridge error types
///
/// Every failure is terminal and delivered once to the caller that started the
/// operation. Use [`WechatError::code`] for a stable classification string.
#[derive(Debug, Error)]
pub enum WechatError {
    #[error("WechatOpenSDK is not linked. Follow the installation guide to add the official SDK.")]
    SdkUnavailable,

    #[error("WeChat SDK is not configured yet. Call initialize() or set the plugin config.")]
    NotConfigured,

    #[error("WeChat is not installed on this device.")]
    WechatNotInstalled,

    #[error("User cancelled the WeChat operation.")]
    UserCancelled,

    #[error("A {0} operation is already running.")]
    OperationInProgress(OperationKind),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("Failed to send the request to WeChat.")]
    RequestFailed,

    #[error("WeChat returned error code {0}.")]
    Unknown(i32),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WechatError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        WechatError::InvalidArguments(reason.into())
    }

    /// Stable classification handed to the host alongside the message.
    pub fn code(&self) -> &'static str {
        match self {
            WechatError::SdkUnavailable => "SDK_UNAVAILABLE",
            WechatError::NotConfigured => "NOT_CONFIGURED",
            WechatError::WechatNotInstalled => "WECHAT_NOT_INSTALLED",
            WechatError::UserCancelled => "USER_CANCELLED",
            WechatError::OperationInProgress(_) => "OPERATION_IN_PROGRESS",
            WechatError::InvalidArguments(_) => "INVALID_ARGUMENTS",
            WechatError::RequestFailed => "REQUEST_FAILED",
            WechatError::Unknown(_) => "UNKNOWN",
            WechatError::Http(_) | WechatError::Io(_) => "MEDIA_LOAD_FAILED",
            WechatError::Json(_) => "STORAGE_FAILED",
        }
    }
}
