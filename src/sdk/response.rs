//! Callbacks delivered by the native SDK.

use serde::Deserialize;

/// Status code the SDK uses for success.
pub const ERR_OK: i32 = 0;
pub const ERR_COMM: i32 = -1;
pub const ERR_USER_CANCEL: i32 = -2;
pub const ERR_SENT_FAILED: i32 = -3;
pub const ERR_AUTH_DENIED: i32 = -4;
pub const ERR_UNSUPPORT: i32 = -5;

/// A response callback with its kind made explicit.
#[derive(Debug, Clone, PartialEq)]
pub struct SdkResponse {
    pub err_code: i32,
    pub err_str: Option<String>,
    pub body: ResponseBody,
}

impl SdkResponse {
    pub fn new(err_code: i32, body: ResponseBody) -> Self {
        Self {
            err_code,
            err_str: None,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        self.err_code == ERR_OK
    }
}

/// Kind-specific response data.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Auth {
        code: Option<String>,
        state: Option<String>,
    },
    Share,
    Payment,
    LaunchMiniProgram {
        ext_msg: Option<String>,
    },
    /// Card items exactly as the SDK reported them
    ChooseInvoice {
        cards: Vec<serde_json::Value>,
    },
    /// Any response kind the bridge does not track
    Other {
        command: i32,
    },
}

/// Card item shape inside a choose-invoice response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawInvoiceItem {
    #[serde(rename = "cardId", default)]
    pub card_id: Option<String>,
    #[serde(rename = "encryptCode", default)]
    pub encrypt_code: Option<String>,
}

/// An inbound request the WeChat app sends to us (for example "show message").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkRequest {
    pub command: i32,
    pub open_id: Option<String>,
}

/// Activity object handed over on universal-link re-entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserActivity {
    pub activity_type: String,
    pub webpage_url: Option<String>,
}
