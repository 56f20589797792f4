//! Operation option bundles and request builders
//!
//! Each submodule takes the loosely-typed option bundle the host passes in,
//! validates it and builds the matching [`crate::sdk`] request:
//!
//! - [`auth`] - OAuth authorization
//! - [`share`] - Text, image, link, music, video and mini-program shares
//! - [`payment`] - WeChat Pay
//! - [`mini_program`] - Launching a mini-program
//! - [`invoice`] - Picking invoices from the card package
//!
//! Option structs deserialize from the host's flat camelCase JSON:
//!
//! ```rust
//! use wechat_open_bridge::api::share::ShareOptions;
//!
//! let options = ShareOptions::from_value(serde_json::json!({
//!     "scene": 0,
//!     "type": "link",
//!     "link": "https://example.com",
//! }))
//! .unwrap();
//! assert_eq!(options.link.as_deref(), Some("https://example.com"));
//! ```

use serde::de::DeserializeOwned;

use crate::error::WechatError;

pub mod auth;
pub mod invoice;
pub mod mini_program;
pub mod payment;
pub mod share;

pub use auth::AuthOptions;
pub use invoice::InvoiceOptions;
pub use mini_program::MiniProgramOptions;
pub use payment::PaymentOptions;
pub use share::{ShareOptions, ShareType};

pub(crate) fn parse_options<T: DeserializeOwned>(
    value: serde_json::Value,
) -> Result<T, WechatError> {
    serde_json::from_value(value)
        .map_err(|e| WechatError::invalid(format!("Invalid or missing arguments: {e}")))
}

/// `Some` only for a present, non-blank string.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub(crate) fn require<'a>(value: &'a Option<String>, reason: &str) -> Result<&'a str, WechatError> {
    non_empty(value).ok_or_else(|| WechatError::invalid(reason))
}
