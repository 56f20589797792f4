//! WeChat Pay
//!
//! All fields come from the merchant server's unified-order call; the bridge
//! only checks presence and parses the timestamp.

use serde::{Deserialize, Serialize};

use crate::error::WechatError;
use crate::sdk::PaymentRequest;

use super::{parse_options, require};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOptions {
    /// Merchant ID
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(default)]
    pub prepay_id: Option<String>,
    #[serde(default)]
    pub nonce_str: Option<String>,
    /// Unix seconds, as a decimal string
    #[serde(default)]
    pub time_stamp: Option<String>,
    /// Usually `Sign=WXPay`
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub sign: Option<String>,
}

impl PaymentOptions {
    pub fn from_value(value: serde_json::Value) -> Result<Self, WechatError> {
        parse_options(value)
    }
}

pub fn build_payment_request(
    options: &PaymentOptions,
) -> Result<PaymentRequest, WechatError> {
    const MISSING: &str = "Missing required payment parameters.";

    let partner_id = require(&options.partner_id, MISSING)?;
    let prepay_id = require(&options.prepay_id, MISSING)?;
    let nonce_str = require(&options.nonce_str, MISSING)?;
    let time_stamp = require(&options.time_stamp, MISSING)?;
    let package = require(&options.package, MISSING)?;
    let sign = require(&options.sign, MISSING)?;

    let time_stamp = time_stamp
        .trim()
        .parse::<u32>()
        .map_err(|_| WechatError::invalid("Invalid timestamp value."))?;

    Ok(PaymentRequest {
        partner_id: partner_id.to_string(),
        prepay_id: prepay_id.to_string(),
        nonce_str: nonce_str.to_string(),
        time_stamp,
        package: package.to_string(),
        sign: sign.to_string(),
    })
}
