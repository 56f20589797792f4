//! Invoice selection from the WeChat card package

use serde::{Deserialize, Serialize};

use crate::error::WechatError;
use crate::sdk::{ChooseInvoiceRequest, RawInvoiceItem};
use crate::types::InvoiceCard;

use super::{non_empty, parse_options};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceOptions {
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub sign_type: Option<String>,
    #[serde(default)]
    pub card_sign: Option<String>,
    #[serde(default)]
    pub time_stamp: Option<String>,
    #[serde(default)]
    pub nonce_str: Option<String>,
}

impl InvoiceOptions {
    pub fn from_value(value: serde_json::Value) -> Result<Self, WechatError> {
        parse_options(value)
    }
}

pub fn build_invoice_request(
    options: &InvoiceOptions,
) -> Result<ChooseInvoiceRequest, WechatError> {
    let (Some(app_id), Some(card_sign), Some(sign_type), Some(time_stamp), Some(nonce_str)) = (
        non_empty(&options.app_id),
        non_empty(&options.card_sign),
        non_empty(&options.sign_type),
        non_empty(&options.time_stamp),
        non_empty(&options.nonce_str),
    ) else {
        return Err(WechatError::invalid("Missing invoice parameters."));
    };

    Ok(ChooseInvoiceRequest {
        app_id: app_id.to_string(),
        card_sign: card_sign.to_string(),
        nonce_str: nonce_str.to_string(),
        sign_type: sign_type.to_string(),
        time_stamp: time_stamp.trim().parse().unwrap_or(0),
    })
}

/// Map raw card items, skipping anything that is not a card object.
pub(crate) fn map_invoice_cards(items: &[serde_json::Value]) -> Vec<InvoiceCard> {
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<RawInvoiceItem>(item.clone()).ok())
        .map(|raw| InvoiceCard {
            card_id: raw.card_id.unwrap_or_default(),
            encrypted_code: raw.encrypt_code,
        })
        .collect()
}
