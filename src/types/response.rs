use serde::{Deserialize, Serialize};

/// Result of a successful authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Authorization code to exchange for an access token server-side
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// Result of launching a mini-program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniProgramResponse {
    /// Extra data handed back by the mini-program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext_msg: Option<String>,
}

/// An invoice card picked by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceCard {
    #[serde(rename = "cardId")]
    pub card_id: String,
    #[serde(
        rename = "encryptCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub encrypted_code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub cards: Vec<InvoiceCard>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledResponse {
    pub installed: bool,
}
