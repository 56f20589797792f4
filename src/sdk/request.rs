//! Request objects handed to the native SDK send primitives.

use crate::types::{MiniProgramType, Scene};

/// OAuth authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub scope: String,
    pub state: String,
}

/// Message share request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    /// Caller-visible correlation tag, `<type><unix-millis>`
    pub transaction: String,
    pub scene: Scene,
    pub content: ShareContent,
}

impl ShareRequest {
    /// Share type name as accepted from the host.
    pub fn share_type(&self) -> &'static str {
        match &self.content {
            ShareContent::Text(_) => "text",
            ShareContent::Media(message) => message.object.share_type(),
        }
    }

    pub fn media(&self) -> Option<&MediaMessage> {
        match &self.content {
            ShareContent::Media(message) => Some(message),
            ShareContent::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareContent {
    Text(String),
    Media(MediaMessage),
}

/// Rich message with an optional JPEG thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaMessage {
    pub title: String,
    pub description: String,
    pub thumb: Option<Vec<u8>>,
    pub object: MediaObject,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaObject {
    Image {
        data: Vec<u8>,
    },
    Webpage {
        url: String,
    },
    Music {
        url: String,
    },
    Video {
        url: String,
    },
    MiniProgram {
        username: String,
        path: Option<String>,
        program_type: MiniProgramType,
        webpage_url: String,
    },
}

impl MediaObject {
    pub fn share_type(&self) -> &'static str {
        match self {
            MediaObject::Image { .. } => "image",
            MediaObject::Webpage { .. } => "link",
            MediaObject::Music { .. } => "music",
            MediaObject::Video { .. } => "video",
            MediaObject::MiniProgram { .. } => "miniprogram",
        }
    }
}

/// WeChat Pay request, fields as signed by the merchant server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub partner_id: String,
    pub prepay_id: String,
    pub nonce_str: String,
    pub time_stamp: u32,
    pub package: String,
    pub sign: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchMiniProgramRequest {
    pub username: String,
    pub path: Option<String>,
    pub program_type: MiniProgramType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooseInvoiceRequest {
    pub app_id: String,
    pub card_sign: String,
    pub nonce_str: String,
    pub sign_type: String,
    pub time_stamp: u32,
}
