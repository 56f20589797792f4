//! Content sharing
//!
//! ## Share types
//!
//! | Type | Required | Thumbnail source |
//! |------|----------|------------------|
//! | `text` | - | none |
//! | `image` | `imageUrl` | the image itself |
//! | `link` | `link` | `thumbUrl` |
//! | `music` / `video` | `mediaUrl` | `thumbUrl` |
//! | `miniprogram` | `miniProgramUsername` | `imageUrl`, then `thumbUrl` |
//!
//! Mini-program cards can only be sent to a chat, so their scene is always
//! [`Scene::Session`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WechatError;
use crate::media::{make_thumbnail_blocking, MediaLoader};
use crate::sdk::{MediaMessage, MediaObject, ShareContent, ShareRequest};
use crate::types::{MiniProgramType, Scene};
use crate::utils::transaction_id;

use super::{non_empty, parse_options, require};

/// Share options as sent by the host.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareOptions {
    /// 0 = session, 1 = timeline, 2 = favorite
    #[serde(default)]
    pub scene: Option<i64>,
    #[serde(default, rename = "type")]
    pub share_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Image URL, file path or data URI
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub thumb_url: Option<String>,
    #[serde(default)]
    pub media_url: Option<String>,
    #[serde(default)]
    pub mini_program_username: Option<String>,
    #[serde(default)]
    pub mini_program_path: Option<String>,
    #[serde(default)]
    pub mini_program_type: Option<i64>,
    #[serde(default)]
    pub mini_program_web_page_url: Option<String>,
}

impl ShareOptions {
    pub fn new(scene: Scene, share_type: ShareType) -> Self {
        Self {
            scene: Some(scene.code() as i64),
            share_type: Some(share_type.as_str().to_string()),
            ..Default::default()
        }
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, WechatError> {
        parse_options(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShareType {
    Text,
    Image,
    Link,
    Music,
    Video,
    MiniProgram,
}

impl ShareType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShareType::Text => "text",
            ShareType::Image => "image",
            ShareType::Link => "link",
            ShareType::Music => "music",
            ShareType::Video => "video",
            ShareType::MiniProgram => "miniprogram",
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShareType {
    type Err = WechatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ShareType::Text),
            "image" => Ok(ShareType::Image),
            "link" => Ok(ShareType::Link),
            "music" => Ok(ShareType::Music),
            "video" => Ok(ShareType::Video),
            "miniprogram" => Ok(ShareType::MiniProgram),
            other => Err(WechatError::invalid(format!("Unsupported share type {other}."))),
        }
    }
}

/// Presence checks done before a share is registered as pending.
pub(crate) fn validate_share_options(options: &ShareOptions) -> Result<(), WechatError> {
    if options.scene.is_none() || non_empty(&options.share_type).is_none() {
        return Err(WechatError::invalid("Missing required parameters."));
    }
    Ok(())
}

/// Build the share request, loading any referenced media.
///
/// A missing `scene` is treated as [`Scene::Session`]. Mini-program shares
/// ignore the caller's scene entirely.
pub async fn build_share_request(
    loader: &MediaLoader,
    options: &ShareOptions,
) -> Result<ShareRequest, WechatError> {
    let share_type: ShareType = require(&options.share_type, "Share type is required.")?.parse()?;
    // Mini-program cards can only go to a chat, whatever the caller asked for.
    let scene = match (share_type, options.scene) {
        (ShareType::MiniProgram, _) | (_, None) => Scene::Session,
        (_, Some(code)) => Scene::try_from(code)?,
    };
    let transaction = transaction_id(share_type.as_str());

    let mut thumb = None;
    let object = match share_type {
        ShareType::Text => {
            return Ok(ShareRequest {
                transaction,
                scene,
                content: ShareContent::Text(options.text.clone().unwrap_or_default()),
            });
        }
        ShareType::Image => {
            let source = require(&options.image_url, "imageUrl is required for image shares.")?;
            let data = loader.load_data(source).await?;
            thumb = make_thumbnail_blocking(data.clone()).await?;
            MediaObject::Image { data }
        }
        ShareType::Link => MediaObject::Webpage {
            url: require(&options.link, "link is required for link shares.")?.to_string(),
        },
        ShareType::Music => MediaObject::Music {
            url: require(&options.media_url, "mediaUrl is required for music shares.")?
                .to_string(),
        },
        ShareType::Video => MediaObject::Video {
            url: require(&options.media_url, "mediaUrl is required for video shares.")?
                .to_string(),
        },
        ShareType::MiniProgram => {
            let username = require(
                &options.mini_program_username,
                "miniProgramUsername is required for mini program shares.",
            )?;
            if let Some(source) = non_empty(&options.image_url) {
                thumb = loader.load_thumbnail(source).await?;
            }
            MediaObject::MiniProgram {
                username: username.to_string(),
                path: non_empty(&options.mini_program_path).map(str::to_string),
                program_type: MiniProgramType::from_code(options.mini_program_type),
                webpage_url: options.mini_program_web_page_url.clone().unwrap_or_default(),
            }
        }
    };

    if thumb.is_none() {
        if let Some(source) = non_empty(&options.thumb_url) {
            thumb = loader.load_thumbnail(source).await?;
        }
    }

    Ok(ShareRequest {
        transaction,
        scene,
        content: ShareContent::Media(MediaMessage {
            title: options.title.clone().unwrap_or_default(),
            description: options.description.clone().unwrap_or_default(),
            thumb,
            object,
        }),
    })
}
