//! Media loading and thumbnail derivation for share requests
//!
//! Sources accepted by [`MediaLoader::load_data`]:
//!
//! - `data:` URIs with a base64 payload
//! - `http://` / `https://` URLs
//! - local paths, with or without a `file://` prefix
//!
//! Thumbnails are re-encoded as JPEG and kept under [`MAX_THUMB_BYTES`].

use std::io::Cursor;
use std::path::PathBuf;
use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use log::debug;
use reqwest::{Client, Url};

use crate::error::WechatError;

/// Thumbnail size budget imposed by WeChat.
pub const MAX_THUMB_BYTES: usize = 128 * 1024;

pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const START_QUALITY: u8 = 80;
const QUALITY_STEP: u8 = 10;
const MIN_QUALITY: u8 = 20;

/// Fetches raw media bytes for share requests.
#[derive(Debug, Clone)]
pub struct MediaLoader {
    http: Client,
}

impl MediaLoader {
    /// Loader with default timeouts.
    pub fn new() -> Result<Self, WechatError> {
        Self::with_timeouts(
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Result<Self, WechatError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { http })
    }

    /// Load the bytes behind `source`.
    ///
    /// The scheme is matched case-insensitively; anything without a known
    /// scheme is read as a local path.
    pub async fn load_data(&self, source: &str) -> Result<Vec<u8>, WechatError> {
        let scheme = source
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase());

        let path = match scheme.as_deref() {
            Some("data") => return decode_data_uri(source),
            Some("http" | "https") => {
                debug!("[WechatBridge] fetching media {}", source);
                let response = self.http.get(source).send().await?.error_for_status()?;
                let bytes = response.bytes().await?;
                return Ok(bytes.to_vec());
            }
            Some("file") => Url::parse(source)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| WechatError::invalid("Invalid file URL."))?,
            _ => PathBuf::from(source),
        };

        Ok(tokio::fs::read(path).await?)
    }

    /// Load `source` and shrink it into a thumbnail.
    ///
    /// Returns `Ok(None)` when the bytes are not a decodable image.
    pub async fn load_thumbnail(&self, source: &str) -> Result<Option<Vec<u8>>, WechatError> {
        let data = self.load_data(source).await?;
        make_thumbnail_blocking(data).await
    }
}

pub(crate) fn decode_data_uri(source: &str) -> Result<Vec<u8>, WechatError> {
    let (_, payload) = source
        .split_once(',')
        .ok_or_else(|| WechatError::invalid("Invalid data URI."))?;
    BASE64
        .decode(payload.trim())
        .map_err(|_| WechatError::invalid("Invalid Base64 data."))
}

/// Run [`make_thumbnail`] on the blocking pool.
pub(crate) async fn make_thumbnail_blocking(data: Vec<u8>) -> Result<Option<Vec<u8>>, WechatError> {
    tokio::task::spawn_blocking(move || make_thumbnail(&data))
        .await
        .map_err(|e| WechatError::Io(std::io::Error::other(e)))
}

/// Re-encode `data` as a JPEG no larger than [`MAX_THUMB_BYTES`].
///
/// Quality starts at 80 and drops by 10 while the output is over budget,
/// stopping at 20. If the floor quality is still too large the image is
/// downscaled until it fits. Undecodable input yields `None`.
pub fn make_thumbnail(data: &[u8]) -> Option<Vec<u8>> {
    let image = image::load_from_memory(data).ok()?;
    let mut image = DynamicImage::ImageRgb8(image.to_rgb8());

    let mut quality = START_QUALITY;
    let mut encoded = encode_jpeg(&image, quality)?;
    while encoded.len() > MAX_THUMB_BYTES && quality > MIN_QUALITY {
        quality -= QUALITY_STEP;
        encoded = encode_jpeg(&image, quality)?;
    }

    while encoded.len() > MAX_THUMB_BYTES {
        let (width, height) = (image.width(), image.height());
        if width <= 1 && height <= 1 {
            return None;
        }
        let ratio = (encoded.len() as f64 / MAX_THUMB_BYTES as f64).sqrt().max(1.1);
        let new_width = ((width as f64 / ratio) as u32).max(1);
        let new_height = ((height as f64 / ratio) as u32).max(1);
        image = image.resize_exact(new_width, new_height, FilterType::Triangle);
        encoded = encode_jpeg(&image, quality)?;
    }

    debug!(
        "[WechatBridge] thumbnail {}x{} q{} = {} bytes",
        image.width(),
        image.height(),
        quality,
        encoded.len()
    );
    Some(encoded)
}

fn encode_jpeg(image: &DynamicImage, quality: u8) -> Option<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    image.write_with_encoder(encoder).ok()?;
    Some(buffer.into_inner())
}
