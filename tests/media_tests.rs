//! Media loading over HTTP.

mod common;

use std::time::Duration;

use wechat_open_bridge::media::{make_thumbnail, MediaLoader, MAX_THUMB_BYTES};
use wechat_open_bridge::WechatError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::png_bytes;

#[tokio::test]
async fn test_load_data_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/thumb.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"raw-bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let loader = MediaLoader::new().unwrap();
    let data = loader
        .load_data(&format!("{}/thumb.png", server.uri()))
        .await
        .unwrap();
    assert_eq!(data, b"raw-bytes");
}

#[tokio::test]
async fn test_load_data_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gone.png"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let loader = MediaLoader::new().unwrap();
    let err = loader
        .load_data(&format!("{}/gone.png", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, WechatError::Http(_)));
}

#[tokio::test]
async fn test_load_data_respects_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"late".to_vec())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let loader =
        MediaLoader::with_timeouts(Duration::from_millis(100), Duration::from_secs(1)).unwrap();
    let err = loader
        .load_data(&format!("{}/slow.png", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, WechatError::Http(ref e) if e.is_timeout()));
}

#[tokio::test]
async fn test_load_thumbnail_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/big.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png_bytes(800, 600)))
        .mount(&server)
        .await;

    let loader = MediaLoader::new().unwrap();
    let thumb = loader
        .load_thumbnail(&format!("{}/big.png", server.uri()))
        .await
        .unwrap()
        .unwrap();
    assert!(thumb.len() <= MAX_THUMB_BYTES);
    // JPEG SOI marker
    assert_eq!(&thumb[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_thumbnail_rejects_text() {
    assert!(make_thumbnail(b"plain text, not an image").is_none());
}

#[tokio::test]
async fn test_load_data_upper_case_http_scheme() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/upper.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"upper".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let loader = MediaLoader::new().unwrap();
    let source = format!("{}/upper.png", server.uri()).replacen("http:", "HTTP:", 1);
    assert_eq!(loader.load_data(&source).await.unwrap(), b"upper");
}
