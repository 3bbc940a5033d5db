//! Emoji downloads through the HTTP source against a mock server.

#![cfg(feature = "networking")]

use std::io::Cursor;
use std::time::Duration;

use horizon_glyph::{DrawCommand, DrawList, EmojiCache, EmojiCacheConfig, EmojiKey, Rect};
use image::{ImageFormat, Rgba, RgbaImage};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(10);

fn png() -> Vec<u8> {
    let img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 255, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

fn config_for(server: &MockServer) -> EmojiCacheConfig {
    EmojiCacheConfig::default()
        .with_worker_threads(2)
        .with_endpoint(format!("{}/emoji/{{key}}.png", server.uri()))
        .with_fetch_timeout(Duration::from_secs(5))
}

#[tokio::test(flavor = "multi_thread")]
async fn test_download_and_draw() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emoji/1f468-200d-1f4bb.png"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (surface, ready) = tokio::task::spawn_blocking(move || {
        let mut cache = EmojiCache::with_http(config).unwrap();
        let key = EmojiKey::from_code_points(&[0x1F468, 0x200D, 0x1F4BB]).unwrap();
        let placement = Rect::new(4.0, 4.0, 16.0, 16.0);

        assert!(cache.ensure(&key, Some(placement)).is_none());
        assert!(cache.ensure(&key, Some(placement)).is_none());

        let mut surface = DrawList::new();
        cache.wait_completed(&mut surface, WAIT);
        let ready = cache.ensure(&key, None);
        (surface, ready)
    })
    .await
    .unwrap();

    assert_eq!(ready.unwrap().width(), 8);
    match surface.commands() {
        [DrawCommand::Image { rect, .. }] => assert_eq!(*rect, Rect::new(4.0, 4.0, 16.0, 16.0)),
        other => panic!("expected one image, got {other:?}"),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_not_found_is_cached_as_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emoji/1f9ff.png"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server);
    let (surface, failed) = tokio::task::spawn_blocking(move || {
        let mut cache = EmojiCache::with_http(config).unwrap();
        let key = EmojiKey::from_code_points(&[0x1F9FF]).unwrap();

        cache.ensure(&key, Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
        let mut surface = DrawList::new();
        cache.wait_completed(&mut surface, WAIT);

        // No second request goes out for a failed key.
        assert!(cache.ensure(&key, None).is_none());
        assert_eq!(cache.in_flight(), 0);
        let failed = cache.state(&key).is_some_and(|entry| entry.is_failed());
        (surface, failed)
    })
    .await
    .unwrap();

    assert!(failed);
    assert!(surface.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_sub_second_timeout_and_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/emoji/2764.png"))
        .and(header("user-agent", "glyph-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(png()))
        .expect(1)
        .mount(&server)
        .await;

    let config = config_for(&server)
        .with_fetch_timeout(Duration::from_millis(800))
        .with_user_agent("glyph-tests/1.0");
    let ready = tokio::task::spawn_blocking(move || {
        let mut cache = EmojiCache::with_http(config).unwrap();
        let key = EmojiKey::from_code_points(&[0x2764]).unwrap();
        cache.ensure(&key, None);
        cache.wait_completed(&mut DrawList::new(), WAIT);
        cache.ensure(&key, None)
    })
    .await
    .unwrap();

    assert_eq!(ready.unwrap().width(), 8);
}

#[test]
fn test_bad_endpoint_is_rejected() {
    let config = EmojiCacheConfig::default().with_endpoint("https://example.com/emoji.png");
    assert!(EmojiCache::with_http(config).is_err());
}
