use std::time::Duration;

use moodline::kernel::event::VideoIdentity;
use moodline::kernel::segment::{Mood, Segment};
use moodline::kernel::state::SegmentSource;
use moodline::kernel::telemetry::event::FailureKind;
use moodline::services::classifier::{ClassificationError, HttpMoodClassifier, MoodClassifier};
use moodline::services::playback::HeadlessPlayer;
use moodline::services::transcript::StaticTranscript;
use moodline::{TimelineConfig, TimelineDriver};
use serde_json::json;
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> HttpMoodClassifier {
    HttpMoodClassifier::new(Duration::from_secs(2))
}

fn demo_video(server: &MockServer) -> VideoIdentity {
    VideoIdentity::new(server.uri(), "demo-video")
}

#[tokio::test]
async fn test_posts_form_encoded_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mood/demo-video"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string("transcript=hello+world"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "segments": [
                {"t0": 0, "t1": 5, "mood": "calm", "confidence": 0.5},
                {"t0": 5, "t1": 9.5, "mood": "hype", "confidence": 0.93}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let segments = client()
        .classify("hello world".into(), demo_video(&server))
        .await
        .expect("classification succeeds");

    assert_eq!(
        segments,
        vec![
            Segment::new(0.0, 5.0, Mood::Calm, 0.5).unwrap(),
            Segment::new(5.0, 9.5, Mood::Hype, 0.93).unwrap(),
        ]
    );
}

#[tokio::test]
async fn test_non_success_status_fails() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mood/demo-video"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"segments": []})))
        .mount(&server)
        .await;

    let err = client()
        .classify("t".into(), demo_video(&server))
        .await
        .unwrap_err();

    assert_eq!(err, ClassificationError::Status(500));
    assert_eq!(err.kind(), FailureKind::Status);
}

#[tokio::test]
async fn test_missing_segments_key_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"detail": "ok"})))
        .mount(&server)
        .await;

    let err = client()
        .classify("t".into(), demo_video(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, ClassificationError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_invalid_segment_rejects_whole_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "segments": [
                {"t0": 0, "t1": 5, "mood": "calm", "confidence": 0.5},
                {"t0": 9, "t1": 4, "mood": "hype", "confidence": 0.5}
            ]
        })))
        .mount(&server)
        .await;

    let err = client()
        .classify("t".into(), demo_video(&server))
        .await
        .unwrap_err();

    assert!(matches!(err, ClassificationError::MalformedSegment { index: 1, .. }));
    assert!(err.is_malformed());
}

#[tokio::test]
async fn test_timeout_is_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"segments": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = HttpMoodClassifier::new(Duration::from_millis(50));
    let err = client.classify("t".into(), demo_video(&server)).await.unwrap_err();

    assert_eq!(err.kind(), FailureKind::Network);
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on the discard port
    let client = HttpMoodClassifier::new(Duration::from_secs(1));
    let identity = VideoIdentity::new("http://127.0.0.1:9", "demo-video");
    let err = client.classify("t".into(), identity).await.unwrap_err();

    assert!(matches!(err, ClassificationError::Network(_)));
}

#[tokio::test]
async fn test_driver_requests_configured_api_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/mood/clip-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "segments": [{"t0": 0, "t1": 12, "mood": "hype", "confidence": 0.9}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    // The API URL is configured once and reaches the request through the mount
    let config = TimelineConfig { api_url: format!("{}/", server.uri()), ..TimelineConfig::default() };
    let (driver, handle) = TimelineDriver::new(&config, client(), HeadlessPlayer::new(), StaticTranscript::demo());
    let task = tokio::spawn(driver.run());

    let mut view = handle.view();
    handle.mount("clip-7").await.unwrap();
    let ready = tokio::time::timeout(Duration::from_secs(2), view.wait_for(|v| v.source.is_some()))
        .await
        .expect("acquisition completes")
        .expect("driver alive")
        .clone();

    assert_eq!(ready.source, Some(SegmentSource::Remote));
    assert_eq!(ready.blocks[0].width_percent, 50.0);

    handle.shutdown().await;
    task.await.unwrap();
}
