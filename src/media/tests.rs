use super::*;
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_upload_image_returns_hosted_url() {
    let server = MockServer::start();
    let media = MediaClient::new(server.url(""), "sippure_unsigned".to_string());

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/image/upload")
            .body_includes("data:image/png;base64,")
            .body_includes("sippure_unsigned");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "secure_url": "https://media.example.com/uploads/chamomile.png"
            }));
    });

    let url = media
        .upload_image(Bytes::from_static(b"fake png bytes"), "image/png")
        .await
        .unwrap();
    assert_eq!(url, "https://media.example.com/uploads/chamomile.png");

    mock.assert();
}

#[tokio::test]
async fn test_upload_failure_is_surfaced() {
    let server = MockServer::start();
    let media = MediaClient::new(server.url(""), "sippure_unsigned".to_string());

    let mock = server.mock(|when, then| {
        when.method(POST).path("/image/upload");
        then.status(400)
            .header("content-type", "application/json")
            .json_body(json!({
                "error": {"message": "Upload preset not found"}
            }));
    });

    let result = media
        .upload_image(Bytes::from_static(b"fake png bytes"), "image/png")
        .await;
    match result {
        Err(MediaError::ApiError(msg)) => assert_eq!(msg, "Upload preset not found"),
        other => panic!("expected ApiError, got {:?}", other.map(|_| ())),
    }

    mock.assert();
}
