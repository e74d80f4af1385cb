// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{http_client, page_credentials, post, ACCESS_TOKEN};
use publishrs::domain::models::credentials::ProviderCredentials;
use publishrs::domain::models::post::MediaType;
use publishrs::publishers::facebook::FacebookPublisher;
use publishrs::publishers::{PublishError, Publisher};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAGE: &str = "page-1";

fn created(id: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "id": id }))
}

#[tokio::test]
async fn test_text_post_goes_to_feed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/page-1/feed"))
        .and(body_string_contains("message=Spring+launch"))
        .and(body_string_contains(format!("access_token={}", ACCESS_TOKEN)))
        .respond_with(created("page-1_post-1"))
        .expect(1)
        .mount(&server)
        .await;

    FacebookPublisher::new(http_client(), server.uri())
        .publish(&page_credentials(PAGE), &post(&["facebook"], &[], None))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_single_image_uses_photos_caption() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/page-1/photos"))
        .and(body_string_contains("url=https%3A%2F%2Fcdn.example.com%2Fa.jpg"))
        .and(body_string_contains("caption=Spring+launch"))
        .respond_with(created("photo-1"))
        .expect(1)
        .mount(&server)
        .await;

    FacebookPublisher::new(http_client(), server.uri())
        .publish(
            &page_credentials(PAGE),
            &post(&["facebook"], &["https://cdn.example.com/a.jpg"], Some(MediaType::Image)),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_single_video_uses_videos_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/page-1/videos"))
        .and(body_string_contains("file_url=https%3A%2F%2Fcdn.example.com%2Fclip.mp4"))
        .and(body_string_contains("description=Spring+launch"))
        .respond_with(created("video-1"))
        .expect(1)
        .mount(&server)
        .await;

    FacebookPublisher::new(http_client(), server.uri())
        .publish(
            &page_credentials(PAGE),
            &post(
                &["facebook"],
                &["https://cdn.example.com/clip.mp4"],
                Some(MediaType::Video),
            ),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_multiple_images_attach_unpublished_photos() {
    let server = MockServer::start().await;

    for (file, id) in [("a.jpg", "photo-a"), ("b.jpg", "photo-b")] {
        Mock::given(method("POST"))
            .and(path("/page-1/photos"))
            .and(body_string_contains("published=false"))
            .and(body_string_contains(format!(
                "url=https%3A%2F%2Fcdn.example.com%2F{}",
                file
            )))
            .respond_with(created(id))
            .expect(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/page-1/feed"))
        .and(body_string_contains("message=Spring+launch"))
        .and(body_string_contains(
            "attached_media%5B0%5D=%7B%22media_fbid%22%3A%22photo-a%22%7D",
        ))
        .and(body_string_contains(
            "attached_media%5B1%5D=%7B%22media_fbid%22%3A%22photo-b%22%7D",
        ))
        .respond_with(created("page-1_post-2"))
        .expect(1)
        .mount(&server)
        .await;

    FacebookPublisher::new(http_client(), server.uri())
        .publish(
            &page_credentials(PAGE),
            &post(
                &["facebook"],
                &["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"],
                Some(MediaType::Image),
            ),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_multiple_videos_unsupported() {
    let server = MockServer::start().await;

    let err = FacebookPublisher::new(http_client(), server.uri())
        .publish(
            &page_credentials(PAGE),
            &post(
                &["facebook"],
                &["https://cdn.example.com/1.mp4", "https://cdn.example.com/2.mp4"],
                Some(MediaType::Video),
            ),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::UnsupportedMedia(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_missing_page_id() {
    let server = MockServer::start().await;

    let err = FacebookPublisher::new(http_client(), server.uri())
        .publish(
            &ProviderCredentials::new(ACCESS_TOKEN),
            &post(&["facebook"], &[], None),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::MissingCredential(_)));
}

#[tokio::test]
async fn test_graph_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/page-1/feed"))
        .respond_with(ResponseTemplate::new(403).set_body_string(
            r#"{"error":{"message":"(#200) The user hasn't authorized the application","code":200}}"#,
        ))
        .mount(&server)
        .await;

    let err = FacebookPublisher::new(http_client(), server.uri())
        .publish(&page_credentials(PAGE), &post(&["facebook"], &[], None))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("facebook API error (403)"));
    assert!(err.to_string().contains("hasn't authorized"));
}
