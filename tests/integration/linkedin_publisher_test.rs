// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{http_client, post, ACCESS_TOKEN};
use publishrs::domain::models::credentials::ProviderCredentials;
use publishrs::domain::models::post::MediaType;
use publishrs::publishers::linkedin::LinkedInPublisher;
use publishrs::publishers::{PublishError, Publisher};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{
    body_partial_json, body_string_contains, header, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASSET: &str = "urn:li:digitalmediaAsset:C5522AQ";

fn credentials() -> ProviderCredentials {
    ProviderCredentials::new(ACCESS_TOKEN).with_user_id("person-123")
}

async fn mount_register_upload(server: &MockServer, recipe: &str) {
    Mock::given(method("POST"))
        .and(path("/assets"))
        .and(query_param("action", "registerUpload"))
        .and(header("X-Restli-Protocol-Version", "2.0.0"))
        .and(body_string_contains(recipe))
        .and(body_partial_json(json!({
            "registerUploadRequest": {
                "owner": "urn:li:person:person-123",
                "serviceRelationships": [{
                    "relationshipType": "OWNER",
                    "identifier": "urn:li:userGeneratedContent"
                }]
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "value": {
                "uploadMechanism": {
                    "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest": {
                        "headers": {},
                        "uploadUrl": format!("{}/upload/1", server.uri())
                    }
                },
                "asset": ASSET,
                "mediaArtifact": "urn:li:digitalmediaMediaArtifact:(urn:li:digitalmediaAsset:C5522AQ,urn:li:digitalmediaMediaArtifactClass:feedshare-uploadedImage)"
            }
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_media_source(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/media/a.jpg"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(b"JPEGBYTES".to_vec()),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_text_only_share() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ugcPosts"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .and(header("X-Restli-Protocol-Version", "2.0.0"))
        .and(body_partial_json(json!({
            "author": "urn:li:person:person-123",
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": { "shareMediaCategory": "NONE" }
            },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
        })))
        .respond_with(ResponseTemplate::new(201).insert_header("x-restli-id", "urn:li:share:1"))
        .expect(1)
        .mount(&server)
        .await;

    LinkedInPublisher::new(http_client(), server.uri())
        .publish(&credentials(), &post(&["linkedin"], &[], None))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_image_is_registered_uploaded_and_shared() {
    let server = MockServer::start().await;
    let media_url = format!("{}/media/a.jpg", server.uri());

    mount_register_upload(&server, "urn:li:digitalmediaRecipe:feedshare-image").await;
    mount_media_source(&server).await;

    Mock::given(method("PUT"))
        .and(path("/upload/1"))
        .and(header("authorization", format!("Bearer {}", ACCESS_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ugcPosts"))
        .and(body_partial_json(json!({
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareMediaCategory": "IMAGE",
                    "media": [{
                        "status": "READY",
                        "media": ASSET,
                        "title": { "text": "Spring launch" }
                    }]
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    LinkedInPublisher::new(http_client(), server.uri())
        .publish(
            &credentials(),
            &post(&["linkedin"], &[media_url.as_str()], Some(MediaType::Image)),
        )
        .await
        .unwrap();

    let uploaded: Vec<Vec<u8>> = server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == "/upload/1")
        .map(|r| r.body)
        .collect();
    assert_eq!(uploaded, vec![b"JPEGBYTES".to_vec()]);
}

#[tokio::test]
async fn test_failed_upload_stops_before_share() {
    let server = MockServer::start().await;
    let media_url = format!("{}/media/a.jpg", server.uri());

    mount_register_upload(&server, "urn:li:digitalmediaRecipe:feedshare-image").await;
    mount_media_source(&server).await;

    Mock::given(method("PUT"))
        .and(path("/upload/1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upload rejected"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ugcPosts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = LinkedInPublisher::new(http_client(), server.uri())
        .publish(
            &credentials(),
            &post(&["linkedin"], &[media_url.as_str()], Some(MediaType::Image)),
        )
        .await
        .unwrap_err();

    match err {
        PublishError::Api { status, body, .. } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upload rejected");
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn short_timeout_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap()
}

async fn mount_slow_upload(server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path("/upload/1"))
        .respond_with(ResponseTemplate::new(201).set_delay(Duration::from_millis(800)))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_media_upload_outlives_api_timeout() {
    let server = MockServer::start().await;
    let media_url = format!("{}/media/a.jpg", server.uri());

    mount_register_upload(&server, "urn:li:digitalmediaRecipe:feedshare-image").await;
    mount_media_source(&server).await;
    mount_slow_upload(&server).await;

    Mock::given(method("POST"))
        .and(path("/ugcPosts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    LinkedInPublisher::new(short_timeout_client(), server.uri())
        .with_upload_timeout(Duration::from_secs(5))
        .publish(
            &credentials(),
            &post(&["linkedin"], &[media_url.as_str()], Some(MediaType::Image)),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_media_upload_timeout_is_enforced() {
    let server = MockServer::start().await;
    let media_url = format!("{}/media/a.jpg", server.uri());

    mount_register_upload(&server, "urn:li:digitalmediaRecipe:feedshare-image").await;
    mount_media_source(&server).await;
    mount_slow_upload(&server).await;

    Mock::given(method("POST"))
        .and(path("/ugcPosts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let err = LinkedInPublisher::new(http_client(), server.uri())
        .with_upload_timeout(Duration::from_millis(100))
        .publish(
            &credentials(),
            &post(&["linkedin"], &[media_url.as_str()], Some(MediaType::Image)),
        )
        .await
        .unwrap_err();

    match err {
        PublishError::RequestFailed(e) => assert!(e.is_timeout(), "unexpected error: {e}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_missing_person_id() {
    let server = MockServer::start().await;

    let err = LinkedInPublisher::new(http_client(), server.uri())
        .publish(
            &ProviderCredentials::new(ACCESS_TOKEN),
            &post(&["linkedin"], &[], None),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, PublishError::MissingCredential(_)));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
