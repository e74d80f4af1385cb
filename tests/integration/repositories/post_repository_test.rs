// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::super::helpers::{insert_post, setup_db, NewPost};
use chrono::{Duration, Utc};
use publishrs::domain::models::notification::{Notification, NotificationType};
use publishrs::domain::models::post::{MediaType, PostStatus};
use publishrs::domain::repositories::post_repository::PostRepository;
use publishrs::infrastructure::database::entities::{notification, scheduled_post};
use publishrs::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use publishrs::utils::errors::RepositoryError;
use sea_orm::EntityTrait;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_find_due_filters_status_and_time() {
    let db = setup_db().await;
    let repo = PostRepositoryImpl::new(db.clone());

    insert_post(&db, NewPost { id: 1, ..Default::default() }).await;
    insert_post(
        &db,
        NewPost {
            id: 2,
            scheduled_at: Utc::now() + Duration::hours(1),
            ..Default::default()
        },
    )
    .await;
    insert_post(
        &db,
        NewPost {
            id: 3,
            status: "published",
            ..Default::default()
        },
    )
    .await;
    insert_post(
        &db,
        NewPost {
            id: 4,
            scheduled_at: Utc::now() - Duration::days(2),
            providers: &["linkedin", "instagram"],
            media_urls: &["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.jpg"],
            media_type: Some("image"),
            ..Default::default()
        },
    )
    .await;

    let mut due = repo.find_due(Utc::now()).await.unwrap();
    due.sort_by_key(|p| p.id);

    assert_eq!(due.iter().map(|p| p.id).collect::<Vec<_>>(), vec![1, 4]);
    let carousel = &due[1];
    assert_eq!(carousel.providers, vec!["linkedin", "instagram"]);
    assert_eq!(carousel.media_urls.len(), 2);
    assert_eq!(carousel.media_type, Some(MediaType::Image));
    assert_eq!(carousel.status, PostStatus::Scheduled);
}

#[tokio::test]
async fn test_unknown_media_type_is_read_as_none() {
    let db = setup_db().await;
    let repo = PostRepositoryImpl::new(db.clone());

    insert_post(
        &db,
        NewPost {
            media_urls: &["https://cdn.example.com/a.gif"],
            media_type: Some("mixed"),
            ..Default::default()
        },
    )
    .await;

    let due = repo.find_due(Utc::now()).await.unwrap();
    assert_eq!(due.len(), 1);
    assert_eq!(due[0].media_type, None);
    assert!(due[0].validate().is_err());
}

#[tokio::test]
async fn test_update_status_is_terminal() {
    let db = setup_db().await;
    let repo = PostRepositoryImpl::new(db.clone());
    insert_post(&db, NewPost { id: 7, ..Default::default() }).await;

    repo.update_status(7, PostStatus::PartialSuccess, Utc::now())
        .await
        .unwrap();

    let row = scheduled_post::Entity::find_by_id(7)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "partial_success");
    assert!(row.published_at.is_some());

    // No longer claimed
    assert!(repo.find_due(Utc::now()).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_status_rejects_scheduled() {
    let db = setup_db().await;
    let repo = PostRepositoryImpl::new(db.clone());
    insert_post(&db, NewPost { id: 8, ..Default::default() }).await;

    let result = repo.update_status(8, PostStatus::Scheduled, Utc::now()).await;
    assert!(matches!(result, Err(RepositoryError::InvalidData(_))));

    let row = scheduled_post::Entity::find_by_id(8)
        .one(db.as_ref())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.status, "scheduled");
    assert!(row.published_at.is_none());
}

#[tokio::test]
async fn test_update_status_unknown_post() {
    let db = setup_db().await;
    let repo = PostRepositoryImpl::new(db);

    let result = repo.update_status(404, PostStatus::Failed, Utc::now()).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
async fn test_create_notification() {
    let db = setup_db().await;
    let repo = PostRepositoryImpl::new(db.clone());
    let user_id = Uuid::new_v4();

    let notification = Notification {
        id: Uuid::new_v4(),
        user_id,
        team_id: Some(Uuid::new_v4()),
        notification_type: NotificationType::PostFailed,
        title: "Failed to publish to Facebook".to_string(),
        message: "Your scheduled post could not be published to Facebook: boom".to_string(),
        success: false,
        metadata: json!({ "post_id": 3, "provider": "facebook" }),
        read: false,
        created_at: Utc::now(),
    };
    repo.create_notification(&notification).await.unwrap();

    let rows = notification::Entity::find().all(db.as_ref()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].user_id, user_id);
    assert_eq!(rows[0].notification_type, "post_failed");
    assert_eq!(rows[0].metadata["provider"], "facebook");
    assert!(!rows[0].read);
}
