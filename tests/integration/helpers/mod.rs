// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Duration, Utc};
use migration::{Migrator, MigratorTrait};
use publishrs::domain::models::credentials::ProviderCredentials;
use publishrs::domain::models::post::{MediaType, PostStatus, ScheduledPost};
use publishrs::infrastructure::database::entities::{scheduled_post, social_credential};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

pub const ACCESS_TOKEN: &str = "provider-access-token";

/// 内存 SQLite 并执行全部迁移
pub async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

/// 测试用HTTP客户端（不走配置）
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .unwrap()
}

/// 内存中的帖子，`media_urls` 为空时不设置媒体类型
pub fn post(providers: &[&str], media_urls: &[&str], media_type: Option<MediaType>) -> ScheduledPost {
    ScheduledPost {
        id: 1,
        team_id: Some(Uuid::new_v4()),
        user_id: Some(Uuid::new_v4()),
        providers: providers.iter().map(|p| p.to_string()).collect(),
        content: "Spring launch\nNew products are live.".to_string(),
        media_urls: media_urls.iter().map(|u| u.to_string()).collect(),
        media_type,
        status: PostStatus::Scheduled,
        scheduled_at: Utc::now(),
        published_at: None,
    }
}

pub fn page_credentials(page_id: &str) -> ProviderCredentials {
    ProviderCredentials::new(ACCESS_TOKEN).with_page_id(page_id)
}

pub struct NewPost<'a> {
    pub id: i64,
    pub team_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
    pub providers: &'a [&'a str],
    pub media_urls: &'a [&'a str],
    pub media_type: Option<&'a str>,
    pub status: &'a str,
    pub scheduled_at: DateTime<Utc>,
}

impl Default for NewPost<'_> {
    fn default() -> Self {
        Self {
            id: 1,
            team_id: Some(Uuid::new_v4()),
            user_id: Some(Uuid::new_v4()),
            providers: &["facebook"],
            media_urls: &[],
            media_type: None,
            status: "scheduled",
            scheduled_at: Utc::now() - Duration::minutes(5),
        }
    }
}

pub async fn insert_post(db: &DatabaseConnection, new: NewPost<'_>) {
    scheduled_post::ActiveModel {
        id: Set(new.id),
        team_id: Set(new.team_id),
        user_id: Set(new.user_id),
        content: Set(format!("Post #{}", new.id)),
        providers: Set(json!(new.providers)),
        media_urls: Set(json!(new.media_urls)),
        media_type: Set(new.media_type.map(str::to_string)),
        status: Set(new.status.to_string()),
        scheduled_at: Set(new.scheduled_at.into()),
        published_at: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn insert_credential(
    db: &DatabaseConnection,
    team_id: Uuid,
    provider: &str,
    access_token: &str,
    page_id: Option<&str>,
) {
    social_credential::ActiveModel {
        id: Set(Uuid::new_v4()),
        team_id: Set(team_id),
        provider: Set(provider.to_string()),
        access_token: Set(access_token.to_string()),
        refresh_token: Set(None),
        provider_user_id: Set(Some("person-123".to_string())),
        provider_page_id: Set(page_id.map(str::to_string)),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .unwrap();
}
