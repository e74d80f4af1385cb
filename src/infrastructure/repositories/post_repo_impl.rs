// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::notification::Notification;
use crate::domain::models::post::{PostStatus, ScheduledPost};
use crate::domain::repositories::post_repository::PostRepository;
use crate::infrastructure::database::entities::{
    notification as notification_entity, scheduled_post as post_entity,
};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set,
};
use std::sync::Arc;
use tracing::warn;

/// 帖子仓库实现
///
/// 基于SeaORM实现的定时帖子和通知数据访问层
#[derive(Clone)]
pub struct PostRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl PostRepositoryImpl {
    /// 创建新的帖子仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

/// 读取JSON字符串数组列，非数组或非字符串元素记录警告后忽略
fn string_list(post_id: i64, column: &str, value: serde_json::Value) -> Vec<String> {
    match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => Some(s),
                other => {
                    warn!(post_id, column, value = %other, "Ignoring non-string list entry");
                    None
                }
            })
            .collect(),
        serde_json::Value::Null => Vec::new(),
        other => {
            warn!(post_id, column, value = %other, "Expected a JSON array");
            Vec::new()
        }
    }
}

impl From<post_entity::Model> for ScheduledPost {
    fn from(model: post_entity::Model) -> Self {
        let id = model.id;
        let media_type = model.media_type.as_deref().and_then(|raw| match raw.parse() {
            Ok(media_type) => Some(media_type),
            Err(e) => {
                warn!(post_id = id, "{}", e);
                None
            }
        });

        Self {
            id,
            team_id: model.team_id,
            user_id: model.user_id,
            providers: string_list(id, "providers", model.providers),
            content: model.content,
            media_urls: string_list(id, "media_urls", model.media_urls),
            media_type,
            status: model.status.parse().unwrap_or_default(),
            scheduled_at: model.scheduled_at.with_timezone(&Utc),
            published_at: model.published_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

impl From<&Notification> for notification_entity::ActiveModel {
    fn from(notification: &Notification) -> Self {
        Self {
            id: Set(notification.id),
            user_id: Set(notification.user_id),
            team_id: Set(notification.team_id),
            notification_type: Set(notification.notification_type.to_string()),
            title: Set(notification.title.clone()),
            message: Set(notification.message.clone()),
            success: Set(notification.success),
            metadata: Set(notification.metadata.clone()),
            read: Set(notification.read),
            created_at: Set(notification.created_at.into()),
        }
    }
}

#[async_trait]
impl PostRepository for PostRepositoryImpl {
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledPost>, RepositoryError> {
        let now: DateTime<FixedOffset> = now.into();
        let models = post_entity::Entity::find()
            .filter(post_entity::Column::Status.eq(PostStatus::Scheduled.to_string()))
            .filter(post_entity::Column::ScheduledAt.lte(now))
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(ScheduledPost::from).collect())
    }

    async fn update_status(
        &self,
        post_id: i64,
        status: PostStatus,
        published_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        if !status.is_terminal() {
            return Err(RepositoryError::InvalidData(format!(
                "refusing to write non-terminal status {} for post {}",
                status, post_id
            )));
        }

        let published_at: DateTime<FixedOffset> = published_at.into();
        let result = post_entity::Entity::update_many()
            .col_expr(post_entity::Column::Status, Expr::value(status.to_string()))
            .col_expr(post_entity::Column::PublishedAt, Expr::value(published_at))
            .filter(post_entity::Column::Id.eq(post_id))
            .exec(self.db.as_ref())
            .await?;

        if result.rows_affected == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn create_notification(
        &self,
        notification: &Notification,
    ) -> Result<(), RepositoryError> {
        notification_entity::ActiveModel::from(notification)
            .insert(self.db.as_ref())
            .await?;
        Ok(())
    }
}
