// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::Notification;
use crate::domain::models::post::{PostStatus, ScheduledPost};
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// 帖子仓库特质
///
/// 定义定时帖子和通知的数据访问接口
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// 查找到期的帖子（`status = scheduled` 且 `scheduled_at <= now`），不保证顺序
    async fn find_due(&self, now: DateTime<Utc>) -> Result<Vec<ScheduledPost>, RepositoryError>;
    /// 写入帖子状态和发布时间
    async fn update_status(
        &self,
        post_id: i64,
        status: PostStatus,
        published_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
    /// 插入一条通知
    async fn create_notification(&self, notification: &Notification)
        -> Result<(), RepositoryError>;
}
