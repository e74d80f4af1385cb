// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::notification::{Notification, NotificationType};
use crate::domain::models::post::{PostStatus, ScheduledPost};
use crate::domain::models::provider::Provider;
use crate::domain::repositories::post_repository::PostRepository;
use crate::utils::errors::RepositoryError;
use crate::utils::text::truncate_chars;
use chrono::Utc;
use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 帖子级（而不是平台级）失败时使用的通知标签
pub const SYSTEM_LABEL: &str = "system";

/// 帖子生命周期服务
///
/// 在仓库之上负责读取到期帖子、写入终态和记录通知
pub struct PostService<R: PostRepository> {
    repo: Arc<R>,
    message_max_len: usize,
}

impl<R: PostRepository> PostService<R> {
    /// 创建新的帖子服务实例
    ///
    /// # 参数
    ///
    /// * `repo` - 帖子仓库
    /// * `message_max_len` - 通知中错误信息的最大字符数
    pub fn new(repo: Arc<R>, message_max_len: usize) -> Self {
        Self {
            repo,
            message_max_len,
        }
    }

    /// 获取当前到期的帖子
    pub async fn due_posts(&self) -> Result<Vec<ScheduledPost>, RepositoryError> {
        self.repo.find_due(Utc::now()).await
    }

    /// 根据成功平台数写入帖子终态
    ///
    /// # 参数
    ///
    /// * `post_id` - 帖子ID
    /// * `success_count` - 发布成功的平台数
    /// * `total` - 请求的平台总数
    ///
    /// # 返回值
    ///
    /// * `Ok(PostStatus)` - 写入的终态
    /// * `Err(RepositoryError)` - 写入失败
    pub async fn finalize_status(
        &self,
        post_id: i64,
        success_count: usize,
        total: usize,
    ) -> Result<PostStatus, RepositoryError> {
        let status = PostStatus::from_outcome(success_count, total);
        self.repo.update_status(post_id, status, Utc::now()).await?;

        counter!("posts_finalized_total", "status" => status.to_string()).increment(1);
        info!(
            post_id,
            success_count, total, status = %status, "Post finalized"
        );

        Ok(status)
    }

    /// 记录一次平台尝试的通知
    ///
    /// 尽力而为：帖子没有用户时跳过，写入失败只记录日志，不会返回给调用方。
    ///
    /// # 参数
    ///
    /// * `post` - 帖子
    /// * `provider` - 平台存储键、原始平台字符串或 [`SYSTEM_LABEL`]
    /// * `success` - 是否发布成功
    /// * `error_message` - 失败原因
    pub async fn record_notification(
        &self,
        post: &ScheduledPost,
        provider: &str,
        success: bool,
        error_message: Option<&str>,
    ) {
        let Some(user_id) = post.user_id else {
            warn!(
                post_id = post.id,
                provider, "Post has no user, skipping notification"
            );
            return;
        };

        let notification = self.build_notification(post, user_id, provider, success, error_message);
        if let Err(e) = self.repo.create_notification(&notification).await {
            counter!("notification_write_failures_total").increment(1);
            error!(
                post_id = post.id,
                provider,
                error = %e,
                "Failed to write notification"
            );
        }
    }

    fn build_notification(
        &self,
        post: &ScheduledPost,
        user_id: Uuid,
        provider: &str,
        success: bool,
        error_message: Option<&str>,
    ) -> Notification {
        let name = display_name(provider);
        let reason = truncate_chars(error_message.unwrap_or("Unknown error"), self.message_max_len);

        let (notification_type, title, message) = if success {
            (
                NotificationType::PostPublished,
                format!("Post published to {}", name),
                format!("Your scheduled post was published to {}.", name),
            )
        } else if provider == SYSTEM_LABEL {
            (
                NotificationType::PostFailed,
                "Scheduled post failed".to_string(),
                format!("Your scheduled post could not be published: {}", reason),
            )
        } else {
            (
                NotificationType::PostFailed,
                format!("Failed to publish to {}", name),
                format!("Your scheduled post could not be published to {}: {}", name, reason),
            )
        };

        Notification {
            id: Uuid::new_v4(),
            user_id,
            team_id: post.team_id,
            notification_type,
            title,
            message,
            success,
            metadata: json!({
                "post_id": post.id,
                "provider": provider,
            }),
            read: false,
            created_at: Utc::now(),
        }
    }
}

fn display_name(provider: &str) -> String {
    provider
        .parse::<Provider>()
        .map(|p| p.display_name().to_string())
        .unwrap_or_else(|_| provider.to_string())
}
