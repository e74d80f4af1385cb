// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// 通知实体
///
/// 每次（帖子，平台）尝试写入一条，只插入不更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// 接收通知的用户
    pub user_id: Uuid,
    pub team_id: Option<Uuid>,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub success: bool,
    /// 附加信息：`post_id`、`provider`
    pub metadata: serde_json::Value,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// 通知类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    PostPublished,
    PostFailed,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::PostPublished => write!(f, "post_published"),
            NotificationType::PostFailed => write!(f, "post_failed"),
        }
    }
}

impl std::str::FromStr for NotificationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post_published" => Ok(NotificationType::PostPublished),
            "post_failed" => Ok(NotificationType::PostFailed),
            _ => Err(format!("Invalid notification type: {}", s)),
        }
    }
}
