// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// 定时帖子实体
///
/// 由主应用创建（`status = scheduled`），发布工作器在 `scheduled_at` 到期后
/// 认领并只写入一次终态。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPost {
    /// 帖子ID（由主应用分配）
    pub id: i64,
    /// 所属团队ID，缺失时整个帖子直接失败
    pub team_id: Option<Uuid>,
    /// 创建者ID，用于写通知
    pub user_id: Option<Uuid>,
    /// 需要发布到的平台，按存储顺序逐个尝试
    pub providers: Vec<String>,
    /// 正文（各平台的文案）
    pub content: String,
    /// 媒体文件URL
    pub media_urls: Vec<String>,
    /// 所有媒体共享的类型
    pub media_type: Option<MediaType>,
    /// 当前状态
    pub status: PostStatus,
    /// 计划发布时间
    pub scheduled_at: DateTime<Utc>,
    /// 写入终态的时间
    pub published_at: Option<DateTime<Utc>>,
}

/// 帖子结构性错误
///
/// 这些错误在尝试任何平台之前就能确定，整个帖子记为失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    #[error("Post is missing team information")]
    MissingTeam,
    #[error("Post has no providers to publish to")]
    NoProviders,
    #[error("Post media has no single media type; mixed or unknown media is not supported")]
    UnknownMediaType,
}

impl ScheduledPost {
    /// 校验帖子是否可以进入平台发布流程
    ///
    /// # 返回值
    ///
    /// * `Ok(Uuid)` - 帖子所属团队ID
    /// * `Err(PostValidationError)` - 结构性错误
    pub fn validate(&self) -> Result<Uuid, PostValidationError> {
        let team_id = self.team_id.ok_or(PostValidationError::MissingTeam)?;

        if self.providers.is_empty() {
            return Err(PostValidationError::NoProviders);
        }

        if self.has_media() && self.media_type.is_none() {
            return Err(PostValidationError::UnknownMediaType);
        }

        Ok(team_id)
    }

    pub fn has_media(&self) -> bool {
        !self.media_urls.is_empty()
    }

    pub fn is_video(&self) -> bool {
        self.media_type == Some(MediaType::Video)
    }
}

/// 媒体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Image => write!(f, "image"),
            MediaType::Video => write!(f, "video"),
        }
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            _ => Err(format!("Invalid media type: {}", s)),
        }
    }
}

/// 帖子状态
///
/// `Scheduled` 之外的三个状态都是终态，本服务不会再次转换
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Scheduled,
    Published,
    PartialSuccess,
    Failed,
}

impl PostStatus {
    /// 根据成功的平台数计算终态
    ///
    /// 全部成功为 `Published`，部分成功为 `PartialSuccess`，否则为 `Failed`
    pub fn from_outcome(success_count: usize, total: usize) -> Self {
        if total > 0 && success_count >= total {
            PostStatus::Published
        } else if success_count > 0 {
            PostStatus::PartialSuccess
        } else {
            PostStatus::Failed
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PostStatus::Scheduled)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostStatus::Scheduled => write!(f, "scheduled"),
            PostStatus::Published => write!(f, "published"),
            PostStatus::PartialSuccess => write!(f, "partial_success"),
            PostStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(PostStatus::Scheduled),
            "published" => Ok(PostStatus::Published),
            "partial_success" => Ok(PostStatus::PartialSuccess),
            "failed" => Ok(PostStatus::Failed),
            _ => Err(format!("Invalid post status: {}", s)),
        }
    }
}
