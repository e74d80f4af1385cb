// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 社交平台枚举
///
/// 支持发布的平台集合是封闭的，新增平台需要在这里和发布器注册表中同时补充
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// LinkedIn UGC 帖子
    LinkedIn,
    /// Facebook 主页
    Facebook,
    /// Instagram 商业账号
    Instagram,
}

impl Provider {
    pub const ALL: [Provider; 3] = [Provider::LinkedIn, Provider::Facebook, Provider::Instagram];

    /// 存储中使用的键
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::LinkedIn => "linkedin",
            Provider::Facebook => "facebook",
            Provider::Instagram => "instagram",
        }
    }

    /// 通知中展示的名称
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::LinkedIn => "LinkedIn",
            Provider::Facebook => "Facebook",
            Provider::Instagram => "Instagram",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsupported provider: {0}")]
pub struct UnsupportedProvider(pub String);

impl FromStr for Provider {
    type Err = UnsupportedProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linkedin" => Ok(Provider::LinkedIn),
            "facebook" => Ok(Provider::Facebook),
            "instagram" => Ok(Provider::Instagram),
            _ => Err(UnsupportedProvider(s.to_string())),
        }
    }
}
