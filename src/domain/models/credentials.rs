// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::fmt;
use uuid::Uuid;

/// 存储中的平台凭证（令牌仍为加密形式）
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub team_id: Uuid,
    pub provider: String,
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub provider_user_id: Option<String>,
    pub provider_page_id: Option<String>,
}

/// 解密后的平台凭证
///
/// 每次读取时解密，不做缓存
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProviderCredentials {
    /// 访问令牌
    pub access_token: String,
    /// 刷新令牌（暂未使用）
    pub refresh_token: Option<String>,
    /// 平台侧用户标识，例如 LinkedIn person URN 的后缀
    pub provider_user_id: Option<String>,
    /// 平台侧目标标识，例如 Facebook 主页ID或 Instagram 账号ID
    pub provider_page_id: Option<String>,
}

impl ProviderCredentials {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            ..Default::default()
        }
    }

    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.provider_user_id = Some(id.into());
        self
    }

    pub fn with_page_id(mut self, id: impl Into<String>) -> Self {
        self.provider_page_id = Some(id.into());
        self
    }
}

// Tokens never go to logs
impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("provider_user_id", &self.provider_user_id)
            .field("provider_page_id", &self.provider_page_id)
            .finish()
    }
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("team_id", &self.team_id)
            .field("provider", &self.provider)
            .field("provider_user_id", &self.provider_user_id)
            .field("provider_page_id", &self.provider_page_id)
            .finish_non_exhaustive()
    }
}
