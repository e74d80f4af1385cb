// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::credentials::ProviderCredentials;
use crate::domain::models::provider::Provider;
use crate::domain::repositories::credential_repository::CredentialRepository;
use crate::infrastructure::crypto::{CryptoError, TokenCipher};
use crate::utils::errors::RepositoryError;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// 凭证读取错误
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("No {0} credentials found for this team")]
    NotFound(Provider),

    #[error("Failed to decrypt {provider} credentials: {source}")]
    Decrypt {
        provider: Provider,
        #[source]
        source: CryptoError,
    },

    #[error("{0} access token is empty")]
    EmptyAccessToken(Provider),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 凭证服务
///
/// 读取团队的平台凭证并在每次读取时解密
pub struct CredentialService<R: CredentialRepository> {
    repo: Arc<R>,
    cipher: TokenCipher,
}

impl<R: CredentialRepository> CredentialService<R> {
    /// 创建新的凭证服务实例
    ///
    /// # 参数
    ///
    /// * `repo` - 凭证仓库
    /// * `cipher` - 令牌解密器
    pub fn new(repo: Arc<R>, cipher: TokenCipher) -> Self {
        Self { repo, cipher }
    }

    /// 获取团队在某个平台上的已解密凭证
    ///
    /// # 参数
    ///
    /// * `team_id` - 团队ID
    /// * `provider` - 平台
    ///
    /// # 返回值
    ///
    /// * `Ok(ProviderCredentials)` - 解密后的凭证
    /// * `Err(CredentialError)` - 凭证不存在、解密失败或访问令牌为空
    pub async fn get_credentials(
        &self,
        team_id: Uuid,
        provider: Provider,
    ) -> Result<ProviderCredentials, CredentialError> {
        let stored = self
            .repo
            .find(team_id, provider.as_str())
            .await?
            .ok_or(CredentialError::NotFound(provider))?;

        let decrypt = |value: Option<&str>| {
            self.cipher
                .decrypt(value)
                .map_err(|source| CredentialError::Decrypt { provider, source })
        };

        let access_token = decrypt(Some(&stored.access_token))?;
        if access_token.is_empty() {
            return Err(CredentialError::EmptyAccessToken(provider));
        }

        let refresh_token = match stored.refresh_token.as_deref() {
            Some(token) => Some(decrypt(Some(token))?).filter(|t| !t.is_empty()),
            None => None,
        };

        debug!(team_id = %team_id, provider = %provider, "Loaded provider credentials");

        Ok(ProviderCredentials {
            access_token,
            refresh_token,
            provider_user_id: stored.provider_user_id,
            provider_page_id: stored.provider_page_id,
        })
    }
}
