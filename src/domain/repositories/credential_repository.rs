// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::credentials::StoredCredentials;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use uuid::Uuid;

/// 平台凭证仓库特质
///
/// 每个（团队，平台）最多一行，本服务只读
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// 查找团队在某个平台上的加密凭证
    async fn find(
        &self,
        team_id: Uuid,
        provider: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError>;
}
