// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::credentials::StoredCredentials;
use crate::domain::repositories::credential_repository::CredentialRepository;
use crate::infrastructure::database::entities::social_credential;
use crate::utils::errors::RepositoryError;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;
use uuid::Uuid;

/// 平台凭证仓库实现
#[derive(Clone)]
pub struct CredentialRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl CredentialRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<social_credential::Model> for StoredCredentials {
    fn from(model: social_credential::Model) -> Self {
        Self {
            team_id: model.team_id,
            provider: model.provider,
            access_token: model.access_token,
            refresh_token: model.refresh_token,
            provider_user_id: model.provider_user_id,
            provider_page_id: model.provider_page_id,
        }
    }
}

#[async_trait]
impl CredentialRepository for CredentialRepositoryImpl {
    async fn find(
        &self,
        team_id: Uuid,
        provider: &str,
    ) -> Result<Option<StoredCredentials>, RepositoryError> {
        let model = social_credential::Entity::find()
            .filter(social_credential::Column::TeamId.eq(team_id))
            .filter(social_credential::Column::Provider.eq(provider))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(StoredCredentials::from))
    }
}
