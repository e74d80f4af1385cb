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

use crate::domain::models::credentials::ProviderCredentials;
use crate::domain::models::post::ScheduledPost;
use crate::domain::models::provider::Provider;
use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// 发布错误类型
#[derive(Error, Debug)]
pub enum PublishError {
    /// 平台返回非成功状态码，`body` 为平台原始错误内容
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: Provider,
        status: u16,
        body: String,
    },
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 凭证缺少平台需要的字段
    #[error("Missing {0}")]
    MissingCredential(&'static str),
    /// 平台不支持的媒体组合
    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),
    /// 媒体容器处理失败
    #[error("Media container failed with status {0}")]
    ContainerFailed(String),
    /// 媒体容器在轮询次数内未处理完成
    #[error("Media container not ready after {0} status checks")]
    Timeout(u32),
    /// 响应格式不符合预期
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// 平台发布器特质
///
/// 每个平台一个实现，执行该平台完整的多步发布协议
#[async_trait]
pub trait Publisher: Send + Sync {
    /// 发布器对应的平台
    fn provider(&self) -> Provider;

    /// 将帖子发布到平台
    ///
    /// # 参数
    ///
    /// * `credentials` - 已解密的平台凭证
    /// * `post` - 待发布的帖子
    ///
    /// # 返回值
    ///
    /// * `Ok(())` - 发布成功
    /// * `Err(PublishError)` - 任一步骤失败
    async fn publish(
        &self,
        credentials: &ProviderCredentials,
        post: &ScheduledPost,
    ) -> Result<(), PublishError>;
}

/// 非成功状态码转换为带原始响应体的 `PublishError::Api`
pub(crate) async fn ensure_success(
    provider: Provider,
    response: Response,
) -> Result<Response, PublishError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(PublishError::Api {
        provider,
        status: status.as_u16(),
        body,
    })
}

/// 检查状态码并把响应体解析为 `T`
pub(crate) async fn read_json<T: DeserializeOwned>(
    provider: Provider,
    response: Response,
) -> Result<T, PublishError> {
    let response = ensure_success(provider, response).await?;
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| PublishError::InvalidResponse(format!("{}: {}", e, body)))
}
