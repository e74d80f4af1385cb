// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! Instagram Graph 发布
//!
//! 流程：创建媒体容器（轮播时先为每个子项创建容器）→ 轮询容器状态直到
//! `FINISHED` → `media_publish`。单媒体帖子的文案在发布时附带，轮播帖子的
//! 文案附在轮播容器上。

use super::traits::{read_json, PublishError, Publisher};
use crate::domain::models::credentials::ProviderCredentials;
use crate::domain::models::post::ScheduledPost;
use crate::domain::models::provider::Provider;
use crate::utils::poll_policy::{PollError, PollPolicy, PollStatus};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct GraphObject {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ContainerStatus {
    status_code: Option<String>,
}

/// Instagram 发布器
pub struct InstagramPublisher {
    client: Client,
    graph_base: String,
    poll: PollPolicy,
}

impl InstagramPublisher {
    /// 创建新的 Instagram 发布器
    ///
    /// # 参数
    ///
    /// * `client` - 共享的HTTP客户端
    /// * `graph_base` - Graph API 根地址（含版本）
    /// * `poll` - 容器状态轮询策略
    pub fn new(client: Client, graph_base: impl Into<String>, poll: PollPolicy) -> Self {
        Self {
            client,
            graph_base: graph_base.into().trim_end_matches('/').to_string(),
            poll,
        }
    }

    async fn post_form(
        &self,
        path: &str,
        token: &str,
        mut fields: Vec<(&'static str, String)>,
    ) -> Result<String, PublishError> {
        fields.push(("access_token", token.to_string()));

        let response = self
            .client
            .post(format!("{}/{}", self.graph_base, path))
            .form(&fields)
            .send()
            .await?;

        let object: GraphObject = read_json(Provider::Instagram, response).await?;
        Ok(object.id)
    }

    async fn create_container(
        &self,
        account_id: &str,
        token: &str,
        fields: Vec<(&'static str, String)>,
    ) -> Result<String, PublishError> {
        let id = self
            .post_form(&format!("{}/media", account_id), token, fields)
            .await?;
        debug!(container_id = %id, "Created Instagram media container");
        Ok(id)
    }

    async fn container_status(
        &self,
        container_id: &str,
        token: &str,
        attempt: u32,
    ) -> Result<PollStatus<()>, PublishError> {
        let response = self
            .client
            .get(format!("{}/{}", self.graph_base, container_id))
            .query(&[("fields", "status_code"), ("access_token", token)])
            .send()
            .await?;

        let status: ContainerStatus = read_json(Provider::Instagram, response).await?;
        let code = status.status_code.unwrap_or_default();
        debug!(container_id, attempt, status_code = %code, "Polled Instagram container");

        Ok(match code.as_str() {
            "FINISHED" => PollStatus::Ready(()),
            "ERROR" | "EXPIRED" => PollStatus::Failed(code),
            _ => PollStatus::Pending,
        })
    }

    /// 等待容器处理完成
    async fn wait_until_ready(&self, container_id: &str, token: &str) -> Result<(), PublishError> {
        self.poll
            .run(|attempt| self.container_status(container_id, token, attempt))
            .await
            .map_err(|e| match e {
                PollError::Failed { reason, .. } => PublishError::ContainerFailed(reason),
                PollError::Exhausted { attempts } => PublishError::Timeout(attempts),
                PollError::Check(e) => e,
            })
    }
}

/// 单个媒体的容器字段
fn item_fields(url: &str, is_video: bool, carousel_item: bool) -> Vec<(&'static str, String)> {
    let mut fields = Vec::with_capacity(3);
    if is_video {
        fields.push(("video_url", url.to_string()));
        let media_type = if carousel_item { "VIDEO" } else { "REELS" };
        fields.push(("media_type", media_type.to_string()));
    } else {
        fields.push(("image_url", url.to_string()));
    }
    if carousel_item {
        fields.push(("is_carousel_item", "true".to_string()));
    }
    fields
}

#[async_trait]
impl Publisher for InstagramPublisher {
    fn provider(&self) -> Provider {
        Provider::Instagram
    }

    async fn publish(
        &self,
        credentials: &ProviderCredentials,
        post: &ScheduledPost,
    ) -> Result<(), PublishError> {
        let account_id = credentials
            .provider_page_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(PublishError::MissingCredential("Instagram account id"))?;
        let token = credentials.access_token.as_str();

        let (container_id, publish_caption) = match post.media_urls.as_slice() {
            [] => {
                return Err(PublishError::UnsupportedMedia(
                    "Instagram posts require at least one image or video".to_string(),
                ))
            }
            [url] => {
                let id = self
                    .create_container(account_id, token, item_fields(url, post.is_video(), false))
                    .await?;
                (id, Some(post.content.clone()))
            }
            urls => {
                let mut children = Vec::with_capacity(urls.len());
                for url in urls {
                    children.push(
                        self.create_container(
                            account_id,
                            token,
                            item_fields(url, post.is_video(), true),
                        )
                        .await?,
                    );
                }

                let id = self
                    .create_container(
                        account_id,
                        token,
                        vec![
                            ("media_type", "CAROUSEL".to_string()),
                            ("children", children.join(",")),
                            ("caption", post.content.clone()),
                        ],
                    )
                    .await?;
                (id, None)
            }
        };

        self.wait_until_ready(&container_id, token).await?;

        let mut fields = vec![("creation_id", container_id)];
        if let Some(caption) = publish_caption {
            fields.push(("caption", caption));
        }
        let media_id = self
            .post_form(&format!("{}/media_publish", account_id), token, fields)
            .await?;

        info!(post_id = post.id, media_id = %media_id, "Published to Instagram");
        Ok(())
    }
}
