// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::traits::{read_json, PublishError, Publisher};
use crate::domain::models::credentials::ProviderCredentials;
use crate::domain::models::post::ScheduledPost;
use crate::domain::models::provider::Provider;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct GraphObject {
    id: String,
}

/// Facebook 主页发布器
///
/// 按媒体数量和类型选择 Graph API 端点：
/// 无媒体走 `feed`，单图走 `photos`，单视频走 `videos`，
/// 多图先上传未发布的照片再以 `attached_media` 发到 `feed`。
pub struct FacebookPublisher {
    client: Client,
    graph_base: String,
}

impl FacebookPublisher {
    pub fn new(client: Client, graph_base: impl Into<String>) -> Self {
        Self {
            client,
            graph_base: graph_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// 向 `/{page}/{edge}` 提交表单，返回新对象ID
    async fn post_form(
        &self,
        page_id: &str,
        edge: &str,
        token: &str,
        mut fields: Vec<(String, String)>,
    ) -> Result<String, PublishError> {
        fields.push(("access_token".to_string(), token.to_string()));

        let response = self
            .client
            .post(format!("{}/{}/{}", self.graph_base, page_id, edge))
            .form(&fields)
            .send()
            .await?;

        let object: GraphObject = read_json(Provider::Facebook, response).await?;
        Ok(object.id)
    }
}

fn field(key: &str, value: impl Into<String>) -> (String, String) {
    (key.to_string(), value.into())
}

#[async_trait]
impl Publisher for FacebookPublisher {
    fn provider(&self) -> Provider {
        Provider::Facebook
    }

    async fn publish(
        &self,
        credentials: &ProviderCredentials,
        post: &ScheduledPost,
    ) -> Result<(), PublishError> {
        let page_id = credentials
            .provider_page_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(PublishError::MissingCredential("Facebook page id"))?;
        let token = credentials.access_token.as_str();

        let id = match post.media_urls.as_slice() {
            [] => {
                self.post_form(page_id, "feed", token, vec![field("message", &post.content)])
                    .await?
            }
            [url] if post.is_video() => {
                self.post_form(
                    page_id,
                    "videos",
                    token,
                    vec![field("file_url", url), field("description", &post.content)],
                )
                .await?
            }
            [url] => {
                self.post_form(
                    page_id,
                    "photos",
                    token,
                    vec![field("url", url), field("caption", &post.content)],
                )
                .await?
            }
            urls if post.is_video() => {
                return Err(PublishError::UnsupportedMedia(format!(
                    "Facebook pages accept one video per post, got {}",
                    urls.len()
                )));
            }
            urls => {
                let mut fields = vec![field("message", &post.content)];
                for (index, url) in urls.iter().enumerate() {
                    let photo_id = self
                        .post_form(
                            page_id,
                            "photos",
                            token,
                            vec![field("url", url), field("published", "false")],
                        )
                        .await?;
                    debug!(post_id = post.id, photo_id = %photo_id, "Uploaded unpublished photo");
                    fields.push(field(
                        &format!("attached_media[{}]", index),
                        json!({ "media_fbid": photo_id }).to_string(),
                    ));
                }
                self.post_form(page_id, "feed", token, fields).await?
            }
        };

        info!(post_id = post.id, facebook_id = %id, "Published to Facebook");
        Ok(())
    }
}
