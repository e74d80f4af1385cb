// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! LinkedIn UGC 发布
//!
//! 有媒体时先逐个注册上传并把原始字节流式转存到 LinkedIn，
//! 再用得到的 asset URN 创建帖子。

use super::traits::{ensure_success, read_json, PublishError, Publisher};
use crate::domain::models::credentials::ProviderCredentials;
use crate::domain::models::post::ScheduledPost;
use crate::domain::models::provider::Provider;
use crate::utils::text::first_line;
use async_trait::async_trait;
use reqwest::{header, Body, Client};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

const RESTLI_HEADER: &str = "X-Restli-Protocol-Version";
const RESTLI_VERSION: &str = "2.0.0";
const UPLOAD_MECHANISM: &str = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest";
const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 256;
/// 媒体下载和上传的默认超时
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(600);

#[derive(Debug, Deserialize)]
struct RegisterUploadResponse {
    value: RegisterUploadValue,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadValue {
    asset: String,
    upload_mechanism: HashMap<String, UploadRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadRequest {
    upload_url: String,
}

/// LinkedIn 发布器
pub struct LinkedInPublisher {
    client: Client,
    api_base: String,
    upload_timeout: Duration,
}

impl LinkedInPublisher {
    /// 创建新的 LinkedIn 发布器
    ///
    /// # 参数
    ///
    /// * `client` - 共享的HTTP客户端
    /// * `api_base` - API 根地址，例如 `https://api.linkedin.com/v2`
    pub fn new(client: Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }

    /// 设置媒体转存（下载源文件和上传到 LinkedIn）的超时，覆盖客户端的请求超时
    pub fn with_upload_timeout(mut self, timeout: Duration) -> Self {
        self.upload_timeout = timeout;
        self
    }

    /// 注册上传并转存一个媒体文件，返回 asset URN
    async fn upload_media(
        &self,
        token: &str,
        author: &str,
        media_url: &str,
        is_video: bool,
    ) -> Result<String, PublishError> {
        let recipe = if is_video {
            "urn:li:digitalmediaRecipe:feedshare-video"
        } else {
            "urn:li:digitalmediaRecipe:feedshare-image"
        };

        let response = self
            .client
            .post(format!("{}/assets?action=registerUpload", self.api_base))
            .bearer_auth(token)
            .header(RESTLI_HEADER, RESTLI_VERSION)
            .json(&json!({
                "registerUploadRequest": {
                    "recipes": [recipe],
                    "owner": author,
                    "serviceRelationships": [{
                        "relationshipType": "OWNER",
                        "identifier": "urn:li:userGeneratedContent"
                    }]
                }
            }))
            .send()
            .await?;

        let registered: RegisterUploadResponse = read_json(Provider::LinkedIn, response).await?;
        let upload_url = registered
            .value
            .upload_mechanism
            .get(UPLOAD_MECHANISM)
            .map(|m| m.upload_url.clone())
            .ok_or_else(|| PublishError::InvalidResponse("missing upload URL".to_string()))?;

        let source = self
            .client
            .get(media_url)
            .timeout(self.upload_timeout)
            .send()
            .await?
            .error_for_status()?;
        let content_type = source.headers().get(header::CONTENT_TYPE).cloned();

        let mut upload = self
            .client
            .put(&upload_url)
            .bearer_auth(token)
            .timeout(self.upload_timeout)
            .body(Body::wrap_stream(source.bytes_stream()));
        if let Some(content_type) = content_type {
            upload = upload.header(header::CONTENT_TYPE, content_type);
        }
        ensure_success(Provider::LinkedIn, upload.send().await?).await?;

        debug!(asset = %registered.value.asset, "Uploaded media to LinkedIn");
        Ok(registered.value.asset)
    }
}

/// 构造 `ugcPosts` 请求体
fn share_body(author: &str, post: &ScheduledPost, assets: &[String]) -> Value {
    let category = match (assets.is_empty(), post.is_video()) {
        (true, _) => "NONE",
        (false, true) => "VIDEO",
        (false, false) => "IMAGE",
    };

    let mut share = json!({
        "shareCommentary": { "text": post.content },
        "shareMediaCategory": category,
    });

    if !assets.is_empty() {
        let media: Vec<Value> = assets
            .iter()
            .map(|asset| {
                let mut entry = json!({ "status": "READY", "media": asset });
                // Title and description only render for single-asset shares
                if assets.len() == 1 {
                    entry["title"] = json!({ "text": first_line(&post.content, TITLE_MAX_CHARS) });
                    let description: String =
                        post.content.chars().take(DESCRIPTION_MAX_CHARS).collect();
                    entry["description"] = json!({ "text": description });
                }
                entry
            })
            .collect();
        share["media"] = Value::Array(media);
    }

    json!({
        "author": author,
        "lifecycleState": "PUBLISHED",
        "specificContent": { "com.linkedin.ugc.ShareContent": share },
        "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
    })
}

#[async_trait]
impl Publisher for LinkedInPublisher {
    fn provider(&self) -> Provider {
        Provider::LinkedIn
    }

    async fn publish(
        &self,
        credentials: &ProviderCredentials,
        post: &ScheduledPost,
    ) -> Result<(), PublishError> {
        let person = credentials
            .provider_user_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(PublishError::MissingCredential("LinkedIn user id"))?;
        let author = format!("urn:li:person:{}", person);
        let token = credentials.access_token.as_str();

        let mut assets = Vec::with_capacity(post.media_urls.len());
        for media_url in &post.media_urls {
            assets.push(
                self.upload_media(token, &author, media_url, post.is_video())
                    .await?,
            );
        }

        let response = self
            .client
            .post(format!("{}/ugcPosts", self.api_base))
            .bearer_auth(token)
            .header(RESTLI_HEADER, RESTLI_VERSION)
            .json(&share_body(&author, post, &assets))
            .send()
            .await?;
        ensure_success(Provider::LinkedIn, response).await?;

        info!(post_id = post.id, assets = assets.len(), "Published to LinkedIn");
        Ok(())
    }
}
