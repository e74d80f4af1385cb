// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::facebook::FacebookPublisher;
use super::instagram::InstagramPublisher;
use super::linkedin::LinkedInPublisher;
use super::traits::Publisher;
use crate::config::settings::Settings;
use crate::domain::models::provider::Provider;
use crate::utils::poll_policy::PollPolicy;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// 平台发布器注册表
///
/// 每个平台恰好一个发布器，新增平台时 `get` 的匹配必须同步补全
#[derive(Clone)]
pub struct PublisherRegistry {
    linkedin: Arc<dyn Publisher>,
    facebook: Arc<dyn Publisher>,
    instagram: Arc<dyn Publisher>,
}

impl PublisherRegistry {
    /// 根据配置创建注册表，所有发布器共享一个HTTP客户端
    ///
    /// # 返回值
    ///
    /// * `Ok(PublisherRegistry)` - 注册表
    /// * `Err(reqwest::Error)` - HTTP客户端构建失败
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(settings.http.user_agent.as_str())
            .timeout(settings.http.timeout())
            .pool_idle_timeout(Duration::from_secs(90))
            .build()?;

        let poll = PollPolicy::new(
            settings.instagram.poll_max_attempts,
            Duration::from_secs(settings.instagram.poll_interval_secs),
        );

        Ok(Self::from_publishers(
            Arc::new(
                LinkedInPublisher::new(client.clone(), settings.providers.linkedin_api_base.as_str())
                    .with_upload_timeout(settings.http.upload_timeout()),
            ),
            Arc::new(FacebookPublisher::new(
                client.clone(),
                settings.providers.graph_api_base.as_str(),
            )),
            Arc::new(InstagramPublisher::new(
                client,
                settings.providers.graph_api_base.as_str(),
                poll,
            )),
        ))
    }

    /// 使用指定的发布器创建注册表
    pub fn from_publishers(
        linkedin: Arc<dyn Publisher>,
        facebook: Arc<dyn Publisher>,
        instagram: Arc<dyn Publisher>,
    ) -> Self {
        Self {
            linkedin,
            facebook,
            instagram,
        }
    }

    /// 获取平台对应的发布器
    pub fn get(&self, provider: Provider) -> &dyn Publisher {
        match provider {
            Provider::LinkedIn => self.linkedin.as_ref(),
            Provider::Facebook => self.facebook.as_ref(),
            Provider::Instagram => self.instagram.as_ref(),
        }
    }
}
