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

use crate::domain::models::post::{PostStatus, ScheduledPost};
use crate::domain::models::provider::{Provider, UnsupportedProvider};
use crate::domain::repositories::credential_repository::CredentialRepository;
use crate::domain::repositories::post_repository::PostRepository;
use crate::domain::services::credential_service::{CredentialError, CredentialService};
use crate::domain::services::post_service::{PostService, SYSTEM_LABEL};
use crate::publishers::{PublishError, PublisherRegistry};
use crate::utils::errors::WorkerError;
use async_trait::async_trait;
use metrics::{counter, histogram};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use uuid::Uuid;

/// 单次运行的统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// 本次认领的帖子数
    pub processed: usize,
    pub published: usize,
    pub partial_success: usize,
    pub failed: usize,
    /// 任务返回错误或 panic 的帖子数
    pub errored: usize,
}

impl RunSummary {
    fn record(&mut self, status: PostStatus) {
        match status {
            PostStatus::Published => self.published += 1,
            PostStatus::PartialSuccess => self.partial_success += 1,
            PostStatus::Failed => self.failed += 1,
            PostStatus::Scheduled => {}
        }
    }
}

/// 发布运行器特质
///
/// HTTP 层只依赖这个特质，不感知工作器的仓库类型参数
#[async_trait]
pub trait PublishRunner: Send + Sync {
    /// 执行一次完整的发布批次
    async fn run_once(&self) -> Result<RunSummary, WorkerError>;
}

/// 单个平台尝试的失败原因
#[derive(Error, Debug)]
enum AttemptError {
    #[error(transparent)]
    Provider(#[from] UnsupportedProvider),
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// 定时发布工作器
///
/// 每次运行认领所有到期帖子，每个帖子一个独立任务；
/// 帖子内的平台按存储顺序依次发布。
pub struct PublishWorker<P: PostRepository, C: CredentialRepository> {
    posts: Arc<PostService<P>>,
    credentials: Arc<CredentialService<C>>,
    publishers: PublisherRegistry,
}

impl<P: PostRepository, C: CredentialRepository> Clone for PublishWorker<P, C> {
    fn clone(&self) -> Self {
        Self {
            posts: self.posts.clone(),
            credentials: self.credentials.clone(),
            publishers: self.publishers.clone(),
        }
    }
}

impl<P, C> PublishWorker<P, C>
where
    P: PostRepository + 'static,
    C: CredentialRepository + 'static,
{
    /// 创建新的发布工作器实例
    ///
    /// # 参数
    ///
    /// * `posts` - 帖子生命周期服务
    /// * `credentials` - 凭证服务
    /// * `publishers` - 平台发布器注册表
    pub fn new(
        posts: Arc<PostService<P>>,
        credentials: Arc<CredentialService<C>>,
        publishers: PublisherRegistry,
    ) -> Self {
        Self {
            posts,
            credentials,
            publishers,
        }
    }

    /// 处理单个帖子并写入终态
    ///
    /// 平台级错误在这里被捕获并计为失败，只有仓库写入终态失败才会返回错误
    ///
    /// # 返回值
    ///
    /// * `Ok(PostStatus)` - 写入的终态
    /// * `Err(WorkerError)` - 终态写入失败
    pub async fn process_post(&self, post: ScheduledPost) -> Result<PostStatus, WorkerError> {
        let total = post.providers.len();

        let team_id = match post.validate() {
            Ok(team_id) => team_id,
            Err(e) => {
                warn!(post_id = post.id, error = %e, "Rejecting post before publishing");
                let status = self.posts.finalize_status(post.id, 0, total).await?;
                self.posts
                    .record_notification(&post, SYSTEM_LABEL, false, Some(&e.to_string()))
                    .await;
                return Ok(status);
            }
        };

        let mut successes = 0;
        for provider in &post.providers {
            match self.publish_to(team_id, provider, &post).await {
                Ok(published) => {
                    successes += 1;
                    counter!("publish_attempts_total", "provider" => published.as_str(), "outcome" => "success")
                        .increment(1);
                    self.posts
                        .record_notification(&post, provider, true, None)
                        .await;
                }
                Err(e) => {
                    let label = provider
                        .parse::<Provider>()
                        .map(|p| p.as_str())
                        .unwrap_or("unknown");
                    counter!("publish_attempts_total", "provider" => label, "outcome" => "failure")
                        .increment(1);
                    warn!(
                        post_id = post.id,
                        team_id = %team_id,
                        provider = %provider,
                        error = %e,
                        "Provider publish failed"
                    );
                    self.posts
                        .record_notification(&post, provider, false, Some(&e.to_string()))
                        .await;
                }
            }
        }

        Ok(self.posts.finalize_status(post.id, successes, total).await?)
    }

    async fn publish_to(
        &self,
        team_id: Uuid,
        provider: &str,
        post: &ScheduledPost,
    ) -> Result<Provider, AttemptError> {
        let provider: Provider = provider.parse()?;
        let credentials = self.credentials.get_credentials(team_id, provider).await?;
        self.publishers
            .get(provider)
            .publish(&credentials, post)
            .await?;
        Ok(provider)
    }
}

#[async_trait]
impl<P, C> PublishRunner for PublishWorker<P, C>
where
    P: PostRepository + 'static,
    C: CredentialRepository + 'static,
{
    async fn run_once(&self) -> Result<RunSummary, WorkerError> {
        let start = Instant::now();
        let posts = self.posts.due_posts().await?;

        if posts.is_empty() {
            info!("No scheduled posts due");
            return Ok(RunSummary::default());
        }

        info!("Processing {} scheduled posts", posts.len());

        let handles: Vec<(i64, JoinHandle<Result<PostStatus, WorkerError>>)> = posts
            .into_iter()
            .map(|post| {
                let worker = self.clone();
                (post.id, tokio::spawn(async move { worker.process_post(post).await }))
            })
            .collect();

        let mut summary = RunSummary {
            processed: handles.len(),
            ..Default::default()
        };

        for (post_id, handle) in handles {
            match handle.await {
                Ok(Ok(status)) => summary.record(status),
                Ok(Err(e)) => {
                    error!(post_id, error = %e, "Failed to process post");
                    summary.errored += 1;
                }
                Err(e) => {
                    error!(post_id, error = %e, "Post task aborted");
                    summary.errored += 1;
                }
            }
        }

        histogram!("publish_run_duration_seconds").record(start.elapsed().as_secs_f64());
        info!(
            processed = summary.processed,
            published = summary.published,
            partial_success = summary.partial_success,
            failed = summary.failed,
            errored = summary.errored,
            "Publish run finished"
        );

        Ok(summary)
    }
}

#[cfg(test)]
#[path = "publish_worker_test.rs"]
mod tests;
