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

use publishrs::config::settings::Settings;
use publishrs::domain::services::credential_service::CredentialService;
use publishrs::domain::services::post_service::PostService;
use publishrs::infrastructure::crypto::TokenCipher;
use publishrs::infrastructure::database::connection;
use publishrs::infrastructure::repositories::credential_repo_impl::CredentialRepositoryImpl;
use publishrs::infrastructure::repositories::post_repo_impl::PostRepositoryImpl;
use publishrs::presentation::handlers::publish_handler::PublishState;
use publishrs::presentation::middleware::auth_middleware::CronAuthState;
use publishrs::presentation::routes;
use publishrs::publishers::PublisherRegistry;
use publishrs::utils::telemetry;
use publishrs::workers::{PublishRunner, PublishWorker};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting publishrs...");

    // 2. Load configuration
    let settings = Settings::new()?;
    info!("Configuration loaded");

    publishrs::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    // 4. Build the publish worker; without an encryption key the trigger reports a configuration error
    let runner: Option<Arc<dyn PublishRunner>> = match settings
        .worker
        .encryption_key
        .as_deref()
        .filter(|key| !key.is_empty())
    {
        Some(key) => {
            let posts = PostService::new(
                Arc::new(PostRepositoryImpl::new(db.clone())),
                settings.notifications.message_max_len,
            );
            let credentials = CredentialService::new(
                Arc::new(CredentialRepositoryImpl::new(db.clone())),
                TokenCipher::new(key),
            );
            let publishers = PublisherRegistry::from_settings(&settings)?;

            let worker: Arc<dyn PublishRunner> = Arc::new(PublishWorker::new(
                Arc::new(posts),
                Arc::new(credentials),
                publishers,
            ));
            Some(worker)
        }
        None => {
            warn!("Encryption key is not configured; publish requests will fail");
            None
        }
    };

    if settings.worker.cron_secret.is_none() {
        warn!("Cron secret is not configured; publish requests will fail");
    }

    // 5. Start HTTP server
    let app = routes::routes(
        CronAuthState::new(settings.worker.cron_secret.clone()),
        PublishState { runner },
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
