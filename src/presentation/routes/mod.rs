// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::handlers::publish_handler::{publish_scheduled, PublishState};
use crate::presentation::middleware::auth_middleware::{cron_auth_middleware, CronAuthState};
use axum::{
    http::{header, HeaderName},
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 构建应用路由
///
/// # 参数
///
/// * `auth` - 触发端点的认证状态
/// * `state` - 触发端点状态
pub fn routes(auth: CronAuthState, state: PublishState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let trigger_routes = Router::new()
        .route("/v1/publish-scheduled", any(publish_scheduled))
        .route_layer(middleware::from_fn_with_state(auth, cron_auth_middleware))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(trigger_routes)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("apikey"),
            HeaderName::from_static("x-client-info"),
        ])
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
