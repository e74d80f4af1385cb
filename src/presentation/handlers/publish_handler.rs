// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::presentation::errors::AppError;
use crate::workers::publish_worker::PublishRunner;
use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// 触发端点状态
#[derive(Clone)]
pub struct PublishState {
    /// 未配置加密密钥时为 `None`，此时触发请求返回配置错误
    pub runner: Option<Arc<dyn PublishRunner>>,
}

/// 执行一次定时发布
///
/// # 返回值
///
/// * `200 {"message": ...}` - 没有到期的帖子
/// * `200 {"status": "ok", "processed": n}` - 已处理 n 个帖子
/// * `Err(AppError)` - 配置缺失或到期帖子查询失败
pub async fn publish_scheduled(
    State(state): State<PublishState>,
    method: Method,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok((StatusCode::OK, "ok").into_response());
    }

    let Some(runner) = state.runner.as_ref() else {
        error!("Encryption key is not configured");
        return Err(AppError::Configuration);
    };

    let summary = runner.run_once().await.map_err(|e| {
        error!(error = %e, "Publish run failed");
        AppError::from(e)
    })?;

    if summary.processed == 0 {
        return Ok(Json(json!({ "message": "No scheduled posts to publish" })).into_response());
    }

    info!(processed = summary.processed, "Publish run completed");
    Ok(Json(json!({ "status": "ok", "processed": summary.processed })).into_response())
}
