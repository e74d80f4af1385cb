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

use crate::presentation::errors::AppError;
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// 定时触发认证状态
#[derive(Clone)]
pub struct CronAuthState {
    /// 调度方使用的共享密钥，未配置时所有触发请求都返回配置错误
    pub cron_secret: Option<Arc<str>>,
}

impl CronAuthState {
    pub fn new(cron_secret: Option<String>) -> Self {
        Self {
            cron_secret: cron_secret
                .filter(|secret| !secret.is_empty())
                .map(Arc::from),
        }
    }
}

/// 认证中间件
///
/// 校验 `Authorization: Bearer <cron_secret>`，`OPTIONS` 请求直接放行
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AppError)` - 缺少密钥配置（500）或令牌不匹配（401）
pub async fn cron_auth_middleware(
    State(state): State<CronAuthState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let Some(secret) = state.cron_secret.as_deref() else {
        error!("Cron secret is not configured");
        return Err(AppError::Configuration);
    };

    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| token == secret);

    if !authorized {
        warn!(path = %req.uri().path(), "Rejected unauthorized trigger request");
        return Err(AppError::Unauthorized);
    }

    debug!("Trigger request authorized");
    Ok(next.run(req).await)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
