// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 中间件模块
///
/// - 认证中间件（auth_middleware）：校验定时调度方的 Bearer 密钥
pub mod auth_middleware;
