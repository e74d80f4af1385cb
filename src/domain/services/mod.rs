// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// - 凭证服务（credential_service）：读取并解密团队的平台凭证
/// - 帖子服务（post_service）：读取到期帖子、写入终态、记录通知
pub mod credential_service;
pub mod post_service;
