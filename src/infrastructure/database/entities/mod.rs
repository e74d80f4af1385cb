// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据库实体模块
///
/// 使用SeaORM定义发布流程读写的三张表
pub mod notification;
pub mod scheduled_post;
pub mod social_credential;
