// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含发布流程的核心业务逻辑，包括：
/// - 领域模型（models）：帖子、平台、凭证和通知
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：帖子生命周期和凭证读取
///
/// 领域层不依赖数据库或HTTP的具体实现。
pub mod models;
pub mod repositories;
pub mod services;
