// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含帖子、平台凭证和通知的实体、服务和仓库接口
pub mod domain;

/// 基础设施模块
///
/// 提供数据库、加解密和指标等外部集成
pub mod infrastructure;

/// 表示层模块
///
/// 处理触发请求，包括路由、处理器和中间件
pub mod presentation;

/// 发布器模块
///
/// 实现各社交平台的发布协议
pub mod publishers;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现定时发布批次
pub mod workers;
