// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节：
/// - 加解密（crypto）：凭证令牌的新旧两种密文格式
/// - 数据库（database）：数据库连接和实体映射
/// - 指标（metrics）：Prometheus 指标导出
/// - 仓库实现（repositories）：领域仓库接口的具体实现
///
/// 基础设施层依赖领域层的抽象接口，领域层不感知这些实现。
pub mod crypto;
pub mod database;
pub mod metrics;
pub mod repositories;
