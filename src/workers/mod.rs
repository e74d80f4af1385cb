// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 定时发布工作器：认领到期帖子、按平台发布并写入终态
pub mod publish_worker;

pub use publish_worker::{PublishRunner, PublishWorker, RunSummary};
