// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 平台发布器模块
///
/// - 特质（traits）：`Publisher` 和 `PublishError`
/// - LinkedIn、Facebook、Instagram 三个平台的实现
/// - 注册表（registry）：按平台取发布器
pub mod facebook;
pub mod instagram;
pub mod linkedin;
pub mod registry;
pub mod traits;

pub use registry::PublisherRegistry;
pub use traits::{PublishError, Publisher};
