// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod credentials;
pub mod notification;
pub mod post;
pub mod provider;
