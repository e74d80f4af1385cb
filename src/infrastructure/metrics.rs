// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MetricsSettings;
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

/// 初始化指标导出器并注册发布流程的指标
pub fn init_metrics(settings: &MetricsSettings) {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return;
    }

    let addr: SocketAddr = match settings.address.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid metrics address {}: {}", settings.address, e);
            return;
        }
    };

    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!(
            "Failed to install Prometheus recorder: {}. This might happen if the port is already in use.",
            e
        );
        return;
    }

    describe_counter!(
        "publish_attempts_total",
        "Provider publish attempts by provider and outcome"
    );
    describe_counter!(
        "posts_finalized_total",
        "Posts written with a terminal status"
    );
    describe_counter!(
        "notification_write_failures_total",
        "Notification inserts that failed and were only logged"
    );
    describe_histogram!(
        "publish_run_duration_seconds",
        "Duration of one publish-scheduled run in seconds"
    );

    info!("Metrics exporter listening on {}", addr);
}
