// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config-bound entry point that buckets a request and routes it in one call.

use serde::Serialize;
use shadowgate_config::model::RoutingConfig;
use shadowgate_core::{Bucket, Mode, RoutingDecision};
use tracing::trace;

use crate::bucket::{compute_bucket, content_digest_hex, Row};
use crate::recording;
use crate::router::decide_for_bucket;

/// Bucket and decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoutedRequest {
    /// Content-derived bucket.
    pub bucket: Bucket,
    /// Decision reached for that bucket.
    #[serde(flatten)]
    pub decision: RoutingDecision,
}

/// Routes requests under a fixed mode and canary percentage.
///
/// Holds no mutable state; share it freely across request handlers.
#[derive(Debug, Clone, Copy)]
pub struct TrafficRouter {
    config: RoutingConfig,
}

impl TrafficRouter {
    /// Create a router for the given routing configuration.
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Copy of this router with a different mode (per-request override).
    pub fn with_mode(self, mode: Mode) -> Self {
        Self {
            config: RoutingConfig { mode, ..self.config },
        }
    }

    /// Copy of this router with a different canary percentage.
    pub fn with_canary_pct(self, canary_pct: i64) -> Self {
        Self {
            config: RoutingConfig {
                canary_pct,
                ..self.config
            },
        }
    }

    /// The routing configuration in effect.
    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Bucket the rows and decide their route.
    pub fn route(&self, rows: &[Row]) -> RoutedRequest {
        let bucket = compute_bucket(rows);
        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                digest = %content_digest_hex(rows),
                rows = rows.len(),
                bucket = bucket.get(),
                "bucketed request"
            );
        }

        let decision = decide_for_bucket(self.config.mode, self.config.canary_pct, bucket);
        recording::record_decision(self.config.mode, bucket, &decision);

        RoutedRequest { bucket, decision }
    }
}
