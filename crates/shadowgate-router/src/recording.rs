// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so whichever recorder the host service installs
//! (Prometheus, statsd, etc.) collects these metrics. Without a recorder the
//! calls are no-ops.

use metrics::{describe_counter, describe_histogram};
use shadowgate_core::{Alias, Bucket, Mode, RoutingDecision};

/// Register all shadowgate metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(
        "shadowgate_routing_decisions_total",
        "Routing decisions by mode and chosen alias"
    );
    describe_counter!(
        "shadowgate_shadow_invocations_total",
        "Shadow invocations requested, by shadowed alias"
    );
    describe_histogram!(
        "shadowgate_canary_bucket",
        "Bucket values observed under canary mode"
    );
}

/// Record one routing decision.
pub fn record_decision(mode: Mode, bucket: Bucket, decision: &RoutingDecision) {
    metrics::counter!(
        "shadowgate_routing_decisions_total",
        "mode" => mode.as_str(),
        "chosen" => alias_label(decision.chosen)
    )
    .increment(1);

    if let Some(shadow) = decision.shadow_alias() {
        metrics::counter!("shadowgate_shadow_invocations_total", "alias" => alias_label(shadow))
            .increment(1);
    }

    if mode == Mode::Canary {
        metrics::histogram!("shadowgate_canary_bucket").record(f64::from(bucket.get()));
    }
}

fn alias_label(alias: Alias) -> &'static str {
    match alias {
        Alias::Prod => "prod",
        Alias::Candidate => "candidate",
    }
}
