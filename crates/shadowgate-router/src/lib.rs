// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic traffic routing between a prod and a candidate model.
//!
//! This crate provides:
//! - [`compute_bucket`]: content-addressed bucketing of request rows into `0..=99`
//! - [`decide_routing`]: the mode/percentage policy table
//! - [`TrafficRouter`]: both steps bound to a [`RoutingConfig`](shadowgate_config::RoutingConfig)
//!
//! Everything here is pure and lock-free; the caller performs inference and
//! schedules the shadow call when [`RoutingDecision::run_shadow`] is set.

pub mod bucket;
pub mod recording;
pub mod router;
pub mod traffic;

pub use bucket::{canonical_json, canonical_rows, compute_bucket, compute_bucket_for_value, Row};
pub use router::{clamp_canary_pct, decide_for_bucket, decide_routing, decide_routing_str};
pub use shadowgate_core::{Alias, Bucket, Mode, RoutingDecision, ShadowgateError};
pub use traffic::{RoutedRequest, TrafficRouter};
