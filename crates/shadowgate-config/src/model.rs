// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for shadowgate.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};
use shadowgate_core::Mode;

/// Lowest canary percentage the router acts on.
pub const CANARY_PCT_MIN: i64 = 0;

/// Highest canary percentage the router acts on.
pub const CANARY_PCT_MAX: i64 = 100;

/// Top-level shadowgate configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShadowgateConfig {
    /// Service identity and logging settings.
    #[serde(default)]
    pub service: ServiceConfig,

    /// Traffic routing settings.
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Service identity and logging configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Name used in log output.
    #[serde(default = "default_service_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_service_name() -> String {
    "shadowgate".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Traffic routing configuration.
///
/// `mode` selects the routing policy. `canary_pct` only matters in canary
/// mode; values outside `0..=100` are accepted and clamped by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Routing policy: prod, candidate, canary or shadow.
    #[serde(default = "default_mode")]
    pub mode: Mode,

    /// Share of buckets (out of 100) routed to the candidate in canary mode.
    #[serde(default = "default_canary_pct")]
    pub canary_pct: i64,
}

impl RoutingConfig {
    /// The canary percentage the router will actually apply.
    pub fn effective_canary_pct(&self) -> i64 {
        self.canary_pct.clamp(CANARY_PCT_MIN, CANARY_PCT_MAX)
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            canary_pct: default_canary_pct(),
        }
    }
}

fn default_mode() -> Mode {
    Mode::Prod
}

fn default_canary_pct() -> i64 {
    10
}
