// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./shadowgate.toml` > `~/.config/shadowgate/shadowgate.toml`
//! > `/etc/shadowgate/shadowgate.toml` with environment variable overrides via
//! `SHADOWGATE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ShadowgateConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/shadowgate/shadowgate.toml";

/// Config file in the working directory.
pub const LOCAL_CONFIG_PATH: &str = "shadowgate.toml";

/// User config file under the XDG config directory, if one can be resolved.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shadowgate/shadowgate.toml"))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/shadowgate/shadowgate.toml` (system-wide)
/// 3. `~/.config/shadowgate/shadowgate.toml` (user XDG config)
/// 4. `./shadowgate.toml` (local directory)
/// 5. `SHADOWGATE_*` environment variables
pub fn load_config() -> Result<ShadowgateConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ShadowgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShadowgateConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ShadowgateConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ShadowgateConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ShadowgateConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_PATH))
        .merge(env_provider())
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")`: `SHADOWGATE_ROUTING_CANARY_PCT`
/// must map to `routing.canary_pct`, not `routing.canary.pct`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("SHADOWGATE_").map(|key| map_env_key(key.as_str()).into())
}

/// Map a prefix-stripped env var name (in whatever case it was set) to its
/// dotted config key.
pub(crate) fn map_env_key(key: &str) -> String {
    key.to_ascii_lowercase()
        .replacen("service_", "service.", 1)
        .replacen("routing_", "routing.", 1)
}
