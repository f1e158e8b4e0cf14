// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shadowgate bucket`, `shadowgate route` and `shadowgate config`.
//!
//! Offline counterparts of what the serving layer does per request: read the
//! request body, bucket its rows, and apply the configured routing policy.

use std::io::Read;

use serde::Deserialize;
use shadowgate_config::ShadowgateConfig;
use shadowgate_core::{Mode, ShadowgateError};
use shadowgate_router::{compute_bucket, Row, TrafficRouter};
use tracing::{debug, info};

/// Request body accepted by the prediction endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// Feature records submitted together.
    pub rows: Vec<Row>,
}

/// Parse a request body.
pub fn parse_payload(body: &str) -> Result<PredictRequest, ShadowgateError> {
    serde_json::from_str(body).map_err(|e| ShadowgateError::Payload {
        message: format!("request body is not a valid {{\"rows\": [...]}} document: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Read a request body from a file, or stdin for `-`.
pub fn read_payload(source: &str) -> Result<PredictRequest, ShadowgateError> {
    let body = if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| ShadowgateError::Payload {
                message: format!("failed to read request body from stdin: {e}"),
                source: Some(Box::new(e)),
            })?;
        buf
    } else {
        std::fs::read_to_string(source).map_err(|e| ShadowgateError::Payload {
            message: format!("failed to read request body from {source}: {e}"),
            source: Some(Box::new(e)),
        })?
    };
    debug!(source, bytes = body.len(), "read request body");
    parse_payload(&body)
}

/// Runs `shadowgate bucket`.
pub fn run_bucket(payload: &str) -> Result<(), ShadowgateError> {
    let request = read_payload(payload)?;
    println!("{}", compute_bucket(&request.rows));
    Ok(())
}

/// Build the router for `shadowgate route`, applying CLI overrides.
pub fn router_for(
    config: &ShadowgateConfig,
    mode: Option<Mode>,
    canary_pct: Option<i64>,
) -> TrafficRouter {
    let mut router = TrafficRouter::new(config.routing);
    if let Some(mode) = mode {
        router = router.with_mode(mode);
    }
    if let Some(pct) = canary_pct {
        router = router.with_canary_pct(pct);
    }
    router
}

/// Runs `shadowgate route`.
pub fn run_route(
    config: &ShadowgateConfig,
    payload: &str,
    mode: Option<Mode>,
    canary_pct: Option<i64>,
) -> Result<(), ShadowgateError> {
    let request = read_payload(payload)?;
    let router = router_for(config, mode, canary_pct);
    let routed = router.route(&request.rows);

    info!(
        mode = router.config().mode.as_str(),
        bucket = routed.bucket.get(),
        chosen = %routed.decision.chosen,
        shadow = ?routed.decision.shadow_alias(),
        "routed request"
    );

    let rendered = serde_json::to_string_pretty(&routed)
        .map_err(|e| ShadowgateError::Internal(format!("failed to render decision: {e}")))?;
    println!("{rendered}");
    Ok(())
}

/// Runs `shadowgate config`.
pub fn run_config(config: &ShadowgateConfig) -> Result<(), ShadowgateError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ShadowgateError::Config(format!("failed to render config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use shadowgate_core::Alias;

    use super::*;

    #[test]
    fn parse_payload_reads_rows() {
        let request = parse_payload(r#"{"rows": [{"b": 2.5, "a": 1}, {}]}"#).unwrap();
        assert_eq!(request.rows.len(), 2);
        assert_eq!(compute_bucket(&request.rows[..1]).get(), 28);
    }

    #[test]
    fn parse_payload_allows_empty_rows() {
        let request = parse_payload(r#"{"rows": []}"#).unwrap();
        assert!(request.rows.is_empty());
        assert_eq!(compute_bucket(&request.rows).get(), 73);
    }

    #[test]
    fn parse_payload_rejects_non_object_rows() {
        let err = parse_payload(r#"{"rows": [1, 2]}"#).unwrap_err();
        assert!(matches!(err, ShadowgateError::Payload { .. }));
    }

    #[test]
    fn parse_payload_rejects_missing_rows() {
        let err = parse_payload(r#"{"data": []}"#).unwrap_err();
        assert!(err.to_string().contains("rows"));
    }

    #[test]
    fn read_payload_reports_missing_file() {
        let err = read_payload("/nonexistent/shadowgate/body.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/shadowgate/body.json"));
    }

    #[test]
    fn router_overrides_replace_config() {
        let config = ShadowgateConfig::default();
        let request = parse_payload(r#"{"rows": [{"b": 2.5, "a": 1}]}"#).unwrap();

        let pinned = router_for(&config, None, None).route(&request.rows);
        assert_eq!(pinned.decision.chosen, Alias::Prod);
        assert!(!pinned.decision.run_shadow);

        let canary = router_for(&config, Some(Mode::Canary), Some(500)).route(&request.rows);
        assert_eq!(canary.decision.chosen, Alias::Candidate);
        assert!(canary.decision.run_shadow);
    }
}
