// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Routing policy: which alias answers, and whether the other one shadows.
//!
//! | mode      | chosen                                        | run_shadow |
//! |-----------|-----------------------------------------------|------------|
//! | prod      | prod                                          | false      |
//! | candidate | candidate                                     | false      |
//! | shadow    | prod                                          | true       |
//! | canary    | candidate if bucket < canary_pct, else prod   | true       |

use shadowgate_config::model::{CANARY_PCT_MAX, CANARY_PCT_MIN};
use shadowgate_core::{Alias, Bucket, Mode, RoutingDecision, ShadowgateError};
use tracing::debug;

/// Clamp a loosely configured canary percentage into `0..=100`.
pub fn clamp_canary_pct(canary_pct: i64) -> i64 {
    canary_pct.clamp(CANARY_PCT_MIN, CANARY_PCT_MAX)
}

/// Decide how a request is routed.
///
/// `bucket` must lie in `0..=99`; anything else is an
/// [`ShadowgateError::InvalidArgument`], checked before the mode is looked
/// at. `canary_pct` is clamped rather than rejected.
pub fn decide_routing(
    mode: Mode,
    canary_pct: i64,
    bucket: i64,
) -> Result<RoutingDecision, ShadowgateError> {
    let bucket = Bucket::new(bucket)?;
    Ok(decide_for_bucket(mode, canary_pct, bucket))
}

/// Like [`decide_routing`], for callers holding an unvalidated mode string.
///
/// An unrecognized mode fails with [`ShadowgateError::InvalidArgument`]
/// naming it. The bucket is validated first.
pub fn decide_routing_str(
    mode: &str,
    canary_pct: i64,
    bucket: i64,
) -> Result<RoutingDecision, ShadowgateError> {
    let bucket = Bucket::new(bucket)?;
    let mode: Mode = mode.parse()?;
    Ok(decide_for_bucket(mode, canary_pct, bucket))
}

/// Infallible form of the policy for an already validated bucket.
pub fn decide_for_bucket(mode: Mode, canary_pct: i64, bucket: Bucket) -> RoutingDecision {
    let effective_pct = clamp_canary_pct(canary_pct);
    if effective_pct != canary_pct {
        debug!(canary_pct, effective_pct, "clamped canary percentage");
    }

    let decision = match mode {
        Mode::Prod => RoutingDecision {
            chosen: Alias::Prod,
            run_shadow: false,
        },
        Mode::Candidate => RoutingDecision {
            chosen: Alias::Candidate,
            run_shadow: false,
        },
        Mode::Shadow => RoutingDecision {
            chosen: Alias::Prod,
            run_shadow: true,
        },
        Mode::Canary => {
            let chosen = if i64::from(bucket.get()) < effective_pct {
                Alias::Candidate
            } else {
                Alias::Prod
            };
            RoutingDecision {
                chosen,
                run_shadow: true,
            }
        }
    };

    debug!(
        mode = mode.as_str(),
        bucket = bucket.get(),
        canary_pct = effective_pct,
        chosen = %decision.chosen,
        run_shadow = decision.run_shadow,
        "routing decision"
    );

    decision
}
