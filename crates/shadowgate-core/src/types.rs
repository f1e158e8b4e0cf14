// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value types shared by the bucketer, the router and their callers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::ShadowgateError;

/// A backend model variant that can answer a prediction request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Alias {
    /// The production model.
    Prod,
    /// The model being evaluated for rollout.
    Candidate,
}

impl Alias {
    /// The alias that is not `self`.
    pub fn other(self) -> Alias {
        match self {
            Alias::Prod => Alias::Candidate,
            Alias::Candidate => Alias::Prod,
        }
    }
}

/// Routing policy in effect for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Always answer from prod.
    Prod,
    /// Always answer from candidate.
    Candidate,
    /// Split by bucket against the canary percentage; the other alias shadows.
    Canary,
    /// Answer from prod, shadow candidate.
    Shadow,
}

impl Mode {
    /// Every recognized mode, in declaration order.
    pub const ALL: [Mode; 4] = [Mode::Prod, Mode::Candidate, Mode::Canary, Mode::Shadow];

    /// Wire name of the mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Prod => "prod",
            Mode::Candidate => "candidate",
            Mode::Canary => "canary",
            Mode::Shadow => "shadow",
        }
    }
}

impl FromStr for Mode {
    type Err = ShadowgateError;

    /// Exact, case-sensitive match against the four wire names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ShadowgateError::InvalidArgument(format!("unknown mode: {s}")))
    }
}

/// A stable, content-derived traffic bucket in `0..=99`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Bucket(u8);

impl Bucket {
    /// Number of distinct buckets.
    pub const COUNT: u8 = 100;

    /// Validate a raw bucket value.
    pub fn new(value: i64) -> Result<Self, ShadowgateError> {
        if (0..i64::from(Self::COUNT)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ShadowgateError::InvalidArgument(format!(
                "bucket must be in [0, 99], got {value}"
            )))
        }
    }

    /// Build a bucket from a hash residue, reducing it modulo [`Bucket::COUNT`].
    pub fn from_residue(residue: u8) -> Self {
        Self(residue % Self::COUNT)
    }

    /// The raw bucket value.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Bucket {
    type Error = ShadowgateError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Bucket::new(value)
    }
}

impl From<Bucket> for i64 {
    fn from(bucket: Bucket) -> Self {
        i64::from(bucket.0)
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for Bucket {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Bucket::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Which alias answers a request and whether the other one shadows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Alias whose prediction is returned to the caller.
    pub chosen: Alias,
    /// Whether the other alias is also invoked, for comparison only.
    pub run_shadow: bool,
}

impl RoutingDecision {
    /// The alias to invoke as a shadow, if any.
    pub fn shadow_alias(&self) -> Option<Alias> {
        self.run_shadow.then(|| self.chosen.other())
    }
}
