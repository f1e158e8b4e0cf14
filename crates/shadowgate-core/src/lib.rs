// SPDX-FileCopyrightText: 2026 Shadowgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for shadowgate.
//!
//! This crate provides the value types (`Alias`, `Mode`, `Bucket`,
//! `RoutingDecision`) and the error type shared by the routing core, the
//! configuration layer and the CLI.

pub mod error;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShadowgateError;
pub use types::{Alias, Bucket, Mode, RoutingDecision};
