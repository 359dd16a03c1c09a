//! # LayerKV Testkit
//!
//! Test utilities for LayerKV.
//!
//! This crate provides:
//! - Fixtures for building pre-populated stacks
//! - Property-based test generators using proptest
//! - A snapshot-per-depth reference model of the transaction stack
//! - A harness that replays operations against both and reports divergence
//!
//! ## Usage
//!
//! ```rust,ignore
//! use layerkv_testkit::prelude::*;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn stack_matches_model(ops in op_sequence_strategy(1, 64)) {
//!         prop_assert!(apply_and_compare(&ops).is_ok());
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod harness;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::harness::*;
    pub use crate::model::*;
}

pub use fixtures::*;
pub use generators::*;
pub use harness::*;
pub use model::*;
