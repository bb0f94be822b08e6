//! # Engine Module
//!
//! Read-only analyses of a finished [`ForceField`](crate::core::forcefield::registry::ForceField).
//!
//! - **Configuration** ([`config`]) - Probe distances, tolerances and tabulation grids
//! - **Validation** ([`validation`]) - Consistency battery run in parallel over interactions
//! - **Tabulation** ([`tabulation`]) - Force and energy sampled over a distance grid

pub mod config;
pub mod tabulation;
pub mod validation;
