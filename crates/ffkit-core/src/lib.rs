//! # ffkit Core Library
//!
//! Molecular-dynamics force fields as composable in-memory objects, evaluated
//! as continuous scalar functions of separation distance.
//!
//! ## Architectural Philosophy
//!
//! - **[`core`]: The Foundation.** Atom types, the potential contract, the
//!   parameter resolver, interaction types with cutoff handling, the force
//!   field registry, built-in water models and TOML definitions.
//!
//! - **[`engine`]: The Analysis Layer.** Read-only consumers of a finished
//!   force field: the validation battery (run in parallel over interactions)
//!   and tabulation of force and energy over a distance grid.
//!
//! Simulation, neighbour search and vector geometry are left to downstream
//! engines, which read the decomposition tags and the scalar radial functions.

pub mod core;
pub mod engine;
