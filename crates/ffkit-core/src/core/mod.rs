//! # Core Module
//!
//! The foundation of ffkit: force-field data structures, the potential
//! contract, parameter resolution and cutoff evaluation, the built-in water
//! models, and the declarative TOML definition format.
//!
//! - **Force fields** ([`forcefield`]) - Atom types, potentials, interaction types and the registry
//! - **Models** ([`models`]) - Typed identifiers and built-in three-site water models
//! - **File I/O** ([`io`]) - Loading force-field definitions from TOML

pub mod forcefield;
pub mod io;
pub mod models;
