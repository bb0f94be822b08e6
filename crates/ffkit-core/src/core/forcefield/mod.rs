//! # Force Field Module
//!
//! Defines force fields as composable in-memory objects: atom types with open
//! attribute sets, pluggable potential formulas, and interaction types that
//! bind a potential to concrete atom types.
//!
//! ## Overview
//!
//! An interaction type is built in one step. The atom types it refers to are
//! looked up by name or symbol, every parameter the potential declares is
//! taken from an explicit override or derived from atom-type attributes by the
//! potential's combination rule, and every constant is taken from an override
//! or from the force field's constant table. The result is frozen and can be
//! evaluated as `F(x)`/`U(x)` with cutoff truncation and energy shifting.
//!
//! ## Key Components
//!
//! - [`potential`] - The [`potential::Potential`] contract and resolved value maps
//! - [`potentials`] - Lennard-Jones, Coulombic and Harmonic potentials
//! - [`constants`] - Injectable physical-constant tables
//! - [`resolver`] - Parameter and constant resolution
//! - [`interaction`] - Interaction definitions and the cutoff engine
//! - [`registry`] - The [`registry::ForceField`] container
//!
//! ## Usage
//!
//! ```ignore
//! use ffkit::core::forcefield::prelude::*;
//!
//! let mut ff = ForceField::new("argon");
//! ff.define_atom_type("Argon", "Ar", 39.948, [("sigma", 0.3405), ("epsilon", 0.996)])?;
//! ff.define_interaction_type(
//!     InteractionDefinition::new("Ar-Ar", "Dispersion", LennardJones, Decomposition::Pairwise)
//!         .atom_types(["Ar", "Ar"])
//!         .cutoff(1.2),
//! )?;
//! let energy = ff.interaction_type("Ar-Ar").unwrap().energy(0.38);
//! ```

pub mod atom_type;
pub mod constants;
pub mod decomposition;
pub mod error;
pub mod interaction;
pub mod potential;
pub mod potentials;
pub mod registry;
pub mod resolver;

pub mod prelude {
    pub use super::atom_type::{AtomType, AttributeValue};
    pub use super::constants::{ConstantSource, ConstantTable};
    pub use super::decomposition::Decomposition;
    pub use super::error::ForceFieldError;
    pub use super::interaction::{InteractionDefinition, InteractionType};
    pub use super::potential::{Potential, SharedPotential, ValueMap};
    pub use super::potentials::{Coulombic, Harmonic, LennardJones};
    pub use super::registry::ForceField;
}
