use super::atom_type::{AtomType, AttributeError};
use super::potential::{Potential, SharedPotential, ValueMap};
use phf::{Map, phf_map};
use std::collections::HashMap;
use std::sync::Arc;

fn leading_pair<'a>(
    atom_types: &[&'a AtomType],
) -> Result<(&'a AtomType, &'a AtomType), AttributeError> {
    match atom_types {
        [first, second, ..] => Ok((*first, *second)),
        _ => Err(AttributeError::Arity {
            expected: 2,
            actual: atom_types.len(),
        }),
    }
}

/// 12-6 Lennard-Jones dispersion with Lorentz-Berthelot combination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LennardJones;

impl Potential for LennardJones {
    fn name(&self) -> &str {
        "lennard_jones"
    }

    fn parameter_names(&self) -> &[&'static str] {
        &["epsilon", "sigma"]
    }

    fn constant_names(&self) -> &[&'static str] {
        &[]
    }

    #[inline]
    fn force(&self, x: f64, parameters: &ValueMap, _constants: &ValueMap) -> f64 {
        let (epsilon, sigma) = (parameters["epsilon"], parameters["sigma"]);
        48.0 * epsilon * (sigma.powi(12) / x.powi(13) - 0.5 * sigma.powi(6) / x.powi(7))
    }

    #[inline]
    fn energy(&self, x: f64, parameters: &ValueMap, _constants: &ValueMap) -> f64 {
        let (epsilon, sigma) = (parameters["epsilon"], parameters["sigma"]);
        let rho6 = (sigma / x).powi(6);
        4.0 * epsilon * (rho6 * rho6 - rho6)
    }

    fn derive_parameters(
        &self,
        atom_types: &[&AtomType],
    ) -> Option<Result<ValueMap, AttributeError>> {
        Some(leading_pair(atom_types).and_then(|(a, b)| {
            let epsilon = (a.number("epsilon")? * b.number("epsilon")?).sqrt();
            let sigma = (a.number("sigma")? + b.number("sigma")?) / 2.0;
            Ok(ValueMap::from([("epsilon", epsilon), ("sigma", sigma)]))
        }))
    }
}

/// Point-charge electrostatics scaled by the electric conversion factor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Coulombic;

impl Potential for Coulombic {
    fn name(&self) -> &str {
        "coulombic"
    }

    fn parameter_names(&self) -> &[&'static str] {
        &["charge_product"]
    }

    fn constant_names(&self) -> &[&'static str] {
        &["ecf", "epsilon_r"]
    }

    #[inline]
    fn force(&self, x: f64, parameters: &ValueMap, constants: &ValueMap) -> f64 {
        constants["ecf"] * parameters["charge_product"] / (constants["epsilon_r"] * x * x)
    }

    #[inline]
    fn energy(&self, x: f64, parameters: &ValueMap, constants: &ValueMap) -> f64 {
        constants["ecf"] * parameters["charge_product"] / (constants["epsilon_r"] * x)
    }

    fn derive_parameters(
        &self,
        atom_types: &[&AtomType],
    ) -> Option<Result<ValueMap, AttributeError>> {
        Some(leading_pair(atom_types).and_then(|(a, b)| {
            let charge_product = a.number("charge")? * b.number("charge")?;
            Ok(ValueMap::from([("charge_product", charge_product)]))
        }))
    }
}

/// Harmonic restraint around an equilibrium length or angle.
///
/// Has no combination rule: `k` and `eq` are always given explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Harmonic;

impl Potential for Harmonic {
    fn name(&self) -> &str {
        "harmonic"
    }

    fn parameter_names(&self) -> &[&'static str] {
        &["k", "eq"]
    }

    fn constant_names(&self) -> &[&'static str] {
        &[]
    }

    #[inline]
    fn force(&self, x: f64, parameters: &ValueMap, _constants: &ValueMap) -> f64 {
        -parameters["k"] * (x - parameters["eq"])
    }

    #[inline]
    fn energy(&self, x: f64, parameters: &ValueMap, _constants: &ValueMap) -> f64 {
        let displacement = x - parameters["eq"];
        0.5 * parameters["k"] * displacement * displacement
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinPotential {
    LennardJones,
    Coulombic,
    Harmonic,
}

static BUILTIN_POTENTIALS: Map<&'static str, BuiltinPotential> = phf_map! {
    "lennard_jones" => BuiltinPotential::LennardJones,
    "coulombic" => BuiltinPotential::Coulombic,
    "harmonic" => BuiltinPotential::Harmonic,
};

impl BuiltinPotential {
    pub fn shared(self) -> SharedPotential {
        match self {
            BuiltinPotential::LennardJones => Arc::new(LennardJones),
            BuiltinPotential::Coulombic => Arc::new(Coulombic),
            BuiltinPotential::Harmonic => Arc::new(Harmonic),
        }
    }
}

/// Looks up a built-in potential by its name.
pub fn by_name(name: &str) -> Option<SharedPotential> {
    BUILTIN_POTENTIALS.get(name.trim()).map(|p| p.shared())
}

/// Names of all built-in potentials, sorted.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTIN_POTENTIALS.keys().copied().collect();
    names.sort_unstable();
    names
}

/// Name → potential lookup used when definitions refer to potentials by name.
///
/// Starts out with the built-ins; user potentials registered later shadow a
/// built-in of the same name.
#[derive(Debug, Clone, Default)]
pub struct PotentialRegistry {
    custom: HashMap<String, SharedPotential>,
}

impl PotentialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, potential: SharedPotential) -> Option<SharedPotential> {
        self.custom.insert(potential.name().to_string(), potential)
    }

    pub fn get(&self, name: &str) -> Option<SharedPotential> {
        self.custom.get(name).cloned().or_else(|| by_name(name))
    }
}
