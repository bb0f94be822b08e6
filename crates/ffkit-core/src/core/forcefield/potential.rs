use super::atom_type::{AtomType, AttributeError};
use super::error::ForceFieldError;
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// A name → value mapping of resolved potential inputs.
///
/// Keys are kept sorted so that two resolutions of the same definition compare
/// and print identically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValueMap(BTreeMap<String, f64>);

impl ValueMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.0.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Whether the key set equals `names` exactly, ignoring order.
    pub fn has_exactly(&self, names: &[&str]) -> bool {
        self.0.len() == names.len() && names.iter().all(|name| self.0.contains_key(*name))
    }
}

/// Panics if `name` is absent; resolved maps always hold every declared name.
impl Index<&str> for ValueMap {
    type Output = f64;

    fn index(&self, name: &str) -> &f64 {
        match self.0.get(name) {
            Some(value) => value,
            None => panic!("value '{}' was not resolved", name),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ValueMap {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for ValueMap {
    fn from(entries: [(K, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl fmt::Display for ValueMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} = {}", name, value)?;
        }
        f.write_str("}")
    }
}

/// The capability contract every pluggable potential formula fulfils.
///
/// `force` and `energy` must be pure functions of the separation `x` and the
/// resolved values; they are only required to be finite for `x > 0`. The
/// `parameters` and `constants` passed in always hold exactly the names
/// declared by [`parameter_names`](Potential::parameter_names) and
/// [`constant_names`](Potential::constant_names).
pub trait Potential: fmt::Debug + Send + Sync {
    /// The identifying name of the potential (e.g., "lennard_jones").
    fn name(&self) -> &str;

    /// Inputs specific to the interacting atom types.
    fn parameter_names(&self) -> &[&'static str];

    /// Inputs taken from the physical-constant table.
    fn constant_names(&self) -> &[&'static str];

    /// The force (negative derivative of the energy) at separation `x`.
    fn force(&self, x: f64, parameters: &ValueMap, constants: &ValueMap) -> f64;

    /// The potential energy at separation `x`.
    fn energy(&self, x: f64, parameters: &ValueMap, constants: &ValueMap) -> f64;

    /// Derives pair parameters from per-atom-type attributes.
    ///
    /// Returns `None` when the potential has no combination rule, in which
    /// case every parameter must be supplied explicitly.
    fn derive_parameters(
        &self,
        _atom_types: &[&AtomType],
    ) -> Option<Result<ValueMap, AttributeError>> {
        None
    }
}

pub type SharedPotential = Arc<dyn Potential>;

/// Checks the declared shape of a potential before it is bound to atom types.
pub fn validate_capability(potential: &dyn Potential) -> Result<(), ForceFieldError> {
    let unsupported = |reason: String| ForceFieldError::UnsupportedCapability {
        potential: potential.name().to_string(),
        reason,
    };

    if potential.name().trim().is_empty() {
        return Err(unsupported("the potential name is empty".to_string()));
    }

    let mut seen = HashSet::new();
    let declared = potential
        .parameter_names()
        .iter()
        .map(|name| ("parameter", *name))
        .chain(potential.constant_names().iter().map(|name| ("constant", *name)));
    for (kind, name) in declared {
        if name.trim().is_empty() {
            return Err(unsupported(format!("an empty {} name is declared", kind)));
        }
        if !seen.insert(name) {
            return Err(unsupported(format!("'{}' is declared more than once", name)));
        }
    }
    Ok(())
}
