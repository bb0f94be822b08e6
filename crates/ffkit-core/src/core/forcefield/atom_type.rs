use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// A single value stored in an atom type's open attribute set.
///
/// Attributes have no fixed schema; potentials that derive pair parameters
/// read them by name (e.g. `charge`, `sigma`, `epsilon`) and check the kind.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A numeric attribute such as a partial charge or a Lennard-Jones sigma.
    Number(f64),
    /// A boolean marker attribute.
    Flag(bool),
}

impl AttributeValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(value) => Some(*value),
            AttributeValue::Flag(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AttributeValue::Flag(value) => Some(*value),
            AttributeValue::Number(_) => None,
        }
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(value) => write!(f, "{}", value),
            AttributeValue::Flag(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttributeError {
    #[error("Atom type '{atom_type}' has no attribute '{attribute}'")]
    Missing { atom_type: String, attribute: String },
    #[error("Attribute '{attribute}' of atom type '{atom_type}' is not a {expected}")]
    WrongKind {
        atom_type: String,
        attribute: String,
        expected: &'static str,
    },
    #[error("Expected at least {expected} atom types for parameter derivation, got {actual}")]
    Arity { expected: usize, actual: usize },
}

/// A reusable particle descriptor: name, symbol, mass and open attributes.
///
/// Atom types are created through [`ForceField::define_atom_type`] and never
/// mutated afterwards. Which interactions an atom type takes part in is
/// tracked by the owning force field, not by the atom type itself.
///
/// [`ForceField::define_atom_type`]: super::registry::ForceField::define_atom_type
#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    /// The unique name of the atom type (e.g., "Oxygen").
    pub name: String,
    /// The unique symbol of the atom type (e.g., "OW").
    pub symbol: String,
    /// The mass in atomic mass units.
    pub mass: f64,
    attributes: BTreeMap<String, AttributeValue>,
}

impl AtomType {
    pub fn new<I, K, V>(name: &str, symbol: &str, mass: f64, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Self {
            name: name.to_string(),
            symbol: symbol.to_string(),
            mass,
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// Returns the attributes sorted by name.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn number(&self, name: &str) -> Result<f64, AttributeError> {
        match self.attributes.get(name) {
            Some(value) => value.as_number().ok_or_else(|| AttributeError::WrongKind {
                atom_type: self.name.clone(),
                attribute: name.to_string(),
                expected: "number",
            }),
            None => Err(AttributeError::Missing {
                atom_type: self.name.clone(),
                attribute: name.to_string(),
            }),
        }
    }

    pub fn flag(&self, name: &str) -> Result<bool, AttributeError> {
        match self.attributes.get(name) {
            Some(value) => value.as_flag().ok_or_else(|| AttributeError::WrongKind {
                atom_type: self.name.clone(),
                attribute: name.to_string(),
                expected: "flag",
            }),
            None => Err(AttributeError::Missing {
                atom_type: self.name.clone(),
                attribute: name.to_string(),
            }),
        }
    }

    /// Whether `identifier` matches this atom type's name or symbol.
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        self.name == identifier || self.symbol == identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oxygen() -> AtomType {
        AtomType::new(
            "Oxygen",
            "OW",
            15.9994,
            [
                ("charge", AttributeValue::from(-0.8476)),
                ("sigma", AttributeValue::from(0.3166)),
                ("polar", AttributeValue::from(true)),
            ],
        )
    }

    #[test]
    fn new_stores_core_fields_and_attributes() {
        let atom = oxygen();
        assert_eq!(atom.name, "Oxygen");
        assert_eq!(atom.symbol, "OW");
        assert_eq!(atom.mass, 15.9994);
        assert_eq!(atom.attribute("sigma"), Some(&AttributeValue::Number(0.3166)));
    }

    #[test]
    fn attributes_iterate_in_name_order() {
        let atom = oxygen();
        let names: Vec<&str> = atom.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["charge", "polar", "sigma"]);
    }

    #[test]
    fn number_returns_numeric_attribute() {
        assert_eq!(oxygen().number("charge"), Ok(-0.8476));
    }

    #[test]
    fn number_fails_for_missing_attribute() {
        assert_eq!(
            oxygen().number("epsilon"),
            Err(AttributeError::Missing {
                atom_type: "Oxygen".to_string(),
                attribute: "epsilon".to_string(),
            })
        );
    }

    #[test]
    fn number_fails_for_flag_attribute() {
        assert!(matches!(
            oxygen().number("polar"),
            Err(AttributeError::WrongKind { expected: "number", .. })
        ));
    }

    #[test]
    fn flag_returns_boolean_attribute() {
        assert_eq!(oxygen().flag("polar"), Ok(true));
        assert!(oxygen().flag("charge").is_err());
    }

    #[test]
    fn is_identified_by_matches_name_and_symbol_only() {
        let atom = oxygen();
        assert!(atom.is_identified_by("Oxygen"));
        assert!(atom.is_identified_by("OW"));
        assert!(!atom.is_identified_by("HW"));
    }

    #[test]
    fn attribute_value_deserializes_numbers_and_flags() {
        #[derive(Deserialize)]
        struct Holder {
            values: BTreeMap<String, AttributeValue>,
        }
        let holder: Holder = toml::from_str("values = { charge = -0.5, polar = true }").unwrap();
        assert_eq!(holder.values["charge"], AttributeValue::Number(-0.5));
        assert_eq!(holder.values["polar"], AttributeValue::Flag(true));
    }
}
