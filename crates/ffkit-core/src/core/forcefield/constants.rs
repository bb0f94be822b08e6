use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Electric conversion factor in kJ mol⁻¹ nm e⁻².
pub const ELECTRIC_CONVERSION_FACTOR: f64 = 138.935458;
/// Relative permittivity of vacuum (unitless).
pub const RELATIVE_PERMITTIVITY: f64 = 1.0;

/// A source of named physical constants.
pub trait ConstantSource {
    fn constant(&self, name: &str) -> Option<f64>;
}

/// A table of physical constants, seeded with defaults and overridable.
///
/// Each force field owns one table and consults it for every constant an
/// interaction does not override explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantTable {
    values: BTreeMap<String, f64>,
}

#[derive(Debug, Error)]
pub enum ConstantLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl Default for ConstantTable {
    fn default() -> Self {
        Self::empty()
            .with("ecf", ELECTRIC_CONVERSION_FACTOR)
            .with("epsilon_r", RELATIVE_PERMITTIVITY)
    }
}

impl ConstantTable {
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: f64) -> Option<f64> {
        self.values.insert(name.to_string(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Applies every entry of `overrides` on top of this table.
    pub fn merge<I, K>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        for (name, value) in overrides {
            self.values.insert(name.into(), value);
        }
    }

    /// Loads a flat `name = value` TOML file on top of the default table.
    pub fn load(path: &Path) -> Result<Self, ConstantLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConstantLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let overrides: BTreeMap<String, f64> =
            toml::from_str(&content).map_err(|e| ConstantLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        let mut table = Self::default();
        table.merge(overrides);
        Ok(table)
    }
}

impl ConstantSource for ConstantTable {
    fn constant(&self, name: &str) -> Option<f64> {
        self.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn default_table_holds_electric_conversion_factor_and_permittivity() {
        let table = ConstantTable::default();
        assert_eq!(table.get("ecf"), Some(138.935458));
        assert_eq!(table.get("epsilon_r"), Some(1.0));
        assert_eq!(table.get("kb"), None);
    }

    #[test]
    fn with_overrides_existing_constant() {
        let table = ConstantTable::default().with("epsilon_r", 78.5);
        assert_eq!(table.constant("epsilon_r"), Some(78.5));
        assert_eq!(table.constant("ecf"), Some(ELECTRIC_CONVERSION_FACTOR));
    }

    #[test]
    fn empty_table_has_no_constants() {
        assert_eq!(ConstantTable::empty().iter().count(), 0);
    }

    #[test]
    fn table_serves_constants_through_trait_object() {
        let table = ConstantTable::empty().with("ecf", 1.0);
        let source: &dyn ConstantSource = &table;
        assert_eq!(source.constant("ecf"), Some(1.0));
        assert_eq!(source.constant("epsilon_r"), None);
    }

    #[test]
    fn load_merges_file_values_over_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("constants.toml");
        fs::write(&path, "epsilon_r = 2.0\nkb = 0.0083144626").unwrap();

        let table = ConstantTable::load(&path).unwrap();
        assert_eq!(table.get("epsilon_r"), Some(2.0));
        assert_eq!(table.get("kb"), Some(0.0083144626));
        assert_eq!(table.get("ecf"), Some(ELECTRIC_CONVERSION_FACTOR));
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ConstantTable::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(ConstantLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_non_numeric_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "ecf = \"large\"").unwrap();
        let result = ConstantTable::load(&path);
        assert!(matches!(result, Err(ConstantLoadError::Toml { .. })));
    }
}
