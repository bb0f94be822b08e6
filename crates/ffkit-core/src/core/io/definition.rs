use crate::core::forcefield::atom_type::AttributeValue;
use crate::core::forcefield::constants::ConstantTable;
use crate::core::forcefield::decomposition::Decomposition;
use crate::core::forcefield::error::ForceFieldError;
use crate::core::forcefield::interaction::InteractionDefinition;
use crate::core::forcefield::potential::ValueMap;
use crate::core::forcefield::potentials::PotentialRegistry;
use crate::core::forcefield::registry::ForceField;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AtomTypeEntry {
    pub name: String,
    pub symbol: String,
    pub mass: f64,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InteractionTypeEntry {
    pub name: String,
    pub category: String,
    pub potential: String,
    pub decomposition: Decomposition,
    #[serde(default)]
    pub bonded: bool,
    pub atom_types: Vec<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, f64>,
    #[serde(default)]
    pub constants: BTreeMap<String, f64>,
    pub cutoff: Option<f64>,
}

/// The on-disk form of a force field.
///
/// Entries are applied in file order through the regular registry
/// operations, so a definition file is subject to exactly the same checks as
/// a force field assembled in code.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ForceFieldDefinition {
    pub name: String,
    #[serde(default)]
    pub flexible: bool,
    /// Overrides applied on top of the default constant table.
    #[serde(default)]
    pub constants: BTreeMap<String, f64>,
    #[serde(default)]
    pub atom_types: Vec<AtomTypeEntry>,
    #[serde(default)]
    pub interaction_types: Vec<InteractionTypeEntry>,
}

#[derive(Debug, Error)]
pub enum DefinitionLoadError {
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
    #[error("Interaction '{interaction}' refers to unknown potential '{potential}'")]
    UnknownPotential {
        interaction: String,
        potential: String,
    },
    #[error(transparent)]
    ForceField(#[from] ForceFieldError),
}

impl ForceFieldDefinition {
    pub fn load(path: &Path) -> Result<Self, DefinitionLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| DefinitionLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse(&content, &path.to_string_lossy())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, DefinitionLoadError> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, origin: &str) -> Result<Self, DefinitionLoadError> {
        toml::from_str(content).map_err(|e| DefinitionLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })
    }

    /// Assembles the force field, looking potentials up in `potentials`.
    pub fn build(&self, potentials: &PotentialRegistry) -> Result<ForceField, DefinitionLoadError> {
        let mut constants = ConstantTable::default();
        constants.merge(self.constants.iter().map(|(k, v)| (k.clone(), *v)));

        let mut ff = ForceField::with_constants(&self.name, constants);
        ff.set_flexible(self.flexible);

        for entry in &self.atom_types {
            ff.define_atom_type(
                &entry.name,
                &entry.symbol,
                entry.mass,
                entry.attributes.iter().map(|(k, v)| (k.clone(), *v)),
            )?;
        }

        for entry in &self.interaction_types {
            let potential = potentials.get(&entry.potential).ok_or_else(|| {
                DefinitionLoadError::UnknownPotential {
                    interaction: entry.name.clone(),
                    potential: entry.potential.clone(),
                }
            })?;
            let mut definition = InteractionDefinition::with_shared_potential(
                &entry.name,
                &entry.category,
                potential,
                entry.decomposition,
            )
            .bonded(entry.bonded)
            .atom_types(entry.atom_types.iter().cloned())
            .parameters(to_value_map(&entry.parameters))
            .constants(to_value_map(&entry.constants));
            if let Some(cutoff) = entry.cutoff {
                definition = definition.cutoff(cutoff);
            }
            ff.define_interaction_type(definition)?;
        }

        debug!(
            "Built force field '{}' with {} atom types and {} interaction types",
            ff.name(),
            ff.atom_type_count(),
            ff.interaction_type_count()
        );
        Ok(ff)
    }
}

fn to_value_map(values: &BTreeMap<String, f64>) -> ValueMap {
    values.iter().map(|(k, v)| (k.clone(), *v)).collect()
}

impl ForceField {
    /// Loads a force field definition file using the built-in potentials.
    pub fn load(path: &Path) -> Result<Self, DefinitionLoadError> {
        ForceFieldDefinition::load(path)?.build(&PotentialRegistry::new())
    }

    /// Parses a force field definition using the built-in potentials.
    pub fn from_toml_str(content: &str) -> Result<Self, DefinitionLoadError> {
        ForceFieldDefinition::from_toml_str(content)?.build(&PotentialRegistry::new())
    }
}
