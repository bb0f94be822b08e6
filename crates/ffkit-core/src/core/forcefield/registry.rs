use super::atom_type::{AtomType, AttributeValue};
use super::constants::ConstantTable;
use super::error::{ForceFieldError, IdentifierKind};
use super::interaction::{InteractionDefinition, InteractionType};
use super::potential::validate_capability;
use crate::core::models::ids::{AtomTypeId, InteractionTypeId};
use slotmap::{SecondaryMap, SlotMap};
use std::collections::HashMap;
use tracing::debug;

/// A named collection of atom types and the interactions between them.
///
/// Definition is append-only: atom types and interaction types are added one
/// at a time, and each addition either succeeds completely or leaves the
/// force field untouched. Once built, the force field is read-only and can be
/// evaluated from many threads at once.
#[derive(Debug, Clone, Default)]
pub struct ForceField {
    name: String,
    /// Whether bonded geometry (bond lengths, angles) is flexible.
    flexible: bool,
    /// Constants consulted for every interaction that does not override them.
    constants: ConstantTable,
    atom_types: SlotMap<AtomTypeId, AtomType>,
    /// Atom types in definition order.
    atom_type_order: Vec<AtomTypeId>,
    /// Unified lookup over atom-type names and symbols.
    atom_type_identifiers: HashMap<String, AtomTypeId>,
    interaction_types: SlotMap<InteractionTypeId, InteractionType>,
    /// Interaction types in definition order.
    interaction_type_order: Vec<InteractionTypeId>,
    interaction_type_identifiers: HashMap<String, InteractionTypeId>,
    /// The interactions each atom type participates in.
    participation: SecondaryMap<AtomTypeId, Vec<InteractionTypeId>>,
}

impl ForceField {
    /// Creates an empty force field using the default constant table.
    pub fn new(name: &str) -> Self {
        Self::with_constants(name, ConstantTable::default())
    }

    pub fn with_constants(name: &str, constants: ConstantTable) -> Self {
        Self {
            name: name.to_string(),
            constants,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn is_flexible(&self) -> bool {
        self.flexible
    }

    pub fn set_flexible(&mut self, flexible: bool) {
        self.flexible = flexible;
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    /// Registers a new atom type under both its name and its symbol.
    ///
    /// # Errors
    ///
    /// Returns [`ForceFieldError::DuplicateIdentifier`] if the name or the
    /// symbol is already used by any atom type (as a name or a symbol), or if
    /// the name equals the symbol.
    pub fn define_atom_type<I, K, V>(
        &mut self,
        name: &str,
        symbol: &str,
        mass: f64,
        attributes: I,
    ) -> Result<AtomTypeId, ForceFieldError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        for identifier in [name, symbol] {
            if self.atom_type_identifiers.contains_key(identifier) {
                return Err(ForceFieldError::DuplicateIdentifier {
                    kind: IdentifierKind::AtomType,
                    identifier: identifier.to_string(),
                });
            }
        }
        if name == symbol {
            return Err(ForceFieldError::DuplicateIdentifier {
                kind: IdentifierKind::AtomType,
                identifier: symbol.to_string(),
            });
        }

        let atom_type = AtomType::new(name, symbol, mass, attributes);
        let id = self.atom_types.insert(atom_type);
        self.atom_type_order.push(id);
        self.atom_type_identifiers.insert(name.to_string(), id);
        self.atom_type_identifiers.insert(symbol.to_string(), id);
        self.participation.insert(id, Vec::new());
        debug!(
            "Defined atom type '{}' ({}) in force field '{}'",
            name, symbol, self.name
        );
        Ok(id)
    }

    /// Looks up an atom type by name or symbol.
    pub fn get_atom_type(&self, identifier: &str) -> Result<&AtomType, ForceFieldError> {
        self.atom_type_id(identifier)
            .and_then(|id| self.atom_types.get(id))
            .ok_or_else(|| ForceFieldError::UnknownAtomType {
                identifier: identifier.to_string(),
            })
    }

    pub fn atom_type_id(&self, identifier: &str) -> Option<AtomTypeId> {
        self.atom_type_identifiers.get(identifier).copied()
    }

    pub fn atom_type_by_id(&self, id: AtomTypeId) -> Option<&AtomType> {
        self.atom_types.get(id)
    }

    /// Iterates over atom types in definition order.
    pub fn atom_types(&self) -> impl Iterator<Item = &AtomType> {
        self.atom_type_order
            .iter()
            .filter_map(|id| self.atom_types.get(*id))
    }

    pub fn atom_type_count(&self) -> usize {
        self.atom_type_order.len()
    }

    /// Resolves, builds and registers a new interaction type.
    ///
    /// Nothing is modified unless every step succeeds: name uniqueness, the
    /// potential contract, atom-type lookup, cutoff validation and parameter
    /// and constant resolution.
    pub fn define_interaction_type(
        &mut self,
        definition: InteractionDefinition,
    ) -> Result<InteractionTypeId, ForceFieldError> {
        if self.interaction_type_identifiers.contains_key(definition.name()) {
            return Err(ForceFieldError::DuplicateIdentifier {
                kind: IdentifierKind::InteractionType,
                identifier: definition.name().to_string(),
            });
        }

        validate_capability(definition.potential.as_ref())?;

        let mut participants = Vec::with_capacity(definition.atom_types.len());
        for identifier in &definition.atom_types {
            let id = self.atom_type_id(identifier).ok_or_else(|| {
                ForceFieldError::UnknownAtomType {
                    identifier: identifier.clone(),
                }
            })?;
            participants.push((id, &self.atom_types[id]));
        }
        if participants.len() < 2 {
            return Err(ForceFieldError::TooFewAtomTypes {
                interaction: definition.name().to_string(),
                count: participants.len(),
            });
        }

        let interaction = InteractionType::build(&definition, &participants, &self.constants)?;
        debug!(
            "Defined interaction type '{}' ({} via '{}') with parameters {} and constants {}",
            interaction.name(),
            interaction.decomposition(),
            interaction.potential().name(),
            interaction.parameters(),
            interaction.constants()
        );

        let mut distinct: Vec<AtomTypeId> = Vec::with_capacity(participants.len());
        for (atom_id, _) in &participants {
            if !distinct.contains(atom_id) {
                distinct.push(*atom_id);
            }
        }

        let id = self.interaction_types.insert(interaction);
        self.interaction_type_order.push(id);
        self.interaction_type_identifiers
            .insert(definition.name, id);
        for atom_id in distinct {
            if let Some(interactions) = self.participation.get_mut(atom_id) {
                interactions.push(id);
            }
        }
        Ok(id)
    }

    pub fn interaction_type(&self, name: &str) -> Option<&InteractionType> {
        self.interaction_type_identifiers
            .get(name)
            .and_then(|id| self.interaction_types.get(*id))
    }

    pub fn interaction_type_by_id(&self, id: InteractionTypeId) -> Option<&InteractionType> {
        self.interaction_types.get(id)
    }

    /// Iterates over interaction types in definition order.
    pub fn interaction_types(&self) -> impl Iterator<Item = &InteractionType> {
        self.interaction_type_order
            .iter()
            .filter_map(|id| self.interaction_types.get(*id))
    }

    pub fn interaction_type_count(&self) -> usize {
        self.interaction_type_order.len()
    }

    /// The interactions an atom type participates in, in definition order.
    pub fn interactions_of(
        &self,
        identifier: &str,
    ) -> Result<Vec<&InteractionType>, ForceFieldError> {
        let id = self
            .atom_type_id(identifier)
            .ok_or_else(|| ForceFieldError::UnknownAtomType {
                identifier: identifier.to_string(),
            })?;
        Ok(self
            .participation
            .get(id)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| self.interaction_types.get(*id))
                    .collect()
            })
            .unwrap_or_default())
    }
}
