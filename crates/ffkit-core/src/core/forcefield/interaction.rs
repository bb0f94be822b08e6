use super::atom_type::AtomType;
use super::constants::ConstantSource;
use super::decomposition::Decomposition;
use super::error::ForceFieldError;
use super::potential::{Potential, SharedPotential, ValueMap};
use super::resolver::ParameterResolver;
use crate::core::models::ids::AtomTypeId;
use std::sync::Arc;

/// Everything needed to request an interaction type from a force field.
///
/// Built fluently and handed to
/// [`ForceField::define_interaction_type`](super::registry::ForceField::define_interaction_type),
/// which resolves the atom-type identifiers and binds every parameter.
///
/// ```ignore
/// let dispersion = InteractionDefinition::new(
///     "O-O Dispersion",
///     "Dispersion",
///     LennardJones,
///     Decomposition::Pairwise,
/// )
/// .atom_types(["OW", "OW"])
/// .cutoff(1.0);
/// ```
#[derive(Debug, Clone)]
pub struct InteractionDefinition {
    pub(crate) name: String,
    pub(crate) category: String,
    pub(crate) bonded: bool,
    pub(crate) potential: SharedPotential,
    pub(crate) decomposition: Decomposition,
    pub(crate) atom_types: Vec<String>,
    pub(crate) parameters: ValueMap,
    pub(crate) constants: ValueMap,
    pub(crate) cutoff: Option<f64>,
}

impl InteractionDefinition {
    pub fn new<P: Potential + 'static>(
        name: &str,
        category: &str,
        potential: P,
        decomposition: Decomposition,
    ) -> Self {
        Self::with_shared_potential(name, category, Arc::new(potential), decomposition)
    }

    pub fn with_shared_potential(
        name: &str,
        category: &str,
        potential: SharedPotential,
        decomposition: Decomposition,
    ) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            bonded: false,
            potential,
            decomposition,
            atom_types: Vec::new(),
            parameters: ValueMap::new(),
            constants: ValueMap::new(),
            cutoff: None,
        }
    }

    pub fn bonded(mut self, bonded: bool) -> Self {
        self.bonded = bonded;
        self
    }

    /// Sets the participating atom types, by name or symbol, in order.
    pub fn atom_types<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.atom_types = identifiers.into_iter().map(Into::into).collect();
        self
    }

    pub fn parameter(mut self, name: &str, value: f64) -> Self {
        self.parameters.insert(name, value);
        self
    }

    pub fn parameters(mut self, parameters: ValueMap) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn constant(mut self, name: &str, value: f64) -> Self {
        self.constants.insert(name, value);
        self
    }

    pub fn constants(mut self, constants: ValueMap) -> Self {
        self.constants = constants;
        self
    }

    pub fn cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A potential bound to concrete atom types, with cutoff handling.
///
/// All parameters and constants are resolved when the interaction is built and
/// never change afterwards. With a cutoff `c`, the force is zero beyond `c`
/// and the energy is shifted by `U_base(c)` so that it reaches exactly zero at
/// `c` and stays continuous.
#[derive(Debug, Clone)]
pub struct InteractionType {
    name: String,
    category: String,
    bonded: bool,
    decomposition: Decomposition,
    potential: SharedPotential,
    atom_types: Vec<AtomTypeId>,
    parameters: ValueMap,
    constants: ValueMap,
    cutoff: Option<f64>,
    energy_shift: f64,
}

impl InteractionType {
    /// Resolves `definition` against the given atom types and constant source.
    ///
    /// `atom_types` must line up with `definition.atom_types`; the caller is
    /// responsible for turning identifiers into atom types.
    pub(crate) fn build(
        definition: &InteractionDefinition,
        atom_types: &[(AtomTypeId, &AtomType)],
        constant_source: &dyn ConstantSource,
    ) -> Result<Self, ForceFieldError> {
        if let Some(cutoff) = definition.cutoff {
            if !(cutoff.is_finite() && cutoff > 0.0) {
                return Err(ForceFieldError::InvalidCutoff {
                    interaction: definition.name.clone(),
                    cutoff,
                });
            }
        }

        let participants: Vec<&AtomType> = atom_types.iter().map(|(_, atom)| *atom).collect();
        let resolved = ParameterResolver::new(constant_source).resolve(
            &definition.name,
            definition.potential.as_ref(),
            &participants,
            &definition.parameters,
            &definition.constants,
        )?;

        let mut interaction = Self {
            name: definition.name.clone(),
            category: definition.category.clone(),
            bonded: definition.bonded,
            decomposition: definition.decomposition,
            potential: Arc::clone(&definition.potential),
            atom_types: atom_types.iter().map(|(id, _)| *id).collect(),
            parameters: resolved.parameters,
            constants: resolved.constants,
            cutoff: definition.cutoff,
            energy_shift: 0.0,
        };
        if let Some(cutoff) = interaction.cutoff {
            interaction.energy_shift = interaction.energy_base(cutoff);
        }
        Ok(interaction)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_bonded(&self) -> bool {
        self.bonded
    }

    pub fn decomposition(&self) -> Decomposition {
        self.decomposition
    }

    pub fn potential(&self) -> &dyn Potential {
        self.potential.as_ref()
    }

    /// The participating atom types, in definition order.
    pub fn atom_types(&self) -> &[AtomTypeId] {
        &self.atom_types
    }

    pub fn parameters(&self) -> &ValueMap {
        &self.parameters
    }

    pub fn constants(&self) -> &ValueMap {
        &self.constants
    }

    /// The truncation distance, or `None` for an infinite-range interaction.
    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    /// Force without cutoff handling.
    #[inline]
    pub fn force_base(&self, x: f64) -> f64 {
        self.potential.force(x, &self.parameters, &self.constants)
    }

    /// Energy without cutoff handling.
    #[inline]
    pub fn energy_base(&self, x: f64) -> f64 {
        self.potential.energy(x, &self.parameters, &self.constants)
    }

    #[inline]
    pub fn force(&self, x: f64) -> f64 {
        match self.cutoff {
            Some(cutoff) if x > cutoff => 0.0,
            _ => self.force_base(x),
        }
    }

    #[inline]
    pub fn energy(&self, x: f64) -> f64 {
        match self.cutoff {
            None => self.energy_base(x),
            Some(cutoff) if x > cutoff => 0.0,
            Some(_) => self.energy_base(x) - self.energy_shift,
        }
    }
}
