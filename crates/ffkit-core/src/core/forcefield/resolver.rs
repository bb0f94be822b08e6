use super::atom_type::AtomType;
use super::constants::ConstantSource;
use super::error::ForceFieldError;
use super::potential::{Potential, ValueMap};
use tracing::{trace, warn};

/// Parameter and constant values bound for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedInputs {
    pub parameters: ValueMap,
    pub constants: ValueMap,
}

/// Binds a potential's declared inputs to concrete values.
///
/// Parameters come from explicit overrides first and from the potential's
/// combination rule second. Constants come from explicit overrides first and
/// from the injected constant source second.
pub struct ParameterResolver<'a> {
    constants: &'a dyn ConstantSource,
}

impl<'a> ParameterResolver<'a> {
    pub fn new(constants: &'a dyn ConstantSource) -> Self {
        Self { constants }
    }

    pub fn resolve(
        &self,
        interaction: &str,
        potential: &dyn Potential,
        atom_types: &[&AtomType],
        explicit_parameters: &ValueMap,
        explicit_constants: &ValueMap,
    ) -> Result<ResolvedInputs, ForceFieldError> {
        warn_undeclared(interaction, "parameter", explicit_parameters, potential.parameter_names());
        warn_undeclared(interaction, "constant", explicit_constants, potential.constant_names());

        let parameters =
            self.resolve_parameters(interaction, potential, atom_types, explicit_parameters)?;
        let constants = self.resolve_constants(interaction, potential, explicit_constants)?;
        Ok(ResolvedInputs {
            parameters,
            constants,
        })
    }

    fn resolve_parameters(
        &self,
        interaction: &str,
        potential: &dyn Potential,
        atom_types: &[&AtomType],
        explicit: &ValueMap,
    ) -> Result<ValueMap, ForceFieldError> {
        let missing = |parameter: &str| ForceFieldError::MissingParameter {
            interaction: interaction.to_string(),
            parameter: parameter.to_string(),
        };

        // The combination rule runs at most once, and only if some parameter
        // is not overridden.
        let mut derived: Option<ValueMap> = None;
        let mut resolved = ValueMap::new();
        for &name in potential.parameter_names() {
            let value = match explicit.get(name) {
                Some(value) => value,
                None => {
                    if derived.is_none() {
                        let values = match potential.derive_parameters(atom_types) {
                            None => return Err(missing(name)),
                            Some(result) => {
                                result.map_err(|source| ForceFieldError::ParameterDerivation {
                                    interaction: interaction.to_string(),
                                    potential: potential.name().to_string(),
                                    source,
                                })?
                            }
                        };
                        trace!(
                            "Derived parameters {} for interaction '{}'",
                            values, interaction
                        );
                        derived = Some(values);
                    }
                    derived
                        .as_ref()
                        .and_then(|values| values.get(name))
                        .ok_or_else(|| missing(name))?
                }
            };
            resolved.insert(name, value);
        }
        Ok(resolved)
    }

    fn resolve_constants(
        &self,
        interaction: &str,
        potential: &dyn Potential,
        explicit: &ValueMap,
    ) -> Result<ValueMap, ForceFieldError> {
        let mut resolved = ValueMap::new();
        for &name in potential.constant_names() {
            let value = explicit
                .get(name)
                .or_else(|| self.constants.constant(name))
                .ok_or_else(|| ForceFieldError::MissingConstant {
                    interaction: interaction.to_string(),
                    constant: name.to_string(),
                })?;
            resolved.insert(name, value);
        }
        Ok(resolved)
    }
}

fn warn_undeclared(interaction: &str, kind: &str, explicit: &ValueMap, declared: &[&str]) {
    for name in explicit.names().filter(|name| !declared.contains(name)) {
        warn!(
            "Ignoring {} '{}' supplied for interaction '{}': the potential does not declare it.",
            kind, name, interaction
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::atom_type::AttributeError;
    use crate::core::forcefield::constants::ConstantTable;
    use crate::core::forcefield::potentials::{Coulombic, Harmonic, LennardJones};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn oxygen() -> AtomType {
        AtomType::new(
            "Oxygen",
            "OW",
            15.9994,
            [("charge", -0.8476), ("sigma", 0.3166), ("epsilon", 0.65016)],
        )
    }

    fn hydrogen() -> AtomType {
        AtomType::new("Hydrogen", "HW", 1.008, [("charge", 0.4238)])
    }

    #[derive(Debug, Default)]
    struct CountingPotential {
        calls: AtomicUsize,
    }

    impl Potential for CountingPotential {
        fn name(&self) -> &str {
            "counting"
        }
        fn parameter_names(&self) -> &[&'static str] {
            &["a", "b", "c"]
        }
        fn constant_names(&self) -> &[&'static str] {
            &[]
        }
        fn force(&self, _x: f64, _p: &ValueMap, _c: &ValueMap) -> f64 {
            0.0
        }
        fn energy(&self, _x: f64, _p: &ValueMap, _c: &ValueMap) -> f64 {
            0.0
        }
        fn derive_parameters(
            &self,
            _atom_types: &[&AtomType],
        ) -> Option<Result<ValueMap, AttributeError>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Some(Ok(ValueMap::from([("a", 1.0), ("b", 2.0)])))
        }
    }

    #[test]
    fn derives_lennard_jones_parameters_from_atom_types() {
        let table = ConstantTable::default();
        let o = oxygen();
        let resolved = ParameterResolver::new(&table)
            .resolve("O-O", &LennardJones, &[&o, &o], &ValueMap::new(), &ValueMap::new())
            .unwrap();
        assert_eq!(resolved.parameters, ValueMap::from([("sigma", 0.3166), ("epsilon", 0.65016)]));
        assert!(resolved.constants.is_empty());
    }

    #[test]
    fn explicit_parameter_wins_over_derivation() {
        let table = ConstantTable::default();
        let o = oxygen();
        let explicit = ValueMap::from([("sigma", 0.25)]);
        let resolved = ParameterResolver::new(&table)
            .resolve("O-O", &LennardJones, &[&o, &o], &explicit, &ValueMap::new())
            .unwrap();
        assert_eq!(resolved.parameters["sigma"], 0.25);
        assert_eq!(resolved.parameters["epsilon"], 0.65016);
    }

    #[test]
    fn constants_come_from_table_unless_overridden() {
        let table = ConstantTable::default();
        let (o, h) = (oxygen(), hydrogen());
        let explicit = ValueMap::from([("epsilon_r", 80.0)]);
        let resolved = ParameterResolver::new(&table)
            .resolve("O-H", &Coulombic, &[&o, &h], &ValueMap::new(), &explicit)
            .unwrap();
        assert_eq!(resolved.constants["ecf"], 138.935458);
        assert_eq!(resolved.constants["epsilon_r"], 80.0);
        assert!(resolved.parameters.has_exactly(&["charge_product"]));
    }

    #[test]
    fn missing_constant_is_reported_by_name() {
        let table = ConstantTable::empty().with("ecf", 1.0);
        let (o, h) = (oxygen(), hydrogen());
        let result = ParameterResolver::new(&table).resolve(
            "O-H",
            &Coulombic,
            &[&o, &h],
            &ValueMap::new(),
            &ValueMap::new(),
        );
        assert_eq!(
            result,
            Err(ForceFieldError::MissingConstant {
                interaction: "O-H".to_string(),
                constant: "epsilon_r".to_string(),
            })
        );
    }

    #[test]
    fn non_derivable_potential_requires_every_parameter() {
        let table = ConstantTable::default();
        let (o, h) = (oxygen(), hydrogen());
        let explicit = ValueMap::from([("eq", 0.1)]);
        let result = ParameterResolver::new(&table).resolve(
            "O-H Bond",
            &Harmonic,
            &[&o, &h],
            &explicit,
            &ValueMap::new(),
        );
        assert_eq!(
            result,
            Err(ForceFieldError::MissingParameter {
                interaction: "O-H Bond".to_string(),
                parameter: "k".to_string(),
            })
        );
    }

    #[test]
    fn failed_derivation_carries_attribute_error() {
        let table = ConstantTable::default();
        let h = hydrogen();
        let result = ParameterResolver::new(&table).resolve(
            "H-H Dispersion",
            &LennardJones,
            &[&h, &h],
            &ValueMap::new(),
            &ValueMap::new(),
        );
        match result {
            Err(ForceFieldError::ParameterDerivation {
                interaction,
                potential,
                source,
            }) => {
                assert_eq!(interaction, "H-H Dispersion");
                assert_eq!(potential, "lennard_jones");
                assert!(matches!(source, AttributeError::Missing { .. }));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fully_explicit_parameters_skip_derivation() {
        let table = ConstantTable::default();
        let h = hydrogen();
        let explicit = ValueMap::from([("sigma", 0.1), ("epsilon", 0.2)]);
        let resolved = ParameterResolver::new(&table)
            .resolve("H-H", &LennardJones, &[&h, &h], &explicit, &ValueMap::new())
            .unwrap();
        assert_eq!(resolved.parameters, explicit);
    }

    #[test]
    fn derivation_runs_once_and_reports_names_it_omits() {
        let table = ConstantTable::default();
        let o = oxygen();
        let potential = CountingPotential::default();
        let result = ParameterResolver::new(&table).resolve(
            "counted",
            &potential,
            &[&o, &o],
            &ValueMap::new(),
            &ValueMap::new(),
        );
        assert_eq!(potential.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            result,
            Err(ForceFieldError::MissingParameter {
                interaction: "counted".to_string(),
                parameter: "c".to_string(),
            })
        );
    }

    #[test]
    fn undeclared_overrides_are_ignored() {
        let table = ConstantTable::default();
        let o = oxygen();
        let explicit = ValueMap::from([("k", 5.0)]);
        let resolved = ParameterResolver::new(&table)
            .resolve("O-O", &LennardJones, &[&o, &o], &explicit, &explicit)
            .unwrap();
        assert!(resolved.parameters.has_exactly(&["epsilon", "sigma"]));
        assert!(resolved.constants.is_empty());
    }

    #[test]
    fn resolution_is_deterministic() {
        let table = ConstantTable::default();
        let (o, h) = (oxygen(), hydrogen());
        let resolver = ParameterResolver::new(&table);
        let first = resolver
            .resolve("O-H", &Coulombic, &[&o, &h], &ValueMap::new(), &ValueMap::new())
            .unwrap();
        let second = resolver
            .resolve("O-H", &Coulombic, &[&o, &h], &ValueMap::new(), &ValueMap::new())
            .unwrap();
        assert_eq!(first, second);
    }
}
