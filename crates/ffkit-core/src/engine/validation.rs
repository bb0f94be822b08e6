use super::config::ValidationConfig;
use crate::core::forcefield::interaction::InteractionType;
use crate::core::forcefield::registry::ForceField;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Distance factor used to sample just beyond a cutoff.
const BEYOND_CUTOFF_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Force,
    Energy,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Force => write!(f, "force"),
            Quantity::Energy => write!(f, "energy"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IssueKind {
    #[error("resolved {kind}s {actual:?} do not match the declared {expected:?}")]
    KeyMismatch {
        kind: &'static str,
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("only {count} atom type(s) participate")]
    TooFewAtomTypes { count: usize },
    #[error("{quantity} is not finite at x = {x} (got {value})")]
    NonFinite {
        quantity: Quantity,
        x: f64,
        value: f64,
    },
    #[error("{quantity} is {value} at x = {x}, beyond the cutoff")]
    NonZeroBeyondCutoff {
        quantity: Quantity,
        x: f64,
        value: f64,
    },
    #[error("energy at the cutoff {cutoff} is {energy}, outside tolerance {tolerance}")]
    UnshiftedCutoff {
        cutoff: f64,
        energy: f64,
        tolerance: f64,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{interaction}: {kind}")]
pub struct ValidationIssue {
    pub interaction: String,
    pub kind: IssueKind,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub force_field: String,
    pub interactions_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Runs the consistency battery over every interaction of `force_field`.
///
/// Checks run independently per interaction; every failure is collected and
/// the issues are reported in interaction definition order.
#[instrument(skip_all, name = "validation_task", fields(force_field = %force_field.name()))]
pub fn validate(force_field: &ForceField, config: &ValidationConfig) -> ValidationReport {
    let interactions: Vec<&InteractionType> = force_field.interaction_types().collect();
    info!(interactions = interactions.len(), "Validating force field.");

    #[cfg(not(feature = "parallel"))]
    let iterator = interactions.iter();

    #[cfg(feature = "parallel")]
    let iterator = interactions.par_iter();

    let per_interaction: Vec<Vec<ValidationIssue>> = iterator
        .map(|interaction| check_interaction(interaction, config))
        .collect();

    let issues: Vec<ValidationIssue> = per_interaction.into_iter().flatten().collect();
    info!(issues = issues.len(), "Validation finished.");

    ValidationReport {
        force_field: force_field.name().to_string(),
        interactions_checked: interactions.len(),
        issues,
    }
}

fn check_interaction(
    interaction: &InteractionType,
    config: &ValidationConfig,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let potential = interaction.potential();

    for (kind, declared, resolved) in [
        ("parameter", potential.parameter_names(), interaction.parameters()),
        ("constant", potential.constant_names(), interaction.constants()),
    ] {
        if !resolved.has_exactly(declared) {
            let mut expected: Vec<String> = declared.iter().map(|s| s.to_string()).collect();
            expected.sort();
            issues.push(IssueKind::KeyMismatch {
                kind,
                expected,
                actual: resolved.names().map(str::to_string).collect(),
            });
        }
    }

    let count = interaction.atom_types().len();
    if count < 2 {
        issues.push(IssueKind::TooFewAtomTypes { count });
    }

    for &x in &config.probe_distances {
        for (quantity, value) in [
            (Quantity::Force, interaction.force(x)),
            (Quantity::Energy, interaction.energy(x)),
        ] {
            if !value.is_finite() {
                issues.push(IssueKind::NonFinite { quantity, x, value });
            }
        }
    }

    if let Some(cutoff) = interaction.cutoff() {
        let beyond = config
            .probe_distances
            .iter()
            .copied()
            .filter(|&x| x > cutoff)
            .chain(std::iter::once(cutoff * BEYOND_CUTOFF_FACTOR));
        for x in beyond {
            for (quantity, value) in [
                (Quantity::Force, interaction.force(x)),
                (Quantity::Energy, interaction.energy(x)),
            ] {
                if value != 0.0 {
                    issues.push(IssueKind::NonZeroBeyondCutoff { quantity, x, value });
                }
            }
        }

        let energy = interaction.energy(cutoff);
        if !(energy.abs() <= config.tolerance) {
            issues.push(IssueKind::UnshiftedCutoff {
                cutoff,
                energy,
                tolerance: config.tolerance,
            });
        }
    }

    debug!(
        interaction = interaction.name(),
        issues = issues.len(),
        "Checked interaction."
    );
    issues
        .into_iter()
        .map(|kind| ValidationIssue {
            interaction: interaction.name().to_string(),
            kind,
        })
        .collect()
}
