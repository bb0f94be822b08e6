use super::config::TabulationConfig;
use crate::core::forcefield::interaction::InteractionType;
use serde::Serialize;
use tracing::debug;

/// One grid point of a tabulated interaction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub force: f64,
    pub energy: f64,
    pub force_base: f64,
    pub energy_base: f64,
}

/// Evaluates `interaction` over the inclusive grid described by `config`.
pub fn tabulate(interaction: &InteractionType, config: &TabulationConfig) -> Vec<Sample> {
    let samples: Vec<Sample> = (0..config.sample_count())
        .map(|i| {
            let x = config.point(i);
            Sample {
                x,
                force: interaction.force(x),
                energy: interaction.energy(x),
                force_base: interaction.force_base(x),
                energy_base: interaction.energy_base(x),
            }
        })
        .collect();
    debug!(
        "Tabulated interaction '{}' at {} points",
        interaction.name(),
        samples.len()
    );
    samples
}
