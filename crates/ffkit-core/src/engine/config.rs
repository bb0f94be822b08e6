use thiserror::Error;

pub const DEFAULT_PROBE_DISTANCES: [f64; 5] = [0.8, 0.9, 1.0, 1.1, 1.2];
pub const DEFAULT_TOLERANCE: f64 = 1e-8;
/// Largest grid a tabulation may request.
pub const MAX_SAMPLES: usize = 1_000_000;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationConfig {
    /// Distances at which `F` and `U` must be finite.
    pub probe_distances: Vec<f64>,
    /// Largest accepted `|U(cutoff)|`.
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            probe_distances: DEFAULT_PROBE_DISTANCES.to_vec(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// An inclusive distance grid. Only [`TabulationConfigBuilder`] creates one,
/// so the grid is always non-empty and at most [`MAX_SAMPLES`] points long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TabulationConfig {
    start: f64,
    end: f64,
    step: f64,
    sample_count: usize,
}

impl TabulationConfig {
    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points in `start..=end`.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn point(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }
}

const GRID_EPSILON: f64 = 1e-9;

#[derive(Default)]
pub struct ValidationConfigBuilder {
    probe_distances: Option<Vec<f64>>,
    tolerance: Option<f64>,
}

impl ValidationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe_distances(mut self, distances: Vec<f64>) -> Self {
        self.probe_distances = Some(distances);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<ValidationConfig, ConfigError> {
        let defaults = ValidationConfig::default();
        let probe_distances = self.probe_distances.unwrap_or(defaults.probe_distances);
        let tolerance = self.tolerance.unwrap_or(defaults.tolerance);

        if probe_distances.is_empty() {
            return Err(ConfigError::InvalidValue {
                parameter: "probe_distances",
                reason: "at least one distance is required".to_string(),
            });
        }
        if let Some(bad) = probe_distances.iter().find(|x| !(x.is_finite() && **x > 0.0)) {
            return Err(ConfigError::InvalidValue {
                parameter: "probe_distances",
                reason: format!("{} is not a positive finite distance", bad),
            });
        }
        if !(tolerance.is_finite() && tolerance >= 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "tolerance",
                reason: format!("{} is not a non-negative finite number", tolerance),
            });
        }

        Ok(ValidationConfig {
            probe_distances,
            tolerance,
        })
    }
}

#[derive(Default)]
pub struct TabulationConfigBuilder {
    start: Option<f64>,
    end: Option<f64>,
    step: Option<f64>,
}

impl TabulationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: f64) -> Self {
        self.start = Some(start);
        self
    }
    pub fn end(mut self, end: f64) -> Self {
        self.end = Some(end);
        self
    }
    pub fn step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn build(self) -> Result<TabulationConfig, ConfigError> {
        let start = self.start.ok_or(ConfigError::MissingParameter("start"))?;
        let end = self.end.ok_or(ConfigError::MissingParameter("end"))?;
        let step = self.step.ok_or(ConfigError::MissingParameter("step"))?;

        if !(start.is_finite() && start > 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "start",
                reason: format!("{} must be positive and finite", start),
            });
        }
        if !(end.is_finite() && end > start) {
            return Err(ConfigError::InvalidValue {
                parameter: "end",
                reason: format!("{} must be finite and greater than start ({})", end, start),
            });
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(ConfigError::InvalidValue {
                parameter: "step",
                reason: format!("{} must be positive and finite", step),
            });
        }

        let intervals = ((end - start) / step + GRID_EPSILON).floor();
        let sample_count = Some(intervals)
            .filter(|n| *n < MAX_SAMPLES as f64)
            .and_then(|n| (n as usize).checked_add(1))
            .ok_or_else(|| ConfigError::InvalidValue {
                parameter: "step",
                reason: format!(
                    "{} yields more than {} grid points between {} and {}",
                    step, MAX_SAMPLES, start, end
                ),
            })?;

        Ok(TabulationConfig {
            start,
            end,
            step,
            sample_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_builder_uses_defaults() {
        let config = ValidationConfigBuilder::new().build().unwrap();
        assert_eq!(config, ValidationConfig::default());
        assert_eq!(config.probe_distances, vec![0.8, 0.9, 1.0, 1.1, 1.2]);
        assert_eq!(config.tolerance, 1e-8);
    }

    #[test]
    fn validation_builder_rejects_bad_values() {
        let empty = ValidationConfigBuilder::new().probe_distances(vec![]).build();
        assert!(matches!(
            empty,
            Err(ConfigError::InvalidValue { parameter: "probe_distances", .. })
        ));

        let negative = ValidationConfigBuilder::new()
            .probe_distances(vec![0.5, -1.0])
            .build();
        assert!(matches!(
            negative,
            Err(ConfigError::InvalidValue { parameter: "probe_distances", .. })
        ));

        let tolerance = ValidationConfigBuilder::new().tolerance(f64::NAN).build();
        assert!(matches!(
            tolerance,
            Err(ConfigError::InvalidValue { parameter: "tolerance", .. })
        ));
    }

    #[test]
    fn tabulation_builder_requires_every_field() {
        let result = TabulationConfigBuilder::new().start(0.1).end(1.0).build();
        assert_eq!(result, Err(ConfigError::MissingParameter("step")));
    }

    #[test]
    fn tabulation_builder_validates_range() {
        let zero_start = TabulationConfigBuilder::new().start(0.0).end(1.0).step(0.1).build();
        assert!(matches!(
            zero_start,
            Err(ConfigError::InvalidValue { parameter: "start", .. })
        ));

        let reversed = TabulationConfigBuilder::new().start(1.0).end(0.5).step(0.1).build();
        assert!(matches!(
            reversed,
            Err(ConfigError::InvalidValue { parameter: "end", .. })
        ));

        let zero_step = TabulationConfigBuilder::new().start(0.1).end(1.0).step(0.0).build();
        assert!(matches!(
            zero_step,
            Err(ConfigError::InvalidValue { parameter: "step", .. })
        ));
    }

    #[test]
    fn tabulation_builder_rejects_oversized_grids() {
        for step in [1e-300, 1e-12, 1e-7] {
            let result = TabulationConfigBuilder::new()
                .start(0.1)
                .end(1.0)
                .step(step)
                .build();
            assert!(
                matches!(result, Err(ConfigError::InvalidValue { parameter: "step", .. })),
                "step {} was accepted",
                step
            );
        }

        let largest = TabulationConfigBuilder::new()
            .start(1.0)
            .end(2.0)
            .step(1.0 / (MAX_SAMPLES - 1) as f64)
            .build()
            .unwrap();
        assert_eq!(largest.sample_count(), MAX_SAMPLES);
        assert_eq!(largest.start(), 1.0);
        assert_eq!(largest.end(), 2.0);
    }

    #[test]
    fn grid_includes_end_point_despite_rounding() {
        let config = TabulationConfigBuilder::new()
            .start(0.1)
            .end(1.0)
            .step(0.1)
            .build()
            .unwrap();
        assert_eq!(config.sample_count(), 10);
        assert!((config.point(9) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn grid_stops_before_partial_step() {
        let config = TabulationConfigBuilder::new()
            .start(0.5)
            .end(1.0)
            .step(0.2)
            .build()
            .unwrap();
        assert_eq!(config.sample_count(), 3);
        assert!((config.point(2) - 0.9).abs() < 1e-12);
    }
}
