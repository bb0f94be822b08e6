use crate::cli::{CheckArgs, TabulateArgs};
use crate::error::{CliError, Result};
use ffkit::engine::config::{
    TabulationConfig, TabulationConfigBuilder, ValidationConfig, ValidationConfigBuilder,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_TABULATION_START: f64 = 0.1;
pub const DEFAULT_TABULATION_END: f64 = 1.2;
pub const DEFAULT_TABULATION_STEP: f64 = 0.01;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialTabulateConfig {
    start: Option<f64>,
    end: Option<f64>,
    step: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCheckConfig {
    #[serde(rename = "probe-distances")]
    probe_distances: Option<Vec<f64>>,
    tolerance: Option<f64>,
}

/// Settings read from a `--config` file. Every field is optional; command
/// line flags take precedence, then file values, then built-in defaults.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialCliConfig {
    tabulate: Option<PartialTabulateConfig>,
    check: Option<PartialCheckConfig>,
}

impl PartialCliConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn merge_tabulate(self, args: &TabulateArgs) -> Result<TabulationConfig> {
        let file = self.tabulate.unwrap_or_default();
        let config = TabulationConfigBuilder::new()
            .start(args.start.or(file.start).unwrap_or(DEFAULT_TABULATION_START))
            .end(args.end.or(file.end).unwrap_or(DEFAULT_TABULATION_END))
            .step(args.step.or(file.step).unwrap_or(DEFAULT_TABULATION_STEP))
            .build()?;
        Ok(config)
    }

    pub fn merge_check(self, args: &CheckArgs) -> Result<ValidationConfig> {
        let file = self.check.unwrap_or_default();
        let mut builder = ValidationConfigBuilder::new();
        if let Some(distances) = file.probe_distances {
            builder = builder.probe_distances(distances);
        }
        if let Some(tolerance) = args.tolerance.or(file.tolerance) {
            builder = builder.tolerance(tolerance);
        }
        Ok(builder.build()?)
    }
}
