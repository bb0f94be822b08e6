use crate::error::{CliError, Result};
use ffkit::core::forcefield::registry::ForceField;
use ffkit::core::models::water;
use std::path::Path;
use tracing::debug;

/// Resolves a built-in model name or alias, falling back to a definition file path.
pub fn load_model(name_or_path: &str) -> Result<ForceField> {
    if let Some(built) = water::by_name(name_or_path) {
        debug!("Using built-in model '{}'", name_or_path);
        return Ok(built?);
    }

    let path = Path::new(name_or_path);
    if path.is_file() {
        debug!("Loading force field definition from {:?}", path);
        return Ok(ForceField::load(path)?);
    }

    Err(CliError::Argument(format!(
        "'{}' is neither a built-in model nor a definition file.\n\
         Hint: Run 'ffkit models' to list the built-in models.",
        name_or_path
    )))
}

/// The requested models, or every built-in model when none are given.
pub fn load_models(names: &[String]) -> Result<Vec<ForceField>> {
    if names.is_empty() {
        return Ok(water::all()?);
    }
    names.iter().map(|name| load_model(name)).collect()
}
