use crate::cli::CheckArgs;
use crate::config::PartialCliConfig;
use crate::error::{CliError, Result};
use crate::model::load_models;
use ffkit::engine::validation::validate;
use std::io::Write;
use tracing::{info, warn};

pub fn run<W: Write>(args: &CheckArgs, out: &mut W) -> Result<()> {
    let config = PartialCliConfig::load(args.config.as_deref())?.merge_check(args)?;
    let force_fields = load_models(&args.models)?;

    let mut total_issues = 0;
    for ff in &force_fields {
        let report = validate(ff, &config);
        if report.is_ok() {
            writeln!(
                out,
                "✓ {}: {} interaction type(s), no issues",
                report.force_field, report.interactions_checked
            )?;
            continue;
        }
        warn!(
            "Force field '{}' has {} validation issue(s).",
            report.force_field,
            report.issues.len()
        );
        writeln!(
            out,
            "✗ {}: {} issue(s)",
            report.force_field,
            report.issues.len()
        )?;
        for issue in &report.issues {
            writeln!(out, "    - {}", issue)?;
        }
        total_issues += report.issues.len();
    }

    info!("Checked {} force field(s).", force_fields.len());
    if total_issues > 0 {
        return Err(CliError::ValidationFailed(total_issues));
    }
    Ok(())
}
