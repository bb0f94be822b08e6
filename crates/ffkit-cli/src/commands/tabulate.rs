use crate::cli::TabulateArgs;
use crate::config::PartialCliConfig;
use crate::error::{CliError, Result};
use crate::model::load_model;
use ffkit::engine::tabulation::{Sample, tabulate};
use std::io::Write;
use tracing::info;

pub fn run<W: Write>(args: &TabulateArgs, out: &mut W) -> Result<()> {
    let config = PartialCliConfig::load(args.config.as_deref())?.merge_tabulate(args)?;
    let ff = load_model(&args.model)?;

    let interaction = ff.interaction_type(&args.interaction).ok_or_else(|| {
        let available: Vec<&str> = ff.interaction_types().map(|i| i.name()).collect();
        CliError::Argument(format!(
            "Force field '{}' has no interaction type '{}'. Available: {}",
            ff.name(),
            args.interaction,
            available.join(", ")
        ))
    })?;

    let samples = tabulate(interaction, &config);
    match &args.output {
        Some(path) => {
            write_samples(&samples, csv::Writer::from_path(path)?)?;
            info!("Wrote {} samples to {:?}", samples.len(), path);
        }
        None => write_samples(&samples, csv::Writer::from_writer(out))?,
    }
    Ok(())
}

fn write_samples<W: Write>(samples: &[Sample], mut writer: csv::Writer<W>) -> Result<()> {
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}
