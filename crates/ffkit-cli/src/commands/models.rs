use crate::error::Result;
use ffkit::core::models::water::WaterModel;
use std::io::Write;
use tracing::info;

pub fn run<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "{:<10} {:>8} {:>11} {:>13}",
        "MODEL", "FLEXIBLE", "ATOM TYPES", "INTERACTIONS"
    )?;
    for model in WaterModel::ALL {
        let ff = model.build()?;
        writeln!(
            out,
            "{:<10} {:>8} {:>11} {:>13}",
            ff.name(),
            if ff.is_flexible() { "yes" } else { "no" },
            ff.atom_type_count(),
            ff.interaction_type_count()
        )?;
    }
    info!("Listed {} built-in models.", WaterModel::ALL.len());
    Ok(())
}
