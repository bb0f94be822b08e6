use crate::cli::ShowArgs;
use crate::error::Result;
use crate::model::load_model;
use ffkit::core::forcefield::registry::ForceField;
use std::io::Write;

pub fn run<W: Write>(args: &ShowArgs, out: &mut W) -> Result<()> {
    let ff = load_model(&args.model)?;
    describe(&ff, out)
}

fn describe<W: Write>(ff: &ForceField, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Force field: {} ({})",
        ff.name(),
        if ff.is_flexible() { "flexible" } else { "rigid" }
    )?;

    writeln!(out, "\nAtom types:")?;
    for atom_type in ff.atom_types() {
        let attributes: Vec<String> = atom_type
            .attributes()
            .map(|(name, value)| format!("{} = {}", name, value))
            .collect();
        writeln!(
            out,
            "  {} ({}), mass {}: {{{}}}",
            atom_type.name,
            atom_type.symbol,
            atom_type.mass,
            attributes.join(", ")
        )?;
    }

    writeln!(out, "\nInteraction types:")?;
    for interaction in ff.interaction_types() {
        let symbols: Vec<&str> = interaction
            .atom_types()
            .iter()
            .filter_map(|&id| ff.atom_type_by_id(id))
            .map(|atom_type| atom_type.symbol.as_str())
            .collect();
        let cutoff = match interaction.cutoff() {
            Some(cutoff) => cutoff.to_string(),
            None => "none".to_string(),
        };
        writeln!(out, "  {} [{}]", interaction.name(), interaction.category())?;
        writeln!(
            out,
            "    potential: {}, decomposition: {}, bonded: {}",
            interaction.potential().name(),
            interaction.decomposition(),
            interaction.is_bonded()
        )?;
        writeln!(out, "    atom types: {}", symbols.join(" "))?;
        writeln!(out, "    parameters: {}", interaction.parameters())?;
        writeln!(out, "    constants: {}", interaction.constants())?;
        writeln!(out, "    cutoff: {}", cutoff)?;
    }
    Ok(())
}
