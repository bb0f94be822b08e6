//! Built-in three-site water models.
//!
//! Every model defines an oxygen (`Oxygen`/`OW`) and a hydrogen
//! (`Hydrogen`/`HW`) atom type, Coulombic interactions between all site pairs
//! and Lennard-Jones dispersion between oxygens, all truncated at 1 nm.
//! Flexible models add a harmonic O-H bond and either a harmonic H-O-H angle
//! or, for TIP3P_PW, a harmonic H-H pseudobond.
//!
//! Lengths are in nm, energies in kJ/mol, charges in e and angles in radians.
//! Model-specific corrections applied outside the pair potentials (such as
//! the SPC/E polarization self-energy) are not part of these definitions.

use crate::core::forcefield::decomposition::Decomposition;
use crate::core::forcefield::error::ForceFieldError;
use crate::core::forcefield::interaction::InteractionDefinition;
use crate::core::forcefield::potentials::{Coulombic, Harmonic, LennardJones};
use crate::core::forcefield::registry::ForceField;
use phf::{Map, phf_map};

const OXYGEN_MASS: f64 = 15.9994;
const HYDROGEN_MASS: f64 = 1.008;
const NONBONDED_CUTOFF: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Bending {
    Angle { k: f64, eq: f64 },
    Pseudobond { k: f64, eq: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct WaterParameters {
    name: &'static str,
    flexible: bool,
    oxygen_charge: f64,
    hydrogen_charge: f64,
    sigma: f64,
    epsilon: f64,
    bond: Option<(f64, f64)>,
    bending: Option<Bending>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaterModel {
    Fba,
    Opc3,
    SpcE,
    SpcFw,
    Tip3pEw,
    Tip3pFb,
    Tip3pFs,
    Tip3pPw,
}

static WATER_MODEL_ALIASES: Map<&'static str, WaterModel> = phf_map! {
    "fba" => WaterModel::Fba, "fba/ε" => WaterModel::Fba, "fba/eps" => WaterModel::Fba,
    "opc3" => WaterModel::Opc3,
    "spc/e" => WaterModel::SpcE, "spc_e" => WaterModel::SpcE, "spce" => WaterModel::SpcE,
    "spc/fw" => WaterModel::SpcFw, "spc_fw" => WaterModel::SpcFw, "spcfw" => WaterModel::SpcFw,
    "tip3p-ew" => WaterModel::Tip3pEw, "tip3p_ew" => WaterModel::Tip3pEw,
    "tip3p-fb" => WaterModel::Tip3pFb, "tip3p_fb" => WaterModel::Tip3pFb,
    "tip3p-fs" => WaterModel::Tip3pFs, "tip3p_fs" => WaterModel::Tip3pFs,
    "tip3p_pw" => WaterModel::Tip3pPw, "tip3p-pw" => WaterModel::Tip3pPw,
};

impl WaterModel {
    pub const ALL: [WaterModel; 8] = [
        WaterModel::Fba,
        WaterModel::Opc3,
        WaterModel::SpcE,
        WaterModel::SpcFw,
        WaterModel::Tip3pEw,
        WaterModel::Tip3pFb,
        WaterModel::Tip3pFs,
        WaterModel::Tip3pPw,
    ];

    /// Finds a model by its display name or a common alias, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        WATER_MODEL_ALIASES
            .get(name.trim().to_lowercase().as_str())
            .copied()
    }

    pub fn name(self) -> &'static str {
        self.parameters().name
    }

    pub fn is_flexible(self) -> bool {
        self.parameters().flexible
    }

    fn parameters(self) -> WaterParameters {
        match self {
            WaterModel::Fba => WaterParameters {
                name: "FBA/ε",
                flexible: true,
                oxygen_charge: -0.845,
                hydrogen_charge: 0.4225,
                sigma: 0.31776,
                epsilon: 0.79232,
                bond: Some((300_000.0, 0.1027)),
                bending: Some(Bending::Angle {
                    k: 383.00,
                    eq: 2.00189,
                }),
            },
            WaterModel::Opc3 => WaterParameters {
                name: "OPC3",
                flexible: false,
                oxygen_charge: -0.8952,
                hydrogen_charge: 0.4476,
                sigma: 0.31743,
                epsilon: 0.68369,
                bond: None,
                bending: None,
            },
            WaterModel::SpcE => WaterParameters {
                name: "SPC/E",
                flexible: false,
                oxygen_charge: -0.8476,
                hydrogen_charge: 0.4238,
                sigma: 0.3166,
                epsilon: 0.65016,
                bond: None,
                bending: None,
            },
            WaterModel::SpcFw => WaterParameters {
                name: "SPC/Fw",
                flexible: true,
                oxygen_charge: -0.82,
                hydrogen_charge: 0.41,
                sigma: 0.31655,
                epsilon: 0.6503,
                bond: Some((423_664.0, 0.1012)),
                bending: Some(Bending::Angle {
                    k: 317.56,
                    eq: 1.97641,
                }),
            },
            WaterModel::Tip3pEw => WaterParameters {
                name: "TIP3P-EW",
                flexible: false,
                oxygen_charge: -0.834,
                hydrogen_charge: 0.417,
                sigma: 0.3188,
                epsilon: 0.427,
                bond: None,
                bending: None,
            },
            WaterModel::Tip3pFb => WaterParameters {
                name: "TIP3P-FB",
                flexible: false,
                oxygen_charge: -0.8484,
                hydrogen_charge: 0.4242,
                sigma: 0.3178,
                epsilon: 0.65214,
                bond: None,
                bending: None,
            },
            WaterModel::Tip3pFs => WaterParameters {
                name: "TIP3P-Fs",
                flexible: true,
                oxygen_charge: -0.834,
                hydrogen_charge: 0.417,
                sigma: 0.31507,
                epsilon: 0.63639,
                bond: Some((502_416.0, 0.09572)),
                bending: Some(Bending::Angle {
                    k: 628.02,
                    eq: 1.82422,
                }),
            },
            // Emulates TIP3P without an explicit angle term: the H-H
            // pseudobond holds the molecular geometry instead.
            WaterModel::Tip3pPw => WaterParameters {
                name: "TIP3P_PW",
                flexible: true,
                oxygen_charge: -0.834,
                hydrogen_charge: 0.417,
                sigma: 0.31507,
                epsilon: 0.63639,
                bond: Some((502_416.0, 0.09572)),
                bending: Some(Bending::Pseudobond {
                    k: 145_330.0,
                    eq: 0.15139,
                }),
            },
        }
    }

    /// Builds the force field for this model with the default constant table.
    pub fn build(self) -> Result<ForceField, ForceFieldError> {
        let params = self.parameters();
        let mut ff = ForceField::new(params.name);
        ff.set_flexible(params.flexible);

        ff.define_atom_type(
            "Oxygen",
            "OW",
            OXYGEN_MASS,
            [
                ("charge", params.oxygen_charge),
                ("sigma", params.sigma),
                ("epsilon", params.epsilon),
            ],
        )?;
        ff.define_atom_type(
            "Hydrogen",
            "HW",
            HYDROGEN_MASS,
            [("charge", params.hydrogen_charge)],
        )?;

        if let Some((k, eq)) = params.bond {
            ff.define_interaction_type(
                InteractionDefinition::new(
                    "O-H Bond",
                    "Bond Stretching",
                    Harmonic,
                    Decomposition::Bond,
                )
                .bonded(true)
                .atom_types(["OW", "HW"])
                .parameter("k", k)
                .parameter("eq", eq),
            )?;
        }
        match params.bending {
            Some(Bending::Angle { k, eq }) => {
                ff.define_interaction_type(
                    InteractionDefinition::new(
                        "H-O-H Angle",
                        "Angle Bending",
                        Harmonic,
                        Decomposition::Angle,
                    )
                    .bonded(true)
                    .atom_types(["HW", "OW", "HW"])
                    .parameter("k", k)
                    .parameter("eq", eq),
                )?;
            }
            Some(Bending::Pseudobond { k, eq }) => {
                ff.define_interaction_type(
                    InteractionDefinition::new(
                        "H-H Pseudobond",
                        "Bond Stretching",
                        Harmonic,
                        Decomposition::Bond,
                    )
                    .bonded(true)
                    .atom_types(["HW", "HW"])
                    .parameter("k", k)
                    .parameter("eq", eq),
                )?;
            }
            None => {}
        }

        for (name, atoms) in [
            ("H-H Electrostatic", ["HW", "HW"]),
            ("O-H Electrostatic", ["OW", "HW"]),
            ("O-O Electrostatic", ["OW", "OW"]),
        ] {
            ff.define_interaction_type(
                InteractionDefinition::new(
                    name,
                    "Electrostatic",
                    Coulombic,
                    Decomposition::Pairwise,
                )
                .atom_types(atoms)
                .cutoff(NONBONDED_CUTOFF),
            )?;
        }
        ff.define_interaction_type(
            InteractionDefinition::new(
                "O-O Dispersion",
                "Dispersion",
                LennardJones,
                Decomposition::Pairwise,
            )
            .atom_types(["OW", "OW"])
            .cutoff(NONBONDED_CUTOFF),
        )?;

        Ok(ff)
    }
}

/// Builds a built-in model by name or alias.
///
/// Returns `None` if no model matches `name`.
pub fn by_name(name: &str) -> Option<Result<ForceField, ForceFieldError>> {
    WaterModel::from_name(name).map(WaterModel::build)
}

/// Builds every built-in model, in a fixed order.
pub fn all() -> Result<Vec<ForceField>, ForceFieldError> {
    WaterModel::ALL.iter().map(|model| model.build()).collect()
}
