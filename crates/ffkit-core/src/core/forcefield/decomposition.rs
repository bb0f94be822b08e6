use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Declarative label describing the geometry of an interaction.
///
/// The tag is carried through unchanged for a downstream simulation engine,
/// which decides how the scalar radial force is decomposed into Cartesian
/// components. Nothing in this crate interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Decomposition {
    /// Non-bonded pair interaction along the separation vector.
    Pairwise,
    /// Two-body bonded stretch.
    Bond,
    /// Three-body bending around a central atom.
    Angle,
    /// Four-body torsion.
    Dihedral,
}

impl Decomposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decomposition::Pairwise => "pairwise",
            Decomposition::Bond => "bond",
            Decomposition::Angle => "angle",
            Decomposition::Dihedral => "dihedral",
        }
    }
}

impl fmt::Display for Decomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Decomposition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pairwise" => Ok(Decomposition::Pairwise),
            "bond" => Ok(Decomposition::Bond),
            "angle" => Ok(Decomposition::Angle),
            "dihedral" => Ok(Decomposition::Dihedral),
            other => Err(format!("Unknown decomposition type: '{}'", other)),
        }
    }
}

impl TryFrom<String> for Decomposition {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_is_case_insensitive_and_trims() {
        assert_eq!(" Angle ".parse::<Decomposition>(), Ok(Decomposition::Angle));
        assert_eq!("PAIRWISE".parse::<Decomposition>(), Ok(Decomposition::Pairwise));
    }

    #[test]
    fn from_str_rejects_unknown_label() {
        assert!("improper".parse::<Decomposition>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for tag in [
            Decomposition::Pairwise,
            Decomposition::Bond,
            Decomposition::Angle,
            Decomposition::Dihedral,
        ] {
            assert_eq!(tag.to_string().parse::<Decomposition>(), Ok(tag));
        }
    }

    #[test]
    fn deserialization_accepts_what_from_str_accepts() {
        #[derive(Deserialize)]
        struct Holder {
            decomposition: Decomposition,
        }
        for (label, expected) in [
            ("dihedral", Decomposition::Dihedral),
            ("Pairwise", Decomposition::Pairwise),
            (" BOND ", Decomposition::Bond),
        ] {
            let holder: Holder =
                toml::from_str(&format!("decomposition = \"{}\"", label)).unwrap();
            assert_eq!(holder.decomposition, expected);
            assert_eq!(label.parse::<Decomposition>(), Ok(expected));
        }

        let err = toml::from_str::<Holder>("decomposition = \"improper\"")
            .err()
            .unwrap();
        assert!(err.to_string().contains("Unknown decomposition type"));
    }
}
