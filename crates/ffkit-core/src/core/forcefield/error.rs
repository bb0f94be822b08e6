use super::atom_type::AttributeError;
use std::fmt;
use thiserror::Error;

/// The identifier namespace in which a duplicate was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// The unified name-and-symbol space of atom types.
    AtomType,
    /// The name space of interaction types.
    InteractionType,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierKind::AtomType => f.write_str("atom type"),
            IdentifierKind::InteractionType => f.write_str("interaction type"),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ForceFieldError {
    #[error("Duplicate {kind} identifier '{identifier}'")]
    DuplicateIdentifier {
        kind: IdentifierKind,
        identifier: String,
    },

    #[error("Atom type '{identifier}' not found")]
    UnknownAtomType { identifier: String },

    #[error(
        "Interaction '{interaction}' requires parameter '{parameter}', which was neither supplied nor derivable"
    )]
    MissingParameter {
        interaction: String,
        parameter: String,
    },

    #[error(
        "Interaction '{interaction}' requires constant '{constant}', which was neither supplied nor found in the constant table"
    )]
    MissingConstant {
        interaction: String,
        constant: String,
    },

    #[error("Potential '{potential}' does not satisfy the potential contract: {reason}")]
    UnsupportedCapability { potential: String, reason: String },

    #[error("Interaction '{interaction}' has an invalid cutoff {cutoff}; it must be positive and finite")]
    InvalidCutoff { interaction: String, cutoff: f64 },

    #[error("Failed to derive parameters of potential '{potential}' for interaction '{interaction}': {source}")]
    ParameterDerivation {
        interaction: String,
        potential: String,
        #[source]
        source: AttributeError,
    },

    #[error("Interaction '{interaction}' involves {count} atom type(s); at least two are required")]
    TooFewAtomTypes { interaction: String, count: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_identifier_message_names_kind_and_identifier() {
        let err = ForceFieldError::DuplicateIdentifier {
            kind: IdentifierKind::AtomType,
            identifier: "OW".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate atom type identifier 'OW'");
    }

    #[test]
    fn missing_parameter_message_names_interaction_and_parameter() {
        let err = ForceFieldError::MissingParameter {
            interaction: "O-H Bond".to_string(),
            parameter: "k".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("'O-H Bond'"));
        assert!(message.contains("'k'"));
    }

    #[test]
    fn parameter_derivation_exposes_attribute_error_as_source() {
        use std::error::Error;

        let err = ForceFieldError::ParameterDerivation {
            interaction: "O-O Dispersion".to_string(),
            potential: "lennard_jones".to_string(),
            source: AttributeError::Missing {
                atom_type: "Oxygen".to_string(),
                attribute: "sigma".to_string(),
            },
        };
        assert!(err.source().is_some());
    }
}
