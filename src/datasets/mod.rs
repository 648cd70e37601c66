use std::fmt::Display;

///  The PsyTAR dataset
pub mod psytar;

/// The Dataset enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dataset {
    /// PsyTAR psychiatric treatment adverse reactions corpus
    #[default]
    PsyTar,
}

impl Dataset {
    /// Indicator columns of the sentence sheet, in binary output order
    pub fn entity_types(&self) -> Vec<String> {
        match self {
            Dataset::PsyTar => psytar::ENTITY_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Entity types with excerpt sheets, in tagging order
    pub fn annotated_types(&self) -> Vec<String> {
        match self {
            Dataset::PsyTar => psytar::ANNOTATED_TYPES
                .iter()
                .map(|t| t.to_string())
                .collect(),
        }
    }
}

impl TryFrom<&str> for Dataset {
    type Error = DatasetError;

    /// Try to convert a string to a Dataset
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.to_lowercase() == psytar::DATASET {
            Ok(Dataset::PsyTar)
        } else {
            Err(Self::Error::Unknown(value.to_string()))
        }
    }
}

impl Display for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Dataset::PsyTar => psytar::DATASET,
        };

        write!(f, "{}", name)
    }
}

/// Dataset Error
#[derive(thiserror::Error, Debug)]
pub enum DatasetError {
    /// No dataset found for the given string
    #[error("no dataset found for {0}")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_dataset_names() {
        assert_eq!(Dataset::try_from("PsyTAR").unwrap(), Dataset::PsyTar);
        assert_eq!(Dataset::PsyTar.to_string(), "psytar");
        assert!(Dataset::try_from("snips").is_err());
    }

    #[test]
    fn annotated_types_are_indicator_columns() {
        let all = Dataset::PsyTar.entity_types();

        assert!(Dataset::PsyTar
            .annotated_types()
            .iter()
            .all(|t| all.contains(t)));
    }
}
