use std::{collections::BTreeMap, fs::File, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    datasets::Dataset,
    error::Result,
    splits::{Seeds, Strategy},
};

/// Configuration for a conversion run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The dataset being converted (e.g., "psytar")
    pub dataset: String,

    /// Indicator columns written to the binary label file. Empty means the dataset's defaults.
    pub entity_types: Vec<String>,

    /// Span layers merged into the tagged output, in overwrite order. Empty means the
    /// dataset's defaults.
    pub annotated_types: Vec<String>,

    /// Annotation sheet per entity type
    pub annotations: BTreeMap<String, String>,

    /// How to split the valid sentences
    pub strategy: Strategy,

    /// Seeds for the split
    pub seeds: Seeds,

    /// Field delimiter of the input sheets; `binary.tsv` is always tab-separated
    pub delimiter: char,

    /// Decimal separator recorded for the binary label file
    pub decimal: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset: Dataset::default().to_string(),
            entity_types: Vec::new(),
            annotated_types: Vec::new(),
            annotations: BTreeMap::new(),
            strategy: Strategy::default(),
            seeds: Seeds::default(),
            delimiter: '\t',
            decimal: '.',
        }
    }
}

impl Config {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_yaml::from_reader(file)?;

        Ok(config)
    }

    /// Fill empty entity type lists from the dataset
    pub fn resolve(mut self, dataset: Dataset) -> Self {
        if self.entity_types.is_empty() {
            self.entity_types = dataset.entity_types();
        }

        if self.annotated_types.is_empty() {
            self.annotated_types = dataset.annotated_types();
        }

        self
    }

    /// The delimiter as a single byte, for the csv reader
    pub fn delimiter_byte(&self) -> u8 {
        if self.delimiter.is_ascii() {
            self.delimiter as u8
        } else {
            log::warn!(
                "Delimiter {:?} is not ASCII, falling back to tab",
                self.delimiter
            );
            b'\t'
        }
    }
}
