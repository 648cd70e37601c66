use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fractional row sampling
pub mod sample;

/// Shuffled-list slicing
pub mod shuffle;

/// The unique string token for the fractional sampling strategy
pub static SAMPLE: &str = "sample";

/// The unique string token for the shuffle slicing strategy
pub static SHUFFLE: &str = "shuffle";

/// Names of the emitted splits
pub static SPLITS: [&str; 3] = ["train", "dev", "test"];

/// How a corpus is divided into train, dev and test
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Sample 70% for train, then 66% of the rest for test; the remainder is dev
    Sample,

    /// Shuffle, then cut at 70% and 80% of the whole hundreds
    #[default]
    Shuffle,
}

impl TryFrom<&str> for Strategy {
    type Error = StrategyError;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value.to_lowercase() {
            v if v == SAMPLE => Ok(Strategy::Sample),
            v if v == SHUFFLE => Ok(Strategy::Shuffle),
            _ => Err(StrategyError::Unknown(value.to_string())),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Strategy::Sample => SAMPLE,
            Strategy::Shuffle => SHUFFLE,
        };

        write!(f, "{}", name)
    }
}

/// Strategy Error
#[derive(thiserror::Error, Debug)]
pub enum StrategyError {
    /// No strategy found for the given string
    #[error("no split strategy found for {0}")]
    Unknown(String),
}

/// Fixed seeds for every random draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Seeds {
    /// Seed for the train sample
    pub train: u64,

    /// Seed for the test sample drawn from what train left over
    pub test: u64,

    /// Seed for the full-list shuffle
    pub shuffle: u64,
}

impl Default for Seeds {
    fn default() -> Self {
        Self {
            train: 42,
            test: 1337,
            shuffle: 42,
        }
    }
}

/// Three disjoint subsets of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    /// Training items
    pub train: Vec<T>,

    /// Development items
    pub dev: Vec<T>,

    /// Test items
    pub test: Vec<T>,
}

impl<T> Partition<T> {
    /// Assemble a partition, failing when the sizes do not add up to `total`
    pub fn checked(train: Vec<T>, dev: Vec<T>, test: Vec<T>, total: usize) -> Result<Self> {
        if train.len() + dev.len() + test.len() != total {
            return Err(Error::PartitionSizeMismatch {
                train: train.len(),
                dev: dev.len(),
                test: test.len(),
                total,
            });
        }

        Ok(Self { train, dev, test })
    }

    /// The subsets paired with their names, in `train`, `dev`, `test` order
    pub fn named(&self) -> [(&'static str, &[T]); 3] {
        [
            (SPLITS[0], self.train.as_slice()),
            (SPLITS[1], self.dev.as_slice()),
            (SPLITS[2], self.test.as_slice()),
        ]
    }

    /// Total number of items
    pub fn len(&self) -> usize {
        self.train.len() + self.dev.len() + self.test.len()
    }

    /// Whether all subsets are empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split `items` with the given strategy
pub fn partition<T>(items: Vec<T>, strategy: Strategy, seeds: &Seeds) -> Result<Partition<T>> {
    let partition = match strategy {
        Strategy::Sample => sample::split(items, seeds.train, seeds.test)?,
        Strategy::Shuffle => shuffle::split(items, seeds.shuffle)?,
    };

    log::info!(
        "Split with {}: {} train, {} dev, {} test",
        strategy,
        partition.train.len(),
        partition.dev.len(),
        partition.test.len()
    );

    Ok(partition)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_strategy_names() {
        assert_eq!(Strategy::try_from("Sample").unwrap(), Strategy::Sample);
        assert_eq!(Strategy::try_from("shuffle").unwrap(), Strategy::Shuffle);
        assert!(Strategy::try_from("kfold").is_err());
        assert_eq!(Strategy::Sample.to_string(), "sample");
    }

    #[test]
    fn rejects_mismatched_sizes() {
        let err = Partition::checked(vec![1, 2], vec![3], vec![], 4).unwrap_err();

        assert!(matches!(
            err,
            Error::PartitionSizeMismatch {
                train: 2,
                dev: 1,
                test: 0,
                total: 4
            }
        ));
    }

    #[test]
    fn both_strategies_cover_the_input_once() {
        for strategy in [Strategy::Sample, Strategy::Shuffle] {
            let items: Vec<usize> = (0..257).collect();
            let split = partition(items, strategy, &Seeds::default()).unwrap();

            let mut all: Vec<usize> = split
                .named()
                .iter()
                .flat_map(|(_, s)| s.to_vec())
                .collect();
            all.sort_unstable();

            assert_eq!(all, (0..257).collect::<Vec<_>>(), "{}", strategy);
        }
    }
}
