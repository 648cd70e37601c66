use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    splits::{
        sample::{TEST_FRACTION, TRAIN_FRACTION},
        shuffle::{DEV_PERCENT, TRAIN_PERCENT},
        Partition, Seeds, Strategy,
    },
    validity::Summary,
};

static TEMPLATE: &str = r#"# {{ dataset }} CONLL splits

Split strategy: `{{ strategy }}`

{% if strategy == "sample" -%}
- train: `round({{ train_fraction }} * N)` sentences sampled with seed {{ seeds.train }}
- test: `round({{ test_fraction }} * remaining)` sentences sampled with seed {{ seeds.test }}
- dev: the remaining sentences, in input order
{%- else -%}
- shuffle seed: {{ seeds.shuffle }}
- train: shuffled `[0, (N / 100) * {{ train_percent }})`
- dev: shuffled `[train_cut, train_cut + (N / 100) * {{ dev_percent }})`
- test: the rest of the shuffled list
{%- endif %}

Input order is `(drug_id, sentence_index)` ascending. Re-running with the same seeds, strategy
and input reproduces these files exactly.

| split | sentences |
|-------|-----------|
| full | {{ total }} |
{% for split in splits -%}
| {{ split.name }} | {{ split.size }} |
{% endfor %}
## Excerpts

- attempted: {{ summary.attempts }}
- not found: {{ summary.failures }}
- sentences excluded: {{ summary.invalid_sentences }}
- rows referencing missing sentences: {{ summary.missing_references }}

Binary labels use `{{ decimal }}` as the decimal separator.
"#;

/// The size of one emitted split
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SplitSize {
    /// Split name
    pub name: String,

    /// Number of sentences
    pub size: usize,
}

/// Everything needed to reproduce and audit a run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Dataset name
    pub dataset: String,

    /// Excerpt diagnostics
    pub summary: Summary,

    /// Split strategy
    pub strategy: Strategy,

    /// Split seeds
    pub seeds: Seeds,

    /// Number of valid sentences
    pub total: usize,

    /// Split sizes, in `train`, `dev`, `test` order
    pub splits: Vec<SplitSize>,

    /// Train fraction for sampling
    pub train_fraction: f64,

    /// Test fraction of the remainder for sampling
    pub test_fraction: f64,

    /// Train percentage for slicing
    pub train_percent: usize,

    /// Dev percentage for slicing
    pub dev_percent: usize,

    /// Decimal separator of the binary label file
    pub decimal: String,
}

impl Report {
    /// Describe a partition
    pub fn new<T>(
        dataset: &str,
        summary: Summary,
        strategy: Strategy,
        seeds: Seeds,
        partition: &Partition<T>,
        decimal: char,
    ) -> Self {
        Self {
            dataset: dataset.to_string(),
            summary,
            strategy,
            seeds,
            total: partition.len(),
            splits: partition
                .named()
                .iter()
                .map(|(name, items)| SplitSize::new(name.to_string(), items.len()))
                .collect(),
            train_fraction: TRAIN_FRACTION,
            test_fraction: TEST_FRACTION,
            train_percent: TRAIN_PERCENT,
            dev_percent: DEV_PERCENT,
            decimal: decimal.to_string(),
        }
    }

    /// Render the Markdown manifest
    pub fn render(&self) -> Result<String> {
        let template = liquid::ParserBuilder::with_stdlib()
            .build()?
            .parse(TEMPLATE)?;
        let globals = liquid::to_object(self)?;

        Ok(template.render(&globals)?)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
