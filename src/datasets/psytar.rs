use std::{collections::HashMap, fs::File, io, path::Path};

use csv::StringRecord;
use derive_new::new;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The name of the PsyTAR dataset
pub static DATASET: &str = "psytar";

/// Indicator columns on the sentence labeling sheet, in output order
pub static ENTITY_TYPES: [&str; 6] = ["ADR", "WD", "EF", "INF", "SSI", "DI"];

/// Entity types that have an `<TYPE>_Identified` sheet of excerpts, in tagging order
pub static ANNOTATED_TYPES: [&str; 4] = ["ADR", "WD", "SSI", "DI"];

/// Excerpt columns per annotation sheet when a type is not listed in `EXCERPT_COLUMNS`
pub static DEFAULT_EXCERPT_COLUMNS: usize = 10;

lazy_static! {
    /// Number of `<TYPE>1..<TYPE>n` excerpt columns on each annotation sheet
    pub static ref EXCERPT_COLUMNS: HashMap<&'static str, usize> =
        [("ADR", 30), ("WD", 10), ("SSI", 10), ("DI", 10)]
            .iter()
            .copied()
            .collect();
}

/// The number of excerpt columns to read for an entity type
pub fn excerpt_columns(entity_type: &str) -> usize {
    EXCERPT_COLUMNS
        .get(entity_type)
        .copied()
        .unwrap_or(DEFAULT_EXCERPT_COLUMNS)
}

/// A row of the sentence labeling sheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct SentenceRow {
    /// The drug report the sentence belongs to
    pub document_id: String,

    /// Position of the sentence within the report
    pub sentence_index: usize,

    /// The raw sentence
    pub text: String,

    /// Normalized indicator per entity type, in column order
    pub indicators: Vec<(String, bool)>,
}

impl SentenceRow {
    /// The normalized indicator for `entity_type`, if the sheet has that column
    pub fn indicator(&self, entity_type: &str) -> Option<bool> {
        self.indicators
            .iter()
            .find(|(name, _)| name == entity_type)
            .map(|(_, value)| *value)
    }
}

/// A row of an `<TYPE>_Identified` sheet
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct AnnotationRow {
    /// The drug report the sentence belongs to
    pub document_id: String,

    /// Position of the sentence within the report
    pub sentence_index: usize,

    /// The sentence as it appears on the annotation sheet
    pub text: String,

    /// Non-empty excerpts, in column order
    pub excerpts: Vec<String>,
}

/// Whether a cell holds only the annotators' `!`/`*` markers
pub fn is_marker(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().all(|c| matches!(c, '!' | '*' | ' '))
}

/// Normalize an indicator cell to 0/1: blank is 0, markers are 1, numbers are non-zero or not
pub fn normalize_indicator(column: &str, value: &str) -> Result<bool> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Ok(false);
    }

    if is_marker(value) {
        return Ok(true);
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(|n| n != 0.0)
        .ok_or_else(|| Error::InvalidIndicator {
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Header positions for one tabular source
struct Columns<'a> {
    headers: &'a StringRecord,
    source_name: &'a str,
}

impl<'a> Columns<'a> {
    fn optional(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    fn required(&self, name: &str) -> Result<usize> {
        self.optional(name).ok_or_else(|| Error::MissingColumn {
            column: name.to_string(),
            source_name: self.source_name.to_string(),
        })
    }
}

fn cell(record: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or("")
}

fn parse_index(value: &str) -> Result<usize> {
    let trimmed = value.trim();

    trimmed
        .parse::<usize>()
        .ok()
        .or_else(|| {
            // Spreadsheet exports often write integers as floats
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.fract() == 0.0 && *n >= 0.0)
                .map(|n| n as usize)
        })
        .ok_or_else(|| Error::InvalidSentenceIndex(value.to_string()))
}

/// Reads delimited exports of the PsyTAR spreadsheet
#[derive(Clone, Debug, new)]
pub struct Reader {
    /// Field delimiter
    delimiter: u8,
}

impl Default for Reader {
    fn default() -> Self {
        Self::new(b'\t')
    }
}

impl Reader {
    fn csv<R: io::Read>(&self, source: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(source)
    }

    /// Read the sentence labeling sheet
    ///
    /// `sentence_index` is optional; without it sentences are numbered from 1 by their order
    /// within each `drug_id`, matching the numbering of the annotation sheets.
    pub fn sentences<R: io::Read, S: AsRef<str>>(
        &self,
        source: R,
        source_name: &str,
        entity_types: &[S],
    ) -> Result<Vec<SentenceRow>> {
        let mut reader = self.csv(source);
        let headers = reader.headers()?.clone();
        let columns = Columns {
            headers: &headers,
            source_name,
        };

        let drug_id = columns.required("drug_id")?;
        let text = columns.required("sentences")?;
        let sentence_index = columns.optional("sentence_index");
        let indicators = entity_types
            .iter()
            .map(|t| -> Result<(String, usize)> {
                Ok((t.as_ref().to_string(), columns.required(t.as_ref())?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;
            let document_id = cell(&record, Some(drug_id)).trim().to_string();

            let position = positions.entry(document_id.clone()).or_insert(1);
            let index = match sentence_index {
                Some(_) => parse_index(cell(&record, sentence_index))?,
                None => *position,
            };
            *position += 1;

            let labels = indicators
                .iter()
                .map(|(name, i)| -> Result<(String, bool)> {
                    let value = normalize_indicator(name, cell(&record, Some(*i)))?;
                    Ok((name.clone(), value))
                })
                .collect::<Result<Vec<_>>>()?;

            rows.push(SentenceRow::new(
                document_id,
                index,
                cell(&record, Some(text)).to_string(),
                labels,
            ));
        }

        log::debug!("Read {} sentence rows from {}", rows.len(), source_name);

        Ok(rows)
    }

    /// Read an `<TYPE>_Identified` sheet
    ///
    /// Missing excerpt columns are treated as empty. Blank and marker-only cells are dropped.
    pub fn annotations<R: io::Read>(
        &self,
        source: R,
        source_name: &str,
        entity_type: &str,
    ) -> Result<Vec<AnnotationRow>> {
        let mut reader = self.csv(source);
        let headers = reader.headers()?.clone();
        let columns = Columns {
            headers: &headers,
            source_name,
        };

        let drug_id = columns.required("drug_id")?;
        let sentence_index = columns.required("sentence_index")?;
        let text = columns.optional("sentences");
        let excerpts: Vec<_> = (1..=excerpt_columns(entity_type))
            .filter_map(|n| columns.optional(&format!("{}{}", entity_type, n)))
            .collect();

        if excerpts.is_empty() {
            log::warn!("No {} excerpt columns in {}", entity_type, source_name);
        }

        let mut rows = Vec::new();

        for record in reader.records() {
            let record = record?;

            let found = excerpts
                .iter()
                .map(|i| cell(&record, Some(*i)))
                .filter(|e| !e.trim().is_empty() && !is_marker(e))
                .map(str::to_string)
                .collect();

            rows.push(AnnotationRow::new(
                cell(&record, Some(drug_id)).trim().to_string(),
                parse_index(cell(&record, Some(sentence_index)))?,
                cell(&record, text).to_string(),
                found,
            ));
        }

        log::debug!(
            "Read {} {} annotation rows from {}",
            rows.len(),
            entity_type,
            source_name
        );

        Ok(rows)
    }

    /// Read the sentence labeling sheet from a file
    pub fn sentences_from_path<S: AsRef<str>>(
        &self,
        path: &Path,
        entity_types: &[S],
    ) -> Result<Vec<SentenceRow>> {
        let file = File::open(path)?;

        self.sentences(file, &path.display().to_string(), entity_types)
    }

    /// Read an annotation sheet from a file
    pub fn annotations_from_path(
        &self,
        path: &Path,
        entity_type: &str,
    ) -> Result<Vec<AnnotationRow>> {
        let file = File::open(path)?;

        self.annotations(file, &path.display().to_string(), entity_type)
    }
}
