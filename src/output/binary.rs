use std::io;

use crate::{datasets::psytar::SentenceRow, error::Result};

/// Field delimiter of the label table, whatever the input sheets used
pub const DELIMITER: u8 = b'\t';

/// Write the sentence-level label table: a `sentences` column then one 0/1 column per type
///
/// Rows are written in sheet order, duplicates included; indicator labels do not depend on
/// excerpt resolution or on which duplicate the corpus kept.
pub fn write<W: io::Write, S: AsRef<str>>(
    out: W,
    rows: &[SentenceRow],
    entity_types: &[S],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .from_writer(out);

    let mut header = vec!["sentences"];
    header.extend(entity_types.iter().map(|t| t.as_ref()));
    writer.write_record(&header)?;

    for row in rows {
        let mut record = vec![row.text.clone()];

        for entity_type in entity_types {
            let value = row.indicator(entity_type.as_ref()).unwrap_or(false);
            record.push(u8::from(value).to_string());
        }

        writer.write_record(&record)?;
    }

    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn row(doc: &str, index: usize, text: &str, indicators: &[(&str, bool)]) -> SentenceRow {
        SentenceRow::new(
            doc.to_string(),
            index,
            text.to_string(),
            indicators
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        )
    }

    #[test]
    fn writes_zero_one_columns() {
        let rows = vec![
            row("d", 1, "felt dizzy", &[("ADR", true), ("WD", false)]),
            row("d", 2, "fine", &[]),
        ];

        let mut out = Vec::new();
        write(&mut out, &rows, &["ADR", "WD"]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "sentences\tADR\tWD\nfelt dizzy\t1\t0\nfine\t0\t0\n"
        );
    }

    #[test]
    fn keeps_sheet_order_and_duplicate_rows() {
        let rows = vec![
            row("drug.2", 1, "second drug", &[("ADR", false)]),
            row("drug.10", 1, "tenth drug", &[("ADR", true)]),
            row("drug.2", 1, "second drug again", &[("ADR", true)]),
        ];

        let mut out = Vec::new();
        write(&mut out, &rows, &["ADR"]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "sentences\tADR\nsecond drug\t0\ntenth drug\t1\nsecond drug again\t1\n"
        );
    }
}
