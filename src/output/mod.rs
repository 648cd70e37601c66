use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use crate::{
    conll::{Mode, TagSet},
    config::Config,
    corpus::Sentence,
    error::Result,
    pipeline::Conversion,
    splits::Partition,
};

/// The sentence-level 0/1 label table
pub mod binary;

/// Run report, JSON summary and Markdown split manifest
pub mod manifest;

pub use manifest::Report;

/// Name of the split holding every valid sentence
pub static FULL: &str = "full";

/// Writes the artifacts of a conversion run under one directory
pub struct Writer {
    out_dir: PathBuf,
}

impl Writer {
    /// Creates a writer rooted at `out_dir`
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Path of the CONLL file for a mode and split
    pub fn conll_path(&self, mode: Mode, split: &str) -> PathBuf {
        self.out_dir
            .join("conll")
            .join(mode.as_str())
            .join(format!("{}.conll", split))
    }

    /// Write the binary labels, every CONLL file, the tag vocabularies, the summary and the
    /// manifest
    pub fn write_all(
        &self,
        conversion: &Conversion,
        partition: &Partition<&Sentence>,
        config: &Config,
    ) -> Result<Report> {
        fs::create_dir_all(&self.out_dir)?;

        let binary_path = self.out_dir.join("binary.tsv");
        binary::write(
            BufWriter::new(File::create(&binary_path)?),
            &conversion.rows,
            &config.entity_types,
        )?;
        log::info!("Wrote {}", binary_path.display());

        let full: Vec<_> = conversion.valid_sentences().collect();

        for mode in Mode::ALL {
            self.write_conll(conversion, mode, FULL, &full)?;

            for (split, sentences) in partition.named() {
                self.write_conll(conversion, mode, split, sentences)?;
            }

            let tags = TagSet::new(&conversion.labels(mode));
            log::debug!("{} tags in {} mode", tags.len(), mode.as_str());
            write_file(
                &self.out_dir.join("conll").join(mode.as_str()).join("labels.json"),
                &serde_json::to_string_pretty(&tags)?,
            )?;
        }

        let report = Report::new(
            &config.dataset,
            conversion.tracker.summary(),
            config.strategy,
            config.seeds,
            partition,
            config.decimal,
        );

        write_file(&self.out_dir.join("summary.json"), &report.to_json()?)?;
        write_file(&self.out_dir.join("SPLITS.md"), &report.render()?)?;

        Ok(report)
    }

    fn write_conll(
        &self,
        conversion: &Conversion,
        mode: Mode,
        split: &str,
        sentences: &[&Sentence],
    ) -> Result<()> {
        let path = self.conll_path(mode, split);

        write_file(&path, &conversion.encode(sentences, mode)?)?;
        log::info!("Wrote {} sentences to {}", sentences.len(), path.display());

        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, contents)?;

    Ok(())
}
