use crate::{
    conll::{self, locate, Mode},
    corpus::{Corpus, Sentence, SentenceKey},
    datasets::psytar::{AnnotationRow, SentenceRow},
    error::Result,
    splits::{self, Partition, Seeds, Strategy},
    tokenizer::Tokenizer,
    validity::Tracker,
};

/// Builds an annotated corpus from sentence and annotation rows
pub struct Converter<T: Tokenizer> {
    tokenizer: T,
}

impl<T: Tokenizer> Converter<T> {
    /// Creates a new converter
    pub fn new(tokenizer: T) -> Self {
        Self { tokenizer }
    }

    /// Tokenize sentence rows into a corpus, attaching their indicator labels
    pub fn load_sentences(&self, rows: &[SentenceRow]) -> Result<Corpus> {
        let mut corpus = Corpus::default();

        for row in rows {
            let key = SentenceKey::new(row.document_id.clone(), row.sentence_index);
            let tokens = self.tokenizer.tokenize(&row.text)?;

            let mut sentence = Sentence::new(key, row.text.clone(), tokens);
            for (entity_type, value) in &row.indicators {
                sentence.set_indicator(entity_type, *value);
            }

            if let Some(previous) = corpus.insert(sentence) {
                log::warn!("Duplicate sentence {}, keeping the last row", previous.key);
            }
        }

        log::info!("Loaded {} sentences from {} rows", corpus.len(), rows.len());

        Ok(corpus)
    }

    /// Resolve every excerpt of `rows` into spans on the corpus
    ///
    /// Excerpts that cannot be located invalidate their sentence; rows that reference unknown
    /// sentences are skipped. Neither stops the run.
    pub fn annotate(
        &self,
        corpus: &mut Corpus,
        tracker: &mut Tracker,
        entity_type: &str,
        rows: &[AnnotationRow],
    ) -> Result<()> {
        for row in rows {
            let key = SentenceKey::new(row.document_id.clone(), row.sentence_index);

            let Some(sentence) = corpus.get_mut(&key) else {
                log::warn!(
                    "{} annotation references unknown sentence {}: {:?}",
                    entity_type,
                    key,
                    row.text
                );
                tracker.record_missing();
                continue;
            };

            for excerpt in &row.excerpts {
                tracker.record_attempt();

                match locate(&sentence.text, &sentence.tokens, excerpt) {
                    Ok(span) => sentence.add_span(entity_type, span)?,
                    Err(e) => {
                        log::debug!("{} {}: {}", entity_type, key, e);
                        tracker.mark_invalid(&key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Run the whole conversion: tokenize, then annotate with each entity type's rows in order
    pub fn convert(
        &self,
        sentences: Vec<SentenceRow>,
        annotations: &[(String, Vec<AnnotationRow>)],
    ) -> Result<Conversion> {
        let mut corpus = self.load_sentences(&sentences)?;
        let mut tracker = Tracker::default();

        for (entity_type, rows) in annotations {
            self.annotate(&mut corpus, &mut tracker, entity_type, rows)?;
        }

        let summary = tracker.summary();
        log::info!(
            "Located {} of {} excerpts; {} sentences excluded, {} missing sentence references",
            summary.located(),
            summary.attempts,
            summary.invalid_sentences,
            summary.missing_references
        );

        Ok(Conversion {
            rows: sentences,
            corpus,
            tracker,
            annotated_types: annotations.iter().map(|(t, _)| t.clone()).collect(),
        })
    }
}

/// The annotated corpus and its diagnostics
#[derive(Debug)]
pub struct Conversion {
    /// The sentence sheet as read, duplicates included
    pub rows: Vec<SentenceRow>,

    /// Every sentence, annotated
    pub corpus: Corpus,

    /// Which sentences are excluded
    pub tracker: Tracker,

    /// Span layers in the order they were annotated
    pub annotated_types: Vec<String>,
}

impl Conversion {
    /// Sentences whose excerpts all resolved, in input order
    pub fn valid_sentences(&self) -> impl Iterator<Item = &Sentence> {
        self.corpus
            .sentences()
            .filter(|s| !self.tracker.is_invalid(&s.key))
    }

    /// Split the valid sentences
    pub fn split(&self, strategy: Strategy, seeds: &Seeds) -> Result<Partition<&Sentence>> {
        splits::partition(self.valid_sentences().collect(), strategy, seeds)
    }

    /// Labels the tagged output uses in `mode`
    pub fn labels(&self, mode: Mode) -> Vec<String> {
        match mode {
            Mode::All => self.annotated_types.clone(),
            Mode::Conflated => vec![conll::CONFLATED_LABEL.to_string()],
        }
    }

    /// Encode sentences as CONLL text, merging every annotated layer
    pub fn encode(&self, sentences: &[&Sentence], mode: Mode) -> Result<String> {
        let mut text = String::new();

        for sentence in sentences {
            let tagged = conll::encode_layers(sentence, &self.annotated_types, mode.conflate())?;
            text.push_str(&conll::to_conll(&tagged));
        }

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::tokenizer::BertWordTokenizer;

    fn sentence_row(doc: &str, index: usize, text: &str) -> SentenceRow {
        SentenceRow::new(
            doc.to_string(),
            index,
            text.to_string(),
            vec![("ADR".to_string(), true)],
        )
    }

    fn annotation_row(doc: &str, index: usize, excerpts: &[&str]) -> AnnotationRow {
        AnnotationRow::new(
            doc.to_string(),
            index,
            String::new(),
            excerpts.iter().map(|e| e.to_string()).collect(),
        )
    }

    fn conversion() -> Conversion {
        let sentences = vec![
            sentence_row("d", 0, "The Patient felt DIZZY."),
            sentence_row("d", 1, "He had no symptoms."),
            sentence_row("e", 0, "Stopping it gave me brain zaps."),
        ];
        let annotations = vec![
            (
                "ADR".to_string(),
                vec![
                    annotation_row("d", 0, &["dizzy"]),
                    annotation_row("d", 1, &["nausea"]),
                    annotation_row("x", 3, &["anything"]),
                ],
            ),
            ("WD".to_string(), vec![annotation_row("e", 0, &["brain zaps"])]),
        ];

        Converter::new(BertWordTokenizer)
            .convert(sentences, &annotations)
            .unwrap()
    }

    #[test]
    fn excludes_sentences_with_missing_excerpts() {
        let conversion = conversion();

        let valid: Vec<_> = conversion
            .valid_sentences()
            .map(|s| s.key.to_string())
            .collect();
        assert_eq!(valid, vec!["d#0", "e#0"]);

        let summary = conversion.tracker.summary();
        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.invalid_sentences, 1);
        assert_eq!(summary.missing_references, 1);
    }

    #[test]
    fn encodes_all_layers() {
        let conversion = conversion();
        let sentences: Vec<_> = conversion.valid_sentences().collect();

        let text = conversion.encode(&sentences, Mode::All).unwrap();

        assert_eq!(
            text,
            "The\tO\nPatient\tO\nfelt\tO\nDIZZY\tB-ADR\n.\tO\n\n\
             Stopping\tO\nit\tO\ngave\tO\nme\tO\nbrain\tB-WD\nzaps\tI-WD\n.\tO\n\n"
        );
    }

    #[test]
    fn conflated_output_uses_one_label() {
        let conversion = conversion();
        let sentences: Vec<_> = conversion.valid_sentences().collect();

        let text = conversion.encode(&sentences, Mode::Conflated).unwrap();

        assert!(text.contains("DIZZY\tB-Entity\n"));
        assert!(text.contains("zaps\tI-Entity\n"));
        assert_eq!(conversion.labels(Mode::Conflated), vec!["Entity".to_string()]);
    }

    #[test]
    fn keeps_every_row_but_one_sentence_per_key() {
        let sentences = vec![
            sentence_row("d", 1, "first take"),
            sentence_row("d", 1, "second take"),
        ];

        let conversion = Converter::new(BertWordTokenizer)
            .convert(sentences, &[])
            .unwrap();

        assert_eq!(conversion.rows.len(), 2);
        assert_eq!(conversion.corpus.len(), 1);
        assert_eq!(
            conversion
                .corpus
                .get(&SentenceKey::new("d".to_string(), 1))
                .map(|s| s.text.as_str()),
            Some("second take")
        );
    }

    #[test]
    fn keeps_indicator_labels() {
        let conversion = conversion();
        let key = SentenceKey::new("e".to_string(), 0);

        assert_eq!(
            conversion.corpus.get(&key).and_then(|s| s.indicator("ADR")),
            Some(true)
        );
    }
}
