//! Command line tool to convert an annotated ADR corpus into CONLL datasets

use std::path::{Path, PathBuf};

use adr_conll::{
    config::Config,
    datasets::{psytar, Dataset},
    output::Writer,
    pipeline::Converter,
    splits::Strategy,
    tokenizer::BertWordTokenizer,
};
use anyhow::{anyhow, Context};
use pico_args::Arguments;

const HELP: &str = "\
Usage: convert SENTENCES OUT_DIR [OPTIONS]

Arguments:
  SENTENCES              Delimited export of the sentence labeling sheet
  OUT_DIR                Directory to write the datasets to

Options:
  -h, --help             Print help
  -a, --annotations      An annotation sheet as TYPE=PATH (e.g., 'ADR=data/ADR_Identified.tsv'),
                         may be repeated
  -s, --strategy         The split strategy, 'sample' or 'shuffle' (defaults to 'shuffle')
  -D, --dataset          The dataset being converted (defaults to 'psytar')
  -c, --config           A YAML config file
";

#[derive(Debug)]
struct Args {
    sentences: PathBuf,
    out_dir: PathBuf,
    annotations: Vec<String>,
    strategy: Option<String>,
    dataset: Option<String>,
    config: Option<PathBuf>,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            annotations: pargs.values_from_str(["-a", "--annotations"])?,
            strategy: pargs.opt_value_from_str(["-s", "--strategy"])?,
            dataset: pargs.opt_value_from_str(["-D", "--dataset"])?,
            config: pargs.opt_value_from_str(["-c", "--config"])?,
            sentences: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => {
                    anyhow!("Missing required argument: SENTENCES")
                }
                _ => anyhow!("{}", e),
            })?,
            out_dir: pargs.free_from_str().map_err(|e| match e {
                pico_args::Error::MissingArgument => anyhow!("Missing required argument: OUT_DIR"),
                _ => anyhow!("{}", e),
            })?,
        };

        Ok(Some(args))
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let output = Args::parse()?;

    let Some(args) = output else {
        print!("{}", HELP);

        return Ok(());
    };

    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Unable to load config {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(dataset) = &args.dataset {
        config.dataset = dataset.clone();
    }

    if let Some(strategy) = &args.strategy {
        config.strategy = Strategy::try_from(strategy.as_str())?;
    }

    for annotation in &args.annotations {
        let (entity_type, path) = annotation
            .split_once('=')
            .ok_or_else(|| anyhow!("Expected TYPE=PATH, got {}", annotation))?;

        config
            .annotations
            .insert(entity_type.to_string(), path.to_string());
    }

    let dataset = Dataset::try_from(config.dataset.as_str())?;
    let config = config.resolve(dataset);

    run(&args.sentences, &args.out_dir, &config)
}

fn run(sentences: &Path, out_dir: &Path, config: &Config) -> anyhow::Result<()> {
    let reader = psytar::Reader::new(config.delimiter_byte());

    let sentence_rows = reader
        .sentences_from_path(sentences, &config.entity_types)
        .with_context(|| format!("Unable to read sentences from {}", sentences.display()))?;

    // Layers are annotated in the configured order, which is also the overwrite order
    let mut annotations = Vec::new();
    for entity_type in &config.annotated_types {
        let Some(path) = config.annotations.get(entity_type) else {
            log::warn!("No annotation sheet given for {}", entity_type);
            continue;
        };

        let rows = reader
            .annotations_from_path(Path::new(path), entity_type)
            .with_context(|| format!("Unable to read {} annotations from {}", entity_type, path))?;

        annotations.push((entity_type.clone(), rows));
    }

    let conversion = Converter::new(BertWordTokenizer).convert(sentence_rows, &annotations)?;
    let partition = conversion.split(config.strategy, &config.seeds)?;

    let report = Writer::new(out_dir).write_all(&conversion, &partition, config)?;

    println!(
        "Annotations: {} attempted, {} not found, {} sentences excluded, {} missing sentences",
        report.summary.attempts,
        report.summary.failures,
        report.summary.invalid_sentences,
        report.summary.missing_references,
    );
    for split in &report.splits {
        println!("- {}: {}", split.name, split.size);
    }

    Ok(())
}
