use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use conll_engine::{
    load_rules, ParsedSentence, Parser as SentenceParser, ParserConfig, SentenceId, SentenceReport,
};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Token ceiling applied when neither `--max-tokens` nor a config file sets one.
const DEFAULT_MAX_TOKENS: usize = 1024;

#[derive(Parser)]
#[command(name = "conll", author, version, about = "Extracts actors from CoNLL dependency parses")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Print a JSON report (sentence, actors, tree) per sentence
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print one tab-separated line per actor: sentence, name, position, action
    Actors {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
struct InputArgs {
    /// CoNLL file; reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// JSON parser config (`rules`, `max_tokens`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON rule file overriding the extraction tables
    #[arg(long, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Reject sentences with more tokens than this [default: 1024]
    #[arg(long, value_name = "N")]
    max_tokens: Option<usize>,

    /// Fail on the first malformed sentence instead of skipping it
    #[arg(long)]
    strict: bool,
}

#[derive(Serialize)]
struct SentenceOutput<'a> {
    sentence_id: SentenceId,
    #[serde(flatten)]
    report: SentenceReport<'a>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Parse { input, pretty } => {
            for_each_sentence(&input, |id, parsed| {
                let output = SentenceOutput { sentence_id: id, report: parsed.report() };
                let json = if pretty {
                    serde_json::to_string_pretty(&output)?
                } else {
                    serde_json::to_string(&output)?
                };
                println!("{json}");
                Ok(())
            })
        }
        Command::Actors { input } => for_each_sentence(&input, |id, parsed| {
            for actor in parsed.actors() {
                println!("{id}\t{}\t{}\t{}", actor.name, actor.position, actor.action);
            }
            Ok(())
        }),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn build_parser(input: &InputArgs) -> anyhow::Result<SentenceParser> {
    let mut config = match &input.config {
        Some(path) => {
            let config = ParserConfig::from_json_file(path)?;
            info!(path = %path.display(), "loaded config");
            config
        }
        None => ParserConfig::default(),
    };
    if let Some(path) = &input.rules {
        config = config.with_rules(load_rules(path)?);
        info!(path = %path.display(), "loaded rules");
    }
    // Extraction recurses once per tree level
    let limit = input
        .max_tokens
        .or(config.max_tokens)
        .unwrap_or(DEFAULT_MAX_TOKENS);
    config = config.with_max_tokens(limit);
    config.validate()?;
    Ok(SentenceParser::new(config))
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            Ok(text)
        }
    }
}

fn for_each_sentence<F>(input: &InputArgs, mut emit: F) -> anyhow::Result<()>
where
    F: FnMut(SentenceId, &ParsedSentence) -> anyhow::Result<()>,
{
    let parser = build_parser(input)?;
    let text = read_input(input.file.as_ref())?;

    let results = parser.parse_document(&text);
    info!(sentences = results.len(), "parsed document");

    let mut failed = 0;
    for (id, result) in &results {
        match result {
            Ok(parsed) => emit(*id, parsed)?,
            Err(err) if input.strict => bail!("sentence {id}: {err}"),
            Err(err) => {
                warn!(sentence = %id, error = %err, "skipping sentence");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        warn!(failed, total = results.len(), "some sentences were skipped");
    }
    Ok(())
}
