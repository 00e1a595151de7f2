use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use pdfsum::{MatchMode, PdfReader, PdfSum, PdfSumError, SelectionStrategy, SummarizerConfig};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pdfsum", version, about = "Extractive summaries and entity matching for scientific PDFs")]
struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the plain text of a document
    Text {
        input: PathBuf,
        /// Write the text here instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Summarize a document
    Summarize {
        input: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
        /// Print the scored sentences as JSON
        #[arg(long)]
        json: bool,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Find the sentences that mention the given keys
    Match {
        input: PathBuf,
        /// Key to look for; repeat for several
        #[arg(short, long = "key", required = true)]
        keys: Vec<String>,
        /// Match multi-word phrases instead of single tokens
        #[arg(long)]
        phrase: bool,
        /// Label attached to every span
        #[arg(long, default_value = pdfsum::phrase::DEFAULT_LABEL)]
        label: String,
        #[arg(long)]
        keep_references: bool,
    },
}

#[derive(Args)]
struct Tuning {
    /// Number of summary sentences
    #[arg(short, long)]
    limit: Option<usize>,
    /// Sentences must be longer than this many characters
    #[arg(long)]
    min_len: Option<usize>,
    /// Sentences must be shorter than this many characters
    #[arg(long)]
    max_len: Option<usize>,
    /// Co-occurrence window size
    #[arg(short, long)]
    window: Option<usize>,
    /// Use MMR selection with this relevance weight
    #[arg(long)]
    diverse: Option<f64>,
    #[arg(long)]
    keep_references: bool,
}

impl Tuning {
    fn apply(&self, mut config: SummarizerConfig) -> SummarizerConfig {
        if let Some(limit) = self.limit {
            config.limit_sentences = limit;
        }
        if let Some(min_len) = self.min_len {
            config.bounds.min_len = min_len;
        }
        if let Some(max_len) = self.max_len {
            config.bounds.max_len = max_len;
        }
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(lambda) = self.diverse {
            config.selection = SelectionStrategy::Diverse { lambda };
        }
        if self.keep_references {
            config.remove_references = false;
        }
        config
    }
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<SummarizerConfig> {
    match path {
        Some(path) => SummarizerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(SummarizerConfig::default()),
    }
}

fn read_document(path: &Path) -> Result<String> {
    PdfReader::new(path)
        .get_text()
        .ok_or(PdfSumError::NoText)
        .with_context(|| format!("reading {}", path.display()))
}

fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{content}"),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Commands::Text { input, out } => {
            let mut reader = PdfReader::new(&input);
            match out {
                Some(out) => {
                    reader
                        .save_text(&out)
                        .with_context(|| format!("extracting {}", input.display()))?;
                    tracing::info!(chars = reader.len(), path = %out.display(), "saved text");
                }
                None => {
                    let text = reader.get_text().ok_or(PdfSumError::NoText)?;
                    println!("{text}");
                }
            }
        }
        Commands::Summarize {
            input,
            tuning,
            json,
            out,
        } => {
            let config = tuning.apply(load_config(cli.config.as_deref())?);
            let pdfsum = PdfSum::with_rule_tokenizer(config)?;
            let text = read_document(&input)?;

            let summary = pdfsum.summarize_text(&text)?;
            if !summary.converged {
                tracing::warn!(iterations = summary.iterations, "ranking did not converge");
            }

            let content = if json {
                serde_json::to_string_pretty(&summary)?
            } else {
                summary.text()
            };
            write_output(out.as_deref(), &content)?;
        }
        Commands::Match {
            input,
            keys,
            phrase,
            label,
            keep_references,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if keep_references {
                config.remove_references = false;
            }
            let pdfsum = PdfSum::with_rule_tokenizer(config)?;
            let text = read_document(&input)?;

            let mode = if phrase { MatchMode::Phrase } else { MatchMode::Token };
            let patterns = pdfsum.patterns(&keys, mode)?.with_label(label);
            let document = pdfsum.tokenize_text(&text)?;

            let mut matcher = pdfsum::PhraseMatcher::new();
            let sentences = matcher.match_document(&document, &patterns).len();
            tracing::info!(sentences, spans = matcher.span_count(), "matching done");

            println!("{}", serde_json::to_string_pretty(matcher.matches())?);
        }
    }

    Ok(())
}
