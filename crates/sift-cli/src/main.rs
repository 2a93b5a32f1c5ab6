//! sift CLI: search a record collection and export results as CSV
//!
//! Commands: search, export, records, repl, completions

mod export;
mod repl;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use sift_core::{default_records, SiftConfig};
use sift_query::{format_result, OutputFormat, QueryEngine, QueryResult};
use tracing_subscriber::EnvFilter;

use crate::export::Exporter;

#[derive(Parser)]
#[command(name = "sift")]
#[command(version)]
#[command(about = "Search records by name or category and export results as CSV")]
struct Cli {
    /// Path to a sift.toml (defaults to ./sift.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Filter records by a query and show ranked results
    #[command(alias = "s")]
    Search {
        /// Text to match against name and category
        query: String,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Table)]
        format: FormatArg,
        /// Also export the results as CSV
        #[arg(long)]
        export: bool,
        /// Directory to deliver exports into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Export search results, or every record, as CSV
    Export {
        /// Export the results of this query instead of every record
        #[arg(short, long)]
        query: Option<String>,
        /// Comma-separated column list (defaults to id,name,category,score)
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,
        /// Directory to deliver exports into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// List every record, highest score first
    Records {
        #[arg(short, long, value_enum, default_value_t = FormatArg::Table)]
        format: FormatArg,
    },
    /// Interactive query loop reading from stdin
    Repl {
        /// Directory to deliver exports into
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Table,
    Json,
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("SIFT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "sift", &mut io::stdout());
        return Ok(());
    }

    let config = SiftConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let engine = QueryEngine::new(default_records());

    match cli.command {
        Some(Commands::Search {
            query,
            format,
            export,
            out,
        }) => {
            let result = engine.search(&query);
            print!("{}", render(&result, format));
            if export {
                let exporter = Exporter::new(&config.export, out);
                let receipt = exporter.results(&query, &result.items, &[])?;
                eprintln!("Exported {} bytes to {}", receipt.bytes, receipt.delivered_to.display());
                receipt.release.wait()?;
            }
        }
        Some(Commands::Export {
            query,
            columns,
            out,
        }) => {
            let exporter = Exporter::new(&config.export, out);
            let receipt = match query {
                Some(q) => {
                    let result = engine.search(&q);
                    exporter.results(&q, &result.items, &columns)?
                }
                None => exporter.records(engine.records(), &columns)?,
            };
            println!("{}", receipt.delivered_to.display());
            receipt.release.wait()?;
        }
        Some(Commands::Records { format }) => {
            let items = engine.ranked();
            let result = QueryResult {
                explanation: format!("{} records in the collection.", items.len()),
                tips: Vec::new(),
                items,
            };
            print!("{}", render(&result, format));
        }
        Some(Commands::Repl { out }) => {
            let exporter = Exporter::new(&config.export, out);
            let interactive = io::stdin().is_terminal();
            repl::run(engine, &exporter, io::stdin().lock(), io::stdout(), interactive)?;
        }
        Some(Commands::Completions { .. }) => {}
        None => {
            println!("sift v{}: record search with CSV export", env!("CARGO_PKG_VERSION"));
            println!("Run `sift --help` for usage.");
        }
    }

    Ok(())
}

fn render(result: &QueryResult, format: FormatArg) -> String {
    let mut text = format_result(result, format.into());
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
