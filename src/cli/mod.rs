//! CLI implementation using clap.

use std::path::PathBuf;

use clap::{builder::RangedU64ValueParser, Args, Parser, Subcommand, ValueEnum};

/// hybrec - content + popularity recommendations for a catalog.
#[derive(Parser)]
#[command(name = "hybrec")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ./hybrec.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the titles of a catalog
    #[command(alias = "ls")]
    Titles(CatalogArgs),

    /// Recommend items similar to a title
    #[command(alias = "rec")]
    Recommend(RecommendArgs),

    /// Work with a catalog stored in a spreadsheet
    Sheets(SheetsCommand),
}

#[derive(Args)]
pub struct CatalogArgs {
    /// Catalog CSV file
    #[arg(long)]
    pub catalog: PathBuf,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Anchor item title
    #[arg(short, long)]
    pub title: String,

    /// Content weight in [0, 1] (default from config)
    #[arg(short, long, value_parser = parse_alpha)]
    pub alpha: Option<f64>,

    /// Number of results (default from config)
    #[arg(short = 'n', long, value_parser = RangedU64ValueParser::<usize>::new().range(1..=100))]
    pub topn: Option<usize>,
}

#[derive(Args)]
pub struct RecommendArgs {
    /// Catalog CSV file
    #[arg(long)]
    pub catalog: PathBuf,

    #[command(flatten)]
    pub query: QueryArgs,
}

#[derive(Args)]
pub struct SheetsCommand {
    /// Spreadsheet URL or key (default from config)
    #[arg(long, global = true)]
    pub spreadsheet: Option<String>,

    /// Worksheet holding the catalog (default from config)
    #[arg(long, global = true)]
    pub worksheet: Option<String>,

    #[command(subcommand)]
    pub action: SheetsAction,
}

#[derive(Subcommand)]
pub enum SheetsAction {
    /// Download the catalog worksheet as CSV
    Pull {
        /// Output file (default: stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Recommend from the catalog worksheet, optionally writing results back
    Recommend {
        #[command(flatten)]
        query: QueryArgs,

        /// Worksheet to overwrite with the results
        #[arg(long)]
        out_worksheet: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(format!("{alpha} is not within [0, 1]"))
    }
}
