//! hybrec CLI - hybrid content + popularity recommendations.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hybrid_recommender::cli::{Cli, Command, OutputFormat, QueryArgs, SheetsAction, SheetsCommand};
use hybrid_recommender::sheets::{SheetRef, SheetsClient};
use hybrid_recommender::{Catalog, Config, Error, RawTable, Recommendations, RecommenderEngine, Result};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load_default(".")?,
    };

    match cli.command {
        Command::Titles(args) => {
            let catalog = Catalog::from_csv_path(&args.catalog, &config.schema)?;
            print_titles(&catalog, cli.format)?;
        }
        Command::Recommend(args) => {
            let catalog = Catalog::from_csv_path(&args.catalog, &config.schema)?;
            let recs = recommend(catalog, &config, &args.query)?;
            print_recommendations(&recs, cli.format)?;
        }
        Command::Sheets(cmd) => run_sheets(cmd, &config, cli.format)?,
    }
    Ok(())
}

fn run_sheets(cmd: SheetsCommand, config: &Config, format: OutputFormat) -> Result<()> {
    let spreadsheet = cmd
        .spreadsheet
        .or_else(|| config.sheets.spreadsheet.clone())
        .ok_or_else(|| Error::config("no spreadsheet given (--spreadsheet or [sheets] spreadsheet)"))?;
    let sheet = SheetRef::parse(&spreadsheet)?;
    let worksheet = cmd
        .worksheet
        .unwrap_or_else(|| config.sheets.catalog_worksheet.clone());
    let client = SheetsClient::from_config(&config.sheets)?;
    let table = client.read_table(&sheet, &worksheet)?;

    match cmd.action {
        SheetsAction::Pull { out } => match out {
            Some(path) => write_table(&table, &path)?,
            None => table.write_csv(io::stdout().lock())?,
        },
        SheetsAction::Recommend { query, out_worksheet } => {
            let catalog = config.schema.apply(&table)?;
            let recs = recommend(catalog, config, &query)?;
            if let Some(out) = out_worksheet {
                client.write_table(&sheet, &out, &recs.to_table())?;
            }
            print_recommendations(&recs, format)?;
        }
    }
    Ok(())
}

fn recommend(catalog: Catalog, config: &Config, query: &QueryArgs) -> Result<Recommendations> {
    let engine = RecommenderEngine::build(catalog, &config.engine)?;
    engine.recommend(
        &query.title,
        query.topn.unwrap_or(engine.default_topn()),
        query.alpha.unwrap_or(engine.default_alpha()),
    )
}

fn write_table(table: &RawTable, path: &Path) -> Result<()> {
    table.write_csv(File::create(path)?)
}

fn print_titles(catalog: &Catalog, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            for title in catalog.titles() {
                writeln!(out, "{title}")?;
            }
        }
        OutputFormat::Json => {
            let titles: Vec<&str> = catalog.titles().collect();
            serde_json::to_writer_pretty(&mut out, &titles)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let table = RawTable::new(
                vec!["title".to_string()],
                catalog.titles().map(|t| vec![t.to_string()]).collect(),
            );
            table.write_csv(out)?;
        }
    }
    Ok(())
}

fn print_recommendations(recs: &Recommendations, format: OutputFormat) -> Result<()> {
    let mut out = io::stdout().lock();
    match format {
        OutputFormat::Text => write!(out, "{recs}")?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, recs)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => recs.to_table().write_csv(out)?,
    }
    Ok(())
}
