use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde_json::Value;

use holiday_engine::{extract_rules, parse_description, HolidayYear};

#[derive(Parser)]
#[command(
    name = "holiday",
    version,
    about = "Turn holiday policy notices into JSON day records"
)]
struct Cli {
    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse notices into the year document {year, papers, days}
    Year {
        /// The year the notices arrange
        #[arg(short, long)]
        year: i32,

        /// Source id of each file, in order (defaults to the file path)
        #[arg(long = "id", value_name = "ID")]
        ids: Vec<String>,

        /// Notice text files, one paragraph per line (reads stdin if none or "-")
        files: Vec<PathBuf>,
    },
    /// Parse a single holiday description
    Describe {
        /// The year the description belongs to
        #[arg(short, long)]
        year: i32,

        /// Holiday name stamped on every record
        #[arg(short, long)]
        name: String,

        /// The description text, e.g. "1月1日放假，2日补休"
        description: String,
    },
    /// List the rules found in a notice
    Rules {
        /// Notice text file (reads stdin if omitted or "-")
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = match cli.command {
        Commands::Year { year, ids, files } => run_year(year, &ids, &files)?,
        Commands::Describe {
            year,
            name,
            description,
        } => {
            let days = parse_description(&name, &description, year)
                .with_context(|| format!("Failed to parse description of {name}"))?;
            serde_json::to_value(days)?
        }
        Commands::Rules { file } => {
            let text = read_input(file.as_deref())?;
            let rules = extract_rules(&text).context("Failed to extract rules")?;
            serde_json::to_value(rules)?
        }
    };

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn run_year(year: i32, ids: &[String], files: &[PathBuf]) -> Result<Value> {
    let stdin = [PathBuf::from("-")];
    let files = if files.is_empty() { &stdin[..] } else { files };
    if !ids.is_empty() && ids.len() != files.len() {
        bail!(
            "got {} --id value(s) for {} notice(s); give one per notice or none",
            ids.len(),
            files.len()
        );
    }

    let mut doc = HolidayYear::new(year);
    for (i, file) in files.iter().enumerate() {
        let id = ids
            .get(i)
            .cloned()
            .unwrap_or_else(|| file.display().to_string());
        let text = read_input(Some(file.as_path()))?;
        doc.add_notice(&id, &text)
            .with_context(|| format!("Failed to parse notice {id}"))?;
        log::info!("{id}: {} day(s) so far", doc.days.len());
    }
    Ok(serde_json::to_value(doc)?)
}

/// Read a file, or stdin for `None` / `-`.
fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read file: {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
