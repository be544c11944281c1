//! sigma-report CLI: export pair reports as group-preserving CSV shards.
//!
//! Sources (one of):
//!   --start=<S> --end=<E>        Generate pairs for diagonals S..E (default 1..1000)
//!   --input=<file>               Read `square_root,base,increment` lines
//!
//! Options:
//!   --records-per-sheet=<N>      Approximate lines per file (default: $RECORDS_PER_SHEET or 100000)
//!   --output-dir=<path>          Directory for the CSV files (default: .)
//!   --file-stem=<name>           File name stem (default: Sigma2MatchesCountMod10)
//!   --summary-json=<path>        Also save the run summary as JSON

use std::path::PathBuf;
use std::time::Instant;

use sigma_report::pairs::check_diagonal_range;
use sigma_report::{combine, export, generate_pairs, read_pairs, ExportConfig, ReportError};

/// CLI configuration parsed from command-line arguments.
struct CliConfig {
    source: Source,
    export: ExportConfig,
    summary_json: Option<PathBuf>,
}

enum Source {
    Generate { start: u64, end: u64 },
    File(PathBuf),
}

fn value_of<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter().find_map(|a| a.strip_prefix(flag))
}

fn parse_args() -> Result<CliConfig, ReportError> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let parse_u64 = |flag: &str, default: u64| -> Result<u64, ReportError> {
        match value_of(&args, flag) {
            Some(v) => v
                .parse()
                .map_err(|_| ReportError::InvalidConfig(format!("{}{} is not a number", flag, v))),
            None => Ok(default),
        }
    };

    let source = match value_of(&args, "--input=") {
        Some(path) => Source::File(PathBuf::from(path)),
        None => {
            let start = parse_u64("--start=", 1)?;
            let end = parse_u64("--end=", 1000)?;
            check_diagonal_range(start, end)?;
            Source::Generate { start, end }
        }
    };

    let records_per_sheet = match value_of(&args, "--records-per-sheet=") {
        Some(v) => v.parse().map_err(|_| {
            ReportError::InvalidConfig(format!("--records-per-sheet={} is not a number", v))
        })?,
        None => ExportConfig::records_per_sheet_from_env(),
    };

    let mut export = ExportConfig::new(value_of(&args, "--output-dir=").unwrap_or("."))
        .with_records_per_sheet(records_per_sheet);
    if let Some(stem) = value_of(&args, "--file-stem=") {
        export = export.with_file_stem(stem);
    }

    Ok(CliConfig {
        source,
        export,
        summary_json: value_of(&args, "--summary-json=").map(PathBuf::from),
    })
}

fn run(config: &CliConfig) -> Result<(), ReportError> {
    config.export.validate()?;

    let start = Instant::now();
    let records = match &config.source {
        Source::Generate { start, end } => {
            println!("Generating pairs for diagonals {}..{}", start, end);
            generate_pairs(*start, *end)?
        }
        Source::File(path) => {
            println!("Reading pairs from {}", path.display());
            read_pairs(path)?
        }
    };

    println!("Combining {} pair records...", records.len());
    let rows = combine(&records);
    println!("...{} rows", rows.len());

    let summary = export(rows, &config.export)?;
    println!(
        "{} rows written to {} files in {:.2}s",
        summary.rows,
        summary.shards,
        start.elapsed().as_secs_f64()
    );
    for file in &summary.files {
        println!("  {}", file.display());
    }

    if let Some(path) = &config.summary_json {
        summary.save_json(path)?;
        println!("Summary saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let config = match parse_args() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
