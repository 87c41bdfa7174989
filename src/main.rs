//! CLI entry point for the bikeshare statistics tool.
//!
//! Provides subcommands for analyzing a city's trips, paging through its raw
//! rows, and listing the configured cities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::Result;
use bikeshare_stats::BikeshareError;
use bikeshare_stats::analyzers::analyzer::analyze;
use bikeshare_stats::config::CityConfig;
use bikeshare_stats::filter::TripFilter;
use bikeshare_stats::loader::Loader;
use bikeshare_stats::output::{TextReport, print_pretty, to_json, write_rows};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Descriptive statistics over US bikeshare trip data", long_about = None)]
struct Cli {
    /// JSON file mapping city keys to data files (overrides the built-in cities)
    #[arg(long, global = true, env = "BIKESHARE_CITIES")]
    cities: Option<PathBuf>,

    /// Directory holding the built-in cities' CSV files
    #[arg(long, global = true, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Report travel times, stations, durations and rider demographics
    Analyze {
        /// City key, name or alias (e.g. chicago, nyc, dc)
        #[arg(short, long)]
        city: String,

        /// Month name or abbreviation, or "all"
        #[arg(short, long, default_value = "all")]
        month: String,

        /// Weekday name or abbreviation, or "all"
        #[arg(short, long, default_value = "all")]
        day: String,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Print unfiltered trip rows as CSV
    Raw {
        #[arg(short, long)]
        city: String,

        /// Number of rows to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,

        /// Number of rows to print
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
    /// List configured cities
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let config = match &cli.cities {
        Some(path) => CityConfig::load(path)?,
        None => CityConfig::defaults(&cli.data_dir),
    };
    let loader = Loader::new(config);

    match cli.command {
        Commands::Analyze {
            city,
            month,
            day,
            format,
        } => {
            let filter = TripFilter::parse(&month, &day)?;
            let data = loader.load(&city, &filter)?;

            let report = match analyze(&data, &filter) {
                Ok(report) => report,
                Err(BikeshareError::NoMatchingRecords { month, day }) => {
                    println!(
                        "No {} trips match month '{month}' and day '{day}'.",
                        data.city
                    );
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            };
            print_pretty(&report);

            match format {
                Format::Text => println!("{}", TextReport(&report)),
                Format::Json => println!("{}", to_json(&report)?),
            }
        }
        Commands::Raw {
            city,
            offset,
            limit,
        } => {
            let data = loader.load(&city, &TripFilter::all())?;
            let total = data.original.len();
            if offset >= total {
                warn!(offset, total, "No more data available");
                return Ok(());
            }

            let rows = data.original.iter().skip(offset).take(limit);
            let written = write_rows(std::io::stdout().lock(), data.original.schema(), rows)?;
            info!(
                city = %data.city,
                first_row = offset + 1,
                last_row = offset + written,
                total,
                "Raw rows printed"
            );
        }
        Commands::Cities => {
            for (key, entry) in loader.config().iter() {
                let aliases = entry.aliases.join(", ");
                println!(
                    "{key}\t{}\t{}\t[{aliases}]",
                    entry.name,
                    entry.path.display()
                );
            }
        }
    }

    Ok(())
}
