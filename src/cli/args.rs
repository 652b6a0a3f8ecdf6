use crate::models::AggregationMode;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "eto-processor")]
#[command(about = "Daily FAO-56 reference evapotranspiration from 15-minute station data")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

/// Options shared by every command that loads station data.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    #[arg(short, long, help = "Station CSV as a URL or local path [default: Bushland feed]")]
    pub input: Option<String>,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute daily ETo and write the daily table
    Process {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long, help = "Site elevation in metres")]
        elevation: Option<f64>,

        #[arg(long, allow_hyphen_values = true, help = "Site latitude in decimal degrees")]
        latitude: Option<f64>,

        #[arg(long, value_enum, help = "How daily temperature and humidity extrema are grouped")]
        aggregation: Option<AggregationMode>,

        #[arg(long, help = "Output CSV file path")]
        output_csv: Option<PathBuf>,

        #[arg(long, help = "Output Parquet file path")]
        output_parquet: Option<PathBuf>,

        #[arg(
            short,
            long,
            help = "Write both exports here as eto-daily-{YYMMDD}.csv/.parquet"
        )]
        output_dir: Option<PathBuf>,

        #[arg(short, long, default_value = "snappy")]
        compression: String,

        #[arg(
            long,
            help = "Write an HTML chart of ETo, net radiation and wind speed (needs the plotting feature)"
        )]
        chart: Option<PathBuf>,

        #[arg(long, default_value = "false", help = "Open the chart in a browser")]
        show_chart: bool,
    },

    /// Load and clean station data without computing ETo
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Display information about a daily Parquet file
    Info {
        #[arg(short, long)]
        file: PathBuf,

        #[arg(short, long, default_value = "10")]
        sample: usize,

        #[arg(long, default_value = "false", help = "Print the statistics as JSON")]
        json: bool,
    },
}
