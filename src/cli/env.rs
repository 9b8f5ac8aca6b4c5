use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// CSV file with an `id` column, processed in order
    #[arg(short, long, value_name = "FILE", default_value = "input.csv")]
    pub input: PathBuf,

    /// CSV ledger of per-record outcomes
    #[arg(long, value_name = "FILE", default_value = "output.csv")]
    pub ledger: PathBuf,

    /// Directory for the rolling log files
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub log_dir: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    /// Enable debug mode
    #[arg(short, long)]
    pub debug: bool,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,
}
