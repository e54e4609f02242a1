use std::path::PathBuf;

use clap::Parser;

use crate::models::RiskLevel;
use crate::report::json::DEFAULT_REPORT_FILE;

#[derive(Parser, Debug)]
#[command(
    name = "dsgvo-scanner",
    about = "Scan a website for basic DSGVO/GDPR compliance gaps",
    after_help = "Example: dsgvo-scanner https://example.com",
    version
)]
pub struct Cli {
    /// Website to scan; `https://` is assumed when no scheme is given
    pub url: String,

    /// JSON report path
    #[arg(long, value_name = "FILE", default_value = DEFAULT_REPORT_FILE)]
    pub output: PathBuf,

    /// Also write an HTML report; without a value a timestamped file name is used
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    pub html: Option<Option<PathBuf>>,

    /// Format printed to stdout
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Config file [default: ./.dsgvo-scanner/config.toml, then ~/.config/dsgvo-scanner/]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Per-request timeout in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Exit with code 1 when the risk level is at or above this level
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<LevelArg>,

    /// Debug logging and check details in the summary table
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print a one-line summary
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
    Html,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LevelArg {
    Low,
    Medium,
    High,
}

impl From<LevelArg> for RiskLevel {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Low => RiskLevel::Low,
            LevelArg::Medium => RiskLevel::Medium,
            LevelArg::High => RiskLevel::High,
        }
    }
}
