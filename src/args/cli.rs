use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize,
};
use super::types::{OutputFormat, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "WBLG (Web Browsing Load Generator) - sends N HTTP GET requests over a chosen network interface and reports how many succeeded, failed to connect, timed out, or failed otherwise."
)]
pub struct WblgArgs {
    /// URL to browse (must include scheme and host)
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Interface over which the requests are sent. Required to run the load generator
    #[arg(long, short = 'i', value_name = "IF_NAME")]
    pub interface: Option<String>,

    /// Number of iterations (requests) to send
    #[arg(
        long,
        short = 'n',
        default_value = "1",
        value_parser = parse_positive_u64,
        value_name = "ITER_CNT"
    )]
    pub iterations: PositiveU64,

    /// Request timeout; bare numbers are seconds (supports ms/s/m/h)
    #[arg(
        long,
        short = 't',
        default_value = "10",
        value_parser = parse_duration_arg
    )]
    pub timeout: Duration,

    /// Print worker statistics
    #[arg(long = "worker-stats", short = 'w')]
    pub worker_stats: bool,

    /// Print the list of available interfaces and exit
    #[arg(long = "list-if")]
    pub list_interfaces: bool,

    /// Maximum number of iterations handled by a single worker
    #[arg(long = "quantum", default_value = "250", value_parser = parse_positive_usize)]
    pub quantum: PositiveUsize,

    /// Report format
    #[arg(long = "output-format", default_value = "text", value_enum)]
    pub output_format: OutputFormat,

    /// Path to config file (TOML or JSON)
    #[arg(long, short = 'C')]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
