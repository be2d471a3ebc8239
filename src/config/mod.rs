use std::{path::PathBuf, time::Duration};

use chrono::{FixedOffset, Local, Offset, Utc};
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use dotenv::dotenv;

pub const DEFAULT_BASE_URL: &str = "https://graph.threads.net/v1.0";

#[derive(Debug, Clone, Parser, Default)]
pub struct Config {
    /// Your Threads access token (prompted for when omitted)
    #[arg(long, env = "THREADS_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Where the report is written [default: threads_posts_{date}.xlsx]
    #[arg(short, long, env = "OUTPUT")]
    output: Option<PathBuf>,
    /// Threads Graph API base url
    #[arg(long, env = "THREADS_API_BASE", default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// Display timezone as an offset from UTC in hours
    #[arg(long, default_value = "8", allow_negative_numbers = true, value_parser = clap::value_parser!(i32).range(-23..=23))]
    utc_offset: i32,
    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
    /// Pause between post list pages in milliseconds
    #[arg(long, default_value = "200")]
    page_delay: u64,
    /// Pause between insights requests in milliseconds
    #[arg(long, default_value = "150")]
    item_delay: u64,
    /// Exit without waiting for Enter
    #[arg(long)]
    no_wait: bool,
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Config {
    /// Parse the configuration from the environment and command line arguments
    pub fn parse() -> Self {
        dotenv().ok();
        <Self as Parser>::parse()
    }
    /// Create a logger with the configured verbosity level
    pub fn init_logger(&self) {
        env_logger::Builder::new()
            .filter_level(self.verbose.log_level_filter())
            .format_target(false)
            .format_timestamp(None)
            .target(env_logger::Target::Stdout)
            .init();
    }
    /// Token given on the command line or through the environment
    pub fn token(&self) -> Option<String> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
    }
    pub fn output(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let stamp = Local::now().format("%Y%m%d");
            PathBuf::from(format!("threads_posts_{}.xlsx", stamp))
        })
    }
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
    pub fn display_offset(&self) -> FixedOffset {
        // range checked by the value parser
        FixedOffset::east_opt(self.utc_offset * 3600).unwrap_or_else(|| Utc.fix())
    }
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
    pub const fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay)
    }
    pub const fn item_delay(&self) -> Duration {
        Duration::from_millis(self.item_delay)
    }
    pub const fn wait(&self) -> bool {
        !self.no_wait
    }
}
