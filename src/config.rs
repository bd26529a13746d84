use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

/// Environment variable holding the log filter, in `EnvFilter` syntax.
pub const LOG_LEVEL_ENV: &str = "LAZYPOST_LOG_LEVEL";

#[derive(Parser, Debug, Clone)]
#[command(name = "lazypost", version)]
#[command(about = "A terminal HTTP client for composing requests and inspecting responses")]
pub struct Cli {
    /// URL to pre-fill in the request bar
    #[arg(short, long)]
    pub url: Option<String>,

    /// HTTP method to start with (GET, POST, PUT, DELETE, PATCH)
    #[arg(short, long)]
    pub method: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "30")]
    pub timeout: u64,

    /// Where to write the log; defaults to lazypost.log in the temp directory
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("lazypost.log"))
    }
}
