use std::time::Duration;

use clap::Parser;
use fancy_core::ClientConfig;

use crate::grid::SortKey;

/// Series listing served by the media API on its default port.
pub const DEFAULT_RESOURCES: &str = "http://localhost:5000/media/type/Serie";

/// Show the FancyFilms media table in the terminal
#[derive(Parser, Debug)]
#[command(name = "fancyfilms")]
#[command(about = "Load a list of media entries and show it as a sortable table", long_about = None)]
pub struct Cli {
    /// Address of the media list to load
    #[arg(short, long, default_value = DEFAULT_RESOURCES)]
    pub resources: String,

    /// Send stored cookies with the request
    #[arg(long)]
    pub include_credentials: bool,

    /// Request CORS mode
    #[arg(long)]
    pub cors: bool,

    /// Give up on the request after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Sort by these columns, first key first; prefix a column with `-` for descending
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
    pub sort: Vec<SortKey>,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            include_credentials: self.include_credentials,
            use_cors_mode: self.cors,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }
}
