//! Command-line interface definitions for the news monitor.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Credentials are normally supplied through environment variables; the
//! matching flags exist for local runs.

use clap::Parser;

/// Command-line arguments for the news monitor.
///
/// Values are validated later by [`crate::config::Config::from_cli`]; this
/// struct only collects them.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment, default keyword list
/// GNEWS_API_KEY=... GMAIL_ADDRESS=me@gmail.com GMAIL_APP_PASSWORD=... news_monitor
///
/// # Custom keywords
/// news_monitor -k "Acme Corp" -k "Jane Doe"
///
/// # Keywords from a YAML list
/// news_monitor --keywords-file keywords.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// GNews API access token
    #[arg(long, env = "GNEWS_API_KEY", hide_env_values = true)]
    pub gnews_api_key: Option<String>,

    /// Mailbox used as both sender and recipient of the report
    #[arg(long, env = "GMAIL_ADDRESS")]
    pub gmail_address: Option<String>,

    /// Application password for the mailbox
    #[arg(long, env = "GMAIL_APP_PASSWORD", hide_env_values = true)]
    pub gmail_app_password: Option<String>,

    /// Keyword to monitor (repeatable); overrides the built-in list
    #[arg(short, long = "keyword")]
    pub keywords: Vec<String>,

    /// YAML file holding a list of keywords to monitor
    #[arg(long, conflicts_with = "keywords")]
    pub keywords_file: Option<String>,
}
