//! Runtime configuration, validated once at startup.
//!
//! [`Config`] is built from the parsed [`Cli`] and then handed to the
//! fetcher (API token) and the notifier (mailbox credentials). A missing or
//! placeholder credential stops the run before any network activity.

use crate::cli::Cli;
use crate::error::ConfigError;
use lettre::message::Mailbox;
use std::fmt;
use tracing::{info, instrument};

/// Names monitored when no keywords are configured.
pub const DEFAULT_KEYWORDS: [&str; 10] = [
    "Lee Jae-yong",
    "Samsung Electronics",
    "Chey Tae-won",
    "SK Hynix",
    "Euisun Chung",
    "Hyundai Motor",
    "Koo Kwang-mo",
    "LG Corp",
    "Shin Dong-bin",
    "Lotte",
];

pub struct Config {
    pub gnews_api_key: String,
    /// Sender and recipient of every report.
    pub mailbox: Mailbox,
    pub app_password: String,
    /// Search terms, in fetch order.
    pub keywords: Vec<String>,
}

impl Config {
    /// Validate credentials and resolve the keyword list.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a credential is missing, blank, or still
    /// a template placeholder, if the mailbox address does not parse, or if
    /// the keywords file cannot be read.
    #[instrument(level = "info", skip_all)]
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let gnews_api_key = credential(cli.gnews_api_key, "GNEWS_API_KEY", "your_gnews")?;
        let address = credential(cli.gmail_address, "GMAIL_ADDRESS", "your_email")?;
        let app_password =
            credential(cli.gmail_app_password, "GMAIL_APP_PASSWORD", "your_gmail")?;
        let mailbox: Mailbox = address.parse()?;

        let keywords = match cli.keywords_file {
            Some(path) => read_keywords_file(&path)?,
            None if !cli.keywords.is_empty() => clean_keywords(cli.keywords),
            None => DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        };
        info!(count = keywords.len(), mailbox = %mailbox, "Configuration loaded");

        Ok(Config {
            gnews_api_key,
            mailbox,
            app_password,
            keywords,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gnews_api_key", &"<redacted>")
            .field("mailbox", &self.mailbox)
            .field("app_password", &"<redacted>")
            .field("keywords", &self.keywords)
            .finish()
    }
}

fn credential(
    value: Option<String>,
    name: &'static str,
    placeholder: &str,
) -> Result<String, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))?;
    if value.to_lowercase().contains(placeholder) {
        return Err(ConfigError::Placeholder(name));
    }
    Ok(value)
}

fn read_keywords_file(path: &str) -> Result<Vec<String>, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::KeywordsFile {
        path: path.to_string(),
        source,
    })?;
    let keywords: Vec<String> =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::KeywordsFormat {
            path: path.to_string(),
            source,
        })?;
    Ok(clean_keywords(keywords))
}

fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
