//! Error types for each stage of the monitoring run.
//!
//! Only [`ConfigError`] is fatal. The others are matched and logged by the
//! stage that produced them so the run can carry on to the email and the
//! report cleanup.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid or missing startup configuration. Checked once, before any
/// network activity.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{0} still holds a placeholder value")]
    Placeholder(&'static str),

    #[error("GMAIL_ADDRESS is not a valid mailbox: {0}")]
    InvalidMailbox(#[from] lettre::address::AddressError),

    #[error("cannot read keywords file {path}: {source}")]
    KeywordsFile {
        path: String,
        source: std::io::Error,
    },

    #[error("keywords file {path} is not a YAML list of strings: {source}")]
    KeywordsFormat {
        path: String,
        source: serde_yaml::Error,
    },
}

/// A single keyword's search failed. The keyword contributes no articles.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("spreadsheet write failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("cannot read attachment {}: {source}", path.display())]
    Attachment {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot build message: {0}")]
    Compose(String),

    #[error("smtp: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl From<lettre::error::Error> for NotifyError {
    fn from(e: lettre::error::Error) -> Self {
        NotifyError::Compose(e.to_string())
    }
}

impl From<lettre::message::header::ContentTypeErr> for NotifyError {
    fn from(e: lettre::message::header::ContentTypeErr) -> Self {
        NotifyError::Compose(e.to_string())
    }
}
