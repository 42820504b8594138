//! # News Monitor
//!
//! A daily monitoring job that searches the GNews API for a list of names
//! (executives and companies), tabulates the last day's hits into a
//! spreadsheet and mails it to a single mailbox.
//!
//! ## Usage
//!
//! ```sh
//! GNEWS_API_KEY=... GMAIL_ADDRESS=me@gmail.com GMAIL_APP_PASSWORD=... news_monitor
//! ```
//!
//! ## Architecture
//!
//! The application runs a strictly sequential pipeline:
//! 1. **Fetching**: one search per keyword, covering the last 24 hours
//! 2. **Reporting**: dedupe by (title, link) and write `news_monitoring_<date>.xlsx`
//! 3. **Notifying**: mail the spreadsheet, or a "system OK" notice, then delete the file
//!
//! Per-keyword search failures and mail failures are logged and do not stop
//! the run. Only invalid configuration ends it early.

use chrono::{Local, Utc};
use clap::Parser;
use std::error::Error;
use std::path::Path;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod fetcher;
mod mail;
mod models;
mod outputs;
mod utils;

use api::GNewsClient;
use cli::Cli;
use config::Config;
use fetcher::{KEYWORD_PAUSE, fetch_articles};
use mail::{SmtpMailer, notify};
use outputs::xlsx::build_report;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_monitor starting up");

    let args = Cli::parse();
    let config = match Config::from_cli(args) {
        Ok(config) => config,
        Err(e) => {
            error!(
                error = %e,
                "Credentials are missing or still placeholders; set GNEWS_API_KEY, GMAIL_ADDRESS and GMAIL_APP_PASSWORD"
            );
            return Err(e.into());
        }
    };
    debug!(?config, "Loaded configuration");

    // ---- Fetch ----
    let client = GNewsClient::new(&config.gnews_api_key)?;
    let table = fetch_articles(&client, &config.keywords, Utc::now(), KEYWORD_PAUSE).await;

    // ---- Report ----
    let today = Local::now().date_naive();
    let articles_found = !table.is_empty();
    let report = match build_report(table, Path::new("."), today) {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "Failed to write report; mailing without attachment");
            None
        }
    };

    // ---- Notify ----
    let mailer = SmtpMailer::new(&config);
    let delivery = notify(&mailer, &config.mailbox, report.as_deref(), articles_found, today).await;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        ?delivery,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
