//! Email notification.
//!
//! Every run sends exactly one message to the configured mailbox (sender and
//! recipient are the same address):
//!
//! - articles found: the dated spreadsheet as an attachment
//! - nothing found: a short "system OK" notice
//!
//! After the attempt the report file is removed, whether the message went
//! out, the SMTP exchange failed, or composing was aborted.
//!
//! # Architecture
//!
//! - [`compose`]: builds the `lettre` message
//! - [`MailTransport`]: trait for anything that can deliver a message
//! - [`SmtpMailer`]: STARTTLS submission to Gmail, used in production
//! - [`notify`]: compose, transmit, clean up

use crate::config::Config;
use crate::error::NotifyError;
use chrono::NaiveDate;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::fmt;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument, warn};

pub const SMTP_HOST: &str = "smtp.gmail.com";

/// Mail submission port; the session is upgraded with STARTTLS.
pub const SMTP_PORT: u16 = 587;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const FOUND_BODY: &str = "Today's news monitoring results are attached as a spreadsheet.";

const NOTHING_FOUND_BODY: &str = "No new articles matched the monitored keywords today.\n\
The monitoring system is operating normally.";

/// Outcome of a [`notify`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The transport accepted the message.
    Sent,
    /// The message was built but the transport rejected it.
    Failed,
    /// The message could not be built; nothing was sent.
    Aborted,
}

/// Trait for delivering a composed message.
pub trait MailTransport {
    async fn send(&self, message: Message) -> Result<(), NotifyError>;
}

/// [`MailTransport`] that submits through an authenticated STARTTLS relay.
///
/// The SMTP connection is set up per send, so relay and connection errors
/// surface from [`MailTransport::send`] like any other delivery failure.
pub struct SmtpMailer {
    host: String,
    port: u16,
    credentials: Credentials,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Self {
        SmtpMailer {
            host: SMTP_HOST.to_string(),
            port: SMTP_PORT,
            credentials: Credentials::new(
                config.mailbox.email.to_string(),
                config.app_password.clone(),
            ),
        }
    }
}

impl fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl MailTransport for SmtpMailer {
    #[instrument(level = "info", skip_all, fields(host = %self.host, port = self.port))]
    async fn send(&self, message: Message) -> Result<(), NotifyError> {
        info!("Connecting to mail server");
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)?
            .port(self.port)
            .credentials(self.credentials.clone())
            .build();

        let response = transport.send(message).await?;
        info!(code = %response.code(), "Mail server accepted message");
        Ok(())
    }
}

/// Build the report message for `date`.
///
/// With `articles_found` set, `report` (if any) is read and attached under
/// its base name.
///
/// # Errors
///
/// * [`NotifyError::Attachment`] - the report file cannot be read
/// * [`NotifyError::Compose`] - the message builder rejected a header or part
pub async fn compose(
    mailbox: &Mailbox,
    report: Option<&Path>,
    articles_found: bool,
    date: NaiveDate,
) -> Result<Message, NotifyError> {
    let builder = Message::builder().from(mailbox.clone()).to(mailbox.clone());

    if !articles_found {
        let parts =
            MultiPart::mixed().singlepart(SinglePart::plain(NOTHING_FOUND_BODY.to_string()));
        return Ok(builder
            .subject(format!("[{date}] News monitoring: system OK"))
            .multipart(parts)?);
    }

    let mut parts = MultiPart::mixed().singlepart(SinglePart::plain(FOUND_BODY.to_string()));
    if let Some(path) = report {
        let bytes = fs::read(path)
            .await
            .map_err(|source| NotifyError::Attachment {
                path: path.to_path_buf(),
                source,
            })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        info!(file = %name, bytes = bytes.len(), "Attached report");
        let content_type = ContentType::parse(XLSX_CONTENT_TYPE)?;
        parts = parts.singlepart(Attachment::new(name).body(bytes, content_type));
    }

    Ok(builder
        .subject(format!("[{date}] News monitoring report (articles found)"))
        .multipart(parts)?)
}

/// Send the daily message, then remove `report` from disk.
///
/// Never fails: compose and transport errors are logged and reported through
/// the returned [`Delivery`]. Cleanup runs in every case.
#[instrument(level = "info", skip_all, fields(articles_found = articles_found, %date))]
pub async fn notify<T: MailTransport>(
    transport: &T,
    mailbox: &Mailbox,
    report: Option<&Path>,
    articles_found: bool,
    date: NaiveDate,
) -> Delivery {
    let delivery = match compose(mailbox, report, articles_found, date).await {
        Ok(message) => match transport.send(message).await {
            Ok(()) => {
                info!(to = %mailbox, "Email sent");
                Delivery::Sent
            }
            Err(e) => {
                error!(error = %e, "Email send failed");
                Delivery::Failed
            }
        },
        Err(e) => {
            error!(error = %e, "Could not compose email; not sending");
            Delivery::Aborted
        }
    };

    if let Some(path) = report {
        remove_report(path).await;
    }
    delivery
}

async fn remove_report(path: &Path) {
    match fs::try_exists(path).await {
        Ok(true) => match fs::remove_file(path).await {
            Ok(()) => info!(path = %path.display(), "Removed report file"),
            Err(e) => error!(path = %path.display(), error = %e, "Failed to remove report file"),
        },
        Ok(false) => {}
        Err(e) => warn!(path = %path.display(), error = %e, "Cannot check report file"),
    }
}
