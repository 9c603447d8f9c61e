use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod campaign;
pub mod recipients;
pub mod resend;
pub mod template;
pub mod waitlist;

pub use campaign::{Campaign, Pacer, SendReport, ThreadPacer};
pub use recipients::{dedup_recipients, load_recipients, parse_recipients, Recipient};
pub use resend::{EmailRequest, EmailTag, EmailTransport, ResendClient, SendReceipt};
pub use template::{render_template, welcome_vars};
pub use waitlist::{run_waitlist, WaitlistOptions, WaitlistOutcome};

pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";
pub const API_KEY_ENV: &str = "RESEND_API_KEY";
pub const DEFAULT_FROM: &str = "Umbrella <onboarding@resend.dev>";
pub const DEFAULT_SUBJECT: &str = "Welcome to Umbrella - You're In! 🎵";
pub const DEFAULT_APP_URL: &str = "https://umbrellalive.com";
pub const DEFAULT_SEND_DELAY_MS: u64 = 2_000;

pub type MailResult<T> = std::result::Result<T, MailError>;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("RESEND_API_KEY not found in environment")]
    MissingApiKey,
    #[error("failed to read {path}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}")]
    Write { path: PathBuf, source: io::Error },
    #[error("malformed recipient row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
    #[error("failed to encode csv")]
    Csv(#[from] csv::Error),
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("network error: {message}")]
    Transport { message: String },
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("unexpected api response: {message}")]
    InvalidResponse { message: String },
}

impl MailError {
    /// Operator hint for well-known API rejections.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Api { status: 401, .. } => Some("Check your API key is valid"),
            Self::Api { status: 422, .. } => {
                Some("Check the \"from\" email domain is verified in Resend")
            }
            Self::MissingApiKey => Some("Set it with: export RESEND_API_KEY=re_your_key_here"),
            _ => None,
        }
    }
}
