use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{
    render_template, welcome_vars, EmailRequest, EmailTag, EmailTransport, MailError, MailResult,
    Recipient, SendReceipt, DEFAULT_APP_URL, DEFAULT_FROM, DEFAULT_SEND_DELAY_MS, DEFAULT_SUBJECT,
};

pub const SEND_LOG_FILE: &str = "send-log.txt";
pub const FAILED_FILE: &str = "failed.txt";

/// Waits between sends to stay under the API rate limit.
pub trait Pacer {
    fn pause(&self, delay: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivered {
    pub recipient: Recipient,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failed {
    pub recipient: Recipient,
    pub error: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SendReport {
    pub delivered: Vec<Delivered>,
    pub failed: Vec<Failed>,
}

impl SendReport {
    pub fn total(&self) -> usize {
        self.delivered.len() + self.failed.len()
    }

    pub fn render_log(&self, timestamp: &str) -> String {
        let mut log = format!(
            "Umbrella Waitlist Email Send - {timestamp}\n\nTotal: {}\nSent: {}\nFailed: {}\n\nSENT:\n",
            self.total(),
            self.delivered.len(),
            self.failed.len()
        );
        for sent in &self.delivered {
            log.push_str(&format!(
                "  ✅ {} <{}> - {}\n",
                sent.recipient.first_name, sent.recipient.email, sent.message_id
            ));
        }
        log.push_str("\nFAILED:\n");
        for failed in &self.failed {
            log.push_str(&format!(
                "  ❌ {} <{}> - {}\n",
                failed.recipient.first_name, failed.recipient.email, failed.error
            ));
        }
        log
    }

    /// `email,firstName,error` per failed recipient, quoted where needed.
    pub fn failed_csv(&self) -> MailResult<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        for failed in &self.failed {
            writer.write_record([
                failed.recipient.email.as_str(),
                failed.recipient.first_name.as_str(),
                failed.error.as_str(),
            ])?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Write the send log, plus the failed list when anything failed.
    pub fn write_reports(&self, dir: &Path, timestamp: &str) -> MailResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        let log_path = dir.join(SEND_LOG_FILE);
        write_file(&log_path, &self.render_log(timestamp))?;
        tracing::info!(path = %log_path.display(), "send log saved");
        written.push(log_path);

        if !self.failed.is_empty() {
            let failed_path = dir.join(FAILED_FILE);
            write_file(&failed_path, &self.failed_csv()?)?;
            tracing::warn!(
                path = %failed_path.display(),
                count = self.failed.len(),
                "failed emails saved"
            );
            written.push(failed_path);
        }
        Ok(written)
    }
}

fn write_file(path: &Path, contents: &str) -> MailResult<()> {
    fs::write(path, contents).map_err(|source| MailError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Envelope settings shared by every email in a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    pub from: String,
    pub subject: String,
    pub app_url: String,
    pub tags: Vec<EmailTag>,
    pub delay: Duration,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            from: DEFAULT_FROM.to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            tags: Vec::new(),
            delay: Duration::from_millis(DEFAULT_SEND_DELAY_MS),
        }
    }
}

impl Campaign {
    pub fn waitlist_welcome() -> Self {
        Self {
            tags: vec![
                EmailTag::new("campaign", "waitlist-welcome"),
                EmailTag::new("audience", "beta-users"),
            ],
            ..Self::default()
        }
    }

    pub fn request_for(&self, recipient: &Recipient, template: &str) -> MailResult<EmailRequest> {
        let vars = welcome_vars(recipient, &self.app_url)?;
        Ok(EmailRequest {
            from: self.from.clone(),
            to: recipient.email.clone(),
            subject: self.subject.clone(),
            html: render_template(template, &vars),
            tags: self.tags.clone(),
        })
    }

    pub fn send_one(
        &self,
        transport: &dyn EmailTransport,
        recipient: &Recipient,
        template: &str,
    ) -> MailResult<SendReceipt> {
        let request = self.request_for(recipient, template)?;
        transport.send(&request)
    }

    /// Send to each recipient in order. Failures are recorded and the loop
    /// moves on; there is no retry.
    pub fn run(
        &self,
        transport: &dyn EmailTransport,
        recipients: &[Recipient],
        template: &str,
        pacer: &dyn Pacer,
    ) -> SendReport {
        let mut report = SendReport::default();
        let total = recipients.len();

        for (index, recipient) in recipients.iter().enumerate() {
            let progress = format!("[{}/{total}]", index + 1);
            match self.send_one(transport, recipient, template) {
                Ok(receipt) => {
                    tracing::info!(
                        %progress,
                        email = %recipient.email,
                        id = %receipt.id,
                        "sent to {}",
                        recipient.first_name
                    );
                    report.delivered.push(Delivered {
                        recipient: recipient.clone(),
                        message_id: receipt.id,
                    });
                    if index + 1 < total {
                        pacer.pause(self.delay);
                    }
                }
                Err(err) => {
                    tracing::error!(
                        %progress,
                        email = %recipient.email,
                        error = %err,
                        "send failed"
                    );
                    report.failed.push(Failed {
                        recipient: recipient.clone(),
                        error: err.to_string(),
                    });
                }
            }
        }
        report
    }
}
