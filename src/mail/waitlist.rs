use std::fs;
use std::path::PathBuf;

use super::{
    dedup_recipients, load_recipients, Campaign, EmailTransport, MailError, MailResult, Pacer,
    Recipient, SendReport,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistOptions {
    pub csv_path: PathBuf,
    pub template_path: PathBuf,
    pub report_dir: PathBuf,
    pub dry_run: bool,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitlistOutcome {
    /// Recipients that would have been mailed.
    DryRun(Vec<Recipient>),
    Cancelled,
    Sent {
        report: SendReport,
        reports_written: Vec<PathBuf>,
    },
}

/// Load, dedup and cap the recipient list. A limit of zero means no cap.
pub fn prepare_recipients(options: &WaitlistOptions) -> MailResult<Vec<Recipient>> {
    let mut recipients = dedup_recipients(load_recipients(&options.csv_path)?);
    if let Some(limit) = options.limit.filter(|&limit| limit > 0) {
        recipients.truncate(limit);
        tracing::info!(limit, "limiting recipients");
    }
    tracing::info!(total = recipients.len(), "recipients loaded");
    Ok(recipients)
}

/// Run the waitlist send end to end.
///
/// `connect` is only invoked for a confirmed live run, so a dry run never
/// touches the network or the report directory.
pub fn run_waitlist<T, C, F>(
    options: &WaitlistOptions,
    campaign: &Campaign,
    connect: C,
    pacer: &dyn Pacer,
    confirm: F,
    timestamp: &str,
) -> MailResult<WaitlistOutcome>
where
    T: EmailTransport,
    C: FnOnce() -> MailResult<T>,
    F: FnOnce(usize) -> bool,
{
    let recipients = prepare_recipients(options)?;

    if options.dry_run {
        tracing::info!("dry run; no emails will be sent");
        return Ok(WaitlistOutcome::DryRun(recipients));
    }

    if !confirm(recipients.len()) {
        tracing::info!("send cancelled");
        return Ok(WaitlistOutcome::Cancelled);
    }

    let template = fs::read_to_string(&options.template_path).map_err(|source| MailError::Read {
        path: options.template_path.clone(),
        source,
    })?;
    let transport = connect()?;

    let report = campaign.run(&transport, &recipients, &template, pacer);
    tracing::info!(
        sent = report.delivered.len(),
        failed = report.failed.len(),
        total = recipients.len(),
        "send complete"
    );
    let reports_written = report.write_reports(&options.report_dir, timestamp)?;
    Ok(WaitlistOutcome::Sent {
        report,
        reports_written,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::Path;

    use super::*;
    use crate::mail::campaign::test_support::{FakeTransport, RecordingPacer};
    use crate::mail::campaign::{FAILED_FILE, SEND_LOG_FILE};

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("umbrella-waitlist-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    fn options(root: &Path, dry_run: bool, limit: Option<usize>) -> WaitlistOptions {
        fs::write(
            root.join("waitlist.csv"),
            "email,firstName\na@x.io,Ann\nA@X.io,Annie\nb@x.io,Bo\nc@x.io,Cy\n",
        )
        .unwrap();
        fs::write(root.join("welcome.html"), "Hi {{firstName}}").unwrap();
        WaitlistOptions {
            csv_path: root.join("waitlist.csv"),
            template_path: root.join("welcome.html"),
            report_dir: root.to_path_buf(),
            dry_run,
            limit,
        }
    }

    #[test]
    fn dry_run_never_connects_or_writes_reports() {
        with_temp_root(|root| {
            let connected = Cell::new(false);
            let outcome = run_waitlist(
                &options(root, true, None),
                &Campaign::waitlist_welcome(),
                || {
                    connected.set(true);
                    Ok(FakeTransport::new())
                },
                &RecordingPacer::default(),
                |_| panic!("dry run must not prompt"),
                "now",
            )
            .unwrap();

            let WaitlistOutcome::DryRun(recipients) = outcome else {
                panic!("expected dry run outcome");
            };
            assert_eq!(recipients.len(), 3);
            assert!(!connected.get());
            assert!(!root.join(SEND_LOG_FILE).exists());
            assert!(!root.join(FAILED_FILE).exists());
        });
    }

    #[test]
    fn limit_caps_after_dedup() {
        with_temp_root(|root| {
            let recipients = prepare_recipients(&options(root, true, Some(2))).unwrap();
            assert_eq!(
                recipients,
                [Recipient::new("a@x.io", "Ann"), Recipient::new("b@x.io", "Bo")]
            );
        });
    }

    #[test]
    fn zero_limit_keeps_every_recipient() {
        with_temp_root(|root| {
            let recipients = prepare_recipients(&options(root, true, Some(0))).unwrap();
            assert_eq!(recipients.len(), 3);
        });
    }

    #[test]
    fn declined_confirmation_cancels() {
        with_temp_root(|root| {
            let outcome = run_waitlist(
                &options(root, false, None),
                &Campaign::default(),
                || -> MailResult<FakeTransport> { panic!("cancelled run must not connect") },
                &RecordingPacer::default(),
                |count| {
                    assert_eq!(count, 3);
                    false
                },
                "now",
            )
            .unwrap();
            assert_eq!(outcome, WaitlistOutcome::Cancelled);
            assert!(!root.join(SEND_LOG_FILE).exists());
        });
    }

    #[test]
    fn live_run_sends_and_writes_reports() {
        with_temp_root(|root| {
            let outcome = run_waitlist(
                &options(root, false, None),
                &Campaign::default(),
                || Ok(FakeTransport::failing_for(&["c@x.io"])),
                &RecordingPacer::default(),
                |_| true,
                "2026-10-19T00:00:00.000Z",
            )
            .unwrap();

            let WaitlistOutcome::Sent {
                report,
                reports_written,
            } = outcome
            else {
                panic!("expected sent outcome");
            };
            assert_eq!(report.delivered.len(), 2);
            assert_eq!(report.failed.len(), 1);
            assert_eq!(reports_written.len(), 2);
            assert_eq!(
                fs::read_to_string(root.join(FAILED_FILE)).unwrap(),
                "c@x.io,Cy,api error (422): rejected\n"
            );
        });
    }

    #[test]
    fn missing_csv_is_a_read_error() {
        with_temp_root(|root| {
            let mut opts = options(root, true, None);
            opts.csv_path = root.join("absent.csv");
            let err = prepare_recipients(&opts).unwrap_err();
            assert!(matches!(err, MailError::Read { .. }));
        });
    }
}
