use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Parser;

use umbrella_brand::config::load_brand_config;
use umbrella_brand::logging;
use umbrella_brand::mail::{
    run_waitlist, Campaign, ResendClient, ThreadPacer, WaitlistOptions, WaitlistOutcome,
};

/// Send the waitlist welcome email through Resend, one recipient at a time.
#[derive(Parser)]
#[command(name = "send-waitlist", version)]
struct Cli {
    /// List recipients without sending anything
    #[arg(long)]
    dry_run: bool,
    /// Only send to the first N unique recipients (0 sends to everyone)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
    /// Recipient CSV (`email,firstName` with a header row)
    #[arg(long, default_value = "resend/waitlist.csv")]
    csv: PathBuf,
    /// HTML template with {{firstName}}-style placeholders
    #[arg(long, default_value = "resend/welcome-waitlist.html")]
    template: PathBuf,
    /// Where send-log.txt and failed.txt are written
    #[arg(long, default_value = "resend")]
    report_dir: PathBuf,
    /// Skip the interactive confirmation
    #[arg(long)]
    yes: bool,
}

fn confirm(count: usize) -> bool {
    print!("\nSend welcome email to {count} people? (yes/no): ");
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("yes"),
        Err(_) => false,
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = load_brand_config();
    let campaign = config.mail.apply_to(Campaign::waitlist_welcome());

    let options = WaitlistOptions {
        csv_path: cli.csv,
        template_path: cli.template,
        report_dir: cli.report_dir,
        dry_run: cli.dry_run,
        limit: cli.limit,
    };
    let skip_prompt = cli.yes;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    let outcome = run_waitlist(
        &options,
        &campaign,
        ResendClient::from_env,
        &ThreadPacer,
        |count| skip_prompt || confirm(count),
        &timestamp,
    )
    .context("waitlist send failed")?;

    match outcome {
        WaitlistOutcome::DryRun(recipients) => {
            println!("DRY RUN - no emails will be sent\n\nRecipients:");
            for (index, recipient) in recipients.iter().enumerate() {
                println!("  {}. {} <{}>", index + 1, recipient.first_name, recipient.email);
            }
            println!("\nRun without --dry-run to send emails");
        }
        WaitlistOutcome::Cancelled => println!("Cancelled"),
        WaitlistOutcome::Sent {
            report,
            reports_written,
        } => {
            let total = report.total();
            println!("\n{}\nSUMMARY\n{}", "=".repeat(50), "=".repeat(50));
            println!("Sent: {}/{total}", report.delivered.len());
            println!("Failed: {}/{total}", report.failed.len());
            for path in reports_written {
                println!("Saved: {}", path.display());
            }
        }
    }
    Ok(())
}
