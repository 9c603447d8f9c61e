use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use umbrella_brand::config::load_brand_config;
use umbrella_brand::logging;
use umbrella_brand::mail::{Campaign, Recipient, ResendClient};

/// Send a single welcome email to check template and branding.
#[derive(Parser)]
#[command(name = "test-send", version)]
struct Cli {
    /// Recipient address; falls back to `mail.test_recipient` in config.json
    #[arg(long)]
    to: Option<String>,
    #[arg(long, default_value = "Tom")]
    first_name: String,
    #[arg(long, default_value = "resend/welcome-waitlist.html")]
    template: PathBuf,
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let config = load_brand_config();

    let Some(to) = cli.to.or_else(|| config.mail.test_recipient.clone()) else {
        bail!("no recipient: pass --to or set mail.test_recipient in config.json");
    };
    let campaign = config.mail.apply_to(Campaign::default());

    let transport = match ResendClient::from_env() {
        Ok(client) => client,
        Err(err) => {
            if let Some(hint) = err.hint() {
                eprintln!("{hint}");
            }
            return Err(err.into());
        }
    };
    tracing::info!("API key found");

    let template = fs::read_to_string(&cli.template)
        .with_context(|| format!("template not found at: {}", cli.template.display()))?;
    tracing::info!(template = %cli.template.display(), "template loaded");

    let recipient = Recipient::new(to, cli.first_name);
    println!("Sending test email to {} ({})", recipient.email, campaign.subject);

    match campaign.send_one(&transport, &recipient, &template) {
        Ok(receipt) => {
            println!("Test email sent. Message ID: {}", receipt.id);
            println!("Check inbox: {}", recipient.email);
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = err.hint() {
                eprintln!("Tip: {hint}");
            }
            Err(err).context("failed to send test email")
        }
    }
}
