use url::Url;

use super::{MailResult, Recipient};

/// Replace every `{{key}}` placeholder with its value.
pub fn render_template<K, V>(template: &str, vars: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    vars.iter().fold(template.to_string(), |html, (key, value)| {
        html.replace(&format!("{{{{{}}}}}", key.as_ref()), value.as_ref())
    })
}

/// Placeholders filled in the welcome email.
pub fn welcome_vars(
    recipient: &Recipient,
    app_url: &str,
) -> MailResult<Vec<(&'static str, String)>> {
    let base = app_url.trim_end_matches('/');
    let unsubscribe = Url::parse_with_params(
        &format!("{base}/unsubscribe"),
        &[("email", recipient.email.as_str())],
    )?;
    Ok(vec![
        ("firstName", recipient.first_name.clone()),
        ("email", recipient.email.clone()),
        ("appUrl", base.to_string()),
        ("unsubscribeUrl", unsubscribe.to_string()),
    ])
}
