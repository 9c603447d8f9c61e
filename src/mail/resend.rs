use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{MailError, MailResult, API_KEY_ENV, RESEND_ENDPOINT};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailTag {
    pub name: String,
    pub value: String,
}

impl EmailTag {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Body of `POST /emails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<EmailTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendReceipt {
    pub id: String,
}

pub trait EmailTransport {
    fn send(&self, request: &EmailRequest) -> MailResult<SendReceipt>;
}

pub struct ResendClient {
    client: reqwest::blocking::Client,
    api_key: String,
    endpoint: String,
}

impl ResendClient {
    pub fn new(api_key: impl Into<String>) -> MailResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| MailError::Transport {
                message: err.to_string(),
            })?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: RESEND_ENDPOINT.to_string(),
        })
    }

    pub fn from_env() -> MailResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(MailError::MissingApiKey)?;
        Self::new(api_key)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

impl EmailTransport for ResendClient {
    fn send(&self, request: &EmailRequest) -> MailResult<SendReceipt> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .map_err(|err| MailError::Transport {
                message: err.to_string(),
            })?;

        let status = response.status();
        let body: serde_json::Value = response.json().map_err(|err| MailError::InvalidResponse {
            message: err.to_string(),
        })?;
        interpret_response(status.as_u16(), body)
    }
}

/// Map a Resend response body to a receipt or an API error.
pub(crate) fn interpret_response(status: u16, body: serde_json::Value) -> MailResult<SendReceipt> {
    if !(200..300).contains(&status) {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string());
        return Err(MailError::Api { status, message });
    }
    serde_json::from_value(body).map_err(|err| MailError::InvalidResponse {
        message: err.to_string(),
    })
}
