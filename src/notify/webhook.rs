use super::types::Payload;
use crate::errors::{Result, WatchError};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

pub trait Webhook {
    fn send(&self, payload: &Payload) -> Result<()>;
}

pub struct HttpWebhook {
    url: String,
    client: Client,
}

impl HttpWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: Client::new(),
        }
    }

    #[cfg(test)]
    pub fn with_client(url: impl Into<String>, client: Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }
}

impl Webhook for HttpWebhook {
    fn send(&self, payload: &Payload) -> Result<()> {
        let body = serde_json::to_string(payload)?;
        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(WatchError::Webhook(format!("{}: {}", status, body.trim())));
        }
        Ok(())
    }
}

#[cfg(test)]
pub struct MockWebhook {
    pub failing: bool,
    pub sent: std::sync::Mutex<Vec<Payload>>,
}

#[cfg(test)]
impl MockWebhook {
    pub fn new() -> Self {
        Self {
            failing: false,
            sent: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_failure(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn get_sent(&self) -> Vec<Payload> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Webhook for MockWebhook {
    fn send(&self, payload: &Payload) -> Result<()> {
        self.sent.lock().unwrap().push(payload.clone());
        if self.failing {
            return Err(WatchError::Webhook("502 Bad Gateway: ".to_string()));
        }
        Ok(())
    }
}
