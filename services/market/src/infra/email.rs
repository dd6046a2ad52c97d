//! Mail delivery through the HTTP relay.

use anyhow::Context as _;

use crate::domain::repository::Mailer;

#[derive(Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    base_url: String,
    from: String,
}

impl RelayMailer {
    pub fn new(base_url: &str, from: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            from: from.to_owned(),
        }
    }
}

impl Mailer for RelayMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), anyhow::Error> {
        let url = format!("{}/messages", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "from": self.from,
                "to": to,
                "subject": subject,
                "body": body,
            }))
            .send()
            .await
            .context("send mail relay request")?;
        if !resp.status().is_success() {
            anyhow::bail!("mail relay rejected message: {}", resp.status());
        }
        Ok(())
    }
}
