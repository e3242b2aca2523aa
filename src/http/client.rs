use anyhow::{Context, Result};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use reqwest::Client;
use std::time::Duration;

use crate::config::EspnCredentials;

/// HTTP client that carries the league cookies on every request
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout_secs: u64, credentials: &EspnCredentials) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs, credentials)?;
        Ok(Self { client })
    }

    pub async fn get(&self, url: &str) -> Result<reqwest::Response> {
        self.send_get_request(url).await
    }

    fn build_client(
        user_agent: &str,
        timeout_secs: u64,
        credentials: &EspnCredentials,
    ) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::build_headers(credentials)?)
            .build()
            .context("Failed to build HTTP client")
    }

    fn build_headers(credentials: &EspnCredentials) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = credentials.cookie_header() {
            let value = HeaderValue::from_str(&cookie).context("Invalid ESPN cookie value")?;
            headers.insert(COOKIE, value);
        }
        Ok(headers)
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.client
            .get(url)
            .send()
            .await
            .context("Failed to send GET request")
    }
}
