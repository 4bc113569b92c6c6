use crate::rate_limiter::RateLimiter;
use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

/// HTTP client with built-in rate limiting and optional bearer auth
pub struct RateLimitedClient {
    client: Client,
    rate_limiter: RateLimiter,
    bearer_token: Option<String>,
}

impl RateLimitedClient {
    pub fn new(user_agent: &str, timeout_secs: u64, rate_limit_ms: u64) -> Result<Self> {
        let client = Self::build_client(user_agent, timeout_secs)?;
        let rate_limiter = RateLimiter::new(rate_limit_ms);

        Ok(Self {
            client,
            rate_limiter,
            bearer_token: None,
        })
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub async fn get(&mut self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.send_get_request(url).await
    }

    pub async fn post_form(
        &mut self,
        url: &str,
        form: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        self.rate_limiter.wait().await;
        self.send_post_form(url, form).await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client> {
        Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")
    }

    async fn send_get_request(&self, url: &str) -> Result<reqwest::Response> {
        self.authorize(self.client.get(url))
            .send()
            .await
            .context("Failed to send GET request")
    }

    async fn send_post_form(
        &self,
        url: &str,
        form: &[(&str, String)],
    ) -> Result<reqwest::Response> {
        self.authorize(self.client.post(url))
            .form(form)
            .send()
            .await
            .context("Failed to send POST request")
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}
