use std::time::Duration;

use anyhow::Result;
use log::debug;
use scraper::{Html, Selector};
use tokio::time::{sleep, Instant};

use super::{Element, Session};
use crate::config::settings::ScraperSettings;
use crate::errors::PageError;
use crate::http::RateLimitedClient;

/// Production page session: fetches pages with the rate-limited HTTP
/// client and parses them with `scraper`. The bounded wait re-fetches
/// the current URL until the deadline passes.
pub struct HttpSession {
    client: RateLimitedClient,
    document: Option<Html>,
    url: Option<String>,
    poll_interval: Duration,
}

impl HttpSession {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            document: None,
            url: None,
            poll_interval: Duration::from_millis(settings.poll_interval_ms),
        })
    }

    async fn fetch_document(&mut self, url: &str) -> Result<Html, PageError> {
        let response = self.client.get(url).await.map_err(|e| PageError::Navigation {
            url: url.to_string(),
            message: format!("{e:#}"),
        })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(PageError::ServerError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // A missing profile comes back as a 404 whose body is the site's
        // error page. The body must still load so the error-page marker
        // check can tell "no such user" apart from a broken fetch.
        let text = response.text().await.map_err(|e| PageError::Navigation {
            url: url.to_string(),
            message: format!("{e:#}"),
        })?;

        Ok(Html::parse_document(&text))
    }

    async fn refresh(&mut self) -> Result<(), PageError> {
        let url = self.url.clone().ok_or(PageError::NoPage)?;
        debug!("Re-fetching {url} while waiting for elements");
        self.document = Some(self.fetch_document(&url).await?);
        Ok(())
    }

    fn document(&self) -> Result<&Html, PageError> {
        self.document.as_ref().ok_or(PageError::NoPage)
    }
}

impl Session for HttpSession {
    async fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        debug!("Navigating to {url}");
        self.document = Some(self.fetch_document(url).await?);
        self.url = Some(url.to_string());
        Ok(())
    }

    fn find(&self, selector: &str) -> Result<Option<Element>, PageError> {
        let document = self.document()?;
        let selector = parse_selector(selector)?;
        Ok(document
            .select(&selector)
            .next()
            .map(|element| Element::from_element_ref(&element)))
    }

    fn find_all(&self, selector: &str) -> Result<Vec<Element>, PageError> {
        let document = self.document()?;
        let selector = parse_selector(selector)?;
        Ok(document
            .select(&selector)
            .map(|element| Element::from_element_ref(&element))
            .collect())
    }

    async fn wait_for_all(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Element>, PageError> {
        let deadline = Instant::now() + timeout;

        loop {
            let found = self.find_all(selector)?;
            if !found.is_empty() {
                return Ok(found);
            }
            if Instant::now() >= deadline {
                return Ok(Vec::new());
            }
            sleep(self.poll_interval).await;
            self.refresh().await?;
        }
    }
}

fn parse_selector(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|_| PageError::Selector(selector.to_string()))
}
