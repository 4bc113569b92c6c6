use std::collections::HashMap;
use std::time::Duration;

use scraper::{Html, Selector};

use super::{Element, Session};
use crate::errors::PageError;

/// In-memory session for tests: serves canned HTML keyed by URL and
/// records every navigation. Waiting resolves immediately against the
/// current document.
pub struct StubSession {
    pages: HashMap<String, String>,
    current: Option<Html>,
    pub navigations: Vec<String>,
}

impl StubSession {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            current: None,
            navigations: Vec::new(),
        }
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    fn document(&self) -> Result<&Html, PageError> {
        self.current.as_ref().ok_or(PageError::NoPage)
    }
}

impl Session for StubSession {
    async fn navigate(&mut self, url: &str) -> Result<(), PageError> {
        self.navigations.push(url.to_string());
        let html = self.pages.get(url).ok_or_else(|| PageError::Navigation {
            url: url.to_string(),
            message: "no stub page registered".to_string(),
        })?;
        self.current = Some(Html::parse_document(html));
        Ok(())
    }

    fn find(&self, selector: &str) -> Result<Option<Element>, PageError> {
        let document = self.document()?;
        let selector = parse(selector)?;
        Ok(document
            .select(&selector)
            .next()
            .map(|element| Element::from_element_ref(&element)))
    }

    fn find_all(&self, selector: &str) -> Result<Vec<Element>, PageError> {
        let document = self.document()?;
        let selector = parse(selector)?;
        Ok(document
            .select(&selector)
            .map(|element| Element::from_element_ref(&element))
            .collect())
    }

    async fn wait_for_all(
        &mut self,
        selector: &str,
        _timeout: Duration,
    ) -> Result<Vec<Element>, PageError> {
        self.find_all(selector)
    }
}

fn parse(selector: &str) -> Result<Selector, PageError> {
    Selector::parse(selector).map_err(|_| PageError::Selector(selector.to_string()))
}
