pub mod live;

#[cfg(test)]
pub mod stub;

pub use live::HttpSession;

use std::collections::HashMap;
use std::time::Duration;

use crate::errors::PageError;

/// A snapshot of one page element: its text content and attributes.
/// Owned data, so query results stay valid across later navigations.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    text: String,
    attrs: HashMap<String, String>,
}

impl Element {
    pub(crate) fn from_element_ref(element: &scraper::ElementRef<'_>) -> Self {
        let text = element.text().collect::<String>().trim().to_string();
        let attrs = element
            .value()
            .attrs()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { text, attrs }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// One browsing session over profile pages. Navigation mutates shared
/// state that the query methods read, so a caller must hold exclusive
/// access to the session for a full navigate-then-read flow.
#[allow(async_fn_in_trait)]
pub trait Session {
    /// Load the page at `url`, replacing the current document.
    async fn navigate(&mut self, url: &str) -> Result<(), PageError>;

    /// First element matching `selector` on the current document.
    fn find(&self, selector: &str) -> Result<Option<Element>, PageError>;

    /// All elements matching `selector` on the current document.
    fn find_all(&self, selector: &str) -> Result<Vec<Element>, PageError>;

    /// Like `find_all`, but keeps looking until `timeout` has elapsed.
    /// A timeout yields an empty list, not an error: some sections are
    /// legitimately absent and the caller decides what that means.
    async fn wait_for_all(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Vec<Element>, PageError>;
}
