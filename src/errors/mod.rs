use thiserror::Error;

/// Failures of the page-query capability itself (transport, selectors).
/// Deliberately distinct from `ScrapeError::ProfileNotFound`: a page that
/// cannot be loaded is not evidence that the user does not exist.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to load {url}: {message}")]
    Navigation { url: String, message: String },

    #[error("{url} returned server error {status}")]
    ServerError { url: String, status: u16 },

    #[error("invalid selector '{0}'")]
    Selector(String),

    #[error("no page loaded")]
    NoPage,
}

/// Errors from the chess.com profile extraction pipeline.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("user '{0}' does not exist")]
    ProfileNotFound(String),

    #[error("invalid username '{0}'")]
    InvalidUsername(String),

    #[error("profile page structure changed: {0}")]
    StructuralMismatch(String),

    #[error(transparent)]
    Page(#[from] PageError),
}

/// Errors from the multi-user comparison pipeline.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("cannot compare {given} users at once (limit is {limit})")]
    TooManyUsers { given: usize, limit: usize },

    #[error(transparent)]
    Scrape(#[from] ScrapeError),
}
