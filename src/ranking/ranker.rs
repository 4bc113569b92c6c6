use log::{debug, info};

use super::types::{ComparisonTable, MarkerAssignment, MAX_COMPARED_USERS};
use crate::errors::CompareError;
use crate::fetchers::ProfileScraper;
use crate::page::Session;

/// Result of a multi-user comparison: the merged rating table plus the
/// marker each user was assigned.
#[derive(Debug)]
pub struct Comparison {
    pub table: ComparisonTable,
    pub markers: MarkerAssignment,
}

/// Scrapes every username in input order and merges the records into
/// one comparison. The first missing user aborts the whole batch;
/// nothing after it is fetched.
pub async fn compare_users<S: Session>(
    scraper: &ProfileScraper,
    session: &mut S,
    usernames: &[String],
) -> Result<Comparison, CompareError> {
    if usernames.len() > MAX_COMPARED_USERS {
        return Err(CompareError::TooManyUsers {
            given: usernames.len(),
            limit: MAX_COMPARED_USERS,
        });
    }

    info!("Comparing {} users", usernames.len());

    let mut table = ComparisonTable::new();
    let mut markers = MarkerAssignment::new();

    for username in usernames {
        let stats = scraper.extract(session, username).await?;

        // Two inputs may resolve to the same canonical profile. The
        // second occurrence keeps the first marker and is not re-added.
        if markers.assign(&stats.username).is_none() {
            debug!("'{username}' already compared as '{}'", stats.username);
            continue;
        }

        table.add_user(&stats.username, &stats.ratings);
    }

    Ok(Comparison { table, markers })
}
