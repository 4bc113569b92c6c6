use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, warn};
use regex::Regex;

use crate::config::settings::ScraperSettings;
use crate::domain::{GeneralActivityRecord, Mode, ProfileStats, RatingRecord};
use crate::errors::ScrapeError;
use crate::page::Session;

const ERROR_PAGE: &str = ".error-pages-wrapper";
const MODE_NAMES: &str = ".stat-section-section-link-name";
const MODE_RATINGS: &str = ".stat-section-user-rating";
const ACTIVITY_LABELS: &str = ".sidebar-ratings-label";
const ACTIVITY_VALUES: &str = ".sidebar-ratings-rating";
const PROFILE_HEADER_IMAGE: &str = ".post-view-meta-image";
const PROFILE_ROOT: &str = "#view-profile";

const USERNAME_PATTERN: &str = "^[A-Za-z0-9_-]{1,50}$";

/// Extracts rating and activity records from a member profile page
pub struct ProfileScraper {
    base_url: String,
    username_regex: Regex,
    ratings_wait: Duration,
    fallback_avatar_url: String,
}

impl ProfileScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let username_regex = Self::compile_username_regex()?;

        Ok(Self {
            base_url: settings.base_url.to_string(),
            username_regex,
            ratings_wait: Duration::from_millis(settings.ratings_wait_ms),
            fallback_avatar_url: settings.fallback_avatar_url.to_string(),
        })
    }

    /// Navigate to the member page of `username` and pull a full snapshot
    /// of their stats. Fails without a partial record when the platform
    /// serves its error page for the name.
    pub async fn extract<S: Session>(
        &self,
        session: &mut S,
        username: &str,
    ) -> Result<ProfileStats, ScrapeError> {
        self.validate_username(username)?;

        let url = self.build_profile_url(username);
        debug!("Extracting profile stats from {url}");
        session.navigate(&url).await?;

        if session.find(ERROR_PAGE)?.is_some() {
            return Err(ScrapeError::ProfileNotFound(username.to_string()));
        }

        let ratings = self.extract_ratings(session).await?;
        let activity = Self::extract_activity(session)?;
        let (username, avatar_url) = self.resolve_identity(session)?;

        Ok(ProfileStats {
            username,
            avatar_url,
            ratings,
            activity,
        })
    }

    // --- Construction Helpers ---

    fn compile_username_regex() -> Result<Regex> {
        Regex::new(USERNAME_PATTERN).context("Failed to compile username regex")
    }

    // --- Input Validation ---

    fn validate_username(&self, username: &str) -> Result<(), ScrapeError> {
        if self.username_regex.is_match(username) {
            Ok(())
        } else {
            Err(ScrapeError::InvalidUsername(username.to_string()))
        }
    }

    // --- URL Building ---

    fn build_profile_url(&self, username: &str) -> String {
        format!("{}/member/{}", self.base_url, urlencoding::encode(username))
    }

    // --- Rating Extraction ---

    async fn extract_ratings<S: Session>(
        &self,
        session: &mut S,
    ) -> Result<RatingRecord, ScrapeError> {
        // Stat sections render late. An existing user with no rated games
        // has none at all, so an empty list after the wait is a valid
        // outcome rather than an error.
        let names = session.wait_for_all(MODE_NAMES, self.ratings_wait).await?;
        let values = session.find_all(MODE_RATINGS)?;

        if names.len() != values.len() {
            return Err(ScrapeError::StructuralMismatch(format!(
                "{} mode names against {} rating values",
                names.len(),
                values.len()
            )));
        }

        let mut ratings = RatingRecord::new();
        for (name, value) in names.iter().zip(&values) {
            match Mode::from_label(name.text()) {
                Some(mode) => ratings.set(mode, value.text()),
                None => warn!("Skipping unknown rating section '{}'", name.text()),
            }
        }

        Ok(ratings)
    }

    // --- Activity Extraction ---

    fn extract_activity<S: Session>(session: &S) -> Result<GeneralActivityRecord, ScrapeError> {
        let labels = session.find_all(ACTIVITY_LABELS)?;
        let values = session.find_all(ACTIVITY_VALUES)?;

        if labels.len() != values.len() {
            return Err(ScrapeError::StructuralMismatch(format!(
                "{} sidebar labels against {} sidebar values",
                labels.len(),
                values.len()
            )));
        }

        let mut activity = GeneralActivityRecord::new();
        for (label, value) in labels.iter().zip(&values) {
            activity.push(label.text(), value.text());
        }

        Ok(activity)
    }

    // --- Identity Extraction ---

    fn resolve_identity<S: Session>(&self, session: &S) -> Result<(String, String), ScrapeError> {
        let header = session.find(PROFILE_HEADER_IMAGE)?;
        let root = session.find(PROFILE_ROOT)?;

        let username = root
            .as_ref()
            .and_then(|element| element.attr("data-username"))
            .or_else(|| header.as_ref().and_then(|element| element.attr("alt")))
            .ok_or_else(|| {
                ScrapeError::StructuralMismatch("no element carries the username".to_string())
            })?
            .to_string();

        let avatar_url = match header.as_ref().and_then(|element| element.attr("src")) {
            Some(src) if !src.ends_with("svg") => src.to_string(),
            _ => self.fallback_avatar_url.clone(),
        };

        Ok((username, avatar_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::stub::StubSession;

    fn scraper() -> ProfileScraper {
        ProfileScraper::new(&ScraperSettings::default()).unwrap()
    }

    fn profile_url(username: &str) -> String {
        format!("https://www.chess.com/member/{username}")
    }

    fn full_profile_page() -> &'static str {
        r#"
        <div id="view-profile" data-username="Hikaru"></div>
        <img class="post-view-meta-image" alt="Hikaru"
             src="https://images.chesscomfiles.com/hikaru.jpeg">
        <a class="stat-section-section-link-name">Blitz</a>
        <a class="stat-section-section-link-name">Bullet</a>
        <a class="stat-section-section-link-name">Puzzle Rush</a>
        <span class="stat-section-user-rating">3243</span>
        <span class="stat-section-user-rating">3391</span>
        <span class="stat-section-user-rating">59</span>
        <div class="sidebar-ratings-label">Games</div>
        <div class="sidebar-ratings-label">Puzzles</div>
        <div class="sidebar-ratings-rating">52,426</div>
        <div class="sidebar-ratings-rating">1,138</div>
        "#
    }

    fn error_page() -> &'static str {
        r#"<div class="error-pages-wrapper"><h1>404</h1></div>"#
    }

    #[tokio::test]
    async fn extracts_ratings_and_activity_from_a_full_profile() {
        let mut session =
            StubSession::new().with_page(profile_url("hikaru"), full_profile_page());

        let stats = scraper().extract(&mut session, "hikaru").await.unwrap();

        assert_eq!(stats.username, "Hikaru");
        assert_eq!(stats.avatar_url, "https://images.chesscomfiles.com/hikaru.jpeg");
        assert_eq!(stats.ratings.get(Mode::Blitz), Some("3243"));
        assert_eq!(stats.ratings.get(Mode::Bullet), Some("3391"));
        assert_eq!(stats.ratings.get(Mode::PuzzleRush), Some("59"));
        assert_eq!(stats.ratings.get(Mode::Daily), None);

        let activity: Vec<_> = stats.activity.iter().collect();
        assert_eq!(activity, vec![("Games", "52,426"), ("Puzzles", "1,138")]);
    }

    #[tokio::test]
    async fn missing_user_yields_not_found() {
        let mut session = StubSession::new().with_page(profile_url("ghost"), error_page());

        let result = scraper().extract(&mut session, "ghost").await;

        match result {
            Err(ScrapeError::ProfileNotFound(username)) => assert_eq!(username, "ghost"),
            other => panic!("expected ProfileNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn user_without_ratings_is_not_an_error() {
        let page = r#"
            <div id="view-profile" data-username="FreshAccount"></div>
            <img class="post-view-meta-image" alt="FreshAccount"
                 src="https://www.chess.com/bundles/web/images/noavatar_l.svg">
        "#;
        let mut session = StubSession::new().with_page(profile_url("freshaccount"), page);

        let stats = scraper().extract(&mut session, "freshaccount").await.unwrap();

        assert!(!stats.ratings.has_ratings());
        assert!(stats.activity.is_empty());
        assert_eq!(stats.username, "FreshAccount");
    }

    #[tokio::test]
    async fn svg_avatar_is_swapped_for_the_fallback() {
        let page = r#"
            <div id="view-profile" data-username="FreshAccount"></div>
            <img class="post-view-meta-image" alt="FreshAccount"
                 src="https://www.chess.com/bundles/web/images/noavatar_l.svg">
        "#;
        let mut session = StubSession::new().with_page(profile_url("freshaccount"), page);

        let stats = scraper().extract(&mut session, "freshaccount").await.unwrap();

        assert_eq!(stats.avatar_url, ScraperSettings::default().fallback_avatar_url);
    }

    #[tokio::test]
    async fn canonical_username_prefers_the_profile_root() {
        let page = r#"
            <div id="view-profile" data-username="MagnusCarlsen"></div>
            <img class="post-view-meta-image" alt="stale alt text"
                 src="https://images.chesscomfiles.com/magnus.png">
        "#;
        let mut session = StubSession::new().with_page(profile_url("magnuscarlsen"), page);

        let stats = scraper().extract(&mut session, "magnuscarlsen").await.unwrap();

        assert_eq!(stats.username, "MagnusCarlsen");
    }

    #[tokio::test]
    async fn header_alt_backs_up_a_missing_profile_root() {
        let page = r#"
            <img class="post-view-meta-image" alt="GothamChess"
                 src="https://images.chesscomfiles.com/levy.png">
        "#;
        let mut session = StubSession::new().with_page(profile_url("gothamchess"), page);

        let stats = scraper().extract(&mut session, "gothamchess").await.unwrap();

        assert_eq!(stats.username, "GothamChess");
    }

    #[tokio::test]
    async fn page_without_any_username_source_is_rejected() {
        let mut session = StubSession::new().with_page(profile_url("someone"), "<body></body>");

        let result = scraper().extract(&mut session, "someone").await;

        assert!(matches!(result, Err(ScrapeError::StructuralMismatch(_))));
    }

    #[tokio::test]
    async fn mismatched_rating_columns_are_rejected() {
        let page = r#"
            <div id="view-profile" data-username="Someone"></div>
            <a class="stat-section-section-link-name">Blitz</a>
            <a class="stat-section-section-link-name">Bullet</a>
            <span class="stat-section-user-rating">1500</span>
        "#;
        let mut session = StubSession::new().with_page(profile_url("someone"), page);

        let result = scraper().extract(&mut session, "someone").await;

        assert!(matches!(result, Err(ScrapeError::StructuralMismatch(_))));
    }

    #[tokio::test]
    async fn unknown_mode_labels_are_skipped() {
        let page = r#"
            <div id="view-profile" data-username="Someone"></div>
            <img class="post-view-meta-image" alt="Someone"
                 src="https://images.chesscomfiles.com/someone.png">
            <a class="stat-section-section-link-name">Blitz</a>
            <a class="stat-section-section-link-name">Chess Variants Cup</a>
            <span class="stat-section-user-rating">1500</span>
            <span class="stat-section-user-rating">999</span>
        "#;
        let mut session = StubSession::new().with_page(profile_url("someone"), page);

        let stats = scraper().extract(&mut session, "someone").await.unwrap();

        assert_eq!(stats.ratings.get(Mode::Blitz), Some("1500"));
        assert_eq!(stats.ratings.rated().count(), 1);
    }

    #[tokio::test]
    async fn invalid_usernames_never_reach_the_network() {
        let mut session = StubSession::new();

        let result = scraper().extract(&mut session, "no spaces allowed").await;

        assert!(matches!(result, Err(ScrapeError::InvalidUsername(_))));
        assert!(session.navigations.is_empty());
    }
}
