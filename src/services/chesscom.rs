use std::time::Instant;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use tokio::sync::Mutex;

use super::log_outcome;
use crate::config::settings::AppConfig;
use crate::domain::ProfileStats;
use crate::errors::{CompareError, ScrapeError};
use crate::fetchers::ProfileScraper;
use crate::page::HttpSession;
use crate::ranking::{compare_users, Comparison, Marker};

const SITE: &str = "Chess.com";

/// Runs the chess.com commands. The browsing session is one shared
/// stateful resource: navigation mutates what later queries read, so
/// every command takes the session lock for its whole scrape.
pub struct ChessComService {
    scraper: ProfileScraper,
    session: Mutex<HttpSession>,
}

impl ChessComService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            scraper: ProfileScraper::new(&config.scraper)?,
            session: Mutex::new(HttpSession::new(&config.scraper)?),
        })
    }

    pub async fn run_stats(&self, username: &str) -> Result<()> {
        let start = Instant::now();

        let result = {
            let mut session = self.session.lock().await;
            self.scraper.extract(&mut *session, username).await
        };

        match result {
            Ok(stats) => {
                Self::render_stats(&stats);
                log_outcome("Success", SITE, &stats.username, start.elapsed());
                Ok(())
            }
            Err(error) => Self::report_scrape_error(error, username, start),
        }
    }

    pub async fn run_compare(&self, usernames: &[String]) -> Result<()> {
        let start = Instant::now();

        // The lease covers the whole batch, so two comparisons can
        // never interleave their navigations.
        let result = {
            let mut session = self.session.lock().await;
            compare_users(&self.scraper, &mut *session, usernames).await
        };

        match result {
            Ok(comparison) => {
                Self::render_comparison(&comparison);
                let compared = comparison.markers.len().to_string();
                log_outcome("Success", SITE, &format!("{compared} users"), start.elapsed());
                Ok(())
            }
            Err(error @ CompareError::TooManyUsers { .. }) => {
                println!("{} {error}", "Error".red().bold());
                log_outcome("Rejected", SITE, "compare", start.elapsed());
                Ok(())
            }
            Err(CompareError::Scrape(error)) => {
                Self::report_scrape_error(error, "compare", start)
            }
        }
    }

    // --- Rendering ---

    fn render_stats(stats: &ProfileStats) {
        println!("{}", format!("Stats for {}", stats.username).bold());
        println!("Avatar: {}", stats.avatar_url);

        if !stats.activity.is_empty() {
            println!();
            for (label, value) in stats.activity.iter() {
                println!("{} {}", format!("{label}:").bold(), value);
            }
        }

        println!();
        if !stats.ratings.has_ratings() {
            println!("This user has no ratings...");
            return;
        }
        for (mode, value) in stats.ratings.rated() {
            println!("{:<18} {}", mode.label(), value);
        }
    }

    fn render_comparison(comparison: &Comparison) {
        println!("{}", "Key".bold());
        for (username, marker) in comparison.markers.iter() {
            println!("{} = {}", Self::marker_glyph(marker), username);
        }

        for entry in comparison.table.rankings() {
            println!();
            println!("{}", entry.mode.label().underline());
            for (username, value) in entry.shown() {
                if let Some(marker) = comparison.markers.marker_for(username) {
                    println!("{} {}", Self::marker_glyph(marker), value);
                }
            }
        }
    }

    fn marker_glyph(marker: Marker) -> ColoredString {
        match marker {
            Marker::Red => "♟".red(),
            Marker::Blue => "♟".blue(),
            Marker::Yellow => "♟".yellow(),
            Marker::Green => "♟".green(),
            Marker::Orange => "♟".truecolor(255, 165, 0),
        }
    }

    // --- Error Reporting ---

    /// Conditions the caller triggered (missing user, bad input) are
    /// rendered and logged rather than propagated; everything else
    /// bubbles up.
    fn report_scrape_error(error: ScrapeError, context: &str, start: Instant) -> Result<()> {
        match &error {
            ScrapeError::ProfileNotFound(username) => {
                println!("{} {error}", "Error 404".red().bold());
                log_outcome("Error 404", SITE, username, start.elapsed());
                Ok(())
            }
            ScrapeError::InvalidUsername(username) => {
                println!("{} {error}", "Error".red().bold());
                log_outcome("Rejected", SITE, username, start.elapsed());
                Ok(())
            }
            _ => {
                log_outcome("Failed", SITE, context, start.elapsed());
                Err(error.into())
            }
        }
    }
}
