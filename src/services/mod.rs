use std::time::Duration;

use log::info;

pub mod chesscom;
pub mod lichess;

pub use chesscom::ChessComService;
pub use lichess::LichessService;

/// One line per finished command: outcome, site, subject, latency.
pub(crate) fn log_outcome(outcome: &str, site: &str, user: &str, elapsed: Duration) {
    info!(
        "{:<12} {:>12} {:^24}  Response time = {:.3}",
        outcome,
        site,
        user,
        elapsed.as_secs_f64()
    );
}
