use crate::api::parsers::ScoreOnlyPolicy;

pub struct ScraperSettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub base_url: &'static str,
    pub ratings_wait_ms: u64,
    pub poll_interval_ms: u64,
    pub fallback_avatar_url: &'static str,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 250, // 4 req/sec
            user_agent: "ChessClubBot/0.1",
            timeout_secs: 30,
            base_url: "https://www.chess.com",
            ratings_wait_ms: 750,
            poll_interval_ms: 250,
            // The site's placeholder avatar is an svg, which chat clients
            // refuse to embed. Swapped for a hosted png.
            fallback_avatar_url: "https://cdn.discordapp.com/attachments/785212221444718633/785315817611984906/noavatar_l.png",
        }
    }
}

pub struct LichessSettings {
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub api_base_url: &'static str,
    pub default_team: &'static str,
    pub token_var: &'static str,
    pub score_only_policy: ScoreOnlyPolicy,
}

impl Default for LichessSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 100, // 10 req/sec
            user_agent: "ChessClubBot/0.1",
            timeout_secs: 30,
            api_base_url: "https://lichess.org",
            default_team: "niner-chess-club",
            token_var: "ADMIN_LICHESS_TOKEN",
            score_only_policy: ScoreOnlyPolicy::Substitute,
        }
    }
}

pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub lichess: LichessSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            scraper: ScraperSettings::default(),
            lichess: LichessSettings::default(),
        }
    }
}
