use anyhow::{Context, Result};
use log::info;
use serde::de::DeserializeOwned;

use super::models::{
    ArenaRequest, ArenaTournament, Crosstable, PlayerStanding, PublicUser, SwissRequest,
    SwissTournament, TeamMember,
};
use crate::config::settings::LichessSettings;
use crate::http::RateLimitedClient;

/// lichess.org REST client. Tournament creation needs the bearer
/// token; the read endpoints work without one.
pub struct LichessClient {
    client: RateLimitedClient,
    base_url: String,
}

impl LichessClient {
    pub fn new(settings: &LichessSettings, token: Option<String>) -> Result<Self> {
        let mut client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;
        if let Some(token) = token {
            client = client.with_bearer_token(token);
        }

        Ok(Self {
            client,
            base_url: settings.api_base_url.to_string(),
        })
    }

    /// Builds a client with the token from the configured environment
    /// variable, if set.
    pub fn from_env(settings: &LichessSettings) -> Result<Self> {
        let token = std::env::var(settings.token_var).ok();
        Self::new(settings, token)
    }

    /// Fetch the public profile of a user
    pub async fn fetch_public_user(&mut self, username: &str) -> Result<PublicUser> {
        let url = format!(
            "{}/api/user/{}",
            self.base_url,
            urlencoding::encode(username)
        );
        info!("Fetching lichess profile for {}", username);

        let response = self.client.get(&url).await?;
        Self::check_status(&response)?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to decode profile of '{username}'"))
    }

    /// Create a team arena tournament
    pub async fn create_arena(
        &mut self,
        team: &str,
        request: &ArenaRequest,
    ) -> Result<ArenaTournament> {
        let url = format!("{}/api/tournament", self.base_url);
        info!("Creating arena '{}' for team {}", request.name, team);

        let form = [
            ("name", request.name.clone()),
            ("clockTime", request.clock_time.to_string()),
            ("clockIncrement", request.clock_increment.to_string()),
            ("minutes", request.minutes.to_string()),
            ("startDate", request.starts_at_ms.to_string()),
            ("rated", "false".to_string()),
            ("conditions.teamMember.teamId", team.to_string()),
        ];

        let response = self.client.post_form(&url, &form).await?;
        Self::check_status(&response)?;
        response
            .json()
            .await
            .context("Failed to decode created arena")
    }

    /// Create a team swiss tournament
    pub async fn create_swiss(
        &mut self,
        team: &str,
        request: &SwissRequest,
    ) -> Result<SwissTournament> {
        let url = format!(
            "{}/api/swiss/new/{}",
            self.base_url,
            urlencoding::encode(team)
        );
        info!("Creating swiss '{}' for team {}", request.name, team);

        let clock_limit_seconds = u64::from(request.clock_limit_minutes) * 60;
        let form = [
            ("name", request.name.clone()),
            ("clock.limit", clock_limit_seconds.to_string()),
            ("clock.increment", request.clock_increment.to_string()),
            ("nbRounds", request.nb_rounds.to_string()),
            ("startsAt", request.starts_at_ms.to_string()),
            ("rated", "false".to_string()),
        ];

        let response = self.client.post_form(&url, &form).await?;
        Self::check_status(&response)?;
        response
            .json()
            .await
            .context("Failed to decode created swiss")
    }

    /// Fetch the team's most recently created arena, if any
    pub async fn latest_team_arena(&mut self, team: &str) -> Result<Option<ArenaTournament>> {
        let url = format!(
            "{}/api/team/{}/arena?max=1",
            self.base_url,
            urlencoding::encode(team)
        );
        info!("Fetching latest arena of team {}", team);

        let body = self.fetch_text(&url).await?;
        let mut arenas: Vec<ArenaTournament> = parse_ndjson_lines(&body)?;
        Ok(if arenas.is_empty() {
            None
        } else {
            Some(arenas.remove(0))
        })
    }

    /// Fetch the final or current standings of an arena
    pub async fn fetch_arena_results(&mut self, arena_id: &str) -> Result<Vec<PlayerStanding>> {
        let url = format!(
            "{}/api/tournament/{}/results",
            self.base_url,
            urlencoding::encode(arena_id)
        );
        info!("Fetching results of arena {}", arena_id);

        let body = self.fetch_text(&url).await?;
        parse_ndjson_lines(&body)
    }

    /// Fetch all members of a team
    pub async fn fetch_team_members(&mut self, team: &str) -> Result<Vec<TeamMember>> {
        let url = format!(
            "{}/api/team/{}/users",
            self.base_url,
            urlencoding::encode(team)
        );
        info!("Fetching members of team {}", team);

        let body = self.fetch_text(&url).await?;
        parse_ndjson_lines(&body)
    }

    /// Fetch the head-to-head crosstable of two users
    pub async fn fetch_crosstable(&mut self, user1: &str, user2: &str) -> Result<Crosstable> {
        let url = format!(
            "{}/api/crosstable/{}/{}?matchup=true",
            self.base_url,
            urlencoding::encode(user1),
            urlencoding::encode(user2)
        );
        info!("Fetching crosstable {} vs {}", user1, user2);

        let response = self.client.get(&url).await?;
        Self::check_status(&response)?;
        response
            .json()
            .await
            .context("Failed to decode crosstable")
    }

    // --- Helper Methods ---

    async fn fetch_text(&mut self, url: &str) -> Result<String> {
        let response = self.client.get(url).await?;
        Self::check_status(&response)?;
        response.text().await.context("Failed to read response body")
    }

    fn check_status(response: &reqwest::Response) -> Result<()> {
        if !response.status().is_success() {
            anyhow::bail!("API returned status: {}", response.status());
        }
        Ok(())
    }
}

fn parse_ndjson_lines<T: DeserializeOwned>(body: &str) -> Result<Vec<T>> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .with_context(|| format!("Failed to parse ndjson line: {line}"))
        })
        .collect()
}
