use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use colored::Colorize;

use super::log_outcome;
use crate::api::models::{ArenaRequest, SwissRequest};
use crate::api::parsers::{self, ScoreOnlyPolicy};
use crate::api::LichessClient;
use crate::config::settings::AppConfig;

const SITE: &str = "lichess";

/// Runs the lichess.org commands against the REST API.
pub struct LichessService {
    client: LichessClient,
    base_url: String,
    default_team: String,
    score_only_policy: ScoreOnlyPolicy,
}

impl LichessService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            client: LichessClient::from_env(&config.lichess)?,
            base_url: config.lichess.api_base_url.to_string(),
            default_team: config.lichess.default_team.to_string(),
            score_only_policy: config.lichess.score_only_policy,
        })
    }

    pub async fn run_stats(&mut self, username: &str) -> Result<()> {
        let start = Instant::now();

        let user = self.client.fetch_public_user(username).await?;
        let lines = parsers::normalize_perfs(&user.perfs, self.score_only_policy);

        let header = match &user.title {
            Some(title) => format!("Stats for {title} {}", user.username),
            None => format!("Stats for {}", user.username),
        };
        println!("{}", header.bold());
        println!("{}/@/{}", self.base_url, user.username);
        println!();
        if lines.is_empty() {
            println!("This user has no ratings...");
        }
        for (label, value) in &lines {
            println!("{label:<18} {value}");
        }

        log_outcome("Success", SITE, &user.username, start.elapsed());
        Ok(())
    }

    pub async fn run_create_arena(
        &mut self,
        team: Option<String>,
        name: &str,
        clock_time: f64,
        clock_increment: u32,
        minutes: u32,
        start_date: &str,
        start_time: &str,
    ) -> Result<()> {
        let request = ArenaRequest {
            name: name.to_string(),
            clock_time,
            clock_increment,
            minutes,
            starts_at_ms: parse_start_millis(start_date, start_time)?,
        };

        let team = self.resolve_team(team);
        let arena = self.client.create_arena(&team, &request).await?;

        println!("Tournament created with name: {}", arena.full_name);
        println!("{}/tournament/{}", self.base_url, arena.id);
        Ok(())
    }

    pub async fn run_create_swiss(
        &mut self,
        team: Option<String>,
        name: &str,
        clock_limit_minutes: u32,
        clock_increment: u32,
        nb_rounds: u32,
        start_date: &str,
        start_time: &str,
    ) -> Result<()> {
        let request = SwissRequest {
            name: name.to_string(),
            clock_limit_minutes,
            clock_increment,
            nb_rounds,
            starts_at_ms: parse_start_millis(start_date, start_time)?,
        };

        let team = self.resolve_team(team);
        let swiss = self.client.create_swiss(&team, &request).await?;

        println!("Tournament created with name: {}", swiss.name);
        println!("{}/swiss/{}", self.base_url, swiss.id);
        Ok(())
    }

    pub async fn run_standings(&mut self, team: Option<String>) -> Result<()> {
        let start = Instant::now();
        let team = self.resolve_team(team);

        let Some(arena) = self.client.latest_team_arena(&team).await? else {
            println!("Team '{team}' has no arenas yet");
            return Ok(());
        };
        let standings = self.client.fetch_arena_results(&arena.id).await?;

        println!("{}", format!("Standings for {}", arena.full_name).bold());
        println!("{}/tournament/{}", self.base_url, arena.id);
        println!();
        println!("{:>4}  {:<24} {:>5}", "Rank", "Username", "Score");
        for standing in &standings {
            println!(
                "{:>4}  {:<24} {:>5}",
                standing.rank, standing.username, standing.score
            );
        }

        log_outcome("Success", SITE, &team, start.elapsed());
        Ok(())
    }

    pub async fn run_online(&mut self, team: Option<String>) -> Result<()> {
        let start = Instant::now();
        let team = self.resolve_team(team);

        let members = self.client.fetch_team_members(&team).await?;
        let online: Vec<_> = members
            .iter()
            .filter(|member| member.online)
            .map(|member| member.username.as_str())
            .collect();

        println!("{}", "Currently Online Members".bold());
        if online.is_empty() {
            println!("Nobody is online right now");
        }
        for username in online {
            println!("{username}");
        }

        log_outcome("Success", SITE, &team, start.elapsed());
        Ok(())
    }

    pub async fn run_crosstable(&mut self, user1: &str, user2: &str) -> Result<()> {
        let start = Instant::now();

        let crosstable = self.client.fetch_crosstable(user1, user2).await?;

        println!("{}", "Head to head match up".bold());
        for user in [user1, user2] {
            let score = crosstable.score_of(user).unwrap_or(0.0);
            println!("{:<24} {}", capitalize(user), format_score(score));
        }
        println!("across {} games", crosstable.nb_games);

        log_outcome("Success", SITE, &format!("{user1} vs {user2}"), start.elapsed());
        Ok(())
    }

    // --- Helper Methods ---

    fn resolve_team(&self, team: Option<String>) -> String {
        team.unwrap_or_else(|| self.default_team.clone())
    }
}

/// Parses a `YYYY-MM-DD` date plus `HH:MM` time, read as UTC, into
/// epoch milliseconds.
fn parse_start_millis(date: &str, time: &str) -> Result<i64> {
    let stamp = format!("{date} {time}:00");
    let naive = NaiveDateTime::parse_from_str(&stamp, "%Y-%m-%d %H:%M:%S")
        .with_context(|| format!("Invalid start '{stamp}', expected YYYY-MM-DD HH:MM"))?;
    Ok(naive.and_utc().timestamp_millis())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Crosstable totals are halves; whole numbers drop the ".0".
fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.0}")
    } else {
        format!("{score}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_instants_are_read_as_utc_millis() {
        let millis = parse_start_millis("2021-08-07", "23:00").unwrap();
        assert_eq!(millis, 1_628_377_200_000);
    }

    #[test]
    fn malformed_start_instants_are_rejected() {
        assert!(parse_start_millis("08/07/2021", "23:00").is_err());
        assert!(parse_start_millis("2021-08-07", "11pm").is_err());
    }

    #[test]
    fn whole_scores_drop_the_fraction() {
        assert_eq!(format_score(274.0), "274");
        assert_eq!(format_score(319.5), "319.5");
        assert_eq!(format_score(0.0), "0");
    }

    #[test]
    fn display_names_are_capitalized() {
        assert_eq!(capitalize("drnykterstein"), "Drnykterstein");
        assert_eq!(capitalize(""), "");
    }
}
