use indexmap::IndexMap;
use serde::Deserialize;

/// Public user payload from `GET /api/user/{username}`.
#[derive(Debug, Deserialize)]
pub struct PublicUser {
    pub username: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Mode key → perf block, in payload order.
    #[serde(default)]
    pub perfs: IndexMap<String, Perf>,
}

/// One per-mode performance block. Score-only modes (storm, racer,
/// streak) carry `score`/`runs` instead of `rating`/`games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Perf {
    pub rating: Option<i64>,
    pub games: Option<i64>,
    pub score: Option<i64>,
    pub runs: Option<i64>,
}

/// Arena tournament header, as returned by creation and by the
/// team-arena listing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArenaTournament {
    pub id: String,
    pub full_name: String,
}

/// Swiss tournament header returned by creation.
#[derive(Debug, Deserialize)]
pub struct SwissTournament {
    pub id: String,
    pub name: String,
}

/// One line of the tournament results stream.
#[derive(Debug, Deserialize)]
pub struct PlayerStanding {
    pub rank: u32,
    pub username: String,
    pub score: i64,
}

/// One line of the team member stream.
#[derive(Debug, Deserialize)]
pub struct TeamMember {
    pub username: String,
    #[serde(default)]
    pub online: bool,
}

/// Head-to-head totals between two users.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crosstable {
    users: IndexMap<String, f64>,
    pub nb_games: u32,
}

impl Crosstable {
    /// The payload keys scores by lowercase user id; callers pass
    /// whatever spelling they were given.
    pub fn score_of(&self, username: &str) -> Option<f64> {
        self.users.get(&username.to_lowercase()).copied()
    }
}

/// Parameters for `POST /api/tournament`. Clock time and duration are
/// minutes, the increment is seconds.
#[derive(Debug, Clone)]
pub struct ArenaRequest {
    pub name: String,
    pub clock_time: f64,
    pub clock_increment: u32,
    pub minutes: u32,
    pub starts_at_ms: i64,
}

/// Parameters for `POST /api/swiss/new/{teamId}`. The clock limit is
/// entered in minutes and sent in seconds.
#[derive(Debug, Clone)]
pub struct SwissRequest {
    pub name: String,
    pub clock_limit_minutes: u32,
    pub clock_increment: u32,
    pub nb_rounds: u32,
    pub starts_at_ms: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_keeps_perf_order_and_optional_fields() {
        let payload = r#"{
            "username": "Hikaru",
            "title": "GM",
            "perfs": {
                "bullet": {"games": 8307, "rating": 3338},
                "storm": {"runs": 44, "score": 72},
                "puzzle": {"games": 1204, "rating": 3043}
            }
        }"#;

        let user: PublicUser = serde_json::from_str(payload).unwrap();

        assert_eq!(user.username, "Hikaru");
        assert_eq!(user.title.as_deref(), Some("GM"));
        let keys: Vec<_> = user.perfs.keys().cloned().collect();
        assert_eq!(keys, vec!["bullet", "storm", "puzzle"]);
        assert_eq!(user.perfs["bullet"].rating, Some(3338));
        assert_eq!(user.perfs["storm"].rating, None);
        assert_eq!(user.perfs["storm"].score, Some(72));
    }

    #[test]
    fn user_without_perfs_decodes_to_an_empty_map() {
        let user: PublicUser = serde_json::from_str(r#"{"username": "fresh"}"#).unwrap();
        assert!(user.perfs.is_empty());
        assert!(user.title.is_none());
    }

    #[test]
    fn arena_tournament_reads_camel_case_names() {
        let arena: ArenaTournament =
            serde_json::from_str(r#"{"id": "abcd1234", "fullName": "Club Night Arena"}"#).unwrap();
        assert_eq!(arena.id, "abcd1234");
        assert_eq!(arena.full_name, "Club Night Arena");
    }

    #[test]
    fn team_members_are_offline_unless_flagged() {
        let offline: TeamMember = serde_json::from_str(r#"{"username": "quiet"}"#).unwrap();
        let online: TeamMember =
            serde_json::from_str(r#"{"username": "busy", "online": true}"#).unwrap();
        assert!(!offline.online);
        assert!(online.online);
    }

    #[test]
    fn crosstable_scores_are_looked_up_case_insensitively() {
        let payload = r#"{
            "users": {"drnykterstein": 319.5, "rebeccaharris": 274.0},
            "nbGames": 593
        }"#;

        let crosstable: Crosstable = serde_json::from_str(payload).unwrap();

        assert_eq!(crosstable.nb_games, 593);
        assert_eq!(crosstable.score_of("DrNykterstein"), Some(319.5));
        assert_eq!(crosstable.score_of("rebeccaharris"), Some(274.0));
        assert_eq!(crosstable.score_of("stranger"), None);
    }
}
