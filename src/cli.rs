use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "chess club bot backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Look up a chess.com member's ratings and activity
    Stats {
        /// chess.com username
        username: String,
    },
    /// Compare chess.com members, ranked mode by mode (5 at most)
    Compare {
        /// chess.com usernames, in marker hand-out order
        usernames: Vec<String>,
    },
    /// Look up a lichess.org user's ratings
    Listats {
        /// lichess.org username
        username: String,
    },
    /// Create an arena tournament for the club team
    Arena {
        /// Tournament name
        name: String,
        /// Clock time in minutes
        clock_time: f64,
        /// Clock increment in seconds
        clock_increment: u32,
        /// How many minutes the arena runs
        minutes: u32,
        /// Start date, YYYY-MM-DD
        start_date: String,
        /// Start time, HH:MM (UTC)
        start_time: String,
        /// Team id (optional, defaults to the club team)
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Create a swiss tournament for the club team
    Swiss {
        /// Tournament name
        name: String,
        /// Clock limit in minutes
        clock_limit: u32,
        /// Clock increment in seconds
        clock_increment: u32,
        /// Number of rounds
        rounds: u32,
        /// Start date, YYYY-MM-DD
        start_date: String,
        /// Start time, HH:MM (UTC)
        start_time: String,
        /// Team id (optional, defaults to the club team)
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Show the standings of the team's most recent arena
    Standings {
        /// Team id (optional, defaults to the club team)
        #[arg(short, long)]
        team: Option<String>,
    },
    /// List the team members currently online
    Online {
        /// Team id (optional, defaults to the club team)
        #[arg(short, long)]
        team: Option<String>,
    },
    /// Show the head-to-head score between two lichess.org users
    Crosstable {
        /// First username
        user1: String,
        /// Second username
        user2: String,
    },
}
