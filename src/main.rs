use anyhow::Result;

use chess_club_bot::cli::Command;
use chess_club_bot::{
    handle_arena, handle_compare, handle_crosstable, handle_listats, handle_online,
    handle_standings, handle_stats, handle_swiss, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Stats { username } => handle_stats(username),
        Command::Compare { usernames } => handle_compare(usernames),
        Command::Listats { username } => handle_listats(username),
        Command::Arena {
            name,
            clock_time,
            clock_increment,
            minutes,
            start_date,
            start_time,
            team,
        } => handle_arena(
            team.clone(),
            name,
            *clock_time,
            *clock_increment,
            *minutes,
            start_date,
            start_time,
        ),
        Command::Swiss {
            name,
            clock_limit,
            clock_increment,
            rounds,
            start_date,
            start_time,
            team,
        } => handle_swiss(
            team.clone(),
            name,
            *clock_limit,
            *clock_increment,
            *rounds,
            start_date,
            start_time,
        ),
        Command::Standings { team } => handle_standings(team.clone()),
        Command::Online { team } => handle_online(team.clone()),
        Command::Crosstable { user1, user2 } => handle_crosstable(user1, user2),
    }
}
