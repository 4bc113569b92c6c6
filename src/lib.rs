pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod page;
pub mod ranking;
pub mod rate_limiter;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::chesscom::ChessComService;
use crate::services::lichess::LichessService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_stats(username: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ChessComService::new(&config)?;
        service.run_stats(username).await
    })
}

pub fn handle_compare(usernames: &[String]) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ChessComService::new(&config)?;
        service.run_compare(usernames).await
    })
}

pub fn handle_listats(username: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = LichessService::new(&config)?;
        service.run_stats(username).await
    })
}

pub fn handle_arena(
    team: Option<String>,
    name: &str,
    clock_time: f64,
    clock_increment: u32,
    minutes: u32,
    start_date: &str,
    start_time: &str,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = LichessService::new(&config)?;
        service
            .run_create_arena(
                team,
                name,
                clock_time,
                clock_increment,
                minutes,
                start_date,
                start_time,
            )
            .await
    })
}

pub fn handle_swiss(
    team: Option<String>,
    name: &str,
    clock_limit: u32,
    clock_increment: u32,
    rounds: u32,
    start_date: &str,
    start_time: &str,
) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = LichessService::new(&config)?;
        service
            .run_create_swiss(
                team,
                name,
                clock_limit,
                clock_increment,
                rounds,
                start_date,
                start_time,
            )
            .await
    })
}

pub fn handle_standings(team: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = LichessService::new(&config)?;
        service.run_standings(team).await
    })
}

pub fn handle_online(team: Option<String>) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = LichessService::new(&config)?;
        service.run_online(team).await
    })
}

pub fn handle_crosstable(user1: &str, user2: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = LichessService::new(&config)?;
        service.run_crosstable(user1, user2).await
    })
}
