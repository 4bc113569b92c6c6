pub mod settings;

pub use settings::{AppConfig, LichessSettings, ScraperSettings};
