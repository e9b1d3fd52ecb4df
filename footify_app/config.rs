use dotenvy::dotenv;
use std::env;

const DEFAULT_DATABASE_URL: &str = "sqlite://footify.db";

pub struct Config {
    pub database_url: String,
    pub seed_sample_roster: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = match env::var("FOOTIFY_DATABASE_URL") {
            Ok(val) if !val.trim().is_empty() => val,
            _ => DEFAULT_DATABASE_URL.to_string(),
        };

        let seed_sample_roster = match env::var("FOOTIFY_SEED_SAMPLE_ROSTER") {
            Ok(val) => parse_flag(&val).unwrap_or(true),
            Err(_) => true,
        };

        Self {
            database_url,
            seed_sample_roster,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
