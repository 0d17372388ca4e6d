use crate::error::{Error, Result};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub database_url: String,
    pub jwt_secret: String,
    pub webhook_secret: String,
    pub staff_webhook_url: Option<String>,
    pub learner_rps: u32,
    pub staff_rps: u32,
    pub practice_hours_goal: Decimal,
    pub night_hours_goal: Decimal,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            database_url: get_env("DATABASE_URL")?,
            jwt_secret: get_env("JWT_SECRET")?,
            webhook_secret: get_env("WEBHOOK_SECRET")?,
            staff_webhook_url: env::var("STAFF_WEBHOOK_URL").ok(),
            learner_rps: get_env_parse("LEARNER_RPS")?,
            staff_rps: get_env_parse("STAFF_RPS")?,
            practice_hours_goal: get_env_parse("PRACTICE_HOURS_GOAL")?,
            night_hours_goal: get_env_parse("NIGHT_HOURS_GOAL")?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
