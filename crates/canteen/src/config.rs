//! Process configuration from the environment (and an optional `.env`).

use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

const DEFAULT_JWT_SECRET: &str = "test";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiry_secs: u64,
    pub seed_data: bool,
    /// When set, an `admin` account with this password is provisioned at start-up.
    pub admin_password: Option<String>,
    /// Request buffer of every table.
    pub channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiry_secs: 7 * 24 * 60 * 60,
            seed_data: true,
            admin_password: None,
            channel_capacity: 32,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            info!("No .env loaded: {e}");
        }
        let defaults = Self::default();

        let jwt_secret = var("JWT_SECRET").unwrap_or_else(|| {
            warn!("JWT_SECRET not set, using an insecure default");
            defaults.jwt_secret
        });

        Self {
            port: try_load("PORT", defaults.port),
            jwt_secret,
            jwt_expiry_secs: try_load("JWT_EXPIRY_SECS", defaults.jwt_expiry_secs),
            seed_data: try_load("SEED_DATA", defaults.seed_data),
            admin_password: var("ADMIN_PASSWORD").filter(|p| !p.is_empty()),
            channel_capacity: try_load("CHANNEL_CAPACITY", defaults.channel_capacity).max(1),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match var(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
    }
}
