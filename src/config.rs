use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::session::{DEFAULT_IDLE_TIMEOUT, DEFAULT_MAX_SESSIONS};
use crate::web::state::DEFAULT_SESSION_COOKIE;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub seed_path: Option<PathBuf>,
    pub session_cookie: String,
    pub session_idle_timeout: Duration,
    pub max_sessions: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let host = env::var("APP_HOST").unwrap_or_else(|_| "localhost".to_string());

        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3002".to_string())
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let seed_path = env::var("SHOPPING_SEED_PATH")
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let session_cookie =
            env::var("SESSION_COOKIE").unwrap_or_else(|_| DEFAULT_SESSION_COOKIE.to_string());

        let session_idle_timeout = match env::var("SESSION_IDLE_MINUTES") {
            Ok(raw) => {
                let minutes = raw
                    .parse::<u64>()
                    .context("SESSION_IDLE_MINUTES must be a whole number of minutes")?;
                Duration::from_secs(minutes.saturating_mul(60))
            }
            Err(_) => DEFAULT_IDLE_TIMEOUT,
        };

        let max_sessions = match env::var("SESSION_MAX") {
            Ok(raw) => raw
                .parse::<usize>()
                .context("SESSION_MAX must be a positive integer")?,
            Err(_) => DEFAULT_MAX_SESSIONS,
        };
        if max_sessions == 0 {
            anyhow::bail!("SESSION_MAX must be a positive integer");
        }

        Ok(Self {
            host,
            port,
            seed_path,
            session_cookie,
            session_idle_timeout,
            max_sessions,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
