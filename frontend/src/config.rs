use anyhow::anyhow;
use chrono_tz::Tz;
use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:15000/api/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
    pub time_zone: Tz,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("LEAVEDESK_API_BASE_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let session_file = lookup("LEAVEDESK_SESSION_FILE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(lookup("HOME")));

        let timeout_secs = lookup("LEAVEDESK_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let time_zone_name = lookup("LEAVEDESK_TIMEZONE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "UTC".to_string());
        let time_zone: Tz = time_zone_name
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid LEAVEDESK_TIMEZONE value: {}", time_zone_name))?;

        Ok(Config {
            api_base_url: normalize_base_url(&api_base_url),
            session_file,
            request_timeout: Duration::from_secs(timeout_secs),
            time_zone,
        })
    }

    pub fn with_api_base_url(mut self, base_url: &str) -> Self {
        self.api_base_url = normalize_base_url(base_url);
        self
    }
}

pub fn normalize_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn default_session_file(home: Option<String>) -> PathBuf {
    let base = home
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(".leavedesk").join("session.json")
}
