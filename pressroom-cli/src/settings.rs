use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use pressroom_client::{ClientConfig, DEFAULT_API_URL};

const DEFAULT_SESSION_FILE: &str = ".pressroom_session.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub session_file: PathBuf,
    pub autosave_delay: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("PRESSROOM_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_file = lookup("PRESSROOM_SESSION_FILE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string())
            .into();
        let autosave_delay = parse_secs(&lookup, "PRESSROOM_AUTOSAVE_DELAY_SECS", 30)?;
        let connect_timeout = parse_secs(&lookup, "PRESSROOM_CONNECT_TIMEOUT_SECS", 5)?;
        let request_timeout = parse_secs(&lookup, "PRESSROOM_REQUEST_TIMEOUT_SECS", 15)?;
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            api_url,
            session_file,
            autosave_delay,
            connect_timeout,
            request_timeout,
            log_level,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_url.clone(),
            connect_timeout: self.connect_timeout,
            request_timeout: self.request_timeout,
        }
    }
}

fn parse_secs(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
) -> Result<Duration> {
    let value = lookup(key)
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(Duration::from_secs(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_without_env() {
        let settings = settings(&[]).expect("defaults are valid");
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        assert_eq!(settings.autosave_delay, Duration::from_secs(30));
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn env_overrides_defaults() {
        let settings = settings(&[
            ("PRESSROOM_API_URL", "http://blog.local/api"),
            ("PRESSROOM_AUTOSAVE_DELAY_SECS", "5"),
            ("RUST_LOG", "debug"),
        ])
        .expect("valid");
        assert_eq!(settings.api_url, "http://blog.local/api");
        assert_eq!(settings.autosave_delay, Duration::from_secs(5));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.client_config().request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn zero_or_garbage_delay_is_rejected() {
        assert!(settings(&[("PRESSROOM_AUTOSAVE_DELAY_SECS", "0")]).is_err());
        assert!(settings(&[("PRESSROOM_CONNECT_TIMEOUT_SECS", "soon")]).is_err());
    }
}
