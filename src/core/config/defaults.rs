use std::env;
use std::time::Duration;

use crate::core::config::data::{Config, Settings, SettingsOverrides};
use crate::core::reveal::{RevealMode, DEFAULT_REVEAL_INTERVAL};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/api/generate_response";
pub const ENDPOINT_ENV_VAR: &str = "NETWORK_CHAT_ENDPOINT";

impl Config {
    /// Resolves effective settings. Precedence: explicit overrides, then the
    /// `NETWORK_CHAT_ENDPOINT` environment variable, then this config, then
    /// built-in defaults.
    pub fn resolve(&self, overrides: &SettingsOverrides) -> Settings {
        self.resolve_with_env(overrides, env::var(ENDPOINT_ENV_VAR).ok())
    }

    pub(crate) fn resolve_with_env(
        &self,
        overrides: &SettingsOverrides,
        env_endpoint: Option<String>,
    ) -> Settings {
        let endpoint = overrides
            .endpoint
            .clone()
            .or_else(|| env_endpoint.filter(|value| !value.trim().is_empty()))
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let reveal_mode = if overrides.instant_reveal {
            RevealMode::Instant
        } else {
            self.reveal.unwrap_or_default()
        };

        let reveal_interval = self
            .reveal_interval_ms
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REVEAL_INTERVAL);

        Settings {
            endpoint,
            reveal_mode,
            reveal_interval,
            request_timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            data_dir: overrides.data_dir.clone().or_else(|| self.data_dir.clone()),
        }
    }

    /// Applies `network-chat set <key> <value>`. Returns a confirmation line.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<String, String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(format!("A value is required for {key}"));
        }
        match key {
            "endpoint" => {
                self.endpoint = Some(value.to_string());
            }
            "reveal" => {
                self.reveal = Some(RevealMode::try_from(value)?);
            }
            "reveal-interval-ms" => {
                let ms = parse_positive(key, value)?;
                self.reveal_interval_ms = Some(ms);
            }
            "request-timeout-secs" => {
                let secs = parse_positive(key, value)?;
                self.request_timeout_secs = Some(secs);
            }
            "data-dir" => {
                self.data_dir = Some(value.into());
            }
            _ => return Err(format!("Unknown config key: {key}")),
        }
        Ok(format!("Set {key} to: {value}"))
    }

    pub fn unset_value(&mut self, key: &str) -> Result<String, String> {
        match key {
            "endpoint" => self.endpoint = None,
            "reveal" => self.reveal = None,
            "reveal-interval-ms" => self.reveal_interval_ms = None,
            "request-timeout-secs" => self.request_timeout_secs = None,
            "data-dir" => self.data_dir = None,
            _ => return Err(format!("Unknown config key: {key}")),
        }
        Ok(format!("Unset {key}"))
    }
}

fn parse_positive(key: &str, value: &str) -> Result<u64, String> {
    match value.parse::<u64>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(format!("{key} expects a positive integer, got: {value}")),
    }
}
