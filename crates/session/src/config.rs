//! Session configuration.

use anyhow::{Context, bail};
use chrono::Duration;

/// Undo window in milliseconds.
pub const UNDO_WINDOW_ENV: &str = "STOCKROOM_UNDO_WINDOW_MS";
/// `true`/`false`: start from the demo inventory or from nothing.
pub const SEED_ENV: &str = "STOCKROOM_SEED";

/// How long a delete notification stays up, and with it the undo button.
pub const DEFAULT_UNDO_WINDOW_MS: i64 = 4_000;
/// Longest accepted undo window: one day.
pub const MAX_UNDO_WINDOW_MS: i64 = 86_400_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub undo_window: Duration,
    pub seed_defaults: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            undo_window: Duration::milliseconds(DEFAULT_UNDO_WINDOW_MS),
            seed_defaults: true,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut config = Self::default();

        match lookup(UNDO_WINDOW_ENV) {
            Some(raw) => {
                let ms: i64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{UNDO_WINDOW_ENV} must be a whole number of milliseconds, got {raw:?}"))?;
                if ms <= 0 {
                    bail!("{UNDO_WINDOW_ENV} must be positive, got {ms}");
                }
                if ms > MAX_UNDO_WINDOW_MS {
                    bail!("{UNDO_WINDOW_ENV} must be at most {MAX_UNDO_WINDOW_MS}, got {ms}");
                }
                config.undo_window = Duration::milliseconds(ms);
            }
            None => {
                tracing::debug!(default_ms = DEFAULT_UNDO_WINDOW_MS, "{UNDO_WINDOW_ENV} not set; using default");
            }
        }

        if let Some(raw) = lookup(SEED_ENV) {
            config.seed_defaults = parse_bool(&raw)
                .with_context(|| format!("{SEED_ENV} must be true or false, got {raw:?}"))?;
        }

        Ok(config)
    }
}

fn parse_bool(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized boolean {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = SessionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.undo_window, Duration::seconds(4));
    }

    #[test]
    fn reads_window_and_seed_flag() {
        let config = SessionConfig::from_lookup(lookup(&[
            (UNDO_WINDOW_ENV, " 2500 "),
            (SEED_ENV, "off"),
        ]))
        .unwrap();

        assert_eq!(config.undo_window, Duration::milliseconds(2500));
        assert!(!config.seed_defaults);
    }

    #[test]
    fn rejects_bad_values() {
        let err = SessionConfig::from_lookup(lookup(&[(UNDO_WINDOW_ENV, "soon")])).unwrap_err();
        assert!(err.to_string().contains(UNDO_WINDOW_ENV));

        assert!(SessionConfig::from_lookup(lookup(&[(UNDO_WINDOW_ENV, "0")])).is_err());
        assert!(SessionConfig::from_lookup(lookup(&[(SEED_ENV, "maybe")])).is_err());
    }

    #[test]
    fn window_is_capped_at_one_day() {
        let day = SessionConfig::from_lookup(lookup(&[(UNDO_WINDOW_ENV, "86400000")])).unwrap();
        assert_eq!(day.undo_window, Duration::days(1));

        let err = SessionConfig::from_lookup(lookup(&[(UNDO_WINDOW_ENV, "86400001")])).unwrap_err();
        assert!(err.to_string().contains("at most"));

        let max = i64::MAX.to_string();
        assert!(SessionConfig::from_lookup(lookup(&[(UNDO_WINDOW_ENV, max.as_str())])).is_err());
    }
}
