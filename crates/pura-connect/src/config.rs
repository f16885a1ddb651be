use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::error::AppError;

/// Deadline shown on the catalog banner: December 1st, 2025 at 11:59 PM.
pub const DEFAULT_DEADLINE: &str = "2025-12-01T23:59:00";

/// Server configuration loaded from environment variables.
///
/// Everything is optional. Without any variables the server serves the
/// compiled-in catalog with no cache.
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL. `None` disables caching.
    pub redis_url: Option<String>,
    /// JSON file replacing the compiled-in catalog.
    pub catalog_path: Option<PathBuf>,
    pub deadline: NaiveDateTime,
    /// Force the closed page regardless of the deadline.
    pub applications_closed: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            redis_url: None,
            catalog_path: None,
            deadline: parse_deadline(DEFAULT_DEADLINE).unwrap_or_default(),
            applications_closed: false,
        }
    }
}

impl Config {
    /// Optional:
    /// - `REDIS_URL`
    /// - `PURA_CATALOG_PATH` (must point to an existing file)
    /// - `PURA_APPLICATION_DEADLINE` (default: "2025-12-01T23:59:00")
    /// - `PURA_APPLICATIONS_CLOSED` ("true"/"false", "1"/"0")
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let defaults = Self::default();

        let catalog_path = match lookup("PURA_CATALOG_PATH") {
            Some(path) => {
                let path = PathBuf::from(path);
                if !path.is_file() {
                    return Err(AppError::Config(format!(
                        "catalog file not found: {}",
                        path.display()
                    )));
                }
                Some(path)
            }
            None => None,
        };

        let deadline = match lookup("PURA_APPLICATION_DEADLINE") {
            Some(raw) => parse_deadline(&raw)?,
            None => defaults.deadline,
        };

        let applications_closed = match lookup("PURA_APPLICATIONS_CLOSED") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                AppError::Config(format!("PURA_APPLICATIONS_CLOSED must be a boolean, got '{raw}'"))
            })?,
            None => defaults.applications_closed,
        };

        Ok(Self {
            redis_url: lookup("REDIS_URL").filter(|url| !url.trim().is_empty()),
            catalog_path,
            deadline,
            applications_closed,
        })
    }
}

/// Accepts RFC 3339 (offset dropped, wall-clock kept) or a naive
/// `YYYY-MM-DDTHH:MM[:SS]` timestamp.
pub fn parse_deadline(raw: &str) -> Result<NaiveDateTime, AppError> {
    let raw = raw.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map_err(|e| AppError::Config(format!("invalid deadline '{raw}': {e}")))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert!(config.redis_url.is_none());
        assert!(config.catalog_path.is_none());
        assert!(!config.applications_closed);
        assert_eq!(config.deadline.to_string(), "2025-12-01 23:59:00");
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("REDIS_URL", "redis://127.0.0.1:6379"),
            ("PURA_APPLICATION_DEADLINE", "2026-06-30T18:00"),
            ("PURA_APPLICATIONS_CLOSED", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
        assert!(config.applications_closed);
        assert_eq!(config.deadline.to_string(), "2026-06-30 18:00:00");
    }

    #[test]
    fn rejects_invalid_values() {
        for pairs in [
            [("PURA_APPLICATIONS_CLOSED", "maybe")],
            [("PURA_APPLICATION_DEADLINE", "December 1st")],
            [("PURA_CATALOG_PATH", "/definitely/not/here.json")],
        ] {
            let err = Config::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{pairs:?} -> {err}");
        }
    }

    #[test]
    fn rfc3339_deadline_keeps_wall_clock() {
        let deadline = parse_deadline("2025-12-01T23:59:00+01:00").unwrap();
        assert_eq!(deadline.to_string(), "2025-12-01 23:59:00");
    }
}
