//! Client configuration read from the environment.
//!
//! `PARKWISE_API_URL` selects the backend. The remaining variables only tune where the
//! session is kept and how long a request may take.

use std::path::PathBuf;

pub const API_URL_ENV: &str = "PARKWISE_API_URL";
pub const SESSION_FILE_ENV: &str = "PARKWISE_SESSION_FILE";
pub const HTTP_TIMEOUT_ENV: &str = "PARKWISE_HTTP_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base address, path prefix included (e.g. "http://localhost:5000/api").
    pub api_url: String,
    /// File holding the persisted session.
    pub session_file: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_file: default_session_file(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset; an
    /// unparseable timeout falls back to the default.
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let get = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();
        Self {
            api_url: get(API_URL_ENV).unwrap_or(defaults.api_url),
            session_file: get(SESSION_FILE_ENV).map(PathBuf::from).unwrap_or(defaults.session_file),
            http_timeout_secs: get(HTTP_TIMEOUT_ENV)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .unwrap_or(defaults.http_timeout_secs),
        }
    }
}

/// ~/.parkwise/session.json
pub fn default_session_file() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".parkwise").join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert!(cfg.session_file.ends_with(".parkwise/session.json"));
    }

    #[test]
    fn env_overrides() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://parking.example.com/api"),
            (SESSION_FILE_ENV, "/tmp/pw.json"),
            (HTTP_TIMEOUT_ENV, "5"),
        ]));
        assert_eq!(cfg.api_url, "https://parking.example.com/api");
        assert_eq!(cfg.session_file, PathBuf::from("/tmp/pw.json"));
        assert_eq!(cfg.http_timeout_secs, 5);
    }

    #[test]
    fn blank_or_bad_values_fall_back() {
        let cfg = ClientConfig::from_lookup(lookup(&[(API_URL_ENV, "  "), (HTTP_TIMEOUT_ENV, "soon")]));
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        let cfg = ClientConfig::from_lookup(lookup(&[(HTTP_TIMEOUT_ENV, "0")]));
        assert_eq!(cfg.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
    }
}
