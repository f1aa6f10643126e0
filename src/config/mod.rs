// src/config/mod.rs
//! Runtime configuration from environment variables (`.env` is loaded by the
//! binary through `dotenvy`).

use std::path::PathBuf;

use tracing::warn;

use crate::aggregate::{DEFAULT_TREND_BUCKETS, MAX_TREND_BUCKETS};
use crate::lexicon::Lexicon;

pub const ENV_LEXICON_CONFIG_PATH: &str = "LEXICON_CONFIG_PATH";
pub const DEFAULT_LEXICON_CONFIG_PATH: &str = "config/lexicon.toml";
pub const ENV_UPLOAD_CHUNK_SIZE: &str = "UPLOAD_CHUNK_SIZE";
pub const DEFAULT_UPLOAD_CHUNK_SIZE: usize = 100;
pub const ENV_TREND_BUCKETS: &str = "TREND_BUCKETS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub lexicon_path: PathBuf,
    /// Documents per chunk for batch uploads (>= 1).
    pub upload_chunk_size: usize,
    /// Number of buckets in the intention trend (`1..=MAX_TREND_BUCKETS`).
    pub trend_buckets: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from(DEFAULT_LEXICON_CONFIG_PATH),
            upload_chunk_size: DEFAULT_UPLOAD_CHUNK_SIZE,
            trend_buckets: DEFAULT_TREND_BUCKETS,
        }
    }
}

/// Parse a positive count; `None` for missing, unparsable or zero values.
fn parse_count_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n >= 1)
}

fn count_from_env(key: &str, default: usize) -> usize {
    let raw = std::env::var(key).ok();
    match parse_count_env(raw.clone()) {
        Some(n) => n,
        None => {
            if let Some(bad) = raw {
                warn!(target: "config", key, value = %bad, fallback = default, "ignoring invalid count");
            }
            default
        }
    }
}

fn trend_buckets_from_env() -> usize {
    let n = count_from_env(ENV_TREND_BUCKETS, DEFAULT_TREND_BUCKETS);
    if n > MAX_TREND_BUCKETS {
        warn!(target: "config", key = ENV_TREND_BUCKETS, value = n, max = MAX_TREND_BUCKETS, "clamping trend buckets");
    }
    n.min(MAX_TREND_BUCKETS)
}

impl AppConfig {
    pub fn from_env() -> Self {
        let lexicon_path = std::env::var(ENV_LEXICON_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEXICON_CONFIG_PATH));
        Self {
            lexicon_path,
            upload_chunk_size: count_from_env(ENV_UPLOAD_CHUNK_SIZE, DEFAULT_UPLOAD_CHUNK_SIZE),
            trend_buckets: trend_buckets_from_env(),
        }
    }

    /// Load the lexicon from `lexicon_path` (built-in when the file is absent).
    pub fn load_lexicon(&self) -> anyhow::Result<Lexicon> {
        Lexicon::load(&self.lexicon_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear() {
        std::env::remove_var(ENV_LEXICON_CONFIG_PATH);
        std::env::remove_var(ENV_UPLOAD_CHUNK_SIZE);
        std::env::remove_var(ENV_TREND_BUCKETS);
    }

    #[test]
    fn parse_count_rules() {
        assert_eq!(parse_count_env(None), None);
        assert_eq!(parse_count_env(Some(" 25 ".into())), Some(25));
        assert_eq!(parse_count_env(Some("0".into())), None);
        assert_eq!(parse_count_env(Some("-3".into())), None);
        assert_eq!(parse_count_env(Some("lots".into())), None);
    }

    #[test]
    #[serial]
    fn defaults_without_env() {
        clear();
        assert_eq!(AppConfig::from_env(), AppConfig::default());
    }

    #[test]
    #[serial]
    fn env_overrides_and_invalid_fallback() {
        clear();
        std::env::set_var(ENV_LEXICON_CONFIG_PATH, "/tmp/custom.toml");
        std::env::set_var(ENV_UPLOAD_CHUNK_SIZE, "10");
        std::env::set_var(ENV_TREND_BUCKETS, "0");
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.lexicon_path, PathBuf::from("/tmp/custom.toml"));
        assert_eq!(cfg.upload_chunk_size, 10);
        assert_eq!(cfg.trend_buckets, DEFAULT_TREND_BUCKETS);
        clear();
    }

    #[test]
    #[serial]
    fn oversized_trend_buckets_are_clamped() {
        clear();
        std::env::set_var(ENV_TREND_BUCKETS, "1000000000000");
        assert_eq!(AppConfig::from_env().trend_buckets, MAX_TREND_BUCKETS);
        std::env::set_var(ENV_TREND_BUCKETS, MAX_TREND_BUCKETS.to_string());
        assert_eq!(AppConfig::from_env().trend_buckets, MAX_TREND_BUCKETS);
        std::env::set_var(ENV_TREND_BUCKETS, "12");
        assert_eq!(AppConfig::from_env().trend_buckets, 12);
        clear();
    }

    #[test]
    #[serial]
    fn missing_lexicon_file_uses_builtin() {
        clear();
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            lexicon_path: dir.path().join("nope.toml"),
            ..AppConfig::default()
        };
        let lex = cfg.load_lexicon().unwrap();
        assert_eq!(lex.utaut2.base(), Lexicon::builtin().utaut2.base());
    }
}
