use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use pawhaven_api::password::HashCost;
use pawhaven_api::session::SessionConfig;

/// Placeholder session secrets that should never reach production.
pub const PLACEHOLDER_SECRETS: &[&str] = &["secret-key", "change-me"];

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub static_dir: PathBuf,
    pub seed_file: Option<PathBuf>,
    pub session: SessionConfig,
    pub hash_cost: HashCost,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let session_defaults = SessionConfig::default();
        let hash_defaults = HashCost::default();

        Ok(Self {
            host: lookup("PAWHAVEN_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse(&lookup, "PAWHAVEN_PORT", 3000)?,
            db_path: lookup("PAWHAVEN_DB_PATH").unwrap_or_else(|| "pets.db".into()).into(),
            static_dir: lookup("PAWHAVEN_STATIC_DIR").unwrap_or_else(|| "public".into()).into(),
            seed_file: lookup("PAWHAVEN_SEED_FILE").map(PathBuf::from),
            session: SessionConfig {
                secret: lookup("PAWHAVEN_SESSION_SECRET").unwrap_or(session_defaults.secret),
                cookie_name: lookup("PAWHAVEN_SESSION_COOKIE").unwrap_or(session_defaults.cookie_name),
                ttl_secs: parse(&lookup, "PAWHAVEN_SESSION_TTL_SECS", session_defaults.ttl_secs)?,
                secure: parse(&lookup, "PAWHAVEN_SESSION_SECURE", session_defaults.secure)?,
            },
            hash_cost: HashCost {
                memory_kib: parse(&lookup, "PAWHAVEN_HASH_MEMORY_KIB", hash_defaults.memory_kib)?,
                iterations: parse(&lookup, "PAWHAVEN_HASH_ITERATIONS", hash_defaults.iterations)?,
            },
        })
    }

    pub fn addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().with_context(|| format!("Invalid listen address {}", addr))
    }

    pub fn has_placeholder_secret(&self) -> bool {
        PLACEHOLDER_SECRETS.contains(&self.session.secret.as_str())
    }
}

fn parse<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.db_path, PathBuf::from("pets.db"));
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert!(config.seed_file.is_none());
        assert_eq!(config.session.cookie_name, "pawhaven.sid");
        assert!(!config.session.secure);
        assert_eq!(config.hash_cost, HashCost::default());
        assert!(config.has_placeholder_secret());
        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn overrides() {
        let config = config_from(&[
            ("PAWHAVEN_HOST", "127.0.0.1"),
            ("PAWHAVEN_PORT", "8080"),
            ("PAWHAVEN_DB_PATH", "/var/lib/pawhaven/pets.db"),
            ("PAWHAVEN_SEED_FILE", "seed/pets.json"),
            ("PAWHAVEN_SESSION_SECRET", "a-long-random-secret"),
            ("PAWHAVEN_SESSION_TTL_SECS", "600"),
            ("PAWHAVEN_SESSION_SECURE", "true"),
            ("PAWHAVEN_HASH_ITERATIONS", "4"),
        ])
        .unwrap();

        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:8080");
        assert_eq!(config.db_path, PathBuf::from("/var/lib/pawhaven/pets.db"));
        assert_eq!(config.seed_file, Some(PathBuf::from("seed/pets.json")));
        assert_eq!(config.session.ttl_secs, 600);
        assert!(config.session.secure);
        assert_eq!(config.hash_cost.iterations, 4);
        assert!(!config.has_placeholder_secret());
    }

    #[test]
    fn invalid_numbers_are_errors() {
        let err = config_from(&[("PAWHAVEN_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PAWHAVEN_PORT"));

        assert!(config_from(&[("PAWHAVEN_SESSION_SECURE", "yes")]).is_err());
    }
}
