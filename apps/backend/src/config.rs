//! Server configuration from environment variables

use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_COURSE_PATH: &str = "data/course.json";

/// Settings read at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Scraped course document
    pub course_path: PathBuf,
    /// Optional JSON overrides for the content rules
    pub content_rules_path: Option<PathBuf>,
    /// Fixed seed for exercise generation; random when unset
    pub exercise_seed: Option<u64>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT is not a valid port: {}", port))?,
            None => DEFAULT_PORT,
        };

        let exercise_seed = var("EXERCISE_SEED")
            .map(|seed| {
                seed.parse()
                    .with_context(|| format!("EXERCISE_SEED is not a number: {}", seed))
            })
            .transpose()?;

        Ok(Self {
            database_url,
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            course_path: var("COURSE_PATH")
                .unwrap_or_else(|| DEFAULT_COURSE_PATH.to_string())
                .into(),
            content_rules_path: var("CONTENT_RULES_PATH").map(PathBuf::from),
            exercise_seed,
        })
    }

    /// Address to bind, as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio_test::{assert_err, assert_ok};

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            ServerConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://db")])).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.course_path, PathBuf::from("data/course.json"));
        assert_eq!(config.content_rules_path, None);
        assert_eq!(config.exercise_seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("COURSE_PATH", "/srv/course.json"),
            ("CONTENT_RULES_PATH", "/srv/rules.json"),
            ("EXERCISE_SEED", "42"),
        ]))
        .unwrap();
        assert_eq!(config.addr(), "127.0.0.1:8080");
        assert_eq!(config.course_path, PathBuf::from("/srv/course.json"));
        assert_eq!(config.content_rules_path, Some(PathBuf::from("/srv/rules.json")));
        assert_eq!(config.exercise_seed, Some(42));
    }

    #[test]
    fn test_missing_database_url() {
        let err = ServerConfig::from_lookup(lookup(&[("DATABASE_URL", " ")])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_numbers() {
        assert_err!(ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("PORT", "http"),
        ])));
        assert_err!(ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("EXERCISE_SEED", "-1"),
        ])));
        assert_ok!(ServerConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://db"),
            ("PORT", ""),
        ])));
    }
}
