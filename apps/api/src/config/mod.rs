use crate::error::Result;
use config::{Environment, Map, Source, Value};
use serde::Deserialize;
use std::path::PathBuf;

/// Default similarity a fuzzy match has to beat to become a filter
pub const DEFAULT_MATCH_THRESHOLD: u8 = 80;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    pub match_threshold: u8,
}

impl Config {
    /// Load configuration from the process environment (after `.env`, if any)
    pub fn load() -> Result<Self> {
        Self::from_source(Environment::default().try_parsing(true))
    }

    /// Load configuration from an arbitrary source layered over the defaults
    pub fn from_source<S>(source: S) -> Result<Self>
    where
        S: Source + Send + Sync + 'static,
    {
        let config = config::Config::builder()
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080_i64)?
            .set_default("dataset_path", "data/movies.csv")?
            .set_default("match_threshold", DEFAULT_MATCH_THRESHOLD as i64)?
            .add_source(source)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// In-memory key/value source, mostly handy for tests and tools
#[derive(Debug, Clone, Default)]
pub struct StaticSource(pub Map<String, Value>);

impl Source for StaticSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> std::result::Result<Map<String, Value>, config::ConfigError> {
        Ok(self.0.clone())
    }
}
