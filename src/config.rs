use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

/// Default listen address when the config file does not name one.
const DEFAULT_LISTEN: &str = "0.0.0.0:3080";

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Listen address as a `host:port` string.
    pub listen: String,
}

impl Settings {
    /// Load settings from `config.json` in the working directory.
    ///
    /// The file is required; a missing file is a fatal startup error.
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file("config.json")
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("listen", DEFAULT_LISTEN)?
            .add_source(File::new(path, FileFormat::Json).required(true))
            .build()?;

        config.try_deserialize()
    }
}
