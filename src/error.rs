use thiserror::Error;

/// Errors raised while loading the font manager configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Config JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {variable}: '{value}'")]
    InvalidEnv { variable: &'static str, value: String },
}
