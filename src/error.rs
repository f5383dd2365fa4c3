//! Error types for configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while reading or parsing a site configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {} as YAML", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to parse {} as TOML", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unsupported config extension '{extension}' for {} (expected .json, .yaml, .yml or .toml)", path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("docs directory {} does not exist or is not a directory", path.display())]
    DocsDirNotFound { path: PathBuf },
}
