use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog JSON error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Book {book} references unknown author {author}")]
    UnknownAuthor { book: String, author: String },

    #[error("Book {book} references unknown genre {genre}")]
    UnknownGenre { book: String, genre: String },

    #[error("Duplicate book id: {0}")]
    DuplicateBook(String),
}

impl CatalogError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Read { path, source } => {
                format!("Could not read catalog file {}: {}", path.display(), source)
            }
            CatalogError::Parse(e) => format!("Catalog file is not valid: {}", e),
            CatalogError::UnknownAuthor { book, author } => {
                format!("Book '{}' has author '{}' which is not in the author table", book, author)
            }
            CatalogError::UnknownGenre { book, genre } => {
                format!("Book '{}' has genre '{}' which is not in the genre table", book, genre)
            }
            CatalogError::DuplicateBook(id) => {
                format!("Book id '{}' appears more than once", id)
            }
        }
    }
}

/// Errors raised while loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config TOML error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl ConfigError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::Read { path, source } => {
                format!("Could not read config file {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => format!("Config file is not valid TOML: {}", e),
            ConfigError::Invalid { key, reason } => format!("Config key '{}': {}", key, reason),
        }
    }
}
