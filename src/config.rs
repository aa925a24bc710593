use serde::Deserialize;
use std::path::Path;

use tracing::warn;

use crate::error::ConfigError;

/// Bounds applied when decoding embedded bodies.
///
/// Limits are owned by each [`ResponseRecord`](crate::http::response::ResponseRecord)
/// and passed explicitly; there is no process-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum size of a de-chunked body, in bytes.
    pub max_body_size: usize,

    /// Maximum length of a single chunk size line, CR bytes excluded.
    pub max_chunk_size_line: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_body_size: 16 * 1024 * 1024, // 16 MiB
            max_chunk_size_line: 32,
        }
    }
}

impl Limits {
    /// No bounds at all, used by the plain [`chunked::decode`](crate::http::chunked::decode).
    pub const fn unbounded() -> Self {
        Self {
            max_body_size: usize::MAX,
            max_chunk_size_line: usize::MAX,
        }
    }

    /// Parses limits from a TOML document. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str::<Limits>(content)?)
    }

    pub fn try_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Loads limits from `path`, falling back to [`Limits::default`] when the
    /// file cannot be read or deserialized.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_from_file(path) {
            Ok(limits) => limits,
            Err(err) => {
                warn!(path = %path.display(), %err, "fall back to default limits");
                Limits::default()
            }
        }
    }
}
