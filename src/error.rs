//! Error types

use std::io;

/// Failures of the typed header accessors on [`HeaderStore`](crate::http::headers::HeaderStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("Missing header: {0}")]
    MissingHeader(String),

    #[error("Malformed value for header {name}: {value:?}")]
    MalformedHeaderValue { name: String, value: String },
}

/// Failures of the chunked transfer coding decoder.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChunkedError {
    #[error("Malformed chunk size line: {0:?}")]
    MalformedChunkSize(String),

    #[error("Truncated chunk data: declared {declared} bytes, {remaining} remaining")]
    TruncatedChunkData { declared: usize, remaining: usize },

    #[error("Missing CRLF after chunk data at offset {offset}")]
    MissingChunkDelimiter { offset: usize },

    #[error("Decoded body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },
}

/// Failures while undoing a `Content-Encoding`.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("Unsupported content coding: {0}")]
    UnsupportedEncoding(String),

    #[error("Decompression failed: {0}")]
    Decompression(#[from] io::Error),
}

/// Failures while loading [`Limits`](crate::config::Limits) from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Chunked(#[from] ChunkedError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
