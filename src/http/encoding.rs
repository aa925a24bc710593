use flate2::write::{GzDecoder, ZlibDecoder};
use std::io::Write;

use crate::error::EncodingError;

/// Content codings that can be undone on a de-chunked body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentCoding {
    Gzip,
    Deflate,
    Identity,
}

impl ContentCoding {
    pub fn as_str(&self) -> &str {
        match self {
            ContentCoding::Gzip => "gzip",
            ContentCoding::Deflate => "deflate",
            ContentCoding::Identity => "identity",
        }
    }

    pub fn parse(token: &str) -> Result<Self, EncodingError> {
        match token.trim().to_ascii_lowercase().as_str() {
            "gzip" | "x-gzip" => Ok(ContentCoding::Gzip),
            "deflate" => Ok(ContentCoding::Deflate),
            "identity" | "" => Ok(ContentCoding::Identity),
            _ => Err(EncodingError::UnsupportedEncoding(token.trim().to_string())),
        }
    }

    /// Parses a `Content-Encoding` value, in the order the codings were applied.
    pub fn parse_list(value: &str) -> Result<Vec<Self>, EncodingError> {
        value.split(',').map(Self::parse).collect()
    }
}

pub fn inflate(coding: ContentCoding, body: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let out = match coding {
        ContentCoding::Gzip => {
            let mut d = GzDecoder::new(Vec::new());
            d.write_all(body)?;
            d.finish()?
        }
        ContentCoding::Deflate => {
            let mut d = ZlibDecoder::new(Vec::new());
            d.write_all(body)?;
            d.finish()?
        }
        ContentCoding::Identity => body.to_vec(),
    };
    Ok(out)
}

/// Undoes every coding listed in a `Content-Encoding` value, last applied first.
pub fn inflate_all(content_encoding: &str, body: Vec<u8>) -> Result<Vec<u8>, EncodingError> {
    ContentCoding::parse_list(content_encoding)?
        .into_iter()
        .rev()
        .try_fold(body, |body, coding| inflate(coding, &body))
}
