//! Whole-buffer decoder for the HTTP chunked transfer coding.
//!
//! ```text
//! <hex size>\r\n
//! <size bytes of data>\r\n
//! ...
//! 0\r\n
//! \r\n
//! ```
//!
//! Chunk extensions and trailers are not supported: an extension makes the
//! size line fail to parse, and anything after the zero-size chunk is ignored.

use tracing::{debug, trace, warn};

use crate::config::Limits;
use crate::error::ChunkedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChunkedState {
    ReadingChunkSizeLine,
    AfterTermination,
}

pub struct ChunkedDecoder {
    max_body_size: usize,
    max_chunk_size_line: usize,
}

impl ChunkedDecoder {
    pub fn new(limits: &Limits) -> Self {
        Self {
            max_body_size: limits.max_body_size,
            max_chunk_size_line: limits.max_chunk_size_line,
        }
    }

    pub fn decode(&self, payload: &[u8]) -> Result<Vec<u8>, ChunkedError> {
        let mut out = Vec::new();
        let mut line: Vec<u8> = Vec::new();
        let mut state = ChunkedState::ReadingChunkSizeLine;
        let mut offset = 0;
        let mut prev_cr = false;

        while offset < payload.len() && state == ChunkedState::ReadingChunkSizeLine {
            let byte = payload[offset];
            offset += 1;

            let after_cr = prev_cr;
            prev_cr = byte == b'\r';

            match byte {
                // CR only matters as part of the CRLF ending the line
                b'\r' => continue,
                // A bare LF stays in the line and fails the hex parse
                b'\n' if after_cr => {
                    let chunk_len = parse_chunk_size(&line)?;
                    line.clear();

                    if chunk_len == 0 {
                        if &payload[offset..] != b"\r\n" {
                            debug!(
                                ignored = payload.len() - offset,
                                "bytes after last chunk are not consumed"
                            );
                        }
                        state = ChunkedState::AfterTermination;
                        continue;
                    }

                    let remaining = payload.len() - offset;
                    if chunk_len > remaining {
                        return Err(ChunkedError::TruncatedChunkData {
                            declared: chunk_len,
                            remaining,
                        });
                    }
                    if chunk_len > self.max_body_size - out.len() {
                        return Err(ChunkedError::BodyTooLarge {
                            limit: self.max_body_size,
                        });
                    }

                    let end = offset + chunk_len;
                    out.extend_from_slice(&payload[offset..end]);
                    trace!(chunk_len, total = out.len(), "decoded chunk");

                    offset = skip_chunk_delimiter(payload, end)?;
                }
                _ => {
                    if line.len() >= self.max_chunk_size_line {
                        line.push(byte);
                        return Err(ChunkedError::MalformedChunkSize(
                            String::from_utf8_lossy(&line).into_owned(),
                        ));
                    }
                    line.push(byte);
                }
            }
        }

        if state != ChunkedState::AfterTermination {
            warn!(decoded = out.len(), "chunked body ended without last chunk");
        }

        Ok(out)
    }
}

/// Decodes `payload` without any size bound. `None` passes through.
pub fn decode(payload: Option<&[u8]>) -> Result<Option<Vec<u8>>, ChunkedError> {
    decode_with_limits(payload, &Limits::unbounded())
}

pub fn decode_with_limits(
    payload: Option<&[u8]>,
    limits: &Limits,
) -> Result<Option<Vec<u8>>, ChunkedError> {
    payload
        .map(|payload| ChunkedDecoder::new(limits).decode(payload))
        .transpose()
}

fn parse_chunk_size(line: &[u8]) -> Result<usize, ChunkedError> {
    let malformed =
        || ChunkedError::MalformedChunkSize(String::from_utf8_lossy(line).into_owned());

    if line.is_empty() || !line.iter().all(u8::is_ascii_hexdigit) {
        return Err(malformed());
    }

    // Only hex digits at this point, so the slice is valid UTF-8
    let digits = std::str::from_utf8(line).map_err(|_| malformed())?;
    usize::from_str_radix(digits, 16).map_err(|_| malformed())
}

/// Returns the offset of the next size line, past the CRLF following chunk data.
fn skip_chunk_delimiter(payload: &[u8], offset: usize) -> Result<usize, ChunkedError> {
    match &payload[offset..] {
        [] | [b'\r'] => Ok(payload.len()),
        [b'\r', b'\n', ..] => Ok(offset + 2),
        [b'\n', ..] => {
            warn!(offset, "bare LF after chunk data");
            Ok(offset + 1)
        }
        _ => Err(ChunkedError::MissingChunkDelimiter { offset }),
    }
}
