//! In-memory model of an ICAP (RFC 3507) response.
//!
//! An ICAP response carries an encapsulated HTTP exchange as opaque byte
//! sections. This crate stores those sections next to the outer status line
//! and headers, and offers the decoding a client needs on top of them:
//! - case-insensitive, multi-valued header lookup ([`HeaderStore`]),
//! - parsing of the encapsulated HTTP response header ([`EmbeddedHeaderInfo`]),
//! - removal of the chunked transfer coding from the encapsulated bodies
//!   ([`chunked`]), and optionally of their `Content-Encoding` ([`encoding`]).
//!
//! Reading from the network and tokenizing the ICAP envelope is left to the
//! transport layer, which fills a [`ResponseRecord`].
//!
//! ```
//! use icapwire::ResponseRecord;
//!
//! let mut res = ResponseRecord::new();
//! res.set_version("1.0");
//! res.set_status(200);
//! res.set_message("OK");
//! res.add_header("Encapsulated", "res-hdr=0, res-body=37");
//! res.set_http_response_header(b"HTTP/1.1 404 Not Found\r\nServer: x\r\n\r\n".to_vec());
//! res.set_http_response_body(b"4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n".to_vec());
//!
//! assert_eq!(res.status_line(), "ICAP/1.0 200 OK");
//! assert_eq!(res.embedded_header().unwrap().status(), 404);
//! assert_eq!(res.decoded_response_body().unwrap().unwrap(), b"Wikipedia");
//! ```

pub mod config;
pub mod error;
pub mod http;

pub use config::Limits;
pub use error::{ChunkedError, ConfigError, EncodingError, Error, HeaderError, Result};
pub use http::chunked;
pub use http::embedded::EmbeddedHeaderInfo;
pub use http::encoding;
pub use http::headers::{HeaderStore, HeaderValues};
pub use http::response::ResponseRecord;
