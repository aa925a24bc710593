pub mod chunked;
pub mod embedded;
pub mod encoding;
pub mod headers;
pub mod response;

/// Protocol name used in the status line of a [`ResponseRecord`](response::ResponseRecord)
/// unless the transport layer sets another one.
pub const ICAP_PROTOCOL: &str = "ICAP";
