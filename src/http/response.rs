//! The ICAP response record filled by the transport layer.
//!
//! Setting the encapsulated response header is the only call with a side
//! effect: it parses the header into an [`EmbeddedHeaderInfo`] on the spot.
//! Bodies are kept as received and de-chunked on every read.

use std::fmt;

use tracing::debug;

use crate::config::Limits;
use crate::error::{ChunkedError, Error};
use crate::http::embedded::EmbeddedHeaderInfo;
use crate::http::headers::HeaderStore;
use crate::http::{ICAP_PROTOCOL, chunked, encoding};

/// One ICAP response, as handed over by the transport layer.
///
/// Holds the outer status line and headers together with the four sections
/// of the encapsulated HTTP exchange, exactly as received. Bodies are usually
/// still chunked; the `decoded_*` accessors un-chunk them on every call.
#[derive(Debug, Clone)]
pub struct ResponseRecord {
    protocol: String,
    version: String,
    status: u16,
    message: String,
    headers: HeaderStore,

    http_request_header: Option<Vec<u8>>,
    http_request_body: Option<Vec<u8>>,
    http_response_header: Option<Vec<u8>>,
    http_response_body: Option<Vec<u8>>,

    // Derived from `http_response_header` whenever it is set
    embedded_header: Option<EmbeddedHeaderInfo>,

    limits: Limits,
}

impl Default for ResponseRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseRecord {
    /// A record whose decoded bodies are not size-bounded.
    pub fn new() -> Self {
        Self::with_limits(Limits::unbounded())
    }

    /// A record whose decoded-body accessors enforce `limits`.
    pub fn with_limits(limits: Limits) -> Self {
        Self {
            protocol: ICAP_PROTOCOL.to_string(),
            version: String::new(),
            status: 0,
            message: String::new(),
            headers: HeaderStore::new(),
            http_request_header: None,
            http_request_body: None,
            http_response_header: None,
            http_response_body: None,
            embedded_header: None,
            limits,
        }
    }

    pub fn set_protocol(&mut self, protocol: &str) {
        self.protocol = protocol.to_string();
    }

    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    pub fn set_version(&mut self, version: &str) {
        self.version = version.to_string();
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_message(&mut self, message: &str) {
        self.message = message.to_string();
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// `<protocol>/<version> <status> <message>`, built from the outer envelope.
    pub fn status_line(&self) -> String {
        format!(
            "{}/{} {} {}",
            self.protocol, self.version, self.status, self.message
        )
    }

    /// 204: the ICAP server has no modification to make.
    pub fn is_no_content(&self) -> bool {
        self.status == 204
    }

    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.add_header(name, value);
    }

    pub fn headers(&self) -> &HeaderStore {
        &self.headers
    }

    /// The outer `Encapsulated` header, listing which sections are present.
    pub fn encapsulated(&self) -> Option<&str> {
        self.headers.first_value("Encapsulated").ok()
    }

    pub fn set_http_request_header(&mut self, header: Vec<u8>) {
        self.http_request_header = Some(header);
    }

    pub fn http_request_header(&self) -> Option<&[u8]> {
        self.http_request_header.as_deref()
    }

    pub fn set_http_request_body(&mut self, body: Vec<u8>) {
        self.http_request_body = Some(body);
    }

    pub fn raw_request_body(&self) -> Option<&[u8]> {
        self.http_request_body.as_deref()
    }

    pub fn decoded_request_body(&self) -> Result<Option<Vec<u8>>, ChunkedError> {
        chunked::decode_with_limits(self.raw_request_body(), &self.limits)
    }

    /// Stores the encapsulated response header and parses it right away,
    /// replacing any previously derived [`EmbeddedHeaderInfo`].
    pub fn set_http_response_header(&mut self, header: Vec<u8>) {
        let info = EmbeddedHeaderInfo::parse(&header);
        debug!(
            status = info.status(),
            headers = info.headers().len(),
            "parsed encapsulated response header"
        );
        self.embedded_header = Some(info);
        self.http_response_header = Some(header);
    }

    pub fn http_response_header(&self) -> Option<&[u8]> {
        self.http_response_header.as_deref()
    }

    pub fn embedded_header(&self) -> Option<&EmbeddedHeaderInfo> {
        self.embedded_header.as_ref()
    }

    pub fn set_http_response_body(&mut self, body: Vec<u8>) {
        self.http_response_body = Some(body);
    }

    pub fn raw_response_body(&self) -> Option<&[u8]> {
        self.http_response_body.as_deref()
    }

    pub fn decoded_response_body(&self) -> Result<Option<Vec<u8>>, ChunkedError> {
        chunked::decode_with_limits(self.raw_response_body(), &self.limits)
    }

    /// The response body with both the chunked framing and the
    /// `Content-Encoding` of the encapsulated response removed.
    pub fn inflated_response_body(&self) -> Result<Option<Vec<u8>>, Error> {
        let Some(body) = self.decoded_response_body()? else {
            return Ok(None);
        };

        let content_encoding = self
            .embedded_header
            .as_ref()
            .and_then(|info| info.headers().first_value("Content-Encoding").ok());

        match content_encoding {
            Some(coding) => Ok(Some(encoding::inflate_all(coding, body)?)),
            None => Ok(Some(body)),
        }
    }
}

impl fmt::Display for ResponseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status_line())
    }
}
