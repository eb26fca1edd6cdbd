//! Translation of gateway events into a generic request context.
//!
//! The context mirrors the CGI-style environment a synchronous handler
//! expects: request line facts, a handful of header-derived server facts,
//! every header under an `HTTP_` key, and the body as a byte stream.

pub mod body;
pub mod headers;
pub mod translator;

use std::collections::BTreeMap;

pub use body::RequestBody;
pub use translator::{encode_query, translate, translate_with};

pub const SERVER_PROTOCOL: &str = "HTTP/1.1";
pub const CALLING_CONVENTION_VERSION: (u8, u8) = (1, 0);

/// Everything a handler learns about the inbound request.
///
/// Built once per invocation by [`translate`] and handed to the application
/// by value.
#[derive(Debug)]
pub struct RequestContext {
    pub method: String,
    pub script_name: String,
    pub path: String,
    pub query_string: String,
    pub content_type: Option<String>,
    pub content_length: usize,
    pub server_name: String,
    pub server_port: String,
    pub server_protocol: String,
    pub url_scheme: String,
    pub remote_addr: String,
    pub version: (u8, u8),
    pub multithread: bool,
    pub multiprocess: bool,
    pub run_once: bool,
    /// Every inbound header, keyed `HTTP_<NAME>` with `NAME` normalized by
    /// [`headers::normalize_header_name`].
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl RequestContext {
    /// Looks up an inbound header ignoring case and `-`/`_` differences.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&headers::environ_key(name))
            .map(String::as_str)
    }

    /// Renders the context as a flat CGI-style environment.
    ///
    /// `CONTENT_TYPE` is only present when the request carried one. The
    /// calling-convention facts are rendered as strings (`wsgi.version` as
    /// `"1.0"`, the flags as `"true"`/`"false"`).
    #[must_use]
    pub fn environ(&self) -> BTreeMap<String, String> {
        let mut env = BTreeMap::new();
        env.insert("REQUEST_METHOD".to_string(), self.method.clone());
        env.insert("SCRIPT_NAME".to_string(), self.script_name.clone());
        env.insert("PATH_INFO".to_string(), self.path.clone());
        env.insert("QUERY_STRING".to_string(), self.query_string.clone());
        if let Some(content_type) = &self.content_type {
            env.insert("CONTENT_TYPE".to_string(), content_type.clone());
        }
        env.insert("CONTENT_LENGTH".to_string(), self.content_length.to_string());
        env.insert("SERVER_NAME".to_string(), self.server_name.clone());
        env.insert("SERVER_PORT".to_string(), self.server_port.clone());
        env.insert("SERVER_PROTOCOL".to_string(), self.server_protocol.clone());
        env.insert("REMOTE_ADDR".to_string(), self.remote_addr.clone());
        env.insert("HTTP".to_string(), "on".to_string());
        env.insert("wsgi.url_scheme".to_string(), self.url_scheme.clone());
        env.insert(
            "wsgi.version".to_string(),
            format!("{}.{}", self.version.0, self.version.1),
        );
        env.insert("wsgi.multithread".to_string(), self.multithread.to_string());
        env.insert("wsgi.multiprocess".to_string(), self.multiprocess.to_string());
        env.insert("wsgi.run_once".to_string(), self.run_once.to_string());
        for (key, value) in &self.headers {
            env.insert(key.clone(), value.clone());
        }
        env
    }
}
