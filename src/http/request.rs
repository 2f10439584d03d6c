use std::collections::HashMap;

/// Represents a parsed HTTP request from a client.
///
/// Contains the information extracted from the request line and headers.
/// The path has already been percent-decoded; any query string it carries
/// is stripped later during resolution. Request bodies are not read.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method token as sent by the client (e.g. "GET")
    pub method: String,
    /// The percent-decoded request path (e.g. "/index.html")
    pub path: String,
    /// Request headers; names lower-cased, values trimmed.
    /// When a header repeats, the last occurrence wins.
    pub headers: HashMap<String, String>,
}

impl Request {
    /// Retrieves a header value by name (case-insensitive).
    ///
    /// # Arguments
    ///
    /// * `name` - Header name to look up
    ///
    /// # Returns
    ///
    /// `Some(&str)` with the header value if present, `None` otherwise.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(|v| v.as_str())
    }

    /// Whether the request is the one retrieval verb the server supports.
    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// Whether the client asked to close the connection after this
    /// response. The value match is case-insensitive; absence of the
    /// header leaves the version-dependent keep-alive default in force.
    pub fn wants_close(&self) -> bool {
        self.header("connection")
            .map(|v| v.eq_ignore_ascii_case("close"))
            .unwrap_or(false)
    }
}
