//! Endpoint descriptors — the static shape of one HTTP call.
//!
//! An [`Endpoint`] is pure data: verb, path, and an ordered list of query
//! parameters. Request types produce one via [`crate::request::Request::endpoint`]
//! and the client turns it into a real HTTP call. URL construction happens
//! here, in [`Endpoint::url`] — plain string building, no I/O.
//!
//! # Query semantics
//!
//! The query list is an ordered multimap. Three rules, all load-bearing for
//! compatibility with the host agent:
//!
//! - entries encode in the order they were registered;
//! - a key registered with `None` is omitted from the URL entirely (never
//!   emitted as `key=`), while a present-but-empty value *is* emitted;
//! - the same key may be registered more than once (`args=a&args=b`), and
//!   every pair is percent-encoded independently.

use std::fmt;

use urlencoding::encode;

/// The HTTP verb an endpoint is called with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Formats the verb as its wire string (e.g. `"GET"`).
impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
        }
    }
}

/// Static description of one HTTP call: verb, path, query, optional body.
///
/// Paths never start with `/`; the address and scheme are supplied at URL
/// time. The optional body rides along for POST/PUT endpoints. Every
/// built-in request sends an empty body, but the field is part of the
/// descriptor so a caller-specified body needs no side channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, Option<String>)>,
    pub body: Option<String>,
}

impl Endpoint {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// `GET {path}`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST {path}`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `DELETE {path}`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter. May be called repeatedly with the same key.
    pub fn arg(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, Some(value.into())));
        self
    }

    /// Append an optional query parameter. `None` registers the key as
    /// absent, which [`Endpoint::url`] skips entirely.
    pub fn opt_arg(mut self, key: &'static str, value: Option<String>) -> Self {
        self.query.push((key, value));
        self
    }

    /// Attach a request body (POST/PUT only; the default is an empty body).
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Build the fully qualified URL for a host address (`host:port`).
    ///
    /// `http://{address}/{path}`, plus `?k=v&…` when at least one query
    /// value is present. Keys and values are percent-encoded; the composed
    /// path is not.
    pub fn url(&self, address: &str) -> String {
        let mut url = format!("http://{}/{}", address, self.path);
        let pairs: Vec<String> = self
            .query
            .iter()
            .filter_map(|(key, value)| {
                value
                    .as_ref()
                    .map(|v| format!("{}={}", encode(key), encode(v)))
            })
            .collect();
        if !pairs.is_empty() {
            url.push('?');
            url.push_str(&pairs.join("&"));
        }
        url
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_query_means_no_question_mark() {
        let url = Endpoint::get("screen/now").url("10.0.0.7:8080");
        assert_eq!(url, "http://10.0.0.7:8080/screen/now");
    }

    #[test]
    fn absent_values_are_omitted_entirely() {
        let url = Endpoint::get("datasets/dataset/cpu")
            .opt_arg("from", None)
            .opt_arg("to", None)
            .url("host:1");
        assert_eq!(url, "http://host:1/datasets/dataset/cpu");
        assert!(!url.contains("from"));
        assert!(!url.contains("to"));
    }

    #[test]
    fn empty_value_is_still_emitted() {
        let url = Endpoint::get("ping").arg("msg", "").url("host:1");
        assert_eq!(url, "http://host:1/ping?msg=");
    }

    #[test]
    fn mixed_present_and_absent_values() {
        let url = Endpoint::get("datasets/dataset/cpu")
            .opt_arg("from", Some("1000".into()))
            .opt_arg("to", None)
            .url("host:1");
        assert_eq!(url, "http://host:1/datasets/dataset/cpu?from=1000");
    }

    #[test]
    fn repeated_keys_keep_registration_order() {
        let url = Endpoint::post("filesystem/files/run")
            .arg("path", "/bin/x")
            .arg("args", "a")
            .arg("args", "b")
            .url("host:1");
        assert_eq!(
            url,
            "http://host:1/filesystem/files/run?path=%2Fbin%2Fx&args=a&args=b"
        );
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let url = Endpoint::get("ping").arg("msg", "a b&c=d/e").url("host:1");
        assert_eq!(url, "http://host:1/ping?msg=a%20b%26c%3Dd%2Fe");
    }

    #[test]
    fn percent_encoding_round_trips() {
        let original = "C:\\Program Files\\app & more=yes";
        let url = Endpoint::get("filesystem/files")
            .arg("path", original)
            .url("host:1");
        let query = url.split('?').nth(1).unwrap();
        let encoded = query.strip_prefix("path=").unwrap();
        assert_eq!(urlencoding::decode(encoded).unwrap(), original);
    }

    #[test]
    fn path_segments_are_not_encoded() {
        let url = Endpoint::delete("processes/4242").url("host:1");
        assert_eq!(url, "http://host:1/processes/4242");
    }
}
