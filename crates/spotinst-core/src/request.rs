//! Outbound request description.
//!
//! A [`Request`] carries everything the executor needs for one API call. It is
//! built by a service operation, handed to
//! [`Client::execute`](crate::client::Client::execute), and dropped when the
//! call completes.

use crate::error::{Error, Result};
use reqwest::Method;
use serde::Serialize;

/// Ordered query parameters.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Create a new, empty set of parameters.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Set a parameter, replacing every existing value for `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        self.pairs.retain(|(k, _)| *k != key);
        self.pairs.push((key, value.to_string()));
    }

    /// Append a value for `key`, keeping existing ones.
    pub fn add(&mut self, key: impl Into<String>, value: impl ToString) {
        self.pairs.push((key.into(), value.to_string()));
    }

    /// Set a parameter when the value is present.
    pub fn set_opt<T>(&mut self, key: impl Into<String>, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// One API call.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method
    pub method: Method,
    /// Resolved path, already expanded from its template
    pub path: String,
    /// Query parameters
    pub params: Params,
    /// JSON body
    pub body: Option<serde_json::Value>,
}

impl Request {
    /// Create a request with no parameters and no body.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Params::new(),
            body: None,
        }
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encode`] if `body` cannot be serialized.
    pub fn with_body<T>(mut self, body: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        let value = serde_json::to_value(body).map_err(|err| {
            Error::Encode(format!("request body for `{}`: {err}", self.path))
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Set a query parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.set(key, value);
        self
    }
}
