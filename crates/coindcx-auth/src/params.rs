//! Ordered request parameters
//!
//! CoinDCX recomputes the signature from the raw JSON body, so the byte
//! layout of the payload matters. [`RequestParams`] keeps keys in insertion
//! order and serializes as compact JSON with `serde_json`:
//!
//! - keys appear in the order they were first inserted
//! - numbers stay JSON numbers, strings stay JSON strings
//! - absent optional values are never inserted, so `null` is never emitted
//!
//! Re-inserting an existing key replaces its value in place without moving it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{AuthError, AuthResult};

/// Insertion-ordered map of request parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RequestParams(Map<String, Value>);

impl RequestParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`
    #[must_use]
    pub fn with_opt<V: Into<Value>>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether a key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Canonical JSON serialization used as the signed payload
    pub fn to_canonical_json(&self) -> AuthResult<String> {
        serde_json::to_string(&self.0).map_err(|e| AuthError::Serialize(e.to_string()))
    }

    /// URL-encoded query string (without the leading `?`)
    ///
    /// Strings are sent verbatim, other scalars in their JSON text form.
    pub fn to_query_string(&self) -> AuthResult<String> {
        let pairs: Vec<(&str, String)> = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some((key.as_str(), text))
            })
            .collect();

        serde_urlencoded::to_string(&pairs).map_err(|e| AuthError::Serialize(e.to_string()))
    }
}
