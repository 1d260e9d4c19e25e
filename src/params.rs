//! # Parameter Set
//!
//! The parameter set is the single value that flows through the signing proxy.
//! It is filled from the inbound request, augmented with `api_key`, `format` and
//! (for signed calls) `api_sig`, and finally rendered as a query string or a
//! form body for the upstream call.
//!
//! ## Ordering
//!
//! Keys are kept in a [`BTreeMap`], so iteration is always in ascending byte order
//! of the key. That is exactly the order the Last.fm signature requires, which
//! lets [`ParamSet::signature_base`] walk the map directly without a sort step.
//! Rendering order of query strings and form bodies carries no meaning.
//!
//! ## Signature input
//!
//! `format` never takes part in the signature, no matter when it was set. The
//! rule lives in [`ParamSet::signature_base`] rather than in the callers, so a
//! caller cannot forget it. A previously stored `api_sig` is skipped as well.

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::{error::ProxyError, lastfm::signature::Signature, types::RequestIntent};

pub const API_KEY: &str = "api_key";
pub const API_SIG: &str = "api_sig";
pub const FORMAT: &str = "format";
pub const METHOD: &str = "method";

/// Keys that never enter the canonical signature string.
const UNSIGNED_KEYS: [&str; 2] = [FORMAT, API_SIG];

/// String parameters of one Last.fm call, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    params: BTreeMap<String, String>,
}

impl ParamSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parameter set from decoded query string pairs. Values are kept
    /// verbatim; no type coercion takes place.
    pub fn from_query(query: HashMap<String, String>) -> Self {
        Self {
            params: query.into_iter().collect(),
        }
    }

    /// Parses a JSON request body into a parameter set.
    ///
    /// The body must be a JSON object. Member values are converted to their
    /// canonical string form:
    /// - strings are taken verbatim
    /// - numbers and booleans use their JSON text (`7`, `1.5`, `true`)
    /// - `null` becomes `"null"`
    /// - arrays and objects become compact JSON text
    ///
    /// # Errors
    ///
    /// Returns [`ProxyError::MalformedInput`] if the body is not valid JSON or is
    /// not an object.
    pub fn from_json(body: &str) -> Result<Self, ProxyError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProxyError::malformed(format!("request body is not valid JSON: {}", e)))?;

        let Value::Object(members) = value else {
            return Err(ProxyError::malformed("request body must be a JSON object"));
        };

        let params = members
            .into_iter()
            .map(|(key, value)| (key, canonical_value(value)))
            .collect();

        Ok(Self { params })
    }

    /// Inserts or replaces a parameter.
    ///
    /// # Example
    ///
    /// ```
    /// let mut params = ParamSet::new();
    /// params.set("method", "artist.getInfo");
    /// params.set("method", "track.love");
    /// assert_eq!(params.method(), Some("track.love"));
    /// ```
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Removes `key` and returns its previous value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.params.remove(key)
    }

    /// The Last.fm method this request targets, e.g. `artist.getInfo`.
    pub fn method(&self) -> Option<&str> {
        self.get(METHOD)
    }

    /// Classifies the set by its `method`; see [`RequestIntent::classify`].
    pub fn intent(&self) -> RequestIntent {
        RequestIntent::classify(self.method())
    }

    /// Number of parameters, including `api_key`, `format` and `api_sig` once set.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether no parameter has been set yet.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterates over all pairs in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Whether `key` takes part in the canonical signature string.
    pub fn is_signed_key(key: &str) -> bool {
        !UNSIGNED_KEYS.contains(&key)
    }

    /// Builds the canonical signature string.
    ///
    /// Every pair except `format` and `api_sig` is appended as key immediately
    /// followed by value, in ascending key order, with no separators. The shared
    /// secret is appended last.
    pub fn signature_base(&self, secret: &str) -> String {
        let mut base = String::new();
        for (key, value) in self.iter().filter(|(key, _)| Self::is_signed_key(key)) {
            base.push_str(key);
            base.push_str(value);
        }
        base.push_str(secret);
        base
    }

    /// Computes the signature over the current pairs and stores it as `api_sig`.
    pub fn sign(&mut self, secret: &str) -> Signature {
        let signature = Signature::compute(&self.signature_base(secret));
        self.set(API_SIG, signature.as_str());
        signature
    }

    /// Renders `key=value` pairs joined by `&`, with every value percent-encoded.
    /// Keys are written as they are.
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Pairs for a form-encoded body; the encoding itself happens in the HTTP client.
    pub fn to_form_pairs(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }
}

impl<K, V> FromIterator<(K, V)> for ParamSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn canonical_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
