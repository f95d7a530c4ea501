//! Marker - 対象要素を識別する class トークン

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::ConfigError;

/// Marker is the class token that selects the elements a loader manages.
///
/// A marker is a single class token: non-empty, without whitespace.
/// Matching is token-wise, so `lazy` matches `"card lazy wide"` but not
/// `"lazyload"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Marker(String);

impl Marker {
    pub const DEFAULT: &'static str = "lazyload";

    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ConfigError::EmptyMarker);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ConfigError::MarkerWhitespace(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a `class` attribute value carries this marker as one of its tokens.
    pub fn matches(&self, class_attr: &str) -> bool {
        class_attr.split_whitespace().any(|token| token == self.0)
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl TryFrom<String> for Marker {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Marker> for String {
    fn from(marker: Marker) -> Self {
        marker.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Remove every occurrence of `token` from a class attribute value.
///
/// Remaining tokens keep their order and are joined with single spaces.
/// Returns `None` when the token was not present, so callers can skip the write.
pub fn remove_token(class_attr: &str, token: &str) -> Option<String> {
    if !class_attr.split_whitespace().any(|t| t == token) {
        return None;
    }
    let kept: Vec<&str> = class_attr
        .split_whitespace()
        .filter(|t| *t != token)
        .collect();
    Some(kept.join(" "))
}
