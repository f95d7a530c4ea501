//! Loader configuration (options captured at construction).
//!
//! Options are deserialized from camelCase JSON with a default for every field,
//! so `{}` is a valid configuration. The population callback is not part of
//! this struct; it is handed to the builder.

use serde::{Deserialize, Serialize};

use super::marker::Marker;

/// How dispatch is deferred.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeferMode {
    /// Dispatch elements as they come within the fold distance (default).
    #[default]
    Belowfold,
    /// Dispatch every element once the window `load` event has fired.
    Load,
    /// Dispatch every element on the initial scan.
    #[serde(rename = "none")]
    Disabled,
}

/// ConfigError はオプション検証エラー
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("marker name must not be empty")]
    EmptyMarker,

    #[error("marker name must be a single class token, got {0:?}")]
    MarkerWhitespace(String),

    #[error("fold distance must be finite, got {0}")]
    NonFiniteFoldDistance(f64),
}

/// Immutable loader options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    /// Base path handed through to callbacks; not used by the loader.
    pub base: String,

    /// Class token identifying the managed elements.
    pub name: Marker,

    /// Pixels below the visible bottom edge within which an element is dispatched.
    ///
    /// An explicit `0` means "only once actually visible". Script loaders that
    /// read this as `foldDistance || 100` turn `0` into the default; absent
    /// is the only way to get 100 here.
    pub fold_distance: f64,

    /// Accepted for compatibility; the loader does not consult it.
    pub ignore_low_bandwidth: bool,

    /// Accepted for compatibility; there is no retry.
    pub retries: u32,

    /// Id of the scope root element. `None` scopes the loader to the document body.
    pub root: Option<String>,

    pub defer: DeferMode,

    /// Throttle window (scroll) and quiet interval (resize, orientation change).
    pub rate_limit_ms: u32,

    /// Remove the `no-js` class token from the document root element at construction.
    pub strip_no_js: bool,
}

impl LoaderConfig {
    pub const DEFAULT_FOLD_DISTANCE: f64 = 100.0;
    pub const DEFAULT_RATE_LIMIT_MS: u32 = 250;

    /// Convenience constructor for the common "marker + fold distance" case.
    pub fn new(name: Marker, fold_distance: f64) -> Self {
        Self {
            name,
            fold_distance,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fold_distance.is_finite() {
            return Err(ConfigError::NonFiniteFoldDistance(self.fold_distance));
        }
        Ok(())
    }

    pub fn rate_limit(&self) -> chrono::TimeDelta {
        chrono::TimeDelta::milliseconds(i64::from(self.rate_limit_ms))
    }
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            base: String::new(),
            name: Marker::default(),
            fold_distance: Self::DEFAULT_FOLD_DISTANCE,
            ignore_low_bandwidth: false,
            retries: 0,
            root: None,
            defer: DeferMode::default(),
            rate_limit_ms: Self::DEFAULT_RATE_LIMIT_MS,
            strip_no_js: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let config: LoaderConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(config.name.as_str(), "lazyload");
        assert_eq!(config.fold_distance, 100.0);
        assert_eq!(config.defer, DeferMode::Belowfold);
        assert_eq!(config.rate_limit_ms, 250);
        assert!(config.strip_no_js);
        assert!(config.root.is_none());
    }

    #[test]
    fn camel_case_options_are_recognized() {
        let json = r#"
        {
          "name": "mk-miniPoster",
          "foldDistance": 40,
          "ignoreLowBandwidth": true,
          "retries": 3,
          "root": "feed",
          "defer": "load",
          "rateLimitMs": 100
        }"#;
        let config: LoaderConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.name.as_str(), "mk-miniPoster");
        assert_eq!(config.fold_distance, 40.0);
        assert!(config.ignore_low_bandwidth);
        assert_eq!(config.retries, 3);
        assert_eq!(config.root.as_deref(), Some("feed"));
        assert_eq!(config.defer, DeferMode::Load);
        assert_eq!(config.rate_limit(), chrono::TimeDelta::milliseconds(100));
    }

    #[test]
    fn invalid_marker_fails_deserialization() {
        let err = serde_json::from_str::<LoaderConfig>(r#"{ "name": "a b" }"#).unwrap_err();
        assert!(err.to_string().contains("single class token"));
    }

    #[test]
    fn zero_fold_distance_is_kept() {
        let config: LoaderConfig = serde_json::from_str(r#"{ "foldDistance": 0 }"#).unwrap();
        assert_eq!(config.fold_distance, 0.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn non_finite_fold_distance_is_rejected() {
        let config = LoaderConfig::new(Marker::default(), f64::INFINITY);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonFiniteFoldDistance(f64::INFINITY))
        );
    }
}
