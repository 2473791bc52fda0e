//! Injector configuration.
//!
//! Options can be built in code, read from environment variables, or (with
//! the `config` feature) deserialized from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::{DiError, DiResult};

/// Environment variable overriding [`InjectorOptions::max_depth`].
pub const ENV_MAX_DEPTH: &str = "FERROUS_INJECTOR_MAX_DEPTH";
/// Environment variable overriding [`InjectorOptions::strict`].
pub const ENV_STRICT: &str = "FERROUS_INJECTOR_STRICT";

const DEFAULT_MAX_DEPTH: usize = 1024;

/// Behavior switches for an [`Injector`](crate::Injector).
///
/// # Examples
///
/// ```rust
/// use ferrous_injector::{Injector, InjectorOptions};
///
/// let options = InjectorOptions::default().with_strict(true).with_max_depth(64);
/// assert!(options.strict);
///
/// let injector = Injector::with_options(options);
/// assert_eq!(injector.options().max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct InjectorOptions {
    /// Maximum nesting of constructions and of dependency-tree expansion
    pub max_depth: usize,
    /// Fail with `Unresolvable` instead of passing `None` for declared
    /// parameters that are neither supplied nor registered
    pub strict: bool,
}

impl Default for InjectorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

impl InjectorOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Defaults overridden by `FERROUS_INJECTOR_*` environment variables.
    pub fn from_env() -> DiResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Defaults overridden by values from `lookup`.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DiResult<Self> {
        let mut options = Self::default();

        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            options.max_depth = raw
                .trim()
                .parse()
                .map_err(|_| DiError::Config(format!("{ENV_MAX_DEPTH} must be a positive integer, got {raw:?}")))?;
        }
        if let Some(raw) = lookup(ENV_STRICT) {
            options.strict = parse_bool(&raw)
                .ok_or_else(|| DiError::Config(format!("{ENV_STRICT} must be a boolean, got {raw:?}")))?;
        }

        options.validate()?;
        Ok(options)
    }

    /// Parses options from a JSON document; missing fields keep defaults.
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        let options: Self = serde_json::from_str(json).map_err(|e| DiError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> DiResult<()> {
        if self.max_depth == 0 {
            return Err(DiError::Config("max_depth must be > 0".to_string()));
        }
        Ok(())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
