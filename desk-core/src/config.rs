//! # Console configuration
//!
//! A string key/value store with `set()` / `get()`, frozen into a
//! [`DeskConfigSnapshot`] before anything reads it. Keys are dotted
//! (`api.url`, `paginate.default`).
//!
//! ## Environment overrides
//! [`DeskConfig::load_env`] maps prefixed environment variables onto keys:
//!
//! ```rust
//! use desk_core::DeskConfig;
//!
//! let mut config = DeskConfig::new();
//! config.set("paginate.default", "10");
//! // DESK__API__URL=http://localhost:8080/api → api.url
//! config.load_env("DESK__");
//! assert_eq!(config.get("paginate.default"), Some("10"));
//! ```

use std::collections::HashMap;

pub const API_URL: &str = "api.url";
pub const PAGINATE_DEFAULT: &str = "paginate.default";

#[derive(Debug, Default)]
pub struct DeskConfig {
    values: HashMap<String, String>,
}

impl DeskConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    ///
    /// Example: config.set("paginate.default", "10")
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Check whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Copy every `PREFIX`-ed environment variable into the store,
    /// `DESK__PAGINATE__DEFAULT` → `paginate.default`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    fn load_vars(&mut self, prefix: &str, vars: impl IntoIterator<Item = (String, String)>) {
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                tracing::debug!(key = %normalized, "config override from environment");
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> DeskConfigSnapshot {
        DeskConfigSnapshot::new(self.values.clone())
    }
}

/// Immutable view handed to everything that reads configuration.
#[derive(Debug, Clone, Default)]
pub struct DeskConfigSnapshot {
    map: HashMap<String, String>,
}

impl DeskConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.parse::<usize>().ok())
    }
}
