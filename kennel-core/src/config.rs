//! # Kennel configuration
//!
//! A minimal string key/value store, set once at startup and read through an
//! immutable snapshot afterwards.
//!
//! ```rust
//! use kennel_core::KennelConfig;
//! let mut config = KennelConfig::new();
//!
//! config.set("paginate.pageSize", "2");
//! assert_eq!(config.snapshot().get_usize("paginate.pageSize"), Some(2));
//! ```
//!
//! ## Environment overrides
//! [`KennelConfig::load_env`] imports every `PREFIX__A__B=value` variable as
//! key `a.b`:
//!
//! ```bash
//! export KENNEL__PAGINATE__PAGESIZE=5   # paginate.pagesize
//! export KENNEL__HTTP__PORT=9000        # http.port
//! ```
//!
//! Keys are lowercased, so camel-cased keys are matched case-insensitively by
//! the snapshot getters.

use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct KennelConfig {
    values: HashMap<String, String>,
}

impl KennelConfig {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Example: config.set("http.port", "8080")
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into().to_lowercase(), value.into());
    }

    /// Import `PREFIX__A__B` variables from the process environment.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    /// Same as [`load_env`](Self::load_env) over an explicit variable list.
    pub fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{prefix}__");
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(&prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> KennelConfigSnapshot {
        KennelConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct KennelConfigSnapshot {
    map: HashMap<String, String>,
}

impl KennelConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(&key.to_lowercase()).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).map(|s| s.to_string())
    }

    pub fn get_usize(&self, key: &str) -> Option<usize> {
        self.get(key).and_then(|v| v.trim().parse::<usize>().ok())
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse::<u32>().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixed_vars_become_dotted_keys() {
        let mut config = KennelConfig::new();
        config.set("http.port", "8080");
        config.load_vars(
            "KENNEL",
            vec![
                ("KENNEL__HTTP__PORT".to_string(), "9000".to_string()),
                ("KENNEL__PAGINATE__PAGESIZE".to_string(), "5".to_string()),
                ("OTHER__HTTP__PORT".to_string(), "1".to_string()),
            ],
        );

        let snap = config.snapshot();
        assert_eq!(snap.get("http.port"), Some("9000"));
        assert_eq!(snap.get_usize("paginate.pageSize"), Some(5));
    }

    #[test]
    fn typed_getters_reject_garbage() {
        let mut config = KennelConfig::new();
        config.set("paginate.pageSize", "two");
        config.set("database.maxConnections", " 8 ");

        let snap = config.snapshot();
        assert_eq!(snap.get_usize("paginate.pageSize"), None);
        assert_eq!(snap.get_u32("DATABASE.MAXCONNECTIONS"), Some(8));
        assert_eq!(snap.get("PAGINATE.PAGESIZE"), Some("two"));
    }
}
