//! Manifest operations used while scanning
//!
//! The scanners only ever add to a manifest. The one rule enforced here is that
//! the `default` package, once created, is never replaced.

use crate::types::{Action, Manifest, Package, DEFAULT_PACKAGE};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::debug;

impl Manifest {
    /// Create an empty manifest (`packages: {}`)
    pub fn new() -> Self {
        Manifest::default()
    }

    /// Package lookup by name
    pub fn get_package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    /// Register a package discovered as a directory under `packages/`.
    ///
    /// A fresh record is created for every name except `default`, which keeps
    /// whatever top-level single-file actions were already collected into it.
    pub fn declare_package(&mut self, name: &str) -> &mut Package {
        match self.packages.entry(name.to_string()) {
            Entry::Occupied(mut entry) => {
                if name == DEFAULT_PACKAGE {
                    debug!("Keeping existing '{}' package", DEFAULT_PACKAGE);
                } else {
                    entry.insert(Package::default());
                }
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(Package::default()),
        }
    }

    /// The implicit `default` package, created on first use
    pub fn default_package_mut(&mut self) -> &mut Package {
        self.packages
            .entry(DEFAULT_PACKAGE.to_string())
            .or_default()
    }

    /// Insert `value` under `key` in the env map of every package
    pub fn broadcast_env(&mut self, key: &str, value: &str) {
        for package in self.packages.values_mut() {
            package.set_env(key, value);
        }
    }

    /// Total number of actions across all packages
    pub fn action_count(&self) -> usize {
        self.packages.values().map(|p| p.actions.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl Package {
    /// Register an action, replacing any action with the same name.
    ///
    /// Returns the replaced action, if there was one.
    pub fn insert_action(&mut self, name: &str, action: Action) -> Option<Action> {
        let previous = self.actions.insert(name.to_string(), action);
        if let Some(ref prev) = previous {
            debug!(
                "Action '{}' replaced (was {})",
                name,
                prev.function.display()
            );
        }
        previous
    }

    /// Set one environment entry, creating the env map on first use
    pub fn set_env(&mut self, key: &str, value: &str) {
        self.env
            .get_or_insert_with(BTreeMap::new)
            .insert(key.to_string(), value.to_string());
    }

    pub fn get_action(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Action, Manifest, DEFAULT_PACKAGE};

    #[test]
    fn test_declare_package_keeps_default() {
        let mut manifest = Manifest::new();
        manifest
            .default_package_mut()
            .insert_action("hello", Action::web("packages/hello.js"));

        manifest.declare_package(DEFAULT_PACKAGE);

        let default = manifest.get_package(DEFAULT_PACKAGE);
        assert!(default.is_some_and(|p| p.get_action("hello").is_some()));
    }

    #[test]
    fn test_declare_package_resets_named_package() {
        let mut manifest = Manifest::new();
        manifest
            .declare_package("utils")
            .insert_action("old", Action::web("packages/utils/old.py"));

        let package = manifest.declare_package("utils");
        assert!(package.actions.is_empty());
    }

    #[test]
    fn test_broadcast_env_creates_env_map() {
        let mut manifest = Manifest::new();
        manifest.declare_package("p1");
        manifest.declare_package("p2");
        assert!(manifest.packages.values().all(|p| p.env.is_none()));

        manifest.broadcast_env("A", "1");

        for package in manifest.packages.values() {
            let value = package.env.as_ref().and_then(|env| env.get("A"));
            assert_eq!(value.map(String::as_str), Some("1"));
        }
    }

    #[test]
    fn test_insert_action_returns_replaced() {
        let mut manifest = Manifest::new();
        let package = manifest.declare_package("p");
        assert!(package
            .insert_action("foo", Action::web("p/foo"))
            .is_none());
        let replaced = package.insert_action("foo", Action::web("p/foo.py"));
        assert_eq!(replaced, Some(Action::web("p/foo")));
        assert_eq!(manifest.action_count(), 1);
    }
}
