// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Page configuration shared across navigation components.
//!
//! The host page embeds a JSON blob of configuration values at startup. This
//! module exposes it as an injected key/value store handle owned by the
//! application root and passed by reference to the router, the tree resolver,
//! and the tree path updater; there is no ambient global. All reads and
//! writes happen inside single-threaded event callbacks, so a `RefCell` is
//! the only guard needed.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// Key for the application base URL, read by the router.
pub const BASE_URL: &str = "baseUrl";
/// Key for the current tree path, read by the resolver and read/written by
/// the updater.
pub const TREE_PATH: &str = "treePath";
/// Key for the notebook page kind; consumed by external collaborators only.
pub const NOTEBOOK_PAGE: &str = "notebookPage";

#[derive(Debug, Default)]
struct PageConfigInner {
    values: BTreeMap<String, Value>,
    rev: u64,
}

/// A cheaply-cloneable handle to the page configuration store.
#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    inner: Rc<RefCell<PageConfigInner>>,
}

impl PageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a store from the embedded page-config JSON object.
    pub fn from_json(value: Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject);
        };
        let values = map.into_iter().collect();
        Ok(Self {
            inner: Rc::new(RefCell::new(PageConfigInner { values, rev: 0 })),
        })
    }

    /// Like [`from_json`](Self::from_json), but a malformed blob is logged
    /// and replaced by an empty store so startup can proceed on defaults.
    pub fn from_json_lossy(value: Value) -> Self {
        match Self::from_json(value) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("ignoring malformed page config: {err}");
                Self::new()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.inner.borrow().values.get(key).cloned()
    }

    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn set(&self, key: &str, value: Value) {
        let mut inner = self.inner.borrow_mut();
        inner.values.insert(key.to_owned(), value);
        inner.rev = inner.rev.wrapping_add(1);
    }

    /// Monotonic write counter; bumped by every `set`.
    pub fn rev(&self) -> u64 {
        self.inner.borrow().rev
    }

    /// The application base URL; defaults to `/` when unset.
    pub fn base_url(&self) -> String {
        self.get_str(BASE_URL).unwrap_or_else(|| "/".to_owned())
    }

    /// The currently recorded tree path; defaults to the empty string.
    pub fn tree_path(&self) -> String {
        self.get_str(TREE_PATH).unwrap_or_default()
    }

    pub fn set_tree_path(&self, path: &str) {
        self.set(TREE_PATH, Value::String(path.to_owned()));
    }

    pub fn notebook_page(&self) -> Option<String> {
        self.get_str(NOTEBOOK_PAGE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NotAnObject,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("page config must be a JSON object"),
        }
    }
}

impl std::error::Error for ConfigError {}
