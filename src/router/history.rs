// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Browser history seam.
//!
//! The router never touches the browser directly; it reads and writes
//! location state through this trait. Embedders bridge it to the real
//! `History`/`Location` objects and call [`Router::route`](super::Router::route)
//! from their popstate handler. [`MemoryHistory`] is the in-process
//! implementation used by tests and headless embedders.

use std::cell::RefCell;

/// Synchronous access to the browser's location and session history.
pub trait BrowserHistory {
    /// The current pathname, including any base prefix.
    fn pathname(&self) -> String;
    /// The current search string (no leading `?`).
    fn search(&self) -> String;
    /// Pushes a new entry; implementations must no-op when `url` already
    /// matches the current entry so repeated navigations stay idempotent.
    fn push(&self, url: &str);
    /// Replaces the current entry, with the same no-op guarantee.
    fn replace(&self, url: &str);
}

#[derive(Debug)]
struct MemoryHistoryInner {
    entries: Vec<String>,
    index: usize,
    mutations: u64,
}

/// An in-memory history stack.
#[derive(Debug)]
pub struct MemoryHistory {
    inner: RefCell<MemoryHistoryInner>,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            inner: RefCell::new(MemoryHistoryInner {
                entries: vec![initial.to_owned()],
                index: 0,
                mutations: 0,
            }),
        }
    }

    pub fn current_url(&self) -> String {
        let inner = self.inner.borrow();
        inner.entries[inner.index].clone()
    }

    /// Steps back one entry, returning `false` at the oldest entry.
    ///
    /// Traversal does not count as a mutation; the embedder is expected to
    /// follow a successful `back` with `Router::route`, mirroring popstate.
    pub fn back(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        if inner.index == 0 {
            return false;
        }
        inner.index -= 1;
        true
    }

    /// Number of push/replace writes performed.
    pub fn mutation_count(&self) -> u64 {
        self.inner.borrow().mutations
    }

    pub fn entries(&self) -> Vec<String> {
        self.inner.borrow().entries.clone()
    }
}

impl BrowserHistory for MemoryHistory {
    fn pathname(&self) -> String {
        let url = self.current_url();
        match url.split_once('?') {
            Some((path, _)) => path.to_owned(),
            None => url,
        }
    }

    fn search(&self) -> String {
        let url = self.current_url();
        match url.split_once('?') {
            Some((_, search)) => search.to_owned(),
            None => String::new(),
        }
    }

    fn push(&self, url: &str) {
        let mut inner = self.inner.borrow_mut();
        if inner.entries[inner.index] == url {
            return;
        }
        let index = inner.index;
        inner.entries.truncate(index + 1);
        inner.entries.push(url.to_owned());
        inner.index += 1;
        inner.mutations += 1;
    }

    fn replace(&self, url: &str) {
        let mut inner = self.inner.borrow_mut();
        if inner.entries[inner.index] == url {
            return;
        }
        let index = inner.index;
        inner.entries[index] = url.to_owned();
        inner.mutations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::{BrowserHistory, MemoryHistory};

    #[test]
    fn push_splits_pathname_and_search() {
        let history = MemoryHistory::new("/lab/tree?file-browser-path=%2Fdata");
        assert_eq!(history.pathname(), "/lab/tree");
        assert_eq!(history.search(), "file-browser-path=%2Fdata");
    }

    #[test]
    fn push_is_a_noop_on_identical_url() {
        let history = MemoryHistory::new("/a");
        history.push("/a");
        assert_eq!(history.mutation_count(), 0);
        history.push("/b");
        history.push("/b");
        assert_eq!(history.mutation_count(), 1);
        assert_eq!(history.entries(), vec!["/a".to_owned(), "/b".to_owned()]);
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let history = MemoryHistory::new("/a");
        history.push("/b");
        history.push("/c");
        assert!(history.back());
        history.push("/d");
        assert_eq!(
            history.entries(),
            vec!["/a".to_owned(), "/b".to_owned(), "/d".to_owned()]
        );
        assert_eq!(history.current_url(), "/d");
    }

    #[test]
    fn back_stops_at_oldest_entry() {
        let history = MemoryHistory::new("/a");
        assert!(!history.back());
        assert_eq!(history.current_url(), "/a");
    }

    #[test]
    fn replace_overwrites_current_entry() {
        let history = MemoryHistory::new("/a");
        history.replace("/b");
        assert_eq!(history.entries(), vec!["/b".to_owned()]);
        assert_eq!(history.mutation_count(), 1);
    }
}
