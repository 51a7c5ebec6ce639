// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Cancelable registrations and grouped teardown.
//!
//! Every registration in this crate (pattern, command, routed subscriber,
//! menu entry) hands back a [`Disposable`]. A [`DisposableSet`] releases a
//! group of them atomically and is the crate's only cancellation primitive:
//! callers check `is_disposed()` at event entry points and treat disposal as
//! the one-shot "done" signal.

use std::cell::{Cell, RefCell};

/// A single cancelable registration.
///
/// Disposal runs the wrapped teardown closure at most once; all later calls
/// are no-ops. Dropping a `Disposable` without calling [`dispose`](Self::dispose)
/// leaves the registration alive, which is intentional: handles are kept for
/// the page lifetime unless a component explicitly tears them down.
pub struct Disposable {
    teardown: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Disposable {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: RefCell::new(Some(Box::new(teardown))),
        }
    }

    /// A handle that is already disposed; useful as a placeholder.
    pub fn disposed() -> Self {
        Self {
            teardown: RefCell::new(None),
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.teardown.borrow().is_none()
    }

    pub fn dispose(&self) {
        let teardown = self.teardown.borrow_mut().take();
        if let Some(teardown) = teardown {
            teardown();
        }
    }
}

impl std::fmt::Debug for Disposable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// A group of registrations released together.
///
/// `dispose` is idempotent and guarded by a flag flipped before any teardown
/// runs, so a teardown closure that re-enters the set observes it as already
/// disposed. Adding to a disposed set disposes the newcomer immediately.
#[derive(Debug, Default)]
pub struct DisposableSet {
    disposed: Cell<bool>,
    items: RefCell<Vec<Disposable>>,
}

impl DisposableSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub fn add(&self, disposable: Disposable) {
        if self.disposed.get() {
            disposable.dispose();
            return;
        }
        self.items.borrow_mut().push(disposable);
    }

    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // Drain before running teardowns so re-entrant calls see an empty set.
        let items = std::mem::take(&mut *self.items.borrow_mut());
        for item in items {
            item.dispose();
        }
    }
}
