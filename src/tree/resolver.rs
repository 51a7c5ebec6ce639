// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One-shot resolution of the initial tree view.
//!
//! On first load the shell needs to decide what to show: the directory the
//! file browser should display and the document recorded as the current tree
//! path. The resolver answers that exactly once per page load and then
//! permanently deactivates itself.
//!
//! It installs three registrations in one [`DisposableSet`]: a resolution
//! action, the root tree pattern bound to it, and a catch-all routed
//! subscriber. Whichever fires first, the action (pattern matched) or the
//! catch-all (any route dispatched without matching the pattern), disposes
//! the set and fulfills the result. Disposal is the only fulfillment signal:
//! every entry point checks `is_disposed()` first, so overlapping
//! navigations cannot double-resolve.
//!
//! If the host never calls `route()`, the future never resolves. That is a
//! startup-sequencing precondition on the host, not a recoverable error; no
//! timeout is applied.

use std::cell::RefCell;
use std::rc::Rc;

use regex::Regex;
use tokio::sync::oneshot;

use crate::config::PageConfig;
use crate::dispose::DisposableSet;
use crate::model::{ActionId, Query};
use crate::router::{RouteArgs, Router};

/// Query key naming the directory the file browser should open with.
const FILE_BROWSER_PATH_KEY: &str = "file-browser-path";

/// Matches `/`, `/tree`, and `/tree/<anything>`.
const TREE_PATTERN: &str = r"^/(tree([/?].*)?)?$";

const RESOLVE_ACTION: &str = "tree:resolve-initial";

/// The resolved initial view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Directory for the file browser, from the `file-browser-path` query
    /// key (empty when absent).
    pub browser: String,
    /// The recorded tree path from page configuration.
    pub file: String,
}

struct ResolverInner {
    config: PageConfig,
    disposables: DisposableSet,
    sender: RefCell<Option<oneshot::Sender<Option<ResolvedPaths>>>>,
}

impl ResolverInner {
    /// Fulfills the result and tears everything down. Safe to call from
    /// either branch in any order; only the first call wins.
    fn fulfill(&self, value: Option<ResolvedPaths>) {
        if self.disposables.is_disposed() {
            return;
        }
        self.disposables.dispose();
        if let Some(sender) = self.sender.borrow_mut().take() {
            let _ = sender.send(value);
        }
    }
}

/// Resolves the initial tree paths from the first routed URL.
pub struct TreeResolver {
    receiver: oneshot::Receiver<Option<ResolvedPaths>>,
}

impl TreeResolver {
    /// Installs the resolver against `router`. Must run before the host's
    /// startup-complete `route()` call.
    pub fn install(router: &Router) -> Self {
        let (sender, receiver) = oneshot::channel();
        let inner = Rc::new(ResolverInner {
            config: router.config().clone(),
            disposables: DisposableSet::new(),
            sender: RefCell::new(Some(sender)),
        });

        let action = ActionId::from_static(RESOLVE_ACTION);

        let command = {
            let inner = Rc::clone(&inner);
            let action = action.clone();
            router.commands().add_command(action.clone(), move |args| {
                if inner.disposables.is_disposed() {
                    return Ok(());
                }
                let args = RouteArgs::from_value(&action, args)?;
                let mut query = Query::parse(&args.search);
                let browser = query.remove(FILE_BROWSER_PATH_KEY).unwrap_or_default();
                let file = inner.config.tree_path();
                inner.fulfill(Some(ResolvedPaths { browser, file }));
                Ok(())
            })
        };
        match command {
            Ok(handle) => inner.disposables.add(handle),
            Err(err) => {
                // Another resolver already claimed the action; resolve to
                // nothing rather than fight over it.
                log::warn!("tree resolver not installed: {err}");
                inner.fulfill(None);
                return Self { receiver };
            }
        }

        let tree_pattern = match Regex::new(TREE_PATTERN) {
            Ok(pattern) => pattern,
            Err(err) => {
                log::error!("tree route pattern failed to compile: {err}");
                inner.fulfill(None);
                return Self { receiver };
            }
        };
        inner
            .disposables
            .add(router.add_pattern(tree_pattern, action));

        let catch_all = {
            let inner = Rc::clone(&inner);
            router.on_routed(move |_route| {
                inner.fulfill(None);
            })
        };
        inner.disposables.add(catch_all);

        Self { receiver }
    }

    /// Awaits the resolution outcome.
    ///
    /// Resolves `Some` when the tree pattern matched first, `None` when any
    /// other route was dispatched first. Pending until the host routes.
    pub async fn paths(self) -> Option<ResolvedPaths> {
        // The sender outlives the registrations; a dropped sender without a
        // send means the host tore the registry down, which we treat as
        // "nothing to restore".
        self.receiver.await.unwrap_or(None)
    }
}

impl std::fmt::Debug for TreeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeResolver").finish()
    }
}
