// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! URL pattern routing.
//!
//! The router maps regex path patterns to actions. It evaluates the current
//! location against the patterns in registration order, executes the first
//! match's action with `{path, search}` args, and emits a routed
//! notification regardless of match outcome. `route()` is driven from
//! outside: once after the host reports startup (so every extension has had
//! a chance to register its patterns) and once per history pop.
//!
//! The router does not serialize overlapping navigations; actions run
//! without being awaited, so one-shot consumers such as the tree resolver
//! carry their own disposal guard.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::command::{CommandError, CommandRegistry};
use crate::config::PageConfig;
use crate::dispose::Disposable;
use crate::model::{url_join, ActionId, Route};

mod history;

pub use history::{BrowserHistory, MemoryHistory};


/// Options for [`Router::navigate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Update history without dispatching `route()`. Used when the caller
    /// already knows the resulting state and only needs the URL to reflect
    /// it, avoiding a feedback loop.
    pub skip_routing: bool,
}

/// The args handed to a route-bound action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteArgs {
    pub path: String,
    pub search: String,
}

impl RouteArgs {
    pub fn from_value(action: &ActionId, args: &serde_json::Value) -> Result<Self, CommandError> {
        serde_json::from_value(args.clone()).map_err(|err| CommandError::BadArgs {
            action: action.clone(),
            reason: err.to_string(),
        })
    }

    pub fn route(&self) -> Route {
        Route::new(self.path.clone(), self.search.clone())
    }
}

impl From<&Route> for RouteArgs {
    fn from(route: &Route) -> Self {
        Self {
            path: route.path().to_owned(),
            search: route.search().to_owned(),
        }
    }
}

struct PatternRegistration {
    token: u64,
    pattern: Regex,
    action: ActionId,
}

type RoutedCallback = Rc<dyn Fn(&Route)>;

struct RouterInner {
    config: PageConfig,
    commands: CommandRegistry,
    history: Rc<dyn BrowserHistory>,
    patterns: RefCell<Vec<PatternRegistration>>,
    subscribers: RefCell<Vec<(u64, RoutedCallback)>>,
    next_token: Cell<u64>,
}

impl RouterInner {
    fn take_token(&self) -> u64 {
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        token
    }
}

/// A cheaply-cloneable handle to the URL router.
#[derive(Clone)]
pub struct Router {
    inner: Rc<RouterInner>,
}

impl Router {
    pub fn new(
        config: PageConfig,
        commands: CommandRegistry,
        history: Rc<dyn BrowserHistory>,
    ) -> Self {
        Self {
            inner: Rc::new(RouterInner {
                config,
                commands,
                history,
                patterns: RefCell::new(Vec::new()),
                subscribers: RefCell::new(Vec::new()),
                next_token: Cell::new(0),
            }),
        }
    }

    pub fn commands(&self) -> &CommandRegistry {
        &self.inner.commands
    }

    pub fn config(&self) -> &PageConfig {
        &self.inner.config
    }

    /// The current route, with the configured base URL stripped from the
    /// pathname.
    pub fn current(&self) -> Route {
        let pathname = self.inner.history.pathname();
        let path = strip_base(&pathname, &self.inner.config.base_url());
        Route::new(path, self.inner.history.search())
    }

    /// Registers a pattern → action mapping. Matching runs in registration
    /// order; disposing the handle removes the mapping.
    pub fn add_pattern(&self, pattern: Regex, action: ActionId) -> Disposable {
        let token = self.inner.take_token();
        self.inner.patterns.borrow_mut().push(PatternRegistration {
            token,
            pattern,
            action,
        });

        let inner = Rc::downgrade(&self.inner);
        Disposable::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.patterns.borrow_mut().retain(|r| r.token != token);
            }
        })
    }

    /// Subscribes to the routed notification emitted by every `route()`
    /// call, match or not.
    pub fn on_routed(&self, callback: impl Fn(&Route) + 'static) -> Disposable {
        let token = self.inner.take_token();
        self.inner
            .subscribers
            .borrow_mut()
            .push((token, Rc::new(callback)));

        let inner = Rc::downgrade(&self.inner);
        Disposable::new(move || {
            if let Some(inner) = inner.upgrade() {
                inner.subscribers.borrow_mut().retain(|(t, _)| *t != token);
            }
        })
    }

    /// Evaluates the current location against the registered patterns.
    ///
    /// The first match (in registration order) has its action executed with
    /// `{path, search}`; no match is a silent no-op. The routed notification
    /// fires afterwards either way. Action failures are logged and swallowed
    /// so a broken extension cannot take down navigation.
    pub fn route(&self) {
        let route = self.current();

        let action = self
            .inner
            .patterns
            .borrow()
            .iter()
            .find(|r| r.pattern.is_match(route.path()))
            .map(|r| r.action.clone());

        if let Some(action) = action {
            log::debug!("route {route} -> {action}");
            let args = json!({
                "path": route.path(),
                "search": route.search(),
            });
            if let Err(err) = self.inner.commands.execute(&action, &args) {
                log::warn!("route action failed: {err}");
            }
        }

        // Snapshot before invoking: a subscriber may dispose itself (the
        // tree resolver's catch-all does exactly that).
        let callbacks = self
            .inner
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| Rc::clone(cb))
            .collect::<Vec<_>>();
        for callback in callbacks {
            callback(&route);
        }
    }

    /// Joins `path` onto the base URL and pushes it into history, then
    /// dispatches `route()` unless `skip_routing` is set.
    pub fn navigate(&self, path: &str, options: NavigateOptions) {
        let base = self.inner.config.base_url();
        let url = url_join([base.as_str(), path]);
        self.inner.history.push(&url);
        if !options.skip_routing {
            self.route();
        }
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("patterns", &self.inner.patterns.borrow().len())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

/// Strips the base URL prefix from a pathname, normalizing to a leading `/`.
fn strip_base(pathname: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if base.is_empty() {
        return pathname.to_owned();
    }
    match pathname.strip_prefix(base) {
        Some(rest) if rest.is_empty() => "/".to_owned(),
        Some(rest) if rest.starts_with('/') => rest.to_owned(),
        // A prefix match inside a path segment (e.g. `/labs` vs `/lab`)
        // is not a base match.
        _ => pathname.to_owned(),
    }
}
