// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::rc::Rc;

use serde_json::json;

use super::{ResolvedPaths, TreePathUpdater, TreeResolver};
use crate::command::CommandRegistry;
use crate::config::PageConfig;
use crate::router::{BrowserHistory, MemoryHistory, NavigateOptions, Router};

struct Fixture {
    router: Router,
    history: Rc<MemoryHistory>,
    config: PageConfig,
}

fn fixture(initial_url: &str, tree_path: &str) -> Fixture {
    let config = PageConfig::from_json(json!({
        "baseUrl": "/",
        "treePath": tree_path,
    }))
    .expect("config");
    let history = Rc::new(MemoryHistory::new(initial_url));
    let router = Router::new(
        config.clone(),
        CommandRegistry::new(),
        Rc::clone(&history) as Rc<dyn BrowserHistory>,
    );
    Fixture {
        router,
        history,
        config,
    }
}

#[tokio::test]
async fn tree_route_resolves_browser_and_file_paths() {
    let Fixture { router, .. } = fixture(
        "/tree?file-browser-path=%2Fdata",
        "notebooks/a.ipynb",
    );
    let resolver = TreeResolver::install(&router);

    router.route();

    assert_eq!(
        resolver.paths().await,
        Some(ResolvedPaths {
            browser: "/data".to_owned(),
            file: "notebooks/a.ipynb".to_owned(),
        })
    );
}

#[tokio::test]
async fn root_route_resolves_with_empty_browser_path() {
    let Fixture { router, .. } = fixture("/", "");
    let resolver = TreeResolver::install(&router);

    router.route();

    assert_eq!(
        resolver.paths().await,
        Some(ResolvedPaths {
            browser: String::new(),
            file: String::new(),
        })
    );
}

#[tokio::test]
async fn unmatched_route_resolves_none() {
    let Fixture { router, .. } = fixture("/nonexistent", "notebooks/a.ipynb");
    let resolver = TreeResolver::install(&router);

    router.route();

    assert_eq!(resolver.paths().await, None);
}

#[tokio::test]
async fn first_recognized_condition_wins() {
    // A document route is dispatched before any tree route: the catch-all
    // fires first and the later tree navigation must not re-resolve.
    let Fixture { router, history, .. } = fixture("/notebooks/x.ipynb", "notebooks/a.ipynb");
    let resolver = TreeResolver::install(&router);

    router.route();
    history.push("/tree?file-browser-path=%2Fdata");
    router.route();

    assert_eq!(resolver.paths().await, None);
}

#[tokio::test]
async fn repeated_tree_routes_resolve_once_with_the_first_value() {
    let Fixture { router, history, .. } = fixture(
        "/tree?file-browser-path=%2Ffirst",
        "notebooks/a.ipynb",
    );
    let resolver = TreeResolver::install(&router);

    router.route();
    history.push("/tree?file-browser-path=%2Fsecond");
    router.route();

    let paths = resolver.paths().await.expect("resolved");
    assert_eq!(paths.browser, "/first");
}

#[tokio::test]
async fn route_reentered_from_a_subscriber_resolves_exactly_once() {
    let Fixture { router, .. } = fixture("/nowhere", "notebooks/a.ipynb");

    // Subscribed before the resolver, so the unmatched outer route() snapshots
    // this callback ahead of the resolver's catch-all. Re-entering route()
    // mid-emission fulfills the resolver while the outer snapshot still holds
    // a stale catch-all reference; the disposal guard must swallow it.
    let reentered = Rc::new(std::cell::Cell::new(false));
    let reentered_in = Rc::clone(&reentered);
    let router_in = router.clone();
    let _sub = router.on_routed(move |_| {
        if !reentered_in.replace(true) {
            router_in.navigate(
                "tree?file-browser-path=%2Fdata",
                NavigateOptions::default(),
            );
        }
    });
    let resolver = TreeResolver::install(&router);

    router.route();

    assert_eq!(
        resolver.paths().await,
        Some(ResolvedPaths {
            browser: "/data".to_owned(),
            file: "notebooks/a.ipynb".to_owned(),
        })
    );
}

#[test]
fn updater_pushes_history_and_writes_config_exactly_once() {
    let Fixture {
        router,
        history,
        config,
    } = fixture("/", "");
    let rev_before = config.rev();
    let updater = TreePathUpdater::new(router);

    updater.update("notebooks/b.ipynb");
    updater.update("notebooks/b.ipynb");

    assert_eq!(history.mutation_count(), 1);
    assert_eq!(config.rev() - rev_before, 1);
    assert_eq!(config.tree_path(), "notebooks/b.ipynb");
    assert_eq!(history.current_url(), "/tree/notebooks/b.ipynb");
}

#[test]
fn updater_is_a_noop_when_config_already_matches() {
    let Fixture {
        router,
        history,
        config,
    } = fixture("/", "notebooks/a.ipynb");
    let rev_before = config.rev();
    let updater = TreePathUpdater::new(router);

    updater.update("notebooks/a.ipynb");

    assert_eq!(history.mutation_count(), 0);
    assert_eq!(config.rev(), rev_before);
}

#[test]
fn updater_percent_encodes_the_path() {
    let Fixture {
        router, history, ..
    } = fixture("/", "");
    let updater = TreePathUpdater::new(router);

    updater.update("dir one/nb.ipynb");

    assert_eq!(history.current_url(), "/tree/dir%20one/nb.ipynb");
}

#[test]
fn updater_does_not_retrigger_resolution() {
    let Fixture { router, .. } = fixture("/", "");
    let routed = Rc::new(std::cell::Cell::new(0));
    let routed_in = Rc::clone(&routed);
    let _sub = router.on_routed(move |_| routed_in.set(routed_in.get() + 1));
    let updater = TreePathUpdater::new(router);

    updater.update("notebooks/c.ipynb");

    assert_eq!(routed.get(), 0);
}
