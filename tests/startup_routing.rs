// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end startup flow: pattern registration, startup route dispatch,
//! one-shot tree resolution, and tree-path updates after document switches.

use std::cell::RefCell;
use std::rc::Rc;

use regex::Regex;
use serde_json::json;

use galene::command::CommandRegistry;
use galene::config::PageConfig;
use galene::model::{ActionId, Factory, OpenRequest};
use galene::router::{BrowserHistory, MemoryHistory, RouteArgs, Router};
use galene::tree::{ResolvedPaths, TreePathUpdater, TreeResolver};

const OPEN_ACTION: &str = "docmanager:open-url";

struct Shell {
    router: Router,
    history: Rc<MemoryHistory>,
    opened: Rc<RefCell<Vec<OpenRequest>>>,
}

fn shell(initial_url: &str) -> Shell {
    let config = PageConfig::from_json(json!({
        "baseUrl": "/lab/",
        "treePath": "notebooks/a.ipynb",
    }))
    .expect("config");
    let history = Rc::new(MemoryHistory::new(initial_url));
    let router = Router::new(
        config,
        CommandRegistry::new(),
        Rc::clone(&history) as Rc<dyn BrowserHistory>,
    );

    // The opener action, as the document manager would wire it.
    let open_action = ActionId::new(OPEN_ACTION).expect("action id");
    let opened = Rc::new(RefCell::new(Vec::new()));
    let opened_in = Rc::clone(&opened);
    let open_action_in = open_action.clone();
    router
        .commands()
        .add_command(open_action.clone(), move |args| {
            let args = RouteArgs::from_value(&open_action_in, args)?;
            if let Some(request) = OpenRequest::from_route(&args.route()) {
                opened_in.borrow_mut().push(request);
            }
            Ok(())
        })
        .expect("register opener");
    router.add_pattern(
        Regex::new(OpenRequest::PATTERN).expect("pattern"),
        open_action,
    );

    Shell {
        router,
        history,
        opened,
    }
}

#[tokio::test]
async fn tree_startup_resolves_then_document_switches_follow_in_the_url() {
    let Shell {
        router,
        history,
        opened,
    } = shell("/lab/tree?file-browser-path=%2Fdata");
    let resolver = TreeResolver::install(&router);

    // Host reports startup complete.
    router.route();

    assert_eq!(
        resolver.paths().await,
        Some(ResolvedPaths {
            browser: "/data".to_owned(),
            file: "notebooks/a.ipynb".to_owned(),
        })
    );
    assert!(opened.borrow().is_empty());

    // The user switches documents; the URL follows without re-routing.
    let updater = TreePathUpdater::new(router.clone());
    updater.update("notebooks/b.ipynb");
    updater.update("notebooks/b.ipynb");
    assert_eq!(history.current_url(), "/lab/tree/notebooks/b.ipynb");
    assert_eq!(history.mutation_count(), 1);

    // Browser back fires popstate; the embedder routes. The resolver's
    // registrations are long gone, so nothing re-resolves and no document
    // opens.
    assert!(history.back());
    router.route();
    assert!(opened.borrow().is_empty());
}

#[tokio::test]
async fn document_startup_resolves_none_and_opens_the_document() {
    let Shell {
        router, opened, ..
    } = shell("/lab/notebooks/dir%20one/nb.ipynb");
    let resolver = TreeResolver::install(&router);

    router.route();

    assert_eq!(resolver.paths().await, None);
    let opened = opened.borrow();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].path(), "dir one/nb.ipynb");
    assert_eq!(opened[0].factory(), Factory::Notebook);
}

#[tokio::test]
async fn navigation_after_resolution_opens_documents_via_patterns() {
    let Shell { router, opened, .. } = shell("/lab/tree");
    let resolver = TreeResolver::install(&router);

    router.route();
    assert!(resolver.paths().await.is_some());

    router.navigate("edit/script.py", Default::default());

    let opened = opened.borrow();
    assert_eq!(opened.len(), 1);
    assert_eq!(opened[0].path(), "script.py");
    assert_eq!(opened[0].factory(), Factory::Editor);
}
