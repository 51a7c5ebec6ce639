// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::config::PageConfig;
use crate::model::{encode_path, url_join};
use crate::router::{NavigateOptions, Router};

/// Pushes active-document path changes back into the URL.
///
/// The inverse of the tree resolver: when the user switches documents, the
/// URL should follow without re-entering route resolution, so navigation
/// always uses `skip_routing`. History is written before the configuration
/// value, and both agree by the time `update` returns; other components
/// read `treePath` from the configuration as the source of truth.
#[derive(Debug, Clone)]
pub struct TreePathUpdater {
    router: Router,
}

impl TreePathUpdater {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    fn config(&self) -> &PageConfig {
        self.router.config()
    }

    /// Records `new_path` as the current tree path. Calling twice with the
    /// same path mutates history and configuration exactly once.
    pub fn update(&self, new_path: &str) {
        if self.config().tree_path() == new_path {
            return;
        }
        let url = url_join(["tree", encode_path(new_path).as_str()]);
        self.router
            .navigate(&url, NavigateOptions { skip_routing: true });
        self.config().set_tree_path(new_path);
    }
}
