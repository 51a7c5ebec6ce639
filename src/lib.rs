// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Galene: navigation and sidebar coordination core for a browser-hosted
//! notebook shell.
//!
//! The crate owns the two stateful subsystems of the shell's extension
//! layer: URL routing with one-shot tree-path resolution ([`router`],
//! [`tree`]) and per-side sidebar visibility coordination ([`sidebar`]).
//! The browser and the document manager stay behind trait seams
//! ([`router::BrowserHistory`], [`sidebar::MainArea`], [`sidebar::MenuHost`]);
//! the embedder bridges them and drives [`router::Router::route`] from its
//! startup-complete signal and popstate handler.

pub mod command;
pub mod config;
pub mod dispose;
pub mod model;
pub mod router;
pub mod sidebar;
pub mod tree;
