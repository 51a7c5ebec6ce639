// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Document-open request parsing.
//!
//! The shell binds `/notebooks/<path>` and `/edit/<path>` routes to an opener
//! action it owns; this module provides the shared decode step (path
//! extraction, percent-decoding, factory selection by extension).

use regex::Regex;

use super::route::{decode_path, Route};

/// The viewer factory a document should open with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Factory {
    Notebook,
    Editor,
}

/// Picks the factory for a file path by extension: `.ipynb` opens in the
/// notebook factory, everything else in the plain editor.
pub fn factory_for_path(path: &str) -> Factory {
    let extension = path.rsplit_once('.').map(|(_, ext)| ext);
    match extension {
        Some(ext) if ext.eq_ignore_ascii_case("ipynb") => Factory::Notebook,
        _ => Factory::Editor,
    }
}

/// A decoded document-open request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    path: String,
    factory: Factory,
}

impl OpenRequest {
    /// The regex source for document-open routes, shared with the pattern
    /// registry wiring.
    pub const PATTERN: &'static str = r"^/(notebooks|edit)/(?P<path>.+)$";

    /// Decodes an open request from a matched route, `None` when the path
    /// does not carry a document segment.
    pub fn from_route(route: &Route) -> Option<Self> {
        let pattern = Regex::new(Self::PATTERN).ok()?;
        let captures = pattern.captures(route.path())?;
        let encoded = captures.name("path")?.as_str();
        let path = decode_path(encoded);
        let factory = factory_for_path(&path);
        Some(Self { path, factory })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn factory(&self) -> Factory {
        self.factory
    }
}
