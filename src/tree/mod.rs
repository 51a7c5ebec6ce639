// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Initial tree-path resolution and the reverse path → URL updates.

mod resolver;
mod updater;

pub use resolver::{ResolvedPaths, TreeResolver};
pub use updater::TreePathUpdater;

#[cfg(test)]
mod tests;
