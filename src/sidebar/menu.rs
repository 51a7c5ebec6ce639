// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sidebar menu construction.
//!
//! The per-side submenu is not patched incrementally: every panel add or
//! remove rebuilds it from the live widget list, which keeps the menu a pure
//! function of side state. Sidebars hold single-digit panel counts, so the
//! rebuild cost is irrelevant.

use serde::Serialize;
use serde_json::json;

use super::PanelWidget;
use crate::model::{ActionId, Side};

/// Action id the generated menu items bind to.
pub const TOGGLE_ACTION: &str = "sidebar:toggle";

/// One generated menu item, bound to the toggle action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub title: String,
    pub action: ActionId,
    pub args: serde_json::Value,
}

/// A freshly built submenu for one side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuDescription {
    pub label: String,
    pub items: Vec<MenuItem>,
}

/// Builds the submenu for `side` from the current widget list, in order.
/// Returns `None` when the side holds no widgets: an empty sidebar
/// contributes no menu entry at all.
pub fn build_menu(side: Side, widgets: &[PanelWidget]) -> Option<MenuDescription> {
    if widgets.is_empty() {
        return None;
    }
    let action = ActionId::from_static(TOGGLE_ACTION);
    let items = widgets
        .iter()
        .map(|widget| MenuItem {
            title: widget.title().to_owned(),
            action: action.clone(),
            args: json!({
                "side": side,
                "title": widget.title(),
                "widgetId": widget.id(),
            }),
        })
        .collect();
    Some(MenuDescription {
        label: side.label().to_owned(),
        items,
    })
}
