// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sidebar visibility coordination.
//!
//! Each side (left/right) holds an ordered list of panel widgets and a
//! collapse/expand state machine driven by one toggle action. On every panel
//! add or remove the coordinator keeps three things in sync: the toggle
//! query state, a rebuilt per-side menu, and an optional command-palette
//! mirror.
//!
//! A collapsed side remembers which widget was last active; the state
//! exposed to commands is always derived as "visible iff not collapsed and a
//! current widget exists", recomputed per query rather than cached.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::command::{CommandError, CommandRegistry};
use crate::dispose::Disposable;
use crate::model::{ActionId, Side, WidgetId};

pub mod menu;
pub mod palette;

pub use menu::{build_menu, MenuDescription, MenuItem, TOGGLE_ACTION};
pub use palette::{CommandPalette, PaletteEntry};


/// A panel widget registered on one side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelWidget {
    id: WidgetId,
    title: String,
}

impl PanelWidget {
    pub fn new(id: WidgetId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    pub fn id(&self) -> &WidgetId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

/// The main documents area, consulted when a sidebar collapses so keyboard
/// focus returns to the open document.
pub trait MainArea {
    fn has_active_document(&self) -> bool;
    fn refocus_active_document(&self);
}

/// The parent menu the per-side submenus attach to. The returned handle
/// detaches the submenu again.
pub trait MenuHost {
    fn attach_submenu(&self, side: Side, menu: MenuDescription) -> Disposable;
}

/// Args for the [`TOGGLE_ACTION`] command. Menu items also carry a `title`
/// field, which deserialization ignores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleArgs {
    pub side: Side,
    pub widget_id: WidgetId,
}

#[derive(Debug)]
struct SideState {
    collapsed: bool,
    current: Option<WidgetId>,
    widgets: Vec<PanelWidget>,
    menu_entry: Option<Disposable>,
}

impl Default for SideState {
    fn default() -> Self {
        // Sides start collapsed with nothing active.
        Self {
            collapsed: true,
            current: None,
            widgets: Vec::new(),
            menu_entry: None,
        }
    }
}

struct CoordinatorInner {
    left: RefCell<SideState>,
    right: RefCell<SideState>,
    menu_host: Rc<dyn MenuHost>,
    main_area: Rc<dyn MainArea>,
    palette: Option<CommandPalette>,
}

impl CoordinatorInner {
    fn side(&self, side: Side) -> &RefCell<SideState> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn toggle(&self, side: Side, widget_id: &WidgetId) {
        let mut state = self.side(side).borrow_mut();
        if !state.widgets.iter().any(|w| w.id() == widget_id) {
            log::debug!("toggle for unregistered widget '{widget_id}' on {side} ignored");
            return;
        }

        let same_active = !state.collapsed && state.current.as_ref() == Some(widget_id);
        if same_active {
            // Collapse, remembering the widget for the next expand.
            state.collapsed = true;
            drop(state);
            if self.main_area.has_active_document() {
                self.main_area.refocus_active_document();
            }
        } else {
            state.collapsed = false;
            state.current = Some(widget_id.clone());
        }
    }

    fn rebuild_menu(&self, side: Side) {
        let previous = self.side(side).borrow_mut().menu_entry.take();
        if let Some(previous) = previous {
            previous.dispose();
        }
        let menu = build_menu(side, &self.side(side).borrow().widgets);
        if let Some(menu) = menu {
            let handle = self.menu_host.attach_submenu(side, menu);
            self.side(side).borrow_mut().menu_entry = Some(handle);
        }
    }
}

/// Owns per-side sidebar state and keeps menu and palette in sync.
pub struct SidebarCoordinator {
    inner: Rc<CoordinatorInner>,
    // Kept for the coordinator's lifetime; disposing would unbind the
    // generated menu items.
    _toggle_registration: Disposable,
}

impl SidebarCoordinator {
    /// Registers the toggle action on `commands` and returns the
    /// coordinator. Fails when [`TOGGLE_ACTION`] is already taken.
    pub fn new(
        commands: &CommandRegistry,
        menu_host: Rc<dyn MenuHost>,
        main_area: Rc<dyn MainArea>,
        palette: Option<CommandPalette>,
    ) -> Result<Self, CommandError> {
        let inner = Rc::new(CoordinatorInner {
            left: RefCell::new(SideState::default()),
            right: RefCell::new(SideState::default()),
            menu_host,
            main_area,
            palette,
        });

        let action = ActionId::from_static(TOGGLE_ACTION);
        let toggle_registration = {
            let inner = Rc::clone(&inner);
            let action = action.clone();
            commands.add_command(action.clone(), move |args| {
                let args: ToggleArgs =
                    serde_json::from_value(args.clone()).map_err(|err| CommandError::BadArgs {
                        action: action.clone(),
                        reason: err.to_string(),
                    })?;
                inner.toggle(args.side, &args.widget_id);
                Ok(())
            })?
        };

        Ok(Self {
            inner,
            _toggle_registration: toggle_registration,
        })
    }

    /// Registers a panel widget on `side`, then resyncs menu and palette.
    pub fn add_widget(&self, side: Side, widget: PanelWidget) {
        if let Some(palette) = &self.inner.palette {
            palette.add_entry(PaletteEntry::new(
                widget.id().clone(),
                side,
                widget.title(),
            ));
        }
        self.inner.side(side).borrow_mut().widgets.push(widget);
        self.inner.rebuild_menu(side);
    }

    /// Removes a panel widget from `side`, then resyncs menu and palette.
    /// Removing the active widget leaves the side without a current widget,
    /// so it is no longer visible.
    pub fn remove_widget(&self, side: Side, widget_id: &WidgetId) {
        {
            let mut state = self.inner.side(side).borrow_mut();
            state.widgets.retain(|w| w.id() != widget_id);
            if state.current.as_ref() == Some(widget_id) {
                state.current = None;
            }
        }
        if let Some(palette) = &self.inner.palette {
            palette.remove_entry(widget_id, side);
        }
        self.inner.rebuild_menu(side);
    }

    /// Applies one toggle transition; equivalent to executing
    /// [`TOGGLE_ACTION`] with the same args.
    pub fn toggle(&self, side: Side, widget_id: &WidgetId) {
        self.inner.toggle(side, widget_id);
    }

    /// Whether the toggle for `(side, widget_id)` shows as checked:
    /// the side is expanded and that widget is the active one. Recomputed
    /// from live state on every call.
    pub fn is_toggled(&self, side: Side, widget_id: &WidgetId) -> bool {
        let state = self.inner.side(side).borrow();
        !state.collapsed && state.current.as_ref() == Some(widget_id)
    }

    pub fn is_collapsed(&self, side: Side) -> bool {
        self.inner.side(side).borrow().collapsed
    }

    /// The active widget on `side`, remembered even while collapsed.
    pub fn current_widget(&self, side: Side) -> Option<WidgetId> {
        self.inner.side(side).borrow().current.clone()
    }

    pub fn widgets(&self, side: Side) -> Vec<PanelWidget> {
        self.inner.side(side).borrow().widgets.clone()
    }

    pub fn palette(&self) -> Option<&CommandPalette> {
        self.inner.palette.as_ref()
    }
}

impl std::fmt::Debug for SidebarCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SidebarCoordinator")
            .field("left", &self.inner.left.borrow())
            .field("right", &self.inner.right.borrow())
            .finish()
    }
}
