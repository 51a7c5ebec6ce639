// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galene-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galene and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Named executable actions.
//!
//! An action is a handler registered under an [`ActionId`] and invoked with
//! JSON args. Route patterns bind to actions by id, the sidebar toggle is an
//! action, and menu items carry `(action, args)` pairs. Registration returns
//! a [`Disposable`] that removes the action again; the tree resolver relies
//! on this to retire its one-shot resolution action.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::dispose::Disposable;
use crate::model::ActionId;

pub type CommandResult = Result<(), CommandError>;

type Handler = Rc<dyn Fn(&Value) -> CommandResult>;

/// A cheaply-cloneable handle to the action table.
#[derive(Clone, Default)]
pub struct CommandRegistry {
    actions: Rc<RefCell<BTreeMap<ActionId, Handler>>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `action`. Duplicate ids are rejected.
    pub fn add_command(
        &self,
        action: ActionId,
        handler: impl Fn(&Value) -> CommandResult + 'static,
    ) -> Result<Disposable, CommandError> {
        {
            let mut actions = self.actions.borrow_mut();
            if actions.contains_key(&action) {
                return Err(CommandError::AlreadyRegistered { action });
            }
            actions.insert(action.clone(), Rc::new(handler));
        }

        let actions = Rc::clone(&self.actions);
        Ok(Disposable::new(move || {
            actions.borrow_mut().remove(&action);
        }))
    }

    pub fn has(&self, action: &ActionId) -> bool {
        self.actions.borrow().contains_key(action)
    }

    /// Executes the action registered under `action` with `args`.
    ///
    /// The handler is cloned out of the table before it runs, so a handler
    /// may register or deregister actions (including itself) re-entrantly.
    pub fn execute(&self, action: &ActionId, args: &Value) -> CommandResult {
        let handler = self.actions.borrow().get(action).cloned();
        match handler {
            Some(handler) => handler(args),
            None => Err(CommandError::NotFound {
                action: action.clone(),
            }),
        }
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("actions", &self.actions.borrow().len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    AlreadyRegistered { action: ActionId },
    NotFound { action: ActionId },
    BadArgs { action: ActionId, reason: String },
    Failed { action: ActionId, message: String },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyRegistered { action } => {
                write!(f, "action '{action}' is already registered")
            }
            Self::NotFound { action } => write!(f, "action '{action}' is not registered"),
            Self::BadArgs { action, reason } => {
                write!(f, "bad args for action '{action}': {reason}")
            }
            Self::Failed { action, message } => write!(f, "action '{action}' failed: {message}"),
        }
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use serde_json::{json, Value};

    use super::{CommandError, CommandRegistry};
    use crate::model::ActionId;

    fn action(id: &str) -> ActionId {
        ActionId::new(id).expect("action id")
    }

    #[test]
    fn execute_dispatches_registered_handler() {
        let registry = CommandRegistry::new();
        let seen = Rc::new(Cell::new(false));
        let seen_in = Rc::clone(&seen);
        let _handle = registry
            .add_command(action("test:ping"), move |args| {
                assert_eq!(args, &json!({"x": 1}));
                seen_in.set(true);
                Ok(())
            })
            .expect("register");

        registry
            .execute(&action("test:ping"), &json!({"x": 1}))
            .expect("execute");
        assert!(seen.get());
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let registry = CommandRegistry::new();
        let _first = registry
            .add_command(action("test:dup"), |_| Ok(()))
            .expect("first");
        let second = registry.add_command(action("test:dup"), |_| Ok(()));
        assert!(matches!(
            second,
            Err(CommandError::AlreadyRegistered { .. })
        ));
    }

    #[test]
    fn execute_unknown_action_errors() {
        let registry = CommandRegistry::new();
        let result = registry.execute(&action("test:missing"), &Value::Null);
        assert!(matches!(result, Err(CommandError::NotFound { .. })));
    }

    #[test]
    fn disposing_registration_removes_action() {
        let registry = CommandRegistry::new();
        let handle = registry
            .add_command(action("test:gone"), |_| Ok(()))
            .expect("register");
        assert!(registry.has(&action("test:gone")));
        handle.dispose();
        assert!(!registry.has(&action("test:gone")));
    }

    #[test]
    fn handler_may_deregister_itself_while_running() {
        let registry = CommandRegistry::new();
        let handle: Rc<std::cell::RefCell<Option<crate::dispose::Disposable>>> =
            Rc::new(std::cell::RefCell::new(None));
        let handle_in = Rc::clone(&handle);
        let registration = registry
            .add_command(action("test:oneshot"), move |_| {
                if let Some(handle) = handle_in.borrow().as_ref() {
                    handle.dispose();
                }
                Ok(())
            })
            .expect("register");
        *handle.borrow_mut() = Some(registration);

        registry
            .execute(&action("test:oneshot"), &Value::Null)
            .expect("first run");
        let result = registry.execute(&action("test:oneshot"), &Value::Null);
        assert!(matches!(result, Err(CommandError::NotFound { .. })));
    }
}
