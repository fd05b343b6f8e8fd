//! # Selection/Mode State Machine
//!
//! ```text
//! Browsing --Select--> Viewing(p) --EnterEdit--> Editing(p)
//!                      Viewing(p) <--Save/Cancel-- Editing(p)
//! Browsing <--Deselect/Deleted-- Viewing(p)
//! ```
//!
//! The machine never calls the entity store. Side effects come back from
//! [`ModeMachine::apply`] as [`ModeEvent`]s for the caller to dispatch.

use crate::model::{Product, ProductFields};
use std::fmt::{self, Display};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Browsing,
    Viewing(Product),
    Editing(Product),
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Mode::Browsing => ModeKind::Browsing,
            Mode::Viewing(_) => ModeKind::Viewing,
            Mode::Editing(_) => ModeKind::Editing,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Mode::Editing(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Browsing,
    Viewing,
    Editing,
}

impl Display for ModeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModeKind::Browsing => "browsing",
            ModeKind::Viewing => "viewing",
            ModeKind::Editing => "editing",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A lookup succeeded.
    Select(Product),
    EnterEdit,
    /// The edit was submitted; carries the product as saved.
    Save(Product),
    Cancel,
    Deselect,
    /// The selection was removed by a delete.
    Deleted,
}

impl Transition {
    fn name(&self) -> &'static str {
        match self {
            Transition::Select(_) => "select",
            Transition::EnterEdit => "enter_edit",
            Transition::Save(_) => "save",
            Transition::Cancel => "cancel",
            Transition::Deselect => "deselect",
            Transition::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModeEvent {
    /// A different product is now viewed; the form should be reset.
    SelectionChanged,
    /// The form should be seeded with these fields.
    EnteredEditing(ProductFields),
    /// The form should be reset and the collection refreshed once.
    LeftEditing,
    /// The form should be reset.
    SelectionCleared,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModeError {
    #[error("cannot {intent} while {from}")]
    IllegalTransition { from: ModeKind, intent: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModeMachine {
    mode: Mode,
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self {
            mode: Mode::Browsing,
        }
    }
}

impl ModeMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Moves to the next mode, or leaves the mode untouched and returns an error when
    /// `transition` is not legal from here.
    pub fn apply(&mut self, transition: Transition) -> Result<Vec<ModeEvent>, ModeError> {
        let from = self.mode.kind();
        let intent = transition.name();

        let (next, events) = match (&self.mode, transition) {
            (Mode::Browsing | Mode::Viewing(_), Transition::Select(p)) => {
                (Mode::Viewing(p), vec![ModeEvent::SelectionChanged])
            }
            (Mode::Viewing(p), Transition::EnterEdit) => {
                let fields = p.fields();
                (Mode::Editing(p.clone()), vec![ModeEvent::EnteredEditing(fields)])
            }
            (Mode::Editing(_), Transition::Save(saved)) => {
                (Mode::Viewing(saved), vec![ModeEvent::LeftEditing])
            }
            (Mode::Editing(p), Transition::Cancel) => {
                (Mode::Viewing(p.clone()), vec![ModeEvent::LeftEditing])
            }
            (Mode::Viewing(_), Transition::Deselect | Transition::Deleted) => {
                (Mode::Browsing, vec![ModeEvent::SelectionCleared])
            }
            (Mode::Browsing, Transition::Deleted) => (Mode::Browsing, vec![]),
            _ => return Err(ModeError::IllegalTransition { from, intent }),
        };

        self.mode = next;
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> Product {
        Product::new("p1", "Pen", 2.0)
    }

    #[test]
    fn test_select_edit_save_cycle() {
        let mut machine = ModeMachine::new();
        assert_eq!(machine.mode(), &Mode::Browsing);

        assert_eq!(
            machine.apply(Transition::Select(pen())).unwrap(),
            vec![ModeEvent::SelectionChanged]
        );
        assert_eq!(machine.mode(), &Mode::Viewing(pen()));

        let events = machine.apply(Transition::EnterEdit).unwrap();
        assert_eq!(events, vec![ModeEvent::EnteredEditing(ProductFields::new("Pen", 2.0))]);
        assert_eq!(machine.mode(), &Mode::Editing(pen()));

        let saved = Product::new("p1", "Pen", 3.0);
        let events = machine.apply(Transition::Save(saved.clone())).unwrap();
        assert_eq!(events, vec![ModeEvent::LeftEditing]);
        assert_eq!(machine.mode(), &Mode::Viewing(saved));
    }

    #[test]
    fn test_cancel_returns_to_original_product() {
        let mut machine = ModeMachine::new();
        machine.apply(Transition::Select(pen())).unwrap();
        machine.apply(Transition::EnterEdit).unwrap();

        assert_eq!(machine.apply(Transition::Cancel).unwrap(), vec![ModeEvent::LeftEditing]);
        assert_eq!(machine.mode(), &Mode::Viewing(pen()));
    }

    #[test]
    fn test_deselect_and_delete_return_to_browsing() {
        let mut machine = ModeMachine::new();
        machine.apply(Transition::Select(pen())).unwrap();
        assert_eq!(
            machine.apply(Transition::Deselect).unwrap(),
            vec![ModeEvent::SelectionCleared]
        );
        assert_eq!(machine.mode(), &Mode::Browsing);

        machine.apply(Transition::Select(pen())).unwrap();
        machine.apply(Transition::Deleted).unwrap();
        assert_eq!(machine.mode(), &Mode::Browsing);

        // Deleting while browsing changes nothing
        assert!(machine.apply(Transition::Deleted).unwrap().is_empty());
    }

    #[test]
    fn test_illegal_transitions_leave_mode_untouched() {
        let mut machine = ModeMachine::new();
        assert_eq!(
            machine.apply(Transition::Save(pen())),
            Err(ModeError::IllegalTransition {
                from: ModeKind::Browsing,
                intent: "save"
            })
        );
        assert!(machine.apply(Transition::EnterEdit).is_err());
        assert_eq!(machine.mode(), &Mode::Browsing);

        machine.apply(Transition::Select(pen())).unwrap();
        assert!(machine.apply(Transition::Cancel).is_err());
        machine.apply(Transition::EnterEdit).unwrap();

        let err = machine.apply(Transition::Select(pen())).unwrap_err();
        assert_eq!(err.to_string(), "cannot select while editing");
        assert!(machine.apply(Transition::Deleted).is_err());
        assert!(machine.mode().is_editing());
    }
}
