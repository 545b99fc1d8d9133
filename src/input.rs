//! Keyboard and gesture are two producers of the same navigation intents.

use crate::gesture::GestureEvent;
use crate::model::{DeckAction, Direction};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavEvent {
    MoveLeft,
    MoveRight,
    Confirm,
}

impl NavEvent {
    /// `KeyboardEvent.key` values: arrows navigate, Enter/Space confirm.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::MoveLeft),
            "ArrowRight" => Some(Self::MoveRight),
            "Enter" | " " | "Spacebar" => Some(Self::Confirm),
            _ => None,
        }
    }

    /// `ShowMeaning` is not navigation and maps to `None`.
    pub fn from_gesture(event: &GestureEvent) -> Option<Self> {
        match event {
            GestureEvent::MoveLeft => Some(Self::MoveLeft),
            GestureEvent::MoveRight => Some(Self::MoveRight),
            GestureEvent::Confirm => Some(Self::Confirm),
            GestureEvent::ShowMeaning(_) => None,
        }
    }

    pub fn action(self) -> DeckAction {
        match self {
            Self::MoveLeft => DeckAction::Move(Direction::Left),
            Self::MoveRight => DeckAction::Move(Direction::Right),
            Self::Confirm => DeckAction::Confirm,
        }
    }
}
