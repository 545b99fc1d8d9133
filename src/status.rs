use crate::gesture::GestureStatus;
use crate::model::{ConfirmOutcome, Deck};
use crate::state::CameraPhase;

/// One line in the status bar: icon plus text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusLine {
    pub icon: &'static str,
    pub text: String,
}

impl StatusLine {
    pub fn new(icon: &'static str, text: impl Into<String>) -> Self {
        Self {
            icon,
            text: text.into(),
        }
    }

    pub fn idle() -> Self {
        Self::new("📷", "Turn on the camera to select cards with gestures")
    }

    pub fn reset() -> Self {
        Self::new("🔄", "Deck reshuffled")
    }

    pub fn for_camera(phase: &CameraPhase) -> Self {
        match phase {
            CameraPhase::Off => Self::new("📷", "Camera off"),
            CameraPhase::Starting => Self::new("📷", "Starting camera..."),
            CameraPhase::Active => Self::new("✋", "Camera ready, place your hand in view"),
            CameraPhase::Failed(err) => Self::new("❌", err.to_string()),
        }
    }

    /// Status after a commit attempt; `None` when there is nothing to report.
    pub fn for_confirm(deck: &Deck) -> Option<Self> {
        match deck.last_confirm.as_ref()? {
            ConfirmOutcome::Selected { .. } if deck.is_complete() => Some(Self::new(
                "✨",
                "Selection complete! Click a card to read its meaning",
            )),
            ConfirmOutcome::Selected { slot, card } => Some(Self::new(
                "🃏",
                format!("{} drawn for {}", card.name_en, slot.label()),
            )),
            ConfirmOutcome::LimitReached => Some(GestureStatus::LimitReached.into()),
            ConfirmOutcome::NothingAvailable => Some(Self::new("🂠", "No cards left to draw")),
        }
    }
}

impl From<GestureStatus> for StatusLine {
    fn from(status: GestureStatus) -> Self {
        Self::new(status.icon(), status.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::sample_cards;
    use crate::detector::CameraError;

    #[test]
    fn confirm_status_follows_the_deck() {
        let mut deck = Deck::new(sample_cards(4), 3);
        assert_eq!(StatusLine::for_confirm(&deck), None);
        deck.highlighted = Some(0);
        deck.confirm_selection();
        assert_eq!(
            StatusLine::for_confirm(&deck).map(|s| s.text),
            Some("Card 0 drawn for Past".to_string())
        );
        deck.confirm_selection();
        deck.confirm_selection();
        assert_eq!(StatusLine::for_confirm(&deck).map(|s| s.icon), Some("✨"));
        deck.confirm_selection();
        assert_eq!(
            StatusLine::for_confirm(&deck),
            Some(GestureStatus::LimitReached.into())
        );
    }

    #[test]
    fn camera_failures_surface_their_reason() {
        let line = StatusLine::for_camera(&CameraPhase::Failed(CameraError::PermissionDenied));
        assert_eq!(line.icon, "❌");
        assert_eq!(line.text, CameraError::PermissionDenied.to_string());
    }
}
