//! Per-frame gesture interpretation.
//!
//! [`GestureState`] turns a stream of classified hand frames into discrete
//! events: hold a fist to confirm, hold an open palm to reveal the latest
//! card's meaning, sweep an open palm sideways to move the highlight. Time is
//! injected as milliseconds so the whole thing runs without a browser.

use super::classify::{GestureLabel, HandFrame};
use super::geometry::PalmCenter;
use crate::cards::Card;

pub const HOLD_THRESHOLD_MS: f64 = 500.0;
pub const MOVE_THRESHOLD: f64 = 0.1;
pub const MOVE_COOLDOWN_MS: f64 = 300.0;
pub const MAX_SELECTIONS: usize = 3;

/// Fixed thresholds for the gesture layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    /// How long a fist or open palm must persist before it acts.
    pub hold_threshold_ms: f64,
    /// Horizontal palm travel (normalized) between frames that counts as a move.
    pub move_threshold: f64,
    /// Minimum gap between two navigation events.
    pub move_cooldown_ms: f64,
    pub max_selections: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hold_threshold_ms: HOLD_THRESHOLD_MS,
            move_threshold: MOVE_THRESHOLD,
            move_cooldown_ms: MOVE_COOLDOWN_MS,
            max_selections: MAX_SELECTIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GestureEvent {
    Confirm,
    MoveLeft,
    MoveRight,
    ShowMeaning(Card),
}

/// What the status bar should say after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStatus {
    WaitingForHand,
    WaitingForGesture,
    FistHolding { percent: u32 },
    Confirmed,
    LimitReached,
    OpenPalm,
    ShowingMeaning,
    MovedLeft,
    MovedRight,
}

impl GestureStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            Self::WaitingForHand => "👋",
            Self::WaitingForGesture => "✋",
            Self::FistHolding { .. } | Self::Confirmed => "✊",
            Self::LimitReached => "✅",
            Self::OpenPalm | Self::ShowingMeaning => "🖐️",
            Self::MovedLeft => "👈",
            Self::MovedRight => "👉",
        }
    }

    pub fn text(&self) -> String {
        match self {
            Self::WaitingForHand => "Place your hand in view".into(),
            Self::WaitingForGesture => "Waiting for gesture...".into(),
            Self::FistHolding { percent } => format!("Hold fist to confirm... {}%", percent),
            Self::Confirmed => "Selection confirmed!".into(),
            Self::LimitReached => format!("{} cards selected", MAX_SELECTIONS),
            Self::OpenPalm => "Open palm - hold to view meaning".into(),
            Self::ShowingMeaning => "Showing meaning...".into(),
            Self::MovedLeft => "Moved left".into(),
            Self::MovedRight => "Moved right".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    pub event: Option<GestureEvent>,
    pub status: GestureStatus,
}

impl FrameOutcome {
    fn status(status: GestureStatus) -> Self {
        Self { event: None, status }
    }
}

/// Selection facts the machine needs from the deck for one frame.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Committed cards in slot order; the last one is "most recent".
    pub selected: &'a [Card],
    /// Whether any unselected entry remains in the deck.
    pub has_available: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GestureState {
    pub config: GestureConfig,
    pub last_gesture: Option<GestureLabel>,
    pub gesture_hold_start: f64,
    pub last_hand_position: Option<PalmCenter>,
    pub last_move_time: f64,
    /// Blocks navigation while a gesture-opened meaning panel is up.
    pub is_viewing_meaning: bool,
}

impl Default for GestureState {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl GestureState {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            last_gesture: None,
            gesture_hold_start: 0.0,
            last_hand_position: None,
            last_move_time: 0.0,
            is_viewing_meaning: false,
        }
    }

    /// Feed one detector frame (`None` when no usable hand was seen).
    pub fn update(
        &mut self,
        frame: Option<HandFrame>,
        now: f64,
        ctx: SelectionContext<'_>,
    ) -> FrameOutcome {
        let Some(frame) = frame else {
            self.last_gesture = None;
            self.is_viewing_meaning = false;
            self.last_hand_position = None;
            return FrameOutcome::status(GestureStatus::WaitingForHand);
        };
        let outcome = match frame.gesture {
            GestureLabel::Fist => self.on_fist(now, &ctx),
            GestureLabel::OpenPalm => self.on_open_palm(frame.palm, now, &ctx),
            GestureLabel::None => {
                self.last_gesture = None;
                self.is_viewing_meaning = false;
                FrameOutcome::status(GestureStatus::WaitingForGesture)
            }
        };
        self.last_hand_position = Some(frame.palm);
        outcome
    }

    fn enter(&mut self, gesture: GestureLabel, now: f64) {
        self.last_gesture = Some(gesture);
        self.gesture_hold_start = now;
    }

    fn on_fist(&mut self, now: f64, ctx: &SelectionContext<'_>) -> FrameOutcome {
        self.is_viewing_meaning = false;
        if self.last_gesture != Some(GestureLabel::Fist) {
            self.enter(GestureLabel::Fist, now);
            return FrameOutcome::status(GestureStatus::FistHolding { percent: 0 });
        }
        let held = now - self.gesture_hold_start;
        if held <= self.config.hold_threshold_ms {
            let percent = (held / self.config.hold_threshold_ms * 100.0).round().max(0.0) as u32;
            return FrameOutcome::status(GestureStatus::FistHolding { percent });
        }
        if ctx.selected.len() < self.config.max_selections && ctx.has_available {
            // Restart the window so a held fist confirms once per threshold.
            self.gesture_hold_start = now;
            FrameOutcome {
                event: Some(GestureEvent::Confirm),
                status: GestureStatus::Confirmed,
            }
        } else {
            FrameOutcome::status(GestureStatus::LimitReached)
        }
    }

    fn on_open_palm(
        &mut self,
        palm: PalmCenter,
        now: f64,
        ctx: &SelectionContext<'_>,
    ) -> FrameOutcome {
        let mut event = None;
        if ctx.selected.is_empty() {
            // No card to reveal, so the palm only navigates and builds no hold
            // time. A fist hold that was interrupted by it is still dropped.
            self.last_gesture = None;
        } else if self.last_gesture != Some(GestureLabel::OpenPalm) {
            self.enter(GestureLabel::OpenPalm, now);
            self.is_viewing_meaning = false;
        } else if now - self.gesture_hold_start > self.config.hold_threshold_ms
            && !self.is_viewing_meaning
        {
            if let Some(card) = ctx.selected.last() {
                event = Some(GestureEvent::ShowMeaning(card.clone()));
                self.is_viewing_meaning = true;
                self.gesture_hold_start = now;
            }
        }
        let mut status = if self.is_viewing_meaning {
            GestureStatus::ShowingMeaning
        } else {
            GestureStatus::OpenPalm
        };

        // Reads the flag after the show-meaning check: revealing a meaning
        // suppresses navigation in the same frame.
        if !self.is_viewing_meaning {
            if let Some(last) = self.last_hand_position {
                if now - self.last_move_time > self.config.move_cooldown_ms {
                    let move_x = palm.x - last.x;
                    if move_x.abs() > self.config.move_threshold {
                        // The preview is mirrored: a hand moving right walks the deck left.
                        let (ev, st) = if move_x > 0.0 {
                            (GestureEvent::MoveLeft, GestureStatus::MovedLeft)
                        } else {
                            (GestureEvent::MoveRight, GestureStatus::MovedRight)
                        };
                        event = Some(ev);
                        status = st;
                        self.last_move_time = now;
                    }
                }
            }
        }
        FrameOutcome { event, status }
    }
}
