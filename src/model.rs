//! Deck and selection model for Tarot Flow.
//! The deck is a `Reducible` so the UI drives it with `DeckAction`s from any
//! input source (gesture, keyboard, click).

use std::rc::Rc;
use yew::Reducible;

use crate::cards::Card;

#[derive(Clone, Debug, PartialEq)]
pub struct DeckEntry {
    pub card: Card,
    pub is_selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotLabel {
    Past,
    Present,
    Future,
}

impl SlotLabel {
    pub const ALL: [SlotLabel; 3] = [SlotLabel::Past, SlotLabel::Present, SlotLabel::Future];

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Past => "Past",
            Self::Present => "Present",
            Self::Future => "Future",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    fn step(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfirmOutcome {
    Selected { slot: SlotLabel, card: Card },
    /// Already holding `max_selections` cards; nothing changed.
    LimitReached,
    /// No unselected entry left to commit.
    NothingAvailable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Browsing,
    /// A card was just committed and is still flipping into its slot.
    Selecting,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Deck {
    pub entries: Vec<DeckEntry>,
    /// Index into `entries`; never points at a selected entry.
    pub highlighted: Option<usize>,
    /// Committed cards in slot order (past, present, future).
    pub selections: Vec<Card>,
    pub max_selections: usize,
    /// Entry committed last, until its flip animation settles.
    pub transition: Option<usize>,
    pub last_confirm: Option<ConfirmOutcome>,
}

/// In-place Fisher-Yates driven by a `[0, 1)` source (e.g. `Math.random`).
pub fn shuffle<T>(items: &mut [T], random: &mut dyn FnMut() -> f64) {
    for i in (1..items.len()).rev() {
        let j = ((random() * (i + 1) as f64).floor() as usize).min(i);
        items.swap(i, j);
    }
}

impl Deck {
    /// Deck in the given order with the middle entry highlighted.
    pub fn new(cards: Vec<Card>, max_selections: usize) -> Self {
        let entries: Vec<DeckEntry> = cards
            .into_iter()
            .map(|card| DeckEntry {
                card,
                is_selected: false,
            })
            .collect();
        let highlighted = if entries.is_empty() {
            None
        } else {
            Some(entries.len() / 2)
        };
        Self {
            entries,
            highlighted,
            selections: Vec::new(),
            max_selections,
            transition: None,
            last_confirm: None,
        }
    }

    pub fn shuffled(
        mut cards: Vec<Card>,
        max_selections: usize,
        random: &mut dyn FnMut() -> f64,
    ) -> Self {
        shuffle(&mut cards, random);
        Self::new(cards, max_selections)
    }

    pub fn is_complete(&self) -> bool {
        self.selections.len() >= self.max_selections
    }

    pub fn phase(&self) -> SessionPhase {
        if self.transition.is_some() {
            SessionPhase::Selecting
        } else if self.is_complete() {
            SessionPhase::Complete
        } else {
            SessionPhase::Browsing
        }
    }

    /// Entry indices not yet selected, in deck order.
    pub fn available(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_selected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn has_available(&self) -> bool {
        self.entries.iter().any(|e| !e.is_selected)
    }

    /// Step the highlight through unselected entries, wrapping at both ends.
    /// Returns false when nothing moved.
    pub fn move_highlight(&mut self, direction: Direction) -> bool {
        if self.is_complete() {
            return false;
        }
        let available = self.available();
        if available.is_empty() {
            return false;
        }
        let current = self
            .highlighted
            .and_then(|h| available.iter().position(|&i| i == h))
            .unwrap_or(0) as isize;
        let len = available.len() as isize;
        let mut next = current + direction.step();
        if next < 0 {
            next = len - 1;
        }
        if next >= len {
            next = 0;
        }
        self.highlighted = Some(available[next as usize]);
        true
    }

    /// Direct highlight (mouse click). Ignored for selected or unknown entries.
    pub fn highlight(&mut self, index: usize) -> bool {
        if self.is_complete() {
            return false;
        }
        match self.entries.get(index) {
            Some(entry) if !entry.is_selected => {
                self.highlighted = Some(index);
                true
            }
            _ => false,
        }
    }

    /// Commit the highlighted entry (or the first unselected one when nothing
    /// is highlighted) into the next slot.
    pub fn confirm_selection(&mut self) -> ConfirmOutcome {
        let outcome = self.commit();
        self.last_confirm = Some(outcome.clone());
        outcome
    }

    fn commit(&mut self) -> ConfirmOutcome {
        if self.is_complete() {
            return ConfirmOutcome::LimitReached;
        }
        let target = self
            .highlighted
            .filter(|&i| self.entries.get(i).is_some_and(|e| !e.is_selected))
            .or_else(|| self.entries.iter().position(|e| !e.is_selected));
        let Some(idx) = target else {
            return ConfirmOutcome::NothingAvailable;
        };
        let Some(slot) = SlotLabel::from_index(self.selections.len()) else {
            return ConfirmOutcome::LimitReached;
        };
        let entry = &mut self.entries[idx];
        entry.is_selected = true;
        let card = entry.card.clone();
        self.selections.push(card.clone());
        self.transition = Some(idx);
        self.highlighted = if self.is_complete() {
            None
        } else {
            self.entries.iter().position(|e| !e.is_selected)
        };
        ConfirmOutcome::Selected { slot, card }
    }

    pub fn settle_transition(&mut self) -> bool {
        self.transition.take().is_some()
    }

    /// Drop every selection and reshuffle the full card set.
    pub fn reset_with(&mut self, random: &mut dyn FnMut() -> f64) {
        let cards: Vec<Card> = self.entries.drain(..).map(|e| e.card).collect();
        *self = Self::shuffled(cards, self.max_selections, random);
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug, PartialEq)]
pub enum DeckAction {
    Move(Direction),
    Confirm,
    Highlight(usize),
    SettleTransition,
    Reset,
}

impl Reducible for Deck {
    type Action = DeckAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use DeckAction::*;
        let mut new = (*self).clone();
        let changed = match action {
            Move(dir) => new.move_highlight(dir),
            Confirm => {
                new.confirm_selection();
                true
            }
            Highlight(idx) => new.highlight(idx),
            SettleTransition => new.settle_transition(),
            Reset => {
                new.reset_with(&mut js_sys::Math::random);
                true
            }
        };
        if !changed {
            return self;
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::sample_cards;

    fn deck(n: u32) -> Deck {
        Deck::new(sample_cards(n), 3)
    }

    fn highlighted_id(d: &Deck) -> Option<u32> {
        d.highlighted.map(|i| d.entries[i].card.id)
    }

    /// Deterministic stand-in for `Math.random`.
    fn lcg(seed: u64) -> impl FnMut() -> f64 {
        let mut s = seed;
        move || {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            (s >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    #[test]
    fn new_deck_highlights_the_middle() {
        assert_eq!(deck(22).highlighted, Some(11));
        assert_eq!(deck(1).highlighted, Some(0));
        assert_eq!(deck(0).highlighted, None);
    }

    #[test]
    fn move_then_reverse_returns_to_start() {
        for n in 2..8 {
            for start in 0..n {
                let mut d = deck(n);
                d.highlighted = Some(start as usize);
                d.move_highlight(Direction::Right);
                d.move_highlight(Direction::Left);
                assert_eq!(d.highlighted, Some(start as usize), "n={} start={}", n, start);
            }
        }
    }

    #[test]
    fn navigation_wraps_at_both_ends() {
        let mut d = deck(4);
        d.highlighted = Some(3);
        d.move_highlight(Direction::Right);
        assert_eq!(d.highlighted, Some(0));
        d.move_highlight(Direction::Left);
        assert_eq!(d.highlighted, Some(3));
    }

    #[test]
    fn navigation_skips_selected_entries() {
        let mut d = deck(5);
        d.highlighted = Some(1);
        d.confirm_selection();
        // First unselected entry takes the highlight after a commit.
        assert_eq!(d.highlighted, Some(0));
        d.move_highlight(Direction::Right);
        assert_eq!(d.highlighted, Some(2));
        d.move_highlight(Direction::Left);
        d.move_highlight(Direction::Left);
        assert_eq!(d.highlighted, Some(4));
    }

    #[test]
    fn missing_highlight_counts_from_first_available() {
        let mut d = deck(4);
        d.highlighted = None;
        d.move_highlight(Direction::Right);
        assert_eq!(d.highlighted, Some(1));
        d.highlighted = None;
        d.move_highlight(Direction::Left);
        assert_eq!(d.highlighted, Some(3));
    }

    #[test]
    fn confirm_fills_slots_in_order() {
        let mut d = deck(6);
        d.highlighted = Some(4);
        let out = d.confirm_selection();
        assert_eq!(
            out,
            ConfirmOutcome::Selected {
                slot: SlotLabel::Past,
                card: d.entries[4].card.clone()
            }
        );
        assert!(d.entries[4].is_selected);
        assert_eq!(d.phase(), SessionPhase::Selecting);
        assert!(d.settle_transition());
        assert_eq!(d.phase(), SessionPhase::Browsing);

        d.confirm_selection();
        d.confirm_selection();
        let labels: Vec<_> = (0..d.selections.len())
            .filter_map(SlotLabel::from_index)
            .map(|l| l.label())
            .collect();
        assert_eq!(labels, vec!["Past", "Present", "Future"]);
        assert_eq!(d.highlighted, None);
        d.settle_transition();
        assert_eq!(d.phase(), SessionPhase::Complete);
    }

    #[test]
    fn confirm_without_highlight_takes_first_available() {
        let mut d = deck(3);
        d.highlighted = None;
        assert!(matches!(
            d.confirm_selection(),
            ConfirmOutcome::Selected { slot: SlotLabel::Past, ref card } if card.id == 0
        ));
    }

    #[test]
    fn confirm_at_limit_changes_nothing() {
        let mut d = deck(5);
        for _ in 0..3 {
            d.confirm_selection();
        }
        d.settle_transition();
        let before = d.clone();
        assert_eq!(d.confirm_selection(), ConfirmOutcome::LimitReached);
        assert_eq!(d.selections, before.selections);
        assert_eq!(d.entries, before.entries);
        assert_eq!(d.highlighted, before.highlighted);
        assert!(!d.move_highlight(Direction::Right));
        assert!(!d.highlight(4));
    }

    #[test]
    fn small_deck_runs_out_before_limit() {
        let mut d = deck(2);
        d.confirm_selection();
        d.confirm_selection();
        assert_eq!(d.confirm_selection(), ConfirmOutcome::NothingAvailable);
        assert_eq!(d.selections.len(), 2);
        assert!(!d.move_highlight(Direction::Left));
    }

    #[test]
    fn click_highlight_ignores_selected_entries() {
        let mut d = deck(5);
        d.highlighted = Some(2);
        d.confirm_selection();
        assert!(!d.highlight(2));
        assert!(!d.highlight(99));
        assert!(d.highlight(3));
        assert_eq!(d.highlighted, Some(3));
    }

    #[test]
    fn reset_reshuffles_and_allows_three_selections() {
        let mut d = deck(22);
        d.confirm_selection();
        d.confirm_selection();
        let mut rng = lcg(42);
        d.reset_with(&mut rng);
        assert!(d.selections.is_empty());
        assert_eq!(d.entries.len(), 22);
        assert!(d.entries.iter().all(|e| !e.is_selected));
        assert_eq!(d.transition, None);

        let mut ids: Vec<u32> = d.entries.iter().map(|e| e.card.id).collect();
        ids.sort();
        assert_eq!(ids, (0..22).collect::<Vec<_>>());

        let mut labels = Vec::new();
        for _ in 0..5 {
            if let ConfirmOutcome::Selected { slot, .. } = d.confirm_selection() {
                labels.push(slot);
            }
        }
        assert_eq!(labels, SlotLabel::ALL.to_vec());
        assert_eq!(d.selections.len(), 3);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut lcg(7));
        assert_ne!(items, (0..50).collect::<Vec<_>>());
        items.sort();
        assert_eq!(items, (0..50).collect::<Vec<_>>());

        // A source pinned at the top of its range must not index out of bounds.
        let mut items = vec![1, 2, 3];
        shuffle(&mut items, &mut || 0.999_999_999);
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn reducer_skips_no_op_actions() {
        let d = Rc::new(deck(3));
        let same = d.clone().reduce(DeckAction::SettleTransition);
        assert!(Rc::ptr_eq(&d, &same));
        let moved = d.clone().reduce(DeckAction::Move(Direction::Right));
        assert_eq!(highlighted_id(&moved), Some(2));
        let confirmed = moved.reduce(DeckAction::Confirm);
        assert_eq!(confirmed.selections.len(), 1);
        assert_eq!(confirmed.phase(), SessionPhase::Selecting);
    }
}
