//! Static card dataset (the 22 Major Arcana), embedded at build time.

use serde::{Deserialize, Serialize};

const CARDS_JSON: &str = include_str!("../assets/cards.json");

/// Gradient base colours; a card's colour is `id mod len`.
const PALETTE: [&str; 10] = [
    "#9b59b6", "#3498db", "#1abc9c", "#e74c3c", "#f39c12", "#8e44ad", "#2980b9", "#16a085",
    "#c0392b", "#d35400",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub name: String,
    #[serde(rename = "nameEn")]
    pub name_en: String,
    pub keywords: Vec<String>,
    pub upright: String,
    pub reversed: String,
}

impl Card {
    pub fn color(&self) -> &'static str {
        PALETTE[self.id as usize % PALETTE.len()]
    }

    pub fn title(&self) -> String {
        format!("{} ({})", self.name, self.name_en)
    }
}

pub fn load_cards() -> Result<Vec<Card>, serde_json::Error> {
    serde_json::from_str(CARDS_JSON)
}

#[cfg(test)]
pub(crate) fn sample_card(id: u32) -> Card {
    Card {
        id,
        name: format!("牌{}", id),
        name_en: format!("Card {}", id),
        keywords: vec!["test".into()],
        upright: "upright".into(),
        reversed: "reversed".into(),
    }
}

#[cfg(test)]
pub(crate) fn sample_cards(n: u32) -> Vec<Card> {
    (0..n).map(sample_card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_parses_all_major_arcana() {
        let cards = load_cards().unwrap();
        assert_eq!(cards.len(), 22);
        assert_eq!(cards[0].name_en, "The Fool");
        assert_eq!(cards[21].name_en, "The World");
        assert!(cards.iter().all(|c| !c.keywords.is_empty()));
    }

    #[test]
    fn colour_wraps_by_id() {
        assert_eq!(sample_card(0).color(), sample_card(10).color());
        assert_ne!(sample_card(0).color(), sample_card(1).color());
    }

    #[test]
    fn title_combines_both_names() {
        assert_eq!(sample_card(3).title(), "牌3 (Card 3)");
    }
}
