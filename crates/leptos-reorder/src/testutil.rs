//! Test fixtures shared across the engine's unit tests.

use crate::record::OrderedRecord;

/// Pool of stable ids for generated fixtures.
pub const NAMES: [&str; 12] = [
    "alpine", "coastal", "desert", "fjord", "glacier", "harbor", "island", "jungle", "lagoon",
    "meadow", "oasis", "reef",
];

/// Minimal reorderable record: an id, a domain field, a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub id: &'static str,
    pub label: String,
    pub position: i32,
}

pub fn card(index: usize, position: i32) -> Card {
    Card {
        id: NAMES[index],
        label: format!("{} tours", NAMES[index]),
        position,
    }
}

/// A dense ascending list of `len` cards, positions 0..len.
pub fn deck(len: usize) -> Vec<Card> {
    (0..len).map(|i| card(i, i as i32)).collect()
}

impl OrderedRecord for Card {
    type Id = &'static str;

    fn id(&self) -> &'static str {
        self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}
