//! Frontend Models
//!
//! Data structures matching the content API.

use serde::{Deserialize, Serialize};

use leptos_reorder::OrderedRecord;

/// Tour category as served by the content API.
///
/// `position` is the display order key; everything else rides through
/// reorder cycles unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    pub active: bool,
    pub position: i32,
}

impl OrderedRecord for Category {
    type Id = u32;

    fn id(&self) -> u32 {
        self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn set_position(&mut self, position: i32) {
        self.position = position;
    }
}
