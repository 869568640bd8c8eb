//! UI Components
//!
//! The reorderable category board and its cards.

mod category_board;
mod category_card;

pub use category_board::CategoryBoard;
pub use category_card::CategoryCard;
