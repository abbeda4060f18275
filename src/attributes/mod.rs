//! Attribute scores, race limits, and the attribute point budget

pub mod allocator;
pub mod race;
pub mod scores;

pub use allocator::{max_affordable, remaining_attribute_points, set_attribute, set_attribute_strict};
pub use race::{Race, RaceProvider, RaceTable, DEFAULT_BASE_MOVEMENT};
pub use scores::{modifier, AttributeScores, DEFAULT_ATTRIBUTE_SCORE};
