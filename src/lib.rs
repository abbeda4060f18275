//! Skillforge - point-buy character building and XP progression
//!
//! Characters and NPCs spend an attribute pool and a skill pool against
//! campaign budgets, then lock into an XP economy once the starting skill
//! points are exactly spent.

pub mod attributes;
pub mod build;
pub mod core;
pub mod progression;
pub mod skills;
pub mod stats;
