//! Locked-mode progression: XP ledger, checkpoints and the CR table

pub mod economy;
pub mod state;
pub mod xp_table;

pub use economy::{
    allocate_locked, available_xp, checkpoint, lock, next_cost, purchase_cost, refund_value,
    remaining_xp, rollback, NEW_SKILL_COST,
};
pub use state::ProgressionState;
pub use xp_table::{xp_for_challenge_rating, MAX_CHALLENGE_RATING, MIN_CHALLENGE_RATING};
