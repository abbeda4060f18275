//! Persistent progression fields of a build subject

use crate::skills::AllocationMap;
use serde::{Deserialize, Serialize};

/// Lock flag, XP ledger and the checkpoint floor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionState {
    /// Set once the starting skill budget is exactly spent; never cleared
    pub locked: bool,
    pub xp_spent: u32,
    /// XP spent when the checkpoint was taken
    pub xp_checkpoint: u32,
    /// Allocation floor while locked
    #[serde(default)]
    pub checkpoint: AllocationMap,
}

impl ProgressionState {
    pub fn new() -> Self {
        Self::default()
    }
}
