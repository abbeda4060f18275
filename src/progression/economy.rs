//! XP economy after the starting budget locks
//!
//! Buying walks up one point at a time; selling retraces the same cost steps
//! back down, so a buy/sell round trip is XP-neutral. The checkpoint is a hard
//! floor that no refund can cross.

use crate::core::error::{BuildError, Result};
use crate::core::types::AllocationKey;
use crate::progression::state::ProgressionState;
use crate::progression::xp_table::xp_for_challenge_rating;
use crate::skills::AllocationMap;

/// Cost of the first point in a skill that has none
pub const NEW_SKILL_COST: u32 = 10;

/// XP to raise a key from `current` to `current + 1`
pub fn purchase_cost(current: u32) -> u32 {
    if current == 0 {
        NEW_SKILL_COST
    } else {
        current
    }
}

/// XP returned when lowering a key from `from` to `to`
pub fn refund_value(from: u32, to: u32) -> u32 {
    (to..from).map(purchase_cost).sum()
}

/// XP the subject's challenge rating grants; 0 until locked
pub fn available_xp(state: &ProgressionState, challenge_rating: u32) -> u32 {
    if state.locked {
        xp_for_challenge_rating(challenge_rating).unwrap_or(0)
    } else {
        0
    }
}

/// Available minus spent; negative if the challenge rating was lowered after spending
pub fn remaining_xp(state: &ProgressionState, challenge_rating: u32) -> i64 {
    available_xp(state, challenge_rating) as i64 - state.xp_spent as i64
}

/// Enter XP mode
///
/// Requires the skill budget to be spent exactly. Takes the first checkpoint
/// and zeroes the XP ledger.
pub fn lock(map: &AllocationMap, state: &mut ProgressionState, skill_budget: u32) -> Result<()> {
    let spent = map.total();
    if state.locked || spent != skill_budget {
        return Err(BuildError::InvalidLockTransition {
            spent,
            budget: skill_budget,
        });
    }

    state.locked = true;
    state.checkpoint = map.clone();
    state.xp_spent = 0;
    state.xp_checkpoint = 0;
    tracing::debug!(spent, "Build locked");
    Ok(())
}

/// Raise every key's floor to its current value
pub fn checkpoint(map: &AllocationMap, state: &mut ProgressionState) -> Result<()> {
    if !state.locked {
        return Err(BuildError::NotLocked);
    }
    state.checkpoint = map.clone();
    state.xp_checkpoint = state.xp_spent;
    tracing::debug!(xp_spent = state.xp_spent, "Checkpoint taken");
    Ok(())
}

/// Undo everything since the last checkpoint
///
/// Equivalent to refunding every key down to its floor.
pub fn rollback(map: &mut AllocationMap, state: &mut ProgressionState) -> Result<()> {
    if !state.locked {
        return Err(BuildError::NotLocked);
    }
    *map = state.checkpoint.clone();
    state.xp_spent = state.xp_checkpoint;
    tracing::debug!(xp_spent = state.xp_spent, "Rolled back to checkpoint");
    Ok(())
}

/// Move one key while locked
///
/// Increases must be a single step and are paid from remaining XP.
/// Decreases may span several steps, down to the checkpoint floor.
pub fn allocate_locked(
    map: &mut AllocationMap,
    state: &mut ProgressionState,
    key: &AllocationKey,
    new_points: u32,
    challenge_rating: u32,
) -> Result<()> {
    if !state.locked {
        return Err(BuildError::NotLocked);
    }

    let current = map.get(key);
    if new_points > current {
        if new_points != current + 1 {
            return Err(BuildError::InvalidXpStep {
                key: key.clone(),
                current,
                attempted: new_points,
            });
        }
        let cost = purchase_cost(current);
        let remaining = remaining_xp(state, challenge_rating);
        if remaining < cost as i64 {
            tracing::trace!(%key, cost, remaining, "XP purchase rejected");
            return Err(BuildError::InsufficientXp {
                key: key.clone(),
                cost,
                remaining,
            });
        }
        state.xp_spent += cost;
        map.set(key.clone(), new_points);
        tracing::debug!(%key, points = new_points, cost, "XP purchase");
    } else if new_points < current {
        let floor = state.checkpoint.get(key);
        if new_points < floor {
            return Err(BuildError::LockViolation {
                key: key.clone(),
                attempted: new_points,
                limit: floor,
            });
        }
        let refund = refund_value(current, new_points);
        state.xp_spent = state.xp_spent.saturating_sub(refund);
        map.set(key.clone(), new_points);
        tracing::debug!(%key, points = new_points, refund, "XP refund");
    }
    Ok(())
}

/// XP the next point at `key` would cost
pub fn next_cost(map: &AllocationMap, key: &AllocationKey) -> u32 {
    purchase_cost(map.get(key))
}
