//! Attribute point spending against the campaign budget

use crate::attributes::race::Race;
use crate::attributes::scores::AttributeScores;
use crate::core::error::{BudgetPool, BuildError, Result};
use crate::core::types::AttributeKind;

/// Points not yet committed to any attribute
pub fn remaining_attribute_points(scores: &AttributeScores, budget: u32) -> u32 {
    budget.saturating_sub(scores.total())
}

/// Highest value `attr` can take without breaking the budget
pub fn max_affordable(scores: &AttributeScores, attr: AttributeKind, budget: u32) -> u32 {
    let others = scores.total() - scores.get(attr);
    budget.saturating_sub(others)
}

/// Set an attribute, clamping to what the budget allows
///
/// Negative values floor at 0. Returns the value actually written.
/// The race ceiling is checked after clamping and rejects rather than clamps.
pub fn set_attribute(
    scores: &mut AttributeScores,
    attr: AttributeKind,
    value: i32,
    budget: u32,
    race: Option<&Race>,
) -> Result<u32> {
    let requested = value.max(0) as u32;
    let applied = requested.min(max_affordable(scores, attr, budget));
    check_race_cap(attr, applied, race)?;

    scores.set(attr, applied);
    tracing::debug!(%attr, requested, applied, "Attribute set");
    Ok(applied)
}

/// Set an attribute, rejecting anything over budget instead of clamping
pub fn set_attribute_strict(
    scores: &mut AttributeScores,
    attr: AttributeKind,
    value: u32,
    budget: u32,
    race: Option<&Race>,
) -> Result<u32> {
    let limit = max_affordable(scores, attr, budget);
    if value > limit {
        tracing::trace!(%attr, value, limit, "Attribute rejected over budget");
        return Err(BuildError::BudgetExceeded {
            pool: BudgetPool::Attribute,
            attempted: (scores.total() - scores.get(attr)).saturating_add(value),
            limit: budget,
        });
    }
    check_race_cap(attr, value, race)?;

    scores.set(attr, value);
    tracing::debug!(%attr, value, "Attribute set");
    Ok(value)
}

fn check_race_cap(attr: AttributeKind, value: u32, race: Option<&Race>) -> Result<()> {
    if let Some(limit) = race.and_then(|r| r.max_attribute(attr)) {
        if value > limit {
            return Err(BuildError::RaceCapExceeded {
                attribute: attr,
                attempted: value,
                limit,
            });
        }
    }
    Ok(())
}
