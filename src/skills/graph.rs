//! Unlock, rank and percent over the skill-prerequisite graph
//!
//! Tier-2 and tier-3 skills accrue points separately per lineage, so every
//! question here is asked of an `AllocationKey`, not a bare skill id.

use crate::attributes::{modifier, AttributeScores};
use crate::core::config::BudgetConfig;
use crate::core::error::{BudgetPool, BuildError, Result};
use crate::core::types::{AllocationKey, SkillId};
use crate::skills::allocation::AllocationMap;
use crate::skills::catalog::{Skill, SkillCatalog, SkillTier, SkillType};

/// Per-key cap while the starting budget is being spent
pub const SKILL_POINT_CAP: u32 = 10;

/// Percent reported for untrained skills
pub const UNTRAINED_PERCENT: i32 = 100;

/// Read-only view of the catalog under one campaign's thresholds
#[derive(Debug, Clone, Copy)]
pub struct SkillGraph<'a> {
    catalog: &'a SkillCatalog,
    points_needed_for_next_tier: u32,
}

impl<'a> SkillGraph<'a> {
    pub fn new(catalog: &'a SkillCatalog, config: &BudgetConfig) -> Self {
        Self {
            catalog,
            points_needed_for_next_tier: config.points_needed_for_next_tier,
        }
    }

    pub fn catalog(&self) -> &'a SkillCatalog {
        self.catalog
    }

    /// Whether this specific lineage is open for purchase
    ///
    /// Under a sphere, discipline or resonance parent the tier-1 check looks
    /// only at this lineage's own root, never at the parent's other roots.
    pub fn lineage_unlocked(&self, key: &AllocationKey, map: &AllocationMap) -> bool {
        let Some(skill) = self.catalog.get(key.skill()) else {
            return false;
        };
        let parent = key.parent().and_then(|k| self.catalog.get(k.skill()).map(|s| (k, s)));

        match (skill.tier, parent) {
            (SkillTier::One | SkillTier::Ungated, _) => true,
            (SkillTier::Two | SkillTier::Three, None) => false,
            (SkillTier::Two, Some((parent_key, parent))) => {
                let spent = map.get(&parent_key);
                match parent.kind {
                    SkillType::MagicAccess => spent >= 1,
                    _ => spent >= self.points_needed_for_next_tier,
                }
            }
            (SkillTier::Three, Some((parent_key, parent))) => {
                let spent = map.get(&parent_key);
                if parent.kind.is_magic_branch() {
                    let root = AllocationKey::root(parent_key.root_id().clone());
                    spent >= 1 && map.get(&root) >= 1
                } else {
                    spent >= self.points_needed_for_next_tier
                }
            }
        }
    }

    /// Whether any lineage of `id` is open for purchase
    pub fn is_unlocked(&self, id: &SkillId, map: &AllocationMap) -> bool {
        self.catalog
            .lineages(id)
            .iter()
            .any(|key| self.lineage_unlocked(key, map))
    }

    /// Skill rank at a key
    ///
    /// The attribute modifier is added once, at the tier-1 root; deeper tiers
    /// add their own points on top of the parent lineage's rank. Keys that
    /// do not follow the catalog's parent chain are `InvalidLineage`.
    pub fn rank(&self, key: &AllocationKey, map: &AllocationMap, scores: &AttributeScores) -> Result<i32> {
        let skill = self.catalog.resolve_key(key)?;
        let points = map.get(key) as i32;

        let Some(attr) = skill.attribute else {
            return Ok(points);
        };
        match key.parent() {
            None => Ok(points + modifier(scores.get(attr))),
            Some(parent_key) => Ok(self.rank(&parent_key, map, scores)? + points),
        }
    }

    /// Success percentage at a key (lower is better)
    pub fn percent(&self, key: &AllocationKey, map: &AllocationMap, scores: &AttributeScores) -> Result<i32> {
        let skill = self.catalog.resolve_key(key)?;
        let points = map.get(key) as i32;
        if points == 0 {
            return Ok(UNTRAINED_PERCENT);
        }
        match skill.attribute {
            None => Ok(UNTRAINED_PERCENT - points),
            Some(attr) => {
                let rank = self.rank(key, map, scores)?;
                Ok(UNTRAINED_PERCENT - (rank + scores.get(attr) as i32))
            }
        }
    }

    /// Validate an allocation intent before either phase applies it
    ///
    /// Increases need an unlocked lineage; decreases are always allowed so
    /// points bought under an earlier unlock can still be sold back.
    pub fn check_intent(
        &self,
        key: &AllocationKey,
        new_points: u32,
        map: &AllocationMap,
    ) -> Result<&'a Skill> {
        let skill = self.catalog.resolve_key(key)?;
        if new_points > map.get(key) && !self.lineage_unlocked(key, map) {
            tracing::trace!(%key, "Allocation rejected: prerequisites not met");
            return Err(BuildError::PrerequisiteNotMet(key.clone()));
        }
        Ok(skill)
    }

    /// Every key currently open for purchase, in catalog order
    pub fn purchasable(&self, map: &AllocationMap) -> Vec<AllocationKey> {
        self.catalog
            .iter()
            .flat_map(|skill| self.catalog.lineages(&skill.id))
            .filter(|key| self.lineage_unlocked(key, map))
            .collect()
    }
}

/// Apply a starting-budget allocation
///
/// 0 deletes the key. Each point costs one unit of the skill budget.
pub fn allocate_unlocked(
    map: &mut AllocationMap,
    key: &AllocationKey,
    new_points: u32,
    skill_budget: u32,
) -> Result<()> {
    if new_points == 0 {
        map.remove(key);
        return Ok(());
    }
    if new_points > SKILL_POINT_CAP {
        return Err(BuildError::LockViolation {
            key: key.clone(),
            attempted: new_points,
            limit: SKILL_POINT_CAP,
        });
    }

    let total_after = map.total() - map.get(key) + new_points;
    if total_after > skill_budget {
        return Err(BuildError::BudgetExceeded {
            pool: BudgetPool::Skill,
            attempted: total_after,
            limit: skill_budget,
        });
    }

    map.set(key.clone(), new_points);
    Ok(())
}
