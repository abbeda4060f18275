//! One build operation at a time against a subject
//!
//! The session binds the catalog, campaign budgets and race a subject is
//! built under. Every mutating call validates against a working copy and
//! only writes back once the change and its derived stats are both good, so
//! a rejected call leaves the subject untouched.

use crate::attributes::{self, AttributeScores, Race, RaceProvider};
use crate::build::subject::BuildSubject;
use crate::core::config::{BudgetConfig, BudgetConfigResolver};
use crate::core::error::{BuildError, Result};
use crate::core::types::{AllocationKey, AttributeKind, SkillId};
use crate::progression::{self, xp_for_challenge_rating, ProgressionState};
use crate::skills::{allocate_unlocked, skill_sheet, AllocationMap, SheetRow, SkillCatalog, SkillGraph};
use crate::stats::DerivedStats;
use std::sync::Arc;

/// Rules a subject is built under
#[derive(Debug, Clone)]
pub struct BuildSession {
    catalog: Arc<SkillCatalog>,
    config: BudgetConfig,
    race: Option<Race>,
}

impl BuildSession {
    pub fn new(catalog: Arc<SkillCatalog>, config: BudgetConfig) -> Self {
        Self {
            catalog,
            config,
            race: None,
        }
    }

    pub fn with_race(mut self, race: Race) -> Self {
        self.race = Some(race);
        self
    }

    /// Session for an existing subject, resolving its campaign budgets and race
    ///
    /// An unknown race id falls back to race defaults.
    pub fn for_subject(
        subject: &BuildSubject,
        catalog: Arc<SkillCatalog>,
        budgets: &BudgetConfigResolver,
        races: &dyn RaceProvider,
    ) -> Result<Self> {
        let config = budgets.resolve(subject.campaign_id.as_deref())?;
        let race = subject.race_id.as_deref().and_then(|id| races.race(id));
        if race.is_none() {
            if let Some(id) = &subject.race_id {
                tracing::warn!(race = %id, "Unknown race, using defaults");
            }
        }
        Ok(Self {
            catalog,
            config,
            race,
        })
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    pub fn race(&self) -> Option<&Race> {
        self.race.as_ref()
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn graph(&self) -> SkillGraph<'_> {
        SkillGraph::new(&self.catalog, &self.config)
    }

    fn derive(&self, map: &AllocationMap, scores: &AttributeScores) -> Result<DerivedStats> {
        DerivedStats::compute(&self.graph(), map, scores, self.race.as_ref())
    }

    /// Recompute and store derived stats, e.g. after loading a snapshot
    pub fn recompute(&self, subject: &mut BuildSubject) -> Result<()> {
        subject.derived = self.derive(&subject.allocations, &subject.attributes)?;
        Ok(())
    }

    // === ATTRIBUTES ===

    /// Set an attribute, clamping to the remaining budget; returns the applied value
    pub fn set_attribute(&self, subject: &mut BuildSubject, attr: AttributeKind, value: i32) -> Result<u32> {
        let mut scores = subject.attributes;
        let applied = attributes::set_attribute(
            &mut scores,
            attr,
            value,
            self.config.attribute_point_budget,
            self.race.as_ref(),
        )?;
        self.commit_attributes(subject, scores)?;
        Ok(applied)
    }

    /// Set an attribute, rejecting values over budget
    pub fn set_attribute_strict(&self, subject: &mut BuildSubject, attr: AttributeKind, value: u32) -> Result<u32> {
        let mut scores = subject.attributes;
        let applied = attributes::set_attribute_strict(
            &mut scores,
            attr,
            value,
            self.config.attribute_point_budget,
            self.race.as_ref(),
        )?;
        self.commit_attributes(subject, scores)?;
        Ok(applied)
    }

    fn commit_attributes(&self, subject: &mut BuildSubject, scores: AttributeScores) -> Result<()> {
        let derived = self.derive(&subject.allocations, &scores)?;
        subject.attributes = scores;
        subject.derived = derived;
        Ok(())
    }

    pub fn remaining_attribute_points(&self, subject: &BuildSubject) -> u32 {
        attributes::remaining_attribute_points(&subject.attributes, self.config.attribute_point_budget)
    }

    // === SKILLS ===

    /// Move a (skill, lineage) allocation to `new_points`
    ///
    /// Unlocked subjects spend the starting budget; locked subjects go through
    /// the XP economy. Values at or below 0 remove the key.
    pub fn allocate(&self, subject: &mut BuildSubject, key: &AllocationKey, new_points: i32) -> Result<()> {
        let new_points = new_points.max(0) as u32;
        let graph = self.graph();
        graph.check_intent(key, new_points, &subject.allocations)?;

        let mut map = subject.allocations.clone();
        let mut progression = subject.progression.clone();
        if progression.locked {
            progression::allocate_locked(&mut map, &mut progression, key, new_points, subject.challenge_rating)?;
        } else {
            allocate_unlocked(&mut map, key, new_points, self.config.skill_point_budget)?;
        }

        let derived = self.derive(&map, &subject.attributes)?;
        subject.allocations = map;
        subject.progression = progression;
        subject.derived = derived;
        tracing::debug!(subject = %subject.id, %key, points = new_points, "Allocation accepted");
        Ok(())
    }

    /// Allocate into `skill` reached through `lineage` (ancestors, root first)
    pub fn allocate_skill(
        &self,
        subject: &mut BuildSubject,
        skill: &SkillId,
        new_points: i32,
        lineage: &[SkillId],
    ) -> Result<()> {
        let mut path = lineage.to_vec();
        path.push(skill.clone());
        let key = AllocationKey::from_path(path).ok_or_else(|| BuildError::UnknownSkill(skill.clone()))?;
        self.allocate(subject, &key, new_points)
    }

    pub fn remaining_skill_points(&self, subject: &BuildSubject) -> u32 {
        self.config.skill_point_budget.saturating_sub(subject.allocations.total())
    }

    pub fn is_unlocked(&self, subject: &BuildSubject, skill: &SkillId) -> bool {
        self.graph().is_unlocked(skill, &subject.allocations)
    }

    pub fn rank(&self, subject: &BuildSubject, key: &AllocationKey) -> Result<i32> {
        self.graph().rank(key, &subject.allocations, &subject.attributes)
    }

    pub fn percent(&self, subject: &BuildSubject, key: &AllocationKey) -> Result<i32> {
        self.graph().percent(key, &subject.allocations, &subject.attributes)
    }

    /// Keys whose lineage is currently open
    pub fn purchasable(&self, subject: &BuildSubject) -> Vec<AllocationKey> {
        self.graph().purchasable(&subject.allocations)
    }

    pub fn sheet(&self, subject: &BuildSubject) -> Result<Vec<SheetRow>> {
        skill_sheet(&self.graph(), &subject.allocations, &subject.attributes)
    }

    // === PROGRESSION ===

    /// Switch to XP mode once the skill budget is exactly spent
    pub fn lock(&self, subject: &mut BuildSubject) -> Result<()> {
        progression::lock(&subject.allocations, &mut subject.progression, self.config.skill_point_budget)?;
        tracing::info!(subject = %subject.id, "Build locked into XP progression");
        Ok(())
    }

    pub fn checkpoint(&self, subject: &mut BuildSubject) -> Result<()> {
        progression::checkpoint(&subject.allocations, &mut subject.progression)
    }

    /// Return to the last checkpoint, refunding everything bought since
    pub fn rollback(&self, subject: &mut BuildSubject) -> Result<()> {
        let mut map = subject.allocations.clone();
        let mut state: ProgressionState = subject.progression.clone();
        progression::rollback(&mut map, &mut state)?;
        let derived = self.derive(&map, &subject.attributes)?;
        subject.allocations = map;
        subject.progression = state;
        subject.derived = derived;
        Ok(())
    }

    pub fn set_challenge_rating(&self, subject: &mut BuildSubject, cr: u32) -> Result<()> {
        if xp_for_challenge_rating(cr).is_none() {
            return Err(BuildError::ChallengeRatingOutOfRange(cr));
        }
        subject.challenge_rating = cr;
        tracing::debug!(subject = %subject.id, cr, "Challenge rating set");
        Ok(())
    }

    pub fn available_xp(&self, subject: &BuildSubject) -> u32 {
        progression::available_xp(&subject.progression, subject.challenge_rating)
    }

    pub fn remaining_xp(&self, subject: &BuildSubject) -> i64 {
        progression::remaining_xp(&subject.progression, subject.challenge_rating)
    }

    /// XP the next point at `key` would cost
    pub fn next_cost(&self, subject: &BuildSubject, key: &AllocationKey) -> u32 {
        progression::next_cost(&subject.allocations, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::subject::SubjectKind;
    use crate::skills::{Skill, SkillTier, SkillType};

    fn session() -> BuildSession {
        let catalog = SkillCatalog::new(vec![
            Skill::new("arcane", "Arcane Casting", SkillTier::One)
                .with_kind(SkillType::MagicAccess)
                .with_attribute(AttributeKind::Intelligence),
            Skill::new("focus", "Mana Focus", SkillTier::One)
                .with_kind(SkillType::MagicStabilization)
                .with_attribute(AttributeKind::Wisdom),
            Skill::new("fire", "Fire Sphere", SkillTier::Two)
                .with_kind(SkillType::Sphere)
                .with_attribute(AttributeKind::Intelligence)
                .with_parent("arcane"),
        ])
        .unwrap();
        BuildSession::new(Arc::new(catalog), BudgetConfig::default()).with_race(Race::new("elf").with_magic(2))
    }

    #[test]
    fn test_rejected_allocation_leaves_subject_untouched() {
        let session = session();
        let mut subject = BuildSubject::new(SubjectKind::PlayerCharacter, "Ilse");
        let before = subject.clone();

        let err = session
            .allocate(&mut subject, &AllocationKey::root("arcane").child("fire"), 3)
            .unwrap_err();
        assert!(matches!(err, BuildError::PrerequisiteNotMet(_)));
        assert_eq!(subject, before);
    }

    #[test]
    fn test_derived_stats_follow_mutations() {
        let session = session();
        let mut subject = BuildSubject::new(SubjectKind::Npc, "Seer");
        session.allocate(&mut subject, &AllocationKey::root("focus"), 5).unwrap();
        assert_eq!(subject.derived.mana, 10);

        session.set_attribute(&mut subject, AttributeKind::Strength, 0).unwrap();
        session.set_attribute(&mut subject, AttributeKind::Constitution, 30).unwrap();
        assert_eq!(subject.derived.hp, 61);
        assert_eq!(subject.derived.location_hp.total(), 61);
    }

    #[test]
    fn test_allocate_skill_builds_key_from_lineage() {
        let session = session();
        let mut subject = BuildSubject::new(SubjectKind::PlayerCharacter, "Ilse");
        let arcane = SkillId::from("arcane");
        session.allocate_skill(&mut subject, &arcane, 1, &[]).unwrap();
        session
            .allocate_skill(&mut subject, &SkillId::from("fire"), 2, &[arcane])
            .unwrap();
        assert_eq!(subject.allocations.get(&AllocationKey::root("arcane").child("fire")), 2);
        assert_eq!(session.remaining_skill_points(&subject), 47);
    }

    #[test]
    fn test_challenge_rating_bounds() {
        let session = session();
        let mut subject = BuildSubject::new(SubjectKind::Npc, "Ogre");
        assert!(session.set_challenge_rating(&mut subject, 0).is_err());
        assert!(session.set_challenge_rating(&mut subject, 51).is_err());
        session.set_challenge_rating(&mut subject, 50).unwrap();
        assert_eq!(subject.challenge_rating, 50);
        // Unlocked subjects have no XP regardless of CR
        assert_eq!(session.available_xp(&subject), 0);
    }
}
