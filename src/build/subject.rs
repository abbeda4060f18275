//! The build subject aggregate

use crate::attributes::AttributeScores;
use crate::core::types::SubjectId;
use crate::progression::{ProgressionState, MIN_CHALLENGE_RATING};
use crate::skills::AllocationMap;
use crate::stats::DerivedStats;
use serde::{Deserialize, Serialize};

/// Player characters and NPCs share one engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    #[default]
    PlayerCharacter,
    Npc,
}

/// A character or NPC under construction or in XP progression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSubject {
    pub id: SubjectId,
    pub kind: SubjectKind,
    pub name: String,
    pub campaign_id: Option<String>,
    pub race_id: Option<String>,
    pub attributes: AttributeScores,
    pub allocations: AllocationMap,
    pub progression: ProgressionState,
    pub challenge_rating: u32,
    /// Written by the build session; never edited directly
    pub derived: DerivedStats,
}

impl BuildSubject {
    /// Fresh subject: default attributes, no skills, unlocked
    ///
    /// Derived stats start from the default scores at the default movement;
    /// a race with other movement or magic takes effect on the first
    /// `BuildSession` mutation or `recompute`.
    pub fn new(kind: SubjectKind, name: impl Into<String>) -> Self {
        let attributes = AttributeScores::default();
        Self {
            id: SubjectId::new(),
            kind,
            name: name.into(),
            campaign_id: None,
            race_id: None,
            attributes,
            allocations: AllocationMap::new(),
            progression: ProgressionState::new(),
            challenge_rating: MIN_CHALLENGE_RATING,
            derived: DerivedStats::from_scores(&attributes, None),
        }
    }

    pub fn with_campaign(mut self, campaign_id: impl Into<String>) -> Self {
        self.campaign_id = Some(campaign_id.into());
        self
    }

    pub fn with_race(mut self, race_id: impl Into<String>) -> Self {
        self.race_id = Some(race_id.into());
        self
    }

    pub fn is_locked(&self) -> bool {
        self.progression.locked
    }

    /// Skill points spent across every lineage
    pub fn skill_points_spent(&self) -> u32 {
        self.allocations.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_subject_defaults() {
        let subject = BuildSubject::new(SubjectKind::Npc, "Guard Captain").with_race("dwarf");
        assert_eq!(subject.kind, SubjectKind::Npc);
        assert_eq!(subject.attributes.total(), 150);
        assert!(subject.allocations.is_empty());
        assert!(!subject.is_locked());
        assert_eq!(subject.challenge_rating, 1);
        assert_eq!(subject.race_id.as_deref(), Some("dwarf"));
    }

    #[test]
    fn test_new_subject_has_baseline_derived_stats() {
        let subject = BuildSubject::new(SubjectKind::PlayerCharacter, "Ada");
        assert_eq!(subject.derived.hp, 50);
        assert_eq!(subject.derived.initiative, 30);
        assert_eq!(subject.derived.mana, 0);
        assert_eq!(subject.derived.location_hp.total(), 50);
        assert_eq!(subject.derived.location_hp.head, 5);
    }
}
