//! Derived combat statistics
//!
//! Pure functions of attributes, race and the allocation graph. The build
//! session stores the results on the subject after every accepted change.

use crate::attributes::{modifier, AttributeScores, Race, DEFAULT_BASE_MOVEMENT};
use crate::core::error::Result;
use crate::core::types::AttributeKind;
use crate::skills::{AllocationMap, SkillGraph, SkillType};
use crate::stats::location::LocationHp;
use serde::{Deserialize, Serialize};

/// Hit points from constitution
pub fn hp(constitution: u32) -> i32 {
    constitution as i32 * 2 + modifier(constitution)
}

/// Initiative before the movement multiplier
pub fn base_initiative(dexterity: u32) -> i32 {
    if dexterity < 5 {
        1
    } else {
        1 + (dexterity / 5) as i32
    }
}

pub fn initiative(dexterity: u32, base_movement: u32) -> i32 {
    base_initiative(dexterity) * base_movement as i32
}

/// Highest magic-stabilization rank times the race's base magic
///
/// Untrained stabilization skills do not count; with none trained, mana is 0.
pub fn mana(graph: &SkillGraph<'_>, map: &AllocationMap, scores: &AttributeScores, base_magic: u32) -> Result<i32> {
    let catalog = graph.catalog();
    let mut best: Option<i32> = None;
    for (key, points) in map.iter() {
        if points == 0 {
            continue;
        }
        let Some(skill) = catalog.get(key.skill()) else {
            continue;
        };
        if skill.kind != SkillType::MagicStabilization {
            continue;
        }
        let rank = graph.rank(key, map, scores)?;
        best = Some(best.map_or(rank, |b| b.max(rank)));
    }
    Ok(best.unwrap_or(0) * base_magic as i32)
}

/// Stats written back onto a build subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub hp: i32,
    pub initiative: i32,
    pub mana: i32,
    pub location_hp: LocationHp,
}

impl DerivedStats {
    /// Stats that need no skills: hp, initiative and location HP, mana 0
    pub fn from_scores(scores: &AttributeScores, race: Option<&Race>) -> Self {
        let hp = hp(scores.get(AttributeKind::Constitution));
        let movement = race.map_or(DEFAULT_BASE_MOVEMENT, |r| r.base_movement);
        Self {
            hp,
            initiative: initiative(scores.get(AttributeKind::Dexterity), movement),
            mana: 0,
            location_hp: LocationHp::split(hp),
        }
    }

    pub fn compute(
        graph: &SkillGraph<'_>,
        map: &AllocationMap,
        scores: &AttributeScores,
        race: Option<&Race>,
    ) -> Result<Self> {
        let base_magic = race.map_or(0, |r| r.base_magic);
        Ok(Self {
            mana: mana(graph, map, scores, base_magic)?,
            ..Self::from_scores(scores, race)
        })
    }
}
