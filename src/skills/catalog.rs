//! Skill definitions - the read-only catalog every build references

use crate::core::error::{BuildError, Result};
use crate::core::types::{AllocationKey, AttributeKind, SkillId};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Most parents a skill may declare
pub const MAX_PARENTS: usize = 3;

/// Gating tier of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillTier {
    One,
    Two,
    Three,
    /// Special abilities, never gated
    Ungated,
}

impl SkillTier {
    pub fn from_level(level: Option<u8>) -> Option<Self> {
        match level {
            None => Some(SkillTier::Ungated),
            Some(1) => Some(SkillTier::One),
            Some(2) => Some(SkillTier::Two),
            Some(3) => Some(SkillTier::Three),
            Some(_) => None,
        }
    }

    /// Length of an allocation key for a skill of this tier
    pub fn path_len(&self) -> usize {
        match self {
            SkillTier::One | SkillTier::Ungated => 1,
            SkillTier::Two => 2,
            SkillTier::Three => 3,
        }
    }

    /// Tier a parent must have, if this tier is gated
    pub fn parent_tier(&self) -> Option<SkillTier> {
        match self {
            SkillTier::Two => Some(SkillTier::One),
            SkillTier::Three => Some(SkillTier::Two),
            SkillTier::One | SkillTier::Ungated => None,
        }
    }
}

/// Type tag that changes unlock and derived-stat rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    #[default]
    Standard,
    /// Opens its children after a single point
    MagicAccess,
    Sphere,
    Discipline,
    Resonance,
    /// Drives mana
    MagicStabilization,
    SpecialAbility,
}

impl SkillType {
    /// Sphere, discipline and resonance open tier-3 children after one point
    pub fn is_magic_branch(&self) -> bool {
        matches!(self, SkillType::Sphere | SkillType::Discipline | SkillType::Resonance)
    }
}

/// Definition of a purchasable skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub tier: SkillTier,
    pub kind: SkillType,
    /// Attribute feeding rank and percent; None for attribute-independent skills
    pub attribute: Option<AttributeKind>,
    /// Any one of these may satisfy the unlock rule, checked in order
    pub parents: Vec<SkillId>,
}

impl Skill {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>, tier: SkillTier) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tier,
            kind: SkillType::Standard,
            attribute: None,
            parents: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: SkillType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_attribute(mut self, attr: AttributeKind) -> Self {
        self.attribute = Some(attr);
        self
    }

    pub fn with_parent(mut self, parent: impl Into<SkillId>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn has_parent(&self, id: &SkillId) -> bool {
        self.parents.iter().any(|p| p == id)
    }
}

/// Validated, immutable skill catalog
#[derive(Debug, Clone, Default)]
pub struct SkillCatalog {
    skills: Vec<Skill>,
    index: AHashMap<SkillId, usize>,
}

impl SkillCatalog {
    /// Build a catalog, rejecting duplicate ids, dangling parents,
    /// parent cycles and parents of the wrong tier
    pub fn new(skills: Vec<Skill>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(skills.len());
        for (i, skill) in skills.iter().enumerate() {
            if index.insert(skill.id.clone(), i).is_some() {
                return Err(BuildError::DuplicateSkill(skill.id.clone()));
            }
        }

        let catalog = Self { skills, index };
        catalog.check_parents()?;
        catalog.check_acyclic()?;
        catalog.check_tiers()?;
        Ok(catalog)
    }

    fn check_parents(&self) -> Result<()> {
        for skill in &self.skills {
            if skill.parents.len() > MAX_PARENTS {
                return Err(BuildError::InvalidCatalog(format!(
                    "{} declares {} parents (max {})",
                    skill.id,
                    skill.parents.len(),
                    MAX_PARENTS
                )));
            }
            for parent in &skill.parents {
                if !self.index.contains_key(parent) {
                    return Err(BuildError::UnknownParent {
                        skill: skill.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Depth-first walk over parent edges; a grey node reached again is a cycle
    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            White,
            Grey,
            Black,
        }

        fn visit(catalog: &SkillCatalog, i: usize, marks: &mut [Mark]) -> Result<()> {
            match marks[i] {
                Mark::Black => return Ok(()),
                Mark::Grey => return Err(BuildError::CyclicCatalog(catalog.skills[i].id.clone())),
                Mark::White => {}
            }
            marks[i] = Mark::Grey;
            for parent in &catalog.skills[i].parents {
                visit(catalog, catalog.index[parent], marks)?;
            }
            marks[i] = Mark::Black;
            Ok(())
        }

        let mut marks = vec![Mark::White; self.skills.len()];
        for i in 0..self.skills.len() {
            visit(self, i, &mut marks)?;
        }
        Ok(())
    }

    fn check_tiers(&self) -> Result<()> {
        for skill in &self.skills {
            match skill.tier.parent_tier() {
                None if !skill.parents.is_empty() => {
                    return Err(BuildError::InvalidCatalog(format!(
                        "{} is not gated but declares parents",
                        skill.id
                    )));
                }
                None => {}
                Some(expected) => {
                    if skill.parents.is_empty() {
                        return Err(BuildError::InvalidCatalog(format!(
                            "{} is gated but declares no parents",
                            skill.id
                        )));
                    }
                    for parent in &skill.parents {
                        let parent_tier = self.skills[self.index[parent]].tier;
                        if parent_tier != expected {
                            return Err(BuildError::InvalidCatalog(format!(
                                "{} ({:?}) has parent {} of tier {:?}",
                                skill.id, skill.tier, parent, parent_tier
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &SkillId) -> Option<&Skill> {
        self.index.get(id).map(|&i| &self.skills[i])
    }

    /// Look up a skill, failing with `UnknownSkill`
    pub fn require(&self, id: &SkillId) -> Result<&Skill> {
        self.get(id).ok_or_else(|| BuildError::UnknownSkill(id.clone()))
    }

    pub fn contains(&self, id: &SkillId) -> bool {
        self.index.contains_key(id)
    }

    /// Skills in declared order
    pub fn iter(&self) -> impl Iterator<Item = &Skill> {
        self.skills.iter()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills of a given type
    pub fn of_kind(&self, kind: SkillType) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.kind == kind)
    }

    /// Every allocation key through which `id` can be reached
    pub fn lineages(&self, id: &SkillId) -> Vec<AllocationKey> {
        let Some(skill) = self.get(id) else {
            return Vec::new();
        };
        if skill.parents.is_empty() {
            return vec![AllocationKey::root(id.clone())];
        }
        skill
            .parents
            .iter()
            .flat_map(|parent| self.lineages(parent))
            .map(|lineage| lineage.child(id.clone()))
            .collect()
    }

    /// Check that `key` is a real path through the graph and return its skill
    pub fn resolve_key(&self, key: &AllocationKey) -> Result<&Skill> {
        let skill = self.require(key.skill())?;
        if key.depth() != skill.tier.path_len() {
            return Err(BuildError::InvalidLineage(key.clone()));
        }
        for pair in key.path().windows(2) {
            let child = self.require(&pair[1])?;
            if !child.has_parent(&pair[0]) {
                return Err(BuildError::InvalidLineage(key.clone()));
            }
        }
        Ok(skill)
    }
}
