//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for build subjects (characters and NPCs)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectId(pub Uuid);

impl SubjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque catalog identifier for a skill
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The six attributes, serialized by their three-letter codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AttributeKind {
    #[serde(rename = "STR")]
    Strength,
    #[serde(rename = "DEX")]
    Dexterity,
    #[serde(rename = "CON")]
    Constitution,
    #[serde(rename = "INT")]
    Intelligence,
    #[serde(rename = "WIS")]
    Wisdom,
    #[serde(rename = "CHA")]
    Charisma,
}

impl AttributeKind {
    pub fn all() -> [AttributeKind; 6] {
        [
            AttributeKind::Strength,
            AttributeKind::Dexterity,
            AttributeKind::Constitution,
            AttributeKind::Intelligence,
            AttributeKind::Wisdom,
            AttributeKind::Charisma,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            AttributeKind::Strength => "STR",
            AttributeKind::Dexterity => "DEX",
            AttributeKind::Constitution => "CON",
            AttributeKind::Intelligence => "INT",
            AttributeKind::Wisdom => "WIS",
            AttributeKind::Charisma => "CHA",
        }
    }

    /// Position in fixed-size attribute arrays
    pub fn index(&self) -> usize {
        match self {
            AttributeKind::Strength => 0,
            AttributeKind::Dexterity => 1,
            AttributeKind::Constitution => 2,
            AttributeKind::Intelligence => 3,
            AttributeKind::Wisdom => 4,
            AttributeKind::Charisma => 5,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all()
            .into_iter()
            .find(|a| a.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One (skill, lineage) pair in an allocation map.
///
/// Stored as the ordered path of skill ids from the tier-1 root down to the
/// skill itself. Tier 1 and ungated skills have a single-element path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Vec<SkillId>", into = "Vec<SkillId>")]
pub struct AllocationKey(Vec<SkillId>);

impl TryFrom<Vec<SkillId>> for AllocationKey {
    type Error = String;

    fn try_from(path: Vec<SkillId>) -> Result<Self, Self::Error> {
        Self::from_path(path).ok_or_else(|| "allocation key path is empty".to_string())
    }
}

impl From<AllocationKey> for Vec<SkillId> {
    fn from(key: AllocationKey) -> Self {
        key.0
    }
}

impl AllocationKey {
    /// Key for a tier-1 or ungated skill
    pub fn root(skill: impl Into<SkillId>) -> Self {
        Self(vec![skill.into()])
    }

    /// Build a key from an explicit path, root first
    pub fn from_path(path: Vec<SkillId>) -> Option<Self> {
        if path.is_empty() {
            None
        } else {
            Some(Self(path))
        }
    }

    /// Extend this lineage with a child skill
    pub fn child(&self, skill: impl Into<SkillId>) -> Self {
        let mut path = self.0.clone();
        path.push(skill.into());
        Self(path)
    }

    /// The skill this key allocates into
    pub fn skill(&self) -> &SkillId {
        // Non-empty by construction
        &self.0[self.0.len() - 1]
    }

    /// The tier-1 root of the lineage
    pub fn root_id(&self) -> &SkillId {
        &self.0[0]
    }

    /// Key of the parent allocation (path minus its final segment)
    pub fn parent(&self) -> Option<AllocationKey> {
        if self.0.len() > 1 {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        } else {
            None
        }
    }

    /// Ancestor ids, excluding the skill itself
    pub fn lineage(&self) -> &[SkillId] {
        &self.0[..self.0.len() - 1]
    }

    pub fn path(&self) -> &[SkillId] {
        &self.0
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for AllocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            f.write_str(id.as_str())?;
        }
        Ok(())
    }
}
