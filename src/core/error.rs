use thiserror::Error;

use crate::core::types::{AllocationKey, AttributeKind, SkillId};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("{pool} budget exceeded: attempted total {attempted}, limit {limit}")]
    BudgetExceeded {
        pool: BudgetPool,
        attempted: u32,
        limit: u32,
    },

    #[error("{attribute} value {attempted} exceeds race maximum {limit}")]
    RaceCapExceeded {
        attribute: AttributeKind,
        attempted: u32,
        limit: u32,
    },

    #[error("allocation {key} cannot move to {attempted} (limit {limit})")]
    LockViolation {
        key: AllocationKey,
        attempted: u32,
        limit: u32,
    },

    #[error("allocation {key} costs {cost} XP but only {remaining} remain")]
    InsufficientXp {
        key: AllocationKey,
        cost: u32,
        remaining: i64,
    },

    #[error("cannot lock with {spent} skill points spent (budget {budget})")]
    InvalidLockTransition { spent: u32, budget: u32 },

    #[error("subject is not locked")]
    NotLocked,

    #[error("XP purchases move one point at a time: {key} is at {current}, attempted {attempted}")]
    InvalidXpStep {
        key: AllocationKey,
        current: u32,
        attempted: u32,
    },

    #[error("Skill not found: {0}")]
    UnknownSkill(SkillId),

    #[error("prerequisites not met for {0}")]
    PrerequisiteNotMet(AllocationKey),

    #[error("lineage {0} does not follow the skill graph")]
    InvalidLineage(AllocationKey),

    #[error("challenge rating {0} outside 1..=50")]
    ChallengeRatingOutOfRange(u32),

    #[error("Duplicate skill id in catalog: {0}")]
    DuplicateSkill(SkillId),

    #[error("Skill {skill} references unknown parent {parent}")]
    UnknownParent { skill: SkillId, parent: SkillId },

    #[error("Skill graph contains a cycle through {0}")]
    CyclicCatalog(SkillId),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Subject not found: {0}")]
    SubjectNotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Which point pool a budget error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetPool {
    Attribute,
    Skill,
}

impl std::fmt::Display for BudgetPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetPool::Attribute => write!(f, "attribute"),
            BudgetPool::Skill => write!(f, "skill"),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
