//! Race-supplied base values and attribute ceilings

use crate::core::error::Result;
use crate::core::types::AttributeKind;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Movement used when no race is set
pub const DEFAULT_BASE_MOVEMENT: u32 = 5;

/// What a race contributes to a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: String,
    #[serde(default)]
    pub base_magic: u32,
    #[serde(default = "default_movement")]
    pub base_movement: u32,
    /// Per-attribute ceilings; attributes not listed are uncapped
    #[serde(default)]
    pub max_attributes: AHashMap<AttributeKind, u32>,
}

fn default_movement() -> u32 {
    DEFAULT_BASE_MOVEMENT
}

impl Race {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_magic: 0,
            base_movement: DEFAULT_BASE_MOVEMENT,
            max_attributes: AHashMap::new(),
        }
    }

    pub fn with_magic(mut self, base_magic: u32) -> Self {
        self.base_magic = base_magic;
        self
    }

    pub fn with_movement(mut self, base_movement: u32) -> Self {
        self.base_movement = base_movement;
        self
    }

    pub fn with_cap(mut self, attr: AttributeKind, max: u32) -> Self {
        self.max_attributes.insert(attr, max);
        self
    }

    pub fn max_attribute(&self, attr: AttributeKind) -> Option<u32> {
        self.max_attributes.get(&attr).copied()
    }
}

/// Lookup of races by id
pub trait RaceProvider {
    fn race(&self, id: &str) -> Option<Race>;
}

/// Races loaded from a `[[races]]` TOML table
#[derive(Debug, Clone, Default)]
pub struct RaceTable {
    races: AHashMap<String, Race>,
}

#[derive(Deserialize)]
struct RaceFile {
    #[serde(default)]
    races: Vec<Race>,
}

impl RaceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, race: Race) {
        self.races.insert(race.id.clone(), race);
    }

    pub fn len(&self) -> usize {
        self.races.len()
    }

    pub fn is_empty(&self) -> bool {
        self.races.is_empty()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: RaceFile = toml::from_str(content)?;
        let mut table = Self::new();
        for race in file.races {
            table.insert(race);
        }
        Ok(table)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl RaceProvider for RaceTable {
    fn race(&self, id: &str) -> Option<Race> {
        self.races.get(id).cloned()
    }
}
