//! Per-subject skill point storage

use crate::core::types::AllocationKey;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Serialized form of one allocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEntry {
    pub key: AllocationKey,
    pub points: u32,
}

/// Points spent per (skill, lineage); absent keys hold 0
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AllocationEntry>", into = "Vec<AllocationEntry>")]
pub struct AllocationMap {
    points: AHashMap<AllocationKey, u32>,
}

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &AllocationKey) -> u32 {
        self.points.get(key).copied().unwrap_or(0)
    }

    /// Write a value; 0 removes the key
    pub fn set(&mut self, key: AllocationKey, points: u32) {
        if points == 0 {
            self.points.remove(&key);
        } else {
            self.points.insert(key, points);
        }
    }

    pub fn remove(&mut self, key: &AllocationKey) {
        self.points.remove(key);
    }

    /// Sum of all allocated points
    pub fn total(&self) -> u32 {
        self.points.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AllocationKey, u32)> {
        self.points.iter().map(|(k, v)| (k, *v))
    }

    /// Entries ordered by key, for stable output
    pub fn sorted(&self) -> Vec<(&AllocationKey, u32)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl From<Vec<AllocationEntry>> for AllocationMap {
    fn from(entries: Vec<AllocationEntry>) -> Self {
        let mut map = Self::new();
        for entry in entries {
            map.set(entry.key, entry.points);
        }
        map
    }
}

impl From<AllocationMap> for Vec<AllocationEntry> {
    fn from(map: AllocationMap) -> Self {
        map.sorted()
            .into_iter()
            .map(|(key, points)| AllocationEntry {
                key: key.clone(),
                points,
            })
            .collect()
    }
}
