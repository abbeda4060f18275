//! The six attribute scores and the modifier curve

use crate::core::types::AttributeKind;
use serde::{Deserialize, Serialize};

/// Score every attribute starts at
pub const DEFAULT_ATTRIBUTE_SCORE: u32 = 25;

/// Six attribute scores, indexed by `AttributeKind`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScores {
    #[serde(rename = "STR")]
    pub strength: u32,
    #[serde(rename = "DEX")]
    pub dexterity: u32,
    #[serde(rename = "CON")]
    pub constitution: u32,
    #[serde(rename = "INT")]
    pub intelligence: u32,
    #[serde(rename = "WIS")]
    pub wisdom: u32,
    #[serde(rename = "CHA")]
    pub charisma: u32,
}

impl Default for AttributeScores {
    fn default() -> Self {
        Self::uniform(DEFAULT_ATTRIBUTE_SCORE)
    }
}

impl AttributeScores {
    pub fn uniform(score: u32) -> Self {
        Self {
            strength: score,
            dexterity: score,
            constitution: score,
            intelligence: score,
            wisdom: score,
            charisma: score,
        }
    }

    pub fn get(&self, attr: AttributeKind) -> u32 {
        match attr {
            AttributeKind::Strength => self.strength,
            AttributeKind::Dexterity => self.dexterity,
            AttributeKind::Constitution => self.constitution,
            AttributeKind::Intelligence => self.intelligence,
            AttributeKind::Wisdom => self.wisdom,
            AttributeKind::Charisma => self.charisma,
        }
    }

    pub(crate) fn set(&mut self, attr: AttributeKind, value: u32) {
        let slot = match attr {
            AttributeKind::Strength => &mut self.strength,
            AttributeKind::Dexterity => &mut self.dexterity,
            AttributeKind::Constitution => &mut self.constitution,
            AttributeKind::Intelligence => &mut self.intelligence,
            AttributeKind::Wisdom => &mut self.wisdom,
            AttributeKind::Charisma => &mut self.charisma,
        };
        *slot = value;
    }

    /// Sum of all six scores
    pub fn total(&self) -> u32 {
        AttributeKind::all().iter().map(|a| self.get(*a)).sum()
    }

    /// Modifier for one attribute
    pub fn modifier(&self, attr: AttributeKind) -> i32 {
        modifier(self.get(attr))
    }
}

/// Attribute modifier
///
/// Flat penalty bands below 21, zero through 29, then +1 per 5 points from 30.
pub fn modifier(score: u32) -> i32 {
    match score {
        0..=1 => -5,
        2..=5 => -4,
        6..=10 => -3,
        11..=15 => -2,
        16..=20 => -1,
        21..=29 => 0,
        _ => ((score - 30) / 5) as i32 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bands() {
        assert_eq!(modifier(0), -5);
        assert_eq!(modifier(1), -5);
        assert_eq!(modifier(2), -4);
        assert_eq!(modifier(5), -4);
        assert_eq!(modifier(6), -3);
        assert_eq!(modifier(10), -3);
        assert_eq!(modifier(11), -2);
        assert_eq!(modifier(15), -2);
        assert_eq!(modifier(16), -1);
        assert_eq!(modifier(20), -1);
        assert_eq!(modifier(21), 0);
        assert_eq!(modifier(29), 0);
    }

    #[test]
    fn test_modifier_above_thirty() {
        assert_eq!(modifier(30), 1);
        assert_eq!(modifier(34), 1);
        assert_eq!(modifier(35), 2);
        assert_eq!(modifier(50), 5);
    }

    #[test]
    fn test_default_scores() {
        let scores = AttributeScores::default();
        assert_eq!(scores.total(), 150);
        assert_eq!(scores.modifier(AttributeKind::Wisdom), 0);
    }

    #[test]
    fn test_set_single_attribute() {
        let mut scores = AttributeScores::default();
        scores.set(AttributeKind::Constitution, 30);
        assert_eq!(scores.get(AttributeKind::Constitution), 30);
        assert_eq!(scores.total(), 155);
    }
}
