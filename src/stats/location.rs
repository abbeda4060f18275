//! Hit points split across body locations

use serde::{Deserialize, Serialize};

/// Body locations that track their own hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLocation {
    Head,
    /// Takes the rounding remainder
    Chest,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyLocation {
    pub fn all() -> [BodyLocation; 6] {
        [
            BodyLocation::Head,
            BodyLocation::Chest,
            BodyLocation::LeftArm,
            BodyLocation::RightArm,
            BodyLocation::LeftLeg,
            BodyLocation::RightLeg,
        ]
    }

    /// Share of total hit points, in percent (sums to 100)
    pub fn share_percent(&self) -> i32 {
        match self {
            BodyLocation::Head => 10,
            BodyLocation::Chest => 30,
            BodyLocation::LeftArm
            | BodyLocation::RightArm
            | BodyLocation::LeftLeg
            | BodyLocation::RightLeg => 15,
        }
    }
}

/// Per-location hit points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationHp {
    pub head: i32,
    pub chest: i32,
    pub left_arm: i32,
    pub right_arm: i32,
    pub left_leg: i32,
    pub right_leg: i32,
}

impl LocationHp {
    /// Split `total`, flooring each share and putting the remainder on the chest
    pub fn split(total: i32) -> Self {
        let share = |loc: BodyLocation| (total * loc.share_percent()).div_euclid(100);
        let head = share(BodyLocation::Head);
        let limb = share(BodyLocation::LeftArm);
        Self {
            head,
            chest: total - head - 4 * limb,
            left_arm: limb,
            right_arm: limb,
            left_leg: limb,
            right_leg: limb,
        }
    }

    pub fn get(&self, loc: BodyLocation) -> i32 {
        match loc {
            BodyLocation::Head => self.head,
            BodyLocation::Chest => self.chest,
            BodyLocation::LeftArm => self.left_arm,
            BodyLocation::RightArm => self.right_arm,
            BodyLocation::LeftLeg => self.left_leg,
            BodyLocation::RightLeg => self.right_leg,
        }
    }

    pub fn total(&self) -> i32 {
        BodyLocation::all().iter().map(|l| self.get(*l)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shares_sum_to_hundred() {
        let sum: i32 = BodyLocation::all().iter().map(|l| l.share_percent()).sum();
        assert_eq!(sum, 100);
    }

    #[test]
    fn test_even_split() {
        let hp = LocationHp::split(100);
        assert_eq!(hp.head, 10);
        assert_eq!(hp.chest, 30);
        assert_eq!(hp.left_arm, 15);
        assert_eq!(hp.right_leg, 15);
        assert_eq!(hp.total(), 100);
    }

    #[test]
    fn test_remainder_lands_on_chest() {
        let hp = LocationHp::split(101);
        assert_eq!(hp.head, 10);
        assert_eq!(hp.left_arm, 15);
        assert_eq!(hp.right_arm, 15);
        assert_eq!(hp.left_leg, 15);
        assert_eq!(hp.right_leg, 15);
        assert_eq!(hp.chest, 31);
        assert_eq!(hp.total(), 101);
    }

    #[test]
    fn test_split_always_sums() {
        for total in -20..400 {
            assert_eq!(LocationHp::split(total).total(), total);
        }
    }
}
