//! Challenge rating to available XP

/// Lowest challenge rating
pub const MIN_CHALLENGE_RATING: u32 = 1;

/// Highest challenge rating
pub const MAX_CHALLENGE_RATING: u32 = 50;

/// XP available at each challenge rating, index 0 = CR 1
const XP_BY_CHALLENGE_RATING: [u32; 50] = [
    0, 25, 50, 75, 125, 200, 325, 525, 850, 1020, // 1-10
    1224, 1469, 1763, 2116, 2540, 3048, 3658, 4390, 5268, 6322, // 11-20
    7587, 9105, 10926, 13112, 15735, 18882, 22659, 27191, 32630, 39156, // 21-30
    45812, 53501, 62696, 73355, 85826, 100423, 117517, 137495, 160869, 188217, // 31-40
    220214, 257650, 301450, 352696, 412654, 482805, 564882, 660912, 773267, 904722, // 41-50
];

/// XP granted by a challenge rating, None outside 1..=50
pub fn xp_for_challenge_rating(cr: u32) -> Option<u32> {
    if (MIN_CHALLENGE_RATING..=MAX_CHALLENGE_RATING).contains(&cr) {
        Some(XP_BY_CHALLENGE_RATING[(cr - 1) as usize])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_endpoints() {
        assert_eq!(xp_for_challenge_rating(1), Some(0));
        assert_eq!(xp_for_challenge_rating(10), Some(1020));
        assert_eq!(xp_for_challenge_rating(25), Some(15735));
        assert_eq!(xp_for_challenge_rating(50), Some(904722));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(xp_for_challenge_rating(0), None);
        assert_eq!(xp_for_challenge_rating(51), None);
    }

    #[test]
    fn test_table_strictly_increasing() {
        for pair in XP_BY_CHALLENGE_RATING.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
