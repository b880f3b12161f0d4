//! Leveling curve: the deterministic mapping from cumulative XP to level.
//!
//! The curve is quadratic (`level * 100 + level^2 * 10`), so each level costs
//! strictly more than the last and derivation by repeated subtraction always
//! terminates.

/// Position on the curve for a given lifetime XP total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    /// XP accumulated inside the current level.
    pub xp_within_level: u64,
    /// Full cost of the current level (cached on the character).
    pub xp_to_next_level: u64,
}

/// XP needed to clear `level` and reach `level + 1`. Strictly increasing.
pub fn xp_required_for_level(level: u32) -> u64 {
    let level = u64::from(level);
    level * 100 + level * level * 10
}

/// Derive level and within-level progress from a cumulative XP total.
///
/// Starts at level 1 and subtracts each level's requirement while the
/// remainder still covers it; the remainder is therefore always strictly
/// below the returned level's requirement.
pub fn level_from_total_xp(total_xp: u64) -> LevelProgress {
    let mut level = 1u32;
    let mut remaining = total_xp;

    while remaining >= xp_required_for_level(level) {
        remaining -= xp_required_for_level(level);
        level += 1;
    }

    LevelProgress {
        level,
        xp_within_level: remaining,
        xp_to_next_level: xp_required_for_level(level),
    }
}

/// Whether moving from `old_xp` to `new_xp` crosses at least one level
/// boundary.
pub fn is_level_up(old_xp: u64, new_xp: u64) -> bool {
    level_from_total_xp(new_xp).level > level_from_total_xp(old_xp).level
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_is_strictly_increasing() {
        for level in 1..200 {
            assert!(
                xp_required_for_level(level + 1) > xp_required_for_level(level),
                "curve must grow at level {}",
                level
            );
        }
    }

    #[test]
    fn level_one_costs_110() {
        assert_eq!(xp_required_for_level(1), 110);
        assert_eq!(xp_required_for_level(2), 240);
        assert_eq!(xp_required_for_level(3), 390);
    }

    #[test]
    fn zero_xp_is_level_one() {
        let progress = level_from_total_xp(0);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.xp_within_level, 0);
        assert_eq!(progress.xp_to_next_level, 110);
    }

    #[test]
    fn xp_just_below_threshold_stays_level_one() {
        let progress = level_from_total_xp(109);
        assert_eq!(progress.level, 1);
        assert_eq!(progress.xp_within_level, 109);
    }

    #[test]
    fn xp_at_threshold_advances() {
        let progress = level_from_total_xp(110);
        assert_eq!(progress.level, 2);
        assert_eq!(progress.xp_within_level, 0);
        assert_eq!(progress.xp_to_next_level, 240);
    }

    #[test]
    fn remainder_never_reaches_requirement() {
        for total in (0..100_000).step_by(137) {
            let progress = level_from_total_xp(total);
            assert!(
                progress.xp_within_level < xp_required_for_level(progress.level),
                "remainder must stay below the next threshold at total={}",
                total
            );
        }
    }

    #[test]
    fn level_up_detection() {
        assert!(is_level_up(0, 110));
        assert!(!is_level_up(0, 109));
        assert!(!is_level_up(110, 200));
        assert!(is_level_up(100, 400));
    }
}
