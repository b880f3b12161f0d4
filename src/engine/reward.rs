//! Reward calculator: difficulty-based XP/gold with streak scaling.
//!
//! Base XP is a fixed table per difficulty tier. The streak multiplier
//! applies to XP only and the highest qualifying tier wins; gold is always
//! 30% of the *base* XP, fixed onto the quest at creation and never
//! streak-scaled.

use crate::engine::types::{CharacterClass, QuestCategory, QuestDifficulty, StatGain};

/// XP/gold pair produced for one completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reward {
    pub xp: u64,
    pub gold: u64,
}

/// Fixed base XP table. Not configurable at runtime.
pub fn base_xp_for(difficulty: QuestDifficulty) -> u64 {
    match difficulty {
        QuestDifficulty::Trivial => 25,
        QuestDifficulty::Easy => 75,
        QuestDifficulty::Medium => 150,
        QuestDifficulty::Hard => 300,
        QuestDifficulty::Legendary => 750,
    }
}

/// Gold at quest-generation time: 30% of base XP, floored.
pub fn gold_for(difficulty: QuestDifficulty) -> u64 {
    base_xp_for(difficulty) * 3 / 10
}

/// Streak multiplier applied to a base XP amount, floored to an integer.
/// Tiers are mutually exclusive; the highest applicable wins.
fn apply_streak_multiplier(base_xp: u64, streak_len: u32) -> u64 {
    if streak_len >= 30 {
        base_xp * 2
    } else if streak_len >= 7 {
        base_xp * 3 / 2
    } else if streak_len >= 3 {
        base_xp * 5 / 4
    } else {
        base_xp
    }
}

/// Compute the reward for completing a quest of `difficulty` while on a
/// `streak_len`-day streak. XP carries the streak multiplier; gold does not.
pub fn reward_for(difficulty: QuestDifficulty, streak_len: u32) -> Reward {
    Reward {
        xp: apply_streak_multiplier(base_xp_for(difficulty), streak_len),
        gold: gold_for(difficulty),
    }
}

/// Stat increments earned by completing a quest in `category`.
///
/// Each category feeds one governing stat; a class completing its signature
/// category earns a doubled gain.
pub fn stat_gain(category: QuestCategory, class: CharacterClass) -> StatGain {
    let points = if class.signature_category() == category {
        2
    } else {
        1
    };
    let mut gain = StatGain::default();
    match category {
        QuestCategory::Health => gain.strength = points,
        QuestCategory::Learning | QuestCategory::Career => gain.intelligence = points,
        QuestCategory::Social => gain.charisma = points,
        QuestCategory::Creative => gain.creativity = points,
        QuestCategory::Personal | QuestCategory::Finance => gain.wisdom = points,
    }
    gain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_table_matches_tiers() {
        assert_eq!(base_xp_for(QuestDifficulty::Trivial), 25);
        assert_eq!(base_xp_for(QuestDifficulty::Easy), 75);
        assert_eq!(base_xp_for(QuestDifficulty::Medium), 150);
        assert_eq!(base_xp_for(QuestDifficulty::Hard), 300);
        assert_eq!(base_xp_for(QuestDifficulty::Legendary), 750);
    }

    #[test]
    fn trivial_no_streak() {
        let reward = reward_for(QuestDifficulty::Trivial, 0);
        assert_eq!(reward.xp, 25);
        assert_eq!(reward.gold, 7);
    }

    #[test]
    fn legendary_on_monthly_streak_doubles() {
        let reward = reward_for(QuestDifficulty::Legendary, 30);
        assert_eq!(reward.xp, 1500);
        assert_eq!(reward.gold, 225, "gold never takes the streak multiplier");
    }

    #[test]
    fn multiplier_tiers_are_exclusive_highest_wins() {
        // Below 3 days: no bonus.
        assert_eq!(reward_for(QuestDifficulty::Medium, 2).xp, 150);
        // 3..6 days: x1.25.
        assert_eq!(reward_for(QuestDifficulty::Medium, 3).xp, 187);
        assert_eq!(reward_for(QuestDifficulty::Medium, 6).xp, 187);
        // 7..29 days: x1.5.
        assert_eq!(reward_for(QuestDifficulty::Medium, 7).xp, 225);
        assert_eq!(reward_for(QuestDifficulty::Medium, 29).xp, 225);
        // 30+ days: x2.
        assert_eq!(reward_for(QuestDifficulty::Medium, 30).xp, 300);
        assert_eq!(reward_for(QuestDifficulty::Medium, 365).xp, 300);
    }

    #[test]
    fn fractional_bonus_floors() {
        // 25 * 1.25 = 31.25 -> 31
        assert_eq!(reward_for(QuestDifficulty::Trivial, 3).xp, 31);
        // 25 * 1.5 = 37.5 -> 37
        assert_eq!(reward_for(QuestDifficulty::Trivial, 7).xp, 37);
    }

    #[test]
    fn gold_is_thirty_percent_of_base() {
        assert_eq!(gold_for(QuestDifficulty::Trivial), 7);
        assert_eq!(gold_for(QuestDifficulty::Easy), 22);
        assert_eq!(gold_for(QuestDifficulty::Medium), 45);
        assert_eq!(gold_for(QuestDifficulty::Hard), 90);
        assert_eq!(gold_for(QuestDifficulty::Legendary), 225);
    }

    #[test]
    fn stat_gain_follows_category() {
        let gain = stat_gain(QuestCategory::Learning, CharacterClass::Warrior);
        assert_eq!(gain.intelligence, 1);
        assert_eq!(gain.strength, 0);

        let gain = stat_gain(QuestCategory::Finance, CharacterClass::Mage);
        assert_eq!(gain.wisdom, 1);
    }

    #[test]
    fn signature_category_doubles_gain() {
        let gain = stat_gain(QuestCategory::Health, CharacterClass::Warrior);
        assert_eq!(gain.strength, 2);

        let gain = stat_gain(QuestCategory::Learning, CharacterClass::Mage);
        assert_eq!(gain.intelligence, 2);

        let gain = stat_gain(QuestCategory::Social, CharacterClass::Rogue);
        assert_eq!(gain.charisma, 2);

        let gain = stat_gain(QuestCategory::Personal, CharacterClass::Scholar);
        assert_eq!(gain.wisdom, 2);

        let gain = stat_gain(QuestCategory::Creative, CharacterClass::Creator);
        assert_eq!(gain.creativity, 2);
    }
}
