//! The fixed achievement catalog.
//!
//! Nineteen entries, seeded into the store on first open and never mutated
//! afterwards. Unlock state lives separately as a list of
//! [`UnlockedAchievement`](crate::engine::types::UnlockedAchievement) records,
//! so reseeding the catalog never re-grants a bonus.

use crate::engine::types::{Achievement, Rarity};

/// Build the builtin catalog. Order here is display order.
pub fn builtin_achievements() -> Vec<Achievement> {
    use Rarity::*;

    let mut achievements = Vec::new();

    // Completion milestones
    achievements.push(
        Achievement::new("first_blood", "First Blood", "Complete your first quest", Common)
            .with_icon("🗡️")
            .with_condition("Complete 1 quest"),
    );

    achievements.push(
        Achievement::new("quest_hunter", "Quest Hunter", "Complete 10 quests", Rare)
            .with_icon("🏹")
            .with_condition("Complete 10 quests"),
    );

    achievements.push(
        Achievement::new("century_mark", "Century Mark", "Complete 100 quests", Epic)
            .with_icon("💯")
            .with_condition("Complete 100 quests"),
    );

    achievements.push(
        Achievement::new("legend_rises", "A Legend Rises", "Complete 500 quests", Legendary)
            .with_icon("👑")
            .with_condition("Complete 500 quests"),
    );

    // Streak milestones
    achievements.push(
        Achievement::new("consistent_soul", "Consistent Soul", "Keep a 3 day streak", Common)
            .with_icon("🕯️")
            .with_condition("Reach a 3 day streak"),
    );

    achievements.push(
        Achievement::new("week_warrior", "Week Warrior", "Keep a 7 day streak", Rare)
            .with_icon("🔥")
            .with_condition("Reach a 7 day streak"),
    );

    achievements.push(
        Achievement::new("unstoppable_force", "Unstoppable Force", "Keep a 30 day streak", Epic)
            .with_icon("⚡")
            .with_condition("Reach a 30 day streak"),
    );

    // Difficulty feats
    achievements.push(
        Achievement::new(
            "dragonslayer",
            "Dragonslayer",
            "Complete a legendary quest",
            Epic,
        )
        .with_icon("🐉")
        .with_condition("Complete 1 legendary difficulty quest"),
    );

    achievements.push(
        Achievement::new("hard_boiled", "Hard Boiled", "Complete 10 hard quests", Rare)
            .with_icon("🥚")
            .with_condition("Complete 10 hard difficulty quests"),
    );

    // Level milestones
    achievements.push(
        Achievement::new("awakening", "Awakening", "Reach level 5", Rare)
            .with_icon("🌅")
            .with_condition("Reach level 5"),
    );

    achievements.push(
        Achievement::new("ascendant", "Ascendant", "Reach level 20", Epic)
            .with_icon("🌠")
            .with_condition("Reach level 20"),
    );

    achievements.push(
        Achievement::new("transcendent", "Transcendent", "Reach level 50", Legendary)
            .with_icon("✨")
            .with_condition("Reach level 50"),
    );

    // Category mastery
    achievements.push(
        Achievement::new("iron_body", "Iron Body", "Complete 20 health quests", Rare)
            .with_icon("💪")
            .with_condition("Complete 20 health category quests"),
    );

    achievements.push(
        Achievement::new("scholars_path", "Scholar's Path", "Complete 20 learning quests", Rare)
            .with_icon("📚")
            .with_condition("Complete 20 learning category quests"),
    );

    // Future self correspondence
    achievements.push(
        Achievement::new(
            "soul_seeker",
            "Soul Seeker",
            "Exchange a message with your future self",
            Common,
        )
        .with_icon("🔮")
        .with_condition("Send 1 future self message"),
    );

    achievements.push(
        Achievement::new(
            "time_traveler",
            "Time Traveler",
            "Exchange 50 messages with your future self",
            Epic,
        )
        .with_icon("⏳")
        .with_condition("Send 50 future self messages"),
    );

    // Timing feats
    achievements.push(
        Achievement::new(
            "night_owl",
            "Night Owl",
            "Complete a quest between midnight and 4 AM",
            Common,
        )
        .with_icon("🦉")
        .with_condition("Complete a quest between 00:00 and 04:00"),
    );

    achievements.push(
        Achievement::new(
            "early_bird",
            "Early Bird",
            "Complete a quest between 4 AM and 7 AM",
            Common,
        )
        .with_icon("🐦")
        .with_condition("Complete a quest between 04:00 and 07:00"),
    );

    achievements.push(
        Achievement::new(
            "speed_runner",
            "Speed Runner",
            "Complete 5 quests in a single day",
            Rare,
        )
        .with_icon("🏃")
        .with_condition("Complete 5 quests in one day"),
    );

    achievements
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_nineteen_unique_entries() {
        let catalog = builtin_achievements();
        assert_eq!(catalog.len(), 19);

        let ids: HashSet<&str> = catalog.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 19);
    }

    #[test]
    fn bonuses_follow_rarity_tiers() {
        for achievement in builtin_achievements() {
            assert_eq!(achievement.xp_bonus, achievement.rarity.default_bonus());
            assert!(achievement.xp_bonus > 0);
        }
    }

    #[test]
    fn every_entry_names_its_condition() {
        for achievement in builtin_achievements() {
            assert!(!achievement.condition.is_empty(), "{}", achievement.id);
            assert!(!achievement.description.is_empty(), "{}", achievement.id);
        }
    }
}
