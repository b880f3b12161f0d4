//! Character creation and class definitions.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::engine::leveling::xp_required_for_level;
use crate::engine::types::{AvatarConfig, Character, CharacterClass, CharacterStats, CHARACTER_SCHEMA_VERSION};

/// Starting attribute spread for each archetype. Classes trade raw points for
/// a clear signature stat rather than being strictly balanced.
pub fn initial_stats(class: CharacterClass) -> CharacterStats {
    match class {
        CharacterClass::Warrior => CharacterStats {
            strength: 12,
            intelligence: 8,
            agility: 10,
            creativity: 8,
            charisma: 9,
            wisdom: 8,
        },
        CharacterClass::Mage => CharacterStats {
            strength: 7,
            intelligence: 14,
            agility: 9,
            creativity: 10,
            charisma: 8,
            wisdom: 10,
        },
        CharacterClass::Rogue => CharacterStats {
            strength: 9,
            intelligence: 9,
            agility: 14,
            creativity: 9,
            charisma: 11,
            wisdom: 8,
        },
        CharacterClass::Scholar => CharacterStats {
            strength: 8,
            intelligence: 11,
            agility: 8,
            creativity: 9,
            charisma: 8,
            wisdom: 14,
        },
        CharacterClass::Creator => CharacterStats {
            strength: 8,
            intelligence: 9,
            agility: 10,
            creativity: 14,
            charisma: 10,
            wisdom: 9,
        },
    }
}

/// Flavor text shown when a class is chosen.
pub fn class_lore(class: CharacterClass) -> &'static str {
    match class {
        CharacterClass::Warrior => {
            "The path of the Warrior is one of iron will and steel discipline. \
             Your strength grows with every physical challenge overcome."
        }
        CharacterClass::Mage => {
            "The Mage seeks the hidden truths of the world. Your intellect \
             sharpens with every mystery decoded and every lesson learned."
        }
        CharacterClass::Rogue => {
            "The Rogue moves through the shadows of the city. Your agility and \
             charisma are your greatest weapons in the dance of life."
        }
        CharacterClass::Scholar => {
            "The Scholar knows that wisdom is the ultimate power. You build a \
             foundation of knowledge that will last for eternity."
        }
        CharacterClass::Creator => {
            "The Creator breathes life into the void. Your imagination knows no \
             bounds, and every project is a masterpiece in the making."
        }
    }
}

/// Build a fresh level 1 character. XP, gold, and unlock history all start
/// at zero; the class decides the opening stat spread.
pub fn new_character(
    name: &str,
    class: CharacterClass,
    avatar: AvatarConfig,
    bio: &str,
    created_at: DateTime<Utc>,
) -> Character {
    Character {
        id: Uuid::new_v4(),
        name: name.to_string(),
        class,
        level: 1,
        xp: 0,
        xp_to_next_level: xp_required_for_level(1),
        gold: 0,
        stats: initial_stats(class),
        avatar,
        bio: bio.to_string(),
        created_at,
        schema_version: CHARACTER_SCHEMA_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_character_starts_at_level_one() {
        let hero = new_character(
            "Aria",
            CharacterClass::Mage,
            AvatarConfig::default(),
            "",
            Utc::now(),
        );

        assert_eq!(hero.level, 1);
        assert_eq!(hero.xp, 0);
        assert_eq!(hero.gold, 0);
        assert_eq!(hero.xp_to_next_level, 110);
        assert_eq!(hero.stats.intelligence, 14);
    }

    #[test]
    fn each_class_peaks_in_its_signature_stat() {
        let warrior = initial_stats(CharacterClass::Warrior);
        assert!(warrior.strength > warrior.intelligence);

        let rogue = initial_stats(CharacterClass::Rogue);
        assert!(rogue.agility > rogue.strength);

        let scholar = initial_stats(CharacterClass::Scholar);
        assert!(scholar.wisdom > scholar.intelligence);

        let creator = initial_stats(CharacterClass::Creator);
        assert!(creator.creativity > creator.charisma);
    }

    #[test]
    fn every_class_has_lore() {
        for class in CharacterClass::ALL {
            assert!(!class_lore(class).is_empty());
        }
    }
}
