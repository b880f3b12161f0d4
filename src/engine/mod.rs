//! Progression engine: the rules that turn completed tasks into character
//! growth. Pure calculators (leveling, reward) sit under stateful aggregates
//! (streak, journal, achievements), all tied together by the completion
//! orchestrator. Persistence is abstracted behind per-aggregate store traits
//! so the engine never touches sled directly.

pub mod achievement;
pub mod catalog;
pub mod character;
pub mod completion;
pub mod errors;
pub mod journal;
pub mod leveling;
pub mod quest;
pub mod reward;
pub mod store;
pub mod streak;
pub mod types;

pub use achievement::evaluate;
pub use catalog::builtin_achievements;
pub use character::{class_lore, initial_stats, new_character};
pub use completion::{complete_quest, CompletionOutcome};
pub use errors::QuestlogError;
pub use journal::{record_completion, set_reflection};
pub use leveling::{level_from_total_xp, xp_required_for_level, LevelProgress};
pub use quest::{abandon, fallback_seed, forge_quest, toggle_step, QuestSeed, SeedStep};
pub use reward::{base_xp_for, gold_for, reward_for, stat_gain, Reward};
pub use store::{
    AchievementStore, CharacterStore, JournalStore, MessageStore, ProgressionStore, QuestStore,
    SettingsStore, StreakStore,
};
pub use streak::touch;
pub use types::*;
