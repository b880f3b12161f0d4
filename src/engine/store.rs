//! Persistence traits, one per aggregate.
//!
//! Each aggregate (character, quest list, streak, journal, unlocked set,
//! message history, settings) occupies a single key in the backing store and
//! every save fully replaces that key. The engine only ever talks to these
//! traits; [`crate::storage::QuestlogStore`] is the sled-backed implementation.
//!
//! Reads never fail on absence: list aggregates default to empty, the streak
//! to zeroed, settings to [`UserSettings::default`]. Only the character is
//! surfaced as `Option`, because "no character yet" drives onboarding.

use uuid::Uuid;

use crate::engine::errors::QuestlogError;
use crate::engine::types::{
    Achievement, Character, FutureSelfMessage, JournalEntry, Quest, UnlockedAchievement,
    UserSettings, UserStreak,
};

pub trait CharacterStore {
    fn load_character(&self) -> Result<Option<Character>, QuestlogError>;
    fn save_character(&self, character: &Character) -> Result<(), QuestlogError>;

    /// Load the character or fail with a typed not-found error. For paths
    /// where a hero must already exist (everything past onboarding).
    fn require_character(&self) -> Result<Character, QuestlogError> {
        self.load_character()?
            .ok_or_else(|| QuestlogError::NotFound("character".to_string()))
    }
}

pub trait QuestStore {
    fn load_quests(&self) -> Result<Vec<Quest>, QuestlogError>;
    fn save_quests(&self, quests: &[Quest]) -> Result<(), QuestlogError>;

    fn find_quest(&self, id: Uuid) -> Result<Option<Quest>, QuestlogError> {
        Ok(self.load_quests()?.into_iter().find(|q| q.id == id))
    }

    /// Insert or replace a single quest within the stored list.
    fn save_quest(&self, quest: &Quest) -> Result<(), QuestlogError> {
        let mut quests = self.load_quests()?;
        match quests.iter_mut().find(|q| q.id == quest.id) {
            Some(slot) => *slot = quest.clone(),
            None => quests.push(quest.clone()),
        }
        self.save_quests(&quests)
    }
}

pub trait StreakStore {
    fn load_streak(&self) -> Result<UserStreak, QuestlogError>;
    fn save_streak(&self, streak: &UserStreak) -> Result<(), QuestlogError>;
}

pub trait JournalStore {
    fn load_journal(&self) -> Result<Vec<JournalEntry>, QuestlogError>;
    fn save_journal(&self, journal: &[JournalEntry]) -> Result<(), QuestlogError>;
}

pub trait AchievementStore {
    /// The fixed catalog, seeded at store creation.
    fn load_catalog(&self) -> Result<Vec<Achievement>, QuestlogError>;
    fn load_unlocked(&self) -> Result<Vec<UnlockedAchievement>, QuestlogError>;
    fn save_unlocked(&self, unlocked: &[UnlockedAchievement]) -> Result<(), QuestlogError>;
}

pub trait MessageStore {
    fn load_messages(&self) -> Result<Vec<FutureSelfMessage>, QuestlogError>;
    fn save_messages(&self, messages: &[FutureSelfMessage]) -> Result<(), QuestlogError>;

    fn append_message(&self, message: FutureSelfMessage) -> Result<(), QuestlogError> {
        let mut messages = self.load_messages()?;
        messages.push(message);
        self.save_messages(&messages)
    }
}

pub trait SettingsStore {
    fn load_settings(&self) -> Result<UserSettings, QuestlogError>;
    fn save_settings(&self, settings: &UserSettings) -> Result<(), QuestlogError>;
    fn onboarding_complete(&self) -> Result<bool, QuestlogError>;
    fn set_onboarding_complete(&self, complete: bool) -> Result<(), QuestlogError>;
}

/// Everything the completion orchestrator and achievement evaluator need,
/// in one bound.
pub trait ProgressionStore:
    CharacterStore
    + QuestStore
    + StreakStore
    + JournalStore
    + AchievementStore
    + MessageStore
    + SettingsStore
{
}

impl<T> ProgressionStore for T where
    T: CharacterStore
        + QuestStore
        + StreakStore
        + JournalStore
        + AchievementStore
        + MessageStore
        + SettingsStore
{
}
