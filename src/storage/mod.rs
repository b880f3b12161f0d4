//! Sled-backed persistence for all progression state.
//!
//! One tree, one key per aggregate. Values are bincode-encoded serde records
//! and every write fully replaces its key, so there are no partial updates
//! within an aggregate and no transactions across them.
//!
//! Read policy: a missing key yields the aggregate's typed default, and a
//! value that fails to decode (or carries an unknown schema version) is
//! logged and treated exactly like a missing one. Progression must keep
//! working against whatever state survives.

use std::path::{Path, PathBuf};

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::engine::catalog::builtin_achievements;
use crate::engine::errors::QuestlogError;
use crate::engine::store::{
    AchievementStore, CharacterStore, JournalStore, MessageStore, QuestStore, SettingsStore,
    StreakStore,
};
use crate::engine::types::{
    Achievement, Character, FutureSelfMessage, JournalEntry, Quest, UnlockedAchievement,
    UserSettings, UserStreak, CHARACTER_SCHEMA_VERSION, JOURNAL_SCHEMA_VERSION,
    MESSAGE_SCHEMA_VERSION, QUEST_SCHEMA_VERSION, SETTINGS_SCHEMA_VERSION, STREAK_SCHEMA_VERSION,
};

const TREE_PRIMARY: &str = "questlog";

const KEY_CHARACTER: &[u8] = b"character";
const KEY_QUESTS: &[u8] = b"quests";
const KEY_CATALOG: &[u8] = b"achievement_catalog";
const KEY_UNLOCKED: &[u8] = b"unlocked_achievements";
const KEY_MESSAGES: &[u8] = b"future_self_messages";
const KEY_JOURNAL: &[u8] = b"journal";
const KEY_STREAK: &[u8] = b"streak";
const KEY_ONBOARDING: &[u8] = b"onboarding_complete";
const KEY_SETTINGS: &[u8] = b"settings";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct QuestlogStoreBuilder {
    path: PathBuf,
    seed_catalog: bool,
}

impl QuestlogStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            seed_catalog: true,
        }
    }

    /// Opt out of seeding the achievement catalog during initialization
    /// (useful for targeted tests).
    pub fn without_catalog_seed(mut self) -> Self {
        self.seed_catalog = false;
        self
    }

    pub fn open(self) -> Result<QuestlogStore, QuestlogError> {
        QuestlogStore::open_with_options(self.path, self.seed_catalog)
    }
}

/// Sled-backed store holding character, quests, streak, journal,
/// achievements, messages, and settings.
pub struct QuestlogStore {
    _db: sled::Db,
    tree: sled::Tree,
}

impl QuestlogStore {
    /// Open (or create) the store rooted at `path`. The builtin achievement
    /// catalog is written on first open so listings work before any unlock.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, QuestlogError> {
        Self::open_with_options(path, true)
    }

    fn open_with_options<P: AsRef<Path>>(
        path: P,
        seed_catalog: bool,
    ) -> Result<Self, QuestlogError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let tree = db.open_tree(TREE_PRIMARY)?;
        let store = Self { _db: db, tree };

        if seed_catalog {
            store.seed_catalog_if_needed()?;
        }

        Ok(store)
    }

    /// Write the builtin catalog if no catalog key exists yet. Returns how
    /// many entries were seeded (0 when already present).
    pub fn seed_catalog_if_needed(&self) -> Result<usize, QuestlogError> {
        if self.tree.get(KEY_CATALOG)?.is_some() {
            return Ok(0);
        }
        let catalog = builtin_achievements();
        self.put(KEY_CATALOG, &catalog)?;
        Ok(catalog.len())
    }

    fn put<T: Serialize>(&self, key: &[u8], value: &T) -> Result<(), QuestlogError> {
        let bytes = bincode::serialize(value)?;
        self.tree.insert(key, bytes)?;
        self.tree.flush()?;
        Ok(())
    }

    /// Fetch and decode `key`. Absent keys and undecodable values both come
    /// back as `None`; only store faults propagate.
    fn get_opt<T: DeserializeOwned>(
        &self,
        key: &[u8],
        label: &str,
    ) -> Result<Option<T>, QuestlogError> {
        let Some(bytes) = self.tree.get(key)? else {
            return Ok(None);
        };
        match bincode::deserialize::<T>(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                warn!("discarding corrupt {} record: {}", label, err);
                Ok(None)
            }
        }
    }

    fn get_defaulted<T: DeserializeOwned + Default>(
        &self,
        key: &[u8],
        label: &str,
    ) -> Result<T, QuestlogError> {
        Ok(self.get_opt(key, label)?.unwrap_or_default())
    }

    /// Destructive reset: remove every aggregate, including the catalog and
    /// onboarding flag. The next open reseeds the catalog.
    pub fn clear_all(&self) -> Result<(), QuestlogError> {
        for key in [
            KEY_CHARACTER,
            KEY_QUESTS,
            KEY_CATALOG,
            KEY_UNLOCKED,
            KEY_MESSAGES,
            KEY_JOURNAL,
            KEY_STREAK,
            KEY_ONBOARDING,
            KEY_SETTINGS,
        ] {
            self.tree.remove(key)?;
        }
        self.tree.flush()?;
        Ok(())
    }
}

impl CharacterStore for QuestlogStore {
    fn load_character(&self) -> Result<Option<Character>, QuestlogError> {
        let Some(character) = self.get_opt::<Character>(KEY_CHARACTER, "character")? else {
            return Ok(None);
        };
        if character.schema_version != CHARACTER_SCHEMA_VERSION {
            warn!(
                "discarding character record with schema {} (expected {})",
                character.schema_version, CHARACTER_SCHEMA_VERSION
            );
            return Ok(None);
        }
        Ok(Some(character))
    }

    fn save_character(&self, character: &Character) -> Result<(), QuestlogError> {
        let mut record = character.clone();
        record.schema_version = CHARACTER_SCHEMA_VERSION;
        self.put(KEY_CHARACTER, &record)
    }
}

impl QuestStore for QuestlogStore {
    fn load_quests(&self) -> Result<Vec<Quest>, QuestlogError> {
        self.get_defaulted(KEY_QUESTS, "quest list")
    }

    fn save_quests(&self, quests: &[Quest]) -> Result<(), QuestlogError> {
        let mut records = quests.to_vec();
        for record in &mut records {
            record.schema_version = QUEST_SCHEMA_VERSION;
        }
        self.put(KEY_QUESTS, &records)
    }
}

impl StreakStore for QuestlogStore {
    fn load_streak(&self) -> Result<UserStreak, QuestlogError> {
        self.get_defaulted(KEY_STREAK, "streak")
    }

    fn save_streak(&self, streak: &UserStreak) -> Result<(), QuestlogError> {
        let mut record = streak.clone();
        record.schema_version = STREAK_SCHEMA_VERSION;
        self.put(KEY_STREAK, &record)
    }
}

impl JournalStore for QuestlogStore {
    fn load_journal(&self) -> Result<Vec<JournalEntry>, QuestlogError> {
        self.get_defaulted(KEY_JOURNAL, "journal")
    }

    fn save_journal(&self, journal: &[JournalEntry]) -> Result<(), QuestlogError> {
        let mut records = journal.to_vec();
        for record in &mut records {
            record.schema_version = JOURNAL_SCHEMA_VERSION;
        }
        self.put(KEY_JOURNAL, &records)
    }
}

impl AchievementStore for QuestlogStore {
    fn load_catalog(&self) -> Result<Vec<Achievement>, QuestlogError> {
        match self.get_opt::<Vec<Achievement>>(KEY_CATALOG, "achievement catalog")? {
            Some(catalog) if !catalog.is_empty() => Ok(catalog),
            _ => Ok(builtin_achievements()),
        }
    }

    fn load_unlocked(&self) -> Result<Vec<UnlockedAchievement>, QuestlogError> {
        self.get_defaulted(KEY_UNLOCKED, "unlocked achievements")
    }

    fn save_unlocked(&self, unlocked: &[UnlockedAchievement]) -> Result<(), QuestlogError> {
        self.put(KEY_UNLOCKED, &unlocked.to_vec())
    }
}

impl MessageStore for QuestlogStore {
    fn load_messages(&self) -> Result<Vec<FutureSelfMessage>, QuestlogError> {
        self.get_defaulted(KEY_MESSAGES, "future self messages")
    }

    fn save_messages(&self, messages: &[FutureSelfMessage]) -> Result<(), QuestlogError> {
        let mut records = messages.to_vec();
        for record in &mut records {
            record.schema_version = MESSAGE_SCHEMA_VERSION;
        }
        self.put(KEY_MESSAGES, &records)
    }
}

impl SettingsStore for QuestlogStore {
    fn load_settings(&self) -> Result<UserSettings, QuestlogError> {
        self.get_defaulted(KEY_SETTINGS, "settings")
    }

    fn save_settings(&self, settings: &UserSettings) -> Result<(), QuestlogError> {
        let mut record = settings.clone();
        record.schema_version = SETTINGS_SCHEMA_VERSION;
        self.put(KEY_SETTINGS, &record)
    }

    fn onboarding_complete(&self) -> Result<bool, QuestlogError> {
        self.get_defaulted(KEY_ONBOARDING, "onboarding flag")
    }

    fn set_onboarding_complete(&self, complete: bool) -> Result<(), QuestlogError> {
        self.put(KEY_ONBOARDING, &complete)
    }
}
