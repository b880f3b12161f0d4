use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const CHARACTER_SCHEMA_VERSION: u8 = 1;
pub const QUEST_SCHEMA_VERSION: u8 = 1;
pub const JOURNAL_SCHEMA_VERSION: u8 = 1;
pub const STREAK_SCHEMA_VERSION: u8 = 1;
pub const MESSAGE_SCHEMA_VERSION: u8 = 1;
pub const SETTINGS_SCHEMA_VERSION: u8 = 1;

/// The five playable archetypes. Each class has a signature quest category
/// that grants a doubled stat gain on completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Scholar,
    Creator,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 5] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Scholar,
        CharacterClass::Creator,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Scholar => "Scholar",
            CharacterClass::Creator => "Creator",
        }
    }

    /// Quest category that earns this class its doubled stat gain.
    pub fn signature_category(&self) -> QuestCategory {
        match self {
            CharacterClass::Warrior => QuestCategory::Health,
            CharacterClass::Mage => QuestCategory::Learning,
            CharacterClass::Rogue => QuestCategory::Social,
            CharacterClass::Scholar => QuestCategory::Personal,
            CharacterClass::Creator => QuestCategory::Creative,
        }
    }

    pub fn parse(input: &str) -> Option<CharacterClass> {
        match input.trim().to_ascii_lowercase().as_str() {
            "warrior" => Some(CharacterClass::Warrior),
            "mage" => Some(CharacterClass::Mage),
            "rogue" => Some(CharacterClass::Rogue),
            "scholar" => Some(CharacterClass::Scholar),
            "creator" => Some(CharacterClass::Creator),
            _ => None,
        }
    }
}

/// The six named attributes every character carries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CharacterStats {
    pub strength: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub creativity: u32,
    pub charisma: u32,
    pub wisdom: u32,
}

impl CharacterStats {
    /// Add a gain bundle onto these stats (saturating, stats never decrease).
    pub fn apply(&mut self, gain: &StatGain) {
        self.strength = self.strength.saturating_add(gain.strength);
        self.intelligence = self.intelligence.saturating_add(gain.intelligence);
        self.agility = self.agility.saturating_add(gain.agility);
        self.creativity = self.creativity.saturating_add(gain.creativity);
        self.charisma = self.charisma.saturating_add(gain.charisma);
        self.wisdom = self.wisdom.saturating_add(gain.wisdom);
    }
}

/// Per-completion stat increments, zero by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatGain {
    pub strength: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub creativity: u32,
    pub charisma: u32,
    pub wisdom: u32,
}

/// Cosmetic avatar descriptor. The engine never interprets these fields;
/// they ride along for whatever front end renders the character.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarConfig {
    pub body_type: u8,
    pub skin_tone: String,
    pub hair_style: u8,
    pub hair_color: String,
    pub eye_color: String,
    pub outfit: u8,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            body_type: 1,
            skin_tone: "#d2a679".to_string(),
            hair_style: 1,
            hair_color: "#3b2f2f".to_string(),
            eye_color: "#4a6741".to_string(),
            outfit: 1,
            image_url: None,
        }
    }
}

/// The single mutable aggregate root for progression.
///
/// `xp` is the cumulative lifetime total and is never reset per level;
/// `level` and `xp_to_next_level` are derived caches that must be refreshed
/// via [`Character::refresh_level`] after every xp mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Character {
    pub id: Uuid,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub gold: u64,
    pub stats: CharacterStats,
    pub avatar: AvatarConfig,
    pub bio: String,
    pub created_at: DateTime<Utc>,
    pub schema_version: u8,
}

impl Character {
    /// Recompute the cached `level` and `xp_to_next_level` from `xp`.
    /// Keeps the `level == f(xp)` invariant after any xp mutation.
    pub fn refresh_level(&mut self) {
        let progress = crate::engine::leveling::level_from_total_xp(self.xp);
        self.level = progress.level;
        self.xp_to_next_level = progress.xp_to_next_level;
    }

    /// Credit xp and refresh the derived level caches in one step.
    pub fn grant_xp(&mut self, amount: u64) {
        self.xp = self.xp.saturating_add(amount);
        self.refresh_level();
    }

    pub fn grant_gold(&mut self, amount: u64) {
        self.gold = self.gold.saturating_add(amount);
    }
}

/// Difficulty tiers, ordered from least to most demanding. The ordering is
/// load-bearing: reward tables and achievement predicates compare tiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestDifficulty {
    Trivial,
    Easy,
    Medium,
    Hard,
    Legendary,
}

impl QuestDifficulty {
    pub fn label(&self) -> &'static str {
        match self {
            QuestDifficulty::Trivial => "Trivial",
            QuestDifficulty::Easy => "Easy",
            QuestDifficulty::Medium => "Medium",
            QuestDifficulty::Hard => "Hard",
            QuestDifficulty::Legendary => "Legendary",
        }
    }
}

/// The seven life areas a quest can belong to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestCategory {
    Health,
    Career,
    Learning,
    Social,
    Creative,
    Personal,
    Finance,
}

impl QuestCategory {
    pub fn label(&self) -> &'static str {
        match self {
            QuestCategory::Health => "Health",
            QuestCategory::Career => "Career",
            QuestCategory::Learning => "Learning",
            QuestCategory::Social => "Social",
            QuestCategory::Creative => "Creative",
            QuestCategory::Personal => "Personal",
            QuestCategory::Finance => "Finance",
        }
    }
}

/// Quest lifecycle. Transitions are one-way: Active may move to any terminal
/// state, terminal states never change again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    Active,
    Completed,
    Failed,
    Abandoned,
}

impl QuestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, QuestStatus::Active)
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuestStatus::Active => "Active",
            QuestStatus::Completed => "Completed",
            QuestStatus::Failed => "Failed",
            QuestStatus::Abandoned => "Abandoned",
        }
    }
}

/// One actionable sub-task of a quest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestStep {
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
}

impl QuestStep {
    pub fn new(description: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            description: description.to_string(),
            completed: false,
        }
    }
}

/// A real-world task wrapped in narrative framing.
///
/// `xp_reward` and `gold_reward` are fixed at creation from the narrator
/// seed; the XP actually credited at completion is recomputed with the
/// streak multiplier while gold is credited as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quest {
    pub id: Uuid,
    /// The raw task as the user typed it.
    pub title: String,
    /// The narrated mission title.
    pub quest_title: String,
    #[serde(default)]
    pub description: String,
    /// The narrated mission framing (2-3 sentences of chronicle prose).
    pub narrative: String,
    pub category: QuestCategory,
    pub difficulty: QuestDifficulty,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub status: QuestStatus,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub steps: Vec<QuestStep>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub companions: Vec<String>,
    pub schema_version: u8,
}

impl Quest {
    pub fn new(
        title: &str,
        quest_title: &str,
        narrative: &str,
        category: QuestCategory,
        difficulty: QuestDifficulty,
        xp_reward: u64,
        gold_reward: u64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            quest_title: quest_title.to_string(),
            description: String::new(),
            narrative: narrative.to_string(),
            category,
            difficulty,
            xp_reward,
            gold_reward,
            status: QuestStatus::Active,
            due_date: None,
            created_at,
            completed_at: None,
            steps: Vec::new(),
            tags: Vec::new(),
            companions: Vec::new(),
            schema_version: QUEST_SCHEMA_VERSION,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_step(mut self, description: &str) -> Self {
        self.steps.push(QuestStep::new(description));
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_companions(mut self, companions: Vec<String>) -> Self {
        self.companions = companions;
        self
    }

    pub fn with_due_date(mut self, due: NaiveDate) -> Self {
        self.due_date = Some(due);
        self
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, QuestStatus::Active)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, QuestStatus::Completed)
    }

    pub fn all_steps_complete(&self) -> bool {
        self.steps.iter().all(|s| s.completed)
    }

    pub fn mark_completed(&mut self, now: DateTime<Utc>) {
        self.status = QuestStatus::Completed;
        self.completed_at = Some(now);
    }

    pub fn mark_failed(&mut self) {
        self.status = QuestStatus::Failed;
    }

    pub fn mark_abandoned(&mut self) {
        self.status = QuestStatus::Abandoned;
    }
}

/// Consecutive-day activity record. `longest >= current` always; mutated
/// only by [`crate::engine::streak::touch`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserStreak {
    pub current: u32,
    pub longest: u32,
    #[serde(default)]
    pub last_active: Option<NaiveDate>,
    pub schema_version: u8,
}

impl Default for UserStreak {
    fn default() -> Self {
        Self {
            current: 0,
            longest: 0,
            last_active: None,
            schema_version: STREAK_SCHEMA_VERSION,
        }
    }
}

/// One journal entry per calendar day with at least one completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JournalEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub quests_completed: u32,
    pub xp_gained: u64,
    /// Derived rollup line; fully replaced on every update, never appended.
    pub summary: String,
    #[serde(default)]
    pub reflection: Option<String>,
    pub schema_version: u8,
}

impl JournalEntry {
    pub fn new(date: NaiveDate, xp_gained: u64, summary: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            quests_completed: 1,
            xp_gained,
            summary: summary.to_string(),
            reflection: None,
            schema_version: JOURNAL_SCHEMA_VERSION,
        }
    }
}

/// Rarity tiers for achievements. Each tier carries a default one-time XP
/// bonus so the catalog only overrides the exceptions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn default_bonus(&self) -> u64 {
        match self {
            Rarity::Common => 50,
            Rarity::Rare => 150,
            Rarity::Epic => 400,
            Rarity::Legendary => 1000,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }
}

/// Static catalog entry. The unlocked set lives separately as
/// [`UnlockedAchievement`] records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub rarity: Rarity,
    /// Human-readable unlock condition shown in listings.
    pub condition: String,
    pub xp_bonus: u64,
}

impl Achievement {
    pub fn new(id: &str, title: &str, description: &str, rarity: Rarity) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: "🏅".to_string(),
            rarity,
            condition: String::new(),
            xp_bonus: rarity.default_bonus(),
        }
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = icon.to_string();
        self
    }

    pub fn with_condition(mut self, condition: &str) -> Self {
        self.condition = condition.to_string();
        self
    }

    pub fn with_bonus(mut self, xp_bonus: u64) -> Self {
        self.xp_bonus = xp_bonus;
        self
    }
}

/// Membership record of the append-only unlocked set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnlockedAchievement {
    pub id: String,
    pub unlocked_at: DateTime<Utc>,
}

impl UnlockedAchievement {
    pub fn new(id: &str, unlocked_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            unlocked_at,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    FutureSelf,
}

/// Tone tag the narrator attaches to future-self replies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Encouraging,
    Wise,
    Urgent,
    Celebratory,
    Reflective,
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Wise
    }
}

/// One turn of the future-self correspondence. The progression engine only
/// ever counts these; content is never interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FutureSelfMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub mood: Mood,
    pub schema_version: u8,
}

impl FutureSelfMessage {
    pub fn from_user(content: &str, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: MessageRole::User,
            content: content.to_string(),
            timestamp,
            mood: Mood::Reflective,
            schema_version: MESSAGE_SCHEMA_VERSION,
        }
    }

    pub fn from_future_self(content: &str, mood: Mood, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role: MessageRole::FutureSelf,
            content: content.to_string(),
            timestamp,
            mood,
            schema_version: MESSAGE_SCHEMA_VERSION,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Dark,
    Darker,
}

/// User-tunable preferences, persisted under their own key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSettings {
    pub future_self_name: String,
    pub future_self_personality: String,
    pub theme: Theme,
    pub notifications: bool,
    pub sound_effects: bool,
    pub quest_auto_breakdown: bool,
    pub schema_version: u8,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            future_self_name: "Your Future Self".to_string(),
            future_self_personality: "wise mentor".to_string(),
            theme: Theme::Dark,
            notifications: true,
            sound_effects: true,
            quest_auto_breakdown: true,
            schema_version: SETTINGS_SCHEMA_VERSION,
        }
    }
}
