//! Completion orchestrator: the single entry point for "quest done".
//!
//! Sequences the streak touch, reward credit, quest transition, journal
//! rollup, and achievement pass against the store. The step order is
//! load-bearing: the reward must see the streak as updated by this
//! completion, and the character must be re-read after the achievement pass
//! because unlock bonuses mutate it independently.
//!
//! The sequence is not atomic (one key per aggregate, no transactions). Every
//! step is idempotent or append-only, so a crash mid-way is recovered by the
//! next completion or achievement pass rather than rolled back.

use chrono::{DateTime, Utc};
use log::info;
use uuid::Uuid;

use crate::engine::errors::QuestlogError;
use crate::engine::store::ProgressionStore;
use crate::engine::types::{Character, JournalEntry, Quest, UserStreak};
use crate::engine::{achievement, journal, reward, streak};
use crate::logutil::escape_log;

/// Everything a caller needs to present the victory screen.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub quest: Quest,
    /// Final character state, achievement bonuses included.
    pub character: Character,
    pub streak: UserStreak,
    pub journal_entry: JournalEntry,
    /// Streak-scaled XP credited for the quest itself, excluding any
    /// achievement bonus XP.
    pub xp_awarded: u64,
    pub gold_awarded: u64,
    /// True when the final level exceeds the level before completion.
    pub leveled_up: bool,
    /// Achievement IDs unlocked by this completion, in catalog order.
    pub unlocked: Vec<String>,
}

/// Complete the quest with id `quest_id` as of `now`.
///
/// Preconditions, checked here: the quest exists, is still active, and every
/// step is marked complete. Violations fail with
/// [`QuestlogError::PreconditionFailed`] before anything is written.
///
/// XP is recomputed from the difficulty table and the post-touch streak;
/// gold is credited from the amount fixed on the quest at forge time.
pub fn complete_quest<S: ProgressionStore>(
    store: &S,
    quest_id: Uuid,
    now: DateTime<Utc>,
) -> Result<CompletionOutcome, QuestlogError> {
    let mut quest = store
        .find_quest(quest_id)?
        .ok_or_else(|| QuestlogError::NotFound(format!("quest {}", quest_id)))?;

    if !quest.is_active() {
        return Err(QuestlogError::PreconditionFailed(format!(
            "quest '{}' is already {}",
            quest.quest_title,
            quest.status.label()
        )));
    }
    if !quest.all_steps_complete() {
        let remaining = quest.steps.iter().filter(|s| !s.completed).count();
        return Err(QuestlogError::PreconditionFailed(format!(
            "quest '{}' still has {} open step(s)",
            quest.quest_title, remaining
        )));
    }

    let mut character = store.require_character()?;
    let starting_level = character.level;
    let today = now.date_naive();

    let streak = streak::touch(&store.load_streak()?, today);
    store.save_streak(&streak)?;

    let reward = reward::reward_for(quest.difficulty, streak.current);
    let xp_awarded = reward.xp;
    let gold_awarded = quest.gold_reward;

    character.grant_xp(xp_awarded);
    character.grant_gold(gold_awarded);
    character
        .stats
        .apply(&reward::stat_gain(quest.category, character.class));

    quest.mark_completed(now);

    store.save_character(&character)?;
    store.save_quest(&quest)?;

    let mut entries = store.load_journal()?;
    let journal_entry = journal::record_completion(&mut entries, &quest, xp_awarded, today);
    store.save_journal(&entries)?;

    let unlocked = achievement::evaluate(store, now)?;
    let character = store.require_character()?;
    let leveled_up = character.level > starting_level;

    info!(
        "quest completed: {} (+{} xp, +{} gold, streak {})",
        escape_log(&quest.quest_title),
        xp_awarded,
        gold_awarded,
        streak.current
    );
    if leveled_up {
        info!("level up: {} -> {}", starting_level, character.level);
    }

    Ok(CompletionOutcome {
        quest,
        character,
        streak,
        journal_entry,
        xp_awarded,
        gold_awarded,
        leveled_up,
        unlocked,
    })
}
