//! Achievement evaluator.
//!
//! A full re-scan rule engine: every call checks each catalog entry that is
//! not yet unlocked against the current aggregates, so calling it redundantly
//! is always safe and a missed unlock is picked up by the next pass. Bonus XP
//! for everything unlocked in one pass is summed and credited to the
//! character in a single write.

use chrono::{DateTime, NaiveDate, Timelike, Utc};
use log::info;
use std::collections::HashMap;

use crate::engine::errors::QuestlogError;
use crate::engine::store::ProgressionStore;
use crate::engine::types::{Quest, QuestCategory, QuestDifficulty, UnlockedAchievement};

/// Aggregate counts shared by all predicates, computed once per pass.
struct EvaluationContext {
    completed_total: usize,
    hard_completed: usize,
    legendary_completed: bool,
    health_completed: usize,
    learning_completed: usize,
    streak_current: u32,
    level: u32,
    message_count: usize,
    night_completion: bool,
    dawn_completion: bool,
    busiest_day_completions: usize,
}

impl EvaluationContext {
    fn build(completed: &[&Quest], streak_current: u32, level: u32, message_count: usize) -> Self {
        let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
        let mut night_completion = false;
        let mut dawn_completion = false;

        for quest in completed {
            if let Some(at) = quest.completed_at {
                *per_day.entry(at.date_naive()).or_insert(0) += 1;
                match at.hour() {
                    0..=3 => night_completion = true,
                    4..=6 => dawn_completion = true,
                    _ => {}
                }
            }
        }

        Self {
            completed_total: completed.len(),
            hard_completed: completed
                .iter()
                .filter(|q| q.difficulty == QuestDifficulty::Hard)
                .count(),
            legendary_completed: completed
                .iter()
                .any(|q| q.difficulty == QuestDifficulty::Legendary),
            health_completed: completed
                .iter()
                .filter(|q| q.category == QuestCategory::Health)
                .count(),
            learning_completed: completed
                .iter()
                .filter(|q| q.category == QuestCategory::Learning)
                .count(),
            streak_current,
            level,
            message_count,
            night_completion,
            dawn_completion,
            busiest_day_completions: per_day.values().copied().max().unwrap_or(0),
        }
    }
}

fn condition_met(id: &str, ctx: &EvaluationContext) -> bool {
    match id {
        "first_blood" => ctx.completed_total >= 1,
        "quest_hunter" => ctx.completed_total >= 10,
        "century_mark" => ctx.completed_total >= 100,
        "legend_rises" => ctx.completed_total >= 500,
        "consistent_soul" => ctx.streak_current >= 3,
        "week_warrior" => ctx.streak_current >= 7,
        "unstoppable_force" => ctx.streak_current >= 30,
        "dragonslayer" => ctx.legendary_completed,
        "hard_boiled" => ctx.hard_completed >= 10,
        "awakening" => ctx.level >= 5,
        "ascendant" => ctx.level >= 20,
        "transcendent" => ctx.level >= 50,
        "iron_body" => ctx.health_completed >= 20,
        "scholars_path" => ctx.learning_completed >= 20,
        "soul_seeker" => ctx.message_count >= 1,
        "time_traveler" => ctx.message_count >= 50,
        "night_owl" => ctx.night_completion,
        "early_bird" => ctx.dawn_completion,
        "speed_runner" => ctx.busiest_day_completions >= 5,
        _ => false,
    }
}

/// Scan the catalog against current history and unlock everything newly
/// earned. Returns the IDs unlocked by this pass, in catalog order.
///
/// Side effects: appends to the unlocked set and credits the summed XP
/// bonuses to the character (level recomputed) when anything unlocked.
/// Without a character nothing is evaluated.
pub fn evaluate<S: ProgressionStore>(
    store: &S,
    now: DateTime<Utc>,
) -> Result<Vec<String>, QuestlogError> {
    let Some(mut character) = store.load_character()? else {
        return Ok(Vec::new());
    };

    let quests = store.load_quests()?;
    let completed: Vec<&Quest> = quests.iter().filter(|q| q.is_completed()).collect();
    let mut unlocked = store.load_unlocked()?;
    let streak = store.load_streak()?;
    let messages = store.load_messages()?;
    let catalog = store.load_catalog()?;

    let ctx = EvaluationContext::build(&completed, streak.current, character.level, messages.len());

    let mut newly_unlocked = Vec::new();
    let mut bonus_xp: u64 = 0;

    for achievement in &catalog {
        if unlocked.iter().any(|u| u.id == achievement.id) {
            continue;
        }
        if condition_met(&achievement.id, &ctx) {
            info!(
                "achievement unlocked: {} ({} xp bonus)",
                achievement.id, achievement.xp_bonus
            );
            unlocked.push(UnlockedAchievement::new(&achievement.id, now));
            bonus_xp += achievement.xp_bonus;
            newly_unlocked.push(achievement.id.clone());
        }
    }

    if newly_unlocked.is_empty() {
        return Ok(newly_unlocked);
    }

    store.save_unlocked(&unlocked)?;

    if bonus_xp > 0 {
        character.grant_xp(bonus_xp);
        store.save_character(&character)?;
    }

    Ok(newly_unlocked)
}
