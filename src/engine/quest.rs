//! Quest lifecycle: forging from a narrator seed, step toggling, abandonment.
//!
//! A quest's xp and gold rewards are fixed here at forge time from the seed
//! payload and never recomputed afterwards. The streak bonus applied at
//! completion is layered on top by the orchestrator, not written back.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::engine::errors::QuestlogError;
use crate::engine::reward;
use crate::engine::types::{Quest, QuestCategory, QuestDifficulty};

/// Structured payload a quest is forged from. Produced by the narrator (LLM
/// JSON) or by [`fallback_seed`] when the narrator is unavailable.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestSeed {
    pub quest_title: String,
    pub quest_narrative: String,
    pub difficulty: QuestDifficulty,
    pub category: QuestCategory,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub steps: Vec<SeedStep>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub companions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SeedStep {
    pub description: String,
}

/// Deterministic seed used whenever quest generation cannot reach the
/// narrator: fixed medium/personal framing with the table rewards and a
/// single step echoing the raw input.
pub fn fallback_seed(input: &str) -> QuestSeed {
    let difficulty = QuestDifficulty::Medium;
    let base = reward::base_xp_for(difficulty);
    QuestSeed {
        quest_title: format!("The Trial of {}", input),
        quest_narrative: format!(
            "You have embarked on a journey to {}. May your resolve be as strong as your intentions.",
            input
        ),
        difficulty,
        category: QuestCategory::Personal,
        xp_reward: base,
        gold_reward: reward::gold_for(difficulty),
        steps: vec![SeedStep {
            description: input.to_string(),
        }],
        tags: vec!["fallback".to_string()],
        companions: Vec::new(),
    }
}

/// Turn a raw task plus its seed into a stored quest. The seed's rewards are
/// fixed onto the quest as-is.
pub fn forge_quest(input: &str, seed: QuestSeed, now: DateTime<Utc>) -> Quest {
    let mut quest = Quest::new(
        input,
        &seed.quest_title,
        &seed.quest_narrative,
        seed.category,
        seed.difficulty,
        seed.xp_reward,
        seed.gold_reward,
        now,
    )
    .with_tags(seed.tags)
    .with_companions(seed.companions);

    for step in &seed.steps {
        quest = quest.with_step(&step.description);
    }
    quest
}

/// Flip one step's completed flag. Only active quests may be edited.
/// Returns the step's new state.
pub fn toggle_step(quest: &mut Quest, step_id: Uuid) -> Result<bool, QuestlogError> {
    if !quest.is_active() {
        return Err(QuestlogError::PreconditionFailed(format!(
            "quest '{}' is {}, steps can no longer change",
            quest.quest_title,
            quest.status.label()
        )));
    }
    let step = quest
        .steps
        .iter_mut()
        .find(|s| s.id == step_id)
        .ok_or_else(|| QuestlogError::NotFound(format!("step {} on quest", step_id)))?;
    step.completed = !step.completed;
    Ok(step.completed)
}

/// Walk away from an active quest. Terminal, no rewards are granted.
pub fn abandon(quest: &mut Quest) -> Result<(), QuestlogError> {
    if !quest.is_active() {
        return Err(QuestlogError::PreconditionFailed(format!(
            "quest '{}' is already {}",
            quest.quest_title,
            quest.status.label()
        )));
    }
    quest.mark_abandoned();
    Ok(())
}
