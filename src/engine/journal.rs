//! Journal aggregator: per-day rollup of completed quests ("deeds").
//!
//! At most one entry exists per calendar date. Counters only grow within a
//! day, and the summary line is derived state, rewritten in full on every
//! update rather than appended to.

use chrono::NaiveDate;

use crate::engine::errors::QuestlogError;
use crate::engine::types::{JournalEntry, Quest};

/// Record one completed quest against `today`'s entry, creating it when this
/// is the first deed of the day. `xp_credited` is the XP actually granted to
/// the character (streak multiplier included). Returns the updated entry.
pub fn record_completion(
    journal: &mut Vec<JournalEntry>,
    quest: &Quest,
    xp_credited: u64,
    today: NaiveDate,
) -> JournalEntry {
    if let Some(entry) = journal.iter_mut().find(|e| e.date == today) {
        entry.quests_completed += 1;
        entry.xp_gained = entry.xp_gained.saturating_add(xp_credited);
        entry.summary = format!(
            "Completed {} quests today, including: {}",
            entry.quests_completed, quest.quest_title
        );
        return entry.clone();
    }

    let entry = JournalEntry::new(
        today,
        xp_credited,
        &format!("Embarked on the path and completed: {}", quest.quest_title),
    );
    journal.push(entry.clone());
    entry
}

/// Attach (or replace) the free-form reflection on an existing entry.
/// Reflections only exist on days that saw activity.
pub fn set_reflection(
    journal: &mut [JournalEntry],
    date: NaiveDate,
    reflection: &str,
) -> Result<JournalEntry, QuestlogError> {
    let entry = journal
        .iter_mut()
        .find(|e| e.date == date)
        .ok_or_else(|| QuestlogError::NotFound(format!("journal entry for {}", date)))?;
    entry.reflection = Some(reflection.to_string());
    Ok(entry.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::types::{Quest, QuestCategory, QuestDifficulty};
    use chrono::{NaiveDate, Utc};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn quest(titled: &str) -> Quest {
        Quest::new(
            titled,
            titled,
            "A trial awaits.",
            QuestCategory::Personal,
            QuestDifficulty::Medium,
            150,
            45,
            Utc::now(),
        )
    }

    #[test]
    fn first_completion_creates_entry() {
        let mut journal = Vec::new();
        let entry = record_completion(&mut journal, &quest("Slay the Inbox"), 150, day(2024, 5, 1));

        assert_eq!(journal.len(), 1);
        assert_eq!(entry.quests_completed, 1);
        assert_eq!(entry.xp_gained, 150);
        assert!(entry.summary.contains("Slay the Inbox"));
        assert!(entry.reflection.is_none());
    }

    #[test]
    fn same_day_completions_merge_into_one_entry() {
        let mut journal = Vec::new();
        record_completion(&mut journal, &quest("First"), 150, day(2024, 5, 1));
        let entry = record_completion(&mut journal, &quest("Second"), 187, day(2024, 5, 1));

        assert_eq!(journal.len(), 1);
        assert_eq!(entry.quests_completed, 2);
        assert_eq!(entry.xp_gained, 337);
    }

    #[test]
    fn summary_is_replaced_not_accumulated() {
        let mut journal = Vec::new();
        record_completion(&mut journal, &quest("First"), 100, day(2024, 5, 1));
        let entry = record_completion(&mut journal, &quest("Second"), 100, day(2024, 5, 1));

        assert_eq!(
            entry.summary,
            "Completed 2 quests today, including: Second"
        );
        assert!(!entry.summary.contains("First"));
    }

    #[test]
    fn different_days_get_distinct_entries() {
        let mut journal = Vec::new();
        record_completion(&mut journal, &quest("Monday"), 100, day(2024, 5, 1));
        record_completion(&mut journal, &quest("Tuesday"), 100, day(2024, 5, 2));

        assert_eq!(journal.len(), 2);
        assert_eq!(journal[0].date, day(2024, 5, 1));
        assert_eq!(journal[1].date, day(2024, 5, 2));
    }

    #[test]
    fn reflection_requires_an_active_day() {
        let mut journal = Vec::new();
        record_completion(&mut journal, &quest("Deed"), 100, day(2024, 5, 1));

        let entry = set_reflection(&mut journal, day(2024, 5, 1), "Felt strong today.").unwrap();
        assert_eq!(entry.reflection.as_deref(), Some("Felt strong today."));

        let missing = set_reflection(&mut journal, day(2024, 5, 2), "Nothing happened.");
        assert!(missing.is_err());
    }
}
