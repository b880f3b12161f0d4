/// Integration tests for streak behavior driven through quest completions.
///
/// The pure day-machine is covered by unit tests; these validate that the
/// orchestrator touches the streak before computing rewards and that streak
/// state persists and resets the way a player would see it.
use chrono::{DateTime, TimeZone, Utc};
use questlog::engine::{
    complete_quest, new_character, AvatarConfig, CharacterClass, CharacterStore, Quest,
    QuestCategory, QuestDifficulty, QuestStore, StreakStore,
};
use questlog::storage::{QuestlogStore, QuestlogStoreBuilder};
use tempfile::TempDir;
use uuid::Uuid;

fn setup_store() -> (QuestlogStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = QuestlogStoreBuilder::new(temp_dir.path()).open().unwrap();
    let hero = new_character(
        "Corvin",
        CharacterClass::Rogue,
        AvatarConfig::default(),
        "",
        at(2026, 3, 1, 9),
    );
    store.save_character(&hero).unwrap();
    (store, temp_dir)
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn ready_medium_quest(store: &QuestlogStore, title: &str, created_at: DateTime<Utc>) -> Uuid {
    let quest = Quest::new(
        "task",
        title,
        "",
        QuestCategory::Personal,
        QuestDifficulty::Medium,
        150,
        45,
        created_at,
    );
    store.save_quest(&quest).unwrap();
    quest.id
}

#[test]
fn consecutive_days_grow_the_streak_into_the_multiplier() {
    let (store, _temp) = setup_store();

    let q1 = ready_medium_quest(&store, "Day One", at(2026, 3, 10, 8));
    let q2 = ready_medium_quest(&store, "Day Two", at(2026, 3, 10, 8));
    let q3 = ready_medium_quest(&store, "Day Three", at(2026, 3, 10, 8));

    let day1 = complete_quest(&store, q1, at(2026, 3, 10, 12)).expect("day 1");
    assert_eq!(day1.streak.current, 1);
    assert_eq!(day1.xp_awarded, 150);

    let day2 = complete_quest(&store, q2, at(2026, 3, 11, 12)).expect("day 2");
    assert_eq!(day2.streak.current, 2);
    assert_eq!(day2.xp_awarded, 150, "two days is still below the first tier");

    // Third consecutive day reaches the x1.25 tier: 150 * 5 / 4 floors to 187.
    let day3 = complete_quest(&store, q3, at(2026, 3, 12, 12)).expect("day 3");
    assert_eq!(day3.streak.current, 3);
    assert_eq!(day3.streak.longest, 3);
    assert_eq!(day3.xp_awarded, 187);
}

#[test]
fn second_completion_the_same_day_does_not_double_count() {
    let (store, _temp) = setup_store();

    let q1 = ready_medium_quest(&store, "Morning Deed", at(2026, 3, 10, 8));
    let q2 = ready_medium_quest(&store, "Evening Deed", at(2026, 3, 10, 8));

    let first = complete_quest(&store, q1, at(2026, 3, 10, 9)).expect("first");
    let second = complete_quest(&store, q2, at(2026, 3, 10, 22)).expect("second");

    assert_eq!(first.streak.current, 1);
    assert_eq!(second.streak.current, 1, "a day counts once no matter the volume");
    assert_eq!(second.streak.last_active, Some(at(2026, 3, 10, 0).date_naive()));
}

#[test]
fn a_missed_day_resets_current_but_longest_survives() {
    let (store, _temp) = setup_store();

    for (i, day) in [10u32, 11, 12].iter().enumerate() {
        let id = ready_medium_quest(&store, &format!("Deed {}", i + 1), at(2026, 3, *day, 8));
        complete_quest(&store, id, at(2026, 3, *day, 12)).expect("streak build-up");
    }
    assert_eq!(store.load_streak().unwrap().current, 3);

    // March 13-14 pass with no completions.
    let id = ready_medium_quest(&store, "The Return", at(2026, 3, 15, 8));
    let outcome = complete_quest(&store, id, at(2026, 3, 15, 12)).expect("return day");

    assert_eq!(outcome.streak.current, 1);
    assert_eq!(outcome.streak.longest, 3);
    assert_eq!(outcome.xp_awarded, 150, "the multiplier is gone with the streak");
}

#[test]
fn streak_state_survives_reopen() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = QuestlogStoreBuilder::new(temp_dir.path()).open().unwrap();
        let hero = new_character(
            "Corvin",
            CharacterClass::Rogue,
            AvatarConfig::default(),
            "",
            at(2026, 3, 1, 9),
        );
        store.save_character(&hero).unwrap();
        let id = ready_medium_quest(&store, "Before the Restart", at(2026, 3, 10, 8));
        complete_quest(&store, id, at(2026, 3, 10, 12)).expect("complete");
    }

    {
        let store = QuestlogStoreBuilder::new(temp_dir.path()).open().unwrap();
        let streak = store.load_streak().unwrap();
        assert_eq!(streak.current, 1);
        assert_eq!(streak.last_active, Some(at(2026, 3, 10, 0).date_naive()));

        // Next-day completion picks the streak up where it left off.
        let id = ready_medium_quest(&store, "After the Restart", at(2026, 3, 11, 8));
        let outcome = complete_quest(&store, id, at(2026, 3, 11, 12)).expect("complete");
        assert_eq!(outcome.streak.current, 2);
    }
}
