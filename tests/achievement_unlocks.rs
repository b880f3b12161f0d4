/// Integration tests for the achievement evaluator.
///
/// Validates unlock-once semantics, bonus XP crediting, catch-up scans that
/// recover unlocks missed at completion time, and the quiet no-character path.
use chrono::{DateTime, TimeZone, Utc};
use questlog::engine::{
    complete_quest, evaluate, new_character, AchievementStore, AvatarConfig, CharacterClass,
    CharacterStore, FutureSelfMessage, MessageStore, Quest, QuestCategory, QuestDifficulty,
    QuestStore, StreakStore, UserStreak,
};
use questlog::storage::{QuestlogStore, QuestlogStoreBuilder};
use tempfile::TempDir;

fn setup_store() -> (QuestlogStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let store = QuestlogStoreBuilder::new(temp_dir.path()).open().unwrap();
    (store, temp_dir)
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn create_hero(store: &QuestlogStore) {
    let hero = new_character(
        "Brann",
        CharacterClass::Scholar,
        AvatarConfig::default(),
        "",
        at(2026, 3, 1, 9),
    );
    store.save_character(&hero).unwrap();
}

fn save_completed_quest(store: &QuestlogStore, quest_title: &str, completed_at: DateTime<Utc>) {
    let mut quest = Quest::new(
        "task",
        quest_title,
        "",
        QuestCategory::Personal,
        QuestDifficulty::Easy,
        75,
        22,
        completed_at,
    );
    quest.mark_completed(completed_at);
    store.save_quest(&quest).unwrap();
}

#[test]
fn first_blood_is_credited_exactly_once() {
    let (store, _temp) = setup_store();
    create_hero(&store);

    let quest = Quest::new(
        "task",
        "The Opening Move",
        "",
        QuestCategory::Personal,
        QuestDifficulty::Easy,
        75,
        22,
        at(2026, 3, 10, 9),
    );
    store.save_quest(&quest).unwrap();

    let outcome = complete_quest(&store, quest.id, at(2026, 3, 10, 12)).expect("complete quest");
    assert_eq!(outcome.unlocked, vec!["first_blood".to_string()]);
    let xp_after_unlock = store.load_character().unwrap().unwrap().xp;
    assert_eq!(xp_after_unlock, 75 + 50, "quest xp plus the common-tier bonus");

    // A redundant pass finds nothing new and writes nothing.
    let again = evaluate(&store, at(2026, 3, 10, 13)).expect("re-evaluate");
    assert!(again.is_empty());
    assert_eq!(store.load_character().unwrap().unwrap().xp, xp_after_unlock);
    assert_eq!(store.load_unlocked().unwrap().len(), 1);
}

#[test]
fn evaluation_without_character_is_quiet() {
    let (store, _temp) = setup_store();
    let unlocked = evaluate(&store, at(2026, 3, 10, 12)).expect("evaluate");
    assert!(unlocked.is_empty());
    assert!(store.load_unlocked().unwrap().is_empty());
}

#[test]
fn missed_unlocks_are_recovered_by_a_later_scan() {
    let (store, _temp) = setup_store();
    create_hero(&store);

    // Five completions on one day written directly, as if the evaluator had
    // never run when they happened.
    for i in 0..5 {
        save_completed_quest(&store, &format!("Deed {}", i + 1), at(2026, 3, 10, 9 + i));
    }
    assert!(store.load_unlocked().unwrap().is_empty());

    let unlocked = evaluate(&store, at(2026, 3, 12, 8)).expect("catch-up scan");
    assert!(unlocked.contains(&"first_blood".to_string()));
    assert!(unlocked.contains(&"speed_runner".to_string()));
}

#[test]
fn streak_milestones_credit_summed_bonuses() {
    let (store, _temp) = setup_store();
    create_hero(&store);
    let xp_before = store.load_character().unwrap().unwrap().xp;

    let streak = UserStreak {
        current: 7,
        longest: 7,
        last_active: Some(at(2026, 3, 10, 0).date_naive()),
        ..UserStreak::default()
    };
    store.save_streak(&streak).unwrap();

    let unlocked = evaluate(&store, at(2026, 3, 10, 12)).expect("evaluate");
    assert!(unlocked.contains(&"consistent_soul".to_string()));
    assert!(unlocked.contains(&"week_warrior".to_string()));

    // Both tiers fire in one pass: 50 common + 150 rare, credited together.
    let xp_after = store.load_character().unwrap().unwrap().xp;
    assert_eq!(xp_after, xp_before + 200);
}

#[test]
fn level_milestone_unlocks_on_scan() {
    let (store, _temp) = setup_store();
    create_hero(&store);

    let mut hero = store.load_character().unwrap().unwrap();
    hero.grant_xp(1300);
    assert_eq!(hero.level, 5);
    store.save_character(&hero).unwrap();

    let unlocked = evaluate(&store, at(2026, 3, 10, 12)).expect("evaluate");
    assert_eq!(unlocked, vec!["awakening".to_string()]);
}

#[test]
fn first_message_unlocks_soul_seeker() {
    let (store, _temp) = setup_store();
    create_hero(&store);

    store
        .append_message(FutureSelfMessage::from_user(
            "Will it get easier?",
            at(2026, 3, 10, 21),
        ))
        .unwrap();

    let unlocked = evaluate(&store, at(2026, 3, 10, 21)).expect("evaluate");
    assert_eq!(unlocked, vec!["soul_seeker".to_string()]);
}

#[test]
fn unlock_records_carry_the_scan_timestamp() {
    let (store, _temp) = setup_store();
    create_hero(&store);
    save_completed_quest(&store, "The Stamp", at(2026, 3, 10, 9));

    let scanned_at = at(2026, 3, 11, 7);
    evaluate(&store, scanned_at).expect("evaluate");

    let unlocked = store.load_unlocked().unwrap();
    let record = unlocked
        .iter()
        .find(|u| u.id == "first_blood")
        .expect("first_blood unlocked");
    assert_eq!(record.unlocked_at, scanned_at);
}

#[test]
fn night_and_dawn_completions_unlock_timing_feats() {
    let (store, _temp) = setup_store();
    create_hero(&store);

    save_completed_quest(&store, "The Midnight Errand", at(2026, 3, 10, 2));
    let unlocked = evaluate(&store, at(2026, 3, 10, 3)).expect("evaluate");
    assert!(unlocked.contains(&"night_owl".to_string()));
    assert!(!unlocked.contains(&"early_bird".to_string()));

    save_completed_quest(&store, "The Dawn Patrol", at(2026, 3, 11, 5));
    let unlocked = evaluate(&store, at(2026, 3, 11, 6)).expect("evaluate");
    assert!(unlocked.contains(&"early_bird".to_string()));
}
