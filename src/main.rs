//! Binary entrypoint for the questlog CLI.
//!
//! Commands:
//! - `init` - create a starter `questlog.toml` and the data directory
//! - `hero create|show|bio` - manage your character
//! - `quest new|list|show|step|complete|abandon` - the quest lifecycle
//! - `journal` / `reflect` - the day-by-day chronicle of completed deeds
//! - `achievements` - catalog and unlock status
//! - `chat <message>` - talk to your future self
//! - `status` - daily overview with greeting, streak, and active quests
//! - `reset --yes` - wipe all progression state
//!
//! See the library crate docs for module-level details: `questlog::`.
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::info;
use uuid::Uuid;

use questlog::config::Config;
use questlog::engine::quest as quest_ops;
use questlog::engine::{
    class_lore, complete_quest, evaluate, level_from_total_xp, new_character, set_reflection,
    AchievementStore, AvatarConfig, CharacterClass, CharacterStore, FutureSelfMessage,
    JournalStore, MessageStore, Quest, QuestStore, SettingsStore, StreakStore,
};
use questlog::narrator::Narrator;
use questlog::storage::{QuestlogStore, QuestlogStoreBuilder};

#[derive(Parser)]
#[command(name = "questlog")]
#[command(about = "Turn real tasks into an RPG: quests, XP, streaks, achievements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "questlog.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter questlog.toml and initialize the data directory
    Init,
    /// Create, inspect, or re-chronicle your hero
    Hero {
        #[command(subcommand)]
        command: HeroCommands,
    },
    /// Forge, list, advance, and complete quests
    Quest {
        #[command(subcommand)]
        command: QuestCommands,
    },
    /// Show the chronicle of completed deeds, day by day
    Journal {
        /// Most recent days to show
        #[arg(short, long, default_value_t = 14)]
        days: usize,
    },
    /// Attach a reflection to today's journal entry
    Reflect {
        /// Reflection text
        text: String,
    },
    /// List the achievement catalog and unlock status
    Achievements,
    /// Exchange a message with your future self
    Chat {
        /// What you want to say
        message: String,
    },
    /// Daily overview: greeting, hero, streak, and active quests
    Status,
    /// Permanently erase all progression state
    Reset {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum HeroCommands {
    /// Create your hero (one per chronicle)
    Create {
        /// Hero name
        #[arg(long)]
        name: String,
        /// warrior | mage | rogue | scholar | creator
        #[arg(long)]
        class: String,
        /// Optional backstory, rewritten by the narrator into an origin story
        #[arg(long)]
        bio: Option<String>,
    },
    /// Show the character sheet
    Show,
    /// Rewrite the hero's backstory into an origin story
    Bio {
        /// Raw backstory text
        text: String,
    },
}

#[derive(Subcommand)]
enum QuestCommands {
    /// Forge a new quest from a real-world task
    New {
        /// The task, in plain words
        task: String,
    },
    /// List quests (active only by default)
    List {
        /// Include completed, failed, and abandoned quests
        #[arg(short, long)]
        all: bool,
    },
    /// Show one quest with its narrative and steps
    Show {
        /// Quest id (or unique prefix)
        quest: String,
    },
    /// Toggle a step by its number
    Step {
        /// Quest id (or unique prefix)
        quest: String,
        /// Step number as shown by `quest show` (1-based)
        step: usize,
    },
    /// Complete a quest and claim its rewards
    Complete {
        /// Quest id (or unique prefix)
        quest: String,
    },
    /// Abandon an active quest
    Abandon {
        /// Quest id (or unique prefix)
        quest: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes the default later)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Init => {
            info!("Initializing questlog configuration");
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);

            let config = Config::load(&cli.config).await?;
            let store = QuestlogStoreBuilder::new(&config.storage.data_dir)
                .without_catalog_seed()
                .open()?;
            let seeded = store.seed_catalog_if_needed()?;
            if seeded > 0 {
                info!("Seeded {} achievements", seeded);
            }
            println!("The chronicle awaits at {}.", config.storage.data_dir);
            println!("Create your hero with: questlog hero create --name <name> --class <class>");
        }
        Commands::Hero { command } => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;
            run_hero_command(command, &config, &store).await?;
        }
        Commands::Quest { command } => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;
            run_quest_command(command, &config, &store).await?;
        }
        Commands::Journal { days } => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;

            let mut journal = store.load_journal()?;
            if journal.is_empty() {
                println!("The chronicle is still blank. Complete a quest to begin it.");
                return Ok(());
            }
            journal.sort_by_key(|e| e.date);
            for entry in journal.iter().rev().take(days) {
                println!(
                    "{} — {} deed(s), {} xp",
                    entry.date, entry.quests_completed, entry.xp_gained
                );
                println!("  {}", entry.summary);
                if let Some(reflection) = &entry.reflection {
                    println!("  \"{}\"", reflection);
                }
            }
        }
        Commands::Reflect { text } => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;

            let mut journal = store.load_journal()?;
            let entry = set_reflection(&mut journal, Utc::now().date_naive(), &text)
                .map_err(|_| anyhow!("No deeds recorded today. Complete a quest first."))?;
            store.save_journal(&journal)?;
            println!("Reflection recorded for {}.", entry.date);
        }
        Commands::Achievements => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;

            let catalog = store.load_catalog()?;
            let unlocked = store.load_unlocked()?;
            for achievement in &catalog {
                match unlocked.iter().find(|u| u.id == achievement.id) {
                    Some(record) => println!(
                        "{} {} [{}] — {} (unlocked {})",
                        achievement.icon,
                        achievement.title,
                        achievement.rarity.label(),
                        achievement.description,
                        record.unlocked_at.format("%Y-%m-%d")
                    ),
                    None => println!(
                        "🔒 {} [{}] — {}",
                        achievement.title,
                        achievement.rarity.label(),
                        achievement.condition
                    ),
                }
            }
            println!("{}/{} unlocked", unlocked.len(), catalog.len());
        }
        Commands::Chat { message } => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;

            let hero = store.require_character()?;
            let history = store.load_messages()?;
            let quests = store.load_quests()?;
            let recent: Vec<Quest> = quests.iter().rev().take(5).cloned().collect();
            let streak = store.load_streak()?;
            let settings = store.load_settings()?;

            let narrator = Narrator::new(config.narrator.clone());
            let reply = narrator
                .future_self_reply(&message, &hero, &recent, &streak, &history, &settings)
                .await;

            let now = Utc::now();
            store.append_message(FutureSelfMessage::from_user(&message, now))?;
            store.append_message(FutureSelfMessage::from_future_self(
                &reply.content,
                reply.mood,
                now,
            ))?;

            println!("{}:", settings.future_self_name);
            println!("{}", reply.content);

            let unlocked = evaluate(&store, now)?;
            print_unlocks(&store, &unlocked)?;
        }
        Commands::Status => {
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;

            let hero = store.require_character()?;
            let streak = store.load_streak()?;
            let quests = store.load_quests()?;
            let today = Utc::now().date_naive();
            let active: Vec<&Quest> = quests.iter().filter(|q| q.is_active()).collect();
            let completed_today = quests
                .iter()
                .filter(|q| q.completed_at.map(|t| t.date_naive()) == Some(today))
                .count();

            let narrator = Narrator::new(config.narrator.clone());
            let greeting = narrator.daily_opening(&hero, active.len(), &streak).await;
            println!("{}", greeting);
            println!();

            let progress = level_from_total_xp(hero.xp);
            println!(
                "{} — Level {} {} | {}/{} xp | {} gold",
                hero.name,
                hero.level,
                hero.class.label(),
                progress.xp_within_level,
                progress.xp_to_next_level,
                hero.gold
            );
            println!(
                "Streak: {} day(s) (longest {})",
                streak.current, streak.longest
            );
            println!(
                "Active quests: {} | Completed today: {}",
                active.len(),
                completed_today
            );
            for quest in active.iter().take(5) {
                println!("  {}  {}", short_id(&quest.id), quest.quest_title);
            }
        }
        Commands::Reset { yes } => {
            if !yes {
                println!(
                    "This permanently erases your hero, quests, streak, journal, and achievements."
                );
                println!("Run again with --yes to confirm.");
                return Ok(());
            }
            let config = require_config(pre_config, &cli.config).await?;
            let store = QuestlogStore::open(&config.storage.data_dir)?;
            store.clear_all()?;
            info!("all progression state cleared");
            println!("The chronicle is blank. A new legend may begin.");
        }
    }

    Ok(())
}

async fn run_hero_command(
    command: HeroCommands,
    config: &Config,
    store: &QuestlogStore,
) -> Result<()> {
    match command {
        HeroCommands::Create { name, class, bio } => {
            if store.load_character()?.is_some() {
                return Err(anyhow!(
                    "A hero already exists. Run `questlog reset --yes` to start over."
                ));
            }
            let class = CharacterClass::parse(&class).ok_or_else(|| {
                anyhow!(
                    "Unknown class '{}'. Choose warrior, mage, rogue, scholar, or creator.",
                    class
                )
            })?;

            let narrator = Narrator::new(config.narrator.clone());
            let bio_text = match bio {
                Some(raw) => narrator.rewrite_bio(&name, class, &raw).await,
                None => String::new(),
            };

            let hero = new_character(&name, class, AvatarConfig::default(), &bio_text, Utc::now());
            store.save_character(&hero)?;
            store.set_onboarding_complete(true)?;
            info!("hero created: {} the {}", hero.name, class.label());

            println!("{} the {} enters the realm.", hero.name, class.label());
            println!("{}", class_lore(class));
            if !hero.bio.is_empty() {
                println!();
                println!("{}", hero.bio);
            }
        }
        HeroCommands::Show => {
            let hero = store.require_character()?;
            let unlocked = store.load_unlocked()?;
            let catalog = store.load_catalog()?;
            let progress = level_from_total_xp(hero.xp);

            println!("{} — Level {} {}", hero.name, hero.level, hero.class.label());
            println!(
                "XP: {}/{} toward next level ({} lifetime)",
                progress.xp_within_level, progress.xp_to_next_level, hero.xp
            );
            println!("Gold: {}", hero.gold);
            println!(
                "STR {}  INT {}  AGI {}  CRE {}  CHA {}  WIS {}",
                hero.stats.strength,
                hero.stats.intelligence,
                hero.stats.agility,
                hero.stats.creativity,
                hero.stats.charisma,
                hero.stats.wisdom
            );
            println!("Achievements: {}/{}", unlocked.len(), catalog.len());
            if !hero.bio.is_empty() {
                println!();
                println!("{}", hero.bio);
            }
        }
        HeroCommands::Bio { text } => {
            let mut hero = store.require_character()?;
            let narrator = Narrator::new(config.narrator.clone());
            hero.bio = narrator.rewrite_bio(&hero.name, hero.class, &text).await;
            store.save_character(&hero)?;
            println!("{}", hero.bio);
        }
    }
    Ok(())
}

async fn run_quest_command(
    command: QuestCommands,
    config: &Config,
    store: &QuestlogStore,
) -> Result<()> {
    match command {
        QuestCommands::New { task } => {
            let hero = store.require_character()?;
            let narrator = Narrator::new(config.narrator.clone());
            let seed = narrator.forge_quest_seed(&task, &hero).await;
            let quest = quest_ops::forge_quest(&task, seed, Utc::now());
            store.save_quest(&quest)?;

            println!("⚔  {}", quest.quest_title);
            println!("{}", quest.narrative);
            println!(
                "{} | {} | {} xp | {} gold",
                quest.difficulty.label(),
                quest.category.label(),
                quest.xp_reward,
                quest.gold_reward
            );
            for (index, step) in quest.steps.iter().enumerate() {
                println!("  {}. [ ] {}", index + 1, step.description);
            }
            if !quest.companions.is_empty() {
                println!("Companions: {}", quest.companions.join(", "));
            }
            println!("id: {}", short_id(&quest.id));
        }
        QuestCommands::List { all } => {
            let quests = store.load_quests()?;
            let visible: Vec<&Quest> = quests
                .iter()
                .filter(|q| all || q.is_active())
                .collect();
            if visible.is_empty() {
                println!("No quests here. Forge one with: questlog quest new \"<task>\"");
                return Ok(());
            }
            for quest in visible {
                let marker = match quest.status {
                    questlog::engine::QuestStatus::Active => "[ ]",
                    questlog::engine::QuestStatus::Completed => "[x]",
                    questlog::engine::QuestStatus::Failed => "[!]",
                    questlog::engine::QuestStatus::Abandoned => "[-]",
                };
                println!(
                    "{} {}  {}  ({}, {} xp)",
                    marker,
                    short_id(&quest.id),
                    quest.quest_title,
                    quest.difficulty.label(),
                    quest.xp_reward
                );
            }
        }
        QuestCommands::Show { quest } => {
            let quests = store.load_quests()?;
            let quest = resolve_quest(&quests, &quest)?;

            println!("⚔  {} ({})", quest.quest_title, quest.status.label());
            println!("{}", quest.narrative);
            println!(
                "{} | {} | {} xp | {} gold",
                quest.difficulty.label(),
                quest.category.label(),
                quest.xp_reward,
                quest.gold_reward
            );
            for (index, step) in quest.steps.iter().enumerate() {
                let mark = if step.completed { "x" } else { " " };
                println!("  {}. [{}] {}", index + 1, mark, step.description);
            }
            if !quest.tags.is_empty() {
                println!("Tags: {}", quest.tags.join(", "));
            }
            if !quest.companions.is_empty() {
                println!("Companions: {}", quest.companions.join(", "));
            }
            if let Some(completed_at) = quest.completed_at {
                println!("Completed {}", completed_at.format("%Y-%m-%d %H:%M UTC"));
            }
        }
        QuestCommands::Step { quest, step } => {
            let quests = store.load_quests()?;
            let mut quest = resolve_quest(&quests, &quest)?;

            let step_id = step
                .checked_sub(1)
                .and_then(|index| quest.steps.get(index))
                .map(|s| s.id)
                .ok_or_else(|| {
                    anyhow!("Quest '{}' has no step {}", quest.quest_title, step)
                })?;

            let done = quest_ops::toggle_step(&mut quest, step_id)?;
            store.save_quest(&quest)?;

            let description = &quest.steps[step - 1].description;
            if done {
                println!("Step {} complete: {}", step, description);
            } else {
                println!("Step {} reopened: {}", step, description);
            }
            if quest.all_steps_complete() {
                println!(
                    "All steps complete. Claim your rewards with: questlog quest complete {}",
                    short_id(&quest.id)
                );
            }
        }
        QuestCommands::Complete { quest } => {
            let quests = store.load_quests()?;
            let quest = resolve_quest(&quests, &quest)?;

            let outcome = complete_quest(store, quest.id, Utc::now())?;

            println!(
                "VICTORY! \"{}\" is etched into the chronicles.",
                outcome.quest.quest_title
            );
            println!(
                "+{} xp  +{} gold  (streak: {} day(s))",
                outcome.xp_awarded, outcome.gold_awarded, outcome.streak.current
            );
            if outcome.leveled_up {
                println!("LEVEL UP! You are now level {}.", outcome.character.level);
            }
            print_unlocks(store, &outcome.unlocked)?;
        }
        QuestCommands::Abandon { quest } => {
            let quests = store.load_quests()?;
            let mut quest = resolve_quest(&quests, &quest)?;
            quest_ops::abandon(&mut quest)?;
            store.save_quest(&quest)?;
            println!("The quest \"{}\" fades into the mist.", quest.quest_title);
        }
    }
    Ok(())
}

async fn require_config(pre_config: Option<Config>, path: &str) -> Result<Config> {
    match pre_config {
        Some(config) => Ok(config),
        None => Config::load(path)
            .await
            .map_err(|e| anyhow!("{}. Run `questlog init` first.", e)),
    }
}

/// Match a quest by id prefix. Ambiguity is an error rather than a guess.
fn resolve_quest(quests: &[Quest], needle: &str) -> Result<Quest> {
    let needle = needle.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Err(anyhow!("Empty quest id"));
    }
    let matches: Vec<&Quest> = quests
        .iter()
        .filter(|q| q.id.to_string().starts_with(&needle))
        .collect();
    match matches.len() {
        0 => Err(anyhow!("No quest matches '{}'", needle)),
        1 => Ok(matches[0].clone()),
        n => Err(anyhow!(
            "'{}' matches {} quests; use more of the id",
            needle,
            n
        )),
    }
}

fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn print_unlocks(store: &QuestlogStore, unlocked: &[String]) -> Result<()> {
    if unlocked.is_empty() {
        return Ok(());
    }
    let catalog = store.load_catalog()?;
    for id in unlocked {
        if let Some(achievement) = catalog.iter().find(|a| &a.id == id) {
            println!(
                "{} Achievement unlocked: {} (+{} xp)",
                achievement.icon, achievement.title, achievement.xp_bonus
            );
        }
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if verbosity == 0 {
        if let Some(cfg) = config {
            if let Ok(level) = cfg.logging.level.parse::<log::LevelFilter>() {
                builder.filter_level(level);
            }
        }
    }

    let log_file = config.as_ref().and_then(|cfg| cfg.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            let write_mutex = mutex.clone();

            // Mirror to the console only when stdout is a terminal
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        } else {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
