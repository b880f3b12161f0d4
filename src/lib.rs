//! # Questlog - Turn Real Tasks into an RPG
//!
//! Questlog is a personal productivity RPG for the terminal: real-world tasks
//! become narrated quests, completing them grants XP, gold, and streak
//! bonuses, and long-term consistency unlocks achievements. All progression
//! state lives in an embedded sled database; narrative text comes from an
//! optional LLM narrator that degrades to deterministic fallbacks when no API
//! key is configured.
//!
//! ## Features
//!
//! - **Progression Engine**: Deterministic leveling curve, difficulty- and
//!   streak-scaled rewards, per-day journal rollups, and a 19-entry
//!   achievement catalog evaluated by re-scan.
//! - **Streak Tracking**: Calendar-day continuity machine (UTC), idempotent
//!   within a day, hard reset after a missed day.
//! - **LLM Narration**: Quest forging, future-self dialogue, daily greetings,
//!   and bio rewriting over a Groq-compatible chat API, never blocking on
//!   failure.
//! - **Embedded Persistence**: One sled key per aggregate, bincode-encoded
//!   records with schema versions, typed defaults for anything missing.
//! - **Async Design**: Built with Tokio; only the narrator ever touches the
//!   network.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use questlog::engine::CharacterStore;
//! use questlog::storage::QuestlogStore;
//!
//! fn main() -> anyhow::Result<()> {
//!     let store = QuestlogStore::open("./data")?;
//!     if let Some(hero) = store.load_character()? {
//!         println!("{} is level {}", hero.name, hero.level);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - Progression rules: leveling, rewards, streaks, journal,
//!   achievements, and the completion orchestrator
//! - [`storage`] - Sled-backed persistence implementing the engine's store
//!   traits
//! - [`narrator`] - LLM text generation with deterministic fallbacks
//! - [`config`] - Configuration management
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   CLI (main)    │ ← Commands and presentation
//! └─────────────────┘
//!          │
//! ┌─────────────────┐     ┌─────────────────┐
//! │   Progression   │ ──► │    Narrator     │ ← LLM, fallback-first
//! │   Engine        │     └─────────────────┘
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Sled Store    │ ← One key per aggregate
//! └─────────────────┘
//! ```

pub mod config;
pub mod engine;
pub mod logutil;
pub mod narrator;
pub mod storage;
