//! Narrator module for LLM-generated quest framing and future-self dialogue
//!
//! Talks to a Groq-hosted chat-completions endpoint. Every operation is
//! infallible from the caller's point of view: a missing key, timeout, HTTP
//! failure, or unparseable reply degrades to a fixed deterministic fallback
//! so quest creation and chat never block on the collaborator.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::json;

#[cfg(feature = "narrator")]
use std::time::Duration;
#[cfg(feature = "narrator")]
use tokio::time::timeout;

use crate::config::NarratorConfig;
use crate::engine::quest::{fallback_seed, QuestSeed};
use crate::engine::types::{
    Character, CharacterClass, FutureSelfMessage, MessageRole, Mood, Quest, UserSettings,
    UserStreak,
};
use crate::logutil::escape_log;

/// Chat-completions response slice we care about.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

/// Reply payload for future-self dialogue.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FutureSelfReply {
    pub content: String,
    #[serde(default)]
    pub mood: Mood,
}

/// Narration service for quest forging, future-self dialogue, daily
/// greetings, and bio rewriting.
pub struct Narrator {
    config: NarratorConfig,
    #[cfg(feature = "narrator")]
    client: reqwest::Client,
}

impl Narrator {
    /// Create a new narrator with the given configuration
    pub fn new(config: NarratorConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "narrator")]
            client: reqwest::Client::new(),
        }
    }

    /// Check if the service is properly configured
    pub fn is_configured(&self) -> bool {
        self.config.enabled && !self.config.api_key.is_empty()
    }

    /// Forge a quest seed from a raw task. The narrator decides title,
    /// narrative, difficulty, category, rewards, and steps; on any failure
    /// the deterministic fallback seed is returned instead.
    pub async fn forge_quest_seed(&self, input: &str, character: &Character) -> QuestSeed {
        if !self.is_configured() {
            debug!("narrator not configured, using fallback quest seed");
            return fallback_seed(input);
        }

        let system_prompt = format!(
            "You are an epic dark fantasy RPG quest designer. \
             Transform mundane user tasks into immersive, high-stakes quests.\n\n\
             User Task: \"{input}\"\n\
             Character Context: {name}, Level {level} {class}.\n\n\
             Output ONLY a valid JSON object with the following structure:\n\
             {{\n\
               \"questTitle\": \"An epic title for the task\",\n\
               \"questNarrative\": \"A 2-3 sentence immersive narrative in fantasy tone matching the character's class/level\",\n\
               \"difficulty\": \"trivial\" | \"easy\" | \"medium\" | \"hard\" | \"legendary\",\n\
               \"category\": \"health\" | \"career\" | \"learning\" | \"social\" | \"creative\" | \"personal\" | \"finance\",\n\
               \"xpReward\": number,\n\
               \"goldReward\": number,\n\
               \"steps\": [{{\"description\": \"step 1\"}}, {{\"description\": \"step 2\"}}],\n\
               \"tags\": [\"tag1\", \"tag2\"],\n\
               \"companions\": [\"habit or tool suggestion 1\", \"companion 2\"]\n\
             }}\n\n\
             Rules:\n\
             1. Match difficulty to the complexity of \"{input}\".\n\
             2. Generate 3-7 actionable subtasks (steps).\n\
             3. Narrative must feel like a grimoire or medieval chronicle.\n\
             4. XP rewards: trivial=25, easy=75, medium=150, hard=300, legendary=750.\n\
             5. Gold rewards: approximately 30% of XP reward.",
            input = input,
            name = character.name,
            level = character.level,
            class = character.class.label(),
        );

        let messages = json!([
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": input },
        ]);

        match self.chat(messages, true, None, None).await {
            Ok(content) => match serde_json::from_str::<QuestSeed>(&content) {
                Ok(seed) => {
                    debug!("narrator forged quest: {}", escape_log(&seed.quest_title));
                    seed
                }
                Err(err) => {
                    warn!("narrator returned unusable quest JSON: {}", err);
                    fallback_seed(input)
                }
            },
            Err(err) => {
                warn!("quest narration failed: {}", err);
                fallback_seed(input)
            }
        }
    }

    /// Answer one message in the future-self correspondence.
    pub async fn future_self_reply(
        &self,
        message: &str,
        character: &Character,
        recent_quests: &[Quest],
        streak: &UserStreak,
        history: &[FutureSelfMessage],
        settings: &UserSettings,
    ) -> FutureSelfReply {
        let fallback = FutureSelfReply {
            content: "The temporal echoes are distorted. Stay the course, my friend.".to_string(),
            mood: Mood::Wise,
        };

        if !self.is_configured() {
            debug!("narrator not configured, using fallback future-self reply");
            return fallback;
        }

        let quest_digest: Vec<serde_json::Value> = recent_quests
            .iter()
            .map(|q| json!({ "title": q.quest_title, "status": q.status.label() }))
            .collect();

        let system_prompt = format!(
            "You ARE {future_name}, the user's future self from 10 years in the future. \
             You are speaking directly to your past self (@{name}).\n\n\
             Personality: {personality}\n\
             User Class: {class} (Level {level})\n\
             Current Streak: {streak} days\n\
             Recent Quests: {quests}\n\n\
             Guidelines:\n\
             1. Reference actual quest data provided. Be personal.\n\
             2. Adapt mood: celebrating wins, gently challenging failures, offering wisdom.\n\
             3. Use the character's class mythology (e.g., if Mage, mention spells or mana; if Warrior, mention battles).\n\
             4. Keep responses 2-4 paragraphs, conversational and deeply personal.\n\
             5. NEVER break character. NEVER say \"as an AI.\"\n\
             6. Detect emotional state from message and adjust tone accordingly.\n\n\
             Mood Options: \"encouraging\" | \"wise\" | \"urgent\" | \"celebratory\" | \"reflective\"\n\n\
             Output ONLY a JSON object:\n\
             {{\n\
               \"content\": \"your response text\",\n\
               \"mood\": \"one of the options above\"\n\
             }}",
            future_name = settings.future_self_name,
            name = character.name,
            personality = settings.future_self_personality,
            class = character.class.label(),
            level = character.level,
            streak = streak.current,
            quests = serde_json::to_string(&quest_digest).unwrap_or_else(|_| "[]".to_string()),
        );

        let mut messages = vec![json!({ "role": "system", "content": system_prompt })];
        let tail = history.len().saturating_sub(5);
        for turn in &history[tail..] {
            let role = match turn.role {
                MessageRole::User => "user",
                MessageRole::FutureSelf => "assistant",
            };
            messages.push(json!({ "role": role, "content": turn.content }));
        }
        messages.push(json!({ "role": "user", "content": message }));

        match self.chat(serde_json::Value::Array(messages), true, None, None).await {
            Ok(content) => match serde_json::from_str::<FutureSelfReply>(&content) {
                Ok(reply) => reply,
                Err(err) => {
                    warn!("narrator returned unusable future-self JSON: {}", err);
                    fallback
                }
            },
            Err(err) => {
                warn!("future-self narration failed: {}", err);
                fallback
            }
        }
    }

    /// Short morning greeting for the status screen.
    pub async fn daily_opening(
        &self,
        character: &Character,
        todays_quest_count: usize,
        streak: &UserStreak,
    ) -> String {
        let fallback = "A new day begins. The stars are in your favor.".to_string();

        if !self.is_configured() {
            return fallback;
        }

        let system_prompt = format!(
            "You are the user's future self. Write a short (1-2 sentence) motivating \
             morning greeting. Reference the character's class ({class}) and the number \
             of quests today ({count}). Their streak is {streak} days. \
             Keep it mystical and encouraging.",
            class = character.class.label(),
            count = todays_quest_count,
            streak = streak.current,
        );

        let messages = json!([{ "role": "system", "content": system_prompt }]);

        match self.chat(messages, false, None, None).await {
            Ok(content) => content.trim().to_string(),
            Err(err) => {
                warn!("daily greeting narration failed: {}", err);
                fallback
            }
        }
    }

    /// Rewrite a plain bio into a 2-3 sentence origin story for the class.
    pub async fn rewrite_bio(&self, name: &str, class: CharacterClass, bio: &str) -> String {
        let fallback = "A mysterious fog obscures the hero's past.".to_string();

        if !self.is_configured() {
            return fallback;
        }

        let system_prompt = format!(
            "You are a legendary chronicler in a dark fantasy RPG world. \
             Your task is to take a user's basic background story (bio) and rewrite it \
             into a short, epic, 2-3 sentence \"Origin Story\" that fits their Character Class. \
             Keep the character's name and core facts, but make it sound like a legend.\n\
             NAME: {name}\n\
             CLASS: {class}\n\n\
             Output ONLY the rewritten bio text. Do not add quotes or introduction.",
            name = name,
            class = class.label(),
        );

        let user_bio = if bio.is_empty() {
            "A traveler from a distant land."
        } else {
            bio
        };

        let messages = json!([
            { "role": "system", "content": system_prompt },
            { "role": "user", "content": user_bio },
        ]);

        match self.chat(messages, false, Some(0.7), Some(150)).await {
            Ok(content) => content.trim().to_string(),
            Err(err) => {
                warn!("bio narration failed: {}", err);
                fallback
            }
        }
    }

    /// Send one chat-completions request and return the first choice's text.
    #[cfg(feature = "narrator")]
    async fn chat(
        &self,
        messages: serde_json::Value,
        json_mode: bool,
        temperature: Option<f64>,
        max_tokens: Option<u32>,
    ) -> anyhow::Result<String> {
        use anyhow::anyhow;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut body = json!({
            "model": self.config.model,
            "messages": messages,
        });
        if json_mode {
            body["response_format"] = json!({ "type": "json_object" });
        }
        if let Some(temperature) = temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }

        debug!("narrator request to {}", url);
        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body);
        let timeout_duration = Duration::from_secs(self.config.timeout_seconds as u64);

        let response = timeout(timeout_duration, request.send())
            .await
            .map_err(|_| anyhow!("request timeout after {}s", self.config.timeout_seconds))?
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(anyhow!("API returned status: {}", response.status()));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| anyhow!("failed to parse JSON response: {}", e))?;

        chat.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("response contained no choices"))
    }

    #[cfg(not(feature = "narrator"))]
    async fn chat(
        &self,
        _messages: serde_json::Value,
        _json_mode: bool,
        _temperature: Option<f64>,
        _max_tokens: Option<u32>,
    ) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("narrator support not compiled in"))
    }
}
