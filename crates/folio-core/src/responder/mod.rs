//! FAQ responder: classifies a free-text question into a [`Topic`] and renders the canned reply.
//!
//! Classification is first-match-wins over an ordered rule table. Order matters: a query
//! mentioning both "hire" and "available" is a `Contact` question, never `Availability`.

mod replies;

use crate::knowledge::{self, Profile};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;

/// Canned answer categories, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Greeting,
    NanbanFund,
    Identity,
    Contact,
    Location,
    Education,
    Experience,
    AiMl,
    Skills,
    Projects,
    SpeakerDiarization,
    Achievements,
    Certifications,
    Languages,
    Backend,
    Frontend,
    Cloud,
    Availability,
    Help,
}

impl Topic {
    /// Every topic in the order the classifier tests them.
    pub const ALL: [Topic; 19] = [
        Topic::Greeting,
        Topic::NanbanFund,
        Topic::Identity,
        Topic::Contact,
        Topic::Location,
        Topic::Education,
        Topic::Experience,
        Topic::AiMl,
        Topic::Skills,
        Topic::Projects,
        Topic::SpeakerDiarization,
        Topic::Achievements,
        Topic::Certifications,
        Topic::Languages,
        Topic::Backend,
        Topic::Frontend,
        Topic::Cloud,
        Topic::Availability,
        Topic::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Greeting => "greeting",
            Topic::NanbanFund => "nanban_fund",
            Topic::SpeakerDiarization => "speaker_diarization",
            Topic::Identity => "identity",
            Topic::Contact => "contact",
            Topic::Location => "location",
            Topic::Education => "education",
            Topic::Experience => "experience",
            Topic::AiMl => "ai_ml",
            Topic::Skills => "skills",
            Topic::Projects => "projects",
            Topic::Achievements => "achievements",
            Topic::Certifications => "certifications",
            Topic::Languages => "languages",
            Topic::Backend => "backend",
            Topic::Frontend => "frontend",
            Topic::Cloud => "cloud",
            Topic::Availability => "availability",
            Topic::Help => "help",
        }
    }

    /// Pattern tested against the lower-cased, trimmed query. Unanchored unless it starts with `^`.
    fn pattern(&self) -> &'static str {
        match self {
            Topic::Greeting => r"^(hi|hello|hey|howdy|greetings)",
            Topic::NanbanFund => r"nanban|fund|chit",
            Topic::SpeakerDiarization => r"speaker|diarization|audio",
            Topic::Identity => r"who (is|are)|your name|about (you|sujith)|tell me about",
            Topic::Contact => r"contact|email|phone|reach|hire|connect",
            Topic::Location => r"where|location|based|live|from",
            Topic::Education => r"education|study|college|university|degree|cgpa|gpa",
            Topic::Experience => r"work|job|experience|current|prayag|intern|doing now",
            Topic::AiMl => r"ai|ml|machine learning|llm|agent|openai|gpt",
            Topic::Skills => r"skill|tech|stack|know|expertise|proficient",
            Topic::Projects => r"project|built|create|portfolio|work on|developed",
            Topic::Achievements => r"achieve|award|accomplish|leetcode|competition|hackathon",
            Topic::Certifications => r"certif|course|learn",
            Topic::Languages => r"language|programming|code in",
            Topic::Backend => r"backend|server|api|database|mongo|neo4j",
            Topic::Frontend => r"frontend|ui|react|web|design",
            Topic::Cloud => r"cloud|aws|azure|deploy",
            Topic::Availability => r"hire|available|freelance|opportunity|open to",
            Topic::Help => r"help|can you|what can",
        }
    }
}

struct Rule {
    topic: Topic,
    pattern: Regex,
}

static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    Topic::ALL
        .iter()
        .map(|&topic| Rule {
            topic,
            pattern: Regex::new(topic.pattern()).expect("topic pattern compiles"),
        })
        .collect()
});

/// Number of compiled rules; forces compilation (used by the gateway pre-flight check).
pub fn rule_count() -> usize {
    RULES.len()
}

/// Maps questions to canned replies built from a [`Profile`].
#[derive(Debug, Clone)]
pub struct Responder {
    profile: Arc<Profile>,
}

impl Responder {
    pub fn new(profile: Arc<Profile>) -> Self {
        Self { profile }
    }

    /// Responder over the compiled-in profile.
    pub fn builtin() -> Self {
        Self::new(Arc::new(knowledge::profile().clone()))
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// First topic whose pattern matches the normalized query; `None` means fallback.
    pub fn classify(&self, query: &str) -> Option<Topic> {
        let normalized = normalize(query);
        RULES
            .iter()
            .find(|rule| rule.pattern.is_match(&normalized))
            .map(|rule| rule.topic)
    }

    /// Canned reply for `query`. Total: every input yields either a topic reply or the fallback.
    pub fn respond(&self, query: &str) -> String {
        let topic = self.classify(query);
        tracing::debug!(
            target: "folio::responder",
            topic = topic.map(|t| t.as_str()).unwrap_or("fallback"),
            query_chars = query.chars().count(),
            "classified query"
        );
        match topic {
            Some(topic) => replies::render(topic, &self.profile),
            None => replies::fallback(&self.profile),
        }
    }

    /// Opening assistant line shown before the user has typed anything.
    pub fn welcome(&self) -> String {
        replies::welcome(&self.profile)
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Reply for `query` over the built-in profile.
pub fn respond(query: &str) -> String {
    static BUILTIN: Lazy<Responder> = Lazy::new(Responder::builtin);
    BUILTIN.respond(query)
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}
