//! folio-core: portfolio knowledge store, FAQ responder, and chat sessions.
//!
//! The gateway and any other front end share this public API; nothing here does I/O
//! beyond reading the optional config file.

mod chat;
mod knowledge;
mod responder;
mod shared;

// Shared
pub use shared::{CoreConfig, CONFIG_PATH_ENV};

// Knowledge Store
pub use knowledge::{
    profile, Certification, Contact, Education, Experience, Profile, Project, SkillCategory,
    SocialLink, Stat,
};

// Responder
pub use responder::{respond, rule_count, Responder, Topic};

// Chat
pub use chat::{ChatSession, Message, PendingReply, ReadyReply, Role, Transcript, TypingDelay};
