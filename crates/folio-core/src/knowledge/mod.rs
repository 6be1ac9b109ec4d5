//! Knowledge Store: the compiled-in, read-only portfolio record.
//!
//! ## Layout
//!
//! | Field            | Section it feeds      | Used by the responder for            |
//! |------------------|-----------------------|--------------------------------------|
//! | identity/contact | Hero, Contact         | identity, contact, location, hire    |
//! | `education`      | About                 | identity, education                  |
//! | `skills`         | Skills                | skills, ai/ml, backend, frontend ... |
//! | `experience`     | Experience            | experience                           |
//! | `projects`       | Projects              | projects                             |
//! | `achievements`   | Achievements          | achievements                         |
//! | `certifications` | Achievements          | achievements, certifications         |
//! | `stats`/`social` | About, Hero           | (page only)                          |
//!
//! The profile is built once per process and never mutated.

mod builtin;
mod record;

pub use record::{
    Certification, Contact, Education, Experience, Profile, Project, SkillCategory, SocialLink,
    Stat,
};

use once_cell::sync::Lazy;

static BUILTIN: Lazy<Profile> = Lazy::new(Profile::builtin);

/// The process-wide built-in profile.
pub fn profile() -> &'static Profile {
    &BUILTIN
}
