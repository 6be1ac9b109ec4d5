//! Profile record types.

use serde::Serialize;

/// The site owner, as shown on the page and quoted by the chat assistant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Profile {
    /// Full name, e.g. "Sujith S".
    pub name: String,
    /// First name used in conversational replies.
    pub short_name: String,
    pub title: String,
    pub location: String,
    pub contact: Contact,
    pub education: Education,
    /// One-paragraph hero description.
    pub summary: String,
    /// Ordered skill categories; order is the order replies list them in.
    pub skills: Vec<SkillCategory>,
    /// Most recent first. The first entry is treated as the current role.
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub achievements: Vec<String>,
    pub certifications: Vec<Certification>,
    /// About-section counter targets.
    pub stats: Vec<Stat>,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Education {
    pub program: String,
    pub institution: String,
    pub graduation_year: String,
    pub cgpa: String,
}

impl Education {
    /// "B.E. in Computer Science & Design, Karpagam College of Engineering (2026)".
    /// Empty parts are skipped rather than leaving dangling separators.
    pub fn summary(&self) -> String {
        let mut out = [self.program.as_str(), self.institution.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ");
        if !self.graduation_year.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&format!("({})", self.graduation_year));
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SkillCategory {
    /// Stable lookup key (`aiml`, `backend`, `frontend`, `cloud`, `languages`).
    pub key: String,
    /// Display label, e.g. "AI/ML".
    pub label: String,
    pub icon: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Experience {
    pub role: String,
    pub organization: String,
    pub location: String,
    pub period: String,
    pub current: bool,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub tech: Vec<String>,
    pub featured: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

impl Certification {
    /// "Java (Netstack)"; just the name when the issuer is unknown.
    pub fn label(&self) -> String {
        if self.issuer.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.issuer)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stat {
    pub label: String,
    pub value: f64,
    pub suffix: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

impl Profile {
    /// Skills listed under `key`; empty for an unknown category.
    pub fn skills_in(&self, key: &str) -> &[String] {
        self.skills
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.skills.as_slice())
            .unwrap_or(&[])
    }

    /// The current role (first experience entry), if any.
    pub fn current_role(&self) -> Option<&Experience> {
        self.experience.first()
    }

    pub fn certification_labels(&self) -> Vec<String> {
        self.certifications.iter().map(Certification::label).collect()
    }
}
