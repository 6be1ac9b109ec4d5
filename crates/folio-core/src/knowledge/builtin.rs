//! Compiled-in profile data.

use super::record::{
    Certification, Contact, Education, Experience, Profile, Project, SkillCategory, SocialLink,
    Stat,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn category(key: &str, label: &str, icon: &str, skills: &[&str]) -> SkillCategory {
    SkillCategory {
        key: key.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        skills: strings(skills),
    }
}

fn project(name: &str, description: &str, tech: &[&str], featured: bool) -> Project {
    Project {
        name: name.to_string(),
        description: description.to_string(),
        tech: strings(tech),
        featured,
    }
}

fn certification(name: &str, issuer: &str, date: &str) -> Certification {
    Certification {
        name: name.to_string(),
        issuer: issuer.to_string(),
        date: date.to_string(),
    }
}

fn stat(label: &str, value: f64, suffix: &str, decimals: u8) -> Stat {
    Stat {
        label: label.to_string(),
        value,
        suffix: suffix.to_string(),
        decimals,
    }
}

impl Profile {
    /// The site owner's profile as published on the page.
    pub fn builtin() -> Self {
        Self {
            name: "Sujith S".into(),
            short_name: "Sujith".into(),
            title: "AI Engineer | Full-Stack Developer".into(),
            location: "Chennai, Tamil Nadu, India".into(),
            contact: Contact {
                email: "sujipjk03@gmail.com".into(),
                phone: "+91 6369817127".into(),
            },
            education: Education {
                program: "B.E. in Computer Science & Design".into(),
                institution: "Karpagam College of Engineering".into(),
                graduation_year: "2026".into(),
                cgpa: "8.05".into(),
            },
            summary: "Building enterprise-grade AI solutions with LLM orchestration, agent systems, and cloud-native technologies.".into(),
            skills: vec![
                category(
                    "aiml",
                    "AI/ML",
                    "🤖",
                    &["Python", "FastAPI", "OpenAI API", "AgentSDK", "PyAnnotate"],
                ),
                category("backend", "Backend", "⚙️", &["FastAPI", "MongoDB", "Neo4j", "Node.js"]),
                category("frontend", "Frontend", "🎨", &["React", "HTML", "CSS", "JavaScript"]),
                category("cloud", "Cloud", "☁️", &["AWS", "Azure Services"]),
                category(
                    "languages",
                    "Languages",
                    "💻",
                    &["Java", "C", "Python", "HTML", "SQL", "JavaScript"],
                ),
            ],
            experience: vec![
                Experience {
                    role: "AI Engineer Intern".into(),
                    organization: "Prayag.ai".into(),
                    location: "Remote".into(),
                    period: "Jun 2025 - Present".into(),
                    current: true,
                    highlights: strings(&[
                        "Agent systems development",
                        "Chatbot systems with function calling",
                        "MCP servers in FastAPI",
                        "Audio processing pipelines",
                    ]),
                },
                Experience {
                    role: "Internship".into(),
                    organization: "Navabharathi Computers".into(),
                    location: "Chennai, India".into(),
                    period: "Sep 2023".into(),
                    current: false,
                    highlights: strings(&[
                        "Hands-on experience with computer systems and networking",
                        "Software troubleshooting and client support",
                        "Enterprise IT infrastructure management",
                    ]),
                },
            ],
            projects: vec![
                project(
                    "Nanban Fund",
                    "Chit fund management platform with role-based access control",
                    &["Node.js", "MongoDB", "React"],
                    true,
                ),
                project(
                    "Speaker Diarization System",
                    "Audio processing pipeline for enterprise",
                    &["Python", "PyAnnotate", "AWS Transcribe"],
                    true,
                ),
                project(
                    "Short-Film Platform",
                    "Filmmaker & production house connection platform",
                    &["MERN Stack"],
                    false,
                ),
                project(
                    "Salary Prediction",
                    "Data-driven ML model for salary prediction",
                    &["Python", "Scikit-learn"],
                    false,
                ),
                project(
                    "Greenly",
                    "Carbon emissions calculator for sustainability",
                    &["HTML", "CSS", "JavaScript"],
                    false,
                ),
            ],
            achievements: strings(&[
                "240+ LeetCode problems solved",
                "2nd Prize in UI Design Competition (50+ competitors)",
                "Led 5-member hackathon team for environmental sustainability project",
            ]),
            certifications: vec![
                certification("Java", "Netstack", "Oct 2024"),
                certification("JavaScript", "IIT Bombay", "Mar 2024"),
                certification("Python", "GUVI", "Oct 2023"),
                certification("Intro to AI", "Novitech", "Jul 2023"),
            ],
            stats: vec![
                stat("LeetCode Problems", 240.0, "+", 0),
                stat("CGPA", 8.05, "", 2),
                stat("Projects Built", 10.0, "+", 0),
                stat("Tech Stack", 15.0, "+", 0),
            ],
            social: vec![
                SocialLink {
                    label: "GitHub".into(),
                    url: "https://github.com/sujith".into(),
                },
                SocialLink {
                    label: "LinkedIn".into(),
                    url: "https://linkedin.com/in/sujith".into(),
                },
                SocialLink {
                    label: "LeetCode".into(),
                    url: "https://leetcode.com/sujith".into(),
                },
            ],
        }
    }
}
