//! Reply templates. Every list interpolation degrades to an empty segment when the list is empty.

use super::Topic;
use crate::knowledge::{Experience, Profile};

/// "• a\n• b"; just the marker for an empty list.
fn bullets(items: &[String]) -> String {
    format!("• {}", items.join("\n• "))
}

fn current_role(p: &Profile) -> Experience {
    p.current_role().cloned().unwrap_or_default()
}

pub(super) fn render(topic: Topic, p: &Profile) -> String {
    let who = &p.short_name;
    match topic {
        Topic::Greeting => format!(
            "Hello! 👋 I'm {who}'s portfolio assistant. I can tell you about his skills, experience, projects, and achievements. What would you like to know?"
        ),
        Topic::NanbanFund => format!(
            "**Nanban Fund** is a comprehensive chit fund management platform featuring role-based access control for secure financial operations. Built with Node.js, MongoDB, and React, it showcases {who}'s full-stack capabilities in fintech applications."
        ),
        Topic::SpeakerDiarization => format!(
            "The **Speaker Diarization System** is an audio processing pipeline built for enterprise use. Using Python, PyAnnotate, and AWS Transcribe, it demonstrates {who}'s expertise in AI-powered audio analysis and cloud integration."
        ),
        Topic::Identity => format!(
            "{} is an {} based in {}. He's currently pursuing {} with a CGPA of {}. He specializes in building enterprise-grade AI solutions with LLM orchestration and agent systems.",
            p.name,
            p.title,
            p.location,
            p.education.summary(),
            p.education.cgpa
        ),
        Topic::Contact => format!(
            "You can reach {who} at:\n📧 Email: {}\n📱 Phone: {}\n\nHe's always open to discussing AI projects and collaboration opportunities!",
            p.contact.email, p.contact.phone
        ),
        Topic::Location => {
            let mut reply = format!("{who} is based in {} 🇮🇳.", p.location);
            if let Some(role) = p.current_role() {
                reply.push_str(&format!(
                    " He's currently working remotely as an {} at {}.",
                    role.role, role.organization
                ));
            }
            reply
        }
        Topic::Education => format!(
            "{who} is pursuing a {}. He maintains a strong CGPA of {}, demonstrating his academic excellence alongside practical industry experience.",
            p.education.summary(),
            p.education.cgpa
        ),
        Topic::Experience => {
            let exp = current_role(p);
            format!(
                "Currently, {who} works as an {} at {} ({}). His responsibilities include:\n{}\n\nHe's building cutting-edge AI solutions for enterprise applications!",
                exp.role,
                exp.organization,
                exp.period,
                bullets(&exp.highlights)
            )
        }
        Topic::AiMl => format!(
            "{who} specializes in AI/ML with expertise in:\n• {}\n\nHe builds enterprise AI solutions including LLM orchestration, agent systems, chatbots with function calling, and audio processing pipelines at {}.",
            p.skills_in("aiml").join(", "),
            current_role(p).organization
        ),
        Topic::Skills => {
            let lines = p
                .skills
                .iter()
                .map(|c| format!("{} {}: {}", c.icon, c.label, c.skills.join(", ")))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{who}'s technical expertise spans:\n\n{lines}\n\nHe's a true full-stack developer with AI specialization!"
            )
        }
        Topic::Projects => {
            let list = p
                .projects
                .iter()
                .map(|pr| format!("• **{}**: {} ({})", pr.name, pr.description, pr.tech.join(", ")))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "{who} has worked on several impressive projects:\n\n{list}\n\nWant to know more about any specific project?"
            )
        }
        Topic::Achievements => format!(
            "{who}'s notable achievements include:\n\n🏆 {}\n\nHe's also certified in {} from recognized institutions!",
            p.achievements.join("\n🏆 "),
            p.certification_labels().join(", ")
        ),
        Topic::Certifications => format!(
            "{who} holds certifications in:\n{}\n\nThese certifications from institutions like IIT Bombay and GUVI demonstrate his commitment to continuous learning.",
            bullets(&p.certification_labels())
        ),
        Topic::Languages => format!(
            "{who} is proficient in multiple programming languages:\n{}\n\nHis primary focus is Python for AI/ML and JavaScript/TypeScript for full-stack development.",
            p.skills_in("languages").join(", ")
        ),
        Topic::Backend => format!(
            "For backend development, {who} works with:\n{}\n\nHe builds scalable APIs, manages databases, and creates robust server-side solutions.",
            bullets(p.skills_in("backend"))
        ),
        Topic::Frontend => format!(
            "On the frontend, {who} works with:\n{}\n\nHe creates responsive, modern user interfaces with smooth animations and great user experience.",
            bullets(p.skills_in("frontend"))
        ),
        Topic::Cloud => format!(
            "{who} has experience with cloud platforms:\n{}\n\nHe uses cloud services for deployment, audio processing (AWS Transcribe), and building scalable applications.",
            bullets(p.skills_in("cloud"))
        ),
        Topic::Availability => format!(
            "{who} is always open to exciting opportunities in AI/ML and full-stack development! Currently interning at {}, he's building expertise in enterprise AI solutions.\n\n📧 Reach out: {}\n\nLet's discuss how he can contribute to your team!",
            current_role(p).organization,
            p.contact.email
        ),
        Topic::Help => format!(
            "I can help you learn about {who}! Try asking:\n• \"What are his skills?\"\n• \"Tell me about his projects\"\n• \"What's his work experience?\"\n• \"How can I contact him?\"\n• \"What are his achievements?\"\n• \"What AI technologies does he use?\""
        ),
    }
}

pub(super) fn fallback(p: &Profile) -> String {
    format!(
        "I'm not sure about that specific question, but I can tell you about {}'s skills, projects, experience, achievements, or how to contact him. What would you like to know?",
        p.short_name
    )
}

pub(super) fn welcome(p: &Profile) -> String {
    format!(
        "Hi! 👋 I'm {}'s AI assistant. Ask me anything about his skills, projects, or experience!",
        p.short_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_of_empty_list_is_bare_marker() {
        assert_eq!(bullets(&[]), "• ");
        assert_eq!(bullets(&["a".into(), "b".into()]), "• a\n• b");
    }

    #[test]
    fn experience_reply_lists_highlights_line_by_line() {
        let p = Profile::builtin();
        let reply = render(Topic::Experience, &p);
        assert!(reply.starts_with(
            "Currently, Sujith works as an AI Engineer Intern at Prayag.ai (Jun 2025 - Present)."
        ));
        assert!(reply.contains("\n• Agent systems development\n• Chatbot systems with function calling\n"));
    }

    #[test]
    fn location_reply_omits_role_sentence_without_experience() {
        let mut p = Profile::builtin();
        p.experience.clear();
        assert_eq!(
            render(Topic::Location, &p),
            "Sujith is based in Chennai, Tamil Nadu, India 🇮🇳."
        );
    }

    #[test]
    fn identity_reply_interpolates_education() {
        let reply = render(Topic::Identity, &Profile::builtin());
        assert!(reply.contains(
            "pursuing B.E. in Computer Science & Design, Karpagam College of Engineering (2026) with a CGPA of 8.05"
        ));
    }

    #[test]
    fn achievements_reply_mentions_certifications() {
        let reply = render(Topic::Achievements, &Profile::builtin());
        assert!(reply.contains("🏆 240+ LeetCode problems solved\n🏆 2nd Prize"));
        assert!(reply.contains("Java (Netstack), JavaScript (IIT Bombay), Python (GUVI), Intro to AI (Novitech)"));
    }
}
