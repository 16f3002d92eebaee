//! System-prompt assembly.
//!
//! Renders the knowledge base into the plain-text block the model receives
//! as system instructions, followed by the fixed guardrail policy. The
//! output is a pure function of the knowledge base: no timestamps, no
//! randomness, no truncation. The model must receive the complete knowledge
//! base every time.

use crate::model::{KnowledgeBase, Project};

/// Placeholder rendered for every absent optional link, so the prompt
/// instructions can rely on a stable literal instead of a missing field.
const NOT_AVAILABLE: &str = "Not available";

/// The fixed refusal wording for out-of-scope requests.
pub fn refusal_text(name: &str) -> String {
    format!(
        "I am designed specifically to answer questions about {name}'s professional work, \
         projects, and skills. I cannot provide general coding assistance or creative writing."
    )
}

/// Render the knowledge base into its plain-text prompt block.
///
/// Sections appear in fixed order: personal info, skills, experience,
/// current focus, projects. Every project in the input appears exactly once,
/// in input order.
pub fn format_knowledge_base(kb: &KnowledgeBase) -> String {
    let mut out = String::new();

    out.push_str("=== PERSONAL INFO ===\n");
    out.push_str(&format!("Name: {}\n", kb.profile.name));
    out.push_str(&format!("Role: {}\n", kb.profile.role));
    out.push_str(&format!("Bio: {}\n", kb.profile.bio));
    out.push_str(&format!("Tagline: {}\n", kb.profile.tagline));
    let socials: Vec<&str> = kb.profile.socials.iter().map(|s| s.url.as_str()).collect();
    out.push_str(&format!("Socials: {}\n", socials.join(", ")));

    out.push_str("\n=== TECHNICAL SKILLS ===\n");
    for cat in &kb.skills {
        out.push_str(&format!("- {}: {}\n", cat.category, cat.items.join(", ")));
    }

    out.push_str("\n=== WORK EXPERIENCE ===\n");
    for entry in &kb.experience {
        out.push_str(&format!("\nROLE: {} at {}\n", entry.role, entry.company));
        out.push_str(&format!("DATES: {}\n", entry.date));
        out.push_str(&format!("DETAILS: {}\n", entry.description));
    }

    out.push_str("\n=== CURRENT LEARNING FOCUS ===\n");
    for topic in &kb.focus {
        out.push_str(&format!("- {}: {}\n", topic.title, topic.description));
    }

    out.push_str("\n=== PROJECTS (DEEP DIVES) ===\n");
    let mut first = true;
    for project in &kb.projects {
        if !first {
            out.push_str("---\n");
        }
        first = false;
        write_project(&mut out, project);
    }

    out
}

fn write_project(out: &mut String, p: &Project) {
    let link = |l: &Option<String>| l.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let feature_titles: Vec<&str> = p.sections.iter().map(|s| s.title.as_str()).collect();

    out.push_str(&format!("\nPROJECT: {}\n", p.title));
    out.push_str(&format!("TAGLINE: {}\n", p.tagline));
    out.push_str(&format!("TECH STACK: {}\n", p.tech.join(", ")));
    out.push_str(&format!("DESCRIPTION: {}\n", p.description));
    out.push_str(&format!("KEY FEATURES: {}\n", feature_titles.join(", ")));
    out.push_str(&format!(
        "IMAGE_URL: {} (Use this exact URL if asked to show the project architecture or design)\n",
        p.architecture_image
    ));
    out.push_str(&format!("GITHUB: {}\n", link(&p.github_link)));
    out.push_str(&format!("BACKEND: {}\n", link(&p.backend_link)));
    out.push_str(&format!("VIDEO: {}\n", link(&p.video_link)));
    out.push_str(&format!("DEMO: {}\n", link(&p.demo_link)));
    out.push_str(&format!("DETAIL_LINK: {}\n", link(&p.more_detail_link)));
}

/// Assemble the full system prompt: knowledge base plus guardrail policy.
///
/// Rebuilt per request by the relay — never cached across deployments.
pub fn system_prompt(kb: &KnowledgeBase) -> String {
    let name = &kb.profile.name;
    let knowledge = format_knowledge_base(kb);
    let refusal = refusal_text(name);

    format!(
        "You are the AI portfolio assistant for **{name}**.\n\
         Your goal is to answer questions about {name}'s skills, projects, and experience \
         in a professional, technical, yet friendly tone.\n\
         \n\
         Here is your Knowledge Base:\n\
         \n\
         {knowledge}\n\
         === INSTRUCTIONS ===\n\
         1. **Be Concise:** Answer the user's question directly.\n\
         2. **Be Technical:** If asked about a project, explain the tech stack and architecture.\n\
         3. **Images:** If the user asks to \"see\", \"show\", or \"look at\" a project, you MUST \
         return the image using Markdown syntax.\n\
         \x20  - Format: ![Alt Text](IMAGE_URL_FROM_DATA)\n\
         \x20  - Do NOT make up image URLs. Only use the ones provided in the PROJECT data above.\n\
         4. **Links:** If asked for code or a demo, provide the GITHUB or DEMO links from the \
         project data; if the user asks for further detail, give the DETAIL_LINK.\n\
         5. **RESUME / CV:** If the user asks for a \"resume\", \"CV\", \"curriculum vitae\", or an \
         \"experience summary\", you MUST provide this exact link:\n\
         \x20  [Download {name}'s Resume](/resume.pdf)\n\
         \x20  (Do not make up a URL. Use exactly \"/resume.pdf\").\n\
         6. **Context:** You are {name}'s digital twin. First person (\"I built...\") is usually \
         best for a portfolio bot.\n\
         7. **STRICT SCOPE / GUARDRAILS:**\n\
         \x20  - You are a specialized portfolio assistant, NOT a general AI.\n\
         \x20  - Do NOT answer general coding questions, comply with creative writing requests, \
         or answer general knowledge questions unrelated to {name}.\n\
         \x20  - If a user asks these types of questions, politely refuse with exactly: \
         \"{refusal}\"\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;

    fn sample_kb() -> KnowledgeBase {
        KnowledgeBase {
            profile: Profile {
                name: "Ada Example".into(),
                role: "Systems Engineer".into(),
                bio: "Builds reliable backends.".into(),
                tagline: "Code that lasts.".into(),
                socials: vec![
                    SocialLink {
                        label: "github".into(),
                        url: "https://github.com/ada".into(),
                    },
                    SocialLink {
                        label: "email".into(),
                        url: "mailto:ada@example.com".into(),
                    },
                ],
            },
            skills: vec![
                SkillCategory {
                    category: "Backend".into(),
                    items: vec!["Rust".into(), "PostgreSQL".into()],
                },
                SkillCategory {
                    category: "Frontend".into(),
                    items: vec!["TypeScript".into()],
                },
            ],
            experience: vec![ExperienceEntry {
                company: "Acme".into(),
                role: "Engineer".into(),
                date: "2020 - 2023".into(),
                description: "Shipped the flagship product.".into(),
            }],
            focus: vec![FocusTopic {
                title: "Distributed systems".into(),
                description: "Consensus protocols.".into(),
            }],
            projects: vec![
                Project {
                    id: "last-call".into(),
                    title: "Last Call".into(),
                    tagline: "Procedural detective game.".into(),
                    tech: vec!["Rust".into(), "WebGL".into()],
                    description: "A murder mystery engine.".into(),
                    architecture_image: "/images/lastcall_diagram.png".into(),
                    github_link: Some("https://github.com/ada/last-call".into()),
                    backend_link: None,
                    demo_link: None,
                    video_link: Some("https://youtu.be/abc".into()),
                    sections: vec![
                        DetailSection {
                            title: "The Pipeline".into(),
                            content: "Sequential agents.".into(),
                        },
                        DetailSection {
                            title: "The Frontend".into(),
                            content: "3D scenes.".into(),
                        },
                    ],
                    more_detail_link: Some("https://ada.dev/last-call".into()),
                },
                Project {
                    id: "nimbus".into(),
                    title: "Nimbus".into(),
                    tagline: "Keyboard showcase.".into(),
                    tech: vec!["Three.js".into()],
                    description: "A 3D product page.".into(),
                    architecture_image: "/images/nimbus_diagram.png".into(),
                    github_link: None,
                    backend_link: None,
                    demo_link: Some("https://nimbus.example.com".into()),
                    video_link: None,
                    sections: vec![],
                    more_detail_link: None,
                },
            ],
        }
    }

    #[test]
    fn formatting_is_deterministic() {
        let kb = sample_kb();
        let first = system_prompt(&kb);
        let second = system_prompt(&kb);
        assert_eq!(first, second);
    }

    #[test]
    fn every_project_appears_exactly_once() {
        let kb = sample_kb();
        let text = format_knowledge_base(&kb);
        for project in &kb.projects {
            let marker = format!("PROJECT: {}", project.title);
            assert_eq!(text.matches(&marker).count(), 1, "{marker}");
            assert!(text.contains(&project.architecture_image));
        }
        assert_eq!(text.matches("PROJECT: ").count(), kb.projects.len());
    }

    #[test]
    fn absent_links_render_as_not_available() {
        let kb = sample_kb();
        let text = format_knowledge_base(&kb);
        // Nimbus has no github/video/detail link; Last Call has no demo.
        // Four absent optional links plus two absent backend links.
        assert_eq!(text.matches("Not available").count(), 6);
        assert!(text.contains("GITHUB: Not available"));
        assert!(text.contains("DEMO: Not available"));
        assert!(text.contains("VIDEO: Not available"));
        assert!(text.contains("DETAIL_LINK: Not available"));
    }

    #[test]
    fn present_links_render_verbatim() {
        let text = format_knowledge_base(&sample_kb());
        assert!(text.contains("GITHUB: https://github.com/ada/last-call"));
        assert!(text.contains("VIDEO: https://youtu.be/abc"));
        assert!(text.contains("DEMO: https://nimbus.example.com"));
        assert!(text.contains("DETAIL_LINK: https://ada.dev/last-call"));
    }

    #[test]
    fn skills_render_one_line_per_category() {
        let text = format_knowledge_base(&sample_kb());
        assert!(text.contains("- Backend: Rust, PostgreSQL"));
        assert!(text.contains("- Frontend: TypeScript"));
    }

    #[test]
    fn section_titles_listed_as_key_features() {
        let text = format_knowledge_base(&sample_kb());
        assert!(text.contains("KEY FEATURES: The Pipeline, The Frontend"));
    }

    #[test]
    fn image_url_carries_verbatim_instruction() {
        let text = format_knowledge_base(&sample_kb());
        assert!(text.contains(
            "IMAGE_URL: /images/lastcall_diagram.png (Use this exact URL if asked to show \
             the project architecture or design)"
        ));
    }

    #[test]
    fn prompt_encodes_resume_policy() {
        let prompt = system_prompt(&sample_kb());
        assert!(prompt.contains("/resume.pdf"));
        assert!(prompt.contains("[Download Ada Example's Resume](/resume.pdf)"));
    }

    #[test]
    fn prompt_encodes_refusal_policy() {
        let prompt = system_prompt(&sample_kb());
        assert!(prompt.contains(&refusal_text("Ada Example")));
        assert!(prompt.contains("NOT a general AI"));
    }

    #[test]
    fn prompt_encodes_image_policy() {
        let prompt = system_prompt(&sample_kb());
        assert!(prompt.contains("![Alt Text](IMAGE_URL_FROM_DATA)"));
        assert!(prompt.contains("Do NOT make up image URLs"));
        // Scenario A: the exact configured diagram URL is present
        assert!(prompt.contains("/images/lastcall_diagram.png"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let text = format_knowledge_base(&sample_kb());
        let personal = text.find("=== PERSONAL INFO ===").unwrap();
        let skills = text.find("=== TECHNICAL SKILLS ===").unwrap();
        let experience = text.find("=== WORK EXPERIENCE ===").unwrap();
        let focus = text.find("=== CURRENT LEARNING FOCUS ===").unwrap();
        let projects = text.find("=== PROJECTS (DEEP DIVES) ===").unwrap();
        assert!(personal < skills && skills < experience);
        assert!(experience < focus && focus < projects);
    }

    #[test]
    fn empty_collections_still_render_headers() {
        let kb = KnowledgeBase {
            profile: sample_kb().profile,
            skills: vec![],
            experience: vec![],
            focus: vec![],
            projects: vec![],
        };
        let text = format_knowledge_base(&kb);
        assert!(text.contains("=== PROJECTS (DEEP DIVES) ==="));
        assert_eq!(text.matches("PROJECT: ").count(), 0);
    }
}
