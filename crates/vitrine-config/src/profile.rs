//! Portfolio content shown on the page.

use serde::{Deserialize, Serialize};
use vitrine_core::Rgb;

/// Everything the page says about its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    /// Paragraphs of the about section.
    pub about: Vec<String>,
    /// Skill rows; each scrolls as its own marquee.
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<Experience>,
    pub contact: ContactDetails,
}

/// A titled row of skills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub title: String,
    pub items: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Brand color of the skill's badge.
    pub color: Rgb,
}

/// One position held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    pub period: String,
    /// Employment kind, e.g. "Full-Time".
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Ways to reach the owner, listed beside the contact form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub email: String,
    pub location: String,
    pub phone: String,
}

fn skill(name: &str, hex: u32) -> Skill {
    Skill {
        name: name.to_string(),
        color: Rgb::from_hex(hex),
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Alex Morgan".to_string(),
            role: "Full Stack Developer".to_string(),
            tagline: "Building fast, accessible products from the database to the pixel."
                .to_string(),
            about: lines(&[
                "I design and build web applications end to end, from data models and APIs \
                 to the interfaces people actually touch.",
                "Most of my work lives in TypeScript and Node.js, with a soft spot for \
                 realtime visuals and anything that makes a page feel alive.",
                "Outside of client work I contribute to open source tooling and mentor \
                 developers who are just getting started.",
            ]),
            skills: vec![
                SkillGroup {
                    title: "Frontend".to_string(),
                    items: vec![
                        skill("React", 0x61DAFB),
                        skill("Next.js", 0xFFFFFF),
                        skill("JavaScript", 0xF7DF1E),
                        skill("TypeScript", 0x3178C6),
                        skill("Tailwind CSS", 0x06B6D4),
                        skill("HTML5", 0xE34F26),
                        skill("CSS3", 0x1572B6),
                        skill("Figma", 0xF24E1E),
                    ],
                },
                SkillGroup {
                    title: "Backend & Tools".to_string(),
                    items: vec![
                        skill("Node.js", 0x339933),
                        skill("Express", 0xCCCCCC),
                        skill("MongoDB", 0x47A248),
                        skill("Firebase", 0xFFCA28),
                        skill("AWS", 0xFF9900),
                        skill("Git", 0xF05032),
                        skill("GitHub", 0xFFFFFF),
                        skill("Vercel", 0xFFFFFF),
                    ],
                },
            ],
            experience: vec![
                Experience {
                    title: "Full Stack Developer".to_string(),
                    company: "Northwind Labs".to_string(),
                    location: "Remote".to_string(),
                    period: "2024 - Present".to_string(),
                    kind: "Full-Time".to_string(),
                    highlights: lines(&[
                        "Built and maintained full-stack web applications with React, Next.js and Node.js",
                        "Owned authentication, admin dashboards and modular API services for internal tools",
                        "Shipped responsive, accessible interfaces with a shared component library",
                        "Ran deployments and reviews as part of a small agile team",
                    ]),
                    skills: lines(&["React", "Next.js", "Node.js", "MongoDB", "AWS"]),
                },
                Experience {
                    title: "Web Developer Trainee".to_string(),
                    company: "Brightside Studio".to_string(),
                    location: "Remote".to_string(),
                    period: "2023".to_string(),
                    kind: "Part-Time".to_string(),
                    highlights: lines(&[
                        "Developed client websites with HTML, CSS and Bootstrap",
                        "Customized CMS themes for small business clients",
                    ]),
                    skills: lines(&["HTML", "CSS", "Bootstrap", "WordPress"]),
                },
            ],
            contact: ContactDetails {
                email: "hello@example.com".to_string(),
                location: "Anywhere, Earth".to_string(),
                phone: "+00 000 000 0000".to_string(),
            },
        }
    }
}
