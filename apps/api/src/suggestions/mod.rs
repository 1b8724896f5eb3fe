//! Improvement suggestions: template-driven feedback grouped into
//! critical, important and enhancement tiers, plus an action plan.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{ResumeAnalysis, ResumeSection, SectionPresence, SkillMatches};
use crate::rating::{Criterion, ResumeRating};

// ──────────────────────────────────────────────
// Template banks
// ──────────────────────────────────────────────

const SKILL_TIPS: &[(&str, &[&str])] = &[
    (
        "cloud_platforms",
        &[
            "List cloud platforms and services you've used",
            "Mention specific AWS/Azure/GCP services",
            "Include containerization technologies (Docker, Kubernetes)",
            "Add CI/CD pipeline experience",
        ],
    ),
    (
        "databases",
        &[
            "Specify database management systems you've used",
            "Mention both SQL and NoSQL databases if applicable",
            "Include database design and optimization experience",
            "Add data modeling and schema design skills",
        ],
    ),
    (
        "programming_languages",
        &[
            "Add specific programming languages you've used in projects",
            "Mention version numbers for programming languages (e.g., Python 3.12)",
            "Include both frontend and backend technologies if applicable",
            "Add emerging technologies relevant to your field",
        ],
    ),
    (
        "soft_skills",
        &[
            "Include leadership and team collaboration skills",
            "Mention communication and presentation abilities",
            "Add problem-solving and analytical thinking skills",
            "Include project management and organizational skills",
        ],
    ),
    (
        "web_technologies",
        &[
            "List specific frameworks and libraries you've worked with",
            "Mention responsive design and mobile-first development experience",
            "Include API development and integration experience",
            "Add version control systems (Git, GitHub, GitLab)",
        ],
    ),
];

const GENERIC_SKILL_TIP: &str = "Add more specific skills in this category";

fn skill_tips(category: &str) -> Option<&'static [&'static str]> {
    SKILL_TIPS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, tips)| *tips)
}

fn section_tips(section: ResumeSection) -> Option<&'static [&'static str]> {
    match section {
        ResumeSection::Summary => Some(&[
            "Add a professional summary highlighting your key achievements",
            "Include 2-3 lines summarizing your expertise and career goals",
            "Mention years of experience and key specializations",
            "Include your most impressive accomplishment or metric",
        ]),
        ResumeSection::Experience => Some(&[
            "Use action verbs to start each bullet point (Developed, Implemented, Led)",
            "Include quantifiable achievements and metrics",
            "Mention specific technologies and tools used",
            "Focus on impact and results rather than just responsibilities",
        ]),
        ResumeSection::Education => Some(&[
            "Include your degree, major, university, and graduation year",
            "Add relevant coursework if you're a recent graduate",
            "Mention academic achievements, honors, or high GPA",
            "Include relevant certifications and professional development",
        ]),
        ResumeSection::Skills => Some(&[
            "Organize skills into categories (Technical, Languages, Tools)",
            "List skills in order of proficiency",
            "Include both hard and soft skills",
            "Match skills to job requirements when possible",
        ]),
        ResumeSection::Projects => Some(&[
            "Include 2-4 relevant projects with brief descriptions",
            "Mention technologies used and your role",
            "Add links to GitHub repos or live demos",
            "Quantify impact or results where possible",
        ]),
        _ => None,
    }
}

const FORMATTING_TIPS: &[&str] = &[
    "Use consistent formatting throughout the document",
    "Keep margins between 0.5-1 inch on all sides",
    "Use a professional, readable font (Arial, Calibri, Times New Roman)",
    "Maintain consistent font sizes (10-12pt for body, 14-16pt for headers)",
    "Use bullet points for easy scanning",
    "Ensure adequate white space between sections",
    "Keep resume to 1-2 pages maximum",
    "Save as PDF to preserve formatting",
];

const ACTION_VERBS: &[&str] = &[
    "Achieved",
    "Developed",
    "Implemented",
    "Led",
    "Managed",
    "Created",
    "Improved",
    "Increased",
    "Reduced",
    "Optimized",
    "Designed",
    "Built",
];

const METRIC_EXAMPLES: &[&str] = &[
    "Increased system efficiency by 25%",
    "Reduced processing time by 4 hours daily",
    "Led a cross-functional team of 8 developers",
    "Improved user satisfaction scores from 3.2 to 4.6",
    "Generated $2M+ in additional revenue through optimization",
    "Completed 95% of projects ahead of schedule",
];

const ESSENTIAL_SECTIONS: [ResumeSection; 3] = [
    ResumeSection::Experience,
    ResumeSection::Education,
    ResumeSection::Skills,
];
const IMPORTANT_SECTIONS: [ResumeSection; 2] = [ResumeSection::Summary, ResumeSection::Projects];

/// Generators only fire for criteria scoring below these.
const WEAK_SCORE: f64 = 7.0;
const WEAK_SECTIONS_SCORE: f64 = 8.0;
const WEAK_CONTACT_SCORE: f64 = 8.0;

// ──────────────────────────────────────────────
// Output types
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// What the suggestion is about, e.g. "Skills Diversity".
    pub area: String,
    pub message: String,
}

impl Suggestion {
    fn new(area: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            area: area.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrioritizedSuggestions {
    pub critical: Vec<Suggestion>,
    pub important: Vec<Suggestion>,
    pub enhancement: Vec<Suggestion>,
}

impl PrioritizedSuggestions {
    pub fn total(&self) -> usize {
        self.critical.len() + self.important.len() + self.enhancement.len()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionStep {
    pub priority: String,
    pub timeline: String,
    pub items: Vec<Suggestion>,
    pub impact: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub suggestions_by_priority: PrioritizedSuggestions,
    pub action_plan: Vec<ActionStep>,
    pub total_suggestions: usize,
}

// ──────────────────────────────────────────────
// Generators
// ──────────────────────────────────────────────

/// "programming_languages" → "Programming Languages".
fn category_title(category: &str) -> String {
    category
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn pick<'a, R: Rng + ?Sized>(tips: &[&'a str], rng: &mut R) -> &'a str {
    tips.choose(rng).copied().unwrap_or(GENERIC_SKILL_TIP)
}

pub fn skill_suggestions<R: Rng + ?Sized>(
    skills: &SkillMatches,
    rating: &ResumeRating,
    rng: &mut R,
) -> Vec<Suggestion> {
    let mut out = Vec::new();

    if rating.score(Criterion::SkillsDiversity) < WEAK_SCORE {
        out.push(Suggestion::new(
            "Skills Diversity",
            "Add skills from different categories (technical, tools, soft skills)",
        ));
        for (category, tips) in SKILL_TIPS
            .iter()
            .filter(|(category, _)| !skills.contains_key(*category))
            .take(2)
        {
            out.push(Suggestion::new(category_title(category), pick(tips, rng)));
        }
    }

    if rating.score(Criterion::SkillsQuantity) < WEAK_SCORE {
        out.push(Suggestion::new(
            "Skills Quantity",
            "Add more specific skills and technologies you've worked with",
        ));
        for (category, found) in skills {
            if found.len() < 3 {
                let message = match skill_tips(category) {
                    Some(tips) => pick(tips, rng),
                    None => GENERIC_SKILL_TIP,
                };
                out.push(Suggestion::new(category_title(category), message));
            }
        }
    }

    out
}

pub fn section_suggestions<R: Rng + ?Sized>(
    sections: &SectionPresence,
    rating: &ResumeRating,
    rng: &mut R,
) -> Vec<Suggestion> {
    let present = |section: ResumeSection| sections.get(&section).copied().unwrap_or(false);
    let mut out = Vec::new();

    for section in ESSENTIAL_SECTIONS.into_iter().filter(|s| !present(*s)) {
        out.push(Suggestion::new(
            format!("Missing {} Section", section.title()),
            "This is essential for any resume",
        ));
    }

    for section in IMPORTANT_SECTIONS.into_iter().filter(|s| !present(*s)) {
        if let Some(tips) = section_tips(section) {
            out.push(Suggestion::new(
                format!("Add {} Section", section.title()),
                pick(tips, rng),
            ));
        }
    }

    if rating.score(Criterion::SectionsCompleteness) < WEAK_SECTIONS_SCORE {
        for (&section, _) in sections.iter().filter(|(_, present)| **present) {
            if let Some(tips) = section_tips(section) {
                out.push(Suggestion::new(
                    format!("Improve {} Section", section.title()),
                    pick(tips, rng),
                ));
            }
        }
    }

    out
}

pub fn content_suggestions(analysis: &ResumeAnalysis, rating: &ResumeRating) -> Vec<Suggestion> {
    let mut out = Vec::new();
    let readability = &analysis.readability;

    if rating.score(Criterion::ContentLength) < WEAK_SCORE {
        if readability.word_count < 150 {
            out.push(Suggestion::new(
                "Content Length",
                "Your resume is too brief. Add more details about your experience and achievements",
            ));
        } else if readability.word_count > 800 {
            out.push(Suggestion::new(
                "Content Length",
                "Your resume is too long. Focus on the most relevant and impactful information",
            ));
        }
    }

    if rating.score(Criterion::Readability) < WEAK_SCORE {
        if readability.avg_sentence_length > 25.0 {
            out.push(Suggestion::new(
                "Readability",
                "Use shorter, more concise sentences for better readability",
            ));
        }
        if readability.complexity_ratio > 0.5 {
            out.push(Suggestion::new(
                "Readability",
                "Simplify complex words where possible while maintaining professionalism",
            ));
        }
    }

    let projects = &analysis.projects;
    if rating.score(Criterion::ProjectQuality) < WEAK_SCORE {
        if projects.is_empty() {
            out.push(Suggestion::new(
                "Projects",
                "Add 2-3 relevant projects that showcase your skills",
            ));
        } else if projects.len() < 3 {
            out.push(Suggestion::new(
                "Projects",
                "Add more projects to demonstrate your practical experience",
            ));
        }
        if projects.iter().any(|p| p.split_whitespace().count() < 10) {
            out.push(Suggestion::new(
                "Project Descriptions",
                "Expand your project descriptions with technologies used and impact achieved",
            ));
        }
    }

    let contact = &analysis.contact_info;
    if rating.score(Criterion::ContactCompleteness) < WEAK_CONTACT_SCORE {
        let missing: Vec<&str> = [
            (contact.email.is_none(), "professional email"),
            (contact.phone.is_none(), "phone number"),
            (contact.linkedin.is_none(), "LinkedIn profile"),
        ]
        .into_iter()
        .filter_map(|(absent, label)| absent.then_some(label))
        .collect();
        if !missing.is_empty() {
            out.push(Suggestion::new(
                "Contact Info",
                format!("Add {}", missing.join(", ")),
            ));
        }
    }

    out
}

pub fn formatting_suggestions<R: Rng + ?Sized>(rng: &mut R) -> Vec<Suggestion> {
    FORMATTING_TIPS
        .choose_multiple(rng, 3)
        .map(|tip| Suggestion::new("Formatting", *tip))
        .collect()
}

pub fn enhancement_tips<R: Rng + ?Sized>(rng: &mut R) -> Vec<Suggestion> {
    let verbs: Vec<&str> = ACTION_VERBS.choose_multiple(rng, 4).copied().collect();
    let metrics: Vec<&str> = METRIC_EXAMPLES.choose_multiple(rng, 3).copied().collect();
    vec![
        Suggestion::new(
            "Action Verbs",
            format!(
                "Start bullet points with strong verbs like: {}",
                verbs.join(", ")
            ),
        ),
        Suggestion::new(
            "Quantify Achievements",
            format!(
                "Include specific metrics and numbers (e.g., {})",
                metrics.join(" | ")
            ),
        ),
    ]
}

// ──────────────────────────────────────────────
// Prioritisation
// ──────────────────────────────────────────────

fn slice(items: &[Suggestion], start: usize, end: usize) -> impl Iterator<Item = &Suggestion> {
    items.iter().skip(start).take(end.saturating_sub(start))
}

/// Drops repeated suggestions, keeping the first occurrence.
fn dedup(items: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen: Vec<Suggestion> = Vec::with_capacity(items.len());
    for item in items {
        if !seen.contains(&item) {
            seen.push(item);
        }
    }
    seen
}

pub fn prioritize(analysis: &ResumeAnalysis, rating: &ResumeRating) -> PrioritizedSuggestions {
    let mut rng = analysis.rng();

    let skills = skill_suggestions(&analysis.skills, rating, &mut rng);
    let sections = section_suggestions(&analysis.sections, rating, &mut rng);
    let content = content_suggestions(analysis, rating);
    let formatting = formatting_suggestions(&mut rng);
    let enhancements = enhancement_tips(&mut rng);

    let mut critical = Vec::new();
    for criterion in &rating.improvement_priority {
        let family = match criterion {
            Criterion::SkillsDiversity | Criterion::SkillsQuantity => &skills,
            Criterion::SectionsCompleteness => &sections,
            _ => &content,
        };
        critical.extend(slice(family, 0, 2).cloned());
    }

    let important = slice(&content, 2, 4)
        .chain(slice(&sections, 2, 4))
        .cloned()
        .collect();
    let enhancement = slice(&formatting, 0, 2)
        .chain(slice(&enhancements, 0, 3))
        .cloned()
        .collect();

    PrioritizedSuggestions {
        critical: dedup(critical),
        important: dedup(important),
        enhancement: dedup(enhancement),
    }
}

pub fn action_plan(suggestions: &PrioritizedSuggestions) -> Vec<ActionStep> {
    let tiers = [
        (
            &suggestions.critical,
            "High Priority",
            "Complete within 1-2 days",
            "These changes will significantly improve your resume score",
        ),
        (
            &suggestions.important,
            "Medium Priority",
            "Complete within 1 week",
            "These improvements will make your resume more competitive",
        ),
        (
            &suggestions.enhancement,
            "Low Priority",
            "Complete when you have time",
            "These refinements will polish your resume presentation",
        ),
    ];

    tiers
        .into_iter()
        .filter(|(items, ..)| !items.is_empty())
        .map(|(items, priority, timeline, impact)| ActionStep {
            priority: priority.to_string(),
            timeline: timeline.to_string(),
            items: items.iter().take(3).cloned().collect(),
            impact: impact.to_string(),
        })
        .collect()
}

pub fn generate_suggestions(analysis: &ResumeAnalysis, rating: &ResumeRating) -> SuggestionReport {
    let suggestions_by_priority = prioritize(analysis, rating);
    let action_plan = action_plan(&suggestions_by_priority);
    let total_suggestions = suggestions_by_priority.total();

    SuggestionReport {
        suggestions_by_priority,
        action_plan,
        total_suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::SAMPLE_RESUME;
    use crate::analysis::TextAnalyzer;
    use crate::rating::ResumeRater;
    use crate::reference::ReferenceData;

    const WEAK_RESUME: &str = "Developer with some skills in Python.";

    fn analyze(text: &str) -> (ResumeAnalysis, ResumeRating) {
        let reference = ReferenceData::embedded().unwrap();
        let analysis = TextAnalyzer::new(&reference).unwrap().analyze(text).unwrap();
        let rating = ResumeRater::default().rate(&analysis);
        (analysis, rating)
    }

    #[test]
    fn test_category_title() {
        assert_eq!(category_title("programming_languages"), "Programming Languages");
        assert_eq!(category_title("soft_skills"), "Soft Skills");
    }

    #[test]
    fn test_weak_resume_gets_critical_content_feedback() {
        let (analysis, rating) = analyze(WEAK_RESUME);
        let suggestions = prioritize(&analysis, &rating);

        let areas: Vec<&str> = suggestions.critical.iter().map(|s| s.area.as_str()).collect();
        assert_eq!(areas, vec!["Content Length", "Projects"]);

        assert_eq!(
            suggestions.important[0],
            Suggestion::new("Contact Info", "Add professional email, phone number, LinkedIn profile")
        );
        assert!(suggestions
            .important
            .iter()
            .any(|s| s.area == "Add Summary Section"));
    }

    #[test]
    fn test_critical_routes_each_priority_to_its_family() {
        let (analysis, mut rating) = analyze(WEAK_RESUME);
        rating.improvement_priority = vec![Criterion::SkillsDiversity, Criterion::SectionsCompleteness];

        let mut rng = analysis.rng();
        let skills = skill_suggestions(&analysis.skills, &rating, &mut rng);
        let sections = section_suggestions(&analysis.sections, &rating, &mut rng);
        assert!(skills.len() > 2);
        assert!(sections.len() > 2);

        let suggestions = prioritize(&analysis, &rating);
        assert_eq!(
            suggestions.critical,
            vec![
                skills[0].clone(),
                skills[1].clone(),
                sections[0].clone(),
                sections[1].clone(),
            ]
        );
        let areas: Vec<&str> = suggestions.critical.iter().map(|s| s.area.as_str()).collect();
        assert_eq!(
            areas,
            vec![
                "Skills Diversity",
                "Cloud Platforms",
                "Missing Experience Section",
                "Missing Education Section",
            ]
        );
    }

    #[test]
    fn test_missing_essential_sections_are_flagged() {
        let (analysis, rating) = analyze(WEAK_RESUME);
        let sections = section_suggestions(&analysis.sections, &rating, &mut analysis.rng());
        assert_eq!(sections[0].area, "Missing Experience Section");
        assert_eq!(sections[1].area, "Missing Education Section");
        assert!(sections.iter().all(|s| s.area != "Missing Skills Section"));
    }

    #[test]
    fn test_skill_suggestions_for_thin_skill_set() {
        let (analysis, rating) = analyze(WEAK_RESUME);
        let skills = skill_suggestions(&analysis.skills, &rating, &mut analysis.rng());
        assert_eq!(skills[0].area, "Skills Diversity");
        // Two missing categories, taken in bank order.
        assert_eq!(skills[1].area, "Cloud Platforms");
        assert_eq!(skills[2].area, "Databases");
        assert!(skills.iter().any(|s| s.area == "Skills Quantity"));
        assert!(skills.iter().any(|s| s.area == "Programming Languages"));
    }

    #[test]
    fn test_enhancement_tips_shape() {
        let (analysis, _) = analyze(SAMPLE_RESUME);
        let tips = enhancement_tips(&mut analysis.rng());
        assert_eq!(tips.len(), 2);
        let verbs = tips[0].message.split(": ").nth(1).unwrap();
        assert_eq!(verbs.split(", ").count(), 4);
        assert_eq!(tips[1].message.matches(" | ").count(), 2);
    }

    #[test]
    fn test_action_plan_skips_empty_tiers() {
        let suggestions = PrioritizedSuggestions {
            critical: Vec::new(),
            important: vec![Suggestion::new("Projects", "Add more projects")],
            enhancement: vec![
                Suggestion::new("Formatting", "a"),
                Suggestion::new("Formatting", "b"),
                Suggestion::new("Formatting", "c"),
                Suggestion::new("Formatting", "d"),
            ],
        };
        let plan = action_plan(&suggestions);
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].priority, "Medium Priority");
        assert_eq!(plan[0].timeline, "Complete within 1 week");
        assert_eq!(plan[1].priority, "Low Priority");
        assert_eq!(plan[1].items.len(), 3);
    }

    #[test]
    fn test_dedup_preserves_order() {
        let items = vec![
            Suggestion::new("A", "1"),
            Suggestion::new("B", "2"),
            Suggestion::new("A", "1"),
            Suggestion::new("C", "3"),
        ];
        let areas: Vec<String> = dedup(items).into_iter().map(|s| s.area).collect();
        assert_eq!(areas, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_report_is_deterministic() {
        let (analysis, rating) = analyze(SAMPLE_RESUME);
        let first = generate_suggestions(&analysis, &rating);
        let second = generate_suggestions(&analysis, &rating);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(
            first.total_suggestions,
            first.suggestions_by_priority.total()
        );
        assert_eq!(first.suggestions_by_priority.enhancement.len(), 4);
    }
}
