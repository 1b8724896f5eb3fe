//! Professional summary generation. Infers role, seniority and education from
//! the analysis and fills a two-sentence template.

use once_cell::sync::Lazy;
use rand::seq::IndexedRandom;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::{ResumeAnalysis, SkillMatches};

// ──────────────────────────────────────────────
// Templates
// ──────────────────────────────────────────────

const EXPERIENCED_TEMPLATES: &[&str] = &[
    "{experience} {role} with {years} of experience in {skills}. {achievement} and expertise in {specializations}.",
    "{expertise} {role} specializing in {skills} with {years} of proven experience. {achievement} and strong background in {specializations}.",
    "Results-driven {role} with {years} of experience in {skills}. {achievement} and demonstrated expertise in {specializations}.",
];

const ENTRY_LEVEL_TEMPLATES: &[&str] = &[
    "Recent {education} graduate with strong foundation in {skills}. {projects} and eager to contribute to {field} initiatives.",
    "Motivated {education} professional with expertise in {skills}. {projects} and passionate about {field} innovation.",
    "Dedicated {education} graduate specializing in {skills}. {projects} and committed to delivering high-quality {field} solutions.",
];

const ACHIEVEMENTS: &[&str] = &[
    "Proven track record of delivering high-quality solutions",
    "Successfully completed multiple complex projects",
    "Demonstrated ability to work in fast-paced environments",
    "Strong problem-solving and analytical skills",
    "Excellent collaboration and communication abilities",
    "Committed to continuous learning and professional growth",
    "Experience working with cross-functional teams",
    "Passionate about creating innovative solutions",
];

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Software Engineer",
        &["programming", "coding", "software", "development", "engineer"],
    ),
    (
        "Data Scientist",
        &["data", "analytics", "machine learning", "statistics", "science"],
    ),
    (
        "Product Manager",
        &["product", "management", "strategy", "roadmap", "stakeholder"],
    ),
    (
        "Marketing Manager",
        &["marketing", "digital", "campaign", "brand", "advertising"],
    ),
    (
        "Business Analyst",
        &["business", "analysis", "requirements", "process", "analyst"],
    ),
    (
        "DevOps Engineer",
        &["devops", "infrastructure", "cloud", "automation", "deployment"],
    ),
    (
        "UI/UX Designer",
        &["design", "user experience", "interface", "wireframe", "prototype"],
    ),
    (
        "Project Manager",
        &["project", "management", "agile", "scrum", "coordination"],
    ),
    (
        "Full Stack Developer",
        &["fullstack", "frontend", "backend", "web development"],
    ),
    (
        "Mobile Developer",
        &["mobile", "android", "ios", "app development"],
    ),
    (
        "Cybersecurity Analyst",
        &["security", "cybersecurity", "vulnerability", "threat"],
    ),
    (
        "Quality Assurance",
        &["testing", "qa", "quality", "automation testing"],
    ),
];

const DEFAULT_ROLE: &str = "Professional";

const SENIOR_INDICATORS: &[&str] = &["senior", "lead", "principal", "architect", "manager", "director"];
const MID_INDICATORS: &[&str] = &["developer", "engineer", "analyst", "specialist", "consultant"];
const JUNIOR_INDICATORS: &[&str] = &["junior", "associate", "intern", "trainee", "entry"];

/// Technical categories preferred when picking headline skills.
const PRIORITY_CATEGORIES: &[&str] = &[
    "programming_languages",
    "web_technologies",
    "databases",
    "cloud_platforms",
    "data_science",
    "mobile_development",
];

const TOP_SKILLS: usize = 3;
const MAX_SPECIALIZATIONS: usize = 2;
const MAX_SUMMARY_CHARS: usize = 150;

fn specialization(category: &str) -> Option<&'static str> {
    Some(match category {
        "programming_languages" => "software development",
        "web_technologies" => "web development",
        "databases" => "database management",
        "cloud_platforms" => "cloud computing",
        "data_science" => "data analysis and machine learning",
        "mobile_development" => "mobile application development",
        "devops_tools" => "DevOps and automation",
        "design_tools" => "UI/UX design",
        "project_management" => "project management",
        "soft_skills" => "team leadership and collaboration",
        _ => return None,
    })
}

static YEARS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(\d+)\+?\s*years?\s+(?:of\s+)?(?:experience|exp)",
        r"(\d+)\+?\s*yrs?\s+(?:of\s+)?(?:experience|exp)",
        r"over\s+(\d+)\s+years?",
        r"more\s+than\s+(\d+)\s+years?",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Degree markers, matched as whole words, highest degree first.
static EDUCATION_LEVELS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    let levels: [(&'static str, &[&str]); 4] = [
        ("PhD", &["phd", "ph.d", "doctorate", "doctoral"]),
        (
            "Master's",
            &["masters", "master's", "mba", "m.s", "msc", "m.sc", "m.a"],
        ),
        (
            "Bachelor's",
            &[
                "bachelors", "bachelor's", "bs", "b.s", "bsc", "b.sc", "ba", "b.a", "btech",
                "b.tech",
            ],
        ),
        (
            "Associate",
            &["associate's", "associates degree", "associate degree", "a.a", "a.s"],
        ),
    ];
    levels
        .iter()
        .map(|(level, markers)| {
            let alternation = markers
                .iter()
                .map(|m| regex::escape(m))
                .collect::<Vec<_>>()
                .join("|");
            let re = Regex::new(&format!(r"(?:^|\W)(?:{alternation})(?:\W|$)"))
                .expect("valid regex");
            (*level, re)
        })
        .collect()
});

// ──────────────────────────────────────────────
// Output types
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    EntryLevel,
    Experienced,
}

impl TemplateKind {
    fn templates(self) -> &'static [&'static str] {
        match self {
            TemplateKind::EntryLevel => ENTRY_LEVEL_TEMPLATES,
            TemplateKind::Experienced => EXPERIENCED_TEMPLATES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryComponents {
    pub role: String,
    pub experience_level: ExperienceLevel,
    pub years: String,
    pub top_skills: Vec<String>,
    pub specializations: Vec<String>,
    pub education: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfessionalSummary {
    pub summary: String,
    pub template_used: TemplateKind,
    pub components: SummaryComponents,
    pub alternatives: Vec<String>,
}

// ──────────────────────────────────────────────
// Inference
// ──────────────────────────────────────────────

/// Highest-scoring role; the first listed role wins ties.
pub fn determine_role(text_lower: &str, skills: &SkillMatches) -> String {
    let joined: Vec<String> = skills
        .values()
        .map(|list| list.join(" ").to_lowercase())
        .collect();

    let mut best: Option<(&str, usize)> = None;
    for (role, keywords) in ROLE_KEYWORDS {
        let score: usize = keywords
            .iter()
            .map(|kw| {
                let in_text = usize::from(text_lower.contains(kw));
                let in_skills = joined.iter().filter(|j| j.contains(kw)).count();
                in_text + in_skills * 2
            })
            .sum();
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((*role, score));
        }
    }

    best.map_or(DEFAULT_ROLE, |(role, _)| role).to_string()
}

pub fn estimate_experience(analysis: &ResumeAnalysis, text_lower: &str) -> (ExperienceLevel, String) {
    let stated_years = YEARS_PATTERNS
        .iter()
        .flat_map(|re| re.captures_iter(text_lower))
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
        .max();

    if let Some(years) = stated_years {
        return match years {
            y if y >= 7 => (ExperienceLevel::Senior, format!("{y}+ years")),
            y if y >= 3 => (ExperienceLevel::Mid, format!("{y} years")),
            y => (ExperienceLevel::Entry, format!("{y} years")),
        };
    }

    let mentions = |indicators: &[&str]| indicators.iter().any(|i| text_lower.contains(i));
    if mentions(SENIOR_INDICATORS) {
        return (ExperienceLevel::Senior, "7+ years".to_string());
    }
    if mentions(MID_INDICATORS) {
        return (ExperienceLevel::Mid, "3-6 years".to_string());
    }
    if mentions(JUNIOR_INDICATORS) {
        return (ExperienceLevel::Entry, "1-2 years".to_string());
    }

    let complexity = analysis.readability.word_count
        + analysis.summary_stats.total_skills_found * 10
        + analysis.projects.len() * 20;
    match complexity {
        c if c > 500 => (ExperienceLevel::Mid, "3+ years".to_string()),
        c if c > 200 => (ExperienceLevel::Entry, "1-2 years".to_string()),
        _ => (ExperienceLevel::Entry, "recent graduate".to_string()),
    }
}

/// Up to three skills, two per technical category first.
pub fn top_skills(skills: &SkillMatches) -> Vec<String> {
    let mut top: Vec<String> = Vec::new();

    for category in PRIORITY_CATEGORIES {
        if top.len() >= TOP_SKILLS {
            break;
        }
        if let Some(list) = skills.get(*category) {
            top.extend(list.iter().take(2).cloned());
        }
    }

    for (category, list) in skills {
        if top.len() >= TOP_SKILLS {
            break;
        }
        if !PRIORITY_CATEGORIES.contains(&category.as_str()) {
            let remaining = TOP_SKILLS - top.len();
            top.extend(list.iter().take(remaining).cloned());
        }
    }

    top.truncate(TOP_SKILLS);
    top
}

pub fn specializations(skills: &SkillMatches) -> Vec<String> {
    skills
        .iter()
        .filter(|(_, list)| list.len() >= 2)
        .filter_map(|(category, _)| specialization(category))
        .take(MAX_SPECIALIZATIONS)
        .map(str::to_string)
        .collect()
}

pub fn detect_education(text_lower: &str) -> Option<String> {
    EDUCATION_LEVELS
        .iter()
        .find(|(_, re)| re.is_match(text_lower))
        .map(|(level, _)| level.to_string())
}

fn projects_phrase(count: usize) -> String {
    match count {
        0 => "Strong technical foundation".to_string(),
        1 => "Demonstrated expertise through practical project implementation".to_string(),
        n if n <= 3 => format!("Successfully delivered {n} major projects"),
        _ => "Extensive portfolio of successful project implementations".to_string(),
    }
}

// ──────────────────────────────────────────────
// Rendering
// ──────────────────────────────────────────────

fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}

fn first_two_sentences(text: &str) -> Option<String> {
    let sentences: Vec<&str> = text.split(". ").collect();
    (sentences.len() > 2).then(|| format!("{}.", sentences[..2].join(". ")))
}

/// Keeps the summary to two sentences. A single overlong sentence is split
/// at the first " and " past its midpoint.
pub fn fit_two_sentences(summary: String) -> String {
    if let Some(trimmed) = first_two_sentences(&summary) {
        return trimmed;
    }
    if summary.contains(". ") || summary.len() <= MAX_SUMMARY_CHARS {
        return summary;
    }

    let mut mid = summary.len() / 2;
    while !summary.is_char_boundary(mid) {
        mid += 1;
    }
    let Some(offset) = summary[mid..].find(" and ") else {
        return summary;
    };
    let split = mid + offset;
    let rest = &summary[split + " and ".len()..];
    let mut chars = rest.chars();
    let rest: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{}. {}", &summary[..split], rest)
}

pub fn generate_summary(analysis: &ResumeAnalysis) -> ProfessionalSummary {
    let mut rng = analysis.rng();
    let text_lower = analysis.text.to_lowercase();

    let role = determine_role(&text_lower, &analysis.skills);
    let (level, years) = estimate_experience(analysis, &text_lower);
    let education = detect_education(&text_lower);
    let top_skills = top_skills(&analysis.skills);
    let specializations = specializations(&analysis.skills);
    let achievement = ACHIEVEMENTS.choose(&mut rng).copied().unwrap_or(ACHIEVEMENTS[0]);

    let kind = if education.is_some()
        && level == ExperienceLevel::Entry
        && matches!(years.as_str(), "recent graduate" | "1-2 years")
    {
        TemplateKind::EntryLevel
    } else {
        TemplateKind::Experienced
    };
    let templates = kind.templates();
    let template = templates.choose(&mut rng).copied().unwrap_or(templates[0]);

    let skills_text = if top_skills.is_empty() {
        "multiple technologies".to_string()
    } else {
        top_skills.join(", ")
    };
    let specializations_text = if specializations.is_empty() {
        "innovative solutions".to_string()
    } else {
        specializations.join(", ")
    };
    let field = role
        .rsplit(' ')
        .next()
        .unwrap_or(role.as_str())
        .to_lowercase();
    let projects = projects_phrase(analysis.projects.len());

    let vars: [(&str, &str); 10] = [
        ("role", &role),
        (
            "experience",
            if level == ExperienceLevel::Entry { "Dedicated" } else { "Experienced" },
        ),
        (
            "expertise",
            if level == ExperienceLevel::Senior { "Expert" } else { "Skilled" },
        ),
        ("years", &years),
        ("skills", &skills_text),
        ("specializations", &specializations_text),
        ("achievement", achievement),
        ("education", education.as_deref().unwrap_or("technology")),
        ("projects", &projects),
        ("field", &field),
    ];

    let summary = fit_two_sentences(fill(template, &vars));
    let alternatives = templates
        .iter()
        .take(2)
        .map(|t| {
            let filled = fill(t, &vars);
            first_two_sentences(&filled).unwrap_or(filled)
        })
        .collect();

    ProfessionalSummary {
        summary,
        template_used: kind,
        components: SummaryComponents {
            role,
            experience_level: level,
            years,
            top_skills,
            specializations,
            education,
        },
        alternatives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::SAMPLE_RESUME;
    use crate::analysis::TextAnalyzer;
    use crate::reference::ReferenceData;

    fn analyze(text: &str) -> ResumeAnalysis {
        let reference = ReferenceData::embedded().unwrap();
        TextAnalyzer::new(&reference).unwrap().analyze(text).unwrap()
    }

    #[test]
    fn test_experienced_summary_from_sample() {
        let result = generate_summary(&analyze(SAMPLE_RESUME));
        let c = &result.components;

        assert_eq!(c.role, "Software Engineer");
        assert_eq!(c.experience_level, ExperienceLevel::Senior);
        assert_eq!(c.years, "8+ years");
        assert_eq!(c.education.as_deref(), Some("Bachelor's"));
        assert_eq!(c.top_skills, vec!["Python", "Rust", "React"]);
        assert_eq!(c.specializations.len(), 2);
        assert!(c.specializations.contains(&"database management".to_string()));

        assert_eq!(result.template_used, TemplateKind::Experienced);
        assert!(result.summary.contains("Software Engineer"));
        assert!(result.summary.contains("8+ years"));
        assert!(!result.summary.contains('{'));
        assert!(result.summary.split(". ").count() <= 2);
        assert_eq!(result.alternatives.len(), 2);
    }

    #[test]
    fn test_entry_level_summary() {
        let result = generate_summary(&analyze("Intern at a bakery. B.A. in History."));
        let c = &result.components;
        assert_eq!(c.role, "Professional");
        assert_eq!(c.experience_level, ExperienceLevel::Entry);
        assert_eq!(c.years, "1-2 years");
        assert_eq!(result.template_used, TemplateKind::EntryLevel);
        assert!(result.summary.contains("Bachelor's"));
        assert!(result.summary.contains("Strong technical foundation"));
    }

    #[test]
    fn test_fallback_without_any_signal() {
        let result = generate_summary(&analyze("Gardening hobbyist."));
        assert_eq!(result.components.years, "recent graduate");
        assert_eq!(result.components.education, None);
        assert_eq!(result.template_used, TemplateKind::Experienced);
        assert!(result.summary.contains("multiple technologies"));
        assert!(result.summary.contains("innovative solutions"));
    }

    #[test]
    fn test_stated_years_take_precedence() {
        let analysis = analyze("Junior developer with 4 yrs of experience");
        let (level, years) = estimate_experience(&analysis, &analysis.text.to_lowercase());
        assert_eq!(level, ExperienceLevel::Mid);
        assert_eq!(years, "4 years");

        let analysis = analyze("Over 2 years building websites");
        let (level, years) = estimate_experience(&analysis, &analysis.text.to_lowercase());
        assert_eq!(level, ExperienceLevel::Entry);
        assert_eq!(years, "2 years");
    }

    #[test]
    fn test_every_pattern_compiles() {
        assert_eq!(YEARS_PATTERNS.len(), 4);
        let levels: Vec<&str> = EDUCATION_LEVELS.iter().map(|(level, _)| *level).collect();
        assert_eq!(levels, vec!["PhD", "Master's", "Bachelor's", "Associate"]);
    }

    #[test]
    fn test_education_needs_whole_words() {
        assert_eq!(detect_education("ph.d. in physics").as_deref(), Some("PhD"));
        assert_eq!(detect_education("mba, 2019").as_deref(), Some("Master's"));
        assert_eq!(detect_education("jobs at basecamp"), None);
        assert_eq!(detect_education("bs computer science").as_deref(), Some("Bachelor's"));
    }

    #[test]
    fn test_fit_two_sentences() {
        assert_eq!(
            fit_two_sentences("One. Two. Three.".to_string()),
            "One. Two."
        );
        assert_eq!(fit_two_sentences("Short and sweet".to_string()), "Short and sweet");

        // " and " at byte 40 is before the midpoint; the one at 85 is used.
        let long = format!("{} and {} and {}", "a".repeat(40), "c".repeat(40), "b".repeat(80));
        let fitted = fit_two_sentences(long);
        assert_eq!(
            fitted,
            format!("{} and {}. B{}", "a".repeat(40), "c".repeat(40), "b".repeat(79))
        );
    }

    #[test]
    fn test_summary_is_deterministic() {
        let analysis = analyze(SAMPLE_RESUME);
        assert_eq!(
            generate_summary(&analysis).summary,
            generate_summary(&analysis).summary
        );
    }
}
