//! Resume text analysis: skills, keywords, projects, contact details, section
//! presence and readability. Pure functions over the extracted text; the only
//! shared input is the skills database.

pub mod contact;
pub mod job_match;
pub mod keywords;
pub mod projects;
pub mod readability;
pub mod sections;
pub mod skills;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::debug;

use crate::reference::ReferenceData;

pub use contact::ContactInfo;
pub use job_match::{compare_with_job, JobMatch};
pub use readability::Readability;
pub use sections::{ResumeSection, SectionPresence};
pub use skills::{SkillMatcher, SkillMatches};

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("No text provided for analysis")]
    EmptyText,

    #[error("Job title \"{0}\" not found in database")]
    UnknownJobTitle(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryStats {
    pub total_skills_found: usize,
    pub skills_categories: usize,
    pub projects_found: usize,
    pub sections_present: usize,
    pub has_contact_info: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeAnalysis {
    /// Source text, kept for the summary and job comparison steps.
    #[serde(skip_serializing)]
    pub text: String,
    pub skills: SkillMatches,
    pub keywords: Vec<String>,
    pub projects: Vec<String>,
    pub contact_info: ContactInfo,
    pub sections: SectionPresence,
    pub readability: Readability,
    pub summary_stats: SummaryStats,
}

impl ResumeAnalysis {
    /// RNG seeded from the SHA-256 of the text. Template picks made with it
    /// are stable for a given resume.
    pub fn rng(&self) -> StdRng {
        let seed: [u8; 32] = Sha256::digest(self.text.as_bytes()).into();
        StdRng::from_seed(seed)
    }
}

/// Analyzer bound to one skills database. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    skills: SkillMatcher,
}

impl TextAnalyzer {
    pub fn new(reference: &ReferenceData) -> Result<Self, regex::Error> {
        Ok(Self {
            skills: SkillMatcher::new(&reference.skills)?,
        })
    }

    pub fn analyze(&self, text: &str) -> Result<ResumeAnalysis, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyText);
        }

        let skills = self.skills.extract(text);
        let keywords = keywords::extract_keywords(text);
        let projects = projects::detect_projects(text);
        let contact_info = contact::analyze_contact_info(text);
        let sections = sections::detect_sections(text);
        let readability = readability::calculate_readability(text);

        let summary_stats = SummaryStats {
            total_skills_found: skills::total_skills(&skills),
            skills_categories: skills.len(),
            projects_found: projects.len(),
            sections_present: sections.values().filter(|present| **present).count(),
            has_contact_info: !contact_info.is_empty(),
        };
        debug!(
            skills = summary_stats.total_skills_found,
            projects = summary_stats.projects_found,
            sections = summary_stats.sections_present,
            "Resume analyzed"
        );

        Ok(ResumeAnalysis {
            text: text.to_string(),
            skills,
            keywords,
            projects,
            contact_info,
            sections,
            readability,
            summary_stats,
        })
    }
}

/// Rounds to `places` decimals, sending exact ties to the even digit.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}
