//! Job comparison. Checks a resume against the keyword list of a target job title.

use serde::{Deserialize, Serialize};

use super::{round_to, AnalysisError, ResumeAnalysis};
use crate::reference::ReferenceData;

const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub job_title: String,
    pub required_keywords: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    /// Percentage of required keywords present, 0–100.
    pub match_score: f64,
    pub recommendations: Vec<String>,
    pub verdict: String,
}

/// Compares the analyzed resume text with the keywords stored for `job_title`.
/// Keywords are matched case-insensitively anywhere in the resume text.
pub fn compare_with_job(
    analysis: &ResumeAnalysis,
    reference: &ReferenceData,
    job_title: &str,
) -> Result<JobMatch, AnalysisError> {
    let required = reference
        .keywords_for(job_title)
        .ok_or_else(|| AnalysisError::UnknownJobTitle(job_title.trim().to_string()))?;

    let text_lower = analysis.text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = required
        .iter()
        .cloned()
        .partition(|kw| text_lower.contains(&kw.to_lowercase()));

    let match_score = if required.is_empty() {
        0.0
    } else {
        round_to(matched.len() as f64 / required.len() as f64 * 100.0, 2)
    };

    let recommendations = missing
        .iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|kw| format!("Add '{kw}' to relevant sections"))
        .collect();
    let verdict = build_verdict(match_score, &missing);

    Ok(JobMatch {
        job_title: job_title.trim().to_lowercase(),
        required_keywords: required.to_vec(),
        matched_keywords: matched,
        missing_keywords: missing,
        match_score,
        recommendations,
        verdict,
    })
}

fn build_verdict(score: f64, missing: &[String]) -> String {
    let top_gaps: Vec<&str> = missing.iter().take(3).map(String::as_str).collect();

    if score >= 80.0 {
        "Strong match. Your resume covers most keywords for this role.".to_string()
    } else if score >= 50.0 {
        format!(
            "Moderate match ({score:.0}%). Consider adding: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low match ({score:.0}%). Significant gaps: {}.",
            top_gaps.join(", ")
        )
    }
}
