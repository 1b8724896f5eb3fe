//! Report assembly and the in-memory buffer that backs report downloads.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::analysis::{compare_with_job, AnalysisError, JobMatch, ResumeAnalysis, SkillMatches, TextAnalyzer};
use crate::extraction::DocumentMetadata;
use crate::rating::{Criterion, RatingCategory, ResumeRater, ResumeRating};
use crate::reference::ReferenceData;
use crate::suggestions::{generate_suggestions, SuggestionReport};
use crate::summary::{generate_summary, ProfessionalSummary};

/// Everything derived from one resume text.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub analysis: ResumeAnalysis,
    pub rating: ResumeRating,
    pub suggestions: SuggestionReport,
    pub summary: ProfessionalSummary,
    pub job_comparison: Option<JobMatch>,
}

/// Runs analysis, rating, suggestions, summary and the optional job
/// comparison over extracted text. A blank `job_title` skips the comparison.
pub fn evaluate(
    analyzer: &TextAnalyzer,
    rater: &ResumeRater,
    reference: &ReferenceData,
    text: &str,
    job_title: Option<&str>,
) -> Result<Evaluation, AnalysisError> {
    let analysis = analyzer.analyze(text)?;
    let rating = rater.rate(&analysis);

    let job_comparison = match job_title.map(str::trim).filter(|t| !t.is_empty()) {
        Some(title) => Some(compare_with_job(&analysis, reference, title)?),
        None => None,
    };

    let suggestions = generate_suggestions(&analysis, &rating);
    let summary = generate_summary(&analysis);
    info!(
        score = rating.overall_score,
        category = ?rating.rating_category,
        suggestions = suggestions.total_suggestions,
        "Resume evaluated"
    );

    Ok(Evaluation {
        analysis,
        rating,
        suggestions,
        summary,
        job_comparison,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct ResumeReport {
    pub overall_score: f64,
    pub rating_category: RatingCategory,
    pub skills_found: SkillMatches,
    pub suggestions: SuggestionReport,
    pub professional_summary: String,
    pub detailed_scores: BTreeMap<Criterion, f64>,
    pub job_comparison: Option<JobMatch>,
    pub metadata: Option<DocumentMetadata>,
    pub generated_at: DateTime<Utc>,
}

/// Top-level shape of the downloadable JSON file.
#[derive(Debug, Clone, Serialize)]
pub struct ReportDocument {
    pub resume_analysis_report: ResumeReport,
}

pub fn build_report(evaluation: &Evaluation, metadata: Option<&DocumentMetadata>) -> ReportDocument {
    ReportDocument {
        resume_analysis_report: ResumeReport {
            overall_score: evaluation.rating.overall_score,
            rating_category: evaluation.rating.rating_category,
            skills_found: evaluation.analysis.skills.clone(),
            suggestions: evaluation.suggestions.clone(),
            professional_summary: evaluation.summary.summary.clone(),
            detailed_scores: evaluation.rating.detailed_scores.clone(),
            job_comparison: evaluation.job_comparison.clone(),
            metadata: metadata.cloned(),
            generated_at: Utc::now(),
        },
    }
}

// ──────────────────────────────────────────────
// Report buffer
// ──────────────────────────────────────────────

#[derive(Default)]
struct Buffer {
    reports: HashMap<Uuid, Arc<ReportDocument>>,
    order: VecDeque<Uuid>,
}

/// Keeps the most recent reports for download. Oldest entries are evicted
/// once `capacity` is reached.
#[derive(Clone)]
pub struct ReportStore {
    inner: Arc<RwLock<Buffer>>,
    capacity: usize,
}

impl ReportStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Buffer::default())),
            capacity: capacity.max(1),
        }
    }

    pub async fn insert(&self, report: ReportDocument) -> Uuid {
        let id = Uuid::new_v4();
        let mut buffer = self.inner.write().await;

        while buffer.order.len() >= self.capacity {
            match buffer.order.pop_front() {
                Some(evicted) => {
                    buffer.reports.remove(&evicted);
                    debug!("Evicted report {evicted}");
                }
                None => break,
            }
        }
        buffer.order.push_back(id);
        buffer.reports.insert(id, Arc::new(report));
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<ReportDocument>> {
        self.inner.read().await.reports.get(&id).cloned()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }
}
