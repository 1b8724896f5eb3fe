use std::sync::Arc;

use crate::analysis::TextAnalyzer;
use crate::config::Config;
use crate::rating::ResumeRater;
use crate::reference::ReferenceData;
use crate::report::ReportStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skills database and job keywords, read-only after startup.
    pub reference: Arc<ReferenceData>,
    pub analyzer: Arc<TextAnalyzer>,
    pub rater: Arc<ResumeRater>,
    /// Recent reports, kept for download.
    pub reports: ReportStore,
}

impl AppState {
    pub fn new(config: Config, reference: ReferenceData) -> anyhow::Result<Self> {
        let analyzer = TextAnalyzer::new(&reference)?;
        let reports = ReportStore::new(config.report_cache_capacity);
        Ok(Self {
            config,
            reference: Arc::new(reference),
            analyzer: Arc::new(analyzer),
            rater: Arc::new(ResumeRater::default()),
            reports,
        })
    }
}
