use unicode_segmentation::UnicodeSegmentation;

const PROJECT_INDICATORS: &[&str] = &[
    "developed",
    "built",
    "created",
    "designed",
    "implemented",
    "project",
    "application",
    "system",
    "website",
    "app",
];

/// Sentences shorter than this read as skill mentions, not project write-ups.
const MIN_PROJECT_WORDS: usize = 9;
const MAX_PROJECTS: usize = 5;

/// Sentences that describe project work, in document order.
///
/// Segmentation follows UAX #29, so line breaks end a sentence and each
/// resume bullet is judged on its own.
pub fn detect_projects(text: &str) -> Vec<String> {
    text.unicode_sentences()
        .filter(|sentence| {
            let lower = sentence.to_lowercase();
            PROJECT_INDICATORS.iter().any(|ind| lower.contains(ind))
        })
        .filter(|sentence| sentence.split_whitespace().count() >= MIN_PROJECT_WORDS)
        .map(|sentence| sentence.trim().to_string())
        .take(MAX_PROJECTS)
        .collect()
}
