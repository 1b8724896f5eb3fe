//! Static reference data: the skills database and per-job keyword lists.
//!
//! Both are plain JSON objects loaded once at startup and shared read-only.
//! When no path is configured the copies under `data/` compiled into the
//! binary are used.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

const EMBEDDED_SKILLS: &str = include_str!("../../data/skills_database.json");
const EMBEDDED_JOB_KEYWORDS: &str = include_str!("../../data/job_keywords.json");

/// Category name → known skill strings. Categories iterate sorted by name;
/// skills keep file order.
pub type SkillsDatabase = BTreeMap<String, Vec<String>>;

/// Lowercase job title → keywords expected on a matching resume.
pub type JobKeywords = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ReferenceDataError {
    #[error("Reference file not found at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub skills: SkillsDatabase,
    pub job_keywords: JobKeywords,
}

impl ReferenceData {
    /// Reference data compiled into the binary.
    pub fn embedded() -> Result<Self, ReferenceDataError> {
        Ok(Self {
            skills: parse_skills(EMBEDDED_SKILLS, "embedded skills database")?,
            job_keywords: parse_job_keywords(EMBEDDED_JOB_KEYWORDS, "embedded job keywords")?,
        })
    }

    /// Loads each file from disk when a path is given, else falls back to the
    /// embedded copy for that file only.
    pub fn load(
        skills_path: Option<&Path>,
        keywords_path: Option<&Path>,
    ) -> Result<Self, ReferenceDataError> {
        let data = match (skills_path, keywords_path) {
            (None, None) => Self::embedded()?,
            _ => Self {
                skills: match skills_path {
                    Some(path) => load_skills(path)?,
                    None => parse_skills(EMBEDDED_SKILLS, "embedded skills database")?,
                },
                job_keywords: match keywords_path {
                    Some(path) => load_job_keywords(path)?,
                    None => parse_job_keywords(EMBEDDED_JOB_KEYWORDS, "embedded job keywords")?,
                },
            },
        };

        info!(
            "Reference data loaded: {} skill categories ({} skills), {} job titles",
            data.skills.len(),
            data.skills.values().map(Vec::len).sum::<usize>(),
            data.job_keywords.len()
        );

        Ok(data)
    }

    /// Known job titles in display order.
    pub fn job_titles(&self) -> Vec<String> {
        self.job_keywords.keys().cloned().collect()
    }

    /// Case-insensitive job title lookup.
    pub fn keywords_for(&self, job_title: &str) -> Option<&[String]> {
        self.job_keywords
            .get(&job_title.trim().to_lowercase())
            .map(Vec::as_slice)
    }
}

pub fn load_skills(path: &Path) -> Result<SkillsDatabase, ReferenceDataError> {
    let raw = read_file(path)?;
    parse_skills(&raw, &path.display().to_string())
}

pub fn load_job_keywords(path: &Path) -> Result<JobKeywords, ReferenceDataError> {
    let raw = read_file(path)?;
    parse_job_keywords(&raw, &path.display().to_string())
}

fn read_file(path: &Path) -> Result<String, ReferenceDataError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_skills(raw: &str, name: &str) -> Result<SkillsDatabase, ReferenceDataError> {
    serde_json::from_str(raw).map_err(|source| ReferenceDataError::Json {
        name: name.to_string(),
        source,
    })
}

fn parse_job_keywords(raw: &str, name: &str) -> Result<JobKeywords, ReferenceDataError> {
    let parsed: JobKeywords = serde_json::from_str(raw).map_err(|source| {
        ReferenceDataError::Json {
            name: name.to_string(),
            source,
        }
    })?;
    // Titles are looked up lowercase.
    Ok(parsed
        .into_iter()
        .map(|(title, keywords)| (title.to_lowercase(), keywords))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_data_parses() {
        let data = ReferenceData::embedded().unwrap();
        assert!(data.skills.contains_key("programming_languages"));
        assert!(data.skills.contains_key("soft_skills"));
        assert!(data.keywords_for("software engineer").is_some());
    }

    #[test]
    fn test_keywords_lookup_is_case_insensitive() {
        let data = ReferenceData::embedded().unwrap();
        assert_eq!(
            data.keywords_for("Data Scientist"),
            data.keywords_for("data scientist")
        );
        assert!(data.keywords_for("Astronaut").is_none());
    }

    #[test]
    fn test_load_from_files() {
        let mut skills = tempfile::NamedTempFile::new().unwrap();
        write!(skills, r#"{{"languages": ["Rust", "Zig"]}}"#).unwrap();
        let mut jobs = tempfile::NamedTempFile::new().unwrap();
        write!(jobs, r#"{{"Systems Engineer": ["kernels"]}}"#).unwrap();

        let data = ReferenceData::load(Some(skills.path()), Some(jobs.path())).unwrap();
        assert_eq!(data.skills["languages"], vec!["Rust", "Zig"]);
        assert_eq!(data.job_titles(), vec!["systems engineer"]);
    }

    #[test]
    fn test_load_without_paths_uses_embedded_data() {
        let loaded = ReferenceData::load(None, None).unwrap();
        let embedded = ReferenceData::embedded().unwrap();
        assert_eq!(loaded.job_titles(), embedded.job_titles());
        assert_eq!(loaded.skills, embedded.skills);
    }

    #[test]
    fn test_load_mixes_file_and_embedded_data() {
        let mut jobs = tempfile::NamedTempFile::new().unwrap();
        write!(jobs, r#"{{"Systems Engineer": ["kernels"]}}"#).unwrap();

        let data = ReferenceData::load(None, Some(jobs.path())).unwrap();
        assert!(data.skills.contains_key("programming_languages"));
        assert_eq!(data.job_titles(), vec!["systems engineer"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_skills(Path::new("/nonexistent/skills.json")).unwrap_err();
        assert!(matches!(err, ReferenceDataError::Io { .. }));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let err = load_job_keywords(file.path()).unwrap_err();
        assert!(matches!(err, ReferenceDataError::Json { .. }));
    }
}
