use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeSection {
    Contact,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Achievements,
}

impl ResumeSection {
    pub const ALL: [ResumeSection; 8] = [
        ResumeSection::Contact,
        ResumeSection::Summary,
        ResumeSection::Experience,
        ResumeSection::Education,
        ResumeSection::Skills,
        ResumeSection::Projects,
        ResumeSection::Certifications,
        ResumeSection::Achievements,
    ];

    /// Words whose presence anywhere in the text marks the section as present.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            ResumeSection::Contact => &["contact", "email", "phone", "address", "linkedin"],
            ResumeSection::Summary => &["summary", "profile", "objective", "about"],
            ResumeSection::Experience => {
                &["experience", "work", "employment", "career", "professional"]
            }
            ResumeSection::Education => &["education", "degree", "university", "college", "school"],
            ResumeSection::Skills => &["skills", "technical", "technologies", "competencies"],
            ResumeSection::Projects => &["projects", "portfolio", "work samples"],
            ResumeSection::Certifications => &["certifications", "certificates", "licensed"],
            ResumeSection::Achievements => {
                &["achievements", "awards", "honors", "accomplishments"]
            }
        }
    }

    /// Human-readable name, e.g. "Experience".
    pub fn title(self) -> &'static str {
        match self {
            ResumeSection::Contact => "Contact",
            ResumeSection::Summary => "Summary",
            ResumeSection::Experience => "Experience",
            ResumeSection::Education => "Education",
            ResumeSection::Skills => "Skills",
            ResumeSection::Projects => "Projects",
            ResumeSection::Certifications => "Certifications",
            ResumeSection::Achievements => "Achievements",
        }
    }
}

/// Presence flag for every section, keyed in declaration order.
pub type SectionPresence = BTreeMap<ResumeSection, bool>;

pub fn detect_sections(text: &str) -> SectionPresence {
    let lower = text.to_lowercase();
    ResumeSection::ALL
        .iter()
        .map(|&section| {
            let present = section.keywords().iter().any(|kw| lower.contains(kw));
            (section, present)
        })
        .collect()
}

pub fn is_present(sections: &SectionPresence, section: ResumeSection) -> bool {
    sections.get(&section).copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_section_is_reported() {
        let sections = detect_sections("");
        assert_eq!(sections.len(), 8);
        assert!(sections.values().all(|present| !present));
    }

    #[test]
    fn test_detects_headings_case_insensitively() {
        let sections = detect_sections("EDUCATION\nB.S. Computer Science\nSKILLS\nRust, Go");
        assert!(is_present(&sections, ResumeSection::Education));
        assert!(is_present(&sections, ResumeSection::Skills));
        assert!(!is_present(&sections, ResumeSection::Certifications));
    }

    #[test]
    fn test_serializes_with_snake_case_keys() {
        let json = serde_json::to_value(detect_sections("Awards: Dean's list")).unwrap();
        assert_eq!(json["achievements"], true);
        assert_eq!(json["projects"], false);
    }
}
