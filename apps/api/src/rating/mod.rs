//! Resume rating: seven fixed criteria, each scored 0–10, combined into a
//! weighted overall score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::sections::is_present;
use crate::analysis::skills::total_skills;
use crate::analysis::{round_to, ContactInfo, Readability, ResumeAnalysis, ResumeSection, SectionPresence, SkillMatches};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    SkillsDiversity,
    SkillsQuantity,
    ContactCompleteness,
    SectionsCompleteness,
    Readability,
    ProjectQuality,
    ContentLength,
}

impl Criterion {
    pub const ALL: [Criterion; 7] = [
        Criterion::SkillsDiversity,
        Criterion::SkillsQuantity,
        Criterion::ContactCompleteness,
        Criterion::SectionsCompleteness,
        Criterion::Readability,
        Criterion::ProjectQuality,
        Criterion::ContentLength,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Criterion::SkillsDiversity => "Skills Diversity",
            Criterion::SkillsQuantity => "Skills Quantity",
            Criterion::ContactCompleteness => "Contact Completeness",
            Criterion::SectionsCompleteness => "Sections Completeness",
            Criterion::Readability => "Readability",
            Criterion::ProjectQuality => "Project Quality",
            Criterion::ContentLength => "Content Length",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Criterion::SkillsDiversity => {
                "Variety of skill categories (technical, soft skills, tools)"
            }
            Criterion::SkillsQuantity => "Total number of skills mentioned throughout resume",
            Criterion::ContactCompleteness => "Presence of email, phone, LinkedIn, GitHub",
            Criterion::SectionsCompleteness => {
                "Essential sections: experience, education, skills, projects"
            }
            Criterion::Readability => "Text clarity, sentence length, and complexity",
            Criterion::ProjectQuality => "Number and quality of project descriptions",
            Criterion::ContentLength => "Appropriate resume length (not too short or long)",
        }
    }
}

/// Criterion weights. They sum to 1.0 so the overall score stays on the 0–10 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingWeights {
    pub skills_diversity: f64,
    pub skills_quantity: f64,
    pub contact_completeness: f64,
    pub sections_completeness: f64,
    pub readability: f64,
    pub project_quality: f64,
    pub content_length: f64,
}

impl Default for RatingWeights {
    fn default() -> Self {
        Self {
            skills_diversity: 0.20,
            skills_quantity: 0.15,
            contact_completeness: 0.10,
            sections_completeness: 0.15,
            readability: 0.15,
            project_quality: 0.15,
            content_length: 0.10,
        }
    }
}

impl RatingWeights {
    pub fn weight(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::SkillsDiversity => self.skills_diversity,
            Criterion::SkillsQuantity => self.skills_quantity,
            Criterion::ContactCompleteness => self.contact_completeness,
            Criterion::SectionsCompleteness => self.sections_completeness,
            Criterion::Readability => self.readability,
            Criterion::ProjectQuality => self.project_quality,
            Criterion::ContentLength => self.content_length,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingThresholds {
    pub min_skills: usize,
    pub ideal_skills: usize,
    pub min_word_count: usize,
    pub ideal_word_count: usize,
    pub max_word_count: usize,
    pub min_projects: usize,
    pub ideal_projects: usize,
    pub ideal_sentence_length: f64,
    pub max_sentence_length: f64,
}

impl Default for RatingThresholds {
    fn default() -> Self {
        Self {
            min_skills: 5,
            ideal_skills: 15,
            min_word_count: 150,
            ideal_word_count: 400,
            max_word_count: 800,
            min_projects: 1,
            ideal_projects: 3,
            ideal_sentence_length: 15.0,
            max_sentence_length: 25.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatingCategory {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Poor,
}

impl RatingCategory {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 8.5 => RatingCategory::Excellent,
            s if s >= 7.0 => RatingCategory::Good,
            s if s >= 5.5 => RatingCategory::Average,
            s if s >= 3.0 => RatingCategory::BelowAverage,
            _ => RatingCategory::Poor,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            RatingCategory::Excellent => "Outstanding resume with strong impact potential",
            RatingCategory::Good => "Solid resume with room for minor improvements",
            RatingCategory::Average => "Decent resume but needs significant improvements",
            RatingCategory::BelowAverage => "Resume needs major improvements to be competitive",
            RatingCategory::Poor => "Resume requires complete overhaul",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub criterion: Criterion,
    pub label: String,
    pub score: f64,
    /// Weight as a percentage.
    pub weight: f64,
    pub explanation: String,
    /// score × weight, rounded to one decimal.
    pub contribution: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRating {
    pub overall_score: f64,
    pub rating_category: RatingCategory,
    pub rating_description: String,
    /// Per-criterion scores rounded to one decimal.
    pub detailed_scores: BTreeMap<Criterion, f64>,
    /// Highest contribution first.
    pub score_breakdown: Vec<ScoreBreakdown>,
    /// Up to three weakest criteria scoring below 7, weakest first.
    pub improvement_priority: Vec<Criterion>,
}

impl ResumeRating {
    /// Rounded score for a criterion, 0.0 if absent.
    pub fn score(&self, criterion: Criterion) -> f64 {
        self.detailed_scores.get(&criterion).copied().unwrap_or(0.0)
    }
}

/// Scores below this are listed as improvement priorities.
const PRIORITY_CUTOFF: f64 = 7.0;
const MAX_PRIORITIES: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ResumeRater {
    pub weights: RatingWeights,
    pub thresholds: RatingThresholds,
}

impl ResumeRater {
    pub fn score_skills_diversity(&self, skills: &SkillMatches) -> f64 {
        let categories = skills.len() as f64;
        match skills.len() {
            0 => 0.0,
            n if n >= 5 => 10.0,
            n if n >= 3 => 7.0 + (categories - 3.0) * 1.5,
            _ => 4.0 + (categories - 1.0) * 1.5,
        }
    }

    pub fn score_skills_quantity(&self, skills: &SkillMatches) -> f64 {
        let t = &self.thresholds;
        let total = total_skills(skills);
        if total >= t.ideal_skills {
            10.0
        } else if total >= t.min_skills {
            let progress =
                (total - t.min_skills) as f64 / (t.ideal_skills - t.min_skills) as f64;
            5.0 + progress * 5.0
        } else {
            total as f64 * 5.0 / t.min_skills as f64
        }
    }

    pub fn score_contact_completeness(&self, contact: &ContactInfo) -> f64 {
        let essential = [&contact.email, &contact.phone]
            .iter()
            .filter(|field| field.is_some())
            .count() as f64;
        let bonus = [&contact.linkedin, &contact.github]
            .iter()
            .filter(|field| field.is_some())
            .count() as f64;
        (essential * 3.5 + bonus * 1.5).min(10.0)
    }

    pub fn score_sections_completeness(&self, sections: &SectionPresence) -> f64 {
        const ESSENTIAL: [ResumeSection; 3] = [
            ResumeSection::Experience,
            ResumeSection::Education,
            ResumeSection::Skills,
        ];
        const IMPORTANT: [ResumeSection; 2] = [ResumeSection::Summary, ResumeSection::Projects];
        const BONUS: [ResumeSection; 2] =
            [ResumeSection::Certifications, ResumeSection::Achievements];

        let count = |list: &[ResumeSection]| {
            list.iter().filter(|&&s| is_present(sections, s)).count() as f64
        };
        (count(&ESSENTIAL) * 2.0 + count(&IMPORTANT) * 1.5 + count(&BONUS) * 0.5).min(10.0)
    }

    pub fn score_readability(&self, readability: &Readability) -> f64 {
        let t = &self.thresholds;
        let length = readability.avg_sentence_length;
        let ratio = readability.complexity_ratio;

        let length_score = if length <= t.ideal_sentence_length {
            5.0
        } else if length <= t.max_sentence_length {
            let excess = length - t.ideal_sentence_length;
            let max_excess = t.max_sentence_length - t.ideal_sentence_length;
            5.0 - (excess / max_excess) * 2.0
        } else {
            3.0
        };

        // 20–40% complex words reads as professional without being dense.
        let complexity_score = if (0.2..=0.4).contains(&ratio) {
            5.0
        } else if ratio < 0.2 {
            3.0 + (ratio / 0.2) * 2.0
        } else {
            5.0 - ((ratio - 0.4) / 0.3) * 2.0
        };

        (length_score + complexity_score).clamp(0.0, 10.0)
    }

    pub fn score_project_quality(&self, projects: &[String]) -> f64 {
        let t = &self.thresholds;
        if projects.is_empty() {
            return 0.0;
        }

        let count = projects.len();
        let quantity_score = if count >= t.ideal_projects {
            5.0
        } else if count >= t.min_projects {
            3.0 + ((count - 1) as f64 / 2.0) * 2.0
        } else {
            0.0
        };

        let quality_score: f64 = projects
            .iter()
            .take(3)
            .map(|p| match p.split_whitespace().count() {
                w if w >= 15 => 1.67,
                w if w >= 8 => 1.0,
                _ => 0.5,
            })
            .sum();

        (quantity_score + quality_score).min(10.0)
    }

    pub fn score_content_length(&self, word_count: usize) -> f64 {
        let t = &self.thresholds;
        let words = word_count as f64;
        let min = t.min_word_count as f64;
        let ideal = t.ideal_word_count as f64;
        let max = t.max_word_count as f64;

        if word_count < t.min_word_count {
            words / min * 4.0
        } else if word_count <= t.ideal_word_count {
            7.0 + (words - min) / (ideal - min) * 3.0
        } else if word_count <= t.max_word_count {
            10.0 - (words - ideal) / (max - ideal) * 3.0
        } else {
            5.0
        }
    }

    /// Scores every criterion and combines them into the overall rating.
    pub fn rate(&self, analysis: &ResumeAnalysis) -> ResumeRating {
        let raw: Vec<(Criterion, f64)> = Criterion::ALL
            .iter()
            .map(|&criterion| {
                let score = match criterion {
                    Criterion::SkillsDiversity => self.score_skills_diversity(&analysis.skills),
                    Criterion::SkillsQuantity => self.score_skills_quantity(&analysis.skills),
                    Criterion::ContactCompleteness => {
                        self.score_contact_completeness(&analysis.contact_info)
                    }
                    Criterion::SectionsCompleteness => {
                        self.score_sections_completeness(&analysis.sections)
                    }
                    Criterion::Readability => self.score_readability(&analysis.readability),
                    Criterion::ProjectQuality => self.score_project_quality(&analysis.projects),
                    Criterion::ContentLength => {
                        self.score_content_length(analysis.readability.word_count)
                    }
                };
                (criterion, score)
            })
            .collect();

        let overall: f64 = raw
            .iter()
            .map(|(criterion, score)| score * self.weights.weight(*criterion))
            .sum();
        let overall_score = round_to(overall, 1);
        let category = RatingCategory::from_score(overall_score);

        ResumeRating {
            overall_score,
            rating_category: category,
            rating_description: category.description().to_string(),
            detailed_scores: raw.iter().map(|(c, s)| (*c, round_to(*s, 1))).collect(),
            score_breakdown: self.score_breakdown(&raw),
            improvement_priority: improvement_priorities(&raw),
        }
    }

    fn score_breakdown(&self, raw: &[(Criterion, f64)]) -> Vec<ScoreBreakdown> {
        let mut breakdown: Vec<ScoreBreakdown> = raw
            .iter()
            .map(|&(criterion, score)| {
                let weight = self.weights.weight(criterion);
                ScoreBreakdown {
                    criterion,
                    label: criterion.label().to_string(),
                    score: round_to(score, 1),
                    weight: round_to(weight * 100.0, 1),
                    explanation: criterion.explanation().to_string(),
                    contribution: round_to(score * weight, 1),
                }
            })
            .collect();
        breakdown.sort_by(|a, b| {
            b.contribution
                .partial_cmp(&a.contribution)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        breakdown
    }
}

fn improvement_priorities(raw: &[(Criterion, f64)]) -> Vec<Criterion> {
    let mut sorted = raw.to_vec();
    sorted.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    sorted
        .into_iter()
        .take(MAX_PRIORITIES)
        .filter(|(_, score)| *score < PRIORITY_CUTOFF)
        .map(|(criterion, _)| criterion)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fixtures::SAMPLE_RESUME;
    use crate::analysis::sections::detect_sections;
    use crate::analysis::TextAnalyzer;
    use crate::reference::ReferenceData;

    fn skills_with(categories: usize, per_category: usize) -> SkillMatches {
        (0..categories)
            .map(|c| {
                let skills = (0..per_category).map(|s| format!("skill-{c}-{s}")).collect();
                (format!("category_{c}"), skills)
            })
            .collect()
    }

    #[test]
    fn test_weights_sum_to_one() {
        let weights = RatingWeights::default();
        let sum: f64 = Criterion::ALL.iter().map(|c| weights.weight(*c)).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_skills_diversity_bands() {
        let rater = ResumeRater::default();
        assert_eq!(rater.score_skills_diversity(&skills_with(0, 1)), 0.0);
        assert_eq!(rater.score_skills_diversity(&skills_with(1, 1)), 4.0);
        assert_eq!(rater.score_skills_diversity(&skills_with(2, 1)), 5.5);
        assert_eq!(rater.score_skills_diversity(&skills_with(3, 1)), 7.0);
        assert_eq!(rater.score_skills_diversity(&skills_with(4, 1)), 8.5);
        assert_eq!(rater.score_skills_diversity(&skills_with(7, 1)), 10.0);
    }

    #[test]
    fn test_skills_quantity_interpolates() {
        let rater = ResumeRater::default();
        assert_eq!(rater.score_skills_quantity(&skills_with(1, 2)), 2.0);
        assert_eq!(rater.score_skills_quantity(&skills_with(2, 5)), 7.5);
        assert_eq!(rater.score_skills_quantity(&skills_with(3, 5)), 10.0);
    }

    #[test]
    fn test_contact_completeness() {
        let rater = ResumeRater::default();
        let mut contact = ContactInfo::default();
        assert_eq!(rater.score_contact_completeness(&contact), 0.0);
        contact.email = Some("a@b.io".into());
        contact.github = Some("github.com/a".into());
        assert_eq!(rater.score_contact_completeness(&contact), 5.0);
        contact.phone = Some("555-123-4567".into());
        contact.linkedin = Some("linkedin.com/in/a".into());
        assert_eq!(rater.score_contact_completeness(&contact), 10.0);
    }

    #[test]
    fn test_sections_completeness() {
        let rater = ResumeRater::default();
        let sections = detect_sections("Experience\nEducation\nSkills");
        assert_eq!(rater.score_sections_completeness(&sections), 6.0);
        let sections = detect_sections(
            "Summary Experience Education Skills Projects Certifications Awards",
        );
        assert_eq!(rater.score_sections_completeness(&sections), 10.0);
    }

    #[test]
    fn test_readability_scoring() {
        let rater = ResumeRater::default();
        let ideal = Readability {
            avg_sentence_length: 12.0,
            complexity_ratio: 0.3,
            ..Readability::default()
        };
        assert_eq!(rater.score_readability(&ideal), 10.0);

        let long_simple = Readability {
            avg_sentence_length: 30.0,
            complexity_ratio: 0.1,
            ..Readability::default()
        };
        // 3.0 + (3.0 + 0.5 * 2.0)
        assert_eq!(rater.score_readability(&long_simple), 7.0);

        let dense = Readability {
            avg_sentence_length: 20.0,
            complexity_ratio: 1.0,
            ..Readability::default()
        };
        // 4.0 + (5.0 - 4.0)
        assert!((rater.score_readability(&dense) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_project_quality() {
        let rater = ResumeRater::default();
        assert_eq!(rater.score_project_quality(&[]), 0.0);

        let short = vec!["Built a thing".to_string()];
        assert_eq!(rater.score_project_quality(&short), 3.5);

        let long = "word ".repeat(20);
        let three = vec![long.clone(), long.clone(), long];
        assert!((rater.score_project_quality(&three) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_content_length_bands() {
        let rater = ResumeRater::default();
        assert_eq!(rater.score_content_length(75), 2.0);
        assert_eq!(rater.score_content_length(150), 7.0);
        assert_eq!(rater.score_content_length(400), 10.0);
        assert_eq!(rater.score_content_length(600), 8.5);
        assert_eq!(rater.score_content_length(1200), 5.0);
    }

    #[test]
    fn test_rating_category_bands() {
        assert_eq!(RatingCategory::from_score(9.0), RatingCategory::Excellent);
        assert_eq!(RatingCategory::from_score(7.0), RatingCategory::Good);
        assert_eq!(RatingCategory::from_score(5.5), RatingCategory::Average);
        assert_eq!(RatingCategory::from_score(3.0), RatingCategory::BelowAverage);
        assert_eq!(RatingCategory::from_score(2.9), RatingCategory::Poor);
        assert_eq!(
            serde_json::to_string(&RatingCategory::BelowAverage).unwrap(),
            "\"Below Average\""
        );
    }

    #[test]
    fn test_priorities_are_weakest_below_cutoff() {
        let raw = vec![
            (Criterion::SkillsDiversity, 10.0),
            (Criterion::SkillsQuantity, 6.0),
            (Criterion::ContactCompleteness, 2.0),
            (Criterion::SectionsCompleteness, 9.0),
            (Criterion::Readability, 8.0),
            (Criterion::ProjectQuality, 7.5),
            (Criterion::ContentLength, 4.0),
        ];
        assert_eq!(
            improvement_priorities(&raw),
            vec![
                Criterion::ContactCompleteness,
                Criterion::ContentLength,
                Criterion::SkillsQuantity
            ]
        );

        let strong: Vec<_> = Criterion::ALL.iter().map(|c| (*c, 8.0)).collect();
        assert!(improvement_priorities(&strong).is_empty());
    }

    #[test]
    fn test_full_rating_is_bounded_and_sorted() {
        let reference = ReferenceData::embedded().unwrap();
        let analysis = TextAnalyzer::new(&reference)
            .unwrap()
            .analyze(SAMPLE_RESUME)
            .unwrap();
        let rating = ResumeRater::default().rate(&analysis);

        assert!((0.0..=10.0).contains(&rating.overall_score));
        assert_eq!(rating.detailed_scores.len(), 7);
        assert!(rating
            .detailed_scores
            .values()
            .all(|s| (0.0..=10.0).contains(s)));
        assert!(rating
            .score_breakdown
            .windows(2)
            .all(|w| w[0].contribution >= w[1].contribution));
        assert_eq!(rating.score(Criterion::ContactCompleteness), 10.0);
        assert_eq!(
            rating.rating_description,
            rating.rating_category.description()
        );
    }

    #[test]
    fn test_rating_is_deterministic() {
        let reference = ReferenceData::embedded().unwrap();
        let analysis = TextAnalyzer::new(&reference)
            .unwrap()
            .analyze(SAMPLE_RESUME)
            .unwrap();
        let rater = ResumeRater::default();
        let a = serde_json::to_string(&rater.rate(&analysis)).unwrap();
        let b = serde_json::to_string(&rater.rate(&analysis)).unwrap();
        assert_eq!(a, b);
    }
}
