use std::collections::BTreeMap;

use regex::Regex;

use crate::reference::SkillsDatabase;

/// Category → skills found in the resume. Categories with no hits are absent.
pub type SkillMatches = BTreeMap<String, Vec<String>>;

/// Precompiled whole-word patterns for every skill in the database.
///
/// A boundary is the start/end of text or any char outside `[A-Za-z0-9_]`
/// (Unicode aware), so `C++`, `C#` and `Node.js` match as written.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    categories: Vec<(String, Vec<(String, Regex)>)>,
}

impl SkillMatcher {
    pub fn new(database: &SkillsDatabase) -> Result<Self, regex::Error> {
        let mut categories = Vec::with_capacity(database.len());
        for (category, skills) in database {
            let mut patterns = Vec::with_capacity(skills.len());
            for skill in skills {
                let trimmed = skill.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let pattern = format!(
                    r"(?:^|\W){}(?:\W|$)",
                    regex::escape(&trimmed.to_lowercase())
                );
                patterns.push((skill.clone(), Regex::new(&pattern)?));
            }
            categories.push((category.clone(), patterns));
        }
        Ok(Self { categories })
    }

    pub fn extract(&self, text: &str) -> SkillMatches {
        let text_lower = text.to_lowercase();
        self.categories
            .iter()
            .filter_map(|(category, patterns)| {
                let found: Vec<String> = patterns
                    .iter()
                    .filter(|(_, re)| re.is_match(&text_lower))
                    .map(|(skill, _)| skill.clone())
                    .collect();
                (!found.is_empty()).then(|| (category.clone(), found))
            })
            .collect()
    }
}

/// Total number of skills across all categories.
pub fn total_skills(skills: &SkillMatches) -> usize {
    skills.values().map(Vec::len).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> SkillMatcher {
        let mut db = SkillsDatabase::new();
        db.insert(
            "programming_languages".to_string(),
            vec!["Python".into(), "C++".into(), "C#".into(), "Java".into()],
        );
        db.insert(
            "web_technologies".to_string(),
            vec!["Node.js".into(), "React".into()],
        );
        db.insert("soft_skills".to_string(), vec!["Leadership".into()]);
        SkillMatcher::new(&db).unwrap()
    }

    #[test]
    fn test_matches_case_insensitively() {
        let skills = matcher().extract("Built services in PYTHON and react.");
        assert_eq!(skills["programming_languages"], vec!["Python"]);
        assert_eq!(skills["web_technologies"], vec!["React"]);
    }

    #[test]
    fn test_does_not_match_inside_words() {
        let skills = matcher().extract("Experienced with JavaScript only");
        assert!(!skills.contains_key("programming_languages"));
    }

    #[test]
    fn test_symbol_skills_match() {
        let skills = matcher().extract("Languages: C++, C# and Node.js");
        assert_eq!(skills["programming_languages"], vec!["C++", "C#"]);
        assert_eq!(skills["web_technologies"], vec!["Node.js"]);
    }

    #[test]
    fn test_empty_categories_are_dropped() {
        let skills = matcher().extract("Showed leadership on every team");
        assert_eq!(skills.len(), 1);
        assert_eq!(total_skills(&skills), 1);
    }
}
