use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").expect("valid regex")
});
static LINKEDIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com/in/[\w-]+").expect("valid regex"));
static GITHUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"github\.com/[\w-]+").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.linkedin.is_none()
            && self.github.is_none()
    }
}

/// First email, phone number, LinkedIn and GitHub profile found in the text.
/// Profile URLs are reported lowercase.
pub fn analyze_contact_info(text: &str) -> ContactInfo {
    let lower = text.to_lowercase();
    ContactInfo {
        email: EMAIL_RE.find(text).map(|m| m.as_str().to_string()),
        phone: PHONE_RE.find(text).map(|m| m.as_str().trim().to_string()),
        linkedin: LINKEDIN_RE.find(&lower).map(|m| m.as_str().to_string()),
        github: GITHUB_RE.find(&lower).map(|m| m.as_str().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Jane Doe | jane.doe@example.com | +1 (555) 123-4567\n\
                          LinkedIn.com/in/Jane-Doe | github.com/janedoe";

    #[test]
    fn test_extracts_all_fields() {
        let info = analyze_contact_info(HEADER);
        assert_eq!(info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(info.phone.as_deref(), Some("+1 (555) 123-4567"));
        assert_eq!(info.linkedin.as_deref(), Some("linkedin.com/in/jane-doe"));
        assert_eq!(info.github.as_deref(), Some("github.com/janedoe"));
        assert!(!info.is_empty());
    }

    #[test]
    fn test_plain_phone_number() {
        let info = analyze_contact_info("Phone: 555.987.6543");
        assert_eq!(info.phone.as_deref(), Some("555.987.6543"));
    }

    #[test]
    fn test_years_are_not_phone_numbers() {
        let info = analyze_contact_info("Acme Corp 2019 - 2023");
        assert!(info.phone.is_none());
    }

    #[test]
    fn test_no_contact_info() {
        let info = analyze_contact_info("Seasoned engineer with broad experience");
        assert!(info.is_empty());
        assert_eq!(serde_json::to_string(&info).unwrap(), "{}");
    }
}
