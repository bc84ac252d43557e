use serde::{Deserialize, Serialize};

/// A crawled page: its normalized URL, the visible body text and, once
/// enriched, the keywords describing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Normalized URL of the page
    pub url: String,

    /// Extracted body text
    #[serde(rename = "html")]
    pub text: String,

    /// Keywords attached by the enrichment stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl PageRecord {
    /// Create a page record that has not been enriched yet
    pub fn new(url: String, text: String) -> Self {
        Self {
            url,
            text,
            keywords: None,
        }
    }

    /// Attach keywords to this record
    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = Some(keywords);
        self
    }

    /// Keywords of this page, empty when it was never enriched
    pub fn keywords(&self) -> &[String] {
        self.keywords.as_deref().unwrap_or_default()
    }
}

/// Pages a user has visited, in the order they were visited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitHistory {
    pub username: String,
    pub visited_pages: Vec<String>,
}

impl VisitHistory {
    pub fn new(username: impl Into<String>, visited_pages: Vec<String>) -> Self {
        Self {
            username: username.into(),
            visited_pages,
        }
    }
}

/// A user's aggregated interest in one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestEntry {
    pub keyword: String,

    /// Number of visited pages carrying the keyword
    pub count: usize,

    /// Pages that contributed to this entry, each listed once
    #[serde(rename = "relatives", default)]
    pub related_pages: Vec<String>,
}

/// A candidate page for a user together with its overlap score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "page")]
    pub page_url: String,
    pub score: usize,
}

/// Per-user output of the analysis and recommendation stages.
///
/// Deserializes from the user fixture format, where `interests` and
/// `recommendations` are empty or absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub visited_pages: Vec<String>,
    #[serde(default)]
    pub interests: Vec<InterestEntry>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

impl UserProfile {
    /// The visit history this profile was built from
    pub fn history(&self) -> VisitHistory {
        VisitHistory::new(self.username.clone(), self.visited_pages.clone())
    }

    /// Looks up the interest entry for `keyword`
    pub fn interest(&self, keyword: &str) -> Option<&InterestEntry> {
        self.interests.iter().find(|i| i.keyword == keyword)
    }
}

/// Combined output of a pipeline run: the page set plus per-user analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub page_info: Vec<PageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_data: Option<Vec<UserProfile>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_fixture_format() {
        let json = r#"[
            {"url": "https://example.com/", "html": "Welcome"},
            {"url": "https://example.com/ai", "html": "AI page", "keywords": ["ai", "ml"]}
        ]"#;
        let pages: Vec<PageRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].text, "Welcome");
        assert!(pages[0].keywords().is_empty());
        assert_eq!(pages[1].keywords(), ["ai", "ml"]);

        let out = serde_json::to_value(&pages[0]).unwrap();
        assert_eq!(out["html"], "Welcome");
        assert!(out.get("keywords").is_none());
    }

    #[test]
    fn test_user_fixture_format() {
        let json = r#"[
            {"username": "alice", "visited_pages": ["https://example.com/ai"], "interests": []}
        ]"#;
        let users: Vec<UserProfile> = serde_json::from_str(json).unwrap();
        assert_eq!(users[0].username, "alice");
        assert!(users[0].interests.is_empty());
        assert!(users[0].recommendations.is_empty());
        assert_eq!(users[0].history().visited_pages.len(), 1);
    }

    #[test]
    fn test_profile_field_names() {
        let profile = UserProfile {
            username: "bob".to_string(),
            visited_pages: vec![],
            interests: vec![InterestEntry {
                keyword: "rust".to_string(),
                count: 1,
                related_pages: vec!["https://example.com/rust".to_string()],
            }],
            recommendations: vec![Recommendation {
                page_url: "https://example.com/go".to_string(),
                score: 0,
            }],
        };
        let out = serde_json::to_value(&profile).unwrap();
        assert_eq!(out["interests"][0]["relatives"][0], "https://example.com/rust");
        assert_eq!(out["recommendations"][0]["page"], "https://example.com/go");
        assert_eq!(profile.interest("rust").map(|i| i.count), Some(1));
        assert!(profile.interest("go").is_none());
    }
}
