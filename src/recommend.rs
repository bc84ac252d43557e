use crate::normalize::normalize_lossy;
use crate::results::{PageRecord, Recommendation, UserProfile};
use std::collections::{HashMap, HashSet};

/// Fills in recommendations for every profile.
///
/// Every page the user has not visited is scored and listed, including those
/// scoring zero. Ties keep the order of `pages`.
pub fn recommend(mut profiles: Vec<UserProfile>, pages: &[PageRecord]) -> Vec<UserProfile> {
    for profile in profiles.iter_mut() {
        profile.recommendations = recommendations_for(profile, pages);
        ::log::debug!(
            "{} recommendations for {}",
            profile.recommendations.len(),
            profile.username
        );
    }
    profiles
}

/// Scores the pages `profile` has not visited, highest first
pub fn recommendations_for(profile: &UserProfile, pages: &[PageRecord]) -> Vec<Recommendation> {
    let visited: HashSet<String> = profile
        .visited_pages
        .iter()
        .map(|url| normalize_lossy(url))
        .collect();
    let weights: HashMap<&str, usize> = profile
        .interests
        .iter()
        .map(|interest| (interest.keyword.as_str(), interest.count))
        .collect();

    let mut recommendations: Vec<Recommendation> = pages
        .iter()
        .filter(|page| !visited.contains(&page.url))
        .map(|page| Recommendation {
            page_url: page.url.clone(),
            score: score(page, &weights),
        })
        .collect();

    // stable, so equal scores stay in page order
    recommendations.sort_by(|a, b| b.score.cmp(&a.score));
    recommendations
}

/// Sum of the interest counts of every keyword on `page`
fn score(page: &PageRecord, weights: &HashMap<&str, usize>) -> usize {
    page.keywords()
        .iter()
        .filter_map(|keyword| weights.get(keyword.as_str()))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interests::analyze;
    use crate::results::VisitHistory;

    fn page(url: &str, keywords: &[&str]) -> PageRecord {
        PageRecord::new(url.to_string(), String::new())
            .with_keywords(keywords.iter().map(|k| k.to_string()).collect())
    }

    fn scores(profile: &UserProfile) -> Vec<(&str, usize)> {
        profile
            .recommendations
            .iter()
            .map(|r| (r.page_url.as_str(), r.score))
            .collect()
    }

    fn site() -> Vec<PageRecord> {
        vec![
            page("https://example.com/a", &["ai"]),
            page("https://example.com/b", &["ai", "ml"]),
            page("https://example.com/db", &["db"]),
            page("https://example.com/ml", &["ml"]),
            page("https://example.com/ai", &["ai"]),
        ]
    }

    #[test]
    fn test_scores_by_shared_interest_weight() {
        let pages = site();
        let history = VisitHistory::new(
            "alice",
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/b".to_string(),
            ],
        );
        let profiles = recommend(analyze(&[history], &pages), &pages);

        assert_eq!(
            scores(&profiles[0]),
            vec![
                ("https://example.com/ai", 2),
                ("https://example.com/ml", 1),
                ("https://example.com/db", 0),
            ]
        );
    }

    #[test]
    fn test_ties_keep_page_order() {
        let pages = vec![
            page("https://example.com/x", &["db"]),
            page("https://example.com/seen", &["ai"]),
            page("https://example.com/y", &["ai"]),
            page("https://example.com/z", &[]),
            page("https://example.com/w", &["ai"]),
            PageRecord::new("https://example.com/raw".to_string(), String::new()),
        ];
        let history = VisitHistory::new("bob", vec!["https://example.com/seen".to_string()]);
        let profiles = recommend(analyze(&[history], &pages), &pages);

        assert_eq!(
            scores(&profiles[0]),
            vec![
                ("https://example.com/y", 1),
                ("https://example.com/w", 1),
                ("https://example.com/x", 0),
                ("https://example.com/z", 0),
                ("https://example.com/raw", 0),
            ]
        );
    }

    #[test]
    fn test_recommendations_are_exactly_the_unvisited_pages() {
        let pages = site();
        let visited = vec![
            "https://example.com/b?utm=feed".to_string(),
            "https://example.com/not-crawled".to_string(),
        ];
        let profiles = recommend(
            analyze(&[VisitHistory::new("carol", visited)], &pages),
            &pages,
        );

        let recommended: HashSet<&str> = profiles[0]
            .recommendations
            .iter()
            .map(|r| r.page_url.as_str())
            .collect();
        let expected: HashSet<&str> = [
            "https://example.com/a",
            "https://example.com/db",
            "https://example.com/ml",
            "https://example.com/ai",
        ]
        .into_iter()
        .collect();
        assert_eq!(recommended, expected);
        assert_eq!(profiles[0].recommendations.len(), 4);
    }

    #[test]
    fn test_user_without_interests_gets_all_pages_at_zero() {
        let pages = site();
        let profiles = recommend(analyze(&[VisitHistory::new("dave", vec![])], &pages), &pages);

        let recs = &profiles[0].recommendations;
        assert_eq!(recs.len(), pages.len());
        assert!(recs.iter().all(|r| r.score == 0));
        let order: Vec<&str> = recs.iter().map(|r| r.page_url.as_str()).collect();
        let page_order: Vec<&str> = pages.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(order, page_order);
    }

    #[test]
    fn test_repeated_keyword_on_candidate_counts_each_time() {
        let interests = analyze(
            &[VisitHistory::new("erin", vec!["https://example.com/a".to_string()])],
            &[page("https://example.com/a", &["ai"])],
        );
        let candidates = vec![
            page("https://example.com/c", &["ai", "ai"]),
            page("https://example.com/d", &["ai"]),
        ];
        let recs = recommendations_for(&interests[0], &candidates);
        assert_eq!(recs[0].page_url, "https://example.com/c");
        assert_eq!(recs[0].score, 2);
        assert_eq!(recs[1].score, 1);
    }

    #[test]
    fn test_recommend_replaces_previous_recommendations() {
        let pages = site();
        let mut profiles = analyze(&[VisitHistory::new("frank", vec![])], &pages);
        profiles[0].recommendations = vec![Recommendation {
            page_url: "https://stale.example/".to_string(),
            score: 99,
        }];

        let profiles = recommend(profiles, &pages);
        assert!(
            profiles[0]
                .recommendations
                .iter()
                .all(|r| r.page_url != "https://stale.example/")
        );
    }
}
