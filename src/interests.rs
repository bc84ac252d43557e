use crate::normalize::normalize_lossy;
use crate::results::{InterestEntry, PageRecord, UserProfile, VisitHistory};
use std::collections::{HashMap, HashSet};

/// Builds a ranked interest profile for every user.
///
/// Each visited page contributes one count to every distinct keyword it
/// carries. Visits are not deduplicated: a page listed twice in a history
/// counts twice. Visited pages missing from `pages` are ignored. Profiles come
/// back in input order with no recommendations yet.
pub fn analyze(histories: &[VisitHistory], pages: &[PageRecord]) -> Vec<UserProfile> {
    let index: HashMap<&str, &PageRecord> =
        pages.iter().map(|page| (page.url.as_str(), page)).collect();

    histories
        .iter()
        .map(|history| UserProfile {
            username: history.username.clone(),
            visited_pages: history.visited_pages.clone(),
            interests: interests_for(history, &index),
            recommendations: Vec::new(),
        })
        .collect()
}

fn interests_for(history: &VisitHistory, index: &HashMap<&str, &PageRecord>) -> Vec<InterestEntry> {
    let mut interests: Vec<InterestEntry> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for visited in &history.visited_pages {
        let Some(page) = index.get(normalize_lossy(visited).as_str()) else {
            ::log::debug!("{} visited {} which was not crawled", history.username, visited);
            continue;
        };

        let mut seen_on_page = HashSet::new();
        for keyword in page.keywords() {
            if !seen_on_page.insert(keyword.as_str()) {
                continue;
            }

            match positions.get(keyword) {
                Some(&position) => {
                    let entry = &mut interests[position];
                    entry.count += 1;
                    if !entry.related_pages.contains(&page.url) {
                        entry.related_pages.push(page.url.clone());
                    }
                }
                None => {
                    positions.insert(keyword.clone(), interests.len());
                    interests.push(InterestEntry {
                        keyword: keyword.clone(),
                        count: 1,
                        related_pages: vec![page.url.clone()],
                    });
                }
            }
        }
    }

    interests.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    interests
}
