//! JSON fixture files for page sets and user histories.

use crate::error::Result;
use crate::results::{PageRecord, UserProfile, VisitHistory};
use std::fs;
use std::path::Path;

/// Reads a page fixture (`[{ url, html, keywords? }]`)
pub fn load_pages<P: AsRef<Path>>(path: P) -> Result<Vec<PageRecord>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Writes pages in the same format [`load_pages`] reads
pub fn save_pages<P: AsRef<Path>>(path: P, pages: &[PageRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(pages)?;
    fs::write(path, json)?;
    Ok(())
}

/// Reads a user fixture (`[{ username, visited_pages, interests, recommendations? }]`)
/// and keeps only the visit histories; interests and recommendations are
/// always recomputed.
pub fn load_users<P: AsRef<Path>>(path: P) -> Result<Vec<VisitHistory>> {
    let contents = fs::read_to_string(path)?;
    let users: Vec<UserProfile> = serde_json::from_str(&contents)?;
    Ok(users.iter().map(UserProfile::history).collect())
}
