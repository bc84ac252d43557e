use crate::config::{CrawlerConfig, DomainScope};
use crate::error::Result;
use crate::normalize::normalize;
use regex::Regex;
use url::Url;

/// Decides which discovered links belong to the crawl.
///
/// Scope is derived from the seed's host. With [`DomainScope::Contains`] the
/// normalized candidate only has to contain that host as a substring, so
/// `https://notexample.com/` passes for a seed on `example.com`, and so does
/// any URL whose path mentions it.
#[derive(Debug)]
pub struct UrlFilter {
    seed_host: String,
    scope: DomainScope,
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl UrlFilter {
    /// Create a filter scoped to `seed` with no pattern rules
    pub fn for_seed(seed: &Url, scope: DomainScope) -> Self {
        Self {
            seed_host: seed.host_str().unwrap_or_default().to_string(),
            scope,
            include_regexes: Vec::new(),
            exclude_regexes: Vec::new(),
        }
    }

    /// Create a filter from crawler configuration
    pub fn new(seed: &Url, config: &CrawlerConfig) -> Result<Self> {
        let mut filter = Self::for_seed(seed, config.domain_scope);

        for pattern in &config.include_patterns {
            filter.include_regexes.push(Regex::new(pattern)?);
        }
        for pattern in &config.exclude_patterns {
            filter.exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(filter)
    }

    /// Determine if a URL should be crawled based on all filtering rules
    pub fn should_crawl(&self, url: &Url) -> bool {
        let Some(host) = url.host_str() else {
            return false;
        };
        if host.is_empty() || self.seed_host.is_empty() {
            return false;
        }

        let normalized = normalize(url);
        if !self.is_in_domain_scope(host, &normalized) {
            return false;
        }

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|r| r.is_match(&normalized)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(&normalized))
    }

    fn is_in_domain_scope(&self, host: &str, normalized: &str) -> bool {
        match self.scope {
            DomainScope::Contains => normalized.contains(&self.seed_host),
            DomainScope::Strict => host.eq_ignore_ascii_case(&self.seed_host),
        }
    }
}
