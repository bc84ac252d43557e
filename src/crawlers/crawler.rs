use crate::config::CrawlerConfig;
use crate::error::Result;
use crate::filter::UrlFilter;
use crate::normalize::normalize;
use crate::parsers::html;
use crate::results::PageRecord;
use std::collections::HashSet;
use url::Url;

/// Something that can turn a URL into rendered HTML.
///
/// Each call owns whatever browser resource it needs and releases it before
/// returning, whether or not the fetch succeeded.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    async fn render(&self, url: &str) -> Result<String>;
}

/// Depth-first, single-site crawler.
pub struct Crawler<R> {
    renderer: R,
    config: CrawlerConfig,
}

/// State owned by a single crawl.
///
/// `frontier` is a LIFO work-list. Links are pushed in reverse document
/// order so they pop in document order, which reproduces a recursive
/// pre-order walk.
struct CrawlContext {
    filter: UrlFilter,
    max_pages: Option<usize>,
    frontier: Vec<Url>,
    recorded: HashSet<String>,
    failed: HashSet<String>,
    results: Vec<PageRecord>,
}

impl CrawlContext {
    fn new(seed: Url, filter: UrlFilter, max_pages: Option<usize>) -> Self {
        Self {
            filter,
            max_pages,
            frontier: vec![seed],
            recorded: HashSet::new(),
            failed: HashSet::new(),
            results: Vec::new(),
        }
    }

    fn at_capacity(&self) -> bool {
        self.max_pages
            .is_some_and(|max| self.results.len() >= max)
    }

    /// Returns the normalized form of `url` if it still needs fetching
    fn admit(&self, url: &Url) -> Option<String> {
        if !self.filter.should_crawl(url) {
            ::log::debug!("Out of scope: {}", url);
            return None;
        }

        let normalized = normalize(url);
        if self.recorded.contains(&normalized) {
            ::log::trace!("Already recorded: {}", normalized);
            return None;
        }
        // A failed URL is not retried even when linked again
        if self.failed.contains(&normalized) {
            ::log::trace!("Already failed once: {}", normalized);
            return None;
        }
        Some(normalized)
    }

    fn record(&mut self, normalized: String, text: String) {
        self.recorded.insert(normalized.clone());
        self.results.push(PageRecord::new(normalized, text));
    }

    /// Queues the links found on `base` so the first one is explored next
    fn push_links(&mut self, base: &Url, links: &[String]) {
        for href in links.iter().rev() {
            match base.join(href) {
                // Children are fetched by their normalized address
                Ok(mut child) => {
                    child.set_query(None);
                    child.set_fragment(None);
                    let _ = child.set_username("");
                    let _ = child.set_password(None);
                    self.frontier.push(child);
                }
                Err(e) => ::log::trace!("Skipping unresolvable link {:?}: {}", href, e),
            }
        }
    }
}

impl<R: Renderer> Crawler<R> {
    pub fn new(renderer: R, config: CrawlerConfig) -> Self {
        Self { renderer, config }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Parses the seed and compiles the filter for a new crawl
    fn start(&self, seed: &str, max_pages: Option<usize>) -> Result<CrawlContext> {
        let seed_url = Url::parse(seed)?;
        let filter = UrlFilter::new(&seed_url, &self.config)?;
        Ok(CrawlContext::new(seed_url, filter, max_pages))
    }

    /// Crawls the site reachable from `seed`, returning page records in
    /// visit order.
    ///
    /// `max_pages` overrides the configured ceiling when given. Pages that
    /// fail to render are logged and contribute neither a record nor links;
    /// the rest of the crawl carries on.
    pub async fn crawl(&self, seed: &str, max_pages: Option<usize>) -> Vec<PageRecord> {
        let max_pages = max_pages.or(self.config.max_pages);
        ::log::info!("Starting crawl from {} (max pages: {:?})", seed, max_pages);

        let mut ctx = match self.start(seed, max_pages) {
            Ok(ctx) => ctx,
            Err(e) => {
                ::log::error!("Cannot crawl from {}: {}", seed, e);
                return Vec::new();
            }
        };

        while let Some(url) = ctx.frontier.pop() {
            let Some(normalized) = ctx.admit(&url) else {
                continue;
            };

            if ctx.at_capacity() {
                ::log::info!("Reached page limit of {}", ctx.results.len());
                break;
            }

            match self.renderer.render(url.as_str()).await {
                Ok(source) => {
                    ::log::info!("Fetched {}", url);
                    let parsed = html::parse(&source);
                    ctx.record(normalized, parsed.content);
                    ctx.push_links(&url, &parsed.links);
                }
                Err(e) => {
                    ::log::error!("Failed to fetch {}: {}", url, e);
                    ctx.failed.insert(normalized);
                }
            }
        }

        ::log::info!("Crawl finished with {} pages", ctx.results.len());
        ctx.results
    }
}
