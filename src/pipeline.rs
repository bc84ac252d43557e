use crate::config::PipelineConfig;
use crate::crawlers::{Crawler, Renderer, WebDriverRenderer};
use crate::error::Result;
use crate::interests::analyze;
use crate::keywords::{BatchOptions, KeywordExtractor, OpenAiKeywordExtractor, enrich_pages};
use crate::recommend::recommend;
use crate::results::{PageRecord, Report, UserProfile, VisitHistory};

/// Crawl, enrich, analyze and recommend, wired together.
pub struct Pipeline<R, E> {
    crawler: Crawler<R>,
    extractor: E,
    batch: BatchOptions,
}

impl Pipeline<WebDriverRenderer, OpenAiKeywordExtractor> {
    /// Build the production pipeline: WebDriver rendering and OpenAI keywords
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let renderer = WebDriverRenderer::new(&config.crawler);
        let extractor = OpenAiKeywordExtractor::new(&config.keywords)?;
        Ok(Self::new(
            Crawler::new(renderer, config.crawler.clone()),
            extractor,
            BatchOptions::from(&config.keywords),
        ))
    }
}

impl<R: Renderer, E: KeywordExtractor> Pipeline<R, E> {
    pub fn new(crawler: Crawler<R>, extractor: E, batch: BatchOptions) -> Self {
        Self {
            crawler,
            extractor,
            batch,
        }
    }

    /// Crawls `seed` and attaches keywords to every page found
    pub async fn parse_site(&self, seed: &str, max_pages: Option<usize>) -> Vec<PageRecord> {
        let pages = self.crawler.crawl(seed, max_pages).await;
        enrich_pages(pages, &self.extractor, self.batch).await
    }

    /// Full run: crawl, enrich, then profile and recommend for each user
    pub async fn analyze_site(
        &self,
        seed: &str,
        max_pages: Option<usize>,
        histories: &[VisitHistory],
    ) -> Report {
        let pages = self.parse_site(seed, max_pages).await;
        let users = analyze_pages(&pages, histories);
        Report {
            page_info: pages,
            user_data: Some(users),
        }
    }
}

/// Profiles and recommendations over an already enriched page set
pub fn analyze_pages(pages: &[PageRecord], histories: &[VisitHistory]) -> Vec<UserProfile> {
    ::log::info!(
        "Analyzing {} users over {} pages",
        histories.len(),
        pages.len()
    );
    recommend(analyze(histories, pages), pages)
}
