//! Crawl a site, tag each page with keywords, and recommend unvisited pages
//! to users based on the keywords of the pages they already read.

pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod fixtures;
pub mod interests;
pub mod keywords;
pub mod normalize;
pub mod parsers;
pub mod pipeline;
pub mod recommend;
pub mod results;

// Re-export commonly used types for convenience
pub use config::PipelineConfig;
pub use crawlers::{Crawler, Renderer, WebDriverRenderer};
pub use error::{Error, Result};
pub use interests::analyze;
pub use keywords::{BatchOptions, KeywordExtractor, OpenAiKeywordExtractor, enrich_pages};
pub use pipeline::{Pipeline, analyze_pages};
pub use recommend::recommend;
pub use results::{InterestEntry, PageRecord, Recommendation, Report, UserProfile, VisitHistory};
