use clap::Parser;
use page_affinity::fixtures::{load_pages, load_users};
use page_affinity::{Pipeline, PipelineConfig, Report, analyze_pages};
use std::error::Error;

mod args;
use args::{Args, Command, Source};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PipelineConfig::from_file(path)?,
        None => {
            let mut config = PipelineConfig::default();
            config.apply_env();
            config
        }
    };

    let start_time = std::time::Instant::now();
    let report = match &args.command {
        Command::Fetch(source) => Report {
            page_info: pages_from(source, &config, args.max_pages).await?,
            user_data: None,
        },
        Command::Analyze { source, users } => {
            let histories = load_users(users)?;
            let pages = pages_from(source, &config, args.max_pages).await?;
            let profiles = analyze_pages(&pages, &histories);
            Report {
                page_info: pages,
                user_data: Some(profiles),
            }
        }
    };

    ::log::info!(
        "Finished with {} pages in {:.2} seconds",
        report.page_info.len(),
        start_time.elapsed().as_secs_f64()
    );

    let json = serde_json::to_string_pretty(&report)?;
    match &args.output {
        Some(path) => std::fs::write(path, json)?,
        None => println!("{}", json),
    }
    Ok(())
}

/// Loads the page fixture, or crawls and enriches the seed URL
async fn pages_from(
    source: &Source,
    config: &PipelineConfig,
    max_pages: Option<usize>,
) -> Result<Vec<page_affinity::PageRecord>, Box<dyn Error>> {
    if let Some(path) = &source.from_local {
        ::log::info!("Loading pages from {}", path.display());
        return Ok(load_pages(path)?);
    }

    let seed = source
        .url
        .as_deref()
        .unwrap_or(config.crawler.start_url.as_str());
    ::log::info!("Starting crawler for: {}", seed);
    eprintln!("Note: crawling requires a WebDriver server (e.g., ChromeDriver). Set WEBDRIVER_URL if it is not at http://localhost:4444");

    let pipeline = Pipeline::from_config(config)?;
    Ok(pipeline.parse_site(seed, max_pages).await)
}
