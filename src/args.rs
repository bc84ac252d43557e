use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-affinity")]
#[command(about = "Crawls a site, tags pages with keywords and recommends pages to users")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Maximum number of pages to crawl
    #[arg(short, long, global = true)]
    pub max_pages: Option<usize>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl a site and extract keywords for every page
    Fetch(Source),

    /// Crawl a site, then build interests and recommendations for users
    Analyze {
        #[command(flatten)]
        source: Source,

        /// User fixture with visit histories
        #[arg(short, long)]
        users: PathBuf,
    },
}

/// Where pages come from: a live crawl or a saved page fixture
#[derive(clap::Args, Debug)]
#[group(required = true, multiple = false)]
pub struct Source {
    /// Seed URL to crawl
    pub url: Option<String>,

    /// Page fixture to use instead of crawling
    #[arg(long, value_name = "PAGES_JSON")]
    pub from_local: Option<PathBuf>,
}
