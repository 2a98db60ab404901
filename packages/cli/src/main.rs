#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the product page extractor.
//!
//! Running with no subcommand extracts the default page and writes
//! `produto.json` to the working directory.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use commercia_product::registry::{DEFAULT_PAGE_ID, all_pages, find_page};
use commercia_product::{output, scrape_product};
use commercia_scraper::{FilePage, HttpPage};

#[derive(Parser)]
#[command(name = "commercia", about = "Product page extractor")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a product page into a JSON document
    Extract(ExtractArgs),
    /// List the configured product pages
    Pages,
}

#[derive(Args)]
struct ExtractArgs {
    /// Page definition to use (see `pages`)
    #[arg(long, default_value = DEFAULT_PAGE_ID)]
    page: String,
    /// Fetch this URL instead of the one in the page definition
    #[arg(long)]
    url: Option<String>,
    /// Read the page from a saved HTML file instead of fetching it
    #[arg(long)]
    html: Option<PathBuf>,
    /// Where to write the JSON document (defaults to the page's output file)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Print the JSON document instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,
}

impl Default for ExtractArgs {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_ID.to_string(),
            url: None,
            html: None,
            output: None,
            stdout: false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    match cli.command.unwrap_or_else(|| Commands::Extract(ExtractArgs::default())) {
        Commands::Extract(args) => extract(args).await?,
        Commands::Pages => {
            println!("{:<20} {:<32} URL", "ID", "NAME");
            println!("{}", "-".repeat(80));
            for page in &all_pages() {
                println!("{:<20} {:<32} {}", page.id, page.name, page.url);
            }
        }
    }

    Ok(())
}

async fn extract(args: ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut definition = find_page(&args.page)?;
    if let Some(url) = &args.url {
        definition = definition.with_url(url);
    }

    let record = if let Some(path) = &args.html {
        scrape_product(&FilePage::new(path), &definition).await?
    } else {
        let page = HttpPage::new(&definition.url);
        scrape_product(&page, &definition).await?
    };

    if args.stdout {
        println!("{}", output::to_json(&record)?);
        return Ok(());
    }

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(&definition.output_filename));
    output::write_json(&record, &path)?;
    log::info!("[{}] Done", definition.id);

    Ok(())
}
