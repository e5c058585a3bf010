//! Storefront command line.
//!
//! `storefront fetch` refreshes the catalog data file, `storefront matte`
//! knocks the white background out of a logo, and `storefront render`
//! fills the page template from the site config and catalog.

use anyhow::{Context, Result};
use catalog::types::config::{DEFAULT_CATALOG_PATH, DEFAULT_SITE_CONFIG_PATH};
use catalog::{
    build_ingestor, read_catalog, run_ingestion, HttpFetcher, IngestConfig, SiteConfig, Strategy,
};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use colored::Colorize;
use matte::{process_file, MatteOptions};
use site::{fill_template, PageFragments};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Heartfelt Designs storefront tooling")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the catalog data file from the marketplace
    Fetch {
        /// Backend to use (api or scrape); overrides CATALOG_STRATEGY
        #[arg(long)]
        strategy: Option<Strategy>,

        /// Fill an empty heroImages list from the new catalog
        #[arg(long)]
        seed_hero_images: bool,

        /// Abort without writing when fewer items are found
        #[arg(long)]
        min_items: Option<usize>,

        /// Catalog data file to write; overrides CATALOG_PATH
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Make a logo's white background transparent
    Matte {
        input: PathBuf,
        output: PathBuf,

        /// Resize to this height in pixels; by default the source size is
        /// kept so the page can scale it down sharply on high-DPI screens
        #[arg(long)]
        height: Option<u32>,
    },

    /// Fill the page template from site config and catalog
    Render {
        #[arg(long)]
        template: PathBuf,

        #[arg(long)]
        out: PathBuf,

        #[arg(long, default_value = DEFAULT_SITE_CONFIG_PATH)]
        config: PathBuf,

        #[arg(long, default_value = DEFAULT_CATALOG_PATH)]
        catalog: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            strategy,
            seed_hero_images,
            min_items,
            out,
        } => fetch(strategy, seed_hero_images, min_items, out).await,
        Commands::Matte {
            input,
            output,
            height,
        } => run_matte(&input, &output, height),
        Commands::Render {
            template,
            out,
            config,
            catalog,
        } => render(&template, &out, &config, &catalog),
    }
}

async fn fetch(
    strategy: Option<Strategy>,
    seed_hero_images: bool,
    min_items: Option<usize>,
    out: Option<PathBuf>,
) -> Result<()> {
    let mut config = IngestConfig::from_env().context("Failed to load configuration")?;
    if let Some(strategy) = strategy {
        config = config.with_strategy(strategy);
    }
    if seed_hero_images {
        config = config.with_hero_seeding(true);
    }
    if let Some(min) = min_items {
        config = config.with_min_items(min);
    }
    if let Some(out) = out {
        config = config.with_catalog_path(out);
    }

    tracing::info!(strategy = %config.strategy, "Refreshing catalog");

    let fetcher = Arc::new(HttpFetcher::new(&config).context("Failed to build HTTP client")?);
    let ingestor = build_ingestor(&config, fetcher).context("Failed to set up ingestion")?;
    let report = run_ingestion(ingestor.as_ref(), &config)
        .await
        .context("Catalog refresh failed")?;

    println!(
        "{} {} items written to {}",
        "✓".bright_green().bold(),
        report.items,
        report.catalog_path.display()
    );
    if report.hero_seeded {
        println!(
            "{} hero images seeded in {}",
            "✓".bright_green().bold(),
            config.site_config_path.display()
        );
    }
    Ok(())
}

fn run_matte(input: &Path, output: &Path, height: Option<u32>) -> Result<()> {
    let mut options = MatteOptions::default();
    if let Some(height) = height {
        options = options.with_target_height(height);
    }
    let result = process_file(input, output, &options)
        .with_context(|| format!("Failed to matte {}", input.display()))?;

    println!(
        "{} {} ({}x{})",
        "✓".bright_green().bold(),
        output.display(),
        result.width,
        result.height
    );
    Ok(())
}

fn render(template: &Path, out: &Path, config: &Path, catalog: &Path) -> Result<()> {
    let template_text = std::fs::read_to_string(template)
        .with_context(|| format!("Failed to read template {}", template.display()))?;
    let site = SiteConfig::load(config)
        .with_context(|| format!("Failed to load site config {}", config.display()))?;
    let items = read_catalog(catalog)
        .with_context(|| format!("Failed to read catalog {}", catalog.display()))?;

    let mut rng = fastrand::Rng::new();
    let year = chrono::Local::now().year();
    let fragments = PageFragments::build(&site, &items, &mut rng, year);
    let page = fill_template(&template_text, &fragments);

    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(out, page).with_context(|| format!("Failed to write {}", out.display()))?;

    tracing::info!(items = items.len(), out = %out.display(), "Rendered page");
    println!("{} {}", "✓".bright_green().bold(), out.display());
    Ok(())
}
