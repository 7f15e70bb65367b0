mod render;
mod runtime;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use storefront_core::Intent;
use tracing_subscriber::EnvFilter;

use crate::runtime::Runtime;

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(about = "Browse a product catalog and manage an in-memory cart")]
struct Cli {
    /// Static catalog dataset (YAML); overrides `STOREFRONT_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print one page of the product list
    Products {
        /// Only show products in this category
        #[arg(long)]
        category: Option<String>,

        /// Only show products whose name or description contains this term
        #[arg(long)]
        search: Option<String>,

        /// 1-based page number; clamped to the last page
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// List the available categories
    Categories,
    /// Interactive session with search, paging, and a cart (default)
    Shell,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = storefront_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(?config, "configuration loaded");

    let catalog_path = cli.catalog.clone().or_else(|| config.catalog_path.clone());
    let runtime = Runtime::build(&config, catalog_path.as_deref())?;

    match cli.command {
        Some(Commands::Products {
            category,
            search,
            page,
        }) => run_products(runtime, category, search, page).await,
        Some(Commands::Categories) => run_categories(runtime).await,
        Some(Commands::Shell) | None => shell::run(runtime).await,
    }
}

/// Intents that put a fresh session on the requested filter and page.
///
/// Category and search are applied before the first fetch, so a remote
/// session only fetches the already-scoped product list.
fn listing_intents(category: Option<String>, search: Option<String>) -> Vec<Intent> {
    let mut intents = Vec::new();
    if let Some(category) = category {
        intents.push(Intent::SelectCategory(category));
    }
    if let Some(term) = search {
        intents.push(Intent::EditSearch(term));
        intents.push(Intent::SubmitSearch);
    }
    intents
}

async fn run_products(
    mut runtime: Runtime,
    category: Option<String>,
    search: Option<String>,
    page: usize,
) -> anyhow::Result<()> {
    for intent in listing_intents(category, search) {
        // Fetches requested here are superseded by `start` below.
        let _ = runtime.session.dispatch(intent);
    }
    let effects = runtime.session.start();
    runtime.run_effects(effects).await;

    while runtime.session.pagination().current_page() < page {
        let before = runtime.session.pagination().current_page();
        runtime.session.dispatch(Intent::NextPage);
        if runtime.session.pagination().current_page() == before {
            break;
        }
    }
    print!("{}", render::Catalog(&runtime.session));

    if let Err(err) = runtime.session.visible_page() {
        anyhow::bail!("could not load products: {err}");
    }
    Ok(())
}

async fn run_categories(mut runtime: Runtime) -> anyhow::Result<()> {
    let effects = runtime.session.start();
    runtime.run_effects(effects).await;
    let categories = runtime.session.categories();
    print!(
        "{}",
        render::Categories {
            categories: &categories,
            selected: "",
        }
    );
    Ok(())
}
