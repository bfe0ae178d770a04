//! `docs-query` - paginated searches over activities, tags and documents.
//!
//! Prints one page of results as JSON on stdout. Logs go to stderr.
//!
//! Usage:
//!   docs-query activities --user-id u1 --limit 5
//!   docs-query tags --parent-id t0 --sort-column 1 --asc
//!   docs-query documents --language fra --offset 20

mod config;
mod logging;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use docs_query::config::DEFAULT_CONFIG_FILE;
use docs_query::families::{
    Activity, ActivityCriteria, Document, DocumentCriteria, Tag, TagCriteria,
};
use docs_query::{PageRequest, PgStore, ResultPage, SearchEngine};
use serde::Serialize;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "docs-query")]
#[command(about = "Paginated searches over document-management records")]
#[command(version)]
struct Cli {
    /// Configuration file (optional; environment variables override it)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Database connection URL, overriding configuration
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search user activities
    Activities {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        activity_type: Option<String>,
        #[arg(long)]
        entity_id: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Search tags
    Tags {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        parent_id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },

    /// Search documents
    Documents {
        #[arg(long)]
        user_id: Option<String>,
        #[arg(long)]
        language: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args, Debug)]
struct PageArgs {
    /// Page size (non-positive uses the configured default)
    #[arg(long, allow_hyphen_values = true)]
    limit: Option<i64>,

    /// Rows to skip
    #[arg(long, allow_hyphen_values = true)]
    offset: Option<i64>,

    /// Column index to sort by
    #[arg(long, allow_hyphen_values = true)]
    sort_column: Option<i32>,

    /// Sort ascending (descending otherwise)
    #[arg(long)]
    asc: bool,
}

impl PageArgs {
    fn request(&self) -> PageRequest {
        PageRequest {
            limit: self.limit,
            offset: self.offset,
            sort_column: self.sort_column,
            asc: Some(self.asc),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config).context("Failed to load configuration")?;
    if let Some(url) = cli.database_url {
        config.query.database.url = url;
    }
    config.validate().context("Invalid configuration")?;

    let _log_guard =
        logging::init_logging(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting docs-query");

    let store = PgStore::connect(&config.query.database)
        .await
        .context("Failed to connect to database")?;
    let engine = SearchEngine::new(config.query.paging);

    let output = match cli.command {
        Command::Activities {
            user_id,
            activity_type,
            entity_id,
            page,
        } => {
            let criteria = ActivityCriteria {
                user_id,
                activity_type,
                entity_id,
            };
            render(
                engine
                    .search::<Activity, _>(&store, &criteria, &page.request())
                    .await,
            )?
        }
        Command::Tags {
            user_id,
            parent_id,
            name,
            page,
        } => {
            let criteria = TagCriteria {
                user_id,
                parent_id,
                name,
            };
            render(
                engine
                    .search::<Tag, _>(&store, &criteria, &page.request())
                    .await,
            )?
        }
        Command::Documents {
            user_id,
            language,
            page,
        } => {
            let criteria = DocumentCriteria { user_id, language };
            render(
                engine
                    .search::<Document, _>(&store, &criteria, &page.request())
                    .await,
            )?
        }
    };

    println!("{output}");
    Ok(())
}

fn render<T: Serialize>(result: docs_query::Result<ResultPage<T>>) -> anyhow::Result<String> {
    let page = result.map_err(|e| {
        if e.is_client_error() {
            tracing::warn!(error = %e, "Rejected search request");
        } else {
            tracing::error!(error = %e, "Search failed");
        }
        e
    })?;
    tracing::info!(
        rows = page.items.len(),
        total = page.total,
        "Search complete"
    );
    Ok(serde_json::to_string_pretty(&page)?)
}
