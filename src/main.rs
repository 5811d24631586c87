//! rustgscitations - Google Scholar citations profile scraper
//!
//! Fetches author search results, profiles, publication lists, single
//! publications and co-author lists, and prints them as JSON.
//!
//! ## Usage
//!
//! ### CLI Mode
//! ```bash
//! rustgscitations search "A Einstein" --label Physics
//! rustgscitations publications hNTyptAAAAAJ --page 1
//! ```
//!
//! ### HTTP Server Mode
//! ```bash
//! rustgscitations serve --port 3000
//! ```

use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use clap::{Parser, Subcommand};
use rustgscitations::config::{DEFAULT_PAGE_SIZE, DEFAULT_SCHOLAR_URL, DEFAULT_USER_AGENT};
use rustgscitations::models::{
    AuthorProfile, CoAuthorList, PublicationDetail, PublicationPage, SearchResultAuthor,
};
use rustgscitations::{ScholarClient, ScholarConfig, ScholarError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Google Scholar citations profile scraper
#[derive(Parser)]
#[command(name = "rustgscitations")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Service origin (mirror sites, test servers)
    #[arg(long, global = true, env = "SCHOLAR_BASE_URL", default_value = DEFAULT_SCHOLAR_URL)]
    base_url: String,

    /// Proxy URL (e.g., http://127.0.0.1:7890)
    #[arg(long, global = true, env = "SCHOLAR_PROXY")]
    proxy: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "SCHOLAR_TIMEOUT_SECS", default_value_t = 30)]
    timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, global = true, env = "SCHOLAR_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Publications per page
    #[arg(long, global = true, env = "SCHOLAR_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// Write the JSON record to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Print compact instead of pretty JSON
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search authors by name
    Search {
        /// Author name
        name: String,

        /// University name or email domain
        #[arg(long)]
        affiliation: Option<String>,

        /// Research area label (repeatable)
        #[arg(short, long = "label")]
        labels: Vec<String>,
    },

    /// Show an author's profile
    Author {
        /// Author uid (the `user` parameter of a profile URL)
        uid: String,
    },

    /// List one page of an author's publications
    Publications {
        /// Author uid
        uid: String,

        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
    },

    /// Show a single publication
    Publication {
        /// Author uid
        uid: String,

        /// Citation id local to the author
        publication_id: String,
    },

    /// List an author's co-authors
    Coauthors {
        /// Author uid
        uid: String,
    },

    /// Run as HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for records
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    if cli.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
            .init();
    }

    let config = ScholarConfig {
        base_url: cli.base_url.clone(),
        user_agent: cli.user_agent.clone(),
        timeout: Duration::from_secs(cli.timeout),
        proxy: cli.proxy.clone(),
        page_size: cli.page_size,
    };
    let client = ScholarClient::new(&config).context("Failed to create scholar client")?;
    let sink = OutputSink {
        path: cli.output,
        compact: cli.compact,
    };

    match cli.command {
        Commands::Search {
            name,
            affiliation,
            labels,
        } => {
            let results = client
                .search_authors(&name, affiliation.as_deref(), &labels)
                .await?;
            sink.emit(&results)
        }
        Commands::Author { uid } => sink.emit(&client.get_author(&uid).await?),
        Commands::Publications { uid, page } => {
            sink.emit(&client.get_publications(&uid, page).await?)
        }
        Commands::Publication {
            uid,
            publication_id,
        } => sink.emit(&client.get_publication(&uid, &publication_id).await?),
        Commands::Coauthors { uid } => sink.emit(&client.get_coauthors(&uid).await?),
        Commands::Serve { port, host } => run_server(client, host, port).await,
    }
}

// ============================================================================
// Output
// ============================================================================

struct OutputSink {
    path: Option<PathBuf>,
    compact: bool,
}

impl OutputSink {
    fn emit<T: Serialize>(&self, record: &T) -> Result<()> {
        let json = if self.compact {
            serde_json::to_string(record)
        } else {
            serde_json::to_string_pretty(record)
        }
        .context("Failed to serialize record")?;

        match &self.path {
            Some(path) => {
                std::fs::write(path, json + "\n")
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), "Saved record");
            }
            None => println!("{}", json),
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Server
// ============================================================================

async fn run_server(client: ScholarClient, host: String, port: u16) -> Result<()> {
    info!(host = %host, port = port, "Starting HTTP server");

    let app_state = Arc::new(AppState { client });

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/authors/search", get(search_handler))
        .route("/authors/{uid}", get(author_handler))
        .route("/authors/{uid}/publications", get(publications_handler))
        .route(
            "/authors/{uid}/publications/{publication_id}",
            get(publication_handler),
        )
        .route("/authors/{uid}/coauthors", get(coauthors_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .context("Invalid host:port")?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

struct AppState {
    client: ScholarClient,
}

/// Transport failure surfaced as a JSON error body
struct ApiError(ScholarError);

impl From<ScholarError> for ApiError {
    fn from(err: ScholarError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        let status = if self.0.is_remote() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let body = ErrorBody {
            status: "error",
            message: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// Health check endpoint
async fn health_handler() -> &'static str {
    "OK"
}

/// Search query string
#[derive(Debug, Deserialize)]
struct SearchParams {
    name: String,
    affiliation: Option<String>,
    /// Comma-separated labels
    labels: Option<String>,
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Vec<SearchResultAuthor>> {
    let labels: Vec<String> = params
        .labels
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect();

    let results = state
        .client
        .search_authors(&params.name, params.affiliation.as_deref(), &labels)
        .await?;
    Ok(Json(results))
}

async fn author_handler(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> ApiResult<AuthorProfile> {
    Ok(Json(state.client.get_author(&uid).await?))
}

#[derive(Debug, Deserialize)]
struct PageParams {
    #[serde(default)]
    page: u32,
}

async fn publications_handler(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult<PublicationPage> {
    Ok(Json(state.client.get_publications(&uid, params.page).await?))
}

async fn publication_handler(
    State(state): State<Arc<AppState>>,
    Path((uid, publication_id)): Path<(String, String)>,
) -> ApiResult<PublicationDetail> {
    Ok(Json(
        state.client.get_publication(&uid, &publication_id).await?,
    ))
}

async fn coauthors_handler(
    State(state): State<Arc<AppState>>,
    Path(uid): Path<String>,
) -> ApiResult<CoAuthorList> {
    Ok(Json(state.client.get_coauthors(&uid).await?))
}
