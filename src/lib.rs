//! # rustgscitations
//!
//! Google Scholar citations profile scraper
//!
//! ## Modules
//!
//! - [`urls`] - Request URL construction for the citations endpoint
//! - [`fetch`] - Document fetching over HTTP
//! - [`extract`] - Fault-isolated field extraction primitives
//! - [`parse`] - Record parsers for search, profile, publications, co-authors
//! - [`client`] - Facade combining the above per entity kind
//! - [`models`] - Output records
//! - [`config`] - Client settings
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rustgscitations::{ScholarClient, ScholarConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScholarClient::new(&ScholarConfig::default())?;
//!     let profile = client.get_author("hNTyptAAAAAJ").await?;
//!     println!("{} has {} citations", profile.name, profile.total_citations);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod parse;
pub mod urls;

pub use client::{Parsers, ScholarClient};
pub use config::ScholarConfig;
pub use error::{Result, ScholarError};
pub use fetch::{Fetcher, HttpFetcher};
pub use parse::RecordParser;
pub use urls::UrlBuilder;
