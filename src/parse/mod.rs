//! Record parsers, one per page kind.
//!
//! Each parser turns one fetched document into a record (or a list of records).
//! Parsing never fails as a whole: unmatched fields fall back to their sentinel
//! values through [`crate::extract::FieldScope`].

pub mod coauthors;
pub mod profile;
pub mod publication;
pub mod publications;
pub mod search;

pub use coauthors::CoAuthorListParser;
pub use profile::AuthorProfileParser;
pub use publication::PublicationDetailParser;
pub use publications::PublicationListParser;
pub use search::SearchResultsParser;

/// Parses a markup document into a record of type [`RecordParser::Record`].
pub trait RecordParser: Send + Sync {
    /// What one document yields
    type Record;

    /// Parse `html`; always returns a complete record.
    fn parse(&self, html: &str) -> Self::Record;
}
