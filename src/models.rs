//! Records produced by the parsers.
//!
//! Field declaration order is the serialized key order. Every field is always
//! present; a field that could not be extracted holds its `Default` value.

use serde::{Serialize, Serializer};

/// One hit on the author search page
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct SearchResultAuthor {
    pub name: String,
    /// Absolute profile URL
    pub profile_url: String,
    pub affiliation: String,
    pub research_areas: Vec<String>,
    /// Verified email marker, e.g. `@lhep.unibe.ch`
    pub email_domain: String,
    /// `user` parameter of the profile URL
    pub uid: String,
}

/// A yearly bucket of a bar chart
#[derive(Debug, Clone, Copy, Serialize, Default, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// An author's profile page
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct AuthorProfile {
    pub name: String,
    pub uid: String,
    pub short_bio: String,
    pub research_interests: Vec<String>,
    /// As rendered by the service, not guaranteed numeric
    pub total_citations: String,
    pub h_index: String,
    pub i10_index: String,
    /// Ascending by year, as charted
    pub publications_by_year: Vec<YearCount>,
    pub image_url: String,
}

/// One entry on the co-authors page
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CoAuthor {
    pub uid: String,
    pub profile_url: String,
    pub name: String,
    #[serde(serialize_with = "count_or_empty")]
    pub citation_count: Option<u64>,
    pub domain: String,
    pub bio: String,
    pub image_url: String,
}

/// Year of a publication, or the "n/a" marker when the table shows none
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublicationYear {
    Year(i32),
    #[default]
    NotAvailable,
}

impl Serialize for PublicationYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PublicationYear::Year(year) => serializer.serialize_i32(*year),
            PublicationYear::NotAvailable => serializer.serialize_str("n/a"),
        }
    }
}

/// One row of an author's publications table
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PublicationSummary {
    /// Citation id local to the owning author
    pub id: String,
    pub title: String,
    pub url: String,
    /// 0 when no citation link is shown
    pub cited: u64,
    pub year: PublicationYear,
    pub authors: String,
    pub venue: String,
}

/// The detail page of a single publication
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PublicationDetail {
    pub url: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publication_date: String,
    pub journal_name: String,
    pub page_range: String,
    pub publisher: String,
    /// Description text with its whitespace untouched
    pub partial_abstract: String,
    pub citation_count: u64,
    pub citations_by_year: Vec<YearCount>,
}

/// A page of publications together with the request that produced it
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct PublicationPage {
    pub author_uid: String,
    pub page: u32,
    pub publications: Vec<PublicationSummary>,
}

/// Co-authors of one author
#[derive(Debug, Clone, Serialize, Default, PartialEq, Eq)]
pub struct CoAuthorList {
    pub author_uid: String,
    pub coauthors: Vec<CoAuthor>,
}

fn count_or_empty<S: Serializer>(count: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
    match count {
        Some(count) => serializer.serialize_u64(*count),
        None => serializer.serialize_str(""),
    }
}
