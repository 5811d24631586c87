//! Request URL construction for the citations endpoint.
//!
//! The service compares query strings literally, so every builder appends its
//! parameters in one fixed order. Values go through `application/x-www-form-urlencoded`
//! escaping (space becomes `+`, `:` becomes `%3A`).

use crate::config::{ScholarConfig, DEFAULT_PAGE_SIZE};
use crate::error::{Result, ScholarError};
use url::Url;

/// Path of the profile/citations endpoint under the origin
const CITATIONS_PATH: &str = "/citations";

/// Interface language; detail labels are matched in English
const LOCALE: &str = "en";

/// Builds request URLs from a configured origin. Pure, no I/O.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    origin: Url,
    endpoint: Url,
    page_size: u32,
}

impl UrlBuilder {
    /// Create a builder for `base_url` with the default page size.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_page_size(base_url, DEFAULT_PAGE_SIZE)
    }

    /// Create a builder from client settings.
    pub fn from_config(config: &ScholarConfig) -> Result<Self> {
        Self::with_page_size(config.origin(), config.page_size)
    }

    fn with_page_size(base_url: &str, page_size: u32) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        let origin = Url::parse(base_url)
            .map_err(|e| ScholarError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if origin.cannot_be_a_base() {
            return Err(ScholarError::Config(format!(
                "Base URL '{}' cannot anchor relative links",
                base_url
            )));
        }
        let endpoint = Url::parse(&format!("{}{}", base_url, CITATIONS_PATH))
            .map_err(|e| ScholarError::Config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            origin,
            endpoint,
            page_size: page_size.max(1),
        })
    }

    /// Origin that relative links in fetched pages resolve against
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Publications requested per page by default
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Author search: `mauthors=<name[ affiliation][ label:x]*>&hl=en&view_op=search_authors`
    pub fn build_search_url<S: AsRef<str>>(
        &self,
        name: &str,
        affiliation: Option<&str>,
        labels: &[S],
    ) -> Url {
        let mut mauthors = name.to_string();
        if let Some(affiliation) = affiliation.filter(|a| !a.is_empty()) {
            mauthors.push(' ');
            mauthors.push_str(affiliation);
        }
        mauthors.push_str(&format_labels(labels));

        self.with_query(&[
            ("mauthors", mauthors.as_str()),
            ("hl", LOCALE),
            ("view_op", "search_authors"),
        ])
    }

    /// Author profile: `user=<uid>&hl=en`
    pub fn build_profile_url(&self, uid: &str) -> Url {
        self.with_query(&[("user", uid), ("hl", LOCALE)])
    }

    /// One page of an author's publications:
    /// `user=<uid>&hl=en&cstart=<page*page_size>&pagesize=<page_size>`
    pub fn build_publications_url(&self, uid: &str, page: u32, page_size: Option<u32>) -> Url {
        let page_size = page_size.unwrap_or(self.page_size).max(1);
        let cstart = page.saturating_mul(page_size).to_string();
        let pagesize = page_size.to_string();

        self.with_query(&[
            ("user", uid),
            ("hl", LOCALE),
            ("cstart", cstart.as_str()),
            ("pagesize", pagesize.as_str()),
        ])
    }

    /// Single publication:
    /// `view_op=view_citation&hl=en&user=<uid>&citation_for_view=<uid>:<publication_id>`
    pub fn build_publication_url(&self, uid: &str, publication_id: &str) -> Url {
        let citation = format!("{}:{}", uid, publication_id);
        self.with_query(&[
            ("view_op", "view_citation"),
            ("hl", LOCALE),
            ("user", uid),
            ("citation_for_view", citation.as_str()),
        ])
    }

    /// Co-author list: `view_op=list_colleagues&hl=en&user=<uid>`
    pub fn build_coauthors_url(&self, uid: &str) -> Url {
        self.with_query(&[
            ("view_op", "list_colleagues"),
            ("hl", LOCALE),
            ("user", uid),
        ])
    }

    fn with_query(&self, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut params = url.query_pairs_mut();
            params.clear();
            for (key, value) in pairs {
                params.append_pair(key, value);
            }
        }
        url
    }
}

/// ` label:<label>` per label, spaces inside a label replaced by underscores.
fn format_labels<S: AsRef<str>>(labels: &[S]) -> String {
    labels
        .iter()
        .map(|label| format!(" label:{}", label.as_ref().replace(' ', "_")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_LABELS: &[&str] = &[];

    fn builder() -> UrlBuilder {
        UrlBuilder::new("https://scholar.google.ca").expect("Failed to build URL builder")
    }

    #[test]
    fn test_search_url_name_only() {
        let url = builder().build_search_url("Victor Guana", None, NO_LABELS);
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?mauthors=Victor+Guana&hl=en&view_op=search_authors"
        );
    }

    #[test]
    fn test_search_url_with_affiliation() {
        let url = builder().build_search_url("Victor Guana", Some("ualberta"), NO_LABELS);
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?mauthors=Victor+Guana+ualberta&hl=en&view_op=search_authors"
        );
    }

    #[test]
    fn test_search_url_with_affiliation_and_labels() {
        let url = builder().build_search_url(
            "Victor Guana",
            Some("ualberta"),
            &["Model Driven Development", "Code Generation"],
        );
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?mauthors=Victor+Guana+ualberta+label%3AModel_Driven_Development+label%3ACode_Generation&hl=en&view_op=search_authors"
        );
    }

    #[test]
    fn test_search_url_labels_keep_caller_order() {
        let url = builder().build_search_url("A Einstein", None, &["b", "a"]);
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?mauthors=A+Einstein+label%3Ab+label%3Aa&hl=en&view_op=search_authors"
        );
    }

    #[test]
    fn test_search_url_empty_affiliation_is_ignored() {
        let url = builder().build_search_url("A Einstein", Some(""), &["Physics"]);
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?mauthors=A+Einstein+label%3APhysics&hl=en&view_op=search_authors"
        );
    }

    #[test]
    fn test_profile_url() {
        let url = builder().build_profile_url("hNTyptAAAAAJ");
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?user=hNTyptAAAAAJ&hl=en"
        );
    }

    #[test]
    fn test_publications_url_offsets_by_page() {
        let b = builder();
        assert_eq!(
            b.build_publications_url("Q0ZsJ_UAAAAJ", 0, None).as_str(),
            "https://scholar.google.ca/citations?user=Q0ZsJ_UAAAAJ&hl=en&cstart=0&pagesize=100"
        );
        assert_eq!(
            b.build_publications_url("Q0ZsJ_UAAAAJ", 3, Some(20)).as_str(),
            "https://scholar.google.ca/citations?user=Q0ZsJ_UAAAAJ&hl=en&cstart=60&pagesize=20"
        );
    }

    #[test]
    fn test_publication_url_escapes_colon() {
        let url = builder().build_publication_url("Q0ZsJ_UAAAAJ", "u-x6o8ySG0sC");
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?view_op=view_citation&hl=en&user=Q0ZsJ_UAAAAJ&citation_for_view=Q0ZsJ_UAAAAJ%3Au-x6o8ySG0sC"
        );
    }

    #[test]
    fn test_coauthors_url() {
        let url = builder().build_coauthors_url("Q0ZsJ_UAAAAJ");
        assert_eq!(
            url.as_str(),
            "https://scholar.google.ca/citations?view_op=list_colleagues&hl=en&user=Q0ZsJ_UAAAAJ"
        );
    }

    #[test]
    fn test_alternate_origin() {
        let b = UrlBuilder::new("http://127.0.0.1:9000/").expect("Failed to build URL builder");
        assert_eq!(
            b.build_profile_url("abc").as_str(),
            "http://127.0.0.1:9000/citations?user=abc&hl=en"
        );
        assert_eq!(b.origin().as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            UrlBuilder::new("not a url"),
            Err(ScholarError::Config(_))
        ));
    }
}
