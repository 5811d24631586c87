//! Query facade: URL construction, fetch and parse per entity kind.
//!
//! Each operation builds its URL, fetches one document and hands it to the
//! matching [`RecordParser`]. Parsers are held behind trait objects so a test
//! (or a caller tracking a markup change) can swap one without touching the
//! others.

use crate::config::ScholarConfig;
use crate::error::Result;
use crate::fetch::{Fetcher, HttpFetcher};
use crate::models::{
    AuthorProfile, CoAuthor, CoAuthorList, PublicationDetail, PublicationPage,
    PublicationSummary, SearchResultAuthor,
};
use crate::parse::{
    AuthorProfileParser, CoAuthorListParser, PublicationDetailParser, PublicationListParser,
    RecordParser, SearchResultsParser,
};
use crate::urls::UrlBuilder;
use std::sync::Arc;
use tracing::info;
use url::Url;

/// The parser used by each facade operation
#[derive(Clone)]
pub struct Parsers {
    pub search: Arc<dyn RecordParser<Record = Vec<SearchResultAuthor>>>,
    pub profile: Arc<dyn RecordParser<Record = AuthorProfile>>,
    pub publications: Arc<dyn RecordParser<Record = Vec<PublicationSummary>>>,
    pub publication: Arc<dyn RecordParser<Record = PublicationDetail>>,
    pub coauthors: Arc<dyn RecordParser<Record = Vec<CoAuthor>>>,
}

impl Parsers {
    /// The built-in parsers, resolving links against `origin`.
    pub fn standard(origin: &Url) -> Self {
        Self {
            search: Arc::new(SearchResultsParser::new(origin.clone())),
            profile: Arc::new(AuthorProfileParser::new(origin.clone())),
            publications: Arc::new(PublicationListParser::new(origin.clone())),
            publication: Arc::new(PublicationDetailParser::new(origin.clone())),
            coauthors: Arc::new(CoAuthorListParser::new(origin.clone())),
        }
    }
}

/// Scholar profile client
pub struct ScholarClient<F: Fetcher = HttpFetcher> {
    urls: UrlBuilder,
    fetcher: F,
    parsers: Parsers,
}

impl ScholarClient<HttpFetcher> {
    /// Client fetching over HTTP with the given settings.
    pub fn new(config: &ScholarConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: Fetcher> ScholarClient<F> {
    /// Client using a custom document source.
    pub fn with_fetcher(config: &ScholarConfig, fetcher: F) -> Result<Self> {
        let urls = UrlBuilder::from_config(config)?;
        let parsers = Parsers::standard(urls.origin());
        Ok(Self {
            urls,
            fetcher,
            parsers,
        })
    }

    /// Replace the parser set.
    pub fn with_parsers(mut self, parsers: Parsers) -> Self {
        self.parsers = parsers;
        self
    }

    /// URL builder used by this client
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Document source used by this client
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Search authors by name, optionally narrowed by affiliation and labels.
    pub async fn search_authors<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        affiliation: Option<&str>,
        labels: &[S],
    ) -> Result<Vec<SearchResultAuthor>> {
        let url = self.urls.build_search_url(name, affiliation, labels);
        info!(query = name, affiliation, labels = labels.len(), "Searching authors");

        let html = self.fetcher.fetch(&url).await?;
        let results = self.parsers.search.parse(&html);

        info!(count = results.len(), "Search complete");
        Ok(results)
    }

    /// Fetch an author's profile.
    pub async fn get_author(&self, uid: &str) -> Result<AuthorProfile> {
        let url = self.urls.build_profile_url(uid);
        info!(uid, "Fetching author profile");

        let html = self.fetcher.fetch(&url).await?;
        Ok(self.parsers.profile.parse(&html))
    }

    /// Fetch one page (zero-based) of an author's publications.
    pub async fn get_publications(&self, uid: &str, page: u32) -> Result<PublicationPage> {
        let url = self.urls.build_publications_url(uid, page, None);
        info!(uid, page, page_size = self.urls.page_size(), "Fetching publications");

        let html = self.fetcher.fetch(&url).await?;
        let publications = self.parsers.publications.parse(&html);

        info!(uid, page, count = publications.len(), "Parsed publications");
        Ok(PublicationPage {
            author_uid: uid.to_string(),
            page,
            publications,
        })
    }

    /// Fetch the detail page of one publication.
    pub async fn get_publication(&self, uid: &str, publication_id: &str) -> Result<PublicationDetail> {
        let url = self.urls.build_publication_url(uid, publication_id);
        info!(uid, publication_id, "Fetching publication");

        let html = self.fetcher.fetch(&url).await?;
        Ok(self.parsers.publication.parse(&html))
    }

    /// Fetch an author's co-authors.
    pub async fn get_coauthors(&self, uid: &str) -> Result<CoAuthorList> {
        let url = self.urls.build_coauthors_url(uid);
        info!(uid, "Fetching co-authors");

        let html = self.fetcher.fetch(&url).await?;
        let coauthors = self.parsers.coauthors.parse(&html);

        info!(uid, count = coauthors.len(), "Parsed co-authors");
        Ok(CoAuthorList {
            author_uid: uid.to_string(),
            coauthors,
        })
    }
}
