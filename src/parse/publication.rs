//! Single publication (`view_op=view_citation`) page.
//!
//! The detail page renders a varying subset of label/value rows depending on
//! the kind of publication, so fields are found by their label text instead
//! of by position.

use super::RecordParser;
use crate::extract::{
    absolutize, all, attr, collapsed_text, first, labelled_value, last_token, pair_series,
    parse_int, text, texts, trimmed_text, Extracted, FieldScope,
};
use crate::models::{PublicationDetail, YearCount};
use scraper::{ElementRef, Html};
use url::Url;

const RECORD: &str = "publication_detail";

const TITLE: &str = "#gsc_title, #gsc_oci_title";
const TITLE_LINK: &str = "#gsc_title a, #gsc_oci_title a";
const LABEL: &str = ".gsc_field, .gsc_oci_field";
const CHART_YEAR: &str = ".gsc_g_t, .gsc_oci_g_t";
const CHART_COUNT: &str = ".gsc_g_al, .gsc_oci_g_al";

const AUTHORS: &[&str] = &["Authors"];
const PUBLICATION_DATE: &[&str] = &["Publication date"];
/// The venue label depends on the publication type
const JOURNAL: &[&str] = &["Journal", "Conference", "Book", "Source"];
const PAGES: &[&str] = &["Pages"];
const PUBLISHER: &[&str] = &["Publisher"];
const DESCRIPTION: &[&str] = &["Description"];
const TOTAL_CITATIONS: &[&str] = &["Total citations"];

/// Parses the metadata table of one publication.
#[derive(Debug, Clone)]
pub struct PublicationDetailParser {
    origin: Url,
}

impl PublicationDetailParser {
    /// `origin` resolves a relative title link.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Parse an already-built document tree.
    pub fn parse_document(&self, document: &Html) -> PublicationDetail {
        let root = document.root_element();
        let scope = FieldScope::document(RECORD);

        PublicationDetail {
            url: scope.field("url", || {
                absolutize(&self.origin, attr(first(root, TITLE_LINK)?, "href")?)
            }),
            title: scope.field("title", || first(root, TITLE).map(collapsed_text)),
            authors: scope.field("authors", || {
                let authors = text(value(root, AUTHORS)?);
                let names: Vec<String> = authors
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from)
                    .collect();
                Ok(names)
            }),
            publication_date: scope.field("publication_date", || {
                value(root, PUBLICATION_DATE).map(trimmed_text)
            }),
            journal_name: scope.field("journal_name", || value(root, JOURNAL).map(trimmed_text)),
            page_range: scope.field("page_range", || value(root, PAGES).map(trimmed_text)),
            publisher: scope.field("publisher", || value(root, PUBLISHER).map(trimmed_text)),
            partial_abstract: scope.field("partial_abstract", || {
                value(root, DESCRIPTION).map(text)
            }),
            citation_count: scope.field("citation_count", || {
                let link = first(value(root, TOTAL_CITATIONS)?, "a")?;
                let cited_by = text(link);
                let count = parse_int(last_token(&cited_by)?)?;
                Ok(count)
            }),
            citations_by_year: scope.field("citations_by_year", || citations_by_year(root)),
        }
    }
}

impl RecordParser for PublicationDetailParser {
    type Record = PublicationDetail;

    fn parse(&self, html: &str) -> Self::Record {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }
}

fn value<'a>(root: ElementRef<'a>, labels: &[&str]) -> Extracted<ElementRef<'a>> {
    labelled_value(root, LABEL, labels)
}

/// Chart rendered inside the "Total citations" value.
fn citations_by_year(root: ElementRef<'_>) -> Extracted<Vec<YearCount>> {
    let chart = value(root, TOTAL_CITATIONS)?;
    let years = all(chart, CHART_YEAR)?;
    let counts = all(chart, CHART_COUNT)?;
    Ok(pair_series(&texts(&years), &texts(&counts)))
}
