//! Publications table of an author profile.

use super::RecordParser;
use crate::extract::{
    absolutize, attr, collapsed_text, first, list_in, nth, parse_int, query_param, trimmed_text,
    Extracted, FieldMissing, FieldScope,
};
use crate::models::{PublicationSummary, PublicationYear};
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

const RECORD: &str = "publication";

const TABLE: &str = "#gsc_a_t";
const ROW: &str = "tbody tr";
/// Placeholder cell of a profile without articles
const EMPTY_CELL: &str = "td.gsc_a_e";
/// Grey caption lines under the title: authors, then venue
const CAPTION: &str = ".gs_gray";

/// Parses the rows of the profile publications table.
#[derive(Debug, Clone)]
pub struct PublicationListParser {
    origin: Url,
}

impl PublicationListParser {
    /// `origin` resolves relative citation links.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Parse an already-built document tree.
    pub fn parse_document(&self, document: &Html) -> Vec<PublicationSummary> {
        let rows = match list_in(document.root_element(), TABLE, ROW) {
            Ok(rows) => rows,
            Err(missing) => {
                debug!(record = RECORD, reason = %missing, "No publications table");
                return Vec::new();
            }
        };

        rows.into_iter()
            .filter(|row| first(*row, EMPTY_CELL).is_err())
            .enumerate()
            .map(|(index, row)| self.parse_row(row, FieldScope::item(RECORD, index)))
            .collect()
    }

    fn parse_row(&self, row: ElementRef<'_>, scope: FieldScope) -> PublicationSummary {
        PublicationSummary {
            id: scope.field("id", || {
                let citation = query_param(title_href(row)?, "citation_for_view")?;
                citation
                    .split_once(':')
                    .map(|(_, id)| id.to_string())
                    .ok_or_else(|| FieldMissing::new(format!("no ':' in '{}'", citation)))
            }),
            title: scope.field("title", || title_link(row).map(collapsed_text)),
            url: scope.field("url", || absolutize(&self.origin, title_href(row)?)),
            // Rows never cited render an empty link; that is a count of zero.
            cited: scope.field("cited", || {
                let link = first(nth(row, "td", 1)?, "a")?;
                parse_int(&trimmed_text(link))
            }),
            year: scope.field("year", || {
                let span = first(nth(row, "td", 2)?, "span")?;
                parse_int(&trimmed_text(span)).map(PublicationYear::Year)
            }),
            authors: scope.field("authors", || {
                nth(nth(row, "td", 0)?, CAPTION, 0).map(trimmed_text)
            }),
            venue: scope.field("venue", || nth(nth(row, "td", 0)?, CAPTION, 1).map(collapsed_text)),
        }
    }
}

impl RecordParser for PublicationListParser {
    type Record = Vec<PublicationSummary>;

    fn parse(&self, html: &str) -> Self::Record {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }
}

fn title_link(row: ElementRef<'_>) -> Extracted<ElementRef<'_>> {
    first(nth(row, "td", 0)?, "a")
}

fn title_href(row: ElementRef<'_>) -> Extracted<&str> {
    attr(title_link(row)?, "href")
}
