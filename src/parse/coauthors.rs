//! Co-authors (`view_op=list_colleagues`) page.

use super::RecordParser;
use crate::extract::{
    absolutize, attr, collapsed_text, first, last_token, list_in, parse_int, query_param,
    trimmed_text, Extracted, FieldScope,
};
use crate::models::CoAuthor;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

const RECORD: &str = "coauthor";

const LIST: &str = "#gsc_ccl";
const ENTRY: &str = ".gs_scl";
const NAME: &str = ".gsc_1usr_name";
const CITED_BY: &str = ".gsc_1usr_cby";
const DOMAIN: &str = ".gsc_1usr_emlb";
const BIO: &str = ".gsc_1usr_aff";

/// Parses every entry of the co-author list.
#[derive(Debug, Clone)]
pub struct CoAuthorListParser {
    origin: Url,
}

impl CoAuthorListParser {
    /// `origin` resolves relative profile and photo links.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Parse an already-built document tree.
    pub fn parse_document(&self, document: &Html) -> Vec<CoAuthor> {
        let entries = match list_in(document.root_element(), LIST, ENTRY) {
            Ok(entries) => entries,
            Err(missing) => {
                debug!(record = RECORD, reason = %missing, "No co-author list");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| self.parse_entry(entry, FieldScope::item(RECORD, index)))
            .collect()
    }

    fn parse_entry(&self, entry: ElementRef<'_>, scope: FieldScope) -> CoAuthor {
        CoAuthor {
            uid: scope.field("uid", || {
                query_param(attr(primary_link(entry)?, "href")?, "user")
            }),
            profile_url: scope.field("profile_url", || {
                let link = first(first(entry, NAME)?, "a")?;
                absolutize(&self.origin, attr(link, "href")?)
            }),
            name: scope.field("name", || first(entry, NAME).map(collapsed_text)),
            citation_count: scope.field("citation_count", || {
                let cited_by = trimmed_text(first(entry, CITED_BY)?);
                let count = parse_int(last_token(&cited_by)?)?;
                Ok(Some(count))
            }),
            domain: scope.field("domain", || first(entry, DOMAIN).map(trimmed_text)),
            bio: scope.field("bio", || first(entry, BIO).map(trimmed_text)),
            image_url: scope.field("image_url", || {
                let photo = first(primary_link(entry)?, "img")?;
                absolutize(&self.origin, attr(photo, "src")?)
            }),
        }
    }
}

impl RecordParser for CoAuthorListParser {
    type Record = Vec<CoAuthor>;

    fn parse(&self, html: &str) -> Self::Record {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }
}

/// First link of the entry's first block: the photo link to the profile.
fn primary_link(entry: ElementRef<'_>) -> Extracted<ElementRef<'_>> {
    first(first(entry, "div")?, "a")
}
