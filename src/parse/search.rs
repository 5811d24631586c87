//! Author search results page.

use super::RecordParser;
use crate::extract::{
    absolutize, all, attr, collapsed_text, first, list_in, query_param, trimmed_text, Extracted,
    FieldScope,
};
use crate::models::SearchResultAuthor;
use scraper::{ElementRef, Html};
use tracing::debug;
use url::Url;

const RECORD: &str = "search_result";

/// One author card on the results page
const AUTHOR_CARD: &str = ".gsc_1usr";

// Older pages use the gsc_1usr_* family, newer ones gs_ai_*.
const NAME: &str = ".gsc_1usr_name, .gs_ai_name";
const AFFILIATION: &str = ".gsc_1usr_aff, .gs_ai_aff";
const INTERESTS: &str = ".gsc_1usr_int, .gs_ai_int";
const EMAIL: &str = ".gsc_1usr_emlb, .gs_ai_eml";

/// Parses the `view_op=search_authors` page into its author cards.
#[derive(Debug, Clone)]
pub struct SearchResultsParser {
    origin: Url,
}

impl SearchResultsParser {
    /// `origin` resolves relative profile links.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Parse an already-built document tree.
    pub fn parse_document(&self, document: &Html) -> Vec<SearchResultAuthor> {
        let cards = match all(document.root_element(), AUTHOR_CARD) {
            Ok(cards) => cards,
            Err(missing) => {
                debug!(record = RECORD, reason = %missing, "No author cards");
                return Vec::new();
            }
        };

        cards
            .into_iter()
            .enumerate()
            .map(|(index, card)| self.parse_author(card, FieldScope::item(RECORD, index)))
            .collect()
    }

    fn parse_author(&self, card: ElementRef<'_>, scope: FieldScope) -> SearchResultAuthor {
        SearchResultAuthor {
            name: scope.field("name", || parse_name(card)),
            profile_url: scope.field("profile_url", || {
                absolutize(&self.origin, profile_href(card)?)
            }),
            affiliation: scope.field("affiliation", || {
                first(card, AFFILIATION).map(trimmed_text)
            }),
            research_areas: scope.field("research_areas", || {
                let links = list_in(card, INTERESTS, "a")?;
                Ok(links
                    .into_iter()
                    .map(trimmed_text)
                    .filter(|area| !area.is_empty())
                    .collect())
            }),
            email_domain: scope.field("email_domain", || first(card, EMAIL).map(trimmed_text)),
            uid: scope.field("uid", || query_param(profile_href(card)?, "user")),
        }
    }
}

impl RecordParser for SearchResultsParser {
    type Record = Vec<SearchResultAuthor>;

    fn parse(&self, html: &str) -> Self::Record {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }
}

/// The name heading sometimes wraps the last name in its own element. The
/// link text covers both shapes; the whole heading is the fallback.
fn parse_name(card: ElementRef<'_>) -> Extracted<String> {
    let heading = first(card, NAME)?;
    let from_link = first(heading, "a")
        .map(collapsed_text)
        .unwrap_or_default();

    if from_link.is_empty() {
        Ok(collapsed_text(heading))
    } else {
        Ok(from_link)
    }
}

fn profile_href(card: ElementRef<'_>) -> Extracted<&str> {
    let heading = first(card, NAME)?;
    attr(first(heading, "a")?, "href")
}
