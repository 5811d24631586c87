//! Author profile page.

use super::RecordParser;
use crate::extract::{
    absolutize, all, attr, collapsed_text, first, list_in, nth, pair_series, query_param, texts,
    trimmed_text, Extracted, FieldScope,
};
use crate::models::{AuthorProfile, YearCount};
use scraper::{ElementRef, Html};
use url::Url;

const RECORD: &str = "author_profile";

const NAME: &str = "#gsc_prf_in";
const CANONICAL_LINK: &str = "link[rel=canonical]";
/// Repeated info lines: bio first, interests second
const INFO_LINE: &str = ".gsc_prf_il";
const PHOTO: &str = "img#gsc_prf_pup, img#gsc_prf_pup-img";

/// Citation statistics table; row 0 is the header
const STATS_TABLE: &str = "#gsc_rsb_st";
const CITATIONS_ROW: usize = 1;
const H_INDEX_ROW: usize = 2;
const I10_INDEX_ROW: usize = 3;

/// Parses the `user=<uid>` profile page.
#[derive(Debug, Clone)]
pub struct AuthorProfileParser {
    origin: Url,
}

impl AuthorProfileParser {
    /// `origin` resolves the relative photo link.
    pub fn new(origin: Url) -> Self {
        Self { origin }
    }

    /// Parse an already-built document tree.
    pub fn parse_document(&self, document: &Html) -> AuthorProfile {
        let root = document.root_element();
        let scope = FieldScope::document(RECORD);

        AuthorProfile {
            name: scope.field("name", || first(root, NAME).map(collapsed_text)),
            uid: scope.field("uid", || {
                let href = attr(first(root, CANONICAL_LINK)?, "href")?;
                query_param(href, "user")
            }),
            short_bio: scope.field("short_bio", || nth(root, INFO_LINE, 0).map(trimmed_text)),
            research_interests: scope.field("research_interests", || {
                let interests = all(nth(root, INFO_LINE, 1)?, "a")?;
                Ok(texts(&interests))
            }),
            total_citations: scope.field("total_citations", || stat_cell(root, CITATIONS_ROW)),
            h_index: scope.field("h_index", || stat_cell(root, H_INDEX_ROW)),
            i10_index: scope.field("i10_index", || stat_cell(root, I10_INDEX_ROW)),
            publications_by_year: scope.field("publications_by_year", || {
                publications_by_year(root)
            }),
            image_url: scope.field("image_url", || {
                absolutize(&self.origin, attr(first(root, PHOTO)?, "src")?)
            }),
        }
    }
}

impl RecordParser for AuthorProfileParser {
    type Record = AuthorProfile;

    fn parse(&self, html: &str) -> Self::Record {
        let document = Html::parse_document(html);
        self.parse_document(&document)
    }
}

/// Second cell ("All" column) of a statistics row.
fn stat_cell(root: ElementRef<'_>, row: usize) -> Extracted<String> {
    let table = first(root, STATS_TABLE)?;
    let row = nth(table, "tr", row)?;
    nth(row, "td", 1).map(trimmed_text)
}

/// Bar chart of citations per year.
///
/// Older pages keep axis labels in `#gsc_g_x` and bars in `#gsc_g_bars`;
/// newer ones only tag them `.gsc_g_t` and `.gsc_g_al`.
fn publications_by_year(root: ElementRef<'_>) -> Extracted<Vec<YearCount>> {
    let (years, counts) = match list_in(root, "#gsc_g_x", "span") {
        Ok(years) => (years, list_in(root, "#gsc_g_bars", "a")?),
        Err(_) => (all(root, ".gsc_g_t")?, all(root, ".gsc_g_al")?),
    };
    Ok(pair_series(&texts(&years), &texts(&counts)))
}
