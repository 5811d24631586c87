//! Field extraction primitives shared by every record parser.
//!
//! Each primitive locates something in a document subtree and either returns
//! it or a [`FieldMissing`]. Parsers run every field rule through
//! [`FieldScope::field`], which logs the miss and substitutes the field's
//! default, so a single absent node never costs the rest of the record.

use crate::models::YearCount;
use scraper::{ElementRef, Selector};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Anchor for resolving relative links when only query parameters matter
const PLACEHOLDER_BASE: &str = "https://placeholder.invalid/";

/// A field could not be located or converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FieldMissing(String);

impl FieldMissing {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }

    pub fn reason(&self) -> &str {
        &self.0
    }
}

/// Outcome of one extraction step
pub type Extracted<T> = std::result::Result<T, FieldMissing>;

/// Extension trait for turning absent nodes into [`FieldMissing`]
pub trait OptionExt<T> {
    /// Convert `None` into a miss described by `what`
    fn or_missing(self, what: &str) -> Extracted<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn or_missing(self, what: &str) -> Extracted<T> {
        self.ok_or_else(|| FieldMissing::new(format!("{} not found", what)))
    }
}

/// Names the record being built, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FieldScope {
    record: &'static str,
    index: Option<usize>,
}

impl FieldScope {
    /// A record built from a whole document (profile, publication detail)
    pub fn document(record: &'static str) -> Self {
        Self { record, index: None }
    }

    /// The `index`-th record of a repeated collection
    pub fn item(record: &'static str, index: usize) -> Self {
        Self {
            record,
            index: Some(index),
        }
    }

    /// Run one field rule; on a miss, log it and return the field's sentinel.
    pub fn field<T: Default>(&self, name: &'static str, rule: impl FnOnce() -> Extracted<T>) -> T {
        match rule() {
            Ok(value) => value,
            Err(missing) => {
                debug!(
                    record = self.record,
                    index = ?self.index,
                    field = name,
                    reason = %missing,
                    "Field not extracted, using sentinel"
                );
                T::default()
            }
        }
    }
}

/// Compile a CSS selector.
pub fn selector(css: &str) -> Extracted<Selector> {
    Selector::parse(css).map_err(|e| FieldMissing::new(format!("bad selector '{}': {}", css, e)))
}

/// First descendant of `scope` matching `css`.
pub fn first<'a>(scope: ElementRef<'a>, css: &str) -> Extracted<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).next();
    found.or_missing(css)
}

/// Every descendant of `scope` matching `css`; empty is a valid answer.
pub fn all<'a>(scope: ElementRef<'a>, css: &str) -> Extracted<Vec<ElementRef<'a>>> {
    let sel = selector(css)?;
    let found: Vec<_> = scope.select(&sel).collect();
    Ok(found)
}

/// The `index`-th (zero-based) descendant matching `css`.
pub fn nth<'a>(scope: ElementRef<'a>, css: &str, index: usize) -> Extracted<ElementRef<'a>> {
    let sel = selector(css)?;
    let found = scope.select(&sel).nth(index);
    found.or_missing(&format!("{}[{}]", css, index))
}

/// Items matching `item_css` inside the first `container_css`.
///
/// A missing container is a miss; a container without items is an empty list.
pub fn list_in<'a>(
    scope: ElementRef<'a>,
    container_css: &str,
    item_css: &str,
) -> Extracted<Vec<ElementRef<'a>>> {
    let container = first(scope, container_css)?;
    all(container, item_css)
}

/// All text below `node`, exactly as rendered.
pub fn text(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// All text below `node`, surrounding whitespace removed.
pub fn trimmed_text(node: ElementRef<'_>) -> String {
    text(node).trim().to_string()
}

/// All text below `node` with whitespace runs collapsed to single spaces.
pub fn collapsed_text(node: ElementRef<'_>) -> String {
    node.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed text of each node, in order.
pub fn texts(nodes: &[ElementRef<'_>]) -> Vec<String> {
    nodes.iter().map(|n| trimmed_text(*n)).collect()
}

/// Attribute value of `node`.
pub fn attr<'a>(node: ElementRef<'a>, name: &str) -> Extracted<&'a str> {
    node.value()
        .attr(name)
        .or_missing(&format!("attribute '{}'", name))
}

/// Next sibling of `node` that is an element.
pub fn next_element_sibling(node: ElementRef<'_>) -> Option<ElementRef<'_>> {
    node.next_siblings().find_map(ElementRef::wrap)
}

/// Value node paired with the first label in `labels` present under `scope`.
///
/// Label nodes match `label_css`; their text must equal the label after
/// trimming. The value is the label's next element sibling.
pub fn labelled_value<'a>(
    scope: ElementRef<'a>,
    label_css: &str,
    labels: &[&str],
) -> Extracted<ElementRef<'a>> {
    let label_nodes = all(scope, label_css)?;

    for wanted in labels {
        if let Some(label) = label_nodes.iter().find(|n| trimmed_text(**n) == *wanted) {
            return next_element_sibling(*label)
                .or_missing(&format!("value next to '{}'", wanted));
        }
    }

    Err(FieldMissing::new(format!("no label among {:?}", labels)))
}

/// Decoded value of query parameter `key` in a (possibly relative) link.
pub fn query_param(href: &str, key: &str) -> Extracted<String> {
    let base = Url::parse(PLACEHOLDER_BASE).map_err(|e| FieldMissing::new(e.to_string()))?;
    let url = base
        .join(href.trim())
        .map_err(|e| FieldMissing::new(format!("unparseable link '{}': {}", href, e)))?;

    let value = url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned());
    value.or_missing(&format!("query parameter '{}'", key))
}

/// Resolve `href` against the service origin.
pub fn absolutize(origin: &Url, href: &str) -> Extracted<String> {
    let href = href.trim();
    if href.is_empty() {
        return Err(FieldMissing::new("empty link"));
    }
    origin
        .join(href)
        .map(String::from)
        .map_err(|e| FieldMissing::new(format!("unresolvable link '{}': {}", href, e)))
}

/// Parse trimmed text as an integer.
pub fn parse_int<T: FromStr>(text: &str) -> Extracted<T> {
    let trimmed = text.trim();
    trimmed
        .parse()
        .map_err(|_| FieldMissing::new(format!("'{}' is not an integer", trimmed)))
}

/// Last whitespace-separated token, e.g. `42` in `Cited by 42`.
pub fn last_token(text: &str) -> Extracted<&str> {
    text.split_whitespace().last().or_missing("trailing token")
}

/// Pair year labels with count values by position.
///
/// Stops at the shorter list and at the first pair where either side is not
/// an integer; no partial pair is emitted.
pub fn pair_series<Y: AsRef<str>, C: AsRef<str>>(years: &[Y], counts: &[C]) -> Vec<YearCount> {
    years
        .iter()
        .zip(counts)
        .map_while(|(year, count)| {
            Some(YearCount {
                year: parse_int(year.as_ref()).ok()?,
                count: parse_int(count.as_ref()).ok()?,
            })
        })
        .collect()
}
