//! Parser tests against saved citations pages.
//!
//! The fixtures under `tests/fixtures/` mirror the markup the service served
//! for well-known profiles.

use rustgscitations::models::{PublicationYear, YearCount};
use rustgscitations::parse::{
    AuthorProfileParser, CoAuthorListParser, PublicationDetailParser, PublicationListParser,
    SearchResultsParser,
};
use rustgscitations::RecordParser;
use serde_json::json;
use url::Url;

const SEARCH_HTML: &str = include_str!("fixtures/einstein_search.html");
const PROFILE_HTML: &str = include_str!("fixtures/sutton_profile.html");
const PUBLICATIONS_HTML: &str = include_str!("fixtures/sutton_publications.html");
const DETAIL_HTML: &str = include_str!("fixtures/td_learning_detail.html");
const COAUTHORS_HTML: &str = include_str!("fixtures/sutton_coauthors.html");

fn origin() -> Url {
    Url::parse("https://scholar.google.ca").expect("valid origin")
}

// =============================================================================
// Author search
// =============================================================================

#[test]
fn test_search_results_in_page_order() {
    let results = SearchResultsParser::new(origin()).parse(SEARCH_HTML);

    assert_eq!(results.len(), 3);
    let names: Vec<&str> = results.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Albert Einstein", "James Storey", "Deniz B Temel"]);
}

#[test]
fn test_search_result_fields() {
    let results = SearchResultsParser::new(origin()).parse(SEARCH_HTML);

    let einstein = &results[0];
    assert_eq!(einstein.uid, "qc6CJjYAAAAJ");
    assert_eq!(
        einstein.profile_url,
        "https://scholar.google.ca/citations?user=qc6CJjYAAAAJ&hl=en"
    );
    assert_eq!(einstein.affiliation, "Institute of Advanced Studies, Princeton");
    assert_eq!(einstein.research_areas, vec!["Physics"]);
    assert_eq!(einstein.email_domain, "");

    let storey = &results[1];
    assert_eq!(storey.email_domain, "@lhep.unibe.ch");
    assert_eq!(
        storey.affiliation,
        "Junior Independent Researcher at the Albert Einstein Center for Fundamental Physics at the"
    );

    let temel = &results[2];
    assert_eq!(
        temel.research_areas,
        vec![
            "Biophysics",
            "physics",
            "biochemistry",
            "structural biology",
            "Nuclear magnetic resonance",
        ]
    );
}

// =============================================================================
// Author profile
// =============================================================================

#[test]
fn test_profile_page() {
    let profile = AuthorProfileParser::new(origin()).parse(PROFILE_HTML);

    assert_eq!(profile.name, "Richard S. Sutton");
    assert_eq!(profile.uid, "hNTyptAAAAAJ");
    assert_eq!(
        profile.short_bio,
        "Professor of Computing Science, University of Alberta"
    );
    assert_eq!(profile.research_interests.len(), 5);
    assert_eq!(profile.research_interests[0], "artificial intelligence");
    assert_eq!(profile.total_citations, "41754");
    assert_eq!(profile.h_index, "55");
    assert_eq!(profile.i10_index, "108");
    assert_eq!(
        profile.image_url,
        "https://scholar.google.ca/citations?view_op=view_photo&user=hNTyptAAAAAJ&citpid=3"
    );
}

#[test]
fn test_profile_citation_chart() {
    let profile = AuthorProfileParser::new(origin()).parse(PROFILE_HTML);

    let counts = [2712, 2687, 2828, 2902, 2983, 3148, 3113, 3149, 250];
    let expected: Vec<YearCount> = (2007..=2015)
        .zip(counts)
        .map(|(year, count)| YearCount { year, count })
        .collect();
    assert_eq!(profile.publications_by_year, expected);
}

#[test]
fn test_profile_serialized_key_order() {
    let profile = AuthorProfileParser::new(origin()).parse(PROFILE_HTML);
    let value = serde_json::to_value(&profile).expect("serializable");

    let keys: Vec<&str> = value
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys.len(), 9);
    assert_eq!(value["publications_by_year"][0], json!({"year": 2007, "count": 2712}));
}

// =============================================================================
// Publications table
// =============================================================================

#[test]
fn test_full_publications_page() {
    let publications = PublicationListParser::new(origin()).parse(PUBLICATIONS_HTML);

    assert_eq!(publications.len(), 100);

    let first = &publications[0];
    assert_eq!(first.id, "pub000AAAAJ");
    assert_eq!(first.title, "Reinforcement learning: An introduction");
    assert_eq!(first.cited, 5304);
    assert_eq!(first.year, PublicationYear::Year(1998));
    assert_eq!(first.authors, "RS Sutton, AG Barto");
    assert_eq!(
        first.url,
        "https://scholar.google.ca/citations?view_op=view_citation&hl=en&user=hNTyptAAAAAJ&pagesize=100&citation_for_view=hNTyptAAAAAJ:pub000AAAAJ"
    );

    let last = &publications[99];
    assert_eq!(last.year, PublicationYear::Year(1987));
    assert_eq!(last.cited, 0);
}

#[test]
fn test_uncited_rows_count_zero() {
    let publications = PublicationListParser::new(origin()).parse(PUBLICATIONS_HTML);

    assert_eq!(publications[7].cited, 0);
    assert_eq!(publications[17].cited, 0);
    assert_eq!(publications[1].cited, 993);
}

#[test]
fn test_missing_year_serializes_as_marker() {
    let publications = PublicationListParser::new(origin()).parse(PUBLICATIONS_HTML);

    let undated = &publications[42];
    assert_eq!(undated.year, PublicationYear::NotAvailable);
    assert_eq!(undated.title, "Temporal-difference study number 42");

    let value = serde_json::to_value(undated).expect("serializable");
    assert_eq!(value["year"], json!("n/a"));
    assert_eq!(value["cited"], json!(706));
}

// =============================================================================
// Publication detail
// =============================================================================

#[test]
fn test_publication_detail_page() {
    let detail = PublicationDetailParser::new(origin()).parse(DETAIL_HTML);

    assert_eq!(detail.url, "http://link.springer.com/article/10.1007/BF00115009");
    assert_eq!(
        detail.title,
        "Learning to predict by the methods of temporal differences"
    );
    assert_eq!(detail.authors, vec!["Richard S Sutton"]);
    assert_eq!(detail.publication_date, "1988/8/1");
    assert_eq!(detail.journal_name, "Machine learning");
    assert_eq!(detail.publisher, "Kluwer Academic Publishers");
    assert_eq!(detail.citation_count, 4203);
}

#[test]
fn test_publication_detail_absent_label_is_empty() {
    let detail = PublicationDetailParser::new(origin()).parse(DETAIL_HTML);
    assert_eq!(detail.page_range, "");
}

#[test]
fn test_publication_detail_description_keeps_whitespace() {
    let detail = PublicationDetailParser::new(origin()).parse(DETAIL_HTML);

    assert!(detail
        .partial_abstract
        .starts_with("This article introduces a class of incremental learning procedures"));
    assert!(detail
        .partial_abstract
        .contains("for prediction.\n  Unlike conventional"));
}

#[test]
fn test_publication_detail_citation_chart() {
    let detail = PublicationDetailParser::new(origin()).parse(DETAIL_HTML);

    let counts = [31, 40, 52, 48, 61, 57, 9];
    let expected: Vec<YearCount> = (2009..=2015)
        .zip(counts)
        .map(|(year, count)| YearCount { year, count })
        .collect();
    assert_eq!(detail.citations_by_year, expected);
}

// =============================================================================
// Co-authors
// =============================================================================

#[test]
fn test_coauthors_page() {
    let coauthors = CoAuthorListParser::new(origin()).parse(COAUTHORS_HTML);

    assert_eq!(coauthors.len(), 3);

    let precup = &coauthors[0];
    assert_eq!(precup.uid, "j54VcVEAAAAJ");
    assert_eq!(precup.name, "Doina Precup");
    assert_eq!(precup.citation_count, Some(12840));
    assert_eq!(precup.domain, "@cs.mcgill.ca");
    assert_eq!(precup.bio, "McGill University");
    assert_eq!(
        precup.profile_url,
        "https://scholar.google.ca/citations?user=j54VcVEAAAAJ&hl=en"
    );
    assert_eq!(
        precup.image_url,
        "https://scholar.google.ca/citations?view_op=view_photo&user=j54VcVEAAAAJ&citpid=1"
    );
}

#[test]
fn test_coauthor_without_domain_or_citations() {
    let coauthors = CoAuthorListParser::new(origin()).parse(COAUTHORS_HTML);

    let muller = &coauthors[2];
    assert_eq!(muller.name, "Martin Müller");
    assert_eq!(muller.domain, "");
    assert_eq!(muller.citation_count, None);

    let value = serde_json::to_value(muller).expect("serializable");
    assert_eq!(value["citation_count"], json!(""));
}

// =============================================================================
// Cross-cutting
// =============================================================================

#[test]
fn test_parsing_is_idempotent() {
    let search = SearchResultsParser::new(origin());
    assert_eq!(search.parse(SEARCH_HTML), search.parse(SEARCH_HTML));

    let profile = AuthorProfileParser::new(origin());
    assert_eq!(profile.parse(PROFILE_HTML), profile.parse(PROFILE_HTML));

    let publications = PublicationListParser::new(origin());
    assert_eq!(
        publications.parse(PUBLICATIONS_HTML),
        publications.parse(PUBLICATIONS_HTML)
    );

    let detail = PublicationDetailParser::new(origin());
    assert_eq!(detail.parse(DETAIL_HTML), detail.parse(DETAIL_HTML));

    let coauthors = CoAuthorListParser::new(origin());
    assert_eq!(coauthors.parse(COAUTHORS_HTML), coauthors.parse(COAUTHORS_HTML));
}

#[test]
fn test_wrong_page_kind_yields_empty_records() {
    assert!(SearchResultsParser::new(origin()).parse(PROFILE_HTML).is_empty());
    assert!(PublicationListParser::new(origin()).parse(SEARCH_HTML).is_empty());
}
