//! Property tests for document text search.
//!
//! Verifies that:
//! 1. Every match's text is the page text at its offsets and equals the query
//!    case-insensitively
//! 2. Match counts agree with a plain non-overlapping scan
//! 3. Repeated searches return identical results
//! 4. Scaled geometry re-projects onto any zoom
//! 5. Swapping the document never serves text from the old one

use std::future::Future;
use std::sync::Arc;

use highlight_locator::config::SearchConfig;
use highlight_locator::document::{MemoryDocument, TextRun};
use highlight_locator::geometry::to_viewport_rect;
use highlight_locator::search::SearchEngine;
use proptest::prelude::*;

const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const EPSILON: f64 = 1e-6;

// ============================================================================
// HELPERS
// ============================================================================

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

/// One run per line, 6 units per char, 12 units tall
fn line_runs(lines: &[String]) -> Vec<TextRun> {
    lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let width = line.chars().count() as f64 * 6.0;
            TextRun::positioned(line.clone(), 72.0, 700.0 - i as f64 * 14.0, width, 12.0)
        })
        .collect()
}

fn build_document(id: &str, pages: &[Vec<String>]) -> Arc<MemoryDocument> {
    let document = pages.iter().fold(MemoryDocument::new(id), |doc, lines| {
        doc.with_page(PAGE_WIDTH, PAGE_HEIGHT, line_runs(lines))
    });
    Arc::new(document)
}

fn page_text(lines: &[String]) -> String {
    lines
        .iter()
        .filter(|line| !line.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

fn slice_chars(text: &str, start: usize, end: usize) -> String {
    text.chars().skip(start).take(end - start).collect()
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// ============================================================================
// STRATEGIES
// ============================================================================

/// Mixed-case runs with no whitespace inside a run
fn run_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z]{1,8}").unwrap()
}

fn page_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(run_strategy(), 1..8)
}

fn document_strategy() -> impl Strategy<Value = Vec<Vec<String>>> {
    prop::collection::vec(page_strategy(), 1..4)
}

/// A document plus a query cut from one of its pages
fn document_and_query() -> impl Strategy<Value = (Vec<Vec<String>>, String)> {
    document_strategy()
        .prop_flat_map(|pages| {
            let count = pages.len();
            (Just(pages), 0..count, any::<prop::sample::Index>(), 1usize..6)
        })
        .prop_map(|(pages, page, start, len)| {
            let text: Vec<char> = page_text(&pages[page]).chars().collect();
            let start = start.index(text.len());
            let end = (start + len).min(text.len());
            let query: String = text[start..end].iter().collect();
            (pages, query)
        })
        .prop_filter("query must not be blank", |(_, query)| !query.trim().is_empty())
}

// ============================================================================
// SEARCH PROPERTIES
// ============================================================================

proptest! {
    /// Property: match text is the page slice and equals the query ignoring case
    #[test]
    fn prop_match_text_agrees_with_offsets((pages, query) in document_and_query()) {
        let engine = SearchEngine::new(build_document("doc", &pages));
        let results = block_on(engine.search_text(&query));

        prop_assert!(!results.is_empty());
        for m in &results {
            let text = page_text(&pages[(m.page_number - 1) as usize]);
            prop_assert_eq!(&m.text, &slice_chars(&text, m.start_offset, m.end_offset));
            prop_assert_eq!(m.text.to_lowercase(), query.to_lowercase());
            prop_assert!(m.run_count() >= 1);
            prop_assert!(m.position.rects.iter().all(|r| !r.is_degenerate()));
        }
    }

    /// Property: match counts equal a non-overlapping scan of each page
    #[test]
    fn prop_match_count_per_page((pages, query) in document_and_query()) {
        let engine = SearchEngine::new(build_document("doc", &pages));
        let results = block_on(engine.search_text(&query));
        let needle = query.to_lowercase();

        for (i, lines) in pages.iter().enumerate() {
            let page_number = i as u32 + 1;
            let expected = page_text(lines).to_lowercase().matches(needle.as_str()).count();
            let found = results.iter().filter(|m| m.page_number == page_number).count();
            prop_assert_eq!(found, expected);
        }

        let indexes: Vec<usize> = results.iter().map(|m| m.match_index).collect();
        prop_assert_eq!(indexes, (0..results.len()).collect::<Vec<_>>());
    }

    /// Property: searching twice gives identical results
    #[test]
    fn prop_search_is_idempotent((pages, query) in document_and_query()) {
        let engine = SearchEngine::new(build_document("doc", &pages));
        let first = block_on(engine.search_text(&query));
        let second = block_on(engine.search_text(&query));
        prop_assert_eq!(first, second);
    }

    /// Property: scaled rects re-project onto the search viewport and scale linearly
    #[test]
    fn prop_scaled_rects_round_trip(
        (pages, query) in document_and_query(),
        scale in 0.5f64..3.0,
        zoom in 0.5f64..3.0,
    ) {
        let config = SearchConfig { scale, ..SearchConfig::default() };
        let engine = SearchEngine::with_config(build_document("doc", &pages), config);
        let results = block_on(engine.search_text(&query));

        for m in &results {
            for (scaled, rect) in m.scaled_position.rects.iter().zip(&m.position.rects) {
                let same = to_viewport_rect(scaled, PAGE_WIDTH * scale, PAGE_HEIGHT * scale);
                prop_assert!(approx_eq(same.left, rect.left));
                prop_assert!(approx_eq(same.top, rect.top));
                prop_assert!(approx_eq(same.width, rect.width));
                prop_assert!(approx_eq(same.height, rect.height));

                let zoomed = to_viewport_rect(scaled, PAGE_WIDTH * zoom, PAGE_HEIGHT * zoom);
                let ratio = zoom / scale;
                prop_assert!(approx_eq(zoomed.left, rect.left * ratio));
                prop_assert!(approx_eq(zoomed.width, rect.width * ratio));
            }

            let scaled_bound = &m.scaled_position.bounding_rect;
            prop_assert!(approx_eq(scaled_bound.width, PAGE_WIDTH));
            prop_assert!(approx_eq(scaled_bound.height, PAGE_HEIGHT));

            let bound = m.position.bounding_rect;
            let same = to_viewport_rect(scaled_bound, PAGE_WIDTH * scale, PAGE_HEIGHT * scale);
            prop_assert!(approx_eq(same.left, bound.left));
            prop_assert!(approx_eq(same.top, bound.top));
            prop_assert!(approx_eq(same.width, bound.width));
            prop_assert!(approx_eq(same.height, bound.height));
        }
    }

    /// Property: after a document swap results match a fresh engine
    #[test]
    fn prop_update_document_discards_old_text(
        (old_pages, query) in document_and_query(),
        new_pages in document_strategy(),
    ) {
        let engine = SearchEngine::new(build_document("old", &old_pages));
        block_on(engine.search_text(&query));

        let new_document = build_document("new", &new_pages);
        block_on(engine.update_document(new_document.clone()));
        let swapped = block_on(engine.search_text(&query));

        let fresh = SearchEngine::new(new_document);
        prop_assert_eq!(swapped, block_on(fresh.search_text(&query)));
    }
}

// ============================================================================
// SCENARIOS
// ============================================================================

fn hello_world() -> Arc<MemoryDocument> {
    Arc::new(MemoryDocument::new("hello").with_page(
        PAGE_WIDTH,
        PAGE_HEIGHT,
        vec![
            TextRun::positioned("Hello", 72.0, 700.0, 30.0, 12.0),
            TextRun::positioned("World", 108.0, 700.0, 30.0, 12.0),
        ],
    ))
}

#[tokio::test]
async fn test_query_must_include_run_separator() {
    let engine = SearchEngine::new(hello_world());

    assert!(engine.search_text("loW").await.is_empty());

    let results = engine.search_text("lo w").await;
    assert_eq!(results.len(), 1);
    let m = &results[0];
    assert_eq!(m.text, "lo W");
    assert_eq!(m.position.rects.len(), 2);
    assert_eq!(m.scaled_position.rects.len(), 2);

    // "lo" is chars 3..5 of a five-char, 30-unit run
    let first = m.position.rects[0];
    assert!(approx_eq(first.left, 90.0));
    assert!(approx_eq(first.width, 12.0));
    // "W" is the first char of the second run
    let second = m.position.rects[1];
    assert!(approx_eq(second.left, 108.0));
    assert!(approx_eq(second.width, 6.0));

    let bound = m.position.bounding_rect;
    assert!(approx_eq(bound.left, 90.0));
    assert!(approx_eq(bound.right(), 114.0));
}

#[tokio::test]
async fn test_clinical_note_scenario() {
    let document = Arc::new(MemoryDocument::new("note").with_page(
        PAGE_WIDTH,
        PAGE_HEIGHT,
        vec![
            TextRun::positioned("Patient presents with", 72.0, 700.0, 126.0, 12.0),
            TextRun::positioned("chest pain", 72.0, 686.0, 60.0, 12.0),
        ],
    ));
    let engine = SearchEngine::new(document);

    let results = engine.search_text("CHEST").await;
    assert_eq!(results.len(), 1);
    let m = &results[0];
    assert_eq!(m.id, "search-1-0");
    assert_eq!(m.text, "chest");
    assert_eq!(m.start_offset, 22);
    assert_eq!(m.end_offset, 27);

    // Baseline 686 with height 12 on a 792-tall page at scale 1
    let rect = m.position.rects[0];
    assert!(approx_eq(rect.left, 72.0));
    assert!(approx_eq(rect.top, 792.0 - 698.0));
    assert!(approx_eq(rect.width, 30.0));
    assert!(approx_eq(rect.height, 12.0));

    let scaled = m.scaled_position.bounding_rect;
    assert!(approx_eq(scaled.width, PAGE_WIDTH));
    assert!(approx_eq(scaled.height, PAGE_HEIGHT));
    assert_eq!(scaled.page_number, 1);

    let spanning = engine.search_text("with chest").await;
    assert_eq!(spanning.len(), 1);
    assert_eq!(spanning[0].run_count(), 2);
}

#[tokio::test]
async fn test_blank_and_oversized_queries() {
    let engine = SearchEngine::new(hello_world());

    assert!(engine.search_text("").await.is_empty());
    assert!(engine.search_text(" \t ").await.is_empty());
    assert!(engine.search_text("Hello World and everyone else").await.is_empty());
}

#[tokio::test]
async fn test_trailing_separator_snaps_to_run_end() {
    let engine = SearchEngine::new(hello_world());

    let results = engine.search_text("o ").await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].text, "o ");
    assert_eq!(results[0].run_count(), 1);
    assert!(approx_eq(results[0].position.rects[0].left, 96.0));
    assert!(approx_eq(results[0].position.rects[0].width, 6.0));
}
