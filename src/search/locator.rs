//! Match locator
//!
//! Finds query occurrences in a page's folded text and maps each occurrence
//! back to the runs it covers.
//!
//! Separator policy: the inserted join char is searchable (it is a literal
//! space), but it has no geometry. When a match starts on a separator the span
//! begins at the first char of the following run; when it ends on one the
//! span ends after the last char of the preceding run. A match made only of
//! separators has no span and is discarded.

use super::index::{CharSlot, PageTextIndex};

/// Spans covering more runs than this are unusual and get logged
pub const MAX_EXPECTED_RUN_SPAN: usize = 20;

/// Char offsets `[start, end)` into the page text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub start: usize,
    pub end: usize,
}

/// Runs covered by one occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSpan {
    pub first_run: usize,
    /// First covered char within `first_run`
    pub first_char: usize,
    pub last_run: usize,
    /// One past the last covered char within `last_run`
    pub last_char_end: usize,
}

impl RunSpan {
    /// Number of runs from first to last inclusive
    pub fn run_count(&self) -> usize {
        self.last_run - self.first_run + 1
    }
}

/// A located occurrence together with its run span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedMatch {
    pub occurrence: Occurrence,
    pub span: RunSpan,
}

/// All non-overlapping occurrences of `needle`, scanning left to right
///
/// The next scan starts where the previous match ended. An empty needle or
/// one longer than the haystack yields nothing.
pub fn find_occurrences(haystack: &[char], needle: &[char]) -> Vec<Occurrence> {
    let n = needle.len();
    if n == 0 || n > haystack.len() {
        return Vec::new();
    }

    let mut occurrences = Vec::new();
    let mut pos = 0;
    while pos + n <= haystack.len() {
        if haystack[pos..pos + n] == *needle {
            occurrences.push(Occurrence {
                start: pos,
                end: pos + n,
            });
            pos += n;
        } else {
            pos += 1;
        }
    }

    occurrences
}

/// Resolve the run span of an occurrence
///
/// Returns `None` when the occurrence touches no run char.
pub fn resolve_span(index: &PageTextIndex, occurrence: &Occurrence) -> Option<RunSpan> {
    let map = index.char_map();
    if occurrence.start >= occurrence.end || occurrence.end > map.len() {
        return None;
    }
    let covered = &map[occurrence.start..occurrence.end];

    let (first_run, first_char) = covered.iter().find_map(|slot| match *slot {
        CharSlot::Run {
            run_index,
            char_index,
        } => Some((run_index, char_index)),
        CharSlot::Separator => None,
    })?;

    let (last_run, last_char) = covered.iter().rev().find_map(|slot| match *slot {
        CharSlot::Run {
            run_index,
            char_index,
        } => Some((run_index, char_index)),
        CharSlot::Separator => None,
    })?;

    Some(RunSpan {
        first_run,
        first_char,
        last_run,
        last_char_end: last_char + 1,
    })
}

/// Locate every occurrence of an already-folded query on a page
pub fn locate(index: &PageTextIndex, folded_query: &[char]) -> Vec<LocatedMatch> {
    find_occurrences(index.folded(), folded_query)
        .into_iter()
        .filter_map(|occurrence| {
            let Some(span) = resolve_span(index, &occurrence) else {
                tracing::debug!(
                    page = index.page_number(),
                    start = occurrence.start,
                    "Discarding separator-only match"
                );
                return None;
            };

            if span.run_count() > MAX_EXPECTED_RUN_SPAN {
                tracing::debug!(
                    page = index.page_number(),
                    runs = span.run_count(),
                    "Match spans an unusually large number of runs"
                );
            }

            Some(LocatedMatch { occurrence, span })
        })
        .collect()
}
