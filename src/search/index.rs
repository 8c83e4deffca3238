//! Per-page text index
//!
//! Concatenates a page's runs into one searchable string and records, for
//! every char of that string, which run (and which char of the run) it came
//! from.

use crate::document::TextRun;
use crate::geometry::Viewport;

/// Char inserted between adjacent runs
pub const SEPARATOR: char = ' ';

/// Origin of one char of the concatenated page text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharSlot {
    /// Char `char_index` of run `run_index`
    Run { run_index: usize, char_index: usize },
    /// Inserted join char, not part of any run
    Separator,
}

/// Searchable text of one page
#[derive(Debug, Clone)]
pub struct PageTextIndex {
    page_number: u32,
    text: String,
    chars: Vec<char>,
    folded: Vec<char>,
    char_map: Vec<CharSlot>,
    runs: Vec<TextRun>,
    viewport: Option<Viewport>,
}

impl PageTextIndex {
    /// Build the index for a page
    ///
    /// Empty runs contribute no chars and no separator. Run indices in the
    /// char map refer to positions in `runs` as given.
    pub fn build(page_number: u32, runs: Vec<TextRun>, viewport: Viewport) -> Self {
        let mut text = String::new();
        let mut char_map = Vec::new();

        for (run_index, run) in runs.iter().enumerate() {
            if run.is_empty() {
                continue;
            }

            if !char_map.is_empty() {
                text.push(SEPARATOR);
                char_map.push(CharSlot::Separator);
            }

            for (char_index, ch) in run.text.chars().enumerate() {
                text.push(ch);
                char_map.push(CharSlot::Run {
                    run_index,
                    char_index,
                });
            }
        }

        let chars: Vec<char> = text.chars().collect();
        let folded = chars.iter().copied().map(fold_char).collect();
        debug_assert_eq!(chars.len(), char_map.len());

        Self {
            page_number,
            text,
            chars,
            folded,
            char_map,
            runs,
            viewport: Some(viewport),
        }
    }

    /// Index with no text, used when a page cannot be extracted
    pub fn empty(page_number: u32) -> Self {
        Self {
            page_number,
            text: String::new(),
            chars: Vec::new(),
            folded: Vec::new(),
            char_map: Vec::new(),
            runs: Vec::new(),
            viewport: None,
        }
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Concatenated page text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Page text as chars, aligned with [`Self::char_map`]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Case-folded page text, same length as [`Self::chars`]
    pub fn folded(&self) -> &[char] {
        &self.folded
    }

    pub fn char_map(&self) -> &[CharSlot] {
        &self.char_map
    }

    pub fn runs(&self) -> &[TextRun] {
        &self.runs
    }

    /// Viewport the page was measured with; `None` for an empty index
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Substring of the page text by char offsets
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }
}

/// Lower-case a char without changing the char count
///
/// Chars whose lowercase form expands to several chars are kept as-is so
/// offsets in folded text line up with the unfolded text.
pub fn fold_char(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// Fold a query the same way page text is folded
pub fn fold_query(query: &str) -> Vec<char> {
    query.chars().map(fold_char).collect()
}
