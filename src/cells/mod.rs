//! Grapheme clusters mapped onto terminal columns.
//!
//! Every animation frame, bar and widget is handled as [`Cells`]: one entry
//! per occupied column. A wide grapheme is followed by a [`Cell::Filler`], so
//! `cells.len()` is always the number of columns the text needs. Slicing can
//! split a wide grapheme from its filler; [`fix_cells`] repairs both ends.

pub mod width;

use std::fmt;
use std::ops::{Index, Range};
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::terminal::Terminal;

pub use width::{has_wide, is_wide, VS15};

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\r\n]").expect("LINE_BREAKS regex is valid"));

/// One terminal column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Cell {
    /// A grapheme cluster, occupying one or two columns.
    Grapheme(String),
    /// The second column of the wide grapheme just before it.
    Filler,
}

impl Cell {
    /// Create a grapheme cell.
    pub fn grapheme(g: impl Into<String>) -> Self {
        Cell::Grapheme(g.into())
    }

    /// A single blank column.
    pub fn blank() -> Self {
        Cell::Grapheme(" ".to_string())
    }

    /// The grapheme text, or `None` for a filler.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Grapheme(g) => Some(g),
            Cell::Filler => None,
        }
    }

    /// True for a filler cell.
    pub fn is_filler(&self) -> bool {
        matches!(self, Cell::Filler)
    }

    /// True for a grapheme occupying two columns.
    pub fn is_wide(&self) -> bool {
        self.as_str().is_some_and(is_wide)
    }
}

/// A sequence of cells, one per terminal column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Cells(Vec<Cell>);

impl Cells {
    /// An empty sequence.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// `n` blank columns.
    pub fn blanks(n: usize) -> Self {
        Self(vec![Cell::blank(); n])
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no columns are occupied.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.0.iter()
    }

    /// The raw cells.
    pub fn as_slice(&self) -> &[Cell] {
        &self.0
    }

    /// Copy a range of columns, clamped to the available ones.
    ///
    /// The result is not fixed; call [`fix_cells`] when the cut may split a
    /// wide grapheme.
    pub fn slice(&self, range: Range<usize>) -> Cells {
        let end = range.end.min(self.0.len());
        let start = range.start.min(end);
        Cells(self.0[start..end].to_vec())
    }

    /// The first `n` columns, with both ends fixed.
    pub fn truncated(&self, n: usize) -> Cells {
        if n >= self.0.len() {
            return self.clone();
        }
        fix_cells(self.slice(0..n))
    }

    /// Repeat the whole sequence cyclically until exactly `n` columns.
    ///
    /// The cut at the end is not fixed.
    pub fn repeat_to(&self, n: usize) -> Cells {
        if self.0.is_empty() {
            return Cells::new();
        }
        Cells(self.0.iter().cycle().take(n).cloned().collect())
    }

    /// Reverse the graphemes, keeping every filler after its wide grapheme.
    pub fn reversed(&self) -> Cells {
        let mut out = Vec::with_capacity(self.0.len());
        for cell in self.0.iter().rev() {
            match cell {
                Cell::Filler => {}
                Cell::Grapheme(g) => {
                    out.push(cell.clone());
                    if is_wide(g) {
                        out.push(Cell::Filler);
                    }
                }
            }
        }
        Cells(out)
    }

    /// Append the cells of another sequence.
    pub fn extend_from(&mut self, other: &Cells) {
        self.0.extend_from_slice(&other.0);
    }

    /// Append a single cell.
    pub fn push(&mut self, cell: Cell) {
        self.0.push(cell);
    }

    /// The graphemes, skipping fillers.
    pub fn graphemes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(Cell::as_str)
    }

    /// True if any grapheme is wide.
    pub fn has_wide(&self) -> bool {
        has_wide(self.graphemes())
    }
}

impl Index<usize> for Cells {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.0[index]
    }
}

impl FromIterator<Cell> for Cells {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Cells(iter.into_iter().collect())
    }
}

impl From<Vec<Cell>> for Cells {
    fn from(cells: Vec<Cell>) -> Self {
        Cells(cells)
    }
}

impl From<&str> for Cells {
    fn from(text: &str) -> Self {
        to_cells(text)
    }
}

impl<'a> IntoIterator for &'a Cells {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Cells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for g in self.graphemes() {
            f.write_str(g)?;
        }
        Ok(())
    }
}

/// Convert text into cells.
///
/// Carriage returns and line feeds become spaces, so the result always fits
/// on a single line.
pub fn to_cells(text: &str) -> Cells {
    let text = LINE_BREAKS.replace_all(text, " ");
    let mut cells = Vec::with_capacity(text.len());
    for g in text.graphemes(true) {
        cells.push(Cell::Grapheme(g.to_string()));
        if is_wide(g) {
            cells.push(Cell::Filler);
        }
    }
    Cells(cells)
}

/// Repair the ends of a sequence cut in the middle of wide graphemes.
///
/// A leading filler (its grapheme was cut away) and a trailing wide
/// grapheme (its filler was cut away) are each replaced by a blank, so the
/// length never changes.
pub fn fix_cells(mut cells: Cells) -> Cells {
    if let Some(first) = cells.0.first_mut() {
        if first.is_filler() {
            *first = Cell::blank();
        }
    }
    if let Some(last) = cells.0.last_mut() {
        if last.is_wide() {
            *last = Cell::blank();
        }
    }
    cells
}

/// Concatenate fragments without any separator.
pub fn combine_cells(fragments: &[&Cells]) -> Cells {
    let total = fragments.iter().map(|f| f.len()).sum();
    let mut out = Vec::with_capacity(total);
    for fragment in fragments {
        out.extend_from_slice(&fragment.0);
    }
    Cells(out)
}

/// Convert cells back to text, dropping the fillers.
pub fn join_cells(cells: &Cells) -> String {
    cells.to_string()
}

/// Print fragments on the current line, up to `cols` columns.
///
/// Non-empty fragments are separated by one space. The line starts with a
/// carriage return, and is cleared to its end when it got shorter than
/// `last_len`. Returns the number of columns used.
pub fn print_cells(fragments: &[&Cells], cols: usize, last_len: usize, term: &dyn Terminal) -> usize {
    let mut available = cols;
    term.carriage_return();
    let mut first = true;
    for fragment in fragments.iter().filter(|f| !f.is_empty()) {
        if available == 0 {
            break;
        }
        if !first {
            term.write(" ");
            available -= 1;
            if available == 0 {
                break;
            }
        }
        first = false;

        if fragment.len() <= available {
            available -= fragment.len();
            term.write(&join_cells(fragment));
        } else {
            term.write(&join_cells(&fragment.truncated(available)));
            available = 0;
        }
    }

    let used = cols - available;
    if last_len > 0 && used < last_len {
        term.clear_end();
    }
    used
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::MemoryTerminal;

    fn texts(cells: &Cells) -> Vec<Option<&str>> {
        cells.iter().map(Cell::as_str).collect()
    }

    #[test]
    fn test_to_cells_ascii() {
        let cells = to_cells("abc");
        assert_eq!(cells.len(), 3);
        assert_eq!(join_cells(&cells), "abc");
    }

    #[test]
    fn test_to_cells_wide_adds_filler() {
        let cells = to_cells("😺a");
        assert_eq!(cells.len(), 3);
        assert_eq!(texts(&cells), vec![Some("😺"), None, Some("a")]);
    }

    #[test]
    fn test_to_cells_line_breaks_become_spaces() {
        assert_eq!(join_cells(&to_cells("a\nb\r\nc")), "a b  c");
        assert_eq!(to_cells("\n").len(), 1);
    }

    #[test]
    fn test_round_trip_preserves_text() {
        for text in ["", "plain", "😺 cat 🐶", "中文字", "👉🏾 ok"] {
            assert_eq!(join_cells(&to_cells(text)), text);
        }
    }

    #[test]
    fn test_fix_cells_leading_filler() {
        let cells = to_cells("😺ab").slice(1..4);
        let fixed = fix_cells(cells);
        assert_eq!(join_cells(&fixed), " ab");
        assert_eq!(fixed.len(), 3);
    }

    #[test]
    fn test_fix_cells_trailing_wide() {
        let cells = to_cells("ab😺").slice(0..3);
        let fixed = fix_cells(cells);
        assert_eq!(join_cells(&fixed), "ab ");
        assert_eq!(fixed.len(), 3);
    }

    #[test]
    fn test_fix_cells_complete_is_unchanged() {
        let cells = to_cells("a😺b");
        assert_eq!(fix_cells(cells.clone()), cells);
    }

    #[test]
    fn test_fix_cells_empty() {
        assert!(fix_cells(Cells::new()).is_empty());
    }

    #[test]
    fn test_truncation_never_leaves_broken_glyphs() {
        let cells = to_cells("😺😺😺");
        for n in 0..=cells.len() {
            let cut = cells.truncated(n);
            assert_eq!(cut.len(), n);
            assert!(!cut.iter().next().is_some_and(Cell::is_filler));
            assert!(!cut.iter().last().is_some_and(Cell::is_wide));
        }
    }

    #[test]
    fn test_repeat_to() {
        assert_eq!(join_cells(&to_cells("ab").repeat_to(5)), "ababa");
        assert!(Cells::new().repeat_to(3).is_empty());
    }

    #[test]
    fn test_reversed_keeps_fillers_after_wide() {
        let cells = to_cells("a😺b").reversed();
        assert_eq!(texts(&cells), vec![Some("b"), Some("😺"), None, Some("a")]);
    }

    #[test]
    fn test_combine_cells() {
        let a = to_cells("ab");
        let b = to_cells("😺");
        let combined = combine_cells(&[&a, &b]);
        assert_eq!(combined.len(), 4);
        assert_eq!(join_cells(&combined), "ab😺");
    }

    #[test]
    fn test_print_cells_joins_with_spaces() {
        let term = MemoryTerminal::interactive(80);
        let (a, empty, b) = (to_cells("ab"), Cells::new(), to_cells("cd"));
        let used = print_cells(&[&a, &empty, &b], 10, 0, &term);
        assert_eq!(used, 5);
        assert_eq!(term.contents(), "\rab cd");
    }

    #[test]
    fn test_print_cells_truncates_at_cols() {
        let term = MemoryTerminal::interactive(80);
        let (a, b) = (to_cells("ab"), to_cells("cd"));
        let used = print_cells(&[&a, &b], 4, 0, &term);
        assert_eq!(used, 4);
        assert_eq!(term.contents(), "\rab c");
    }

    #[test]
    fn test_print_cells_truncates_wide_safely() {
        let term = MemoryTerminal::interactive(80);
        let cats = to_cells("😺😺");
        let used = print_cells(&[&cats], 3, 0, &term);
        assert_eq!(used, 3);
        assert_eq!(term.contents(), "\r😺 ");
    }

    #[test]
    fn test_print_cells_clears_when_shorter() {
        let term = MemoryTerminal::interactive(80);
        let a = to_cells("ab");
        print_cells(&[&a], 10, 8, &term);
        assert_eq!(term.contents(), "\rab\x1b[K");
    }

    #[test]
    fn test_print_cells_no_clear_when_longer() {
        let term = MemoryTerminal::interactive(80);
        let a = to_cells("abcdef");
        print_cells(&[&a], 10, 3, &term);
        assert_eq!(term.contents(), "\rabcdef");
    }
}
