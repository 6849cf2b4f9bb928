//! Text widgets of the bar line.

use crate::cells::{to_cells, Cell, Cells};

use super::timing::{elapsed_text, eta_text};

const ELLIPSIS: &str = "…";

/// A snapshot of the progress, as the widgets see it.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot {
    /// Items counted, or computed from the percentage of a manual bar.
    pub count: u64,
    /// The expected total, if known.
    pub total: Option<u64>,
    /// Completion, 1.0 meaning done.
    pub percent: f64,
    /// Progress is set as a percentage.
    pub manual: bool,
    /// Rendering the final receipt.
    pub end: bool,
}

impl Snapshot {
    fn incomplete(&self) -> bool {
        match self.total {
            Some(total) => self.count != total,
            None => self.percent != 1.0,
        }
    }

    fn warning(&self) -> &'static str {
        if self.end && self.incomplete() {
            "(!) "
        } else {
            ""
        }
    }
}

/// Render a title, padded or cut to `length` cells when it is not 0.
pub fn render_title(title: &str, length: usize) -> Cells {
    let cells = to_cells(title);
    if length == 0 || cells.len() == length {
        return cells;
    }
    if cells.len() < length {
        let mut padded = cells;
        padded.extend_from(&Cells::blanks(length - padded.len()));
        return padded;
    }
    let mut cut = cells.truncated(length - 1);
    cut.push(Cell::grapheme(ELLIPSIS));
    cut
}

/// `42/100 [42%]`, `42%` or `42` depending on the mode.
///
/// The receipt of an incomplete run is flagged with `(!)`.
pub fn monitor(snap: &Snapshot) -> String {
    let warning = snap.warning();
    match (snap.total, snap.manual) {
        (Some(total), _) => format!(
            "{warning}{}/{total} [{:.0}%]",
            snap.count,
            snap.percent * 100.0
        ),
        (None, true) => format!("{warning}{:.0}%", snap.percent * 100.0),
        (None, false) => snap.count.to_string(),
    }
}

/// `in 12s`, precise in the receipt.
pub fn elapsed(seconds: f64, end: bool) -> String {
    format!("in {}", elapsed_text(seconds, end))
}

/// Rate and eta while running, or the average rate in the receipt.
///
/// Manual bars without a total report their rate in percent per second.
pub fn stats(snap: &Snapshot, rate: f64, eta: Option<f64>) -> String {
    let (rate, unit) = if snap.manual && snap.total.is_none() {
        (rate * 100.0, "%/s")
    } else {
        (rate, "/s")
    };
    let known = snap.total.is_some() || snap.manual;
    match (snap.end, known) {
        (true, _) => format!("({rate:.2}{unit})"),
        (false, true) => format!("({rate:.1}{unit}, eta: {})", eta_text(eta)),
        (false, false) => format!("({rate:.1}{unit})"),
    }
}

/// Collapse runs of whitespace, line breaks included, into single spaces.
pub fn sanitize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::join_cells;

    fn snap(count: u64, total: Option<u64>, percent: f64, manual: bool, end: bool) -> Snapshot {
        Snapshot {
            count,
            total,
            percent,
            manual,
            end,
        }
    }

    #[test]
    fn test_monitor_with_total() {
        assert_eq!(monitor(&snap(42, Some(100), 0.42, false, false)), "42/100 [42%]");
        assert_eq!(
            monitor(&snap(1000, Some(1000), 1.0, false, true)),
            "1000/1000 [100%]"
        );
        assert_eq!(
            monitor(&snap(700, Some(1000), 0.7, false, true)),
            "(!) 700/1000 [70%]"
        );
        assert_eq!(
            monitor(&snap(1200, Some(1000), 1.2, false, true)),
            "(!) 1200/1000 [120%]"
        );
    }

    #[test]
    fn test_monitor_without_total() {
        assert_eq!(monitor(&snap(0, None, 0.25, true, false)), "25%");
        assert_eq!(monitor(&snap(0, None, 0.25, true, true)), "(!) 25%");
        assert_eq!(monitor(&snap(0, None, 1.0, true, true)), "100%");
        assert_eq!(monitor(&snap(37, None, 1.0, false, true)), "37");
    }

    #[test]
    fn test_elapsed() {
        assert_eq!(elapsed(3.4, false), "in 3s");
        assert_eq!(elapsed(3.4, true), "in 3.4s");
    }

    #[test]
    fn test_stats_live() {
        let s = snap(50, Some(100), 0.5, false, false);
        assert_eq!(stats(&s, 12.34, Some(4.0)), "(12.3/s, eta: 4s)");
        assert_eq!(stats(&s, 0.0, None), "(0.0/s, eta: -)");

        let s = snap(0, None, 0.5, true, false);
        assert_eq!(stats(&s, 0.1, Some(5.0)), "(10.0%/s, eta: 5s)");

        let s = snap(50, None, 1.0, false, false);
        assert_eq!(stats(&s, 5.0, None), "(5.0/s)");
    }

    #[test]
    fn test_stats_receipt() {
        let s = snap(100, Some(100), 1.0, false, true);
        assert_eq!(stats(&s, 12.345, None), "(12.35/s)");
        let s = snap(0, None, 1.0, true, true);
        assert_eq!(stats(&s, 0.5, None), "(50.00%/s)");
    }

    #[test]
    fn test_render_title() {
        assert_eq!(join_cells(&render_title("Jobs", 0)), "Jobs");
        assert_eq!(join_cells(&render_title("Jobs", 6)), "Jobs  ");
        assert_eq!(join_cells(&render_title("Jobs", 4)), "Jobs");
        assert_eq!(join_cells(&render_title("Downloading", 6)), "Downl…");
        assert_eq!(render_title("Downloading", 6).len(), 6);
    }

    #[test]
    fn test_render_title_cut_inside_wide() {
        // 😺 takes two cells, the cut lands on its filler
        let title = render_title("ab😺cd", 4);
        assert_eq!(title.len(), 4);
        assert_eq!(join_cells(&title), "ab …");
    }

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("  a \n b\t\tc "), "a b c");
        assert_eq!(sanitize_text(""), "");
    }
}
