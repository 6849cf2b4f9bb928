//! Showtime command implementation.
//!
//! Plays a whole catalog at once, one style per line. On interactive
//! terminals the block is redrawn in place until Ctrl+C or the time is up;
//! otherwise a single frame of every style is printed.

use anyhow::{bail, Context, Result};
use crossterm::cursor::MoveUp;
use crossterm::Command;
use regex::Regex;

use super::animate;
use crate::animations::{Bar, SpinnerPlayer, UnknownBar};
use crate::cells::Cells;
use crate::cli::Show;
use crate::styles;
use crate::terminal;

/// Seconds a bar takes to fill while playing.
const FILL_SECONDS: f64 = 4.0;

/// Percentage bars are drawn at in a still frame.
const STILL_PERCENT: f64 = 0.5;

/// One line of the show.
enum Row {
    Spinner(SpinnerPlayer),
    Bar(Bar),
    Theme {
        spinner: SpinnerPlayer,
        bar: Bar,
        unknown: UnknownBar,
    },
}

impl Row {
    fn render(&mut self, percent: f64) -> String {
        match self {
            Row::Spinner(player) => player.next_frame().to_string(),
            Row::Bar(bar) => bar.render(percent, false).to_string(),
            Row::Theme {
                spinner,
                bar,
                unknown,
            } => format!(
                "{} {} {}",
                bar.render(percent, false),
                spinner.next_frame(),
                unknown.render(false)
            ),
        }
    }
}

fn matching<'a>(names: impl Iterator<Item = &'a str>, pattern: Option<&Regex>) -> Vec<&'a str> {
    names
        .filter(|name| pattern.map_or(true, |re| re.is_match(name)))
        .collect()
}

fn build_rows(show: Show, pattern: Option<&Regex>, length: usize) -> Result<Vec<(String, Row)>> {
    let mut rows = Vec::new();
    match show {
        Show::Spinners => {
            for name in matching(styles::SPINNER_NAMES.iter().copied(), pattern) {
                let Some(factory) = styles::spinner(name) else {
                    continue;
                };
                let player = factory.compile(Some(length))?.into_player();
                rows.push((name.to_string(), Row::Spinner(player)));
            }
        }
        Show::Bars => {
            for name in matching(styles::BAR_NAMES.iter().copied(), pattern) {
                let Some(factory) = styles::bar(name) else {
                    continue;
                };
                rows.push((name.to_string(), Row::Bar(factory.build()?.compile(length)?)));
            }
        }
        Show::Themes => {
            for name in matching(styles::theme_names(), pattern) {
                let theme = styles::theme(name).context("theme listed but not found")?;
                let spinner = styles::spinner(theme.spinner).context("theme spinner")?;
                let bar = styles::bar(theme.bar).context("theme bar")?.build()?;
                let unknown = styles::spinner(theme.unknown).context("theme unknown spinner")?;
                rows.push((
                    name.to_string(),
                    Row::Theme {
                        spinner: spinner.compile(None)?.into_player(),
                        unknown: bar.compile_unknown(&unknown, length)?,
                        bar: bar.compile(length)?,
                    },
                ));
            }
        }
    }
    Ok(rows)
}

/// Play the selected catalog.
pub fn showtime(show: Show, pattern: Option<&str>, seconds: f64, length: usize) -> Result<()> {
    let pattern = pattern
        .map(Regex::new)
        .transpose()
        .context("Invalid pattern")?;
    let mut rows = build_rows(show, pattern.as_ref(), length)?;
    if rows.is_empty() {
        bail!("Nothing matches the pattern");
    }
    let width = rows.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    let term = terminal::select(None, false, 80);
    if !term.is_interactive() {
        for (name, row) in &mut rows {
            println!("{name:>width$} {}", row.render(STILL_PERCENT));
        }
        return Ok(());
    }

    let mut move_up = String::new();
    MoveUp(rows.len() as u16).write_ansi(&mut move_up)?;
    let mut first = true;
    animate(&*term, Some(seconds), |term, t| {
        if !first {
            term.write("\r");
            term.write(&move_up);
        }
        first = false;
        let percent = (t / FILL_SECONDS).fract();
        for (name, row) in &mut rows {
            let line = Cells::from(format!("{name:>width$} {}", row.render(percent)).as_str());
            term.clear_line();
            term.write(&line.truncated(term.cols()).to_string());
            term.write("\n");
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_rows_filters_by_pattern() {
        let re = Regex::new("^wave").unwrap();
        let rows = build_rows(Show::Spinners, Some(&re), 10).unwrap();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|(name, _)| name.starts_with("wave")));
    }

    #[test]
    fn test_every_bar_row_renders_at_length() {
        let rows = build_rows(Show::Bars, None, 12).unwrap();
        assert_eq!(rows.len(), styles::BAR_NAMES.len());
    }

    #[test]
    fn test_theme_rows() {
        let mut rows = build_rows(Show::Themes, None, 10).unwrap();
        assert_eq!(rows.len(), styles::THEMES.len());
        for (_, row) in &mut rows {
            assert!(!row.render(0.3).is_empty());
        }
    }
}
