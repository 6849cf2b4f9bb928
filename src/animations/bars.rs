//! Progress bar rendering.
//!
//! A [`BarFactory`] declares the glyphs of a bar. Once compiled for a length
//! it renders any percentage, including out of range ones, which show the
//! underflow or overflow glyphs instead of failing.

use super::compiler::SpinnerFactory;
use super::runner::SpinnerPlayer;
use super::AnimationError;
use crate::cells::{combine_cells, fix_cells, to_cells, Cells};

/// Errors raised while declaring bars.
#[derive(Debug, thiserror::Error)]
pub enum BarError {
    /// A bar without fill chars shows its progress through the tip alone.
    #[error("A transparent bar (without chars) needs a tip")]
    MissingTip,

    /// The last fill char sets the cell unit of the whole bar.
    #[error("Fill chars cannot end with a narrow char after wide ones: {chars:?}")]
    MixedWidth {
        /// The offending chars.
        chars: String,
    },

    /// The spinner of an unknown bar failed to compile.
    #[error(transparent)]
    Animation(#[from] AnimationError),
}

/// Declaration of a standard bar.
///
/// ```
/// use alive_progress::animations::BarFactory;
///
/// let bar = BarFactory::new("-=")
///     .tip(">")
///     .background(".")
///     .borders("[", "]")
///     .compile(10)
///     .unwrap();
/// assert_eq!(bar.render(0.5, false).to_string(), "[=====>....]");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarFactory {
    chars: String,
    tip: String,
    background: String,
    left: String,
    right: String,
    underflow: String,
    overflow: String,
}

impl BarFactory {
    /// A bar filled with `chars`, from the thinnest to the complete glyph.
    ///
    /// Empty chars make a transparent bar, whose background shows through.
    pub fn new(chars: &str) -> Self {
        Self {
            chars: chars.to_string(),
            tip: ">".into(),
            background: " ".into(),
            left: "|".into(),
            right: "|".into(),
            underflow: "!".into(),
            overflow: "x".into(),
        }
    }

    /// Glyphs drawn at the fill edge while running. May be empty.
    pub fn tip(mut self, tip: &str) -> Self {
        self.tip = tip.to_string();
        self
    }

    /// Pattern repeated behind the bar. Empty means blank.
    pub fn background(mut self, background: &str) -> Self {
        self.background = background.to_string();
        self
    }

    /// Left and right borders.
    pub fn borders(mut self, left: &str, right: &str) -> Self {
        self.left = left.to_string();
        self.right = right.to_string();
        self
    }

    /// Glyphs shown when the bar ends below or above 100%.
    pub fn errors(mut self, underflow: &str, overflow: &str) -> Self {
        self.underflow = underflow.to_string();
        self.overflow = overflow.to_string();
        self
    }

    /// Check the declaration.
    pub fn build(self) -> Result<Self, BarError> {
        let chars = to_cells(&self.chars);
        if chars.is_empty() && self.tip.is_empty() {
            return Err(BarError::MissingTip);
        }
        let graphemes: Vec<&str> = chars.graphemes().collect();
        if let Some((last, rest)) = graphemes.split_last() {
            if !crate::cells::is_wide(last) && crate::cells::has_wide(rest.iter().copied()) {
                return Err(BarError::MixedWidth {
                    chars: self.chars.clone(),
                });
            }
        }
        Ok(self)
    }

    /// Compile the bar for `length` cells, borders excluded.
    pub fn compile(&self, length: usize) -> Result<Bar, BarError> {
        let factory = self.clone().build()?;
        let chars: Vec<Cells> = to_cells(&factory.chars)
            .graphemes()
            .map(to_cells)
            .collect();
        let unit = chars.last().map_or(1, Cells::len).max(1);
        let background = match to_cells(&factory.background) {
            bg if bg.is_empty() => Cells::blanks(1),
            bg => bg,
        };
        Ok(Bar {
            length,
            unit,
            padding: background.repeat_to(length),
            chars,
            tip: to_cells(&factory.tip),
            left: to_cells(&factory.left),
            right: to_cells(&factory.right),
            underflow: to_cells(&factory.underflow),
            overflow: to_cells(&factory.overflow),
        })
    }

    /// Compile an unknown bar: `spinner` plays inside these borders, and the
    /// receipt is this bar drawn complete.
    pub fn compile_unknown(
        &self,
        spinner: &SpinnerFactory,
        length: usize,
    ) -> Result<UnknownBar, BarError> {
        let receipt = self.compile(length)?;
        let player = spinner.compile(Some(length))?.into_player();
        Ok(UnknownBar { player, receipt })
    }
}

/// A bar compiled for a given length.
#[derive(Debug, Clone)]
pub struct Bar {
    length: usize,
    unit: usize,
    chars: Vec<Cells>,
    tip: Cells,
    padding: Cells,
    left: Cells,
    right: Cells,
    underflow: Cells,
    overflow: Cells,
}

impl Bar {
    /// Length of the bar, borders excluded.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Render `percent` (unclamped, 1.0 is complete).
    ///
    /// `end` renders the receipt: below 100% the underflow glyph replaces
    /// the tip.
    pub fn render(&self, percent: f64, end: bool) -> Cells {
        let fill = self.fill(percent);
        let (body, right) = if percent > 1.0 {
            let body = combine_cells(&[&self.fit(fill), &self.overflow]);
            (body, false)
        } else if percent == 1.0 {
            (self.fit(fill), true)
        } else if end {
            let blanks = Cells::blanks(self.length);
            (self.fit(combine_cells(&[&fill, &self.underflow, &blanks])), true)
        } else {
            let start = fill.len() + self.tip.len();
            let rest = fix_cells(self.padding.slice(start..self.length));
            (self.fit(combine_cells(&[&fill, &self.tip, &rest])), true)
        };

        let mut out = combine_cells(&[&self.left, &body]);
        if right {
            out.extend_from(&self.right);
        }
        out
    }

    fn fill(&self, percent: f64) -> Cells {
        let n = self.chars.len().max(1);
        let virtual_length = (self.length / self.unit) * n;
        let virtual_fill = (virtual_length as f64 * percent.clamp(0.0, 1.0)).round() as usize;
        let (complete, filling) = (virtual_fill / n, virtual_fill % n);

        match self.chars.last() {
            None => self.padding.truncated(complete),
            Some(last) => {
                let mut fill = Cells::new();
                for _ in 0..complete {
                    fill.extend_from(last);
                }
                if filling > 0 {
                    fill.extend_from(&self.chars[filling - 1]);
                }
                fill
            }
        }
    }

    /// Cut or pad with blanks to exactly the bar length.
    fn fit(&self, cells: Cells) -> Cells {
        let mut out = cells.truncated(self.length);
        if out.len() < self.length {
            out.extend_from(&Cells::blanks(self.length - out.len()));
        }
        out
    }
}

/// A bar for unknown totals, which plays a spinner between the borders.
#[derive(Debug)]
pub struct UnknownBar {
    player: SpinnerPlayer,
    receipt: Bar,
}

impl UnknownBar {
    /// The next spinner frame inside the borders, or the complete bar when
    /// `end` is set.
    pub fn render(&mut self, end: bool) -> Cells {
        if end {
            return self.receipt.render(1.0, true);
        }
        let frame = fix_cells(self.player.next_frame());
        combine_cells(&[&self.receipt.left, &frame, &self.receipt.right])
    }
}

/// Either kind of bar, as used by a progress session.
#[derive(Debug)]
pub enum BarRenderer {
    /// A bar with a known total.
    Known(Bar),
    /// A spinner inside the borders of a bar.
    Unknown(UnknownBar),
}

impl BarRenderer {
    /// Render the bar. Unknown bars ignore `percent`.
    pub fn render(&mut self, percent: f64, end: bool) -> Cells {
        match self {
            BarRenderer::Known(bar) => bar.render(percent, end),
            BarRenderer::Unknown(bar) => bar.render(end),
        }
    }
}
