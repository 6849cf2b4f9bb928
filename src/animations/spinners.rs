//! Spinner styles.
//!
//! A style knows its natural length and how to render all its cycles for any
//! requested length. Styles never deal with frame alignment or playback
//! order: the compiler fixes cut graphemes, applies commands and validates
//! the result, and the runner plays it.

use std::fmt;

use super::compiler::SpinnerFactory;
use super::runner::SpinnerPlayer;
use super::window::Ribbon;
use super::{lcm_all, AnimationError};
use crate::cells::{combine_cells, to_cells, Cell, Cells};

/// Cycles of frames, as rendered by a style.
pub type CycleData = Vec<Vec<Cells>>;

/// A declarative spinner style.
pub trait SpinnerStyle: fmt::Debug + Send + Sync {
    /// Style name, shown in check reports.
    fn name(&self) -> &'static str;

    /// The length this style was designed for.
    fn natural(&self) -> usize;

    /// Render every cycle for the given length.
    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError>;
}

/// A spinner that delivers predefined frames in sequence.
///
/// Frames shorter than the requested length are repeated to fill it; longer
/// ones are cut.
#[derive(Debug, Clone)]
pub struct FrameSpinner {
    cycles: Vec<Vec<Cells>>,
}

impl FrameSpinner {
    /// One cycle where every grapheme of `text` is a frame.
    pub fn from_text(text: &str) -> Self {
        let frames = to_cells(text)
            .graphemes()
            .map(to_cells)
            .collect::<Vec<_>>();
        Self {
            cycles: vec![frames],
        }
    }

    /// One cycle with the given frames.
    pub fn from_frames(frames: &[&str]) -> Self {
        Self {
            cycles: vec![frames.iter().map(|f| to_cells(f)).collect()],
        }
    }

    /// Several cycles with the given frames.
    pub fn from_cycles(cycles: &[&[&str]]) -> Self {
        Self {
            cycles: cycles
                .iter()
                .map(|cycle| cycle.iter().map(|f| to_cells(f)).collect())
                .collect(),
        }
    }
}

impl SpinnerStyle for FrameSpinner {
    fn name(&self) -> &'static str {
        "frame"
    }

    fn natural(&self) -> usize {
        self.cycles.iter().flatten().map(Cells::len).max().unwrap_or(0)
    }

    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError> {
        if self.cycles.iter().flatten().any(Cells::is_empty) {
            return Err(AnimationError::InvalidStyle {
                style: self.name(),
                reason: "frames cannot be empty".into(),
            });
        }
        Ok(self
            .cycles
            .iter()
            .map(|cycle| cycle.iter().map(|frame| frame.repeat_to(length)).collect())
            .collect())
    }
}

/// A spinner that scrolls characters across a line.
///
/// Without a block, the whole text scrolls as one piece. With a block, each
/// character is enlarged to the block size and scrolls in its own cycle.
#[derive(Debug, Clone)]
pub struct ScrollingSpinner {
    chars: Cells,
    length: Option<usize>,
    block: Option<usize>,
    background: Cells,
    right: bool,
    hide: bool,
    wrap: bool,
    overlay: bool,
}

impl ScrollingSpinner {
    /// Scroll `chars` to the right, entering and leaving a blank line.
    pub fn new(chars: &str) -> Self {
        Self {
            chars: to_cells(chars),
            length: None,
            block: None,
            background: to_cells(" "),
            right: true,
            hide: true,
            wrap: true,
            overlay: false,
        }
    }

    /// Natural length; defaults to the length of the chars.
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length).filter(|l| *l > 0);
        self
    }

    /// Enlarge every char to this many cells, each in its own cycle.
    pub fn block(mut self, block: usize) -> Self {
        self.block = Some(block).filter(|b| *b > 0);
        self
    }

    /// Pattern shown where there is no content.
    pub fn background(mut self, background: &str) -> Self {
        let cells = to_cells(background);
        self.background = if cells.is_empty() { to_cells(" ") } else { cells };
        self
    }

    /// Scroll direction.
    pub fn right(mut self, right: bool) -> Self {
        self.right = right;
        self
    }

    /// Whether the content fully leaves the line before coming back.
    pub fn hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    /// Whether the content wraps around the edges; when not, a cycle ends
    /// as soon as it touches the far edge.
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Draw the content over a fixed background instead of scrolling the
    /// background along with it.
    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    fn block_size(&self, length: usize) -> usize {
        let Some(block) = self.block else {
            return self.chars.len();
        };
        let ratio = length as f64 / self.natural() as f64;
        let mut size = ((block as f64 * ratio).ceil() as usize).max(1);
        if !self.hide && size >= length {
            size = length.saturating_sub(1).max(1);
        }
        // Wide glyphs take two cells, so an odd block would cut one in half.
        if self.chars.has_wide() && size % 2 == 1 {
            size = if size > 1 { size - 1 } else { 2 };
        }
        size
    }
}

impl SpinnerStyle for ScrollingSpinner {
    fn name(&self) -> &'static str {
        "scrolling"
    }

    fn natural(&self) -> usize {
        self.length.unwrap_or_else(|| self.chars.len())
    }

    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError> {
        if self.chars.is_empty() {
            return Err(AnimationError::InvalidStyle {
                style: self.name(),
                reason: "chars cannot be empty".into(),
            });
        }

        let block_size = self.block_size(length);
        let gap = if self.hide {
            length
        } else {
            length.saturating_sub(block_size)
        };
        let separator: Vec<Option<Cell>> = if self.overlay {
            vec![None; gap]
        } else {
            self.background.repeat_to(gap).iter().cloned().map(Some).collect()
        };

        let mut content = Vec::new();
        if self.block.is_some() {
            let chars = if self.right {
                self.chars.reversed()
            } else {
                self.chars.clone()
            };
            for g in chars.graphemes() {
                content.extend(separator.iter().cloned());
                content.extend(to_cells(g).repeat_to(block_size).iter().cloned().map(Some));
            }
        } else {
            content.extend(separator.iter().cloned());
            content.extend(self.chars.iter().cloned().map(Some));
        }

        let step = if self.right { -1 } else { 1 };
        let initial = if !self.hide && self.right {
            -(block_size as isize)
        } else {
            0
        };
        let mut ribbon = Ribbon::new(length, content, step, initial)?;

        let consumed = gap + block_size;
        let shown = if self.hide || self.wrap {
            consumed
        } else {
            length.abs_diff(block_size).max(1).min(consumed)
        };
        let num_cycles = if self.block.is_some() {
            self.chars.graphemes().count()
        } else {
            1
        };

        let backdrop = self.background.repeat_to(length);
        let resolve = |window: Vec<Option<Cell>>| -> Cells {
            window
                .into_iter()
                .enumerate()
                .map(|(i, cell)| cell.unwrap_or_else(|| backdrop[i].clone()))
                .collect()
        };

        let mut data = Vec::with_capacity(num_cycles);
        for _ in 0..num_cycles {
            let windows: Vec<_> = ribbon.by_ref().take(consumed).collect();
            data.push(windows.into_iter().take(shown).map(&resolve).collect());
        }
        Ok(data)
    }
}

/// A spinner that scrolls one text to one side, then another text back.
///
/// Both directions never wrap, so the content seems to bounce off the edges.
#[derive(Debug, Clone)]
pub struct BouncingSpinner {
    chars: (String, String),
    length: Option<usize>,
    block: (Option<usize>, Option<usize>),
    background: String,
    right: bool,
    hide: bool,
    overlay: bool,
}

impl BouncingSpinner {
    /// Bounce `chars` in both directions.
    pub fn new(chars: &str) -> Self {
        Self {
            chars: (chars.to_string(), chars.to_string()),
            length: None,
            block: (None, None),
            background: " ".to_string(),
            right: true,
            hide: true,
            overlay: false,
        }
    }

    /// Use different chars on the way back.
    pub fn opposite(mut self, chars: &str) -> Self {
        self.chars.1 = chars.to_string();
        self
    }

    /// Natural length.
    pub fn length(mut self, length: usize) -> Self {
        self.length = Some(length).filter(|l| *l > 0);
        self
    }

    /// Block size for both directions.
    pub fn block(self, block: usize) -> Self {
        self.blocks(block, block)
    }

    /// Block sizes for each direction.
    pub fn blocks(mut self, there: usize, back: usize) -> Self {
        self.block = (Some(there).filter(|b| *b > 0), Some(back).filter(|b| *b > 0));
        self
    }

    /// Pattern shown where there is no content.
    pub fn background(mut self, background: &str) -> Self {
        self.background = background.to_string();
        self
    }

    /// Direction of the first scroll.
    pub fn right(mut self, right: bool) -> Self {
        self.right = right;
        self
    }

    /// Whether the content fully leaves the line before bouncing.
    pub fn hide(mut self, hide: bool) -> Self {
        self.hide = hide;
        self
    }

    /// Draw the content over a fixed background.
    pub fn overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }

    fn scroll(&self, chars: &str, block: Option<usize>, right: bool) -> SpinnerFactory {
        let mut scroll = ScrollingSpinner::new(chars)
            .background(&self.background)
            .right(right)
            .hide(self.hide)
            .wrap(false)
            .overlay(self.overlay);
        if let Some(length) = self.length {
            scroll = scroll.length(length);
        }
        if let Some(block) = block {
            scroll = scroll.block(block);
        }
        SpinnerFactory::new(scroll)
    }

    fn sequence(&self) -> SequentialSpinner {
        SequentialSpinner::new(vec![
            self.scroll(&self.chars.0, self.block.0, self.right),
            self.scroll(&self.chars.1, self.block.1, !self.right),
        ])
    }
}

impl SpinnerStyle for BouncingSpinner {
    fn name(&self) -> &'static str {
        "bouncing"
    }

    fn natural(&self) -> usize {
        self.sequence().natural()
    }

    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError> {
        self.sequence().cycles(length)
    }
}

/// A spinner that plays other spinners one after the other.
#[derive(Debug, Clone)]
pub struct SequentialSpinner {
    factories: Vec<SpinnerFactory>,
    intermix: bool,
}

impl SequentialSpinner {
    /// Play the factories in turn, one cycle of each at a time.
    pub fn new(factories: Vec<SpinnerFactory>) -> Self {
        Self {
            factories,
            intermix: true,
        }
    }

    /// When false, play all cycles of a factory before moving to the next.
    pub fn intermix(mut self, intermix: bool) -> Self {
        self.intermix = intermix;
        self
    }
}

impl SpinnerStyle for SequentialSpinner {
    fn name(&self) -> &'static str {
        "sequential"
    }

    fn natural(&self) -> usize {
        self.factories.iter().map(SpinnerFactory::natural).max().unwrap_or(0)
    }

    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError> {
        let mut runners = self
            .factories
            .iter()
            .map(|f| f.compile(Some(length)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = Vec::new();
        if self.intermix {
            let rounds = lcm_all(runners.iter().map(|r| r.cycles()));
            for _ in 0..rounds {
                for runner in &mut runners {
                    data.push(runner.next_cycle().collect());
                }
            }
        } else {
            for runner in &mut runners {
                for _ in 0..runner.cycles() {
                    data.push(runner.next_cycle().collect());
                }
            }
        }
        Ok(data)
    }
}

/// A spinner that plays other spinners side by side.
///
/// The available length is spread among them by the weight of their natural
/// lengths. Without a pivot there is a single cycle, long enough for every
/// spinner to complete. With a pivot, the cycles of that spinner set the
/// pace.
#[derive(Debug, Clone)]
pub struct AlongsideSpinner {
    factories: Vec<SpinnerFactory>,
    pivot: Option<usize>,
    offset: usize,
}

impl AlongsideSpinner {
    /// Play the factories side by side.
    pub fn new(factories: Vec<SpinnerFactory>) -> Self {
        Self {
            factories,
            pivot: None,
            offset: 0,
        }
    }

    /// Let the spinner at this index define the cycles.
    pub fn pivot(mut self, pivot: usize) -> Self {
        self.pivot = Some(pivot);
        self
    }

    /// Advance the spinner at index `i` by `i * offset` frames.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl SpinnerStyle for AlongsideSpinner {
    fn name(&self) -> &'static str {
        "alongside"
    }

    fn natural(&self) -> usize {
        self.factories.iter().map(SpinnerFactory::natural).sum()
    }

    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError> {
        if self.factories.is_empty() {
            return Err(AnimationError::InvalidStyle {
                style: self.name(),
                reason: "needs at least one spinner".into(),
            });
        }
        if let Some(pivot) = self.pivot.filter(|p| *p >= self.factories.len()) {
            return Err(AnimationError::InvalidStyle {
                style: self.name(),
                reason: format!("pivot {pivot} is out of range"),
            });
        }

        let naturals: Vec<usize> = self.factories.iter().map(SpinnerFactory::natural).collect();
        let lengths = spread_weighted(length, &naturals);

        let mut pivot = match self.pivot {
            Some(p) if lengths[p] > 0 => Some(self.factories[p].compile(Some(lengths[p]))?),
            _ => None,
        };
        let runners = self
            .factories
            .iter()
            .zip(&lengths)
            .filter(|(_, len)| **len > 0)
            .map(|(f, len)| f.compile(Some(*len)))
            .collect::<Result<Vec<_>, _>>()?;

        let frames = lcm_all(runners.iter().map(|r| r.total_frames()));
        let mut players: Vec<_> = runners.into_iter().map(|r| r.into_player()).collect();
        for (i, player) in players.iter_mut().enumerate() {
            for _ in 0..i * self.offset {
                player.next_frame();
            }
        }

        let next_frame = |players: &mut Vec<SpinnerPlayer>| {
            let fragments: Vec<Cells> = players.iter_mut().map(|p| p.next_frame()).collect();
            combine_cells(&fragments.iter().collect::<Vec<_>>())
        };

        let mut data = Vec::new();
        match pivot.as_mut() {
            None => {
                data.push((0..frames).map(|_| next_frame(&mut players)).collect());
            }
            Some(pivot) => {
                let cycles = frames / pivot.total_frames() * pivot.cycles();
                for _ in 0..cycles {
                    let count = pivot.next_cycle().count();
                    data.push((0..count).map(|_| next_frame(&mut players)).collect());
                }
            }
        }
        Ok(data)
    }
}

/// A spinner that plays copies of another spinner side by side, each one a
/// few frames ahead of the previous.
///
/// The number of copies grows with the requested length.
#[derive(Debug, Clone)]
pub struct DelayedSpinner {
    factory: SpinnerFactory,
    copies: usize,
    offset: usize,
}

impl DelayedSpinner {
    /// `copies` of `factory` at the natural length, `offset` frames apart.
    pub fn new(factory: SpinnerFactory, copies: usize, offset: usize) -> Self {
        Self {
            factory,
            copies: copies.max(1),
            offset,
        }
    }
}

impl SpinnerStyle for DelayedSpinner {
    fn name(&self) -> &'static str {
        "delayed"
    }

    fn natural(&self) -> usize {
        self.factory.natural() * self.copies
    }

    fn cycles(&self, length: usize) -> Result<CycleData, AnimationError> {
        let unit = self.factory.natural().max(1);
        let copies = length.div_ceil(unit).max(1);
        AlongsideSpinner::new(vec![self.factory.clone(); copies])
            .pivot(0)
            .offset(self.offset)
            .cycles(length)
    }
}

/// Spread `length` among parts by the weight of their natural lengths.
///
/// Rounding is accumulated, so the parts always add up to `length`.
pub fn spread_weighted(length: usize, naturals: &[usize]) -> Vec<usize> {
    let total: usize = naturals.iter().sum();
    if naturals.is_empty() {
        return Vec::new();
    }
    if total == 0 {
        let mut lengths = vec![0; naturals.len()];
        lengths[0] = length;
        return lengths;
    }

    let unit = length as f64 / total as f64;
    let mut accumulated = 0.0;
    let mut previous = 0usize;
    let mut lengths = Vec::with_capacity(naturals.len());
    for (i, natural) in naturals.iter().enumerate() {
        accumulated += unit * *natural as f64;
        let current = if i + 1 == naturals.len() {
            length
        } else {
            (accumulated.round_ties_even() as usize).clamp(previous, length)
        };
        lengths.push(current - previous);
        previous = current;
    }
    lengths
}
