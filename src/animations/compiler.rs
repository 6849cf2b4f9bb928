//! Ahead-of-time spinner compiler.
//!
//! A [`SpinnerFactory`] holds a style plus the commands scheduled on it.
//! Nothing is rendered until [`SpinnerFactory::compile`] receives the actual
//! length. Compilation then goes through these stages:
//!
//! 1. render every cycle of the style and fix cut graphemes on each frame
//! 2. apply the compiler commands, in declaration order
//! 3. compute the animation metadata
//! 4. check that every frame has the same cell length
//! 5. bind the playback strategy and hand the result to a runner
//!
//! Compiled data is immutable and shared between runners.

use std::fmt::Write as _;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error};

use super::runner::{SpinnerRunner, Strategy};
use super::spinners::{CycleData, SpinnerStyle};
use super::AnimationError;
use crate::cells::{fix_cells, is_wide, join_cells, to_cells, Cells};

/// Default repetitions of the first and last frames for [`CompilerCommand::Pause`].
pub const DEFAULT_PAUSE_EDGES: usize = 6;
/// Default repetitions of the middle frames for [`CompilerCommand::Pause`].
pub const DEFAULT_PAUSE_MIDDLE: usize = 1;

/// A transformation of the frame data, applied at compile time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerCommand {
    /// Replace text in every frame. Frames whose length changes are caught
    /// by the validation stage.
    Replace {
        /// Text to look for.
        old: String,
        /// Replacement text.
        new: String,
    },
    /// Repeat the edge frames of every cycle, and optionally the middle ones.
    Pause {
        /// Repetitions of the first and last frames.
        n_edges: usize,
        /// Repetitions of every other frame.
        n_middle: usize,
    },
    /// Regroup all frames into cycles of this many frames.
    Reshape {
        /// Frames per cycle.
        num_frames: usize,
    },
    /// Append the cycles in reverse order, without repeating the ends.
    Bounce,
    /// Exchange cycles and frames.
    Transpose,
}

impl CompilerCommand {
    /// Command name, for reports and errors.
    pub fn name(&self) -> &'static str {
        match self {
            CompilerCommand::Replace { .. } => "replace",
            CompilerCommand::Pause { .. } => "pause",
            CompilerCommand::Reshape { .. } => "reshape",
            CompilerCommand::Bounce => "bounce",
            CompilerCommand::Transpose => "transpose",
        }
    }

    fn apply(&self, data: CycleData) -> CycleData {
        match self {
            CompilerCommand::Replace { old, new } => data
                .into_iter()
                .map(|cycle| {
                    cycle
                        .iter()
                        .map(|frame| to_cells(&join_cells(frame).replace(old.as_str(), new)))
                        .collect()
                })
                .collect(),
            CompilerCommand::Pause { n_edges, n_middle } => data
                .into_iter()
                .map(|cycle| {
                    let last = cycle.len().saturating_sub(1);
                    cycle
                        .into_iter()
                        .enumerate()
                        .flat_map(|(i, frame)| {
                            let times = if i == 0 || i == last { *n_edges } else { *n_middle };
                            std::iter::repeat(frame).take(times)
                        })
                        .collect()
                })
                .collect(),
            CompilerCommand::Reshape { num_frames } => {
                let flat: Vec<Cells> = data.into_iter().flatten().collect();
                flat.chunks(*num_frames).map(<[Cells]>::to_vec).collect()
            }
            CompilerCommand::Bounce => {
                let mut out = data.clone();
                if data.len() > 2 {
                    out.extend(data[1..data.len() - 1].iter().rev().cloned());
                }
                out
            }
            CompilerCommand::Transpose => {
                let rows = data.iter().map(Vec::len).min().unwrap_or(0);
                (0..rows)
                    .map(|i| data.iter().map(|cycle| cycle[i].clone()).collect())
                    .collect()
            }
        }
    }
}

/// A spinner style with its scheduled commands and playback strategy.
///
/// Factories are cheap to clone and never change once built; every command
/// method returns a new factory.
#[derive(Debug, Clone)]
pub struct SpinnerFactory {
    style: Arc<dyn SpinnerStyle>,
    commands: Vec<CompilerCommand>,
    strategy: Strategy,
}

impl SpinnerFactory {
    /// Wrap a style, with no commands and sequential playback.
    pub fn new(style: impl SpinnerStyle + 'static) -> Self {
        Self {
            style: Arc::new(style),
            commands: Vec::new(),
            strategy: Strategy::Sequential,
        }
    }

    /// The length the style was designed for.
    pub fn natural(&self) -> usize {
        self.style.natural()
    }

    /// The style name.
    pub fn style_name(&self) -> &'static str {
        self.style.name()
    }

    /// Commands scheduled so far.
    pub fn commands(&self) -> &[CompilerCommand] {
        &self.commands
    }

    fn schedule(mut self, command: CompilerCommand) -> Self {
        self.commands.push(command);
        self
    }

    /// Replace `old` by `new` in every frame.
    pub fn replace(self, old: &str, new: &str) -> Result<Self, AnimationError> {
        if old.is_empty() {
            return Err(AnimationError::InvalidCommand {
                command: "replace",
                reason: "the text to replace cannot be empty".into(),
            });
        }
        Ok(self.schedule(CompilerCommand::Replace {
            old: old.to_string(),
            new: new.to_string(),
        }))
    }

    /// Make the animation seem to pause on the edges of each cycle.
    ///
    /// Defaults to 6 repetitions of the edges and 1 of the middle frames.
    pub fn pause(self, n_edges: Option<usize>, n_middle: Option<usize>) -> Self {
        self.schedule(CompilerCommand::Pause {
            n_edges: n_edges.unwrap_or(DEFAULT_PAUSE_EDGES).max(1),
            n_middle: n_middle.unwrap_or(DEFAULT_PAUSE_MIDDLE).max(1),
        })
    }

    /// Regroup all frames into cycles of `num_frames`.
    pub fn reshape(self, num_frames: usize) -> Result<Self, AnimationError> {
        if num_frames == 0 {
            return Err(AnimationError::InvalidCommand {
                command: "reshape",
                reason: "num_frames must be at least 1".into(),
            });
        }
        Ok(self.schedule(CompilerCommand::Reshape { num_frames }))
    }

    /// Play the cycles forth and back.
    pub fn bounce(self) -> Self {
        self.schedule(CompilerCommand::Bounce)
    }

    /// Exchange cycles and frames.
    pub fn transpose(self) -> Self {
        self.schedule(CompilerCommand::Transpose)
    }

    /// Play cycles in order.
    pub fn sequential(mut self) -> Self {
        self.strategy = Strategy::Sequential;
        self
    }

    /// Play cycles in random order, optionally reporting `cycles` of them.
    pub fn randomized(mut self, cycles: Option<usize>) -> Self {
        self.strategy = Strategy::Randomized { cycles };
        self
    }

    /// Compile for `length` cells, or the natural length when `None`.
    pub fn compile(&self, length: Option<usize>) -> Result<SpinnerRunner, AnimationError> {
        let spec = self.compile_spec(length)?;
        Ok(SpinnerRunner::new(Arc::new(spec)))
    }

    /// Compile at the natural length and render the check report.
    pub fn check(&self, verbosity: u8) -> Result<String, AnimationError> {
        Ok(self.compile_spec(None)?.check(verbosity))
    }

    fn compile_spec(&self, length: Option<usize>) -> Result<CompiledSpec, AnimationError> {
        let started = Instant::now();
        let natural = self.natural();
        let length = length.unwrap_or(natural);

        let mut data: CycleData = self
            .style
            .cycles(length)?
            .into_iter()
            .map(|cycle| cycle.into_iter().map(fix_cells).collect())
            .collect();
        for command in &self.commands {
            data = command.apply(data);
        }

        if data.is_empty() || data.iter().any(Vec::is_empty) {
            return Err(AnimationError::EmptyAnimation);
        }

        let frames: Vec<usize> = data.iter().map(Vec::len).collect();
        let total_frames = frames.iter().sum();
        let mut spec = CompiledSpec {
            style: self.style.name(),
            length: data[0][0].len(),
            natural,
            cycles: self.strategy.reported_cycles(data.len()),
            frames,
            total_frames,
            strategy: self.strategy,
            compile_time: Duration::ZERO,
            data,
        };

        let lengths = spec.data.iter().flatten().map(Cells::len);
        let (min, max) = lengths.fold((usize::MAX, 0), |(lo, hi), l| (lo.min(l), hi.max(l)));
        if min != max {
            let dump = spec.render_data(true);
            error!(style = spec.style, "spinner frames with different lengths:\n{dump}");
            return Err(AnimationError::MismatchedFrames { dump });
        }

        spec.compile_time = started.elapsed();
        debug!(
            style = spec.style,
            length = spec.length,
            cycles = spec.cycles,
            total_frames = spec.total_frames,
            "spinner compiled in {:?}",
            spec.compile_time
        );
        Ok(spec)
    }
}

/// A fully rendered spinner animation.
#[derive(Debug, Clone)]
pub struct CompiledSpec {
    /// Frames, per cycle.
    pub data: Vec<Vec<Cells>>,
    /// Name of the style that produced the data.
    pub style: &'static str,
    /// Natural length of the style.
    pub natural: usize,
    /// Cell length of every frame.
    pub length: usize,
    /// Number of cycles, as reported by the strategy.
    pub cycles: usize,
    /// Frames in each compiled cycle.
    pub frames: Vec<usize>,
    /// Total number of frames.
    pub total_frames: usize,
    /// Playback strategy.
    pub strategy: Strategy,
    /// Time spent compiling.
    pub compile_time: Duration,
}

impl CompiledSpec {
    /// Render the check report.
    ///
    /// Verbosity 0 shows the specs only. Verbosity 1 and 4 also unfold the
    /// frame data, 2 and 5 reveal the code points of every grapheme.
    /// Verbosity 3 to 5 ask for an animation, which callers drive with a
    /// runner (see [`wants_animation`](Self::wants_animation)).
    pub fn check(&self, verbosity: u8) -> String {
        let verbosity = verbosity.min(5);
        let mut out = String::new();
        if matches!(verbosity, 1 | 2 | 4 | 5) {
            out.push_str(&self.render_data(matches!(verbosity, 2 | 5)));
        }
        out.push_str(&self.render_specs());
        let _ = writeln!(out, "\nSpinner frames compiled in: {:?}", self.compile_time);
        let _ = writeln!(out, "({})", help_message(verbosity));
        out
    }

    /// True when the check report at this verbosity includes an animation.
    pub fn wants_animation(verbosity: u8) -> bool {
        matches!(verbosity.min(5), 3..=5)
    }

    fn render_specs(&self) -> String {
        let mut out = String::from("\nSpecs\n");
        let _ = writeln!(out, "length: {} (natural: {})", self.length, self.natural);
        let _ = writeln!(out, "cycles: {} (strategy: {})", self.cycles, self.strategy.name());
        let _ = writeln!(out, "frames: {:?}", self.frames);
        let _ = writeln!(out, "total_frames: {}", self.total_frames);
        out
    }

    fn render_data(&self, show_codepoints: bool) -> String {
        let max_frames = self.frames.iter().copied().max().unwrap_or(0);
        let local_width = 1 + max_frames.to_string().len();
        let whole_width = self.total_frames.to_string().len();

        let mut out = String::from("\nFrame data");
        let mut whole = 0;
        for (i, cycle) in self.data.iter().enumerate() {
            let _ = write!(out, "\ncycle {}", i + 1);
            for (j, frame) in cycle.iter().enumerate() {
                whole += 1;
                let _ = write!(
                    out,
                    "\n{:>local_width$} |{}| {:<whole_width$}",
                    j + 1,
                    join_cells(frame),
                    whole
                );
                if show_codepoints {
                    out.push_str(&format_codepoints(frame));
                }
            }
        }
        out.push('\n');
        out
    }
}

fn format_codepoints(frame: &Cells) -> String {
    let codes: Vec<String> = frame
        .graphemes()
        .map(|g| {
            let points: Vec<String> = g.chars().map(|c| format!("{:x}", c as u32)).collect();
            let marker = if is_wide(g) { "*" } else { "" };
            format!("{marker}{}", points.join(" "))
        })
        .collect();
    format!(" -> {}:[{}]", frame.len(), codes.join("|"))
}

fn help_message(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "use -v 1 to unfold frame data, or -v 3 to include animation",
        1 => "use -v 2 to reveal codepoints, or -v 4 to include animation, or -v 0 to fold up frame data",
        2 => "use -v 5 to include animation, or -v 1 to hide codepoints",
        3 => "use -v 4 to unfold frame data, or -v 0 to omit animation",
        4 => "use -v 5 to reveal codepoints, or -v 1 to omit animation, or -v 3 to fold up frame data",
        _ => "use -v 2 to omit animation, or -v 4 to hide codepoints",
    }
}
