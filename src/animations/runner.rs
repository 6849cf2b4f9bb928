//! Playback of compiled spinner animations.

use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::compiler::CompiledSpec;
use crate::cells::Cells;

/// How a runner picks the next cycle to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Play the cycles in order, looping forever.
    #[default]
    Sequential,
    /// Pick a random cycle every time.
    ///
    /// `cycles` overrides the cycle count reported to composite spinners;
    /// `None` keeps the compiled count.
    Randomized {
        /// Reported number of cycles.
        cycles: Option<usize>,
    },
}

impl Strategy {
    /// Name shown in check reports.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Randomized { .. } => "randomized",
        }
    }

    /// Number of cycles reported for `compiled` cycles of data.
    pub fn reported_cycles(&self, compiled: usize) -> usize {
        match self {
            Strategy::Sequential => compiled,
            Strategy::Randomized { cycles } => cycles.filter(|c| *c > 0).unwrap_or(compiled),
        }
    }
}

enum Selector {
    Sequential { next: usize },
    Randomized(StdRng),
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Sequential { next } => write!(f, "Sequential({next})"),
            Selector::Randomized(_) => f.write_str("Randomized"),
        }
    }
}

/// Plays a compiled animation one cycle at a time.
///
/// Each call to [`next_cycle`](Self::next_cycle) yields the frames of the
/// cycle picked by the strategy, then advances it.
#[derive(Debug)]
pub struct SpinnerRunner {
    spec: Arc<CompiledSpec>,
    selector: Selector,
}

impl SpinnerRunner {
    pub(crate) fn new(spec: Arc<CompiledSpec>) -> Self {
        let selector = match spec.strategy {
            Strategy::Sequential => Selector::Sequential { next: 0 },
            Strategy::Randomized { .. } => Selector::Randomized(StdRng::from_entropy()),
        };
        Self { spec, selector }
    }

    /// The compiled animation.
    pub fn spec(&self) -> &Arc<CompiledSpec> {
        &self.spec
    }

    /// Cell length of every frame.
    pub fn length(&self) -> usize {
        self.spec.length
    }

    /// Number of cycles, as reported by the strategy.
    pub fn cycles(&self) -> usize {
        self.spec.cycles
    }

    /// Total number of frames across all compiled cycles.
    pub fn total_frames(&self) -> usize {
        self.spec.total_frames
    }

    /// The frames of the next cycle.
    pub fn next_cycle(&mut self) -> CycleFrames {
        let count = self.spec.data.len();
        let cycle = match &mut self.selector {
            Selector::Sequential { next } => {
                let cycle = *next % count;
                *next = (cycle + 1) % count;
                cycle
            }
            Selector::Randomized(rng) => rng.gen_range(0..count),
        };
        CycleFrames {
            spec: Arc::clone(&self.spec),
            cycle,
            pos: 0,
        }
    }

    /// Turn this runner into an endless frame stream.
    pub fn into_player(mut self) -> SpinnerPlayer {
        let current = self.next_cycle();
        SpinnerPlayer {
            runner: self,
            current,
        }
    }
}

/// The frames of one cycle.
#[derive(Debug, Clone)]
pub struct CycleFrames {
    spec: Arc<CompiledSpec>,
    cycle: usize,
    pos: usize,
}

impl CycleFrames {
    /// Index of the cycle being played.
    pub fn cycle(&self) -> usize {
        self.cycle
    }
}

impl Iterator for CycleFrames {
    type Item = Cells;

    fn next(&mut self) -> Option<Cells> {
        let frame = self.spec.data[self.cycle].get(self.pos)?.clone();
        self.pos += 1;
        Some(frame)
    }
}

/// Plays every cycle of a runner, forever.
#[derive(Debug)]
pub struct SpinnerPlayer {
    runner: SpinnerRunner,
    current: CycleFrames,
}

impl SpinnerPlayer {
    /// Cell length of every frame.
    pub fn length(&self) -> usize {
        self.runner.length()
    }

    /// The next frame. Never ends.
    pub fn next_frame(&mut self) -> Cells {
        loop {
            if let Some(frame) = self.current.next() {
                return frame;
            }
            self.current = self.runner.next_cycle();
        }
    }
}

impl Iterator for SpinnerPlayer {
    type Item = Cells;

    fn next(&mut self) -> Option<Cells> {
        Some(self.next_frame())
    }
}
