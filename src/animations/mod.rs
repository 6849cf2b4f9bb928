//! Spinner and bar animations.
//!
//! Spinners are declared as styles wrapped in a [`SpinnerFactory`], then
//! compiled ahead of time for a given length. Compilation renders every
//! frame of every cycle, applies the scheduled commands and checks that all
//! frames have the same cell length. The result is played by a
//! [`SpinnerRunner`] (one cycle at a time) or a [`SpinnerPlayer`] (forever).
//!
//! Bars are rendered on demand from a [`BarFactory`] compiled for a length.

pub mod bars;
pub mod compiler;
pub mod runner;
pub mod spinners;
pub mod window;

pub use bars::{Bar, BarError, BarFactory, BarRenderer, UnknownBar};
pub use compiler::{CompiledSpec, CompilerCommand, SpinnerFactory};
pub use runner::{CycleFrames, SpinnerPlayer, SpinnerRunner, Strategy};
pub use spinners::{
    AlongsideSpinner, BouncingSpinner, DelayedSpinner, FrameSpinner, ScrollingSpinner,
    SequentialSpinner, SpinnerStyle,
};

/// Errors raised while declaring or compiling spinner animations.
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    /// A compiler command was declared with arguments it cannot work with.
    #[error("Invalid {command} command: {reason}")]
    InvalidCommand {
        /// The command name.
        command: &'static str,
        /// What is wrong with its arguments.
        reason: String,
    },

    /// A style was given parameters it cannot animate.
    #[error("Invalid {style} spinner: {reason}")]
    InvalidStyle {
        /// The style name.
        style: &'static str,
        /// What is wrong with its parameters.
        reason: String,
    },

    /// Frames of the compiled animation have different cell lengths.
    #[error("Different cell lengths detected in frame data.\n{dump}")]
    MismatchedFrames {
        /// Rendering of every frame, with code points.
        dump: String,
    },

    /// The animation has no cycles, or a cycle has no frames.
    #[error("Spinner animation has no frames")]
    EmptyAnimation,
}

/// Greatest common divisor.
pub(crate) fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Least common multiple of all values, 1 for none.
pub(crate) fn lcm_all(values: impl IntoIterator<Item = usize>) -> usize {
    values.into_iter().fold(1, |acc, v| {
        if v == 0 {
            acc
        } else {
            acc / gcd(acc, v) * v
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcm_all() {
        assert_eq!(lcm_all([3, 3]), 3);
        assert_eq!(lcm_all([5, 3]), 15);
        assert_eq!(lcm_all([4, 6, 14]), 84);
        assert_eq!(lcm_all([]), 1);
    }

    #[test]
    fn test_animation_error_display() {
        let err = AnimationError::InvalidCommand {
            command: "reshape",
            reason: "num_frames must be at least 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid reshape command: num_frames must be at least 1"
        );
    }
}
