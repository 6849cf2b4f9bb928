//! Sliding windows over a looping ribbon of content.

use super::AnimationError;

/// An endless window sliding over looping content, one step per frame.
///
/// The window wraps around the content, so the ribbon never ends. A
/// negative step slides the content to the right.
#[derive(Debug, Clone)]
pub struct Ribbon<T> {
    content: Vec<T>,
    original: isize,
    length: usize,
    step: isize,
    pos: isize,
}

impl<T: Clone> Ribbon<T> {
    /// Create a window of `length` over `content`, starting at `initial`.
    ///
    /// The window must fit inside the content.
    pub fn new(
        length: usize,
        mut content: Vec<T>,
        step: isize,
        initial: isize,
    ) -> Result<Self, AnimationError> {
        if content.is_empty() || length > content.len() {
            return Err(AnimationError::InvalidStyle {
                style: "scrolling",
                reason: format!(
                    "window of {length} cells does not fit in {} cells of content",
                    content.len()
                ),
            });
        }
        let original = content.len() as isize;
        let head: Vec<T> = content[..length].to_vec();
        content.extend(head);
        Ok(Self {
            content,
            original,
            length,
            step,
            pos: initial,
        })
    }

    /// The current window, then advance one step.
    pub fn next_window(&mut self) -> Vec<T> {
        if self.pos < 0 {
            self.pos = self.pos.rem_euclid(self.original);
        } else if self.pos >= self.original {
            self.pos %= self.original;
        }
        let start = self.pos as usize;
        let window = self.content[start..start + self.length].to_vec();
        self.pos += self.step;
        window
    }
}

impl<T: Clone> Iterator for Ribbon<T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        Some(self.next_window())
    }
}
