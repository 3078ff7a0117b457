use std::time::Duration;

use crate::profile::TAGLINES;

pub const FADE_DURATION: Duration = Duration::from_millis(500);

/// Cycles through the hero taglines. The view fades out, calls
/// [`TaglineRotator::advance`] after [`FADE_DURATION`], then fades back in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaglineRotator {
    lines: &'static [&'static str],
    current: usize,
}

impl Default for TaglineRotator {
    fn default() -> Self {
        Self::new(TAGLINES)
    }
}

impl TaglineRotator {
    pub fn new(lines: &'static [&'static str]) -> Self {
        Self { lines, current: 0 }
    }

    pub fn current(&self) -> &'static str {
        self.lines.get(self.current).copied().unwrap_or_default()
    }

    pub fn advance(&mut self) -> &'static str {
        if !self.lines.is_empty() {
            self.current = (self.current + 1) % self.lines.len();
        }
        self.current()
    }
}
