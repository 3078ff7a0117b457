use std::collections::VecDeque;
use std::time::Duration;

/// ↑ ↑ ↓ ↓ ← → ← → B A as DOM key codes.
pub const KONAMI_SEQUENCE: [u32; 10] = [38, 38, 40, 40, 37, 39, 37, 39, 66, 65];

/// The hacker overlay hides itself after this long.
pub const HACKER_OVERLAY_DURATION: Duration = Duration::from_secs(5);

#[derive(Clone, Debug, Default)]
pub struct KonamiDetector {
    recent: VecDeque<u32>,
}

impl KonamiDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one key code; returns `true` when it completes the sequence.
    pub fn push(&mut self, key_code: u32) -> bool {
        self.recent.push_back(key_code);
        if self.recent.len() > KONAMI_SEQUENCE.len() {
            self.recent.pop_front();
        }
        if self.recent.iter().eq(KONAMI_SEQUENCE.iter()) {
            self.recent.clear();
            return true;
        }
        false
    }
}

/// Maps `KeyboardEvent.key` names to the legacy key codes above.
pub fn key_code(key: &str) -> Option<u32> {
    match key {
        "ArrowUp" => Some(38),
        "ArrowDown" => Some(40),
        "ArrowLeft" => Some(37),
        "ArrowRight" => Some(39),
        "b" | "B" => Some(66),
        "a" | "A" => Some(65),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_complete_sequence() {
        let mut detector = KonamiDetector::new();
        let hits: Vec<bool> = KONAMI_SEQUENCE.iter().map(|code| detector.push(*code)).collect();
        assert_eq!(hits.iter().filter(|hit| **hit).count(), 1);
        assert!(hits[9]);
        assert!(!detector.push(65));
    }

    #[test]
    fn tolerates_leading_noise() {
        let mut detector = KonamiDetector::new();
        for code in [13, 38, 38, 38] {
            assert!(!detector.push(code));
        }
        let completed = KONAMI_SEQUENCE[2..].iter().any(|code| detector.push(*code));
        assert!(completed);
    }

    #[test]
    fn maps_key_names() {
        assert_eq!(key_code("ArrowLeft"), Some(37));
        assert_eq!(key_code("B"), Some(66));
        assert_eq!(key_code("Enter"), None);
    }
}
