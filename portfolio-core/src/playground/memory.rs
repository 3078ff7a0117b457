use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::site::notify::Notification;

pub const TOKENS: [&str; 8] = ["ETH", "MATIC", "USDT", "DAI", "LINK", "UNI", "AAVE", "COMP"];
pub const MATCH_POINTS: u32 = 10;
pub const HIDDEN_FACE: &str = "?";
/// How long a mismatched pair stays face up.
pub const REVEAL_DELAY: Duration = Duration::from_secs(1);
pub const COMPLETE_MESSAGE: &str = "🎊 Game Complete! All tokens matched!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Tile already face up, matched, or two tiles are awaiting resolution.
    Ignored,
    /// First tile of a pair is showing.
    Revealed,
    /// Second tile is showing; the view calls [`MemoryGame::resolve`] after a
    /// short pause.
    PairReady,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    Match { score: u32, complete: bool },
    Miss,
}

impl MatchOutcome {
    /// Toasts for the outcome, in display order.
    pub fn notifications(self) -> Vec<Notification> {
        match self {
            MatchOutcome::Match { score, complete } => {
                let mut notes = vec![Notification::success(format!("🎉 Match found! Score: {score}"))];
                if complete {
                    notes.push(Notification::success(COMPLETE_MESSAGE));
                }
                notes
            }
            MatchOutcome::Miss => vec![Notification::error("❌ No match! Try again.")],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemoryGame {
    tiles: Vec<&'static str>,
    flipped: Vec<usize>,
    matched: Vec<usize>,
    score: u32,
    /// Bumped on every reshuffle.
    deal: u64,
}

impl MemoryGame {
    /// Every token twice, shuffled.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut tiles: Vec<&'static str> = TOKENS.iter().chain(TOKENS.iter()).copied().collect();
        tiles.shuffle(rng);
        Self::with_tiles(tiles)
    }

    pub fn with_tiles(tiles: Vec<&'static str>) -> Self {
        Self {
            tiles,
            flipped: Vec::with_capacity(2),
            matched: Vec::new(),
            score: 0,
            deal: 0,
        }
    }

    /// Starts a fresh board in place. Pending resolutions for the previous
    /// board are dropped by [`MemoryGame::resolve_deal`].
    pub fn redeal<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let deal = self.deal.wrapping_add(1);
        *self = Self::new(rng);
        self.deal = deal;
    }

    pub fn deal(&self) -> u64 {
        self.deal
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_matched(&self, index: usize) -> bool {
        self.matched.contains(&index)
    }

    pub fn is_face_up(&self, index: usize) -> bool {
        self.is_matched(index) || self.flipped.contains(&index)
    }

    /// What tile `index` currently shows.
    pub fn face(&self, index: usize) -> &'static str {
        match self.tiles.get(index) {
            Some(token) if self.is_face_up(index) => token,
            _ => HIDDEN_FACE,
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.tiles.is_empty() && self.matched.len() == self.tiles.len()
    }

    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if index >= self.tiles.len() || self.flipped.len() == 2 || self.is_face_up(index) {
            return FlipOutcome::Ignored;
        }
        self.flipped.push(index);
        if self.flipped.len() == 2 {
            FlipOutcome::PairReady
        } else {
            FlipOutcome::Revealed
        }
    }

    /// [`MemoryGame::resolve`] for a pair flipped during `deal`; a pair from an
    /// older board resolves nothing.
    pub fn resolve_deal(&mut self, deal: u64) -> Option<MatchOutcome> {
        if deal != self.deal {
            tracing::debug!(deal, current = self.deal, "memory.stale_resolve");
            return None;
        }
        self.resolve()
    }

    /// Compares the two face-up tiles and turns a miss back over.
    pub fn resolve(&mut self) -> Option<MatchOutcome> {
        let &[first, second] = self.flipped.as_slice() else {
            return None;
        };
        self.flipped.clear();
        if self.tiles[first] == self.tiles[second] {
            self.matched.extend([first, second]);
            self.score += MATCH_POINTS;
            Some(MatchOutcome::Match {
                score: self.score,
                complete: self.is_complete(),
            })
        } else {
            Some(MatchOutcome::Miss)
        }
    }
}
