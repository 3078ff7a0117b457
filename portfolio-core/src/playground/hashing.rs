use std::time::Duration;

use rand::Rng;
use sha2::{Digest, Sha256};

pub const GUESS_WORDS: [&str; 3] = ["hello", "blockchain", "web3"];
pub const DEFAULT_DIFFICULTY: usize = 2;
pub const EMPTY_HASH_INPUT: &str = "Please enter text to hash";
pub const MINED_MESSAGE: &str = "🎉 Block mined successfully!";
/// A mined block stays on screen this long before the miner resets.
pub const MINED_RESET_DELAY: Duration = Duration::from_secs(2);
pub const GENESIS_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// The hash generator widget. Blank input is refused.
pub fn generate_hash(input: &str) -> Option<String> {
    if input.trim().is_empty() {
        return None;
    }
    Some(sha256_hex(input))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    Empty,
    Correct,
    Wrong,
}

impl GuessOutcome {
    pub fn is_correct(&self) -> bool {
        *self == GuessOutcome::Correct
    }

    pub fn message(&self) -> &'static str {
        match self {
            GuessOutcome::Empty => "Please enter a guess",
            GuessOutcome::Correct => "🎉 Correct! You guessed it!",
            GuessOutcome::Wrong => "❌ Wrong!",
        }
    }
}

/// "Guess the hash": a word is drawn and only its SHA-256 is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashGuessGame {
    target_hash: String,
}

impl HashGuessGame {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let word = GUESS_WORDS[rng.random_range(0..GUESS_WORDS.len())];
        Self::with_word(word)
    }

    pub fn with_word(word: &str) -> Self {
        Self {
            target_hash: sha256_hex(word),
        }
    }

    pub fn target_hash(&self) -> &str {
        &self.target_hash
    }

    pub fn guess(&self, input: &str) -> GuessOutcome {
        let guess = input.trim();
        if guess.is_empty() {
            GuessOutcome::Empty
        } else if sha256_hex(guess) == self.target_hash {
            GuessOutcome::Correct
        } else {
            GuessOutcome::Wrong
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiningAttempt {
    pub nonce: u64,
    pub hash: String,
    pub mined: bool,
}

/// "Mine the block": each attempt bumps the nonce and hashes `block<nonce>`.
/// A digest with `difficulty` leading zero hex digits wins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMiner {
    nonce: u64,
    last_hash: String,
    difficulty: usize,
}

impl BlockMiner {
    pub fn new(difficulty: usize) -> Self {
        Self {
            nonce: 0,
            last_hash: GENESIS_HASH.to_string(),
            difficulty: difficulty.clamp(1, 64),
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn last_hash(&self) -> &str {
        &self.last_hash
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn attempt(&mut self) -> MiningAttempt {
        self.nonce += 1;
        let hash = sha256_hex(&format!("block{}", self.nonce));
        let mined = hash.bytes().take(self.difficulty).all(|byte| byte == b'0');
        self.last_hash = hash.clone();
        if mined {
            tracing::debug!(nonce = self.nonce, "playground.block_mined");
        }
        MiningAttempt {
            nonce: self.nonce,
            hash,
            mined,
        }
    }

    pub fn reset(&mut self) {
        self.nonce = 0;
        self.last_hash = GENESIS_HASH.to_string();
    }
}

impl Default for BlockMiner {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY)
    }
}
