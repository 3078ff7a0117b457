//! Toy "blockchain" games from the playground section.

pub mod hashing;
pub mod memory;

pub use hashing::{generate_hash, sha256_hex, BlockMiner, GuessOutcome, HashGuessGame, MiningAttempt};
pub use memory::{FlipOutcome, MatchOutcome, MemoryGame};

/// Shown by "Debug the contract".
pub const FIXED_CONTRACT: &str = r#"contract Secure {
    mapping(address => uint) balances;
    bool private locked;

    modifier nonReentrant() {
        require(!locked, "Reentrant call");
        locked = true;
        _;
        locked = false;
    }

    function withdraw() public nonReentrant {
        uint amount = balances[msg.sender];
        require(amount > 0, "No balance");
        balances[msg.sender] = 0;
        (bool success, ) = msg.sender.call{value: amount}("");
        require(success, "Transfer failed");
    }
}"#;

pub const CONTRACT_FIXED_MESSAGE: &str = "✅ Contract fixed! Added reentrancy guard.";
