use dioxus::prelude::*;
use portfolio_core::playground::hashing::{EMPTY_HASH_INPUT, MINED_MESSAGE, MINED_RESET_DELAY};
use portfolio_core::playground::memory::REVEAL_DELAY;
use portfolio_core::playground::{
    generate_hash, BlockMiner, FlipOutcome, GuessOutcome, HashGuessGame, MemoryGame, CONTRACT_FIXED_MESSAGE, FIXED_CONTRACT,
};
use portfolio_core::site::{Notification, Tone};
use portfolio_core::PortfolioConfig;

use crate::clock::seeded_rng;
use crate::hooks::sleep;
use crate::notifications::{play_tone, use_notifier};

#[component]
pub fn Playground() -> Element {
    rsx! {
        div { class: "playground-grid",
            HashGenerator {}
            GuessTheHash {}
            MineTheBlock {}
            DebugTheContract {}
            MemoryMatch {}
        }
    }
}

#[component]
fn HashGenerator() -> Element {
    let notifier = use_notifier();
    let mut input = use_signal(String::new);
    let mut output = use_signal(|| None::<String>);

    rsx! {
        div { class: "game-card",
            h3 { "Hash Generator" }
            input {
                r#type: "text",
                class: "game-input",
                placeholder: "Enter text to hash",
                value: "{input}",
                oninput: move |event| input.set(event.value()),
            }
            button {
                class: "game-button",
                onclick: move |_| match generate_hash(&input()) {
                    Some(hash) => output.set(Some(hash)),
                    None => notifier.show(Notification::error(EMPTY_HASH_INPUT)),
                },
                "Generate SHA-256"
            }
            if let Some(hash) = output() {
                code { class: "hash-output", "{hash}" }
            }
        }
    }
}

#[component]
fn GuessTheHash() -> Element {
    let game = use_signal(|| HashGuessGame::new(&mut seeded_rng()));
    let mut guess = use_signal(String::new);
    let mut verdict = use_signal(|| None::<(String, bool)>);

    rsx! {
        div { class: "game-card",
            h3 { "Guess the Hash" }
            p { class: "game-hint", "Which word hashes to:" }
            code { class: "hash-to-guess", "{game.read().target_hash()}" }
            input {
                r#type: "text",
                class: "game-input",
                placeholder: "Your guess",
                value: "{guess}",
                oninput: move |event| guess.set(event.value()),
            }
            button {
                class: "game-button",
                onclick: move |_| {
                    let outcome = game.read().guess(&guess());
                    match outcome {
                        GuessOutcome::Correct => play_tone(Tone::Success),
                        GuessOutcome::Wrong => play_tone(Tone::Error),
                        GuessOutcome::Empty => {}
                    }
                    verdict.set(Some((outcome.message().to_string(), outcome.is_correct())));
                },
                "Guess"
            }
            if let Some((message, correct)) = verdict() {
                p { class: if correct { "game-result success" } else { "game-result" }, "{message}" }
            }
        }
    }
}

#[component]
fn MineTheBlock() -> Element {
    let config = use_context::<PortfolioConfig>();
    let notifier = use_notifier();
    let mut miner = use_signal(|| BlockMiner::new(config.mining_difficulty));
    let mut celebrating = use_signal(|| false);

    rsx! {
        div { class: "game-card",
            h3 { "Mine the Block" }
            p { class: "game-hint", "Find a hash starting with {miner.read().difficulty()} zeros" }
            p { "Nonce: {miner.read().nonce()}" }
            code { class: "hash-output", "{miner.read().last_hash()}" }
            button {
                class: "game-button",
                disabled: celebrating(),
                onclick: move |_| {
                    let attempt = miner.write().attempt();
                    if attempt.mined {
                        notifier.announce(Notification::success(MINED_MESSAGE));
                        celebrating.set(true);
                        spawn(async move {
                            sleep(MINED_RESET_DELAY).await;
                            miner.write().reset();
                            celebrating.set(false);
                        });
                    }
                },
                "Mine"
            }
        }
    }
}

#[component]
fn DebugTheContract() -> Element {
    let notifier = use_notifier();
    let mut fixed = use_signal(|| false);

    rsx! {
        div { class: "game-card",
            h3 { "Debug the Contract" }
            p { class: "game-hint", "withdraw() is open to reentrancy. Patch it." }
            button {
                class: "game-button",
                onclick: move |_| {
                    notifier.announce(Notification::success(CONTRACT_FIXED_MESSAGE));
                    fixed.set(true);
                },
                "Fix Contract"
            }
            if fixed() {
                pre { class: "contract-code", "{FIXED_CONTRACT}" }
            }
        }
    }
}

#[component]
fn MemoryMatch() -> Element {
    let notifier = use_notifier();
    let mut game = use_signal(|| MemoryGame::new(&mut seeded_rng()));

    let mut flip = move |index: usize| {
        if game.write().flip(index) != FlipOutcome::PairReady {
            return;
        }
        let deal = game.peek().deal();
        spawn(async move {
            sleep(REVEAL_DELAY).await;
            let resolved = game.write().resolve_deal(deal);
            if let Some(outcome) = resolved {
                for note in outcome.notifications() {
                    notifier.announce(note);
                }
            }
        });
    };

    let (faces, score) = {
        let current = game.read();
        let faces: Vec<(&'static str, bool)> = (0..current.len())
            .map(|index| (current.face(index), current.is_matched(index)))
            .collect();
        (faces, current.score())
    };

    rsx! {
        div { class: "game-card memory-card",
            h3 { "Memory Match" }
            p { "Score: {score}" }
            div { class: "memory-grid",
                for (index, (face, matched)) in faces.into_iter().enumerate() {
                    button {
                        key: "{index}",
                        class: if matched { "memory-tile matched" } else { "memory-tile" },
                        onclick: move |_| flip(index),
                        "{face}"
                    }
                }
            }
            button {
                class: "game-button",
                onclick: move |_| game.write().redeal(&mut seeded_rng()),
                "New Game"
            }
        }
    }
}
