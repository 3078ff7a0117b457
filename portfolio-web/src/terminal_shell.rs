use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use dioxus::web::WebEventExt;
use portfolio_core::{PortfolioConfig, Terminal, TerminalEffect};
use rand::Rng;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

use crate::clock::seeded_rng;
use crate::hooks::sleep;
use crate::terminal::{TerminalCursor, TerminalHeader, TerminalPrompt, TerminalWindow};

const OUTPUT_ID: &str = "terminal-output";
const INPUT_ID: &str = "terminal-input";
const MATRIX_GLYPHS: &[char] = &['0', '1', 'ア', 'カ', 'サ', 'タ', 'ナ', 'ハ', 'マ', 'ヤ', 'ラ', 'ワ'];
const MATRIX_COLUMNS: usize = 24;
const MATRIX_ROWS: usize = 16;

const BANNER: [&str; 2] = [
    "Welcome to my interactive terminal!",
    "Type 'help' to see available commands.",
];

#[derive(Clone, Debug, PartialEq)]
struct HistoryEntry {
    id: u64,
    cwd: String,
    command: String,
    output: Vec<String>,
    is_error: bool,
}

/// All signals behind the panel. Copy, so handlers can each take one.
#[derive(Clone, Copy)]
struct Shell {
    terminal: Signal<Terminal>,
    entries: Signal<Vec<HistoryEntry>>,
    input: Signal<String>,
    next_id: Signal<u64>,
    matrix: Signal<Option<Vec<String>>>,
}

impl Shell {
    fn run(mut self) {
        let line = self.input.read().trim().to_string();
        self.input.set(String::new());
        if line.is_empty() {
            return;
        }

        let cwd = self.terminal.read().display_cwd();
        let outcome = self.terminal.write().execute(&line);

        match outcome.effect {
            Some(TerminalEffect::Clear) => {
                self.entries.write().clear();
                return;
            }
            Some(TerminalEffect::Matrix { duration }) => {
                let mut matrix = self.matrix;
                matrix.set(Some(matrix_rain()));
                spawn(async move {
                    sleep(duration).await;
                    matrix.set(None);
                });
            }
            Some(TerminalEffect::HackerMode(enabled)) => tracing::debug!(enabled, "terminal.hacker_mode"),
            None => {}
        }

        let id = *self.next_id.read();
        self.next_id.set(id + 1);
        let output = outcome
            .output
            .map(|text| text.lines().map(str::to_string).collect())
            .unwrap_or_default();
        self.entries.write().push(HistoryEntry {
            id,
            cwd,
            command: line,
            output,
            is_error: outcome.error,
        });
    }

    fn recall_previous(mut self) {
        let recalled = self.terminal.write().recall_previous().map(str::to_string);
        if let Some(line) = recalled {
            self.input.set(line);
        }
    }

    fn recall_next(mut self) {
        let recalled = self.terminal.write().recall_next().to_string();
        self.input.set(recalled);
    }
}

fn matrix_rain() -> Vec<String> {
    let mut rng = seeded_rng();
    (0..MATRIX_ROWS)
        .map(|_| {
            (0..MATRIX_COLUMNS)
                .map(|_| MATRIX_GLYPHS[rng.random_range(0..MATRIX_GLYPHS.len())])
                .collect()
        })
        .collect()
}

#[component]
pub fn TerminalPanel() -> Element {
    let config = use_context::<PortfolioConfig>();
    let shell = Shell {
        terminal: use_signal(|| Terminal::new(&config.terminal_home)),
        entries: use_signal(Vec::<HistoryEntry>::new),
        input: use_signal(String::new),
        next_id: use_signal(|| 0u64),
        matrix: use_signal(|| None::<Vec<String>>),
    };
    let mut input = shell.input;
    #[cfg(target_arch = "wasm32")]
    let mut input_handle = use_signal(|| None::<web_sys::HtmlInputElement>);
    #[cfg(target_arch = "wasm32")]
    let mut output_handle = use_signal(|| None::<web_sys::HtmlElement>);

    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        {
            let _entry_count = shell.entries.read().len();
            if let Some(element) = output_handle.read().as_ref().cloned() {
                element.set_scroll_top(element.scroll_height());
            }
        }
    });

    let (display_cwd, hacker_mode) = {
        let terminal = shell.terminal.read();
        (terminal.display_cwd(), terminal.hacker_mode())
    };
    let window_class = if hacker_mode { "hacker-mode" } else { "" };

    rsx! {
        div { class: "terminal-screen",
            onclick: move |_| {
                #[cfg(target_arch = "wasm32")]
                if let Some(element) = input_handle.read().as_ref().cloned() {
                    let _ = element.focus();
                }
            },
            TerminalWindow {
                aria_label: Some("Interactive portfolio terminal".to_string()),
                class: Some(window_class.to_string()),
                TerminalHeader { display_cwd: display_cwd.clone(), label: None }
                if let Some(rain) = shell.matrix.read().as_ref() {
                    div { class: "matrix-overlay", aria_hidden: "true",
                        for (row, line) in rain.iter().enumerate() {
                            p { key: "matrix-{row}", "{line}" }
                        }
                    }
                }
                div { class: "terminal-output terminal-stack", id: OUTPUT_ID,
                    onmounted: move |_event| {
                        #[cfg(target_arch = "wasm32")]
                        {
                            let element = _event.data.as_ref().as_web_event();
                            if let Ok(node) = element.dyn_into::<web_sys::HtmlElement>() {
                                output_handle.set(Some(node));
                            }
                        }
                    },
                    for (index, line) in BANNER.iter().enumerate() {
                        p { key: "banner-{index}", class: "terminal-banner text-terminal-cyan", "{line}" }
                    }
                    for entry in shell.entries.read().iter() {
                        div { key: "{entry.id}", class: "terminal-entry",
                            TerminalPrompt {
                                path: Some(entry.cwd.clone()),
                                command: Some(entry.command.clone()),
                                children: rsx! {}
                            }
                            for (line_index, line) in entry.output.iter().enumerate() {
                                pre {
                                    key: "{entry.id}-{line_index}",
                                    class: if entry.is_error { "terminal-line text-terminal-red" } else { "terminal-line text-terminal-white" },
                                    "{line}"
                                }
                            }
                        }
                    }
                }
                form {
                    class: "terminal-input-bar",
                    onsubmit: move |event| {
                        event.prevent_default();
                        shell.run();
                    },
                    TerminalPrompt { path: Some(display_cwd), command: None, children: rsx! {} }
                    input {
                        r#type: "text",
                        id: INPUT_ID,
                        value: "{input}",
                        class: "terminal-input",
                        placeholder: "type a command",
                        autocomplete: "off",
                        spellcheck: "false",
                        onmounted: move |_event| {
                            #[cfg(target_arch = "wasm32")]
                            {
                                let element = _event.data.as_ref().as_web_event();
                                if let Ok(node) = element.dyn_into::<web_sys::HtmlInputElement>() {
                                    input_handle.set(Some(node));
                                }
                            }
                        },
                        oninput: move |event| input.set(event.value()),
                        onkeydown: move |event| match event.key() {
                            Key::ArrowUp => {
                                event.prevent_default();
                                shell.recall_previous();
                            }
                            Key::ArrowDown => {
                                event.prevent_default();
                                shell.recall_next();
                            }
                            _ => {}
                        },
                    }
                    TerminalCursor {}
                }
            }
        }
    }
}
