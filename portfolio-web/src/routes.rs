use std::time::Duration;

use dioxus::prelude::*;
use dioxus_router::{Link, Routable, Router};
use portfolio_core::profile::OWNER_NAME;

use crate::config::use_portfolio_config;
use crate::contact::ContactSection;
use crate::effects::{use_section_fade_in, HackerOverlay};
use crate::market::MarketTickers;
use crate::notifications::{provide_notifier, Toasts};
use crate::playground::Playground;
use crate::sections::{AboutSection, Footer, Hero, NavBar, ProjectsSection, SkillsSection};
use crate::terminal::{TerminalCursor, TerminalHeader, TerminalPrompt, TerminalWindow};
use crate::terminal_shell::TerminalPanel;
use crate::wallet::WalletPanel;

const MAIN_CSS: Asset = asset!("/assets/main.css");
const FONT_AWESOME: &str = "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css";

#[component]
pub fn App() -> Element {
    let config_resource = use_portfolio_config();
    let config = match config_resource() {
        None => {
            return rsx! {
                document::Title { "{OWNER_NAME}" }
                div { class: "page loading",
                    h1 { "Loading config..." }
                }
            }
        }
        Some(Ok(config)) => config,
        Some(Err(message)) => {
            return rsx! {
                document::Title { "{OWNER_NAME}" }
                div { class: "page loading",
                    h1 { "Config load failed" }
                    p { "{message}" }
                }
            }
        }
    };

    provide_notifier(Duration::from_millis(config.notification_ms));
    use_context_provider(|| config);

    rsx! {
        document::Title { "{OWNER_NAME} | Portfolio" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: FONT_AWESOME }
        Router::<Route> {}
        Toasts {}
        HackerOverlay {}
    }
}

#[derive(Clone, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

#[component]
fn Home() -> Element {
    use_section_fade_in();

    rsx! {
        NavBar {}
        main { class: "page",
            Hero {}
            AboutSection {}
            ProjectsSection {}
            SkillsSection {}
            section { id: "terminal", class: "section",
                h2 { class: "section-title", "Interactive Terminal" }
                TerminalPanel {}
            }
            section { id: "web3", class: "section web3",
                h2 { class: "section-title", "Web3 Dashboard" }
                WalletPanel {}
                MarketTickers {}
            }
            section { id: "playground", class: "section",
                h2 { class: "section-title", "Blockchain Playground" }
                Playground {}
            }
            section { id: "contact", class: "section",
                h2 { class: "section-title", "Get In Touch" }
                ContactSection {}
            }
        }
        Footer {}
    }
}

#[component]
fn NotFound(route: Vec<String>) -> Element {
    let path = route.join("/");
    rsx! {
        document::Title { "Not Found | {OWNER_NAME}" }
        div { class: "terminal-screen",
            TerminalWindow { aria_label: Some("Not found".to_string()),
                TerminalHeader { display_cwd: "~/404".to_string(), label: None }
                div { class: "terminal-body terminal-stack",
                    TerminalPrompt { command: Some("cat missing.md".to_string()), children: rsx! {} }
                    p { class: "terminal-muted", "Missing: /{path}" }
                    TerminalPrompt {
                        children: rsx! { Link { to: Route::Home {}, class: "terminal-link text-terminal-yellow", "cd .." } }
                    }
                    TerminalPrompt { children: rsx! { TerminalCursor {} } }
                }
            }
        }
    }
}
