use dioxus::prelude::*;
#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};
use portfolio_core::site::theme::THEME_STORAGE_KEY;
use portfolio_core::site::Theme;

/// The stored value is the bare word (`light`/`dark`), not JSON, so this goes
/// through the raw storage handle.
#[cfg(target_arch = "wasm32")]
fn load_theme() -> Theme {
    let stored = LocalStorage::raw().get_item(THEME_STORAGE_KEY).ok().flatten();
    Theme::from_stored(stored.as_deref())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_theme() -> Theme {
    tracing::debug!(key = THEME_STORAGE_KEY, "theme.storage_unavailable");
    Theme::default()
}

#[cfg(target_arch = "wasm32")]
fn store_theme(theme: Theme) {
    if let Err(err) = LocalStorage::raw().set_item(THEME_STORAGE_KEY, theme.as_str()) {
        tracing::debug!(?err, "theme.store_failed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn store_theme(_theme: Theme) {}

#[cfg(target_arch = "wasm32")]
fn apply_theme(theme: Theme) {
    let Some(body) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body())
    else {
        return;
    };
    let _ = body
        .class_list()
        .toggle_with_force(Theme::Light.body_class(), theme == Theme::Light);
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_theme(_theme: Theme) {}

#[component]
pub fn ThemeToggle() -> Element {
    let mut theme = use_signal(load_theme);

    use_effect(move || apply_theme(theme()));

    rsx! {
        button {
            class: "theme-toggle",
            aria_label: "Toggle light and dark theme",
            onclick: move |_| {
                let next = theme().toggled();
                store_theme(next);
                theme.set(next);
            },
            i { class: "{theme().icon_class()}" }
        }
    }
}
