use dioxus::prelude::*;
use portfolio_core::site::konami::HACKER_OVERLAY_DURATION;
#[cfg(target_arch = "wasm32")]
use portfolio_core::site::konami::{key_code, KonamiDetector};
use portfolio_core::site::Notification;

use crate::hooks::sleep;
use crate::notifications::use_notifier;

#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};

#[cfg(target_arch = "wasm32")]
const FADE_CLASS: &str = "fade-in-up";

/// `↑↑↓↓←→←→BA` anywhere on the page toggles the overlay.
#[component]
pub fn HackerOverlay() -> Element {
    let notifier = use_notifier();
    let mut visible = use_signal(|| false);
    let mut generation = use_signal(|| 0u64);

    let mut toggle = move || {
        let showing = !visible();
        visible.set(showing);
        if !showing {
            return;
        }
        notifier.announce(Notification::success("🔥 HACKER MODE ACTIVATED!"));
        let opened = *generation.read() + 1;
        generation.set(opened);
        crate::hooks::spawn_detached(async move {
            sleep(HACKER_OVERLAY_DURATION).await;
            if *generation.read() == opened {
                visible.set(false);
            }
        });
    };

    #[cfg(target_arch = "wasm32")]
    {
        let mut listener = use_signal(|| None::<Rc<Closure<dyn FnMut(web_sys::KeyboardEvent)>>>);
        use_effect(move || {
            if listener.peek().is_some() {
                return;
            }
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                return;
            };
            let mut detector = KonamiDetector::new();
            let on_key = Rc::new(Closure::wrap(Box::new(move |event: web_sys::KeyboardEvent| {
                if key_code(&event.key()).is_some_and(|code| detector.push(code)) {
                    tracing::debug!("konami.completed");
                    toggle();
                }
            }) as Box<dyn FnMut(_)>));
            let _ = document.add_event_listener_with_callback("keydown", on_key.as_ref().as_ref().unchecked_ref());
            listener.set(Some(on_key));
        });
        use_drop(move || {
            let binding = listener.peek();
            let Some(on_key) = binding.as_ref() else {
                return;
            };
            if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                let _ = document
                    .remove_event_listener_with_callback("keydown", on_key.as_ref().as_ref().unchecked_ref());
            }
        });
    }

    if !visible() {
        return rsx! {};
    }

    rsx! {
        div { class: "hacker-mode", role: "dialog", onclick: move |_| toggle(),
            div { class: "hacker-content",
                h2 { "ACCESS GRANTED" }
                p { "Welcome to the mainframe." }
                p { class: "hacker-hint", "Click anywhere to exit" }
            }
        }
    }
}

/// Adds the fade-in class to each `section` the first time it scrolls into
/// view.
pub fn use_section_fade_in() {
    #[cfg(target_arch = "wasm32")]
    {
        let mut observer = use_signal(|| None::<(web_sys::IntersectionObserver, Rc<Closure<dyn FnMut(js_sys::Array)>>)>);
        use_effect(move || {
            if observer.peek().is_some() {
                return;
            }
            match observe_sections() {
                Ok(pair) => observer.set(Some(pair)),
                Err(err) => tracing::debug!(?err, "sections.observer_unavailable"),
            }
        });
        use_drop(move || {
            if let Some((observer, _)) = observer.peek().as_ref() {
                observer.disconnect();
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
fn observe_sections() -> Result<(web_sys::IntersectionObserver, Rc<Closure<dyn FnMut(js_sys::Array)>>), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let on_intersect = Rc::new(Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<web_sys::IntersectionObserverEntry>() else {
                continue;
            };
            if entry.is_intersecting() {
                let _ = entry.target().class_list().add_1(FADE_CLASS);
            }
        }
    }) as Box<dyn FnMut(_)>));

    let options = web_sys::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(0.1));
    options.set_root_margin("0px 0px -50px 0px");
    let observer = web_sys::IntersectionObserver::new_with_options(
        on_intersect.as_ref().as_ref().unchecked_ref(),
        &options,
    )?;

    let sections = document.query_selector_all("section")?;
    for index in 0..sections.length() {
        if let Some(section) = sections.item(index).and_then(|node| node.dyn_into::<web_sys::Element>().ok()) {
            observer.observe(&section);
        }
    }
    Ok((observer, on_intersect))
}
