use std::time::Duration;

use dioxus::prelude::*;
use portfolio_core::profile::{
    projects, skills_text, Category, ProjectFilter, OWNER_NAME, TECH_STACK,
};
use portfolio_core::site::tagline::{TaglineRotator, FADE_DURATION};
use portfolio_core::PortfolioConfig;

use crate::hooks::sleep;
#[cfg(target_arch = "wasm32")]
use crate::notifications::Notifier;
use crate::notifications::use_notifier;
use crate::theme::ThemeToggle;

/// Anchor ids in page order, with their menu labels.
pub const SECTIONS: [(&str, &str); 7] = [
    ("home", "Home"),
    ("about", "About"),
    ("projects", "Projects"),
    ("terminal", "Terminal"),
    ("web3", "Web3"),
    ("playground", "Playground"),
    ("contact", "Contact"),
];

#[component]
pub fn NavBar() -> Element {
    let mut open = use_signal(|| false);

    rsx! {
        nav { class: "navbar",
            div { class: "nav-container",
                a { class: "nav-logo", href: "#home", "{OWNER_NAME}" }
                ul { class: if open() { "nav-menu active" } else { "nav-menu" },
                    for (id, label) in SECTIONS {
                        li { key: "{id}",
                            a { class: "nav-link", href: "#{id}", onclick: move |_| open.set(false), "{label}" }
                        }
                    }
                }
                ThemeToggle {}
                button {
                    class: if open() { "hamburger active" } else { "hamburger" },
                    aria_label: "Toggle navigation",
                    onclick: move |_| open.set(!open()),
                    span { class: "bar" }
                    span { class: "bar" }
                    span { class: "bar" }
                }
            }
        }
    }
}

#[component]
pub fn Hero() -> Element {
    let config = use_context::<PortfolioConfig>();
    let notifier = use_notifier();
    let mut rotator = use_signal(TaglineRotator::default);
    let mut fading = use_signal(|| false);

    let interval = Duration::from_millis(config.tagline_interval_ms);
    use_hook(move || {
        spawn(async move {
            loop {
                sleep(interval.saturating_sub(FADE_DURATION)).await;
                fading.set(true);
                sleep(FADE_DURATION).await;
                rotator.write().advance();
                fading.set(false);
            }
        })
    });

    let tagline = rotator.read().current();

    rsx! {
        section { id: "home", class: "hero",
            div { class: "hero-content",
                h1 { class: "hero-title", "Hi, I'm "
                    span { class: "highlight", "{OWNER_NAME}" }
                }
                p { class: if fading() { "hero-tagline fading" } else { "hero-tagline" }, "{tagline}" }
                div { class: "hero-actions",
                    a { class: "btn btn-primary", href: "#projects", "View Projects" }
                    button {
                        class: "btn btn-secondary",
                        onclick: move |_| {
                            #[cfg(target_arch = "wasm32")]
                            crate::hooks::spawn_detached(download_resume(notifier));
                            #[cfg(not(target_arch = "wasm32"))]
                            notifier.show(portfolio_core::site::Notification::info("Resume download needs a browser"));
                        },
                        i { class: "fas fa-download" }
                        " Download Resume"
                    }
                }
            }
        }
    }
}

/// Serves the published PDF when the server has one, otherwise a generated
/// plain-text resume.
#[cfg(target_arch = "wasm32")]
async fn download_resume(notifier: Notifier) {
    use gloo_net::http::{Method, RequestBuilder};
    use portfolio_core::profile::{RESUME_FILE_NAME, RESUME_PDF};
    use portfolio_core::site::Notification;

    let published = match RequestBuilder::new(RESUME_PDF).method(Method::HEAD).send().await {
        Ok(response) => response.ok(),
        Err(err) => {
            tracing::debug!(%err, "resume.head_failed");
            false
        }
    };

    let result = if published {
        click_download(RESUME_PDF, RESUME_PDF)
    } else {
        text_resume_download(RESUME_FILE_NAME)
    };
    if let Err(err) = result {
        tracing::warn!(?err, "resume.download_failed");
        notifier.show(Notification::error("Resume download failed"));
    }
}

#[cfg(target_arch = "wasm32")]
fn text_resume_download(file_name: &str) -> Result<(), wasm_bindgen::JsValue> {
    use portfolio_core::profile::text_resume;
    use wasm_bindgen::JsValue;

    let parts = js_sys::Array::of1(&JsValue::from_str(&text_resume()));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    let clicked = click_download(&url, file_name);
    web_sys::Url::revoke_object_url(&url)?;
    clicked
}

#[cfg(target_arch = "wasm32")]
fn click_download(href: &str, file_name: &str) -> Result<(), wasm_bindgen::JsValue> {
    use wasm_bindgen::{JsCast, JsValue};

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: web_sys::HtmlAnchorElement = document.create_element("a")?.dyn_into().map_err(JsValue::from)?;
    anchor.set_href(href);
    anchor.set_download(file_name);
    anchor.click();
    Ok(())
}

#[component]
pub fn AboutSection() -> Element {
    rsx! {
        section { id: "about", class: "section about",
            h2 { class: "section-title", "About Me" }
            div { class: "about-grid",
                p {
                    "Computer Science & Engineering student at Alvas Institute of Engineering and Technology, "
                    "building secure, smart and decentralized systems."
                }
                ul { class: "about-facts",
                    li { "Passionate about Web3, IoT and ML" }
                    li { "Participated in Virsat Fest" }
                    li { "International Jamboree attendee" }
                    li { "Rover & Rangers member" }
                }
            }
        }
    }
}

fn filter_label(filter: ProjectFilter) -> &'static str {
    match filter {
        ProjectFilter::All => "All",
        ProjectFilter::Only(category) => category.label(),
    }
}

#[component]
pub fn ProjectsSection() -> Element {
    let mut filter = use_signal(ProjectFilter::default);
    let filters: Vec<(ProjectFilter, &'static str)> = std::iter::once(ProjectFilter::All)
        .chain(Category::ALL.into_iter().map(ProjectFilter::Only))
        .map(|option| (option, filter_label(option)))
        .collect();
    let current = filter();

    rsx! {
        section { id: "projects", class: "section projects",
            h2 { class: "section-title", "Projects" }
            div { class: "filter-buttons",
                for (option, label) in filters {
                    button {
                        key: "{label}",
                        class: if option == current { "filter-btn active" } else { "filter-btn" },
                        onclick: move |_| filter.set(option),
                        "{label}"
                    }
                }
            }
            div { class: "projects-grid",
                for project in projects(current) {
                    article { key: "{project.name}", class: "project-card",
                        h3 { "{project.name}" }
                        p { "{project.summary}" }
                        div { class: "project-tags",
                            for category in project.categories.iter() {
                                span { class: "project-tag category-{category.slug()}", "{category}" }
                            }
                            for tech in project.stack.iter() {
                                span { class: "project-tag", "{tech}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn SkillsSection() -> Element {
    let mut show_stack = use_signal(|| false);
    let skills = skills_text();
    let mut lines = skills.lines();
    let heading = lines.next().unwrap_or_default().trim_end_matches(':').to_string();
    let rows: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(": "))
        .map(|(area, items)| (area.to_string(), items.to_string()))
        .collect();

    rsx! {
        section { id: "skills", class: "section skills",
            h2 { class: "section-title", "{heading}" }
            dl { class: "skills-list",
                for (area, items) in rows {
                    div { key: "{area}", class: "skill-row",
                        dt { "{area}" }
                        dd { "{items}" }
                    }
                }
            }
            button {
                class: "btn btn-secondary",
                onclick: move |_| show_stack.set(!show_stack()),
                if show_stack() { "Hide Tech Stack" } else { "Show Tech Stack" }
            }
            if show_stack() {
                pre { class: "tech-stack", "{TECH_STACK}" }
            }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer { class: "footer",
            p { "© {OWNER_NAME}. Built with Rust and Dioxus." }
            p { class: "footer-hint", "Psst... try ↑ ↑ ↓ ↓ ← → ← → B A" }
        }
    }
}
