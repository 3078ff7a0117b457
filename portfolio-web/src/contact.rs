use dioxus::prelude::*;
use portfolio_core::site::ContactForm;

use crate::notifications::use_notifier;

#[component]
pub fn ContactSection() -> Element {
    let notifier = use_notifier();
    let mut form = use_signal(ContactForm::default);

    rsx! {
        form {
            class: "contact-form",
            onsubmit: move |event| {
                event.prevent_default();
                let outcome = form.write().submit();
                notifier.announce(outcome.notification().clone());
            },
            div { class: "form-group",
                label { r#for: "contact-name", "Name" }
                input {
                    id: "contact-name",
                    r#type: "text",
                    value: "{form().name}",
                    maxlength: "80",
                    oninput: move |event| form.write().name = event.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "contact-email", "Email" }
                input {
                    id: "contact-email",
                    r#type: "email",
                    value: "{form().email}",
                    maxlength: "120",
                    oninput: move |event| form.write().email = event.value(),
                }
            }
            div { class: "form-group",
                label { r#for: "contact-message", "Message" }
                textarea {
                    id: "contact-message",
                    value: "{form().message}",
                    maxlength: "2000",
                    rows: "6",
                    oninput: move |event| form.write().message = event.value(),
                }
            }
            button { r#type: "submit", class: "submit-button",
                i { class: "fas fa-paper-plane" }
                " Send Message"
            }
        }
    }
}
