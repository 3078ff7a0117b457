use std::time::Duration;

use dioxus::prelude::*;
use portfolio_core::site::notify::{Toast, ToastPhase, EXIT_ANIMATION};
use portfolio_core::site::{Notification, NotificationCenter, NotificationKind, Tone};

use crate::hooks::{sleep, spawn_detached};

/// Handle for raising toasts from anywhere below [`provide_notifier`].
#[derive(Clone, Copy, PartialEq)]
pub struct Notifier {
    center: Signal<NotificationCenter>,
    visible_for: Duration,
}

impl Notifier {
    pub fn show(&self, notification: Notification) {
        let mut center = self.center;
        let visible_for = self.visible_for;
        let id = center.write().push(notification);
        spawn_detached(async move {
            sleep(visible_for).await;
            center.write().begin_exit(id);
            sleep(EXIT_ANIMATION).await;
            center.write().dismiss(id);
        });
    }

    /// Toast plus the matching tone, for game and form feedback.
    pub fn announce(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => play_tone(Tone::Success),
            NotificationKind::Error => play_tone(Tone::Error),
            NotificationKind::Info | NotificationKind::Warning => {}
        }
        self.show(notification);
    }
}

pub fn provide_notifier(visible_for: Duration) -> Notifier {
    let center = use_signal(NotificationCenter::new);
    use_context_provider(|| Notifier { center, visible_for })
}

pub fn use_notifier() -> Notifier {
    use_context::<Notifier>()
}

#[component]
pub fn Toasts() -> Element {
    let notifier = use_notifier();
    let center = notifier.center.read();
    rsx! {
        div { class: "notification-stack", aria_live: "polite",
            for toast in center.toasts().iter() {
                div { key: "{toast.id}", class: "{toast_class(toast)}",
                    "{toast.notification.message}"
                }
            }
        }
    }
}

fn toast_class(toast: &Toast) -> String {
    let kind = toast.notification.kind;
    match toast.phase {
        ToastPhase::Visible => format!("notification notification-{kind}"),
        ToastPhase::Leaving => format!("notification notification-{kind} leaving"),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn play_tone(tone: Tone) {
    if let Err(err) = schedule_tone(tone) {
        tracing::debug!(?err, "audio.tone_failed");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn play_tone(_tone: Tone) {}

#[cfg(target_arch = "wasm32")]
fn schedule_tone(tone: Tone) -> Result<(), wasm_bindgen::JsValue> {
    let context = web_sys::AudioContext::new()?;
    let oscillator = context.create_oscillator()?;
    let gain = context.create_gain()?;
    oscillator.connect_with_audio_node(&gain)?;
    gain.connect_with_audio_node(&context.destination())?;
    oscillator.set_type(web_sys::OscillatorType::Sine);

    let start = context.current_time();
    for step in tone.steps() {
        oscillator
            .frequency()
            .set_value_at_time(step.frequency_hz, start + step.at_secs)?;
    }
    let envelope = tone.envelope();
    gain.gain().set_value_at_time(envelope.start_gain, start)?;
    gain.gain()
        .exponential_ramp_to_value_at_time(envelope.end_gain, start + envelope.duration_secs)?;

    oscillator.start()?;
    oscillator.stop_with_when(start + envelope.duration_secs)?;
    Ok(())
}
