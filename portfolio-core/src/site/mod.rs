//! Page-level helpers with no shared state: theme preference, tagline
//! rotation, the konami easter egg, toasts, tones and the contact form.

pub mod contact;
pub mod konami;
pub mod notify;
pub mod tagline;
pub mod theme;
pub mod tone;

pub use contact::{ContactForm, ContactOutcome};
pub use konami::KonamiDetector;
pub use notify::{Notification, NotificationCenter, NotificationKind};
pub use tagline::TaglineRotator;
pub use theme::Theme;
pub use tone::{Tone, ToneEnvelope, ToneStep};
