use std::fmt;
use std::time::Duration;

pub const DEFAULT_VISIBLE: Duration = Duration::from_millis(3000);
pub const EXIT_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Info => "info",
            NotificationKind::Warning => "warning",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Warning, message)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Leaving,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: Notification,
    pub phase: ToastPhase,
}

/// Stack of on-screen toasts. Each toast is visible, then leaving for the
/// exit animation, then dismissed; the view drives the two timers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationCenter {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, notification: Notification) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        tracing::debug!(id, kind = %notification.kind, "notify.push");
        self.toasts.push(Toast {
            id,
            notification,
            phase: ToastPhase::Visible,
        });
        id
    }

    pub fn begin_exit(&mut self, id: u64) {
        if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
            toast.phase = ToastPhase::Leaving;
        }
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn toasts_move_through_phases() {
        let mut center = NotificationCenter::new();
        let first = center.push(Notification::success("saved"));
        let second = center.push(Notification::error("failed"));
        assert_ne!(first, second);

        center.begin_exit(first);
        assert_eq!(center.toasts()[0].phase, ToastPhase::Leaving);
        assert_eq!(center.toasts()[1].phase, ToastPhase::Visible);

        center.dismiss(first);
        assert_eq!(center.toasts().len(), 1);
        assert_eq!(center.toasts()[0].notification, Notification::error("failed"));

        center.dismiss(99);
        assert_eq!(center.toasts().len(), 1);
    }
}
