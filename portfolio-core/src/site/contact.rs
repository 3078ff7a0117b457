use super::notify::Notification;

pub const SENT_MESSAGE: &str = "📧 Message sent successfully! (Demo)";
pub const INCOMPLETE_MESSAGE: &str = "❌ Please fill all fields";

/// Demo contact form; nothing is ever sent anywhere.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactOutcome {
    /// The view shows the toast and resets the fields.
    Sent(Notification),
    Incomplete(Notification),
}

impl ContactOutcome {
    pub fn notification(&self) -> &Notification {
        match self {
            ContactOutcome::Sent(notification) | ContactOutcome::Incomplete(notification) => notification,
        }
    }
}

impl ContactForm {
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|field| !field.is_empty())
    }

    pub fn submit(&mut self) -> ContactOutcome {
        if self.is_complete() {
            tracing::debug!("contact.sent");
            *self = Self::default();
            ContactOutcome::Sent(Notification::success(SENT_MESSAGE))
        } else {
            ContactOutcome::Incomplete(Notification::error(INCOMPLETE_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn complete_form_resets_after_submit() {
        let mut form = ContactForm {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "hi".into(),
        };
        let outcome = form.submit();
        assert_eq!(outcome, ContactOutcome::Sent(Notification::success(SENT_MESSAGE)));
        assert_eq!(form, ContactForm::default());
    }

    #[test]
    fn missing_field_keeps_input() {
        let mut form = ContactForm {
            name: "Ada".into(),
            email: String::new(),
            message: "hi".into(),
        };
        let outcome = form.submit();
        assert_eq!(outcome.notification().message, INCOMPLETE_MESSAGE);
        assert_eq!(form.name, "Ada");
    }
}
