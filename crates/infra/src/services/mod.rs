mod notifier;

pub use notifier::{INotifier, ReminderNotification, WebhookNotifier};
