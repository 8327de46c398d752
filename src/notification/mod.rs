//! Transactional email rendering
//!
//! Each notification is rendered from a fixed template selected by the kind
//! of event, with the variable parts (token, order number, status label)
//! filled in. Delivery is left to a [`MailTransport`].

pub mod confirmation;
pub mod content;
pub mod dispatch;
pub mod links;
pub mod notifier;
pub mod status;

pub use confirmation::{confirmation_email, ConfirmationTokenKind};
pub use content::EmailContent;
pub use dispatch::{NotificationEvent, NotificationRequest};
pub use links::AppLinks;
pub use notifier::{LogTransport, MailTransport, Notifier};
pub use status::status_email;

pub use crate::domain::status::{OrderStatus, PaymentStatus, StatusKind, StatusLabel};
