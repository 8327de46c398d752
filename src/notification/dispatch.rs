use serde::{Deserialize, Serialize};

use super::confirmation::{confirmation_email, ConfirmationTokenKind};
use super::content::EmailContent;
use super::links::AppLinks;
use super::status::status_email;
use crate::domain::events::{AccountEvent, DomainEvent, OrderEvent};
use crate::domain::status::{OrderStatus, PaymentStatus, StatusKind};

/// Everything the storefront sends email about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NotificationEvent {
    AccountCreated { token: String },
    PasswordResetRequested { token: String },
    OrderStatusChanged { order_id: String, status: OrderStatus },
    PaymentStatusChanged { order_id: String, status: PaymentStatus },
}

impl NotificationEvent {
    pub fn render(&self, links: &AppLinks) -> EmailContent {
        match self {
            Self::AccountCreated { token } => confirmation_email(links, ConfirmationTokenKind::Activation, token),
            Self::PasswordResetRequested { token } => {
                confirmation_email(links, ConfirmationTokenKind::PasswordReset, token)
            }
            Self::OrderStatusChanged { order_id, status } => status_email(links, StatusKind::Order(*status), order_id),
            Self::PaymentStatusChanged { order_id, status } => {
                status_email(links, StatusKind::Payment(*status), order_id)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AccountCreated { .. } => "account_created",
            Self::PasswordResetRequested { .. } => "password_reset_requested",
            Self::OrderStatusChanged { .. } => "order_status_changed",
            Self::PaymentStatusChanged { .. } => "payment_status_changed",
        }
    }
}

/// A notification addressed to one recipient, as published on the message bus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub to: String,
    #[serde(flatten)]
    pub event: NotificationEvent,
}

impl NotificationRequest {
    pub fn new(to: impl Into<String>, event: NotificationEvent) -> Self {
        Self { to: to.into(), event }
    }

    /// The email a domain event should trigger, if any.
    pub fn from_event(event: &DomainEvent) -> Option<Self> {
        match event {
            DomainEvent::Account(AccountEvent::Registered { email, token }) => {
                Some(Self::new(email, NotificationEvent::AccountCreated { token: token.clone() }))
            }
            DomainEvent::Account(AccountEvent::PasswordResetRequested { email, token }) => {
                Some(Self::new(email, NotificationEvent::PasswordResetRequested { token: token.clone() }))
            }
            DomainEvent::Order(OrderEvent::StatusChanged { order_number, email, status }) => Some(Self::new(
                email,
                NotificationEvent::OrderStatusChanged { order_id: order_number.clone(), status: *status },
            )),
            DomainEvent::Order(OrderEvent::PaymentStatusChanged { order_number, email, status }) => Some(Self::new(
                email,
                NotificationEvent::PaymentStatusChanged { order_id: order_number.clone(), status: *status },
            )),
            DomainEvent::Order(OrderEvent::Placed { .. } | OrderEvent::Confirmed { .. }) | DomainEvent::Product(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Order;

    fn links() -> AppLinks { AppLinks::new("https://worldoftoys.example.com").unwrap() }

    #[test]
    fn test_render_selects_template_per_event() {
        let cases = [
            (NotificationEvent::AccountCreated { token: "t1".into() }, "Account activation"),
            (NotificationEvent::PasswordResetRequested { token: "t2".into() }, "Password reset"),
            (NotificationEvent::OrderStatusChanged { order_id: "ORD-1".into(), status: OrderStatus::Delivered }, "Order status"),
            (NotificationEvent::PaymentStatusChanged { order_id: "ORD-1".into(), status: PaymentStatus::Failed }, "Order payment"),
        ];
        for (event, title) in cases {
            assert_eq!(event.render(&links()).title(), title, "{}", event.name());
        }
    }

    #[test]
    fn test_request_wire_format() {
        let json = r#"{"to":"kid@example.com","type":"payment_status_changed","order_id":"ORD-42","status":"paid"}"#;
        let request: NotificationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.to, "kid@example.com");
        assert_eq!(
            request.event.render(&links()).message(),
            "Order №ORD-42 payment status is Paid. For more information, visit our website:"
        );
    }

    #[test]
    fn test_order_transition_becomes_notification() {
        let mut order = Order::place(42, "kid@example.com");
        order.set_payment_status(PaymentStatus::Paid);
        let requests: Vec<_> = order.take_events().iter().filter_map(NotificationRequest::from_event).collect();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].to, "kid@example.com");
        let email = requests[0].event.render(&links());
        assert_eq!(email.title(), "Order payment");
        assert!(email.message().contains("ORD-00000042"));
    }

    #[test]
    fn test_account_events_become_confirmation_emails() {
        let event = DomainEvent::Account(AccountEvent::PasswordResetRequested { email: "a@b.c".into(), token: "xyz".into() });
        let request = NotificationRequest::from_event(&event).unwrap();
        assert!(request.event.render(&links()).link().ends_with("/reset-password?token=xyz"));
    }
}
