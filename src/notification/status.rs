//! Emails about order and payment status changes.
//!
//! These never embed a token: the customer is sent to the login page and
//! checks the order from their account.

use super::content::{EmailContent, Template};
use super::links::AppLinks;
use crate::domain::status::{StatusKind, StatusLabel};

const ORDER_STATUS: Template = Template {
    title: "Order status",
    subject: "WorldOfToys order status",
    link_name: "Log in",
    path: "login",
};

const ORDER_PAYMENT: Template = Template {
    title: "Order payment",
    subject: "WorldOfToys order payment",
    link_name: "Log in",
    path: "login",
};

pub fn status_email(links: &AppLinks, status: StatusKind, order_id: &str) -> EmailContent {
    let label = status.label();
    let (template, message) = match status {
        StatusKind::Order(_) => (
            &ORDER_STATUS,
            format!("Order №{order_id} status is {label}. For more information, visit our website:"),
        ),
        StatusKind::Payment(_) => (
            &ORDER_PAYMENT,
            format!("Order №{order_id} payment status is {label}. For more information, visit our website:"),
        ),
    };
    EmailContent::new(template, links.link(template.path, &[]), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::status::{OrderStatus, PaymentStatus};

    const ORDER_STATUSES: [OrderStatus; 5] = [
        OrderStatus::Pending, OrderStatus::Processing, OrderStatus::Shipped, OrderStatus::Delivered, OrderStatus::Cancelled,
    ];
    const PAYMENT_STATUSES: [PaymentStatus; 4] = [
        PaymentStatus::Pending, PaymentStatus::Paid, PaymentStatus::Failed, PaymentStatus::Refunded,
    ];

    fn links() -> AppLinks { AppLinks::new("https://worldoftoys.example.com/shop").unwrap() }

    #[test]
    fn test_payment_paid_message() {
        let email = status_email(&links(), PaymentStatus::Paid.into(), "ORD-42");
        assert_eq!(email.title(), "Order payment");
        assert_eq!(email.message(), "Order №ORD-42 payment status is Paid. For more information, visit our website:");
    }

    #[test]
    fn test_order_statuses_route_to_order_template() {
        for status in ORDER_STATUSES {
            let email = status_email(&links(), status.into(), "ORD-7");
            assert_eq!(email.title(), "Order status");
            assert_eq!(email.subject(), "WorldOfToys order status");
            assert!(email.message().contains("ORD-7"));
            assert!(email.message().contains(status.label()));
            assert!(!email.message().contains("payment"));
        }
    }

    #[test]
    fn test_payment_statuses_route_to_payment_template() {
        for status in PAYMENT_STATUSES {
            let email = status_email(&links(), status.into(), "ORD-8");
            assert_eq!(email.title(), "Order payment");
            assert!(email.message().contains("ORD-8"));
            assert!(email.message().contains(status.label()));
        }
    }

    #[test]
    fn test_link_is_login_without_query() {
        let email = status_email(&links(), OrderStatus::Shipped.into(), "ORD-1");
        assert_eq!(email.link(), "https://worldoftoys.example.com/shop/login");
        assert_eq!(email.link_name(), "Log in");
        assert!(!email.link().contains('?'));
    }
}
