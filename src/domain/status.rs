//! Order and payment lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything that can describe itself to a customer with a short label.
pub trait StatusLabel {
    fn label(&self) -> &'static str;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl StatusLabel for OrderStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Payment state as reported by the payment provider.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl StatusLabel for PaymentStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
            Self::Refunded => "Refunded",
        }
    }
}

/// Either lifecycle, tagged so templates can be picked by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatusKind {
    Order(OrderStatus),
    Payment(PaymentStatus),
}

impl StatusLabel for StatusKind {
    fn label(&self) -> &'static str {
        match self {
            Self::Order(status) => status.label(),
            Self::Payment(status) => status.label(),
        }
    }
}

impl From<OrderStatus> for StatusKind {
    fn from(status: OrderStatus) -> Self { Self::Order(status) }
}

impl From<PaymentStatus> for StatusKind {
    fn from(status: PaymentStatus) -> Self { Self::Payment(status) }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.label()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_delegates_label() {
        assert_eq!(StatusKind::from(PaymentStatus::Paid).label(), "Paid");
        assert_eq!(StatusKind::from(OrderStatus::Shipped).label(), "Shipped");
    }

    #[test]
    fn test_status_kind_json_shape() {
        let json = serde_json::to_value(StatusKind::Payment(PaymentStatus::Refunded)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "payment", "value": "refunded"}));
    }
}
