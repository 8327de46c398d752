//! Domain events
use crate::domain::status::{OrderStatus, PaymentStatus};
use crate::domain::value_objects::Sku;
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq)]
pub enum DomainEvent {
    Account(AccountEvent),
    Product(ProductEvent),
    Order(OrderEvent),
}

/// Account events carry the confirmation token issued for the user; the
/// token itself is owned and persisted by the authentication service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountEvent {
    Registered { email: String, token: String },
    PasswordResetRequested { email: String, token: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProductEvent {
    Created { product_id: String, sku: Sku },
    Published { product_id: String },
    StockAdded { product_id: String, quantity: u32 },
    StockRemoved { product_id: String, quantity: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub enum OrderEvent {
    Placed { order_number: String, email: String },
    Confirmed { order_number: String, total: Decimal },
    StatusChanged { order_number: String, email: String, status: OrderStatus },
    PaymentStatusChanged { order_number: String, email: String, status: PaymentStatus },
}
