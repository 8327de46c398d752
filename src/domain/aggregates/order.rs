//! Order Aggregate
//!
//! Status and payment transitions raise events that the notification worker
//! turns into customer emails.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::aggregates::cart::{Cart, CartError};
use crate::domain::events::{DomainEvent, OrderEvent};
use crate::domain::status::{OrderStatus, PaymentStatus};
use crate::domain::value_objects::{Money, MoneyError, DEFAULT_CURRENCY};

#[derive(Clone, Debug)]
pub struct Order {
    id: String,
    number: String,
    email: String,
    status: OrderStatus,
    payment: PaymentStatus,
    items: Vec<LineItem>,
    subtotal: Money,
    shipping: Money,
    total: Money,
    shipping_address: Option<Address>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

#[derive(Clone, Debug)]
pub struct LineItem { pub product_id: String, pub name: String, pub sku: String, pub quantity: u32, pub unit_price: Money }

impl LineItem {
    pub fn total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

#[derive(Clone, Debug, Default)]
pub struct Address { pub name: String, pub street1: String, pub street2: Option<String>, pub city: String, pub zip: String, pub country: String, pub phone: Option<String> }

impl Order {
    pub fn place(sequence: u64, email: impl Into<String>) -> Self {
        let number = format!("ORD-{sequence:08}");
        let email = email.into();
        let now = Utc::now();
        let mut order = Self {
            id: Uuid::now_v7().to_string(), number: number.clone(), email: email.clone(),
            status: OrderStatus::Pending, payment: PaymentStatus::Pending, items: vec![],
            subtotal: Money::zero(DEFAULT_CURRENCY), shipping: Money::zero(DEFAULT_CURRENCY),
            total: Money::zero(DEFAULT_CURRENCY), shipping_address: None,
            created_at: now, updated_at: now, events: vec![],
        };
        order.raise_event(DomainEvent::Order(OrderEvent::Placed { order_number: number, email }));
        order
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn number(&self) -> &str { &self.number }
    pub fn email(&self) -> &str { &self.email }
    pub fn status(&self) -> OrderStatus { self.status }
    pub fn payment_status(&self) -> PaymentStatus { self.payment }
    pub fn total(&self) -> &Money { &self.total }
    pub fn items(&self) -> &[LineItem] { &self.items }
    pub fn shipping_address(&self) -> Option<&Address> { self.shipping_address.as_ref() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

    pub fn add_item(&mut self, item: LineItem) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending { return Err(OrderError::NotEditable(self.status)); }
        self.items.push(item);
        self.recalculate()
    }

    pub fn ship_to(&mut self, address: Address, shipping: Money) -> Result<(), OrderError> {
        self.shipping_address = Some(address);
        self.shipping = shipping;
        self.recalculate()
    }

    /// Places an order for everything in `cart`, emptying it. The cart is left
    /// untouched when it is empty or priced in another currency.
    pub fn from_cart(sequence: u64, email: impl Into<String>, cart: &mut Cart) -> Result<Self, OrderError> {
        if cart.subtotal().currency() != DEFAULT_CURRENCY {
            return Err(OrderError::Money(MoneyError::CurrencyMismatch {
                left: DEFAULT_CURRENCY.to_string(),
                right: cart.subtotal().currency().to_string(),
            }));
        }
        let lines = cart.checkout()?;
        let mut order = Self::place(sequence, email);
        for line in lines { order.add_item(line)?; }
        Ok(order)
    }

    /// Moves a pending order to `Processing`; an order needs at least one item.
    pub fn confirm(&mut self) -> Result<(), OrderError> {
        if self.status != OrderStatus::Pending { return Err(OrderError::NotEditable(self.status)); }
        if self.items.is_empty() { return Err(OrderError::NoItems); }
        self.set_status(OrderStatus::Processing)?;
        self.raise_event(DomainEvent::Order(OrderEvent::Confirmed { order_number: self.number.clone(), total: self.total.amount() }));
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), OrderError> { self.set_status(OrderStatus::Cancelled) }

    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), OrderError> {
        if self.status == status { return Ok(()); }
        match (self.status, status) {
            (OrderStatus::Delivered, OrderStatus::Cancelled) => return Err(OrderError::CannotCancel),
            (OrderStatus::Cancelled, _) => return Err(OrderError::Cancelled),
            _ => {}
        }
        self.status = status;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::StatusChanged {
            order_number: self.number.clone(), email: self.email.clone(), status,
        }));
        Ok(())
    }

    pub fn set_payment_status(&mut self, payment: PaymentStatus) {
        if self.payment == payment { return; }
        self.payment = payment;
        self.touch();
        self.raise_event(DomainEvent::Order(OrderEvent::PaymentStatusChanged {
            order_number: self.number.clone(), email: self.email.clone(), status: payment,
        }));
    }

    fn recalculate(&mut self) -> Result<(), OrderError> {
        let subtotal = self.items.iter().try_fold(Money::zero(self.subtotal.currency()), |acc, i| acc.add(&i.total()))?;
        self.total = subtotal.add(&self.shipping)?;
        self.subtotal = subtotal;
        self.touch();
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("No items")]
    NoItems,
    #[error("Delivered orders cannot be cancelled")]
    CannotCancel,
    #[error("Order is cancelled")]
    Cancelled,
    #[error("Order can no longer be edited in status {0}")]
    NotEditable(OrderStatus),
    #[error(transparent)]
    Money(#[from] MoneyError),
    #[error(transparent)]
    Cart(#[from] CartError),
}
