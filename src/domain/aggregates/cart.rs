//! Cart Aggregate

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::aggregates::order::LineItem;
use crate::domain::value_objects::{Money, MoneyError};

#[derive(Clone, Debug)]
pub struct Cart {
    id: String,
    user_id: Option<String>,
    items: Vec<CartItem>,
    subtotal: Money,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl CartItem {
    pub fn line_total(&self) -> Money { self.unit_price.multiply(self.quantity) }
}

impl From<CartItem> for LineItem {
    fn from(item: CartItem) -> Self {
        LineItem { product_id: item.product_id, name: item.name, sku: item.sku, quantity: item.quantity, unit_price: item.unit_price }
    }
}

impl Cart {
    pub fn new(currency: &str) -> Self {
        Self { id: Uuid::now_v7().to_string(), user_id: None, items: vec![], subtotal: Money::zero(currency), updated_at: Utc::now() }
    }

    pub fn for_user(user_id: impl Into<String>, currency: &str) -> Self {
        let mut cart = Self::new(currency);
        cart.user_id = Some(user_id.into());
        cart
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn user_id(&self) -> Option<&str> { self.user_id.as_deref() }
    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn subtotal(&self) -> &Money { &self.subtotal }
    pub fn item_count(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }

    /// Adds an item, merging quantities with an existing line for the same product.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), CartError> {
        if item.quantity == 0 { return Err(CartError::ZeroQuantity); }
        if item.unit_price.currency() != self.subtotal.currency() {
            return Err(CartError::Money(MoneyError::CurrencyMismatch {
                left: self.subtotal.currency().to_string(),
                right: item.unit_price.currency().to_string(),
            }));
        }
        match self.items.iter_mut().find(|i| i.product_id == item.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => self.items.push(item),
        }
        self.recalculate()
    }

    /// Sets the quantity of a line; zero removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        let item = self.items.iter_mut().find(|i| i.product_id == product_id).ok_or(CartError::ItemNotFound)?;
        if quantity == 0 { self.items.retain(|i| i.product_id != product_id); }
        else { item.quantity = quantity; }
        self.recalculate()
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        let before = self.items.len();
        self.items.retain(|i| i.product_id != product_id);
        if self.items.len() == before { return Err(CartError::ItemNotFound); }
        self.recalculate()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.subtotal = Money::zero(self.subtotal.currency());
        self.updated_at = Utc::now();
    }

    /// Empties the cart into order lines.
    pub fn checkout(&mut self) -> Result<Vec<LineItem>, CartError> {
        if self.items.is_empty() { return Err(CartError::Empty); }
        let lines = std::mem::take(&mut self.items).into_iter().map(LineItem::from).collect();
        self.clear();
        Ok(lines)
    }

    fn recalculate(&mut self) -> Result<(), CartError> {
        self.subtotal = self.items.iter().try_fold(Money::zero(self.subtotal.currency()), |acc, i| acc.add(&i.line_total()))?;
        self.updated_at = Utc::now();
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Item not found")]
    ItemNotFound,
    #[error("Quantity must be positive")]
    ZeroQuantity,
    #[error("Cart is empty")]
    Empty,
    #[error(transparent)]
    Money(#[from] MoneyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn puzzle(quantity: u32) -> CartItem {
        CartItem { product_id: "P1".into(), name: "Puzzle".into(), sku: "PZ1".into(), quantity, unit_price: Money::usd(Decimal::new(10, 0)) }
    }

    #[test]
    fn test_cart_operations() {
        let mut cart = Cart::new("USD");
        cart.add_item(puzzle(2)).unwrap();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().amount(), Decimal::new(20, 0));
        cart.add_item(puzzle(1)).unwrap();
        assert_eq!(cart.items()[0].quantity, 3);
        cart.update_quantity("P1", 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().amount(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_other_currency() {
        let mut cart = Cart::new("EUR");
        assert!(matches!(cart.add_item(puzzle(1)), Err(CartError::Money(_))));
    }

    #[test]
    fn test_checkout_empties_cart() {
        let mut cart = Cart::for_user("u-1", "USD");
        assert_eq!(cart.checkout().unwrap_err(), CartError::Empty);
        cart.add_item(puzzle(2)).unwrap();
        let lines = cart.checkout().unwrap();
        assert_eq!(lines[0].total().amount(), Decimal::new(20, 0));
        assert!(cart.is_empty());
        assert_eq!(cart.remove_item("P1"), Err(CartError::ItemNotFound));
    }
}
