//! Product Aggregate

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::category::{Category, CategoryType};
use crate::domain::events::{DomainEvent, ProductEvent};
use crate::domain::value_objects::{Money, Quantity, Sku};

#[derive(Clone, Debug)]
pub struct Product {
    id: String,
    sku: Sku,
    name: String,
    description: String,
    price: Money,
    stock: Quantity,
    status: ProductStatus,
    categories: Vec<Category>,
    images: Vec<ProductImage>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

/// Reference to an image kept by the image store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductImage { pub url: String, pub alt: Option<String>, pub position: u32 }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProductStatus { #[default] Draft, Active, Archived }

impl Product {
    pub fn create(sku: Sku, name: impl Into<String>, price: Money) -> Self {
        let id = Uuid::now_v7().to_string();
        let now = Utc::now();
        let mut product = Self {
            id: id.clone(), sku: sku.clone(), name: name.into(), description: String::new(),
            price, stock: Quantity::default(), status: ProductStatus::Draft,
            categories: vec![], images: vec![], created_at: now, updated_at: now, events: vec![],
        };
        product.raise_event(DomainEvent::Product(ProductEvent::Created { product_id: id, sku }));
        product
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn sku(&self) -> &Sku { &self.sku }
    pub fn name(&self) -> &str { &self.name }
    pub fn description(&self) -> &str { &self.description }
    pub fn price(&self) -> &Money { &self.price }
    pub fn stock(&self) -> Quantity { self.stock }
    pub fn status(&self) -> ProductStatus { self.status }
    pub fn categories(&self) -> &[Category] { &self.categories }
    pub fn images(&self) -> &[ProductImage] { &self.images }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn is_in_stock(&self) -> bool { !self.stock.is_zero() }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Tags the product; a category already present is ignored.
    pub fn with_category(mut self, category: Category) -> Self {
        if !self.categories.contains(&category) { self.categories.push(category); }
        self
    }

    pub fn categories_of(&self, kind: CategoryType) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    pub fn in_category(&self, kind: CategoryType, slug: &str) -> bool {
        self.categories_of(kind).any(|c| c.slug == slug)
    }

    pub fn add_image(&mut self, url: impl Into<String>, alt: Option<String>) {
        let position = self.images.len() as u32;
        self.images.push(ProductImage { url: url.into(), alt, position });
        self.touch();
    }

    pub fn publish(&mut self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() { return Err(ProductError::MissingName); }
        if self.status == ProductStatus::Archived { return Err(ProductError::Archived); }
        self.status = ProductStatus::Active;
        self.touch();
        self.raise_event(DomainEvent::Product(ProductEvent::Published { product_id: self.id.clone() }));
        Ok(())
    }

    pub fn archive(&mut self) { self.status = ProductStatus::Archived; self.touch(); }

    pub fn update_price(&mut self, new_price: Money) {
        self.price = new_price;
        self.touch();
    }

    pub fn restock(&mut self, qty: u32) {
        self.stock = self.stock.add(qty);
        self.touch();
        self.raise_event(DomainEvent::Product(ProductEvent::StockAdded { product_id: self.id.clone(), quantity: qty }));
    }

    pub fn remove_stock(&mut self, qty: u32) -> Result<(), ProductError> {
        self.stock = self.stock.subtract(qty).ok_or(ProductError::InsufficientStock {
            available: self.stock.value(),
            requested: qty,
        })?;
        self.touch();
        self.raise_event(DomainEvent::Product(ProductEvent::StockRemoved { product_id: self.id.clone(), quantity: qty }));
        Ok(())
    }

    pub fn take_events(&mut self) -> Vec<DomainEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: DomainEvent) { self.events.push(e); }
    fn touch(&mut self) { self.updated_at = Utc::now(); }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    #[error("Missing name")]
    MissingName,
    #[error("Product is archived")]
    Archived,
    #[error("Insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: u32, requested: u32 },
}
