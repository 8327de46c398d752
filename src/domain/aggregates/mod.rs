//! Aggregates module
pub mod product;
pub mod order;
pub mod cart;

pub use product::{Product, ProductError, ProductImage, ProductStatus};
pub use order::{Address, LineItem, Order, OrderError};
pub use cart::{Cart, CartError, CartItem};
