//! Product catalog search
pub mod filter;
pub mod repository;

pub use filter::{Criterion, ProductFilter, ProductSearchParams};
pub use repository::{load_categories, search_products, PaginatedResponse, ProductRow};
