//! WorldOfToys Storefront
//!
//! Backend core of the WorldOfToys toy shop.
//!
//! ## Features
//! - Product catalog with brand, origin and age categories
//! - Composable product search filters
//! - Shopping cart and order lifecycle
//! - Transactional email rendering (account activation, password reset,
//!   order and payment status updates)

use thiserror::Error;

pub mod api;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod notification;

pub use catalog::filter::{Criterion, ProductFilter, ProductSearchParams};
pub use domain::category::{Category, CategoryCatalog, CategoryType};
pub use notification::{
    ConfirmationTokenKind, EmailContent, NotificationEvent, NotificationRequest, OrderStatus,
    PaymentStatus, StatusKind, StatusLabel,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Invalid {kind} category: {slug}")]
    InvalidCategory { kind: CategoryType, slug: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Mail error: {0}")]
    Mail(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
