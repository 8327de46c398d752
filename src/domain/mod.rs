//! Storefront domain model
pub mod aggregates;
pub mod category;
pub mod events;
pub mod status;
pub mod value_objects;
