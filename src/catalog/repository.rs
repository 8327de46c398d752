//! Postgres access for catalog search

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::filter::ProductFilter;
use crate::domain::category::{Category, CategoryCatalog};
use crate::Result;

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const MAX_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub currency: String,
    pub stock: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow { kind: String, name: String, slug: String }

#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> { pub data: Vec<T>, pub total: i64, pub page: u32, pub per_page: u32 }

const ACTIVE_PRODUCTS: &str = " FROM products p WHERE p.status = 'active'";

/// Runs `filter` over active products, newest first.
#[tracing::instrument(skip(pool, filter))]
pub async fn search_products(pool: &PgPool, filter: &ProductFilter, page: u32, per_page: u32) -> Result<PaginatedResponse<ProductRow>> {
    let page = page.max(1);
    let per_page = per_page.clamp(1, MAX_PER_PAGE);

    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*)");
    count.push(ACTIVE_PRODUCTS);
    filter.push_and(&mut count);
    let (total,) = count.build_query_as::<(i64,)>().fetch_one(pool).await?;

    let mut rows = QueryBuilder::<Postgres>::new(
        "SELECT p.id, p.sku, p.name, p.description, p.price, p.currency, p.stock, p.created_at",
    );
    rows.push(ACTIVE_PRODUCTS);
    filter.push_and(&mut rows);
    rows.push(" ORDER BY p.created_at DESC LIMIT ")
        .push_bind(i64::from(per_page))
        .push(" OFFSET ")
        .push_bind(i64::from(page - 1) * i64::from(per_page));
    let data = rows.build_query_as::<ProductRow>().fetch_all(pool).await?;

    tracing::debug!(total, returned = data.len(), "product search");
    Ok(PaginatedResponse { data, total, page, per_page })
}

/// Loads every category; rows with an unknown kind are skipped.
pub async fn load_categories(pool: &PgPool) -> Result<CategoryCatalog> {
    let rows = sqlx::query_as::<_, CategoryRow>("SELECT kind, name, slug FROM categories ORDER BY kind, name")
        .fetch_all(pool)
        .await?;
    let categories = rows.into_iter().filter_map(|row| match row.kind.parse() {
        Ok(kind) => Some(Category { kind, name: row.name, slug: row.slug }),
        Err(e) => {
            tracing::warn!(slug = %row.slug, error = %e, "skipping category");
            None
        }
    });
    Ok(CategoryCatalog::new(categories))
}
