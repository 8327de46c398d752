//! Composable product search filter
//!
//! A [`ProductFilter`] holds up to six optional criteria. Only the criteria
//! that are present take part: they are ANDed together, while a category
//! criterion is satisfied by any one of its listed categories. The same
//! predicate can be evaluated in memory or rendered into a Postgres query.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{Postgres, QueryBuilder};
use validator::{Validate, ValidationError};

use crate::domain::aggregates::Product;
use crate::domain::category::{slugify, CategoryCatalog, CategoryType};
use crate::Result;

/// Raw search parameters as they arrive on the query string. Category
/// parameters are comma separated slugs or names.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "price_bounds_ordered", skip_on_field_errors = true))]
pub struct ProductSearchParams {
    pub name: Option<String>,
    #[validate(custom = "non_negative")]
    pub min_price: Option<Decimal>,
    #[validate(custom = "non_negative")]
    pub max_price: Option<Decimal>,
    pub brand: Option<String>,
    pub origin: Option<String>,
    pub age: Option<String>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub per_page: Option<u32>,
}

fn non_negative(value: &Decimal) -> std::result::Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative_price"));
    }
    Ok(())
}

fn price_bounds_ordered(params: &ProductSearchParams) -> std::result::Result<(), ValidationError> {
    match (params.min_price, params.max_price) {
        (Some(min), Some(max)) if min > max => Err(ValidationError::new("min_price_above_max_price")),
        _ => Ok(()),
    }
}

/// One present search criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    NameContains(String),
    MinPrice(Decimal),
    MaxPrice(Decimal),
    InCategories { kind: CategoryType, slugs: Vec<String> },
}

impl Criterion {
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            // Unicode lowercasing; Postgres ILIKE folds case by collation, so
            // the two can disagree on some non-ASCII names.
            Self::NameContains(needle) => product.name().to_lowercase().contains(&needle.to_lowercase()),
            Self::MinPrice(min) => product.price().amount() >= *min,
            Self::MaxPrice(max) => product.price().amount() <= *max,
            Self::InCategories { kind, slugs } => product.categories_of(*kind).any(|c| slugs.contains(&c.slug)),
        }
    }

    fn push_sql(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Self::NameContains(needle) => {
                qb.push("p.name ILIKE ").push_bind(format!("%{}%", escape_like(needle)));
            }
            Self::MinPrice(min) => {
                qb.push("p.price >= ").push_bind(*min);
            }
            Self::MaxPrice(max) => {
                qb.push("p.price <= ").push_bind(*max);
            }
            Self::InCategories { kind, slugs } => {
                qb.push(
                    "EXISTS (SELECT 1 FROM product_categories pc JOIN categories c ON c.id = pc.category_id \
                     WHERE pc.product_id = p.id AND c.kind = ",
                )
                .push_bind(kind.as_str())
                .push(" AND c.slug = ANY(")
                .push_bind(slugs.clone())
                .push("))");
            }
        }
    }
}

fn escape_like(value: &str) -> String {
    value.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    name: Option<String>,
    min_price: Option<Decimal>,
    max_price: Option<Decimal>,
    brands: Vec<String>,
    origins: Vec<String>,
    ages: Vec<String>,
}

impl ProductFilter {
    pub fn new() -> Self { Self::default() }

    /// The needle is matched verbatim, surrounding spaces included; an
    /// all-blank needle leaves the criterion absent.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.name = (!name.trim().is_empty()).then_some(name);
        self
    }

    pub fn with_min_price(mut self, min: Decimal) -> Self { self.min_price = Some(min); self }
    pub fn with_max_price(mut self, max: Decimal) -> Self { self.max_price = Some(max); self }

    /// Accepts slugs or display names; both are reduced to slugs.
    pub fn with_categories<I, S>(mut self, kind: CategoryType, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slugs = keys.into_iter().map(|key| slugify(key.as_ref())).filter(|slug| !slug.is_empty()).collect();
        match kind {
            CategoryType::Brand => self.brands = slugs,
            CategoryType::Origin => self.origins = slugs,
            CategoryType::Age => self.ages = slugs,
        }
        self
    }

    /// Builds a filter from search parameters. Every category key must name a
    /// known category of the matching kind.
    pub fn resolve(params: &ProductSearchParams, catalog: &CategoryCatalog) -> Result<Self> {
        params.validate()?;
        let mut filter = Self::new();
        if let Some(name) = &params.name { filter = filter.with_name(name.as_str()); }
        filter.min_price = params.min_price;
        filter.max_price = params.max_price;
        for (kind, raw) in [
            (CategoryType::Brand, &params.brand),
            (CategoryType::Origin, &params.origin),
            (CategoryType::Age, &params.age),
        ] {
            if let Some(raw) = raw {
                let categories = catalog.resolve(kind, raw.split(','))?;
                filter = filter.with_categories(kind, categories.into_iter().map(|c| c.slug));
            }
        }
        Ok(filter)
    }

    /// The criteria that are present, in a stable order.
    pub fn criteria(&self) -> Vec<Criterion> {
        let mut criteria = Vec::new();
        if let Some(name) = &self.name { criteria.push(Criterion::NameContains(name.clone())); }
        if let Some(min) = self.min_price { criteria.push(Criterion::MinPrice(min)); }
        if let Some(max) = self.max_price { criteria.push(Criterion::MaxPrice(max)); }
        for (kind, slugs) in [
            (CategoryType::Brand, &self.brands),
            (CategoryType::Origin, &self.origins),
            (CategoryType::Age, &self.ages),
        ] {
            if !slugs.is_empty() {
                criteria.push(Criterion::InCategories { kind, slugs: slugs.clone() });
            }
        }
        criteria
    }

    pub fn is_empty(&self) -> bool { self.criteria().is_empty() }

    pub fn matches(&self, product: &Product) -> bool {
        self.criteria().iter().all(|c| c.matches(product))
    }

    /// Appends ` WHERE a AND b ...`; nothing when no criterion is present.
    /// Products are expected under the alias `p`.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        self.push_joined(qb, " WHERE ");
    }

    /// Appends ` AND a AND b ...` to a query that already has a WHERE clause.
    pub fn push_and(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        self.push_joined(qb, " AND ");
    }

    fn push_joined(&self, qb: &mut QueryBuilder<'_, Postgres>, first: &str) {
        for (i, criterion) in self.criteria().iter().enumerate() {
            qb.push(if i == 0 { first } else { " AND " });
            criterion.push_sql(qb);
        }
    }
}
