//! Product categories
//!
//! Every product in the shop is tagged with categories of three kinds:
//! the toy's brand, its country of origin and the recommended age range.
//! Search filters address categories by slug, so lookups here are the only
//! place where an unknown category can be detected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Result, StorefrontError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Brand,
    Origin,
    Age,
}

impl CategoryType {
    pub const ALL: [CategoryType; 3] = [CategoryType::Brand, CategoryType::Origin, CategoryType::Age];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Origin => "origin",
            Self::Age => "age",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for CategoryType {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        CategoryType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StorefrontError::InvalidConfig(format!("unknown category type '{s}'")))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub kind: CategoryType,
    pub name: String,
    pub slug: String,
}

impl Category {
    pub fn new(kind: CategoryType, name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { kind, name, slug }
    }

    /// True when `key` names this category either by slug or by display name.
    pub fn is_named(&self, key: &str) -> bool {
        let key = key.trim();
        self.slug == slugify(key) || self.name.eq_ignore_ascii_case(key)
    }
}

/// Lowercases and joins alphanumeric runs with single hyphens: `"Brand A"` -> `"brand-a"`.
pub fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// The set of categories known to the shop.
#[derive(Clone, Debug, Default)]
pub struct CategoryCatalog {
    categories: Vec<Category>,
}

impl CategoryCatalog {
    pub fn new(categories: impl IntoIterator<Item = Category>) -> Self {
        let mut categories: Vec<Category> = categories.into_iter().collect();
        categories.sort_by(|a, b| a.kind.as_str().cmp(b.kind.as_str()).then_with(|| a.name.cmp(&b.name)));
        categories.dedup_by(|a, b| a.kind == b.kind && a.slug == b.slug);
        Self { categories }
    }

    pub fn all(&self) -> &[Category] { &self.categories }

    pub fn of_kind(&self, kind: CategoryType) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    /// Finds a category of `kind` by slug or display name.
    pub fn find(&self, kind: CategoryType, key: &str) -> Result<&Category> {
        self.of_kind(kind)
            .find(|c| c.is_named(key))
            .ok_or_else(|| StorefrontError::InvalidCategory { kind, slug: key.trim().to_string() })
    }

    /// Resolves every key, failing on the first unknown one.
    pub fn resolve<'a, I>(&self, kind: CategoryType, keys: I) -> Result<Vec<Category>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .filter(|key| !key.trim().is_empty())
            .map(|key| self.find(kind, key).cloned())
            .collect()
    }
}
