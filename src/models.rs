use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Product categories offered by the intake form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum Category {
    #[default]
    Phones,
    Batteries,
    Screens,
    Chargers,
    Headphones,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Phones,
        Category::Batteries,
        Category::Screens,
        Category::Chargers,
        Category::Headphones,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Phones => "Phones",
            Category::Batteries => "Batteries",
            Category::Screens => "Screens",
            Category::Chargers => "Chargers",
            Category::Headphones => "Headphones",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A product row as returned by the store.
///
/// Rows written by other tools may lack any column, so every field is
/// optional and a gap never fails the whole fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    #[schema(value_type = Option<f64>)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The record inserted by the intake form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NewProduct {
    pub name: String,
    pub category: Category,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub stock: i64,
    pub image_url: Option<String>,
}

impl From<NewProduct> for Product {
    fn from(record: NewProduct) -> Self {
        Product {
            id: None,
            name: Some(record.name),
            category: Some(record.category.to_string()),
            price: Some(record.price),
            stock: Some(record.stock),
            image_url: record.image_url,
            created_at: None,
        }
    }
}
