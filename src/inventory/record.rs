//! Inventory record module.
//!
//! This module provides the [`Record`] stored in every tree node and the
//! fixed [`Category`] enumeration accepted by category searches.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single inventory entry.
///
/// The `key` is immutable once the record is stored in the tree; all other
/// fields may be overwritten in place. This is also the flat shape written to
/// and read from JSON snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, the ordering key of the tree.
    pub key: i64,
    /// Product name.
    pub name: String,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
    /// Free-text category label.
    pub category: String,
}

impl Record {
    /// Creates a new record.
    ///
    /// # Arguments
    ///
    /// * `key` - Unique record key
    /// * `name` - Product name
    /// * `quantity` - Units in stock
    /// * `price` - Unit price
    /// * `category` - Category label
    #[must_use]
    pub fn new(
        key: i64,
        name: impl Into<String>,
        quantity: u32,
        price: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            key,
            name: name.into(),
            quantity,
            price,
            category: category.into(),
        }
    }

    /// Returns true if no units are left in stock.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// Returns the stock value of this record (`quantity * price`).
    #[must_use]
    pub fn stock_value(&self) -> f64 {
        f64::from(self.quantity) * self.price
    }

    /// Copies every field except the key from `other`.
    pub(crate) fn overwrite_payload(&mut self, other: Record) {
        self.name = other.name;
        self.quantity = other.quantity;
        self.price = other.price;
        self.category = other.category;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} ({}) qty={} price={:.2}",
            self.key, self.name, self.category, self.quantity, self.price
        )
    }
}

/// The fixed set of categories accepted by category searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Home goods.
    Hogar,
    /// Kitchen goods.
    Cocina,
    /// Appliances.
    Electrodomesticos,
    /// Sporting goods.
    Deportes,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 4] = [
        Category::Hogar,
        Category::Cocina,
        Category::Electrodomesticos,
        Category::Deportes,
    ];

    /// Returns the exact label stored in records for this category.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Hogar => "Hogar",
            Category::Cocina => "Cocina",
            Category::Electrodomesticos => "Electrodomesticos",
            Category::Deportes => "Deportes",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parses an exact, case-sensitive category label.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCategory` for any other string.
    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::invalid_category(s))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
