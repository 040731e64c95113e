//! Column catalog for the user dataset
//!
//! The catalog lists every column a client can select, with a label and a
//! category. It drives the columns endpoint and the "all columns" echo.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::path::flat_key;

/// Column grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnCategory {
    Basic,
    Address,
    Company,
}

impl ColumnCategory {
    pub const ALL: [ColumnCategory; 3] = [
        ColumnCategory::Basic,
        ColumnCategory::Address,
        ColumnCategory::Company,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnCategory::Basic => "basic",
            ColumnCategory::Address => "address",
            ColumnCategory::Company => "company",
        }
    }
}

impl fmt::Display for ColumnCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColumnCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown column category: {}", s))
    }
}

/// A selectable column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub path: &'static str,
    pub label: &'static str,
    pub category: ColumnCategory,
}

impl Column {
    const fn new(path: &'static str, label: &'static str, category: ColumnCategory) -> Self {
        Self {
            path,
            label,
            category,
        }
    }

    pub fn flat_key(&self) -> &'static str {
        flat_key(self.path)
    }
}

const COLUMNS: &[Column] = &[
    Column::new("id", "User ID", ColumnCategory::Basic),
    Column::new("name", "Full Name", ColumnCategory::Basic),
    Column::new("username", "Username", ColumnCategory::Basic),
    Column::new("email", "Email Address", ColumnCategory::Basic),
    Column::new("phone", "Phone Number", ColumnCategory::Basic),
    Column::new("website", "Website", ColumnCategory::Basic),
    Column::new("address.street", "Street Address", ColumnCategory::Address),
    Column::new("address.suite", "Suite/Apartment", ColumnCategory::Address),
    Column::new("address.city", "City", ColumnCategory::Address),
    Column::new("address.zipcode", "ZIP Code", ColumnCategory::Address),
    Column::new("address.geo.lat", "Latitude", ColumnCategory::Address),
    Column::new("address.geo.lng", "Longitude", ColumnCategory::Address),
    Column::new("company.name", "Company Name", ColumnCategory::Company),
    Column::new("company.catchPhrase", "Company Slogan", ColumnCategory::Company),
    Column::new("company.bs", "Business Strategy", ColumnCategory::Company),
];

/// Static column catalog
pub struct ColumnCatalog;

impl ColumnCatalog {
    pub fn all() -> &'static [Column] {
        COLUMNS
    }

    /// Every catalog path, in catalog order
    pub fn paths() -> Vec<&'static str> {
        COLUMNS.iter().map(|c| c.path).collect()
    }

    pub fn by_category(category: ColumnCategory) -> impl Iterator<Item = &'static Column> {
        COLUMNS.iter().filter(move |c| c.category == category)
    }

    pub fn get(path: &str) -> Option<&'static Column> {
        COLUMNS.iter().find(|c| c.path == path)
    }

    /// Distinct first path segments, in catalog order.
    ///
    /// These are the columns a nested response carries when every column is
    /// requested.
    pub fn top_level() -> Vec<&'static str> {
        let mut seen: Vec<&'static str> = Vec::new();
        for column in COLUMNS {
            let head = column.path.split('.').next().unwrap_or(column.path);
            if !seen.contains(&head) {
                seen.push(head);
            }
        }
        seen
    }
}
