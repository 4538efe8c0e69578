//! Expense record model
//!
//! The identifier is not part of the record: it is the key under which the
//! store (and the JSON file) holds the record.

use serde::Serialize;
use std::fmt;

use super::category::Category;
use super::date::ExpenseDate;
use super::money::Money;

/// A single expense
///
/// Serialized with the Spanish field names of the data file, in alphabetical
/// order: `categoria`, `descripcion`, `fecha`, `monto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expense {
    #[serde(rename = "categoria")]
    pub category: Category,

    #[serde(rename = "descripcion")]
    pub description: String,

    #[serde(rename = "fecha")]
    pub date: ExpenseDate,

    /// Non-negative amount
    #[serde(rename = "monto")]
    pub amount: Money,
}

impl Expense {
    pub fn new(
        category: Category,
        amount: Money,
        date: ExpenseDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            category,
            description: description.into().trim().to_string(),
            date,
            amount,
        }
    }

    /// Case-insensitive match on category or description
    ///
    /// `needle_lower` must already be lowercased.
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.category.matches(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
    }

    /// Apply the provided fields of a patch
    pub fn apply(&mut self, patch: ExpensePatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)?;
        if !self.description.is_empty() {
            write!(f, " ({})", self.description)?;
        }
        Ok(())
    }
}

/// Partial update of an expense; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub category: Option<Category>,
    pub amount: Option<Money>,
    pub date: Option<ExpenseDate>,
    pub description: Option<String>,
}

impl ExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
            && self.description.is_none()
    }
}
