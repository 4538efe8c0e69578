//! Loosely typed records read from data files
//!
//! Files in the wild carry Spanish or English field names, amounts as numbers
//! or strings, and sometimes missing fields. Everything is read into the raw
//! shapes here and converted to [`Expense`] with the defaulting rules:
//! `fecha` and `monto` are required, `categoria` falls back to `Otros` and
//! `descripcion` to an empty string.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::models::{Category, Expense, ExpenseDate, ExpenseId, Money};

/// A record as found in a JSON or TXT file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawExpense {
    #[serde(rename = "categoria", alias = "category")]
    pub category: Option<Value>,

    #[serde(rename = "descripcion", alias = "description")]
    pub description: Option<Value>,

    #[serde(rename = "fecha", alias = "date")]
    pub date: Option<Value>,

    #[serde(rename = "monto", alias = "amount")]
    pub amount: Option<Value>,
}

/// A row as found in a CSV file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCsvRow {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, rename = "fecha", alias = "date")]
    pub date: Option<String>,

    #[serde(default, rename = "categoria", alias = "category")]
    pub category: Option<String>,

    #[serde(default, rename = "descripcion", alias = "description")]
    pub description: Option<String>,

    #[serde(default, rename = "monto", alias = "amount")]
    pub amount: Option<String>,
}

/// Why a raw record could not become an expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    MissingDate,
    InvalidDate(String),
    MissingAmount,
    InvalidAmount(String),
    NegativeAmount,
    Malformed(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDate => write!(f, "missing date"),
            Self::InvalidDate(s) => write!(f, "invalid date '{}'", s),
            Self::MissingAmount => write!(f, "missing amount"),
            Self::InvalidAmount(s) => write!(f, "invalid amount '{}'", s),
            Self::NegativeAmount => write!(f, "negative amount"),
            Self::Malformed(s) => write!(f, "malformed record: {}", s),
        }
    }
}

fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RawExpense {
    /// Read a raw record from any JSON value
    pub fn from_value(value: Value) -> Result<Self, RejectReason> {
        if !value.is_object() {
            return Err(RejectReason::Malformed("not an object".into()));
        }
        serde_json::from_value(value).map_err(|e| RejectReason::Malformed(e.to_string()))
    }

    /// Apply the defaulting rules
    pub fn into_expense(self) -> Result<Expense, RejectReason> {
        let date = match self.date.as_ref().and_then(text_of) {
            None => return Err(RejectReason::MissingDate),
            Some(s) if s.trim().is_empty() => return Err(RejectReason::MissingDate),
            Some(s) => ExpenseDate::parse(&s).map_err(|_| RejectReason::InvalidDate(s))?,
        };

        let amount = match self.amount {
            None | Some(Value::Null) => return Err(RejectReason::MissingAmount),
            Some(Value::Number(n)) => n
                .as_f64()
                .and_then(Money::from_f64)
                .ok_or_else(|| RejectReason::InvalidAmount(n.to_string()))?,
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(RejectReason::MissingAmount)
            }
            Some(Value::String(s)) => {
                Money::parse(&s).map_err(|_| RejectReason::InvalidAmount(s))?
            }
            Some(other) => return Err(RejectReason::InvalidAmount(other.to_string())),
        };
        if amount.is_negative() {
            return Err(RejectReason::NegativeAmount);
        }

        let category = self
            .category
            .as_ref()
            .and_then(text_of)
            .map(Category::new)
            .unwrap_or_default();
        let description = self
            .description
            .as_ref()
            .and_then(text_of)
            .unwrap_or_default();

        Ok(Expense::new(category, amount, date, description))
    }
}

impl RawCsvRow {
    pub fn into_expense(self) -> Result<Expense, RejectReason> {
        let non_blank = |s: Option<String>| s.filter(|s| !s.trim().is_empty()).map(Value::String);
        RawExpense {
            category: non_blank(self.category),
            description: self.description.map(Value::String),
            date: non_blank(self.date),
            amount: non_blank(self.amount),
        }
        .into_expense()
    }
}

/// Records parsed from one file, before they reach a store
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords {
    /// Records whose key came from the file
    pub keyed: Vec<(ExpenseId, Expense)>,
    /// Records that get fresh ids
    pub fresh: Vec<Expense>,
    /// Records dropped by the defaulting rules
    pub skipped: usize,
}

impl ParsedRecords {
    pub fn len(&self) -> usize {
        self.keyed.len() + self.fresh.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a rejected entry; `position` names it in the log
    pub fn skip(&mut self, position: impl std::fmt::Display, reason: &RejectReason) {
        warn!(%position, %reason, "skipping record");
        self.skipped += 1;
    }

    /// All records in file order, dropping file keys
    pub fn into_records(self) -> Vec<Expense> {
        self.keyed
            .into_iter()
            .map(|(_, e)| e)
            .chain(self.fresh)
            .collect()
    }
}
