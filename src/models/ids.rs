//! Expense identifiers
//!
//! Two identifier schemes coexist: small sequential integers (the classic
//! `gastos.json` layout) and opaque strings such as UUIDs. Both are wrapped in
//! [`ExpenseId`] so the store can key on either.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of an expense record
///
/// Ordering puts sequential ids first (numerically), then opaque ids
/// (lexicographically). JSON files are written in this order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExpenseId {
    /// Sequentially assigned integer id
    Seq(u64),
    /// Opaque id (UUID or any non-numeric key found in a file)
    Key(String),
}

impl ExpenseId {
    /// Create a new random opaque id
    pub fn new_uuid() -> Self {
        Self::Key(Uuid::new_v4().to_string())
    }

    /// The integer value for sequential ids
    pub fn as_seq(&self) -> Option<u64> {
        match self {
            Self::Seq(n) => Some(*n),
            Self::Key(_) => None,
        }
    }

    /// Parse an id from user input or a file key
    ///
    /// Integer text becomes a sequential id; anything else (trimmed, non-empty)
    /// is kept as an opaque key.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        match s.parse::<u64>() {
            Ok(n) => Some(Self::Seq(n)),
            Err(_) => Some(Self::Key(s.to_string())),
        }
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seq(n) => write!(f, "{}", n),
            Self::Key(k) => write!(f, "{}", k),
        }
    }
}

impl From<u64> for ExpenseId {
    fn from(n: u64) -> Self {
        Self::Seq(n)
    }
}

/// Error returned when parsing an empty identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyIdError;

impl fmt::Display for EmptyIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier must not be empty")
    }
}

impl std::error::Error for EmptyIdError {}

impl FromStr for ExpenseId {
    type Err = EmptyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(EmptyIdError)
    }
}

// Ids are always written as strings so they can be used as JSON object keys.
impl Serialize for ExpenseId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct ExpenseIdVisitor;

impl<'de> Visitor<'de> for ExpenseIdVisitor {
    type Value = ExpenseId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or a non-empty string id")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(ExpenseId::Seq(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        u64::try_from(v)
            .map(ExpenseId::Seq)
            .map_err(|_| E::custom("id must not be negative"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        ExpenseId::parse(v).ok_or_else(|| E::custom("id must not be empty"))
    }
}

impl<'de> Deserialize<'de> for ExpenseId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExpenseIdVisitor)
    }
}

/// How new identifiers are generated
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    /// 1, 2, 3, ... (always above the largest integer id in the store)
    #[default]
    Sequential,
    /// Random UUIDv4 strings
    Uuid,
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sequential => write!(f, "sequential"),
            Self::Uuid => write!(f, "uuid"),
        }
    }
}
