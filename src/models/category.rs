//! Expense categories
//!
//! A category is a short free-form label. The predefined labels are offered
//! first by every front end; user-typed and imported labels are appended to
//! the running [`CategoryList`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Label used when no category is given
pub const DEFAULT_CATEGORY: &str = "Otros";

/// Predefined categories, in display order
pub const PREDEFINED: [&str; 7] = [
    "Comida",
    "Transporte",
    "Entretenimiento",
    "Hogar",
    "Salud",
    "Compras",
    DEFAULT_CATEGORY,
];

/// Category label of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Create a category, trimming whitespace; blank becomes `Otros`
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        if name.is_empty() {
            Self::default()
        } else {
            Self(name.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the predefined labels
    pub fn is_predefined(&self) -> bool {
        PREDEFINED.contains(&self.0.as_str())
    }

    /// Case-insensitive substring match
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.0.to_lowercase().contains(needle_lower)
    }
}

impl Default for Category {
    fn default() -> Self {
        Self(DEFAULT_CATEGORY.to_string())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(s))
    }
}

/// Ordered set of known category labels
///
/// Starts with the predefined labels; `observe` appends unseen ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryList {
    names: Vec<String>,
}

impl CategoryList {
    pub fn new() -> Self {
        Self {
            names: PREDEFINED.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add a label if it is not known yet; returns true when added
    pub fn observe(&mut self, category: &Category) -> bool {
        if self.contains(category.as_str()) {
            return false;
        }
        self.names.push(category.as_str().to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for CategoryList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_falls_back_to_otros() {
        assert_eq!(Category::new("").as_str(), "Otros");
        assert_eq!(Category::new("   ").as_str(), "Otros");
        assert_eq!(Category::new(" Comida ").as_str(), "Comida");
    }

    #[test]
    fn test_predefined() {
        assert!(Category::new("Salud").is_predefined());
        assert!(!Category::new("Mascotas").is_predefined());
        assert_eq!(PREDEFINED.len(), 7);
        assert_eq!(PREDEFINED[0], "Comida");
        assert_eq!(PREDEFINED[6], "Otros");
    }

    #[test]
    fn test_matches_case_insensitive() {
        assert!(Category::new("Comida").matches("comi"));
        assert!(!Category::new("Transporte").matches("comida"));
    }

    #[test]
    fn test_category_list_grows() {
        let mut list = CategoryList::new();
        assert_eq!(list.len(), 7);
        assert!(!list.observe(&Category::new("Hogar")));
        assert!(list.observe(&Category::new("Mascotas")));
        assert!(!list.observe(&Category::new("Mascotas")));
        assert_eq!(list.len(), 8);
        assert_eq!(list.position("Mascotas"), Some(7));
        assert_eq!(list.get(0), Some("Comida"));
    }

    #[test]
    fn test_deserialize_blank() {
        let c: Category = serde_json::from_str("\"\"").unwrap();
        assert_eq!(c, Category::default());
    }
}
