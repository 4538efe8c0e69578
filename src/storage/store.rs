//! In-memory expense store
//!
//! Holds every expense keyed by [`ExpenseId`] and owns identifier assignment.
//! Iteration follows insertion order.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{CategoryList, Expense, ExpenseId, ExpensePatch, IdScheme};

/// Keyed collection of expenses
#[derive(Debug, Clone)]
pub struct ExpenseStore {
    scheme: IdScheme,
    records: HashMap<ExpenseId, Expense>,
    /// Insertion order of the keys in `records`
    order: Vec<ExpenseId>,
    /// Greater than every `ExpenseId::Seq` in `records`, or `u64::MAX` once
    /// the sequence is exhausted
    next_seq: u64,
}

impl ExpenseStore {
    /// Create an empty store using the given id scheme
    pub fn new(scheme: IdScheme) -> Self {
        Self {
            scheme,
            records: HashMap::new(),
            order: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn scheme(&self) -> IdScheme {
        self.scheme
    }

    /// Identifier the next `insert` would use
    ///
    /// Sequential ids are only peeked: the counter advances on insert. Uuid
    /// ids are fresh on every call, and so is every id once the sequence has
    /// reached `u64::MAX`.
    pub fn next_id(&self) -> ExpenseId {
        match self.scheme {
            IdScheme::Sequential if self.next_seq < u64::MAX => ExpenseId::Seq(self.next_seq),
            IdScheme::Sequential | IdScheme::Uuid => self.fresh_uuid(),
        }
    }

    fn fresh_uuid(&self) -> ExpenseId {
        loop {
            let id = ExpenseId::new_uuid();
            if !self.records.contains_key(&id) {
                break id;
            }
        }
    }

    /// Insert a record under a freshly assigned id
    pub fn insert(&mut self, expense: Expense) -> ExpenseId {
        let id = self.next_id();
        self.put(id.clone(), expense);
        debug!(%id, "inserted expense");
        id
    }

    /// Insert a record under a known id (records loaded from a keyed file)
    pub fn insert_with_id(&mut self, id: ExpenseId, expense: Expense) -> ExpenseResult<()> {
        if self.records.contains_key(&id) {
            return Err(ExpenseError::duplicate_expense(id.to_string()));
        }
        self.put(id, expense);
        Ok(())
    }

    fn put(&mut self, id: ExpenseId, expense: Expense) {
        if let ExpenseId::Seq(n) = id {
            self.next_seq = self.next_seq.max(n.saturating_add(1));
        }
        self.order.push(id.clone());
        self.records.insert(id, expense);
    }

    /// Get a record by id
    pub fn get(&self, id: &ExpenseId) -> ExpenseResult<&Expense> {
        self.records
            .get(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))
    }

    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.records.contains_key(id)
    }

    /// Overwrite the provided fields of an existing record
    pub fn update(&mut self, id: &ExpenseId, patch: ExpensePatch) -> ExpenseResult<&Expense> {
        let expense = self
            .records
            .get_mut(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        expense.apply(patch);
        debug!(%id, "updated expense");
        Ok(expense)
    }

    /// Remove a record, returning it
    pub fn delete(&mut self, id: &ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .records
            .remove(id)
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;
        self.order.retain(|k| k != id);
        debug!(%id, "deleted expense");
        Ok(expense)
    }

    /// Records whose category or description contains `query`, ignoring case
    ///
    /// A blank query returns every record.
    pub fn search(&self, query: &str) -> Vec<(&ExpenseId, &Expense)> {
        let needle = query.trim().to_lowercase();
        self.iter()
            .filter(|(_, e)| needle.is_empty() || e.matches(&needle))
            .collect()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&ExpenseId, &Expense)> {
        self.order
            .iter()
            .filter_map(move |id| self.records.get(id).map(|e| (id, e)))
    }

    pub fn ids(&self) -> impl Iterator<Item = &ExpenseId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Known categories: the predefined ones plus every label in use
    pub fn categories(&self) -> CategoryList {
        let mut list = CategoryList::new();
        for (_, expense) in self.iter() {
            list.observe(&expense.category);
        }
        list
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new(IdScheme::default())
    }
}

impl PartialEq for ExpenseStore {
    fn eq(&self, other: &Self) -> bool {
        self.records == other.records
    }
}

impl Eq for ExpenseStore {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDate, Money};
    use std::collections::HashSet;

    fn expense(category: &str, cents: i64, description: &str) -> Expense {
        Expense::new(
            Category::new(category),
            Money::from_cents(cents),
            ExpenseDate::from_ymd(2024, 5, 1).unwrap(),
            description,
        )
    }

    #[test]
    fn test_sequential_ids_start_at_one() {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        assert_eq!(store.next_id(), ExpenseId::Seq(1));
        // peeking does not advance
        assert_eq!(store.next_id(), ExpenseId::Seq(1));
        assert_eq!(store.insert(expense("Comida", 100, "")), ExpenseId::Seq(1));
        assert_eq!(store.insert(expense("Comida", 200, "")), ExpenseId::Seq(2));
        assert_eq!(store.next_id(), ExpenseId::Seq(3));
    }

    #[test]
    fn test_next_id_after_loaded_ids() {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        for n in [1, 3, 7] {
            store
                .insert_with_id(ExpenseId::Seq(n), expense("Hogar", 100, ""))
                .unwrap();
        }
        store
            .insert_with_id(ExpenseId::Key("abc".into()), expense("Hogar", 100, ""))
            .unwrap();
        assert_eq!(store.next_id(), ExpenseId::Seq(8));
    }

    #[test]
    fn test_ids_distinct_after_deletes() {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        let mut seen = HashSet::new();
        for i in 0..20 {
            let id = store.insert(expense("Otros", i, ""));
            assert!(seen.insert(id.clone()));
            if i % 3 == 0 {
                store.delete(&id).unwrap();
            }
        }
        // a deleted top id is never reused
        let last = store.insert(expense("Otros", 1, ""));
        assert!(seen.insert(last));
    }

    #[test]
    fn test_exhausted_sequence_never_reuses_a_key() {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        store
            .insert_with_id(ExpenseId::Seq(u64::MAX), expense("Hogar", 100, "original"))
            .unwrap();

        let id = store.insert(expense("Comida", 200, "nuevo"));
        assert!(id.as_seq().is_none());
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(&ExpenseId::Seq(u64::MAX)).unwrap().description,
            "original"
        );
        let ids: HashSet<_> = store.ids().collect();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_sequence_reaches_its_last_value() {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        store
            .insert_with_id(ExpenseId::Seq(u64::MAX - 2), expense("Hogar", 100, ""))
            .unwrap();
        assert_eq!(
            store.insert(expense("Hogar", 100, "")),
            ExpenseId::Seq(u64::MAX - 1)
        );
        assert!(store.insert(expense("Hogar", 100, "")).as_seq().is_none());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_uuid_scheme() {
        let mut store = ExpenseStore::new(IdScheme::Uuid);
        let a = store.insert(expense("Salud", 100, ""));
        let b = store.insert(expense("Salud", 100, ""));
        assert_ne!(a, b);
        assert!(a.as_seq().is_none());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insert_with_id_rejects_duplicate() {
        let mut store = ExpenseStore::default();
        store
            .insert_with_id(ExpenseId::Seq(2), expense("Comida", 100, ""))
            .unwrap();
        let err = store
            .insert_with_id(ExpenseId::Seq(2), expense("Comida", 300, ""))
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Duplicate { .. }));
        assert_eq!(store.get(&ExpenseId::Seq(2)).unwrap().amount.cents(), 100);
    }

    #[test]
    fn test_update_and_not_found() {
        let mut store = ExpenseStore::default();
        let id = store.insert(expense("Comida", 100, "pan"));
        store
            .update(
                &id,
                ExpensePatch {
                    description: Some("pan y leche".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        let e = store.get(&id).unwrap();
        assert_eq!(e.description, "pan y leche");
        assert_eq!(e.amount.cents(), 100);

        let err = store
            .update(&ExpenseId::Seq(99), ExpensePatch::default())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_absent_keeps_size() {
        let mut store = ExpenseStore::default();
        store.insert(expense("Comida", 100, ""));
        let err = store.delete(&ExpenseId::Seq(5)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_search() {
        let mut store = ExpenseStore::default();
        store.insert(expense("Comida", 100, "pan"));
        store.insert(expense("Transporte", 200, "bus"));
        store.insert(expense("Otros", 300, "comida para gato"));

        let hits = store.search("comida");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].1.category.as_str(), "Comida");
        assert_eq!(hits[1].1.category.as_str(), "Otros");

        assert_eq!(store.search("  ").len(), 3);
        assert!(store.search("hotel").is_empty());
    }

    #[test]
    fn test_iteration_in_insertion_order() {
        let mut store = ExpenseStore::default();
        store
            .insert_with_id(ExpenseId::Seq(9), expense("A", 1, ""))
            .unwrap();
        store.insert(expense("B", 2, ""));
        store
            .insert_with_id(ExpenseId::Seq(3), expense("C", 3, ""))
            .unwrap();
        let ids: Vec<_> = store.ids().cloned().collect();
        assert_eq!(
            ids,
            vec![ExpenseId::Seq(9), ExpenseId::Seq(10), ExpenseId::Seq(3)]
        );
    }

    #[test]
    fn test_equality_ignores_order() {
        let mut a = ExpenseStore::default();
        a.insert_with_id(ExpenseId::Seq(1), expense("A", 1, "")).unwrap();
        a.insert_with_id(ExpenseId::Seq(2), expense("B", 2, "")).unwrap();
        let mut b = ExpenseStore::new(IdScheme::Uuid);
        b.insert_with_id(ExpenseId::Seq(2), expense("B", 2, "")).unwrap();
        b.insert_with_id(ExpenseId::Seq(1), expense("A", 1, "")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_categories_include_custom_labels() {
        let mut store = ExpenseStore::default();
        store.insert(expense("Mascotas", 100, ""));
        let list = store.categories();
        assert_eq!(list.len(), 8);
        assert!(list.contains("Mascotas"));
    }
}
