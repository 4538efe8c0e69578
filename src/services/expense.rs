//! Expense service
//!
//! Turns raw text input from any front end into validated store operations.

use tracing::debug;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Expense, ExpenseDate, ExpenseId, ExpensePatch, Money};
use crate::storage::ExpenseStore;

/// Parse a user-entered amount
///
/// Accepts an optional `$` and either `.` or `,` as decimal separator. The
/// value is rounded to cents and must not be negative.
pub fn parse_amount(text: &str) -> ExpenseResult<Money> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ExpenseError::Validation("Amount is required".into()));
    }
    let amount = Money::parse(text).map_err(|e| ExpenseError::Validation(e.to_string()))?;
    if amount.is_negative() {
        return Err(ExpenseError::Validation(format!(
            "Amount must not be negative: '{}'",
            text
        )));
    }
    Ok(amount)
}

/// Parse a user-entered date in any accepted pattern
pub fn parse_date(text: &str) -> ExpenseResult<ExpenseDate> {
    ExpenseDate::parse(text).map_err(|e| ExpenseError::Validation(e.to_string()))
}

/// Parse a user-entered identifier
pub fn parse_id(text: &str) -> ExpenseResult<ExpenseId> {
    ExpenseId::parse(text).ok_or_else(|| ExpenseError::Validation("ID is required".into()))
}

fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Input for creating a new expense; every field is raw text
#[derive(Debug, Clone, Default)]
pub struct CreateExpenseInput {
    /// Empty means today
    pub date: String,
    /// Empty means `Otros`
    pub category: String,
    pub description: String,
    pub amount: String,
}

/// Input for updating an expense; `None` or blank leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub date: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub amount: Option<String>,
}

impl UpdateExpenseInput {
    /// Validate every provided field without applying anything
    pub fn to_patch(&self) -> ExpenseResult<ExpensePatch> {
        Ok(ExpensePatch {
            category: provided(&self.category).map(Category::new),
            amount: provided(&self.amount).map(parse_amount).transpose()?,
            date: provided(&self.date).map(parse_date).transpose()?,
            description: provided(&self.description).map(str::to_string),
        })
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    store: &'a mut ExpenseStore,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(store: &'a mut ExpenseStore) -> Self {
        Self { store }
    }

    /// Validate the input and insert a new expense, returning its id
    pub fn create(&mut self, input: CreateExpenseInput) -> ExpenseResult<ExpenseId> {
        let amount = parse_amount(&input.amount)?;
        let date = if input.date.trim().is_empty() {
            ExpenseDate::today()
        } else {
            parse_date(&input.date)?
        };
        let expense = Expense::new(
            Category::new(&input.category),
            amount,
            date,
            input.description,
        );

        let id = self.store.insert(expense);
        debug!(%id, "created expense");
        Ok(id)
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> ExpenseResult<&Expense> {
        self.store.get(id)
    }

    /// List all expenses in store order
    pub fn list(&self) -> Vec<(&ExpenseId, &Expense)> {
        self.store.iter().collect()
    }

    /// Expenses whose category or description contains `query`
    pub fn search(&self, query: &str) -> Vec<(&ExpenseId, &Expense)> {
        self.store.search(query)
    }

    /// Update the provided fields of an expense
    ///
    /// Nothing is applied unless every provided field is valid.
    pub fn update(&mut self, id: &ExpenseId, input: UpdateExpenseInput) -> ExpenseResult<&Expense> {
        if !self.store.contains(id) {
            return Err(ExpenseError::expense_not_found(id.to_string()));
        }
        let patch = input.to_patch()?;
        self.store.update(id, patch)
    }

    /// Delete an expense, returning it
    pub fn delete(&mut self, id: &ExpenseId) -> ExpenseResult<Expense> {
        self.store.delete(id)
    }

    pub fn count(&self) -> usize {
        self.store.len()
    }
}
