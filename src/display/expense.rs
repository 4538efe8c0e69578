//! Expense display formatting
//!
//! Table and detail views used by the console menu and the one-shot commands.

use crate::models::{Expense, ExpenseId, Money};

const ID_WIDTH: usize = 8;
const CATEGORY_WIDTH: usize = 16;
const DESCRIPTION_WIDTH: usize = 30;

/// Format a single expense as a table row
pub fn format_expense_row(id: &ExpenseId, expense: &Expense, symbol: &str) -> String {
    format!(
        "{:<id_w$} {:10} {:<cat_w$} {:>12}  {}",
        truncate(&id.to_string(), ID_WIDTH),
        expense.date.to_string(),
        truncate(expense.category.as_str(), CATEGORY_WIDTH),
        expense.amount.format_with_symbol(symbol),
        truncate(&expense.description, DESCRIPTION_WIDTH),
        id_w = ID_WIDTH,
        cat_w = CATEGORY_WIDTH,
    )
}

/// Format expenses as a table with a total line
pub fn format_expense_table<'a, I>(rows: I, symbol: &str) -> String
where
    I: IntoIterator<Item = (&'a ExpenseId, &'a Expense)>,
{
    let mut output = String::new();
    let mut total = Money::zero();
    let mut count = 0;

    for (id, expense) in rows {
        if count == 0 {
            output.push_str(&format!(
                "{:<id_w$} {:10} {:<cat_w$} {:>12}  {}\n",
                "ID",
                "Fecha",
                "Categoría",
                "Monto",
                "Descripción",
                id_w = ID_WIDTH,
                cat_w = CATEGORY_WIDTH,
            ));
            output.push_str(&"-".repeat(80));
            output.push('\n');
        }
        output.push_str(&format_expense_row(id, expense, symbol));
        output.push('\n');
        total += expense.amount;
        count += 1;
    }

    if count == 0 {
        return "No hay gastos registrados.\n".to_string();
    }

    output.push_str(&"-".repeat(80));
    output.push('\n');
    output.push_str(&format!(
        "{} gasto(s), total {}\n",
        count,
        total.format_with_symbol(symbol)
    ));
    output
}

/// Format expense details for display
pub fn format_expense_details(id: &ExpenseId, expense: &Expense, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("ID:          {}\n", id));
    output.push_str(&format!("Fecha:       {}\n", expense.date));
    output.push_str(&format!("Categoría:   {}\n", expense.category));
    output.push_str(&format!(
        "Monto:       {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    if !expense.description.is_empty() {
        output.push_str(&format!("Descripción: {}\n", expense.description));
    }

    output
}

/// Truncate a string to a maximum number of characters
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ExpenseDate};

    fn sample() -> Expense {
        Expense::new(
            Category::new("Comida"),
            Money::from_cents(1550),
            ExpenseDate::from_ymd(2024, 3, 5).unwrap(),
            "Almuerzo",
        )
    }

    #[test]
    fn test_table_total_of_large_amounts() {
        let big = Expense {
            amount: Money::MAX,
            ..sample()
        };
        let ids = [ExpenseId::Seq(1), ExpenseId::Seq(2)];
        let table = format_expense_table(ids.iter().map(|id| (id, &big)), "$");
        assert!(table.contains("2 gasto(s), total $2000000000000.00"));
    }

    #[test]
    fn test_row_contains_fields() {
        let row = format_expense_row(&ExpenseId::Seq(3), &sample(), "$");
        assert!(row.starts_with("3 "));
        assert!(row.contains("05/03/2024"));
        assert!(row.contains("Comida"));
        assert!(row.contains("$15.50"));
        assert!(row.contains("Almuerzo"));
    }

    #[test]
    fn test_table_total_and_empty() {
        let id = ExpenseId::Seq(1);
        let e = sample();
        let table = format_expense_table(vec![(&id, &e), (&id, &e)], "$");
        assert!(table.contains("2 gasto(s), total $31.00"));

        let empty: Vec<(&ExpenseId, &Expense)> = Vec::new();
        assert_eq!(format_expense_table(empty, "$"), "No hay gastos registrados.\n");
    }

    #[test]
    fn test_details() {
        let text = format_expense_details(&ExpenseId::Seq(1), &sample(), "$");
        assert!(text.contains("Monto:       $15.50"));
        assert!(text.contains("Descripción: Almuerzo"));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("Reparación de grifo", 10), "Reparac...");
        assert_eq!(truncate("Café", 10), "Café");
    }
}
