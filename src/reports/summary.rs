//! Expense summary
//!
//! Read-only aggregation over the store: totals per category, the amount
//! distribution and quartile statistics. Charts and the terminal report are
//! built from this.

use crate::models::{Category, Money};
use crate::storage::ExpenseStore;

/// Totals for one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub count: usize,
    pub total: Money,
    /// Share of the grand total (0-100)
    pub percentage: f64,
    /// Every amount in this category, in store order
    pub amounts: Vec<Money>,
}

/// One histogram bucket, `[start, end)` except the last which is closed
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// Five-number summary plus mean
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

impl BoxStats {
    /// Statistics of a sample; `None` when empty
    ///
    /// Quartiles use linear interpolation between closest ranks.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let quantile = |q: f64| {
            let pos = q * (sorted.len() - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
        };

        Some(Self {
            min: sorted[0],
            q1: quantile(0.25),
            median: quantile(0.5),
            q3: quantile(0.75),
            max: sorted[sorted.len() - 1],
            mean: sorted.iter().sum::<f64>() / sorted.len() as f64,
        })
    }
}

/// Summary of every expense in a store
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseSummary {
    /// Categories in order of first appearance
    pub categories: Vec<CategoryTotal>,
    pub total: Money,
    pub count: usize,
    /// Every amount, in store order
    pub amounts: Vec<Money>,
}

impl ExpenseSummary {
    /// Aggregate a store
    pub fn generate(store: &ExpenseStore) -> Self {
        let mut categories: Vec<CategoryTotal> = Vec::new();
        let mut amounts = Vec::with_capacity(store.len());

        for (_, expense) in store.iter() {
            amounts.push(expense.amount);
            match categories
                .iter_mut()
                .find(|c| c.category == expense.category)
            {
                Some(entry) => {
                    entry.count += 1;
                    entry.total += expense.amount;
                    entry.amounts.push(expense.amount);
                }
                None => categories.push(CategoryTotal {
                    category: expense.category.clone(),
                    count: 1,
                    total: expense.amount,
                    percentage: 0.0,
                    amounts: vec![expense.amount],
                }),
            }
        }

        let total: Money = amounts.iter().copied().sum();
        for entry in &mut categories {
            entry.percentage = if total.is_zero() {
                0.0
            } else {
                entry.total.cents() as f64 / total.cents() as f64 * 100.0
            };
        }

        Self {
            categories,
            total,
            count: amounts.len(),
            amounts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Split the amount range into `bins` equal buckets
    pub fn histogram(&self, bins: usize) -> Vec<HistogramBin> {
        let values: Vec<f64> = self.amounts.iter().map(Money::as_f64).collect();
        histogram(&values, bins)
    }

    /// Statistics over all amounts
    pub fn box_stats(&self) -> Option<BoxStats> {
        let values: Vec<f64> = self.amounts.iter().map(Money::as_f64).collect();
        BoxStats::from_values(&values)
    }

    /// Statistics per category, in category order
    pub fn box_stats_by_category(&self) -> Vec<(&Category, BoxStats)> {
        self.categories
            .iter()
            .filter_map(|c| {
                let values: Vec<f64> = c.amounts.iter().map(Money::as_f64).collect();
                BoxStats::from_values(&values).map(|stats| (&c.category, stats))
            })
            .collect()
    }

    /// Format the summary for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Resumen de gastos\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<28} {:>14} {:>7} {:>7}\n",
            "Categoría", "Total", "Cant.", "%"
        ));
        output.push_str(&"-".repeat(60));
        output.push('\n');

        for entry in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>14} {:>7} {:>6.1}%\n",
                entry.category.as_str(),
                entry.total.format_with_symbol(symbol),
                entry.count,
                entry.percentage
            ));
        }

        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>14} {:>7}\n",
            "TOTAL",
            self.total.format_with_symbol(symbol),
            self.count
        ));

        output
    }
}

/// Equal-width histogram of `values`
///
/// When every value is the same there is a single bucket.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max <= min {
        return vec![HistogramBin {
            start: min,
            end: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bins as f64;
    let mut result: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            start: min + width * i as f64,
            end: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for v in values {
        let index = (((v - min) / width).floor() as usize).min(bins - 1);
        result[index].count += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, ExpenseDate, IdScheme};

    fn store_with(rows: &[(&str, i64)]) -> ExpenseStore {
        let mut store = ExpenseStore::new(IdScheme::Sequential);
        for (category, cents) in rows {
            store.insert(Expense::new(
                Category::new(*category),
                Money::from_cents(*cents),
                ExpenseDate::from_ymd(2024, 1, 1).unwrap(),
                "",
            ));
        }
        store
    }

    #[test]
    fn test_totals_of_largest_amounts() {
        let max = Money::MAX.cents();
        let store = store_with(&[("Hogar", max), ("Hogar", max), ("Comida", max)]);
        let summary = ExpenseSummary::generate(&store);
        assert_eq!(summary.total.cents(), 3 * max);
        assert_eq!(summary.categories[0].total.cents(), 2 * max);
        assert!(summary.format_terminal("$").contains("$3000000000000.00"));
        assert_eq!(summary.histogram(12).iter().map(|b| b.count).sum::<usize>(), 3);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let store = store_with(&[("Hogar", i64::MAX / 2), ("Hogar", i64::MAX / 2), ("Hogar", 10)]);
        let summary = ExpenseSummary::generate(&store);
        assert_eq!(summary.total.cents(), i64::MAX);
        assert_eq!(summary.categories[0].count, 3);
    }

    #[test]
    fn test_totals_in_first_appearance_order() {
        let store = store_with(&[
            ("Transporte", 1000),
            ("Comida", 2000),
            ("Transporte", 500),
            ("Comida", 500),
        ]);
        let summary = ExpenseSummary::generate(&store);

        assert_eq!(summary.count, 4);
        assert_eq!(summary.total.cents(), 4000);
        assert_eq!(summary.categories.len(), 2);
        assert_eq!(summary.categories[0].category.as_str(), "Transporte");
        assert_eq!(summary.categories[0].total.cents(), 1500);
        assert_eq!(summary.categories[0].count, 2);
        assert!((summary.categories[0].percentage - 37.5).abs() < 1e-9);
        assert_eq!(summary.categories[1].total.cents(), 2500);
    }

    #[test]
    fn test_empty_store() {
        let summary = ExpenseSummary::generate(&ExpenseStore::default());
        assert!(summary.is_empty());
        assert!(summary.histogram(12).is_empty());
        assert!(summary.box_stats().is_none());
    }

    #[test]
    fn test_box_stats_interpolation() {
        let stats = BoxStats::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.q1 - 1.75).abs() < 1e-9);
        assert!((stats.median - 2.5).abs() < 1e-9);
        assert!((stats.q3 - 3.25).abs() < 1e-9);
        assert!((stats.mean - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_histogram_counts_all_values() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let bins = histogram(&values, 12);
        assert_eq!(bins.len(), 12);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
        assert_eq!(bins[0].start, 0.0);
        assert_eq!(bins[11].end, 99.0);

        let single = histogram(&[5.0, 5.0], 12);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].count, 2);
    }

    #[test]
    fn test_format_terminal() {
        let store = store_with(&[("Comida", 1050)]);
        let text = ExpenseSummary::generate(&store).format_terminal("$");
        assert!(text.contains("Comida"));
        assert!(text.contains("$10.50"));
        assert!(text.contains("TOTAL"));
    }
}
