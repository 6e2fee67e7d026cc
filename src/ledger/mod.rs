//! Expense ledger: monthly expense ranges plus the income row
//!
//! Aggregates feed the savings scenarios, which in turn can seed the
//! annuity's monthly contribution.

mod entry;
pub mod loader;

pub use entry::{Bound, ExpenseEntry};
pub use loader::{load_ledger, load_ledger_from_reader, save_ledger, write_ledger};

use std::collections::HashSet;

use serde::Serialize;

use crate::error::ValidationError;

/// Category name of the distinguished income row
pub const INCOME_CATEGORY: &str = "Income";

/// Net monthly savings at each end of the expense range.
///
/// Either value may be negative, which means a monthly deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsScenarios {
    /// Income minus total maximum expenses (worst case)
    pub max_expense_savings: f64,
    /// Income minus total minimum expenses (best case)
    pub min_expense_savings: f64,
}

/// Ordered collection of [`ExpenseEntry`] rows with exactly one income row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpenseLedger {
    entries: Vec<ExpenseEntry>,
}

impl Default for ExpenseLedger {
    fn default() -> Self {
        Self::default_categories()
    }
}

impl ExpenseLedger {
    /// Ledger holding only an income row
    pub fn new(income: f64) -> Result<Self, ValidationError> {
        Self::from_entries(vec![ExpenseEntry::income(income)])
    }

    /// Standard household categories with zero income
    pub fn default_categories() -> Self {
        let entries = [
            (INCOME_CATEGORY, 0.0, 0.0),
            ("Food", 550.0, 900.0),
            ("Transport", 150.0, 300.0),
            ("Housing", 750.0, 1250.0),
            ("Clothing", 100.0, 200.0),
            ("Entertainment", 100.0, 300.0),
            ("Health", 100.0, 400.0),
            ("Education", 50.0, 200.0),
            ("Communication", 50.0, 100.0),
            ("Debt", 0.0, 0.0),
            ("Other", 50.0, 150.0),
        ]
        .into_iter()
        .map(|(category, min, max)| ExpenseEntry::new(category, min, max))
        .collect();

        Self { entries }
    }

    /// Build a ledger from a full set of rows, validating them as a whole
    pub fn from_entries(entries: Vec<ExpenseEntry>) -> Result<Self, ValidationError> {
        validate_entries(&entries)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    /// Non-income rows
    pub fn expenses(&self) -> impl Iterator<Item = &ExpenseEntry> {
        self.entries.iter().filter(|e| !e.is_income())
    }

    pub fn get(&self, category: &str) -> Option<&ExpenseEntry> {
        self.entries.iter().find(|e| e.category == category)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monthly income recorded on the income row
    pub fn income(&self) -> f64 {
        self.get(INCOME_CATEGORY).map_or(0.0, |e| e.min_amount)
    }

    pub fn set_income(&mut self, income: f64) -> Result<(), ValidationError> {
        self.set_entry(INCOME_CATEGORY, income, income)
    }

    /// Sum of `bound` over every non-income row. Empty ledgers total 0.
    pub fn total_expenses(&self, bound: Bound) -> f64 {
        self.expenses().map(|e| e.amount(bound)).sum()
    }

    /// Savings left from `income` under the maximum and minimum expense totals.
    ///
    /// Deficits are returned as negative values, never clamped.
    pub fn savings_scenarios(&self, income: f64) -> SavingsScenarios {
        let scenarios = SavingsScenarios {
            max_expense_savings: income - self.total_expenses(Bound::Max),
            min_expense_savings: income - self.total_expenses(Bound::Min),
        };

        if scenarios.max_expense_savings < 0.0 {
            log::warn!(
                "monthly deficit of {:.2} when every category is at its maximum",
                -scenarios.max_expense_savings
            );
        }

        scenarios
    }

    /// Insert or overwrite the row for `category`.
    ///
    /// On error the ledger is left untouched.
    pub fn set_entry(
        &mut self,
        category: &str,
        min_amount: f64,
        max_amount: f64,
    ) -> Result<(), ValidationError> {
        let entry = ExpenseEntry::new(category, min_amount, max_amount);
        entry.validate()?;

        match self.entries.iter_mut().find(|e| e.category == category) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// Swap in a whole new set of rows.
    ///
    /// The set must contain exactly one income row; callers loading external
    /// tables synthesize a zero income row first when none is present.
    pub fn replace_all(&mut self, entries: Vec<ExpenseEntry>) -> Result<(), ValidationError> {
        validate_entries(&entries)?;
        self.entries = entries;
        Ok(())
    }
}

fn validate_entries(entries: &[ExpenseEntry]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(entries.len());
    let mut income_rows = 0;

    for entry in entries {
        entry.validate()?;
        if entry.is_income() {
            income_rows += 1;
            if income_rows > 1 {
                return Err(ValidationError::DuplicateIncome);
            }
        } else if !seen.insert(entry.category.as_str()) {
            return Err(ValidationError::DuplicateCategory(entry.category.clone()));
        }
    }

    if income_rows == 0 {
        return Err(ValidationError::MissingIncome);
    }
    Ok(())
}
