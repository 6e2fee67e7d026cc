//! A single row of the expense ledger

use serde::{Deserialize, Serialize};

use super::INCOME_CATEGORY;
use crate::error::ValidationError;

/// Which end of an expense range to aggregate over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Min,
    Max,
}

/// Monthly amount range for one category.
///
/// The income row uses the same shape with `min_amount == max_amount`.
/// Column aliases accept tables exported by the older spreadsheet tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    #[serde(alias = "Categoría", alias = "Category")]
    pub category: String,

    #[serde(alias = "Gasto Mín (Bs.)", alias = "Min")]
    pub min_amount: f64,

    #[serde(alias = "Gasto Máx (Bs.)", alias = "Max")]
    pub max_amount: f64,
}

impl ExpenseEntry {
    pub fn new(category: impl Into<String>, min_amount: f64, max_amount: f64) -> Self {
        Self {
            category: category.into(),
            min_amount,
            max_amount,
        }
    }

    /// Income row with both bounds set to `income`
    pub fn income(income: f64) -> Self {
        Self::new(INCOME_CATEGORY, income, income)
    }

    pub fn is_income(&self) -> bool {
        self.category == INCOME_CATEGORY
    }

    /// Amount at the requested end of the range
    pub fn amount(&self, bound: Bound) -> f64 {
        match bound {
            Bound::Min => self.min_amount,
            Bound::Max => self.max_amount,
        }
    }

    /// Check the row on its own: finite non-negative amounts, `min <= max`,
    /// and equal bounds for the income row.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for amount in [self.min_amount, self.max_amount] {
            if !(amount.is_finite() && amount >= 0.0) {
                return Err(ValidationError::NegativeAmount {
                    category: self.category.clone(),
                    amount,
                });
            }
        }

        if self.min_amount > self.max_amount {
            return Err(ValidationError::InvertedBounds {
                category: self.category.clone(),
                min: self.min_amount,
                max: self.max_amount,
            });
        }

        if self.is_income() && self.min_amount != self.max_amount {
            return Err(ValidationError::IncomeMismatch {
                min: self.min_amount,
                max: self.max_amount,
            });
        }

        Ok(())
    }
}
