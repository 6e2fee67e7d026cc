//! Scenario configuration
//!
//! A single JSON document bundling every input of a comparison. All fields
//! are optional; anything missing falls back to the reference household
//! (income 2061/month, 10-year horizon, 3% return).
//!
//! ```json
//! {
//!   "annuity": { "annual_rate": 0.04, "num_months": 180 },
//!   "ode": { "I0": 2500, "T": 15 },
//!   "contribution": "min_expense_savings",
//!   "income": 2500,
//!   "expenses": [{ "category": "Housing", "min_amount": 700, "max_amount": 900 }]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::annuity::AnnuityParameters;
use crate::comparison::{
    ComparisonEngine, ComparisonResult, ContributionSource, DEFAULT_DISPLAY_SAMPLES,
};
use crate::error::ConfigError;
use crate::ledger::{self, loader::ensure_income_row, ExpenseEntry, ExpenseLedger};
use crate::simulation::OdeParameters;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub annuity: AnnuityParameters,

    #[serde(default)]
    pub ode: OdeParameters,

    /// How the annuity contribution is chosen
    #[serde(default)]
    pub contribution: ContributionSource,

    /// Points in the annuity display series
    #[serde(default = "default_display_samples")]
    pub display_samples: usize,

    /// Overrides the ledger's income row
    #[serde(default)]
    pub income: Option<f64>,

    /// Inline ledger rows; takes precedence over `ledger_path`
    #[serde(default)]
    pub expenses: Option<Vec<ExpenseEntry>>,

    /// CSV ledger to load when `expenses` is absent
    #[serde(default)]
    pub ledger_path: Option<PathBuf>,
}

fn default_display_samples() -> usize { DEFAULT_DISPLAY_SAMPLES }

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            annuity: AnnuityParameters::default(),
            ode: OdeParameters::default(),
            contribution: ContributionSource::default(),
            display_samples: default_display_samples(),
            income: None,
            expenses: None,
            ledger_path: None,
        }
    }
}

impl ScenarioConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Parse a JSON document; blank input yields the defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Build the ledger this scenario describes
    pub fn ledger(&self) -> Result<ExpenseLedger, ConfigError> {
        let mut ledger = match (&self.expenses, &self.ledger_path) {
            (Some(rows), _) => {
                let mut rows = rows.clone();
                ensure_income_row(&mut rows);
                ExpenseLedger::from_entries(rows)?
            }
            (None, Some(path)) => ledger::load_ledger(path)?,
            (None, None) => ExpenseLedger::default_categories(),
        };

        if let Some(income) = self.income {
            ledger.set_income(income)?;
        }
        Ok(ledger)
    }

    pub fn engine(&self) -> ComparisonEngine {
        ComparisonEngine::new(self.contribution, self.display_samples)
    }

    pub fn run(&self) -> Result<ComparisonResult, ConfigError> {
        let ledger = self.ledger()?;
        Ok(self.engine().compare(&ledger, &self.annuity, &self.ode)?)
    }
}
