//! Runs both models on one parameter set

use serde::{Deserialize, Serialize};

use super::result::{align, ComparisonResult};
use crate::annuity::{self, AnnuityParameters};
use crate::error::ValidationError;
use crate::ledger::{ExpenseLedger, SavingsScenarios};
use crate::simulation::{self, OdeParameters};

/// Where the annuity's monthly contribution comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionSource {
    /// Use `AnnuityParameters::monthly_contribution` as given
    #[default]
    Explicit,
    /// Ledger income minus maximum expenses
    MaxExpenseSavings,
    /// Ledger income minus minimum expenses
    MinExpenseSavings,
}

impl ContributionSource {
    /// Monthly contribution this source selects
    pub fn resolve(self, explicit: f64, scenarios: &SavingsScenarios) -> f64 {
        match self {
            Self::Explicit => explicit,
            Self::MaxExpenseSavings => scenarios.max_expense_savings,
            Self::MinExpenseSavings => scenarios.min_expense_savings,
        }
    }

    pub fn uses_ledger(self) -> bool {
        !matches!(self, Self::Explicit)
    }
}

/// Number of points in the annuity display series
pub const DEFAULT_DISPLAY_SAMPLES: usize = 100;

#[derive(Debug, Clone)]
pub struct ComparisonEngine {
    pub contribution: ContributionSource,
    pub display_samples: usize,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self {
            contribution: ContributionSource::Explicit,
            display_samples: DEFAULT_DISPLAY_SAMPLES,
        }
    }
}

impl ComparisonEngine {
    pub fn new(contribution: ContributionSource, display_samples: usize) -> Self {
        Self {
            contribution,
            display_samples,
        }
    }

    /// Evaluate both models and line their outputs up in time.
    ///
    /// The ledger is only read, and only when the contribution source
    /// points at one of its savings scenarios. Errors from either model
    /// are returned unchanged.
    pub fn compare(
        &self,
        ledger: &ExpenseLedger,
        annuity_params: &AnnuityParameters,
        ode_params: &OdeParameters,
    ) -> Result<ComparisonResult, ValidationError> {
        let mut annuity_parameters = *annuity_params;
        let savings_scenarios = self
            .contribution
            .uses_ledger()
            .then(|| ledger.savings_scenarios(ledger.income()));
        if let Some(scenarios) = &savings_scenarios {
            annuity_parameters.monthly_contribution = self
                .contribution
                .resolve(annuity_params.monthly_contribution, scenarios);
        }
        log::debug!(
            "comparing with monthly contribution {} ({:?})",
            annuity_parameters.monthly_contribution,
            self.contribution
        );

        let exact_future_value = annuity::future_value(&annuity_parameters)?;
        let annuity_display_series =
            annuity::display_series(&annuity_parameters, self.display_samples)?;
        let ode_trace = simulation::simulate(ode_params)?;

        let aligned = align(&annuity_parameters, &ode_trace, ode_params.step_size);
        log::info!(
            "annuity FV {:.2}, ODE final savings {:.2}",
            exact_future_value.future_value,
            ode_trace.final_savings()
        );

        Ok(ComparisonResult {
            annuity_parameters,
            savings_scenarios,
            exact_future_value,
            annuity_display_series,
            ode_final_value: ode_trace.final_savings(),
            ode_trace,
            aligned,
        })
    }
}
