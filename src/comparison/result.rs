//! Output of a comparison run

use serde::Serialize;

use crate::annuity::{self, AnnuityOutcome, AnnuityParameters, SeriesPoint};
use crate::ledger::SavingsScenarios;
use crate::simulation::SimulationTrace;

/// Both models evaluated at one ODE sample time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AlignedPoint {
    pub time: f64,
    /// Display-series annuity value at `time`
    pub annuity: f64,
    /// ODE savings at `time`
    pub savings: f64,
    /// `savings - annuity`
    pub gap: f64,
}

/// Headline values and trajectories of both models
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Annuity inputs actually used, after any contribution derivation
    pub annuity_parameters: AnnuityParameters,
    /// Ledger scenarios, present when the contribution came from the ledger
    pub savings_scenarios: Option<SavingsScenarios>,
    /// Exact discrete future value (headline number)
    pub exact_future_value: AnnuityOutcome,
    /// Continuous approximation of the annuity, for charting only
    pub annuity_display_series: Vec<SeriesPoint>,
    pub ode_final_value: f64,
    pub ode_trace: SimulationTrace,
    /// Both models on the ODE time axis, restricted to the shared horizon
    pub aligned: Vec<AlignedPoint>,
}

impl ComparisonResult {
    pub fn annuity_final_value(&self) -> f64 {
        self.exact_future_value.future_value
    }

    /// `ode_final_value - annuity_final_value`
    pub fn final_gap(&self) -> f64 {
        self.ode_final_value - self.annuity_final_value()
    }
}

/// Evaluate the annuity display curve at every ODE sample inside the
/// horizon both models cover.
pub(crate) fn align(
    params: &AnnuityParameters,
    trace: &SimulationTrace,
    step_size: f64,
) -> Vec<AlignedPoint> {
    let overlap_end = params.years().min(trace.end_time());
    // Absorb drift in the accumulated ODE time
    let limit = overlap_end + step_size * 1e-6;

    trace
        .iter()
        .take_while(|sample| sample.time <= limit)
        .map(|sample| {
            let annuity = annuity::display_value(params, sample.time);
            AlignedPoint {
                time: sample.time,
                annuity,
                savings: sample.savings,
                gap: sample.savings - annuity,
            }
        })
        .collect()
}
