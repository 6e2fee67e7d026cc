//! Sensitivity sweep over the rate of return
//!
//! Each rate is an independent comparison, so the batch runs on the rayon
//! pool. Every task reads the same ledger snapshot taken before the batch
//! starts.

use rayon::prelude::*;

use super::engine::ComparisonEngine;
use super::result::ComparisonResult;
use crate::annuity::AnnuityParameters;
use crate::error::ValidationError;
use crate::ledger::ExpenseLedger;
use crate::simulation::OdeParameters;

/// Comparison at one swept rate
#[derive(Debug, Clone)]
pub struct RateOutcome {
    pub rate: f64,
    pub result: Result<ComparisonResult, ValidationError>,
}

/// Run one comparison per rate, with the rate applied to both the annuity's
/// annual rate and the ODE's return rate. Results come back in input order.
pub fn sweep_rates(
    engine: &ComparisonEngine,
    ledger: &ExpenseLedger,
    annuity_params: &AnnuityParameters,
    ode_params: &OdeParameters,
    rates: &[f64],
) -> Vec<RateOutcome> {
    let snapshot = ledger.clone();
    log::debug!("sweeping {} rates", rates.len());

    rates
        .par_iter()
        .map(|&rate| {
            let annuity = AnnuityParameters {
                annual_rate: rate,
                ..*annuity_params
            };
            let ode = OdeParameters {
                return_rate: rate,
                ..*ode_params
            };
            RateOutcome {
                rate,
                result: engine.compare(&snapshot, &annuity, &ode),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::ContributionSource;

    #[test]
    fn test_sweep_matches_sequential_runs() {
        let engine = ComparisonEngine::default();
        let ledger = ExpenseLedger::default();
        let annuity = AnnuityParameters::default();
        let ode = OdeParameters::default();
        let rates = [0.0, 0.01, 0.03, 0.05, 0.08];

        let outcomes = sweep_rates(&engine, &ledger, &annuity, &ode, &rates);
        assert_eq!(outcomes.len(), rates.len());

        for (outcome, &rate) in outcomes.iter().zip(rates.iter()) {
            assert_eq!(outcome.rate, rate);
            let expected = engine
                .compare(
                    &ledger,
                    &AnnuityParameters { annual_rate: rate, ..annuity },
                    &OdeParameters { return_rate: rate, ..ode },
                )
                .unwrap();
            assert_eq!(outcome.result.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn test_higher_rates_grow_both_models() {
        let engine = ComparisonEngine::new(ContributionSource::Explicit, 10);
        let outcomes = sweep_rates(
            &engine,
            &ExpenseLedger::default(),
            &AnnuityParameters::default(),
            &OdeParameters::default(),
            &[0.0, 0.02, 0.04],
        );

        let finals: Vec<(f64, f64)> = outcomes
            .iter()
            .map(|o| {
                let r = o.result.as_ref().unwrap();
                (r.annuity_final_value(), r.ode_final_value)
            })
            .collect();
        assert!(finals.windows(2).all(|w| w[1].0 > w[0].0 && w[1].1 > w[0].1));
    }

    #[test]
    fn test_sweep_reports_errors_per_rate() {
        let annuity = AnnuityParameters {
            num_months: -1,
            ..AnnuityParameters::default()
        };
        let outcomes = sweep_rates(
            &ComparisonEngine::default(),
            &ExpenseLedger::default(),
            &annuity,
            &OdeParameters::default(),
            &[0.01, 0.02],
        );
        assert!(outcomes
            .iter()
            .all(|o| o.result == Err(ValidationError::NegativeMonths(-1))));
    }
}
