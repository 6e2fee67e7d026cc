//! Continuous savings model integrated with fixed-step RK4

mod model;
mod params;
pub mod rk4;
mod trace;

pub use params::{OdeParameters, MAX_STEPS};
pub use rk4::{rk4_step, Rk4State};
pub use trace::{Sample, SimulationTrace};

use crate::error::ValidationError;

/// Integrate the savings ODE over `[0, num_steps·dt]`.
///
/// The trace holds `num_steps + 1` samples. Each sample's income and
/// consumption are evaluated at the sample's own (already advanced) time
/// and savings. Overflow from extreme parameters is not trapped and shows
/// up as non-finite values in the trace.
pub fn simulate(params: &OdeParameters) -> Result<SimulationTrace, ValidationError> {
    params.validate()?;

    let dt = params.step_size;
    let num_steps = params.num_steps();
    log::debug!("simulating {} RK4 steps of {} years: {:?}", num_steps, dt, params);

    let rhs = |t: f64, savings: f64| params.savings_rate(t, savings);
    let mut state = Rk4State::new(0.0, params.initial_savings);
    let mut samples = Vec::with_capacity(num_steps + 1);
    samples.push(sample_at(params, state));

    for _ in 0..num_steps {
        state = state.advance(&rhs, dt);
        samples.push(sample_at(params, state));
    }

    let trace = SimulationTrace::new(samples);
    if !trace.final_savings().is_finite() {
        log::warn!("simulation diverged: final savings is {}", trace.final_savings());
    }
    Ok(trace)
}

fn sample_at(params: &OdeParameters, state: Rk4State) -> Sample {
    let income = params.income(state.t);
    Sample {
        time: state.t,
        income,
        consumption: params.consumption_from_income(income, state.y),
        savings: state.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference_params(return_rate: f64) -> OdeParameters {
        OdeParameters {
            initial_income: 2061.0,
            income_growth_rate: 0.05,
            autonomous_consumption: 50.0,
            marginal_propensity_to_consume: 0.9,
            savings_consumption_effect: 0.1,
            return_rate,
            initial_savings: 161.0,
            horizon_years: 10.0,
            step_size: 0.1,
        }
    }

    #[test]
    fn test_sample_count_and_time_axis() {
        let trace = simulate(&reference_params(0.03)).unwrap();
        assert_eq!(trace.len(), 101);
        assert_eq!(trace.samples()[0].time, 0.0);
        assert_abs_diff_eq!(trace.end_time(), 10.0, epsilon = 1e-9);
        assert!(trace.samples().windows(2).all(|w| w[0].time < w[1].time));
    }

    #[test]
    fn test_horizon_not_a_multiple_of_step() {
        let params = OdeParameters {
            horizon_years: 1.0,
            step_size: 0.3,
            ..reference_params(0.03)
        };
        let trace = simulate(&params).unwrap();
        assert_eq!(trace.len(), 4);
        // Last sample falls short of the horizon
        assert_abs_diff_eq!(trace.end_time(), 0.9, epsilon = 1e-12);

        let params = OdeParameters { horizon_years: 0.05, ..params };
        let trace = simulate(&params).unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.final_savings(), 161.0);
    }

    #[test]
    fn test_initial_sample() {
        let trace = simulate(&reference_params(0.03)).unwrap();
        let first = trace.samples()[0];
        assert_eq!(first.income, 2061.0);
        assert_eq!(first.savings, 161.0);
        assert_relative_eq!(
            first.consumption,
            50.0 + 0.9 * 2061.0 - 0.1 * 161.0,
            max_relative = 1e-14
        );
    }

    #[test]
    fn test_recorded_flows_use_advanced_state() {
        let params = reference_params(0.03);
        let trace = simulate(&params).unwrap();
        for sample in trace.iter() {
            assert_eq!(sample.income, params.income(sample.time));
            assert_eq!(sample.consumption, params.consumption(sample.time, sample.savings));
        }
    }

    #[test]
    fn test_regression_zero_return() {
        let trace = simulate(&reference_params(0.0)).unwrap();
        assert_relative_eq!(trace.final_savings(), 3987.2310785834375, max_relative = 1e-6);
    }

    #[test]
    fn test_regression_three_percent_return() {
        let trace = simulate(&reference_params(0.03)).unwrap();
        assert_relative_eq!(trace.final_savings(), 4769.611563018715, max_relative = 1e-6);
    }

    #[test]
    fn test_matches_closed_form_with_flat_income() {
        // With g = 0, dA/dt = k + λA has A(t) = (A0 + k/λ)e^(λt) − k/λ
        let params = OdeParameters {
            income_growth_rate: 0.0,
            ..reference_params(0.03)
        };
        let k = params.initial_income
            - params.autonomous_consumption
            - params.marginal_propensity_to_consume * params.initial_income;
        let lambda = params.savings_consumption_effect + params.return_rate;

        let trace = simulate(&params).unwrap();
        for sample in trace.iter() {
            let growth = (lambda * sample.time).exp();
            let exact = (params.initial_savings + k / lambda) * growth - k / lambda;
            assert_relative_eq!(sample.savings, exact, max_relative = 1e-8);
        }
    }

    #[test]
    fn test_fourth_order_convergence() {
        let final_savings = |dt: f64| {
            let params = OdeParameters { step_size: dt, ..reference_params(0.03) };
            simulate(&params).unwrap().final_savings()
        };

        let reference = final_savings(0.001);
        let coarse = (final_savings(0.1) - reference).abs();
        let fine = (final_savings(0.05) - reference).abs();
        let ratio = coarse / fine;
        assert!(ratio > 14.0 && ratio < 18.0, "convergence ratio {ratio}");
    }

    #[test]
    fn test_invalid_horizon_and_step() {
        let params = reference_params(0.03);
        assert_eq!(
            simulate(&OdeParameters { horizon_years: 0.0, ..params }),
            Err(ValidationError::InvalidHorizon(0.0))
        );
        assert_eq!(
            simulate(&OdeParameters { horizon_years: -5.0, ..params }),
            Err(ValidationError::InvalidHorizon(-5.0))
        );
        assert_eq!(
            simulate(&OdeParameters { step_size: 0.0, ..params }),
            Err(ValidationError::InvalidStep(0.0))
        );
    }

    #[test]
    fn test_huge_step_count_rejected_before_allocating() {
        let params = OdeParameters {
            horizon_years: 1e300,
            step_size: 1e-300,
            ..reference_params(0.03)
        };
        assert_eq!(simulate(&params), Err(ValidationError::TooManySteps(f64::INFINITY)));

        let params = OdeParameters {
            horizon_years: 1e12,
            step_size: 1.0,
            ..reference_params(0.03)
        };
        assert_eq!(simulate(&params), Err(ValidationError::TooManySteps(1e12)));
    }

    #[test]
    fn test_overflow_propagates_as_data() {
        let params = OdeParameters {
            income_growth_rate: 1000.0,
            ..reference_params(0.03)
        };
        let trace = simulate(&params).unwrap();
        assert_eq!(trace.len(), 101);
        assert!(!trace.final_savings().is_finite());
    }
}
