//! Parameters of the continuous savings model

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest step count a single run may request
pub const MAX_STEPS: usize = 10_000_000;

/// Parameters for one run of the income/consumption/savings ODE.
///
/// Rates are annual; time is measured in years. Short aliases (`I0`, `g`,
/// `c0`, ...) are accepted when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OdeParameters {
    /// Income at t = 0 (I0)
    #[serde(default = "default_initial_income", alias = "I0")]
    pub initial_income: f64,

    /// Exponential income growth rate (g)
    #[serde(default = "default_income_growth_rate", alias = "g")]
    pub income_growth_rate: f64,

    /// Consumption independent of income (c0)
    #[serde(default = "default_autonomous_consumption", alias = "c0")]
    pub autonomous_consumption: f64,

    /// Share of income consumed (c1)
    #[serde(default = "default_marginal_propensity", alias = "c1")]
    pub marginal_propensity_to_consume: f64,

    /// Reduction in consumption per unit of accumulated savings (c2)
    #[serde(default = "default_savings_consumption_effect", alias = "c2")]
    pub savings_consumption_effect: f64,

    /// Return earned on accumulated savings (r)
    #[serde(default = "default_return_rate", alias = "r")]
    pub return_rate: f64,

    /// Savings at t = 0 (A0)
    #[serde(default = "default_initial_savings", alias = "A0")]
    pub initial_savings: f64,

    /// Simulated horizon in years (T)
    #[serde(default = "default_horizon_years", alias = "T")]
    pub horizon_years: f64,

    /// Fixed RK4 step in years (dt)
    #[serde(default = "default_step_size", alias = "dt")]
    pub step_size: f64,
}

fn default_initial_income() -> f64 { 2061.0 }
fn default_income_growth_rate() -> f64 { 0.05 }
fn default_autonomous_consumption() -> f64 { 50.0 }
fn default_marginal_propensity() -> f64 { 0.9 }
fn default_savings_consumption_effect() -> f64 { 0.1 }
fn default_return_rate() -> f64 { 0.03 }
fn default_initial_savings() -> f64 { 161.0 }
fn default_horizon_years() -> f64 { 10.0 }
fn default_step_size() -> f64 { 0.1 }

impl Default for OdeParameters {
    fn default() -> Self {
        Self {
            initial_income: default_initial_income(),
            income_growth_rate: default_income_growth_rate(),
            autonomous_consumption: default_autonomous_consumption(),
            marginal_propensity_to_consume: default_marginal_propensity(),
            savings_consumption_effect: default_savings_consumption_effect(),
            return_rate: default_return_rate(),
            initial_savings: default_initial_savings(),
            horizon_years: default_horizon_years(),
            step_size: default_step_size(),
        }
    }
}

impl OdeParameters {
    /// Number of whole RK4 steps that fit in the horizon.
    ///
    /// Truncates: the last sample lands at `num_steps·dt`, which can fall
    /// short of the horizon. Only meaningful once [`validate`](Self::validate)
    /// has passed.
    pub fn num_steps(&self) -> usize {
        (self.horizon_years / self.step_size).floor() as usize
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.horizon_years.is_finite() && self.horizon_years > 0.0) {
            return Err(ValidationError::InvalidHorizon(self.horizon_years));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(ValidationError::InvalidStep(self.step_size));
        }
        // Checked before the usize cast, which saturates
        let steps = (self.horizon_years / self.step_size).floor();
        if steps > MAX_STEPS as f64 {
            return Err(ValidationError::TooManySteps(steps));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_steps_truncates() {
        let mut params = OdeParameters::default();
        assert_eq!(params.num_steps(), 100);

        params.horizon_years = 10.05;
        assert_eq!(params.num_steps(), 100);

        // 0.3 / 0.1 is just under 3 in binary floating point
        params.horizon_years = 0.3;
        assert_eq!(params.num_steps(), 2);

        params.horizon_years = 0.05;
        assert_eq!(params.num_steps(), 0);
    }

    #[test]
    fn test_validate() {
        let params = OdeParameters::default();
        assert!(params.validate().is_ok());

        let bad_horizon = OdeParameters { horizon_years: 0.0, ..params };
        assert_eq!(bad_horizon.validate(), Err(ValidationError::InvalidHorizon(0.0)));

        let bad_step = OdeParameters { step_size: -0.1, ..params };
        assert_eq!(bad_step.validate(), Err(ValidationError::InvalidStep(-0.1)));

        let infinite = OdeParameters { horizon_years: f64::INFINITY, ..params };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_validate_caps_step_count() {
        let params = OdeParameters::default();

        let cap = MAX_STEPS as f64;
        let at_cap = OdeParameters { horizon_years: cap, step_size: 1.0, ..params };
        assert!(at_cap.validate().is_ok());
        assert_eq!(at_cap.num_steps(), MAX_STEPS);

        let over_cap = OdeParameters { horizon_years: cap + 1.0, step_size: 1.0, ..params };
        assert_eq!(
            over_cap.validate(),
            Err(ValidationError::TooManySteps(cap + 1.0))
        );

        // Ratio overflows to infinity
        let extreme = OdeParameters { horizon_years: 1e300, step_size: 1e-300, ..params };
        assert_eq!(extreme.validate(), Err(ValidationError::TooManySteps(f64::INFINITY)));
    }

    #[test]
    fn test_deserialize_short_names_and_defaults() {
        let json = r#"{ "I0": 3000, "r": 0.0, "T": 5 }"#;
        let params: OdeParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.initial_income, 3000.0);
        assert_eq!(params.return_rate, 0.0);
        assert_eq!(params.horizon_years, 5.0);
        assert_eq!(params.step_size, 0.1);
        assert_eq!(params.marginal_propensity_to_consume, 0.9);
    }
}
