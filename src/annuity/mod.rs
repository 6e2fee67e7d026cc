//! Discrete annuity: fixed monthly contribution compounding monthly
//!
//! Two distinct calculations live here and are kept apart on purpose:
//!
//! - [`future_value`] is the exact ordinary-annuity closed form over whole
//!   months. This is the headline number.
//! - [`display_series`] samples a continuous-time analogue over years,
//!   `P·12·((1+r)^t − 1)/r`, for charting next to the ODE trajectory. Its
//!   end point does not equal [`future_value`] in general.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Largest display series [`display_series`] will build
pub const MAX_DISPLAY_SAMPLES: usize = 100_000;

/// Inputs to the annuity calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnuityParameters {
    /// Amount paid in at the end of every month
    #[serde(default = "default_monthly_contribution")]
    pub monthly_contribution: f64,

    /// Nominal annual rate as a decimal (0.03 = 3%); compounded monthly
    #[serde(default = "default_annual_rate")]
    pub annual_rate: f64,

    /// Number of monthly contributions
    #[serde(default = "default_num_months")]
    pub num_months: i64,
}

fn default_monthly_contribution() -> f64 { 161.0 }
fn default_annual_rate() -> f64 { 0.03 }
fn default_num_months() -> i64 { 120 }

impl Default for AnnuityParameters {
    fn default() -> Self {
        Self {
            monthly_contribution: default_monthly_contribution(),
            annual_rate: default_annual_rate(),
            num_months: default_num_months(),
        }
    }
}

impl AnnuityParameters {
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 12.0
    }

    /// Horizon in years (`num_months / 12`)
    pub fn years(&self) -> f64 {
        self.num_months as f64 / 12.0
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.num_months < 0 {
            return Err(ValidationError::NegativeMonths(self.num_months));
        }
        Ok(())
    }
}

/// Future value breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnuityOutcome {
    pub future_value: f64,
    pub total_contributed: f64,
    pub interest_earned: f64,
}

/// One point of the display series
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// Years since the first contribution
    pub time: f64,
    pub value: f64,
}

/// Exact future value of an ordinary annuity.
///
/// `FV = P·((1+i)^n − 1)/i` with `i = annual_rate/12`, or `P·n` when `i == 0`
/// (the limit of the same formula).
pub fn future_value(params: &AnnuityParameters) -> Result<AnnuityOutcome, ValidationError> {
    params.validate()?;
    log::debug!("annuity future value for {:?}", params);

    let p = params.monthly_contribution;
    let n = params.num_months as f64;
    let i = params.monthly_rate();

    let future_value = if i == 0.0 {
        p * n
    } else {
        p * ((1.0 + i).powf(n) - 1.0) / i
    };
    let total_contributed = p * n;

    Ok(AnnuityOutcome {
        future_value,
        total_contributed,
        interest_earned: future_value - total_contributed,
    })
}

/// Continuous approximation of accumulated value after `years`.
///
/// Uses the annual rate directly: `P·12·((1+r)^t − 1)/r`, or `P·12·t` at `r == 0`.
pub fn display_value(params: &AnnuityParameters, years: f64) -> f64 {
    let annual_payment = params.monthly_contribution * 12.0;
    let r = params.annual_rate;
    if r == 0.0 {
        annual_payment * years
    } else {
        annual_payment * ((1.0 + r).powf(years) - 1.0) / r
    }
}

/// `samples` evenly spaced points of [`display_value`] over `[0, num_months/12]`
pub fn display_series(
    params: &AnnuityParameters,
    samples: usize,
) -> Result<Vec<SeriesPoint>, ValidationError> {
    params.validate()?;
    if samples < 2 {
        return Err(ValidationError::TooFewDisplaySamples(samples));
    }
    if samples > MAX_DISPLAY_SAMPLES {
        return Err(ValidationError::TooManyDisplaySamples(samples));
    }

    let end = params.years();
    let last = samples - 1;
    let step = end / last as f64;

    let series = (0..samples)
        .map(|k| {
            let time = if k == last { end } else { k as f64 * step };
            SeriesPoint {
                time,
                value: display_value(params, time),
            }
        })
        .collect();

    Ok(series)
}
