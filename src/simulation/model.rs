//! Right-hand side of the savings ODE
//!
//! ```text
//! I(t)    = I0·e^(g·t)
//! C(t, A) = c0 + c1·I(t) − c2·A
//! dA/dt   = I(t) − C(t, A) + r·A
//! ```

use super::OdeParameters;

impl OdeParameters {
    /// Income at time `t` (years)
    pub fn income(&self, t: f64) -> f64 {
        self.initial_income * (self.income_growth_rate * t).exp()
    }

    /// Consumption at time `t` with savings `savings`
    pub fn consumption(&self, t: f64, savings: f64) -> f64 {
        self.consumption_from_income(self.income(t), savings)
    }

    pub(crate) fn consumption_from_income(&self, income: f64, savings: f64) -> f64 {
        self.autonomous_consumption + self.marginal_propensity_to_consume * income
            - self.savings_consumption_effect * savings
    }

    /// dA/dt
    pub fn savings_rate(&self, t: f64, savings: f64) -> f64 {
        let income = self.income(t);
        let consumption = self.consumption_from_income(income, savings);
        income - consumption + self.return_rate * savings
    }
}
