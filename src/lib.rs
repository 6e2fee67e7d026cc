//! Savings projection under two models
//!
//! - [`annuity`]: fixed monthly contribution compounding at a fixed rate
//!   (closed-form future value).
//! - [`simulation`]: continuous income/consumption/savings ODE integrated
//!   with fixed-step RK4.
//! - [`comparison`]: runs both on shared parameters, optionally seeding the
//!   annuity contribution from the [`ledger`] savings scenarios.
//!
//! Every calculation is a pure function of its inputs; independent
//! comparisons can run on separate threads (see [`comparison::sweep`]).

pub mod annuity;
pub mod comparison;
pub mod config;
pub mod error;
pub mod ledger;
pub mod simulation;

pub use annuity::{AnnuityOutcome, AnnuityParameters};
pub use comparison::{ComparisonEngine, ComparisonResult, ContributionSource};
pub use config::ScenarioConfig;
pub use error::{ConfigError, LedgerFileError, ValidationError};
pub use ledger::{Bound, ExpenseEntry, ExpenseLedger, SavingsScenarios};
pub use simulation::{OdeParameters, SimulationTrace};
