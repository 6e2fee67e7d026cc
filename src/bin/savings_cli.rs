//! Command line front end for the savings models
//!
//! ```text
//! savings_cli annuity --contribution 161 --annual-rate 0.03 --months 120
//! savings_cli simulate --years 10 --output trace.csv
//! savings_cli ledger expenses.csv --income 2061
//! savings_cli compare --config scenario.json --output report.json
//! savings_cli sweep --rates 0,0.02,0.04,0.06
//! ```

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use savings_simulator::{
    annuity::{self, AnnuityParameters},
    comparison::sweep_rates,
    ledger::{self, Bound, ExpenseLedger},
    simulation::{self, OdeParameters},
    ComparisonResult, ScenarioConfig,
};

#[derive(Parser)]
#[command(
    name = "savings_cli",
    about = "Compare a discrete annuity with a continuous savings model"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Future value of a fixed monthly contribution
    Annuity {
        #[arg(long, default_value_t = 161.0, allow_negative_numbers = true)]
        contribution: f64,
        /// Annual rate as a decimal (0.03 = 3%)
        #[arg(long, default_value_t = 0.03, allow_negative_numbers = true)]
        annual_rate: f64,
        #[arg(long, default_value_t = 120, allow_negative_numbers = true)]
        months: i64,
    },
    /// Integrate the income/consumption/savings ODE
    Simulate {
        #[command(flatten)]
        ode: OdeArgs,
        /// Write the full trace as CSV
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show expense totals and savings scenarios for a ledger CSV
    Ledger {
        /// Ledger CSV (defaults to the built-in category list)
        path: Option<PathBuf>,
        /// Override the income row
        #[arg(long)]
        income: Option<f64>,
        /// Write the default ledger to this path and exit
        #[arg(long, conflicts_with = "path")]
        init: Option<PathBuf>,
    },
    /// Run both models and report them side by side
    Compare {
        /// Scenario JSON (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the full JSON report
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Repeat the comparison across rates of return, in parallel
    Sweep {
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        rates: Vec<f64>,
    },
}

#[derive(clap::Args)]
struct OdeArgs {
    #[arg(long, default_value_t = 2061.0)]
    initial_income: f64,
    #[arg(long, default_value_t = 0.05, allow_negative_numbers = true)]
    growth: f64,
    #[arg(long, default_value_t = 50.0)]
    c0: f64,
    #[arg(long, default_value_t = 0.9)]
    c1: f64,
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    c2: f64,
    #[arg(long, default_value_t = 0.03, allow_negative_numbers = true)]
    return_rate: f64,
    #[arg(long, default_value_t = 161.0, allow_negative_numbers = true)]
    initial_savings: f64,
    #[arg(long, default_value_t = 10.0, allow_negative_numbers = true)]
    years: f64,
    #[arg(long, default_value_t = 0.1, allow_negative_numbers = true)]
    dt: f64,
}

impl From<OdeArgs> for OdeParameters {
    fn from(args: OdeArgs) -> Self {
        Self {
            initial_income: args.initial_income,
            income_growth_rate: args.growth,
            autonomous_consumption: args.c0,
            marginal_propensity_to_consume: args.c1,
            savings_consumption_effect: args.c2,
            return_rate: args.return_rate,
            initial_savings: args.initial_savings,
            horizon_years: args.years,
            step_size: args.dt,
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    scenario: &'a ScenarioConfig,
    result: &'a ComparisonResult,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Annuity { contribution, annual_rate, months } => run_annuity(AnnuityParameters {
            monthly_contribution: contribution,
            annual_rate,
            num_months: months,
        }),
        Command::Simulate { ode, output } => run_simulate(ode.into(), output),
        Command::Ledger { path, income, init } => run_ledger(path, income, init),
        Command::Compare { config, output } => run_compare(config, output),
        Command::Sweep { config, rates } => run_sweep(config, &rates),
    }
}

fn load_scenario(path: Option<PathBuf>) -> Result<ScenarioConfig> {
    match path {
        Some(path) => ScenarioConfig::from_path(&path)
            .with_context(|| format!("loading scenario {}", path.display())),
        None => Ok(ScenarioConfig::default()),
    }
}

fn run_annuity(params: AnnuityParameters) -> Result<()> {
    let outcome = annuity::future_value(&params)?;

    println!("Monthly contribution: {:>14.2}", params.monthly_contribution);
    println!("Annual rate:          {:>13.2}%", params.annual_rate * 100.0);
    println!("Months:               {:>14} ({:.1} years)", params.num_months, params.years());
    println!("Future value:         {:>14.2}", outcome.future_value);
    println!("Total contributed:    {:>14.2}", outcome.total_contributed);
    println!("Interest earned:      {:>14.2}", outcome.interest_earned);
    Ok(())
}

fn run_simulate(params: OdeParameters, output: Option<PathBuf>) -> Result<()> {
    let trace = simulation::simulate(&params)?;

    println!("{:<8} {:>14} {:>14} {:>14}", "Year", "Income", "Consumption", "Savings");
    // One row per whole year, plus the final sample
    let per_year = (1.0 / params.step_size).round().max(1.0) as usize;
    let last = trace.len() - 1;
    for (i, s) in trace.iter().enumerate() {
        if i % per_year == 0 || i == last {
            println!(
                "{:<8.2} {:>14.2} {:>14.2} {:>14.2}",
                s.time, s.income, s.consumption, s.savings
            );
        }
    }
    println!("\nFinal savings after {:.2} years: {:.2}", trace.end_time(), trace.final_savings());

    if let Some(path) = output {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        trace.write_csv(BufWriter::new(file))?;
        println!("Trace written to {}", path.display());
    }
    Ok(())
}

fn run_ledger(path: Option<PathBuf>, income: Option<f64>, init: Option<PathBuf>) -> Result<()> {
    if let Some(target) = init {
        let mut ledger = ExpenseLedger::default_categories();
        if let Some(income) = income {
            ledger.set_income(income)?;
        }
        ledger::save_ledger(&ledger, &target)?;
        println!("Default ledger written to {}", target.display());
        return Ok(());
    }

    let mut ledger = match path {
        Some(path) => ledger::load_ledger(&path)
            .with_context(|| format!("loading ledger {}", path.display()))?,
        None => ExpenseLedger::default_categories(),
    };
    if let Some(income) = income {
        ledger.set_income(income)?;
    }

    println!("{:<20} {:>12} {:>12}", "Category", "Min", "Max");
    for entry in ledger.entries() {
        println!("{:<20} {:>12.2} {:>12.2}", entry.category, entry.min_amount, entry.max_amount);
    }

    let scenarios = ledger.savings_scenarios(ledger.income());
    println!();
    println!("Total minimum expenses:          {:>12.2}", ledger.total_expenses(Bound::Min));
    println!("Total maximum expenses:          {:>12.2}", ledger.total_expenses(Bound::Max));
    println!("Savings, maximum expenses:       {:>12.2}", scenarios.max_expense_savings);
    println!("Savings, minimum expenses:       {:>12.2}", scenarios.min_expense_savings);
    Ok(())
}

fn run_compare(config: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let scenario = load_scenario(config)?;
    let result = scenario.run()?;

    let params = &result.annuity_parameters;
    println!("Model                          Final value");
    println!(
        "Discrete annuity (exact)    {:>14.2}   {:.2}/month at {:.2}% for {} months",
        result.annuity_final_value(),
        params.monthly_contribution,
        params.annual_rate * 100.0,
        params.num_months
    );
    println!(
        "Continuous model (RK4)      {:>14.2}   {:.2} years, dt = {}",
        result.ode_final_value,
        result.ode_trace.end_time(),
        scenario.ode.step_size
    );
    println!("Difference                  {:>14.2}", result.final_gap());

    if let Some(path) = output {
        let report = Report {
            generated_at: Utc::now(),
            scenario: &scenario,
            result: &result,
        };
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
        println!("Report written to {}", path.display());
    }
    Ok(())
}

fn run_sweep(config: Option<PathBuf>, rates: &[f64]) -> Result<()> {
    let scenario = load_scenario(config)?;
    let ledger = scenario.ledger()?;
    let engine = scenario.engine();
    let outcomes = sweep_rates(&engine, &ledger, &scenario.annuity, &scenario.ode, rates);

    println!("{:>8} {:>16} {:>16} {:>16}", "Rate", "Annuity FV", "ODE savings", "Difference");
    for outcome in outcomes {
        match outcome.result {
            Ok(result) => println!(
                "{:>7.2}% {:>16.2} {:>16.2} {:>16.2}",
                outcome.rate * 100.0,
                result.annuity_final_value(),
                result.ode_final_value,
                result.final_gap()
            ),
            Err(e) => println!("{:>7.2}% error: {}", outcome.rate * 100.0, e),
        }
    }
    Ok(())
}
