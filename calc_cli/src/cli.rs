//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use calc_core::calculations::linear_program::Constraint;
use calc_core::Method;

/// Tally - business math calculators from the terminal
#[derive(Parser, Debug)]
#[command(name = "calc_cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Chart settings file (JSON)
    #[arg(long, global = true, env = "CALC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log solver progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Economic order quantity
    Eoq(EoqArgs),

    /// Break-even point
    Bep(BepArgs),

    /// Net present value and internal rate of return
    Npv(NpvArgs),

    /// Simple linear regression
    Regression(RegressionArgs),

    /// Two-variable linear program, graphical method
    Lp(LpArgs),

    /// Run a JSON calculation request
    Run {
        /// File holding one request, e.g. {"method": "Eoq", ...}
        file: PathBuf,
    },

    /// Print the formulas behind each method
    Formulas {
        /// Only this method
        #[arg(value_enum)]
        method: Option<MethodArg>,

        /// Write the sheet to this file instead of stdout (e.g. EQUATIONS.md)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Step through a method with prompts
    Interactive,
}

/// Arguments for the eoq command.
#[derive(Args, Debug)]
pub struct EoqArgs {
    /// Annual demand (D)
    #[arg(long)]
    pub demand: f64,

    /// Cost per order (K)
    #[arg(long)]
    pub order_cost: f64,

    /// Holding cost per unit per year (h)
    #[arg(long)]
    pub holding_cost: f64,

    /// Also print the sampled cost curve
    #[arg(long)]
    pub chart: bool,
}

/// Arguments for the bep command.
#[derive(Args, Debug)]
pub struct BepArgs {
    /// Fixed cost (FC)
    #[arg(long)]
    pub fixed_cost: f64,

    /// Variable cost per unit (VC)
    #[arg(long)]
    pub variable_cost: f64,

    /// Selling price per unit (P)
    #[arg(long)]
    pub price: f64,

    /// Target sales for the margin of safety
    #[arg(long)]
    pub target_units: Option<f64>,

    /// Also print sampled cost and revenue lines
    #[arg(long)]
    pub chart: bool,
}

/// Arguments for the npv command.
#[derive(Args, Debug)]
pub struct NpvArgs {
    /// Initial investment (I0)
    #[arg(long)]
    pub investment: f64,

    /// Discount rate as a percentage, e.g. 10 for 10%
    #[arg(long)]
    pub rate_percent: f64,

    /// Cash flow per period, in order (repeat or comma-separate)
    #[arg(
        long = "cash-flow",
        required = true,
        value_delimiter = ',',
        allow_negative_numbers = true
    )]
    pub cash_flows: Vec<f64>,

    /// Lower end of the IRR search bracket (fraction)
    #[arg(long, allow_negative_numbers = true)]
    pub irr_low: Option<f64>,

    /// Upper end of the IRR search bracket (fraction)
    #[arg(long)]
    pub irr_high: Option<f64>,

    /// IRR iteration budget
    #[arg(long)]
    pub irr_iterations: Option<u32>,

    /// Stop the IRR search once |NPV| is below this
    #[arg(long)]
    pub irr_tolerance: Option<f64>,
}

/// Arguments for the regression command.
#[derive(Args, Debug)]
pub struct RegressionArgs {
    /// X samples (repeat or comma-separate)
    #[arg(
        long = "x",
        value_delimiter = ',',
        allow_negative_numbers = true,
        required_unless_present = "csv",
        requires = "ys"
    )]
    pub xs: Vec<f64>,

    /// Y samples, same count as X
    #[arg(
        long = "y",
        value_delimiter = ',',
        allow_negative_numbers = true,
        requires = "xs"
    )]
    pub ys: Vec<f64>,

    /// Read x,y samples from a CSV file instead
    #[arg(long, conflicts_with_all = ["xs", "ys"])]
    pub csv: Option<PathBuf>,

    /// Forecast Y at this X
    #[arg(long, allow_negative_numbers = true)]
    pub predict: Option<f64>,

    /// Also print the sampled fitted line
    #[arg(long)]
    pub chart: bool,
}

/// Arguments for the lp command.
#[derive(Args, Debug)]
pub struct LpArgs {
    /// Objective coefficient of X1
    #[arg(long, allow_negative_numbers = true)]
    pub c1: f64,

    /// Objective coefficient of X2
    #[arg(long, allow_negative_numbers = true)]
    pub c2: f64,

    /// Minimize instead of maximize
    #[arg(long)]
    pub minimize: bool,

    /// Constraint a1·X1 + a2·X2 <= b, written a1,a2,b (repeat up to 5 times)
    #[arg(
        long = "constraint",
        required = true,
        allow_hyphen_values = true,
        value_parser = parse_constraint
    )]
    pub constraints: Vec<Constraint>,

    /// Right edge of the plot window
    #[arg(long)]
    pub x_max: Option<f64>,

    /// Top edge of the plot window
    #[arg(long)]
    pub y_max: Option<f64>,

    /// Also print the sampled lines and feasible region
    #[arg(long)]
    pub chart: bool,
}

/// Method selector for `formulas`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Eoq,
    Bep,
    Npv,
    Regression,
    Lp,
}

impl From<MethodArg> for Method {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Eoq => Method::Eoq,
            MethodArg::Bep => Method::BreakEven,
            MethodArg::Npv => Method::NpvIrr,
            MethodArg::Regression => Method::Regression,
            MethodArg::Lp => Method::LinearProgram,
        }
    }
}

/// Parse `a1,a2,b` into a constraint.
pub fn parse_constraint(s: &str) -> Result<Constraint, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected a1,a2,b but got '{}'", s));
    }

    let mut values = [0.0; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", part))?;
    }
    Ok(Constraint::new(values[0], values[1], values[2]))
}
