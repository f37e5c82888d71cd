//! # Net Present Value & Internal Rate of Return
//!
//! Discounted cash flow evaluation of an investment: the NPV at a given
//! discount rate and the IRR, the rate at which NPV reaches zero.
//!
//! ## Assumptions
//!
//! - The initial investment is paid at t = 0
//! - Cash flow `t` (1-based) arrives at the end of period `t`
//! - The IRR search uses bisection on a bracket where NPV changes sign.
//!   For conventional projects (outflow first, inflows after) NPV falls as
//!   the rate rises, so there is a single root inside the bracket.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::npv::{calculate, NpvInput};
//!
//! let input = NpvInput::new(1_000_000.0, 0.10, vec![300_000.0; 5]);
//! let result = calculate(&input).unwrap();
//!
//! assert!((result.npv - 137_236.03).abs() < 1.0);
//! assert!(result.npv_viable);
//!
//! let irr = result.irr.unwrap();
//! assert!((irr.rate - 0.1524).abs() < 1e-3);
//! assert!(result.irr_viable);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::equations::formulas::net_present_value;
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::units::{Percent, Rate};

/// Most cash flow periods accepted
pub const MAX_PERIODS: usize = 20;

/// Default lower bound of the IRR search bracket
pub const DEFAULT_IRR_LOW: f64 = 0.01;

/// Default upper bound of the IRR search bracket
pub const DEFAULT_IRR_HIGH: f64 = 1.0;

/// Default iteration budget for the IRR search
pub const DEFAULT_IRR_ITERATIONS: u32 = 100;

/// Default |NPV| below which the IRR search stops, in currency units
pub const DEFAULT_IRR_TOLERANCE: f64 = 1.0;

/// NPV magnitude treated as exactly zero for the decision label
const MARGINAL_NPV: f64 = 0.005;

/// Bisection settings for the IRR search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrConfig {
    /// Lower rate of the search bracket (fraction)
    pub low: f64,
    /// Upper rate of the search bracket (fraction)
    pub high: f64,
    /// Iteration budget
    pub max_iterations: u32,
    /// Stop once |NPV(mid)| falls below this
    pub tolerance: f64,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_IRR_LOW,
            high: DEFAULT_IRR_HIGH,
            max_iterations: DEFAULT_IRR_ITERATIONS,
            tolerance: DEFAULT_IRR_TOLERANCE,
        }
    }
}

impl IrrConfig {
    /// Validate solver settings.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("irr.low", self.low)?;
        require_finite("irr.high", self.high)?;
        if self.low <= -1.0 {
            return Err(CalcError::invalid_parameter(
                "irr.low",
                self.low.to_string(),
                "Rate must be greater than -100%",
            ));
        }
        if self.high <= self.low {
            return Err(CalcError::invalid_parameter(
                "irr.high",
                self.high.to_string(),
                "Upper bracket rate must exceed the lower one",
            ));
        }
        if self.max_iterations == 0 {
            return Err(CalcError::invalid_parameter(
                "irr.max_iterations",
                "0",
                "At least one iteration is required",
            ));
        }
        require_positive("irr.tolerance", self.tolerance, "Tolerance must be positive")
    }
}

/// Input parameters for an NPV / IRR evaluation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "initial_investment": 1000000.0,
///   "discount_rate": 0.10,
///   "cash_flows": [300000.0, 300000.0, 300000.0, 300000.0, 300000.0]
/// }
/// ```
///
/// `irr` may be added to override the search bracket; omitted fields use
/// the defaults (0.01..1.0, 100 iterations, tolerance 1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvInput {
    /// Investment I0 paid up front
    pub initial_investment: f64,

    /// Discount rate r per period as a fraction, 0 < r <= 1
    pub discount_rate: f64,

    /// Cash flows CF_1..CF_n, 1 <= n <= 20
    pub cash_flows: Vec<f64>,

    /// IRR solver settings
    #[serde(default)]
    pub irr: IrrConfig,
}

impl NpvInput {
    /// Create an input with the default IRR search settings.
    pub fn new(initial_investment: f64, discount_rate: f64, cash_flows: Vec<f64>) -> Self {
        Self {
            initial_investment,
            discount_rate,
            cash_flows,
            irr: IrrConfig::default(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        validate_investment(self.initial_investment, &self.cash_flows)?;
        require_finite("discount_rate", self.discount_rate)?;
        if self.discount_rate <= 0.0 || self.discount_rate > 1.0 {
            return Err(CalcError::invalid_parameter(
                "discount_rate",
                self.discount_rate.to_string(),
                "Discount rate must be between 0 (exclusive) and 1 (100%)",
            ));
        }
        self.irr.validate()
    }

    /// Discount rate in percent
    pub fn discount_rate_percent(&self) -> Percent {
        Rate(self.discount_rate).into()
    }
}

fn validate_investment(initial_investment: f64, cash_flows: &[f64]) -> CalcResult<()> {
    require_finite("initial_investment", initial_investment)?;
    if initial_investment < 0.0 {
        return Err(CalcError::invalid_parameter(
            "initial_investment",
            initial_investment.to_string(),
            "Initial investment cannot be negative",
        ));
    }
    if cash_flows.is_empty() || cash_flows.len() > MAX_PERIODS {
        return Err(CalcError::invalid_parameter(
            "cash_flows",
            format!("{} periods", cash_flows.len()),
            format!("Between 1 and {} cash flow periods are required", MAX_PERIODS),
        ));
    }
    for (i, cf) in cash_flows.iter().enumerate() {
        require_finite(&format!("cash_flows[{}]", i), *cf)?;
    }
    Ok(())
}

/// Investment verdict from the sign of NPV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NpvDecision {
    /// NPV > 0: the project earns more than the discount rate
    Viable,
    /// NPV = 0: the project earns exactly the discount rate
    Marginal,
    /// NPV < 0: the project destroys value at this rate
    NotViable,
}

impl NpvDecision {
    /// Classify an NPV value.
    pub fn from_npv(npv: f64) -> Self {
        if npv > MARGINAL_NPV {
            NpvDecision::Viable
        } else if npv < -MARGINAL_NPV {
            NpvDecision::NotViable
        } else {
            NpvDecision::Marginal
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            NpvDecision::Viable => "Viable (NPV > 0)",
            NpvDecision::Marginal => "Marginal (NPV = 0)",
            NpvDecision::NotViable => "Not viable (NPV < 0)",
        }
    }
}

/// Outcome of the IRR bisection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IrrEstimate {
    /// Estimated IRR as a fraction (final midpoint of the bracket)
    pub rate: f64,

    /// NPV evaluated at `rate`
    pub residual_npv: f64,

    /// Bisection steps taken
    pub iterations: u32,

    /// Whether |residual_npv| fell below the tolerance before the budget ran out
    pub converged: bool,
}

impl IrrEstimate {
    /// IRR in percent
    pub fn rate_percent(&self) -> Percent {
        Rate(self.rate).into()
    }
}

/// Results from an NPV / IRR evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NpvResult {
    /// Net present value at the discount rate
    pub npv: f64,

    /// NPV > 0
    pub npv_viable: bool,

    /// Three-way verdict on NPV
    pub decision: NpvDecision,

    /// IRR estimate; `None` when the search bracket holds no sign change
    pub irr: Option<IrrEstimate>,

    /// IRR > discount rate (false when no IRR was found)
    pub irr_viable: bool,
}

/// Net present value: NPV = -I0 + sum CF_t / (1 + r)^t.
pub fn compute_npv(initial_investment: f64, rate: f64, cash_flows: &[f64]) -> f64 {
    net_present_value(rate, initial_investment, cash_flows)
}

/// Estimate the IRR by bisection.
///
/// NPV is first evaluated at both ends of the bracket. If the two values
/// share a sign there is no root to bisect toward and the search fails
/// with [`CalcError::NoSignChange`]. Otherwise each step evaluates NPV at
/// the midpoint and keeps the half whose ends still straddle zero, stopping
/// as soon as |NPV(mid)| < `tolerance` or after `max_iterations` steps.
/// The last midpoint is returned.
///
/// # Example
///
/// ```rust
/// use calc_core::calculations::npv::{compute_irr, IrrConfig};
///
/// let irr = compute_irr(1_000.0, &[1_200.0], &IrrConfig::default()).unwrap();
/// assert!((irr.rate - 0.20).abs() < 1e-3);
/// ```
pub fn compute_irr(
    initial_investment: f64,
    cash_flows: &[f64],
    config: &IrrConfig,
) -> CalcResult<IrrEstimate> {
    validate_investment(initial_investment, cash_flows)?;
    config.validate()?;

    let npv_at = |rate: f64| net_present_value(rate, initial_investment, cash_flows);

    let mut low = config.low;
    let mut high = config.high;
    let mut npv_low = npv_at(low);
    let npv_high = npv_at(high);
    debug!(low, high, npv_low, npv_high, "IRR bracket evaluated");

    if npv_low * npv_high > 0.0 {
        return Err(CalcError::no_sign_change(low, high, npv_low, npv_high));
    }
    // A bracket end that is already a root needs no search
    if let Some((rate, residual)) = [(low, npv_low), (high, npv_high)]
        .into_iter()
        .find(|&(_, npv)| npv == 0.0)
    {
        debug!(rate, "IRR found at bracket end");
        return Ok(IrrEstimate {
            rate,
            residual_npv: residual,
            iterations: 0,
            converged: true,
        });
    }

    let mut mid = (low + high) / 2.0;
    let mut npv_mid = npv_at(mid);
    let mut iterations = 1;
    loop {
        trace!(iterations, mid, npv_mid, "IRR bisection step");
        if npv_mid.abs() < config.tolerance {
            debug!(rate = mid, iterations, "IRR converged");
            return Ok(IrrEstimate {
                rate: mid,
                residual_npv: npv_mid,
                iterations,
                converged: true,
            });
        }
        if iterations >= config.max_iterations {
            break;
        }

        if npv_mid * npv_low > 0.0 {
            low = mid;
            npv_low = npv_mid;
        } else {
            high = mid;
        }
        mid = (low + high) / 2.0;
        npv_mid = npv_at(mid);
        iterations += 1;
    }

    debug!(rate = mid, residual = npv_mid, "IRR iteration budget exhausted");
    Ok(IrrEstimate {
        rate: mid,
        residual_npv: npv_mid,
        iterations,
        converged: false,
    })
}

/// Evaluate NPV, the IRR and both viability flags.
///
/// A missing sign change in the IRR bracket does not fail the whole
/// evaluation: the NPV is still reported, `irr` is `None` and
/// `irr_viable` is false. Call [`compute_irr`] directly to get the
/// [`CalcError::NoSignChange`] error itself.
pub fn calculate(input: &NpvInput) -> CalcResult<NpvResult> {
    input.validate()?;

    let npv = compute_npv(input.initial_investment, input.discount_rate, &input.cash_flows);

    let irr = match compute_irr(input.initial_investment, &input.cash_flows, &input.irr) {
        Ok(estimate) => Some(estimate),
        Err(err @ CalcError::NoSignChange { .. }) => {
            debug!(%err, "IRR unavailable");
            None
        }
        Err(err) => return Err(err),
    };
    let irr_viable = irr.is_some_and(|estimate| estimate.rate > input.discount_rate);

    Ok(NpvResult {
        npv,
        npv_viable: npv > 0.0,
        decision: NpvDecision::from_npv(npv),
        irr,
        irr_viable,
    })
}
