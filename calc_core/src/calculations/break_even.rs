//! # Break-Even Point
//!
//! Sales volume at which total revenue covers fixed plus variable cost.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::break_even::{calculate, BreakEvenInput};
//!
//! let input = BreakEvenInput {
//!     fixed_cost: 100_000.0,
//!     variable_cost: 5_000.0,
//!     price: 10_000.0,
//!     target_units: Some(100.0),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.unit_bep - 20.0).abs() < 1e-9);
//! assert!((result.revenue_bep - 200_000.0).abs() < 1e-6);
//! assert!(result.margin_of_safety.is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::formulas::{
    break_even_units, margin_of_safety_percent, total_cost, total_revenue,
};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::sampling::linspace;
use crate::units::Percent;

/// Input parameters for a break-even calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "fixed_cost": 100000.0,
///   "variable_cost": 5000.0,
///   "price": 10000.0,
///   "target_units": 100.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenInput {
    /// Fixed cost FC for the period
    pub fixed_cost: f64,

    /// Variable cost VC per unit
    pub variable_cost: f64,

    /// Selling price P per unit (must exceed the variable cost)
    pub price: f64,

    /// Planned sales volume, used for the margin of safety
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_units: Option<f64>,
}

impl BreakEvenInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("fixed_cost", self.fixed_cost)?;
        if self.fixed_cost < 0.0 {
            return Err(CalcError::invalid_parameter(
                "fixed_cost",
                self.fixed_cost.to_string(),
                "Fixed cost cannot be negative",
            ));
        }
        require_finite("variable_cost", self.variable_cost)?;
        if self.variable_cost < 0.0 {
            return Err(CalcError::invalid_parameter(
                "variable_cost",
                self.variable_cost.to_string(),
                "Variable cost cannot be negative",
            ));
        }
        require_finite("price", self.price)?;
        if self.price <= self.variable_cost {
            return Err(CalcError::invalid_parameter(
                "price",
                self.price.to_string(),
                "Price must exceed variable cost",
            ));
        }
        if let Some(target) = self.target_units {
            require_finite("target_units", target)?;
            if target < 0.0 {
                return Err(CalcError::invalid_parameter(
                    "target_units",
                    target.to_string(),
                    "Target sales cannot be negative",
                ));
            }
        }
        Ok(())
    }

    /// Contribution margin per unit, P - VC
    pub fn contribution_margin(&self) -> f64 {
        self.price - self.variable_cost
    }
}

/// Results from a break-even calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "unit_bep": 20.0,
///   "revenue_bep": 200000.0,
///   "contribution_margin": 5000.0,
///   "contribution_margin_ratio": 0.5,
///   "margin_of_safety": 80.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Break-even volume in units
    pub unit_bep: f64,

    /// Revenue at the break-even volume
    pub revenue_bep: f64,

    /// P - VC
    pub contribution_margin: f64,

    /// (P - VC) / P
    pub contribution_margin_ratio: f64,

    /// Share of target sales above break-even; absent when no target was
    /// given or the target does not exceed the break-even volume
    pub margin_of_safety: Option<Percent>,
}

/// One sample of the break-even chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostRevenuePoint {
    pub units: f64,
    pub total_cost: f64,
    pub total_revenue: f64,
}

/// Calculate the break-even point.
///
/// # Returns
///
/// * `Ok(BreakEvenResult)` - Break-even volume and revenue
/// * `Err(CalcError::InvalidParameter)` - Negative costs or price not above variable cost
pub fn calculate(input: &BreakEvenInput) -> CalcResult<BreakEvenResult> {
    input.validate()?;

    let unit_bep = break_even_units(input.fixed_cost, input.variable_cost, input.price);
    let contribution_margin = input.contribution_margin();

    Ok(BreakEvenResult {
        unit_bep,
        revenue_bep: total_revenue(input.price, unit_bep),
        contribution_margin,
        contribution_margin_ratio: contribution_margin / input.price,
        margin_of_safety: input
            .target_units
            .and_then(|target| margin_of_safety(target, unit_bep)),
    })
}

/// Margin of safety as a percentage of target sales.
///
/// Returns `None` unless `target_units > unit_bep`: below break-even there
/// is no safety margin to report.
pub fn margin_of_safety(target_units: f64, unit_bep: f64) -> Option<Percent> {
    if target_units > unit_bep {
        Some(Percent(margin_of_safety_percent(target_units, unit_bep)))
    } else {
        None
    }
}

/// Sample total cost and total revenue over `[0, unit_max]`.
pub fn sample_cost_revenue(
    input: &BreakEvenInput,
    unit_max: f64,
    steps: usize,
) -> CalcResult<Vec<CostRevenuePoint>> {
    input.validate()?;
    require_positive("unit_max", unit_max, "Chart range must be positive")?;

    let points = linspace(0.0, unit_max, steps)?
        .into_iter()
        .map(|units| CostRevenuePoint {
            units,
            total_cost: total_cost(input.fixed_cost, input.variable_cost, units),
            total_revenue: total_revenue(input.price, units),
        })
        .collect();
    Ok(points)
}
