//! # Economic Order Quantity
//!
//! Finds the order size that minimizes the sum of annual ordering cost and
//! annual holding cost for a constant, known demand.
//!
//! ## Assumptions
//!
//! - Demand is constant over the year
//! - Orders arrive instantly (no lead time, no stock-outs)
//! - Ordering cost per order and holding cost per unit are fixed
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::eoq::{calculate, EoqInput};
//!
//! let input = EoqInput {
//!     annual_demand: 1000.0,
//!     order_cost: 50.0,
//!     holding_cost: 2.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.order_quantity - 223.61).abs() < 0.01);
//! assert!((result.total_cost - 447.21).abs() < 0.01);
//! assert!((result.order_frequency - 4.47).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::equations::formulas::{
    annual_holding_cost, annual_ordering_cost, eoq_quantity, order_frequency,
    total_inventory_cost,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::sampling::linspace;

/// Days used to turn order frequency into a cycle length
const DAYS_PER_YEAR: f64 = 365.0;

/// Input parameters for an EOQ calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "annual_demand": 1000.0,
///   "order_cost": 50.0,
///   "holding_cost": 2.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EoqInput {
    /// Annual demand D in units per year
    pub annual_demand: f64,

    /// Cost K of placing one order
    pub order_cost: f64,

    /// Cost h of holding one unit in stock for a year
    pub holding_cost: f64,
}

impl EoqInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive(
            "annual_demand",
            self.annual_demand,
            "Annual demand must be positive",
        )?;
        require_positive("order_cost", self.order_cost, "Ordering cost must be positive")?;
        require_positive(
            "holding_cost",
            self.holding_cost,
            "Holding cost must be positive",
        )?;
        Ok(())
    }

    /// Total annual cost of ordering `q` units at a time
    pub fn total_cost_at(&self, q: f64) -> f64 {
        total_inventory_cost(self.annual_demand, self.order_cost, self.holding_cost, q)
    }
}

/// Results from an EOQ calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "order_quantity": 223.61,
///   "total_cost": 447.21,
///   "order_frequency": 4.47,
///   "annual_ordering_cost": 223.61,
///   "annual_holding_cost": 223.61,
///   "cycle_days": 81.62
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EoqResult {
    /// Optimal order quantity Q*
    pub order_quantity: f64,

    /// Total annual inventory cost at Q*
    pub total_cost: f64,

    /// Orders placed per year at Q*
    pub order_frequency: f64,

    /// Annual ordering cost at Q*
    pub annual_ordering_cost: f64,

    /// Annual holding cost at Q* (equal to the ordering cost at the optimum)
    pub annual_holding_cost: f64,

    /// Days between orders
    pub cycle_days: f64,
}

/// One sample of the EOQ cost chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostCurvePoint {
    /// Order quantity Q
    pub quantity: f64,
    /// Annual ordering cost DK/Q
    pub ordering_cost: f64,
    /// Annual holding cost Qh/2
    pub holding_cost: f64,
    /// Sum of both
    pub total_cost: f64,
}

/// Calculate the economic order quantity.
///
/// # Returns
///
/// * `Ok(EoqResult)` - Optimal quantity and the costs at that quantity
/// * `Err(CalcError::InvalidParameter)` - If any input is not positive, or the
///   inputs are so extreme that the results overflow
pub fn calculate(input: &EoqInput) -> CalcResult<EoqResult> {
    input.validate()?;

    let q = eoq_quantity(input.annual_demand, input.order_cost, input.holding_cost);
    let ordering = annual_ordering_cost(input.annual_demand, input.order_cost, q);
    let holding = annual_holding_cost(q, input.holding_cost);
    let frequency = order_frequency(input.annual_demand, q);

    let result = EoqResult {
        order_quantity: q,
        total_cost: ordering + holding,
        order_frequency: frequency,
        annual_ordering_cost: ordering,
        annual_holding_cost: holding,
        cycle_days: DAYS_PER_YEAR / frequency,
    };

    let values = [
        result.order_quantity,
        result.total_cost,
        result.order_frequency,
        result.cycle_days,
    ];
    if values.iter().any(|v| !v.is_finite()) {
        return Err(CalcError::invalid_parameter(
            "annual_demand",
            input.annual_demand.to_string(),
            "Inputs are too large or too small to compute a finite order quantity",
        ));
    }
    Ok(result)
}

/// Sample the ordering, holding and total cost curves over `[q_min, q_max]`.
///
/// # Errors
///
/// `InvalidParameter` for invalid EOQ inputs, a non-positive `q_min`,
/// `q_max <= q_min`, or fewer than 2 steps.
pub fn sample_cost_curve(
    input: &EoqInput,
    q_min: f64,
    q_max: f64,
    steps: usize,
) -> CalcResult<Vec<CostCurvePoint>> {
    input.validate()?;
    require_positive("q_min", q_min, "Smallest order quantity must be positive")?;
    if q_max.is_nan() || q_max <= q_min {
        return Err(CalcError::invalid_parameter(
            "q_max",
            q_max.to_string(),
            "Largest order quantity must exceed the smallest",
        ));
    }

    let points = linspace(q_min, q_max, steps)?
        .into_iter()
        .map(|q| {
            let ordering_cost = annual_ordering_cost(input.annual_demand, input.order_cost, q);
            let holding_cost = annual_holding_cost(q, input.holding_cost);
            CostCurvePoint {
                quantity: q,
                ordering_cost,
                holding_cost,
                total_cost: ordering_cost + holding_cost,
            }
        })
        .collect();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_input() -> EoqInput {
        EoqInput {
            annual_demand: 1000.0,
            order_cost: 50.0,
            holding_cost: 2.0,
        }
    }

    #[test]
    fn test_textbook_example() {
        let result = calculate(&test_input()).unwrap();
        // Q* = sqrt(2 * 1000 * 50 / 2) = 223.61
        assert!((result.order_quantity - 223.61).abs() < 0.01);
        assert!((result.total_cost - 447.21).abs() < 0.01);
        assert!((result.order_frequency - 4.47).abs() < 0.01);
        assert!((result.cycle_days - 81.62).abs() < 0.01);
    }

    #[test]
    fn test_costs_balance_at_optimum() {
        let result = calculate(&test_input()).unwrap();
        assert!((result.annual_ordering_cost - result.annual_holding_cost).abs() < 1e-9);
    }

    #[test]
    fn test_optimum_beats_sampled_quantities() {
        let input = test_input();
        let result = calculate(&input).unwrap();
        let curve = sample_cost_curve(&input, 50.0, 500.0, 100).unwrap();
        for point in &curve {
            assert!(result.total_cost <= point.total_cost + 1e-9);
        }
    }

    #[test]
    fn test_cost_curve_shape() {
        let curve = sample_cost_curve(&test_input(), 50.0, 500.0, 100).unwrap();
        assert_eq!(curve.len(), 100);
        assert_eq!(curve[0].quantity, 50.0);
        assert_eq!(curve[99].quantity, 500.0);
        // Ordering cost falls and holding cost rises with Q
        assert!(curve[0].ordering_cost > curve[99].ordering_cost);
        assert!(curve[0].holding_cost < curve[99].holding_cost);
        let first = curve[0];
        assert!((first.total_cost - (first.ordering_cost + first.holding_cost)).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut input = test_input();
        input.annual_demand = 0.0;
        assert!(matches!(
            calculate(&input),
            Err(CalcError::InvalidParameter { .. })
        ));

        let mut input = test_input();
        input.order_cost = -10.0;
        assert!(calculate(&input).is_err());

        let mut input = test_input();
        input.holding_cost = f64::NAN;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_overflow_rejected() {
        let input = EoqInput {
            annual_demand: 1e300,
            order_cost: 1e300,
            holding_cost: 1.0,
        };
        match calculate(&input) {
            Err(CalcError::InvalidParameter { field, .. }) => assert_eq!(field, "annual_demand"),
            other => panic!("Expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_curve_range() {
        let input = test_input();
        assert!(sample_cost_curve(&input, 0.0, 500.0, 100).is_err());
        assert!(sample_cost_curve(&input, 500.0, 50.0, 100).is_err());
        assert!(sample_cost_curve(&input, 50.0, 500.0, 1).is_err());
    }

    #[test]
    fn test_idempotent() {
        let input = test_input();
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }

    #[test]
    fn test_serialization() {
        let input = test_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        assert!(json.contains("annual_demand"));
        let roundtrip: EoqInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
