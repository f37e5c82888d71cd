//! # Business Mathematics Formulas
//!
//! The raw closed-form formulas behind the five calculators. These functions
//! do no validation: the calculators in [`crate::calculations`] check their
//! inputs first and then call in here, and the chart samplers reuse the same
//! functions so plotted curves always agree with reported results.
//!
//! ## Notation
//!
//! - `D` = Annual demand (units/year)
//! - `K` = Ordering cost per order
//! - `h` = Holding cost per unit per year
//! - `Q` = Order quantity
//! - `FC` = Fixed cost, `VC` = Variable cost per unit, `P` = Price per unit
//! - `I0` = Initial investment, `CF_t` = Cash flow in period t, `r` = Rate per period
//! - `a`, `b` = Regression intercept and slope
//! - `c1`, `c2` = Objective coefficients of X1 and X2

// =============================================================================
// INVENTORY (EOQ)
// =============================================================================

/// Economic order quantity
///
/// # Formula
/// - Q* = sqrt(2DK / h)
#[inline]
pub fn eoq_quantity(demand: f64, order_cost: f64, holding_cost: f64) -> f64 {
    (2.0 * demand * order_cost / holding_cost).sqrt()
}

/// Annual ordering cost when ordering `q` units at a time
///
/// # Formula
/// - C_order = DK / Q
#[inline]
pub fn annual_ordering_cost(demand: f64, order_cost: f64, q: f64) -> f64 {
    demand * order_cost / q
}

/// Annual holding cost with an average inventory of `q / 2`
///
/// # Formula
/// - C_hold = Qh / 2
#[inline]
pub fn annual_holding_cost(q: f64, holding_cost: f64) -> f64 {
    q * holding_cost / 2.0
}

/// Total annual inventory cost
///
/// # Formula
/// - TC(Q) = DK / Q + Qh / 2
#[inline]
pub fn total_inventory_cost(demand: f64, order_cost: f64, holding_cost: f64, q: f64) -> f64 {
    annual_ordering_cost(demand, order_cost, q) + annual_holding_cost(q, holding_cost)
}

/// Number of orders placed per year
///
/// # Formula
/// - N = D / Q
#[inline]
pub fn order_frequency(demand: f64, q: f64) -> f64 {
    demand / q
}

// =============================================================================
// BREAK-EVEN
// =============================================================================

/// Break-even volume in units
///
/// # Formula
/// - BEP_unit = FC / (P - VC)
#[inline]
pub fn break_even_units(fixed_cost: f64, variable_cost: f64, price: f64) -> f64 {
    fixed_cost / (price - variable_cost)
}

/// Total cost of producing `units`
///
/// # Formula
/// - TC = FC + VC * units
#[inline]
pub fn total_cost(fixed_cost: f64, variable_cost: f64, units: f64) -> f64 {
    fixed_cost + variable_cost * units
}

/// Total revenue from selling `units`
///
/// # Formula
/// - TR = P * units
#[inline]
pub fn total_revenue(price: f64, units: f64) -> f64 {
    price * units
}

/// Margin of safety in percent of target volume
///
/// # Formula
/// - MoS = (target - BEP_unit) / target * 100
///
/// Only meaningful when `target > bep_units`.
#[inline]
pub fn margin_of_safety_percent(target_units: f64, bep_units: f64) -> f64 {
    (target_units - bep_units) / target_units * 100.0
}

// =============================================================================
// DISCOUNTED CASH FLOW
// =============================================================================

/// Present value factor for period `t`
///
/// # Formula
/// - DF_t = 1 / (1 + r)^t
#[inline]
pub fn discount_factor(rate: f64, period: i32) -> f64 {
    1.0 / (1.0 + rate).powi(period)
}

/// Net present value of cash flows received at the end of periods 1..n
///
/// # Formula
/// - NPV = -I0 + sum_{t=1..n} CF_t / (1 + r)^t
pub fn net_present_value(rate: f64, initial_investment: f64, cash_flows: &[f64]) -> f64 {
    cash_flows
        .iter()
        .zip(1..)
        .fold(-initial_investment, |npv, (cf, t)| {
            npv + cf * discount_factor(rate, t)
        })
}

// =============================================================================
// LINES
// =============================================================================

/// Point on a straight line
///
/// # Formula
/// - y = a + bx
#[inline]
pub fn line_value(intercept: f64, slope: f64, x: f64) -> f64 {
    intercept + slope * x
}

/// Linear objective value
///
/// # Formula
/// - Z = c1 X1 + c2 X2
#[inline]
pub fn objective_value(c1: f64, c2: f64, x1: f64, x2: f64) -> f64 {
    c1 * x1 + c2 * x2
}
