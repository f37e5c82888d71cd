//! # Business Mathematics Calculations
//!
//! This module contains the five calculators. Each one follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! plus chart samplers that return plain coordinate sequences.
//!
//! ## Available Calculations
//!
//! - [`eoq`] - Economic Order Quantity
//! - [`break_even`] - Break-Even Point
//! - [`npv`] - Net Present Value and Internal Rate of Return
//! - [`regression`] - Simple linear regression
//! - [`linear_program`] - Two-variable linear programming (graphical method)
//!
//! ## Dispatch
//!
//! [`CalculationItem`] wraps any one input so a front end can hold "the
//! current request" without knowing which method it is:
//!
//! ```rust
//! use calc_core::calculations::{CalculationItem, CalculationOutput};
//!
//! let json = r#"{"method": "Eoq", "annual_demand": 1000, "order_cost": 50, "holding_cost": 2}"#;
//! let item: CalculationItem = serde_json::from_str(json).unwrap();
//!
//! match item.calculate().unwrap() {
//!     CalculationOutput::Eoq(result) => assert!((result.order_quantity - 223.61).abs() < 0.01),
//!     _ => unreachable!(),
//! }
//! ```

pub mod break_even;
pub mod eoq;
pub mod linear_program;
pub mod npv;
pub mod regression;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

// Re-export commonly used types
pub use break_even::{BreakEvenInput, BreakEvenResult};
pub use eoq::{EoqInput, EoqResult};
pub use linear_program::{LpInput, LpResult};
pub use npv::{NpvInput, NpvResult};
pub use regression::{RegressionInput, RegressionResult};

/// The five available methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Method {
    Eoq,
    BreakEven,
    NpvIrr,
    Regression,
    LinearProgram,
}

impl Method {
    /// All methods in menu order
    pub const ALL: [Method; 5] = [
        Method::Eoq,
        Method::BreakEven,
        Method::NpvIrr,
        Method::Regression,
        Method::LinearProgram,
    ];

    /// Menu label
    pub fn display_name(&self) -> &'static str {
        match self {
            Method::Eoq => "EOQ (Economic Order Quantity)",
            Method::BreakEven => "Break Even Point",
            Method::NpvIrr => "NPV & IRR",
            Method::Regression => "Linear Regression",
            Method::LinearProgram => "Linear Optimization (Graphical Method)",
        }
    }

    /// One-line description shown under the method heading
    pub fn summary(&self) -> &'static str {
        match self {
            Method::Eoq => "Order quantity that minimizes total inventory cost.",
            Method::BreakEven => "Sales volume where total revenue equals total cost.",
            Method::NpvIrr => "Discounted cash flow evaluation of an investment.",
            Method::Regression => "Least-squares line for forecasting and relationship analysis.",
            Method::LinearProgram => "Two-variable linear optimization solved graphically.",
        }
    }
}

/// Enum wrapper for all calculation inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum CalculationItem {
    Eoq(EoqInput),
    BreakEven(BreakEvenInput),
    NpvIrr(NpvInput),
    Regression(RegressionInput),
    LinearProgram(LpInput),
}

/// Result of whichever calculation ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum CalculationOutput {
    Eoq(EoqResult),
    BreakEven(BreakEvenResult),
    NpvIrr(NpvResult),
    Regression(RegressionResult),
    LinearProgram(LpResult),
}

impl CalculationItem {
    /// Which method this item runs
    pub fn method(&self) -> Method {
        match self {
            CalculationItem::Eoq(_) => Method::Eoq,
            CalculationItem::BreakEven(_) => Method::BreakEven,
            CalculationItem::NpvIrr(_) => Method::NpvIrr,
            CalculationItem::Regression(_) => Method::Regression,
            CalculationItem::LinearProgram(_) => Method::LinearProgram,
        }
    }

    /// Run the wrapped calculation.
    pub fn calculate(&self) -> CalcResult<CalculationOutput> {
        Ok(match self {
            CalculationItem::Eoq(input) => CalculationOutput::Eoq(eoq::calculate(input)?),
            CalculationItem::BreakEven(input) => {
                CalculationOutput::BreakEven(break_even::calculate(input)?)
            }
            CalculationItem::NpvIrr(input) => CalculationOutput::NpvIrr(npv::calculate(input)?),
            CalculationItem::Regression(input) => {
                CalculationOutput::Regression(regression::calculate(input)?)
            }
            CalculationItem::LinearProgram(input) => {
                CalculationOutput::LinearProgram(linear_program::calculate(input)?)
            }
        })
    }
}

impl CalculationOutput {
    /// Which method produced this output
    pub fn method(&self) -> Method {
        match self {
            CalculationOutput::Eoq(_) => Method::Eoq,
            CalculationOutput::BreakEven(_) => Method::BreakEven,
            CalculationOutput::NpvIrr(_) => Method::NpvIrr,
            CalculationOutput::Regression(_) => Method::Regression,
            CalculationOutput::LinearProgram(_) => Method::LinearProgram,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_dispatch_each_method() {
        let items = vec![
            CalculationItem::Eoq(EoqInput {
                annual_demand: 1000.0,
                order_cost: 50.0,
                holding_cost: 2.0,
            }),
            CalculationItem::BreakEven(BreakEvenInput {
                fixed_cost: 100_000.0,
                variable_cost: 5_000.0,
                price: 10_000.0,
                target_units: None,
            }),
            CalculationItem::NpvIrr(NpvInput::new(1_000_000.0, 0.1, vec![300_000.0; 5])),
            CalculationItem::Regression(RegressionInput {
                xs: vec![1.0, 2.0, 3.0],
                ys: vec![2.0, 4.0, 6.0],
                predict_x: None,
            }),
            CalculationItem::LinearProgram(LpInput::new(
                3.0,
                2.0,
                linear_program::Direction::Maximize,
                vec![linear_program::Constraint::new(1.0, 1.0, 10.0)],
            )),
        ];

        for item in &items {
            let output = item.calculate().unwrap();
            assert_eq!(output.method(), item.method());
        }
    }

    #[test]
    fn test_dispatch_propagates_errors() {
        let item = CalculationItem::Regression(RegressionInput {
            xs: vec![5.0, 5.0, 5.0],
            ys: vec![1.0, 2.0, 3.0],
            predict_x: None,
        });
        assert!(matches!(item.calculate(), Err(CalcError::DegenerateInput { .. })));
    }

    #[test]
    fn test_item_json_tagging() {
        let item = CalculationItem::BreakEven(BreakEvenInput {
            fixed_cost: 10.0,
            variable_cost: 1.0,
            price: 2.0,
            target_units: Some(20.0),
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""method":"BreakEven""#));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item, roundtrip);
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::ALL.len(), 5);
        assert_eq!(Method::NpvIrr.display_name(), "NPV & IRR");
        assert!(Method::ALL.iter().all(|m| !m.summary().is_empty()));
    }
}
