//! # calc_core - Business Mathematics Calculation Engine
//!
//! `calc_core` is the computational heart of Tally: five classic applied-math
//! methods for business decisions, with a clean JSON-friendly API.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, never a silently wrong number
//! - **Chart-Ready**: Samplers return plain coordinate sequences; drawing is
//!   left to the front end
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::break_even::{calculate, BreakEvenInput};
//!
//! let result = calculate(&BreakEvenInput {
//!     fixed_cost: 100_000.0,
//!     variable_cost: 5_000.0,
//!     price: 10_000.0,
//!     target_units: None,
//! })
//! .unwrap();
//!
//! assert!((result.unit_bep - 20.0).abs() < 1e-9);
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("revenue_bep"));
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The five calculators and the [`CalculationItem`] dispatcher
//! - [`equations`] - Formulas and the formula registry
//! - [`sampling`] - Evenly spaced chart samples
//! - [`settings`] - Default chart ranges
//! - [`units`] - Percent / rate wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
pub mod sampling;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput, Method};
pub use errors::{CalcError, CalcResult};
pub use settings::ChartSettings;
