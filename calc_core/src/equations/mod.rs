//! # Business Mathematics Equations
//!
//! This module contains the formulas behind every calculator. Having them in
//! one place keeps the reported results, the chart samplers and the formula
//! reference sheet in agreement.
//!
//! ## Modules
//!
//! - [`formulas`] - Closed-form formulas as plain `f64` functions
//! - [`registry`] - Equation metadata (formula text, variable legend, source)

pub mod formulas;
pub mod registry;

// Re-export commonly used items
pub use formulas::{
    annual_holding_cost,
    annual_ordering_cost,
    break_even_units,
    discount_factor,
    eoq_quantity,
    line_value,
    margin_of_safety_percent,
    net_present_value,
    objective_value,
    order_frequency,
    total_cost,
    total_inventory_cost,
    total_revenue,
};

pub use registry::{
    Equation,
    EquationMetadata,
    Variable,
    ALL_EQUATIONS,
    equations_for,
    format_method_formulas,
    generate_equations_markdown,
};
