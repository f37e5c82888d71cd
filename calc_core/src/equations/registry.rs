//! # Equation Registry
//!
//! Central registry of every formula the calculators use. Each equation has
//! a plain-text formula, a legend of its variables and a pointer to the code
//! implementing it, so a front end can show "the formula behind the number"
//! next to each result.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::calculations::Method;
//! use calc_core::equations::registry::{equations_for, Equation};
//!
//! let meta = Equation::EconomicOrderQuantity.metadata();
//! assert_eq!(meta.formula_plain, "EOQ = sqrt(2DK / h)");
//!
//! assert!(equations_for(Method::NpvIrr).contains(&Equation::NetPresentValue));
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::Method;

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Variable {
    /// Symbol (e.g., "D", "K", "CF_t")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str) -> Self {
        Self { symbol, description }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone, Serialize)]
pub struct EquationMetadata {
    /// Human-readable name (e.g., "Economic Order Quantity")
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Variable legend
    pub variables: Vec<Variable>,
    /// Method the formula belongs to
    pub method: Method,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All formulas used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Inventory
    // -------------------------------------------------------------------------
    /// EOQ = sqrt(2DK/h)
    EconomicOrderQuantity,
    /// TC = DK/Q + Qh/2
    TotalInventoryCost,
    /// N = D/Q
    OrderFrequency,

    // -------------------------------------------------------------------------
    // Break-even
    // -------------------------------------------------------------------------
    /// BEP_unit = FC / (P - VC)
    BreakEvenUnits,
    /// BEP_revenue = BEP_unit * P
    BreakEvenRevenue,
    /// MoS = (target - BEP_unit) / target * 100
    MarginOfSafety,

    // -------------------------------------------------------------------------
    // Discounted cash flow
    // -------------------------------------------------------------------------
    /// NPV = -I0 + sum CF_t / (1+r)^t
    NetPresentValue,
    /// NPV(IRR) = 0
    InternalRateOfReturn,

    // -------------------------------------------------------------------------
    // Regression
    // -------------------------------------------------------------------------
    /// Y = a + bX
    RegressionLine,
    /// b = (nΣXY - ΣXΣY) / (nΣX² - (ΣX)²)
    RegressionSlope,
    /// a = (ΣY - bΣX) / n
    RegressionIntercept,
    /// Pearson r
    CorrelationCoefficient,

    // -------------------------------------------------------------------------
    // Linear programming
    // -------------------------------------------------------------------------
    /// Z = c1 X1 + c2 X2
    LinearObjective,
    /// a1 X1 + a2 X2 <= b
    LinearConstraint,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::EconomicOrderQuantity => EquationMetadata {
                name: "Economic Order Quantity",
                description: "Order size that balances annual ordering and holding cost",
                formula_plain: "EOQ = sqrt(2DK / h)",
                variables: vec![
                    Variable::new("D", "Annual demand"),
                    Variable::new("K", "Ordering cost per order"),
                    Variable::new("h", "Holding cost per unit per year"),
                ],
                method: Method::Eoq,
                source_module: "equations/formulas.rs",
                source_function: "eoq_quantity",
            },

            Equation::TotalInventoryCost => EquationMetadata {
                name: "Total Inventory Cost",
                description: "Annual ordering cost plus annual holding cost for order size Q",
                formula_plain: "TC = DK / Q + Qh / 2",
                variables: vec![
                    Variable::new("Q", "Order quantity"),
                    Variable::new("D", "Annual demand"),
                    Variable::new("K", "Ordering cost per order"),
                    Variable::new("h", "Holding cost per unit per year"),
                ],
                method: Method::Eoq,
                source_module: "equations/formulas.rs",
                source_function: "total_inventory_cost",
            },

            Equation::OrderFrequency => EquationMetadata {
                name: "Order Frequency",
                description: "Number of orders placed per year",
                formula_plain: "N = D / Q",
                variables: vec![
                    Variable::new("N", "Orders per year"),
                    Variable::new("D", "Annual demand"),
                    Variable::new("Q", "Order quantity"),
                ],
                method: Method::Eoq,
                source_module: "equations/formulas.rs",
                source_function: "order_frequency",
            },

            Equation::BreakEvenUnits => EquationMetadata {
                name: "Break-Even Point (Units)",
                description: "Units to sell before revenue covers fixed and variable cost",
                formula_plain: "BEP_unit = FC / (P - VC)",
                variables: vec![
                    Variable::new("FC", "Fixed cost"),
                    Variable::new("P", "Selling price per unit"),
                    Variable::new("VC", "Variable cost per unit"),
                ],
                method: Method::BreakEven,
                source_module: "equations/formulas.rs",
                source_function: "break_even_units",
            },

            Equation::BreakEvenRevenue => EquationMetadata {
                name: "Break-Even Point (Revenue)",
                description: "Revenue earned at the break-even volume",
                formula_plain: "BEP_revenue = BEP_unit * P",
                variables: vec![
                    Variable::new("BEP_unit", "Break-even volume"),
                    Variable::new("P", "Selling price per unit"),
                ],
                method: Method::BreakEven,
                source_module: "calculations/break_even.rs",
                source_function: "calculate",
            },

            Equation::MarginOfSafety => EquationMetadata {
                name: "Margin of Safety",
                description: "Share of planned sales that could be lost before reaching break-even",
                formula_plain: "MoS = (target - BEP_unit) / target * 100%",
                variables: vec![
                    Variable::new("target", "Planned sales volume (must exceed BEP_unit)"),
                    Variable::new("BEP_unit", "Break-even volume"),
                ],
                method: Method::BreakEven,
                source_module: "equations/formulas.rs",
                source_function: "margin_of_safety_percent",
            },

            Equation::NetPresentValue => EquationMetadata {
                name: "Net Present Value",
                description: "Discounted sum of future cash flows minus the initial investment",
                formula_plain: "NPV = -I0 + sum_{t=1..n} CF_t / (1 + r)^t",
                variables: vec![
                    Variable::new("I0", "Initial investment"),
                    Variable::new("CF_t", "Cash flow in year t"),
                    Variable::new("r", "Discount rate"),
                    Variable::new("n", "Number of years"),
                ],
                method: Method::NpvIrr,
                source_module: "equations/formulas.rs",
                source_function: "net_present_value",
            },

            Equation::InternalRateOfReturn => EquationMetadata {
                name: "Internal Rate of Return",
                description: "Discount rate at which NPV is zero, found by bisection",
                formula_plain: "0 = -I0 + sum_{t=1..n} CF_t / (1 + IRR)^t",
                variables: vec![
                    Variable::new("IRR", "Internal rate of return"),
                    Variable::new("I0", "Initial investment"),
                    Variable::new("CF_t", "Cash flow in year t"),
                ],
                method: Method::NpvIrr,
                source_module: "calculations/npv.rs",
                source_function: "compute_irr",
            },

            Equation::RegressionLine => EquationMetadata {
                name: "Regression Line",
                description: "Fitted straight line used for forecasting",
                formula_plain: "Y = a + bX",
                variables: vec![
                    Variable::new("a", "Intercept"),
                    Variable::new("b", "Slope"),
                ],
                method: Method::Regression,
                source_module: "equations/formulas.rs",
                source_function: "line_value",
            },

            Equation::RegressionSlope => EquationMetadata {
                name: "Regression Slope",
                description: "Least-squares slope",
                formula_plain: "b = (n*sum(XY) - sum(X)*sum(Y)) / (n*sum(X^2) - sum(X)^2)",
                variables: vec![
                    Variable::new("n", "Number of samples"),
                    Variable::new("X, Y", "Paired samples"),
                ],
                method: Method::Regression,
                source_module: "calculations/regression.rs",
                source_function: "fit",
            },

            Equation::RegressionIntercept => EquationMetadata {
                name: "Regression Intercept",
                description: "Least-squares intercept",
                formula_plain: "a = (sum(Y) - b*sum(X)) / n",
                variables: vec![
                    Variable::new("b", "Slope"),
                    Variable::new("n", "Number of samples"),
                ],
                method: Method::Regression,
                source_module: "calculations/regression.rs",
                source_function: "fit",
            },

            Equation::CorrelationCoefficient => EquationMetadata {
                name: "Correlation Coefficient",
                description: "Strength of the linear relationship; r^2 is the coefficient of determination",
                formula_plain: "r = (n*sum(XY) - sum(X)*sum(Y)) / sqrt((n*sum(X^2) - sum(X)^2) * (n*sum(Y^2) - sum(Y)^2))",
                variables: vec![
                    Variable::new("r", "Correlation coefficient, -1..1"),
                    Variable::new("r^2", "Coefficient of determination"),
                ],
                method: Method::Regression,
                source_module: "calculations/regression.rs",
                source_function: "fit",
            },

            Equation::LinearObjective => EquationMetadata {
                name: "Objective Function",
                description: "Linear objective maximized or minimized over the feasible region",
                formula_plain: "Z = c1*X1 + c2*X2",
                variables: vec![
                    Variable::new("c1, c2", "Objective coefficients"),
                    Variable::new("X1, X2", "Decision variables (>= 0)"),
                ],
                method: Method::LinearProgram,
                source_module: "equations/formulas.rs",
                source_function: "objective_value",
            },

            Equation::LinearConstraint => EquationMetadata {
                name: "Constraint",
                description: "Half-plane bounding the feasible region",
                formula_plain: "a1*X1 + a2*X2 <= b",
                variables: vec![
                    Variable::new("a1, a2", "Constraint coefficients"),
                    Variable::new("b", "Right-hand side"),
                ],
                method: Method::LinearProgram,
                source_module: "calculations/linear_program.rs",
                source_function: "Constraint::is_satisfied",
            },
        }
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::EconomicOrderQuantity,
    Equation::TotalInventoryCost,
    Equation::OrderFrequency,
    Equation::BreakEvenUnits,
    Equation::BreakEvenRevenue,
    Equation::MarginOfSafety,
    Equation::NetPresentValue,
    Equation::InternalRateOfReturn,
    Equation::RegressionLine,
    Equation::RegressionSlope,
    Equation::RegressionIntercept,
    Equation::CorrelationCoefficient,
    Equation::LinearObjective,
    Equation::LinearConstraint,
];

/// Equations belonging to one method, in registry order
pub fn equations_for(method: Method) -> Vec<Equation> {
    ALL_EQUATIONS
        .iter()
        .filter(|eq| eq.metadata().method == method)
        .copied()
        .collect()
}

/// Render the formula reference for one method as plain text.
pub fn format_method_formulas(method: Method) -> String {
    let mut output = format!("{}\n", method.display_name());
    for equation in equations_for(method) {
        let meta = equation.metadata();
        output.push_str(&format!("\n  {}\n    {}\n", meta.name, meta.formula_plain));
        for var in &meta.variables {
            output.push_str(&format!("      {:<8} {}\n", var.symbol, var.description));
        }
    }
    output
}

/// Generate the complete equations reference as markdown.
///
/// # Example
///
/// ```rust
/// use calc_core::equations::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("## NPV & IRR"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(
        r#"# Tally Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `calc_cli formulas --output EQUATIONS.md`

Every formula used by the Tally calculators, grouped by method.

---

"#,
    );

    for method in Method::ALL {
        let equations = equations_for(method);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", method.display_name()));
        output.push_str(&format!("{}\n\n", method.summary()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description |\n");
                output.push_str("|--------|-------------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} |\n", var.symbol, var.description));
                }
                output.push('\n');
            }

            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));
            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Methods:** {}\n",
        ALL_EQUATIONS.len(),
        Method::ALL.len()
    ));

    output
}
