//! Plain-text rendering of results.
//!
//! Every function writes to any `io::Write` so the layout can be checked
//! in tests without capturing stdout.

use std::io::{self, Write};

use calc_core::calculations::break_even::{BreakEvenInput, BreakEvenResult, CostRevenuePoint};
use calc_core::calculations::eoq::{CostCurvePoint, EoqInput, EoqResult};
use calc_core::calculations::linear_program::{
    Boundary, Direction, FeasibleSide, LpInput, LpResult, LpStatus, Region,
};
use calc_core::calculations::npv::{NpvInput, NpvResult};
use calc_core::calculations::regression::{LinePoint, RegressionInput, RegressionResult};
use calc_core::CalcError;

const RULE: &str = "═══════════════════════════════════════";

fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "  {}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}

pub fn eoq(out: &mut impl Write, input: &EoqInput, result: &EoqResult) -> io::Result<()> {
    banner(out, "EOQ RESULTS")?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Annual demand (D):  {}", input.annual_demand)?;
    writeln!(out, "  Order cost (K):     {}", input.order_cost)?;
    writeln!(out, "  Holding cost (h):   {}", input.holding_cost)?;
    writeln!(out)?;
    writeln!(out, "Result:")?;
    writeln!(out, "  EOQ (Q*):           {:.2} units", result.order_quantity)?;
    writeln!(out, "  Total cost:         {:.2}", result.total_cost)?;
    writeln!(out, "    ordering:         {:.2}", result.annual_ordering_cost)?;
    writeln!(out, "    holding:          {:.2}", result.annual_holding_cost)?;
    writeln!(out, "  Orders per year:    {:.2}", result.order_frequency)?;
    writeln!(out, "  Days between orders: {:.1}", result.cycle_days)
}

pub fn eoq_chart(out: &mut impl Write, points: &[CostCurvePoint]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:>12} {:>14} {:>14} {:>14}", "Q", "Ordering", "Holding", "Total")?;
    for p in points {
        writeln!(
            out,
            "{:>12.2} {:>14.2} {:>14.2} {:>14.2}",
            p.quantity, p.ordering_cost, p.holding_cost, p.total_cost
        )?;
    }
    Ok(())
}

pub fn break_even(
    out: &mut impl Write,
    input: &BreakEvenInput,
    result: &BreakEvenResult,
) -> io::Result<()> {
    banner(out, "BREAK-EVEN RESULTS")?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Fixed cost:         {}", input.fixed_cost)?;
    writeln!(out, "  Variable cost/unit: {}", input.variable_cost)?;
    writeln!(out, "  Price/unit:         {}", input.price)?;
    writeln!(out)?;
    writeln!(out, "Result:")?;
    writeln!(out, "  BEP (units):        {:.2}", result.unit_bep)?;
    writeln!(out, "  BEP (revenue):      {:.2}", result.revenue_bep)?;
    writeln!(
        out,
        "  Contribution margin: {:.2} ({:.1}%)",
        result.contribution_margin,
        result.contribution_margin_ratio * 100.0
    )?;
    if let (Some(target), Some(mos)) = (input.target_units, result.margin_of_safety) {
        writeln!(out, "  Margin of safety:   {:.2} at {} units", mos, target)?;
    }
    Ok(())
}

pub fn break_even_chart(out: &mut impl Write, points: &[CostRevenuePoint]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:>12} {:>16} {:>16}", "Units", "Total cost", "Total revenue")?;
    for p in points {
        writeln!(out, "{:>12.2} {:>16.2} {:>16.2}", p.units, p.total_cost, p.total_revenue)?;
    }
    Ok(())
}

pub fn npv(out: &mut impl Write, input: &NpvInput, result: &NpvResult) -> io::Result<()> {
    banner(out, "NPV & IRR RESULTS")?;
    writeln!(out, "Input:")?;
    writeln!(out, "  Initial investment: {}", input.initial_investment)?;
    writeln!(out, "  Discount rate:      {:.2}", input.discount_rate_percent())?;
    for (t, cf) in input.cash_flows.iter().enumerate() {
        writeln!(out, "  Year {:<2}            {}", t + 1, cf)?;
    }
    writeln!(out)?;
    writeln!(out, "Result:")?;
    writeln!(out, "  NPV:                {:.2} {}", result.npv, status_icon(result.npv_viable))?;
    writeln!(out, "  Decision:           {}", result.decision.label())?;
    match &result.irr {
        Some(irr) => {
            writeln!(
                out,
                "  IRR:                {:.2} {}",
                irr.rate_percent(),
                status_icon(result.irr_viable)
            )?;
            if !irr.converged {
                writeln!(
                    out,
                    "  (IRR search stopped after {} iterations, residual NPV {:.2})",
                    irr.iterations, irr.residual_npv
                )?;
            }
        }
        None => writeln!(out, "  IRR:                not found in the search bracket")?,
    }
    Ok(())
}

pub fn regression(
    out: &mut impl Write,
    input: &RegressionInput,
    result: &RegressionResult,
) -> io::Result<()> {
    banner(out, "LINEAR REGRESSION RESULTS")?;
    writeln!(out, "Data:")?;
    writeln!(out, "  {:>12} {:>12}", "X", "Y")?;
    for (x, y) in input.xs.iter().zip(&input.ys) {
        writeln!(out, "  {:>12} {:>12}", x, y)?;
    }
    writeln!(out)?;

    let fit = &result.fit;
    writeln!(out, "Result:")?;
    writeln!(out, "  Equation:           {}", fit.equation())?;
    writeln!(out, "  Intercept (a):      {:.4}", fit.intercept)?;
    writeln!(out, "  Slope (b):          {:.4}", fit.slope)?;
    writeln!(out, "  Correlation (r):    {:.4}", fit.r)?;
    writeln!(out, "  R²:                 {:.4}", fit.r_squared)?;
    if let Some(p) = &result.prediction {
        writeln!(out, "  Forecast at X={}:    {:.2}", p.x, p.y)?;
    }
    Ok(())
}

pub fn line_chart(out: &mut impl Write, points: &[LinePoint]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{:>12} {:>14}", "X", "Y")?;
    for p in points {
        writeln!(out, "{:>12.4} {:>14.4}", p.x, p.y)?;
    }
    Ok(())
}

fn describe_boundary(boundary: &Boundary) -> String {
    match *boundary {
        Boundary::Line { slope, intercept } => format!("X2 = {:.4} + {:.4}·X1", intercept, slope),
        Boundary::Horizontal { y } => format!("X2 = {:.4}", y),
        Boundary::Vertical { x } => format!("X1 = {:.4}", x),
        Boundary::Degenerate { always_satisfied } => {
            if always_satisfied {
                "no line (always satisfied)".to_string()
            } else {
                "no line (never satisfied)".to_string()
            }
        }
    }
}

fn describe_side(side: FeasibleSide) -> &'static str {
    match side {
        FeasibleSide::Below => "below",
        FeasibleSide::Above => "above",
        FeasibleSide::Left => "left",
        FeasibleSide::Right => "right",
        FeasibleSide::Everywhere => "everywhere",
        FeasibleSide::Nowhere => "nowhere",
    }
}

pub fn linear_program(out: &mut impl Write, input: &LpInput, result: &LpResult) -> io::Result<()> {
    banner(out, "LINEAR PROGRAM RESULTS")?;
    writeln!(out, "{}", input.objective_label())?;
    writeln!(out, "Subject to:")?;
    for line in &result.region.constraint_lines {
        writeln!(
            out,
            "  {:<24} boundary {}, feasible {}",
            line.label,
            describe_boundary(&line.boundary),
            describe_side(line.side)
        )?;
    }
    writeln!(out, "  X1, X2 >= 0")?;
    writeln!(out)?;

    let solution = &result.solution;
    writeln!(out, "Corner points:")?;
    for v in &solution.vertices {
        writeln!(out, "  ({:.4}, {:.4})  Z = {:.4}", v.x1, v.x2, v.objective)?;
    }
    writeln!(out)?;
    match (solution.status, &solution.optimum) {
        (LpStatus::Optimal, Some(best)) => writeln!(
            out,
            "Optimum: X1 = {:.4}, X2 = {:.4}, Z = {:.4}",
            best.x1, best.x2, best.objective
        ),
        (LpStatus::Infeasible, _) => writeln!(out, "No point satisfies every constraint."),
        (LpStatus::Unbounded, _) => writeln!(
            out,
            "Unbounded: Z can {} without limit.",
            match input.direction {
                Direction::Maximize => "grow",
                Direction::Minimize => "fall",
            }
        ),
        (LpStatus::Optimal, None) => Ok(()),
    }
}

pub fn region_chart(out: &mut impl Write, region: &Region) -> io::Result<()> {
    for line in &region.constraint_lines {
        writeln!(out)?;
        writeln!(out, "Constraint {}:", line.label)?;
        for p in &line.points {
            writeln!(out, "  {:>12.4} {:>12.4}", p.x, p.y)?;
        }
    }
    for iso in &region.iso_lines {
        writeln!(out)?;
        writeln!(out, "Iso-line Z = {}:", iso.level)?;
        for p in &iso.points {
            writeln!(out, "  {:>12.4} {:>12.4}", p.x, p.y)?;
        }
    }
    writeln!(out)?;
    writeln!(out, "Feasible region:")?;
    writeln!(out, "  {:>12} {:>12} {:>12}", "X1", "X2 low", "X2 high")?;
    for band in &region.feasible_band {
        writeln!(out, "  {:>12.4} {:>12.4} {:>12.4}", band.x, band.y_low, band.y_high)?;
    }
    Ok(())
}

/// Error message plus, with `json`, the structured error.
pub fn error(out: &mut impl Write, err: &CalcError, json: bool) -> io::Result<()> {
    writeln!(out, "Error [{}]: {}", err.error_code(), err)?;
    if json {
        if let Ok(body) = serde_json::to_string_pretty(err) {
            writeln!(out)?;
            writeln!(out, "Error JSON:")?;
            writeln!(out, "{}", body)?;
        }
    }
    Ok(())
}
