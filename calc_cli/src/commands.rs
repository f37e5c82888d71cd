//! Command implementations.
//!
//! Each command builds a calc_core input, runs it and renders the result.
//! The `show_*` functions are shared with the interactive session.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use serde_json::json;

use calc_core::calculations::break_even::{self, BreakEvenInput};
use calc_core::calculations::eoq::{self, EoqInput};
use calc_core::calculations::linear_program::{self, Direction, LpInput};
use calc_core::calculations::npv::{self, IrrConfig, NpvInput};
use calc_core::calculations::regression::{self, RegressionInput};
use calc_core::equations::{
    equations_for, format_method_formulas, generate_equations_markdown, ALL_EQUATIONS,
};
use calc_core::units::{Percent, Rate};
use calc_core::{CalculationItem, ChartSettings, Method};

use crate::cli::{BepArgs, EoqArgs, LpArgs, NpvArgs, RegressionArgs};
use crate::{csv_input, report};

/// Output mode and chart ranges shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    pub json: bool,
    pub settings: ChartSettings,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn eoq(args: EoqArgs, ctx: &Context) -> Result<()> {
    let input = EoqInput {
        annual_demand: args.demand,
        order_cost: args.order_cost,
        holding_cost: args.holding_cost,
    };
    show_eoq(&input, args.chart, ctx)
}

pub fn show_eoq(input: &EoqInput, chart: bool, ctx: &Context) -> Result<()> {
    let result = eoq::calculate(input)?;
    let points = if chart {
        let range = &ctx.settings.eoq;
        Some(eoq::sample_cost_curve(input, range.q_min, range.q_max, range.steps)?)
    } else {
        None
    };

    if ctx.json {
        return match points {
            Some(points) => print_json(&json!({ "result": result, "chart": points })),
            None => print_json(&result),
        };
    }

    let mut out = io::stdout().lock();
    report::eoq(&mut out, input, &result)?;
    if let Some(points) = points {
        report::eoq_chart(&mut out, &points)?;
    }
    Ok(())
}

pub fn bep(args: BepArgs, ctx: &Context) -> Result<()> {
    let input = BreakEvenInput {
        fixed_cost: args.fixed_cost,
        variable_cost: args.variable_cost,
        price: args.price,
        target_units: args.target_units,
    };
    show_break_even(&input, args.chart, ctx)
}

pub fn show_break_even(input: &BreakEvenInput, chart: bool, ctx: &Context) -> Result<()> {
    let result = break_even::calculate(input)?;
    let points = if chart {
        let range = &ctx.settings.break_even;
        Some(break_even::sample_cost_revenue(input, range.unit_max, range.steps)?)
    } else {
        None
    };

    if ctx.json {
        return match points {
            Some(points) => print_json(&json!({ "result": result, "chart": points })),
            None => print_json(&result),
        };
    }

    let mut out = io::stdout().lock();
    report::break_even(&mut out, input, &result)?;
    if let Some(points) = points {
        report::break_even_chart(&mut out, &points)?;
    }
    Ok(())
}

pub fn npv(args: NpvArgs, ctx: &Context) -> Result<()> {
    let defaults = IrrConfig::default();
    let rate: Rate = Percent(args.rate_percent).into();
    let input = NpvInput {
        initial_investment: args.investment,
        discount_rate: rate.0,
        cash_flows: args.cash_flows,
        irr: IrrConfig {
            low: args.irr_low.unwrap_or(defaults.low),
            high: args.irr_high.unwrap_or(defaults.high),
            max_iterations: args.irr_iterations.unwrap_or(defaults.max_iterations),
            tolerance: args.irr_tolerance.unwrap_or(defaults.tolerance),
        },
    };
    show_npv(&input, ctx)
}

pub fn show_npv(input: &NpvInput, ctx: &Context) -> Result<()> {
    let result = npv::calculate(input)?;
    if ctx.json {
        return print_json(&result);
    }
    report::npv(&mut io::stdout().lock(), input, &result)?;
    Ok(())
}

pub fn regression(args: RegressionArgs, ctx: &Context) -> Result<()> {
    let input = match &args.csv {
        Some(path) => {
            let samples = csv_input::read_samples(path)?;
            tracing::debug!(count = samples.len(), path = %path.display(), "Loaded samples");
            RegressionInput::from_pairs(&samples, args.predict)
        }
        None => RegressionInput {
            xs: args.xs,
            ys: args.ys,
            predict_x: args.predict,
        },
    };
    show_regression(&input, args.chart, ctx)
}

pub fn show_regression(input: &RegressionInput, chart: bool, ctx: &Context) -> Result<()> {
    let result = regression::calculate(input)?;
    let points = match regression::x_range(&input.xs) {
        Some((x_min, x_max)) if chart => Some(regression::sample_fit_line(
            &result.fit,
            x_min,
            x_max,
            ctx.settings.regression.steps,
        )?),
        _ => None,
    };

    if ctx.json {
        return match points {
            Some(points) => print_json(&json!({ "result": result, "chart": points })),
            None => print_json(&result),
        };
    }

    let mut out = io::stdout().lock();
    report::regression(&mut out, input, &result)?;
    if let Some(points) = points {
        report::line_chart(&mut out, &points)?;
    }
    Ok(())
}

pub fn lp(args: LpArgs, ctx: &Context) -> Result<()> {
    let window = &ctx.settings.linear_program;
    let direction = if args.minimize {
        Direction::Minimize
    } else {
        Direction::Maximize
    };
    let input = LpInput {
        c1: args.c1,
        c2: args.c2,
        direction,
        constraints: args.constraints,
        x_max: args.x_max.unwrap_or(window.x_max),
        y_max: args.y_max.unwrap_or(window.y_max),
        steps: window.steps,
        iso_levels: window.iso_levels.clone(),
    };
    show_linear_program(&input, args.chart, ctx)
}

pub fn show_linear_program(input: &LpInput, chart: bool, ctx: &Context) -> Result<()> {
    let result = linear_program::calculate(input)?;

    if ctx.json {
        return if chart {
            print_json(&result)
        } else {
            print_json(&result.solution)
        };
    }

    let mut out = io::stdout().lock();
    report::linear_program(&mut out, input, &result)?;
    if chart {
        report::region_chart(&mut out, &result.region)?;
    }
    Ok(())
}

/// Load a JSON request and run it.
pub fn run(path: &Path, ctx: &Context) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file {}", path.display()))?;
    let item: CalculationItem = serde_json::from_str(&text)
        .with_context(|| format!("Invalid calculation request in {}", path.display()))?;
    tracing::debug!(method = ?item.method(), "Running request");

    if ctx.json {
        return print_json(&item.calculate()?);
    }

    match &item {
        CalculationItem::Eoq(input) => show_eoq(input, false, ctx),
        CalculationItem::BreakEven(input) => show_break_even(input, false, ctx),
        CalculationItem::NpvIrr(input) => show_npv(input, ctx),
        CalculationItem::Regression(input) => show_regression(input, false, ctx),
        CalculationItem::LinearProgram(input) => show_linear_program(input, false, ctx),
    }
}

/// The formula sheet as markdown, for one method or all of them.
fn formula_sheet(method: Option<Method>) -> String {
    match method {
        Some(m) => format_method_formulas(m),
        None => generate_equations_markdown(),
    }
}

/// Print the formula sheet, or write it to `output` when given.
pub fn formulas(method: Option<Method>, output: Option<&Path>, ctx: &Context) -> Result<()> {
    if let Some(path) = output {
        fs::write(path, formula_sheet(method))
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), "Wrote formula sheet");
        return Ok(());
    }

    if ctx.json {
        let equations: Vec<_> = match method {
            Some(m) => equations_for(m).into_iter().map(|eq| eq.metadata()).collect(),
            None => ALL_EQUATIONS.iter().map(|eq| eq.metadata()).collect(),
        };
        return print_json(&equations);
    }

    write!(io::stdout().lock(), "{}", formula_sheet(method))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_context() -> Context {
        Context {
            json: false,
            settings: ChartSettings::default(),
        }
    }

    #[test]
    fn test_formulas_written_to_file() {
        let path = std::env::temp_dir().join(format!("tally-equations-{}.md", std::process::id()));
        formulas(None, Some(&path), &text_context()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(written, generate_equations_markdown());
        assert!(written.contains("calc_cli formulas --output EQUATIONS.md"));
    }

    #[test]
    fn test_method_sheet_written_to_file() {
        let path = std::env::temp_dir().join(format!("tally-eoq-{}.md", std::process::id()));
        formulas(Some(Method::Eoq), Some(&path), &text_context()).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(written, format_method_formulas(Method::Eoq));
    }

    #[test]
    fn test_unwritable_output_path() {
        let path = std::env::temp_dir().join("tally-missing-dir").join("EQUATIONS.md");
        let err = formulas(None, Some(&path), &text_context()).unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}
