//! Prompt-driven session: pick a method, fill in its fields, see the result.
//!
//! Every prompt shows a default in brackets; an empty or unparsable answer
//! takes the default. End of input leaves the session.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use calc_core::calculations::break_even::BreakEvenInput;
use calc_core::calculations::eoq::EoqInput;
use calc_core::calculations::linear_program::{Constraint, Direction, LpInput, MAX_CONSTRAINTS};
use calc_core::calculations::npv::{NpvInput, MAX_PERIODS};
use calc_core::calculations::regression::{RegressionInput, MAX_SAMPLES, MIN_SAMPLES};
use calc_core::units::{Percent, Rate};
use calc_core::Method;

use crate::commands::{self, Context};
use crate::report;

pub struct Session<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one trimmed line; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_f64(&mut self, prompt: &str, default: f64) -> io::Result<f64> {
        write!(self.output, "{} [{}]: ", prompt, default)?;
        self.output.flush()?;
        let answer = self.read_line()?;
        Ok(answer.and_then(|s| s.parse().ok()).unwrap_or(default))
    }

    fn prompt_count(
        &mut self,
        prompt: &str,
        default: usize,
        min: usize,
        max: usize,
    ) -> io::Result<usize> {
        write!(self.output, "{} ({}-{}) [{}]: ", prompt, min, max, default)?;
        self.output.flush()?;
        let answer = self.read_line()?;
        let count = answer.and_then(|s| s.parse().ok()).unwrap_or(default);
        Ok(count.clamp(min, max))
    }

    /// Show the menu and read a choice; `None` to quit.
    pub fn choose_method(&mut self) -> io::Result<Option<Method>> {
        writeln!(self.output)?;
        writeln!(self.output, "Choose a method:")?;
        for (i, method) in Method::ALL.iter().enumerate() {
            writeln!(self.output, "  {}. {}", i + 1, method.display_name())?;
        }
        writeln!(self.output, "  q. Quit")?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if answer.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=Method::ALL.len()).contains(&n) => {
                    return Ok(Some(Method::ALL[n - 1]));
                }
                _ => writeln!(self.output, "Enter 1-{} or q", Method::ALL.len())?,
            }
        }
    }

    pub fn read_eoq(&mut self) -> io::Result<EoqInput> {
        Ok(EoqInput {
            annual_demand: self.prompt_f64("Annual demand (D)", 1000.0)?,
            order_cost: self.prompt_f64("Cost per order (K)", 50.0)?,
            holding_cost: self.prompt_f64("Holding cost per unit per year (h)", 2.0)?,
        })
    }

    pub fn read_break_even(&mut self) -> io::Result<BreakEvenInput> {
        let fixed_cost = self.prompt_f64("Fixed cost", 100_000.0)?;
        let variable_cost = self.prompt_f64("Variable cost per unit", 5_000.0)?;
        let price = self.prompt_f64("Selling price per unit", 10_000.0)?;
        let target = self.prompt_f64("Target sales in units (0 to skip)", 100.0)?;
        Ok(BreakEvenInput {
            fixed_cost,
            variable_cost,
            price,
            target_units: (target > 0.0).then_some(target),
        })
    }

    pub fn read_npv(&mut self) -> io::Result<NpvInput> {
        let investment = self.prompt_f64("Initial investment", 1_000_000.0)?;
        let rate: Rate = Percent(self.prompt_f64("Discount rate (%)", 10.0)?).into();
        let years = self.prompt_count("Number of years", 5, 1, MAX_PERIODS)?;
        let mut cash_flows = Vec::with_capacity(years);
        for year in 1..=years {
            cash_flows.push(self.prompt_f64(&format!("  Cash flow year {}", year), 300_000.0)?);
        }
        Ok(NpvInput::new(investment, rate.0, cash_flows))
    }

    pub fn read_regression(&mut self) -> io::Result<RegressionInput> {
        let n = self.prompt_count("Number of data points", 5, MIN_SAMPLES, MAX_SAMPLES)?;
        let mut pairs = Vec::with_capacity(n);
        for i in 1..=n {
            let x = self.prompt_f64(&format!("  X{}", i), i as f64)?;
            let y = self.prompt_f64(&format!("  Y{}", i), (i * 2) as f64)?;
            pairs.push((x, y));
        }
        let predict_x = self.prompt_f64("Forecast Y at X", 10.0)?;
        Ok(RegressionInput::from_pairs(&pairs, Some(predict_x)))
    }

    pub fn read_linear_program(&mut self) -> io::Result<LpInput> {
        let c1 = self.prompt_f64("Objective coefficient of X1", 3.0)?;
        let c2 = self.prompt_f64("Objective coefficient of X2", 2.0)?;
        let minimize = self.prompt_f64("1 = maximize, 2 = minimize", 1.0)? == 2.0;
        let count = self.prompt_count("Number of constraints", 3, 1, MAX_CONSTRAINTS)?;

        let mut constraints = Vec::with_capacity(count);
        for i in 1..=count {
            writeln!(self.output, "Constraint {}: a1·X1 + a2·X2 <= b", i)?;
            let a1 = self.prompt_f64("  a1", 1.0)?;
            let a2 = self.prompt_f64("  a2", 1.0)?;
            let b = self.prompt_f64("  b", 10.0)?;
            constraints.push(Constraint::new(a1, a2, b));
        }

        let direction = if minimize {
            Direction::Minimize
        } else {
            Direction::Maximize
        };
        Ok(LpInput::new(c1, c2, direction, constraints))
    }

    /// Run until the user quits. Calculation errors are reported and the
    /// menu is shown again.
    pub fn run(&mut self, ctx: &Context) -> Result<()> {
        writeln!(self.output, "Tally - Business Math Calculator")?;
        writeln!(self.output, "================================")?;

        while let Some(method) = self.choose_method()? {
            writeln!(self.output)?;
            writeln!(self.output, "{}", method.display_name())?;
            writeln!(self.output, "{}", method.summary())?;
            writeln!(self.output)?;

            let outcome = match method {
                Method::Eoq => {
                    let input = self.read_eoq()?;
                    commands::show_eoq(&input, false, ctx)
                }
                Method::BreakEven => {
                    let input = self.read_break_even()?;
                    commands::show_break_even(&input, false, ctx)
                }
                Method::NpvIrr => {
                    let input = self.read_npv()?;
                    commands::show_npv(&input, ctx)
                }
                Method::Regression => {
                    let input = self.read_regression()?;
                    commands::show_regression(&input, false, ctx)
                }
                Method::LinearProgram => {
                    let input = self.read_linear_program()?;
                    commands::show_linear_program(&input, false, ctx)
                }
            };

            if let Err(err) = outcome {
                match err.downcast_ref::<calc_core::CalcError>() {
                    Some(calc_err) => report::error(&mut self.output, calc_err, ctx.json)?,
                    None => return Err(err),
                }
            }
        }
        Ok(())
    }
}
