//! # Chart Settings
//!
//! Default sampling ranges for every chart. A front end loads these once
//! (optionally overriding them from a JSON file) and passes the values to the
//! samplers; calc_core itself never reads files.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::settings::ChartSettings;
//!
//! let settings = ChartSettings::from_json(r#"{ "eoq": { "q_max": 800.0 } }"#).unwrap();
//! assert_eq!(settings.eoq.q_max, 800.0);
//! assert_eq!(settings.eoq.q_min, 50.0); // untouched fields keep their defaults
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::linear_program::{DEFAULT_ISO_LEVELS, DEFAULT_STEPS, DEFAULT_WINDOW};
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};

/// Chart ranges for all methods.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub eoq: EoqChart,
    pub break_even: BreakEvenChart,
    pub regression: RegressionChart,
    pub linear_program: LinearProgramChart,
}

/// EOQ cost curve range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EoqChart {
    pub q_min: f64,
    pub q_max: f64,
    pub steps: usize,
}

impl Default for EoqChart {
    fn default() -> Self {
        EoqChart {
            q_min: 50.0,
            q_max: 500.0,
            steps: 100,
        }
    }
}

/// Break-even chart range (units sold)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreakEvenChart {
    pub unit_max: f64,
    pub steps: usize,
}

impl Default for BreakEvenChart {
    fn default() -> Self {
        BreakEvenChart {
            unit_max: 200.0,
            steps: 100,
        }
    }
}

/// Fitted line sampling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionChart {
    pub steps: usize,
}

impl Default for RegressionChart {
    fn default() -> Self {
        RegressionChart { steps: 100 }
    }
}

/// Plot window for the graphical method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinearProgramChart {
    pub x_max: f64,
    pub y_max: f64,
    pub steps: usize,
    pub iso_levels: Vec<f64>,
}

impl Default for LinearProgramChart {
    fn default() -> Self {
        LinearProgramChart {
            x_max: DEFAULT_WINDOW,
            y_max: DEFAULT_WINDOW,
            steps: DEFAULT_STEPS,
            iso_levels: DEFAULT_ISO_LEVELS.to_vec(),
        }
    }
}

impl ChartSettings {
    /// Parse settings from JSON; missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: ChartSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate every range.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("eoq.q_min", self.eoq.q_min, "Chart range must be positive")?;
        if self.eoq.q_max.is_nan() || self.eoq.q_max <= self.eoq.q_min {
            return Err(CalcError::invalid_parameter(
                "eoq.q_max",
                self.eoq.q_max.to_string(),
                "Upper bound must exceed q_min",
            ));
        }
        require_positive(
            "break_even.unit_max",
            self.break_even.unit_max,
            "Chart range must be positive",
        )?;
        require_positive(
            "linear_program.x_max",
            self.linear_program.x_max,
            "Plot window must be positive",
        )?;
        require_positive(
            "linear_program.y_max",
            self.linear_program.y_max,
            "Plot window must be positive",
        )?;
        for level in &self.linear_program.iso_levels {
            require_finite("linear_program.iso_levels", *level)?;
        }

        for (field, steps) in [
            ("eoq.steps", self.eoq.steps),
            ("break_even.steps", self.break_even.steps),
            ("regression.steps", self.regression.steps),
            ("linear_program.steps", self.linear_program.steps),
        ] {
            if steps < 2 {
                return Err(CalcError::invalid_parameter(
                    field,
                    steps.to_string(),
                    "At least 2 samples are needed to draw a series",
                ));
            }
        }
        Ok(())
    }
}
