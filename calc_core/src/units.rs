//! # Unit Types
//!
//! Type-safe wrappers for rates. Discount rates travel through the
//! calculators as fractions (0.10), while people type and read them as
//! percentages (10%). Keeping the two apart in the type system avoids the
//! classic factor-of-100 slip.
//!
//! Both wrappers are `#[serde(transparent)]`, so they serialize as bare numbers.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{Percent, Rate};
//!
//! let entered = Percent(10.0);
//! let rate: Rate = entered.into();
//! assert!((rate.0 - 0.10).abs() < 1e-12);
//!
//! let shown: Percent = Rate(0.1524).into();
//! assert!((shown.0 - 15.24).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Rate Units
// ============================================================================

/// A rate expressed as a fraction (0.10 = ten percent)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(pub f64);

/// A rate expressed in percent (10.0 = ten percent)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(pub f64);

impl From<Percent> for Rate {
    fn from(pct: Percent) -> Self {
        Rate(pct.0 / 100.0)
    }
}

impl From<Rate> for Percent {
    fn from(rate: Rate) -> Self {
        Percent(rate.0 * 100.0)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}%", p, self.0),
            None => write!(f, "{}%", self.0),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*}", p, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
