//! # Linear Programming (Graphical Method)
//!
//! Two-variable linear programs of the form
//!
//! ```text
//! maximize / minimize   Z = c1·X1 + c2·X2
//! subject to            a1·X1 + a2·X2 ≤ b     (1 to 5 constraints)
//!                       X1 ≥ 0, X2 ≥ 0
//! ```
//!
//! The graphical method draws every constraint boundary, shades the region
//! that satisfies all of them, overlays objective iso-lines, then evaluates
//! the objective at each corner of the feasible region. This module produces
//! all of that as data: [`region`] returns the drawing (constraint lines,
//! shading band, iso-lines) and [`solve`] returns the corner points and the
//! optimum.
//!
//! ## Boundary kinds
//!
//! A constraint boundary `a1·X1 + a2·X2 = b` is not always a function of X1:
//!
//! | Coefficients       | [`Boundary`]   | Drawn as             |
//! |--------------------|----------------|----------------------|
//! | a1 ≠ 0, a2 ≠ 0     | `Line`         | y = (b − a1·x) / a2  |
//! | a1 = 0, a2 ≠ 0     | `Horizontal`   | y = b / a2           |
//! | a1 ≠ 0, a2 = 0     | `Vertical`     | x = b / a1           |
//! | a1 = 0, a2 = 0     | `Degenerate`   | nothing (0 ≤ b)      |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::linear_program::{calculate, Constraint, Direction, LpInput, LpStatus};
//!
//! let input = LpInput::new(
//!     3.0,
//!     5.0,
//!     Direction::Maximize,
//!     vec![
//!         Constraint::new(1.0, 0.0, 4.0),
//!         Constraint::new(0.0, 2.0, 12.0),
//!         Constraint::new(3.0, 2.0, 18.0),
//!     ],
//! );
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.solution.status, LpStatus::Optimal);
//! let best = result.solution.optimum.unwrap();
//! assert!((best.x1 - 2.0).abs() < 1e-9 && (best.x2 - 6.0).abs() < 1e-9);
//! assert!((best.objective - 36.0).abs() < 1e-9);
//! ```

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::formulas::objective_value;
use crate::errors::{require_finite, require_positive, CalcError, CalcResult};
use crate::sampling::linspace;

/// Most constraints accepted
pub const MAX_CONSTRAINTS: usize = 5;

/// Default plot window for both axes
pub const DEFAULT_WINDOW: f64 = 20.0;

/// Default number of samples per drawn line
pub const DEFAULT_STEPS: usize = 1000;

/// Default objective levels drawn as iso-lines
pub const DEFAULT_ISO_LEVELS: [f64; 4] = [5.0, 10.0, 15.0, 20.0];

/// Absolute/relative tolerance for feasibility tests
const FEASIBILITY_TOL: f64 = 1e-9;

/// Relative size below which two boundaries count as parallel
const PARALLEL_TOL: f64 = 1e-12;

// ============================================================================
// Input Types
// ============================================================================

/// Optimization direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Maximize,
    Minimize,
}

impl Direction {
    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Maximize => "Maximize",
            Direction::Minimize => "Minimize",
        }
    }

    /// True when `candidate` is strictly better than `incumbent`
    fn improves(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Direction::Maximize => candidate > incumbent,
            Direction::Minimize => candidate < incumbent,
        }
    }

    /// +1 for maximize, -1 for minimize
    fn sign(&self) -> f64 {
        match self {
            Direction::Maximize => 1.0,
            Direction::Minimize => -1.0,
        }
    }
}

/// A constraint `a1·X1 + a2·X2 ≤ b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub a1: f64,
    pub a2: f64,
    pub b: f64,
}

impl Constraint {
    pub fn new(a1: f64, a2: f64, b: f64) -> Self {
        Self { a1, a2, b }
    }

    /// Boundary line `a1·X1 + a2·X2 = b`
    pub fn boundary(&self) -> Boundary {
        Boundary::from_coefficients(self.a1, self.a2, self.b)
    }

    /// Which side of the boundary satisfies the constraint
    pub fn feasible_side(&self) -> FeasibleSide {
        if self.a2 > 0.0 {
            FeasibleSide::Below
        } else if self.a2 < 0.0 {
            FeasibleSide::Above
        } else if self.a1 > 0.0 {
            FeasibleSide::Left
        } else if self.a1 < 0.0 {
            FeasibleSide::Right
        } else if self.b >= 0.0 {
            FeasibleSide::Everywhere
        } else {
            FeasibleSide::Nowhere
        }
    }

    /// Whether `(x1, x2)` satisfies the constraint, allowing rounding slack
    pub fn is_satisfied(&self, x1: f64, x2: f64) -> bool {
        let lhs = self.a1 * x1 + self.a2 * x2;
        let scale = 1.0 + self.b.abs() + (self.a1 * x1).abs() + (self.a2 * x2).abs();
        lhs <= self.b + FEASIBILITY_TOL * scale
    }

    /// Legend label, e.g. `1X1 + 1X2 <= 10`
    pub fn label(&self) -> String {
        format!("{}X1 + {}X2 <= {}", self.a1, self.a2, self.b)
    }
}

/// Input parameters for a two-variable linear program.
///
/// ## JSON Example
///
/// ```json
/// {
///   "c1": 3.0,
///   "c2": 2.0,
///   "direction": "Maximize",
///   "constraints": [
///     { "a1": 1.0, "a2": 1.0, "b": 10.0 },
///     { "a1": 1.0, "a2": 0.0, "b": 6.0 }
///   ]
/// }
/// ```
///
/// `x_max`, `y_max`, `steps` and `iso_levels` are optional and default to
/// a 20 × 20 window, 1000 samples and levels 5, 10, 15, 20.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpInput {
    /// Objective coefficient of X1
    pub c1: f64,

    /// Objective coefficient of X2
    pub c2: f64,

    #[serde(default)]
    pub direction: Direction,

    /// Constraints `a1·X1 + a2·X2 ≤ b`, 1 to 5 of them
    pub constraints: Vec<Constraint>,

    /// Right edge of the plot window
    #[serde(default = "default_window")]
    pub x_max: f64,

    /// Top edge of the plot window
    #[serde(default = "default_window")]
    pub y_max: f64,

    /// Samples per drawn line
    #[serde(default = "default_steps")]
    pub steps: usize,

    /// Objective values to draw iso-lines for
    #[serde(default = "default_iso_levels")]
    pub iso_levels: Vec<f64>,
}

fn default_window() -> f64 {
    DEFAULT_WINDOW
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_iso_levels() -> Vec<f64> {
    DEFAULT_ISO_LEVELS.to_vec()
}

impl LpInput {
    /// Create an input with the default plot window, sampling and iso-levels.
    pub fn new(c1: f64, c2: f64, direction: Direction, constraints: Vec<Constraint>) -> Self {
        Self {
            c1,
            c2,
            direction,
            constraints,
            x_max: DEFAULT_WINDOW,
            y_max: DEFAULT_WINDOW,
            steps: DEFAULT_STEPS,
            iso_levels: default_iso_levels(),
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("c1", self.c1)?;
        require_finite("c2", self.c2)?;
        if self.constraints.is_empty() || self.constraints.len() > MAX_CONSTRAINTS {
            return Err(CalcError::invalid_parameter(
                "constraints",
                format!("{} constraints", self.constraints.len()),
                format!("Between 1 and {} constraints are required", MAX_CONSTRAINTS),
            ));
        }
        for (i, c) in self.constraints.iter().enumerate() {
            require_finite(&format!("constraints[{}].a1", i), c.a1)?;
            require_finite(&format!("constraints[{}].a2", i), c.a2)?;
            require_finite(&format!("constraints[{}].b", i), c.b)?;
        }
        require_positive("x_max", self.x_max, "Plot window must be positive")?;
        require_positive("y_max", self.y_max, "Plot window must be positive")?;
        if self.steps < 2 {
            return Err(CalcError::invalid_parameter(
                "steps",
                self.steps.to_string(),
                "At least 2 samples are needed to draw a line",
            ));
        }
        for (i, level) in self.iso_levels.iter().enumerate() {
            require_finite(&format!("iso_levels[{}]", i), *level)?;
        }
        Ok(())
    }

    /// Objective Z at `(x1, x2)`
    pub fn objective_at(&self, x1: f64, x2: f64) -> f64 {
        objective_value(self.c1, self.c2, x1, x2)
    }

    /// Objective as text, e.g. `Maximize Z = 3X1 + 2X2`
    pub fn objective_label(&self) -> String {
        format!(
            "{} Z = {}X1 + {}X2",
            self.direction.display_name(),
            self.c1,
            self.c2
        )
    }
}

// ============================================================================
// Drawing Types
// ============================================================================

/// Geometric form of a line `a1·x + a2·y = b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Boundary {
    /// y = intercept + slope·x
    Line { slope: f64, intercept: f64 },
    /// y = constant
    Horizontal { y: f64 },
    /// x = constant
    Vertical { x: f64 },
    /// 0 = b: no line at all
    Degenerate { always_satisfied: bool },
}

impl Boundary {
    /// Classify `a1·x + a2·y = b`
    pub fn from_coefficients(a1: f64, a2: f64, b: f64) -> Self {
        match (a1 == 0.0, a2 == 0.0) {
            (false, false) => Boundary::Line {
                slope: -a1 / a2,
                intercept: b / a2,
            },
            (true, false) => Boundary::Horizontal { y: b / a2 },
            (false, true) => Boundary::Vertical { x: b / a1 },
            (true, true) => Boundary::Degenerate {
                always_satisfied: b >= 0.0,
            },
        }
    }

    /// Sample the boundary at the given x positions.
    ///
    /// Vertical boundaries become a single segment from `y = 0` to `y_max`;
    /// degenerate ones produce no points. Points are not clipped to the
    /// window.
    pub fn sample(&self, xs: &[f64], y_max: f64) -> Vec<Point> {
        match *self {
            Boundary::Line { slope, intercept } => xs
                .iter()
                .map(|&x| Point::new(x, intercept + slope * x))
                .collect(),
            Boundary::Horizontal { y } => xs.iter().map(|&x| Point::new(x, y)).collect(),
            Boundary::Vertical { x } => vec![Point::new(x, 0.0), Point::new(x, y_max)],
            Boundary::Degenerate { .. } => Vec::new(),
        }
    }
}

/// Side of a boundary on which a constraint holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeasibleSide {
    Below,
    Above,
    Left,
    Right,
    Everywhere,
    Nowhere,
}

/// A chart coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One constraint, ready to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintLine {
    pub constraint: Constraint,
    pub label: String,
    pub boundary: Boundary,
    pub side: FeasibleSide,
    pub points: Vec<Point>,
}

/// Line of constant objective value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsoLine {
    pub level: f64,
    pub boundary: Boundary,
    pub points: Vec<Point>,
}

/// Vertical slice of the feasible region at one x position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeasibleBand {
    pub x: f64,
    pub y_low: f64,
    pub y_high: f64,
}

/// Everything needed to draw the graphical method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub constraint_lines: Vec<ConstraintLine>,
    pub iso_lines: Vec<IsoLine>,
    /// Shading of the feasible region inside the plot window; x positions
    /// where the region is empty are left out
    pub feasible_band: Vec<FeasibleBand>,
}

// ============================================================================
// Solution Types
// ============================================================================

/// Corner point of the feasible region with its objective value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x1: f64,
    pub x2: f64,
    pub objective: f64,
}

/// Outcome of the vertex search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LpStatus {
    /// An optimal corner exists
    Optimal,
    /// No point satisfies every constraint
    Infeasible,
    /// The objective improves without limit inside the region
    Unbounded,
}

/// Corner points and the optimum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpSolution {
    pub status: LpStatus,
    /// Corners ordered counter-clockwise
    pub vertices: Vec<Vertex>,
    /// Best corner per the direction; `None` unless `status` is `Optimal`
    pub optimum: Option<Vertex>,
}

/// Drawing plus solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpResult {
    pub region: Region,
    pub solution: LpSolution,
}

// ============================================================================
// Operations
// ============================================================================

/// Build the drawing: constraint lines, objective iso-lines and the
/// feasible-region shading over `[0, x_max]`.
///
/// Iso-lines are omitted when both objective coefficients are zero, since
/// every point then has the same objective value.
pub fn region(input: &LpInput) -> CalcResult<Region> {
    input.validate()?;

    let xs = linspace(0.0, input.x_max, input.steps)?;

    let constraint_lines = input
        .constraints
        .iter()
        .map(|c| {
            let boundary = c.boundary();
            ConstraintLine {
                constraint: *c,
                label: c.label(),
                boundary,
                side: c.feasible_side(),
                points: boundary.sample(&xs, input.y_max),
            }
        })
        .collect();

    let iso_lines = input
        .iso_levels
        .iter()
        .filter_map(|&level| {
            let boundary = Boundary::from_coefficients(input.c1, input.c2, level);
            if matches!(boundary, Boundary::Degenerate { .. }) {
                return None;
            }
            Some(IsoLine {
                level,
                boundary,
                points: boundary.sample(&xs, input.y_max),
            })
        })
        .collect();

    let feasible_band = xs
        .iter()
        .filter_map(|&x| feasible_interval(&input.constraints, x, input.y_max))
        .collect();

    Ok(Region {
        constraint_lines,
        iso_lines,
        feasible_band,
    })
}

/// Feasible y-interval at `x`, clipped to `[0, y_max]`.
fn feasible_interval(constraints: &[Constraint], x: f64, y_max: f64) -> Option<FeasibleBand> {
    let mut y_low: f64 = 0.0;
    let mut y_high = y_max;

    for c in constraints {
        if c.a2 > 0.0 {
            y_high = y_high.min((c.b - c.a1 * x) / c.a2);
        } else if c.a2 < 0.0 {
            y_low = y_low.max((c.b - c.a1 * x) / c.a2);
        } else if !c.is_satisfied(x, 0.0) {
            return None;
        }
    }

    (y_low <= y_high).then_some(FeasibleBand { x, y_low, y_high })
}

/// Enumerate the feasible corners and pick the optimum.
///
/// Corners are intersections of every pair of boundaries (constraints plus
/// both axes) that satisfy all constraints and non-negativity. A non-empty
/// feasible region inside the first quadrant always has at least one corner,
/// so an empty corner list means the program is infeasible.
pub fn solve(input: &LpInput) -> CalcResult<LpSolution> {
    input.validate()?;

    let corners = feasible_vertices(&input.constraints);
    let vertices: Vec<Vertex> = corners
        .into_iter()
        .map(|p| Vertex {
            x1: p.x,
            x2: p.y,
            objective: input.objective_at(p.x, p.y),
        })
        .collect();

    let status = if vertices.is_empty() {
        LpStatus::Infeasible
    } else if is_unbounded(input) {
        LpStatus::Unbounded
    } else {
        LpStatus::Optimal
    };

    let optimum = match status {
        LpStatus::Optimal => vertices.iter().copied().reduce(|best, v| {
            if input.direction.improves(v.objective, best.objective) {
                v
            } else {
                best
            }
        }),
        _ => None,
    };

    debug!(?status, vertices = vertices.len(), "linear program solved");
    Ok(LpSolution {
        status,
        vertices,
        optimum,
    })
}

/// Draw and solve in one call.
pub fn calculate(input: &LpInput) -> CalcResult<LpResult> {
    Ok(LpResult {
        region: region(input)?,
        solution: solve(input)?,
    })
}

/// Corners of `{a·x <= b for all constraints, x >= 0}`, counter-clockwise.
pub fn feasible_vertices(constraints: &[Constraint]) -> Vec<Point> {
    let mut lines: Vec<Constraint> = constraints
        .iter()
        .filter(|c| c.a1 != 0.0 || c.a2 != 0.0)
        .copied()
        .collect();
    lines.push(Constraint::new(1.0, 0.0, 0.0)); // X1 = 0
    lines.push(Constraint::new(0.0, 1.0, 0.0)); // X2 = 0

    let mut corners: Vec<Point> = Vec::new();
    for (i, first) in lines.iter().enumerate() {
        for second in &lines[i + 1..] {
            let Some(p) = intersect(first, second) else {
                continue;
            };
            let in_quadrant = p.x >= -FEASIBILITY_TOL && p.y >= -FEASIBILITY_TOL;
            if in_quadrant
                && constraints.iter().all(|c| c.is_satisfied(p.x, p.y))
                && !corners.iter().any(|q| same_point(p, *q))
            {
                corners.push(p);
            }
        }
    }

    sort_counter_clockwise(&mut corners);
    corners
}

/// Intersection of two boundary lines by Cramer's rule
fn intersect(first: &Constraint, second: &Constraint) -> Option<Point> {
    let det = first.a1 * second.a2 - first.a2 * second.a1;
    let scale = (first.a1.abs() + first.a2.abs()) * (second.a1.abs() + second.a2.abs());
    if det.abs() <= PARALLEL_TOL * scale {
        return None;
    }
    let x = (first.b * second.a2 - first.a2 * second.b) / det;
    let y = (first.a1 * second.b - first.b * second.a1) / det;
    Some(Point::new(snap_zero(x), snap_zero(y)))
}

/// Round tiny values (and -0.0) to exactly zero
fn snap_zero(v: f64) -> f64 {
    if v.abs() < FEASIBILITY_TOL {
        0.0
    } else {
        v
    }
}

fn same_point(p: Point, q: Point) -> bool {
    let tol = FEASIBILITY_TOL * (1.0 + p.x.abs().max(p.y.abs()));
    (p.x - q.x).abs() <= tol && (p.y - q.y).abs() <= tol
}

fn sort_counter_clockwise(points: &mut [Point]) {
    if points.len() < 3 {
        return;
    }
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    points.sort_by(|p, q| {
        let ap = (p.y - cy).atan2(p.x - cx);
        let aq = (q.y - cy).atan2(q.x - cx);
        ap.partial_cmp(&aq).unwrap_or(Ordering::Equal)
    });
}

/// Whether some direction of unbounded travel inside the region improves
/// the objective.
///
/// The recession cone `{d >= 0, a·d <= 0}` of a planar region is spanned by
/// at most two extreme rays, each either an axis direction or parallel to a
/// constraint boundary. A linear objective is unbounded exactly when one of
/// those rays improves it, so only these candidates need checking.
fn is_unbounded(input: &LpInput) -> bool {
    let mut candidates = vec![(1.0, 0.0), (0.0, 1.0)];
    for c in &input.constraints {
        if c.a1 != 0.0 || c.a2 != 0.0 {
            candidates.push((c.a2, -c.a1));
            candidates.push((-c.a2, c.a1));
        }
    }

    let sign = input.direction.sign();
    candidates.into_iter().any(|(dx, dy): (f64, f64)| {
        let norm = dx.hypot(dy);
        let (dx, dy) = (dx / norm, dy / norm);
        let in_cone = dx >= -FEASIBILITY_TOL
            && dy >= -FEASIBILITY_TOL
            && input
                .constraints
                .iter()
                .all(|c| c.a1 * dx + c.a2 * dy <= FEASIBILITY_TOL);
        in_cone && sign * input.objective_at(dx, dy) > FEASIBILITY_TOL
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classic_input() -> LpInput {
        // max 3X1 + 5X2, X1 <= 4, 2X2 <= 12, 3X1 + 2X2 <= 18
        LpInput::new(
            3.0,
            5.0,
            Direction::Maximize,
            vec![
                Constraint::new(1.0, 0.0, 4.0),
                Constraint::new(0.0, 2.0, 12.0),
                Constraint::new(3.0, 2.0, 18.0),
            ],
        )
    }

    fn has_vertex(vertices: &[Vertex], x1: f64, x2: f64) -> bool {
        vertices
            .iter()
            .any(|v| (v.x1 - x1).abs() < 1e-9 && (v.x2 - x2).abs() < 1e-9)
    }

    #[test]
    fn test_single_constraint_line() {
        let mut input = LpInput::new(
            3.0,
            2.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, 10.0)],
        );
        input.steps = 21;
        let region = region(&input).unwrap();
        let line = &region.constraint_lines[0];
        assert_eq!(line.side, FeasibleSide::Below);
        assert_eq!(line.points.len(), 21);
        assert_eq!(line.points[0], Point::new(0.0, 10.0));
        assert!((line.points[10].x - 10.0).abs() < 1e-12);
        assert!(line.points[10].y.abs() < 1e-12);
        // Continues below the axis inside the window
        assert!((line.points[20].y + 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_vertical_constraint_does_not_divide_by_zero() {
        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(2.0, 0.0, 8.0)],
        );
        let region = region(&input).unwrap();
        let line = &region.constraint_lines[0];
        assert_eq!(line.boundary, Boundary::Vertical { x: 4.0 });
        assert_eq!(line.side, FeasibleSide::Left);
        assert_eq!(line.points, vec![Point::new(4.0, 0.0), Point::new(4.0, 20.0)]);
        assert!(line.points.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn test_boundary_classification() {
        assert_eq!(
            Boundary::from_coefficients(0.0, 2.0, 12.0),
            Boundary::Horizontal { y: 6.0 }
        );
        assert_eq!(
            Boundary::from_coefficients(0.0, 0.0, 3.0),
            Boundary::Degenerate { always_satisfied: true }
        );
        assert_eq!(
            Boundary::from_coefficients(0.0, 0.0, -3.0),
            Boundary::Degenerate { always_satisfied: false }
        );
        assert_eq!(
            Boundary::from_coefficients(1.0, 2.0, 10.0),
            Boundary::Line { slope: -0.5, intercept: 5.0 }
        );
    }

    #[test]
    fn test_feasible_sides() {
        assert_eq!(Constraint::new(1.0, -1.0, 2.0).feasible_side(), FeasibleSide::Above);
        assert_eq!(Constraint::new(-1.0, 0.0, 2.0).feasible_side(), FeasibleSide::Right);
        assert_eq!(Constraint::new(0.0, 0.0, -1.0).feasible_side(), FeasibleSide::Nowhere);
    }

    #[test]
    fn test_iso_lines() {
        let input = LpInput::new(
            3.0,
            2.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, 10.0)],
        );
        let region = region(&input).unwrap();
        assert_eq!(region.iso_lines.len(), 4);
        let first = &region.iso_lines[0];
        assert_eq!(first.level, 5.0);
        // y = (5 - 3x) / 2 at x = 0
        assert!((first.points[0].y - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_iso_lines_with_zero_c2_are_vertical() {
        let input = LpInput::new(
            2.0,
            0.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, 10.0)],
        );
        let region = region(&input).unwrap();
        assert_eq!(region.iso_lines[0].boundary, Boundary::Vertical { x: 2.5 });
    }

    #[test]
    fn test_iso_lines_skipped_for_zero_objective() {
        let input = LpInput::new(
            0.0,
            0.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, 10.0)],
        );
        assert!(region(&input).unwrap().iso_lines.is_empty());
    }

    #[test]
    fn test_feasible_band() {
        let mut input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, 10.0)],
        );
        input.steps = 21;
        let band = region(&input).unwrap().feasible_band;
        // x = 0..=10 are feasible, beyond that the slice is empty
        assert_eq!(band.len(), 11);
        assert_eq!(band[0], FeasibleBand { x: 0.0, y_low: 0.0, y_high: 10.0 });
        assert!(band[10].y_high.abs() < 1e-12);
    }

    #[test]
    fn test_feasible_band_clipped_to_window() {
        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(0.0, 1.0, 100.0)],
        );
        let band = region(&input).unwrap().feasible_band;
        assert!(band.iter().all(|b| b.y_high == DEFAULT_WINDOW));
    }

    #[test]
    fn test_classic_optimum() {
        let solution = solve(&classic_input()).unwrap();
        assert_eq!(solution.status, LpStatus::Optimal);
        assert_eq!(solution.vertices.len(), 5);
        for (x1, x2) in [(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (2.0, 6.0), (0.0, 6.0)] {
            assert!(has_vertex(&solution.vertices, x1, x2), "missing ({}, {})", x1, x2);
        }
        let best = solution.optimum.unwrap();
        assert!((best.x1 - 2.0).abs() < 1e-9);
        assert!((best.x2 - 6.0).abs() < 1e-9);
        assert!((best.objective - 36.0).abs() < 1e-9);
    }

    #[test]
    fn test_minimize_picks_origin() {
        let mut input = classic_input();
        input.direction = Direction::Minimize;
        let best = solve(&input).unwrap().optimum.unwrap();
        assert_eq!((best.x1, best.x2), (0.0, 0.0));
    }

    #[test]
    fn test_vertices_counter_clockwise() {
        let vertices = solve(&classic_input()).unwrap().vertices;
        // Shoelace area is positive for counter-clockwise order
        let n = vertices.len();
        let twice_area: f64 = (0..n)
            .map(|i| {
                let (p, q) = (vertices[i], vertices[(i + 1) % n]);
                p.x1 * q.x2 - q.x1 * p.x2
            })
            .sum();
        assert!(twice_area > 0.0);
    }

    #[test]
    fn test_infeasible() {
        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, -5.0)],
        );
        let solution = solve(&input).unwrap();
        assert_eq!(solution.status, LpStatus::Infeasible);
        assert!(solution.vertices.is_empty());
        assert!(solution.optimum.is_none());
    }

    #[test]
    fn test_degenerate_constraint() {
        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(0.0, 0.0, -1.0), Constraint::new(1.0, 1.0, 4.0)],
        );
        assert_eq!(solve(&input).unwrap().status, LpStatus::Infeasible);

        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(0.0, 0.0, 1.0), Constraint::new(1.0, 1.0, 4.0)],
        );
        let solution = solve(&input).unwrap();
        assert_eq!(solution.status, LpStatus::Optimal);
        assert!((solution.optimum.unwrap().objective - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded() {
        // X2 - X1 <= 2 leaves the region open to the right
        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(-1.0, 1.0, 2.0)],
        );
        let solution = solve(&input).unwrap();
        assert_eq!(solution.status, LpStatus::Unbounded);
        assert!(solution.optimum.is_none());
        assert!(!solution.vertices.is_empty());
    }

    #[test]
    fn test_unbounded_region_bounded_objective() {
        let mut input = LpInput::new(
            1.0,
            1.0,
            Direction::Minimize,
            vec![Constraint::new(-1.0, 1.0, 2.0)],
        );
        let solution = solve(&input).unwrap();
        assert_eq!(solution.status, LpStatus::Optimal);
        assert_eq!(solution.optimum.unwrap().objective, 0.0);

        // Maximizing -X1 along the open direction is still bounded
        input.c1 = -1.0;
        input.c2 = 0.0;
        input.direction = Direction::Maximize;
        assert_eq!(solve(&input).unwrap().status, LpStatus::Optimal);
    }

    #[test]
    fn test_validation() {
        let input = LpInput::new(1.0, 1.0, Direction::Maximize, vec![]);
        assert!(matches!(region(&input), Err(CalcError::InvalidParameter { .. })));

        let input = LpInput::new(
            1.0,
            1.0,
            Direction::Maximize,
            vec![Constraint::new(1.0, 1.0, 1.0); 6],
        );
        assert!(solve(&input).is_err());

        let mut input = classic_input();
        input.x_max = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = classic_input();
        input.constraints[1].b = f64::NAN;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_json_defaults() {
        let input: LpInput = serde_json::from_str(
            r#"{"c1": 3.0, "c2": 2.0, "constraints": [{"a1": 1.0, "a2": 1.0, "b": 10.0}]}"#,
        )
        .unwrap();
        assert_eq!(input.direction, Direction::Maximize);
        assert_eq!(input.x_max, DEFAULT_WINDOW);
        assert_eq!(input.steps, DEFAULT_STEPS);
        assert_eq!(input.iso_levels, DEFAULT_ISO_LEVELS.to_vec());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Constraint::new(1.0, 1.0, 10.0).label(), "1X1 + 1X2 <= 10");
        assert_eq!(classic_input().objective_label(), "Maximize Z = 3X1 + 5X2");
    }

    #[test]
    fn test_idempotent() {
        let input = classic_input();
        assert_eq!(calculate(&input).unwrap(), calculate(&input).unwrap());
    }
}
