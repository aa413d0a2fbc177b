//! Formula evaluator
//!
//! A formula body is matched against five forms, strictly in this order:
//!
//! 1. function call spanning the whole body, e.g. `SUM(A1:A3, 10)`
//! 2. a single cell reference, e.g. `B2`
//! 3. simple arithmetic, `<ref> <op> <ref|number>` with `+ - * /`
//! 4. a numeric literal
//! 5. anything else is `#VALUE!`
//!
//! Cycle detection threads a [`Visited`] set by value through every descent
//! into another cell. Sibling operands each start from the set at their call
//! site, so `=A1+A1` never trips the guard.

use crate::args::parse_arguments;
use crate::coerce::{format_number, parse_number, to_number};
use crate::error::{FormulaError, FormulaResult};
use crate::functions::FunctionRegistry;
use ahash::AHashSet;
use chrono::{Local, NaiveDateTime};
use lazy_regex::regex_captures;
use notegrid_core::{is_formula, CellError, CellRef, Grid, FORMULA_MARKER};
use std::fmt;
use std::sync::OnceLock;

/// Global function registry (lazily initialized)
static FUNCTION_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// The built-in function registry
pub fn function_registry() -> &'static FunctionRegistry {
    FUNCTION_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Value types during formula evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(CellError),
}

impl FormulaValue {
    /// Convert to number, if possible
    ///
    /// Text converts only when it parses as a number; error sentinels never do.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FormulaValue::Number(n) => Some(*n),
            FormulaValue::Boolean(true) => Some(1.0),
            FormulaValue::Boolean(false) => Some(0.0),
            FormulaValue::Text(s) => parse_number(s),
            FormulaValue::Error(_) => None,
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, FormulaValue::Error(_))
    }

    /// Get the error if this is one
    pub fn get_error(&self) -> Option<CellError> {
        match self {
            FormulaValue::Error(e) => Some(*e),
            _ => None,
        }
    }
}

impl fmt::Display for FormulaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaValue::Number(n) => f.write_str(&format_number(*n)),
            FormulaValue::Text(s) => f.write_str(s),
            FormulaValue::Boolean(true) => f.write_str("TRUE"),
            FormulaValue::Boolean(false) => f.write_str("FALSE"),
            FormulaValue::Error(e) => f.write_str(e.as_str()),
        }
    }
}

impl From<CellError> for FormulaValue {
    fn from(e: CellError) -> Self {
        FormulaValue::Error(e)
    }
}

/// Cells already entered on the current evaluation path
///
/// Never mutated in place: [`Visited::with`] returns an extended copy.
#[derive(Debug, Clone, Default)]
pub struct Visited(AHashSet<CellRef>);

impl Visited {
    /// An empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a cell is on the path
    pub fn contains(&self, cell: CellRef) -> bool {
        self.0.contains(&cell)
    }

    /// A copy of this path extended with `cell`
    pub fn with(&self, cell: CellRef) -> Self {
        let mut set = self.0.clone();
        set.insert(cell);
        Self(set)
    }

    /// Number of cells on the path
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the path is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    grid: &'a Grid,
    visited: Visited,
    now: NaiveDateTime,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context over a grid snapshot, reading the system clock once
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            visited: Visited::new(),
            now: Local::now().naive_local(),
        }
    }

    /// Replace the clock used by TODAY/NOW and the date fallbacks
    pub fn with_clock(mut self, now: NaiveDateTime) -> Self {
        self.now = now;
        self
    }

    /// The grid being evaluated
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Evaluation-time clock
    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Cells entered on the current path
    pub fn visited(&self) -> &Visited {
        &self.visited
    }

    /// Context for evaluating inside `cell`
    ///
    /// Fails with a circular reference if `cell` is already on the path.
    pub fn descend(&self, cell: CellRef) -> FormulaResult<EvaluationContext<'a>> {
        if self.visited.contains(cell) {
            tracing::debug!(%cell, depth = self.visited.len(), "circular reference");
            return Err(FormulaError::CircularReference(cell.to_string()));
        }
        Ok(Self {
            grid: self.grid,
            visited: self.visited.with(cell),
            now: self.now,
        })
    }

    /// Current value of a referenced cell
    ///
    /// Literals come back as text, formulas are evaluated. Returns `None` for
    /// coordinates outside the grid.
    pub fn cell_value(&self, cell: CellRef) -> FormulaResult<Option<FormulaValue>> {
        let raw = match self.grid.value(cell) {
            Some(raw) => raw,
            None => return Ok(None),
        };
        if !is_formula(raw) {
            return Ok(Some(FormulaValue::Text(raw.to_string())));
        }
        let inner = self.descend(cell)?;
        evaluate_formula(raw, &inner).map(Some)
    }

    /// Numeric value of a referenced cell, with the 0 fallback of [`to_number`]
    pub fn cell_number(&self, cell: CellRef) -> FormulaResult<f64> {
        let raw = self.grid.value(cell).unwrap_or("");
        let inner = self.descend(cell)?;
        to_number(raw, &inner)
    }

    /// Evaluate a cell as the top of an evaluation
    ///
    /// Never fails: circular references become `#REF!` and function failures
    /// `#ERROR!`.
    pub fn evaluate_cell(&self, cell: CellRef) -> FormulaValue {
        let raw = self.grid.value(cell).unwrap_or("");
        if !is_formula(raw) {
            return FormulaValue::Text(raw.to_string());
        }
        settle(
            self.descend(cell)
                .and_then(|inner| evaluate_formula(raw, &inner)),
        )
    }
}

/// Turn an internal result into the value shown for a cell
pub(crate) fn settle(result: FormulaResult<FormulaValue>) -> FormulaValue {
    match result {
        Ok(value) => value,
        Err(FormulaError::CircularReference(_)) => FormulaValue::Error(CellError::Ref),
        Err(e) => {
            tracing::debug!(error = %e, "evaluation failed");
            FormulaValue::Error(CellError::Error)
        }
    }
}

/// Evaluate one cell of a grid
pub fn evaluate_cell(grid: &Grid, cell: CellRef) -> FormulaValue {
    EvaluationContext::new(grid).evaluate_cell(cell)
}

/// Display string for one cell of a grid
///
/// Literals are returned unchanged; out-of-grid cells are empty.
pub fn display_value(grid: &Grid, cell: CellRef) -> String {
    evaluate_cell(grid, cell).to_string()
}

/// Display strings for every cell, row-major
pub fn evaluate_grid(grid: &Grid) -> Vec<Vec<String>> {
    let ctx = EvaluationContext::new(grid);
    (0..grid.row_count())
        .map(|row| {
            (0..grid.col_count())
                .map(|col| ctx.evaluate_cell(CellRef::new(row, col)).to_string())
                .collect()
        })
        .collect()
}

/// Evaluate formula text (with or without the leading marker)
pub fn evaluate_formula(formula: &str, ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let body = formula.strip_prefix(FORMULA_MARKER).unwrap_or(formula);
    evaluate_expression(body, ctx)
}

/// Run the five-stage dispatch over a formula body
pub(crate) fn evaluate_expression(
    body: &str,
    ctx: &EvaluationContext,
) -> FormulaResult<FormulaValue> {
    let body = body.trim();

    if let Some((name, args)) = split_function_call(body) {
        tracing::trace!(function = name, "dispatch: function call");
        return call_function(name, args, ctx);
    }

    if let Some(cell) = CellRef::parse(body) {
        tracing::trace!(%cell, "dispatch: reference");
        return Ok(FormulaValue::Number(ctx.cell_number(cell)?));
    }

    if let Some((_, left, op, right)) = regex_captures!(
        r"^([A-Za-z]+[0-9]+)\s*([-+*/])\s*([A-Za-z]+[0-9]+|[0-9]+(?:\.[0-9]+)?)$",
        body
    ) {
        tracing::trace!(left, op, right, "dispatch: arithmetic");
        return evaluate_arithmetic(left, op, right, ctx);
    }

    if let Some(n) = parse_number(body) {
        return Ok(FormulaValue::Number(n));
    }

    Ok(FormulaValue::Error(CellError::Value))
}

/// Split `NAME(ARGS)` when the parenthesis after the name closes at the very end
pub(crate) fn split_function_call(body: &str) -> Option<(&str, &str)> {
    let (_, name, args) = regex_captures!(r"(?s)^([A-Za-z][A-Za-z0-9]*)\((.*)\)$", body)?;
    parens_balanced(args).then_some((name, args))
}

/// True when no `)` outside a quoted literal closes more than was opened
fn parens_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for c in text.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            (None, _) => {}
        }
    }
    depth == 0
}

/// Evaluate a function call
fn call_function(
    name: &str,
    args_text: &str,
    ctx: &EvaluationContext,
) -> FormulaResult<FormulaValue> {
    let name = name.to_uppercase();
    let func = match function_registry().get(&name) {
        Some(func) => func,
        None => {
            tracing::debug!(function = %name, "unknown function");
            return Ok(FormulaValue::Error(CellError::Name));
        }
    };

    let args = parse_arguments(args_text);
    match func.call(&args, ctx) {
        Ok(FormulaValue::Number(n)) if !n.is_finite() => {
            tracing::debug!(function = %name, "non-finite result");
            Ok(FormulaValue::Error(CellError::Error))
        }
        Ok(value) => Ok(value),
        Err(e @ FormulaError::CircularReference(_)) => Err(e),
        Err(e) => {
            tracing::debug!(function = %name, error = %e, "function failed");
            Ok(FormulaValue::Error(CellError::Error))
        }
    }
}

/// Evaluate `<ref> <op> <ref|number>`
fn evaluate_arithmetic(
    left: &str,
    op: &str,
    right: &str,
    ctx: &EvaluationContext,
) -> FormulaResult<FormulaValue> {
    let l = operand(left, ctx)?;
    let r = operand(right, ctx)?;

    let result = match op {
        "+" => l + r,
        "-" => l - r,
        "*" => l * r,
        // "/" is the only operator left
        _ => {
            if r == 0.0 {
                return Ok(FormulaValue::Error(CellError::Div0));
            }
            l / r
        }
    };

    if result.is_finite() {
        Ok(FormulaValue::Number(result))
    } else {
        Ok(FormulaValue::Error(CellError::Value))
    }
}

fn operand(text: &str, ctx: &EvaluationContext) -> FormulaResult<f64> {
    match CellRef::parse(text) {
        Some(cell) => ctx.cell_number(cell),
        None => Ok(parse_number(text).unwrap_or(0.0)),
    }
}
