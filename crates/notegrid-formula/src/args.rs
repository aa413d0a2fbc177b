//! Argument extraction
//!
//! Functions receive their arguments as raw text. The helpers here turn that
//! text into flat lists of numbers or strings by resolving nested calls,
//! ranges, references and literals against the evaluation context.

use crate::coerce::{parse_number, to_text};
use crate::error::FormulaResult;
use crate::evaluator::{evaluate_expression, split_function_call, EvaluationContext, FormulaValue};
use notegrid_core::{CellRange, CellRef};

/// Split argument text on top-level commas
///
/// Commas nested inside parentheses or inside a `"..."` / `'...'` literal do
/// not split. Arguments are trimmed and empty ones dropped.
///
/// ```rust
/// use notegrid_formula::args::parse_arguments;
///
/// assert_eq!(
///     parse_arguments(r#"A1:A3, MAX(B1, 2), "a,b""#),
///     vec!["A1:A3", "MAX(B1, 2)", r#""a,b""#]
/// );
/// ```
pub fn parse_arguments(text: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;

    for c in text.chars() {
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
                current.push(c);
            }
            None => match c {
                '"' | '\'' => {
                    quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    depth += 1;
                    current.push(c);
                }
                ')' => {
                    depth = depth.saturating_sub(1);
                    current.push(c);
                }
                ',' if depth == 0 => {
                    args.push(std::mem::take(&mut current));
                }
                _ => current.push(c),
            },
        }
    }
    args.push(current);

    args.into_iter()
        .map(|arg| arg.trim().to_string())
        .filter(|arg| !arg.is_empty())
        .collect()
}

/// Strip one layer of matching `"` or `'` quotes
///
/// Returns `None` if the argument is not a quoted literal.
pub fn strip_quotes(arg: &str) -> Option<&str> {
    ['"', '\'']
        .into_iter()
        .find_map(|q| arg.strip_prefix(q)?.strip_suffix(q))
}

/// Flatten arguments into the numbers they resolve to
///
/// Anything without a numeric value (blank or text cells, quoted literals,
/// out-of-grid references, unparseable ranges) is skipped rather than counted
/// as zero.
pub fn number_values(args: &[String], ctx: &EvaluationContext) -> FormulaResult<Vec<f64>> {
    let mut values = Vec::new();
    for arg in args {
        push_numbers(arg, ctx, &mut values)?;
    }
    Ok(values)
}

fn push_numbers(arg: &str, ctx: &EvaluationContext, out: &mut Vec<f64>) -> FormulaResult<()> {
    if strip_quotes(arg).is_some() {
        return Ok(());
    }

    if split_function_call(arg).is_some() {
        match evaluate_expression(arg, ctx)? {
            FormulaValue::Number(n) => out.push(n),
            FormulaValue::Boolean(b) => out.push(if b { 1.0 } else { 0.0 }),
            _ => {}
        }
        return Ok(());
    }

    if arg.contains(':') {
        let clipped = CellRange::parse(arg).and_then(|range| ctx.grid().clip(&range));
        if let Some(range) = clipped {
            for cell in range.cells() {
                if let Some(n) = cell_number(cell, ctx)? {
                    out.push(n);
                }
            }
        }
        return Ok(());
    }

    if let Some(cell) = CellRef::parse(arg) {
        if let Some(n) = cell_number(cell, ctx)? {
            out.push(n);
        }
        return Ok(());
    }

    if let Some(n) = parse_number(arg) {
        out.push(n);
        return Ok(());
    }

    if let Some(n) = evaluate_expression(arg, ctx)?.as_number() {
        out.push(n);
    }
    Ok(())
}

/// Numeric value of a cell, or `None` when it has none
fn cell_number(cell: CellRef, ctx: &EvaluationContext) -> FormulaResult<Option<f64>> {
    Ok(ctx.cell_value(cell)?.and_then(|value| value.as_number()))
}

/// Display string of a cell; `""` outside the grid
fn cell_text(cell: CellRef, ctx: &EvaluationContext) -> FormulaResult<String> {
    match ctx.grid().value(cell) {
        Some(raw) => to_text(raw, &ctx.descend(cell)?),
        None => Ok(String::new()),
    }
}

/// Flatten arguments into their string values
///
/// Unlike [`number_values`] nothing is skipped: blank range cells and
/// out-of-grid references contribute `""`.
pub fn string_values(args: &[String], ctx: &EvaluationContext) -> FormulaResult<Vec<String>> {
    let mut values = Vec::new();
    for arg in args {
        push_strings(arg, ctx, &mut values)?;
    }
    Ok(values)
}

fn push_strings(arg: &str, ctx: &EvaluationContext, out: &mut Vec<String>) -> FormulaResult<()> {
    if let Some(inner) = strip_quotes(arg) {
        out.push(inner.to_string());
        return Ok(());
    }

    if split_function_call(arg).is_some() {
        out.push(evaluate_expression(arg, ctx)?.to_string());
        return Ok(());
    }

    if let Some(range) = CellRange::parse(arg) {
        if let Some(range) = ctx.grid().clip(&range) {
            for cell in range.cells() {
                out.push(cell_text(cell, ctx)?);
            }
        }
        return Ok(());
    }

    if let Some(cell) = CellRef::parse(arg) {
        out.push(cell_text(cell, ctx)?);
        return Ok(());
    }

    out.push(arg.to_string());
    Ok(())
}

/// Numeric value of the argument at `index`, if it resolves to one
pub fn try_number_arg(
    args: &[String],
    index: usize,
    ctx: &EvaluationContext,
) -> FormulaResult<Option<f64>> {
    match args.get(index) {
        Some(arg) => {
            let mut values = Vec::new();
            push_numbers(arg, ctx, &mut values)?;
            Ok(values.first().copied())
        }
        None => Ok(None),
    }
}

/// Numeric value of the argument at `index`, 0 when missing or unresolvable
pub fn number_arg(args: &[String], index: usize, ctx: &EvaluationContext) -> FormulaResult<f64> {
    Ok(try_number_arg(args, index, ctx)?.unwrap_or(0.0))
}

/// String value of the argument at `index`, `""` when missing
pub fn string_arg(args: &[String], index: usize, ctx: &EvaluationContext) -> FormulaResult<String> {
    match args.get(index) {
        Some(arg) => {
            let mut values = Vec::new();
            push_strings(arg, ctx, &mut values)?;
            Ok(values.into_iter().next().unwrap_or_default())
        }
        None => Ok(String::new()),
    }
}
