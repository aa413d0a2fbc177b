//! Lookup and grouping functions
//!
//! Criteria matching is exact string equality. There is no wildcard or
//! comparison-operator syntax.

use crate::args::{string_arg, string_values};
use crate::coerce::parse_number;
use crate::error::FormulaResult;
use crate::evaluator::{EvaluationContext, FormulaValue};
use ahash::AHashSet;

/// UNIQUE(range, ...) - distinct non-empty values joined with ", "
pub fn fn_unique(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = string_values(args, ctx)?;
    let mut seen = AHashSet::new();
    let distinct: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|v| !v.is_empty() && seen.insert(*v))
        .collect();
    Ok(FormulaValue::Text(distinct.join(", ")))
}

/// COUNTIF(range, criteria)
pub fn fn_countif(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let range = string_values(args.get(..1).unwrap_or(&[]), ctx)?;
    let criteria = string_arg(args, 1, ctx)?;
    let count = range.iter().filter(|v| **v == criteria).count();
    Ok(FormulaValue::Number(count as f64))
}

/// SUMIF(range, criteria, [sum_range])
///
/// Cells pair with the sum range by position; sum cells without a numeric
/// value add 0.
pub fn fn_sumif(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let range = string_values(args.get(..1).unwrap_or(&[]), ctx)?;
    let criteria = string_arg(args, 1, ctx)?;
    let sum_values = match args.get(2) {
        Some(sum_range) => string_values(std::slice::from_ref(sum_range), ctx)?,
        None => range.clone(),
    };

    let sum = range
        .iter()
        .zip(sum_values.iter())
        .filter(|(v, _)| **v == criteria)
        .map(|(_, s)| parse_number(s).unwrap_or(0.0))
        .sum();
    Ok(FormulaValue::Number(sum))
}
