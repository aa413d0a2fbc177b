//! Information functions

use crate::args::string_arg;
use crate::coerce::parse_number;
use crate::error::FormulaResult;
use crate::evaluator::{EvaluationContext, FormulaValue};

/// ISNUMBER(value)
pub fn fn_isnumber(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let v = string_arg(args, 0, ctx)?;
    Ok(FormulaValue::Boolean(parse_number(&v).is_some()))
}

/// ISBLANK(value)
pub fn fn_isblank(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let v = string_arg(args, 0, ctx)?;
    Ok(FormulaValue::Boolean(v.is_empty()))
}

/// ISTEXT(value) - non-empty and not a number
pub fn fn_istext(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let v = string_arg(args, 0, ctx)?;
    Ok(FormulaValue::Boolean(
        !v.is_empty() && parse_number(&v).is_none(),
    ))
}
