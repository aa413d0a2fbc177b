//! Logical functions

use crate::args::{number_arg, number_values, string_arg, try_number_arg};
use crate::error::FormulaResult;
use crate::evaluator::{EvaluationContext, FormulaValue};

/// IF(condition, value_if_true, [value_if_false])
///
/// The chosen branch yields its numeric value when it has one, otherwise its
/// string value. A missing false branch yields FALSE.
pub fn fn_if(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let condition = number_arg(args, 0, ctx)? != 0.0;
    let branch = if condition { 1 } else { 2 };

    if branch >= args.len() {
        return Ok(FormulaValue::Boolean(false));
    }

    match try_number_arg(args, branch, ctx)? {
        Some(n) => Ok(FormulaValue::Number(n)),
        None => Ok(FormulaValue::Text(string_arg(args, branch, ctx)?)),
    }
}

/// AND function
pub fn fn_and(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Boolean(values.iter().all(|n| *n != 0.0)))
}

/// OR function
pub fn fn_or(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Boolean(values.iter().any(|n| *n != 0.0)))
}

/// NOT function
pub fn fn_not(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Boolean(number_arg(args, 0, ctx)? == 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegrid_core::Grid;
    use pretty_assertions::assert_eq;

    fn call(f: crate::functions::FunctionImpl, args: &[&str]) -> FormulaValue {
        let grid = Grid::from_rows(vec![vec!["5", "0", "hello", "", "=A1*2"]]);
        let ctx = EvaluationContext::new(&grid);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        f(&args, &ctx).unwrap()
    }

    fn text(s: &str) -> FormulaValue {
        FormulaValue::Text(s.to_string())
    }

    #[test]
    fn test_if_branches() {
        assert_eq!(call(fn_if, &["A1", "\"yes\"", "\"no\""]), text("yes"));
        assert_eq!(call(fn_if, &["B1", "\"yes\"", "\"no\""]), text("no"));
        assert_eq!(call(fn_if, &["A1", "E1", "0"]), FormulaValue::Number(10.0));
        assert_eq!(call(fn_if, &["A1", "C1"]), text("hello"));
        assert_eq!(call(fn_if, &["A1", "D1"]), text(""));
        assert_eq!(call(fn_if, &["B1", "1"]), FormulaValue::Boolean(false));
    }

    #[test]
    fn test_if_condition_coercion() {
        // Text and blank conditions are false
        assert_eq!(call(fn_if, &["C1", "1", "2"]), FormulaValue::Number(2.0));
        assert_eq!(call(fn_if, &["D1", "1", "2"]), FormulaValue::Number(2.0));
        assert_eq!(call(fn_if, &["A1>0", "1", "2"]), FormulaValue::Number(2.0));
        assert_eq!(call(fn_if, &["NOT(B1)", "1", "2"]), FormulaValue::Number(1.0));
    }

    #[test]
    fn test_and_or_not() {
        assert_eq!(call(fn_and, &["A1", "E1"]), FormulaValue::Boolean(true));
        assert_eq!(call(fn_and, &["A1", "B1"]), FormulaValue::Boolean(false));
        assert_eq!(call(fn_or, &["B1", "E1"]), FormulaValue::Boolean(true));
        assert_eq!(call(fn_or, &["B1", "C1", "D1"]), FormulaValue::Boolean(false));
        assert_eq!(call(fn_not, &["B1"]), FormulaValue::Boolean(true));
        assert_eq!(call(fn_not, &["A1"]), FormulaValue::Boolean(false));
        assert_eq!(call(fn_not, &["D1"]), FormulaValue::Boolean(true));
    }
}
