//! Statistical functions

use super::math::mean;
use crate::args::{number_values, string_values};
use crate::error::FormulaResult;
use crate::evaluator::{EvaluationContext, FormulaValue};

/// COUNTA(value1, [value2], ...) - Counts non-empty values
///
/// Works over string values, so text, numbers and error sentinels all count;
/// blank cells and out-of-grid references do not.
pub fn fn_counta(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let count = string_values(args, ctx)?
        .iter()
        .filter(|s| !s.is_empty())
        .count();
    Ok(FormulaValue::Number(count as f64))
}

/// MEDIAN(number1, [number2], ...)
pub fn fn_median(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let mut values = number_values(args, ctx)?;
    if values.is_empty() {
        return Ok(FormulaValue::Number(0.0));
    }

    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };
    Ok(FormulaValue::Number(median))
}

/// STDEV(number1, [number2], ...) - sample standard deviation
pub fn fn_stdev(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Number(sample_variance(&values).sqrt()))
}

/// VAR(number1, [number2], ...) - sample variance
pub fn fn_var(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Number(sample_variance(&values)))
}

/// Variance with an n-1 divisor; 0 for fewer than two values
fn sample_variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegrid_core::Grid;
    use pretty_assertions::assert_eq;

    fn num(f: crate::functions::FunctionImpl, args: &[&str]) -> f64 {
        let grid = Grid::from_rows(vec![
            vec!["2", "4", "4", "4"],
            vec!["5", "5", "7", "9"],
            vec!["", "abc", "=FAKE()", ""],
        ]);
        let ctx = EvaluationContext::new(&grid);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        match f(&args, &ctx).unwrap() {
            FormulaValue::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_counta() {
        assert_eq!(num(fn_counta, &["A3:D3"]), 2.0);
        assert_eq!(num(fn_counta, &["A1:D2", "\"x\"", "\"\""]), 9.0);
        assert_eq!(num(fn_counta, &["Z99"]), 0.0);
    }

    #[test]
    fn test_median() {
        assert_eq!(num(fn_median, &["A1:D2"]), 4.5);
        assert_eq!(num(fn_median, &["3", "1", "2"]), 2.0);
        assert_eq!(num(fn_median, &["A3:D3"]), 0.0);
    }

    #[test]
    fn test_variance_and_stdev() {
        // Population of 2,4,4,4,5,5,7,9 has mean 5 and squared deviations summing to 32
        assert_eq!(num(fn_var, &["A1:D2"]), 32.0 / 7.0);
        assert_eq!(num(fn_stdev, &["A1:D2"]), (32.0_f64 / 7.0).sqrt());
        assert_eq!(num(fn_var, &["5"]), 0.0);
        assert_eq!(num(fn_stdev, &["A3:D3"]), 0.0);
    }
}
