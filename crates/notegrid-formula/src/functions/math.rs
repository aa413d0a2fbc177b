//! Math functions

use crate::args::{number_arg, number_values, try_number_arg};
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{EvaluationContext, FormulaValue};

/// SUM function
pub fn fn_sum(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Number(values.iter().sum()))
}

/// AVERAGE function
///
/// An empty value list averages to 0.
pub fn fn_average(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Number(mean(&values)))
}

/// COUNT function
pub fn fn_count(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    Ok(FormulaValue::Number(values.len() as f64))
}

/// MAX function
pub fn fn_max(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    let max = values.iter().copied().reduce(f64::max).unwrap_or(0.0);
    Ok(FormulaValue::Number(max))
}

/// MIN function
pub fn fn_min(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    let min = values.iter().copied().reduce(f64::min).unwrap_or(0.0);
    Ok(FormulaValue::Number(min))
}

/// PRODUCT function
pub fn fn_product(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let values = number_values(args, ctx)?;
    if values.is_empty() {
        return Ok(FormulaValue::Number(0.0));
    }
    Ok(FormulaValue::Number(values.iter().product()))
}

/// ABS(number)
pub fn fn_abs(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Number(number_arg(args, 0, ctx)?.abs()))
}

/// ROUND(number, [num_digits])
pub fn fn_round(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let number = number_arg(args, 0, ctx)?;
    let num_digits = number_arg(args, 1, ctx)?.trunc().clamp(-308.0, 308.0) as i32;
    Ok(FormulaValue::Number(round_half_away(number, num_digits)))
}

/// Round half away from zero: 2.5 -> 3, -2.5 -> -3
pub(crate) fn round_half_away(number: f64, num_digits: i32) -> f64 {
    let half_away = |x: f64| {
        if x >= 0.0 {
            (x + 0.5).floor()
        } else {
            (x - 0.5).ceil()
        }
    };

    // Negative digits round to the left of the decimal point
    if num_digits < 0 {
        let divisor = 10_f64.powi(-num_digits);
        half_away(number / divisor) * divisor
    } else {
        let multiplier = 10_f64.powi(num_digits);
        half_away(number * multiplier) / multiplier
    }
}

fn significance_arg(args: &[String], ctx: &EvaluationContext, function: &str) -> FormulaResult<f64> {
    let significance = try_number_arg(args, 1, ctx)?.unwrap_or(1.0);
    if significance == 0.0 {
        return Err(FormulaError::Argument(format!(
            "{function} significance cannot be 0"
        )));
    }
    Ok(significance)
}

/// FLOOR(number, [significance])
pub fn fn_floor(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let number = number_arg(args, 0, ctx)?;
    let significance = significance_arg(args, ctx, "FLOOR")?;
    Ok(FormulaValue::Number((number / significance).floor() * significance))
}

/// CEILING(number, [significance])
pub fn fn_ceiling(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let number = number_arg(args, 0, ctx)?;
    let significance = significance_arg(args, ctx, "CEILING")?;
    Ok(FormulaValue::Number((number / significance).ceil() * significance))
}

/// INT(number) - rounds down to the nearest integer
pub fn fn_int(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Number(number_arg(args, 0, ctx)?.floor()))
}

/// SQRT(number)
pub fn fn_sqrt(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let number = number_arg(args, 0, ctx)?;
    if number < 0.0 {
        return Err(FormulaError::Argument(
            "SQRT of a negative number".to_string(),
        ));
    }
    Ok(FormulaValue::Number(number.sqrt()))
}

/// POWER(number, power)
pub fn fn_power(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let base = number_arg(args, 0, ctx)?;
    let exponent = number_arg(args, 1, ctx)?;
    Ok(FormulaValue::Number(base.powf(exponent)))
}

/// MOD(number, divisor) - the result takes the sign of the divisor
pub fn fn_mod(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let number = number_arg(args, 0, ctx)?;
    let divisor = number_arg(args, 1, ctx)?;

    if divisor == 0.0 {
        return Err(FormulaError::Argument("MOD by zero".to_string()));
    }

    Ok(FormulaValue::Number(
        number - divisor * (number / divisor).floor(),
    ))
}

/// PI()
pub fn fn_pi(_args: &[String], _ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Number(std::f64::consts::PI))
}

/// RAND() - uniform in [0, 1)
pub fn fn_rand(_args: &[String], _ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    Ok(FormulaValue::Number(rng.gen::<f64>()))
}

/// RANDBETWEEN(bottom, top) - inclusive on both ends
pub fn fn_randbetween(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    use rand::Rng;

    let bottom = number_arg(args, 0, ctx)?.ceil() as i64;
    let top = number_arg(args, 1, ctx)?.floor() as i64;

    if bottom > top {
        return Err(FormulaError::Argument(format!(
            "RANDBETWEEN bottom {bottom} is greater than top {top}"
        )));
    }

    let mut rng = rand::thread_rng();
    let result = rng.gen_range(bottom..=top);
    Ok(FormulaValue::Number(result as f64))
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notegrid_core::Grid;
    use pretty_assertions::assert_eq;

    fn call(f: crate::functions::FunctionImpl, grid: &Grid, args: &[&str]) -> FormulaValue {
        let ctx = EvaluationContext::new(grid);
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        f(&args, &ctx).unwrap()
    }

    fn num(f: crate::functions::FunctionImpl, args: &[&str]) -> f64 {
        let grid = Grid::from_rows(vec![vec!["1", "2", "3", "", "text"]]);
        match call(f, &grid, args) {
            FormulaValue::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn test_aggregates() {
        assert_eq!(num(fn_sum, &["A1:E1", "4"]), 10.0);
        assert_eq!(num(fn_average, &["A1:E1"]), 2.0);
        assert_eq!(num(fn_count, &["A1:E1"]), 3.0);
        assert_eq!(num(fn_max, &["A1:E1", "-7"]), 3.0);
        assert_eq!(num(fn_min, &["A1:E1", "-7"]), -7.0);
        assert_eq!(num(fn_product, &["A1:C1", "4"]), 24.0);
    }

    #[test]
    fn test_empty_aggregates() {
        assert_eq!(num(fn_sum, &["D1:E1"]), 0.0);
        assert_eq!(num(fn_average, &["D1:E1"]), 0.0);
        assert_eq!(num(fn_max, &["D1"]), 0.0);
        assert_eq!(num(fn_min, &["E1"]), 0.0);
        assert_eq!(num(fn_product, &["\"x\""]), 0.0);
    }

    #[test]
    fn test_round() {
        assert_eq!(num(fn_round, &["2.5"]), 3.0);
        assert_eq!(num(fn_round, &["-2.5"]), -3.0);
        assert_eq!(num(fn_round, &["2.4"]), 2.0);
        assert_eq!(num(fn_round, &["3.14159", "2"]), 3.14);
        assert_eq!(num(fn_round, &["1234", "-2"]), 1200.0);
    }

    #[test]
    fn test_floor_ceiling_int() {
        assert_eq!(num(fn_floor, &["2.7"]), 2.0);
        assert_eq!(num(fn_floor, &["-2.2"]), -3.0);
        assert_eq!(num(fn_floor, &["7", "5"]), 5.0);
        assert_eq!(num(fn_ceiling, &["2.1"]), 3.0);
        assert_eq!(num(fn_ceiling, &["7", "5"]), 10.0);
        assert_eq!(num(fn_int, &["-1.5"]), -2.0);
        assert_eq!(num(fn_int, &["1.9"]), 1.0);

        let grid = Grid::default();
        let ctx = EvaluationContext::new(&grid);
        let args = vec!["3".to_string(), "0".to_string()];
        assert!(fn_floor(&args, &ctx).is_err());
        assert!(fn_ceiling(&args, &ctx).is_err());
    }

    #[test]
    fn test_mod_follows_divisor_sign() {
        assert_eq!(num(fn_mod, &["10", "3"]), 1.0);
        assert_eq!(num(fn_mod, &["-10", "3"]), 2.0);
        assert_eq!(num(fn_mod, &["10", "-3"]), -2.0);
        assert_eq!(num(fn_mod, &["5.5", "2"]), 1.5);
    }

    #[test]
    fn test_domain_errors() {
        let grid = Grid::default();
        let ctx = EvaluationContext::new(&grid);
        let to_args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(fn_sqrt(&to_args(&["-4"]), &ctx).is_err());
        assert!(fn_mod(&to_args(&["4", "0"]), &ctx).is_err());
        assert!(fn_randbetween(&to_args(&["5", "1"]), &ctx).is_err());
    }

    #[test]
    fn test_unary_math() {
        assert_eq!(num(fn_abs, &["-3.5"]), 3.5);
        assert_eq!(num(fn_sqrt, &["16"]), 4.0);
        assert_eq!(num(fn_power, &["2", "10"]), 1024.0);
        assert_eq!(num(fn_pi, &[]), std::f64::consts::PI);
    }

    #[test]
    fn test_rand_ranges() {
        for _ in 0..100 {
            let r = num(fn_rand, &[]);
            assert!((0.0..1.0).contains(&r));

            let n = num(fn_randbetween, &["1.2", "3.8"]);
            assert!(n == 2.0 || n == 3.0, "got {n}");
        }
        assert_eq!(num(fn_randbetween, &["4", "4"]), 4.0);
    }
}
