//! Conversions between raw cell text, numbers and display strings

use crate::error::FormulaResult;
use crate::evaluator::{evaluate_formula, settle, EvaluationContext};
use notegrid_core::{is_formula, Grid};

/// Parse text as a finite number
///
/// Surrounding whitespace is ignored. `inf` and `NaN` are not numbers here.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format a number for display
///
/// Integers print without decimals. Everything else is rounded to four
/// decimal places with trailing zeros removed.
///
/// ```rust
/// use notegrid_formula::format_number;
///
/// assert_eq!(format_number(6.0), "6");
/// assert_eq!(format_number(1.0 / 3.0), "0.3333");
/// assert_eq!(format_number(2.5), "2.5");
/// ```
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    if n.fract() == 0.0 {
        if n == 0.0 {
            return "0".to_string();
        }
        return format!("{n:.0}");
    }

    let fixed = format!("{n:.4}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Numeric value of a raw cell string
///
/// Formulas are evaluated in `ctx`; anything that does not end up as a number
/// (blank, text, error sentinels) is 0. Circular references still propagate.
pub fn to_number(raw: &str, ctx: &EvaluationContext) -> FormulaResult<f64> {
    if is_formula(raw) {
        let value = evaluate_formula(raw, ctx)?;
        return Ok(value.as_number().unwrap_or(0.0));
    }
    Ok(parse_number(raw).unwrap_or(0.0))
}

/// String value of a raw cell string, evaluating formulas in `ctx`
pub(crate) fn to_text(raw: &str, ctx: &EvaluationContext) -> FormulaResult<String> {
    if is_formula(raw) {
        return Ok(evaluate_formula(raw, ctx)?.to_string());
    }
    Ok(raw.to_string())
}

/// Display string of a raw cell string
///
/// Literals come back unchanged. Formulas are evaluated against `grid` with no
/// cell on the path, so a formula referring to itself only fails once it is
/// stored in a cell.
pub fn to_display_string(raw: &str, grid: &Grid) -> String {
    if !is_formula(raw) {
        return raw.to_string();
    }
    let ctx = EvaluationContext::new(grid);
    settle(evaluate_formula(raw, &ctx)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("42"), Some(42.0));
        assert_eq!(parse_number("  -3.5 "), Some(-3.5));
        assert_eq!(parse_number(".5"), Some(0.5));
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("12abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(1e15), "1000000000000000");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(2.0 / 3.0), "0.6667");
        assert_eq!(format_number(1.23456), "1.2346");
        assert_eq!(format_number(-1.5), "-1.5");
        assert_eq!(format_number(0.00001), "0");
        assert_eq!(format_number(-0.00001), "0");
    }

    #[test]
    fn test_to_number() {
        let grid = Grid::from_rows(vec![vec!["5", "=A1*2"]]);
        let ctx = EvaluationContext::new(&grid);
        assert_eq!(to_number("12", &ctx).unwrap(), 12.0);
        assert_eq!(to_number("", &ctx).unwrap(), 0.0);
        assert_eq!(to_number("abc", &ctx).unwrap(), 0.0);
        assert_eq!(to_number("=B1+1", &ctx).unwrap(), 11.0);
        assert_eq!(to_number("=UPPER(\"x\")", &ctx).unwrap(), 0.0);
        assert_eq!(to_number("=NOPE()", &ctx).unwrap(), 0.0);
    }

    #[test]
    fn test_to_display_string() {
        let grid = Grid::from_rows(vec![vec!["5", "=A1*2"]]);
        assert_eq!(to_display_string("hello", &grid), "hello");
        assert_eq!(to_display_string("=B1/4", &grid), "2.5");
        assert_eq!(to_display_string("=A1/0", &grid), "#DIV/0!");
        assert_eq!(to_display_string("=LOWER(\"AB\")", &grid), "ab");
    }
}
