//! Date/time functions
//!
//! Dates are plain text: TODAY and NOW produce ISO-style strings, and
//! YEAR/MONTH/DAY read them back. There are no serial date numbers.

use crate::args::string_arg;
use crate::error::FormulaResult;
use crate::evaluator::{EvaluationContext, FormulaValue};
use chrono::{Datelike, NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date in any of the accepted text forms
///
/// Accepts `YYYY-MM-DD`, the same followed by a time, and `MM/DD/YYYY`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(text, "%m/%d/%Y"))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M"))
                .ok()
                .map(|dt| dt.date())
        })
}

/// The date named by the first argument, or the context's current date
fn date_arg(args: &[String], ctx: &EvaluationContext) -> FormulaResult<NaiveDate> {
    let text = string_arg(args, 0, ctx)?;
    Ok(parse_date(&text).unwrap_or_else(|| ctx.now().date()))
}

/// TODAY()
pub fn fn_today(_args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Text(
        ctx.now().date().format(DATE_FORMAT).to_string(),
    ))
}

/// NOW()
pub fn fn_now(_args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Text(
        ctx.now().format(DATETIME_FORMAT).to_string(),
    ))
}

/// YEAR([date])
pub fn fn_year(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let date = date_arg(args, ctx)?;
    Ok(FormulaValue::Number(date.year() as f64))
}

/// MONTH([date])
pub fn fn_month(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let date = date_arg(args, ctx)?;
    Ok(FormulaValue::Number(date.month() as f64))
}

/// DAY([date])
pub fn fn_day(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let date = date_arg(args, ctx)?;
    Ok(FormulaValue::Number(date.day() as f64))
}
