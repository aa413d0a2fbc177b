//! Text functions
//!
//! Positions and lengths count characters, not bytes.

use crate::args::{number_arg, string_arg, string_values, try_number_arg};
use crate::error::{FormulaError, FormulaResult};
use crate::evaluator::{EvaluationContext, FormulaValue};

/// Longest string REPT will build
const MAX_REPT_CHARS: usize = 32_767;

fn take_left(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

fn take_right(s: &str, n: usize) -> String {
    let len = s.chars().count();
    if n >= len {
        return s.to_string();
    }
    s.chars().skip(len - n).collect()
}

fn take_mid(s: &str, start0: usize, n: usize) -> String {
    s.chars().skip(start0).take(n).collect()
}

/// Non-negative character count from a numeric argument
fn count_arg(value: f64) -> usize {
    if value <= 0.0 {
        0
    } else {
        value.floor() as usize
    }
}

fn text(s: impl Into<String>) -> FormulaResult<FormulaValue> {
    Ok(FormulaValue::Text(s.into()))
}

/// CONCAT(text1, ...) and CONCATENATE(text1, ...)
pub fn fn_concat(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    text(string_values(args, ctx)?.concat())
}

/// UPPER(text)
pub fn fn_upper(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    text(string_arg(args, 0, ctx)?.to_uppercase())
}

/// LOWER(text)
pub fn fn_lower(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    text(string_arg(args, 0, ctx)?.to_lowercase())
}

/// PROPER(text) - capitalizes the first letter of each whitespace-delimited word
pub fn fn_proper(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_whitespace() {
            word_start = true;
            out.push(c);
        } else if word_start {
            out.extend(c.to_uppercase());
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    text(out)
}

/// TRIM(text) - strips the ends and collapses inner whitespace runs to one space
pub fn fn_trim(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    text(s.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// LEN(text)
pub fn fn_len(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    Ok(FormulaValue::Number(s.chars().count() as f64))
}

/// LEFT(text, [num_chars])
pub fn fn_left(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    let n = try_number_arg(args, 1, ctx)?.unwrap_or(1.0);
    text(take_left(&s, count_arg(n)))
}

/// RIGHT(text, [num_chars])
pub fn fn_right(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    let n = try_number_arg(args, 1, ctx)?.unwrap_or(1.0);
    text(take_right(&s, count_arg(n)))
}

/// MID(text, start_num, num_chars)
pub fn fn_mid(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    let start = number_arg(args, 1, ctx)?.floor();
    let n = number_arg(args, 2, ctx)?;

    if start < 1.0 {
        return Err(FormulaError::Argument(format!(
            "MID start must be at least 1, got {start}"
        )));
    }

    text(take_mid(&s, start as usize - 1, count_arg(n)))
}

/// SUBSTITUTE(text, old_text, new_text) - replaces every occurrence
pub fn fn_substitute(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    let old = string_arg(args, 1, ctx)?;
    let new = string_arg(args, 2, ctx)?;

    if old.is_empty() {
        return text(s);
    }
    text(s.replace(&old, &new))
}

/// REPT(text, number_times)
pub fn fn_rept(args: &[String], ctx: &EvaluationContext) -> FormulaResult<FormulaValue> {
    let s = string_arg(args, 0, ctx)?;
    let times = count_arg(number_arg(args, 1, ctx)?);

    let chars = s.chars().count();
    if chars.saturating_mul(times) > MAX_REPT_CHARS {
        return Err(FormulaError::Argument(format!(
            "REPT result longer than {MAX_REPT_CHARS} characters"
        )));
    }
    text(s.repeat(times))
}
