//! Local evaluation of two-operand arithmetic questions.

use crate::types::{ArithmeticQuery, Operator};

/// Maximum fractional digits rendered for non-integer quotients.
const MAX_DECIMALS: usize = 6;

/// Why an arithmetic query could not be evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ArithmeticError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("result out of range")]
    Overflow,
}

/// Evaluate `lhs <op> rhs` and render the result as an answer string.
///
/// Integer results render without a decimal point. Non-integer quotients
/// render with up to six decimals, trailing zeros and point stripped
/// (`7 / 2` → `"3.5"`, `1 / 3` → `"0.333333"`).
///
/// # Errors
///
/// [`ArithmeticError::DivisionByZero`] for `x / 0`, and
/// [`ArithmeticError::Overflow`] if the exact result does not fit in `i128`.
pub fn evaluate(query: &ArithmeticQuery) -> Result<String, ArithmeticError> {
    let lhs = i128::from(query.lhs);
    let rhs = i128::from(query.rhs);

    let value = match query.operator {
        Operator::Add => lhs.checked_add(rhs),
        Operator::Subtract => lhs.checked_sub(rhs),
        Operator::Multiply => lhs.checked_mul(rhs),
        Operator::Divide => {
            if rhs == 0 {
                return Err(ArithmeticError::DivisionByZero);
            }
            if lhs % rhs != 0 {
                return Ok(format_fraction(query.lhs as f64 / query.rhs as f64));
            }
            Some(lhs / rhs)
        }
    };

    value
        .map(|v| v.to_string())
        .ok_or(ArithmeticError::Overflow)
}

/// Render a float with at most [`MAX_DECIMALS`] digits, trimming zeros.
fn format_fraction(value: f64) -> String {
    let fixed = format!("{:.*}", MAX_DECIMALS, value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_owned()
}
