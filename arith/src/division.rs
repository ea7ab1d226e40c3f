//! Restoring binary long division of unsigned magnitudes, with the
//! quotient converted to a rounded decimal string.
//!
//! There are two modes.  [`divide_magnitudes`] is the
//! "fractional-preview" division: it always divides the smaller of
//! its operands by the larger, so the quotient is a proper fraction
//! (or exactly 1).  It does not compute `dividend ÷ divisor` when the
//! dividend is the larger operand.  [`divide_magnitudes_exact`]
//! always computes `dividend ÷ divisor`.

use std::cmp::Ordering;

use super::bitvector::BitVector;
use super::error::Error;
use super::primitives::{add, compare, same_width, subtract};


/// The largest number of decimal places a quotient may have.
pub const MAX_PRECISION: usize = 1024;

/// Selects which quotient a division computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DivisionMode {
    /// `min(a, b) ÷ max(a, b)`.
    FractionalPreview,
    /// `a ÷ b`.
    Exact,
}

/// Divides the smaller magnitude by the larger, giving a decimal
/// string rounded to `precision` digits after the point (for example
/// `"0.43478"` for 10 and 23, in either order).
///
/// Fails with [`Error::DivideByZero`] if `divisor` is zero, even
/// though the operands might be swapped.
pub fn divide_magnitudes(
    dividend: &BitVector,
    divisor: &BitVector,
    precision: usize,
) -> Result<String, Error> {
    divide_with_mode(dividend, divisor, precision, DivisionMode::FractionalPreview)
}

/// Divides `dividend` by `divisor`, giving a decimal string rounded to
/// `precision` digits after the point (for example `"2.30000"` for 23
/// and 10).
pub fn divide_magnitudes_exact(
    dividend: &BitVector,
    divisor: &BitVector,
    precision: usize,
) -> Result<String, Error> {
    divide_with_mode(dividend, divisor, precision, DivisionMode::Exact)
}

/// Divides in the given mode.  Fails with
/// [`Error::PrecisionTooLarge`] if `precision` exceeds
/// [`MAX_PRECISION`].
pub(crate) fn divide_with_mode(
    dividend: &BitVector,
    divisor: &BitVector,
    precision: usize,
    mode: DivisionMode,
) -> Result<String, Error> {
    same_width(dividend, divisor)?;
    if precision > MAX_PRECISION {
        return Err(Error::PrecisionTooLarge(precision));
    }
    if divisor.is_zero() {
        return Err(Error::DivideByZero);
    }
    let (numerator, denominator) = match mode {
        DivisionMode::FractionalPreview if compare(dividend, divisor)? == Ordering::Greater => {
            (divisor, dividend)
        }
        _ => (dividend, divisor),
    };
    // Four binary digits per decimal digit (plus four more) is more
    // than log2(10) per digit, so the binary fraction is at least as
    // precise as the decimal one we print.
    let fraction_bits = precision * 4 + 4;
    let quotient = restoring_divide(numerator, denominator, fraction_bits)?;
    format_decimal(&quotient, precision)
}

/// A quotient as computed by [`restoring_divide`].
struct Quotient {
    /// As wide as the numerator.
    integer: BitVector,
    fraction: BitVector,
    /// Set when the final remainder is zero, so `fraction` is the
    /// whole fractional quotient rather than a truncation of it.
    exact: bool,
}

/// Restoring division, producing the integer quotient and the first
/// `fraction_bits` digits of the fractional quotient.
fn restoring_divide(
    numerator: &BitVector,
    denominator: &BitVector,
    fraction_bits: usize,
) -> Result<Quotient, Error> {
    // The partial remainder is always less than the denominator, so
    // after shifting in one more digit it needs at most one more bit.
    let register_width = denominator.width() + 1;
    let divisor = denominator.zero_extend(register_width);
    let mut remainder = BitVector::zero(register_width)?;

    let mut step = |incoming: bool| -> Result<bool, Error> {
        remainder = remainder.shift_in_low(incoming);
        if compare(&remainder, &divisor)? == Ordering::Less {
            Ok(false)
        } else {
            remainder = subtract(&remainder, &divisor)?;
            Ok(true)
        }
    };

    let integer = numerator
        .iter()
        .map(&mut step)
        .collect::<Result<Vec<bool>, Error>>()?;
    let fraction = (0..fraction_bits)
        .map(|_| step(false))
        .collect::<Result<Vec<bool>, Error>>()?;
    Ok(Quotient {
        integer: BitVector::from_bits(integer),
        fraction: BitVector::from_bits(fraction),
        exact: remainder.is_zero(),
    })
}

/// Converts a quotient to decimal, rounding to `precision` decimal
/// digits.  Ties go to the even digit.
fn format_decimal(quotient: &Quotient, precision: usize) -> Result<String, Error> {
    let mut integer_value = quotient.integer.to_unsigned()?;
    let mut digits: Vec<u8> = Vec::with_capacity(precision);
    let mut rest = quotient.fraction.clone();
    for _ in 0..precision {
        let (digit, remaining) = times_ten(&rest)?;
        digits.push(digit);
        rest = remaining;
    }

    // What is left is below one unit in the last decimal place.  It
    // is exactly half a unit only if its leading digit is the only
    // one set and nothing was truncated.
    let last_digit_odd = match digits.last() {
        Some(digit) => digit % 2 == 1,
        None => integer_value % 2 == 1,
    };
    let tie = quotient.exact && rest.shift_left(1).is_zero();
    if rest.sign_bit() && (!tie || last_digit_odd) {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            integer_value = integer_value
                .checked_add(1)
                .ok_or(Error::TooWide(128))?;
        }
    }

    if precision == 0 {
        Ok(integer_value.to_string())
    } else {
        let fraction_digits: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
        Ok(format!("{integer_value}.{fraction_digits}"))
    }
}

/// Multiplies a binary fraction by ten, returning the decimal digit
/// which moves in front of the point and the remaining fraction.
/// Ten times `f` is `8f + 2f`, and four extra high-order digits hold
/// anything up to 9.
fn times_ten(fraction: &BitVector) -> Result<(u8, BitVector), Error> {
    let width = fraction.width();
    let wide = fraction.zero_extend(width + 4);
    let (product, _) = add(&wide.shift_left(3), &wide.shift_left(1))?;
    let digit = product.bits[..4]
        .iter()
        .fold(0_u8, |acc, bit| (acc << 1) | u8::from(*bit));
    Ok((digit, BitVector::from_bits(product.bits[4..].to_vec())))
}
