//! A minimal normalized floating-point adder.
//!
//! A number is a sign digit, an exponent field and a mantissa field.
//! The mantissa is a binary fraction `0.m₁m₂…` in [0, 1) and the
//! exponent is a signed integer stored in one of the three sign
//! encodings, so the value is `(-1)^sign × 0.m₁m₂… × 2^exponent`.
//! This has nothing to do with IEEE-754: there is no hidden bit, no
//! bias, and no special values.

use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use tracing::{event, Level};

use super::bitvector::BitVector;
use super::encoding::Encoding;
use super::error::Error;
use super::primitives::{add, compare, subtract};

#[cfg(test)]
mod tests;

/// Sign, exponent and mantissa of a floating-point number.
///
/// A normalized triple is either the canonical zero (positive sign,
/// exponent and mantissa all zeros) or has a mantissa whose leading
/// digit is 1.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FloatTriple {
    /// Set for negative numbers.
    pub sign: bool,
    pub exponent: BitVector,
    pub mantissa: BitVector,
}

impl FloatTriple {
    pub fn new(sign: bool, exponent: BitVector, mantissa: BitVector) -> FloatTriple {
        FloatTriple {
            sign,
            exponent,
            mantissa,
        }
    }

    /// Builds a triple from exponent and mantissa digit strings.
    pub fn parse(sign: bool, exponent: &str, mantissa: &str) -> Result<FloatTriple, Error> {
        Ok(FloatTriple::new(sign, exponent.parse()?, mantissa.parse()?))
    }

    /// The canonical zero.
    pub fn zero(exponent_width: usize, mantissa_width: usize) -> Result<FloatTriple, Error> {
        Ok(FloatTriple::new(
            false,
            BitVector::zero(exponent_width)?,
            BitVector::zero(mantissa_width)?,
        ))
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_normalized(&self) -> bool {
        if self.mantissa.is_zero() {
            !self.sign && self.exponent.is_zero()
        } else {
            self.mantissa.sign_bit()
        }
    }

    /// The value of the triple, decoding the exponent field with
    /// `exponent_encoding`.
    pub fn value(&self, exponent_encoding: Encoding) -> Result<f64, Error> {
        let exponent = exponent_encoding.decode(&self.exponent)?;
        Ok(value_of(self.sign, i128::from(exponent), &self.mantissa))
    }
}

impl Display for FloatTriple {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{} {} {}",
            if self.sign { '1' } else { '0' },
            self.exponent,
            self.mantissa
        )
    }
}

/// The normalized result of [`float_add`] together with its decimal
/// value.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloatSum {
    pub triple: FloatTriple,
    pub value: f64,
}

impl Display for FloatSum {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} = {}", self.triple, self.value)
    }
}

/// `(-1)^sign × Σ mantissaᵢ × 2^-(i+1) × 2^exponent`.
fn value_of(sign: bool, exponent: i128, mantissa: &BitVector) -> f64 {
    let magnitude: f64 = mantissa
        .iter()
        .enumerate()
        .filter(|(_, bit)| *bit)
        .map(|(i, _)| 2.0_f64.powf((exponent - 1 - i as i128) as f64))
        .sum();
    if sign {
        -magnitude
    } else {
        magnitude
    }
}

fn check_field(field: &BitVector, expected_width: usize) -> Result<(), Error> {
    if field.width() == expected_width {
        Ok(())
    } else {
        Err(Error::WidthMismatch {
            left: field.width(),
            right: expected_width,
        })
    }
}

/// Adds two floating-point numbers whose exponents are stored in
/// `exponent_encoding`.
///
/// The mantissa of the operand with the smaller exponent is shifted
/// right to align it with the other.  Mantissas of like sign are
/// added (a carry out is absorbed by shifting right once and
/// incrementing the exponent); mantissas of unlike sign are
/// subtracted, smaller from larger, and the result takes the sign of
/// the larger.  Finally the result is normalized by shifting left
/// until the leading mantissa digit is 1.
///
/// Fails with [`Error::ExponentOutOfRange`] if the result's exponent
/// cannot be encoded in `exponent_width` digits, and with
/// [`Error::WidthMismatch`] if a field of either operand does not
/// have the stated width.
pub fn float_add(
    a: &FloatTriple,
    b: &FloatTriple,
    exponent_encoding: Encoding,
    mantissa_width: usize,
    exponent_width: usize,
) -> Result<FloatSum, Error> {
    for operand in [a, b] {
        check_field(&operand.exponent, exponent_width)?;
        check_field(&operand.mantissa, mantissa_width)?;
    }
    let exponent_a = i128::from(exponent_encoding.decode(&a.exponent)?);
    let exponent_b = i128::from(exponent_encoding.decode(&b.exponent)?);
    event!(
        Level::TRACE,
        "exponents: {} ({}), {} ({})",
        a.exponent,
        exponent_a,
        b.exponent,
        exponent_b
    );

    // Align the exponents.
    let shift_of = |difference: i128| usize::try_from(difference).unwrap_or(usize::MAX);
    let (mantissa_a, mantissa_b, mut exponent) = match exponent_a.cmp(&exponent_b) {
        Ordering::Greater => (
            a.mantissa.clone(),
            b.mantissa.shift_right(shift_of(exponent_a - exponent_b)),
            exponent_a,
        ),
        _ => (
            a.mantissa.shift_right(shift_of(exponent_b - exponent_a)),
            b.mantissa.clone(),
            exponent_b,
        ),
    };
    event!(
        Level::TRACE,
        "aligned mantissas: {} and {}, exponent {}",
        mantissa_a,
        mantissa_b,
        exponent
    );

    let (sign, mut mantissa) = if a.sign == b.sign {
        let (sum, carry) = add(&mantissa_a, &mantissa_b)?;
        event!(Level::TRACE, "mantissa sum: {} (carry: {})", sum, carry);
        if carry {
            exponent += 1;
            (a.sign, sum.shift_in_high(true))
        } else {
            (a.sign, sum)
        }
    } else {
        let difference = match compare(&mantissa_a, &mantissa_b)? {
            Ordering::Less => (b.sign, subtract(&mantissa_b, &mantissa_a)?),
            _ => (a.sign, subtract(&mantissa_a, &mantissa_b)?),
        };
        event!(Level::TRACE, "mantissa difference: {}", difference.1);
        difference
    };

    if mantissa.is_zero() {
        event!(Level::TRACE, "result is zero");
        return Ok(FloatSum {
            triple: FloatTriple::zero(exponent_width, mantissa_width)?,
            value: 0.0,
        });
    }

    let shift = mantissa.leading_zeros();
    mantissa = mantissa.shift_left(shift);
    exponent -= shift as i128;

    let out_of_range = Error::ExponentOutOfRange {
        exponent,
        width: exponent_width,
        encoding: exponent_encoding,
    };
    let encoded_exponent = i64::try_from(exponent)
        .map_err(|_| out_of_range)
        .and_then(|e| exponent_encoding.encode(e, exponent_width))
        .map_err(|e| match e {
            Error::OutOfRange { .. } => out_of_range,
            other => other,
        })?;
    event!(
        Level::TRACE,
        "normalized with a left shift of {}: exponent {} ({})",
        shift,
        encoded_exponent,
        exponent
    );

    let value = value_of(sign, exponent, &mantissa);
    Ok(FloatSum {
        triple: FloatTriple::new(sign, encoded_exponent, mantissa),
        value,
    })
}

/// The pair of operands used in the laboratory report: 10 as
/// `0.10100000 × 2^4` and 23 as `0.10111000 × 2^5`, with the given
/// signs.  The exponent fields (`0100` and `0101`) are the same in
/// every encoding, so these operands can be added with any exponent
/// encoding, using an 8-digit mantissa and a 4-digit exponent.
pub fn reference_operands(
    negative_first: bool,
    negative_second: bool,
) -> (FloatTriple, FloatTriple) {
    (
        FloatTriple::new(
            negative_first,
            BitVector::literal("0100"),
            BitVector::literal("10100000"),
        ),
        FloatTriple::new(
            negative_second,
            BitVector::literal("0101"),
            BitVector::literal("10111000"),
        ),
    )
}

/// Mantissa width of the [`reference_operands`].
pub const REFERENCE_MANTISSA_WIDTH: usize = 8;
/// Exponent width of the [`reference_operands`].
pub const REFERENCE_EXPONENT_WIDTH: usize = 4;
