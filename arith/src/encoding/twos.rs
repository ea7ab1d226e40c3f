//! Additional code (two's complement).
//!
//! A negative value `n` is written as the unsigned number `2^width +
//! n`, which is the complement of the codeword of `|n|` plus one.
//! There is a single zero, and the range is asymmetric: for 8 bits
//! it is -128..=127.

use super::super::bitvector::BitVector;
use super::super::division::DivisionMode;
use super::super::error::Error;
use super::super::primitives::{self, complement, increment, same_width};
use super::{check_width, divide_signed, multiply_signed, sign_overflow, Encoding};

pub fn encode(value: i64, width: usize) -> Result<BitVector, Error> {
    Encoding::TwosComplement.check_range(value, width)?;
    let unsigned: i128 = if value < 0 {
        (1_i128 << width) + i128::from(value)
    } else {
        i128::from(value)
    };
    // check_range guarantees 0 <= unsigned < 2^width.
    BitVector::from_unsigned(unsigned as u128, width)
}

/// Decodes a codeword.  With the sign digit set the value is the
/// unsigned value of the whole codeword minus 2<sup>width</sup>.
pub fn decode(codeword: &BitVector) -> Result<i64, Error> {
    let width = codeword.width();
    check_width(width)?;
    let unsigned = i128::try_from(codeword.to_unsigned()?).map_err(|_| Error::TooWide(127))?;
    let value = if codeword.sign_bit() {
        unsigned - (1_i128 << width)
    } else {
        unsigned
    };
    i64::try_from(value).map_err(|_| Error::TooWide(64))
}

/// The magnitude of a negative codeword is its complement plus one,
/// taken over the whole codeword.  So the most negative value (say
/// `10000000`) has magnitude `10000000`, which is still correct as
/// an unsigned number.
pub fn magnitude(codeword: &BitVector) -> Result<BitVector, Error> {
    check_width(codeword.width())?;
    if codeword.sign_bit() {
        Ok(increment(&complement(codeword)).0)
    } else {
        Ok(codeword.clone())
    }
}

pub(crate) fn from_magnitude(negative: bool, magnitude: &BitVector) -> BitVector {
    let positive = BitVector::with_sign(false, magnitude);
    if negative {
        // The carry is only set for a zero magnitude, whose negation
        // is zero.
        increment(&complement(&positive)).0
    } else {
        positive
    }
}

/// Negation fails with [`Error::Overflow`] for the most negative
/// value, which has no positive counterpart.
pub fn negate(codeword: &BitVector) -> Result<BitVector, Error> {
    check_width(codeword.width())?;
    let negated = increment(&complement(codeword)).0;
    if !codeword.is_zero() && negated.sign_bit() == codeword.sign_bit() {
        Err(Error::Overflow)
    } else {
        Ok(negated)
    }
}

/// Two's complement addition.  The carry out of the leftmost digit
/// is discarded.  The returned flag reports overflow: both operands
/// have the same sign digit and the result's sign digit differs.  The
/// wrapped result is returned either way.
pub fn add(a: &BitVector, b: &BitVector) -> Result<(BitVector, bool), Error> {
    check_width(same_width(a, b)?)?;
    let (sum, _) = primitives::add(a, b)?;
    let overflow = sign_overflow(a, b, &sum);
    Ok((sum, overflow))
}

pub fn multiply(a: &BitVector, b: &BitVector, product_width: usize) -> Result<BitVector, Error> {
    multiply_signed(Encoding::TwosComplement, a, b, product_width)
}

pub fn divide(a: &BitVector, b: &BitVector, precision: usize) -> Result<String, Error> {
    divide_signed(
        Encoding::TwosComplement,
        a,
        b,
        precision,
        DivisionMode::FractionalPreview,
    )
}
