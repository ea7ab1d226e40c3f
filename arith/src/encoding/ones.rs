//! Inverse code (ones' complement).
//!
//! Non-negative values are written as in the direct code; a negative
//! value is the bitwise complement of the codeword of its absolute
//! value.  The range is the same as for the direct code, and again
//! there are two zeros: all zeros and all ones.

use super::super::bitvector::BitVector;
use super::super::division::DivisionMode;
use super::super::error::Error;
use super::super::primitives::{self, complement, increment, same_width};
use super::{check_width, divide_signed, multiply_signed, Encoding};

pub fn encode(value: i64, width: usize) -> Result<BitVector, Error> {
    Encoding::OnesComplement.check_range(value, width)?;
    let magnitude = BitVector::from_unsigned(u128::from(value.unsigned_abs()), width - 1)?;
    Ok(from_magnitude(value < 0, &magnitude))
}

pub fn decode(codeword: &BitVector) -> Result<i64, Error> {
    check_width(codeword.width())?;
    let negative = codeword.sign_bit();
    let value =
        i64::try_from(magnitude(codeword)?.to_unsigned()?).map_err(|_| Error::TooWide(63))?;
    Ok(if negative { -value } else { value })
}

pub fn magnitude(codeword: &BitVector) -> Result<BitVector, Error> {
    check_width(codeword.width())?;
    if codeword.sign_bit() {
        Ok(complement(codeword))
    } else {
        Ok(codeword.clone())
    }
}

pub(crate) fn from_magnitude(negative: bool, magnitude: &BitVector) -> BitVector {
    let positive = BitVector::with_sign(false, magnitude);
    if negative {
        complement(&positive)
    } else {
        positive
    }
}

pub fn negate(codeword: &BitVector) -> Result<BitVector, Error> {
    check_width(codeword.width())?;
    Ok(complement(codeword))
}

/// Ones' complement addition with end-around carry.
///
/// The codewords are added as unsigned numbers, and a carry out of
/// the leftmost digit is added back in at the right.  Negative zero
/// (all ones) is a legitimate result and is left as it is.  Overflow
/// is not an error here; [`Encoding::add`] reports it.
pub fn add(a: &BitVector, b: &BitVector) -> Result<BitVector, Error> {
    check_width(same_width(a, b)?)?;
    let (mut sum, mut carry) = primitives::add(a, b)?;
    // Once the carry is dropped the sum is at most 2^width - 2, so
    // the correction below never carries out itself and this loop
    // runs at most once.
    while carry {
        (sum, carry) = increment(&sum);
    }
    Ok(sum)
}

pub fn multiply(a: &BitVector, b: &BitVector, product_width: usize) -> Result<BitVector, Error> {
    multiply_signed(Encoding::OnesComplement, a, b, product_width)
}

pub fn divide(a: &BitVector, b: &BitVector, precision: usize) -> Result<String, Error> {
    divide_signed(
        Encoding::OnesComplement,
        a,
        b,
        precision,
        DivisionMode::FractionalPreview,
    )
}
