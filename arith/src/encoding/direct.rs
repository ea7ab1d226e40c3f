//! Direct code (sign-magnitude).
//!
//! The leftmost digit is the sign (1 for negative) and the remaining
//! `width - 1` digits hold the absolute value.  For 8 bits the range
//! is -127..=127, and zero can be written as `00000000` or
//! `10000000`.

use std::cmp::Ordering;

use super::super::bitvector::BitVector;
use super::super::division::DivisionMode;
use super::super::error::Error;
use super::super::primitives::{self, same_width};
use super::{check_width, divide_signed, multiply_signed, Encoding};

pub fn encode(value: i64, width: usize) -> Result<BitVector, Error> {
    Encoding::Direct.check_range(value, width)?;
    let magnitude = BitVector::from_unsigned(u128::from(value.unsigned_abs()), width - 1)?;
    Ok(BitVector::with_sign(value < 0, &magnitude))
}

pub fn decode(codeword: &BitVector) -> Result<i64, Error> {
    check_width(codeword.width())?;
    let (negative, magnitude) = codeword.split_sign()?;
    let value = i64::try_from(magnitude.to_unsigned()?).map_err(|_| Error::TooWide(63))?;
    Ok(if negative { -value } else { value })
}

pub fn magnitude(codeword: &BitVector) -> Result<BitVector, Error> {
    check_width(codeword.width())?;
    let (_, magnitude) = codeword.split_sign()?;
    Ok(magnitude.zero_extend(codeword.width()))
}

pub(crate) fn from_magnitude(negative: bool, magnitude: &BitVector) -> BitVector {
    BitVector::with_sign(negative, magnitude)
}

/// Flips the sign digit.  This cannot overflow, since the range is
/// symmetric.
pub fn negate(codeword: &BitVector) -> Result<BitVector, Error> {
    check_width(codeword.width())?;
    let (negative, magnitude) = codeword.split_sign()?;
    Ok(BitVector::with_sign(!negative, &magnitude))
}

/// Sign-magnitude addition.
///
/// When the signs agree the magnitudes are added and the sign kept;
/// a carry out of the magnitude digits is [`Error::Overflow`].  When
/// they differ, the smaller magnitude is subtracted from the larger
/// and the result takes the sign of the larger.  Equal magnitudes of
/// opposite sign give positive zero.
pub fn add(a: &BitVector, b: &BitVector) -> Result<BitVector, Error> {
    let width = same_width(a, b)?;
    check_width(width)?;
    let (sign_a, magnitude_a) = a.split_sign()?;
    let (sign_b, magnitude_b) = b.split_sign()?;
    if sign_a == sign_b {
        return match primitives::add(&magnitude_a, &magnitude_b)? {
            (_, true) => Err(Error::Overflow),
            (sum, false) => Ok(BitVector::with_sign(sign_a, &sum)),
        };
    }
    match primitives::compare(&magnitude_a, &magnitude_b)? {
        Ordering::Greater => Ok(BitVector::with_sign(
            sign_a,
            &primitives::subtract(&magnitude_a, &magnitude_b)?,
        )),
        Ordering::Less => Ok(BitVector::with_sign(
            sign_b,
            &primitives::subtract(&magnitude_b, &magnitude_a)?,
        )),
        Ordering::Equal => BitVector::zero(width),
    }
}

pub fn multiply(a: &BitVector, b: &BitVector, product_width: usize) -> Result<BitVector, Error> {
    multiply_signed(Encoding::Direct, a, b, product_width)
}

pub fn divide(a: &BitVector, b: &BitVector, precision: usize) -> Result<String, Error> {
    divide_signed(
        Encoding::Direct,
        a,
        b,
        precision,
        DivisionMode::FractionalPreview,
    )
}
