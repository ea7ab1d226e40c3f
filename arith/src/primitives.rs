//! Unsigned operations on bit vectors: the adder, subtractor,
//! comparator and multiplier which the sign encodings are built
//! from.
//!
//! Operations taking two bit vectors require them to have the same
//! width and report [`Error::WidthMismatch`] otherwise; the caller
//! decides how to pad.

use std::cmp::Ordering;

use super::bitvector::BitVector;
use super::error::Error;


pub(crate) fn same_width(a: &BitVector, b: &BitVector) -> Result<usize, Error> {
    if a.width() == b.width() {
        Ok(a.width())
    } else {
        Err(Error::WidthMismatch {
            left: a.width(),
            right: b.width(),
        })
    }
}

/// Ripple-carry adder over equal-length digit slices.
fn ripple_add(a: &[bool], b: &[bool]) -> (Vec<bool>, bool) {
    let mut sum = vec![false; a.len()];
    let mut carry = false;
    for i in (0..a.len()).rev() {
        let (x, y) = (a[i], b[i]);
        sum[i] = x ^ y ^ carry;
        carry = (x & y) | (carry & (x ^ y));
    }
    (sum, carry)
}

fn borrow_subtract(a: &[bool], b: &[bool]) -> Vec<bool> {
    let mut difference = vec![false; a.len()];
    let mut borrow = false;
    for i in (0..a.len()).rev() {
        let (x, y) = (a[i], b[i]);
        difference[i] = x ^ y ^ borrow;
        borrow = (!x & y) | (!(x ^ y) & borrow);
    }
    difference
}

/// Adds two unsigned bit vectors, returning the sum (of the same
/// width) and the carry out of the most significant digit.
pub fn add(a: &BitVector, b: &BitVector) -> Result<(BitVector, bool), Error> {
    same_width(a, b)?;
    let (sum, carry) = ripple_add(&a.bits, &b.bits);
    Ok((BitVector::from_bits(sum), carry))
}

/// Computes `a - b`.  The caller must ensure that `a >= b` (see
/// [`compare`]); otherwise the result is the difference modulo
/// 2<sup>width</sup>.
pub fn subtract(a: &BitVector, b: &BitVector) -> Result<BitVector, Error> {
    same_width(a, b)?;
    Ok(BitVector::from_bits(borrow_subtract(&a.bits, &b.bits)))
}

/// Compares two bit vectors as unsigned numbers.
pub fn compare(a: &BitVector, b: &BitVector) -> Result<Ordering, Error> {
    same_width(a, b)?;
    // With equal widths, lexicographic order on the digits (most
    // significant first, 0 < 1) is numeric order.
    Ok(a.bits.cmp(&b.bits))
}

/// Adds one, returning the result and the carry out.
pub fn increment(a: &BitVector) -> (BitVector, bool) {
    let mut bits = a.bits.clone();
    let mut carry = true;
    for bit in bits.iter_mut().rev() {
        let x = *bit;
        *bit = x ^ carry;
        carry = x & carry;
        if !carry {
            break;
        }
    }
    (BitVector::from_bits(bits), carry)
}

/// Bitwise NOT.
pub fn complement(a: &BitVector) -> BitVector {
    BitVector::from_bits(a.bits.iter().map(|bit| !bit).collect())
}

/// Shift-and-add multiplication of two unsigned bit vectors.
///
/// For each set digit of `b` at position `i` (counting from the
/// least significant end), `a` shifted left by `i` is added into an
/// accumulator.  The accumulator (and so the product) is
/// `a.width() + b.width()` digits wide, which is always enough to
/// hold the product exactly; callers [`BitVector::resize`] it to the
/// width they want.
pub fn multiply_magnitudes(a: &BitVector, b: &BitVector) -> BitVector {
    let width = a.width() + b.width();
    let multiplicand = a.zero_extend(width);
    let mut product = vec![false; width];
    for (position, bit) in b.iter().rev().enumerate() {
        if bit {
            let partial = multiplicand.shift_left(position);
            let (sum, carry) = ripple_add(&product, &partial.bits);
            debug_assert!(!carry, "the accumulator is wide enough for any product");
            product = sum;
        }
    }
    BitVector::from_bits(product)
}
