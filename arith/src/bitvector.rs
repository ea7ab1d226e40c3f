//! Fixed-width strings of binary digits.
//!
//! A [`BitVector`] knows nothing about signs; the sign encodings in
//! the [`crate::encoding`] module decide what the leftmost digit
//! means.  Every operation returns a new value, and nothing here ever
//! pads or strips digits implicitly: a change of width only happens
//! through [`BitVector::resize`].

use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::error::Error;


/// An ordered, fixed-length sequence of binary digits.  The digits
/// are stored most significant first, which is also the order in
/// which they are written.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVector {
    pub(crate) bits: Vec<bool>,
}

impl BitVector {
    /// Wraps a digit sequence known to be non-empty.
    pub(crate) fn from_bits(bits: Vec<bool>) -> BitVector {
        debug_assert!(!bits.is_empty(), "bit vectors have at least one digit");
        BitVector { bits }
    }

    /// Builds a bit vector from a string literal written in this
    /// crate, so the digits are known to be valid.
    pub(crate) fn literal(digits: &str) -> BitVector {
        BitVector::from_bits(digits.chars().map(|ch| ch == '1').collect())
    }

    /// Returns the all-zero bit vector of the given width.
    pub fn zero(width: usize) -> Result<BitVector, Error> {
        if width == 0 {
            Err(Error::InvalidWidth(width))
        } else {
            Ok(BitVector::from_bits(vec![false; width]))
        }
    }

    /// Returns the `width`-digit binary representation of `value`.
    pub fn from_unsigned(value: u128, width: usize) -> Result<BitVector, Error> {
        if width == 0 {
            return Err(Error::InvalidWidth(width));
        }
        if width < 128 && value >> width != 0 {
            return Err(Error::TooWide(width));
        }
        let bits = (0..width)
            .rev()
            .map(|position| position < 128 && (value >> position) & 1 == 1)
            .collect();
        Ok(BitVector::from_bits(bits))
    }

    /// Interprets the digits as an unsigned binary number.
    pub fn to_unsigned(&self) -> Result<u128, Error> {
        if self.significant_bits() > 128 {
            return Err(Error::TooWide(128));
        }
        Ok(self
            .bits
            .iter()
            .fold(0_u128, |acc, bit| (acc << 1) | u128::from(*bit)))
    }

    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Returns the digit at `index`, counting from the most
    /// significant end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        self.bits.get(index).copied()
    }

    /// Iterates over the digits, most significant first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = bool> + ExactSizeIterator + '_ {
        self.bits.iter().copied()
    }

    /// The leftmost digit, which the sign encodings use as the sign.
    pub fn sign_bit(&self) -> bool {
        self.bits[0]
    }

    pub fn is_zero(&self) -> bool {
        self.bits.iter().all(|bit| !bit)
    }

    pub fn is_all_ones(&self) -> bool {
        self.bits.iter().all(|bit| *bit)
    }

    pub fn leading_zeros(&self) -> usize {
        self.bits.iter().take_while(|bit| !**bit).count()
    }

    /// The number of digits needed to write the value without
    /// leading zeros (zero for the value zero).
    pub fn significant_bits(&self) -> usize {
        self.width() - self.leading_zeros()
    }

    /// Changes the width.  Widening adds zeros on the left; narrowing
    /// keeps the least significant digits.
    pub fn resize(&self, width: usize) -> Result<BitVector, Error> {
        if width == 0 {
            return Err(Error::InvalidWidth(width));
        }
        let current = self.width();
        let bits = if width >= current {
            let mut bits = vec![false; width - current];
            bits.extend_from_slice(&self.bits);
            bits
        } else {
            self.bits[current - width..].to_vec()
        };
        Ok(BitVector::from_bits(bits))
    }

    /// Widens to `width` (which must be at least the current width)
    /// by adding zeros on the left.
    pub(crate) fn zero_extend(&self, width: usize) -> BitVector {
        debug_assert!(width >= self.width());
        let mut bits = vec![false; width.saturating_sub(self.width())];
        bits.extend_from_slice(&self.bits);
        BitVector::from_bits(bits)
    }

    /// Logical shift towards the most significant end.  The width is
    /// unchanged; digits shifted out are lost and zeros come in on
    /// the right.
    #[must_use]
    pub fn shift_left(&self, count: usize) -> BitVector {
        let width = self.width();
        let count = count.min(width);
        let mut bits = self.bits[count..].to_vec();
        bits.resize(width, false);
        BitVector::from_bits(bits)
    }

    /// Logical shift towards the least significant end.  The width
    /// is unchanged; digits shifted out are lost and zeros come in on
    /// the left.
    #[must_use]
    pub fn shift_right(&self, count: usize) -> BitVector {
        let width = self.width();
        let count = count.min(width);
        let mut bits = vec![false; count];
        bits.extend_from_slice(&self.bits[..width - count]);
        BitVector::from_bits(bits)
    }

    /// Shifts left by one place, bringing `bit` in on the right.
    pub(crate) fn shift_in_low(&self, bit: bool) -> BitVector {
        let mut bits = self.bits[1..].to_vec();
        bits.push(bit);
        BitVector::from_bits(bits)
    }

    /// Shifts right by one place, bringing `bit` in on the left.
    pub(crate) fn shift_in_high(&self, bit: bool) -> BitVector {
        let mut bits = Vec::with_capacity(self.width());
        bits.push(bit);
        bits.extend_from_slice(&self.bits[..self.width() - 1]);
        BitVector::from_bits(bits)
    }

    /// Separates the leftmost digit from the rest.
    pub fn split_sign(&self) -> Result<(bool, BitVector), Error> {
        if self.width() < 2 {
            Err(Error::InvalidWidth(self.width()))
        } else {
            Ok((self.bits[0], BitVector::from_bits(self.bits[1..].to_vec())))
        }
    }

    /// Prefixes `magnitude` with a sign digit, so the result is one
    /// digit wider.
    pub fn with_sign(sign: bool, magnitude: &BitVector) -> BitVector {
        let mut bits = Vec::with_capacity(magnitude.width() + 1);
        bits.push(sign);
        bits.extend_from_slice(&magnitude.bits);
        BitVector::from_bits(bits)
    }
}

impl Display for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let digits: String = self
            .bits
            .iter()
            .map(|bit| if *bit { '1' } else { '0' })
            .collect();
        f.pad(&digits)
    }
}

impl Debug for BitVector {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector{{bits: {self}}}")
    }
}

impl FromStr for BitVector {
    type Err = Error;

    fn from_str(s: &str) -> Result<BitVector, Error> {
        let bits = s
            .chars()
            .map(|ch| match ch {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(Error::InvalidDigit(other)),
            })
            .collect::<Result<Vec<bool>, Error>>()?;
        if bits.is_empty() {
            Err(Error::InvalidWidth(0))
        } else {
            Ok(BitVector::from_bits(bits))
        }
    }
}

impl Serialize for BitVector {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
