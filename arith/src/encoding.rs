//! The three fixed-width sign encodings of signed integers: direct
//! (sign-magnitude), inverse (ones' complement) and additional
//! (two's complement).
//!
//! Each encoding lives in its own module ([`direct`], [`ones`],
//! [`twos`]) whose functions have the signatures natural to that
//! encoding.  [`Encoding`] selects one of them at run time and
//! offers the same operations with uniform signatures.

use std::fmt::{self, Display, Formatter};
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::Serialize;
use tracing::{event, Level};

use super::bitvector::BitVector;
use super::division::{self, DivisionMode};
use super::error::Error;
use super::primitives::{multiply_magnitudes, same_width};

pub mod direct;
pub mod ones;
pub mod twos;


/// The widest codeword which can be encoded or decoded.  Decoded
/// values must fit an `i64`.
pub const MAX_WIDTH: usize = 64;

/// A sign encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// Sign-magnitude: one sign digit followed by the absolute value.
    Direct,
    /// Negative values are the bitwise complement of the positive
    /// codeword.
    OnesComplement,
    /// Negative values are the bitwise complement of the positive
    /// codeword, plus one.
    TwosComplement,
}

/// The outcome of an addition (or subtraction) in some encoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Sum {
    pub bits: BitVector,
    /// Set when both operands had the same sign digit but the
    /// result's sign digit differs (only the complement encodings
    /// report overflow this way; sign-magnitude addition fails with
    /// [`Error::Overflow`] instead).
    pub overflow: bool,
}

/// Checks that a codeword width has room for a sign and at least one
/// magnitude digit, and that its values fit an `i64`.
pub(crate) fn check_width(width: usize) -> Result<(), Error> {
    if (2..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(Error::InvalidWidth(width))
    }
}

/// Complement-encoding overflow: the operands agree in sign but the
/// result does not.
pub(crate) fn sign_overflow(a: &BitVector, b: &BitVector, result: &BitVector) -> bool {
    a.sign_bit() == b.sign_bit() && result.sign_bit() != a.sign_bit()
}

/// Prefixes a decimal quotient with a minus sign when the operands'
/// sign digits differ.  A zero quotient keeps its sign, so `0 ÷ -5`
/// is `-0.00000`.
fn signed_decimal(negative: bool, quotient: String) -> String {
    if negative {
        format!("-{quotient}")
    } else {
        quotient
    }
}

impl Encoding {
    pub const ALL: [Encoding; 3] = [
        Encoding::Direct,
        Encoding::OnesComplement,
        Encoding::TwosComplement,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Encoding::Direct => "direct",
            Encoding::OnesComplement => "ones' complement",
            Encoding::TwosComplement => "two's complement",
        }
    }

    /// The values representable in a codeword of `width` digits.
    pub fn range(&self, width: usize) -> RangeInclusive<i64> {
        let magnitude_bits = width.clamp(1, MAX_WIDTH) - 1;
        let largest: i128 = (1_i128 << magnitude_bits) - 1;
        let smallest: i128 = match self {
            Encoding::Direct | Encoding::OnesComplement => -largest,
            Encoding::TwosComplement => -largest - 1,
        };
        // Both bounds are within i64 since magnitude_bits <= 63.
        (smallest as i64)..=(largest as i64)
    }

    pub(crate) fn check_range(&self, value: i64, width: usize) -> Result<(), Error> {
        check_width(width)?;
        if self.range(width).contains(&value) {
            Ok(())
        } else {
            Err(Error::OutOfRange {
                value,
                width,
                encoding: *self,
            })
        }
    }

    /// Converts `value` to a codeword of `width` digits.
    pub fn encode(&self, value: i64, width: usize) -> Result<BitVector, Error> {
        match self {
            Encoding::Direct => direct::encode(value, width),
            Encoding::OnesComplement => ones::encode(value, width),
            Encoding::TwosComplement => twos::encode(value, width),
        }
    }

    /// Converts a codeword back to its value.  Both zeros of the
    /// direct and ones' complement encodings decode to 0.
    pub fn decode(&self, codeword: &BitVector) -> Result<i64, Error> {
        match self {
            Encoding::Direct => direct::decode(codeword),
            Encoding::OnesComplement => ones::decode(codeword),
            Encoding::TwosComplement => twos::decode(codeword),
        }
    }

    /// The absolute value of a codeword, as an unsigned bit vector of
    /// the codeword's width.
    pub fn magnitude(&self, codeword: &BitVector) -> Result<BitVector, Error> {
        match self {
            Encoding::Direct => direct::magnitude(codeword),
            Encoding::OnesComplement => ones::magnitude(codeword),
            Encoding::TwosComplement => twos::magnitude(codeword),
        }
    }

    /// Builds the codeword with the given sign whose magnitude is
    /// `magnitude`; the codeword is one digit wider than `magnitude`.
    pub(crate) fn from_magnitude(&self, negative: bool, magnitude: &BitVector) -> BitVector {
        match self {
            Encoding::Direct => direct::from_magnitude(negative, magnitude),
            Encoding::OnesComplement => ones::from_magnitude(negative, magnitude),
            Encoding::TwosComplement => twos::from_magnitude(negative, magnitude),
        }
    }

    /// The codeword of the opposite value.
    pub fn negate(&self, codeword: &BitVector) -> Result<BitVector, Error> {
        match self {
            Encoding::Direct => direct::negate(codeword),
            Encoding::OnesComplement => ones::negate(codeword),
            Encoding::TwosComplement => twos::negate(codeword),
        }
    }

    pub fn add(&self, a: &BitVector, b: &BitVector) -> Result<Sum, Error> {
        match self {
            Encoding::Direct => direct::add(a, b).map(|bits| Sum {
                bits,
                overflow: false,
            }),
            Encoding::OnesComplement => {
                let bits = ones::add(a, b)?;
                let overflow = sign_overflow(a, b, &bits);
                Ok(Sum { bits, overflow })
            }
            Encoding::TwosComplement => {
                twos::add(a, b).map(|(bits, overflow)| Sum { bits, overflow })
            }
        }
    }

    /// Computes `a - b` as `a + (-b)`.
    pub fn subtract(&self, a: &BitVector, b: &BitVector) -> Result<Sum, Error> {
        let negated = self.negate(b)?;
        self.add(a, &negated)
    }

    /// Multiplies two codewords, giving a codeword of `product_width`
    /// digits whose magnitude is the low `product_width - 1` digits
    /// of the product of the magnitudes.
    pub fn multiply(
        &self,
        a: &BitVector,
        b: &BitVector,
        product_width: usize,
    ) -> Result<BitVector, Error> {
        match self {
            Encoding::Direct => direct::multiply(a, b, product_width),
            Encoding::OnesComplement => ones::multiply(a, b, product_width),
            Encoding::TwosComplement => twos::multiply(a, b, product_width),
        }
    }

    /// Fractional-preview division (see [`division::divide_magnitudes`]):
    /// the smaller magnitude is divided by the larger, and the sign
    /// is negative when the operands' sign digits differ.
    pub fn divide(&self, a: &BitVector, b: &BitVector, precision: usize) -> Result<String, Error> {
        match self {
            Encoding::Direct => direct::divide(a, b, precision),
            Encoding::OnesComplement => ones::divide(a, b, precision),
            Encoding::TwosComplement => twos::divide(a, b, precision),
        }
    }

    /// Signed `a ÷ b` as a decimal string.
    pub fn divide_exact(
        &self,
        a: &BitVector,
        b: &BitVector,
        precision: usize,
    ) -> Result<String, Error> {
        divide_signed(*self, a, b, precision, DivisionMode::Exact)
    }
}

/// Multiplication shared by all the encodings: the sign is the XOR of
/// the sign digits, and the magnitudes are multiplied as unsigned
/// numbers.
pub(crate) fn multiply_signed(
    encoding: Encoding,
    a: &BitVector,
    b: &BitVector,
    product_width: usize,
) -> Result<BitVector, Error> {
    same_width(a, b)?;
    check_width(product_width)?;
    let negative = a.sign_bit() != b.sign_bit();
    let product = multiply_magnitudes(&encoding.magnitude(a)?, &encoding.magnitude(b)?);
    let magnitude_width = product_width - 1;
    if product.significant_bits() > magnitude_width {
        event!(
            Level::DEBUG,
            "{} product {} of {} and {} truncated to {} magnitude bits",
            encoding,
            product,
            a,
            b,
            magnitude_width
        );
    }
    let magnitude = product.resize(magnitude_width)?;
    Ok(encoding.from_magnitude(negative, &magnitude))
}

/// Division shared by all the encodings.
pub(crate) fn divide_signed(
    encoding: Encoding,
    a: &BitVector,
    b: &BitVector,
    precision: usize,
    mode: DivisionMode,
) -> Result<String, Error> {
    same_width(a, b)?;
    check_width(a.width())?;
    let negative = a.sign_bit() != b.sign_bit();
    let quotient = division::divide_with_mode(
        &encoding.magnitude(a)?,
        &encoding.magnitude(b)?,
        precision,
        mode,
    )?;
    Ok(signed_decimal(negative, quotient))
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        f.pad(self.name())
    }
}

/// Signals that a string does not name an encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEncodingName(String);

impl Display for UnknownEncodingName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "unknown encoding name '{}'", self.0)
    }
}

impl std::error::Error for UnknownEncodingName {}

impl FromStr for Encoding {
    type Err = UnknownEncodingName;

    fn from_str(s: &str) -> Result<Encoding, UnknownEncodingName> {
        match s.to_ascii_lowercase().as_str() {
            "direct" | "sign-magnitude" => Ok(Encoding::Direct),
            "ones" | "inverse" | "ones-complement" => Ok(Encoding::OnesComplement),
            "twos" | "additional" | "twos-complement" => Ok(Encoding::TwosComplement),
            _ => Err(UnknownEncodingName(s.to_string())),
        }
    }
}
