//! Basic error reporting.

use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};

use super::division::MAX_PRECISION;
use super::encoding::Encoding;

/// Represents a failure of one of the encoding or arithmetic
/// operations defined in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The decimal value cannot be represented in the requested
    /// width and encoding.
    OutOfRange {
        value: i64,
        width: usize,
        encoding: Encoding,
    },
    /// The magnitude of a sign-magnitude sum does not fit in the
    /// magnitude bits, or a value has no negation in its encoding.
    Overflow,
    /// The divisor's magnitude is zero.
    DivideByZero,
    /// The exponent of a floating-point result cannot be encoded in
    /// the exponent field.
    ExponentOutOfRange {
        exponent: i128,
        width: usize,
        encoding: Encoding,
    },
    /// Two bit vectors which must have equal widths don't.
    WidthMismatch { left: usize, right: usize },
    /// The width is not usable for the requested operation.
    InvalidWidth(usize),
    /// A character other than `0` or `1` appeared in a bit string.
    InvalidDigit(char),
    /// A value needs more binary digits than the given number to be
    /// written down (for example a decimal value which doesn't fit a
    /// bit vector, or a bit vector which doesn't fit a `u128`).
    TooWide(usize),
    /// A quotient was asked for more decimal places than
    /// [`MAX_PRECISION`].
    PrecisionTooLarge(usize),
}

impl StdError for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Error::OutOfRange {
                value,
                width,
                encoding,
            } => {
                let range = encoding.range(*width);
                write!(
                    f,
                    "{value} is outside the range of {width}-bit {encoding} code [{}, {}]",
                    range.start(),
                    range.end()
                )
            }
            Error::Overflow => f.write_str("arithmetic overflow"),
            Error::DivideByZero => f.write_str("division by zero"),
            Error::ExponentOutOfRange {
                exponent,
                width,
                encoding,
            } => write!(
                f,
                "exponent {exponent} cannot be held in a {width}-bit {encoding} exponent field"
            ),
            Error::WidthMismatch { left, right } => {
                write!(f, "bit vector widths differ ({left} and {right})")
            }
            Error::InvalidWidth(width) => write!(f, "{width} is not a usable bit width"),
            Error::InvalidDigit(ch) => write!(f, "{ch:?} is not a binary digit"),
            Error::TooWide(width) => write!(f, "value does not fit in {width} bits"),
            Error::PrecisionTooLarge(precision) => write!(
                f,
                "{precision} decimal places is more than the maximum of {MAX_PRECISION}"
            ),
        }
    }
}
