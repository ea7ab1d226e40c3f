//! The `arith` crate does integer and floating-point arithmetic
//! directly on fixed-width binary codewords, the way a hardware adder
//! would, in three sign encodings:
//!
//! - direct code (sign-magnitude),
//! - inverse code (ones' complement), and
//! - additional code (two's complement).
//!
//! The building blocks are unsigned operations on [`BitVector`]s (in
//! [`primitives`] and [`division`]).  The [`encoding`] module layers
//! each encoding's sign and carry rules on top of them, and [`float`]
//! adds numbers made of a sign, an exponent (stored in one of the
//! encodings) and a mantissa.
//!
//! Everything here is a pure function of its arguments.

mod bitvector;
mod error;

pub mod division;
pub mod encoding;
pub mod float;
pub mod prelude;
pub mod primitives;

pub use crate::bitvector::BitVector;
pub use crate::error::Error;

/// Writes a [`BitVector`] literal.
///
/// # Panics
///
/// Panics if the argument is empty or contains anything other than
/// `0` and `1` digits.
#[macro_export]
macro_rules! bits {
    ($digits:expr) => {
        $digits
            .parse::<$crate::BitVector>()
            .expect("bits! literal should contain only binary digits")
    };
}

#[test]
fn test_bits_macro() {
    let v: BitVector = bits!("0101");
    assert_eq!(v.width(), 4);
    assert_eq!(v.to_unsigned(), Ok(5));
    assert_eq!(v, BitVector::from_unsigned(5, 4).unwrap());
}
