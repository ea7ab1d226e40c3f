//! The prelude exports the types and functions most callers need:
//! bit vectors, the encodings and the floating-point adder.
pub use super::bitvector::BitVector;
pub use super::division::{
    divide_magnitudes, divide_magnitudes_exact, DivisionMode, MAX_PRECISION,
};
pub use super::encoding::{direct, ones, twos, Encoding, Sum, UnknownEncodingName, MAX_WIDTH};
pub use super::error::*;
pub use super::float::{
    float_add, reference_operands, FloatSum, FloatTriple, REFERENCE_EXPONENT_WIDTH,
    REFERENCE_MANTISSA_WIDTH,
};
pub use super::primitives::{
    add, compare, complement, increment, multiply_magnitudes, subtract,
};
pub use crate::bits;
