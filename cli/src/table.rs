//! Runs an operation in each of the requested encodings and collects
//! the outcomes into tables for rendering.
//!
//! A failure in one encoding (for example an operand which is outside
//! the range of the ones' complement code but inside the range of the
//! two's complement code) is recorded in that encoding's row and does
//! not prevent the other rows from being computed.

use std::fmt::{self, Display, Formatter};

use serde::Serialize;
use tracing::{event, Level};

use arith::prelude::*;


/// Widths and precision which apply to every operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
    pub width: usize,
    pub product_width: usize,
    pub precision: usize,
    pub mantissa_width: usize,
    pub exponent_width: usize,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            width: 8,
            product_width: 16,
            precision: 5,
            mantissa_width: REFERENCE_MANTISSA_WIDTH,
            exponent_width: REFERENCE_EXPONENT_WIDTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    /// Fractional-preview division.
    Divide,
    DivideExact,
}

impl Operation {
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
            Operation::Divide | Operation::DivideExact => '÷',
        }
    }
}

/// What one encoding made of an operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Outcome {
    Codeword {
        bits: BitVector,
        value: i64,
        overflow: bool,
    },
    Quotient {
        value: String,
    },
    Failed {
        error: String,
    },
}

impl From<Error> for Outcome {
    fn from(e: Error) -> Outcome {
        Outcome::Failed {
            error: e.to_string(),
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Outcome::Codeword {
                bits,
                value,
                overflow,
            } => {
                write!(f, "{bits} ({value})")?;
                if *overflow {
                    f.write_str(" overflow")?;
                }
                Ok(())
            }
            Outcome::Quotient { value } => f.write_str(value),
            Outcome::Failed { error } => write!(f, "error: {error}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntegerRow {
    pub encoding: Encoding,
    /// The codewords of the operands, where they could be encoded.
    pub a: Option<BitVector>,
    pub b: Option<BitVector>,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IntegerTable {
    pub operation: Operation,
    pub a: i64,
    pub b: i64,
    pub rows: Vec<IntegerRow>,
}

fn codeword(encoding: Encoding, bits: BitVector, overflow: bool) -> Result<Outcome, Error> {
    let value = encoding.decode(&bits)?;
    Ok(Outcome::Codeword {
        bits,
        value,
        overflow,
    })
}

fn evaluate(
    operation: Operation,
    encoding: Encoding,
    a: &BitVector,
    b: &BitVector,
    settings: &Settings,
) -> Result<Outcome, Error> {
    match operation {
        Operation::Add => {
            let sum = encoding.add(a, b)?;
            codeword(encoding, sum.bits, sum.overflow)
        }
        Operation::Subtract => {
            let difference = encoding.subtract(a, b)?;
            codeword(encoding, difference.bits, difference.overflow)
        }
        Operation::Multiply => {
            let product = encoding.multiply(a, b, settings.product_width)?;
            codeword(encoding, product, false)
        }
        Operation::Divide => Ok(Outcome::Quotient {
            value: encoding.divide(a, b, settings.precision)?,
        }),
        Operation::DivideExact => Ok(Outcome::Quotient {
            value: encoding.divide_exact(a, b, settings.precision)?,
        }),
    }
}

fn integer_row(
    operation: Operation,
    encoding: Encoding,
    a: i64,
    b: i64,
    settings: &Settings,
) -> IntegerRow {
    let a_bits = encoding.encode(a, settings.width);
    let b_bits = encoding.encode(b, settings.width);
    let outcome = match (&a_bits, &b_bits) {
        (Ok(x), Ok(y)) => {
            evaluate(operation, encoding, x, y, settings).unwrap_or_else(Outcome::from)
        }
        (Err(e), _) | (_, Err(e)) => Outcome::from(*e),
    };
    if let Outcome::Failed { error } = &outcome {
        event!(
            Level::DEBUG,
            "{:?} of {} and {} in {}: {}",
            operation,
            a,
            b,
            encoding,
            error
        );
    }
    IntegerRow {
        encoding,
        a: a_bits.ok(),
        b: b_bits.ok(),
        outcome,
    }
}

/// Performs `a <operation> b` in each of `encodings`.
pub fn integer_table(
    operation: Operation,
    a: i64,
    b: i64,
    encodings: &[Encoding],
    settings: &Settings,
) -> IntegerTable {
    IntegerTable {
        operation,
        a,
        b,
        rows: encodings
            .iter()
            .map(|encoding| integer_row(operation, *encoding, a, b, settings))
            .collect(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum FloatOutcome {
    Sum(FloatSum),
    Failed { error: String },
}

impl From<Error> for FloatOutcome {
    fn from(e: Error) -> FloatOutcome {
        FloatOutcome::Failed {
            error: e.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloatRow {
    pub encoding: Encoding,
    pub a: Option<FloatTriple>,
    pub b: Option<FloatTriple>,
    pub outcome: FloatOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FloatTable {
    pub negative_first: bool,
    pub negative_second: bool,
    pub rows: Vec<FloatRow>,
}

/// Widens a mantissa by appending zeros on the right, or narrows it
/// by dropping its rightmost digits.  Either way the leading digits,
/// and so the fraction's value up to truncation, are kept.
fn fit_mantissa(mantissa: &BitVector, width: usize) -> Result<BitVector, Error> {
    let from = mantissa.width();
    if width >= from {
        Ok(mantissa.resize(width)?.shift_left(width - from))
    } else {
        mantissa.shift_right(from - width).resize(width)
    }
}

/// Re-encodes the exponent of a triple for a field of `width` digits.
fn fit_exponent(
    exponent: &BitVector,
    encoding: Encoding,
    width: usize,
) -> Result<BitVector, Error> {
    encoding.encode(encoding.decode(exponent)?, width)
}

fn fit_triple(
    triple: &FloatTriple,
    encoding: Encoding,
    settings: &Settings,
) -> Result<FloatTriple, Error> {
    Ok(FloatTriple::new(
        triple.sign,
        fit_exponent(&triple.exponent, encoding, settings.exponent_width)?,
        fit_mantissa(&triple.mantissa, settings.mantissa_width)?,
    ))
}

fn float_row(
    encoding: Encoding,
    negative_first: bool,
    negative_second: bool,
    settings: &Settings,
) -> FloatRow {
    let (a, b) = reference_operands(negative_first, negative_second);
    let a = fit_triple(&a, encoding, settings);
    let b = fit_triple(&b, encoding, settings);
    let outcome = match (&a, &b) {
        (Ok(x), Ok(y)) => float_add(
            x,
            y,
            encoding,
            settings.mantissa_width,
            settings.exponent_width,
        )
        .map(FloatOutcome::Sum)
        .unwrap_or_else(FloatOutcome::from),
        (Err(e), _) | (_, Err(e)) => FloatOutcome::from(*e),
    };
    if let FloatOutcome::Failed { error } = &outcome {
        event!(Level::DEBUG, "floating-point addition in {}: {}", encoding, error);
    }
    FloatRow {
        encoding,
        a: a.ok(),
        b: b.ok(),
        outcome,
    }
}

/// Adds ±10 and ±23 with the exponent stored in each of `encodings`.
pub fn float_table(
    negative_first: bool,
    negative_second: bool,
    encodings: &[Encoding],
    settings: &Settings,
) -> FloatTable {
    FloatTable {
        negative_first,
        negative_second,
        rows: encodings
            .iter()
            .map(|encoding| float_row(*encoding, negative_first, negative_second, settings))
            .collect(),
    }
}

/// The full set of laboratory results.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub integers: Vec<IntegerTable>,
    pub floats: Vec<FloatTable>,
}

const REPORT_OPERANDS: (i64, i64) = (10, 23);

const SIGN_PERMUTATIONS: [(bool, bool); 4] =
    [(false, false), (false, true), (true, false), (true, true)];

fn with_sign(negative: bool, n: i64) -> i64 {
    if negative {
        -n
    } else {
        n
    }
}

/// Adds, multiplies and divides every sign permutation of 10 and 23,
/// then does the four floating-point additions.
pub fn report(encodings: &[Encoding], settings: &Settings) -> Report {
    let (a, b) = REPORT_OPERANDS;
    let mut integers = Vec::new();
    for operation in [Operation::Add, Operation::Multiply, Operation::Divide] {
        for (negative_first, negative_second) in SIGN_PERMUTATIONS {
            integers.push(integer_table(
                operation,
                with_sign(negative_first, a),
                with_sign(negative_second, b),
                encodings,
                settings,
            ));
        }
    }
    let floats = SIGN_PERMUTATIONS
        .iter()
        .map(|(negative_first, negative_second)| {
            float_table(*negative_first, *negative_second, encodings, settings)
        })
        .collect();
    Report { integers, floats }
}
