use super::*;
use crate::bits;

use test_strategy::proptest;

fn add_reference(
    negative_first: bool,
    negative_second: bool,
    encoding: Encoding,
) -> Result<FloatSum, Error> {
    let (a, b) = reference_operands(negative_first, negative_second);
    float_add(
        &a,
        &b,
        encoding,
        REFERENCE_MANTISSA_WIDTH,
        REFERENCE_EXPONENT_WIDTH,
    )
}

#[test]
fn test_reference_operand_values() {
    let (ten, twenty_three) = reference_operands(false, true);
    for encoding in Encoding::ALL {
        assert_eq!(ten.value(encoding), Ok(10.0));
        assert_eq!(twenty_three.value(encoding), Ok(-23.0));
    }
    assert!(ten.is_normalized());
    assert!(twenty_three.is_normalized());
}

#[test]
fn test_reference_sums() {
    for encoding in Encoding::ALL {
        for (negative_first, negative_second, expected) in [
            (false, false, 33.0),
            (false, true, -13.0),
            (true, false, 13.0),
            (true, true, -33.0),
        ] {
            let sum = add_reference(negative_first, negative_second, encoding)
                .expect("reference operands should add without error");
            assert_eq!(
                sum.value, expected,
                "{encoding}: negative_first={negative_first}, negative_second={negative_second}"
            );
            assert!(sum.triple.is_normalized());
            assert_eq!(sum.triple.value(encoding), Ok(expected));
        }
    }
}

#[test]
fn test_reference_sum_fields() {
    // 10 + 23: the mantissa sum carries, so the result is renormalized
    // to 0.10000100 × 2^6.
    let sum = add_reference(false, false, Encoding::TwosComplement).unwrap();
    assert_eq!(
        sum.triple,
        FloatTriple::new(false, bits!("0110"), bits!("10000100"))
    );
    // 10 - 23 = -(0.10111000 - 0.01010000) × 2^5 = -0.11010000 × 2^4.
    let sum = add_reference(false, true, Encoding::Direct).unwrap();
    assert_eq!(
        sum.triple,
        FloatTriple::new(true, bits!("0100"), bits!("11010000"))
    );
    assert_eq!(sum.triple.to_string(), "1 0100 11010000");
}

#[test]
fn test_negative_exponents() {
    // 0.1 × 2^-1 (= 0.25) plus 0.11 × 2^-1 (= 0.375), 4-bit mantissas.
    for encoding in Encoding::ALL {
        let minus_one = encoding.encode(-1, 4).unwrap();
        let a = FloatTriple::new(false, minus_one.clone(), bits!("1000"));
        let b = FloatTriple::new(false, minus_one, bits!("1100"));
        let sum = float_add(&a, &b, encoding, 4, 4).unwrap();
        assert_eq!(sum.value, 0.625, "{encoding}");
        assert_eq!(sum.triple.mantissa, bits!("1010"));
        assert_eq!(encoding.decode(&sum.triple.exponent), Ok(0));
    }
}

#[test]
fn test_cancellation_gives_canonical_zero() {
    for encoding in Encoding::ALL {
        let (ten, _) = reference_operands(false, false);
        let (minus_ten, _) = reference_operands(true, false);
        let sum = float_add(&ten, &minus_ten, encoding, 8, 4).unwrap();
        assert_eq!(sum.value, 0.0);
        assert_eq!(sum.triple, FloatTriple::zero(4, 8).unwrap());
        assert!(sum.triple.is_normalized());
        assert!(sum.triple.is_zero());
    }
}

#[test]
fn test_normalization_shifts_left() {
    // 0.1100 × 2^2 - 0.1011 × 2^2 = 0.0001 × 2^2 = 0.1000 × 2^-1.
    let exponent = bits!("0010");
    let a = FloatTriple::new(false, exponent.clone(), bits!("1100"));
    let b = FloatTriple::new(true, exponent, bits!("1011"));
    let sum = float_add(&a, &b, Encoding::TwosComplement, 4, 4).unwrap();
    assert_eq!(sum.triple.mantissa, bits!("1000"));
    assert_eq!(sum.triple.exponent, bits!("1111"));
    assert!(!sum.triple.sign);
    assert_eq!(sum.value, 0.25);

    // With a ones' complement exponent, -1 is written differently.
    let sum = float_add(&a, &b, Encoding::OnesComplement, 4, 4).unwrap();
    assert_eq!(sum.triple.exponent, bits!("1110"));
    let sum = float_add(&a, &b, Encoding::Direct, 4, 4).unwrap();
    assert_eq!(sum.triple.exponent, bits!("1001"));
}

#[test]
fn test_sign_follows_larger_mantissa() {
    let exponent = bits!("0001");
    let small = FloatTriple::new(false, exponent.clone(), bits!("1000"));
    let large = FloatTriple::new(true, exponent, bits!("1100"));
    let sum = float_add(&small, &large, Encoding::Direct, 4, 4).unwrap();
    assert!(sum.triple.sign);
    assert_eq!(sum.value, -0.5);
    let sum = float_add(&large, &small, Encoding::Direct, 4, 4).unwrap();
    assert!(sum.triple.sign);
    assert_eq!(sum.value, -0.5);
}

#[test]
fn test_alignment_can_lose_the_smaller_operand() {
    // 0.1 × 2^7 + 0.1 × 2^0: shifting the second mantissa right by 7
    // places leaves nothing of it.
    let a = FloatTriple::parse(false, "0111", "1000").unwrap();
    let b = FloatTriple::parse(false, "0000", "1000").unwrap();
    let sum = float_add(&a, &b, Encoding::TwosComplement, 4, 4).unwrap();
    assert_eq!(sum.triple, a);
    assert_eq!(sum.value, 64.0);
}

#[test]
fn test_exponent_overflow() {
    // 0.1 × 2^7 + 0.1 × 2^7 = 0.1 × 2^8, and 8 doesn't fit a 4-bit
    // exponent.
    let a = FloatTriple::parse(false, "0111", "1000").unwrap();
    for encoding in Encoding::ALL {
        assert_eq!(
            float_add(&a, &a, encoding, 4, 4),
            Err(Error::ExponentOutOfRange {
                exponent: 8,
                width: 4,
                encoding
            })
        );
    }
}

#[test]
fn test_exponent_underflow() {
    // Normalizing 0.0001 × 2^-6 needs exponent -9, which doesn't fit
    // a 4-bit exponent in any encoding.
    for encoding in Encoding::ALL {
        let exponent = encoding.encode(-6, 4).unwrap();
        let a = FloatTriple::new(false, exponent.clone(), bits!("1001"));
        let b = FloatTriple::new(true, exponent, bits!("1000"));
        assert_eq!(
            float_add(&a, &b, encoding, 4, 4),
            Err(Error::ExponentOutOfRange {
                exponent: -9,
                width: 4,
                encoding
            })
        );
    }
}

#[test]
fn test_field_width_mismatch() {
    let (a, b) = reference_operands(false, false);
    assert_eq!(
        float_add(&a, &b, Encoding::Direct, 6, 4),
        Err(Error::WidthMismatch { left: 8, right: 6 })
    );
    assert_eq!(
        float_add(&a, &b, Encoding::Direct, 8, 5),
        Err(Error::WidthMismatch { left: 4, right: 5 })
    );
}

#[test]
fn test_parse_triple() {
    assert_eq!(
        FloatTriple::parse(false, "01x0", "1000"),
        Err(Error::InvalidDigit('x'))
    );
    let t = FloatTriple::parse(true, "0101", "10111000").unwrap();
    assert_eq!(t.value(Encoding::Direct), Ok(-23.0));
}

#[proptest]
fn sum_is_normalized_and_close(
    #[strategy(0..3usize)] which: usize,
    #[strategy(-3..=3i64)] exponent_a: i64,
    #[strategy(-3..=3i64)] exponent_b: i64,
    #[strategy(0..256u32)] mantissa_a: u32,
    #[strategy(0..256u32)] mantissa_b: u32,
    sign_a: bool,
    sign_b: bool,
) {
    let encoding = Encoding::ALL[which];
    let triple = |sign: bool, exponent: i64, mantissa: u32| {
        FloatTriple::new(
            sign,
            encoding.encode(exponent, 6).unwrap(),
            BitVector::from_unsigned(u128::from(mantissa), 8).unwrap(),
        )
    };
    let a = triple(sign_a, exponent_a, mantissa_a);
    let b = triple(sign_b, exponent_b, mantissa_b);
    let exact = a.value(encoding).unwrap() + b.value(encoding).unwrap();
    let sum = float_add(&a, &b, encoding, 8, 6).unwrap();
    assert!(sum.triple.is_normalized());
    assert_eq!(sum.triple.value(encoding), Ok(sum.value));
    // Alignment and a carry each drop less than one unit in the last
    // place at the larger exponent, which is at most 3.
    assert!(
        (sum.value - exact).abs() <= 2.0_f64.powi(4 - 8),
        "{a} + {b} gave {sum}, expected {exact}"
    );
}
