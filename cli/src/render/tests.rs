use arith::prelude::*;

use crate::table::{float_table, integer_table, report, Operation, Settings};

#[test]
fn test_integer_table() {
    let table = integer_table(Operation::Add, 10, -23, &Encoding::ALL, &Settings::default());
    assert_eq!(
        table.to_string(),
        concat!(
            "10 + -23\n",
            "  direct            00001010  10010111  10001101 (-13)\n",
            "  ones' complement  00001010  11101000  11110010 (-13)\n",
            "  two's complement  00001010  11101001  11110011 (-13)\n",
        )
    );
}

#[test]
fn test_failures_and_overflow() {
    let table = integer_table(Operation::Add, 100, 100, &Encoding::ALL, &Settings::default());
    let text = table.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "100 + 100");
    assert!(lines[1].ends_with("error: arithmetic overflow"));
    assert!(lines[2].ends_with("11001000 (-55) overflow"));
    assert!(lines[3].ends_with("11001000 (-56) overflow"));

    let table = integer_table(
        Operation::Multiply,
        -128,
        1,
        &[Encoding::Direct],
        &Settings::default(),
    );
    assert_eq!(
        table.to_string(),
        concat!(
            "-128 × 1\n",
            "  direct                   -  00000001  ",
            "error: -128 is outside the range of 8-bit direct code [-127, 127]\n",
        )
    );
}

#[test]
fn test_quotient() {
    let table = integer_table(
        Operation::DivideExact,
        23,
        -10,
        &[Encoding::TwosComplement],
        &Settings::default(),
    );
    assert_eq!(
        table.to_string(),
        "23 ÷ -10\n  two's complement  00010111  11110110  -2.30000\n"
    );
}

#[test]
fn test_float_table() {
    let table = float_table(false, true, &[Encoding::Direct], &Settings::default());
    assert_eq!(
        table.to_string(),
        concat!(
            "+10 + -23\n",
            "  direct            0 0100 10100000 + 1 0101 10111000  = 1 0100 11010000 = -13\n",
        )
    );

    let settings = Settings {
        exponent_width: 3,
        ..Settings::default()
    };
    let table = float_table(true, true, &[Encoding::TwosComplement], &settings);
    assert_eq!(
        table.to_string(),
        concat!(
            "-10 + -23\n",
            "  two's complement  - + -  ",
            "error: 4 is outside the range of 3-bit two's complement code [-4, 3]\n",
        )
    );
}

#[test]
fn test_report_layout() {
    let text = report(&Encoding::ALL, &Settings::default()).to_string();
    assert!(text.starts_with("Addition\n10 + 23\n"));
    assert!(text.contains("\n\nMultiplication\n10 × 23\n"));
    assert!(text.contains("\n\nDivision (smaller magnitude by larger)\n10 ÷ 23\n"));
    assert!(text.contains("\n\nFloating-point addition\n+10 + +23\n"));
    assert!(text.contains("-10 ÷ -23\n  direct            10001010  10010111  0.43478\n"));
    // Four headings, three blank separators, and four lines (a
    // heading plus one per encoding) for each of 16 tables.
    assert_eq!(text.lines().count(), 4 + 3 + 16 * 4);
}
