use clap::{CommandFactory, Parser};

use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("arguments should parse")
}

#[test]
fn test_command_definition() {
    Cli::command().debug_assert();
}

#[test]
fn test_negative_operands() {
    let cli = parse(&["binarith", "add", "-10", "23"]);
    assert!(matches!(cli.command, Command::Add { a: -10, b: 23 }));
    assert_eq!(
        integer_operation(&cli.command),
        Some((Operation::Add, -10, 23))
    );

    let cli = parse(&["binarith", "mul", "-10", "-23"]);
    assert_eq!(
        integer_operation(&cli.command),
        Some((Operation::Multiply, -10, -23))
    );
}

#[test]
fn test_division_modes() {
    let cli = parse(&["binarith", "div", "23", "-10"]);
    assert_eq!(
        integer_operation(&cli.command),
        Some((Operation::Divide, 23, -10))
    );
    let cli = parse(&["binarith", "div", "23", "-10", "--exact", "--precision", "3"]);
    assert_eq!(
        integer_operation(&cli.command),
        Some((Operation::DivideExact, 23, -10))
    );
    assert_eq!(cli.settings().unwrap().precision, 3);
}

#[test]
fn test_defaults() {
    let cli = parse(&["binarith", "report"]);
    assert_eq!(cli.settings(), Ok(Settings::default()));
    assert_eq!(cli.encodings(), Encoding::ALL.to_vec());
    assert_eq!(cli.format, Format::Text);
    assert_eq!(integer_operation(&cli.command), None);
}

#[test]
fn test_global_options() {
    let cli = parse(&[
        "binarith",
        "--width",
        "12",
        "sub",
        "5",
        "7",
        "--product-width",
        "24",
        "--format",
        "json",
    ]);
    let settings = cli.settings().unwrap();
    assert_eq!(settings.width, 12);
    assert_eq!(settings.product_width, 24);
    assert_eq!(cli.format, Format::Json);
    assert_eq!(
        integer_operation(&cli.command),
        Some((Operation::Subtract, 5, 7))
    );
}

#[test]
fn test_float_add_options() {
    let cli = parse(&[
        "binarith",
        "float-add",
        "--negate-second",
        "--mantissa-width",
        "10",
    ]);
    assert!(matches!(
        cli.command,
        Command::FloatAdd {
            negate_first: false,
            negate_second: true
        }
    ));
    assert_eq!(cli.settings().unwrap().mantissa_width, 10);
}

#[test]
fn test_encoding_selection() {
    let cli = parse(&[
        "binarith",
        "report",
        "--encoding",
        "twos",
        "--encoding",
        "inverse",
        "--encoding",
        "twos-complement",
    ]);
    assert_eq!(
        cli.encodings(),
        vec![Encoding::OnesComplement, Encoding::TwosComplement]
    );
    assert!(Cli::try_parse_from(["binarith", "report", "--encoding", "octal"]).is_err());
}

#[test]
fn test_rejected_arguments() {
    assert!(Cli::try_parse_from(["binarith"]).is_err());
    assert!(Cli::try_parse_from(["binarith", "add", "10"]).is_err());
    assert!(Cli::try_parse_from(["binarith", "add", "ten", "23"]).is_err());
    assert!(Cli::try_parse_from(["binarith", "report", "--format", "xml"]).is_err());
}

#[test]
fn test_unusable_widths() {
    let cli = parse(&["binarith", "report", "--width", "1"]);
    assert_eq!(cli.settings(), Err(arith::Error::InvalidWidth(1)));
    let cli = parse(&["binarith", "report", "--product-width", "65"]);
    assert_eq!(cli.settings(), Err(arith::Error::InvalidWidth(65)));
    let cli = parse(&["binarith", "report", "--mantissa-width", "0"]);
    assert_eq!(cli.settings(), Err(arith::Error::InvalidWidth(0)));
}

#[test]
fn test_unusable_precision() {
    let cli = parse(&["binarith", "div", "1", "3", "--precision", "5000"]);
    assert_eq!(cli.settings(), Err(arith::Error::PrecisionTooLarge(5000)));
    let limit = MAX_PRECISION.to_string();
    let cli = parse(&["binarith", "div", "1", "3", "--precision", limit.as_str()]);
    assert_eq!(cli.settings().unwrap().precision, MAX_PRECISION);
}

#[test]
fn test_failure_messages() {
    assert_eq!(
        Fail::Arith(arith::Error::InvalidWidth(1)).to_string(),
        "invalid settings: 1 is not a usable bit width"
    );
    assert_eq!(
        Fail::InitialisationFailure("no tracing".to_string()).to_string(),
        "no tracing"
    );
}
