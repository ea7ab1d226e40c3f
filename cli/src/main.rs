use std::error::Error;
use std::fmt::{self, Display, Formatter};

use clap::ArgAction::{Append, Set, SetTrue};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use arith::prelude::*;

mod render;
mod table;

#[cfg(test)]
mod tests;

use table::{float_table, integer_table, report, Operation, Settings};

/// Binary integer and floating-point arithmetic in the direct, ones'
/// complement and two's complement codes
#[derive(Parser, Debug)]
#[clap(name = "binarith", version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,

    /// Number of digits (including the sign digit) in an integer
    /// codeword.
    #[clap(action = Set, long, global = true, default_value_t = 8)]
    width: usize,

    /// Number of digits (including the sign digit) in a product.
    #[clap(action = Set, long, global = true, default_value_t = 16)]
    product_width: usize,

    /// Number of decimal places in a quotient.
    #[clap(action = Set, long, global = true, default_value_t = 5)]
    precision: usize,

    /// Number of digits in a floating-point mantissa.
    #[clap(action = Set, long, global = true, default_value_t = REFERENCE_MANTISSA_WIDTH)]
    mantissa_width: usize,

    /// Number of digits in a floating-point exponent.
    #[clap(action = Set, long, global = true, default_value_t = REFERENCE_EXPONENT_WIDTH)]
    exponent_width: usize,

    /// Only use this encoding (may be given more than once).  By
    /// default all three encodings are used.
    #[clap(action = Append, long = "encoding", global = true)]
    encodings: Vec<Encoding>,

    /// How to print the results.
    #[clap(value_enum, action = Set, long, global = true, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add A and B.
    #[clap(allow_negative_numbers = true)]
    Add { a: i64, b: i64 },

    /// Subtract B from A.
    #[clap(allow_negative_numbers = true)]
    Sub { a: i64, b: i64 },

    /// Multiply A by B.
    #[clap(allow_negative_numbers = true)]
    Mul { a: i64, b: i64 },

    /// Divide the smaller of |A| and |B| by the larger, giving a
    /// proper fraction.
    #[clap(allow_negative_numbers = true)]
    Div {
        a: i64,
        b: i64,
        /// Compute A ÷ B instead.
        #[clap(action = SetTrue, long)]
        exact: bool,
    },

    /// Add ±10 and ±23 in floating point.
    FloatAdd {
        /// Use -10 rather than 10.
        #[clap(action = SetTrue, long)]
        negate_first: bool,
        /// Use -23 rather than 23.
        #[clap(action = SetTrue, long)]
        negate_second: bool,
    },

    /// Print the full set of results for 10 and 23.
    Report,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug)]
enum Fail {
    /// We were not able to correctly initialise the program.
    InitialisationFailure(String),
    /// The command-line settings cannot be used.
    Arith(arith::Error),
    /// The results could not be written.
    Output(serde_json::Error),
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
            Fail::Arith(e) => write!(f, "invalid settings: {e}"),
            Fail::Output(e) => write!(f, "failed to write output: {e}"),
        }
    }
}

impl Error for Fail {}

impl From<arith::Error> for Fail {
    fn from(e: arith::Error) -> Fail {
        Fail::Arith(e)
    }
}

fn check_codeword_width(width: usize) -> Result<(), arith::Error> {
    if (2..=MAX_WIDTH).contains(&width) {
        Ok(())
    } else {
        Err(arith::Error::InvalidWidth(width))
    }
}

impl Cli {
    fn settings(&self) -> Result<Settings, arith::Error> {
        for width in [self.width, self.product_width, self.exponent_width] {
            check_codeword_width(width)?;
        }
        if self.mantissa_width == 0 {
            return Err(arith::Error::InvalidWidth(0));
        }
        if self.precision > MAX_PRECISION {
            return Err(arith::Error::PrecisionTooLarge(self.precision));
        }
        Ok(Settings {
            width: self.width,
            product_width: self.product_width,
            precision: self.precision,
            mantissa_width: self.mantissa_width,
            exponent_width: self.exponent_width,
        })
    }

    fn encodings(&self) -> Vec<Encoding> {
        if self.encodings.is_empty() {
            Encoding::ALL.to_vec()
        } else {
            let mut encodings = self.encodings.clone();
            encodings.sort();
            encodings.dedup();
            encodings
        }
    }
}

fn emit<T: Display + Serialize>(item: &T, format: Format) -> Result<(), Fail> {
    match format {
        Format::Text => print!("{item}"),
        Format::Json => {
            let json = serde_json::to_string_pretty(item).map_err(Fail::Output)?;
            println!("{json}");
        }
    }
    Ok(())
}

fn integer_operation(command: &Command) -> Option<(Operation, i64, i64)> {
    match command {
        Command::Add { a, b } => Some((Operation::Add, *a, *b)),
        Command::Sub { a, b } => Some((Operation::Subtract, *a, *b)),
        Command::Mul { a, b } => Some((Operation::Multiply, *a, *b)),
        Command::Div { a, b, exact: false } => Some((Operation::Divide, *a, *b)),
        Command::Div { a, b, exact: true } => Some((Operation::DivideExact, *a, *b)),
        Command::FloatAdd { .. } | Command::Report => None,
    }
}

fn run_command(cli: &Cli, settings: &Settings) -> Result<(), Fail> {
    let encodings = cli.encodings();
    if let Some((operation, a, b)) = integer_operation(&cli.command) {
        return emit(
            &integer_table(operation, a, b, &encodings, settings),
            cli.format,
        );
    }
    match cli.command {
        Command::FloatAdd {
            negate_first,
            negate_second,
        } => emit(
            &float_table(negate_first, negate_second, &encodings, settings),
            cli.format,
        ),
        _ => emit(&report(&encodings, settings), cli.format),
    }
}

fn run_binarith() -> Result<(), Fail> {
    let cli = Cli::parse();

    // See
    // https://docs.rs/tracing-subscriber/0.2.19/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let settings = cli.settings()?;
    let span = span!(Level::ERROR, "binarith", command=?cli.command);
    let _enter = span.enter();
    event!(Level::DEBUG, "settings: {:?}", settings);
    let result = run_command(&cli, &settings);
    if let Err(e) = &result {
        event!(Level::ERROR, "command failed: {:?}", e);
    }
    result
}

fn main() {
    match run_binarith() {
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
        Ok(()) => {
            std::process::exit(0);
        }
    }
}
