//! Plain-text rendering of the result tables.
//!
//! Each table starts with a heading line naming the operation and its
//! operands, followed by one indented line per encoding.

use std::fmt::{self, Display, Formatter};

use super::table::{FloatOutcome, FloatRow, FloatTable, IntegerTable, Operation, Report};

#[cfg(test)]
mod tests;

/// Wide enough for the longest encoding name.
const NAME_WIDTH: usize = 16;

struct Missing<'a, T>(&'a Option<T>);

impl<T: Display> Display for Missing<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self.0 {
            Some(item) => item.fmt(f),
            None => f.pad("-"),
        }
    }
}

impl Display for IntegerTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        writeln!(f, "{} {} {}", self.a, self.operation.symbol(), self.b)?;
        let codeword_width = self
            .rows
            .iter()
            .flat_map(|row| [&row.a, &row.b])
            .flatten()
            .map(|bits| bits.width())
            .max()
            .unwrap_or(1);
        for row in &self.rows {
            writeln!(
                f,
                "  {:<name$}  {:>cw$}  {:>cw$}  {}",
                row.encoding,
                Missing(&row.a),
                Missing(&row.b),
                row.outcome,
                name = NAME_WIDTH,
                cw = codeword_width,
            )?;
        }
        Ok(())
    }
}

fn signed(negative: bool, n: u32) -> String {
    format!("{}{}", if negative { '-' } else { '+' }, n)
}

impl Display for FloatRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{:<name$}  {} + {}  ",
            self.encoding,
            Missing(&self.a),
            Missing(&self.b),
            name = NAME_WIDTH
        )?;
        match &self.outcome {
            FloatOutcome::Sum(sum) => write!(f, "= {sum}"),
            FloatOutcome::Failed { error } => write!(f, "error: {error}"),
        }
    }
}

impl Display for FloatTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        writeln!(
            f,
            "{} + {}",
            signed(self.negative_first, 10),
            signed(self.negative_second, 23)
        )?;
        for row in &self.rows {
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}

fn heading(operation: Operation) -> &'static str {
    match operation {
        Operation::Add => "Addition",
        Operation::Subtract => "Subtraction",
        Operation::Multiply => "Multiplication",
        Operation::Divide => "Division (smaller magnitude by larger)",
        Operation::DivideExact => "Division",
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        let mut current: Option<Operation> = None;
        for table in &self.integers {
            if current != Some(table.operation) {
                if current.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "{}", heading(table.operation))?;
                current = Some(table.operation);
            }
            write!(f, "{table}")?;
        }
        if !self.floats.is_empty() {
            if current.is_some() {
                writeln!(f)?;
            }
            writeln!(f, "Floating-point addition")?;
            for table in &self.floats {
                write!(f, "{table}")?;
            }
        }
        Ok(())
    }
}
