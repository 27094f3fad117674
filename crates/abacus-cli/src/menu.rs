//! Interactive numbered console menu
//!
//! The loop is generic over its reader and writer so tests can drive it with
//! in-memory buffers.

use crate::error::CliResult;
use abacus::core::number::parse_operand;
use abacus::core::{Calculator, Operation};
use console::style;
use std::io::{BufRead, Write};

const RULE_WIDTH: usize = 50;
const TITLE: &str = "ABACUS CALCULATOR";

/// Choice that prints the history
pub const SHOW_HISTORY: u8 = 15;
/// Choice that clears the history
pub const CLEAR_HISTORY: u8 = 16;
/// Choice that leaves the menu
pub const EXIT: u8 = 0;

/// How an operand prompt interprets its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperandKind {
    /// Any real number
    Number,
    /// Whole numbers only
    Integer,
    /// Any real number; an empty line yields the default
    NumberOr(u8),
}

/// Prompt text and input kind for each operand of an operation
fn operand_prompts(op: Operation) -> &'static [(&'static str, OperandKind)] {
    use OperandKind::{Integer, Number, NumberOr};
    match op {
        Operation::Add
        | Operation::Subtract
        | Operation::Multiply
        | Operation::Divide
        | Operation::Modulo => &[
            ("Enter first number: ", Number),
            ("Enter second number: ", Number),
        ],
        Operation::Power => &[("Enter base: ", Number), ("Enter exponent: ", Number)],
        Operation::SquareRoot | Operation::NaturalLog | Operation::Absolute => {
            &[("Enter number: ", Number)]
        }
        Operation::Factorial => &[("Enter integer: ", Integer)],
        Operation::Sine | Operation::Cosine | Operation::Tangent => {
            &[("Enter angle in radians: ", Number)]
        }
        Operation::Logarithm => &[
            ("Enter number: ", Number),
            ("Enter base (default 10): ", NumberOr(10)),
        ],
    }
}

/// Menu number for an exact choice such as `7`; `07` and `+7` do not count
fn parse_choice(line: &str) -> Option<u8> {
    let text = line.trim();
    (0..=CLEAR_HISTORY).find(|n| n.to_string() == text)
}

/// Numbered console menu around one calculator
#[derive(Debug)]
pub struct Menu<R, W> {
    calculator: Calculator,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// Create a menu with a fresh calculator
    pub fn new(input: R, output: W) -> Self {
        Self {
            calculator: Calculator::new(),
            input,
            output,
        }
    }

    /// The calculator driven by this menu
    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// Consume the menu, returning the writer
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run until the user picks exit or input ends
    pub fn run(&mut self) -> CliResult<()> {
        writeln!(self.output, "Welcome to Abacus!")?;
        writeln!(
            self.output,
            "This calculator supports all basic and advanced math operations."
        )?;

        loop {
            self.display_menu()?;
            let Some(choice) = self.read_line("\nEnter your choice (0-16): ")? else {
                return self.interrupted();
            };

            match parse_choice(&choice) {
                Some(EXIT) => {
                    writeln!(self.output, "Thank you for using the calculator! Goodbye!")?;
                    return Ok(());
                }
                Some(SHOW_HISTORY) => {
                    writeln!(self.output, "\n{}", self.calculator.show_history())?;
                }
                Some(CLEAR_HISTORY) => {
                    let removed = self.calculator.clear_history();
                    tracing::debug!(removed, "history cleared");
                    writeln!(self.output, "History cleared!")?;
                }
                Some(code) => match Operation::from_code(code) {
                    Some(op) => {
                        if !self.calculate(op)? {
                            return self.interrupted();
                        }
                    }
                    None => self.invalid_choice()?,
                },
                None => self.invalid_choice()?,
            }
        }
    }

    fn display_menu(&mut self) -> CliResult<()> {
        let rule = "=".repeat(RULE_WIDTH);
        writeln!(self.output, "\n{rule}")?;
        writeln!(
            self.output,
            "{}",
            style(format!("{TITLE:^RULE_WIDTH$}").trim_end()).bold().cyan()
        )?;
        writeln!(self.output, "{rule}")?;
        for op in Operation::ALL {
            let number = format!("{}.", op.code());
            writeln!(self.output, "{number:<4}{} ({})", op.label(), op.symbol())?;
        }
        writeln!(self.output, "{:<4}Show History", format!("{SHOW_HISTORY}."))?;
        writeln!(self.output, "{:<4}Clear History", format!("{CLEAR_HISTORY}."))?;
        writeln!(self.output, "{:<4}Exit", format!("{EXIT}."))?;
        writeln!(self.output, "{rule}")?;
        Ok(())
    }

    /// Prompts for the operands and prints the result; false when input ended
    fn calculate(&mut self, op: Operation) -> CliResult<bool> {
        let mut operands = [0.0_f64; 2];
        for (slot, (prompt, kind)) in operands.iter_mut().zip(operand_prompts(op)) {
            match self.read_operand(prompt, *kind)? {
                Some(value) => *slot = value,
                None => return Ok(false),
            }
        }
        let [a, b] = operands;

        let rendered = match self.calculator.apply(op, a, b) {
            Ok(value) => value.to_string(),
            Err(e) => {
                tracing::debug!(operation = %op, error = %e, "calculation rejected");
                e.display_result()
            }
        };
        writeln!(self.output, "Result: {rendered}")?;
        Ok(true)
    }

    fn read_operand(&mut self, prompt: &str, kind: OperandKind) -> CliResult<Option<f64>> {
        loop {
            let Some(line) = self.read_line(prompt)? else {
                return Ok(None);
            };
            let text = line.trim();
            let parsed = match kind {
                OperandKind::Number => parse_operand(text),
                OperandKind::NumberOr(default) if text.is_empty() => Some(f64::from(default)),
                OperandKind::NumberOr(_) => parse_operand(text),
                OperandKind::Integer => text.parse::<i64>().ok().map(|n| n as f64),
            };
            if let Some(value) = parsed {
                return Ok(Some(value));
            }
            let noun = if kind == OperandKind::Integer {
                "integer"
            } else {
                "number"
            };
            writeln!(self.output, "Invalid input! Please enter a valid {noun}.")?;
        }
    }

    /// Writes the prompt and reads one line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> CliResult<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn invalid_choice(&mut self) -> CliResult<()> {
        writeln!(
            self.output,
            "Invalid choice! Please enter a number between 0-16."
        )?;
        Ok(())
    }

    fn interrupted(&mut self) -> CliResult<()> {
        writeln!(self.output, "\n\nCalculator interrupted. Goodbye!")?;
        Ok(())
    }
}
