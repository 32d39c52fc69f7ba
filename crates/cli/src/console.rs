//! Blocking line-oriented prompts over any reader/writer pair.
//!
//! Every prompt re-asks until it gets an acceptable answer. The only ways out
//! are a valid answer, an I/O error, or the input being closed.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use agrotrack_core::errors::ValidationError;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use thiserror::Error;

/// Answers accepted as "yes" and "no" by [`parse_yes_no`].
pub const YES_WORDS: &[&str] = &["yes", "sim"];
pub const NO_WORDS: &[&str] = &["no", "não", "nao"];

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("input stream closed")]
    InputClosed,
    #[error("console i/o failed: {0}")]
    Io(#[from] io::Error),
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        // Bytes that are not UTF-8 become U+FFFD and fail validation like any
        // other unrecognized answer.
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(ConsoleError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&line).trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn prompt_text(&mut self, prompt: &str, field: &'static str) -> Result<String, ConsoleError> {
        loop {
            let answer = self.read_line(prompt)?;
            let trimmed = answer.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
            self.reject(ValidationError::EmptyField { field })?;
        }
    }

    pub fn prompt_positive(&mut self, prompt: &str, field: &'static str) -> Result<u32, ConsoleError> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse_positive(field, &answer) {
                Ok(value) => return Ok(value),
                Err(error) => self.reject(error)?,
            }
        }
    }

    pub fn prompt_number(&mut self, prompt: &str, field: &'static str) -> Result<f64, ConsoleError> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse_number(field, &answer) {
                Ok(value) => return Ok(value),
                Err(error) => self.reject(error)?,
            }
        }
    }

    pub fn prompt_yes_no(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        loop {
            let answer = self.read_line(prompt)?;
            match parse_yes_no(&answer) {
                Some(value) => return Ok(value),
                None => self.say("Please answer only 'yes' or 'no'.")?,
            }
        }
    }

    pub fn pause(&mut self) -> Result<(), ConsoleError> {
        self.read_line("Press ENTER to continue")?;
        Ok(())
    }

    pub fn clear_screen(&mut self) -> Result<(), ConsoleError> {
        execute!(self.output, Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }

    fn reject(&mut self, error: ValidationError) -> Result<(), ConsoleError> {
        self.say(format!("{error}. Try again."))
    }
}

pub fn parse_yes_no(answer: &str) -> Option<bool> {
    let normalized = answer.trim().to_lowercase();
    if YES_WORDS.contains(&normalized.as_str()) {
        Some(true)
    } else if NO_WORDS.contains(&normalized.as_str()) {
        Some(false)
    } else {
        None
    }
}

pub fn parse_positive(field: &'static str, answer: &str) -> Result<u32, ValidationError> {
    let trimmed = answer.trim();
    let invalid = || ValidationError::InvalidNumber { field, input: trimmed.to_string() };

    let value: i64 = trimmed.parse().map_err(|_| invalid())?;
    if value <= 0 {
        return Err(ValidationError::NonPositive { field });
    }
    u32::try_from(value).map_err(|_| invalid())
}

pub fn parse_number(field: &'static str, answer: &str) -> Result<f64, ValidationError> {
    let trimmed = answer.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber { field, input: trimmed.to_string() })
}

#[cfg(test)]
mod tests {
    use agrotrack_core::errors::ValidationError;

    use super::{parse_number, parse_positive, parse_yes_no, Console, ConsoleError};

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    fn output(console: Console<&[u8], Vec<u8>>) -> String {
        String::from_utf8(console.output).expect("utf8 output")
    }

    #[test]
    fn yes_no_accepts_only_recognized_words() {
        assert_eq!(parse_yes_no("yes"), Some(true));
        assert_eq!(parse_yes_no("  SIM "), Some(true));
        assert_eq!(parse_yes_no("no"), Some(false));
        assert_eq!(parse_yes_no("Não"), Some(false));
        assert_eq!(parse_yes_no("nao"), Some(false));
        assert_eq!(parse_yes_no("y"), None);
        assert_eq!(parse_yes_no("true"), None);
        assert_eq!(parse_yes_no(""), None);
    }

    #[test]
    fn yes_no_prompt_repeats_until_recognized() {
        let mut console = console("maybe\n1\nnao\n");
        let answer = console.prompt_yes_no("Ventilation? ").expect("answer");
        assert!(!answer);

        let text = output(console);
        assert_eq!(text.matches("Please answer only 'yes' or 'no'.").count(), 2);
        assert_eq!(text.matches("Ventilation? ").count(), 3);
    }

    #[test]
    fn positive_parser_distinguishes_garbage_from_non_positive() {
        assert_eq!(parse_positive("quantity", " 12 "), Ok(12));
        assert_eq!(
            parse_positive("quantity", "0"),
            Err(ValidationError::NonPositive { field: "quantity" })
        );
        assert_eq!(
            parse_positive("quantity", "-3"),
            Err(ValidationError::NonPositive { field: "quantity" })
        );
        assert_eq!(
            parse_positive("quantity", "lots"),
            Err(ValidationError::InvalidNumber { field: "quantity", input: "lots".to_string() })
        );
        assert!(matches!(
            parse_positive("quantity", "99999999999"),
            Err(ValidationError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn number_parser_rejects_non_finite_values() {
        assert_eq!(parse_number("temperature", "-2.5"), Ok(-2.5));
        assert!(parse_number("temperature", "NaN").is_err());
        assert!(parse_number("temperature", "inf").is_err());
        assert!(parse_number("temperature", "4,5").is_err());
    }

    #[test]
    fn text_prompt_rejects_blank_input() {
        let mut console = console("\n   \nSoybean\n");
        let name = console.prompt_text("Name: ", "name").expect("name");
        assert_eq!(name, "Soybean");
        assert_eq!(output(console).matches("name must not be empty. Try again.").count(), 2);
    }

    #[test]
    fn positive_prompt_reprompts_on_bad_input() {
        let mut console = console("abc\n0\n25\n");
        assert_eq!(console.prompt_positive("Quantity: ", "quantity").expect("quantity"), 25);
        let text = output(console);
        assert!(text.contains("`abc` is not a valid number for quantity. Try again."));
        assert!(text.contains("quantity must be a positive number. Try again."));
    }

    #[test]
    fn closed_input_is_reported() {
        let mut console = console("");
        assert!(matches!(console.read_line("> "), Err(ConsoleError::InputClosed)));
    }

    #[test]
    fn latin1_answer_is_rejected_then_reprompted() {
        let mut console = Console::new(&b"n\xe3o\nnao\n"[..], Vec::new());
        assert!(!console.prompt_yes_no("Ventilation? ").expect("answer"));
        assert_eq!(output(console).matches("Please answer only 'yes' or 'no'.").count(), 1);
    }

    #[test]
    fn read_line_strips_line_endings_only() {
        let mut console = console("  padded \r\n");
        assert_eq!(console.read_line("> ").expect("line"), "  padded ");
    }
}
