//! Shared prompt and layout helpers.
//!
//! Conventions:
//! - Prompts: lowercase with colon and space: `company: `
//! - Feedback: short sentences: `Saved.`

use anyhow::Result;
use crossterm::{
    cursor,
    terminal::{Clear, ClearType},
    ExecutableCommand,
};
use inquire::{ui::RenderConfig, CustomType, InquireError, Select, Text};
use std::fmt::Display;
use std::io::{self, Write};
use std::str::FromStr;

/// Result type for form inputs that can be cancelled
pub enum FormResult<T> {
    Value(T),
    Cancelled,
}

impl<T> FormResult<T> {
    /// Unwrap the value or bail out of the enclosing form with `None`.
    pub fn ok(self) -> Option<T> {
        match self {
            FormResult::Value(v) => Some(v),
            FormResult::Cancelled => None,
        }
    }
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

fn cancelled<T>(result: std::result::Result<T, InquireError>) -> Result<FormResult<T>> {
    match result {
        Ok(v) => Ok(FormResult::Value(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => {
            Ok(FormResult::Cancelled)
        }
        Err(e) => Err(e.into()),
    }
}

/// Prompt for free text. Surrounding whitespace is trimmed; empty is allowed.
pub fn prompt_text(field: &str) -> Result<FormResult<String>> {
    let prompt = format!("{}: ", field);
    let result = Text::new(&prompt)
        .with_render_config(minimal_render_config())
        .prompt()
        .map(|s| s.trim().to_string());
    cancelled(result)
}

/// Prompt for a parsed value, re-asking until it parses.
pub fn prompt_typed<T>(field: &str, default: T, error_message: &str) -> Result<FormResult<T>>
where
    T: Clone + FromStr + Display,
{
    let prompt = format!("{}: ", field);
    let result = CustomType::<T>::new(&prompt)
        .with_default(default)
        .with_error_message(error_message)
        .with_render_config(minimal_render_config())
        .prompt();
    cancelled(result)
}

/// Parse a price: a finite, non-negative amount. Shared by prompts and flags.
pub fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not an amount", s.trim()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{}' is not a non-negative amount", s.trim()));
    }
    Ok(value)
}

/// Prompt for a price, re-asking until [`parse_amount`] accepts it.
pub fn prompt_amount(field: &str, default: f64) -> Result<FormResult<f64>> {
    let prompt = format!("{}: ", field);
    let parser = |s: &str| parse_amount(s).map_err(|_| ());
    let result = CustomType::<f64>::new(&prompt)
        .with_parser(&parser)
        .with_default(default)
        .with_error_message("enter a non-negative amount")
        .with_render_config(minimal_render_config())
        .prompt();
    cancelled(result)
}

/// Pick one of `options`.
pub fn prompt_select<T>(field: &str, options: &[T]) -> Result<FormResult<T>>
where
    T: Clone + Display,
{
    let prompt = format!("{}: ", field);
    let result = Select::new(&prompt, options.to_vec())
        .with_render_config(minimal_render_config())
        .with_vim_mode(true)
        .prompt();
    cancelled(result)
}

/// Clear the terminal screen and move cursor to top-left
pub fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.execute(Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}

/// Terminal width, 80 when unavailable (pipes, non-TTY).
pub fn term_width() -> usize {
    crossterm::terminal::size()
        .map(|(w, _)| w as usize)
        .unwrap_or(80)
}

/// Truncate a string to max_chars, adding ellipsis if needed.
/// Result will be at most max_chars characters (including ellipsis if truncated).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars - 1).collect();
    format!("{}…", kept)
}

/// `$1,234.56`
pub fn format_money(amount: f64) -> String {
    let cents = format!("{:.2}", amount.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, frac)
}

/// Print an error message to stderr
#[inline]
pub fn error(msg: &str) {
    eprintln!("Error: {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_render_config() {
        let config = minimal_render_config();
        // Just verify it doesn't panic
        let _ = config;
    }

    #[test]
    fn test_truncate_short_string() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_long_string() {
        assert_eq!(truncate("Transportes Andinos", 8), "Transpo…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("Compañía Añañau", 5), "Comp…");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.5), "$999.50");
        assert_eq!(format_money(1234.567), "$1,234.57");
        assert_eq!(format_money(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_money(-12345.0), "-$12,345.00");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("250"), Ok(250.0));
        assert_eq!(parse_amount(" 0.5 "), Ok(0.5));
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
        assert!(parse_amount("-1").is_err());
        assert!(parse_amount("ten").is_err());
    }

    #[test]
    fn test_form_result_ok() {
        assert_eq!(FormResult::Value(3).ok(), Some(3));
        assert_eq!(FormResult::<i32>::Cancelled.ok(), None);
    }
}
