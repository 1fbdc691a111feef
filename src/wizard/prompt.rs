//! Shared stdin/stdout prompt helpers for the wizard steps

use std::io::{self, Write};

use crate::error::{CascadeError, CascadeResult};
use crate::models::Money;

/// Prompt for a string input
pub fn prompt_string(prompt: &str) -> CascadeResult<String> {
    print!("{}", prompt);
    io::stdout()
        .flush()
        .map_err(|e| CascadeError::Io(e.to_string()))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| CascadeError::Io(e.to_string()))?;

    Ok(input.trim().to_string())
}

/// Prompt for a monetary amount; returns None on blank input
pub fn prompt_money(prompt: &str) -> CascadeResult<Option<Money>> {
    loop {
        let input = prompt_string(prompt)?;
        if input.is_empty() {
            return Ok(None);
        }
        match Money::parse(&input) {
            Ok(amount) => return Ok(Some(amount)),
            Err(e) => println!("  {}", e),
        }
    }
}

/// Prompt for a 1-based index into a list of `len` items; returns None on
/// blank input or when the user types something non-numeric
pub fn parse_index(input: &str, len: usize) -> Option<usize> {
    input
        .parse::<usize>()
        .ok()
        .filter(|n| (1..=len).contains(n))
        .map(|n| n - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("1", 5), Some(0));
        assert_eq!(parse_index("5", 5), Some(4));
        assert_eq!(parse_index("6", 5), None);
        assert_eq!(parse_index("0", 5), None);
        assert_eq!(parse_index("n", 5), None);
        assert_eq!(parse_index("", 5), None);
    }
}
