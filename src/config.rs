//! Session configuration: matrix size and run count.
//!
//! The two integers arrive either as CLI arguments (scripted
//! cross-language runs) or through the interactive prompts the sibling
//! implementations use. Either way validation is fail-fast: a session
//! with a half-formed configuration must not reach the shared results
//! table.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};

/// Immutable configuration for one benchmarking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenchConfig {
    /// Matrix size n; the workload runs at n×n.
    pub size: usize,
    /// Number of measured runs. At least 1.
    pub runs: usize,
}

impl BenchConfig {
    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if either value is zero.
    pub fn new(size: usize, runs: usize) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidConfig("matrix size must be at least 1".to_string()));
        }
        if runs == 0 {
            return Err(Error::InvalidConfig("run count must be at least 1".to_string()));
        }
        Ok(Self { size, runs })
    }

    /// Prompt for matrix size and run count on `output`, reading answers
    /// from `input`.
    ///
    /// Prompt wording matches the sibling language implementations so
    /// driver scripts can feed every binary the same stdin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for non-numeric, zero, or missing
    /// answers, and [`Error::Io`] if the streams fail.
    pub fn from_interactive<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Self> {
        let size = prompt_positive(input, output, "Enter matrix size: ")?;
        let runs = prompt_positive(input, output, "Enter number of runs: ")?;
        Self::new(size, runs)
    }
}

/// Parse a positive integer, naming the offending input on failure.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] for non-numeric or zero input.
pub fn parse_positive(what: &str, raw: &str) -> Result<usize> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| Error::InvalidConfig(format!("{what}: expected a positive integer, got '{}'", raw.trim())))?;
    if value == 0 {
        return Err(Error::InvalidConfig(format!("{what} must be at least 1")));
    }
    Ok(value)
}

/// Write `prompt` to `output` and parse a positive integer from the next
/// line of `input`.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] on end of input or a non-positive
/// answer, and [`Error::Io`] if the streams fail.
pub fn prompt_positive<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<usize> {
    write!(output, "{prompt}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Error::InvalidConfig(format!(
            "end of input while waiting for '{}'",
            prompt.trim_end_matches(": ")
        )));
    }
    parse_positive(prompt.trim_end_matches(": "), &line)
}
