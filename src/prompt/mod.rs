//! Interactive search term prompt.
//!
//! Reads lines from any `BufRead` until one classifies, so tests can script
//! the input. Invalid terms print a message and prompt again; there is no
//! retry limit. End of input stops the loop with [`Error::InputClosed`].

use std::io::{BufRead, Write};

use tracing::debug;

use crate::core::{Error, Result};
use crate::data::ReferenceData;
use crate::tags::{classify_and_normalize, Classified};

/// Prompt shown before every read.
pub const PROMPT: &str = "Search term: ";

/// Line printed when a term matches no retailer, brand, or category.
pub const NOT_FOUND_MESSAGE: &str = "Search term is not in the database. Please try again.";

/// Prompt on `output` and read from `input` until a term classifies.
pub fn prompt_for_term<R: BufRead, W: Write>(
    data: &ReferenceData,
    input: &mut R,
    output: &mut W,
) -> Result<Classified> {
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(Error::InputClosed);
        }
        let term = line.trim_end_matches(['\r', '\n']);

        match classify_and_normalize(data, term) {
            Ok(classified) => return Ok(classified),
            Err(Error::NotFound { term }) => {
                debug!(term = %term, "search term not found");
                writeln!(output, "{NOT_FOUND_MESSAGE}")?;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Classify `initial` if given, falling back to the prompt when it is absent
/// or unknown.
pub fn resolve_term<R: BufRead, W: Write>(
    data: &ReferenceData,
    initial: Option<&str>,
    input: &mut R,
    output: &mut W,
) -> Result<Classified> {
    if let Some(term) = initial {
        match classify_and_normalize(data, term) {
            Ok(classified) => return Ok(classified),
            Err(Error::NotFound { .. }) => writeln!(output, "{NOT_FOUND_MESSAGE}")?,
            Err(e) => return Err(e),
        }
    }
    prompt_for_term(data, input, output)
}
