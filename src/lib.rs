//! Placeholder marker parsing for document templates.
//!
//! A [`Scanner`] finds `open ... close` spans in a text buffer and a
//! [`Decoder`] turns each span into a [`Marker`]: a dotted property path
//! plus a pipeline of function calls with raw string arguments.
//!
//! ```text
//! hello [[user.name:upper():pad(10, _)]]!
//!       ^ position 6, path [user, name], pipeline [upper(), pad(10, _)]
//! ```

pub mod ast;
pub mod config;
pub mod error;
pub mod parser;
pub mod processor;
pub mod scanner;

pub use ast::{FunctionCall, Marker, RawMatch};
pub use config::Delimiters;
pub use error::MarkerError;
pub use parser::{Decoder, MarkerParser};
pub use scanner::Scanner;

/// Decode every marker in `text`, in buffer order. Stops at the first error.
pub fn parse_markers(text: &str, delimiters: &Delimiters) -> Result<Vec<Marker>, MarkerError> {
    let mut scanner = Scanner::new(delimiters.clone());
    scanner.bind(text);

    let decoder = Decoder::new();
    let mut markers = Vec::new();
    while let Some(marker) = decoder.parse(&mut scanner)? {
        markers.push(marker);
    }
    Ok(markers)
}
