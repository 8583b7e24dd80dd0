use std::fmt;
use std::ops::Range;

/// A raw `open ... close` span found by the scanner, borrowed from the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMatch<'a> {
    pub raw_text: &'a str,
    pub position: usize,
    pub length: usize,
}

impl RawMatch<'_> {
    pub fn end(&self) -> usize {
        self.position + self.length
    }
}

/// One stage of a marker's post-processing pipeline: `name(arg1, arg2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    pub name: String,
    /// Arguments exactly as written, trimmed; never coerced
    pub arguments: Vec<String>,
}

impl FunctionCall {
    pub fn new(name: impl Into<String>, arguments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.arguments.join(", "))
    }
}

/// A decoded placeholder occurrence.
///
/// `raw_text` is byte-identical to `buffer[position..position + length]`,
/// delimiters included. Offsets are byte offsets into the scanned buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub raw_text: String,
    pub position: usize,
    pub length: usize,
    /// Never empty
    pub path: Vec<String>,
    /// Source order, left to right
    pub pipeline: Vec<FunctionCall>,
}

impl Marker {
    pub fn end(&self) -> usize {
        self.position + self.length
    }

    pub fn span(&self) -> Range<usize> {
        self.position..self.end()
    }

    /// Path segments joined with `/`, e.g. `level0/level1/username`
    pub fn relative_path(&self) -> String {
        self.path.join("/")
    }

    pub fn has_pipeline(&self) -> bool {
        !self.pipeline.is_empty()
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_text)
    }
}
