use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::ast::{FunctionCall, Marker, RawMatch};
use crate::error::MarkerError;
use crate::scanner::Scanner;

#[derive(Parser)]
#[grammar = "src/marker.pest"]
pub struct MarkerParser;

/// Path and pipeline decoded from a marker body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub path: Vec<String>,
    pub pipeline: Vec<FunctionCall>,
}

/// Decode failure, `offset` relative to the start of the body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyError {
    pub offset: usize,
    pub reason: String,
}

impl From<pest::error::Error<Rule>> for BodyError {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let offset = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        Self {
            offset,
            reason: err.variant.message().into_owned(),
        }
    }
}

impl MarkerParser {
    /// Decode a delimiter-stripped body: `path(:call)*`.
    ///
    /// Path segments and function names may not contain any character of `reserved`.
    pub fn parse_body(body: &str, reserved: &str) -> Result<Body, BodyError> {
        let root = MarkerParser::parse(Rule::body, body)?
            .next()
            .ok_or_else(|| BodyError {
                offset: 0,
                reason: "empty marker".to_string(),
            })?;

        let mut path = Vec::new();
        let mut pipeline = Vec::new();
        for pair in root.into_inner() {
            match pair.as_rule() {
                Rule::path => {
                    for segment in pair.into_inner() {
                        path.push(Self::parse_identifier(segment, "path segment", reserved)?);
                    }
                }
                Rule::call => pipeline.push(Self::parse_call(pair, reserved)?),
                _ => {}
            }
        }

        Ok(Body { path, pipeline })
    }

    fn parse_call(pair: Pair<Rule>, reserved: &str) -> Result<FunctionCall, BodyError> {
        let mut inner = pair.into_inner();

        let name = match inner.next() {
            Some(name) => Self::parse_identifier(name, "function name", reserved)?,
            None => {
                return Err(BodyError {
                    offset: 0,
                    reason: "missing function name".to_string(),
                });
            }
        };
        let arguments = match inner.next() {
            Some(list) => Self::parse_arguments(list)?,
            None => Vec::new(),
        };

        Ok(FunctionCall { name, arguments })
    }

    fn parse_arguments(pair: Pair<Rule>) -> Result<Vec<String>, BodyError> {
        let raw: Vec<Pair<Rule>> = pair.into_inner().collect();

        // `f()` and `f(  )` carry no arguments at all
        if raw.len() == 1 && raw[0].as_str().trim().is_empty() {
            return Ok(Vec::new());
        }

        raw.into_iter()
            .map(|arg| Self::parse_piece(arg, "argument"))
            .collect()
    }

    fn parse_identifier(
        pair: Pair<Rule>,
        what: &str,
        reserved: &str,
    ) -> Result<String, BodyError> {
        let start = pair.as_span().start();
        if let Some((idx, c)) = pair
            .as_str()
            .char_indices()
            .find(|(_, c)| reserved.contains(*c))
        {
            return Err(BodyError {
                offset: start + idx,
                reason: format!(
                    "{} `{}` contains delimiter character `{}`",
                    what,
                    pair.as_str().trim(),
                    c
                ),
            });
        }
        Self::parse_piece(pair, what)
    }

    fn parse_piece(pair: Pair<Rule>, what: &str) -> Result<String, BodyError> {
        let text = pair.as_str().trim();
        if text.is_empty() {
            return Err(BodyError {
                offset: pair.as_span().start(),
                reason: format!("empty {}", what),
            });
        }
        Ok(text.to_owned())
    }
}

/// Turns scanner matches into [`Marker`]s. Holds no state of its own.
#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder;

impl Decoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode the next marker, `Ok(None)` once the scanner is exhausted
    pub fn parse(&self, scanner: &mut Scanner<'_>) -> Result<Option<Marker>, MarkerError> {
        let Some(raw) = scanner.next_match()? else {
            return Ok(None);
        };

        let open = scanner.delimiters().open();
        let close = scanner.delimiters().close();
        let body_offset = raw.position + open.len();
        let body = raw
            .raw_text
            .get(open.len()..raw.length - close.len())
            .ok_or_else(|| {
                malformed(
                    &raw,
                    body_offset,
                    "marker body does not lie on character boundaries".to_string(),
                )
            })?;

        let reserved = format!("{}{}", open, close);
        let decoded = MarkerParser::parse_body(body, &reserved).map_err(|err| {
            debug!(
                target: "placemark::parser",
                raw = raw.raw_text,
                position = raw.position,
                reason = %err.reason,
                "Failed to decode marker"
            );
            malformed(&raw, body_offset + err.offset, err.reason)
        })?;

        let marker = Marker {
            raw_text: raw.raw_text.to_owned(),
            position: raw.position,
            length: raw.length,
            path: decoded.path,
            pipeline: decoded.pipeline,
        };
        trace!(
            target: "placemark::parser",
            position = marker.position,
            path = %marker.relative_path(),
            stages = marker.pipeline.len(),
            "Decoded marker"
        );
        Ok(Some(marker))
    }
}

fn malformed(raw: &RawMatch<'_>, offset: usize, reason: String) -> MarkerError {
    MarkerError::MalformedBody {
        raw: raw.raw_text.to_owned(),
        position: raw.position,
        offset,
        reason,
    }
}
