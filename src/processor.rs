use tracing::trace;

use crate::ast::Marker;
use crate::config::Delimiters;
use crate::error::MarkerError;
use crate::parse_markers;

/// Rebuild `text` left to right, replacing each marker span with the output of `replace`.
///
/// Text between markers is copied verbatim. Markers must be in ascending,
/// non-overlapping order and lie on `text`'s char boundaries, as the decoder produces them.
pub fn splice<E, F>(text: &str, markers: &[Marker], mut replace: F) -> Result<String, E>
where
    E: From<MarkerError>,
    F: FnMut(&Marker) -> Result<String, E>,
{
    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;

    for marker in markers {
        if marker.position < cursor {
            return Err(MarkerError::Splice {
                position: marker.position,
                reason: "marker overlaps or precedes an earlier marker",
            }
            .into());
        }
        let Some(between) = text.get(cursor..marker.position) else {
            return Err(out_of_bounds(marker).into());
        };
        if text.get(marker.span()) != Some(marker.raw_text.as_str()) {
            return Err(out_of_bounds(marker).into());
        }

        result.push_str(between);
        let replacement = replace(marker)?;
        trace!(
            target: "placemark::processor",
            position = marker.position,
            length = marker.length,
            replacement_len = replacement.len(),
            "Spliced marker"
        );
        result.push_str(&replacement);
        cursor = marker.end();
    }

    result.push_str(&text[cursor..]);
    Ok(result)
}

/// Parse `text` and splice every marker in one pass
pub fn render<E, F>(text: &str, delimiters: &Delimiters, replace: F) -> Result<String, E>
where
    E: From<MarkerError>,
    F: FnMut(&Marker) -> Result<String, E>,
{
    let markers = parse_markers(text, delimiters)?;
    splice(text, &markers, replace)
}

fn out_of_bounds(marker: &Marker) -> MarkerError {
    MarkerError::Splice {
        position: marker.position,
        reason: "marker does not match the text at its offset",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, PartialEq)]
    enum RenderError {
        Marker(MarkerError),
        Missing(String),
    }

    impl From<MarkerError> for RenderError {
        fn from(err: MarkerError) -> Self {
            RenderError::Marker(err)
        }
    }

    fn values() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("username", "Ada"),
            ("planet/name", "Mars"),
            ("planet", "Earth"),
        ])
    }

    fn lookup(marker: &Marker) -> Result<String, RenderError> {
        let values = values();
        let value = values
            .get(marker.relative_path().as_str())
            .ok_or_else(|| RenderError::Missing(marker.relative_path()))?;

        let mut value = value.to_string();
        for call in &marker.pipeline {
            match call.name.as_str() {
                "upper" => value = value.to_uppercase(),
                "wrap" => value = format!("{}{}{}", call.arguments[0], value, call.arguments[1]),
                _ => {}
            }
        }
        Ok(value)
    }

    #[test]
    fn test_render_replaces_in_order() {
        let result = render(
            "hello [[username]]! Welcome on [[planet]]!",
            &Delimiters::default(),
            lookup,
        )
        .unwrap();
        assert_eq!(result, "hello Ada! Welcome on Earth!");
    }

    #[test]
    fn test_render_applies_pipeline() {
        let result = render(
            "[[planet.name:upper():wrap(<, >)]] rises",
            &Delimiters::default(),
            lookup,
        )
        .unwrap();
        assert_eq!(result, "<MARS> rises");
    }

    #[test]
    fn test_render_propagates_closure_error() {
        let err = render("hi [[nobody]]", &Delimiters::default(), lookup).unwrap_err();
        assert_eq!(err, RenderError::Missing("nobody".to_string()));
    }

    #[test]
    fn test_render_propagates_parse_error() {
        let err = render("hi [[username", &Delimiters::default(), lookup).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Marker(MarkerError::UnterminatedMarker { position: 3, .. })
        ));
    }

    #[test]
    fn test_splice_identity() {
        let text = "a [[x]] b [[y.z:f(1)]] c";
        let markers = parse_markers(text, &Delimiters::default()).unwrap();
        let result: Result<String, MarkerError> =
            splice(text, &markers, |m| Ok(m.raw_text.clone()));
        assert_eq!(result.unwrap(), text);
    }

    #[test]
    fn test_splice_rejects_out_of_order() {
        let text = "[[a]] [[b]]";
        let mut markers = parse_markers(text, &Delimiters::default()).unwrap();
        markers.reverse();
        let result: Result<String, MarkerError> = splice(text, &markers, |_| Ok(String::new()));
        assert!(matches!(
            result,
            Err(MarkerError::Splice { position: 0, .. })
        ));
    }

    #[test]
    fn test_splice_rejects_foreign_marker() {
        let markers = parse_markers("[[a]]", &Delimiters::default()).unwrap();
        let result: Result<String, MarkerError> =
            splice("xyz", &markers, |_| Ok(String::new()));
        assert!(matches!(result, Err(MarkerError::Splice { .. })));
    }
}
