use crate::error::MarkerError;

/// The opening/closing pair that brackets a marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    open: String,
    close: String,
}

impl Delimiters {
    /// Both delimiters must be non-empty and distinct
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, MarkerError> {
        let open = open.into();
        let close = close.into();

        if open.is_empty() || close.is_empty() {
            return Err(MarkerError::InvalidDelimiters("delimiters must not be empty"));
        }
        if open == close {
            return Err(MarkerError::InvalidDelimiters(
                "opening and closing delimiters must differ",
            ));
        }

        Ok(Self { open, close })
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            open: "[[".to_string(),
            close: "]]".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pair() {
        let delimiters = Delimiters::default();
        assert_eq!(delimiters.open(), "[[");
        assert_eq!(delimiters.close(), "]]");
        assert_eq!(Delimiters::new("[[", "]]").unwrap(), delimiters);
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            Delimiters::new("", "}}"),
            Err(MarkerError::InvalidDelimiters(_))
        ));
        assert!(matches!(
            Delimiters::new("{{", ""),
            Err(MarkerError::InvalidDelimiters(_))
        ));
    }

    #[test]
    fn test_rejects_identical() {
        assert!(matches!(
            Delimiters::new("%%", "%%"),
            Err(MarkerError::InvalidDelimiters(_))
        ));
    }
}
