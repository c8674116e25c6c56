//! Free-text and closed-choice filters

use crate::QueryError;

/// A filter matching one value, optionally restricted to a closed set of options
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExactFilter {
    options: Vec<String>,
    value: Option<String>,
}

impl ExactFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: Vec<String>) -> Self {
        Self {
            options,
            value: None,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Return a copy with the requested value selected.
    /// With options declared, the value must name one of them (ignoring case).
    pub fn set_selected_value(&self, raw: &str) -> Result<Self, QueryError> {
        let raw = raw.trim();
        let value = if self.options.is_empty() {
            raw.to_string()
        } else {
            self.options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(raw))
                .cloned()
                .ok_or_else(|| {
                    QueryError::invalid_value("", raw, format!("one of {}", self.options.join(", ")))
                })?
        };

        Ok(Self {
            options: self.options.clone(),
            value: Some(value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_is_trimmed() {
        let filter = ExactFilter::new().set_selected_value("  oak chair ").unwrap();
        assert_eq!(filter.value(), Some("oak chair"));
    }

    #[test]
    fn test_option_is_canonicalised() {
        let allowed = ExactFilter::with_options(vec!["USD".into(), "EUR".into()]);
        let filter = allowed.set_selected_value("eur").unwrap();
        assert_eq!(filter.value(), Some("EUR"));
        assert_eq!(filter.options(), allowed.options());
        assert_eq!(allowed.value(), None);
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let allowed = ExactFilter::with_options(vec!["USD".into()]);
        assert!(matches!(
            allowed.set_selected_value("GBP"),
            Err(QueryError::InvalidValue { .. })
        ));
    }
}
