//! Error types for declarative progress view configuration.
//!
//! The progress view itself never fails: out-of-range progress values are
//! clamped and malformed attributes fall back to defaults. These errors are
//! only surfaced by the strict attribute parser,
//! [`Config::try_from_attributes`](crate::config::Config::try_from_attributes).
//!
//! # Example
//!
//! ```rust
//! use bubbletea_progressview::config::Config;
//! use bubbletea_progressview::error::AttributeError;
//!
//! let err = Config::try_from_attributes(&[("max", "lots")]).unwrap_err();
//! assert!(matches!(err, AttributeError::InvalidNumber { .. }));
//! ```

use thiserror::Error;

/// Errors produced while reading a declarative attribute set.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// The attribute name is not recognized.
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),

    /// The value could not be parsed as a number.
    #[error("attribute `{name}` expects a number, got `{value}`")]
    InvalidNumber {
        /// Attribute name.
        name: String,
        /// Raw value that failed to parse.
        value: String,
    },

    /// The value could not be parsed as a boolean.
    #[error("attribute `{name}` expects a boolean, got `{value}`")]
    InvalidBool {
        /// Attribute name.
        name: String,
        /// Raw value that failed to parse.
        value: String,
    },

    /// The value is not a `#RGB`, `#RRGGBB` or `#AARRGGBB` hex color.
    #[error("attribute `{name}` expects a hex color, got `{value}`")]
    InvalidColor {
        /// Attribute name.
        name: String,
        /// Raw value that failed to parse.
        value: String,
    },

    /// The value is not one of the enumerated options for this attribute.
    #[error("attribute `{name}` does not accept `{value}`")]
    InvalidOption {
        /// Attribute name.
        name: String,
        /// Raw value that failed to parse.
        value: String,
    },

    /// `min` is not strictly below `max` after all attributes were applied.
    #[error("invalid progress range: min {min} must be less than max {max}")]
    InvalidRange {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },
}

/// Result alias for attribute parsing.
pub type Result<T> = std::result::Result<T, AttributeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_attribute() {
        let err = AttributeError::InvalidNumber {
            name: "duration".to_string(),
            value: "soon".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "attribute `duration` expects a number, got `soon`"
        );

        let err = AttributeError::UnknownAttribute("sparkle".to_string());
        assert_eq!(err.to_string(), "unknown attribute: sparkle");
    }

    #[test]
    fn test_range_error_message() {
        let err = AttributeError::InvalidRange {
            min: 10.0,
            max: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid progress range: min 10 must be less than max 5"
        );
    }
}
