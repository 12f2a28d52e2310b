//! Macro for implementing Display and FromStr for status enums
//!
//! Eliminates boilerplate for status enum conversions by providing a single
//! implementation for both Display and FromStr traits. Parsing is
//! case-insensitive and the string representation is consistent.
//!
//! # Example
//!
//! ```rust
//! use meritsync_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ReviewOutcome {
//!     Accepted,
//!     Declined,
//! }
//!
//! impl_domain_status_conversions!(ReviewOutcome {
//!     Accepted => "accepted",
//!     Declined => "declined",
//! });
//! ```

/// Implements Display and FromStr traits for status enums
///
/// This macro generates:
/// - Display trait: converts enum variants to lowercase strings
/// - FromStr trait: parses case-insensitive strings to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their string
///   representations
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Draft,
        Submitted,
        Archived,
    }

    impl_domain_status_conversions!(TestStatus {
        Draft => "draft",
        Submitted => "submitted",
        Archived => "archived",
    });

    #[test]
    fn test_display_conversion() {
        assert_eq!(TestStatus::Draft.to_string(), "draft");
        assert_eq!(TestStatus::Submitted.to_string(), "submitted");
        assert_eq!(TestStatus::Archived.to_string(), "archived");
    }

    #[test]
    fn test_fromstr_case_insensitive() {
        assert_eq!(TestStatus::from_str("draft").unwrap(), TestStatus::Draft);
        assert_eq!(TestStatus::from_str("SUBMITTED").unwrap(), TestStatus::Submitted);
        assert_eq!(TestStatus::from_str("ArCHiveD").unwrap(), TestStatus::Archived);
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestStatus::from_str("unknown");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestStatus: unknown"));
    }

    #[test]
    fn test_roundtrip() {
        for status in [TestStatus::Draft, TestStatus::Submitted, TestStatus::Archived] {
            assert_eq!(TestStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }
}
