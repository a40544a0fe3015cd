//! Error types for configuration loading and enum parsing.
//!
//! Geometry and animation code never fails: numeric input is clamped and
//! unknown names degrade to defaults. Only loading an authored description
//! can produce an error.

use thiserror::Error;

/// Failure to load or extract a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not read, merge or deserialize the sources.
    #[error("configuration error: {0}")]
    Extract(#[from] figment::Error),
}

/// A name that does not match any variant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{name}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownVariant {
    pub fn new(kind: &'static str, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
        }
    }
}

/// Normalize an enum name for matching: upper case, `-` and spaces to `_`.
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            '-' | ' ' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}

/// Implements name parsing for a fieldless config enum.
///
/// Generates `as_str`, a strict `FromStr`, and a lenient `From<String>` that
/// logs and falls back to `Default` so serde can use
/// `#[serde(from = "String", into = "String")]`.
macro_rules! named_enum {
    ($ty:ident, $kind:literal, { $($name:literal $(| $alias:literal)* => $variant:ident),+ $(,)? }) => {
        impl $ty {
            /// Canonical configuration name.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl std::str::FromStr for $ty {
            type Err = $crate::error::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match $crate::error::normalize_name(s).as_str() {
                    $($name $(| $alias)* => Ok($ty::$variant),)+
                    _ => Err($crate::error::UnknownVariant::new($kind, s)),
                }
            }
        }

        impl From<String> for $ty {
            fn from(s: String) -> Self {
                s.parse().unwrap_or_else(|e| {
                    log::warn!("{}, using {}", e, $ty::default().as_str());
                    $ty::default()
                })
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> Self {
                v.as_str().to_string()
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub(crate) use named_enum;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_display() {
        let err = UnknownVariant::new("body type", "PYRAMID");
        let msg = format!("{}", err);
        assert!(msg.contains("body type"));
        assert!(msg.contains("PYRAMID"));
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name(" golden-ratio "), "GOLDEN_RATIO");
        assert_eq!(normalize_name("Bipolar Chase Sync"), "BIPOLAR_CHASE_SYNC");
    }
}
