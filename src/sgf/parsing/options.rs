//! Parse options
//!
//! By default validation only records a status on each property. The two switches turn
//! validation outcomes into fatal parse errors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ParseOptions {
    /// Abort when a property becomes invalid
    pub strict: bool,
    /// Abort when a property can only be validated with board context
    pub deferred_is_error: bool,
}

impl ParseOptions {
    pub fn strict() -> Self {
        ParseOptions {
            strict: true,
            ..Self::default()
        }
    }

    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        // an empty document deserializes to unit, not to an empty map
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_lenient() {
        let options = ParseOptions::default();
        assert!(!options.strict);
        assert!(!options.deferred_is_error);
    }

    #[test]
    fn test_from_yaml() {
        let options = ParseOptions::from_yaml("strict: true\n").unwrap();
        assert_eq!(options, ParseOptions::strict());

        let options = ParseOptions::from_yaml("deferred-is-error: true\n").unwrap();
        assert!(options.deferred_is_error);
        assert!(!options.strict);

        assert_eq!(ParseOptions::from_yaml("").unwrap(), ParseOptions::default());
        assert!(ParseOptions::from_yaml("strict: maybe\n").is_err());
    }
}
