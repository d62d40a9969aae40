use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque language identifier (a BCP-47-like tag such as "en" or "pt-BR").
///
/// Only identity matters here: codes are compared and hashed, never
/// interpreted. Whatever tags the configuration and the sidecar filenames
/// agree on is what the rest of the system works with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn new<S: Into<String>>(code: S) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_exact() {
        assert_eq!(LanguageCode::from("en"), LanguageCode::new("en"));
        assert_ne!(LanguageCode::from("en"), LanguageCode::from("EN"));
    }

    #[test]
    fn test_display_round_trip() {
        let code = LanguageCode::from("pt-BR");
        assert_eq!(code.to_string(), "pt-BR");
        assert_eq!(code.as_str(), "pt-BR");
    }
}
