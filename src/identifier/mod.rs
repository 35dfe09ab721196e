// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Namespaced identifiers.
//!
//! Instructions, context attachments and custom cancel reasons are all keyed by
//! an [`Identifier`] of the form `namespace:path`. Strings without a namespace
//! fall back to [`DEFAULT_NAMESPACE`].
//!
//! ```
//! use the_spellbook::identifier::Identifier;
//!
//! let id: Identifier = "spellbook:glyph_jump".parse().unwrap();
//! assert_eq!(id.namespace(), "spellbook");
//! assert_eq!(id.path(), "glyph_jump");
//! assert_eq!(id, Identifier::from_path("glyph_jump").unwrap());
//! ```

use crate::errors::IdentifierError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Namespace used when an identifier string omits one.
pub const DEFAULT_NAMESPACE: &str = "spellbook";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    pub fn new(namespace: &str, path: &str) -> Result<Self, IdentifierError> {
        let raw = format!("{}:{}", namespace, path);
        if namespace.is_empty() || path.is_empty() {
            return Err(IdentifierError::Empty { input: raw });
        }
        if let Some(character) = namespace.chars().find(|c| !is_namespace_char(*c)) {
            return Err(IdentifierError::InvalidCharacter { input: raw, character });
        }
        if let Some(character) = path.chars().find(|c| !is_path_char(*c)) {
            return Err(IdentifierError::InvalidCharacter { input: raw, character });
        }
        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Build an identifier in the default namespace.
    pub fn from_path(path: &str) -> Result<Self, IdentifierError> {
        Self::new(DEFAULT_NAMESPACE, path)
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

fn is_path_char(c: char) -> bool {
    is_namespace_char(c) || c == '/'
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::from_path(s),
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_namespaced_identifier() {
        let id: Identifier = "ars:glyph_delay".parse().unwrap();
        assert_eq!(id.namespace(), "ars");
        assert_eq!(id.path(), "glyph_delay");
        assert_eq!(id.to_string(), "ars:glyph_delay");
    }

    #[test]
    fn missing_namespace_uses_default() {
        let id: Identifier = "glyph_jump".parse().unwrap();
        assert_eq!(id.namespace(), DEFAULT_NAMESPACE);
    }

    #[test]
    fn rejects_empty_parts() {
        assert!(matches!(
            ":glyph".parse::<Identifier>(),
            Err(IdentifierError::Empty { .. })
        ));
        assert!(matches!(
            "ars:".parse::<Identifier>(),
            Err(IdentifierError::Empty { .. })
        ));
    }

    #[test]
    fn rejects_uppercase_and_slash_in_namespace() {
        let err = "ars:Glyph".parse::<Identifier>().unwrap_err();
        assert_eq!(
            err,
            IdentifierError::InvalidCharacter {
                input: "ars:Glyph".to_string(),
                character: 'G'
            }
        );
        assert!("a/b:glyph".parse::<Identifier>().is_err());
        assert!("ars:sub/glyph".parse::<Identifier>().is_ok());
    }

    #[test]
    fn serializes_as_string() {
        let id = Identifier::new("ars", "glyph_jump").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"ars:glyph_jump\"");
        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
