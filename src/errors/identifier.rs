// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors produced while parsing a `namespace:path` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The namespace or path part was empty
    Empty {
        /// The raw input that was rejected
        input: String,
    },
    /// A character outside the allowed set was found
    InvalidCharacter {
        /// The raw input that was rejected
        input: String,
        /// The offending character
        character: char,
    },
}

impl fmt::Display for IdentifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierError::Empty { input } => {
                write!(f, "Identifier '{}' has an empty namespace or path", input)
            }
            IdentifierError::InvalidCharacter { input, character } => {
                write!(
                    f,
                    "Identifier '{}' contains invalid character '{}'",
                    input, character
                )
            }
        }
    }
}

impl std::error::Error for IdentifierError {}
