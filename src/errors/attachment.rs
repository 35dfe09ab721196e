// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for typed access to a context's attachment store.

use crate::identifier::Identifier;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    /// An attachment exists under the id but holds a different type.
    #[error("Attachment '{id}' is not of type {expected}")]
    TypeMismatch {
        id: Identifier,
        expected: &'static str,
    },
}
