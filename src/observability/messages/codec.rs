// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for program encoding and decoding.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A program was decoded from one of its wire forms.
///
/// # Log Level
/// `debug!` - Detailed execution flow
///
/// # Example
/// ```
/// use the_spellbook::observability::messages::codec::ProgramDecoded;
///
/// let msg = ProgramDecoded {
///     form: "network",
///     instruction_count: 3,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ProgramDecoded<'a> {
    pub form: &'a str,
    pub instruction_count: usize,
}

impl Display for ProgramDecoded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Decoded {} program with {} instruction(s)",
            self.form, self.instruction_count
        )
    }
}

impl StructuredLog for ProgramDecoded<'_> {
    fn log(&self) {
        tracing::debug!(
            form = self.form,
            instruction_count = self.instruction_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("program_decoded", span_name = name, form = self.form)
    }
}

/// A program could not be decoded.
///
/// # Log Level
/// `warn!` - Rejected input
pub struct ProgramDecodeFailed<'a> {
    pub form: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for ProgramDecodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Failed to decode {} program: {}", self.form, self.error)
    }
}

impl StructuredLog for ProgramDecodeFailed<'_> {
    fn log(&self) {
        tracing::warn!(form = self.form, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "program_decode_failed",
            span_name = name,
            form = self.form,
            error = %self.error,
        )
    }
}
