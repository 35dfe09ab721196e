// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same data as tracing fields at the message's
//! level.
//!
//! # Organization
//!
//! * `context` - Execution context events
//! * `scheduler` - Cast lifecycle and tick events
//! * `codec` - Program encoding and decoding events
//! * `config` - Configuration loading events

use tracing::Span;

pub mod codec;
pub mod config;
pub mod context;
pub mod scheduler;

/// A message that knows its own log level and tracing fields.
pub trait StructuredLog {
    /// Emit the message at its level with structured fields.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
