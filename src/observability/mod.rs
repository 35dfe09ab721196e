// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout The Spellbook. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Eliminate magic strings scattered throughout the codebase
//! * Keep field names consistent between the human-readable text and tracing fields
//! * Provide consistent, structured logging output
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::context` - Execution context events (bounds faults, cancellation, forking)
//! * `messages::scheduler` - Cast lifecycle and tick events
//! * `messages::codec` - Program encoding and decoding events
//! * `messages::config` - Configuration loading events
//!
//! # Usage
//!
//! ```rust
//! use the_spellbook::observability::messages::scheduler::CastStarted;
//! use the_spellbook::observability::messages::StructuredLog;
//!
//! let msg = CastStarted {
//!     cast_id: 1,
//!     program: "spellbook:glyph_jump",
//!     caster: "Steve",
//! };
//!
//! msg.log();
//! ```

pub mod messages;
