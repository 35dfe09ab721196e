// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for execution context events.
//!
//! This module contains message types for logging events related to:
//! * Program-counter bounds faults
//! * Cancellation and termination
//! * Forking into child contexts
//! * Lineage duplication in the context arena

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// The program counter was advanced past the end of the program.
///
/// This only happens when a caller rewired a context without resetting its
/// bounds. The context recovers by yielding no instruction.
///
/// # Log Level
/// `error!` - Internal consistency fault, should be reported
///
/// # Example
/// ```
/// use the_spellbook::observability::messages::context::ProgramBoundsFault;
///
/// let msg = ProgramBoundsFault {
///     program: "spellbook:glyph_jump",
///     index: 3,
///     length: 1,
///     caster: "Steve",
///     casting_site: "<none>",
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct ProgramBoundsFault<'a> {
    pub program: &'a str,
    pub index: usize,
    pub length: usize,
    pub caster: &'a str,
    pub casting_site: &'a str,
}

impl Display for ProgramBoundsFault<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Invalid spell cast found, this is a bug and should be reported: index {} is out of bounds for program of length {} [{}], caster={}, casting_site={}",
            self.index, self.length, self.program, self.caster, self.casting_site
        )
    }
}

impl StructuredLog for ProgramBoundsFault<'_> {
    fn log(&self) {
        tracing::error!(
            program = self.program,
            index = self.index,
            length = self.length,
            caster = self.caster,
            casting_site = self.casting_site,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "program_bounds_fault",
            span_name = name,
            program = self.program,
            index = self.index,
            length = self.length,
        )
    }
}

/// A context was canceled and its remaining instructions were notified.
///
/// # Log Level
/// `debug!` - Normal terminal state
pub struct ContextCanceled<'a> {
    pub reason: &'a str,
    pub counter: usize,
    pub observers_notified: usize,
    pub absorbed: bool,
}

impl Display for ContextCanceled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Context canceled ({}) at index {}: {} observer(s) notified{}",
            self.reason,
            self.counter,
            self.observers_notified,
            if self.absorbed { ", walk stopped early" } else { "" }
        )
    }
}

impl StructuredLog for ContextCanceled<'_> {
    fn log(&self) {
        tracing::debug!(
            reason = self.reason,
            counter = self.counter,
            observers_notified = self.observers_notified,
            absorbed = self.absorbed,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "context_canceled",
            span_name = name,
            reason = self.reason,
            counter = self.counter,
        )
    }
}

/// A context was stopped without notifying its remaining instructions.
///
/// # Log Level
/// `debug!` - Normal terminal state
pub struct ContextTerminated {
    pub counter: usize,
    pub length: usize,
}

impl Display for ContextTerminated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Context terminated at index {} of {}",
            self.counter, self.length
        )
    }
}

impl StructuredLog for ContextTerminated {
    fn log(&self) {
        tracing::debug!(counter = self.counter, length = self.length, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "context_terminated",
            span_name = name,
            counter = self.counter,
            length = self.length,
        )
    }
}

/// A manipulator instruction supplied the child context for a fork.
///
/// # Log Level
/// `debug!` - Detailed execution flow
///
/// # Example
/// ```
/// use the_spellbook::observability::messages::context::ManipulatorSelected;
///
/// let msg = ManipulatorSelected {
///     instruction: "spellbook:glyph_echo",
///     position: 2,
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct ManipulatorSelected<'a> {
    pub instruction: &'a str,
    pub position: usize,
}

impl Display for ManipulatorSelected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Manipulator '{}' at remainder position {} supplied the child context",
            self.instruction, self.position
        )
    }
}

impl StructuredLog for ManipulatorSelected<'_> {
    fn log(&self) {
        tracing::debug!(
            instruction = self.instruction,
            position = self.position,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "manipulator_selected",
            span_name = name,
            instruction = self.instruction,
        )
    }
}

/// A child context was inserted into the arena.
///
/// # Log Level
/// `debug!` - Detailed execution flow
pub struct ContextForked {
    pub parent: u64,
    pub child: u64,
    pub depth: usize,
    pub remaining: usize,
}

impl Display for ContextForked {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Context {} forked into {} (depth {}, {} instruction(s) remaining)",
            self.parent, self.child, self.depth, self.remaining
        )
    }
}

impl StructuredLog for ContextForked {
    fn log(&self) {
        tracing::debug!(
            parent = self.parent,
            child = self.child,
            depth = self.depth,
            remaining = self.remaining,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "context_forked",
            span_name = name,
            parent = self.parent,
            child = self.child,
        )
    }
}

/// An explicit ancestor-chain copy was performed.
///
/// # Log Level
/// `debug!` - Detailed execution flow
pub struct LineageDuplicated {
    pub source: u64,
    pub copy: u64,
    pub copied: usize,
    pub truncated: bool,
}

impl Display for LineageDuplicated {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Duplicated lineage of context {} as {}: {} context(s) copied{}",
            self.source,
            self.copy,
            self.copied,
            if self.truncated { " (depth limit reached)" } else { "" }
        )
    }
}

impl StructuredLog for LineageDuplicated {
    fn log(&self) {
        tracing::debug!(
            source = self.source,
            copy = self.copy,
            copied = self.copied,
            truncated = self.truncated,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "lineage_duplicated",
            span_name = name,
            source = self.source,
            copy = self.copy,
        )
    }
}
