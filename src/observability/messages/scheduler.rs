// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for cast lifecycle and scheduler tick events.
//!
//! This module contains message types for logging events related to:
//! * Cast registration and completion
//! * Suspension and resumption of contexts
//! * Forks, fork limits and external interrupts
//! * Per-tick summaries

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A cast was registered with the scheduler.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_spellbook::observability::messages::scheduler::CastStarted;
///
/// let msg = CastStarted {
///     cast_id: 7,
///     program: "spellbook:glyph_jump -> spellbook:glyph_delay",
///     caster: "Steve",
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct CastStarted<'a> {
    pub cast_id: u64,
    pub program: &'a str,
    pub caster: &'a str,
}

impl Display for CastStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cast {} started by {}: [{}]",
            self.cast_id, self.caster, self.program
        )
    }
}

impl StructuredLog for CastStarted<'_> {
    fn log(&self) {
        tracing::info!(
            cast_id = self.cast_id,
            program = self.program,
            caster = self.caster,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "cast",
            span_name = name,
            cast_id = self.cast_id,
            caster = self.caster,
        )
    }
}

/// A cast has no runnable context left.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use the_spellbook::observability::messages::scheduler::CastCompleted;
///
/// let msg = CastCompleted {
///     cast_id: 7,
///     steps: 4,
///     forks: 1,
///     ticks: 12,
///     cancel_reason: None,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct CastCompleted<'a> {
    pub cast_id: u64,
    pub steps: usize,
    pub forks: usize,
    pub ticks: u64,
    pub cancel_reason: Option<&'a str>,
}

impl Display for CastCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cast {} finished after {} step(s), {} fork(s), {} tick(s)",
            self.cast_id, self.steps, self.forks, self.ticks
        )?;
        if let Some(reason) = self.cancel_reason {
            write!(f, " (canceled: {})", reason)?;
        }
        Ok(())
    }
}

impl StructuredLog for CastCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            cast_id = self.cast_id,
            steps = self.steps,
            forks = self.forks,
            ticks = self.ticks,
            cancel_reason = self.cancel_reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "cast_completed",
            span_name = name,
            cast_id = self.cast_id,
            steps = self.steps,
        )
    }
}

/// A cast's active context is waiting on a suspension token.
///
/// # Log Level
/// `trace!` - Emitted every tick while suspended
pub struct CastSuspended {
    pub cast_id: u64,
    pub remaining: i64,
}

impl Display for CastSuspended {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cast {} suspended, {} tick(s) remaining",
            self.cast_id, self.remaining
        )
    }
}

impl StructuredLog for CastSuspended {
    fn log(&self) {
        tracing::trace!(cast_id = self.cast_id, remaining = self.remaining, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "cast_suspended",
            span_name = name,
            cast_id = self.cast_id,
            remaining = self.remaining,
        )
    }
}

/// A suspension token expired and the cast is runnable again.
///
/// # Log Level
/// `debug!` - Detailed execution flow
pub struct CastResumed {
    pub cast_id: u64,
    pub counter: usize,
}

impl Display for CastResumed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cast {} resumed at index {}", self.cast_id, self.counter)
    }
}

impl StructuredLog for CastResumed {
    fn log(&self) {
        tracing::debug!(cast_id = self.cast_id, counter = self.counter, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("cast_resumed", span_name = name, cast_id = self.cast_id)
    }
}

/// A cast exceeded its fork budget and was terminated.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct ForkLimitExceeded {
    pub cast_id: u64,
    pub limit: usize,
}

impl Display for ForkLimitExceeded {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cast {} exceeded the fork limit of {}, terminating",
            self.cast_id, self.limit
        )
    }
}

impl StructuredLog for ForkLimitExceeded {
    fn log(&self) {
        tracing::warn!(cast_id = self.cast_id, limit = self.limit, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("fork_limit_exceeded", span_name = name, cast_id = self.cast_id)
    }
}

/// Summary of one scheduler tick.
///
/// # Log Level
/// `trace!` - Emitted every tick
pub struct TickCompleted {
    pub tick: u64,
    pub steps: usize,
    pub completed: usize,
    pub in_flight: usize,
}

impl Display for TickCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Tick {}: {} step(s), {} cast(s) completed, {} in flight",
            self.tick, self.steps, self.completed, self.in_flight
        )
    }
}

impl StructuredLog for TickCompleted {
    fn log(&self) {
        tracing::trace!(
            tick = self.tick,
            steps = self.steps,
            completed = self.completed,
            in_flight = self.in_flight,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!("tick", span_name = name, tick = self.tick)
    }
}

/// A cast gets its turn within a tick.
///
/// # Log Level
/// `trace!` - Very detailed execution flow
pub struct CastStepping {
    pub cast_id: u64,
    pub context: u64,
    pub tick: u64,
}

impl Display for CastStepping {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cast {} stepping context {} (tick {} of this cast)",
            self.cast_id, self.context, self.tick
        )
    }
}

impl StructuredLog for CastStepping {
    fn log(&self) {
        tracing::trace!(
            cast_id = self.cast_id,
            context = self.context,
            tick = self.tick,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "cast_step",
            span_name = name,
            cast_id = self.cast_id,
            context = self.context,
        )
    }
}

/// Execution of a cast moved into a forked child context.
///
/// # Log Level
/// `debug!` - Detailed execution flow
pub struct CastForked {
    pub cast_id: u64,
    pub parent: u64,
    pub child: u64,
    pub forks: usize,
}

impl Display for CastForked {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Cast {} moved from context {} to {} (fork {})",
            self.cast_id, self.parent, self.child, self.forks
        )
    }
}

impl StructuredLog for CastForked {
    fn log(&self) {
        tracing::debug!(
            cast_id = self.cast_id,
            parent = self.parent,
            child = self.child,
            forks = self.forks,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "cast_fork",
            span_name = name,
            cast_id = self.cast_id,
            parent = self.parent,
            child = self.child,
        )
    }
}

/// A cast was stopped from outside the tick loop.
///
/// # Log Level
/// `info!` - Important operational event
pub struct CastInterrupted<'a> {
    pub cast_id: u64,
    pub reason: &'a str,
    pub notify: bool,
}

impl Display for CastInterrupted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mode = if self.notify { "canceled" } else { "terminated" };
        write!(f, "Cast {} {} ({})", self.cast_id, mode, self.reason)
    }
}

impl StructuredLog for CastInterrupted<'_> {
    fn log(&self) {
        tracing::info!(
            cast_id = self.cast_id,
            reason = self.reason,
            notify = self.notify,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "cast_interrupt",
            span_name = name,
            cast_id = self.cast_id,
            reason = self.reason,
        )
    }
}
