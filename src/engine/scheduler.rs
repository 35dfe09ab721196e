// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Cooperative tick-driven scheduler for casts.
//!
//! The scheduler owns a [`ContextArena`] and a list of in-flight casts. Every
//! cast has exactly one active context. A tick visits each cast in
//! registration order:
//!
//! 1. A pending suspension token is counted down; while it stays positive the
//!    cast is skipped for this tick.
//! 2. Up to `max_steps_per_tick` instructions run: `has_next`, `advance`, then
//!    the instruction's effect.
//! 3. An effect answering [`Resolution::Fork`] moves execution into a child:
//!    the active context is forked in the arena, then canceled with
//!    [`CancelReason::NewContext`], and the child becomes active. Forking
//!    before canceling keeps the child's own cancel flag clear.
//! 4. A cast whose active context is canceled, or has nothing left to run and
//!    is not suspended, completes and all of its contexts are released.
//!
//! Everything is `&mut self`; there is no locking and no reentrancy.
//!
//! # Example
//! ```
//! use the_spellbook::context::ExecutionContext;
//! use the_spellbook::engine::SpellScheduler;
//! use the_spellbook::parts::stub::stub_instruction;
//! use the_spellbook::program::Program;
//! use the_spellbook::world::SandboxWorld;
//!
//! let mut world = SandboxWorld::new();
//! let mut scheduler = SpellScheduler::new();
//! let program = Program::from_instructions(vec![
//!     stub_instruction("glyph_touch").unwrap(),
//!     stub_instruction("glyph_light").unwrap(),
//! ]);
//! let cast_id = scheduler.cast(ExecutionContext::dehydrated(program));
//!
//! let report = scheduler.tick(&mut world);
//! assert_eq!(report.steps, 2);
//! assert_eq!(report.completed[0].cast_id, cast_id);
//! assert!(scheduler.is_idle());
//! ```

use crate::config::consts::{
    DEFAULT_MAX_FORKS_PER_CAST, DEFAULT_MAX_STEPS_PER_TICK, DEFAULT_TICK_INTERVAL_MS,
};
use crate::config::EngineConfig;
use crate::context::{CancelReason, ContextArena, ContextId, ExecutionContext};
use crate::observability::messages::scheduler::{
    CastCompleted, CastForked, CastInterrupted, CastResumed, CastStarted, CastStepping,
    CastSuspended, ForkLimitExceeded, TickCompleted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{Resolution, World};
use std::fmt;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CastId(u64);

impl CastId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cast-{}", self.0)
    }
}

/// Final state of a completed cast.
#[derive(Debug, Clone)]
pub struct CastOutcome {
    pub cast_id: CastId,
    pub steps: usize,
    pub forks: usize,
    pub ticks: u64,
    /// Set when the final context was canceled rather than run to the end.
    pub cancel_reason: Option<CancelReason>,
    /// Snapshot of the last active context, taken before release.
    pub final_context: Option<ExecutionContext>,
}

#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: u64,
    pub steps: usize,
    pub forks: usize,
    pub completed: Vec<CastOutcome>,
    pub in_flight: usize,
}

struct InFlightCast {
    id: CastId,
    active: ContextId,
    contexts: Vec<ContextId>,
    steps: usize,
    forks: usize,
    ticks: u64,
}

enum CastState {
    Running,
    Finished,
}

pub struct SpellScheduler {
    arena: ContextArena,
    casts: Vec<InFlightCast>,
    next_cast_id: u64,
    ticks: u64,
    max_steps_per_tick: usize,
    max_forks_per_cast: usize,
    tick_interval: Duration,
}

impl SpellScheduler {
    pub fn new() -> Self {
        Self {
            arena: ContextArena::new(),
            casts: Vec::new(),
            next_cast_id: 1,
            ticks: 0,
            max_steps_per_tick: DEFAULT_MAX_STEPS_PER_TICK,
            max_forks_per_cast: DEFAULT_MAX_FORKS_PER_CAST,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            arena: ContextArena::with_max_lineage_depth(config.limits.get_max_lineage_depth()),
            max_steps_per_tick: config.scheduler.get_max_steps_per_tick().max(1),
            max_forks_per_cast: config.scheduler.get_max_forks_per_cast(),
            tick_interval: config.scheduler.get_tick_interval(),
            ..Self::new()
        }
    }

    /// Zero is raised to one so every in-flight cast can make progress.
    pub fn with_max_steps_per_tick(mut self, max_steps_per_tick: usize) -> Self {
        self.max_steps_per_tick = max_steps_per_tick.max(1);
        self
    }

    pub fn with_max_forks_per_cast(mut self, max_forks_per_cast: usize) -> Self {
        self.max_forks_per_cast = max_forks_per_cast;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn arena(&self) -> &ContextArena {
        &self.arena
    }

    /// Register a root context. Any parent link it carries is cleared.
    pub fn cast(&mut self, mut ctx: ExecutionContext) -> CastId {
        ctx.set_parent(None);
        let id = CastId(self.next_cast_id);
        self.next_cast_id += 1;

        let program = ctx.program().display_string();
        let caster = ctx.describe_caster();
        let started = CastStarted {
            cast_id: id.0,
            program: &program,
            caster: &caster,
        };
        let span = started.span("cast_registration");
        let _guard = span.enter();
        started.log();

        let root = self.arena.insert(ctx);
        self.casts.push(InFlightCast {
            id,
            active: root,
            contexts: vec![root],
            steps: 0,
            forks: 0,
            ticks: 0,
        });
        id
    }

    pub fn is_idle(&self) -> bool {
        self.casts.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.casts.len()
    }

    pub fn cast_ids(&self) -> Vec<CastId> {
        self.casts.iter().map(|cast| cast.id).collect()
    }

    pub fn active_context_id(&self, cast_id: CastId) -> Option<ContextId> {
        self.find(cast_id).map(|cast| cast.active)
    }

    /// The active context of an in-flight cast.
    pub fn context(&self, cast_id: CastId) -> Option<&ExecutionContext> {
        self.active_context_id(cast_id)
            .and_then(|id| self.arena.get(id))
    }

    /// Cancel the active context of a cast, running the notification walk.
    ///
    /// The cast completes on the next tick. Returns `false` for an unknown id.
    pub fn cancel_cast(&mut self, cast_id: CastId, reason: CancelReason) -> bool {
        let ctx = match self.active_context_mut(cast_id) {
            Some(ctx) => ctx,
            None => return false,
        };
        let label = reason.to_string();
        let interrupted = CastInterrupted {
            cast_id: cast_id.0,
            reason: &label,
            notify: true,
        };
        let span = interrupted.span("cancel_cast");
        let _guard = span.enter();
        interrupted.log();
        ctx.cancel(reason)
    }

    /// Hard-stop a cast without notifying any instruction.
    pub fn terminate_cast(&mut self, cast_id: CastId) -> bool {
        let ctx = match self.active_context_mut(cast_id) {
            Some(ctx) => ctx,
            None => return false,
        };
        let interrupted = CastInterrupted {
            cast_id: cast_id.0,
            reason: "external",
            notify: false,
        };
        let span = interrupted.span("terminate_cast");
        let _guard = span.enter();
        interrupted.log();
        ctx.terminate();
        true
    }

    pub fn tick(&mut self, world: &mut dyn World) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..TickReport::default()
        };

        for mut cast in std::mem::take(&mut self.casts) {
            cast.ticks += 1;
            match self.step_cast(&mut cast, world, &mut report) {
                CastState::Running => self.casts.push(cast),
                CastState::Finished => {
                    let outcome = self.complete(cast);
                    report.completed.push(outcome);
                }
            }
        }
        report.in_flight = self.casts.len();

        TickCompleted {
            tick: report.tick,
            steps: report.steps,
            completed: report.completed.len(),
            in_flight: report.in_flight,
        }
        .log();
        report
    }

    /// Tick until idle or until `max_ticks` ticks have run. Returns the number
    /// of ticks run.
    pub fn run_until_idle(&mut self, world: &mut dyn World, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while !self.is_idle() && ticks < max_ticks {
            self.tick(world);
            ticks += 1;
        }
        ticks
    }

    /// Tick on a tokio interval until no cast is left in flight.
    pub async fn drive(&mut self, world: &mut dyn World, interval: Duration) -> Vec<CastOutcome> {
        let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut completed = Vec::new();
        while !self.is_idle() {
            ticker.tick().await;
            completed.extend(self.tick(world).completed);
        }
        completed
    }

    fn find(&self, cast_id: CastId) -> Option<&InFlightCast> {
        self.casts.iter().find(|cast| cast.id == cast_id)
    }

    fn active_context_mut(&mut self, cast_id: CastId) -> Option<&mut ExecutionContext> {
        let active = self.find(cast_id)?.active;
        self.arena.get_mut(active)
    }

    fn step_cast(
        &mut self,
        cast: &mut InFlightCast,
        world: &mut dyn World,
        report: &mut TickReport,
    ) -> CastState {
        let stepping = CastStepping {
            cast_id: cast.id.0,
            context: cast.active.as_u64(),
            tick: cast.ticks,
        };
        let span = stepping.span("step_cast");
        let _guard = span.enter();
        stepping.log();

        let ctx = match self.arena.get_mut(cast.active) {
            Some(ctx) => ctx,
            None => return CastState::Finished,
        };
        if !ctx.is_canceled() {
            if let Some(token) = ctx.suspension_mut() {
                if token.is_pending() {
                    let remaining = token.tick();
                    if remaining > 0 {
                        CastSuspended {
                            cast_id: cast.id.0,
                            remaining,
                        }
                        .log();
                        return CastState::Running;
                    }
                }
                ctx.take_suspension();
                CastResumed {
                    cast_id: cast.id.0,
                    counter: ctx.counter(),
                }
                .log();
            }
        }

        let mut steps = 0;
        while steps < self.max_steps_per_tick {
            let active = cast.active;
            let ctx = match self.arena.get_mut(active) {
                Some(ctx) if ctx.has_next() => ctx,
                _ => break,
            };
            let instruction = match ctx.advance() {
                Some(instruction) => instruction,
                None => break,
            };
            steps += 1;
            tracing::trace!(
                instruction = %instruction.id(),
                effect = instruction.effect().name(),
                "Casting instruction"
            );

            if instruction.effect().cast(ctx, world) != Resolution::Fork {
                continue;
            }
            if cast.forks >= self.max_forks_per_cast {
                ForkLimitExceeded {
                    cast_id: cast.id.0,
                    limit: self.max_forks_per_cast,
                }
                .log();
                ctx.terminate();
                break;
            }
            let child = match self.arena.fork(active) {
                Some(child) => child,
                None => break,
            };
            cast.forks += 1;
            report.forks += 1;
            let forked = CastForked {
                cast_id: cast.id.0,
                parent: active.as_u64(),
                child: child.as_u64(),
                forks: cast.forks,
            };
            let fork_span = forked.span("fork");
            let _fork_guard = fork_span.enter();
            forked.log();
            if let Some(parent) = self.arena.get_mut(active) {
                parent.cancel(CancelReason::NewContext);
            }
            cast.contexts.push(child);
            cast.active = child;
        }
        cast.steps += steps;
        report.steps += steps;

        match self.arena.get(cast.active) {
            Some(ctx) if ctx.is_canceled() => CastState::Finished,
            Some(ctx) if ctx.has_next() || ctx.is_suspended() => CastState::Running,
            _ => CastState::Finished,
        }
    }

    fn complete(&mut self, cast: InFlightCast) -> CastOutcome {
        let final_context = self.arena.get(cast.active).cloned();
        let cancel_reason = final_context
            .as_ref()
            .filter(|ctx| ctx.is_canceled())
            .and_then(|ctx| ctx.cancel_reason().cloned());
        let reason_label = cancel_reason.as_ref().map(|reason| reason.to_string());

        CastCompleted {
            cast_id: cast.id.0,
            steps: cast.steps,
            forks: cast.forks,
            ticks: cast.ticks,
            cancel_reason: reason_label.as_deref(),
        }
        .log();

        self.arena.release(&cast.contexts);
        CastOutcome {
            cast_id: cast.id,
            steps: cast.steps,
            forks: cast.forks,
            ticks: cast.ticks,
            cancel_reason,
            final_context,
        }
    }
}

impl Default for SpellScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SpellScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpellScheduler")
            .field("in_flight", &self.casts.len())
            .field("ticks", &self.ticks)
            .field("arena", &self.arena)
            .field("max_steps_per_tick", &self.max_steps_per_tick)
            .field("max_forks_per_cast", &self.max_forks_per_cast)
            .finish()
    }
}
