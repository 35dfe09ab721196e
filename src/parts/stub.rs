// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stub instructions for tests and placeholders.
//!
//! These do nothing in the world; they exist to exercise the engine's
//! sequencing, cancellation and forking paths and to record what happened to
//! them in a shared [`Journal`].

use crate::context::ExecutionContext;
use crate::errors::IdentifierError;
use crate::identifier::Identifier;
use crate::instruction::Instruction;
use crate::program::Program;
use crate::traits::{CancelObserver, ContextManipulator, Effect, Resolution, World};
use std::sync::{Arc, Mutex, PoisonError};

/// Shared, append-only record of stub activity.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// An effect that does nothing and keeps going.
pub struct StubEffect {
    journal: Option<(Journal, String)>,
}

impl StubEffect {
    pub fn new() -> Self {
        Self { journal: None }
    }

    pub fn recording(label: &str, journal: &Journal) -> Self {
        Self {
            journal: Some((journal.clone(), label.to_string())),
        }
    }
}

impl Default for StubEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for StubEffect {
    fn cast(&self, _ctx: &mut ExecutionContext, _world: &mut dyn World) -> Resolution {
        if let Some((journal, label)) = &self.journal {
            journal.record(format!("cast:{}", label));
        }
        Resolution::Continue
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// An effect that always asks for a fork.
pub struct ForkingEffect;

impl Effect for ForkingEffect {
    fn cast(&self, _ctx: &mut ExecutionContext, _world: &mut dyn World) -> Resolution {
        Resolution::Fork
    }

    fn name(&self) -> &'static str {
        "forking"
    }
}

/// Cancel observer that records each notification and answers with a fixed
/// keep-notifying flag.
pub struct RecordingObserver {
    label: String,
    keep_notifying: bool,
    journal: Journal,
}

impl RecordingObserver {
    pub fn new(label: &str, keep_notifying: bool, journal: &Journal) -> Self {
        Self {
            label: label.to_string(),
            keep_notifying,
            journal: journal.clone(),
        }
    }
}

impl CancelObserver for RecordingObserver {
    fn on_canceled(&self, _ctx: &mut ExecutionContext) -> bool {
        self.journal.record(format!("canceled:{}", self.label));
        self.keep_notifying
    }
}

/// Manipulator with a fixed answer to `should_push` and an optional program
/// to propose.
///
/// Proposed contexts are dehydrated and carry `proposed_by = <label>` in
/// their tag.
pub struct FixedManipulator {
    label: String,
    push: bool,
    proposal: Option<Program>,
    journal: Journal,
}

impl FixedManipulator {
    pub fn new(label: &str, push: bool, proposal: Option<Program>, journal: &Journal) -> Self {
        Self {
            label: label.to_string(),
            push,
            proposal,
            journal: journal.clone(),
        }
    }
}

impl ContextManipulator for FixedManipulator {
    fn should_push(&self, _ctx: &ExecutionContext) -> bool {
        self.journal.record(format!("should_push:{}", self.label));
        self.push
    }

    fn propose(&self, _ctx: &ExecutionContext) -> Option<ExecutionContext> {
        self.journal.record(format!("propose:{}", self.label));
        self.proposal.as_ref().map(|program| {
            let mut proposed = ExecutionContext::dehydrated(program.clone());
            proposed
                .tag_mut()
                .insert("proposed_by".to_string(), self.label.clone().into());
            proposed
        })
    }
}

pub fn stub_instruction(path: &str) -> Result<Instruction, IdentifierError> {
    Ok(Instruction::new(
        Identifier::from_path(path)?,
        Arc::new(StubEffect::new()),
    ))
}

pub fn forking_instruction(path: &str) -> Result<Instruction, IdentifierError> {
    Ok(Instruction::new(Identifier::from_path(path)?, Arc::new(ForkingEffect)))
}

pub fn observer_instruction(
    path: &str,
    keep_notifying: bool,
    journal: &Journal,
) -> Result<Instruction, IdentifierError> {
    Ok(stub_instruction(path)?.with_cancel_observer(Arc::new(RecordingObserver::new(
        path,
        keep_notifying,
        journal,
    ))))
}

pub fn manipulator_instruction(
    path: &str,
    push: bool,
    proposal: Option<Program>,
    journal: &Journal,
) -> Result<Instruction, IdentifierError> {
    Ok(stub_instruction(path)?.with_manipulator(Arc::new(FixedManipulator::new(
        path, push, proposal, journal,
    ))))
}
