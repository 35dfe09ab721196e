// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The execution context: one in-progress traversal of a [`Program`].
//!
//! A context owns its program counter, cancellation state, suspension token,
//! visual state, freeform tag and attachment store. It only *borrows* the
//! caster and casting site through `Weak` handles, and refers to the context it
//! was forked from by [`ContextId`] inside a [`ContextArena`].
//!
//! # Driving a context
//!
//! ```
//! use the_spellbook::context::ExecutionContext;
//! use the_spellbook::parts::stub::stub_instruction;
//! use the_spellbook::program::Program;
//!
//! let program = Program::from_instructions(vec![
//!     stub_instruction("glyph_jump").unwrap(),
//!     stub_instruction("glyph_jump").unwrap(),
//! ]);
//! let mut ctx = ExecutionContext::dehydrated(program);
//!
//! let mut seen = 0;
//! while ctx.has_next() {
//!     let instruction = ctx.advance().unwrap();
//!     assert_eq!(instruction.id().path(), "glyph_jump");
//!     seen += 1;
//! }
//! assert_eq!(seen, 2);
//! assert_eq!(ctx.counter(), 2);
//! ```
//!
//! # Cancellation
//!
//! [`ExecutionContext::cancel`] walks the remaining instructions and notifies
//! every cancel observer in order until one returns `false`.
//! [`ExecutionContext::terminate`] stops without notifying anyone.
//!
//! # Forking
//!
//! [`ExecutionContext::make_child`] gives manipulators in the remaining program
//! the first chance to supply the continuation, falling back to a clone that
//! runs the remainder from index zero.

mod arena;
mod attachments;
mod state;

pub use arena::{ContextArena, ContextId};
pub use attachments::{AttachmentStore, AttachmentValue};
pub use state::{CancelReason, CasterType, ItemStack, SuspendToken};

use crate::instruction::Instruction;
use crate::observability::messages::context::{
    ContextCanceled, ContextTerminated, ManipulatorSelected, ProgramBoundsFault,
};
use crate::observability::messages::StructuredLog;
use crate::program::{ParticleColor, Program};
use crate::traits::{CastingSite, LivingEntity, World};
use std::fmt;
use std::sync::{Arc, Weak};

const NONE_LABEL: &str = "<none>";

#[derive(Clone)]
pub struct ExecutionContext {
    program: Program,
    counter: usize,
    canceled: bool,
    cancel_reason: Option<CancelReason>,
    suspension: Option<SuspendToken>,
    caster: Option<Weak<dyn LivingEntity>>,
    caster_tool: ItemStack,
    casting_site: Option<Weak<dyn CastingSite>>,
    caster_type: Option<CasterType>,
    colors: ParticleColor,
    tag: serde_json::Map<String, serde_json::Value>,
    attachments: AttachmentStore,
    parent: Option<ContextId>,
}

impl ExecutionContext {
    /// A bare context: no caster, no parent, counter at zero.
    ///
    /// This is also what decoding a program from either wire form yields.
    pub fn dehydrated(program: Program) -> Self {
        let colors = program.visual().color;
        Self {
            program,
            counter: 0,
            canceled: false,
            cancel_reason: None,
            suspension: None,
            caster: None,
            caster_tool: ItemStack::empty(),
            casting_site: None,
            caster_type: None,
            colors,
            tag: serde_json::Map::new(),
            attachments: AttachmentStore::new(),
            parent: None,
        }
    }

    pub fn from_entity(program: Program, caster: &Arc<dyn LivingEntity>, tool: &ItemStack) -> Self {
        Self::dehydrated(program)
            .with_caster(caster)
            .with_caster_tool(tool)
            .with_caster_type(CasterType::LivingEntity)
    }

    pub fn with_caster(mut self, caster: &Arc<dyn LivingEntity>) -> Self {
        self.caster = Some(Arc::downgrade(caster));
        self
    }

    pub fn with_casting_site(mut self, site: &Arc<dyn CastingSite>) -> Self {
        self.casting_site = Some(Arc::downgrade(site));
        self
    }

    pub fn with_caster_tool(mut self, tool: &ItemStack) -> Self {
        self.caster_tool = tool.clone();
        self
    }

    pub fn with_caster_type(mut self, caster_type: CasterType) -> Self {
        self.caster_type = Some(caster_type);
        self
    }

    pub fn with_colors(mut self, colors: ParticleColor) -> Self {
        self.colors = colors;
        self
    }

    /// Swap the program. Does not touch the counter.
    pub fn with_program(mut self, program: Program) -> Self {
        self.program = program;
        self
    }

    pub fn with_parent(mut self, parent: ContextId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Move the program counter. Careful: this can point past the end.
    pub fn set_counter(&mut self, index: usize) {
        self.counter = index;
    }

    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Set whenever the context is canceled. Stale after [`reset`](Self::reset).
    pub fn cancel_reason(&self) -> Option<&CancelReason> {
        self.cancel_reason.as_ref()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspension.map_or(false, |token| token.is_pending())
    }

    pub fn suspension(&self) -> Option<&SuspendToken> {
        self.suspension.as_ref()
    }

    pub fn suspension_mut(&mut self) -> Option<&mut SuspendToken> {
        self.suspension.as_mut()
    }

    pub fn take_suspension(&mut self) -> Option<SuspendToken> {
        self.suspension.take()
    }

    /// Suspend for `ticks` scheduler ticks.
    pub fn delay(&mut self, ticks: i64) {
        self.suspension = Some(SuspendToken::new(ticks));
    }

    /// The caster, if one was set and it is still alive.
    pub fn caster(&self) -> Option<Arc<dyn LivingEntity>> {
        self.caster.as_ref().and_then(Weak::upgrade)
    }

    pub fn set_caster(&mut self, caster: Option<&Arc<dyn LivingEntity>>) {
        self.caster = caster.map(Arc::downgrade);
    }

    pub fn casting_site(&self) -> Option<Arc<dyn CastingSite>> {
        self.casting_site.as_ref().and_then(Weak::upgrade)
    }

    pub fn caster_tool(&self) -> &ItemStack {
        &self.caster_tool
    }

    pub fn set_caster_tool(&mut self, tool: &ItemStack) {
        self.caster_tool = tool.clone();
    }

    pub fn caster_tool_mut(&mut self) -> &mut ItemStack {
        &mut self.caster_tool
    }

    pub fn caster_type(&self) -> Option<&CasterType> {
        self.caster_type.as_ref()
    }

    pub fn colors(&self) -> ParticleColor {
        self.colors
    }

    pub fn set_colors(&mut self, colors: ParticleColor) {
        self.colors = colors;
    }

    pub fn tag(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.tag
    }

    pub fn tag_mut(&mut self) -> &mut serde_json::Map<String, serde_json::Value> {
        &mut self.tag
    }

    pub fn attachments(&self) -> &AttachmentStore {
        &self.attachments
    }

    pub fn attachments_mut(&mut self) -> &mut AttachmentStore {
        &mut self.attachments
    }

    /// The context this one was forked from.
    pub fn previous_context(&self) -> Option<ContextId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ContextId>) {
        self.parent = parent;
    }

    /// A new program holding the not-yet-executed instructions.
    pub fn remainder(&self) -> Program {
        self.program.remainder_from(self.counter)
    }

    pub fn has_next(&self) -> bool {
        self.program.is_valid()
            && !self.canceled
            && !self.is_suspended()
            && self.counter < self.program.len()
    }

    /// Step the program counter and return the instruction it moved past.
    ///
    /// An index past the end is logged as a bounds fault and yields `None`;
    /// the counter still moves so repeated calls keep returning `None`.
    pub fn advance(&mut self) -> Option<Instruction> {
        let index = self.counter;
        self.counter = self.counter.saturating_add(1);
        match self.program.get(index) {
            Some(instruction) => Some(instruction.clone()),
            None => {
                let program = self.program.display_string();
                let caster = self.describe_caster();
                let casting_site = self.describe_casting_site();
                ProgramBoundsFault {
                    program: &program,
                    index,
                    length: self.program.len(),
                    caster: &caster,
                    casting_site: &casting_site,
                }
                .log();
                None
            }
        }
    }

    /// Cancel and notify remaining cancel observers in program order.
    ///
    /// The walk stops at the first observer that returns `false`. Always
    /// returns the new canceled state, which is `true`.
    pub fn cancel(&mut self, reason: CancelReason) -> bool {
        self.canceled = true;
        self.cancel_reason = Some(reason);

        let remainder = self.remainder();
        let mut observers_notified = 0;
        let mut absorbed = false;
        for instruction in remainder.iter() {
            if let Some(observer) = instruction.cancel_observer() {
                observers_notified += 1;
                if !observer.on_canceled(self) {
                    absorbed = true;
                    break;
                }
            }
        }

        let reason = self
            .cancel_reason
            .as_ref()
            .map(|reason| reason.to_string())
            .unwrap_or_default();
        ContextCanceled {
            reason: &reason,
            counter: self.counter,
            observers_notified,
            absorbed,
        }
        .log();

        self.canceled
    }

    /// Hard stop. No observer is notified.
    pub fn terminate(&mut self) {
        self.canceled = true;
        self.cancel_reason = Some(CancelReason::Terminated);
        ContextTerminated {
            counter: self.counter,
            length: self.program.len(),
        }
        .log();
    }

    /// Re-arm the context to run its program from the start.
    ///
    /// The previous cancel reason is left in place but no longer meaningful.
    pub fn reset(&mut self) -> &mut Self {
        self.counter = 0;
        self.canceled = false;
        self
    }

    /// Build the context execution continues in after this one.
    ///
    /// `self_id` is this context's slot in the arena; the child links back to
    /// it. The first manipulator in the remaining program that both wants to
    /// push and proposes a context wins. Otherwise the child is a clone of
    /// this context running the remainder from index zero.
    pub fn make_child(&self, self_id: ContextId) -> ExecutionContext {
        let remainder = self.remainder();
        for (position, instruction) in remainder.iter().enumerate() {
            if let Some(manipulator) = instruction.manipulator() {
                let should_push = manipulator.should_push(self);
                let proposed = manipulator.propose(self);
                if let (Some(child), true) = (proposed, should_push) {
                    ManipulatorSelected {
                        instruction: &instruction.id().to_string(),
                        position,
                    }
                    .log();
                    return child.with_parent(self_id);
                }
            }
        }

        let mut child = self.clone();
        child.parent = Some(self_id);
        child.program = remainder;
        child.counter = 0;
        child
    }

    /// Never fails: falls back to the world's placeholder actor.
    ///
    /// A placeholder standing in for a casting site is moved to the site.
    pub fn resolve_caster(&self, world: &dyn World) -> Arc<dyn LivingEntity> {
        if let Some(caster) = self.caster() {
            return caster;
        }
        let placeholder = world.placeholder_entity();
        if let Some(site) = self.casting_site() {
            placeholder.set_position(site.block_pos().to_position());
        }
        placeholder
    }

    pub fn describe_caster(&self) -> String {
        match &self.caster {
            Some(weak) => match weak.upgrade() {
                Some(caster) => format!("{} ({})", caster.name(), caster.entity_id().0),
                None => "<dropped>".to_string(),
            },
            None => NONE_LABEL.to_string(),
        }
    }

    pub fn describe_casting_site(&self) -> String {
        match &self.casting_site {
            Some(weak) => weak
                .upgrade()
                .map(|site| site.describe())
                .unwrap_or_else(|| "<dropped>".to_string()),
            None => NONE_LABEL.to_string(),
        }
    }
}

impl fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("program", &self.program.display_string())
            .field("counter", &self.counter)
            .field("canceled", &self.canceled)
            .field("cancel_reason", &self.cancel_reason)
            .field("suspension", &self.suspension)
            .field("caster", &self.describe_caster())
            .field("casting_site", &self.describe_casting_site())
            .field("caster_type", &self.caster_type)
            .field("attachments", &self.attachments)
            .field("parent", &self.parent)
            .finish()
    }
}

#[cfg(test)]
mod tests;
