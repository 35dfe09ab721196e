// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A single step of a program.
//!
//! An [`Instruction`] is a small record of capability slots: the mandatory
//! effect plus optional cancel-observer and manipulator behaviour. The engine
//! checks the optional slots with pattern matching:
//!
//! ```ignore
//! if let Some(observer) = instruction.cancel_observer() {
//!     observer.on_canceled(ctx);
//! }
//! ```
//!
//! Cloning an instruction only bumps reference counts.

use crate::identifier::Identifier;
use crate::traits::{CancelObserver, ContextManipulator, Effect};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Instruction {
    id: Identifier,
    effect: Arc<dyn Effect>,
    on_cancel: Option<Arc<dyn CancelObserver>>,
    manipulator: Option<Arc<dyn ContextManipulator>>,
}

impl Instruction {
    pub fn new(id: Identifier, effect: Arc<dyn Effect>) -> Self {
        Self {
            id,
            effect,
            on_cancel: None,
            manipulator: None,
        }
    }

    pub fn with_cancel_observer(mut self, observer: Arc<dyn CancelObserver>) -> Self {
        self.on_cancel = Some(observer);
        self
    }

    pub fn with_manipulator(mut self, manipulator: Arc<dyn ContextManipulator>) -> Self {
        self.manipulator = Some(manipulator);
        self
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    pub fn cancel_observer(&self) -> Option<&dyn CancelObserver> {
        self.on_cancel.as_deref()
    }

    pub fn manipulator(&self) -> Option<&dyn ContextManipulator> {
        self.manipulator.as_deref()
    }
}

impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && Arc::ptr_eq(&self.effect, &other.effect)
    }
}

impl fmt::Debug for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instruction")
            .field("id", &self.id)
            .field("effect", &self.effect.name())
            .field("cancel_observer", &self.on_cancel.is_some())
            .field("manipulator", &self.manipulator.is_some())
            .finish()
    }
}
