//! Capability traits an instruction can provide.
//!
//! Every instruction has an [`Effect`]. Observing cancellation and manipulating
//! the fork path are opt-in slots on [`crate::instruction::Instruction`].

use crate::context::ExecutionContext;
use crate::traits::world::World;

/// What the driving loop should do after an instruction has been cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// Keep advancing the current context.
    #[default]
    Continue,
    /// Cancel the current context and continue in a forked child.
    Fork,
}

pub trait Effect: Send + Sync {
    fn cast(&self, ctx: &mut ExecutionContext, world: &mut dyn World) -> Resolution;

    fn name(&self) -> &'static str;
}

pub trait CancelObserver: Send + Sync {
    /// Called while a context is being canceled, in remaining-program order.
    ///
    /// Returning `false` stops the notification walk.
    fn on_canceled(&self, ctx: &mut ExecutionContext) -> bool;
}

pub trait ContextManipulator: Send + Sync {
    fn should_push(&self, ctx: &ExecutionContext) -> bool;

    /// Propose the context execution should continue in when forking.
    fn propose(&self, ctx: &ExecutionContext) -> Option<ExecutionContext>;
}
