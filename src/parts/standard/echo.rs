// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::context::ExecutionContext;
use crate::identifier::Identifier;
use crate::program::Program;
use crate::traits::{ContextManipulator, Effect, Resolution, World};

/// Echo - unrolls the tail of a program when an earlier instruction forks.
///
/// When a fork is requested before the echo runs, the echo proposes a child
/// that replays everything after it `times` times. The echo itself is dropped
/// from the child program. Cast linearly, an echo does nothing.
pub struct Echo {
    id: Identifier,
    times: usize,
}

impl Echo {
    pub fn new(id: Identifier, times: usize) -> Self {
        Self { id, times }
    }

    fn unrolled(&self, remainder: &Program) -> Option<Program> {
        let position = remainder
            .instructions()
            .iter()
            .position(|instruction| instruction.id() == &self.id)?;
        let prefix = &remainder.instructions()[..position];
        let tail = &remainder.instructions()[position + 1..];

        let mut instructions = prefix.to_vec();
        for _ in 0..self.times {
            instructions.extend_from_slice(tail);
        }
        Some(Program::new(instructions, remainder.visual().clone()))
    }
}

impl Effect for Echo {
    fn cast(&self, _ctx: &mut ExecutionContext, _world: &mut dyn World) -> Resolution {
        Resolution::Continue
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

impl ContextManipulator for Echo {
    fn should_push(&self, _ctx: &ExecutionContext) -> bool {
        self.times > 0
    }

    fn propose(&self, ctx: &ExecutionContext) -> Option<ExecutionContext> {
        let program = self.unrolled(&ctx.remainder())?;
        let mut child = ctx.clone().with_program(program);
        child.set_counter(0);
        Some(child)
    }
}
