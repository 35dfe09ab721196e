// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::context::ExecutionContext;
use crate::traits::{Effect, Resolution, World};

/// Delay - suspends the rest of the program for a number of ticks.
///
/// The current context records the suspension and asks for a fork. The child
/// inherits the suspension token, so the remainder resumes in the child once
/// the scheduler has counted the token down.
pub struct Delay {
    ticks: i64,
}

impl Delay {
    pub fn new(ticks: i64) -> Self {
        Self { ticks }
    }

    pub fn ticks(&self) -> i64 {
        self.ticks
    }
}

impl Effect for Delay {
    fn cast(&self, ctx: &mut ExecutionContext, _world: &mut dyn World) -> Resolution {
        if ctx.counter() >= ctx.program().len() {
            // nothing left to delay
            return Resolution::Continue;
        }
        ctx.delay(self.ticks);
        Resolution::Fork
    }

    fn name(&self) -> &'static str {
        "delay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::stub::stub_instruction;
    use crate::program::Program;
    use crate::world::SandboxWorld;

    #[test]
    fn delay_suspends_and_requests_fork() {
        let mut world = SandboxWorld::new();
        let program = Program::from_instructions(vec![
            stub_instruction("glyph_delay").unwrap(),
            stub_instruction("glyph_jump").unwrap(),
        ]);
        let mut ctx = ExecutionContext::dehydrated(program);
        ctx.advance();

        let resolution = Delay::new(3).cast(&mut ctx, &mut world);
        assert_eq!(resolution, Resolution::Fork);
        assert!(ctx.is_suspended());
        assert_eq!(ctx.suspension().unwrap().remaining(), 3);
    }

    #[test]
    fn trailing_delay_is_a_no_op() {
        let mut world = SandboxWorld::new();
        let program = Program::from_instructions(vec![stub_instruction("glyph_delay").unwrap()]);
        let mut ctx = ExecutionContext::dehydrated(program);
        ctx.advance();

        assert_eq!(Delay::new(3).cast(&mut ctx, &mut world), Resolution::Continue);
        assert!(!ctx.is_suspended());
    }
}
