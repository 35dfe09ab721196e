// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::context::ExecutionContext;
use crate::traits::{Effect, Position, Resolution, World};

/// Default upward velocity applied by a jump.
pub const DEFAULT_JUMP_STRENGTH: f64 = 0.75;

/// Jump - launches the resolved caster upwards, keeping horizontal motion.
pub struct Jump {
    strength: f64,
}

impl Jump {
    pub fn new() -> Self {
        Self::with_strength(DEFAULT_JUMP_STRENGTH)
    }

    pub fn with_strength(strength: f64) -> Self {
        Self { strength }
    }
}

impl Default for Jump {
    fn default() -> Self {
        Self::new()
    }
}

impl Effect for Jump {
    fn cast(&self, ctx: &mut ExecutionContext, world: &mut dyn World) -> Resolution {
        let target = ctx.resolve_caster(world);
        let motion = target.velocity();
        target.set_velocity(Position::new(motion.x, self.strength, motion.z));
        Resolution::Continue
    }

    fn name(&self) -> &'static str {
        "jump"
    }
}
