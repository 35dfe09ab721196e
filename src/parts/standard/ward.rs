// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::context::{CancelReason, ExecutionContext};
use crate::traits::{CancelObserver, Effect, Resolution, World};

/// Tag key a ward writes the absorbed cancel reason to.
pub const WARDED_KEY: &str = "warded";

/// Ward - absorbs a cancellation so later instructions are not notified.
///
/// Moving into a forked child is not an abort, so `NewContext` cancellations
/// pass through untouched. Any other reason is recorded in the tag and stops
/// the notification walk. Casting a ward does nothing.
pub struct Ward;

impl Effect for Ward {
    fn cast(&self, _ctx: &mut ExecutionContext, _world: &mut dyn World) -> Resolution {
        Resolution::Continue
    }

    fn name(&self) -> &'static str {
        "ward"
    }
}

impl CancelObserver for Ward {
    fn on_canceled(&self, ctx: &mut ExecutionContext) -> bool {
        let reason = match ctx.cancel_reason() {
            Some(CancelReason::NewContext) | None => return true,
            Some(reason) => reason.to_string(),
        };
        ctx.tag_mut().insert(WARDED_KEY.to_string(), reason.into());
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifier::Identifier;
    use crate::instruction::Instruction;
    use crate::parts::stub::{observer_instruction, Journal};
    use crate::program::Program;
    use std::sync::Arc;

    fn warded_program(journal: &Journal) -> Program {
        let ward = Arc::new(Ward);
        Program::from_instructions(vec![
            Instruction::new(Identifier::from_path("glyph_ward").unwrap(), ward.clone())
                .with_cancel_observer(ward),
            observer_instruction("after_ward", true, journal).unwrap(),
        ])
    }

    #[test]
    fn ward_absorbs_custom_cancellation() {
        let journal = Journal::new();
        let mut ctx = ExecutionContext::dehydrated(warded_program(&journal));
        ctx.cancel(CancelReason::Custom(Identifier::new("ars", "dispel").unwrap()));

        assert_eq!(ctx.tag().get(WARDED_KEY).unwrap(), "ars:dispel");
        assert!(journal.entries().is_empty());
    }

    #[test]
    fn ward_lets_new_context_through() {
        let journal = Journal::new();
        let mut ctx = ExecutionContext::dehydrated(warded_program(&journal));
        ctx.cancel(CancelReason::NewContext);

        assert!(ctx.tag().get(WARDED_KEY).is_none());
        assert_eq!(journal.entries(), vec!["canceled:after_ward".to_string()]);
    }
}
