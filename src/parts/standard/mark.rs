// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::context::ExecutionContext;
use crate::identifier::Identifier;
use crate::traits::{Effect, Resolution, World};
use std::sync::atomic::{AtomicU64, Ordering};

/// Tag key holding the index of the most recent mark.
pub const LAST_MARK_KEY: &str = "last_mark";

/// Mark - counts how often it ran in a shared attachment.
///
/// The counter lives in the attachment store, so clones and forks of a context
/// keep counting into the same value.
pub struct Mark {
    counter_id: Identifier,
}

impl Mark {
    pub fn new(counter_id: Identifier) -> Self {
        Self { counter_id }
    }

    pub fn counter_id(&self) -> &Identifier {
        &self.counter_id
    }

    /// Read the mark count recorded on a context.
    pub fn count(ctx: &ExecutionContext, counter_id: &Identifier) -> u64 {
        ctx.attachments()
            .get::<AtomicU64>(counter_id)
            .map_or(0, |counter| counter.load(Ordering::Relaxed))
    }
}

impl Effect for Mark {
    fn cast(&self, ctx: &mut ExecutionContext, _world: &mut dyn World) -> Resolution {
        let index = ctx.counter().saturating_sub(1);
        match ctx
            .attachments_mut()
            .get_or_insert_with(self.counter_id.clone(), || AtomicU64::new(0))
        {
            Ok(counter) => {
                counter.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => tracing::warn!(error = %e, "Mark counter attachment unavailable"),
        }
        ctx.tag_mut().insert(LAST_MARK_KEY.to_string(), (index as u64).into());
        Resolution::Continue
    }

    fn name(&self) -> &'static str {
        "mark"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::Program;
    use crate::world::SandboxWorld;

    #[test]
    fn mark_counts_into_shared_attachment() {
        let mut world = SandboxWorld::new();
        let id = Identifier::from_path("marks").unwrap();
        let mark = Mark::new(id.clone());
        let mut ctx = ExecutionContext::dehydrated(Program::default());

        mark.cast(&mut ctx, &mut world);
        let mut clone = ctx.clone();
        mark.cast(&mut clone, &mut world);

        assert_eq!(Mark::count(&ctx, &id), 2);
        assert_eq!(Mark::count(&clone, &id), 2);
        assert_eq!(ctx.tag().get(LAST_MARK_KEY), Some(&serde_json::Value::from(0u64)));
    }

    #[test]
    fn mark_with_conflicting_attachment_still_continues() {
        let mut world = SandboxWorld::new();
        let id = Identifier::from_path("marks").unwrap();
        let mut ctx = ExecutionContext::dehydrated(Program::default());
        ctx.attachments_mut().insert(id.clone(), "not a counter".to_string());

        assert_eq!(Mark::new(id.clone()).cast(&mut ctx, &mut world), Resolution::Continue);
        assert_eq!(Mark::count(&ctx, &id), 0);
    }
}
