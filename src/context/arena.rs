// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Index-addressed storage for execution contexts.
//!
//! Contexts refer to the context they were forked from by [`ContextId`]
//! instead of owning a copy of it. Cloning a context is therefore O(1) and all
//! clones share the same, immutable-after-fork ancestors. When a caller really
//! needs an independent ancestor chain it asks for one explicitly with
//! [`ContextArena::duplicate_lineage`], which is bounded by the configured
//! lineage depth.

use crate::config::consts::DEFAULT_MAX_LINEAGE_DEPTH;
use crate::context::ExecutionContext;
use crate::observability::messages::context::{ContextForked, LineageDuplicated};
use crate::observability::messages::StructuredLog;
use std::collections::HashMap;
use std::fmt;

/// Slot of a context inside a [`ContextArena`]. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    /// Rebuild an id from its raw value, e.g. for diagnostics or tests.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct ContextArena {
    contexts: HashMap<ContextId, ExecutionContext>,
    next_id: u64,
    max_lineage_depth: usize,
}

impl ContextArena {
    pub fn new() -> Self {
        Self::with_max_lineage_depth(DEFAULT_MAX_LINEAGE_DEPTH)
    }

    pub fn with_max_lineage_depth(max_lineage_depth: usize) -> Self {
        Self {
            contexts: HashMap::new(),
            next_id: 0,
            max_lineage_depth,
        }
    }

    pub fn insert(&mut self, ctx: ExecutionContext) -> ContextId {
        let id = ContextId(self.next_id);
        self.next_id += 1;
        self.contexts.insert(id, ctx);
        id
    }

    pub fn get(&self, id: ContextId) -> Option<&ExecutionContext> {
        self.contexts.get(&id)
    }

    pub fn get_mut(&mut self, id: ContextId) -> Option<&mut ExecutionContext> {
        self.contexts.get_mut(&id)
    }

    pub fn remove(&mut self, id: ContextId) -> Option<ExecutionContext> {
        self.contexts.remove(&id)
    }

    pub fn release(&mut self, ids: &[ContextId]) {
        for id in ids {
            self.contexts.remove(id);
        }
    }

    pub fn contains(&self, id: ContextId) -> bool {
        self.contexts.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn parent_of(&self, id: ContextId) -> Option<ContextId> {
        self.get(id).and_then(ExecutionContext::previous_context)
    }

    /// Ancestor ids, nearest first. Stops at the first ancestor no longer in
    /// the arena.
    pub fn ancestors(&self, id: ContextId) -> Vec<ContextId> {
        let mut chain = Vec::new();
        let mut current = self.parent_of(id);
        while let Some(ancestor) = current {
            if !self.contains(ancestor) {
                break;
            }
            chain.push(ancestor);
            current = self.parent_of(ancestor);
        }
        chain
    }

    pub fn depth(&self, id: ContextId) -> usize {
        self.ancestors(id).len()
    }

    /// Fork the context at `id` and store the child.
    ///
    /// Returns `None` only when `id` is not in the arena.
    pub fn fork(&mut self, id: ContextId) -> Option<ContextId> {
        let child = self.get(id)?.make_child(id);
        let remaining = child.program().len();
        let child_id = self.insert(child);
        ContextForked {
            parent: id.as_u64(),
            child: child_id.as_u64(),
            depth: self.depth(child_id),
            remaining,
        }
        .log();
        Some(child_id)
    }

    /// Copy the context at `id` together with up to `max_lineage_depth`
    /// ancestors into fresh slots and return the id of the copy.
    ///
    /// The oldest copied context keeps the original's parent link, so a
    /// truncated chain still resolves to the shared ancestors beyond the limit.
    pub fn duplicate_lineage(&mut self, id: ContextId) -> Option<ContextId> {
        self.get(id)?;
        let mut chain = vec![id];
        chain.extend(self.ancestors(id));
        let limit = self.max_lineage_depth.saturating_add(1);
        let truncated = chain.len() > limit;
        chain.truncate(limit);

        let oldest = *chain.last()?;
        let mut linked_parent = self.parent_of(oldest);
        for original in chain.iter().rev() {
            let mut copy = self.get(*original)?.clone();
            copy.set_parent(linked_parent);
            linked_parent = Some(self.insert(copy));
        }

        let copy = linked_parent?;
        LineageDuplicated {
            source: id.as_u64(),
            copy: copy.as_u64(),
            copied: chain.len(),
            truncated,
        }
        .log();
        Some(copy)
    }
}

impl Default for ContextArena {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContextArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextArena")
            .field("context_count", &self.contexts.len())
            .field("next_id", &self.next_id)
            .field("max_lineage_depth", &self.max_lineage_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::stub::stub_instruction;
    use crate::program::Program;

    fn program(len: usize) -> Program {
        Program::from_instructions(
            (0..len)
                .map(|i| stub_instruction(&format!("step_{}", i)).unwrap())
                .collect(),
        )
    }

    #[test]
    fn ids_are_not_reused() {
        let mut arena = ContextArena::new();
        let a = arena.insert(ExecutionContext::dehydrated(program(1)));
        arena.remove(a);
        let b = arena.insert(ExecutionContext::dehydrated(program(1)));
        assert_ne!(a, b);
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn fork_links_child_to_parent() {
        let mut arena = ContextArena::new();
        let root = arena.insert(ExecutionContext::dehydrated(program(3)));
        arena.get_mut(root).unwrap().advance();

        let child = arena.fork(root).unwrap();
        assert_eq!(arena.parent_of(child), Some(root));
        assert_eq!(arena.depth(child), 1);
        let child_ctx = arena.get(child).unwrap();
        assert_eq!(child_ctx.counter(), 0);
        assert_eq!(child_ctx.program().len(), 2);
    }

    #[test]
    fn fork_of_unknown_id_is_none() {
        let mut arena = ContextArena::new();
        let root = arena.insert(ExecutionContext::dehydrated(program(1)));
        arena.remove(root);
        assert!(arena.fork(root).is_none());
    }

    #[test]
    fn ancestors_are_nearest_first_and_stop_at_released() {
        let mut arena = ContextArena::new();
        let a = arena.insert(ExecutionContext::dehydrated(program(4)));
        let b = arena.fork(a).unwrap();
        let c = arena.fork(b).unwrap();
        assert_eq!(arena.ancestors(c), vec![b, a]);

        arena.release(&[b]);
        assert!(arena.ancestors(c).is_empty());
        assert_eq!(arena.parent_of(c), Some(b));
    }

    #[test]
    fn cloned_contexts_share_ancestors() {
        let mut arena = ContextArena::new();
        let a = arena.insert(ExecutionContext::dehydrated(program(2)));
        let b = arena.fork(a).unwrap();
        let clone = arena.get(b).unwrap().clone();
        let clone_id = arena.insert(clone);
        assert_eq!(arena.parent_of(clone_id), Some(a));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn duplicate_lineage_copies_every_ancestor() {
        let mut arena = ContextArena::new();
        let a = arena.insert(ExecutionContext::dehydrated(program(4)));
        let b = arena.fork(a).unwrap();
        let c = arena.fork(b).unwrap();

        let copy = arena.duplicate_lineage(c).unwrap();
        let copied_chain = arena.ancestors(copy);
        assert_eq!(copied_chain.len(), 2);
        assert!(!copied_chain.contains(&a));
        assert!(!copied_chain.contains(&b));
        assert_eq!(arena.len(), 6);

        arena
            .get_mut(copied_chain[1])
            .unwrap()
            .tag_mut()
            .insert("touched".to_string(), serde_json::Value::Bool(true));
        assert!(arena.get(a).unwrap().tag().is_empty());
    }

    #[test]
    fn duplicate_lineage_is_bounded() {
        let mut arena = ContextArena::with_max_lineage_depth(1);
        let a = arena.insert(ExecutionContext::dehydrated(program(4)));
        let b = arena.fork(a).unwrap();
        let c = arena.fork(b).unwrap();

        let copy = arena.duplicate_lineage(c).unwrap();
        let chain = arena.ancestors(copy);
        // copy -> copy-of-b -> original a
        assert_eq!(chain.len(), 2);
        assert_ne!(chain[0], b);
        assert_eq!(chain[1], a);
    }

    #[test]
    fn duplicate_lineage_with_unbounded_depth_copies_whole_chain() {
        let mut arena = ContextArena::with_max_lineage_depth(usize::MAX);
        let a = arena.insert(ExecutionContext::dehydrated(program(3)));
        let b = arena.fork(a).unwrap();

        let copy = arena.duplicate_lineage(b).unwrap();
        let chain = arena.ancestors(copy);
        assert_eq!(chain.len(), 1);
        assert_ne!(chain[0], a);
        assert_eq!(arena.parent_of(chain[0]), None);
    }

    #[test]
    fn duplicate_lineage_accepts_configured_maximum_depth() {
        let yaml = format!("limits:\n  max_lineage_depth: {}\n", usize::MAX);
        let config = crate::config::EngineConfig::from_yaml_str(&yaml).unwrap();
        let mut arena =
            ContextArena::with_max_lineage_depth(config.limits.get_max_lineage_depth());
        let root = arena.insert(ExecutionContext::dehydrated(program(2)));
        let child = arena.fork(root).unwrap();

        assert!(arena.duplicate_lineage(child).is_some());
        assert_eq!(arena.len(), 4);
    }
}
