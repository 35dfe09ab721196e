// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed side storage scoped to one execution context.
//!
//! Instructions stash cross-step state here without widening the context
//! itself. Values are stored behind `Arc`, so cloning a store copies the
//! mapping while the values stay shared. Mutable attachment state therefore
//! needs interior mutability.
//!
//! ```
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use the_spellbook::context::AttachmentStore;
//! use the_spellbook::identifier::Identifier;
//!
//! let id = Identifier::from_path("bounce_count").unwrap();
//! let mut store = AttachmentStore::new();
//! let counter = store.get_or_insert_with(id.clone(), || AtomicU32::new(0)).unwrap();
//! counter.fetch_add(1, Ordering::Relaxed);
//!
//! let again = store.get::<AtomicU32>(&id).unwrap();
//! assert_eq!(again.load(Ordering::Relaxed), 1);
//! ```

use crate::errors::AttachmentError;
use crate::identifier::Identifier;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type AttachmentValue = Arc<dyn Any + Send + Sync>;

#[derive(Clone, Default)]
pub struct AttachmentStore {
    entries: HashMap<Identifier, AttachmentValue>,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed lookup. `None` if absent or stored under a different type.
    pub fn get<T: Any + Send + Sync>(&self, id: &Identifier) -> Option<Arc<T>> {
        self.entries
            .get(id)
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }

    pub fn get_or_insert_with<T, F>(&mut self, id: Identifier, make: F) -> Result<Arc<T>, AttachmentError>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        let value = self
            .entries
            .entry(id.clone())
            .or_insert_with(|| Arc::new(make()) as AttachmentValue);
        Arc::clone(value)
            .downcast::<T>()
            .map_err(|_| AttachmentError::TypeMismatch {
                id,
                expected: std::any::type_name::<T>(),
            })
    }

    /// Store a value, replacing any previous entry under `id`.
    pub fn insert<T: Any + Send + Sync>(&mut self, id: Identifier, value: T) -> Option<AttachmentValue> {
        self.entries.insert(id, Arc::new(value))
    }

    pub fn insert_shared(&mut self, id: Identifier, value: AttachmentValue) -> Option<AttachmentValue> {
        self.entries.insert(id, value)
    }

    pub fn remove(&mut self, id: &Identifier) -> Option<AttachmentValue> {
        self.entries.remove(id)
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.entries.keys()
    }

    /// True when both stores hold the very same value under `id`.
    pub fn shares_value_with(&self, other: &AttachmentStore, id: &Identifier) -> bool {
        match (self.entries.get(id), other.entries.get(id)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for AttachmentStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentStore")
            .field("attachment_count", &self.entries.len())
            .field("attachment_ids", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}
