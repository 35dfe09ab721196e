// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Small value types carried by an execution context.

use crate::identifier::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a context stopped running.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CancelReason {
    /// Execution moved on into a forked child context.
    NewContext,
    /// Hard stop without notifying remaining instructions.
    Terminated,
    /// Reason defined by an instruction or the embedding.
    Custom(Identifier),
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::NewContext => write!(f, "new_context"),
            CancelReason::Terminated => write!(f, "terminated"),
            CancelReason::Custom(id) => write!(f, "{}", id),
        }
    }
}

/// Pending resume handle recorded by a delaying instruction.
///
/// A token only blocks while `remaining` is strictly positive. Zero or negative
/// means the context is eligible to run again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuspendToken {
    remaining: i64,
}

impl SuspendToken {
    pub fn new(ticks: i64) -> Self {
        Self { remaining: ticks }
    }

    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    pub fn is_pending(&self) -> bool {
        self.remaining > 0
    }

    /// Count down one scheduler tick. Returns the new remaining duration.
    pub fn tick(&mut self) -> i64 {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining
    }
}

/// What kind of source cast the program.
///
/// Instructions use this to opt out of behaviour that makes no sense for a
/// given source, e.g. opening a screen from a turret.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasterType {
    Rune,
    Turret,
    Entity,
    LivingEntity,
    Player,
    Other,
    Custom(String),
}

/// Owned snapshot of the item used to cast.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: Option<Identifier>,
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub tag: serde_json::Map<String, serde_json::Value>,
}

impl ItemStack {
    pub fn new(item: Identifier, count: u32) -> Self {
        Self {
            item: Some(item),
            count,
            tag: serde_json::Map::new(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none() || self.count == 0
    }
}
