// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::CodecError;
use crate::identifier::Identifier;
use crate::instruction::Instruction;
use std::collections::HashMap;
use std::fmt;

/// Lookup table from instruction id to the instruction decoding resolves it to.
///
/// Both wire forms only carry ids, so every decode goes through a registry.
/// Instructions are cheap to clone; a decoded program shares the effect
/// allocations held here.
#[derive(Clone, Default)]
pub struct InstructionRegistry(HashMap<Identifier, Instruction>);

impl InstructionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instruction under its own id, returning any instruction it
    /// replaced.
    pub fn register(&mut self, instruction: Instruction) -> Option<Instruction> {
        self.0.insert(instruction.id().clone(), instruction)
    }

    pub fn get(&self, id: &Identifier) -> Option<&Instruction> {
        self.0.get(id)
    }

    pub fn resolve(&self, id: &Identifier) -> Result<Instruction, CodecError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CodecError::UnknownInstruction(id.to_string()))
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.0.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<&Identifier> {
        let mut ids: Vec<&Identifier> = self.0.keys().collect();
        ids.sort();
        ids
    }
}

impl From<Vec<Instruction>> for InstructionRegistry {
    fn from(instructions: Vec<Instruction>) -> Self {
        let mut registry = Self::new();
        for instruction in instructions {
            registry.register(instruction);
        }
        registry
    }
}

impl fmt::Debug for InstructionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstructionRegistry")
            .field("instruction_count", &self.0.len())
            .field(
                "instruction_ids",
                &self.ids().iter().map(|id| id.to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
