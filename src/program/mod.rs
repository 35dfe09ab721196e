// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Immutable programs and remainder slicing.
//!
//! A [`Program`] is shared by every context that runs it, so cloning one is an
//! `Arc` bump. Slicing with [`Program::remainder_from`] produces a new value
//! that owns its own instruction list; the source program is never touched.

use crate::instruction::Instruction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// RGB particle colour carried by programs and contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticleColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl ParticleColor {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Default for ParticleColor {
    fn default() -> Self {
        Self::new(255, 25, 180)
    }
}

/// Static visual metadata of a program.
///
/// The engine treats `style` as an opaque blob; renderers own its meaning.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VisualParams {
    #[serde(default)]
    pub color: ParticleColor,
    #[serde(default)]
    pub style: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct Program {
    instructions: Arc<[Instruction]>,
    visual: Arc<VisualParams>,
}

impl Program {
    pub fn new(instructions: Vec<Instruction>, visual: VisualParams) -> Self {
        Self {
            instructions: instructions.into(),
            visual: Arc::new(visual),
        }
    }

    pub fn from_instructions(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions, VisualParams::default())
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn get(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// A program with no instructions can never be scheduled.
    pub fn is_valid(&self) -> bool {
        !self.is_empty()
    }

    pub fn visual(&self) -> &VisualParams {
        &self.visual
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.instructions.iter()
    }

    /// Copy of `instructions[index..]`, or an empty program past the end.
    ///
    /// Visual parameters are shared with the source.
    pub fn remainder_from(&self, index: usize) -> Program {
        let tail = self.instructions.get(index..).unwrap_or(&[]);
        Program {
            instructions: tail.to_vec().into(),
            visual: Arc::clone(&self.visual),
        }
    }

    /// Human-readable `a -> b -> c` rendering for diagnostics.
    pub fn display_string(&self) -> String {
        if self.is_empty() {
            return "<empty>".to_string();
        }
        self.instructions
            .iter()
            .map(|instruction| instruction.id().to_string())
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// True when both values point at the same instruction allocation.
    pub fn shares_instructions_with(&self, other: &Program) -> bool {
        Arc::ptr_eq(&self.instructions, &other.instructions)
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new(Vec::new(), VisualParams::default())
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.instructions == other.instructions && self.visual == other.visual
    }
}

#[cfg(test)]
mod tests;
