// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Instruction implementations shipped with the engine.
//!
//! `standard` holds the stand-in glyphs the binary casts; `stub` holds
//! do-nothing and recording instructions for exercising the engine itself.

pub mod standard;
pub mod stub;

use crate::codec::InstructionRegistry;
use crate::errors::IdentifierError;
use crate::identifier::Identifier;
use crate::instruction::Instruction;
use standard::{Delay, Echo, Jump, Mark, Ward};
use std::sync::Arc;

/// Ticks a `glyph_delay` suspends for.
pub const DEFAULT_DELAY_TICKS: i64 = 20;

/// How often `glyph_echo` replays the tail of a program.
pub const DEFAULT_ECHO_TIMES: usize = 2;

/// Attachment id `glyph_mark` counts into.
pub const MARK_COUNTER_PATH: &str = "marks";

/// Factory for the standard instruction set.
pub struct StandardParts;

impl StandardParts {
    /// Build a single standard instruction by path, e.g. `glyph_jump`.
    pub fn create_instruction(path: &str) -> Result<Option<Instruction>, IdentifierError> {
        let id = Identifier::from_path(path)?;
        let instruction = match path {
            "glyph_jump" => Instruction::new(id, Arc::new(Jump::new())),
            "glyph_delay" => Instruction::new(id, Arc::new(Delay::new(DEFAULT_DELAY_TICKS))),
            "glyph_mark" => Instruction::new(
                id,
                Arc::new(Mark::new(Identifier::from_path(MARK_COUNTER_PATH)?)),
            ),
            "glyph_ward" => {
                let ward = Arc::new(Ward);
                Instruction::new(id, ward.clone()).with_cancel_observer(ward)
            }
            "glyph_echo" => {
                let echo = Arc::new(Echo::new(id.clone(), DEFAULT_ECHO_TIMES));
                Instruction::new(id, echo.clone()).with_manipulator(echo)
            }
            _ => return Ok(None),
        };
        Ok(Some(instruction))
    }

    /// Registry holding every standard instruction.
    pub fn registry() -> InstructionRegistry {
        let mut registry = InstructionRegistry::new();
        for path in Self::list_available_implementations() {
            match Self::create_instruction(path) {
                Ok(Some(instruction)) => {
                    registry.register(instruction);
                }
                Ok(None) => {}
                Err(e) => tracing::error!(path, error = %e, "Invalid standard instruction path"),
            }
        }
        registry
    }

    /// List all standard instruction paths.
    pub fn list_available_implementations() -> Vec<&'static str> {
        vec![
            "glyph_jump",
            "glyph_delay",
            "glyph_mark",
            "glyph_ward",
            "glyph_echo",
        ]
    }

    pub fn is_implementation_available(path: &str) -> bool {
        Self::list_available_implementations().contains(&path)
    }
}
