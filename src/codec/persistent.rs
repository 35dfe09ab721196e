// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::identifier::Identifier;
use crate::program::{Program, VisualParams};
use serde::{Deserialize, Serialize};

/// Persistent form of a program: instruction ids plus visual parameters.
///
/// # Example
/// ```yaml
/// instructions:
///   - glyph_mark
///   - spellbook:glyph_delay
///   - glyph_jump
/// visual:
///   color: { red: 40, green: 120, blue: 255 }
///   style:
///     trail: sparkle
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub instructions: Vec<Identifier>,
    #[serde(default)]
    pub visual: VisualParams,
}

impl ProgramRecord {
    pub fn from_program(program: &Program) -> Self {
        Self {
            instructions: program.iter().map(|instruction| instruction.id().clone()).collect(),
            visual: program.visual().clone(),
        }
    }
}
