// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Encoding programs to, and decoding them from, their two wire forms.
//!
//! * Persistent form: [`ProgramRecord`] through serde, as YAML or JSON.
//! * Network form: [`crate::proto::spell_v1::ProgramFrame`] through prost.
//!
//! Only programs travel. Decoding a context always yields a dehydrated
//! [`ExecutionContext`]: no caster, no parent, counter at zero.
//!
//! ```
//! use the_spellbook::codec::{encode_network, ProgramCodec};
//! use the_spellbook::parts::StandardParts;
//!
//! let codec = ProgramCodec::new(StandardParts::registry(), 16);
//! let program = codec.decode_yaml("instructions: [glyph_jump, glyph_jump]").unwrap();
//!
//! let bytes = encode_network(&program).unwrap();
//! let ctx = codec.decode_context_network(&bytes).unwrap();
//! assert_eq!(ctx.program(), &program);
//! assert_eq!(ctx.counter(), 0);
//! assert!(ctx.caster().is_none());
//! ```

mod network;
mod persistent;
mod registry;

pub use network::encode_network;
pub use persistent::ProgramRecord;
pub use registry::InstructionRegistry;

use crate::config::consts::DEFAULT_MAX_PROGRAM_LENGTH;
use crate::context::ExecutionContext;
use crate::errors::CodecError;
use crate::identifier::Identifier;
use crate::observability::messages::codec::{ProgramDecodeFailed, ProgramDecoded};
use crate::observability::messages::StructuredLog;
use crate::program::{Program, VisualParams};
use std::fs;
use std::path::Path;

const PERSISTENT_FORM: &str = "persistent";
const NETWORK_FORM: &str = "network";

/// Encode a program into its persistent record.
pub fn encode_persistent(program: &Program) -> ProgramRecord {
    ProgramRecord::from_program(program)
}

pub fn encode_yaml(program: &Program) -> Result<String, CodecError> {
    Ok(serde_yaml::to_string(&encode_persistent(program))?)
}

pub fn encode_json(program: &Program) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(&encode_persistent(program))?)
}

/// Decodes programs against an instruction registry and a length limit.
#[derive(Debug, Clone)]
pub struct ProgramCodec {
    registry: InstructionRegistry,
    max_program_length: usize,
}

impl ProgramCodec {
    pub fn new(registry: InstructionRegistry, max_program_length: usize) -> Self {
        Self {
            registry,
            max_program_length,
        }
    }

    pub fn with_registry(registry: InstructionRegistry) -> Self {
        Self::new(registry, DEFAULT_MAX_PROGRAM_LENGTH)
    }

    pub fn registry(&self) -> &InstructionRegistry {
        &self.registry
    }

    pub fn max_program_length(&self) -> usize {
        self.max_program_length
    }

    pub fn decode_persistent(&self, record: ProgramRecord) -> Result<Program, CodecError> {
        logged(PERSISTENT_FORM, self.assemble(&record.instructions, record.visual))
    }

    pub fn decode_yaml(&self, document: &str) -> Result<Program, CodecError> {
        let record = serde_yaml::from_str::<ProgramRecord>(document).map_err(CodecError::from);
        logged(
            PERSISTENT_FORM,
            record.and_then(|record| self.assemble(&record.instructions, record.visual)),
        )
    }

    pub fn decode_json(&self, document: &str) -> Result<Program, CodecError> {
        let record = serde_json::from_str::<ProgramRecord>(document).map_err(CodecError::from);
        logged(
            PERSISTENT_FORM,
            record.and_then(|record| self.assemble(&record.instructions, record.visual)),
        )
    }

    /// Load a spell file. `.json` files are read as JSON, anything else as YAML.
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Program, CodecError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            self.decode_json(&document)
        } else {
            self.decode_yaml(&document)
        }
    }

    pub fn decode_network(&self, bytes: &[u8]) -> Result<Program, CodecError> {
        let decoded = network::decode_frame(bytes)
            .and_then(network::from_frame)
            .and_then(|(ids, visual)| self.assemble(&ids, visual));
        logged(NETWORK_FORM, decoded)
    }

    pub fn decode_context_persistent(&self, record: ProgramRecord) -> Result<ExecutionContext, CodecError> {
        self.decode_persistent(record).map(ExecutionContext::dehydrated)
    }

    pub fn decode_context_network(&self, bytes: &[u8]) -> Result<ExecutionContext, CodecError> {
        self.decode_network(bytes).map(ExecutionContext::dehydrated)
    }

    fn assemble(&self, ids: &[Identifier], visual: VisualParams) -> Result<Program, CodecError> {
        if ids.len() > self.max_program_length {
            return Err(CodecError::ProgramTooLong {
                length: ids.len(),
                limit: self.max_program_length,
            });
        }
        let instructions = ids
            .iter()
            .map(|id| self.registry.resolve(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Program::new(instructions, visual))
    }
}

fn logged(form: &str, result: Result<Program, CodecError>) -> Result<Program, CodecError> {
    match &result {
        Ok(program) => ProgramDecoded {
            form,
            instruction_count: program.len(),
        }
        .log(),
        Err(error) => ProgramDecodeFailed { form, error }.log(),
    }
    result
}

#[cfg(test)]
mod tests;
