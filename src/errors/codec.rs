// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Error types for encoding and decoding programs.
//!
//! Both the persistent form (serde) and the network form (prost) funnel their
//! failures into [`CodecError`], so callers of the codec only ever see one
//! error type regardless of which wire form they used.

use crate::errors::IdentifierError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// An instruction id is not present in the registry used for decoding.
    #[error("Unknown instruction '{0}'")]
    UnknownInstruction(String),

    /// An instruction id string could not be parsed.
    #[error("Invalid instruction id: {0}")]
    InvalidIdentifier(#[from] IdentifierError),

    /// The decoded program exceeds the configured length limit.
    #[error("Program has {length} instructions, limit is {limit}")]
    ProgramTooLong { length: usize, limit: usize },

    /// The visual style blob of a network frame was not valid JSON.
    #[error("Invalid visual style: {0}")]
    InvalidStyle(#[source] serde_json::Error),

    /// The JSON persistent form could not be parsed or written.
    #[error("Invalid spell JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The YAML persistent form could not be parsed.
    #[error("Invalid spell document: {0}")]
    InvalidDocument(#[from] serde_yaml::Error),

    /// The network frame could not be decoded.
    #[error("Malformed network frame: {0}")]
    MalformedFrame(#[from] prost::DecodeError),

    /// Reading a spell file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
