// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod codec;      // persistent + network program forms
pub mod config;     // engine config
pub mod context;    // execution context + arena
pub mod engine;     // tick scheduler
pub mod errors;     // error handling
pub mod identifier;
pub mod instruction;
pub mod observability;
pub mod parts;      // standard + stub instructions
pub mod program;
pub mod proto;      // network messages
pub mod traits;     // capability + world abstractions
pub mod world;      // in-memory sandbox world
