// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod attachment;
mod codec;
mod config;
mod identifier;

pub use attachment::AttachmentError;
pub use codec::CodecError;
pub use config::ConfigError;
pub use identifier::IdentifierError;
