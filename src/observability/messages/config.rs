// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Engine configuration was loaded and validated.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub format: &'a str,
    pub max_steps_per_tick: usize,
    pub tick_interval_ms: u64,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded {} config '{}': max_steps_per_tick={}, tick_interval={}ms",
            self.format, self.path, self.max_steps_per_tick, self.tick_interval_ms
        )
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            format = self.format,
            max_steps_per_tick = self.max_steps_per_tick,
            tick_interval_ms = self.tick_interval_ms,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("config_loaded", span_name = name, path = self.path)
    }
}
