/// Default number of instructions a single cast may run per scheduler tick
pub const DEFAULT_MAX_STEPS_PER_TICK: usize = 64;
/// Default delay between scheduler ticks when driven on an interval (milliseconds)
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
/// Default number of forks a single cast may perform before it is terminated
pub const DEFAULT_MAX_FORKS_PER_CAST: usize = 256;
/// Default maximum number of instructions a decoded program may hold
pub const DEFAULT_MAX_PROGRAM_LENGTH: usize = 128;
/// Default bound on ancestors copied by an explicit lineage duplication
pub const DEFAULT_MAX_LINEAGE_DEPTH: usize = 64;
/// Default tracing filter directive for the binary
pub const DEFAULT_LOG_FILTER: &str = "info";
