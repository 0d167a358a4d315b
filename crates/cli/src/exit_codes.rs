//! Exit code registry — single source of truth.
//!
//! Scripts key off these values; changing one is a breaking change.

pub const EXIT_SUCCESS: u8 = 0;
/// Generic runtime failure (IO, unexpected response shape).
pub const EXIT_ERROR: u8 = 1;
/// Bad arguments / usage (also what clap emits).
pub const EXIT_USAGE: u8 = 2;
/// Export gate reported blocking issues.
pub const EXIT_NOT_READY: u8 = 10;
/// Invalid preset or configuration input.
pub const EXIT_INVALID_CONFIG: u8 = 12;
/// Could not reach the service.
pub const EXIT_NETWORK: u8 = 20;
/// The service answered non-2xx.
pub const EXIT_SERVER: u8 = 21;
