//! Observability setup for perftest binaries.
//! Libraries only emit `tracing` events; installing a subscriber is left to
//! the binary, so verbosity never lives in library state.

pub mod setup;

pub use setup::{default_directive, init_tracing};
