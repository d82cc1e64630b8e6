//! Shop admin client — the data-access layer behind the `shopctl` binary.
//!
//! Re-exports the modules exercised by integration tests in `tests/`.

pub mod auth;
pub mod config;
pub mod errors;
pub mod net;
pub mod products;
