//! Dog rescue puzzle (workspace facade crate).
//!
//! Re-exports the `dog_rescue::{core, engine, types}` public API from the
//! crates under `crates/`, plus the scripted [`replay`] used by the CLI.

pub use dog_rescue_core as core;
pub use dog_rescue_engine as engine;
pub use dog_rescue_types as types;

pub mod replay;
