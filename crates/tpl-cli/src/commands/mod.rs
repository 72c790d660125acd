//! Command implementations

mod apply;

pub use apply::{ApplyArgs, run_apply};
