//! CLI command implementations
//!
//! - **release**: the GUI release flow (the only user-facing command)

pub mod release;

pub use release::run_release;
