//! Integration test harness for gui-release
//!
//! Tests drive the real binary against local bare "origin" repositories via
//! the `--remote file://...` template, with the registry command stubbed
//! through configuration.

mod test_cli;
mod test_workflow;
