//! Integration-level test scenarios, living alongside the per-module
//! `#[cfg(test)]` unit tests the way the teacher's `src/tests/*.rs` files
//! sit alongside its per-module tests.

mod invariants;
mod scenarios;
