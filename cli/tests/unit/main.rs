//! Unit tests for dlab CLI
//!
//! These tests use mocked executors and run fast without spawning terraform.

mod mocks;
mod terraform_builder;
