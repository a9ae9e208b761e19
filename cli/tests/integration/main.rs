//! Integration tests for dlab CLI
//!
//! These tests run the real binary. Terraform itself is replaced by a
//! scripted stand-in placed first on `PATH`.

mod config_command;
