//! Unit tests for the Vault SDK
//!
//! This module contains tests for various components of the SDK.

pub mod config_tests;
pub mod error_tests;
