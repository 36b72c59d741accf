//! Consolidated test utilities for gitflow-bridge
//!
//! Integration tests run the real binary against real git repositories created in
//! temporary directories, with settings and HOME isolated per test.

pub mod assertions;
pub mod fixtures;
pub mod repository;
