//! Shared test utilities for the surface-layers workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic vector features and thermal sample generators
//! - Common fixtures (reference locations, tag sets, dates, digital numbers)
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { workspace = true }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{square_way, tags, uniform_samples};
//!
//! let feature = square_way(1, tags::BUILDING);
//! ```
//!
//! `tags` names both the tag-set fixtures module and the helper that turns
//! a `(key, value)` slice into a tag map, so one import brings in both.

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
