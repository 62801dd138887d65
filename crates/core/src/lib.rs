//! Shared domain types for the Moji backend.
//!
//! This crate has zero internal dependencies so every other workspace
//! member can depend on it.

pub mod error;
pub mod types;
