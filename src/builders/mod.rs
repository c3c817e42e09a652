//! Builders
//!
//! Fluent builders for tokens.

pub mod token;

pub use token::*;
