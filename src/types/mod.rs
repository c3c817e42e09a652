//! Token Types
//!
//! Construction inputs and serialized shapes of a token.

pub mod expiration;
pub mod hash;
pub mod refresh;

pub use expiration::*;
pub use hash::*;
pub use refresh::*;
