//! Token
//!
//! The credential value type and its serialized forms.
//!
//! - `credential`: construction, predicates and validation gates
//! - `serialization`: persistable hash round trip and OAuth2 response shape

pub mod credential;
pub mod serialization;

pub use credential::{Token, TokenParams};
