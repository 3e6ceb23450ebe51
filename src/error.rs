//! Crate error type.
//!
//! Lookups report absence with `Option`, and every mutation is total, so the
//! only failures come from the two external boundaries: structured decoding and
//! the database scan adapter.

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Structured input was not sequence-shaped, or one of its elements failed
    /// to decode.
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("unexpected type {found:?}")]
    UnexpectedType { found: &'static str },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
