//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! invalid sampler parameters, unsupported or mismatched array shapes, and objects whose
//! eligible coordinate pool is empty.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// An object id in `1..=N` has no eligible coordinate to draw from.
    ///
    /// Samplers without a refill rule report an exhausted pool the same way.
    #[error("object {object_id} has an empty eligible coordinate pool")]
    EmptyObjectPool { object_id: u32 },

    #[error("unsupported array rank {rank}: expected 2 or 3")]
    InvalidShape { rank: usize },

    #[error("shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        found: Vec<usize>,
    },
}

/// Fails with [`Error::ShapeMismatch`] unless both shapes are identical.
pub(crate) fn ensure_same_shape(expected: &[usize], found: &[usize]) -> Result<()> {
    if expected != found {
        return Err(Error::ShapeMismatch {
            expected: expected.to_vec(),
            found: found.to_vec(),
        });
    }
    Ok(())
}

/// Fails with [`Error::InvalidShape`] unless `shape` has rank 2 or 3.
pub(crate) fn ensure_supported_rank(shape: &[usize]) -> Result<()> {
    match shape.len() {
        2 | 3 => Ok(()),
        rank => Err(Error::InvalidShape { rank }),
    }
}
