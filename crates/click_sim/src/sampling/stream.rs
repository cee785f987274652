//! Pull-based iteration over a sampler.
use rand::RngCore;

use crate::error::Result;
use crate::sampling::{ClickSampling, ClickSet};

/// An endless iterator of click sets drawn from `sampler` with `rng`.
///
/// `next` never returns `None`; a sampler that cannot produce yields `Some(Err(_))`
/// on every call.
#[derive(Debug, Clone)]
pub struct ClickStream<S, R> {
    sampler: S,
    rng: R,
}

impl<S: ClickSampling, R: RngCore> ClickStream<S, R> {
    pub fn new(sampler: S, rng: R) -> Self {
        Self { sampler, rng }
    }

    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    pub fn into_inner(self) -> (S, R) {
        (self.sampler, self.rng)
    }
}

impl<S: ClickSampling, R: RngCore> Iterator for ClickStream<S, R> {
    type Item = Result<ClickSet>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.sampler.produce(&mut self.rng))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
