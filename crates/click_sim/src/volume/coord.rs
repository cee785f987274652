//! Integer voxel coordinates for rank-2 and rank-3 volumes.
use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A voxel index tuple of rank 2 or 3.
///
/// Axes follow array order, so a 2D coordinate is `(row, column)` and a 3D
/// coordinate is `(plane, row, column)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    rank: u8,
    axes: [usize; 3],
}

impl Coord {
    /// Create a 2D coordinate.
    pub fn new2(a: usize, b: usize) -> Self {
        Self {
            rank: 2,
            axes: [a, b, 0],
        }
    }

    /// Create a 3D coordinate.
    pub fn new3(a: usize, b: usize, c: usize) -> Self {
        Self {
            rank: 3,
            axes: [a, b, c],
        }
    }

    /// Build a coordinate from an index slice, returning `None` unless it has 2 or 3 entries.
    pub fn from_slice(index: &[usize]) -> Option<Self> {
        match *index {
            [a, b] => Some(Self::new2(a, b)),
            [a, b, c] => Some(Self::new3(a, b, c)),
            _ => None,
        }
    }

    pub fn rank(&self) -> usize {
        self.rank as usize
    }

    /// The index tuple, usable directly to index an `ndarray::ArrayD`.
    pub fn as_slice(&self) -> &[usize] {
        &self.axes[..self.rank()]
    }

    /// Position as a float vector; rank-2 coordinates have a zero third component.
    #[inline]
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::new(
            self.axes[0] as f32,
            self.axes[1] as f32,
            self.axes[2] as f32,
        )
    }

    /// Euclidean distance to `other` in voxel units.
    #[inline]
    pub fn distance(&self, other: &Coord) -> f32 {
        self.to_vec3().distance(other.to_vec3())
    }

    #[inline]
    pub fn distance_squared(&self, other: &Coord) -> f32 {
        self.to_vec3().distance_squared(other.to_vec3())
    }
}
