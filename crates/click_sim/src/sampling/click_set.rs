//! The result of one `produce` call.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::volume::{ClickMap, Coord};

/// One click attributed to its object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClickRecord {
    pub object_id: u32,
    pub coord: Coord,
}

/// A click map together with the ordered click positions that produced it.
///
/// Positions are grouped by object id ascending, `click` entries per object.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickSet {
    /// `1` at every clicked coordinate, `0` elsewhere.
    pub click_map: ClickMap,
    /// Click coordinates in selection order.
    pub positions: Vec<Coord>,
    object_count: usize,
    click: usize,
}

impl ClickSet {
    pub(crate) fn new(shape: &[usize], object_count: usize, click: usize) -> Self {
        Self {
            click_map: ClickMap::zeros(shape),
            positions: Vec::with_capacity(object_count * click),
            object_count,
            click,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, coord: Coord) {
        self.click_map[coord.as_slice()] = 1;
        self.positions.push(coord);
    }

    pub fn object_count(&self) -> usize {
        self.object_count
    }

    pub fn clicks_per_object(&self) -> usize {
        self.click
    }

    /// Clicks of `object_id` (1-based) in selection order; empty for unknown ids
    /// or when `positions` no longer holds a full group for that object.
    pub fn object_clicks(&self, object_id: u32) -> &[Coord] {
        let Some(index) = (object_id as usize).checked_sub(1) else {
            return &[];
        };
        if index >= self.object_count {
            return &[];
        }
        let start = index * self.click;
        self.positions.get(start..start + self.click).unwrap_or(&[])
    }

    /// Positions as `(object_id, coord)` records, in the same order as [`ClickSet::positions`].
    pub fn records(&self) -> impl Iterator<Item = ClickRecord> + '_ {
        self.positions.iter().enumerate().map(move |(i, &coord)| ClickRecord {
            object_id: (i / self.click) as u32 + 1,
            coord,
        })
    }

    pub fn into_parts(self) -> (ClickMap, Vec<Coord>) {
        (self.click_map, self.positions)
    }
}
