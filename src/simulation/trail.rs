//! Bounded motion-trail history for a single body.
//!
//! A `TrailBuffer` is a fixed-capacity ring of past positions. Storage is
//! allocated once; after that every push overwrites one slot:
//!
//! - `write_index` is the next slot to overwrite
//! - `count` is the number of valid entries, saturating at capacity
//!
//! While `count < capacity` the valid entries sit in slots `0..count` in
//! order. Once full, the oldest entry is the one at `write_index` and the
//! newest is at `write_index - 1 (mod capacity)`.

use crate::error::{Result, SimError};
use crate::simulation::states::NVec3;

#[derive(Debug, Clone)]
pub struct TrailBuffer {
    points: Vec<NVec3>,
    write_index: usize,
    count: usize,
}

impl TrailBuffer {
    /// Create an empty trail holding at most `capacity` points.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidParameter(
                "trail capacity must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            points: vec![NVec3::zeros(); capacity],
            write_index: 0,
            count: 0,
        })
    }

    /// Record a position, overwriting the oldest one once full.
    pub fn push(&mut self, p: NVec3) {
        let cap = self.points.len();
        self.points[self.write_index] = p;
        self.write_index = (self.write_index + 1) % cap;
        if self.count < cap {
            self.count += 1;
        }
    }

    pub fn capacity(&self) -> usize {
        self.points.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.points.len()
    }

    /// Slot that the next push will overwrite.
    pub fn write_index(&self) -> usize {
        self.write_index
    }

    /// Most recently recorded point.
    pub fn latest(&self) -> Option<NVec3> {
        if self.count == 0 {
            return None;
        }
        let cap = self.points.len();
        Some(self.points[(self.write_index + cap - 1) % cap])
    }

    /// Iterate the valid points oldest first. Never mutates the buffer;
    /// call it again (or clone the iterator) to restart.
    pub fn iter(&self) -> TrailIter<'_> {
        let start = if self.is_full() { self.write_index } else { 0 };
        TrailIter {
            trail: self,
            start,
            offset: 0,
        }
    }
}

/// Chronological iterator over a [`TrailBuffer`].
#[derive(Debug, Clone)]
pub struct TrailIter<'a> {
    trail: &'a TrailBuffer,
    start: usize,
    offset: usize,
}

impl<'a> Iterator for TrailIter<'a> {
    type Item = NVec3;

    fn next(&mut self) -> Option<NVec3> {
        if self.offset >= self.trail.count {
            return None;
        }
        let idx = (self.start + self.offset) % self.trail.points.len();
        self.offset += 1;
        Some(self.trail.points[idx])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.trail.count - self.offset;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TrailIter<'_> {}

impl<'a> IntoIterator for &'a TrailBuffer {
    type Item = NVec3;
    type IntoIter = TrailIter<'a>;

    fn into_iter(self) -> TrailIter<'a> {
        self.iter()
    }
}
