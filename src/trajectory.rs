//! Bounded trail of past satellite positions for path rendering.

use std::collections::VecDeque;

use bevy::math::DVec3;

/// Default number of samples kept.
pub const DEFAULT_TRAJECTORY_CAPACITY: usize = 2000;

/// FIFO buffer of positions. The oldest sample is evicted once full.
#[derive(Clone, Debug)]
pub struct TrajectoryHistory {
    samples: VecDeque<DVec3>,
    capacity: usize,
}

impl Default for TrajectoryHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_TRAJECTORY_CAPACITY)
    }
}

impl TrajectoryHistory {
    /// A capacity of zero keeps nothing.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, pos: DVec3) {
        if self.capacity == 0 {
            return;
        }
        while self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(pos);
    }

    /// Drop every sample; the next orbit starts a fresh trail.
    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest retained sample.
    pub fn oldest(&self) -> Option<DVec3> {
        self.samples.front().copied()
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<DVec3> {
        self.samples.back().copied()
    }

    /// Samples from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DVec3> + '_ {
        self.samples.iter()
    }
}
