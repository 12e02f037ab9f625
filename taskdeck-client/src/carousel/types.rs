//! Shared types for the carousel engine

use std::{fmt::Debug, hash::Hash};

use taskdeck_model::{StatusFilter, Task, TaskId};

/// What the engine needs from a record: a stable identity and, for local
/// create/update reflection, whether it belongs under a status filter.
pub trait CarouselItem: Clone + Debug + Send + Sync + 'static {
    type Id: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    fn id(&self) -> Self::Id;

    fn matches_filter(&self, _filter: StatusFilter) -> bool {
        true
    }
}

impl CarouselItem for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }

    fn matches_filter(&self, filter: StatusFilter) -> bool {
        filter.matches(self)
    }
}

/// Raw wheel input. Only one axis drives the carousel: the horizontal
/// component when the device reports one, the vertical component otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ScrollDelta {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    pub const fn horizontal(dx: f64) -> Self {
        Self { dx, dy: 0.0 }
    }

    pub const fn vertical(dy: f64) -> Self {
        Self { dx: 0.0, dy }
    }

    pub fn effective(&self) -> f64 {
        if self.dx != 0.0 { self.dx } else { self.dy }
    }
}

/// Which wrap boundary the offset is approaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Within the threshold of `0`.
    Forward,
    /// Within the threshold of `-2 * hw`.
    Backward,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_delta_prefers_horizontal() {
        assert_eq!(ScrollDelta::new(12.0, 90.0).effective(), 12.0);
        assert_eq!(ScrollDelta::new(0.0, 90.0).effective(), 90.0);
        assert_eq!(ScrollDelta::default().effective(), 0.0);
    }
}
