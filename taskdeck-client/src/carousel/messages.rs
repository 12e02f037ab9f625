//! Inputs to the carousel reducer

use taskdeck_model::StatusFilter;

use super::source::{Page, PageQuery};
use super::types::{CarouselItem, ScrollDelta};

/// Identifies one page request. `generation` ties it to the filter that was
/// active when it was issued; answers for an older generation are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub generation: u64,
    pub query: PageQuery,
}

#[derive(Debug, Clone)]
pub enum CarouselMessage<T: CarouselItem> {
    // Input
    Scrolled(ScrollDelta),
    Resized(f64),
    FilterChanged(StatusFilter),
    /// Drop everything and fetch page 1 of the current filter again.
    Reload,

    // Page fetch results
    PageLoaded(PageTicket, Page<T>),
    PageFailed(PageTicket, String),

    // Local CRUD reflection
    ItemCreated(T),
    ItemUpdated(T),
    ItemRemoved(T::Id),

    DismissError,
}
