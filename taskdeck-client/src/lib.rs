//! # taskdeck client
//!
//! The task carousel: an infinitely wrap-scrolling strip of tasks whose
//! backing list grows page by page as the user scrolls toward either wrap
//! boundary.
//!
//! - [`carousel`] holds the engine: offset arithmetic, the loaded item set,
//!   the lazy-load trigger, the renderer and the reducer tying them together
//! - [`infra`] is the HTTP side: [`ApiClient`] talks to the task server and
//!   doubles as the carousel's [`PaginationSource`]
//! - [`runtime`] drives a reducer from an event stream on a tokio task

pub mod carousel;
pub mod infra;
pub mod runtime;

pub use carousel::{
    CarouselItem, CarouselMessage, CarouselSnapshot, CarouselState, PaginationSource, RenderPlan,
    ScrollDelta,
};
pub use infra::{ApiClient, ClientError, ClientResult};
pub use runtime::{CarouselRuntime, CarouselSubscription, RuntimeClosed};
