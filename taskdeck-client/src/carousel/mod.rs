//! Infinite wrap-scrolling carousel
//!
//! The engine is split the same way the data flows: a wheel delta goes
//! through [`offset`] into the [`items`] set, [`trigger`] decides whether the
//! next page is due, and [`render`] lays out the result. [`state`] ties the
//! pieces into one reducer driven by [`messages`].

pub mod items;
pub mod messages;
pub mod offset;
pub mod render;
pub mod source;
pub mod state;
pub mod trigger;
pub mod types;

pub use items::ItemSetManager;
pub use messages::{CarouselMessage, PageTicket};
pub use render::{CardKey, CarouselRenderer, LoopedCard, RenderMode, RenderPlan};
pub use source::{Page, PageQuery, PaginationSource};
pub use state::{CarouselSnapshot, CarouselState};
pub use trigger::LazyLoadTrigger;
pub use types::*;
