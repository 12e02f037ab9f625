//! The page-fetch seam between the engine and whatever serves the records.

use async_trait::async_trait;
use taskdeck_model::{StatusFilter, Task, TaskPage};

use super::types::CarouselItem;

/// One page request: filter first, then paginate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub status: StatusFilter,
    pub page: u32,
    pub limit: u32,
}

/// Engine-side page. Only `items` and `has_more` drive the carousel; the
/// rest is kept for status display.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// A terminal page with nothing more behind it.
    pub fn last(items: Vec<T>, page: u32, limit: u32) -> Self {
        let total = (page.max(1) as usize - 1) * limit as usize + items.len();
        Self {
            items,
            page,
            limit,
            total,
            has_more: false,
        }
    }
}

impl From<TaskPage> for Page<Task> {
    fn from(page: TaskPage) -> Self {
        Self {
            items: page.tasks,
            page: page.page,
            limit: page.limit,
            total: page.total,
            has_more: page.has_more,
        }
    }
}

/// Supplies pages of carousel items.
#[async_trait]
pub trait PaginationSource: Send + Sync + std::fmt::Debug {
    type Item: CarouselItem;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_page(&self, query: PageQuery) -> Result<Page<Self::Item>, Self::Error>;
}
