use crate::task::Task;

/// One page of tasks as returned by `GET /api/tasks`.
///
/// Missing fields deserialize to their zero value; in particular an absent
/// `hasMore` reads as `false` so a malformed response can never keep a client
/// requesting pages forever.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct TaskPage {
    pub tasks: Vec<Task>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub has_more: bool,
}

impl TaskPage {
    /// Slice one page out of an already filtered, ordered collection.
    pub fn paginate(filtered: &[Task], page: u32, limit: u32) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total = filtered.len();
        let start = (page as usize - 1).saturating_mul(limit as usize);
        let tasks: Vec<Task> = filtered
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        let has_more = Self::has_more_for(page, limit, tasks.len(), total);

        Self {
            tasks,
            page,
            limit,
            total,
            has_more,
        }
    }

    /// `(page - 1) * limit + returned < total`
    pub fn has_more_for(page: u32, limit: u32, returned: usize, total: usize) -> bool {
        let consumed = (page.max(1) as usize - 1)
            .saturating_mul(limit as usize)
            .saturating_add(returned);
        consumed < total
    }
}
