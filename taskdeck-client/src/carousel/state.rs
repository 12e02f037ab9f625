//! CarouselState: the single reducer behind the carousel.
//!
//! Every input (wheel, resize, filter change, page result, local edits) is a
//! [`CarouselMessage`] applied through [`CarouselState::update`]. The reducer
//! never performs I/O; when a page is needed it hands back a [`PageTicket`]
//! and the caller runs the fetch and feeds the result back in.

use log::{debug, warn};
use taskdeck_config::CarouselSettings;
use taskdeck_model::StatusFilter;

use super::items::ItemSetManager;
use super::messages::{CarouselMessage, PageTicket};
use super::render::{CarouselRenderer, RenderPlan};
use super::source::{Page, PageQuery};
use super::trigger::LazyLoadTrigger;
use super::types::CarouselItem;

#[derive(Debug, Clone)]
pub struct CarouselState<T: CarouselItem> {
    items: ItemSetManager<T>,
    trigger: LazyLoadTrigger,
    renderer: CarouselRenderer,
    page_size: u32,

    filter: StatusFilter,
    has_more: bool,
    loaded_page: u32,
    in_flight: Option<PageTicket>,
    generation: u64,

    container_width: f64,
    error: Option<String>,
}

/// Point-in-time view published to observers.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselSnapshot<T: CarouselItem> {
    pub plan: RenderPlan<T>,
    pub filter: StatusFilter,
    pub offset: f64,
    pub loaded: usize,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: CarouselItem> CarouselState<T> {
    pub fn new(settings: CarouselSettings, container_width: f64) -> Self {
        Self {
            items: ItemSetManager::new(settings.card_width),
            trigger: LazyLoadTrigger::new(settings.load_threshold),
            renderer: CarouselRenderer::new(settings.card_width),
            page_size: settings.page_size.max(1),
            filter: StatusFilter::default(),
            has_more: false,
            loaded_page: 0,
            in_flight: None,
            generation: 0,
            container_width: container_width.max(0.0),
            error: None,
        }
    }

    pub fn with_filter(mut self, filter: StatusFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn items(&self) -> &[T] {
        self.items.items()
    }

    pub fn offset(&self) -> f64 {
        self.items.offset()
    }

    pub fn half_width(&self) -> f64 {
        self.items.half_width()
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn loaded_page(&self) -> u32 {
        self.loaded_page
    }

    pub fn in_flight(&self) -> Option<PageTicket> {
        self.in_flight
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn render_plan(&self) -> RenderPlan<T> {
        self.renderer
            .plan(self.items.items(), self.items.offset(), self.container_width)
    }

    pub fn snapshot(&self) -> CarouselSnapshot<T> {
        CarouselSnapshot {
            plan: self.render_plan(),
            filter: self.filter,
            offset: self.items.offset(),
            loaded: self.items.len(),
            has_more: self.has_more,
            loading: self.is_loading(),
            error: self.error.clone(),
        }
    }

    /// Apply one message. Returns the page request to run, if any; at most
    /// one request is outstanding at a time.
    pub fn update(&mut self, message: CarouselMessage<T>) -> Option<PageTicket> {
        match message {
            CarouselMessage::Scrolled(delta) => {
                let delta = delta.effective();
                let offset = self.items.scroll_by(delta)?;
                self.request_more_near(offset)
            }
            CarouselMessage::Resized(width) => {
                self.container_width = width.max(0.0);
                None
            }
            CarouselMessage::FilterChanged(filter) => {
                if filter == self.filter {
                    return None;
                }
                debug!("carousel filter {} -> {}", self.filter, filter);
                self.filter = filter;
                Some(self.restart())
            }
            CarouselMessage::Reload => Some(self.restart()),
            CarouselMessage::PageLoaded(ticket, page) => {
                self.apply_page(ticket, page);
                None
            }
            CarouselMessage::PageFailed(ticket, error) => {
                if !self.settle(ticket) {
                    return None;
                }
                warn!(
                    "page {} for filter {} failed: {}",
                    ticket.query.page, ticket.query.status, error
                );
                // Stop paging; keep whatever is already on screen.
                self.has_more = false;
                self.error = Some(error);
                None
            }
            CarouselMessage::ItemCreated(item) => {
                if item.matches_filter(self.filter) {
                    self.items.append([item]);
                }
                None
            }
            CarouselMessage::ItemUpdated(item) => {
                let id = item.id();
                if item.matches_filter(self.filter) {
                    self.items.replace(item);
                } else {
                    self.items.remove(id);
                }
                None
            }
            CarouselMessage::ItemRemoved(id) => {
                self.items.remove(id);
                None
            }
            CarouselMessage::DismissError => {
                self.error = None;
                None
            }
        }
    }

    /// New generation, empty list, offset back to 0 and a fresh page 1.
    fn restart(&mut self) -> PageTicket {
        self.generation += 1;
        self.items.reset();
        self.has_more = false;
        self.loaded_page = 0;
        self.error = None;

        let ticket = self.ticket_for(1);
        self.in_flight = Some(ticket);
        ticket
    }

    fn request_more_near(&mut self, offset: f64) -> Option<PageTicket> {
        if self.in_flight.is_some() {
            return None;
        }
        let hw = self.items.half_width();
        if !self.trigger.should_load(offset, hw, self.has_more) {
            return None;
        }

        let ticket = self.ticket_for(self.loaded_page + 1);
        debug!(
            "offset {} near {:?} boundary (period {}); requesting page {}",
            offset,
            self.trigger.boundary(offset, hw),
            hw,
            ticket.query.page
        );
        self.in_flight = Some(ticket);
        Some(ticket)
    }

    fn apply_page(&mut self, ticket: PageTicket, page: Page<T>) {
        if !self.settle(ticket) {
            return;
        }
        let added = self.items.append(page.items);
        self.loaded_page = ticket.query.page;
        self.has_more = page.has_more;
        self.error = None;
        debug!(
            "page {} for filter {} applied: {} new items, {} loaded, has_more={}",
            ticket.query.page,
            ticket.query.status,
            added,
            self.items.len(),
            self.has_more
        );
    }

    /// Clear the in-flight slot if `ticket` is the outstanding request.
    /// Returns `false` for stale or unknown tickets, which must be ignored.
    fn settle(&mut self, ticket: PageTicket) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(
                "dropping stale page {} for filter {} (generation {}, current {})",
                ticket.query.page, ticket.query.status, ticket.generation, self.generation
            );
            return false;
        }
        self.in_flight = None;
        true
    }

    fn ticket_for(&self, page: u32) -> PageTicket {
        PageTicket {
            generation: self.generation,
            query: PageQuery {
                status: self.filter,
                page,
                limit: self.page_size,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::render::RenderMode;
    use crate::carousel::types::ScrollDelta;

    #[derive(Debug, Clone, PartialEq)]
    struct Card {
        id: u32,
        done: bool,
    }

    impl CarouselItem for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn matches_filter(&self, filter: StatusFilter) -> bool {
            match filter {
                StatusFilter::All => true,
                StatusFilter::Completed => self.done,
                StatusFilter::Pending => !self.done,
            }
        }
    }

    fn cards(range: std::ops::Range<u32>) -> Vec<Card> {
        range.map(|id| Card { id, done: false }).collect()
    }

    fn settings() -> CarouselSettings {
        CarouselSettings {
            card_width: 320.0,
            load_threshold: 640.0,
            page_size: 10,
        }
    }

    fn page(items: Vec<Card>, page: u32, has_more: bool) -> Page<Card> {
        Page {
            items,
            page,
            limit: 10,
            total: 100,
            has_more,
        }
    }

    /// State with page 1 (ten cards) loaded and more available.
    fn loaded_state() -> CarouselState<Card> {
        let mut state = CarouselState::new(settings(), 1000.0);
        let ticket = state.update(CarouselMessage::Reload).unwrap();
        state.update(CarouselMessage::PageLoaded(ticket, page(cards(0..10), 1, true)));
        state
    }

    fn scroll(state: &mut CarouselState<Card>, dx: f64) -> Option<PageTicket> {
        state.update(CarouselMessage::Scrolled(ScrollDelta::horizontal(dx)))
    }

    #[test]
    fn reload_requests_first_page() {
        let mut state: CarouselState<Card> = CarouselState::new(settings(), 1000.0);
        let ticket = state.update(CarouselMessage::Reload).unwrap();

        assert_eq!(ticket.query.page, 1);
        assert_eq!(ticket.query.limit, 10);
        assert_eq!(ticket.query.status, StatusFilter::All);
        assert!(state.is_loading());
        assert_eq!(state.render_plan().mode(), RenderMode::Empty);
    }

    #[test]
    fn scrolling_an_empty_carousel_is_ignored() {
        let mut state: CarouselState<Card> = CarouselState::new(settings(), 1000.0);
        assert_eq!(scroll(&mut state, 50.0), None);
        assert_eq!(state.offset(), 0.0);
    }

    #[test]
    fn near_forward_boundary_requests_next_page_once() {
        let mut state = loaded_state();
        assert_eq!(state.half_width(), 3200.0);

        let ticket = scroll(&mut state, 100.0).unwrap();
        assert_eq!(state.offset(), -100.0);
        assert_eq!(ticket.query.page, 2);

        // Still near the boundary, but a page is already on its way.
        assert_eq!(scroll(&mut state, 10.0), None);
        assert_eq!(state.in_flight(), Some(ticket));
    }

    #[test]
    fn middle_of_the_window_does_not_trigger() {
        let mut state = loaded_state();
        assert_eq!(scroll(&mut state, 3100.0), None);
        assert_eq!(state.offset(), -3100.0);
        assert!(!state.is_loading());
    }

    #[test]
    fn near_backward_boundary_requests_next_page() {
        let mut state = loaded_state();
        assert_eq!(scroll(&mut state, 3100.0), None);
        let ticket = scroll(&mut state, 2700.0).unwrap();
        assert_eq!(state.offset(), -5800.0);
        assert_eq!(ticket.query.page, 2);
    }

    #[test]
    fn vertical_wheel_drives_the_carousel_when_no_horizontal_delta() {
        let mut state = loaded_state();
        state.update(CarouselMessage::Scrolled(ScrollDelta::vertical(3000.0)));
        assert_eq!(state.offset(), -3000.0);
    }

    #[test]
    fn loaded_page_grows_list_and_keeps_position() {
        let mut state = loaded_state();
        let ticket = scroll(&mut state, 30.0).unwrap();
        assert_eq!(state.offset(), -30.0);

        state.update(CarouselMessage::PageLoaded(ticket, page(cards(10..20), 2, true)));
        assert_eq!(state.items().len(), 20);
        assert_eq!(state.half_width(), 6400.0);
        assert_eq!(state.offset(), -30.0);
        assert_eq!(state.loaded_page(), 2);
        assert!(!state.is_loading());

        let next = scroll(&mut state, 5.0).unwrap();
        assert_eq!(next.query.page, 3);
    }

    #[test]
    fn last_page_stops_further_requests() {
        let mut state = loaded_state();
        let ticket = scroll(&mut state, 100.0).unwrap();
        state.update(CarouselMessage::PageLoaded(ticket, page(cards(10..12), 2, false)));

        assert!(!state.has_more());
        assert_eq!(scroll(&mut state, 1.0), None);
    }

    #[test]
    fn filter_change_resets_and_fetches_page_one() {
        let mut state = loaded_state().with_filter(StatusFilter::Pending);
        scroll(&mut state, 3100.0);

        let ticket = state
            .update(CarouselMessage::FilterChanged(StatusFilter::Completed))
            .unwrap();
        assert_eq!(ticket.query.status, StatusFilter::Completed);
        assert_eq!(ticket.query.page, 1);
        assert!(state.items().is_empty());
        assert_eq!(state.offset(), 0.0);

        // Same filter again is not a change.
        assert_eq!(
            state.update(CarouselMessage::FilterChanged(StatusFilter::Completed)),
            None
        );
    }

    #[test]
    fn stale_page_from_previous_filter_is_dropped() {
        let mut state = loaded_state();
        let stale = scroll(&mut state, 100.0).unwrap();

        let fresh = state
            .update(CarouselMessage::FilterChanged(StatusFilter::Completed))
            .unwrap();
        state.update(CarouselMessage::PageLoaded(stale, page(cards(10..20), 2, true)));
        assert!(state.items().is_empty());
        assert_eq!(state.in_flight(), Some(fresh));

        state.update(CarouselMessage::PageFailed(stale, "boom".into()));
        assert_eq!(state.error(), None);
        assert_eq!(state.in_flight(), Some(fresh));

        let done = vec![Card { id: 50, done: true }];
        state.update(CarouselMessage::PageLoaded(fresh, page(done, 1, false)));
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.filter(), StatusFilter::Completed);
    }

    #[test]
    fn failed_page_keeps_state_and_stops_paging() {
        let mut state = loaded_state();
        let ticket = scroll(&mut state, 100.0).unwrap();

        state.update(CarouselMessage::PageFailed(ticket, "connection refused".into()));
        assert_eq!(state.error(), Some("connection refused"));
        assert_eq!(state.items().len(), 10);
        assert_eq!(state.offset(), -100.0);
        assert!(!state.is_loading());
        assert!(!state.has_more());
        assert_eq!(scroll(&mut state, 1.0), None);

        state.update(CarouselMessage::DismissError);
        assert_eq!(state.error(), None);

        // Reloading recovers.
        let ticket = state.update(CarouselMessage::Reload).unwrap();
        assert_eq!(ticket.query.page, 1);
    }

    #[test]
    fn local_edits_respect_the_active_filter() {
        let mut state: CarouselState<Card> =
            CarouselState::new(settings(), 1000.0).with_filter(StatusFilter::Pending);
        let ticket = state.update(CarouselMessage::Reload).unwrap();
        state.update(CarouselMessage::PageLoaded(ticket, page(cards(0..4), 1, false)));

        state.update(CarouselMessage::ItemCreated(Card { id: 9, done: true }));
        assert_eq!(state.items().len(), 4);
        state.update(CarouselMessage::ItemCreated(Card { id: 10, done: false }));
        assert_eq!(state.items().len(), 5);
        assert_eq!(state.half_width(), 1600.0);

        // Toggled to done: no longer pending, drops out.
        state.update(CarouselMessage::ItemUpdated(Card { id: 2, done: true }));
        assert_eq!(
            state.items().iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![0, 1, 3, 10]
        );

        state.update(CarouselMessage::ItemRemoved(0));
        assert_eq!(state.items().len(), 3);
        assert_eq!(state.render_plan().mode(), RenderMode::Static);
    }

    #[test]
    fn resize_switches_between_static_and_looped() {
        let mut state: CarouselState<Card> = CarouselState::new(settings(), 1000.0);
        let ticket = state.update(CarouselMessage::Reload).unwrap();
        state.update(CarouselMessage::PageLoaded(ticket, page(cards(0..3), 1, false)));
        assert_eq!(state.render_plan().mode(), RenderMode::Static);
        assert_eq!(state.render_plan().node_count(), 3);

        assert_eq!(state.update(CarouselMessage::Resized(600.0)), None);
        assert_eq!(state.container_width(), 600.0);
        let plan = state.render_plan();
        assert_eq!(plan.mode(), RenderMode::Looped);
        assert_eq!(plan.node_count(), 9);

        state.update(CarouselMessage::Resized(1000.0));
        assert_eq!(state.render_plan().mode(), RenderMode::Static);
    }

    #[test]
    fn snapshot_reflects_state() {
        let mut state = loaded_state();
        scroll(&mut state, 100.0);
        let snapshot = state.snapshot();

        assert_eq!(snapshot.loaded, 10);
        assert_eq!(snapshot.offset, -100.0);
        assert!(snapshot.loading);
        assert_eq!(snapshot.plan.mode(), RenderMode::Looped);
        assert_eq!(snapshot.plan.node_count(), 30);
    }
}
