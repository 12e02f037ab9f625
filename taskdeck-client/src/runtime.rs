//! Event runtime for the carousel.
//!
//! One task owns the [`CarouselState`] and applies messages in arrival order,
//! so the reducer never sees concurrent mutation. Page fetches run as their
//! own tasks and report back through the same queue. Observers read
//! [`CarouselSnapshot`]s from a watch channel.
//!
//! A [`CarouselSubscription`] is the scoped handle to a running carousel.
//! When the last clone is dropped the runtime shuts down and any fetch still
//! in flight is aborted.

use std::{fmt, sync::Arc};

use log::{debug, info, warn};
use taskdeck_model::StatusFilter;
use thiserror::Error;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::carousel::{
    CarouselItem, CarouselMessage, CarouselSnapshot, CarouselState, PageTicket,
    PaginationSource, ScrollDelta,
};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("carousel runtime has shut down")]
pub struct RuntimeClosed;

pub struct CarouselRuntime<S: PaginationSource> {
    source: Arc<S>,
    state: CarouselState<S::Item>,
    events_rx: mpsc::UnboundedReceiver<CarouselMessage<S::Item>>,
    events_tx: mpsc::UnboundedSender<CarouselMessage<S::Item>>,
    snapshots: watch::Sender<CarouselSnapshot<S::Item>>,
    shutdown_token: CancellationToken,
    fetch: Option<JoinHandle<()>>,
}

impl<S: PaginationSource> fmt::Debug for CarouselRuntime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselRuntime")
            .field("source", &self.source)
            .field("filter", &self.state.filter())
            .field("loaded", &self.state.items().len())
            .field("in_flight", &self.state.in_flight())
            .field("shutdown_cancelled", &self.shutdown_token.is_cancelled())
            .finish()
    }
}

impl<S: PaginationSource + 'static> CarouselRuntime<S> {
    /// Start a runtime on the current tokio runtime and request the first
    /// page for the state's filter.
    ///
    /// The first snapshot observers see already reports the page as loading.
    pub fn spawn(
        source: Arc<S>,
        mut state: CarouselState<S::Item>,
    ) -> CarouselSubscription<S::Item> {
        let first_page = state.update(CarouselMessage::Reload);
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshots, snapshot_rx) = watch::channel(state.snapshot());
        let shutdown_token = CancellationToken::new();

        let subscription = CarouselSubscription {
            events: events_tx.clone(),
            snapshots: snapshot_rx,
            _guard: Arc::new(shutdown_token.clone().drop_guard()),
        };

        let runtime = Self {
            source,
            state,
            events_rx,
            events_tx,
            snapshots,
            shutdown_token,
            fetch: None,
        };
        tokio::spawn(runtime.run(first_page));

        subscription
    }

    async fn run(mut self, first_page: Option<PageTicket>) {
        info!("carousel runtime started (filter {})", self.state.filter());
        if let Some(ticket) = first_page {
            self.start_fetch(ticket);
        }

        loop {
            tokio::select! {
                _ = self.shutdown_token.cancelled() => break,
                message = self.events_rx.recv() => match message {
                    Some(message) => self.apply(message),
                    None => break,
                },
            }
        }

        if let Some(fetch) = self.fetch.take() {
            fetch.abort();
        }
        info!("carousel runtime stopped");
    }

    fn apply(&mut self, message: CarouselMessage<S::Item>) {
        if let Some(ticket) = self.state.update(message) {
            self.start_fetch(ticket);
        }
        self.snapshots.send_replace(self.state.snapshot());
    }

    fn start_fetch(&mut self, ticket: PageTicket) {
        // The reducer only issues a new ticket while another is outstanding
        // when the filter was reset; that answer is no longer wanted.
        if let Some(previous) = self.fetch.take()
            && !previous.is_finished()
        {
            debug!("aborting superseded page fetch");
            previous.abort();
        }

        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        self.fetch = Some(tokio::spawn(async move {
            let message = match source.fetch_page(ticket.query).await {
                Ok(page) => CarouselMessage::PageLoaded(ticket, page),
                Err(err) => {
                    warn!("page {} fetch failed: {}", ticket.query.page, err);
                    CarouselMessage::PageFailed(ticket, format!("Failed to load tasks: {err}"))
                }
            };
            // The runtime may already be gone; nothing left to notify.
            let _ = events.send(message);
        }));
    }
}

/// Scoped input/output handle for a running carousel.
pub struct CarouselSubscription<T: CarouselItem> {
    events: mpsc::UnboundedSender<CarouselMessage<T>>,
    snapshots: watch::Receiver<CarouselSnapshot<T>>,
    _guard: Arc<DropGuard>,
}

impl<T: CarouselItem> Clone for CarouselSubscription<T> {
    fn clone(&self) -> Self {
        Self {
            events: self.events.clone(),
            snapshots: self.snapshots.clone(),
            _guard: Arc::clone(&self._guard),
        }
    }
}

impl<T: CarouselItem> fmt::Debug for CarouselSubscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CarouselSubscription")
            .field("closed", &self.events.is_closed())
            .field("handles", &Arc::strong_count(&self._guard))
            .finish()
    }
}

impl<T: CarouselItem> CarouselSubscription<T> {
    pub fn send(&self, message: CarouselMessage<T>) -> Result<(), RuntimeClosed> {
        self.events.send(message).map_err(|_| RuntimeClosed)
    }

    pub fn scroll(&self, delta: ScrollDelta) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::Scrolled(delta))
    }

    pub fn resize(&self, container_width: f64) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::Resized(container_width))
    }

    pub fn set_filter(&self, filter: StatusFilter) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::FilterChanged(filter))
    }

    pub fn reload(&self) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::Reload)
    }

    pub fn item_created(&self, item: T) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::ItemCreated(item))
    }

    pub fn item_updated(&self, item: T) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::ItemUpdated(item))
    }

    pub fn item_removed(&self, id: T::Id) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::ItemRemoved(id))
    }

    pub fn dismiss_error(&self) -> Result<(), RuntimeClosed> {
        self.send(CarouselMessage::DismissError)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> CarouselSnapshot<T> {
        self.snapshots.borrow().clone()
    }

    /// Wait for the next published snapshot.
    pub async fn changed(&mut self) -> Result<CarouselSnapshot<T>, RuntimeClosed> {
        self.snapshots.changed().await.map_err(|_| RuntimeClosed)?;
        Ok(self.snapshots.borrow_and_update().clone())
    }

    /// Wait until a snapshot satisfies `predicate`, checking the current one
    /// first.
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Result<CarouselSnapshot<T>, RuntimeClosed>
    where
        F: FnMut(&CarouselSnapshot<T>) -> bool,
    {
        let snapshot = self
            .snapshots
            .wait_for(|snapshot| predicate(snapshot))
            .await
            .map_err(|_| RuntimeClosed)?;
        Ok(snapshot.clone())
    }
}
