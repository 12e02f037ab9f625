//! Loaded item set and the offset that scrolls over it.
//!
//! Keeping both in one place means every change to the list length goes
//! through [`offset::remap`], so the card under the viewport never jumps when
//! a page arrives or a card disappears.

use std::collections::HashSet;

use log::debug;

use super::offset;
use super::types::CarouselItem;

#[derive(Debug, Clone)]
pub struct ItemSetManager<T: CarouselItem> {
    items: Vec<T>,
    offset: f64,
    card_width: f64,
}

impl<T: CarouselItem> ItemSetManager<T> {
    pub fn new(card_width: f64) -> Self {
        Self {
            items: Vec::new(),
            offset: 0.0,
            card_width,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Length of one copy of the sequence: the wrap period.
    pub fn half_width(&self) -> f64 {
        self.width_for(self.items.len())
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    /// Scroll by `delta`; returns the new offset, or `None` when there is
    /// nothing loaded to scroll over.
    pub fn scroll_by(&mut self, delta: f64) -> Option<f64> {
        let hw = self.half_width();
        if hw <= 0.0 {
            return None;
        }
        self.offset = offset::advance(self.offset, delta, hw);
        Some(self.offset)
    }

    /// Append in order, skipping ids that are already loaded. Returns how many
    /// items were actually added.
    pub fn append<I>(&mut self, new_items: I) -> usize
    where
        I: IntoIterator<Item = T>,
    {
        let mut seen: HashSet<T::Id> = self.items.iter().map(|item| item.id()).collect();
        let old_len = self.items.len();

        for item in new_items {
            if seen.insert(item.id()) {
                self.items.push(item);
            } else {
                debug!("skipping duplicate carousel item {:?}", item.id());
            }
        }

        let added = self.items.len() - old_len;
        self.remap_from(old_len);
        added
    }

    /// Replace an item in place, keeping its slot. Returns `false` when the
    /// id is not loaded.
    pub fn replace(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|existing| existing.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        let old_len = self.items.len();
        let removed = self.items.remove(index);
        self.remap_from(old_len);
        Some(removed)
    }

    /// Drop everything and return to the start of the track.
    pub fn reset(&mut self) {
        self.items.clear();
        self.offset = 0.0;
    }

    fn width_for(&self, len: usize) -> f64 {
        len as f64 * self.card_width
    }

    fn remap_from(&mut self, old_len: usize) {
        let old_hw = self.width_for(old_len);
        let new_hw = self.half_width();
        let remapped = offset::remap(self.offset, old_hw, new_hw);
        if remapped != self.offset {
            debug!(
                "carousel offset remapped {} -> {} (period {} -> {})",
                self.offset, remapped, old_hw, new_hw
            );
        }
        self.offset = remapped;
    }
}
