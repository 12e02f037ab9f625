//! Turns the loaded items and offset into a concrete layout.
//!
//! When every card fits in the container the list is drawn once with no
//! translation. Otherwise three copies are laid end to end and the whole
//! track is translated by the current offset, which keeps at least one full
//! copy on either side of the viewport for any offset in the wrap window.

use super::offset;
use super::types::CarouselItem;

/// Copies of the list rendered in looped mode.
pub const LOOP_COPIES: usize = 3;

/// Layout mode chosen for a given container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Empty,
    Static,
    Looped,
}

/// Key for a card in looped mode. The same item appears once per copy, so
/// the id alone is not unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardKey<Id> {
    pub id: Id,
    pub copy: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoopedCard<T: CarouselItem> {
    pub key: CardKey<T::Id>,
    pub item: T,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan<T: CarouselItem> {
    /// Nothing loaded.
    Empty,
    /// Everything fits; each item once, in order, untranslated.
    Static { cards: Vec<T> },
    /// Three copies on a track translated by `translate_x`.
    Looped {
        cards: Vec<LoopedCard<T>>,
        translate_x: f64,
        card_width: f64,
    },
}

impl<T: CarouselItem> RenderPlan<T> {
    pub fn mode(&self) -> RenderMode {
        match self {
            RenderPlan::Empty => RenderMode::Empty,
            RenderPlan::Static { .. } => RenderMode::Static,
            RenderPlan::Looped { .. } => RenderMode::Looped,
        }
    }

    /// Number of rendered card nodes.
    pub fn node_count(&self) -> usize {
        match self {
            RenderPlan::Empty => 0,
            RenderPlan::Static { cards } => cards.len(),
            RenderPlan::Looped { cards, .. } => cards.len(),
        }
    }

    pub fn translate_x(&self) -> f64 {
        match self {
            RenderPlan::Looped { translate_x, .. } => *translate_x,
            _ => 0.0,
        }
    }

    /// Items intersecting a viewport `container_width` wide, left to right.
    pub fn visible(&self, container_width: f64) -> Vec<&T> {
        match self {
            RenderPlan::Empty => Vec::new(),
            RenderPlan::Static { cards } => cards.iter().collect(),
            RenderPlan::Looped {
                cards,
                translate_x,
                card_width,
            } => cards
                .iter()
                .enumerate()
                .filter(|(slot, _)| {
                    let left = *slot as f64 * card_width + translate_x;
                    left + card_width > 0.0 && left < container_width
                })
                .map(|(_, card)| &card.item)
                .collect(),
        }
    }

    /// The card whose footprint covers the left edge of the viewport.
    pub fn leading(&self) -> Option<&T> {
        match self {
            RenderPlan::Empty => None,
            RenderPlan::Static { cards } => cards.first(),
            RenderPlan::Looped {
                cards,
                translate_x,
                card_width,
            } => {
                let len = cards.len() / LOOP_COPIES;
                if len == 0 {
                    return None;
                }
                let hw = len as f64 * card_width;
                let position = offset::position_in_copy(*translate_x, hw);
                let index = ((position / card_width).floor() as usize).min(len - 1);
                cards.get(index).map(|card| &card.item)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselRenderer {
    card_width: f64,
}

impl CarouselRenderer {
    pub fn new(card_width: f64) -> Self {
        Self { card_width }
    }

    pub fn card_width(&self) -> f64 {
        self.card_width
    }

    /// Whole cards that fit side by side in the container.
    pub fn visible_count(&self, container_width: f64) -> usize {
        if self.card_width <= 0.0 || !(container_width > 0.0) {
            return 0;
        }
        (container_width / self.card_width).floor() as usize
    }

    pub fn mode(&self, container_width: f64, len: usize) -> RenderMode {
        if len == 0 {
            return RenderMode::Empty;
        }
        let visible = self.visible_count(container_width);
        if visible > 0 && visible >= len {
            RenderMode::Static
        } else {
            RenderMode::Looped
        }
    }

    pub fn plan<T: CarouselItem>(
        &self,
        items: &[T],
        offset: f64,
        container_width: f64,
    ) -> RenderPlan<T> {
        match self.mode(container_width, items.len()) {
            RenderMode::Empty => RenderPlan::Empty,
            RenderMode::Static => RenderPlan::Static {
                cards: items.to_vec(),
            },
            RenderMode::Looped => {
                let cards = (0..LOOP_COPIES)
                    .flat_map(|copy| {
                        items.iter().map(move |item| LoopedCard {
                            key: CardKey {
                                id: item.id(),
                                copy,
                            },
                            item: item.clone(),
                        })
                    })
                    .collect();
                RenderPlan::Looped {
                    cards,
                    translate_x: offset,
                    card_width: self.card_width,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Card(u32);

    impl CarouselItem for Card {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    fn cards(count: u32) -> Vec<Card> {
        (0..count).map(Card).collect()
    }

    #[test]
    fn visible_count_floors() {
        let renderer = CarouselRenderer::new(320.0);
        assert_eq!(renderer.visible_count(1000.0), 3);
        assert_eq!(renderer.visible_count(319.0), 0);
        assert_eq!(renderer.visible_count(0.0), 0);
    }

    #[test]
    fn three_cards_render_static() {
        let renderer = CarouselRenderer::new(320.0);
        let plan = renderer.plan(&cards(3), -100.0, 1000.0);

        assert_eq!(plan.mode(), RenderMode::Static);
        assert_eq!(plan.node_count(), 3);
        assert_eq!(plan.translate_x(), 0.0);
    }

    #[test]
    fn four_cards_render_three_copies() {
        let renderer = CarouselRenderer::new(320.0);
        let plan = renderer.plan(&cards(4), -100.0, 1000.0);

        assert_eq!(plan.mode(), RenderMode::Looped);
        assert_eq!(plan.node_count(), 12);
        assert_eq!(plan.translate_x(), -100.0);

        let RenderPlan::Looped { cards, .. } = &plan else {
            panic!("expected looped plan");
        };
        let keys: HashSet<_> = cards.iter().map(|card| card.key).collect();
        assert_eq!(keys.len(), 12);
        assert_eq!(cards[4].key, CardKey { id: 0, copy: 1 });
        assert_eq!(cards[11].key, CardKey { id: 3, copy: 2 });
    }

    #[test]
    fn zero_width_container_loops() {
        let renderer = CarouselRenderer::new(320.0);
        assert_eq!(renderer.mode(0.0, 1), RenderMode::Looped);
        assert_eq!(renderer.mode(0.0, 0), RenderMode::Empty);
    }

    #[test]
    fn empty_list_renders_empty() {
        let renderer = CarouselRenderer::new(320.0);
        let plan = renderer.plan::<Card>(&[], 0.0, 1000.0);
        assert_eq!(plan, RenderPlan::Empty);
        assert_eq!(plan.leading(), None);
        assert!(plan.visible(1000.0).is_empty());
    }

    #[test]
    fn viewport_is_never_short_of_cards() {
        let renderer = CarouselRenderer::new(320.0);
        let items = cards(5);
        let hw = 5.0 * 320.0;
        let mut offset_px = 0.0;
        while offset_px > -2.0 * hw {
            let plan = renderer.plan(&items, offset_px, 1000.0);
            // 1000px wide: at least three whole cards plus partials.
            assert!(plan.visible(1000.0).len() >= 4, "offset={offset_px}");
            offset_px -= 37.0;
        }
    }

    #[test]
    fn leading_card_follows_offset() {
        let renderer = CarouselRenderer::new(100.0);
        let items = cards(4);
        assert_eq!(renderer.plan(&items, 0.0, 250.0).leading(), Some(&Card(0)));
        assert_eq!(renderer.plan(&items, -150.0, 250.0).leading(), Some(&Card(1)));
        assert_eq!(renderer.plan(&items, -530.0, 250.0).leading(), Some(&Card(1)));
    }
}
