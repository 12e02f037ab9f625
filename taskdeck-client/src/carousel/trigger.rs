//! Decides when scrolling has come close enough to a wrap boundary to ask
//! for the next page.

use super::types::Boundary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LazyLoadTrigger {
    threshold: f64,
}

impl LazyLoadTrigger {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The boundary `offset` is within the threshold of, if any. Both ends of
    /// the two-copy window are checked independently.
    pub fn boundary(&self, offset: f64, hw: f64) -> Option<Boundary> {
        if hw <= 0.0 {
            return None;
        }
        if offset > -self.threshold {
            Some(Boundary::Forward)
        } else if offset < -(2.0 * hw - self.threshold) {
            Some(Boundary::Backward)
        } else {
            None
        }
    }

    pub fn should_load(&self, offset: f64, hw: f64, has_more: bool) -> bool {
        has_more && self.boundary(offset, hw).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_WIDTH: f64 = 320.0;

    fn trigger() -> LazyLoadTrigger {
        LazyLoadTrigger::new(640.0)
    }

    #[test]
    fn ten_cards_threshold_scenario() {
        let hw = 10.0 * CARD_WIDTH;

        assert_eq!(trigger().boundary(-100.0, hw), Some(Boundary::Forward));
        assert!(trigger().should_load(-100.0, hw, true));

        // Not near either end of the two-copy window.
        assert_eq!(trigger().boundary(-3100.0, hw), None);
        assert!(!trigger().should_load(-3100.0, hw, true));

        assert_eq!(trigger().boundary(-5800.0, hw), Some(Boundary::Backward));
        assert!(trigger().should_load(-5800.0, hw, true));
    }

    #[test]
    fn boundaries_are_exclusive() {
        let hw = 10.0 * CARD_WIDTH;
        assert_eq!(trigger().boundary(-640.0, hw), None);
        assert_eq!(trigger().boundary(-5760.0, hw), None);
    }

    #[test]
    fn nothing_fires_without_more_pages_or_items() {
        assert!(!trigger().should_load(-100.0, 3200.0, false));
        assert!(!trigger().should_load(0.0, 0.0, true));
        assert_eq!(trigger().boundary(0.0, 0.0), None);
    }

    #[test]
    fn short_lists_are_always_near_a_boundary() {
        // Two cards: only the exact midpoint of the window clears both thresholds.
        let hw = 2.0 * CARD_WIDTH;
        for offset in [0.0, -300.0, -639.0, -641.0, -1000.0, -1279.0] {
            assert!(trigger().should_load(offset, hw, true), "offset={offset}");
        }
    }
}
