//! Scroll offset arithmetic for the wrap-around track.
//!
//! The track is three copies of the item sequence laid end to end. One copy
//! is `hw` pixels long (`len * card_width`), and the translation applied to
//! the track always lives in the wrap window `(-2 * hw, 0]`. Every function
//! here is pure; callers own the state.

/// Normalize `value` into the wrap window `(-2 * hw, 0]`.
///
/// Behaves exactly like repeatedly subtracting `hw` while `value > 0` and
/// adding `hw` while `value <= -2 * hw`, but in constant time:
///
/// - a positive value lands in `(-hw, 0]`
/// - a value at or below `-2 * hw` lands in `(-2 * hw, -hw]`
/// - a value already inside the window is returned untouched
///
/// With `hw <= 0` there is nothing to wrap around; the result is `0.0`.
/// Non-finite input also collapses to `0.0`.
pub fn wrap(value: f64, hw: f64) -> f64 {
    if !(hw > 0.0) || !value.is_finite() {
        return 0.0;
    }

    let lower = -2.0 * hw;

    if value > 0.0 {
        let periods = (value / hw).ceil();
        let mut wrapped = value - periods * hw;
        // Rounding can leave us one period off either side of (-hw, 0].
        if wrapped > 0.0 {
            wrapped -= hw;
        } else if wrapped <= -hw {
            wrapped += hw;
        }
        return wrapped;
    }

    if value <= lower {
        let periods = ((lower - value) / hw).floor() + 1.0;
        let mut wrapped = value + periods * hw;
        if wrapped <= lower {
            wrapped += hw;
        } else if wrapped > -hw {
            wrapped -= hw;
        }
        return wrapped;
    }

    value
}

/// Apply a scroll delta. Positive deltas move the track forward, which
/// decreases the offset.
pub fn advance(offset: f64, delta: f64, hw: f64) -> f64 {
    wrap(offset - delta, hw)
}

/// Distance travelled into a single copy, in `[0, hw)`.
pub fn position_in_copy(offset: f64, hw: f64) -> f64 {
    if !(hw > 0.0) {
        return 0.0;
    }
    let position = (-offset).rem_euclid(hw);
    // rem_euclid may round up to exactly `hw` for tiny negative inputs
    if position >= hw { 0.0 } else { position }
}

/// Carry an offset across a change of period so the same position within a
/// copy stays under the viewport.
///
/// An empty list (`new_hw == 0`) resets to `0.0`. Starting from an empty list
/// there is no previous position to keep, so the offset is just re-wrapped.
pub fn remap(offset: f64, old_hw: f64, new_hw: f64) -> f64 {
    if !(new_hw > 0.0) {
        return 0.0;
    }
    if !(old_hw > 0.0) {
        return wrap(offset, new_hw);
    }
    if old_hw == new_hw {
        return offset;
    }
    wrap(-position_in_copy(offset, old_hw), new_hw)
}
