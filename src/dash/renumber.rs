//! Identifier renumbering shared by every DASH pruning pass.
//!
//! Every pass that can drop a `Period` or `AdaptationSet` ends by
//! renumbering the survivors to `"0", "1", ...` in order. Centralized here
//! so each pass calls the same two functions instead of re-deriving the
//! renumbering logic.

use super::model::{Mpd, Period};

/// Drop `Period`s with zero `AdaptationSet`s, then renumber every
/// surviving `Period.id` and, within it, every surviving
/// `AdaptationSet.id`.
pub fn drop_empty_periods_and_renumber(mpd: &mut Mpd) {
    mpd.periods.retain(|period| !period.adaptation_sets.is_empty());
    for (index, period) in mpd.periods.iter_mut().enumerate() {
        period.id = index.to_string();
    }
}

pub fn renumber_adaptation_sets(period: &mut Period) {
    for (index, set) in period.adaptation_sets.iter_mut().enumerate() {
        set.id = index.to_string();
    }
}
