//! Scroll-triggered paging
//!
//! The pager watches a single target, the last rendered card. Front ends
//! provide visibility through [`VisibilitySource`]: the TUI computes it from
//! the grid viewport, the GUI from widget rects. An observation is armed when
//! attached and fires at most once; it is re-attached whenever the target or
//! the session's loading/has-more state changes.

use std::fmt::Debug;

/// Fraction of the target that must be on screen
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Reports how much of an observed target is inside the viewport.
pub trait VisibilitySource<K> {
    /// Visible fraction in `0.0..=1.0`, or `None` if `target` is not laid out.
    fn visible_fraction(&self, target: &K) -> Option<f32>;
}

/// Session facts the pager is gated on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerGate {
    pub has_more: bool,
    pub loading: bool,
}

impl PagerGate {
    fn is_open(&self) -> bool {
        self.has_more && !self.loading
    }
}

#[derive(Debug, Clone)]
struct Observation<K> {
    target: K,
    gate: PagerGate,
    armed: bool,
}

#[derive(Debug, Clone)]
pub struct ScrollPager<K> {
    threshold: f32,
    observation: Option<Observation<K>>,
}

impl<K> Default for ScrollPager<K> {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            observation: None,
        }
    }
}

impl<K: Clone + PartialEq + Debug> ScrollPager<K> {
    /// Point the pager at the current last item.
    ///
    /// Keeps the existing observation if nothing changed; otherwise detaches
    /// it and, unless a fetch is running, attaches a fresh armed one.
    pub fn attach(&mut self, target: Option<K>, gate: PagerGate) {
        if let (Some(obs), Some(t)) = (&self.observation, &target) {
            if obs.target == *t && obs.gate == gate {
                return;
            }
        }
        self.observation = match target {
            Some(target) if !gate.loading => {
                tracing::trace!(item = ?target, ?gate, "pager attached");
                Some(Observation {
                    target,
                    gate,
                    armed: true,
                })
            }
            _ => None,
        };
    }

    /// Feed a visibility report. Returns `true` exactly once per armed
    /// observation when the target is visible enough and more pages exist.
    pub fn check(&mut self, source: &impl VisibilitySource<K>) -> bool {
        let threshold = self.threshold;
        let Some(obs) = self.observation.as_mut() else {
            return false;
        };
        if !obs.armed || !obs.gate.is_open() {
            return false;
        }
        match source.visible_fraction(&obs.target) {
            Some(fraction) if fraction >= threshold => {
                obs.armed = false;
                tracing::debug!(item = ?obs.target, fraction, "last item visible, requesting next page");
                true
            }
            _ => false,
        }
    }

    #[cfg(test)]
    fn observed(&self) -> Option<&K> {
        self.observation.as_ref().map(|o| &o.target)
    }
}

/// Fraction of the 1-D span `[item_start, item_end)` inside
/// `[view_start, view_end)`.
pub fn overlap_fraction(item_start: f32, item_end: f32, view_start: f32, view_end: f32) -> f32 {
    let len = item_end - item_start;
    if len <= 0.0 {
        return 0.0;
    }
    let visible = item_end.min(view_end) - item_start.max(view_start);
    (visible / len).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct Fixed(HashMap<u32, f32>);

    impl VisibilitySource<u32> for Fixed {
        fn visible_fraction(&self, target: &u32) -> Option<f32> {
            self.0.get(target).copied()
        }
    }

    fn visible(target: u32, fraction: f32) -> Fixed {
        Fixed(HashMap::from([(target, fraction)]))
    }

    const OPEN: PagerGate = PagerGate { has_more: true, loading: false };

    #[test]
    fn fires_once_at_half_visibility() {
        let mut pager = ScrollPager::default();
        pager.attach(Some(11), OPEN);

        assert!(!pager.check(&visible(11, 0.49)));
        assert!(pager.check(&visible(11, 0.5)));
        assert!(!pager.check(&visible(11, 1.0)));
    }

    #[test]
    fn silent_while_loading_or_exhausted() {
        let mut pager = ScrollPager::default();
        pager.attach(Some(11), PagerGate { has_more: true, loading: true });
        assert!(!pager.check(&visible(11, 1.0)));
        assert_eq!(pager.observed(), None);

        pager.attach(Some(11), PagerGate { has_more: false, loading: false });
        assert!(!pager.check(&visible(11, 1.0)));
    }

    #[test]
    fn reattach_on_new_last_item() {
        let mut pager = ScrollPager::default();
        pager.attach(Some(11), OPEN);
        assert!(pager.check(&visible(11, 1.0)));

        // loading: previous observation detached
        pager.attach(Some(11), PagerGate { has_more: true, loading: true });
        assert!(!pager.check(&visible(11, 1.0)));

        pager.attach(Some(23), OPEN);
        assert_eq!(pager.observed(), Some(&23));
        assert!(!pager.check(&visible(11, 1.0)), "old target must not trigger");
        assert!(pager.check(&visible(23, 0.75)));
    }

    #[test]
    fn unchanged_attach_keeps_disarmed_state() {
        let mut pager = ScrollPager::default();
        pager.attach(Some(5), OPEN);
        assert!(pager.check(&visible(5, 1.0)));
        pager.attach(Some(5), OPEN);
        assert!(!pager.check(&visible(5, 1.0)));
    }

    #[test]
    fn gate_change_rearms_same_target() {
        let mut pager = ScrollPager::default();
        pager.attach(Some(5), OPEN);
        assert!(pager.check(&visible(5, 1.0)));
        pager.attach(Some(5), PagerGate { has_more: true, loading: true });
        pager.attach(Some(5), OPEN);
        assert!(pager.check(&visible(5, 1.0)));
    }

    #[test]
    fn no_target_no_trigger() {
        let mut pager: ScrollPager<u32> = ScrollPager::default();
        pager.attach(None, OPEN);
        assert!(!pager.check(&visible(0, 1.0)));
    }

    #[test]
    fn overlap_math() {
        assert_eq!(overlap_fraction(0.0, 10.0, 0.0, 100.0), 1.0);
        assert_eq!(overlap_fraction(95.0, 105.0, 0.0, 100.0), 0.5);
        assert_eq!(overlap_fraction(120.0, 130.0, 0.0, 100.0), 0.0);
        assert_eq!(overlap_fraction(-6.0, 4.0, 0.0, 100.0), 0.4);
        assert_eq!(overlap_fraction(5.0, 5.0, 0.0, 100.0), 0.0);
    }
}
