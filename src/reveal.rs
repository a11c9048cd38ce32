//! One-shot scroll reveals and the skill arc fill.

use crate::easing::{progress, Ease};
use std::collections::BTreeMap;
use std::f64::consts::PI;

pub const SKILL_ARC_RADIUS: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RevealTrigger {
    /// Any overlap with the viewport shrunk by `margin_px` on each edge.
    Viewport { margin_px: f64 },
    /// Element top has scrolled above `fraction` of the viewport height.
    TopAbove { fraction: f64 },
}

impl RevealTrigger {
    pub fn is_met(self, top: f64, bottom: f64, viewport_height: f64) -> bool {
        match self {
            Self::Viewport { margin_px } => {
                top < viewport_height - margin_px && bottom > margin_px
            }
            Self::TopAbove { fraction } => top <= viewport_height * fraction,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RevealId(u64);

/// Tracks which registered elements still wait for their first reveal.
#[derive(Debug, Default)]
pub struct RevealTracker {
    next_id: u64,
    pending: BTreeMap<RevealId, RevealTrigger>,
}

impl RevealTracker {
    pub fn register(&mut self, trigger: RevealTrigger) -> RevealId {
        let id = RevealId(self.next_id);
        self.next_id += 1;
        self.pending.insert(id, trigger);
        id
    }

    pub fn unregister(&mut self, id: RevealId) {
        self.pending.remove(&id);
    }

    /// Returns the ids revealed by this pass. `bounds` yields the element's
    /// `(top, bottom)` in viewport coordinates, or `None` when it is not
    /// attached.
    pub fn sweep(
        &mut self,
        viewport_height: f64,
        mut bounds: impl FnMut(RevealId) -> Option<(f64, f64)>,
    ) -> Vec<RevealId> {
        let revealed: Vec<RevealId> = self
            .pending
            .iter()
            .filter(|(id, trigger)| {
                bounds(**id)
                    .map(|(top, bottom)| trigger.is_met(top, bottom, viewport_height))
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect();

        for id in &revealed {
            self.pending.remove(id);
        }
        revealed
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// Eased fill of a skill's circular progress arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SkillFill {
    target: f64,
    start_ms: f64,
    duration_ms: f64,
}

impl SkillFill {
    pub fn start(target: f64, now_ms: f64, delay_ms: f64, duration_ms: f64) -> Self {
        Self {
            target: target.clamp(0.0, 1.0),
            start_ms: now_ms + delay_ms,
            duration_ms,
        }
    }

    pub fn fraction(&self, now_ms: f64) -> f64 {
        let t = progress(now_ms, self.start_ms, self.duration_ms);
        self.target * Ease::Power2Out.apply(t)
    }

    pub fn is_finished(&self, now_ms: f64) -> bool {
        now_ms >= self.start_ms + self.duration_ms
    }
}

pub fn arc_circumference(radius: f64) -> f64 {
    2.0 * PI * radius
}

/// `stroke-dashoffset` that leaves `fraction` of the arc drawn.
pub fn arc_dash_offset(radius: f64, fraction: f64) -> f64 {
    arc_circumference(radius) * (1.0 - fraction.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn viewport_trigger_respects_margin() {
        let trigger = RevealTrigger::Viewport { margin_px: 100.0 };

        assert!(!trigger.is_met(750.0, 900.0, 800.0));
        assert!(!trigger.is_met(700.0, 900.0, 800.0));
        assert!(trigger.is_met(699.0, 900.0, 800.0));
        assert!(!trigger.is_met(-400.0, 100.0, 800.0));
    }

    #[test]
    fn top_trigger_fires_at_eighty_five_percent() {
        let trigger = RevealTrigger::TopAbove { fraction: 0.85 };

        assert!(!trigger.is_met(681.0, 900.0, 800.0));
        assert!(trigger.is_met(679.0, 900.0, 800.0));
    }

    #[test]
    fn reveal_fires_once_per_element() {
        let mut tracker = RevealTracker::default();
        let header = tracker.register(RevealTrigger::Viewport { margin_px: 0.0 });
        let card = tracker.register(RevealTrigger::Viewport { margin_px: 0.0 });

        let mut bounds = HashMap::new();
        bounds.insert(header, (100.0, 300.0));
        bounds.insert(card, (1_500.0, 1_800.0));

        let first = tracker.sweep(800.0, |id| bounds.get(&id).copied());
        assert_eq!(first, vec![header]);

        bounds.insert(header, (-900.0, -700.0));
        bounds.insert(card, (200.0, 500.0));
        let second = tracker.sweep(800.0, |id| bounds.get(&id).copied());
        assert_eq!(second, vec![card]);

        bounds.insert(header, (100.0, 300.0));
        let third = tracker.sweep(800.0, |id| bounds.get(&id).copied());
        assert!(third.is_empty());
        assert_eq!(tracker.pending_count(), 0);
    }

    #[test]
    fn detached_elements_stay_pending() {
        let mut tracker = RevealTracker::default();
        let id = tracker.register(RevealTrigger::Viewport { margin_px: 0.0 });

        assert!(tracker.sweep(800.0, |_| None).is_empty());
        assert!(tracker.pending.contains_key(&id));

        tracker.unregister(id);
        assert!(!tracker.pending.contains_key(&id));
    }

    #[test]
    fn skill_fill_lands_on_level_fraction() {
        for level in [0u8, 37, 82, 90, 100] {
            let target = f64::from(level) / 100.0;
            let fill = SkillFill::start(target, 1_000.0, 400.0, 2_000.0);

            assert_eq!(fill.fraction(1_000.0), 0.0);
            assert_eq!(fill.fraction(1_400.0), 0.0);
            assert!(fill.fraction(2_400.0) <= target);
            assert!(!fill.is_finished(3_399.0));
            assert!(fill.is_finished(3_400.0));
            assert_eq!(fill.fraction(3_400.0), target);
        }
    }

    #[test]
    fn dash_offset_matches_fill() {
        let circumference = arc_circumference(SKILL_ARC_RADIUS);

        assert_eq!(arc_dash_offset(SKILL_ARC_RADIUS, 0.0), circumference);
        assert_eq!(arc_dash_offset(SKILL_ARC_RADIUS, 1.0), 0.0);
        assert!((arc_dash_offset(SKILL_ARC_RADIUS, 0.9) - circumference * 0.1).abs() < 1e-9);
    }
}
