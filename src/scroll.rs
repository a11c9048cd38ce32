//! Smoothed vertical scrolling and the hero's scroll-linked transform.

use crate::config::MotionConfig;
use crate::easing::{interpolate, lerp, progress, Ease};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Glide {
    from: f64,
    start_ms: f64,
}

/// Eases the document's scroll position toward a target moved by wheel and
/// touch input. Only vertical input is considered.
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothScroll {
    current: f64,
    target: f64,
    limit: f64,
    duration_ms: f64,
    wheel_multiplier: f64,
    touch_multiplier: f64,
    glide: Option<Glide>,
    paused: bool,
}

impl SmoothScroll {
    pub fn new(config: &MotionConfig, touch_multiplier: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            limit: 0.0,
            duration_ms: config.scroll_duration_ms,
            wheel_multiplier: config.wheel_multiplier,
            touch_multiplier,
            glide: None,
            paused: false,
        }
    }

    pub fn set_touch_multiplier(&mut self, multiplier: f64) {
        self.touch_multiplier = multiplier;
    }

    /// Largest reachable scroll offset (document height minus viewport).
    pub fn set_limit(&mut self, limit: f64) {
        self.limit = limit.max(0.0);
        self.target = self.target.clamp(0.0, self.limit);
    }

    /// While paused, input is ignored and any glide stops where it is.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.glide = None;
            self.target = self.current;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: f64) {
        let target = self.target + delta_y * self.wheel_multiplier;
        self.scroll_to(target, now_ms);
    }

    /// `delta_y` is finger travel in pixels; moving the finger up scrolls down.
    pub fn on_touch_move(&mut self, delta_y: f64, now_ms: f64) {
        let target = self.target - delta_y * self.touch_multiplier;
        self.scroll_to(target, now_ms);
    }

    pub fn scroll_to(&mut self, target: f64, now_ms: f64) {
        if self.paused {
            return;
        }
        self.frame(now_ms);
        self.target = target.clamp(0.0, self.limit);
        self.glide = Some(Glide {
            from: self.current,
            start_ms: now_ms,
        });
    }

    /// Native scrolling (scrollbar drag, keyboard) moved the page while idle.
    pub fn sync_native(&mut self, position: f64) {
        if self.glide.is_none() {
            self.current = position;
            self.target = position;
        }
    }

    /// Position to write this frame, or `None` when idle.
    pub fn frame(&mut self, now_ms: f64) -> Option<f64> {
        let glide = self.glide?;
        let t = progress(now_ms, glide.start_ms, self.duration_ms);
        self.current = lerp(glide.from, self.target, Ease::ExpoOut.apply(t));
        if t >= 1.0 {
            self.current = self.target;
            self.glide = None;
        }
        Some(self.current)
    }

    pub fn is_gliding(&self) -> bool {
        self.glide.is_some()
    }
}

/// Fraction of the document scrolled, `0` at the top and `1` at the bottom.
pub fn scroll_progress(scroll_y: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return 0.0;
    }
    (scroll_y / limit).clamp(0.0, 1.0)
}

/// Hero `(scale, opacity)` for a given scroll progress.
pub fn hero_transform(progress: f64) -> (f64, f64) {
    let scale = interpolate(progress, (0.0, 1.0), (1.0, 0.95));
    let opacity = interpolate(progress, (0.0, 0.3), (1.0, 0.8));
    (scale, opacity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroller() -> SmoothScroll {
        let mut scroll = SmoothScroll::new(&MotionConfig::default(), 2.0);
        scroll.set_limit(5_000.0);
        scroll
    }

    #[test]
    fn wheel_glides_to_target_over_duration() {
        let mut scroll = scroller();
        scroll.on_wheel(400.0, 0.0);

        let early = scroll.frame(100.0).expect("gliding");
        assert!(early > 0.0 && early < 400.0);
        assert_eq!(scroll.frame(1_200.0), Some(400.0));
        assert!(!scroll.is_gliding());
        assert_eq!(scroll.frame(1_300.0), None);
    }

    #[test]
    fn target_is_clamped_to_document() {
        let mut scroll = scroller();
        scroll.on_wheel(-300.0, 0.0);
        assert_eq!(scroll.target, 0.0);

        scroll.on_wheel(90_000.0, 10.0);
        assert_eq!(scroll.target, 5_000.0);

        scroll.set_limit(1_000.0);
        assert_eq!(scroll.target, 1_000.0);
    }

    #[test]
    fn touch_uses_device_multiplier() {
        let mut scroll = scroller();
        scroll.on_touch_move(-100.0, 0.0);
        assert_eq!(scroll.target, 200.0);

        scroll.set_touch_multiplier(1.5);
        scroll.on_touch_move(-100.0, 0.0);
        assert_eq!(scroll.target, 350.0);
    }

    #[test]
    fn new_input_continues_from_current_position() {
        let mut scroll = scroller();
        scroll.on_wheel(1_000.0, 0.0);
        let midway = scroll.frame(300.0).expect("gliding");

        scroll.on_wheel(100.0, 300.0);
        assert_eq!(scroll.frame(300.0), Some(midway));
        assert_eq!(scroll.target, 1_100.0);
    }

    #[test]
    fn native_scroll_is_adopted_only_when_idle() {
        let mut scroll = scroller();
        scroll.sync_native(750.0);
        assert_eq!(scroll.current, 750.0);

        scroll.on_wheel(100.0, 0.0);
        scroll.sync_native(0.0);
        assert_eq!(scroll.target, 850.0);
    }

    #[test]
    fn paused_scroller_ignores_input_until_resumed() {
        let mut scroll = scroller();
        scroll.on_wheel(1_000.0, 0.0);
        let midway = scroll.frame(300.0).expect("gliding");

        scroll.set_paused(true);
        assert!(!scroll.is_gliding());
        assert_eq!(scroll.target, midway);
        assert_eq!(scroll.frame(400.0), None);

        scroll.on_wheel(500.0, 400.0);
        scroll.on_touch_move(-200.0, 400.0);
        scroll.scroll_to(3_000.0, 400.0);
        assert_eq!(scroll.target, midway);
        assert_eq!(scroll.frame(500.0), None);

        scroll.set_paused(false);
        scroll.on_wheel(100.0, 600.0);
        assert_eq!(scroll.target, midway + 100.0);
        assert_eq!(scroll.frame(1_800.0), Some(midway + 100.0));
    }

    #[test]
    fn hero_shrinks_and_fades_with_progress() {
        assert_eq!(hero_transform(0.0), (1.0, 1.0));

        let (scale, opacity) = hero_transform(1.0);
        assert!((scale - 0.95).abs() < 1e-12);
        assert!((opacity - 0.8).abs() < 1e-12);

        let (_, opacity) = hero_transform(0.5);
        assert!((opacity - 0.8).abs() < 1e-12);
    }

    #[test]
    fn progress_is_zero_without_scrollable_content() {
        assert_eq!(scroll_progress(120.0, 0.0), 0.0);
        assert_eq!(scroll_progress(250.0, 1_000.0), 0.25);
        assert_eq!(scroll_progress(2_000.0, 1_000.0), 1.0);
    }
}
