//! Pointer-driven motion: normalized pointer tracking, the spring that
//! smooths the hero parallax, and the magnetic pull of hoverable elements.

use crate::easing::{lerp, progress, Ease};

const SPRING_STEP_S: f64 = 1.0 / 240.0;
const SPRING_MAX_DT_S: f64 = 0.1;
const SPRING_REST_DELTA: f64 = 0.01;
const SPRING_REST_SPEED: f64 = 0.01;

/// Pointer position normalized against the viewport: `-1` at the left/top
/// edge, `0` at the center, `1` at the right/bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
}

impl PointerState {
    pub fn from_client(client_x: f64, client_y: f64, viewport: (f64, f64)) -> Self {
        Self {
            x: normalize_axis(client_x, viewport.0),
            y: normalize_axis(client_y, viewport.1),
        }
    }
}

fn normalize_axis(position: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        return 0.0;
    }
    ((position / extent - 0.5) * 2.0).clamp(-1.0, 1.0)
}

/// Damped spring integrated at a fixed internal step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    pub value: f64,
    pub velocity: f64,
    pub target: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl Spring {
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
            stiffness,
            damping,
            mass: 1.0,
        }
    }

    pub fn step(&mut self, dt_s: f64) {
        let mut remaining = dt_s.clamp(0.0, SPRING_MAX_DT_S);
        while remaining > 0.0 {
            let h = remaining.min(SPRING_STEP_S);
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }

        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < SPRING_REST_DELTA
            && self.velocity.abs() < SPRING_REST_SPEED
    }
}

/// Hero image offset that follows the pointer in the opposite direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    x: Spring,
    y: Spring,
    range_px: f64,
}

impl Parallax {
    pub fn new(range_px: f64) -> Self {
        Self {
            x: Spring::new(100.0, 20.0),
            y: Spring::new(100.0, 20.0),
            range_px,
        }
    }

    pub fn aim(&mut self, pointer: PointerState) {
        self.x.target = pointer.x;
        self.y.target = pointer.y;
    }

    /// Advances both springs and reports whether they are still moving.
    pub fn step(&mut self, dt_s: f64) -> bool {
        self.x.step(dt_s);
        self.y.step(dt_s);
        !(self.x.is_settled() && self.y.is_settled())
    }

    /// Pixel offset, mapping spring values `[-1, 1]` onto `[range, -range]`.
    pub fn offset(&self) -> (f64, f64) {
        (
            parallax_axis(self.x.value, self.range_px),
            parallax_axis(self.y.value, self.range_px),
        )
    }
}

fn parallax_axis(value: f64, range_px: f64) -> f64 {
    let offset = crate::easing::interpolate(value, (-1.0, 1.0), (range_px, -range_px));
    // Avoid emitting "-0px" into transforms.
    if offset == 0.0 {
        0.0
    } else {
        offset
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Offset an element should move toward the pointer: `strength` times the
/// pointer's distance from the element's center.
pub fn magnetic_pull(pointer: (f64, f64), rect: Rect, strength: f64) -> (f64, f64) {
    let dx = pointer.0 - rect.left - rect.width / 2.0;
    let dy = pointer.1 - rect.top - rect.height / 2.0;
    (dx * strength, dy * strength)
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Tween {
    from: (f64, f64),
    to: (f64, f64),
    start_ms: f64,
    duration_ms: f64,
    ease: Ease,
}

impl Tween {
    fn sample(&self, now_ms: f64) -> ((f64, f64), bool) {
        let t = progress(now_ms, self.start_ms, self.duration_ms);
        let eased = self.ease.apply(t);
        let position = (
            lerp(self.from.0, self.to.0, eased),
            lerp(self.from.1, self.to.1, eased),
        );
        (position, t >= 1.0)
    }
}

/// Translation state of one magnetic element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MagneticMotion {
    position: (f64, f64),
    tween: Option<Tween>,
    attract_ms: f64,
    release_ms: f64,
}

impl MagneticMotion {
    pub fn new(attract_ms: f64, release_ms: f64) -> Self {
        Self {
            position: (0.0, 0.0),
            tween: None,
            attract_ms,
            release_ms,
        }
    }

    /// Retargets toward `target`, starting from wherever the element is now.
    pub fn attract(&mut self, target: (f64, f64), now_ms: f64) {
        self.retarget(target, now_ms, self.attract_ms, Ease::Power2Out);
    }

    pub fn release(&mut self, now_ms: f64) {
        self.retarget((0.0, 0.0), now_ms, self.release_ms, Ease::RELEASE);
    }

    fn retarget(&mut self, to: (f64, f64), now_ms: f64, duration_ms: f64, ease: Ease) {
        self.sample(now_ms);
        self.tween = Some(Tween {
            from: self.position,
            to,
            start_ms: now_ms,
            duration_ms,
            ease,
        });
    }

    /// Current translation; the tween is dropped once finished.
    pub fn sample(&mut self, now_ms: f64) -> (f64, f64) {
        if let Some(tween) = self.tween {
            let (position, finished) = tween.sample(now_ms);
            self.position = position;
            if finished {
                self.tween = None;
            }
        }
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_normalized_against_viewport() {
        let pointer = PointerState::from_client(0.0, 720.0, (1_280.0, 720.0));
        assert_eq!(pointer, PointerState { x: -1.0, y: 1.0 });

        let centered = PointerState::from_client(640.0, 360.0, (1_280.0, 720.0));
        assert_eq!(centered, PointerState { x: 0.0, y: 0.0 });
    }

    #[test]
    fn zero_sized_viewport_reads_as_center() {
        let pointer = PointerState::from_client(100.0, 100.0, (0.0, 0.0));
        assert_eq!(pointer, PointerState::default());
    }

    #[test]
    fn spring_settles_on_target() {
        let mut spring = Spring::new(100.0, 20.0);
        spring.target = 1.0;

        for _ in 0..240 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert_eq!(spring.value, 1.0);
    }

    #[test]
    fn pointer_at_screen_center_gives_no_parallax() {
        let mut parallax = Parallax::new(30.0);
        parallax.aim(PointerState::from_client(-400.0, 900.0, (1_000.0, 800.0)));
        for _ in 0..30 {
            parallax.step(1.0 / 60.0);
        }

        parallax.aim(PointerState::from_client(500.0, 400.0, (1_000.0, 800.0)));
        let mut frames = 0;
        while parallax.step(1.0 / 60.0) {
            frames += 1;
            assert!(frames < 1_000, "parallax never settled");
        }

        assert_eq!(parallax.offset(), (0.0, 0.0));
    }

    #[test]
    fn parallax_moves_against_pointer() {
        let mut parallax = Parallax::new(30.0);
        parallax.aim(PointerState { x: 1.0, y: -1.0 });
        while parallax.step(1.0 / 60.0) {}

        assert_eq!(parallax.offset(), (-30.0, 30.0));
    }

    #[test]
    fn magnetic_pull_is_quarter_of_center_offset() {
        let rect = Rect {
            left: 100.0,
            top: 100.0,
            width: 200.0,
            height: 100.0,
        };

        assert_eq!(magnetic_pull((200.0, 150.0), rect, 0.25), (0.0, 0.0));
        assert_eq!(magnetic_pull((300.0, 110.0), rect, 0.25), (25.0, -10.0));
    }

    #[test]
    fn magnetic_motion_springs_back_to_rest() {
        let mut motion = MagneticMotion::new(400.0, 600.0);
        motion.attract((20.0, -8.0), 0.0);
        assert_eq!(motion.sample(400.0), (20.0, -8.0));
        assert!(!motion.is_animating());

        motion.release(1_000.0);
        assert!(motion.is_animating());
        assert_eq!(motion.sample(1_600.0), (0.0, 0.0));
        assert!(!motion.is_animating());
    }

    #[test]
    fn retargeting_starts_from_current_position() {
        let mut motion = MagneticMotion::new(400.0, 600.0);
        motion.attract((40.0, 0.0), 0.0);
        let midway = motion.sample(200.0);
        assert!(midway.0 > 0.0 && midway.0 < 40.0);

        motion.release(200.0);
        assert_eq!(motion.sample(200.0), midway);
    }
}
