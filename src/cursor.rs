/// Trailing cursor ring: each frame it closes a fixed fraction of the gap
/// to the live pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follower {
    pub x: f64,
    pub y: f64,
}

impl Follower {
    pub fn step(&mut self, target: (f64, f64), smoothing: f64) -> (f64, f64) {
        self.x += (target.0 - self.x) * smoothing;
        self.y += (target.1 - self.y) * smoothing;
        (self.x, self.y)
    }
}

pub fn translate_centered(x: f64, y: f64) -> String {
    format!("translate({x:.2}px, {y:.2}px) translate(-50%, -50%)")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub id: u64,
    pub x: f64,
    pub y: f64,
    pub born_at_ms: f64,
}

impl Ripple {
    pub fn style(&self) -> String {
        format!("left: {:.0}px; top: {:.0}px;", self.x, self.y)
    }
}

/// Click ripples waiting for their lifetime to run out.
#[derive(Clone, Debug, PartialEq)]
pub struct RippleSet {
    lifetime_ms: f64,
    next_id: u64,
    ripples: Vec<Ripple>,
}

impl RippleSet {
    pub fn new(lifetime_ms: f64) -> Self {
        Self {
            lifetime_ms,
            next_id: 0,
            ripples: Vec::new(),
        }
    }

    pub fn spawn(&mut self, x: f64, y: f64, now_ms: f64) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.ripples.push(Ripple {
            id,
            x,
            y,
            born_at_ms: now_ms,
        });
        id
    }

    /// Drops ripples whose lifetime has fully elapsed; returns whether any went.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        let lifetime = self.lifetime_ms;
        let before = self.ripples.len();
        self.ripples
            .retain(|ripple| now_ms - ripple.born_at_ms < lifetime);
        before != self.ripples.len()
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_closes_eight_percent_per_frame() {
        let mut follower = Follower::default();

        let (x, y) = follower.step((100.0, -50.0), 0.08);
        assert!((x - 8.0).abs() < 1e-9);
        assert!((y + 4.0).abs() < 1e-9);

        let (x, _) = follower.step((100.0, -50.0), 0.08);
        assert!((x - 15.36).abs() < 1e-9);
    }

    #[test]
    fn follower_converges_on_a_still_pointer() {
        let mut follower = Follower::default();
        for _ in 0..400 {
            follower.step((640.0, 360.0), 0.08);
        }

        assert!((follower.x - 640.0).abs() < 0.01);
        assert!((follower.y - 360.0).abs() < 0.01);
    }

    #[test]
    fn click_ripple_lives_exactly_eight_hundred_ms() {
        let mut ripples = RippleSet::new(800.0);
        ripples.spawn(100.0, 200.0, 1_000.0);

        assert_eq!(ripples.ripples().len(), 1);
        assert_eq!((ripples.ripples()[0].x, ripples.ripples()[0].y), (100.0, 200.0));

        assert!(!ripples.expire(1_799.0));
        assert_eq!(ripples.ripples().len(), 1);

        assert!(ripples.expire(1_800.0));
        assert!(ripples.ripples().is_empty());
    }

    #[test]
    fn ripples_expire_independently() {
        let mut ripples = RippleSet::new(800.0);
        let first = ripples.spawn(0.0, 0.0, 0.0);
        let second = ripples.spawn(10.0, 10.0, 500.0);
        assert_ne!(first, second);

        ripples.expire(800.0);
        let left: Vec<u64> = ripples.ripples().iter().map(|ripple| ripple.id).collect();
        assert_eq!(left, vec![second]);
    }

    #[test]
    fn transform_centers_element_on_point() {
        assert_eq!(
            translate_centered(12.5, 40.0),
            "translate(12.50px, 40.00px) translate(-50%, -50%)"
        );
    }
}
