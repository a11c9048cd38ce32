use std::f64::consts::PI;

/// Easing curves used by the page's tweens. Every curve maps progress in
/// `[0, 1]` to eased progress, starting at 0 and landing on exactly 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Ease {
    Linear,
    /// Cubic ease-out.
    Power2Out,
    /// Overshooting spring-back.
    ElasticOut { amplitude: f64, period: f64 },
    /// Exponential approach used by the smooth-scroll driver.
    ExpoOut,
}

impl Ease {
    pub const RELEASE: Ease = Ease::ElasticOut {
        amplitude: 1.0,
        period: 0.3,
    };

    pub fn apply(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::ElasticOut { amplitude, period } => elastic_out(t, amplitude, period),
            Self::ExpoOut => (1.001 - 2f64.powf(-10.0 * t)).min(1.0),
        }
    }
}

fn elastic_out(t: f64, amplitude: f64, period: f64) -> f64 {
    let amplitude = amplitude.max(1.0);
    let shift = period / (2.0 * PI) * (1.0 / amplitude).asin();
    amplitude * 2f64.powf(-10.0 * t) * ((t - shift) * (2.0 * PI) / period).sin() + 1.0
}

/// Progress of a tween that started at `start_ms`, clamped to `[0, 1]`.
pub fn progress(now_ms: f64, start_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    ((now_ms - start_ms) / duration_ms).clamp(0.0, 1.0)
}

pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Maps `value` from `input` onto `output`, clamping at both ends.
pub fn interpolate(value: f64, input: (f64, f64), output: (f64, f64)) -> f64 {
    let span = input.1 - input.0;
    if span == 0.0 {
        return output.1;
    }
    let t = ((value - input.0) / span).clamp(0.0, 1.0);
    lerp(output.0, output.1, t)
}
