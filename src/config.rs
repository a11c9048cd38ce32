use serde::Deserialize;

const DEFAULT_PARTICLE_BURST_COUNT: u32 = 40;
const DEFAULT_PARTICLE_BURST_STAGGER_MS: f64 = 150.0;
const DEFAULT_PARTICLE_SPAWN_INTERVAL_MS: f64 = 2_500.0;
const DEFAULT_PARTICLE_LIFETIME_MS: f64 = 40_000.0;
const DEFAULT_RIPPLE_LIFETIME_MS: f64 = 800.0;
const DEFAULT_FOLLOWER_SMOOTHING: f64 = 0.08;
const DEFAULT_MAGNETIC_STRENGTH: f64 = 0.25;
const DEFAULT_MAGNETIC_ATTRACT_MS: f64 = 400.0;
const DEFAULT_MAGNETIC_RELEASE_MS: f64 = 600.0;
const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 968.0;
const DEFAULT_TOUCH_MULTIPLIER_MOBILE: f64 = 1.5;
const DEFAULT_TOUCH_MULTIPLIER_DESKTOP: f64 = 2.0;
const DEFAULT_WHEEL_MULTIPLIER: f64 = 1.0;
const DEFAULT_SCROLL_DURATION_MS: f64 = 1_200.0;
const DEFAULT_SKILL_FILL_DURATION_MS: f64 = 2_000.0;
const DEFAULT_SKILL_FILL_STAGGER_MS: f64 = 200.0;
const DEFAULT_SKILL_TRIGGER_FRACTION: f64 = 0.85;
const DEFAULT_HEADER_REVEAL_MARGIN_PX: f64 = 100.0;
const DEFAULT_CARD_REVEAL_MARGIN_PX: f64 = 50.0;
const DEFAULT_PARALLAX_RANGE_PX: f64 = 30.0;

const PARTICLE_BURST_COUNT_BOUNDS: (u32, u32) = (0, 200);
const PARTICLE_BURST_STAGGER_MS_BOUNDS: (f64, f64) = (0.0, 5_000.0);
const PARTICLE_SPAWN_INTERVAL_MS_BOUNDS: (f64, f64) = (100.0, 60_000.0);
const PARTICLE_LIFETIME_MS_BOUNDS: (f64, f64) = (1_000.0, 300_000.0);
const RIPPLE_LIFETIME_MS_BOUNDS: (f64, f64) = (50.0, 10_000.0);
const FOLLOWER_SMOOTHING_BOUNDS: (f64, f64) = (0.01, 1.0);
const MAGNETIC_STRENGTH_BOUNDS: (f64, f64) = (0.0, 1.0);
const MAGNETIC_DURATION_MS_BOUNDS: (f64, f64) = (16.0, 5_000.0);
const MOBILE_BREAKPOINT_PX_BOUNDS: (f64, f64) = (320.0, 4_096.0);
const MULTIPLIER_BOUNDS: (f64, f64) = (0.1, 10.0);
const SCROLL_DURATION_MS_BOUNDS: (f64, f64) = (100.0, 5_000.0);
const SKILL_FILL_DURATION_MS_BOUNDS: (f64, f64) = (100.0, 10_000.0);
const SKILL_FILL_STAGGER_MS_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const FRACTION_BOUNDS: (f64, f64) = (0.0, 1.0);
const REVEAL_MARGIN_PX_BOUNDS: (f64, f64) = (0.0, 1_000.0);
const PARALLAX_RANGE_PX_BOUNDS: (f64, f64) = (0.0, 200.0);

/// Tuning for every decorative behavior on the page.
///
/// Read from the `motion` key of the content document. Missing keys take
/// their defaults; [`MotionConfig::sanitized`] replaces any value outside its
/// accepted range with the default.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    pub particle_burst_count: u32,
    pub particle_burst_stagger_ms: f64,
    pub particle_spawn_interval_ms: f64,
    pub particle_lifetime_ms: f64,
    pub ripple_lifetime_ms: f64,
    pub follower_smoothing: f64,
    pub magnetic_strength: f64,
    pub magnetic_attract_ms: f64,
    pub magnetic_release_ms: f64,
    pub mobile_breakpoint_px: f64,
    pub touch_multiplier_mobile: f64,
    pub touch_multiplier_desktop: f64,
    pub wheel_multiplier: f64,
    pub scroll_duration_ms: f64,
    pub skill_fill_duration_ms: f64,
    pub skill_fill_stagger_ms: f64,
    pub skill_trigger_fraction: f64,
    pub header_reveal_margin_px: f64,
    pub card_reveal_margin_px: f64,
    pub parallax_range_px: f64,
    pub respect_reduced_motion: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            particle_burst_count: DEFAULT_PARTICLE_BURST_COUNT,
            particle_burst_stagger_ms: DEFAULT_PARTICLE_BURST_STAGGER_MS,
            particle_spawn_interval_ms: DEFAULT_PARTICLE_SPAWN_INTERVAL_MS,
            particle_lifetime_ms: DEFAULT_PARTICLE_LIFETIME_MS,
            ripple_lifetime_ms: DEFAULT_RIPPLE_LIFETIME_MS,
            follower_smoothing: DEFAULT_FOLLOWER_SMOOTHING,
            magnetic_strength: DEFAULT_MAGNETIC_STRENGTH,
            magnetic_attract_ms: DEFAULT_MAGNETIC_ATTRACT_MS,
            magnetic_release_ms: DEFAULT_MAGNETIC_RELEASE_MS,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            touch_multiplier_mobile: DEFAULT_TOUCH_MULTIPLIER_MOBILE,
            touch_multiplier_desktop: DEFAULT_TOUCH_MULTIPLIER_DESKTOP,
            wheel_multiplier: DEFAULT_WHEEL_MULTIPLIER,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
            skill_fill_duration_ms: DEFAULT_SKILL_FILL_DURATION_MS,
            skill_fill_stagger_ms: DEFAULT_SKILL_FILL_STAGGER_MS,
            skill_trigger_fraction: DEFAULT_SKILL_TRIGGER_FRACTION,
            header_reveal_margin_px: DEFAULT_HEADER_REVEAL_MARGIN_PX,
            card_reveal_margin_px: DEFAULT_CARD_REVEAL_MARGIN_PX,
            parallax_range_px: DEFAULT_PARALLAX_RANGE_PX,
            respect_reduced_motion: true,
        }
    }
}

impl MotionConfig {
    pub fn sanitized(self) -> Self {
        Self {
            particle_burst_count: within(
                self.particle_burst_count,
                DEFAULT_PARTICLE_BURST_COUNT,
                PARTICLE_BURST_COUNT_BOUNDS,
            ),
            particle_burst_stagger_ms: within(
                self.particle_burst_stagger_ms,
                DEFAULT_PARTICLE_BURST_STAGGER_MS,
                PARTICLE_BURST_STAGGER_MS_BOUNDS,
            ),
            particle_spawn_interval_ms: within(
                self.particle_spawn_interval_ms,
                DEFAULT_PARTICLE_SPAWN_INTERVAL_MS,
                PARTICLE_SPAWN_INTERVAL_MS_BOUNDS,
            ),
            particle_lifetime_ms: within(
                self.particle_lifetime_ms,
                DEFAULT_PARTICLE_LIFETIME_MS,
                PARTICLE_LIFETIME_MS_BOUNDS,
            ),
            ripple_lifetime_ms: within(
                self.ripple_lifetime_ms,
                DEFAULT_RIPPLE_LIFETIME_MS,
                RIPPLE_LIFETIME_MS_BOUNDS,
            ),
            follower_smoothing: within(
                self.follower_smoothing,
                DEFAULT_FOLLOWER_SMOOTHING,
                FOLLOWER_SMOOTHING_BOUNDS,
            ),
            magnetic_strength: within(
                self.magnetic_strength,
                DEFAULT_MAGNETIC_STRENGTH,
                MAGNETIC_STRENGTH_BOUNDS,
            ),
            magnetic_attract_ms: within(
                self.magnetic_attract_ms,
                DEFAULT_MAGNETIC_ATTRACT_MS,
                MAGNETIC_DURATION_MS_BOUNDS,
            ),
            magnetic_release_ms: within(
                self.magnetic_release_ms,
                DEFAULT_MAGNETIC_RELEASE_MS,
                MAGNETIC_DURATION_MS_BOUNDS,
            ),
            mobile_breakpoint_px: within(
                self.mobile_breakpoint_px,
                DEFAULT_MOBILE_BREAKPOINT_PX,
                MOBILE_BREAKPOINT_PX_BOUNDS,
            ),
            touch_multiplier_mobile: within(
                self.touch_multiplier_mobile,
                DEFAULT_TOUCH_MULTIPLIER_MOBILE,
                MULTIPLIER_BOUNDS,
            ),
            touch_multiplier_desktop: within(
                self.touch_multiplier_desktop,
                DEFAULT_TOUCH_MULTIPLIER_DESKTOP,
                MULTIPLIER_BOUNDS,
            ),
            wheel_multiplier: within(
                self.wheel_multiplier,
                DEFAULT_WHEEL_MULTIPLIER,
                MULTIPLIER_BOUNDS,
            ),
            scroll_duration_ms: within(
                self.scroll_duration_ms,
                DEFAULT_SCROLL_DURATION_MS,
                SCROLL_DURATION_MS_BOUNDS,
            ),
            skill_fill_duration_ms: within(
                self.skill_fill_duration_ms,
                DEFAULT_SKILL_FILL_DURATION_MS,
                SKILL_FILL_DURATION_MS_BOUNDS,
            ),
            skill_fill_stagger_ms: within(
                self.skill_fill_stagger_ms,
                DEFAULT_SKILL_FILL_STAGGER_MS,
                SKILL_FILL_STAGGER_MS_BOUNDS,
            ),
            skill_trigger_fraction: within(
                self.skill_trigger_fraction,
                DEFAULT_SKILL_TRIGGER_FRACTION,
                FRACTION_BOUNDS,
            ),
            header_reveal_margin_px: within(
                self.header_reveal_margin_px,
                DEFAULT_HEADER_REVEAL_MARGIN_PX,
                REVEAL_MARGIN_PX_BOUNDS,
            ),
            card_reveal_margin_px: within(
                self.card_reveal_margin_px,
                DEFAULT_CARD_REVEAL_MARGIN_PX,
                REVEAL_MARGIN_PX_BOUNDS,
            ),
            parallax_range_px: within(
                self.parallax_range_px,
                DEFAULT_PARALLAX_RANGE_PX,
                PARALLAX_RANGE_PX_BOUNDS,
            ),
            respect_reduced_motion: self.respect_reduced_motion,
        }
    }
}

// NaN never satisfies the range check, so it falls back too.
fn within<T: PartialOrd + Copy>(value: T, default: T, bounds: (T, T)) -> T {
    if value >= bounds.0 && value <= bounds.1 {
        value
    } else {
        default
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn parse_or(value: Option<&str>, default: LogLevel) -> LogLevel {
        match value
            .map(|raw| raw.trim().to_ascii_lowercase())
            .unwrap_or_default()
            .as_str()
        {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => default,
        }
    }

    pub fn as_log_level(self) -> log::Level {
        match self {
            Self::Debug => log::Level::Debug,
            Self::Info => log::Level::Info,
            Self::Warn => log::Level::Warn,
            Self::Error => log::Level::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let parsed: MotionConfig =
            serde_json::from_str(r#"{ "particleBurstCount": 12 }"#).expect("valid motion json");

        assert_eq!(parsed.particle_burst_count, 12);
        assert_eq!(parsed.particle_spawn_interval_ms, DEFAULT_PARTICLE_SPAWN_INTERVAL_MS);
        assert_eq!(parsed.particle_lifetime_ms, DEFAULT_PARTICLE_LIFETIME_MS);
        assert!(parsed.respect_reduced_motion);
    }

    #[test]
    fn out_of_range_values_fall_back_to_defaults() {
        let config = MotionConfig {
            particle_spawn_interval_ms: 5.0,
            follower_smoothing: 3.0,
            mobile_breakpoint_px: f64::NAN,
            particle_burst_count: 10_000,
            ..MotionConfig::default()
        }
        .sanitized();

        assert_eq!(config.particle_spawn_interval_ms, DEFAULT_PARTICLE_SPAWN_INTERVAL_MS);
        assert_eq!(config.follower_smoothing, DEFAULT_FOLLOWER_SMOOTHING);
        assert_eq!(config.mobile_breakpoint_px, DEFAULT_MOBILE_BREAKPOINT_PX);
        assert_eq!(config.particle_burst_count, DEFAULT_PARTICLE_BURST_COUNT);
    }

    #[test]
    fn in_range_values_survive_sanitizing() {
        let config = MotionConfig {
            particle_spawn_interval_ms: 1_000.0,
            magnetic_strength: 0.5,
            ..MotionConfig::default()
        }
        .sanitized();

        assert_eq!(config.particle_spawn_interval_ms, 1_000.0);
        assert_eq!(config.magnetic_strength, 0.5);
    }

    #[test]
    fn log_level_parsing_falls_back_on_unknown_values() {
        assert_eq!(LogLevel::parse_or(Some(" DEBUG "), LogLevel::Info), LogLevel::Debug);
        assert_eq!(LogLevel::parse_or(Some("verbose"), LogLevel::Info), LogLevel::Info);
        assert_eq!(LogLevel::parse_or(None, LogLevel::Warn), LogLevel::Warn);
    }
}
