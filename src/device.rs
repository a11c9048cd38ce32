use crate::config::MotionConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    /// Narrow viewports and anything with touch input count as mobile.
    pub fn classify(viewport_width: f64, has_touch: bool, breakpoint_px: f64) -> Self {
        if viewport_width < breakpoint_px || has_touch {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Desktop => "desktop",
        }
    }

    pub fn touch_multiplier(self, config: &MotionConfig) -> f64 {
        match self {
            Self::Mobile => config.touch_multiplier_mobile,
            Self::Desktop => config.touch_multiplier_desktop,
        }
    }

    /// Cursor overlays, pointer parallax and magnetic pulls only run on desktop.
    pub fn pointer_effects_enabled(self) -> bool {
        !self.is_mobile()
    }

    pub fn hover_effects_enabled(self) -> bool {
        !self.is_mobile()
    }

    pub fn cursor_display(self) -> &'static str {
        match self {
            Self::Mobile => "none",
            Self::Desktop => "block",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BREAKPOINT: f64 = 968.0;

    #[test]
    fn narrow_viewport_is_mobile() {
        assert_eq!(DeviceClass::classify(967.0, false, BREAKPOINT), DeviceClass::Mobile);
        assert_eq!(DeviceClass::classify(968.0, false, BREAKPOINT), DeviceClass::Desktop);
    }

    #[test]
    fn touch_forces_mobile_at_any_width() {
        assert_eq!(DeviceClass::classify(2_560.0, true, BREAKPOINT), DeviceClass::Mobile);
    }

    #[test]
    fn resizing_across_breakpoint_flips_class_and_hides_cursor() {
        let wide = DeviceClass::classify(1_200.0, false, BREAKPOINT);
        assert!(!wide.is_mobile());
        assert_eq!(wide.cursor_display(), "block");

        let narrow = DeviceClass::classify(800.0, false, BREAKPOINT);
        assert!(narrow.is_mobile());
        assert_eq!(narrow.cursor_display(), "none");
        assert!(!narrow.pointer_effects_enabled());

        let wide_again = DeviceClass::classify(1_200.0, false, BREAKPOINT);
        assert_eq!(wide_again, wide);
    }

    #[test]
    fn touch_multiplier_follows_class() {
        let config = MotionConfig::default();

        assert_eq!(DeviceClass::Mobile.touch_multiplier(&config), 1.5);
        assert_eq!(DeviceClass::Desktop.touch_multiplier(&config), 2.0);
    }
}
