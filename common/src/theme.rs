//! Palette and tier-dependent text styles.
//!
//! # Palette
//!
//! Colors are `Rgb565`, the native format of small SPI panels. Standard
//! colors come from the `RgbColor` trait.
//!
//! # Text Styles
//!
//! Every text role has one ProFont face per device tier, stored as a
//! `const` [`TieredValue`] table and resolved through the same fallback
//! chain as every other layout value. The tables only list the tiers where
//! the face actually changes.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use profont::{
    PROFONT_7_POINT,
    PROFONT_9_POINT,
    PROFONT_10_POINT,
    PROFONT_12_POINT,
    PROFONT_14_POINT,
    PROFONT_18_POINT,
    PROFONT_24_POINT,
};

use crate::accel_timer::TimerState;
use crate::responsive::{DeviceTier, Orientation, TieredValue, Viewport, resolve};
use crate::thresholds::SPEED_WARNING_RATIO;

// =============================================================================
// Standard Colors (from RgbColor trait)
// =============================================================================

/// Pure white. Default text and readout color.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red. Over the speed limit, errors.
pub const RED: Rgb565 = Rgb565::RED;

/// Pure green. Comfortably below the limit, finished runs.
pub const GREEN: Rgb565 = Rgb565::GREEN;

/// Pure yellow. Approaching the limit, warnings, armed timer.
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

// =============================================================================
// Custom Colors
// =============================================================================

/// Orange for a running timer.
/// RGB565: (31, 32, 0) - slightly darker than yellow.
pub const ORANGE: Rgb565 = Rgb565::new(31, 32, 0);

/// Dark gray for inactive elements and debug log lines.
/// RGB565: (8, 16, 8) - roughly 25% brightness.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Readout color for the current speed against an optional limit (both m/s).
pub fn speed_color(
    speed_mps: f32,
    limit_mps: Option<f32>,
) -> Rgb565 {
    match limit_mps {
        None => WHITE,
        Some(limit) if speed_mps > limit => RED,
        Some(limit) if speed_mps >= limit * SPEED_WARNING_RATIO => YELLOW,
        Some(_) => GREEN,
    }
}

/// Stopwatch color for a timer state.
pub const fn timer_color(state: TimerState) -> Rgb565 {
    match state {
        TimerState::Idle => GRAY,
        TimerState::Armed { .. } => YELLOW,
        TimerState::Running { .. } => ORANGE,
        TimerState::Finished(_) => GREEN,
    }
}

// =============================================================================
// Text Roles
// =============================================================================

/// What a piece of text is used for.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TextRole {
    /// Units, axis labels, log lines.
    Caption,
    /// Menu entries and history rows.
    Body,
    /// Screen titles.
    Title,
    /// The large speed / stopwatch digits.
    SpeedReadout,
}

const CAPTION_FONTS: TieredValue<&MonoFont<'static>> = TieredValue::from_slots(
    Some(&PROFONT_7_POINT),
    &PROFONT_9_POINT,
    None,
    Some(&PROFONT_10_POINT),
    Some(&PROFONT_12_POINT),
    None,
);

const BODY_FONTS: TieredValue<&MonoFont<'static>> = TieredValue::from_slots(
    Some(&PROFONT_9_POINT),
    &PROFONT_10_POINT,
    Some(&PROFONT_12_POINT),
    None,
    Some(&PROFONT_14_POINT),
    None,
);

const TITLE_FONTS: TieredValue<&MonoFont<'static>> = TieredValue::from_slots(
    None,
    &PROFONT_12_POINT,
    Some(&PROFONT_14_POINT),
    None,
    Some(&PROFONT_18_POINT),
    None,
);

const READOUT_FONTS: TieredValue<&MonoFont<'static>> = TieredValue::from_slots(
    Some(&PROFONT_14_POINT),
    &PROFONT_18_POINT,
    None,
    Some(&PROFONT_24_POINT),
    None,
    None,
);

impl TextRole {
    const fn fonts(self) -> &'static TieredValue<&'static MonoFont<'static>> {
        match self {
            Self::Caption => &CAPTION_FONTS,
            Self::Body => &BODY_FONTS,
            Self::Title => &TITLE_FONTS,
            Self::SpeedReadout => &READOUT_FONTS,
        }
    }
}

/// Font for `role` on a `tier` device.
#[inline]
pub fn font_for(
    role: TextRole,
    tier: DeviceTier,
) -> &'static MonoFont<'static> {
    resolve(tier, role.fonts())
}

/// Text style for `role` on a `tier` device in `color`.
#[inline]
pub fn text_style(
    role: TextRole,
    tier: DeviceTier,
    color: Rgb565,
) -> MonoTextStyle<'static, Rgb565> {
    MonoTextStyle::new(font_for(role, tier), color)
}

// =============================================================================
// Spacing
// =============================================================================

/// Outer screen padding (dp).
const PADDING: TieredValue<u32> = TieredValue::from_slots(Some(4), 8, Some(12), Some(16), Some(24), Some(32));

/// Gap between stacked widgets (dp).
const SPACING: TieredValue<u32> = TieredValue::from_slots(None, 8, Some(10), None, Some(16), None);

/// Square icon edge (dp).
const ICON_SIZE: TieredValue<u32> = TieredValue::from_slots(Some(16), 20, None, Some(24), Some(32), None);

/// Outer screen padding for `tier` (dp).
#[inline]
pub fn padding(tier: DeviceTier) -> u32 { resolve(tier, &PADDING) }

/// Gap between stacked widgets for `tier` (dp).
#[inline]
pub fn spacing(tier: DeviceTier) -> u32 { resolve(tier, &SPACING) }

/// Icon edge length for `tier` (dp).
#[inline]
pub fn icon_size(tier: DeviceTier) -> u32 { resolve(tier, &ICON_SIZE) }

// =============================================================================
// Screen Layout
// =============================================================================

/// Base size of the speed digits before width scaling (dp).
const READOUT_BASE_SIZE: f32 = 24.0;

/// Everything the speedometer screen needs to size its widgets.
#[derive(Clone, Copy)]
pub struct Layout {
    /// Classified device tier.
    pub tier: DeviceTier,
    /// Viewport orientation.
    pub orientation: Orientation,
    /// Outer padding (dp).
    pub padding: u32,
    /// Gap between widgets (dp).
    pub spacing: u32,
    /// Icon edge (dp).
    pub icon_size: u32,
    /// Caption font.
    pub caption_font: &'static MonoFont<'static>,
    /// Body font.
    pub body_font: &'static MonoFont<'static>,
    /// Title font.
    pub title_font: &'static MonoFont<'static>,
    /// Speed readout font.
    pub readout_font: &'static MonoFont<'static>,
    /// Width-scaled readout size for vector text renderers (dp).
    pub readout_size: f32,
    /// Diameter of the round gauge (dp).
    pub gauge_diameter: f32,
}

impl Layout {
    /// Resolve the layout for a viewport.
    pub fn for_viewport(viewport: &Viewport) -> Self {
        let tier = viewport.tier();
        let orientation = viewport.orientation();

        // The gauge fills most of the short side, leaving room for the
        // timer panel below (portrait) or beside it (landscape).
        let gauge_diameter = match orientation {
            Orientation::Portrait => viewport.width_percent(80.0).min(viewport.height_percent(45.0)),
            Orientation::Landscape => viewport.height_percent(80.0).min(viewport.width_percent(45.0)),
        };

        Self {
            tier,
            orientation,
            padding: padding(tier),
            spacing: spacing(tier),
            icon_size: icon_size(tier),
            caption_font: font_for(TextRole::Caption, tier),
            body_font: font_for(TextRole::Body, tier),
            title_font: font_for(TextRole::Title, tier),
            readout_font: font_for(TextRole::SpeedReadout, tier),
            readout_size: viewport.scaled_font_size(READOUT_BASE_SIZE),
            gauge_diameter,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel_timer::{AccelPreset, AccelResult};

    fn same_font(
        a: &MonoFont<'static>,
        b: &MonoFont<'static>,
    ) -> bool {
        core::ptr::eq(a, b) || a.character_size == b.character_size
    }

    #[test]
    fn test_speed_color_zones() {
        let limit = Some(30.0);
        assert_eq!(speed_color(10.0, limit), GREEN);
        assert_eq!(speed_color(26.9, limit), GREEN);
        assert_eq!(speed_color(27.0, limit), YELLOW);
        assert_eq!(speed_color(30.0, limit), YELLOW);
        assert_eq!(speed_color(30.1, limit), RED);
        assert_eq!(speed_color(50.0, None), WHITE);
    }

    #[test]
    fn test_timer_colors() {
        assert_eq!(timer_color(TimerState::Idle), GRAY);
        assert_eq!(timer_color(TimerState::Armed { ready: true }), YELLOW);
        assert_eq!(timer_color(TimerState::Running { start_ms: 0 }), ORANGE);
        let result = AccelResult {
            preset: AccelPreset::ZeroToHundredKmh,
            elapsed_ms: 6000,
            start_timestamp_ms: 0,
            peak_speed_mps: 28.0,
        };
        assert_eq!(timer_color(TimerState::Finished(result)), GREEN);
    }

    #[test]
    fn test_readout_font_fallbacks() {
        // Medium phones fall back to the small phone face
        assert!(same_font(font_for(TextRole::SpeedReadout, DeviceTier::MediumPhone), &PROFONT_18_POINT));
        assert!(same_font(font_for(TextRole::SpeedReadout, DeviceTier::LargePhone), &PROFONT_24_POINT));
        // Tablet and desktop degrade to the large phone face
        assert!(same_font(font_for(TextRole::SpeedReadout, DeviceTier::Desktop), &PROFONT_24_POINT));
        assert!(same_font(font_for(TextRole::SpeedReadout, DeviceTier::ExtraSmallPhone), &PROFONT_14_POINT));
    }

    #[test]
    fn test_title_extra_small_uses_small_face() {
        assert!(same_font(font_for(TextRole::Title, DeviceTier::ExtraSmallPhone), &PROFONT_12_POINT));
        assert!(same_font(font_for(TextRole::Title, DeviceTier::LargePhone), &PROFONT_14_POINT));
    }

    #[test]
    fn test_fonts_never_shrink_with_tier() {
        for role in [TextRole::Caption, TextRole::Body, TextRole::Title, TextRole::SpeedReadout] {
            for pair in DeviceTier::ALL.windows(2) {
                let smaller = font_for(role, pair[0]).character_size.height;
                let larger = font_for(role, pair[1]).character_size.height;
                assert!(smaller <= larger, "{role:?}: {:?} -> {:?}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn test_spacing_tables() {
        assert_eq!(padding(DeviceTier::ExtraSmallPhone), 4);
        assert_eq!(padding(DeviceTier::Desktop), 32);
        assert_eq!(spacing(DeviceTier::LargePhone), 10);
        assert_eq!(spacing(DeviceTier::Desktop), 16);
        assert_eq!(spacing(DeviceTier::ExtraSmallPhone), 8);
        assert_eq!(icon_size(DeviceTier::MediumPhone), 20);
        assert_eq!(icon_size(DeviceTier::Desktop), 32);
    }

    #[test]
    fn test_text_style_uses_resolved_font() {
        let style = text_style(TextRole::Body, DeviceTier::Tablet, WHITE);
        assert!(same_font(style.font, &PROFONT_14_POINT));
        assert_eq!(style.text_color, Some(WHITE));
    }

    #[test]
    fn test_layout_portrait_phone() {
        let layout = Layout::for_viewport(&Viewport::new(390.0, 844.0));
        assert_eq!(layout.tier, DeviceTier::MediumPhone);
        assert_eq!(layout.orientation, Orientation::Portrait);
        assert_eq!(layout.padding, 12);
        // 80% of 390 = 312, 45% of 844 = 379.8
        assert!((layout.gauge_diameter - 312.0).abs() < 0.01);
        assert!(layout.readout_size > 22.0 && layout.readout_size < 23.0);
    }

    #[test]
    fn test_layout_landscape_tablet() {
        let layout = Layout::for_viewport(&Viewport::new(1024.0, 768.0));
        assert_eq!(layout.tier, DeviceTier::Desktop);
        assert_eq!(layout.orientation, Orientation::Landscape);
        // 80% of 768 = 614.4, 45% of 1024 = 460.8
        assert!((layout.gauge_diameter - 460.8).abs() < 0.01);
        assert_eq!(layout.readout_size, 32.0);
    }
}
