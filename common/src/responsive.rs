//! Responsive layout resolution.
//!
//! Screens size their fonts, paddings and icons from the current viewport.
//! The viewport width is first classified into a [`DeviceTier`], then a
//! [`TieredValue`] picks the best value for that tier by walking a fixed
//! fallback chain.
//!
//! # Breakpoints
//!
//! | Tier              | Width (dp)     |
//! |-------------------|----------------|
//! | `ExtraSmallPhone` | `< 320`        |
//! | `SmallPhone`      | `320 ..< 360`  |
//! | `MediumPhone`     | `360 ..< 414`  |
//! | `LargePhone`      | `414 ..< 768`  |
//! | `Tablet`          | `768 ..< 1024` |
//! | `Desktop`         | `>= 1024`      |
//!
//! # Fallback Chains
//!
//! Larger tiers degrade towards smaller ones until a value is present. The
//! small phone value is mandatory and terminates every chain. Extra-small
//! phones only try their own value and then the small phone value.
//!
//! ```ignore
//! let padding = TieredValue::new(8.0).large(12.0).tablet(16.0);
//! let viewport = Viewport::new(390.0, 844.0);
//! assert_eq!(viewport.resolve(&padding), 8.0); // medium phone -> small
//! ```

use core::cmp::Ordering;

use embedded_graphics::geometry::Size;

use crate::config::{
    BREAKPOINT_DESKTOP,
    BREAKPOINT_LARGE_PHONE,
    BREAKPOINT_MEDIUM_PHONE,
    BREAKPOINT_SMALL_PHONE,
    BREAKPOINT_TABLET,
    MAX_SCALED_FONT,
    MIN_SCALED_FONT,
    SCALE_REFERENCE_WIDTH,
};

// =============================================================================
// Device Tier
// =============================================================================

/// Viewport classification, ordered by increasing width.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum DeviceTier {
    /// Narrower than 320 dp.
    ExtraSmallPhone,
    /// 320 dp and wider.
    SmallPhone,
    /// 360 dp and wider.
    MediumPhone,
    /// 414 dp and wider.
    LargePhone,
    /// 768 dp and wider.
    Tablet,
    /// 1024 dp and wider.
    Desktop,
}

impl DeviceTier {
    /// All tiers, narrowest first.
    pub const ALL: [Self; 6] = [
        Self::ExtraSmallPhone,
        Self::SmallPhone,
        Self::MediumPhone,
        Self::LargePhone,
        Self::Tablet,
        Self::Desktop,
    ];

    /// Ordinal used for comparisons. Independent of declaration order.
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ExtraSmallPhone => 0,
            Self::SmallPhone => 1,
            Self::MediumPhone => 2,
            Self::LargePhone => 3,
            Self::Tablet => 4,
            Self::Desktop => 5,
        }
    }

    /// Inclusive lower width bound of this tier.
    pub const fn min_width(self) -> f32 {
        match self {
            Self::ExtraSmallPhone => 0.0,
            Self::SmallPhone => BREAKPOINT_SMALL_PHONE,
            Self::MediumPhone => BREAKPOINT_MEDIUM_PHONE,
            Self::LargePhone => BREAKPOINT_LARGE_PHONE,
            Self::Tablet => BREAKPOINT_TABLET,
            Self::Desktop => BREAKPOINT_DESKTOP,
        }
    }

    /// True for the four phone tiers.
    #[inline]
    pub const fn is_phone(self) -> bool { self.rank() <= Self::LargePhone.rank() }
}

impl PartialOrd for DeviceTier {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeviceTier {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

// =============================================================================
// Breakpoint Classifier
// =============================================================================

/// Breakpoint table, ascending. The extra-small threshold is implicit.
const BREAKPOINTS: [(DeviceTier, f32); 5] = [
    (DeviceTier::SmallPhone, BREAKPOINT_SMALL_PHONE),
    (DeviceTier::MediumPhone, BREAKPOINT_MEDIUM_PHONE),
    (DeviceTier::LargePhone, BREAKPOINT_LARGE_PHONE),
    (DeviceTier::Tablet, BREAKPOINT_TABLET),
    (DeviceTier::Desktop, BREAKPOINT_DESKTOP),
];

/// Classify a viewport width (dp) into a device tier.
///
/// Thresholds are inclusive lower bounds: a width of exactly 320 is a small
/// phone. Negative, zero and NaN widths are extra-small phones.
pub fn classify(width: f32) -> DeviceTier {
    BREAKPOINTS
        .iter()
        .rev()
        .find(|(_, threshold)| *threshold <= width)
        .map_or(DeviceTier::ExtraSmallPhone, |(tier, _)| *tier)
}

// =============================================================================
// Tiered Value Resolver
// =============================================================================

/// Storage slot of a [`TieredValue`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Slot {
    ExtraSmall,
    Small,
    Medium,
    Large,
    Tablet,
    Desktop,
}

/// Slots tried for each tier, in order. Every chain ends at `Small`.
const fn fallback_chain(tier: DeviceTier) -> &'static [Slot] {
    match tier {
        DeviceTier::Desktop => &[Slot::Desktop, Slot::Tablet, Slot::Large, Slot::Medium, Slot::Small],
        DeviceTier::Tablet => &[Slot::Tablet, Slot::Large, Slot::Medium, Slot::Small],
        DeviceTier::LargePhone => &[Slot::Large, Slot::Medium, Slot::Small],
        DeviceTier::MediumPhone => &[Slot::Medium, Slot::Small],
        DeviceTier::SmallPhone => &[Slot::Small],
        // Does not escalate to medium/large, only its own value then small.
        DeviceTier::ExtraSmallPhone => &[Slot::ExtraSmall, Slot::Small],
    }
}

/// A value requested per device tier.
///
/// The small phone value is mandatory and passed to [`TieredValue::new`];
/// every other tier is optional.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TieredValue<T> {
    extra_small: Option<T>,
    small: T,
    medium: Option<T>,
    large: Option<T>,
    tablet: Option<T>,
    desktop: Option<T>,
}

impl<T> TieredValue<T> {
    /// Request with only the mandatory small phone value.
    pub const fn new(small: T) -> Self {
        Self {
            extra_small: None,
            small,
            medium: None,
            large: None,
            tablet: None,
            desktop: None,
        }
    }

    /// Request with every slot given explicitly. Usable in `const` tables.
    pub const fn from_slots(
        extra_small: Option<T>,
        small: T,
        medium: Option<T>,
        large: Option<T>,
        tablet: Option<T>,
        desktop: Option<T>,
    ) -> Self {
        Self {
            extra_small,
            small,
            medium,
            large,
            tablet,
            desktop,
        }
    }

    /// Set the extra-small phone value.
    #[must_use]
    pub fn extra_small(
        mut self,
        value: T,
    ) -> Self {
        self.extra_small = Some(value);
        self
    }

    /// Set the medium phone value.
    #[must_use]
    pub fn medium(
        mut self,
        value: T,
    ) -> Self {
        self.medium = Some(value);
        self
    }

    /// Set the large phone value.
    #[must_use]
    pub fn large(
        mut self,
        value: T,
    ) -> Self {
        self.large = Some(value);
        self
    }

    /// Set the tablet value.
    #[must_use]
    pub fn tablet(
        mut self,
        value: T,
    ) -> Self {
        self.tablet = Some(value);
        self
    }

    /// Set the desktop value.
    #[must_use]
    pub fn desktop(
        mut self,
        value: T,
    ) -> Self {
        self.desktop = Some(value);
        self
    }

    fn slot(
        &self,
        slot: Slot,
    ) -> Option<&T> {
        match slot {
            Slot::ExtraSmall => self.extra_small.as_ref(),
            Slot::Small => Some(&self.small),
            Slot::Medium => self.medium.as_ref(),
            Slot::Large => self.large.as_ref(),
            Slot::Tablet => self.tablet.as_ref(),
            Slot::Desktop => self.desktop.as_ref(),
        }
    }

    /// Best available value for `tier`, following its fallback chain.
    pub fn value_for(
        &self,
        tier: DeviceTier,
    ) -> &T {
        fallback_chain(tier)
            .iter()
            .find_map(|slot| self.slot(*slot))
            .unwrap_or(&self.small)
    }
}

/// Resolve a tiered request for `tier`.
#[inline]
pub fn resolve<T: Clone>(
    tier: DeviceTier,
    request: &TieredValue<T>,
) -> T {
    request.value_for(tier).clone()
}

// =============================================================================
// Viewport
// =============================================================================

/// Screen orientation derived from the viewport aspect.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Orientation {
    /// Height at least as large as width.
    Portrait,
    /// Width larger than height.
    Landscape,
}

/// Current viewport in device-independent pixels.
///
/// Supplied by the host UI on every layout pass. All methods are pure.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    /// Width in dp.
    pub width: f32,
    /// Height in dp.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport from its dimensions.
    pub const fn new(
        width: f32,
        height: f32,
    ) -> Self {
        Self { width, height }
    }

    /// Device tier of this viewport's width.
    #[inline]
    pub fn tier(&self) -> DeviceTier { classify(self.width) }

    /// Portrait or landscape.
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        }
    }

    /// Resolve a tiered value for this viewport.
    #[inline]
    pub fn resolve<T: Clone>(
        &self,
        request: &TieredValue<T>,
    ) -> T {
        resolve(self.tier(), request)
    }

    /// `percent` % of the viewport width.
    #[inline]
    pub fn width_percent(
        &self,
        percent: f32,
    ) -> f32 {
        self.width * (percent / 100.0)
    }

    /// `percent` % of the viewport height.
    #[inline]
    pub fn height_percent(
        &self,
        percent: f32,
    ) -> f32 {
        self.height * (percent / 100.0)
    }

    /// Scale `base` linearly with the width relative to a large phone, clamped
    /// into `[min, max]`.
    ///
    /// # Panics
    ///
    /// If `min > max`.
    pub fn scaled_size(
        &self,
        base: f32,
        min: f32,
        max: f32,
    ) -> f32 {
        assert!(min <= max, "scaled_size: min must not exceed max");
        let scaled = base * (self.width / SCALE_REFERENCE_WIDTH);
        scaled.clamp(min, max)
    }

    /// [`Viewport::scaled_size`] with the default font clamp (10..=32).
    #[inline]
    pub fn scaled_font_size(
        &self,
        base: f32,
    ) -> f32 {
        self.scaled_size(base, MIN_SCALED_FONT, MAX_SCALED_FONT)
    }
}

impl From<Size> for Viewport {
    fn from(size: Size) -> Self { Self::new(size.width as f32, size.height as f32) }
}

// =============================================================================
// Unit Tests
// =============================================================================
