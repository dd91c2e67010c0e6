//! Domination, precedence and compatibility between configurations.
//!
//! A configuration `A` dominates `B` when every device that would select `B` also accepts
//! `A`, and `A` is at least as preferred. A value under `B` that equals the value under `A`
//! can then be dropped without changing what any device sees.

use strum::{EnumIter, IntoEnumIterator};

use crate::config::ConfigDescription;

/// One row of the precedence table, in decreasing order of importance.
///
/// [`ConfigDescription::has_higher_precedence_than`] decides on the first axis either side
/// specifies. Script and variant have no row; they only ever appear next to a language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PrecedenceAxis {
    /// Mobile country code
    Mcc,
    /// Mobile network code
    Mnc,
    /// Locale language
    Language,
    /// Locale region
    Region,
    /// Layout direction
    LayoutDirection,
    /// Smallest screen width in dp
    SmallestScreenWidthDp,
    /// Screen width in dp
    ScreenWidthDp,
    /// Screen height in dp
    ScreenHeightDp,
    /// Screen size class
    ScreenSize,
    /// Long screen flag
    ScreenLong,
    /// Round screen flag
    ScreenRound,
    /// Orientation
    Orientation,
    /// UI mode type
    UiModeType,
    /// UI mode night flag
    UiModeNight,
    /// Density
    Density,
    /// Touchscreen
    Touchscreen,
    /// Keyboard visibility
    KeysHidden,
    /// Navigation visibility
    NavHidden,
    /// Keyboard type
    Keyboard,
    /// Navigation method
    Navigation,
    /// Screen width in pixels
    ScreenWidth,
    /// Screen height in pixels
    ScreenHeight,
    /// Platform version
    SdkVersion,
    /// Minor platform version
    MinorVersion,
}

impl PrecedenceAxis {
    /// Returns true if `config` constrains this axis.
    #[must_use]
    pub fn is_specified(self, config: &ConfigDescription) -> bool {
        match self {
            PrecedenceAxis::Mcc => config.mcc != 0,
            PrecedenceAxis::Mnc => config.mnc != 0,
            PrecedenceAxis::Language => config.language[0] != 0,
            PrecedenceAxis::Region => config.country[0] != 0,
            PrecedenceAxis::LayoutDirection => config.layout_direction() != 0,
            PrecedenceAxis::SmallestScreenWidthDp => config.smallest_screen_width_dp != 0,
            PrecedenceAxis::ScreenWidthDp => config.screen_width_dp != 0,
            PrecedenceAxis::ScreenHeightDp => config.screen_height_dp != 0,
            PrecedenceAxis::ScreenSize => config.screen_size() != 0,
            PrecedenceAxis::ScreenLong => config.screen_long() != 0,
            PrecedenceAxis::ScreenRound => config.screen_round() != 0,
            PrecedenceAxis::Orientation => config.orientation != 0,
            PrecedenceAxis::UiModeType => config.ui_mode_type() != 0,
            PrecedenceAxis::UiModeNight => config.ui_mode_night() != 0,
            PrecedenceAxis::Density => config.density != 0,
            PrecedenceAxis::Touchscreen => config.touchscreen != 0,
            PrecedenceAxis::KeysHidden => config.keys_hidden() != 0,
            PrecedenceAxis::NavHidden => config.nav_hidden() != 0,
            PrecedenceAxis::Keyboard => config.keyboard != 0,
            PrecedenceAxis::Navigation => config.navigation != 0,
            PrecedenceAxis::ScreenWidth => config.screen_width != 0,
            PrecedenceAxis::ScreenHeight => config.screen_height != 0,
            PrecedenceAxis::SdkVersion => config.sdk_version != 0,
            PrecedenceAxis::MinorVersion => config.minor_version != 0,
        }
    }

    /// Returns the first axis, in precedence order, that either configuration specifies.
    #[must_use]
    pub fn first_specified(a: &ConfigDescription, b: &ConfigDescription) -> Option<Self> {
        PrecedenceAxis::iter().find(|axis| axis.is_specified(a) || axis.is_specified(b))
    }
}

impl ConfigDescription {
    /// Returns true if this configuration wins the precedence tie-break against `other`.
    ///
    /// The decision is made on the first [`PrecedenceAxis`] either side specifies: this
    /// configuration wins exactly when `other` leaves that axis open. When both specify it
    /// the answer is `false` and later axes are not consulted. If neither configuration
    /// specifies any axis in the table, the result is whether the two differ at all.
    #[must_use]
    pub fn has_higher_precedence_than(&self, other: &ConfigDescription) -> bool {
        match PrecedenceAxis::first_specified(self, other) {
            Some(axis) => !axis.is_specified(other),
            None => self != other,
        }
    }

    /// Returns true if this configuration makes a value under `other` redundant.
    ///
    /// The default configuration dominates everything and every configuration dominates
    /// itself. Otherwise this configuration must match `other` (density-aware) while `other`
    /// does not match it back, must not be more specific than `other`, and `other` must not
    /// win the precedence tie-break.
    ///
    /// # Arguments
    ///
    /// * `other` - The candidate configuration to test
    #[must_use]
    pub fn dominates(&self, other: &ConfigDescription) -> bool {
        if self.is_default() || self == other {
            return true;
        }

        self.matches_with_density(other)
            && !other.matches_with_density(self)
            && !self.is_more_specific_than(other)
            && !other.has_higher_precedence_than(self)
    }

    /// Returns true if both configurations set a discrete axis to different values, so no
    /// device can ever match both.
    ///
    /// Density and the dp/pixel ranges are resolved at runtime by closest match and never
    /// conflict.
    #[must_use]
    pub fn conflicts_with(&self, other: &ConfigDescription) -> bool {
        fn differ(a: impl Into<u32>, b: impl Into<u32>) -> bool {
            let (a, b) = (a.into(), b.into());
            a != 0 && b != 0 && a != b
        }

        differ(self.mcc, other.mcc)
            || differ(self.mnc, other.mnc)
            || differ(self.packed_locale(), other.packed_locale())
            || differ(self.layout_direction(), other.layout_direction())
            || differ(self.screen_long(), other.screen_long())
            || differ(self.ui_mode_type(), other.ui_mode_type())
            || differ(self.ui_mode_night(), other.ui_mode_night())
            || differ(self.screen_round(), other.screen_round())
            || differ(self.orientation, other.orientation)
            || differ(self.touchscreen, other.touchscreen)
            || differ(self.keys_hidden(), other.keys_hidden())
            || differ(self.nav_hidden(), other.nav_hidden())
            || differ(self.keyboard, other.keyboard)
            || differ(self.navigation, other.navigation)
    }

    /// Returns true if values under both configurations can coexist as distinct variants:
    /// they do not conflict and neither dominates the other.
    #[must_use]
    pub fn is_compatible_with(&self, other: &ConfigDescription) -> bool {
        !self.conflicts_with(other) && !self.dominates(other) && !other.dominates(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(qualifiers: &str) -> ConfigDescription {
        ConfigDescription::parse(qualifiers).unwrap()
    }

    const SAMPLES: &[&str] = &[
        "",
        "en",
        "en-v21",
        "en-rUS",
        "land",
        "port",
        "sw600dp-land-v13",
        "ldrtl-v4",
        "ldrtl-xhdpi-v4",
        "sw300dp-v13",
        "sw600dp-v14",
        "night",
        "hdpi",
        "v20",
        "mcc310",
        "mcc310-mnc004",
        "keysexposed",
        "round",
    ];

    #[test]
    fn default_dominates_everything() {
        let default = ConfigDescription::default_config();
        for qualifiers in SAMPLES {
            assert!(default.dominates(&parse(qualifiers)), "{qualifiers}");
        }
    }

    #[test]
    fn only_default_dominates_default() {
        let default = ConfigDescription::default_config();
        for qualifiers in SAMPLES.iter().filter(|q| !q.is_empty()) {
            assert!(!parse(qualifiers).dominates(&default), "{qualifiers}");
        }
    }

    #[test]
    fn domination_is_antisymmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                let (a, b) = (parse(a), parse(b));
                if a != b && a.dominates(&b) {
                    assert!(!b.dominates(&a), "{a} and {b} dominate each other");
                }
            }
        }
    }

    #[test]
    fn compatibility_is_symmetric() {
        for a in SAMPLES {
            for b in SAMPLES {
                let (a, b) = (parse(a), parse(b));
                assert_eq!(a.is_compatible_with(&b), b.is_compatible_with(&a));
            }
        }
    }

    #[test]
    fn version_qualified_values_are_dominated() {
        assert!(parse("en").dominates(&parse("en-v21")));
        assert!(parse("ldrtl-v4").dominates(&parse("ldrtl-xhdpi-v4")));
        assert!(parse("sw300dp-v13").dominates(&parse("sw540dp-v14")));
        assert!(!parse("sw540dp-v14").dominates(&parse("sw300dp-v13")));
    }

    #[test]
    fn precedence_stops_the_chain() {
        // sw600dp outranks orientation, so land cannot absorb sw600dp-land
        let land = parse("land");
        let sw_land = parse("sw600dp-land-v13");
        assert!(sw_land.has_higher_precedence_than(&land));
        assert!(!land.dominates(&sw_land));
        assert!(!sw_land.dominates(&land));
    }

    #[test]
    fn precedence_table() {
        assert!(parse("en").has_higher_precedence_than(&parse("land")));
        assert!(!parse("land").has_higher_precedence_than(&parse("en")));
        // both specify the first axis: no winner, later axes ignored
        assert!(!parse("en-land").has_higher_precedence_than(&parse("fr")));
        assert_eq!(
            PrecedenceAxis::first_specified(&parse("en-land"), &parse("fr")),
            Some(PrecedenceAxis::Language)
        );

        let default = ConfigDescription::default_config();
        assert!(!default.has_higher_precedence_than(&default));
        assert_eq!(PrecedenceAxis::first_specified(&default, &default), None);

        let scripted = ConfigDescription {
            locale_script: *b"Latn",
            ..Default::default()
        };
        assert!(scripted.has_higher_precedence_than(&default));
    }

    #[test]
    fn conflicts() {
        assert!(parse("land").conflicts_with(&parse("port")));
        assert!(parse("en").conflicts_with(&parse("fr")));
        assert!(parse("night").conflicts_with(&parse("notnight")));
        assert!(!parse("land").conflicts_with(&parse("en")));
        assert!(!parse("hdpi").conflicts_with(&parse("xhdpi")));
        assert!(!parse("sw300dp").conflicts_with(&parse("sw600dp")));
    }

    #[test]
    fn compatibility() {
        assert!(parse("land").is_compatible_with(&parse("en")));
        assert!(!parse("land").is_compatible_with(&parse("port")));
        assert!(!parse("en").is_compatible_with(&parse("en-v21")));
        assert!(parse("land").is_compatible_with(&parse("sw600dp-land-v13")));
    }
}
