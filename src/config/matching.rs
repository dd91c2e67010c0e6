//! Runtime selection primitives.
//!
//! These are the relations the platform runtime uses when it picks a resource value for a
//! device: whether a configuration can be used at all on a device ([`ConfigDescription::matches`]),
//! and which of two usable configurations describes the device more closely
//! ([`ConfigDescription::is_more_specific_than`]).

use bitflags::bitflags;

use crate::config::{constants::*, ConfigDescription};

bitflags! {
    /// Qualifier axes on which two configurations differ, see [`ConfigDescription::diff`].
    ///
    /// The bit values are the ones the runtime uses for configuration change masks.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ConfigFlags: u32 {
        /// Mobile country code
        const MCC = 0x0001;
        /// Mobile network code
        const MNC = 0x0002;
        /// Language, region, script or variant
        const LOCALE = 0x0004;
        /// Touchscreen type
        const TOUCHSCREEN = 0x0008;
        /// Keyboard type
        const KEYBOARD = 0x0010;
        /// Keyboard or navigation visibility
        const KEYBOARD_HIDDEN = 0x0020;
        /// Navigation method
        const NAVIGATION = 0x0040;
        /// Orientation
        const ORIENTATION = 0x0080;
        /// Density
        const DENSITY = 0x0100;
        /// Screen size in pixels or dp
        const SCREEN_SIZE = 0x0200;
        /// Platform version
        const VERSION = 0x0400;
        /// Screen size class or long flag
        const SCREEN_LAYOUT = 0x0800;
        /// UI mode type or night flag
        const UI_MODE = 0x1000;
        /// Smallest screen width
        const SMALLEST_SCREEN_SIZE = 0x2000;
        /// Layout direction
        const LAYOUTDIR = 0x4000;
        /// Round screen flag
        const SCREEN_ROUND = 0x8000;
    }
}

impl ConfigDescription {
    /// Returns true if a value with this configuration is usable on a device described by
    /// `settings`.
    ///
    /// Every axis this configuration specifies must be satisfied by the device: discrete axes
    /// must be equal, size axes (screen size class, dp and pixel sizes, platform version) must
    /// not exceed the device's. Density always matches because the runtime can scale.
    ///
    /// No locale data is available, so scripts are only compared when both sides carry one.
    /// Otherwise a region, when specified, must be equal.
    #[must_use]
    pub fn matches(&self, settings: &ConfigDescription) -> bool {
        if self.mcc != 0 && self.mcc != settings.mcc {
            return false;
        }
        if self.mnc != 0 && self.mnc != settings.mnc {
            return false;
        }

        if self.packed_locale() != 0 {
            if self.language != settings.language {
                return false;
            }

            let countries_must_match =
                settings.locale_script[0] == 0 || self.locale_script[0] == 0;
            if countries_must_match {
                if self.country[0] != 0 && self.country != settings.country {
                    return false;
                }
            } else if self.locale_script != settings.locale_script {
                return false;
            }
        }

        let layout_dir = self.layout_direction();
        if layout_dir != 0 && layout_dir != settings.layout_direction() {
            return false;
        }
        let screen_size = self.screen_size();
        if screen_size != 0 && screen_size > settings.screen_size() {
            return false;
        }
        let screen_long = self.screen_long();
        if screen_long != 0 && screen_long != settings.screen_long() {
            return false;
        }
        let ui_mode_type = self.ui_mode_type();
        if ui_mode_type != 0 && ui_mode_type != settings.ui_mode_type() {
            return false;
        }
        let ui_mode_night = self.ui_mode_night();
        if ui_mode_night != 0 && ui_mode_night != settings.ui_mode_night() {
            return false;
        }
        if self.smallest_screen_width_dp != 0
            && self.smallest_screen_width_dp > settings.smallest_screen_width_dp
        {
            return false;
        }

        let round = self.screen_round();
        if round != 0 && round != settings.screen_round() {
            return false;
        }

        if self.screen_width_dp != 0 && self.screen_width_dp > settings.screen_width_dp {
            return false;
        }
        if self.screen_height_dp != 0 && self.screen_height_dp > settings.screen_height_dp {
            return false;
        }

        if self.orientation != 0 && self.orientation != settings.orientation {
            return false;
        }
        if self.touchscreen != 0 && self.touchscreen != settings.touchscreen {
            return false;
        }

        let keys_hidden = self.keys_hidden();
        let set_keys_hidden = settings.keys_hidden();
        // a request for exposed keys also accepts a soft keyboard
        if keys_hidden != 0
            && keys_hidden != set_keys_hidden
            && (keys_hidden != KEYSHIDDEN_NO || set_keys_hidden != KEYSHIDDEN_SOFT)
        {
            return false;
        }
        let nav_hidden = self.nav_hidden();
        if nav_hidden != 0 && nav_hidden != settings.nav_hidden() {
            return false;
        }
        if self.keyboard != 0 && self.keyboard != settings.keyboard {
            return false;
        }
        if self.navigation != 0 && self.navigation != settings.navigation {
            return false;
        }

        if self.screen_width != 0 && self.screen_width > settings.screen_width {
            return false;
        }
        if self.screen_height != 0 && self.screen_height > settings.screen_height {
            return false;
        }

        if self.sdk_version != 0 && self.sdk_version > settings.sdk_version {
            return false;
        }
        if self.minor_version != 0 && self.minor_version != settings.minor_version {
            return false;
        }

        true
    }

    /// Like [`ConfigDescription::matches`], but a density-qualified `other` is not matched
    /// by a configuration with a different density.
    ///
    /// An unqualified density still matches everything.
    #[must_use]
    pub fn matches_with_density(&self, other: &ConfigDescription) -> bool {
        self.matches(other) && (self.density == 0 || other.density != 0)
    }

    /// Scores how much more specific this locale is than the one of `other`.
    ///
    /// Positive when this locale is more specific, negative when less. A language beats a
    /// missing language, then a region beats a missing region. Past that a variant counts
    /// twice as much as a script.
    #[must_use]
    pub fn is_locale_more_specific_than(&self, other: &ConfigDescription) -> i32 {
        if self.packed_locale() != 0 || other.packed_locale() != 0 {
            if self.language[0] != other.language[0] {
                if self.language[0] == 0 {
                    return -1;
                }
                if other.language[0] == 0 {
                    return 1;
                }
            }

            if self.country[0] != other.country[0] {
                if self.country[0] == 0 {
                    return -1;
                }
                if other.country[0] == 0 {
                    return 1;
                }
            }
        }

        let score = |config: &ConfigDescription| {
            i32::from(config.locale_script[0] != 0) + 2 * i32::from(config.locale_variant[0] != 0)
        };
        score(self) - score(other)
    }

    /// Returns true if this configuration specifies an axis `other` leaves open, where the
    /// earlier axes in the platform's order decide first.
    ///
    /// Density is never considered more specific, since an unqualified density stands for
    /// the baseline density rather than for "any".
    #[must_use]
    pub fn is_more_specific_than(&self, o: &ConfigDescription) -> bool {
        /// Decides on one axis; `None` moves on to the next axis.
        fn specific(mine: impl Into<u32>, theirs: impl Into<u32>) -> Option<bool> {
            let (mine, theirs) = (mine.into(), theirs.into());
            if mine == theirs {
                None
            } else if mine == 0 {
                Some(false)
            } else if theirs == 0 {
                Some(true)
            } else {
                None
            }
        }

        if self.mcc != 0 || self.mnc != 0 || o.mcc != 0 || o.mnc != 0 {
            if let Some(result) = specific(self.mcc, o.mcc) {
                return result;
            }
            if let Some(result) = specific(self.mnc, o.mnc) {
                return result;
            }
        }

        if self.packed_locale() != 0 || o.packed_locale() != 0 {
            let diff = self.is_locale_more_specific_than(o);
            if diff != 0 {
                return diff > 0;
            }
        }

        let axes = [
            (
                u32::from(self.layout_direction()),
                u32::from(o.layout_direction()),
            ),
            (
                u32::from(self.smallest_screen_width_dp),
                u32::from(o.smallest_screen_width_dp),
            ),
            (u32::from(self.screen_width_dp), u32::from(o.screen_width_dp)),
            (
                u32::from(self.screen_height_dp),
                u32::from(o.screen_height_dp),
            ),
            (u32::from(self.screen_size()), u32::from(o.screen_size())),
            (u32::from(self.screen_long()), u32::from(o.screen_long())),
            (u32::from(self.screen_round()), u32::from(o.screen_round())),
            (u32::from(self.orientation), u32::from(o.orientation)),
            (u32::from(self.ui_mode_type()), u32::from(o.ui_mode_type())),
            (u32::from(self.ui_mode_night()), u32::from(o.ui_mode_night())),
            (u32::from(self.touchscreen), u32::from(o.touchscreen)),
            (u32::from(self.keys_hidden()), u32::from(o.keys_hidden())),
            (u32::from(self.nav_hidden()), u32::from(o.nav_hidden())),
            (u32::from(self.keyboard), u32::from(o.keyboard)),
            (u32::from(self.navigation), u32::from(o.navigation)),
            (u32::from(self.screen_width), u32::from(o.screen_width)),
            (u32::from(self.screen_height), u32::from(o.screen_height)),
            (u32::from(self.sdk_version), u32::from(o.sdk_version)),
            (u32::from(self.minor_version), u32::from(o.minor_version)),
        ];

        axes.into_iter()
            .find_map(|(mine, theirs)| specific(mine, theirs))
            .unwrap_or(false)
    }

    /// Returns the axes on which this configuration and `other` differ.
    #[must_use]
    pub fn diff(&self, other: &ConfigDescription) -> ConfigFlags {
        let mut diffs = ConfigFlags::empty();

        diffs.set(ConfigFlags::MCC, self.mcc != other.mcc);
        diffs.set(ConfigFlags::MNC, self.mnc != other.mnc);
        diffs.set(ConfigFlags::ORIENTATION, self.orientation != other.orientation);
        diffs.set(ConfigFlags::DENSITY, self.density != other.density);
        diffs.set(ConfigFlags::TOUCHSCREEN, self.touchscreen != other.touchscreen);
        diffs.set(
            ConfigFlags::KEYBOARD_HIDDEN,
            (self.input_flags ^ other.input_flags) & (MASK_KEYSHIDDEN | MASK_NAVHIDDEN) != 0,
        );
        diffs.set(ConfigFlags::KEYBOARD, self.keyboard != other.keyboard);
        diffs.set(ConfigFlags::NAVIGATION, self.navigation != other.navigation);
        diffs.set(
            ConfigFlags::SCREEN_SIZE,
            self.screen_width != other.screen_width
                || self.screen_height != other.screen_height
                || self.screen_width_dp != other.screen_width_dp
                || self.screen_height_dp != other.screen_height_dp,
        );
        diffs.set(
            ConfigFlags::VERSION,
            self.packed_version() != other.packed_version(),
        );
        diffs.set(
            ConfigFlags::LAYOUTDIR,
            self.layout_direction() != other.layout_direction(),
        );
        diffs.set(
            ConfigFlags::SCREEN_LAYOUT,
            (self.screen_layout & !MASK_LAYOUTDIR) != (other.screen_layout & !MASK_LAYOUTDIR),
        );
        diffs.set(
            ConfigFlags::SCREEN_ROUND,
            self.screen_round() != other.screen_round(),
        );
        diffs.set(ConfigFlags::UI_MODE, self.ui_mode != other.ui_mode);
        diffs.set(
            ConfigFlags::SMALLEST_SCREEN_SIZE,
            self.smallest_screen_width_dp != other.smallest_screen_width_dp,
        );
        diffs.set(
            ConfigFlags::LOCALE,
            self.compare_locales(other) != std::cmp::Ordering::Equal,
        );

        diffs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(qualifiers: &str) -> ConfigDescription {
        ConfigDescription::parse(qualifiers).unwrap()
    }

    #[test]
    fn default_matches_everything() {
        let default = ConfigDescription::default_config();
        for qualifiers in ["en", "land", "sw600dp", "night", "xhdpi", "v21"] {
            assert!(default.matches(&parse(qualifiers)));
        }
    }

    #[test]
    fn discrete_axes_must_be_equal() {
        assert!(parse("land").matches(&parse("en-land")));
        assert!(!parse("land").matches(&parse("port")));
        assert!(!parse("land").matches(&ConfigDescription::default_config()));
        assert!(!parse("en").matches(&parse("fr")));
        assert!(!parse("en-rUS").matches(&parse("en-rGB")));
        assert!(parse("en").matches(&parse("en-rGB")));
    }

    #[test]
    fn ranged_axes_accept_larger_devices() {
        assert!(parse("sw600dp").matches(&parse("sw720dp")));
        assert!(!parse("sw720dp").matches(&parse("sw600dp")));
        assert!(parse("v13").matches(&parse("v21")));
        assert!(!parse("v21").matches(&parse("v13")));
        assert!(parse("small").matches(&parse("large")));
        assert!(!parse("large").matches(&parse("small")));
    }

    #[test]
    fn keys_exposed_accepts_soft_keyboard() {
        assert!(parse("keysexposed").matches(&parse("keyssoft")));
        assert!(!parse("keyshidden").matches(&parse("keyssoft")));
        assert!(!parse("keyssoft").matches(&parse("keysexposed")));
    }

    #[test]
    fn scripts_compared_when_both_present() {
        assert!(parse("b+sr+Latn").matches(&parse("b+sr+Latn+RS")));
        assert!(!parse("b+sr+Latn").matches(&parse("b+sr+Cyrl")));
        // no script on the request: regions decide
        assert!(parse("b+sr+Latn").matches(&parse("sr")));
    }

    #[test]
    fn density_matching() {
        let with_density = |density| ConfigDescription {
            density,
            ..Default::default()
        };
        let hdpi = with_density(DENSITY_HIGH);
        let default = ConfigDescription::default_config();

        assert!(hdpi.matches(&default));
        assert!(!hdpi.matches_with_density(&default));
        assert!(default.matches_with_density(&hdpi));
        assert!(hdpi.matches_with_density(&with_density(DENSITY_XHIGH)));
    }

    #[test]
    fn more_specific() {
        assert!(parse("en").is_more_specific_than(&ConfigDescription::default_config()));
        assert!(!ConfigDescription::default_config().is_more_specific_than(&parse("en")));
        assert!(parse("en-rUS").is_more_specific_than(&parse("en")));
        assert!(parse("b+en+US+posix").is_more_specific_than(&parse("b+en+Latn+US")));
        assert!(parse("en").is_more_specific_than(&parse("land")));
        assert!(parse("v21").is_more_specific_than(&ConfigDescription::default_config()));
        assert!(!parse("v13").is_more_specific_than(&parse("v21")));
    }

    #[test]
    fn density_is_never_more_specific() {
        let hdpi = ConfigDescription {
            density: DENSITY_HIGH,
            ..Default::default()
        };
        assert!(!hdpi.is_more_specific_than(&ConfigDescription::default_config()));
    }

    #[test]
    fn diff_flags() {
        let default = ConfigDescription::default_config();
        assert_eq!(default.diff(&default), ConfigFlags::empty());

        let night = parse("night");
        assert_eq!(default.diff(&night), ConfigFlags::UI_MODE | ConfigFlags::VERSION);
        assert_eq!(
            parse("land-night").diff(&night),
            ConfigFlags::ORIENTATION
        );
        assert_eq!(
            parse("en-rUS").diff(&parse("en")),
            ConfigFlags::LOCALE
        );
        assert_eq!(
            parse("ldrtl-large").diff(&parse("large")),
            ConfigFlags::LAYOUTDIR
        );
        assert_eq!(
            parse("sw600dp-w720dp").diff(&parse("w720dp")),
            ConfigFlags::SMALLEST_SCREEN_SIZE
        );
    }
}
