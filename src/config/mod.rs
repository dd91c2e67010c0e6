//! Device configuration descriptors.
//!
//! A [`ConfigDescription`] is the structured form of a resource qualifier string such as
//! `en-rUS-sw600dp-hdpi-v21`. Every resource value in a [`crate::table::ResourceTable`] is
//! keyed by one, and the relations defined on it decide which values a device may select
//! ([`ConfigDescription::matches`]), which of two candidates it prefers
//! ([`ConfigDescription::is_more_specific_than`],
//! [`ConfigDescription::has_higher_precedence_than`]) and which values are redundant
//! ([`ConfigDescription::dominates`]).
//!
//! # Architecture
//!
//! - [`constants`] - Raw field values and bit masks shared with the runtime
//! - `parser` - Qualifier string parsing and the platform version fixup
//! - `locale` - The multi-token locale grammar and language/region packing
//! - `matching` - Runtime selection primitives and [`ConfigFlags`] differences
//! - `domination` - Precedence, domination, conflict and compatibility
//!
//! # Usage Examples
//!
//! ```rust
//! use resforge::config::ConfigDescription;
//!
//! let config = ConfigDescription::parse("en-rUS-sw600dp").unwrap();
//! assert_eq!(config.to_string(), "en-rUS-sw600dp-v13");
//!
//! let default = ConfigDescription::default_config();
//! assert!(default.dominates(&config));
//! assert_eq!(default.to_string(), "");
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Write};

pub mod constants;
mod domination;
mod locale;
mod matching;
mod parser;

pub use constants::*;
pub use domination::PrecedenceAxis;
pub use locale::LocaleValue;
pub use matching::ConfigFlags;

/// A structured device configuration, one field per qualifier axis.
///
/// The field layout mirrors the configuration record of the platform runtime. A zero field
/// means the axis is unspecified; packed fields (`input_flags`, `screen_layout`, `ui_mode`,
/// `screen_layout2`) hold several axes selected with the masks in [`constants`].
///
/// Equality is field equality. The total order ([`Ord`]) is the runtime's logical order,
/// used to keep configuration values sorted inside a resource entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ConfigDescription {
    /// Mobile country code, 0 if unset.
    pub mcc: u16,
    /// Mobile network code, 0 if unset and [`MNC_ZERO`] for `mnc00`.
    pub mnc: u16,
    /// Packed language code.
    pub language: [u8; 2],
    /// Packed region code.
    pub country: [u8; 2],
    /// Title-case four letter script, NUL filled when unset.
    pub locale_script: [u8; 4],
    /// Lower-case variant, NUL padded.
    pub locale_variant: [u8; 8],
    /// Screen orientation.
    pub orientation: u8,
    /// Touchscreen type.
    pub touchscreen: u8,
    /// Screen density in dpi or one of the `DENSITY_*` sentinels.
    pub density: u16,
    /// Keyboard type.
    pub keyboard: u8,
    /// Navigation method.
    pub navigation: u8,
    /// Keyboard and navigation visibility.
    pub input_flags: u8,
    /// Screen width in pixels.
    pub screen_width: u16,
    /// Screen height in pixels.
    pub screen_height: u16,
    /// Minimum platform version.
    pub sdk_version: u16,
    /// Minor platform version, must match exactly when set.
    pub minor_version: u16,
    /// Screen size class, long flag and layout direction.
    pub screen_layout: u8,
    /// UI mode type and night flag.
    pub ui_mode: u8,
    /// Smallest screen width in dp.
    pub smallest_screen_width_dp: u16,
    /// Available screen width in dp.
    pub screen_width_dp: u16,
    /// Available screen height in dp.
    pub screen_height_dp: u16,
    /// Round screen flag.
    pub screen_layout2: u8,
}

impl ConfigDescription {
    /// Returns the configuration with no qualifier set.
    ///
    /// It matches every device and dominates every other configuration.
    #[must_use]
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Returns true if no qualifier is set.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Language and region packed into one word, the way the runtime compares locales.
    pub(crate) fn packed_locale(&self) -> u32 {
        u32::from_le_bytes([
            self.language[0],
            self.language[1],
            self.country[0],
            self.country[1],
        ])
    }

    /// Keyboard, navigation and input flags packed into one word.
    pub(crate) fn packed_input(&self) -> u32 {
        u32::from_le_bytes([self.keyboard, self.navigation, self.input_flags, 0])
    }

    /// Platform version and minor version packed into one word.
    pub(crate) fn packed_version(&self) -> u32 {
        u32::from(self.sdk_version) | (u32::from(self.minor_version) << 16)
    }

    /// Compares locales: packed language and region first, then script and variant bytes.
    pub(crate) fn compare_locales(&self, other: &Self) -> Ordering {
        self.packed_locale()
            .cmp(&other.packed_locale())
            .then_with(|| self.locale_script.cmp(&other.locale_script))
            .then_with(|| self.locale_variant.cmp(&other.locale_variant))
    }

    /// Returns the layout direction bits.
    #[must_use]
    pub fn layout_direction(&self) -> u8 {
        self.screen_layout & MASK_LAYOUTDIR
    }

    /// Returns the screen size class bits.
    #[must_use]
    pub fn screen_size(&self) -> u8 {
        self.screen_layout & MASK_SCREENSIZE
    }

    /// Returns the long-screen bits.
    #[must_use]
    pub fn screen_long(&self) -> u8 {
        self.screen_layout & MASK_SCREENLONG
    }

    /// Returns the round-screen bits.
    #[must_use]
    pub fn screen_round(&self) -> u8 {
        self.screen_layout2 & MASK_SCREENROUND
    }

    /// Returns the UI mode type bits.
    #[must_use]
    pub fn ui_mode_type(&self) -> u8 {
        self.ui_mode & MASK_UI_MODE_TYPE
    }

    /// Returns the UI mode night bits.
    #[must_use]
    pub fn ui_mode_night(&self) -> u8 {
        self.ui_mode & MASK_UI_MODE_NIGHT
    }

    /// Returns the keyboard visibility bits.
    #[must_use]
    pub fn keys_hidden(&self) -> u8 {
        self.input_flags & MASK_KEYSHIDDEN
    }

    /// Returns the navigation visibility bits.
    #[must_use]
    pub fn nav_hidden(&self) -> u8 {
        self.input_flags & MASK_NAVHIDDEN
    }
}

impl Ord for ConfigDescription {
    fn cmp(&self, other: &Self) -> Ordering {
        self.mcc
            .cmp(&other.mcc)
            .then_with(|| self.mnc.cmp(&other.mnc))
            .then_with(|| self.compare_locales(other))
            .then_with(|| self.layout_direction().cmp(&other.layout_direction()))
            .then_with(|| {
                self.smallest_screen_width_dp
                    .cmp(&other.smallest_screen_width_dp)
            })
            .then_with(|| self.screen_width_dp.cmp(&other.screen_width_dp))
            .then_with(|| self.screen_height_dp.cmp(&other.screen_height_dp))
            .then_with(|| self.screen_width.cmp(&other.screen_width))
            .then_with(|| self.screen_height.cmp(&other.screen_height))
            .then_with(|| self.density.cmp(&other.density))
            .then_with(|| self.orientation.cmp(&other.orientation))
            .then_with(|| self.touchscreen.cmp(&other.touchscreen))
            .then_with(|| self.packed_input().cmp(&other.packed_input()))
            .then_with(|| self.screen_layout.cmp(&other.screen_layout))
            .then_with(|| self.screen_layout2.cmp(&other.screen_layout2))
            .then_with(|| self.ui_mode.cmp(&other.ui_mode))
            .then_with(|| self.packed_version().cmp(&other.packed_version()))
    }
}

impl PartialOrd for ConfigDescription {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Appends one qualifier, separating it from the previous one.
fn push_qualifier(out: &mut String, args: fmt::Arguments<'_>) {
    if !out.is_empty() {
        out.push('-');
    }
    let _ = out.write_fmt(args);
}

impl fmt::Display for ConfigDescription {
    /// Formats the canonical qualifier string, in parse order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();

        if self.mcc != 0 {
            push_qualifier(&mut out, format_args!("mcc{:03}", self.mcc));
        }
        match self.mnc {
            0 => {}
            MNC_ZERO => push_qualifier(&mut out, format_args!("mnc00")),
            mnc => push_qualifier(&mut out, format_args!("mnc{mnc}")),
        }

        locale::append_locale(self, &mut out);

        match self.layout_direction() {
            0 => {}
            LAYOUTDIR_LTR => push_qualifier(&mut out, format_args!("ldltr")),
            LAYOUTDIR_RTL => push_qualifier(&mut out, format_args!("ldrtl")),
            other => push_qualifier(&mut out, format_args!("layoutDir={other}")),
        }
        if self.smallest_screen_width_dp != 0 {
            push_qualifier(
                &mut out,
                format_args!("sw{}dp", self.smallest_screen_width_dp),
            );
        }
        if self.screen_width_dp != 0 {
            push_qualifier(&mut out, format_args!("w{}dp", self.screen_width_dp));
        }
        if self.screen_height_dp != 0 {
            push_qualifier(&mut out, format_args!("h{}dp", self.screen_height_dp));
        }
        match self.screen_size() {
            0 => {}
            SCREENSIZE_SMALL => push_qualifier(&mut out, format_args!("small")),
            SCREENSIZE_NORMAL => push_qualifier(&mut out, format_args!("normal")),
            SCREENSIZE_LARGE => push_qualifier(&mut out, format_args!("large")),
            SCREENSIZE_XLARGE => push_qualifier(&mut out, format_args!("xlarge")),
            other => push_qualifier(&mut out, format_args!("screenLayoutSize={other}")),
        }
        match self.screen_long() {
            0 => {}
            SCREENLONG_NO => push_qualifier(&mut out, format_args!("notlong")),
            SCREENLONG_YES => push_qualifier(&mut out, format_args!("long")),
            other => push_qualifier(&mut out, format_args!("screenLayoutLong={other}")),
        }
        match self.screen_round() {
            0 => {}
            SCREENROUND_NO => push_qualifier(&mut out, format_args!("notround")),
            SCREENROUND_YES => push_qualifier(&mut out, format_args!("round")),
            other => push_qualifier(&mut out, format_args!("screenRound={other}")),
        }
        match self.orientation {
            0 => {}
            ORIENTATION_PORT => push_qualifier(&mut out, format_args!("port")),
            ORIENTATION_LAND => push_qualifier(&mut out, format_args!("land")),
            ORIENTATION_SQUARE => push_qualifier(&mut out, format_args!("square")),
            other => push_qualifier(&mut out, format_args!("orientation={other}")),
        }
        match self.ui_mode_type() {
            0 => {}
            UI_MODE_TYPE_DESK => push_qualifier(&mut out, format_args!("desk")),
            UI_MODE_TYPE_CAR => push_qualifier(&mut out, format_args!("car")),
            UI_MODE_TYPE_TELEVISION => push_qualifier(&mut out, format_args!("television")),
            UI_MODE_TYPE_APPLIANCE => push_qualifier(&mut out, format_args!("appliance")),
            UI_MODE_TYPE_WATCH => push_qualifier(&mut out, format_args!("watch")),
            UI_MODE_TYPE_VR_HEADSET => push_qualifier(&mut out, format_args!("vrheadset")),
            other => push_qualifier(&mut out, format_args!("uiModeType={other}")),
        }
        match self.ui_mode_night() {
            0 => {}
            UI_MODE_NIGHT_NO => push_qualifier(&mut out, format_args!("notnight")),
            UI_MODE_NIGHT_YES => push_qualifier(&mut out, format_args!("night")),
            other => push_qualifier(&mut out, format_args!("uiModeNight={other}")),
        }
        match self.density {
            DENSITY_DEFAULT => {}
            DENSITY_LOW => push_qualifier(&mut out, format_args!("ldpi")),
            DENSITY_MEDIUM => push_qualifier(&mut out, format_args!("mdpi")),
            DENSITY_TV => push_qualifier(&mut out, format_args!("tvdpi")),
            DENSITY_HIGH => push_qualifier(&mut out, format_args!("hdpi")),
            DENSITY_XHIGH => push_qualifier(&mut out, format_args!("xhdpi")),
            DENSITY_XXHIGH => push_qualifier(&mut out, format_args!("xxhdpi")),
            DENSITY_XXXHIGH => push_qualifier(&mut out, format_args!("xxxhdpi")),
            DENSITY_NONE => push_qualifier(&mut out, format_args!("nodpi")),
            DENSITY_ANY => push_qualifier(&mut out, format_args!("anydpi")),
            dpi => push_qualifier(&mut out, format_args!("{dpi}dpi")),
        }
        match self.touchscreen {
            0 => {}
            TOUCHSCREEN_NOTOUCH => push_qualifier(&mut out, format_args!("notouch")),
            TOUCHSCREEN_FINGER => push_qualifier(&mut out, format_args!("finger")),
            TOUCHSCREEN_STYLUS => push_qualifier(&mut out, format_args!("stylus")),
            other => push_qualifier(&mut out, format_args!("touchscreen={other}")),
        }
        match self.keys_hidden() {
            KEYSHIDDEN_NO => push_qualifier(&mut out, format_args!("keysexposed")),
            KEYSHIDDEN_YES => push_qualifier(&mut out, format_args!("keyshidden")),
            KEYSHIDDEN_SOFT => push_qualifier(&mut out, format_args!("keyssoft")),
            _ => {}
        }
        match self.keyboard {
            0 => {}
            KEYBOARD_NOKEYS => push_qualifier(&mut out, format_args!("nokeys")),
            KEYBOARD_QWERTY => push_qualifier(&mut out, format_args!("qwerty")),
            KEYBOARD_12KEY => push_qualifier(&mut out, format_args!("12key")),
            other => push_qualifier(&mut out, format_args!("keyboard={other}")),
        }
        match self.nav_hidden() {
            0 => {}
            NAVHIDDEN_NO => push_qualifier(&mut out, format_args!("navexposed")),
            NAVHIDDEN_YES => push_qualifier(&mut out, format_args!("navhidden")),
            other => push_qualifier(&mut out, format_args!("inputFlagsNavHidden={other}")),
        }
        match self.navigation {
            0 => {}
            NAVIGATION_NONAV => push_qualifier(&mut out, format_args!("nonav")),
            NAVIGATION_DPAD => push_qualifier(&mut out, format_args!("dpad")),
            NAVIGATION_TRACKBALL => push_qualifier(&mut out, format_args!("trackball")),
            NAVIGATION_WHEEL => push_qualifier(&mut out, format_args!("wheel")),
            other => push_qualifier(&mut out, format_args!("navigation={other}")),
        }
        if self.screen_width != 0 || self.screen_height != 0 {
            push_qualifier(
                &mut out,
                format_args!("{}x{}", self.screen_width, self.screen_height),
            );
        }
        if self.sdk_version != 0 || self.minor_version != 0 {
            push_qualifier(&mut out, format_args!("v{}", self.sdk_version));
            if self.minor_version != 0 {
                let _ = write!(out, ".{}", self.minor_version);
            }
        }

        f.write_str(&out)
    }
}
