//! Qualifier string parsing.
//!
//! Qualifiers must appear in a fixed canonical order. Parsing walks the ordered list of axis
//! parsers exactly once; each parser either consumes the current token or lets the next axis
//! try it. The first token no remaining axis accepts rejects the whole string, so
//! `land-en` fails while `en-land` succeeds.

use std::str::FromStr;

use crate::{
    config::{constants::*, locale::LocaleValue, ConfigDescription},
    Error, Result,
};

/// The wildcard every axis accepts, resetting it to "unspecified".
const WILDCARD: &str = "any";

type AxisParser = fn(&str, &mut ConfigDescription) -> bool;

/// Single-token axes that follow the locale, in canonical order.
const AXES_AFTER_LOCALE: &[AxisParser] = &[
    parse_layout_direction,
    parse_smallest_screen_width_dp,
    parse_screen_width_dp,
    parse_screen_height_dp,
    parse_screen_layout_size,
    parse_screen_layout_long,
    parse_screen_round,
    parse_orientation,
    parse_ui_mode_type,
    parse_ui_mode_night,
    parse_density,
    parse_touchscreen,
    parse_keys_hidden,
    parse_keyboard,
    parse_nav_hidden,
    parse_navigation,
    parse_screen_size,
    parse_version,
];

impl ConfigDescription {
    /// Parses a qualifier string such as `en-rUS-sw600dp-v13`.
    ///
    /// The string is matched case-insensitively. An empty string yields the default
    /// configuration. On success the platform version is raised to the lowest version that
    /// supports every qualifier present, see [`ConfigDescription::apply_version_for_compatibility`].
    ///
    /// Returns `None` on an unknown token, an empty token (stray `-`) or a qualifier that
    /// appears out of canonical order. Use [`ConfigDescription::parse_checked`] to learn
    /// which token was rejected.
    ///
    /// # Arguments
    ///
    /// * `qualifiers` - The dash separated qualifier string
    #[must_use]
    pub fn parse(qualifiers: &str) -> Option<Self> {
        Self::parse_checked(qualifiers).ok()
    }

    /// Parses a qualifier string, reporting the offending token on failure.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first token that could not be consumed.
    pub fn parse_checked(qualifiers: &str) -> Result<Self> {
        let mut config = ConfigDescription::default();
        if qualifiers.is_empty() {
            return Ok(config);
        }

        let lowered = qualifiers.to_ascii_lowercase();
        let parts: Vec<&str> = lowered.split('-').collect();
        let reject = |token: &str| Error::InvalidConfig {
            qualifier: qualifiers.to_string(),
            token: token.to_string(),
        };

        let mut index = 0;

        if parse_mcc(parts[index], &mut config) {
            index += 1;
        }
        if index < parts.len() && parse_mnc(parts[index], &mut config) {
            index += 1;
        }

        if index < parts.len() {
            let mut locale = LocaleValue::default();
            let consumed = locale
                .init_from_parts(&parts[index..])
                .ok_or_else(|| reject(parts[index]))?;
            locale.write_to(&mut config);
            index += consumed;
        }

        for axis in AXES_AFTER_LOCALE {
            if index == parts.len() {
                break;
            }
            if axis(parts[index], &mut config) {
                index += 1;
            }
        }

        if let Some(&token) = parts.get(index) {
            return Err(reject(token));
        }

        config.apply_version_for_compatibility();
        Ok(config)
    }

    /// Raises `sdk_version` to the first platform version supporting every qualifier set.
    ///
    /// The version is never lowered, so applying the fixup twice is the same as applying it
    /// once.
    pub fn apply_version_for_compatibility(&mut self) {
        let min_sdk = if self.ui_mode_type() == UI_MODE_TYPE_VR_HEADSET {
            SDK_O
        } else if self.screen_round() != 0 {
            SDK_MARSHMALLOW
        } else if self.density == DENSITY_ANY {
            SDK_LOLLIPOP
        } else if self.smallest_screen_width_dp != 0
            || self.screen_width_dp != 0
            || self.screen_height_dp != 0
        {
            SDK_HONEYCOMB_MR2
        } else if self.ui_mode_type() != 0 || self.ui_mode_night() != 0 {
            SDK_FROYO
        } else if self.screen_size() != 0
            || self.screen_long() != 0
            || self.density != DENSITY_DEFAULT
        {
            SDK_DONUT
        } else {
            0
        };

        if min_sdk > self.sdk_version {
            self.sdk_version = min_sdk;
        }
    }
}

impl FromStr for ConfigDescription {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_checked(s)
    }
}

/// Parses `<prefix><digits><suffix>` into a number, rejecting empty or oversized values.
fn parse_number(token: &str, prefix: &str, suffix: &str) -> Option<u16> {
    let digits = token.strip_prefix(prefix)?.strip_suffix(suffix)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Matches a token against a keyword table, the wildcard mapping to zero.
fn lookup<T: Copy + Default>(token: &str, table: &[(&str, T)]) -> Option<T> {
    if token == WILDCARD {
        return Some(T::default());
    }
    table
        .iter()
        .find(|(name, _)| *name == token)
        .map(|&(_, value)| value)
}

/// Stores a keyword into the bits of a packed field selected by `mask`.
fn parse_masked(token: &str, table: &[(&str, u8)], field: &mut u8, mask: u8) -> bool {
    match lookup(token, table) {
        Some(value) => {
            *field = (*field & !mask) | value;
            true
        }
        None => false,
    }
}

/// Stores a keyword into a whole field.
fn parse_keyword(token: &str, table: &[(&str, u8)], field: &mut u8) -> bool {
    match lookup(token, table) {
        Some(value) => {
            *field = value;
            true
        }
        None => false,
    }
}

/// Stores `<prefix><N>dp` into a dp field.
fn parse_dp(token: &str, prefix: &str, field: &mut u16) -> bool {
    if token == WILDCARD {
        *field = 0;
        return true;
    }
    match parse_number(token, prefix, "dp") {
        Some(dp) => {
            *field = dp;
            true
        }
        None => false,
    }
}

fn parse_mcc(token: &str, config: &mut ConfigDescription) -> bool {
    if token == WILDCARD {
        config.mcc = 0;
        return true;
    }
    let Some(digits) = token.strip_prefix("mcc") else {
        return false;
    };
    if digits.len() != 3 {
        return false;
    }
    match parse_number(digits, "", "") {
        Some(mcc) => {
            config.mcc = mcc;
            true
        }
        None => false,
    }
}

fn parse_mnc(token: &str, config: &mut ConfigDescription) -> bool {
    if token == WILDCARD {
        config.mnc = 0;
        return true;
    }
    let Some(digits) = token.strip_prefix("mnc") else {
        return false;
    };
    if digits.is_empty() || digits.len() > 3 {
        return false;
    }
    match parse_number(digits, "", "") {
        Some(0) => {
            config.mnc = MNC_ZERO;
            true
        }
        Some(mnc) => {
            config.mnc = mnc;
            true
        }
        None => false,
    }
}

fn parse_layout_direction(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [("ldltr", LAYOUTDIR_LTR), ("ldrtl", LAYOUTDIR_RTL)];
    parse_masked(token, &table, &mut config.screen_layout, MASK_LAYOUTDIR)
}

fn parse_smallest_screen_width_dp(token: &str, config: &mut ConfigDescription) -> bool {
    parse_dp(token, "sw", &mut config.smallest_screen_width_dp)
}

fn parse_screen_width_dp(token: &str, config: &mut ConfigDescription) -> bool {
    parse_dp(token, "w", &mut config.screen_width_dp)
}

fn parse_screen_height_dp(token: &str, config: &mut ConfigDescription) -> bool {
    parse_dp(token, "h", &mut config.screen_height_dp)
}

fn parse_screen_layout_size(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("small", SCREENSIZE_SMALL),
        ("normal", SCREENSIZE_NORMAL),
        ("large", SCREENSIZE_LARGE),
        ("xlarge", SCREENSIZE_XLARGE),
    ];
    parse_masked(token, &table, &mut config.screen_layout, MASK_SCREENSIZE)
}

fn parse_screen_layout_long(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [("long", SCREENLONG_YES), ("notlong", SCREENLONG_NO)];
    parse_masked(token, &table, &mut config.screen_layout, MASK_SCREENLONG)
}

fn parse_screen_round(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [("round", SCREENROUND_YES), ("notround", SCREENROUND_NO)];
    parse_masked(token, &table, &mut config.screen_layout2, MASK_SCREENROUND)
}

fn parse_orientation(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("port", ORIENTATION_PORT),
        ("land", ORIENTATION_LAND),
        ("square", ORIENTATION_SQUARE),
    ];
    parse_keyword(token, &table, &mut config.orientation)
}

fn parse_ui_mode_type(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("desk", UI_MODE_TYPE_DESK),
        ("car", UI_MODE_TYPE_CAR),
        ("television", UI_MODE_TYPE_TELEVISION),
        ("appliance", UI_MODE_TYPE_APPLIANCE),
        ("watch", UI_MODE_TYPE_WATCH),
        ("vrheadset", UI_MODE_TYPE_VR_HEADSET),
    ];
    parse_masked(token, &table, &mut config.ui_mode, MASK_UI_MODE_TYPE)
}

fn parse_ui_mode_night(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [("night", UI_MODE_NIGHT_YES), ("notnight", UI_MODE_NIGHT_NO)];
    parse_masked(token, &table, &mut config.ui_mode, MASK_UI_MODE_NIGHT)
}

fn parse_density(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("ldpi", DENSITY_LOW),
        ("mdpi", DENSITY_MEDIUM),
        ("tvdpi", DENSITY_TV),
        ("hdpi", DENSITY_HIGH),
        ("xhdpi", DENSITY_XHIGH),
        ("xxhdpi", DENSITY_XXHIGH),
        ("xxxhdpi", DENSITY_XXXHIGH),
        ("anydpi", DENSITY_ANY),
        ("nodpi", DENSITY_NONE),
    ];
    if let Some(density) = lookup(token, &table) {
        config.density = density;
        return true;
    }

    match parse_number(token, "", "dpi") {
        Some(dpi) if dpi != 0 => {
            config.density = dpi;
            true
        }
        _ => false,
    }
}

fn parse_touchscreen(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("notouch", TOUCHSCREEN_NOTOUCH),
        ("stylus", TOUCHSCREEN_STYLUS),
        ("finger", TOUCHSCREEN_FINGER),
    ];
    parse_keyword(token, &table, &mut config.touchscreen)
}

fn parse_keys_hidden(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("keysexposed", KEYSHIDDEN_NO),
        ("keyshidden", KEYSHIDDEN_YES),
        ("keyssoft", KEYSHIDDEN_SOFT),
    ];
    parse_masked(token, &table, &mut config.input_flags, MASK_KEYSHIDDEN)
}

fn parse_keyboard(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("nokeys", KEYBOARD_NOKEYS),
        ("qwerty", KEYBOARD_QWERTY),
        ("12key", KEYBOARD_12KEY),
    ];
    parse_keyword(token, &table, &mut config.keyboard)
}

fn parse_nav_hidden(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [("navexposed", NAVHIDDEN_NO), ("navhidden", NAVHIDDEN_YES)];
    parse_masked(token, &table, &mut config.input_flags, MASK_NAVHIDDEN)
}

fn parse_navigation(token: &str, config: &mut ConfigDescription) -> bool {
    let table = [
        ("nonav", NAVIGATION_NONAV),
        ("dpad", NAVIGATION_DPAD),
        ("trackball", NAVIGATION_TRACKBALL),
        ("wheel", NAVIGATION_WHEEL),
    ];
    parse_keyword(token, &table, &mut config.navigation)
}

/// Parses `<width>x<height>` in pixels. The larger dimension comes first.
fn parse_screen_size(token: &str, config: &mut ConfigDescription) -> bool {
    if token == WILDCARD {
        config.screen_width = 0;
        config.screen_height = 0;
        return true;
    }

    let Some((width, height)) = token.split_once('x') else {
        return false;
    };
    let (Some(width), Some(height)) = (parse_number(width, "", ""), parse_number(height, "", ""))
    else {
        return false;
    };
    if width < height {
        return false;
    }

    config.screen_width = width;
    config.screen_height = height;
    true
}

/// Parses `v<sdk>` or `v<sdk>.<minor>`.
fn parse_version(token: &str, config: &mut ConfigDescription) -> bool {
    if token == WILDCARD {
        config.sdk_version = 0;
        config.minor_version = 0;
        return true;
    }

    let Some(version) = token.strip_prefix('v') else {
        return false;
    };
    let (sdk, minor) = match version.split_once('.') {
        Some((sdk, minor)) => (parse_number(sdk, "", ""), parse_number(minor, "", "")),
        None => (parse_number(version, "", ""), Some(0)),
    };
    let (Some(sdk), Some(minor)) = (sdk, minor) else {
        return false;
    };

    config.sdk_version = sdk;
    config.minor_version = minor;
    true
}
