//! Raw qualifier values and bit masks of the device configuration record.
//!
//! These mirror the values the platform runtime stores in its configuration structure, so a
//! [`crate::config::ConfigDescription`] can be compared field by field with what a device
//! reports. A value of zero always means "not specified".

// Mobile network codes
/// Sentinel stored in `mnc` for an explicit `mnc00`, which is distinct from "unset".
pub const MNC_ZERO: u16 = 0xffff;

// Orientation
/// Portrait orientation (`port`).
pub const ORIENTATION_PORT: u8 = 1;
/// Landscape orientation (`land`).
pub const ORIENTATION_LAND: u8 = 2;
/// Square orientation (`square`).
pub const ORIENTATION_SQUARE: u8 = 3;

// Touchscreen
/// No touchscreen (`notouch`).
pub const TOUCHSCREEN_NOTOUCH: u8 = 1;
/// Stylus input (`stylus`).
pub const TOUCHSCREEN_STYLUS: u8 = 2;
/// Finger input (`finger`).
pub const TOUCHSCREEN_FINGER: u8 = 3;

// Density
/// No density qualifier.
pub const DENSITY_DEFAULT: u16 = 0;
/// `ldpi`
pub const DENSITY_LOW: u16 = 120;
/// `mdpi`
pub const DENSITY_MEDIUM: u16 = 160;
/// `tvdpi`
pub const DENSITY_TV: u16 = 213;
/// `hdpi`
pub const DENSITY_HIGH: u16 = 240;
/// `xhdpi`
pub const DENSITY_XHIGH: u16 = 320;
/// `xxhdpi`
pub const DENSITY_XXHIGH: u16 = 480;
/// `xxxhdpi`
pub const DENSITY_XXXHIGH: u16 = 640;
/// `anydpi`, scalable resources usable at every density.
pub const DENSITY_ANY: u16 = 0xfffe;
/// `nodpi`, resources that must never be scaled.
pub const DENSITY_NONE: u16 = 0xffff;

// Keyboard
/// `nokeys`
pub const KEYBOARD_NOKEYS: u8 = 1;
/// `qwerty`
pub const KEYBOARD_QWERTY: u8 = 2;
/// `12key`
pub const KEYBOARD_12KEY: u8 = 3;

// Navigation
/// `nonav`
pub const NAVIGATION_NONAV: u8 = 1;
/// `dpad`
pub const NAVIGATION_DPAD: u8 = 2;
/// `trackball`
pub const NAVIGATION_TRACKBALL: u8 = 3;
/// `wheel`
pub const NAVIGATION_WHEEL: u8 = 4;

// Input flags
/// Bits of `input_flags` holding the keyboard visibility.
pub const MASK_KEYSHIDDEN: u8 = 0x03;
/// `keysexposed`
pub const KEYSHIDDEN_NO: u8 = 0x01;
/// `keyshidden`
pub const KEYSHIDDEN_YES: u8 = 0x02;
/// `keyssoft`
pub const KEYSHIDDEN_SOFT: u8 = 0x03;

/// Bits of `input_flags` holding the navigation visibility.
pub const MASK_NAVHIDDEN: u8 = 0x0c;
/// `navexposed`
pub const NAVHIDDEN_NO: u8 = 0x01 << 2;
/// `navhidden`
pub const NAVHIDDEN_YES: u8 = 0x02 << 2;

// Screen layout
/// Bits of `screen_layout` holding the screen size class.
pub const MASK_SCREENSIZE: u8 = 0x0f;
/// `small`
pub const SCREENSIZE_SMALL: u8 = 0x01;
/// `normal`
pub const SCREENSIZE_NORMAL: u8 = 0x02;
/// `large`
pub const SCREENSIZE_LARGE: u8 = 0x03;
/// `xlarge`
pub const SCREENSIZE_XLARGE: u8 = 0x04;

/// Bits of `screen_layout` holding the long-screen flag.
pub const MASK_SCREENLONG: u8 = 0x30;
/// `notlong`
pub const SCREENLONG_NO: u8 = 0x01 << 4;
/// `long`
pub const SCREENLONG_YES: u8 = 0x02 << 4;

/// Bits of `screen_layout` holding the layout direction.
pub const MASK_LAYOUTDIR: u8 = 0xc0;
/// `ldltr`
pub const LAYOUTDIR_LTR: u8 = 0x01 << 6;
/// `ldrtl`
pub const LAYOUTDIR_RTL: u8 = 0x02 << 6;

// Screen layout 2
/// Bits of `screen_layout2` holding the round-screen flag.
pub const MASK_SCREENROUND: u8 = 0x03;
/// `notround`
pub const SCREENROUND_NO: u8 = 0x01;
/// `round`
pub const SCREENROUND_YES: u8 = 0x02;

// UI mode
/// Bits of `ui_mode` holding the UI mode type.
pub const MASK_UI_MODE_TYPE: u8 = 0x0f;
/// Regular handheld UI. Never produced by the parser, `normal` is a screen size.
pub const UI_MODE_TYPE_NORMAL: u8 = 0x01;
/// `desk`
pub const UI_MODE_TYPE_DESK: u8 = 0x02;
/// `car`
pub const UI_MODE_TYPE_CAR: u8 = 0x03;
/// `television`
pub const UI_MODE_TYPE_TELEVISION: u8 = 0x04;
/// `appliance`
pub const UI_MODE_TYPE_APPLIANCE: u8 = 0x05;
/// `watch`
pub const UI_MODE_TYPE_WATCH: u8 = 0x06;
/// `vrheadset`
pub const UI_MODE_TYPE_VR_HEADSET: u8 = 0x07;

/// Bits of `ui_mode` holding the night flag.
pub const MASK_UI_MODE_NIGHT: u8 = 0x30;
/// `notnight`
pub const UI_MODE_NIGHT_NO: u8 = 0x01 << 4;
/// `night`
pub const UI_MODE_NIGHT_YES: u8 = 0x02 << 4;

// Platform versions implied by qualifiers
/// First platform version supporting screen size, long and density qualifiers.
pub const SDK_DONUT: u16 = 4;
/// First platform version supporting UI mode qualifiers.
pub const SDK_FROYO: u16 = 8;
/// First platform version supporting dp based width and height qualifiers.
pub const SDK_HONEYCOMB_MR2: u16 = 13;
/// First platform version supporting `anydpi`.
pub const SDK_LOLLIPOP: u16 = 21;
/// First platform version supporting round screens.
pub const SDK_MARSHMALLOW: u16 = 23;
/// First platform version supporting `vrheadset`.
pub const SDK_O: u16 = 26;
