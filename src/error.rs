use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Most user-facing problems in a resource build (duplicate values, conflicting ids, bad entry
/// names) are not surfaced through this type: they are reported to a
/// [`crate::diagnostics::Diagnostics`] sink so that a compiler pass can keep going and report
/// every problem at once. This enum covers the conditions that stop an operation outright.
///
/// # Error Categories
///
/// ## Input Errors
/// - [`Error::InvalidConfig`] - A qualifier string could not be parsed
/// - [`Error::InvalidResourceName`] - A `package:type/entry` reference could not be parsed
///
/// ## Serialization Errors
/// - [`Error::StringTooLong`] - A string exceeds what the pool length prefix can encode
/// - [`Error::Malformed`] - A flattened string pool is corrupted
/// - [`Error::OutOfBounds`] - Attempted to read beyond the end of a buffer
///
/// # Examples
///
/// ```rust
/// use resforge::{Error, config::ConfigDescription};
///
/// match "land-en".parse::<ConfigDescription>() {
///     Ok(config) => println!("parsed {config}"),
///     Err(Error::InvalidConfig { qualifier, token }) => {
///         eprintln!("invalid qualifier '{token}' in '{qualifier}'");
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration qualifier string was rejected.
    ///
    /// Parsing consumes qualifiers in a fixed canonical order, so this covers unknown
    /// tokens, trailing dashes and qualifiers that appear out of order.
    ///
    /// # Fields
    ///
    /// * `qualifier` - The complete string that was being parsed
    /// * `token` - The first token that no remaining axis accepted
    #[error("Invalid configuration '{qualifier}' - unexpected qualifier '{token}'")]
    InvalidConfig {
        /// The complete qualifier string
        qualifier: String,
        /// The offending token
        token: String,
    },

    /// A resource name reference could not be parsed.
    ///
    /// Resource names have the form `[package:]type/entry`, where `type` is one of the
    /// known [`crate::table::ResourceType`] names.
    #[error("Invalid resource name - {0}")]
    InvalidResourceName(String),

    /// A string is too long to be length-prefixed in the binary pool format.
    ///
    /// The two-unit length prefix can describe at most 0x7FFF_FFFF UTF-16 code units or
    /// 0x7FFF UTF-8 bytes.
    #[error("String of length {0} exceeds the maximum encodable pool string length")]
    StringTooLong(usize),

    /// The data is damaged and could not be parsed.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while reading a buffer.
    #[error("Out of Bound read would have occurred!")]
    OutOfBounds,

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
