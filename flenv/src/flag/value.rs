//! Per-type parsing and formatting for flag values.
//!
//! [`FlagType`] is the function table behind every [`Flag`](super::Flag):
//! one parse routine, one formatting routine, a usage placeholder and a
//! toggle marker. New value types plug into the registry by implementing
//! this trait; nothing else in the crate is type-specific.

use std::time::Duration;

use url::Url;

/// A value type that can be carried by a flag.
///
/// # Examples
///
/// ```
/// use flenv::FlagType;
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Percentage(u8);
///
/// impl FlagType for Percentage {
///     const PLACEHOLDER: &'static str = "PCT";
///
///     fn parse(raw: &str) -> Result<Self, String> {
///         match raw.parse::<u8>() {
///             Ok(n) if n <= 100 => Ok(Self(n)),
///             _ => Err("expected an integer between 0 and 100".to_owned()),
///         }
///     }
///
///     fn format(&self) -> String {
///         format!("{}%", self.0)
///     }
/// }
///
/// assert_eq!(Percentage::parse("40"), Ok(Percentage(40)));
/// assert!(Percentage::parse("140").is_err());
/// ```
pub trait FlagType: Clone + 'static {
    /// Display token shown in usage text, e.g. `INT` in `--count=INT`.
    const PLACEHOLDER: &'static str;

    /// Whether bare `--name` sets the flag without consuming a value.
    ///
    /// Only the boolean implementation turns this on; toggle flags reject
    /// placeholders, defaults and the required marker.
    const IS_TOGGLE: bool = false;

    /// Decode a raw textual value.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when `raw` is not a valid rendering
    /// of this type. The caller wraps the reason together with the flag
    /// name and the offending text.
    fn parse(raw: &str) -> Result<Self, String>;

    /// Render the value for display in `(default: …)` qualifiers.
    fn format(&self) -> String;
}

impl FlagType for bool {
    const PLACEHOLDER: &'static str = "";
    const IS_TOGGLE: bool = true;

    fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
            _ => Err("invalid boolean literal".to_owned()),
        }
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl FlagType for i64 {
    const PLACEHOLDER: &'static str = "INT";

    fn parse(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: std::num::ParseIntError| err.to_string())
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl FlagType for f64 {
    const PLACEHOLDER: &'static str = "FLOAT";

    fn parse(raw: &str) -> Result<Self, String> {
        raw.parse().map_err(|err: std::num::ParseFloatError| err.to_string())
    }

    fn format(&self) -> String {
        self.to_string()
    }
}

impl FlagType for Duration {
    const PLACEHOLDER: &'static str = "DURATION";

    fn parse(raw: &str) -> Result<Self, String> {
        humantime::parse_duration(raw).map_err(|err| err.to_string())
    }

    fn format(&self) -> String {
        humantime::format_duration(*self).to_string()
    }
}

impl FlagType for String {
    const PLACEHOLDER: &'static str = "STRING";

    fn parse(raw: &str) -> Result<Self, String> {
        Ok(raw.to_owned())
    }

    fn format(&self) -> String {
        self.clone()
    }
}

impl FlagType for Url {
    const PLACEHOLDER: &'static str = "URL";

    fn parse(raw: &str) -> Result<Self, String> {
        raw.parse::<Self>().map_err(|err| err.to_string())
    }

    fn format(&self) -> String {
        String::from(self.as_str())
    }
}
