//! All supported cookie interchange formats for cookiecodec.
//!
//! This module re-exports the main types for each format and provides
//! the [`FormatType`] enum for generic format handling across the crate.

pub mod csv;
pub mod json;
pub mod netscape;
pub mod xml;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

// Reexporting the formats for easier access
pub use csv::Format as CsvFormat;
pub use json::Format as JsonFormat;
pub use netscape::Format as NetscapeFormat;
pub use xml::Format as XmlFormat;

use crate::Error;

/// Represents all supported cookie file formats for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// JSON, either a flat cookie array or a domain→array map.
    Json,
    /// Comma-separated values with a fixed 7-column layout.
    Csv,
    /// Netscape tab-separated cookie file, as used by `curl` and `wget`.
    Netscape,
    /// XML with one `<cookie>` element per record.
    Xml,
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Json => write!(f, "json"),
            FormatType::Csv => write!(f, "csv"),
            FormatType::Netscape => write!(f, "netscape"),
            FormatType::Xml => write!(f, "xml"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`FormatType`].
///
/// Accepts `"json"`, `"csv"`, `"netscape"`, and `"xml"`, case-insensitively
/// and ignoring surrounding whitespace. Returns
/// [`crate::error::Error::UnknownFormat`] for anything else.
///
/// # Example
/// ```rust
/// use cookiecodec::formats::FormatType;
/// use std::str::FromStr;
/// assert_eq!(FormatType::from_str("json").unwrap(), FormatType::Json);
/// assert_eq!(FormatType::from_str("NETSCAPE").unwrap(), FormatType::Netscape);
/// assert!(FormatType::from_str("yaml").is_err());
/// ```
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "json" => Ok(FormatType::Json),
            "csv" => Ok(FormatType::Csv),
            "netscape" => Ok(FormatType::Netscape),
            "xml" => Ok(FormatType::Xml),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Json => "json",
            FormatType::Csv => "csv",
            FormatType::Netscape => "txt",
            FormatType::Xml => "xml",
        }
    }
}
