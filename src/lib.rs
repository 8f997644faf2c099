//! Cookie serialization toolkit for Rust.
//!
//! Supports parsing, writing, and converting cookie data between JSON, CSV,
//! Netscape cookie file, and XML formats.
//! All conversion happens through the unified `CookieRecord` model: every
//! parser normalizes what it reads, so downstream code never sees a record
//! with missing or mistyped fields.
//!
//! ```rust
//! use cookiecodec::{parse_imported_cookies, format_cookies_data};
//! use cookiecodec::{CookieCollection, FormatType};
//!
//! let cookies = parse_imported_cookies(
//!     "example.com\tFALSE\t/\tTRUE\t1700000000\tsid\tabc123",
//!     "netscape",
//! )?;
//! assert_eq!(cookies[0].name, "sid");
//!
//! let export = format_cookies_data(&CookieCollection::Flat(cookies), &FormatType::Csv)?;
//! assert!(export.csv.unwrap().starts_with("Domain,Flag,Path,Secure,Expiration,Name,Value"));
//! # Ok::<(), cookiecodec::Error>(())
//! ```

pub mod codec;
pub mod error;
pub mod filter;
pub mod formats;
pub mod traits;
pub mod types;
pub mod validate;

// Re-export most used types for easy consumption
pub use crate::{
    codec::{
        ExportData, convert, convert_auto, format_cookies_data, infer_format_from_extension,
        parse_imported_cookies,
    },
    error::Error,
    filter::{CookieFilter, CookieType, filter_collection, filter_cookies},
    formats::FormatType,
    types::{CookieCollection, CookieRecord, normalize},
    validate::{BatchValidation, ValidationResult, validate_batch, validate_cookie},
};
