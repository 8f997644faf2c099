//! User-facing entry points: exporting a collection to a named format,
//! importing text under a format tag, extension-based format inference, and
//! file-to-file conversion through the canonical record model.

use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

use crate::{
    error::Error,
    formats::{CsvFormat, FormatType, JsonFormat, NetscapeFormat, XmlFormat},
    traits::Parser,
    types::{CookieCollection, CookieRecord},
};

/// Export payload handed back to the caller. Exactly one of the
/// format-specific keys is populated; JSON (the default) uses `cookies` and
/// carries the collection unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub netscape: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookies: Option<CookieCollection>,

    pub count: usize,

    pub grouped: bool,
}

impl ExportData {
    fn empty(count: usize, grouped: bool) -> Self {
        ExportData {
            csv: None,
            xml: None,
            netscape: None,
            cookies: None,
            count,
            grouped,
        }
    }
}

/// Serializes a collection into the requested format.
///
/// # Example
///
/// ```rust
/// use cookiecodec::{CookieCollection, FormatType, format_cookies_data};
///
/// let data = format_cookies_data(&CookieCollection::Flat(Vec::new()), &FormatType::Csv)?;
/// assert_eq!(
///     data.csv.as_deref(),
///     Some("Domain,Flag,Path,Secure,Expiration,Name,Value\n")
/// );
/// # Ok::<(), cookiecodec::Error>(())
/// ```
pub fn format_cookies_data(
    collection: &CookieCollection,
    format: &FormatType,
) -> Result<ExportData, Error> {
    let mut data = ExportData::empty(collection.len(), collection.is_grouped());
    match format {
        FormatType::Csv => {
            data.csv = Some(CsvFormat::from(collection.clone()).to_text()?);
        }
        FormatType::Xml => {
            data.xml = Some(XmlFormat::from(collection.clone()).to_text()?);
        }
        FormatType::Netscape => {
            data.netscape = Some(NetscapeFormat::from(collection.clone()).to_text()?);
        }
        FormatType::Json => {
            data.cookies = Some(collection.clone());
        }
    }
    Ok(data)
}

/// Parses imported text under the given format tag into normalized records.
///
/// The tag is resolved with [`FormatType::from_str`]; an unrecognized tag
/// fails with [`Error::UnknownFormat`], unparsable content with the error the
/// format's parser raises.
///
/// # Example
///
/// ```rust
/// use cookiecodec::parse_imported_cookies;
///
/// let cookies =
///     parse_imported_cookies(r#"[{"name":"a","value":"b","domain":"x.com"}]"#, "json")?;
/// assert_eq!(cookies.len(), 1);
/// assert_eq!(cookies[0].path, "/");
/// # Ok::<(), cookiecodec::Error>(())
/// ```
pub fn parse_imported_cookies(data: &str, format: &str) -> Result<Vec<CookieRecord>, Error> {
    let collection = match FormatType::from_str(format)? {
        FormatType::Json => JsonFormat::from_str(data)?.collection,
        FormatType::Csv => CsvFormat::from_str(data)?.collection,
        FormatType::Netscape => NetscapeFormat::from_str(data)?.collection,
        FormatType::Xml => XmlFormat::from_str(data)?.collection,
    };
    Ok(collection.flatten())
}

/// Infers a [`FormatType`] from a file path's extension.
///
/// `.txt` is the Netscape cookie file convention; any unrecognized extension
/// also falls back to Netscape as the permissive default for dropped files.
///
/// # Example
/// ```rust
/// use cookiecodec::formats::FormatType;
/// use cookiecodec::codec::infer_format_from_extension;
/// assert_eq!(infer_format_from_extension("cookies.json"), FormatType::Json);
/// assert_eq!(infer_format_from_extension("cookies.txt"), FormatType::Netscape);
/// assert_eq!(infer_format_from_extension("cookies.bak"), FormatType::Netscape);
/// ```
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> FormatType {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => FormatType::Json,
        Some(ext) if ext.eq_ignore_ascii_case("csv") => FormatType::Csv,
        Some(ext) if ext.eq_ignore_ascii_case("xml") => FormatType::Xml,
        _ => FormatType::Netscape,
    }
}

/// Convert a cookie file from one format to another.
///
/// # Errors
///
/// Returns an `Error` if reading, parsing, or writing fails.
///
/// # Example
///
/// ```rust,no_run
/// use cookiecodec::{convert, formats::FormatType};
/// convert("cookies.txt", FormatType::Netscape, "cookies.json", FormatType::Json)?;
/// # Ok::<(), cookiecodec::Error>(())
/// ```
pub fn convert<P: AsRef<Path>>(
    input: P,
    input_format: FormatType,
    output: P,
    output_format: FormatType,
) -> Result<(), Error> {
    let collection = match input_format {
        FormatType::Json => JsonFormat::read_from(&input)?.collection,
        FormatType::Csv => CsvFormat::read_from(&input)?.collection,
        FormatType::Netscape => NetscapeFormat::read_from(&input)?.collection,
        FormatType::Xml => XmlFormat::read_from(&input)?.collection,
    };

    match output_format {
        FormatType::Json => JsonFormat::from(collection).write_to(&output),
        FormatType::Csv => CsvFormat::from(collection).write_to(&output),
        FormatType::Netscape => NetscapeFormat::from(collection).write_to(&output),
        FormatType::Xml => XmlFormat::from(collection).write_to(&output),
    }
}

/// Convert a cookie file from one format to another, inferring both formats
/// from the file extensions.
///
/// # Example
///
/// ```rust,no_run
/// use cookiecodec::convert_auto;
/// convert_auto("cookies.txt", "cookies.json")?;
/// # Ok::<(), cookiecodec::Error>(())
/// ```
pub fn convert_auto<P: AsRef<Path>>(input: P, output: P) -> Result<(), Error> {
    let input_format = infer_format_from_extension(&input);
    let output_format = infer_format_from_extension(&output);
    convert(input, input_format, output, output_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_records() -> Vec<CookieRecord> {
        vec![
            CookieRecord {
                name: "sid".into(),
                value: "abc".into(),
                domain: "x.com".into(),
                path: "/".into(),
                secure: true,
                http_only: false,
                expiration_date: Some(1700000000.0),
            },
            CookieRecord {
                name: "pref".into(),
                value: "dark".into(),
                domain: "y.com".into(),
                path: "/".into(),
                secure: false,
                http_only: true,
                expiration_date: None,
            },
        ]
    }

    #[test]
    fn test_format_cookies_data_populates_one_key() {
        let collection = CookieCollection::Flat(sample_records());

        let data = format_cookies_data(&collection, &FormatType::Csv).unwrap();
        assert!(data.csv.is_some());
        assert!(data.xml.is_none() && data.netscape.is_none() && data.cookies.is_none());
        assert_eq!(data.count, 2);
        assert!(!data.grouped);

        let data = format_cookies_data(&collection, &FormatType::Json).unwrap();
        assert_eq!(data.cookies, Some(collection.clone()));
        assert!(data.csv.is_none());
    }

    #[test]
    fn test_format_cookies_data_grouped() {
        let grouped = CookieCollection::group_by_domain(sample_records());
        let data = format_cookies_data(&grouped, &FormatType::Xml).unwrap();
        assert!(data.grouped);
        assert_eq!(data.count, 2);
        assert!(data.xml.unwrap().contains("<domain name=\"x.com\">"));
    }

    #[test]
    fn test_parse_imported_cookies_unknown_tag() {
        let err = parse_imported_cookies("[]", "yaml").unwrap_err();
        assert!(matches!(err, Error::UnknownFormat(_)));
    }

    #[test]
    fn test_parse_imported_cookies_dispatch() {
        let cookies =
            parse_imported_cookies("x.com\tTRUE\t/\tTRUE\t0\tsid\tabc123", "netscape").unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "sid");
    }

    #[test]
    fn test_infer_format_from_extension() {
        assert_eq!(infer_format_from_extension("a.JSON"), FormatType::Json);
        assert_eq!(infer_format_from_extension("a.csv"), FormatType::Csv);
        assert_eq!(infer_format_from_extension("a.xml"), FormatType::Xml);
        assert_eq!(infer_format_from_extension("a.txt"), FormatType::Netscape);
        assert_eq!(infer_format_from_extension("no_extension"), FormatType::Netscape);
    }
}
