//! Support for the CSV cookie interchange format.
//!
//! Fixed 7-column layout shared with the Netscape format:
//! `domain, httpOnly, path, secure, expirationDate, name, value`.
//! The header row is written on export and discarded unvalidated on import.

use std::io::{BufRead, Write};

use crate::{
    error::Error,
    traits::Parser,
    types::{CookieCollection, CookieRecord, parse_float_prefix},
};

/// Header row emitted ahead of the data rows. The column order matches the
/// parser so exports re-import unchanged.
pub const CSV_HEADER: &str = "Domain,Flag,Path,Secure,Expiration,Name,Value";

/// Represents a CSV cookie document.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub collection: CookieCollection,
}

impl Parser for Format {
    /// Parse from any reader.
    ///
    /// Requires a header row plus at least one data row; rows with fewer than
    /// 7 fields are skipped rather than errored.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(Error::Io)?;

        let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
        if lines.len() < 2 {
            return Err(Error::data_mismatch(
                "CSV must contain a header row and at least one data row",
            ));
        }

        // Line 0 is the header; its content is not validated.
        let body = lines[1..].join("\n");
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            if row.len() < 7 {
                continue;
            }
            records.push(record_from_columns(
                &row[0], &row[1], &row[2], &row[3], &row[4], &row[5], &row[6],
            ));
        }

        Ok(Format {
            collection: CookieCollection::Flat(records),
        })
    }

    /// Write to any writer (file, memory, etc.).
    ///
    /// Every data field is double-quoted; embedded quotes are doubled per
    /// standard CSV quoting. A grouped collection is flattened.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer.write_all(CSV_HEADER.as_bytes())?;
        writer.write_all(b"\n")?;

        let mut wtr = csv::WriterBuilder::new()
            .quote_style(csv::QuoteStyle::Always)
            .from_writer(writer);
        for cookie in self.collection.iter() {
            let expiration = match cookie.expiration_date {
                Some(seconds) => seconds.to_string(),
                None => String::new(),
            };
            wtr.write_record([
                cookie.domain.as_str(),
                render_flag(cookie.http_only),
                cookie.path.as_str(),
                render_flag(cookie.secure),
                expiration.as_str(),
                cookie.name.as_str(),
                cookie.value.as_str(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl From<CookieCollection> for Format {
    fn from(collection: CookieCollection) -> Self {
        Format { collection }
    }
}

impl From<Vec<CookieRecord>> for Format {
    fn from(records: Vec<CookieRecord>) -> Self {
        Format {
            collection: CookieCollection::Flat(records),
        }
    }
}

pub(crate) fn render_flag(flag: bool) -> &'static str {
    if flag { "TRUE" } else { "FALSE" }
}

pub(crate) fn record_from_columns(
    domain: &str,
    http_only: &str,
    path: &str,
    secure: &str,
    expiration: &str,
    name: &str,
    value: &str,
) -> CookieRecord {
    let expiration_date = if expiration.is_empty() {
        None
    } else {
        parse_float_prefix(expiration)
    };
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: domain.to_string(),
        path: path.to_string(),
        secure: secure.eq_ignore_ascii_case("true"),
        http_only: http_only.eq_ignore_ascii_case("true"),
        expiration_date,
    }
    .normalized()
}
