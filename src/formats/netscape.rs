//! Support for the Netscape cookie file format.
//!
//! The tab-separated plaintext format historically used by `curl` and `wget`:
//! one line per cookie, `#`-prefixed comment lines and blank lines ignored.
//! Column order matches the CSV format. An expiration of `0` marks a session
//! cookie, both when writing and when reading back.

use std::io::{BufRead, Write};

use crate::{
    error::Error,
    formats::csv::{record_from_columns, render_flag},
    traits::Parser,
    types::{CookieCollection, CookieRecord},
};

/// Represents a Netscape cookie file.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub collection: CookieCollection,
}

impl Parser for Format {
    /// Parse from any reader.
    ///
    /// Zero qualifying lines yield an empty collection; lines with fewer than
    /// 7 tab-separated fields are skipped. Fields are taken verbatim, without
    /// trimming or unquoting.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(Error::Io)?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let parts: Vec<&str> = line.split('\t').collect();
            if parts.len() < 7 {
                continue;
            }
            let mut record = record_from_columns(
                parts[0], parts[1], parts[2], parts[3], parts[4], parts[5], parts[6],
            );
            // Expiration 0 is the session-cookie convention in this format.
            if record.expiration_date == Some(0.0) {
                record.expiration_date = None;
            }
            records.push(record);
        }
        Ok(Format {
            collection: CookieCollection::Flat(records),
        })
    }

    /// Write to any writer (file, memory, etc.).
    ///
    /// Booleans render as uppercase `TRUE`/`FALSE`; session cookies render an
    /// expiration of `0`, timestamps truncate to integer seconds. A grouped
    /// collection is flattened.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        for cookie in self.collection.iter() {
            let expiration = cookie
                .expiration_date
                .map_or(0, |seconds| seconds.trunc() as i64);
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                cookie.domain,
                render_flag(cookie.http_only),
                cookie.path,
                render_flag(cookie.secure),
                expiration,
                cookie.name,
                cookie.value,
            )?;
        }
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
