//! Support for the XML cookie interchange format.
//!
//! One `<cookie>` element per record with scalar children
//! `name, value, domain, path, secure, flag, expiration` (`flag` carries the
//! HttpOnly bit). Reading scans for `<cookie>` blocks and never hard-fails:
//! malformed input simply yields fewer (or zero) records.

use std::io::{BufRead, Write};

use lazy_static::lazy_static;
use quick_xml::{
    Writer,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use regex::Regex;

use crate::{
    error::Error,
    formats::csv::render_flag,
    traits::Parser,
    types::{CookieCollection, CookieRecord, parse_float_prefix},
};

lazy_static! {
    static ref COOKIE_BLOCK_REGEX: Regex =
        Regex::new(r"(?s)<cookie>(.*?)</cookie>").expect("static pattern compiles");
}

/// Represents an XML cookie document.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub collection: CookieCollection,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(Error::Io)?;

        let records = COOKIE_BLOCK_REGEX
            .captures_iter(&text)
            .map(|capture| record_from_block(&capture[1]))
            .collect();
        Ok(Format {
            collection: CookieCollection::Flat(records),
        })
    }

    /// Write to any writer (file, memory, etc.).
    ///
    /// A grouped collection inserts a `<domain name="…">` wrapper per domain
    /// between the `<cookies>` root and the `<cookie>` blocks.
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        xml_writer.write_event(Event::Start(BytesStart::new("cookies")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        match &self.collection {
            CookieCollection::Flat(records) => {
                for cookie in records {
                    write_cookie(&mut xml_writer, cookie)?;
                }
            }
            CookieCollection::Grouped(map) => {
                for (domain, records) in map {
                    let mut elem = BytesStart::new("domain");
                    elem.push_attribute(("name", domain.as_str()));
                    xml_writer.write_event(Event::Start(elem))?;
                    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
                    for cookie in records {
                        write_cookie(&mut xml_writer, cookie)?;
                    }
                    xml_writer.write_event(Event::End(BytesEnd::new("domain")))?;
                    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
                }
            }
        }

        xml_writer.write_event(Event::End(BytesEnd::new("cookies")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
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

fn write_cookie<W: Write>(
    xml_writer: &mut Writer<&mut W>,
    cookie: &CookieRecord,
) -> Result<(), Error> {
    let expiration = match cookie.expiration_date {
        Some(seconds) => seconds.to_string(),
        None => String::new(),
    };
    let children = [
        ("name", cookie.name.as_str()),
        ("value", cookie.value.as_str()),
        ("domain", cookie.domain.as_str()),
        ("path", cookie.path.as_str()),
        ("secure", render_flag(cookie.secure)),
        ("flag", render_flag(cookie.http_only)),
        ("expiration", expiration.as_str()),
    ];

    xml_writer.write_event(Event::Start(BytesStart::new("cookie")))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    for (tag, text) in children {
        xml_writer.write_event(Event::Start(BytesStart::new(tag)))?;
        if !text.is_empty() {
            xml_writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        xml_writer.write_event(Event::End(BytesEnd::new(tag)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    }
    xml_writer.write_event(Event::End(BytesEnd::new("cookie")))?;
    xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
    Ok(())
}

fn record_from_block(block: &str) -> CookieRecord {
    let expiration_text = tag_text(block, "expiration");
    let expiration_date = if expiration_text.is_empty() {
        None
    } else {
        parse_float_prefix(&expiration_text)
    };
    let path = tag_text(block, "path");

    CookieRecord {
        name: tag_text(block, "name"),
        value: tag_text(block, "value"),
        domain: tag_text(block, "domain"),
        path: if path.is_empty() { "/".to_string() } else { path },
        secure: tag_text(block, "secure").eq_ignore_ascii_case("true"),
        http_only: tag_text(block, "flag").eq_ignore_ascii_case("true"),
        expiration_date,
    }
    .normalized()
}

/// Extracts the text of the first `<tag>…</tag>` occurrence in a block,
/// entity-unescaped. Missing tags and unescape failures both degrade to the
/// raw content rather than erroring.
fn tag_text(block: &str, tag: &str) -> String {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let Some(start) = block.find(&open) else {
        return String::new();
    };
    let content_start = start + open.len();
    let Some(end) = block[content_start..].find(&close) else {
        return String::new();
    };
    let raw = &block[content_start..content_start + end];
    quick_xml::escape::unescape(raw)
        .map(|unescaped| unescaped.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}
