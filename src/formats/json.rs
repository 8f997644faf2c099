//! Support for the JSON cookie interchange format.
//!
//! Parsing accepts three top-level shapes: a flat array of cookie objects, an
//! object carrying a `cookies` field (array or domain→array map), or a bare
//! domain→array map. Serialization is a passthrough of the collection.

use std::io::{BufRead, Write};

use serde_json::Value;

use crate::{
    error::Error,
    traits::Parser,
    types::{CookieCollection, CookieRecord, normalize},
};

/// Represents a JSON cookie document.
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub collection: CookieCollection,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let value: Value = serde_json::from_reader(reader).map_err(Error::Json)?;
        Ok(Format {
            collection: CookieCollection::Flat(collect_records(&value)?),
        })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        serde_json::to_writer_pretty(&mut writer, &self.collection).map_err(Error::Json)
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

fn collect_records(value: &Value) -> Result<Vec<CookieRecord>, Error> {
    match value {
        Value::Array(items) => Ok(items.iter().map(normalize).collect()),
        Value::Object(map) => match map.get("cookies") {
            Some(Value::Array(items)) => Ok(items.iter().map(normalize).collect()),
            Some(Value::Object(domains)) => Ok(flatten_domain_map(domains)),
            Some(_) => Err(Error::data_mismatch("invalid JSON format")),
            None => Ok(flatten_domain_map(map)),
        },
        _ => Err(Error::data_mismatch("invalid JSON format")),
    }
}

fn flatten_domain_map(map: &serde_json::Map<String, Value>) -> Vec<CookieRecord> {
    let mut records = Vec::new();
    for value in map.values() {
        match value {
            Value::Array(items) => records.extend(items.iter().map(normalize)),
            other => records.push(normalize(other)),
        }
    }
    records
}
