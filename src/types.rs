//! Core, format-agnostic types for cookiecodec.
//! Parsers decode into these; serializers encode these.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canonical normalized representation of one HTTP cookie.
///
/// Every parser funnels its output through [`normalize`] (or the typed
/// [`CookieRecord::normalized`]), so a record obtained from this crate always
/// upholds the field invariants: the four string fields are present, flags are
/// real booleans, and `expiration_date` is `None` (session cookie) or a
/// non-negative, non-NaN Unix-seconds timestamp.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieRecord {
    pub name: String,

    pub value: String,

    pub domain: String,

    #[serde(default = "default_path")]
    pub path: String,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub http_only: bool,

    /// `None` marks a session cookie.
    #[serde(default)]
    pub expiration_date: Option<f64>,
}

fn default_path() -> String {
    "/".to_string()
}

impl CookieRecord {
    /// Applies the normalization rules that make sense on an already-typed
    /// record: the path default and the expiration clamp. Parsers that build
    /// records field-by-field (CSV, Netscape, XML) call this before emitting.
    pub(crate) fn normalized(mut self) -> Self {
        if self.path.is_empty() {
            self.path = default_path();
        }
        self.expiration_date = self.expiration_date.and_then(clamp_expiration);
        self
    }

    /// True for cookies without an expiration timestamp.
    pub fn is_session(&self) -> bool {
        self.expiration_date.is_none()
    }
}

/// A collection of cookie records, either flat or grouped by domain.
///
/// Grouping is a presentation concern chosen by the caller; a record's own
/// `domain` field stays authoritative regardless of the container shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CookieCollection {
    Flat(Vec<CookieRecord>),
    Grouped(BTreeMap<String, Vec<CookieRecord>>),
}

impl CookieCollection {
    /// Total number of records across the collection.
    pub fn len(&self) -> usize {
        match self {
            CookieCollection::Flat(records) => records.len(),
            CookieCollection::Grouped(map) => map.values().map(Vec::len).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, CookieCollection::Grouped(_))
    }

    /// Collapses the collection into a flat record list, in domain order for
    /// the grouped form.
    pub fn flatten(self) -> Vec<CookieRecord> {
        match self {
            CookieCollection::Flat(records) => records,
            CookieCollection::Grouped(map) => map.into_values().flatten().collect(),
        }
    }

    /// Groups a flat record list by each record's `domain` field.
    pub fn group_by_domain(records: Vec<CookieRecord>) -> Self {
        let mut map: BTreeMap<String, Vec<CookieRecord>> = BTreeMap::new();
        for record in records {
            map.entry(record.domain.clone()).or_default().push(record);
        }
        CookieCollection::Grouped(map)
    }

    /// Iterates all records in collection order.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &CookieRecord> + '_> {
        match self {
            CookieCollection::Flat(records) => Box::new(records.iter()),
            CookieCollection::Grouped(map) => Box::new(map.values().flatten()),
        }
    }
}

impl From<Vec<CookieRecord>> for CookieCollection {
    fn from(records: Vec<CookieRecord>) -> Self {
        CookieCollection::Flat(records)
    }
}

/// Coerces an arbitrary JSON value into the canonical cookie record shape.
///
/// Never fails: every mismatched or missing field resolves to its default.
/// Strings stay as-is, numbers and booleans coerce via their display form,
/// and anything else (null, arrays, objects, absent keys) takes the field
/// default. Boolean fields accept `"true"`/`"false"` case-insensitively and
/// nonzero numbers; expiration accepts numeric strings with
/// `parseFloat`-style prefix parsing, mapping NaN and negatives to `None`.
pub fn normalize(raw: &Value) -> CookieRecord {
    let field = |key: &str| raw.as_object().and_then(|map| map.get(key));

    CookieRecord {
        name: string_field(field("name"), ""),
        value: string_field(field("value"), ""),
        domain: string_field(field("domain"), ""),
        path: string_field(field("path"), "/"),
        secure: bool_field(field("secure")),
        http_only: bool_field(field("httpOnly")),
        expiration_date: expiration_field(field("expirationDate")),
    }
    .normalized()
}

fn string_field(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

fn bool_field(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn expiration_field(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64().and_then(clamp_expiration),
        Some(Value::String(s)) => parse_float_prefix(s).and_then(clamp_expiration),
        _ => None,
    }
}

fn clamp_expiration(seconds: f64) -> Option<f64> {
    if seconds.is_nan() || seconds < 0.0 {
        None
    } else {
        Some(seconds)
    }
}

/// Parses the longest leading float out of a string, after skipping leading
/// whitespace: optional sign, digits with at most one decimal point, and an
/// optional exponent (kept only when followed by digits).
pub(crate) fn parse_float_prefix(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut saw_digits = i > int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        saw_digits |= i > frac_start;
    }
    if !saw_digits {
        return None;
    }

    let mantissa_end = i;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        } else {
            i = mantissa_end;
        }
    }

    trimmed[..i].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_fills_defaults() {
        let record = normalize(&json!({"name": "a", "value": "b", "domain": "x.com"}));
        assert_eq!(record.name, "a");
        assert_eq!(record.value, "b");
        assert_eq!(record.domain, "x.com");
        assert_eq!(record.path, "/");
        assert!(!record.secure);
        assert!(!record.http_only);
        assert_eq!(record.expiration_date, None);
    }

    #[test]
    fn test_normalize_coerces_scalar_types() {
        let record = normalize(&json!({
            "name": 42,
            "value": true,
            "domain": "x.com",
            "secure": "TRUE",
            "httpOnly": 1,
            "expirationDate": "1700000000.5"
        }));
        assert_eq!(record.name, "42");
        assert_eq!(record.value, "true");
        assert!(record.secure);
        assert!(record.http_only);
        assert_eq!(record.expiration_date, Some(1700000000.5));
    }

    #[test]
    fn test_normalize_invalid_expiration_becomes_session() {
        for raw in [
            json!({"expirationDate": "not a number"}),
            json!({"expirationDate": -5}),
            json!({"expirationDate": "-12.5"}),
            json!({"expirationDate": true}),
            json!({"expirationDate": null}),
        ] {
            assert_eq!(normalize(&raw).expiration_date, None, "input: {raw}");
        }
    }

    #[test]
    fn test_normalize_total_over_junk_input() {
        for raw in [
            json!({}),
            json!(null),
            json!("just a string"),
            json!([1, 2, 3]),
            json!({"name": null, "value": [], "domain": {}, "path": "", "secure": "yes"}),
        ] {
            let record = normalize(&raw);
            assert_eq!(record.path, "/");
            assert!(!record.secure);
        }
    }

    #[test]
    fn test_normalize_idempotent() {
        let first = normalize(&json!({
            "name": 7, "value": "v", "domain": "d", "secure": "True", "expirationDate": "99.5"
        }));
        let again = normalize(&serde_json::to_value(&first).expect("record serializes"));
        assert_eq!(first, again);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("123"), Some(123.0));
        assert_eq!(parse_float_prefix("  1.5rest"), Some(1.5));
        assert_eq!(parse_float_prefix("-2.25"), Some(-2.25));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("1e"), Some(1.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("+"), None);
    }

    #[test]
    fn test_collection_group_and_flatten() {
        let records = vec![
            CookieRecord {
                name: "a".into(),
                value: "1".into(),
                domain: "b.com".into(),
                path: "/".into(),
                secure: false,
                http_only: false,
                expiration_date: None,
            },
            CookieRecord {
                name: "b".into(),
                value: "2".into(),
                domain: "a.com".into(),
                path: "/".into(),
                secure: true,
                http_only: false,
                expiration_date: Some(10.0),
            },
        ];
        let grouped = CookieCollection::group_by_domain(records.clone());
        assert!(grouped.is_grouped());
        assert_eq!(grouped.len(), 2);

        let flat = grouped.flatten();
        // BTreeMap ordering puts a.com first.
        assert_eq!(flat[0].domain, "a.com");
        assert_eq!(flat[1].domain, "b.com");
        assert_eq!(flat.len(), records.len());
    }

    #[test]
    fn test_record_serde_uses_camel_case_keys() {
        let record = CookieRecord {
            name: "sid".into(),
            value: "abc".into(),
            domain: "x.com".into(),
            path: "/".into(),
            secure: true,
            http_only: true,
            expiration_date: None,
        };
        let value = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(value["httpOnly"], json!(true));
        assert_eq!(value["expirationDate"], json!(null));
    }
}
