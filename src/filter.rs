//! Predicate-based cookie subset selection.
//!
//! Filtering is pure and order-preserving; criteria combine conjunctively.
//! The UI layer hands criteria over as plain data, so the types derive serde.

use serde::{Deserialize, Serialize};

use crate::types::{CookieCollection, CookieRecord};

/// Cookie category selector. `Secure` keeps HTTPS-only cookies, `Http` keeps
/// the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CookieType {
    Secure,
    Http,
}

/// Optional filter criteria. An empty filter (the `Default`) excludes nothing.
///
/// `cookie_type` and `secure_only`/`http_only` are independent conditions and
/// combine conjunctively even when the combination is contradictory
/// (`cookie_type: http` plus `secure_only` always yields an empty result).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CookieFilter {
    pub domain: Option<String>,
    pub secure_only: bool,
    pub http_only: bool,
    pub cookie_type: Option<CookieType>,
}

impl CookieFilter {
    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        self.domain.is_none()
            && !self.secure_only
            && !self.http_only
            && self.cookie_type.is_none()
    }

    /// Checks a single record against every present criterion.
    pub fn matches(&self, cookie: &CookieRecord) -> bool {
        if let Some(domain) = &self.domain {
            if !cookie.domain.contains(domain.as_str()) {
                return false;
            }
        }
        if self.secure_only && !cookie.secure {
            return false;
        }
        if self.http_only && !cookie.http_only {
            return false;
        }
        match self.cookie_type {
            Some(CookieType::Secure) if !cookie.secure => return false,
            Some(CookieType::Http) if cookie.secure => return false,
            _ => {}
        }
        true
    }
}

/// Keeps the order-preserving subsequence of `cookies` matching `filters`.
/// `None` means no exclusion.
pub fn filter_cookies(
    cookies: &[CookieRecord],
    filters: Option<&CookieFilter>,
) -> Vec<CookieRecord> {
    match filters {
        None => cookies.to_vec(),
        Some(filter) => cookies
            .iter()
            .filter(|cookie| filter.matches(cookie))
            .cloned()
            .collect(),
    }
}

/// Applies the filter through a collection, keeping its shape. Domains left
/// without any cookie are dropped from the grouped form.
pub fn filter_collection(
    collection: &CookieCollection,
    filters: Option<&CookieFilter>,
) -> CookieCollection {
    match collection {
        CookieCollection::Flat(records) => {
            CookieCollection::Flat(filter_cookies(records, filters))
        }
        CookieCollection::Grouped(map) => CookieCollection::Grouped(
            map.iter()
                .map(|(domain, records)| (domain.clone(), filter_cookies(records, filters)))
                .filter(|(_, records)| !records.is_empty())
                .collect(),
        ),
    }
}
