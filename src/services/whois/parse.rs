//! WHOIS data parsing and conversion.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::types::{OneOrMany, UpstreamRecord, WhoisRecord};

/// Raw-text keys for the registrant organization, most specific first.
const ORG_KEYS: &[&str] = &["Registrant Organization", "Registrant Organisation", "org"];

/// Raw-text keys for the registrant country, most specific first.
const COUNTRY_KEYS: &[&str] = &["Registrant Country", "Registrant Country Code", "country"];

/// Converts an upstream record into the client-facing shape
pub(crate) fn normalize(record: UpstreamRecord) -> WhoisRecord {
    let raw = record.raw_text.as_str();

    let org = record
        .registrant_name
        .filter(|s| !s.trim().is_empty())
        .or_else(|| raw_field(raw, ORG_KEYS));
    let country = raw_field(raw, COUNTRY_KEYS);

    WhoisRecord {
        domain_name: Some(record.domain)
            .filter(|d| !d.is_empty())
            .map(OneOrMany::One),
        registrar: record.registrar.filter(|s| !s.trim().is_empty()),
        creation_date: single_date(record.creation_date.as_deref()),
        expiration_date: single_date(record.expiration_date.as_deref()),
        updated_date: single_date(record.updated_date.as_deref()),
        name_servers: Some(record.name_servers).filter(|ns| !ns.is_empty()),
        status: OneOrMany::from_vec(record.status),
        emails: OneOrMany::from_vec(dedup_preserving_order(record.emails)),
        org,
        country,
        raw_text: Some(record.raw_text).filter(|r| !r.is_empty()),
    }
}

fn single_date(value: Option<&str>) -> Option<OneOrMany<DateTime<Utc>>> {
    value.and_then(parse_date_string).map(OneOrMany::One)
}

/// Attempts to parse a date string in various formats
pub(crate) fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    let date_str = date_str.trim();
    if date_str.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common WHOIS date formats
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y.%m.%d",
        "%d-%b-%Y",
        "%d.%m.%Y",
        "%d/%m/%Y",
    ];

    for format in &formats {
        if let Ok(naive_dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

/// Value of the first `key: value` line matching one of `keys`.
///
/// Keys are tried in order and compared case-insensitively.
pub(crate) fn raw_field(raw: &str, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        raw.lines().find_map(|line| {
            let (name, value) = line.trim().split_once(':')?;
            let value = value.trim();
            (name.trim().eq_ignore_ascii_case(key) && !value.is_empty()).then(|| value.to_string())
        })
    })
}

fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && seen.insert(v.to_lowercase()))
        .collect()
}
