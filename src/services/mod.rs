//! Lookup adapters
//!
//! - `geoip`: IP to country through the local MaxMind database
//! - `whois`: domain registration data through the upstream WHOIS client
//! - `phishing`: static phishing-domain membership

pub mod geoip;
pub mod phishing;
pub mod whois;

pub use geoip::{CountryLookup, CountryRecord, GeoIpService, GeoLookupResult};
pub use phishing::PhishingDomainSet;
pub use whois::{OneOrMany, WhoisLookup, WhoisRecord, WhoisService};
