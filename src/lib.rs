//! Privacy API - IP geolocation, WHOIS and phishing-domain lookups
//!
//! A thin HTTP facade over three read-only data sources: a local MaxMind
//! country database, an upstream WHOIS/RDAP client and a static list of
//! known phishing domains.
//!
//! # Architecture
//! - `api`: HTTP routes, request/response bodies and middleware
//! - `services`: lookup adapters (geoip, whois, phishing)
//! - `config`: static configuration (TOML + environment)
//! - `runtime`: service construction, server loop and shutdown
//! - `system`: logging setup
//! - `utils`: client IP resolution behind trusted proxies

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
