//! WHOIS 服务模块
//!
//! Wraps the upstream WHOIS/RDAP client and normalizes its answer into
//! [`WhoisRecord`].

mod client;
mod parse;
mod types;

pub use client::{UpstreamWhoisClient, WhoisLookup, WhoisService};
pub use types::{OneOrMany, UpstreamRecord, WhoisRecord};
