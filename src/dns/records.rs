//! DNS JSON response schema and MX record data.
//!
//! The DoH JSON format (Google `resolve`, Cloudflare `dns-query`) returns an
//! object with a `Status` rcode and an optional `Answer` array. Only the
//! answers' `data` strings matter to the filter.

use serde::Deserialize;

use crate::config::MX_RECORD_TYPE;

/// Top-level DNS JSON response.
#[derive(Debug, Clone, Deserialize)]
pub struct DohResponse {
    /// DNS response code (0 = NOERROR, 3 = NXDOMAIN, ...)
    #[serde(rename = "Status")]
    pub status: u32,
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DohAnswer>,
}

/// One entry of the `Answer` array.
#[derive(Debug, Clone, Deserialize)]
pub struct DohAnswer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub record_type: Option<u16>,
    pub data: String,
}

impl DohResponse {
    /// Raw `data` strings of the MX answers, in response order.
    ///
    /// Answers that declare another record type (a CNAME hop in front of the
    /// MX set, for instance) are left out; answers without a type are kept.
    pub fn mx_data(self) -> Vec<String> {
        self.answer
            .into_iter()
            .filter(|a| a.record_type.map_or(true, |t| t == MX_RECORD_TYPE))
            .map(|a| a.data)
            .collect()
    }
}

/// A parsed MX record (`"<preference> <exchange>."`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub preference: u16,
    /// Exchange host, lower-cased, without the trailing dot.
    pub exchange: String,
}

impl MxRecord {
    /// Parses the data field of an MX answer.
    ///
    /// Returns `None` unless the string is exactly a numeric preference
    /// followed by a host.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split_whitespace();
        let preference = parts.next()?.parse().ok()?;
        let exchange = parts.next()?.trim_end_matches('.').to_lowercase();
        if parts.next().is_some() || exchange.is_empty() {
            return None;
        }
        Some(Self {
            preference,
            exchange,
        })
    }
}
