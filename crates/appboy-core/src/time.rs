// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Timestamp format used on the wire.
//!
//! Appboy expects ISO 8601 timestamps in UTC without a zone suffix and
//! without fractional seconds, e.g. `1970-01-01T00:00:00`.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// `strftime` pattern for wire timestamps.
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Formats a timestamp for the wire, converting it to UTC first.
pub fn format_time<Tz: TimeZone>(time: &DateTime<Tz>) -> String {
	time.with_timezone(&Utc).format(TIME_FORMAT).to_string()
}

/// Parses a wire timestamp back into a UTC time.
pub fn parse_time(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
	NaiveDateTime::parse_from_str(s, TIME_FORMAT).map(|naive| naive.and_utc())
}

/// Serde adapter storing a `DateTime<Utc>` in the wire format.
///
/// Use with `#[serde(with = "appboy_core::time::wire")]`.
pub mod wire {
	use chrono::{DateTime, Utc};
	use serde::{de, Deserialize, Deserializer, Serializer};

	pub fn serialize<S>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&super::format_time(time))
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		super::parse_time(&s).map_err(de::Error::custom)
	}
}
